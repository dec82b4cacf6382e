//! Callables that decorators wrap
//!
//! Copyright (c) 2025 Argcheck Team
//! Licensed under the Apache-2.0 license

use crate::error::Result;
use crate::signature::{BoundArguments, CallArgs, Signature};
use crate::value::Value;
use std::fmt;
use std::sync::Arc;

/// Anything with a declared signature that can be called with arguments
///
/// Decorated functions are callables themselves, so decorators stack.
pub trait Callable: Send + Sync {
    fn signature(&self) -> &Signature;

    fn call(&self, args: CallArgs) -> Result<Value>;

    /// Call with positional arguments only
    fn call_positional(&self, args: Vec<Value>) -> Result<Value> {
        self.call(CallArgs::positional(args))
    }
}

type Body = dyn Fn(&BoundArguments) -> Result<Value> + Send + Sync;

/// A plain Rust closure with a signature
#[derive(Clone)]
pub struct Function {
    signature: Signature,
    body: Arc<Body>,
}

impl Function {
    pub fn new<F>(signature: Signature, body: F) -> Self
    where
        F: Fn(&BoundArguments) -> Result<Value> + Send + Sync + 'static,
    {
        Self {
            signature,
            body: Arc::new(body),
        }
    }

    pub fn name(&self) -> &str {
        self.signature.name()
    }
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Function")
            .field("signature", &self.signature)
            .finish_non_exhaustive()
    }
}

impl Callable for Function {
    fn signature(&self) -> &Signature {
        &self.signature
    }

    fn call(&self, args: CallArgs) -> Result<Value> {
        let bound = self.signature.bind(args)?;
        (self.body)(&bound)
    }
}

impl<C: Callable + ?Sized> Callable for Arc<C> {
    fn signature(&self) -> &Signature {
        (**self).signature()
    }

    fn call(&self, args: CallArgs) -> Result<Value> {
        (**self).call(args)
    }
}

impl<C: Callable + ?Sized> Callable for Box<C> {
    fn signature(&self) -> &Signature {
        (**self).signature()
    }

    fn call(&self, args: CallArgs) -> Result<Value> {
        (**self).call(args)
    }
}
