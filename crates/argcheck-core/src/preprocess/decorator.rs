//! The preprocessing decorator
//!
//! [`Preprocess`] collects per-parameter specs and is applied once to a
//! [`Callable`]. Everything that can be checked about the configuration is
//! checked then, so a misconfigured decorator never produces a wrapper.
//!
//! On every call the wrapper binds the arguments, then visits the declared
//! parameters in declaration order: coercion first, then validation or the
//! custom preprocessor. The first failure is returned and the wrapped
//! function is not entered.
//!
//! ```
//! use argcheck_core::{coerce, preprocess, Callable, CallArgs, Conversion, Function, Signature, Value, ValueType};
//!
//! let floordiff = Function::new(Signature::new("floordiff").param("x").param("y"), |args| {
//!     Ok(Value::Int(args["x"].as_int().unwrap_or(0) - args["y"].as_int().unwrap_or(0)))
//! });
//! let floordiff = preprocess()
//!     .arg("x", coerce(ValueType::Float, Conversion::Int))
//!     .arg("y", coerce(ValueType::Float, Conversion::Int))
//!     .apply(floordiff)
//!     .unwrap();
//!
//! let result = floordiff.call(CallArgs::positional([3.2, 2.5])).unwrap();
//! assert_eq!(result, Value::Int(1));
//! ```
//!
//! Copyright (c) 2025 Argcheck Team
//! Licensed under the Apache-2.0 license

use super::{ParamSpec, Preprocessor};
use crate::check::Check;
use crate::coerce::Coercion;
use crate::error::{Error, Result};
use crate::function::Callable;
use crate::signature::{CallArgs, Signature};
use crate::value::Value;
use std::fmt;
use std::sync::Arc;

/// Builder for a preprocessing decorator
#[derive(Debug, Clone)]
pub struct Preprocess {
    factory: String,
    funcname: Option<String>,
    specs: Vec<(String, ParamSpec)>,
    rejected: Vec<(String, String)>,
    problems: Vec<String>,
}

impl Default for Preprocess {
    fn default() -> Self {
        Self::new()
    }
}

impl Preprocess {
    pub fn new() -> Self {
        Self {
            factory: "preprocess".to_string(),
            funcname: None,
            specs: Vec::new(),
            rejected: Vec::new(),
            problems: Vec::new(),
        }
    }

    /// Name reported in configuration errors, e.g. `expect_bounded`
    pub(crate) fn factory(mut self, name: &str) -> Self {
        self.factory = name.to_string();
        self
    }

    /// Record a configuration problem to report when the decorator is applied
    pub(crate) fn problem(mut self, message: String) -> Self {
        self.problems.push(message);
        self
    }

    /// Declare what to do with one parameter
    pub fn arg(mut self, name: impl Into<String>, spec: impl Into<ParamSpec>) -> Self {
        self.specs.push((name.into(), spec.into()));
        self
    }

    /// Function name used in mismatch messages instead of the signature's
    pub fn funcname(mut self, name: impl Into<String>) -> Self {
        self.funcname = Some(name.into());
        self
    }

    /// Fail calls that pass `keyword` as a keyword argument, with `message`
    pub fn reject_keyword(mut self, keyword: impl Into<String>, message: impl Into<String>) -> Self {
        self.rejected.push((keyword.into(), message.into()));
        self
    }

    pub fn specs(&self) -> &[(String, ParamSpec)] {
        &self.specs
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty() && self.rejected.is_empty()
    }

    /// Wrap `inner`, validating the configuration against its signature
    pub fn apply<C: Callable + 'static>(&self, inner: C) -> Result<Preprocessed> {
        if let Some(problem) = self.problems.first() {
            return Err(Error::configuration(problem.clone()));
        }

        let signature = inner.signature();
        signature.validate()?;

        let mut steps: Vec<Step> = Vec::new();
        for (name, spec) in &self.specs {
            let index = signature.position(name).ok_or_else(|| {
                Error::configuration(format!(
                    "{}() got an argument '{}' that {}() does not declare",
                    self.factory,
                    name,
                    signature.name()
                ))
            })?;
            self.validate_spec(name, spec)?;

            let step = match steps.iter_mut().position(|s| s.index == index) {
                Some(existing) => &mut steps[existing],
                None => {
                    steps.push(Step::new(index, name));
                    let last = steps.len() - 1;
                    &mut steps[last]
                }
            };
            step.add(spec.clone()).map_err(|class| {
                Error::configuration(format!(
                    "{}() got more than one {} for argument '{}'",
                    self.factory, class, name
                ))
            })?;
        }
        steps.sort_by_key(|s| s.index);

        let funcname = self
            .funcname
            .clone()
            .unwrap_or_else(|| signature.name().to_string());
        log::debug!(
            "{}() applied to {}(), checking {} parameter(s)",
            self.factory,
            funcname,
            steps.len()
        );

        Ok(Preprocessed {
            inner: Arc::new(inner),
            funcname,
            rejected: self.rejected.clone(),
            steps,
        })
    }

    fn validate_spec(&self, name: &str, spec: &ParamSpec) -> Result<()> {
        match spec {
            ParamSpec::Validate(check) => check.validate_config(&self.factory, name),
            ParamSpec::Coerce(coercion) => coercion.validate_config(name),
            ParamSpec::Custom(_) => Ok(()),
        }
    }
}

/// Start an empty decorator
pub fn preprocess() -> Preprocess {
    Preprocess::new()
}

/// Decorator failing calls that pass any of the named keywords
pub fn reject_keywords<I, K, M>(keywords: I) -> Preprocess
where
    I: IntoIterator<Item = (K, M)>,
    K: Into<String>,
    M: Into<String>,
{
    keywords
        .into_iter()
        .fold(Preprocess::new().factory("reject_keywords"), |decorator, (keyword, message)| {
            decorator.reject_keyword(keyword, message)
        })
}

#[derive(Debug, Clone)]
enum Stage {
    Validate(Check),
    Custom(Preprocessor),
}

/// Everything one decorator does with one parameter
#[derive(Debug, Clone)]
struct Step {
    index: usize,
    name: String,
    coercion: Option<Coercion>,
    stage: Option<Stage>,
}

impl Step {
    fn new(index: usize, name: &str) -> Self {
        Self {
            index,
            name: name.to_string(),
            coercion: None,
            stage: None,
        }
    }

    /// Returns the spec class on a duplicate
    fn add(&mut self, spec: ParamSpec) -> std::result::Result<(), &'static str> {
        if spec.is_coercion() && self.coercion.is_some() {
            return Err("coercion");
        }
        if !spec.is_coercion() && self.stage.is_some() {
            return Err("validator");
        }
        match spec {
            ParamSpec::Coerce(coercion) => self.coercion = Some(coercion),
            ParamSpec::Validate(check) => self.stage = Some(Stage::Validate(check)),
            ParamSpec::Custom(preprocessor) => self.stage = Some(Stage::Custom(preprocessor)),
        }
        Ok(())
    }

    fn run(&self, function: &str, value: Value) -> Result<Value> {
        let value = match &self.coercion {
            Some(coercion) => coercion.apply(value)?,
            None => value,
        };
        match &self.stage {
            Some(Stage::Validate(check)) => check.apply(function, &self.name, value),
            Some(Stage::Custom(preprocessor)) => preprocessor.apply(function, &self.name, value),
            None => Ok(value),
        }
    }
}

/// A callable wrapped by a [`Preprocess`] decorator
#[derive(Clone)]
pub struct Preprocessed {
    inner: Arc<dyn Callable>,
    funcname: String,
    rejected: Vec<(String, String)>,
    steps: Vec<Step>,
}

impl Preprocessed {
    /// Name used in mismatch messages
    pub fn funcname(&self) -> &str {
        &self.funcname
    }

    /// Declared parameters this decorator touches, in the order they run
    pub fn checked_parameters(&self) -> impl Iterator<Item = &str> {
        self.steps.iter().map(|s| s.name.as_str())
    }
}

impl fmt::Debug for Preprocessed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Preprocessed")
            .field("funcname", &self.funcname)
            .field("steps", &self.steps)
            .finish_non_exhaustive()
    }
}

impl Callable for Preprocessed {
    fn signature(&self) -> &Signature {
        self.inner.signature()
    }

    fn call(&self, args: CallArgs) -> Result<Value> {
        if let Some((keyword, message)) = self
            .rejected
            .iter()
            .find(|(keyword, _)| args.has_keyword(keyword))
        {
            return Err(Error::RejectedKeyword {
                function: self.funcname.clone(),
                keyword: keyword.clone(),
                message: message.clone(),
            });
        }

        let mut bound = self.inner.signature().bind(args)?;
        for step in &self.steps {
            let value = bound.take_at(step.index);
            bound.put_at(step.index, step.run(&self.funcname, value)?);
        }
        self.inner.call(bound.into_call_args())
    }
}
