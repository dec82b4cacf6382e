//! Function signatures and argument binding
//!
//! Binding maps a call's positional and keyword arguments onto the declared
//! parameters, then fills omitted parameters from their defaults, so that
//! every parameter has a value before any check runs.
//!
//! Copyright (c) 2025 Argcheck Team
//! Licensed under the Apache-2.0 license

use crate::error::{Error, Result};
use crate::value::Value;
use std::collections::HashSet;
use std::ops::Index;

/// One declared parameter
#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    name: String,
    default: Option<Value>,
}

impl Parameter {
    /// A parameter the caller must supply
    pub fn required(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            default: None,
        }
    }

    /// A parameter with a default value
    pub fn with_default(name: impl Into<String>, default: impl Into<Value>) -> Self {
        Self {
            name: name.into(),
            default: Some(default.into()),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn default(&self) -> Option<&Value> {
        self.default.as_ref()
    }
}

/// Name and ordered parameters of a callable
#[derive(Debug, Clone, PartialEq)]
pub struct Signature {
    name: String,
    parameters: Vec<Parameter>,
}

impl Signature {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parameters: Vec::new(),
        }
    }

    /// Add a required parameter
    pub fn param(mut self, name: impl Into<String>) -> Self {
        self.parameters.push(Parameter::required(name));
        self
    }

    /// Add a parameter with a default value
    pub fn param_with_default(mut self, name: impl Into<String>, default: impl Into<Value>) -> Self {
        self.parameters.push(Parameter::with_default(name, default));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parameters(&self) -> &[Parameter] {
        &self.parameters
    }

    /// Declaration index of a parameter
    pub fn position(&self, name: &str) -> Option<usize> {
        self.parameters.iter().position(|p| p.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// Reject duplicate names and required parameters after defaulted ones
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        let mut saw_default = false;
        for param in &self.parameters {
            if !seen.insert(param.name.as_str()) {
                return Err(Error::configuration(format!(
                    "duplicate parameter '{}' in signature of {}()",
                    param.name, self.name
                )));
            }
            match param.default {
                Some(_) => saw_default = true,
                None if saw_default => {
                    return Err(Error::configuration(format!(
                        "non-default parameter '{}' follows default parameter in {}()",
                        param.name, self.name
                    )));
                }
                None => {}
            }
        }
        Ok(())
    }

    /// Resolve a call's arguments against this signature
    pub fn bind(&self, args: CallArgs) -> Result<BoundArguments> {
        let CallArgs {
            positional,
            keywords,
        } = args;

        if positional.len() > self.parameters.len() {
            return Err(Error::TooManyPositional {
                function: self.name.clone(),
                expected: self.parameters.len(),
                given: positional.len(),
            });
        }

        let mut slots: Vec<Option<Value>> = vec![None; self.parameters.len()];
        for (slot, value) in slots.iter_mut().zip(positional) {
            *slot = Some(value);
        }

        for (keyword, value) in keywords {
            let index = self.position(&keyword).ok_or_else(|| Error::UnexpectedKeyword {
                function: self.name.clone(),
                keyword: keyword.clone(),
            })?;
            if slots[index].is_some() {
                return Err(Error::DuplicateArgument {
                    function: self.name.clone(),
                    argument: keyword,
                });
            }
            slots[index] = Some(value);
        }

        let mut missing = Vec::new();
        let mut entries = Vec::with_capacity(slots.len());
        for (param, slot) in self.parameters.iter().zip(slots) {
            match slot.or_else(|| param.default.clone()) {
                Some(value) => entries.push((param.name.clone(), value)),
                None => missing.push(param.name.clone()),
            }
        }

        if !missing.is_empty() {
            return Err(Error::MissingArguments {
                function: self.name.clone(),
                arguments: missing,
            });
        }

        Ok(BoundArguments { entries })
    }
}

/// Positional and keyword arguments of one call
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CallArgs {
    positional: Vec<Value>,
    keywords: Vec<(String, Value)>,
}

impl CallArgs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Call with positional arguments only
    pub fn positional<I, V>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Self {
            positional: values.into_iter().map(Into::into).collect(),
            keywords: Vec::new(),
        }
    }

    /// Append a positional argument
    pub fn arg(mut self, value: impl Into<Value>) -> Self {
        self.positional.push(value.into());
        self
    }

    /// Append a keyword argument
    pub fn kwarg(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.keywords.push((name.into(), value.into()));
        self
    }

    pub fn positional_values(&self) -> &[Value] {
        &self.positional
    }

    pub fn keywords(&self) -> &[(String, Value)] {
        &self.keywords
    }

    pub fn has_keyword(&self, name: &str) -> bool {
        self.keywords.iter().any(|(k, _)| k == name)
    }
}

/// Resolved value of every declared parameter, in declaration order
#[derive(Debug, Clone, PartialEq)]
pub struct BoundArguments {
    entries: Vec<(String, Value)>,
}

impl BoundArguments {
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.entries.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    /// Replace a parameter's value, returning the previous one
    pub fn set(&mut self, name: &str, value: Value) -> Option<Value> {
        self.entries
            .iter_mut()
            .find(|(n, _)| n == name)
            .map(|(_, slot)| std::mem::replace(slot, value))
    }

    /// Take the value at a declaration index, leaving `None` in its place
    pub(crate) fn take_at(&mut self, index: usize) -> Value {
        std::mem::replace(&mut self.entries[index].1, Value::None)
    }

    pub(crate) fn put_at(&mut self, index: usize, value: Value) {
        self.entries[index].1 = value;
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v))
    }

    /// Values in declaration order
    pub fn into_values(self) -> Vec<Value> {
        self.entries.into_iter().map(|(_, v)| v).collect()
    }

    /// Re-express the bound values as a fully positional call
    pub fn into_call_args(self) -> CallArgs {
        CallArgs::positional(self.into_values())
    }
}

impl Index<&str> for BoundArguments {
    type Output = Value;

    /// Look up a bound argument by name
    ///
    /// # Panics
    ///
    /// Panics if the signature declares no parameter named `name`. Use
    /// [`BoundArguments::get`] when the name may be absent.
    fn index(&self, name: &str) -> &Value {
        match self.get(name) {
            Some(value) => value,
            None => panic!("no bound argument named '{}'", name),
        }
    }
}
