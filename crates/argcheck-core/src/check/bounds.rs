//! Inclusive and strict range bounds
//!
//! Copyright (c) 2025 Argcheck Team
//! Licensed under the Apache-2.0 license

use crate::value::Value;
use std::cmp::Ordering;

/// A range with an optional lower and an optional upper bound
#[derive(Debug, Clone, PartialEq)]
pub struct Bounds {
    lower: Option<Value>,
    upper: Option<Value>,
}

impl Bounds {
    /// Create bounds; `Value::None` on either side is treated as unbounded
    pub fn new(lower: Option<Value>, upper: Option<Value>) -> Self {
        Self {
            lower: lower.filter(|v| !v.is_none()),
            upper: upper.filter(|v| !v.is_none()),
        }
    }

    pub fn between(lower: impl Into<Value>, upper: impl Into<Value>) -> Self {
        Self::new(Some(lower.into()), Some(upper.into()))
    }

    pub fn at_least(lower: impl Into<Value>) -> Self {
        Self::new(Some(lower.into()), None)
    }

    pub fn at_most(upper: impl Into<Value>) -> Self {
        Self::new(None, Some(upper.into()))
    }

    pub fn lower(&self) -> Option<&Value> {
        self.lower.as_ref()
    }

    pub fn upper(&self) -> Option<&Value> {
        self.upper.as_ref()
    }

    /// Whether `value` lies within the bounds; `None` if it cannot be ordered against them
    ///
    /// A numeric value that compares with nothing (NaN) lies outside every range.
    pub fn contains(&self, value: &Value, strict: bool) -> Option<bool> {
        let above_lower = match &self.lower {
            Some(lower) => match order(value, lower)? {
                Some(ord) => ord == Ordering::Greater || (!strict && ord == Ordering::Equal),
                None => false,
            },
            None => true,
        };
        let below_upper = match &self.upper {
            Some(upper) => match order(value, upper)? {
                Some(ord) => ord == Ordering::Less || (!strict && ord == Ordering::Equal),
                None => false,
            },
            None => true,
        };
        Some(above_lower && below_upper)
    }

    /// Description of the accepted range, e.g. `inclusively between 1 and 5`
    pub fn predicate(&self, strict: bool) -> String {
        match (&self.lower, &self.upper, strict) {
            (Some(lo), Some(hi), false) => format!("inclusively between {} and {}", lo, hi),
            (Some(lo), Some(hi), true) => format!("exclusively between {} and {}", lo, hi),
            (Some(lo), None, false) => format!("greater than or equal to {}", lo),
            (Some(lo), None, true) => format!("strictly greater than {}", lo),
            (None, Some(hi), false) => format!("less than or equal to {}", hi),
            (None, Some(hi), true) => format!("strictly less than {}", hi),
            (None, None, _) => "of any magnitude".to_string(),
        }
    }

    /// Reject bounds that can never be satisfied or constrain nothing
    pub(crate) fn validate(&self) -> Result<(), String> {
        match (&self.lower, &self.upper) {
            (None, None) => Err("at least one of a lower and an upper bound".to_string()),
            (Some(lo), Some(hi)) => match lo.compare(hi) {
                Some(Ordering::Greater) => Err(format!(
                    "a lower bound no greater than the upper bound, not ({}, {})",
                    lo, hi
                )),
                Some(_) => Ok(()),
                None => Err(format!("comparable bounds, not ({}, {})", lo.repr(), hi.repr())),
            },
            _ => Ok(()),
        }
    }
}

/// Order `value` against a bound; the inner `None` marks numbers that are unordered
fn order(value: &Value, bound: &Value) -> Option<Option<Ordering>> {
    match value.compare(bound) {
        Some(ord) => Some(Some(ord)),
        None if value.as_number().is_some() && bound.as_number().is_some() => Some(None),
        None => None,
    }
}

/// `(lower, upper)` pairs, where `Value::None` leaves that side unbounded
impl<L: Into<Value>, U: Into<Value>> From<(L, U)> for Bounds {
    fn from((lower, upper): (L, U)) -> Self {
        Self::new(Some(lower.into()), Some(upper.into()))
    }
}
