//! Comparison operators for filter constraints.
//!
//! The [`Comparator`] enum defines the six relations a search filter can
//! apply between a stored session setting and an expected value.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SessionSeekError;
use crate::value::ValueKind;

/// Comparison operator for a filter constraint.
///
/// Operator support depends on the value kind:
/// - **Bool, String**: `Equals`, `NotEquals`
/// - **Int32, Int64, Float, Double**: all six
/// - **Blob, Empty**: none
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Comparator {
    /// Equal.
    #[default]
    #[serde(alias = "eq")]
    Equals,
    /// Not equal.
    #[serde(alias = "ne")]
    NotEquals,
    /// Greater than.
    #[serde(alias = "gt")]
    GreaterThan,
    /// Greater than or equal.
    #[serde(alias = "gte")]
    GreaterThanEquals,
    /// Less than.
    #[serde(alias = "lt")]
    LessThan,
    /// Less than or equal.
    #[serde(alias = "lte")]
    LessThanEquals,
}

impl Comparator {
    /// All comparators, in declaration order.
    pub const ALL: [Comparator; 6] = [
        Comparator::Equals,
        Comparator::NotEquals,
        Comparator::GreaterThan,
        Comparator::GreaterThanEquals,
        Comparator::LessThan,
        Comparator::LessThanEquals,
    ];

    /// Returns `true` for `Equals` and `NotEquals`.
    pub fn is_equality(self) -> bool {
        matches!(self, Comparator::Equals | Comparator::NotEquals)
    }

    /// Returns `true` if this comparator can ever succeed on values of `kind`.
    pub fn supports(self, kind: ValueKind) -> bool {
        match kind {
            ValueKind::Bool | ValueKind::String => self.is_equality(),
            ValueKind::Int32 | ValueKind::Int64 | ValueKind::Float | ValueKind::Double => true,
            ValueKind::Blob | ValueKind::Empty => false,
        }
    }

    /// Checks that this comparator is usable with `kind`.
    pub fn check(self, kind: ValueKind) -> Result<(), SessionSeekError> {
        if self.supports(kind) {
            Ok(())
        } else {
            Err(SessionSeekError::UnsupportedOperation {
                op: self.as_str(),
                kind: kind.as_str(),
            })
        }
    }

    /// Applies this comparator with plain operator semantics.
    ///
    /// The inclusive forms are evaluated as `a == b || a > b` and
    /// `a == b || a < b`, so NaN fails everything except `NotEquals`.
    #[allow(clippy::double_comparisons)]
    pub fn eval<T: PartialOrd>(self, a: &T, b: &T) -> bool {
        match self {
            Comparator::Equals => a == b,
            Comparator::NotEquals => a != b,
            Comparator::GreaterThan => a > b,
            Comparator::GreaterThanEquals => a == b || a > b,
            Comparator::LessThan => a < b,
            Comparator::LessThanEquals => a == b || a < b,
        }
    }

    /// Applies an equality-only comparator; ordering comparators yield `false`.
    pub fn eval_equality<T: PartialEq + ?Sized>(self, a: &T, b: &T) -> bool {
        self.eval_equal(a == b)
    }

    /// Applies an equality-only comparator to an already computed equality.
    pub fn eval_equal(self, equal: bool) -> bool {
        match self {
            Comparator::Equals => equal,
            Comparator::NotEquals => !equal,
            _ => false,
        }
    }

    /// Returns the short name of this comparator.
    pub fn as_str(self) -> &'static str {
        match self {
            Comparator::Equals => "eq",
            Comparator::NotEquals => "ne",
            Comparator::GreaterThan => "gt",
            Comparator::GreaterThanEquals => "gte",
            Comparator::LessThan => "lt",
            Comparator::LessThanEquals => "lte",
        }
    }

    /// Returns the operator symbol.
    pub fn symbol(self) -> &'static str {
        match self {
            Comparator::Equals => "==",
            Comparator::NotEquals => "!=",
            Comparator::GreaterThan => ">",
            Comparator::GreaterThanEquals => ">=",
            Comparator::LessThan => "<",
            Comparator::LessThanEquals => "<=",
        }
    }
}

impl std::fmt::Display for Comparator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Comparator {
    type Err = SessionSeekError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace(['_', '-'], "");
        let op = match normalized.as_str() {
            "eq" | "equals" | "==" | "=" => Comparator::Equals,
            "ne" | "notequals" | "!=" => Comparator::NotEquals,
            "gt" | "greaterthan" | ">" => Comparator::GreaterThan,
            "gte" | "greaterthanequals" | ">=" => Comparator::GreaterThanEquals,
            "lt" | "lessthan" | "<" => Comparator::LessThan,
            "lte" | "lessthanequals" | "<=" => Comparator::LessThanEquals,
            _ => return Err(SessionSeekError::InvalidComparator(s.to_string())),
        };
        Ok(op)
    }
}
