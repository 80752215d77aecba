//! Filter constraints and the comparator engine.
//!
//! A [`FilterConstraint`] is a single search filter predicate: a setting
//! name, a comparator, and the expected value. [`compare`] evaluates the
//! comparator between two typed values.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::op::Comparator;
use crate::property::{PropertyEntry, PropertyStore};
use crate::value::TypedValue;

/// Compares two typed values.
///
/// Values of different kinds never compare true, not even for
/// `NotEquals`. Bool and String accept only equality comparators, and
/// strings compare ignoring ASCII case. Float is widened to `f64` before
/// comparing. Blob and Empty never match.
///
/// # Example
///
/// ```
/// use sessionseek::{compare, Comparator, TypedValue};
///
/// assert!(compare(&TypedValue::Int32(5), &TypedValue::Int32(5), Comparator::GreaterThanEquals));
/// assert!(!compare(&TypedValue::Int32(5), &TypedValue::Int64(5), Comparator::Equals));
/// assert!(!compare(&"a".into(), &"b".into(), Comparator::GreaterThan));
/// ```
pub fn compare(a: &TypedValue, b: &TypedValue, op: Comparator) -> bool {
    match (a, b) {
        (TypedValue::Bool(a), TypedValue::Bool(b)) => op.eval_equality(a, b),
        (TypedValue::String(a), TypedValue::String(b)) => op.eval_equal(a.eq_ignore_ascii_case(b)),

        (TypedValue::Int32(a), TypedValue::Int32(b)) => op.eval(a, b),
        (TypedValue::Int64(a), TypedValue::Int64(b)) => op.eval(a, b),
        (TypedValue::Float(a), TypedValue::Float(b)) => op.eval(&(*a as f64), &(*b as f64)),
        (TypedValue::Double(a), TypedValue::Double(b)) => op.eval(a, b),

        (TypedValue::Blob(_), TypedValue::Blob(_)) | (TypedValue::Empty, TypedValue::Empty) => false,

        // Kind mismatch. Listed per variant so a new kind fails to compile here.
        (
            TypedValue::Bool(_)
            | TypedValue::Int32(_)
            | TypedValue::Int64(_)
            | TypedValue::Float(_)
            | TypedValue::Double(_)
            | TypedValue::String(_)
            | TypedValue::Blob(_)
            | TypedValue::Empty,
            _,
        ) => false,
    }
}

/// How a single constraint judged a property store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConstraintOutcome {
    /// The setting exists and satisfies the comparator.
    Passed,
    /// The setting exists and fails the comparator.
    Failed,
    /// The store has no such setting; the constraint does not apply.
    Skipped,
}

impl ConstraintOutcome {
    /// Returns `false` only for [`ConstraintOutcome::Failed`].
    pub fn admits(self) -> bool {
        !matches!(self, ConstraintOutcome::Failed)
    }
}

/// A single search filter predicate.
///
/// # Example
///
/// ```
/// use sessionseek::{Comparator, FilterConstraint, PropertyEntry};
///
/// let region = FilterConstraint::new("Region", Comparator::Equals, "NA");
/// let slots = FilterConstraint::from_entry(PropertyEntry::int("Slots", 2), Comparator::GreaterThanEquals);
/// assert_eq!(region.key, "Region");
/// assert_eq!(slots.op, Comparator::GreaterThanEquals);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterConstraint {
    /// Setting name to look up.
    pub key: String,
    /// Comparator applied as `stored <op> expected`.
    #[serde(default)]
    pub op: Comparator,
    /// Value the stored setting is compared against.
    pub value: TypedValue,
}

impl FilterConstraint {
    /// Creates a new constraint.
    pub fn new(key: impl Into<String>, op: Comparator, value: impl Into<TypedValue>) -> Self {
        FilterConstraint {
            key: key.into(),
            op,
            value: value.into(),
        }
    }

    /// Creates a constraint from a property literal and a comparator.
    pub fn from_entry(entry: PropertyEntry, op: Comparator) -> Self {
        FilterConstraint {
            key: entry.key,
            op,
            value: entry.value,
        }
    }

    /// Tests a stored value against this constraint.
    pub fn matches(&self, stored: &TypedValue) -> bool {
        compare(stored, &self.value, self.op)
    }

    /// Evaluates this constraint against a property store.
    pub fn evaluate(&self, store: &PropertyStore) -> ConstraintOutcome {
        match store.get(&self.key) {
            None => ConstraintOutcome::Skipped,
            Some(stored) if self.matches(stored) => ConstraintOutcome::Passed,
            Some(_) => ConstraintOutcome::Failed,
        }
    }

    /// Reports whether the comparator can ever succeed for the expected value.
    ///
    /// Filtering never calls this; a constraint that fails validation simply
    /// rejects every store that carries its key.
    pub fn validate(&self) -> Result<()> {
        self.op.check(self.value.kind())
    }
}

impl std::fmt::Display for FilterConstraint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {} {} ({})",
            self.key,
            self.op.symbol(),
            self.value,
            self.value.type_name()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SessionSeekError;

    fn all_kinds() -> Vec<TypedValue> {
        vec![
            TypedValue::Bool(true),
            TypedValue::Int32(5),
            TypedValue::Int64(5),
            TypedValue::Float(5.0),
            TypedValue::Double(5.0),
            TypedValue::from("5"),
            TypedValue::Blob(vec![5]),
            TypedValue::Empty,
        ]
    }

    #[test]
    fn mismatched_kinds_never_match() {
        let values = all_kinds();
        for (i, a) in values.iter().enumerate() {
            for (j, b) in values.iter().enumerate() {
                if i == j {
                    continue;
                }
                for op in Comparator::ALL {
                    assert!(!compare(a, b, op), "{a:?} {op} {b:?}");
                }
            }
        }
    }

    #[test]
    fn numeric_boundaries() {
        let five = TypedValue::Int32(5);
        assert!(compare(&five, &five, Comparator::GreaterThanEquals));
        assert!(compare(&five, &five, Comparator::LessThanEquals));
        assert!(compare(&five, &five, Comparator::Equals));
        assert!(!compare(&five, &five, Comparator::GreaterThan));
        assert!(!compare(&five, &five, Comparator::LessThan));
        assert!(!compare(&five, &five, Comparator::NotEquals));
    }

    #[test]
    fn numeric_ordering_each_kind() {
        let pairs = [
            (TypedValue::Int32(-3), TypedValue::Int32(2)),
            (TypedValue::Int64(3), TypedValue::Int64(u64::MAX)),
            (TypedValue::Float(0.25), TypedValue::Float(0.5)),
            (TypedValue::Double(-1.5), TypedValue::Double(1.5)),
        ];
        for (small, big) in pairs {
            assert!(compare(&small, &big, Comparator::LessThan));
            assert!(compare(&small, &big, Comparator::LessThanEquals));
            assert!(compare(&small, &big, Comparator::NotEquals));
            assert!(compare(&big, &small, Comparator::GreaterThan));
            assert!(compare(&big, &small, Comparator::GreaterThanEquals));
            assert!(!compare(&small, &big, Comparator::Equals));
            assert!(!compare(&small, &big, Comparator::GreaterThan));
        }
    }

    #[test]
    fn int64_is_unsigned() {
        let high = TypedValue::Int64(1 << 63);
        let low = TypedValue::Int64(1);
        assert!(compare(&high, &low, Comparator::GreaterThan));
    }

    #[test]
    fn float_widens_before_comparing() {
        let a = TypedValue::Float(0.1);
        let b = TypedValue::Float(0.1);
        assert!(compare(&a, &b, Comparator::Equals));
        assert!(!compare(&a, &TypedValue::Float(0.2), Comparator::Equals));
    }

    #[test]
    fn float_nan() {
        let nan = TypedValue::Float(f32::NAN);
        assert!(compare(&nan, &nan, Comparator::NotEquals));
        assert!(!compare(&nan, &nan, Comparator::Equals));
        assert!(!compare(&nan, &TypedValue::Float(1.0), Comparator::GreaterThanEquals));
    }

    #[test]
    fn bool_and_string_equality_only() {
        let t = TypedValue::Bool(true);
        let f = TypedValue::Bool(false);
        assert!(compare(&t, &t, Comparator::Equals));
        assert!(compare(&t, &f, Comparator::NotEquals));
        assert!(!compare(&t, &f, Comparator::GreaterThan));
        assert!(!compare(&t, &t, Comparator::GreaterThanEquals));

        let a = TypedValue::from("a");
        let b = TypedValue::from("b");
        assert!(compare(&a, &a, Comparator::Equals));
        assert!(compare(&a, &b, Comparator::NotEquals));
        assert!(!compare(&a, &b, Comparator::GreaterThan));
        assert!(!compare(&a, &b, Comparator::LessThan));
        assert!(!compare(&a, &a, Comparator::LessThanEquals));
    }

    #[test]
    fn strings_ignore_case() {
        assert!(compare(&"NA".into(), &"na".into(), Comparator::Equals));
        assert!(!compare(&"NA".into(), &"na".into(), Comparator::NotEquals));
        assert!(compare(&"NA".into(), &"EU".into(), Comparator::NotEquals));
        assert!(!compare(&"NA".into(), &"na".into(), Comparator::GreaterThanEquals));
    }

    #[test]
    fn blob_and_empty_never_match() {
        let blob = TypedValue::Blob(vec![1, 2]);
        for op in Comparator::ALL {
            assert!(!compare(&blob, &blob, op));
            assert!(!compare(&TypedValue::Empty, &TypedValue::Empty, op));
        }
    }

    #[test]
    fn constraint_evaluate() {
        let store: PropertyStore = vec![
            PropertyEntry::string("Region", "NA"),
            PropertyEntry::int("Slots", 4),
        ]
        .into();

        let na = FilterConstraint::new("Region", Comparator::Equals, "NA");
        let eu = FilterConstraint::new("Region", Comparator::Equals, "EU");
        let ping = FilterConstraint::new("Ping", Comparator::LessThan, 50);

        assert_eq!(na.evaluate(&store), ConstraintOutcome::Passed);
        assert_eq!(eu.evaluate(&store), ConstraintOutcome::Failed);
        assert_eq!(ping.evaluate(&store), ConstraintOutcome::Skipped);

        assert!(ConstraintOutcome::Skipped.admits());
        assert!(!ConstraintOutcome::Failed.admits());
    }

    #[test]
    fn constraint_stored_value_is_left_operand() {
        let store: PropertyStore = vec![PropertyEntry::int("Slots", 4)].into();
        let at_least_two = FilterConstraint::new("Slots", Comparator::GreaterThanEquals, 2);
        let at_least_six = FilterConstraint::new("Slots", Comparator::GreaterThanEquals, 6);
        assert_eq!(at_least_two.evaluate(&store), ConstraintOutcome::Passed);
        assert_eq!(at_least_six.evaluate(&store), ConstraintOutcome::Failed);
    }

    #[test]
    fn constraint_validate() {
        assert!(FilterConstraint::new("Slots", Comparator::LessThan, 4)
            .validate()
            .is_ok());
        assert!(matches!(
            FilterConstraint::new("Region", Comparator::GreaterThan, "NA").validate(),
            Err(SessionSeekError::UnsupportedOperation { .. })
        ));
    }

    #[test]
    fn constraint_serde_defaults_to_equals() {
        let c: FilterConstraint = serde_yaml::from_str(
            "key: Region\nvalue:\n  type: string\n  value: NA\n",
        )
        .unwrap();
        assert_eq!(c.op, Comparator::Equals);

        let c: FilterConstraint =
            serde_yaml::from_str("key: Slots\nop: gte\nvalue: {type: int32, value: 2}\n").unwrap();
        assert_eq!(c, FilterConstraint::new("Slots", Comparator::GreaterThanEquals, 2));
    }

    #[test]
    fn constraint_display() {
        let c = FilterConstraint::new("Slots", Comparator::GreaterThanEquals, 2);
        assert_eq!(c.to_string(), "Slots >= 2 (int32)");
    }
}
