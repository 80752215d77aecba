//! Typed lookups over a [`PropertyStore`].
//!
//! Every lookup has three outcomes: the setting was found with the expected
//! kind, it was found with a different kind, or no setting has that name.

use serde::{Deserialize, Serialize};

use crate::error::{Result, SessionSeekError};
use crate::property::PropertyStore;
use crate::value::{TypedValue, ValueKind};

/// Outcome of a typed lookup, without the value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LookupStatus {
    Found,
    WrongType,
    NotFound,
}

impl LookupStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            LookupStatus::Found => "found",
            LookupStatus::WrongType => "wrong_type",
            LookupStatus::NotFound => "not_found",
        }
    }
}

impl std::fmt::Display for LookupStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Result of a typed lookup.
#[derive(Debug, Clone, PartialEq)]
pub enum Lookup<T> {
    /// The setting exists with the expected kind.
    Found(T),
    /// The setting exists but holds a different kind.
    WrongType {
        expected: ValueKind,
        actual: ValueKind,
    },
    /// No setting has the requested name.
    NotFound,
}

impl<T> Lookup<T> {
    pub fn is_found(&self) -> bool {
        matches!(self, Lookup::Found(_))
    }

    /// Returns the found value, discarding the failure detail.
    pub fn found(self) -> Option<T> {
        match self {
            Lookup::Found(v) => Some(v),
            _ => None,
        }
    }

    pub fn status(&self) -> LookupStatus {
        match self {
            Lookup::Found(_) => LookupStatus::Found,
            Lookup::WrongType { .. } => LookupStatus::WrongType,
            Lookup::NotFound => LookupStatus::NotFound,
        }
    }

    /// Converts the found value, keeping failures as they are.
    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Lookup<U> {
        match self {
            Lookup::Found(v) => Lookup::Found(f(v)),
            Lookup::WrongType { expected, actual } => Lookup::WrongType { expected, actual },
            Lookup::NotFound => Lookup::NotFound,
        }
    }

    /// Converts into a `Result`, naming `key` in the error.
    pub fn into_result(self, key: &str) -> Result<T> {
        match self {
            Lookup::Found(v) => Ok(v),
            Lookup::WrongType { expected, actual } => Err(SessionSeekError::TypeMismatch {
                key: key.to_string(),
                expected: expected.as_str(),
                actual: actual.as_str(),
            }),
            Lookup::NotFound => Err(SessionSeekError::KeyNotFound(key.to_string())),
        }
    }
}

impl PropertyStore {
    /// Looks up `key` and checks that it holds a value of `expected` kind.
    ///
    /// The first entry with a matching name decides the outcome.
    pub fn find_typed(&self, key: &str, expected: ValueKind) -> Lookup<&TypedValue> {
        match self.get(key) {
            Some(value) if value.kind() == expected => Lookup::Found(value),
            Some(value) => Lookup::WrongType {
                expected,
                actual: value.kind(),
            },
            None => Lookup::NotFound,
        }
    }

    /// Reads an `Int32` setting narrowed to a byte.
    ///
    /// The narrowing keeps only the low eight bits; out-of-range values are
    /// not rejected.
    pub fn get_byte(&self, key: &str) -> Lookup<u8> {
        self.get_int(key).map(|n| n as u8)
    }

    pub fn get_bool(&self, key: &str) -> Lookup<bool> {
        self.typed(key, ValueKind::Bool, |v| match v {
            TypedValue::Bool(b) => Some(*b),
            _ => None,
        })
    }

    pub fn get_int(&self, key: &str) -> Lookup<i32> {
        self.typed(key, ValueKind::Int32, |v| match v {
            TypedValue::Int32(n) => Some(*n),
            _ => None,
        })
    }

    pub fn get_int64(&self, key: &str) -> Lookup<u64> {
        self.typed(key, ValueKind::Int64, |v| match v {
            TypedValue::Int64(n) => Some(*n),
            _ => None,
        })
    }

    pub fn get_float(&self, key: &str) -> Lookup<f32> {
        self.typed(key, ValueKind::Float, |v| match v {
            TypedValue::Float(n) => Some(*n),
            _ => None,
        })
    }

    pub fn get_double(&self, key: &str) -> Lookup<f64> {
        self.typed(key, ValueKind::Double, |v| match v {
            TypedValue::Double(n) => Some(*n),
            _ => None,
        })
    }

    pub fn get_string(&self, key: &str) -> Lookup<&str> {
        self.typed(key, ValueKind::String, |v| match v {
            TypedValue::String(s) => Some(s.as_str()),
            _ => None,
        })
    }

    /// Looks up `key` and extracts its payload; `extract` returns `None`
    /// for any variant other than `expected`.
    fn typed<'a, T>(
        &'a self,
        key: &str,
        expected: ValueKind,
        extract: impl FnOnce(&'a TypedValue) -> Option<T>,
    ) -> Lookup<T> {
        let Some(value) = self.get(key) else {
            return Lookup::NotFound;
        };
        match extract(value) {
            Some(found) => Lookup::Found(found),
            None => Lookup::WrongType {
                expected,
                actual: value.kind(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::property::PropertyEntry;

    fn store() -> PropertyStore {
        vec![
            PropertyEntry::int("Score", 7),
            PropertyEntry::string("Region", "NA"),
            PropertyEntry::int("Big", 300),
            PropertyEntry::bool("Ranked", true),
        ]
        .into()
    }

    #[test]
    fn find_typed_outcomes() {
        let store = store();

        assert_eq!(
            store.find_typed("Score", ValueKind::Int32),
            Lookup::Found(&TypedValue::Int32(7))
        );
        assert_eq!(
            store.find_typed("Score", ValueKind::String).status(),
            LookupStatus::WrongType
        );
        assert_eq!(
            store.find_typed("Missing", ValueKind::Int32).status(),
            LookupStatus::NotFound
        );
    }

    #[test]
    fn wrong_type_reports_kinds() {
        assert_eq!(
            store().find_typed("Region", ValueKind::Bool),
            Lookup::WrongType {
                expected: ValueKind::Bool,
                actual: ValueKind::String
            }
        );
    }

    #[test]
    fn typed_getters() {
        let store = store();
        assert_eq!(store.get_int("Score"), Lookup::Found(7));
        assert_eq!(store.get_string("Region"), Lookup::Found("NA"));
        assert_eq!(store.get_bool("Ranked"), Lookup::Found(true));
        assert_eq!(store.get_float("Score").status(), LookupStatus::WrongType);
        assert_eq!(store.get_double("Nope"), Lookup::NotFound);
        assert_eq!(store.get_int64("Score").status(), LookupStatus::WrongType);
    }

    #[test]
    fn typed_getters_report_stored_kind() {
        let store: PropertyStore = vec![
            PropertyEntry::int64("Seed", 0),
            PropertyEntry::float("Rate", 0.0),
            PropertyEntry::string("Name", ""),
        ]
        .into();

        assert_eq!(store.get_int64("Seed"), Lookup::Found(0));
        assert_eq!(store.get_string("Name"), Lookup::Found(""));
        assert_eq!(
            store.get_double("Rate"),
            Lookup::WrongType {
                expected: ValueKind::Double,
                actual: ValueKind::Float
            }
        );
        assert_eq!(
            store.get_bool("Seed"),
            Lookup::WrongType {
                expected: ValueKind::Bool,
                actual: ValueKind::Int64
            }
        );
        assert_eq!(store.get_int("name").status(), LookupStatus::WrongType);
    }

    #[test]
    fn byte_getter_truncates() {
        let store = store();
        assert_eq!(store.get_byte("Score"), Lookup::Found(7));
        assert_eq!(store.get_byte("Big"), Lookup::Found(44));
        assert_eq!(store.get_byte("Region").status(), LookupStatus::WrongType);
    }

    #[test]
    fn into_result_errors() {
        let store = store();
        assert_eq!(store.get_int("Score").into_result("Score"), Ok(7));
        assert_eq!(
            store.get_int("Region").into_result("Region"),
            Err(SessionSeekError::TypeMismatch {
                key: "Region".into(),
                expected: "int32",
                actual: "string"
            })
        );
        assert_eq!(
            store.get_int("Missing").into_result("Missing"),
            Err(SessionSeekError::KeyNotFound("Missing".into()))
        );
    }

    #[test]
    fn found_and_is_found() {
        assert!(store().get_int("Score").is_found());
        assert_eq!(store().get_int("Score").found(), Some(7));
        assert_eq!(store().get_int("Missing").found(), None);
    }
}
