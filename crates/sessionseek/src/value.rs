//! Typed values carried by session settings.
//!
//! [`TypedValue`] is the runtime variant stored against every session
//! property key. [`ValueKind`] is its discriminant without the payload.

use serde::{Deserialize, Serialize};

/// Discriminant of a [`TypedValue`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueKind {
    Bool,
    Int32,
    Int64,
    Float,
    Double,
    String,
    Blob,
    Empty,
}

impl ValueKind {
    /// Returns the display name of this kind.
    pub fn as_str(self) -> &'static str {
        match self {
            ValueKind::Bool => "bool",
            ValueKind::Int32 => "int32",
            ValueKind::Int64 => "int64",
            ValueKind::Float => "float",
            ValueKind::Double => "double",
            ValueKind::String => "string",
            ValueKind::Blob => "blob",
            ValueKind::Empty => "empty",
        }
    }

    /// Returns `true` for kinds that support ordering comparators.
    pub fn is_numeric(self) -> bool {
        matches!(
            self,
            ValueKind::Int32 | ValueKind::Int64 | ValueKind::Float | ValueKind::Double
        )
    }
}

impl std::fmt::Display for ValueKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A session setting value.
///
/// Serialized as `{"type": "<kind>", "value": <payload>}`:
///
/// ```
/// use sessionseek::TypedValue;
///
/// let value: TypedValue = serde_json::from_str(r#"{"type":"int32","value":4}"#).unwrap();
/// assert_eq!(value, TypedValue::Int32(4));
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum TypedValue {
    Bool(bool),
    Int32(i32),
    /// 64-bit integers are carried as unsigned magnitudes.
    Int64(u64),
    Float(f32),
    Double(f64),
    String(String),
    Blob(Vec<u8>),
    #[default]
    Empty,
}

impl TypedValue {
    /// Returns the kind of this value.
    pub fn kind(&self) -> ValueKind {
        match self {
            TypedValue::Bool(_) => ValueKind::Bool,
            TypedValue::Int32(_) => ValueKind::Int32,
            TypedValue::Int64(_) => ValueKind::Int64,
            TypedValue::Float(_) => ValueKind::Float,
            TypedValue::Double(_) => ValueKind::Double,
            TypedValue::String(_) => ValueKind::String,
            TypedValue::Blob(_) => ValueKind::Blob,
            TypedValue::Empty => ValueKind::Empty,
        }
    }

    /// Returns the display name of this value's kind.
    pub fn type_name(&self) -> &'static str {
        self.kind().as_str()
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, TypedValue::Empty)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            TypedValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int32(&self) -> Option<i32> {
        match self {
            TypedValue::Int32(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_int64(&self) -> Option<u64> {
        match self {
            TypedValue::Int64(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f32> {
        match self {
            TypedValue::Float(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_double(&self) -> Option<f64> {
        match self {
            TypedValue::Double(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            TypedValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_blob(&self) -> Option<&[u8]> {
        match self {
            TypedValue::Blob(b) => Some(b),
            _ => None,
        }
    }
}

impl std::fmt::Display for TypedValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TypedValue::Bool(b) => write!(f, "{}", b),
            TypedValue::Int32(n) => write!(f, "{}", n),
            TypedValue::Int64(n) => write!(f, "{}", n),
            TypedValue::Float(n) => write!(f, "{}", n),
            TypedValue::Double(n) => write!(f, "{}", n),
            TypedValue::String(s) => write!(f, "{}", s),
            TypedValue::Blob(b) => write!(f, "<{} bytes>", b.len()),
            TypedValue::Empty => write!(f, "<empty>"),
        }
    }
}

impl From<bool> for TypedValue {
    fn from(b: bool) -> Self {
        TypedValue::Bool(b)
    }
}

/// Byte literals are stored as `Int32`.
impl From<u8> for TypedValue {
    fn from(n: u8) -> Self {
        TypedValue::Int32(n as i32)
    }
}

impl From<i32> for TypedValue {
    fn from(n: i32) -> Self {
        TypedValue::Int32(n)
    }
}

impl From<u64> for TypedValue {
    fn from(n: u64) -> Self {
        TypedValue::Int64(n)
    }
}

impl From<f32> for TypedValue {
    fn from(n: f32) -> Self {
        TypedValue::Float(n)
    }
}

impl From<f64> for TypedValue {
    fn from(n: f64) -> Self {
        TypedValue::Double(n)
    }
}

impl From<String> for TypedValue {
    fn from(s: String) -> Self {
        TypedValue::String(s)
    }
}

impl From<&str> for TypedValue {
    fn from(s: &str) -> Self {
        TypedValue::String(s.to_string())
    }
}

impl From<Vec<u8>> for TypedValue {
    fn from(b: Vec<u8>) -> Self {
        TypedValue::Blob(b)
    }
}
