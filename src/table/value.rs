use std::borrow::Cow;
use std::fmt;

use bytes::Bytes;

/// The fundamental kinds of SQL values a cell can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ValueKind {
    #[default]
    Null,

    /// 64-bit signed integer
    Int,

    /// 64-bit IEEE floating point
    Float,

    /// UTF-8 text
    Text,

    /// Opaque bytes
    Blob,

    /// A type the source could not classify
    Unknown,
}

impl ValueKind {
    /// Maps a declared SQL column type to a kind.
    pub fn from_decltype(decltype: &str) -> Self {
        match decltype {
            "NULL" => ValueKind::Null,
            "INTEGER" => ValueKind::Int,
            "FLOAT" => ValueKind::Float,
            "BLOB" => ValueKind::Blob,
            "TEXT" => ValueKind::Text,
            _ => ValueKind::Unknown,
        }
    }

    /// Returns true if cells of this kind carry a raw payload.
    pub fn has_raw_payload(&self) -> bool {
        matches!(self, ValueKind::Int | ValueKind::Float | ValueKind::Blob)
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueKind::Null => write!(f, "NULL"),
            ValueKind::Int => write!(f, "INT"),
            ValueKind::Float => write!(f, "FLOAT"),
            ValueKind::Text => write!(f, "TEXT"),
            ValueKind::Blob => write!(f, "BLOB"),
            ValueKind::Unknown => write!(f, "UNKNOWN"),
        }
    }
}

/// A typed value produced by a table source for one cell.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Int(i64),
    Float(f64),
    Text(String),
    Blob(Bytes),
    /// A value of a type the source could not classify
    Unknown,
}

impl Value {
    /// Returns the kind of this value.
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Null => ValueKind::Null,
            Value::Int(_) => ValueKind::Int,
            Value::Float(_) => ValueKind::Float,
            Value::Text(_) => ValueKind::Text,
            Value::Blob(_) => ValueKind::Blob,
            Value::Unknown => ValueKind::Unknown,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Encodes the raw payload stored alongside the display string.
    ///
    /// Integers and floats are 8 bytes little-endian; blobs are their bytes.
    /// Null, text and unknown values have no raw payload.
    pub fn raw_bytes(&self) -> Option<Cow<'_, [u8]>> {
        match self {
            Value::Int(v) => Some(Cow::Owned(v.to_le_bytes().to_vec())),
            Value::Float(v) => Some(Cow::Owned(v.to_le_bytes().to_vec())),
            Value::Blob(b) => Some(Cow::Borrowed(b.as_ref())),
            Value::Null | Value::Text(_) | Value::Unknown => None,
        }
    }

    /// Returns the string shown for this value.
    pub fn display_text(&self) -> Cow<'_, str> {
        match self {
            Value::Null => Cow::Borrowed("NULL"),
            Value::Int(v) => Cow::Owned(v.to_string()),
            Value::Float(v) => Cow::Owned(format_float(*v)),
            Value::Text(s) => Cow::Borrowed(s),
            Value::Blob(_) => Cow::Borrowed("BLOB"),
            Value::Unknown => Cow::Borrowed("UNKNOWN"),
        }
    }

    /// Rebuilds a value from a stored raw payload and display string.
    /// Returns None if the payload does not match the kind.
    pub fn decode(kind: ValueKind, raw: Option<&[u8]>, text: &str) -> Option<Self> {
        match kind {
            ValueKind::Null => Some(Value::Null),
            ValueKind::Int => {
                let bytes: [u8; 8] = raw?.try_into().ok()?;
                Some(Value::Int(i64::from_le_bytes(bytes)))
            }
            ValueKind::Float => {
                let bytes: [u8; 8] = raw?.try_into().ok()?;
                Some(Value::Float(f64::from_le_bytes(bytes)))
            }
            ValueKind::Text => Some(Value::Text(text.to_string())),
            ValueKind::Blob => Some(Value::Blob(Bytes::copy_from_slice(raw?))),
            ValueKind::Unknown => Some(Value::Unknown),
        }
    }
}

/// Formats a float as shortest round-trip decimal text, independent of
/// locale. Integral values keep a trailing `.0`.
fn format_float(v: f64) -> String {
    let mut text = v.to_string();
    if v.is_finite() && !text.contains('.') {
        text.push_str(".0");
    }
    text
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_text())
    }
}

// Convenience conversions
impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v as i64)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<Bytes> for Value {
    fn from(v: Bytes) -> Self {
        Value::Blob(v)
    }
}

impl From<Vec<u8>> for Value {
    fn from(v: Vec<u8>) -> Self {
        Value::Blob(Bytes::from(v))
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(Value::Null)
    }
}
