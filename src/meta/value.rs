//! Annotation values.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A value stored against an annotation key.
///
/// Scalars render plainly (`key=bar`, `key=7`). Anything else is captured
/// through its `Debug` impl with [`Value::debug`], so derived structs keep
/// their field names in the rendered prefix.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum Value {
    Bool(bool),
    Int(i64),
    Uint(u64),
    Float(f64),
    Str(String),
    /// Pre-rendered `Debug` output of a structured value.
    #[serde(skip_deserializing)]
    Structured(String),
}

impl Value {
    /// Capture a structured value by its single-line `Debug` rendering.
    pub fn debug<T: fmt::Debug + ?Sized>(value: &T) -> Self {
        Value::Structured(format!("{value:?}"))
    }

    /// Infer a value from command-line text: integers, floats and booleans
    /// are recognised, everything else stays a string.
    pub fn infer(text: &str) -> Self {
        if let Ok(i) = text.parse::<i64>() {
            Value::Int(i)
        } else if let Ok(u) = text.parse::<u64>() {
            Value::Uint(u)
        } else if let Ok(b) = text.parse::<bool>() {
            Value::Bool(b)
        } else if let Some(f) = text.parse::<f64>().ok().filter(|f| f.is_finite()) {
            Value::Float(f)
        } else {
            Value::Str(text.to_string())
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(i) => write!(f, "{i}"),
            Value::Uint(u) => write!(f, "{u}"),
            Value::Float(x) => write!(f, "{x}"),
            Value::Str(s) | Value::Structured(s) => f.write_str(s),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<&String> for Value {
    fn from(s: &String) -> Self {
        Value::Str(s.clone())
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<f32> for Value {
    fn from(x: f32) -> Self {
        Value::Float(f64::from(x))
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

macro_rules! impl_from_int {
    ($variant:ident, $wide:ty; $($t:ty),*) => {
        $(
            impl From<$t> for Value {
                fn from(v: $t) -> Self {
                    Value::$variant(v as $wide)
                }
            }
        )*
    };
}

impl_from_int!(Int, i64; i8, i16, i32, i64, isize);
impl_from_int!(Uint, u64; u8, u16, u32, u64, usize);
