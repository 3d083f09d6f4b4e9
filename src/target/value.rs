use serde::{Deserialize, Serialize};
use std::fmt;

/// Defines the kinds of values accepted by a field of a control surface
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Deserialize, Serialize)]
pub enum ValueKind {
    Bool,
    Int,
    Real,
    Text,
    Reals,
}

/// Holds an untyped value as exchanged with a control surface
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub enum Value {
    /// Flag such as `enabled`
    Bool(bool),

    /// Integer such as a number of phases
    Int(i64),

    /// Real number such as a density
    Real(f64),

    /// Text such as a model option or a material name
    Text(String),

    /// Sequence of reals such as the gravity vector
    Reals(Vec<f64>),
}

impl Value {
    /// Allocates a new text value
    pub fn text(value: &str) -> Self {
        Value::Text(value.to_string())
    }

    /// Returns the kind of this value
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Bool(..) => ValueKind::Bool,
            Value::Int(..) => ValueKind::Int,
            Value::Real(..) => ValueKind::Real,
            Value::Text(..) => ValueKind::Text,
            Value::Reals(..) => ValueKind::Reals,
        }
    }

    /// Returns the value as a real number, converting integers
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(v) => Some(*v as f64),
            Value::Real(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the value as text
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(v) => Some(v.as_str()),
            _ => None,
        }
    }

    /// Returns the value as a flag
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(v) => Some(*v),
            _ => None,
        }
    }

    /// Indicates whether this value may be stored in a field of the given kind
    ///
    /// **Note:** Integers are accepted by real fields.
    pub fn fits(&self, kind: ValueKind) -> bool {
        match (self.kind(), kind) {
            (ValueKind::Int, ValueKind::Real) => true,
            (mine, theirs) => mine == theirs,
        }
    }
}

/// Converts typed setting values into values accepted by a control surface
pub trait ToValue {
    fn to_value(&self) -> Value;
}

impl ToValue for Value {
    fn to_value(&self) -> Value {
        self.clone()
    }
}

impl ToValue for bool {
    fn to_value(&self) -> Value {
        Value::Bool(*self)
    }
}

impl ToValue for i64 {
    fn to_value(&self) -> Value {
        Value::Int(*self)
    }
}

impl ToValue for f64 {
    fn to_value(&self) -> Value {
        Value::Real(*self)
    }
}

impl ToValue for String {
    fn to_value(&self) -> Value {
        Value::Text(self.clone())
    }
}

impl ToValue for [f64; 3] {
    fn to_value(&self) -> Value {
        Value::Reals(self.to_vec())
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(v) => write!(f, "{}", v),
            Value::Int(v) => write!(f, "{}", v),
            Value::Real(v) => write!(f, "{:?}", v),
            Value::Text(v) => write!(f, "{:?}", v),
            Value::Reals(v) => write!(f, "{:?}", v),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
