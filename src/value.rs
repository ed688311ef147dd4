//! Value holders shared by parameters, policies, and scenarios.

use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A concrete input value.
///
/// This enum stores the different value types a parameter, constant, or
/// category can carry uniformly.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Value {
    /// A real-valued input.
    Real(f64),
    /// An integer-valued input.
    Int(i64),
    /// A textual input.
    Str(String),
    /// A boolean input.
    Bool(bool),
}

impl Value {
    /// Returns the value as a float, if it is numeric.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Real(v) => Some(*v),
            Value::Int(v) => Some(*v as f64),
            _ => None,
        }
    }

    /// Returns `true` for integer values and for reals without a fractional part.
    #[must_use]
    pub fn is_integral(&self) -> bool {
        match self {
            Value::Int(_) => true,
            Value::Real(v) => v.fract() == 0.0,
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Real(v) => write!(f, "{v}"),
            Value::Int(v) => write!(f, "{v}"),
            Value::Str(v) => f.write_str(v),
            Value::Bool(v) => write!(f, "{v}"),
        }
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Real(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Str(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Str(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

/// A named input pinned to a fixed value.
///
/// Constants are handed to the experiment assembly unchanged; they are not
/// part of the sampled design space.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Constant {
    name: String,
    value: Value,
}

impl Constant {
    /// Creates a new constant.
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Returns the constant's name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the constant's value.
    #[must_use]
    pub fn value(&self) -> &Value {
        &self.value
    }
}

impl fmt::Display for Constant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Constant('{}', {})", self.name, self.value)
    }
}

/// A named value inside a categorical parameter's category list.
///
/// The position of a category in its list is load-bearing: it fixes the index
/// mapping used by samplers and by downstream model wiring.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Category {
    name: String,
    value: Value,
}

impl Category {
    /// Creates a new category.
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Creates a category named after the value's display form.
    #[must_use]
    pub fn from_value(value: impl Into<Value>) -> Self {
        let value = value.into();
        Self {
            name: value.to_string(),
            value,
        }
    }

    /// Returns the category's name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the category's value.
    #[must_use]
    pub fn value(&self) -> &Value {
        &self.value
    }
}

impl From<&str> for Category {
    fn from(value: &str) -> Self {
        Category::from_value(value)
    }
}

impl From<String> for Category {
    fn from(value: String) -> Self {
        Category::from_value(value)
    }
}

impl From<bool> for Category {
    fn from(value: bool) -> Self {
        Category::from_value(value)
    }
}

impl From<f64> for Category {
    fn from(value: f64) -> Self {
        Category::from_value(value)
    }
}

impl From<i64> for Category {
    fn from(value: i64) -> Self {
        Category::from_value(value)
    }
}
