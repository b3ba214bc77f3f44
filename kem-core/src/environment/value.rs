use std::{cmp::Ordering, fmt::Display};

#[derive(Debug, Clone)]
pub enum Value {
    Integer {
        value: i64
    },
    Float {
        value: f64,
    },
    String {
        value: String,
    },
    Boolean {
        value: bool
    },
    Null,
}

/// Numbers compare by value across both subtypes, everything else only
/// against its own kind. A boolean is never equal to a number.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Integer { value: a }, Value::Integer { value: b }) => a == b,
            (Value::Integer { value: a }, Value::Float { value: b })
            | (Value::Float { value: b }, Value::Integer { value: a }) => {
                compare_integer_float(*a, *b) == Some(Ordering::Equal)
            },
            (Value::Float { value: a }, Value::Float { value: b }) => a == b,
            (Value::String { value: a }, Value::String { value: b }) => a == b,
            (Value::Boolean { value: a }, Value::Boolean { value: b }) => a == b,
            (Value::Null, Value::Null) => true,
            _ => false
        }
    }
}

/// The text `bhai bol` prints for a value.
impl Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Integer { value } => write!(f, "{value}"),
            Value::Float { value } if value.is_nan() => write!(f, "nan"),
            Value::Float { value } if value.is_infinite() => {
                write!(f, "{}", if value.is_sign_positive() { "inf" } else { "-inf" })
            },
            // -0.0 prints as 0
            Value::Float { value } if *value == 0.0 => write!(f, "0"),
            Value::Float { value } if value.fract() == 0.0 => write!(f, "{value:.0}"),
            Value::Float { value } => write_fraction(f, *value),
            Value::String { value } => write!(f, "{value}"),
            Value::Boolean { value } => write!(f, "{value}"),
            Value::Null => write!(f, "null"),
        }
    }
}

impl Value {
    pub fn _type(&self) -> ValueType {
        match self {
            Self::Integer { .. } => ValueType::Integer,
            Self::Float { .. } => ValueType::Float,
            Self::String { .. } => ValueType::String,
            Self::Boolean { .. } => ValueType::Boolean,
            Self::Null => ValueType::Null,
        }
    }

    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Null => false,
            Self::Boolean { value } => *value,
            Self::Integer { value } => *value != 0,
            Self::Float { value } => *value != 0.0,
            Self::String { value } => !value.is_empty(),
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, Self::Integer { .. } | Self::Float { .. })
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Integer { value } => Some(*value as f64),
            Self::Float { value } => Some(*value),
            _ => None
        }
    }

    /// Ordering of two numbers, exact even where an `i64` has no `f64`
    /// twin. `None` for non-numbers and NaN.
    pub fn numeric_cmp(&self, other: &Value) -> Option<Ordering> {
        match (self, other) {
            (Value::Integer { value: a }, Value::Integer { value: b }) => Some(a.cmp(b)),
            (Value::Integer { value: a }, Value::Float { value: b }) => compare_integer_float(*a, *b),
            (Value::Float { value: a }, Value::Integer { value: b }) => {
                compare_integer_float(*b, *a).map(Ordering::reverse)
            },
            (Value::Float { value: a }, Value::Float { value: b }) => a.partial_cmp(b),
            _ => None
        }
    }

    pub fn stringify(&self) -> String {
        self.to_string()
    }
}

// 2^63, the first float above every i64
const I64_BOUND: f64 = 9_223_372_036_854_775_808.0;

fn compare_integer_float(integer: i64, float: f64) -> Option<Ordering> {
    if float.is_nan() {
        return None;
    }

    if float >= I64_BOUND {
        return Some(Ordering::Less);
    }

    if float < -I64_BOUND {
        return Some(Ordering::Greater);
    }

    let whole = float.trunc();

    // equal integral parts: the fraction decides
    Some(integer.cmp(&(whole as i64)).then_with(|| {
        whole.partial_cmp(&float).unwrap_or(Ordering::Equal)
    }))
}

/// Shortest round-trip digits, in exponent form (`1e-05`) when the decimal
/// exponent is below -4 or at least 16.
fn write_fraction(f: &mut std::fmt::Formatter<'_>, value: f64) -> std::fmt::Result {
    let scientific = format!("{value:e}");

    let (mantissa, exponent) = match scientific.split_once('e') {
        Some((mantissa, exponent)) => (mantissa, exponent.parse::<i32>().unwrap_or_default()),
        None => return write!(f, "{value}"),
    };

    if (-4..16).contains(&exponent) {
        return write!(f, "{value}");
    }

    let sign = if exponent < 0 { '-' } else { '+' };

    write!(f, "{mantissa}e{sign}{:02}", exponent.abs())
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Boolean { value }
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Integer { value }
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float { value }
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String { value }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String { value: value.to_string() }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueType {
    Integer,
    Float,
    String,
    Boolean,
    Null,
}

impl Display for ValueType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ValueType::Integer => "int",
            ValueType::Float => "float",
            ValueType::String => "str",
            ValueType::Boolean => "bool",
            ValueType::Null => "null",
        };

        write!(f, "{name}")
    }
}
