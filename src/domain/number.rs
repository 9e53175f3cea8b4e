use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt::Display;

/// A JSON number that keeps track of whether it was written as an integer, so it can be sent
/// to the hub exactly as it was received (`50` stays `50`, `21.5` stays `21.5`).
#[derive(Clone, Copy, Debug)]
pub enum Number {
    PositiveInt(u64),
    NegativeInt(i64),
    Float(f64),
}

impl Number {
    pub fn as_f64(&self) -> f64 {
        match self {
            Number::PositiveInt(n) => *n as f64,
            Number::NegativeInt(n) => *n as f64,
            Number::Float(n) => *n,
        }
    }
}

impl From<&serde_json::Number> for Number {
    fn from(value: &serde_json::Number) -> Self {
        if let Some(n) = value.as_u64() {
            Number::PositiveInt(n)
        } else if let Some(n) = value.as_i64() {
            Number::NegativeInt(n)
        } else {
            Number::Float(value.as_f64().unwrap_or(f64::NAN))
        }
    }
}

impl From<Number> for serde_json::Value {
    fn from(value: Number) -> Self {
        match value {
            Number::PositiveInt(n) => serde_json::Value::from(n),
            Number::NegativeInt(n) => serde_json::Value::from(n),
            Number::Float(n) => serde_json::Value::from(n),
        }
    }
}

impl<'de> Deserialize<'de> for Number {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let number = serde_json::Number::deserialize(deserializer)?;
        Ok(Number::from(&number))
    }
}

impl Serialize for Number {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Number::PositiveInt(n) => serializer.serialize_u64(*n),
            Number::NegativeInt(n) => serializer.serialize_i64(*n),
            Number::Float(n) => serializer.serialize_f64(*n),
        }
    }
}

impl PartialOrd for Number {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Number::PositiveInt(a), Number::PositiveInt(b)) => a.partial_cmp(b),
            (Number::NegativeInt(a), Number::NegativeInt(b)) => a.partial_cmp(b),
            (Number::PositiveInt(_), Number::NegativeInt(b)) if *b < 0 => Some(Ordering::Greater),
            (Number::NegativeInt(a), Number::PositiveInt(_)) if *a < 0 => Some(Ordering::Less),
            _ => self.as_f64().partial_cmp(&other.as_f64()),
        }
    }
}

impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        self.partial_cmp(other) == Some(Ordering::Equal)
    }
}

impl Display for Number {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Number::PositiveInt(n) => write!(f, "{}", n),
            Number::NegativeInt(n) => write!(f, "{}", n),
            Number::Float(n) => write!(f, "{}", n),
        }
    }
}
