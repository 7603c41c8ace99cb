//! Risk score value object (0-100 scale).

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;

use super::ValidationError;

/// A risk score between 0 and 100 inclusive.
///
/// Deserialization is lenient: model output routinely carries scores as
/// floats (`72.5`), strings (`"72"`, `"72%"`) or out-of-range values, all of
/// which are rounded and clamped instead of rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Score(u8);

impl Score {
    /// Zero.
    pub const ZERO: Self = Self(0);

    /// Maximum score.
    pub const MAX: Self = Self(100);

    /// Creates a new Score, clamping to valid range.
    pub fn new(value: u8) -> Self {
        Self(value.min(100))
    }

    /// Creates a Score, returning error if out of range.
    pub fn try_new(value: i64) -> Result<Self, ValidationError> {
        if !(0..=100).contains(&value) {
            return Err(ValidationError::out_of_range("score", 0, 100, value));
        }
        Ok(Self(value as u8))
    }

    /// Rounds and clamps an arbitrary float into range. NaN maps to zero.
    pub fn from_f64(value: f64) -> Self {
        if value.is_nan() {
            return Self::ZERO;
        }
        Self(value.round().clamp(0.0, 100.0) as u8)
    }

    /// Interprets a loosely-typed JSON value as a score.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => n.as_f64().map(Self::from_f64),
            Value::String(s) => {
                let trimmed = s.trim().trim_end_matches('%').trim();
                trimmed.parse::<f64>().ok().map(Self::from_f64)
            }
            _ => None,
        }
    }

    /// Returns the value as u8.
    pub fn value(&self) -> u8 {
        self.0
    }

    /// Dashboard label for the band this score falls in.
    pub fn risk_level(&self) -> &'static str {
        match self.0 {
            70..=100 => "High Risk",
            40..=69 => "Medium Risk",
            _ => "Low Risk",
        }
    }
}

impl Default for Score {
    fn default() -> Self {
        Self::ZERO
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl<'de> Deserialize<'de> for Score {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(Score::from_value(&value).unwrap_or_default())
    }
}
