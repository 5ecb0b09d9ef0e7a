//! Scalar values flowing through compiled expressions.

use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::clause::DataType;

/// A typed scalar value: a literal in a compiled expression, or the result of
/// evaluating one stage against a record.
///
/// `Null` stands for an absent field, a missing document path, or a failed
/// store-side cast. Comparisons against `Null` never match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ScalarValue {
    /// 32-bit signed integer.
    Int(i32),
    /// Double-precision number.
    Float(f64),
    /// Boolean.
    Bool(bool),
    /// Instant in time (UTC).
    DateTime(DateTime<Utc>),
    /// Plain text.
    Text(String),
    /// Absent value.
    Null,
}

impl ScalarValue {
    /// Returns true for the absent value.
    pub fn is_null(&self) -> bool {
        matches!(self, ScalarValue::Null)
    }

    /// Parses a textual literal as the given data type.
    ///
    /// Returns `None` when the text does not parse; callers decide whether
    /// that disqualifies a dispatch arm (filter literals) or yields `Null`
    /// (store-side casts).
    pub fn parse(data_type: DataType, text: &str) -> Option<ScalarValue> {
        let text = text.trim();
        match data_type {
            DataType::String => Some(ScalarValue::Text(text.to_string())),
            DataType::Integer => text.parse::<i32>().ok().map(ScalarValue::Int),
            DataType::Number => text.parse::<f64>().ok().map(ScalarValue::Float),
            DataType::Boolean => {
                if text.eq_ignore_ascii_case("true") {
                    Some(ScalarValue::Bool(true))
                } else if text.eq_ignore_ascii_case("false") {
                    Some(ScalarValue::Bool(false))
                } else {
                    None
                }
            }
            DataType::DateTime => parse_datetime(text).map(ScalarValue::DateTime),
        }
    }

    /// Compares two values of compatible types.
    ///
    /// `Int` and `Float` compare numerically across the pair. `Null` and
    /// cross-type pairs are incomparable.
    pub fn partial_cmp(&self, other: &ScalarValue) -> Option<Ordering> {
        match (self, other) {
            (ScalarValue::Int(a), ScalarValue::Int(b)) => Some(a.cmp(b)),
            (ScalarValue::Float(a), ScalarValue::Float(b)) => a.partial_cmp(b),
            (ScalarValue::Int(a), ScalarValue::Float(b)) => (*a as f64).partial_cmp(b),
            (ScalarValue::Float(a), ScalarValue::Int(b)) => a.partial_cmp(&(*b as f64)),
            (ScalarValue::Bool(a), ScalarValue::Bool(b)) => Some(a.cmp(b)),
            (ScalarValue::DateTime(a), ScalarValue::DateTime(b)) => Some(a.cmp(b)),
            (ScalarValue::Text(a), ScalarValue::Text(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }

    /// Equality as used by predicates: incomparable pairs are unequal.
    pub fn matches(&self, other: &ScalarValue) -> bool {
        self.partial_cmp(other) == Some(Ordering::Equal)
    }

    /// Total order used by the in-memory source when sorting: `Null` sorts
    /// before any present value; incomparable present values tie.
    pub fn sort_cmp(&self, other: &ScalarValue) -> Ordering {
        match (self.is_null(), other.is_null()) {
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
            (false, false) => self.partial_cmp(other).unwrap_or(Ordering::Equal),
        }
    }
}

impl From<&str> for ScalarValue {
    fn from(s: &str) -> Self {
        ScalarValue::Text(s.to_string())
    }
}

impl From<String> for ScalarValue {
    fn from(s: String) -> Self {
        ScalarValue::Text(s)
    }
}

impl From<i32> for ScalarValue {
    fn from(n: i32) -> Self {
        ScalarValue::Int(n)
    }
}

impl From<f64> for ScalarValue {
    fn from(n: f64) -> Self {
        ScalarValue::Float(n)
    }
}

impl From<bool> for ScalarValue {
    fn from(b: bool) -> Self {
        ScalarValue::Bool(b)
    }
}

impl From<DateTime<Utc>> for ScalarValue {
    fn from(dt: DateTime<Utc>) -> Self {
        ScalarValue::DateTime(dt)
    }
}

/// Parses a date/time literal into a `DateTime<Utc>`.
///
/// Accepts round-trip RFC 3339 forms and partial dates (year, year-month,
/// date), normalizing partials to midnight UTC.
pub fn parse_datetime(value: &str) -> Option<DateTime<Utc>> {
    let normalized = if let Some((_, time)) = value.split_once('T') {
        if time.contains('+') || time.contains('-') || time.ends_with('Z') || time.ends_with('z') {
            value.to_string()
        } else {
            format!("{}+00:00", value)
        }
    } else {
        match value.len() {
            10 => format!("{}T00:00:00+00:00", value),
            7 => format!("{}-01T00:00:00+00:00", value),
            4 => format!("{}-01-01T00:00:00+00:00", value),
            _ => value.to_string(),
        }
    };

    DateTime::parse_from_rfc3339(&normalized)
        .map(|dt| dt.with_timezone(&Utc))
        .ok()
        .or_else(|| normalized.parse::<DateTime<Utc>>().ok())
}
