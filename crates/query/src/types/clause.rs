//! Clause model: declarative filter and sort instructions.
//!
//! Clauses arrive already structured (path, operator, semantic data type,
//! textual literal); there is no free-text query language. Literals are
//! always carried as text and parsed lazily per data type at compile time.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Filter comparison operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operator {
    /// Equality; day-bucket semantics for date/time values.
    Eq,
    /// Inequality; an absent value always satisfies it.
    Neq,
    /// Greater than (ordered types only).
    Gt,
    /// Greater than or equal (ordered types only).
    Gte,
    /// Less than (ordered types only).
    Lt,
    /// Less than or equal (ordered types only).
    Lte,
    /// Substring test (strings only).
    Contains,
    /// Membership in a comma-separated literal set.
    In,
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operator::Eq => write!(f, "eq"),
            Operator::Neq => write!(f, "neq"),
            Operator::Gt => write!(f, "gt"),
            Operator::Gte => write!(f, "gte"),
            Operator::Lt => write!(f, "lt"),
            Operator::Lte => write!(f, "lte"),
            Operator::Contains => write!(f, "contains"),
            Operator::In => write!(f, "in"),
        }
    }
}

impl FromStr for Operator {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "eq" => Ok(Operator::Eq),
            "neq" | "ne" => Ok(Operator::Neq),
            "gt" => Ok(Operator::Gt),
            "gte" | "ge" => Ok(Operator::Gte),
            "lt" => Ok(Operator::Lt),
            "lte" | "le" => Ok(Operator::Lte),
            "contains" => Ok(Operator::Contains),
            "in" => Ok(Operator::In),
            _ => Err(format!("unknown operator: {}", s)),
        }
    }
}

/// Semantic data types a clause can target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataType {
    /// Plain text.
    String,
    /// 32-bit signed integer.
    Integer,
    /// Double-precision floating point.
    Number,
    /// Boolean.
    Boolean,
    /// Instant in time (UTC).
    DateTime,
}

impl DataType {
    /// Returns true if values of this type carry a total order usable by the
    /// range operators.
    pub fn is_ordered(&self) -> bool {
        matches!(
            self,
            DataType::Integer | DataType::Number | DataType::DateTime
        )
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataType::String => write!(f, "string"),
            DataType::Integer => write!(f, "integer"),
            DataType::Number => write!(f, "number"),
            DataType::Boolean => write!(f, "boolean"),
            DataType::DateTime => write!(f, "datetime"),
        }
    }
}

impl FromStr for DataType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "string" => Ok(DataType::String),
            "integer" | "int" => Ok(DataType::Integer),
            "number" | "double" => Ok(DataType::Number),
            "boolean" | "bool" => Ok(DataType::Boolean),
            "datetime" | "date" => Ok(DataType::DateTime),
            _ => Err(format!("unknown data type: {}", s)),
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    /// Ascending (default).
    #[default]
    Asc,
    /// Descending.
    Desc,
}

impl SortDirection {
    /// Parses a direction string. Anything that is not a descending spelling
    /// defaults to ascending.
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "desc" | "descending" => SortDirection::Desc,
            _ => SortDirection::Asc,
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortDirection::Asc => write!(f, "asc"),
            SortDirection::Desc => write!(f, "desc"),
        }
    }
}

/// One declarative filter instruction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterClause {
    /// Dotted field path, e.g. `metadata.customer.name`. Never empty.
    pub path: String,

    /// The comparison operator.
    pub operator: Operator,

    /// The semantic type the literal is parsed as.
    pub data_type: DataType,

    /// The literal value, always textual.
    pub value: String,
}

impl FilterClause {
    /// Creates a new filter clause.
    pub fn new(
        path: impl Into<String>,
        operator: Operator,
        data_type: DataType,
        value: impl Into<String>,
    ) -> Self {
        Self {
            path: path.into(),
            operator,
            data_type,
            value: value.into(),
        }
    }
}

/// One declarative sort instruction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SortClause {
    /// Dotted field path.
    pub path: String,

    /// Sort direction.
    pub direction: SortDirection,

    /// The semantic type the extracted value is coerced to before ordering.
    pub data_type: DataType,
}

impl SortClause {
    /// Creates a new sort clause.
    pub fn new(path: impl Into<String>, direction: SortDirection, data_type: DataType) -> Self {
        Self {
            path: path.into(),
            direction,
            data_type,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operator_round_trip() {
        for op in [
            Operator::Eq,
            Operator::Neq,
            Operator::Gt,
            Operator::Gte,
            Operator::Lt,
            Operator::Lte,
            Operator::Contains,
            Operator::In,
        ] {
            assert_eq!(op.to_string().parse::<Operator>(), Ok(op));
        }
        assert!("between".parse::<Operator>().is_err());
    }

    #[test]
    fn test_data_type_ordering() {
        assert!(DataType::Integer.is_ordered());
        assert!(DataType::Number.is_ordered());
        assert!(DataType::DateTime.is_ordered());
        assert!(!DataType::String.is_ordered());
        assert!(!DataType::Boolean.is_ordered());
    }

    #[test]
    fn test_sort_direction_defaults_to_ascending() {
        assert_eq!(SortDirection::parse("desc"), SortDirection::Desc);
        assert_eq!(SortDirection::parse("DESC"), SortDirection::Desc);
        assert_eq!(SortDirection::parse("asc"), SortDirection::Asc);
        assert_eq!(SortDirection::parse("sideways"), SortDirection::Asc);
        assert_eq!(SortDirection::parse(""), SortDirection::Asc);
    }

    #[test]
    fn test_clause_serde() {
        let clause = FilterClause::new("metadata.priority", Operator::Gte, DataType::Integer, "3");
        let json = serde_json::to_string(&clause).unwrap();
        assert!(json.contains("\"dataType\":\"integer\""));
        let back: FilterClause = serde_json::from_str(&json).unwrap();
        assert_eq!(back, clause);
    }
}
