//! In-memory evaluation of compiled expressions.
//!
//! Mirrors store semantics: a missing field or document path yields null, a
//! failed cast yields null, and null never satisfies a comparison. Used by
//! the bundled in-memory source and by equivalence tests against SQL-backed
//! stores.

use serde_json::Value;

use crate::schema::{FieldValue, Record};
use crate::types::{DataType, ScalarValue};

use super::{CmpOp, Expr, Stage};

impl Stage {
    /// Evaluates this stage as a predicate over a record.
    pub fn eval_bool(&self, record: &Record) -> bool {
        matches!(
            eval(&self.body, record),
            Evaluated::Scalar(ScalarValue::Bool(true))
        )
    }

    /// Evaluates this stage as a sort key over a record.
    ///
    /// Non-scalar results (whole documents, nested objects) order as null.
    pub fn eval_scalar(&self, record: &Record) -> ScalarValue {
        match eval(&self.body, record) {
            Evaluated::Scalar(value) => value,
            Evaluated::Record(_) | Evaluated::Document(_) => ScalarValue::Null,
        }
    }
}

enum Evaluated<'a> {
    Record(&'a Record),
    Document(&'a Value),
    Scalar(ScalarValue),
}

fn eval<'a>(expr: &Expr, record: &'a Record) -> Evaluated<'a> {
    match expr {
        Expr::Param => Evaluated::Record(record),

        Expr::Field { base, name } => match eval(base, record) {
            Evaluated::Record(r) => match r.get(name) {
                Some(FieldValue::Scalar(value)) => Evaluated::Scalar(value.clone()),
                Some(FieldValue::Document(doc)) => Evaluated::Document(doc),
                Some(FieldValue::Nested(nested)) => Evaluated::Record(nested),
                None => Evaluated::Scalar(ScalarValue::Null),
            },
            _ => Evaluated::Scalar(ScalarValue::Null),
        },

        Expr::JsonExtract { base, pointer } => match eval(base, record) {
            Evaluated::Document(doc) => Evaluated::Scalar(extract_text(doc, pointer)),
            _ => Evaluated::Scalar(ScalarValue::Null),
        },

        Expr::Cast { base, ty } => {
            let raw = as_scalar(eval(base, record));
            Evaluated::Scalar(cast_scalar(raw, *ty))
        }

        Expr::Literal(value) => Evaluated::Scalar(value.clone()),

        Expr::Compare { lhs, op, rhs } => {
            let l = as_scalar(eval(lhs, record));
            let r = as_scalar(eval(rhs, record));
            Evaluated::Scalar(ScalarValue::Bool(compare(&l, *op, &r)))
        }

        Expr::And(a, b) => {
            let result = truthy(eval(a, record)) && truthy(eval(b, record));
            Evaluated::Scalar(ScalarValue::Bool(result))
        }

        Expr::Or(a, b) => {
            let result = truthy(eval(a, record)) || truthy(eval(b, record));
            Evaluated::Scalar(ScalarValue::Bool(result))
        }

        Expr::Not(e) => Evaluated::Scalar(ScalarValue::Bool(!truthy(eval(e, record)))),

        Expr::IsNull(e) => {
            let is_null = matches!(eval(e, record), Evaluated::Scalar(ScalarValue::Null));
            Evaluated::Scalar(ScalarValue::Bool(is_null))
        }

        Expr::InList { needle, items } => {
            let value = as_scalar(eval(needle, record));
            let hit = !value.is_null() && items.iter().any(|item| value.matches(item));
            Evaluated::Scalar(ScalarValue::Bool(hit))
        }

        Expr::Contains { haystack, needle } => {
            let hit = match as_scalar(eval(haystack, record)) {
                ScalarValue::Text(text) => {
                    text.to_lowercase().contains(&needle.to_lowercase())
                }
                _ => false,
            };
            Evaluated::Scalar(ScalarValue::Bool(hit))
        }
    }
}

fn truthy(value: Evaluated<'_>) -> bool {
    matches!(value, Evaluated::Scalar(ScalarValue::Bool(true)))
}

fn as_scalar(value: Evaluated<'_>) -> ScalarValue {
    match value {
        Evaluated::Scalar(v) => v,
        Evaluated::Record(_) | Evaluated::Document(_) => ScalarValue::Null,
    }
}

fn compare(lhs: &ScalarValue, op: CmpOp, rhs: &ScalarValue) -> bool {
    use std::cmp::Ordering;

    if lhs.is_null() || rhs.is_null() {
        return false;
    }
    let Some(ord) = lhs.partial_cmp(rhs) else {
        return false;
    };
    match op {
        CmpOp::Eq => ord == Ordering::Equal,
        CmpOp::Lt => ord == Ordering::Less,
        CmpOp::Le => ord != Ordering::Greater,
        CmpOp::Gt => ord == Ordering::Greater,
        CmpOp::Ge => ord != Ordering::Less,
    }
}

/// Descends a `$.a.b` pointer into a document, rendering the target as text.
///
/// Missing paths and non-scalar targets yield null, never an error.
fn extract_text(doc: &Value, pointer: &str) -> ScalarValue {
    let mut current = doc;
    if pointer != "$" {
        for segment in pointer.trim_start_matches("$.").split('.') {
            current = match current {
                Value::Object(map) => match map.get(segment) {
                    Some(next) => next,
                    None => return ScalarValue::Null,
                },
                _ => return ScalarValue::Null,
            };
        }
    }
    match current {
        Value::String(s) => ScalarValue::Text(s.clone()),
        Value::Number(n) => ScalarValue::Text(n.to_string()),
        Value::Bool(b) => ScalarValue::Text(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => ScalarValue::Null,
    }
}

/// Store-side cast semantics: text that fails to parse becomes null.
fn cast_scalar(value: ScalarValue, ty: DataType) -> ScalarValue {
    match value {
        ScalarValue::Text(text) => {
            ScalarValue::parse(ty, &text).unwrap_or(ScalarValue::Null)
        }
        ScalarValue::Null => ScalarValue::Null,
        other => {
            // Already typed; keep it only if the type matches.
            let matches_ty = matches!(
                (&other, ty),
                (ScalarValue::Int(_), DataType::Integer)
                    | (ScalarValue::Float(_), DataType::Number)
                    | (ScalarValue::Bool(_), DataType::Boolean)
                    | (ScalarValue::DateTime(_), DataType::DateTime)
            );
            if matches_ty { other } else { ScalarValue::Null }
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::types::parse_datetime;

    fn sample() -> Record {
        Record::new()
            .with_scalar("title", "Quarterly review")
            .with_scalar("priority", 3)
            .with_nested("owner", Record::new().with_scalar("name", "Avery"))
            .with_document(
                "metadata",
                json!({
                    "customer": {"name": "Acme"},
                    "score": "41.5",
                    "open": true
                }),
            )
    }

    #[test]
    fn test_field_chain_and_missing_fields() {
        let record = sample();
        let chain = Stage::new(Expr::field(Expr::field(Expr::Param, "owner"), "name"));
        assert_eq!(
            chain.eval_scalar(&record),
            ScalarValue::Text("Avery".to_string())
        );

        let missing = Stage::new(Expr::field(Expr::Param, "nonexistent"));
        assert_eq!(missing.eval_scalar(&record), ScalarValue::Null);
    }

    #[test]
    fn test_json_extract_text_and_missing_path() {
        let record = sample();
        let extract = Stage::new(Expr::json_extract(
            Expr::field(Expr::Param, "metadata"),
            "$.customer.name",
        ));
        assert_eq!(
            extract.eval_scalar(&record),
            ScalarValue::Text("Acme".to_string())
        );

        let missing = Stage::new(Expr::json_extract(
            Expr::field(Expr::Param, "metadata"),
            "$.customer.phone",
        ));
        assert_eq!(missing.eval_scalar(&record), ScalarValue::Null);

        // Descending through a non-object yields null rather than erroring.
        let mismatch = Stage::new(Expr::json_extract(
            Expr::field(Expr::Param, "metadata"),
            "$.open.deeper",
        ));
        assert_eq!(mismatch.eval_scalar(&record), ScalarValue::Null);
    }

    #[test]
    fn test_cast_failure_yields_null() {
        let record = sample();
        let cast_ok = Stage::new(Expr::cast(
            Expr::json_extract(Expr::field(Expr::Param, "metadata"), "$.score"),
            DataType::Number,
        ));
        assert_eq!(cast_ok.eval_scalar(&record), ScalarValue::Float(41.5));

        let cast_bad = Stage::new(Expr::cast(
            Expr::json_extract(Expr::field(Expr::Param, "metadata"), "$.customer.name"),
            DataType::Integer,
        ));
        assert_eq!(cast_bad.eval_scalar(&record), ScalarValue::Null);
    }

    #[test]
    fn test_null_never_satisfies_comparison() {
        let record = sample();
        let cmp = Stage::new(Expr::compare(
            Expr::field(Expr::Param, "nonexistent"),
            CmpOp::Eq,
            Expr::literal(ScalarValue::Null),
        ));
        assert!(!cmp.eval_bool(&record));
    }

    #[test]
    fn test_contains_is_case_insensitive() {
        let record = sample();
        let contains = Stage::new(Expr::Contains {
            haystack: Box::new(Expr::field(Expr::Param, "title")),
            needle: "REVIEW".to_string(),
        });
        assert!(contains.eval_bool(&record));
    }

    #[test]
    fn test_datetime_comparison() {
        let record = Record::new()
            .with_scalar("created", parse_datetime("2024-03-10T15:00:00Z").unwrap());
        let cmp = Stage::new(Expr::compare(
            Expr::field(Expr::Param, "created"),
            CmpOp::Ge,
            Expr::literal(parse_datetime("2024-03-10").unwrap()),
        ));
        assert!(cmp.eval_bool(&record));
    }
}
