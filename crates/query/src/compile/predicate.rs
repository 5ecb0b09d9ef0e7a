//! Predicate construction: (operator, data type, literal) to boolean stage.
//!
//! Dispatch is a guarded match over the operator/type pair. A literal that
//! fails to parse as its declared type disqualifies the arm, and anything
//! that falls through reports the combination as unsupported.

use tracing::warn;

use crate::error::CompileError;
use crate::expr::{CmpOp, Expr, Stage};
use crate::types::{DataType, DayInterval, Operator, ScalarValue};

/// Builds a single-input boolean stage for a filter clause's operator, data
/// type and textual literal.
pub fn build_predicate(
    operator: Operator,
    data_type: DataType,
    value: &str,
) -> Result<Stage, CompileError> {
    let body = match operator {
        Operator::Eq => eq_body(data_type, value),
        Operator::Neq => {
            // Absent values always satisfy inequality.
            eq_body(data_type, value).map(|eq| {
                Expr::or(Expr::is_null(Expr::Param), Expr::not(eq))
            })
        }
        Operator::Gt => ordered_body(data_type, value, CmpOp::Gt),
        Operator::Gte => ordered_body(data_type, value, CmpOp::Ge),
        Operator::Lt => ordered_body(data_type, value, CmpOp::Lt),
        Operator::Lte => ordered_body(data_type, value, CmpOp::Le),
        Operator::Contains => match data_type {
            DataType::String => Some(Expr::Contains {
                haystack: Box::new(Expr::Param),
                needle: value.to_string(),
            }),
            _ => None,
        },
        Operator::In => Some(in_body(data_type, value)),
    };

    match body {
        Some(body) => Ok(Stage::new(body)),
        None => Err(CompileError::UnsupportedOperator {
            operator,
            data_type,
        }),
    }
}

/// Equality body per type. Date/time equality is day-bucket membership:
/// `from <= x < to` over the literal's calendar day. Inequality negates the
/// bucket exactly, so `Neq` holds iff `x < from || x >= to`.
fn eq_body(data_type: DataType, value: &str) -> Option<Expr> {
    match data_type {
        DataType::DateTime => {
            let instant = match ScalarValue::parse(data_type, value)? {
                ScalarValue::DateTime(dt) => dt,
                _ => return None,
            };
            let interval = DayInterval::containing(instant);
            Some(Expr::and(
                Expr::compare(Expr::Param, CmpOp::Ge, Expr::literal(interval.from)),
                Expr::compare(Expr::Param, CmpOp::Lt, Expr::literal(interval.to)),
            ))
        }
        _ => {
            let literal = ScalarValue::parse(data_type, value)?;
            Some(Expr::compare(Expr::Param, CmpOp::Eq, Expr::Literal(literal)))
        }
    }
}

/// Range comparison body; defined only for ordered types.
fn ordered_body(data_type: DataType, value: &str, op: CmpOp) -> Option<Expr> {
    if !data_type.is_ordered() {
        return None;
    }
    let literal = ScalarValue::parse(data_type, value)?;
    Some(Expr::compare(Expr::Param, op, Expr::Literal(literal)))
}

/// Membership body: the literal is comma-separated, each element coerced
/// independently; elements that fail to parse are dropped.
fn in_body(data_type: DataType, value: &str) -> Expr {
    let mut items = Vec::new();
    for element in value.split(',') {
        match ScalarValue::parse(data_type, element) {
            Some(parsed) => items.push(parsed),
            None => {
                warn!(
                    element = element.trim(),
                    %data_type,
                    "dropping in-filter element that does not parse"
                );
            }
        }
    }
    Expr::InList {
        needle: Box::new(Expr::Param),
        items,
    }
}
