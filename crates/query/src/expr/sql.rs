//! SQL rendering of compiled stages.
//!
//! Produces parameterized fragments with `$N` placeholders for SQL-backed
//! sources. Field chains render as dotted column paths, JSON extraction as
//! the store's `json_extract` call, so the whole predicate executes inside
//! the store. The fragment combinators mirror the filter AND/OR folding used
//! when clauses are applied.

use chrono::{DateTime, Utc};

use crate::query::SortKey;
use crate::types::{DataType, ScalarValue, SortDirection};

use super::{CmpOp, Expr, Stage};

/// A SQL fragment with associated parameters.
#[derive(Debug, Clone)]
pub struct SqlFragment {
    /// The SQL string with $N placeholders.
    pub sql: String,
    /// The parameter values.
    pub params: Vec<SqlParam>,
}

/// A SQL parameter value.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlParam {
    /// Text parameter.
    Text(String),
    /// Floating point parameter.
    Float(f64),
    /// Integer parameter.
    Integer(i64),
    /// Boolean parameter.
    Bool(bool),
    /// Timestamp parameter.
    Timestamp(DateTime<Utc>),
    /// Null parameter.
    Null,
}

impl SqlFragment {
    /// Creates a new fragment with no parameters.
    pub fn new(sql: impl Into<String>) -> Self {
        Self {
            sql: sql.into(),
            params: Vec::new(),
        }
    }

    /// Combines two fragments with AND.
    pub fn and(self, other: SqlFragment) -> SqlFragment {
        SqlFragment {
            sql: format!("({}) AND ({})", self.sql, other.sql),
            params: [self.params, other.params].concat(),
        }
    }

    /// Combines two fragments with OR.
    pub fn or(self, other: SqlFragment) -> SqlFragment {
        SqlFragment {
            sql: format!("({}) OR ({})", self.sql, other.sql),
            params: [self.params, other.params].concat(),
        }
    }
}

/// Renders a predicate stage as a WHERE-clause fragment.
///
/// `param_offset` is the number of placeholders already allocated by the
/// enclosing statement.
pub fn render_predicate(stage: &Stage, param_offset: usize) -> SqlFragment {
    let mut ctx = RenderCtx {
        params: Vec::new(),
        offset: param_offset,
    };
    let sql = ctx.render(stage.body());
    SqlFragment {
        sql,
        params: ctx.params,
    }
}

/// Renders sort keys as an ORDER BY list.
pub fn render_order(keys: &[SortKey], param_offset: usize) -> SqlFragment {
    let mut ctx = RenderCtx {
        params: Vec::new(),
        offset: param_offset,
    };
    let rendered: Vec<String> = keys
        .iter()
        .map(|key| {
            let expr = ctx.render(key.stage.body());
            match key.direction {
                SortDirection::Asc => format!("{} ASC", expr),
                SortDirection::Desc => format!("{} DESC", expr),
            }
        })
        .collect();
    SqlFragment {
        sql: rendered.join(", "),
        params: ctx.params,
    }
}

struct RenderCtx {
    params: Vec<SqlParam>,
    offset: usize,
}

impl RenderCtx {
    fn placeholder(&mut self, param: SqlParam) -> String {
        self.params.push(param);
        format!("${}", self.offset + self.params.len())
    }

    fn render(&mut self, expr: &Expr) -> String {
        match expr {
            // A bare parameter only appears inside access chains; the record
            // itself has no SQL spelling.
            Expr::Param => String::new(),

            Expr::Field { base, name } => {
                let prefix = self.render(base);
                if prefix.is_empty() {
                    name.clone()
                } else {
                    format!("{}.{}", prefix, name)
                }
            }

            Expr::JsonExtract { base, pointer } => {
                let column = self.render(base);
                let pointer = self.placeholder(SqlParam::Text(pointer.clone()));
                format!("json_extract({}, {})", column, pointer)
            }

            Expr::Cast { base, ty } => {
                let inner = self.render(base);
                format!("CAST({} AS {})", inner, sql_type(*ty))
            }

            Expr::Literal(value) => self.placeholder(scalar_param(value)),

            Expr::Compare { lhs, op, rhs } => {
                let l = self.render(lhs);
                let r = self.render(rhs);
                format!("{} {} {}", l, cmp_sql(*op), r)
            }

            Expr::And(a, b) => {
                let l = self.render(a);
                let r = self.render(b);
                format!("({}) AND ({})", l, r)
            }

            Expr::Or(a, b) => {
                let l = self.render(a);
                let r = self.render(b);
                format!("({}) OR ({})", l, r)
            }

            Expr::Not(e) => format!("NOT ({})", self.render(e)),

            Expr::IsNull(e) => format!("({}) IS NULL", self.render(e)),

            Expr::InList { needle, items } => {
                if items.is_empty() {
                    // Empty membership set matches nothing.
                    return "1 = 0".to_string();
                }
                let target = self.render(needle);
                let placeholders: Vec<String> = items
                    .iter()
                    .map(|item| self.placeholder(scalar_param(item)))
                    .collect();
                format!("{} IN ({})", target, placeholders.join(", "))
            }

            Expr::Contains { haystack, needle } => {
                let target = self.render(haystack);
                let pattern = self.placeholder(SqlParam::Text(format!(
                    "%{}%",
                    needle.to_lowercase()
                )));
                format!("LOWER({}) LIKE {}", target, pattern)
            }
        }
    }
}

fn cmp_sql(op: CmpOp) -> &'static str {
    match op {
        CmpOp::Eq => "=",
        CmpOp::Lt => "<",
        CmpOp::Le => "<=",
        CmpOp::Gt => ">",
        CmpOp::Ge => ">=",
    }
}

fn sql_type(ty: DataType) -> &'static str {
    match ty {
        DataType::String => "TEXT",
        DataType::Integer => "INTEGER",
        DataType::Number => "DOUBLE PRECISION",
        DataType::Boolean => "BOOLEAN",
        DataType::DateTime => "TIMESTAMP",
    }
}

fn scalar_param(value: &ScalarValue) -> SqlParam {
    match value {
        ScalarValue::Text(s) => SqlParam::Text(s.clone()),
        ScalarValue::Int(n) => SqlParam::Integer(*n as i64),
        ScalarValue::Float(n) => SqlParam::Float(*n),
        ScalarValue::Bool(b) => SqlParam::Bool(*b),
        ScalarValue::DateTime(dt) => SqlParam::Timestamp(*dt),
        ScalarValue::Null => SqlParam::Null,
    }
}
