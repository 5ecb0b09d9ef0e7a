//! Integration tests for filter compilation and evaluation.
//!
//! Targeted cases for each operator family plus a randomized equivalence
//! check of the compiled predicate against a plain reference interpreter.

mod common;

use rand::Rng;
use serde_json::json;

use listwise_query::CompileError;
use listwise_query::compile::compile_filter;
use listwise_query::query::Query;
use listwise_query::schema::Entity;
use listwise_query::types::{DataType, FilterClause, Operator};

use common::{TICKET, Ticket, sample_tickets};

fn matches(clause: &FilterClause, ticket: &Ticket) -> bool {
    let stage = compile_filter(&TICKET, clause).expect("clause should compile");
    stage.eval_bool(&ticket.record())
}

#[test]
fn test_direct_integer_range() {
    let tickets = sample_tickets();
    let clause = FilterClause::new("priority", Operator::Gte, DataType::Integer, "3");
    let matched: Vec<&str> = tickets
        .iter()
        .filter(|t| matches(&clause, t))
        .map(|t| t.title.as_str())
        .collect();
    assert_eq!(
        matched,
        vec![
            "Printer on fire",
            "Quarterly review prep",
            "Budget review follow-up",
            "VPN flapping",
        ]
    );
}

#[test]
fn test_nested_path_is_case_insensitive() {
    let ticket = Ticket::new("Escalation", 2).owner("Drew", "support");
    let clause = FilterClause::new("OWNER.Name", Operator::Eq, DataType::String, "Drew");
    assert!(matches(&clause, &ticket));
}

#[test]
fn test_datetime_equality_matches_whole_day() {
    let tickets = sample_tickets();
    let clause = FilterClause::new("created", Operator::Eq, DataType::DateTime, "2024-03-10");
    let matched: Vec<&str> = tickets
        .iter()
        .filter(|t| matches(&clause, t))
        .map(|t| t.title.as_str())
        .collect();
    // Both tickets created on March 10th match, regardless of time of day.
    assert_eq!(matched, vec!["Printer on fire", "Quarterly review prep"]);
}

#[test]
fn test_datetime_inequality_is_exact_complement() {
    let tickets = sample_tickets();
    let eq = FilterClause::new("created", Operator::Eq, DataType::DateTime, "2024-03-10");
    let neq = FilterClause::new("created", Operator::Neq, DataType::DateTime, "2024-03-10");
    for ticket in &tickets {
        assert_ne!(matches(&eq, ticket), matches(&neq, ticket), "{}", ticket.title);
    }
}

#[test]
fn test_document_path_with_coercion() {
    let tickets = sample_tickets();
    let clause = FilterClause::new("metadata.score", Operator::Gt, DataType::Number, "40");
    let matched: Vec<&str> = tickets
        .iter()
        .filter(|t| matches(&clause, t))
        .map(|t| t.title.as_str())
        .collect();
    // "not a number" and the missing score coerce to null and never match.
    assert_eq!(matched, vec!["Printer on fire", "Quarterly review prep"]);
}

#[test]
fn test_document_string_membership() {
    let tickets = sample_tickets();
    let clause = FilterClause::new("metadata.region", Operator::In, DataType::String, "east,north");
    let matched: Vec<&str> = tickets
        .iter()
        .filter(|t| matches(&clause, t))
        .map(|t| t.title.as_str())
        .collect();
    assert_eq!(matched, vec!["Printer on fire", "VPN flapping"]);
}

#[test]
fn test_neq_matches_records_missing_the_document_path() {
    let with_region = Ticket::new("a", 1).metadata(json!({"region": "east"}));
    let without_region = Ticket::new("b", 1).metadata(json!({}));
    let clause = FilterClause::new("metadata.region", Operator::Neq, DataType::String, "east");
    assert!(!matches(&clause, &with_region));
    assert!(matches(&clause, &without_region));
}

#[test]
fn test_unknown_field_is_a_compile_error() {
    let clause = FilterClause::new("severity", Operator::Eq, DataType::Integer, "1");
    let err = compile_filter(&TICKET, &clause).unwrap_err();
    assert_eq!(
        err,
        CompileError::FieldNotFound {
            path: "severity".to_string(),
            segment: "severity".to_string(),
        }
    );
}

#[test]
fn test_filters_combine_conjunctively() {
    let mut query = Query::for_entity::<Ticket>();
    query
        .apply_filters(&[
            FilterClause::new("open", Operator::Eq, DataType::Boolean, "true"),
            FilterClause::new("title", Operator::Contains, DataType::String, "review"),
        ])
        .unwrap();
    let filter = query.filter().unwrap();

    let tickets = sample_tickets();
    let matched: Vec<&str> = tickets
        .iter()
        .filter(|t| filter.eval_bool(&t.record()))
        .map(|t| t.title.as_str())
        .collect();
    assert_eq!(matched, vec!["Quarterly review prep"]);
}

/// Reference semantics for integer comparisons on the priority field.
fn reference_priority(op: Operator, literal: i32, ticket: &Ticket) -> bool {
    match op {
        Operator::Eq => ticket.priority == literal,
        Operator::Neq => ticket.priority != literal,
        Operator::Gt => ticket.priority > literal,
        Operator::Gte => ticket.priority >= literal,
        Operator::Lt => ticket.priority < literal,
        Operator::Lte => ticket.priority <= literal,
        Operator::Contains | Operator::In => unreachable!(),
    }
}

#[test]
fn test_compiled_predicates_match_reference_interpreter() {
    let mut rng = rand::thread_rng();
    let ops = [
        Operator::Eq,
        Operator::Neq,
        Operator::Gt,
        Operator::Gte,
        Operator::Lt,
        Operator::Lte,
    ];
    for _ in 0..100 {
        let priority: i32 = rng.gen_range(0..10);
        let literal: i32 = rng.gen_range(0..10);
        let op = ops[rng.gen_range(0..ops.len())];
        let ticket = Ticket::new("randomized", priority);
        let clause =
            FilterClause::new("priority", op, DataType::Integer, literal.to_string());
        assert_eq!(
            matches(&clause, &ticket),
            reference_priority(op, literal, &ticket),
            "{} {} {}",
            priority,
            op,
            literal
        );
    }
}

#[test]
fn test_datetime_range_respects_instants() {
    let early = Ticket::new("early", 1).created("2024-03-10T01:00:00Z");
    let late = Ticket::new("late", 1).created("2024-03-10T23:00:00Z");
    let clause = FilterClause::new(
        "created",
        Operator::Gt,
        DataType::DateTime,
        "2024-03-10T12:00:00Z",
    );
    assert!(!matches(&clause, &early));
    assert!(matches(&clause, &late));
}
