use std::collections::BTreeSet;

use super::super::domain::{AnswerSet, AnswerValue, Condition, ConditionOperator};

/// Evaluates one atomic condition against the current answers.
///
/// Total over every operator/answer pairing: a dangling source id resolves to
/// the empty sentinel and fails closed (false) for everything except the
/// emptiness checks, and shape mismatches that slipped past schema validation
/// degrade to false rather than panicking.
pub(crate) fn evaluate_condition(condition: &Condition, answers: &AnswerSet) -> bool {
    let value = answers.get(&condition.source);
    let comparison = &condition.comparison;

    match condition.operator {
        ConditionOperator::IsEmpty => value.is_empty(),
        ConditionOperator::IsNotEmpty => !value.is_empty(),
        // an empty answer never satisfies a value comparison
        _ if value.is_empty() => false,
        ConditionOperator::Equals => value == comparison,
        ConditionOperator::NotEquals => value != comparison,
        ConditionOperator::Contains => contains(value, comparison).unwrap_or(false),
        ConditionOperator::NotContains => {
            contains(value, comparison).map(|found| !found).unwrap_or(false)
        }
        ConditionOperator::ContainsAll => match (as_set(value), as_set(comparison)) {
            (Some(have), Some(wanted)) => wanted.iter().all(|entry| have.contains(entry)),
            _ => false,
        },
        ConditionOperator::ContainsAny => match (as_set(value), as_set(comparison)) {
            (Some(have), Some(wanted)) => wanted.iter().any(|entry| have.contains(entry)),
            _ => false,
        },
        ConditionOperator::StartsWith => match (value, comparison) {
            (AnswerValue::Text(text), AnswerValue::Text(prefix)) => text.starts_with(prefix),
            _ => false,
        },
        ConditionOperator::EndsWith => match (value, comparison) {
            (AnswerValue::Text(text), AnswerValue::Text(suffix)) => text.ends_with(suffix),
            _ => false,
        },
        ConditionOperator::GreaterThan => ordered(value, comparison, |lhs, rhs| lhs > rhs),
        ConditionOperator::LessThan => ordered(value, comparison, |lhs, rhs| lhs < rhs),
        ConditionOperator::GreaterOrEqual => ordered(value, comparison, |lhs, rhs| lhs >= rhs),
        ConditionOperator::LessOrEqual => ordered(value, comparison, |lhs, rhs| lhs <= rhs),
        ConditionOperator::IsTrue => matches!(value, AnswerValue::Flag(true)),
        ConditionOperator::IsFalse => matches!(value, AnswerValue::Flag(false)),
    }
}

/// Substring on text, membership on sets. A set comparison value matches when
/// any of its elements is found. `None` marks an incomparable shape so that
/// `not_contains` stays failed-closed instead of inverting a mismatch.
fn contains(value: &AnswerValue, comparison: &AnswerValue) -> Option<bool> {
    match (value, comparison) {
        (AnswerValue::Text(text), AnswerValue::Text(needle)) => Some(text.contains(needle)),
        (AnswerValue::Text(text), AnswerValue::Many(needles)) => {
            Some(needles.iter().any(|needle| text.contains(needle)))
        }
        (AnswerValue::Many(values), AnswerValue::Text(needle)) => Some(values.contains(needle)),
        (AnswerValue::Many(values), AnswerValue::Many(needles)) => {
            Some(needles.iter().any(|needle| values.contains(needle)))
        }
        _ => None,
    }
}

/// Set view for the set-vs-set operators; a lone text value acts as a
/// singleton so authors can compare against one option without array syntax.
fn as_set(value: &AnswerValue) -> Option<BTreeSet<&str>> {
    match value {
        AnswerValue::Many(values) => Some(values.iter().map(String::as_str).collect()),
        AnswerValue::Text(text) => Some(BTreeSet::from([text.as_str()])),
        _ => None,
    }
}

fn ordered(value: &AnswerValue, comparison: &AnswerValue, compare: fn(f64, f64) -> bool) -> bool {
    match (value.coerce_ordinal(), comparison.coerce_ordinal()) {
        (Some(lhs), Some(rhs)) => compare(lhs, rhs),
        _ => false,
    }
}
