use super::super::domain::{AnswerSet, Rule, RuleCombinator};
use super::condition::evaluate_condition;

/// Combines a rule's conditions into a single verdict. Zero-condition rules
/// are rejected by schema validation and never reach this point.
pub(crate) fn evaluate_rule(rule: &Rule, answers: &AnswerSet) -> bool {
    match rule.combinator {
        RuleCombinator::All => rule
            .conditions
            .iter()
            .all(|condition| evaluate_condition(condition, answers)),
        RuleCombinator::Any => rule
            .conditions
            .iter()
            .any(|condition| evaluate_condition(condition, answers)),
    }
}
