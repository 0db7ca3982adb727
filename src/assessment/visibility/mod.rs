//! Conditional-visibility resolution: conditions, rules, and the final
//! shown/hidden verdict per question.

mod condition;
mod rule;

use std::collections::BTreeMap;

use super::domain::{AnswerSet, QuestionId, RuleAction, Schema};

pub(crate) use condition::evaluate_condition;
pub(crate) use rule::evaluate_rule;

/// Final shown/hidden verdict for every question in the schema.
pub type VisibilityMap = BTreeMap<QuestionId, bool>;

/// Applies every rule in author order and returns the resulting map.
///
/// Semantics callers must know about:
///
/// - Every question starts visible; a `show` rule sets its target's
///   visibility to the match result, a `hide` rule to its negation.
/// - **Last rule wins.** When several rules target the same question, the
///   later rule overwrites the earlier verdict unconditionally; verdicts are
///   never merged. This is a deliberate predictability trade-off.
/// - A hidden question's answer still drives downstream conditions. The
///   ordering invariant (sources strictly precede targets) keeps this
///   acyclic, but it does permit hidden-but-still-controlling questions.
///
/// Runs in O(rules) with no recursion; a rule whose target no longer exists
/// is skipped.
pub fn resolve_visibility(schema: &Schema, answers: &AnswerSet) -> VisibilityMap {
    let mut visibility: VisibilityMap = schema
        .questions()
        .map(|question| (question.id.clone(), true))
        .collect();

    for rule in &schema.rules {
        let matched = evaluate_rule(rule, answers);
        let shown = match rule.action {
            RuleAction::Show => matched,
            RuleAction::Hide => !matched,
        };
        if let Some(slot) = visibility.get_mut(&rule.target) {
            *slot = shown;
        }
    }

    visibility
}
