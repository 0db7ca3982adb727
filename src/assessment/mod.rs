//! The assessment engine: schema model, conditional-visibility resolution,
//! and weighted readiness scoring.
//!
//! Both resolvers are pure functions over an immutable [`Schema`] and a
//! snapshot [`AnswerSet`]; they hold no state, perform no I/O, and may be run
//! for any number of answer sets in parallel. Configuration mistakes are
//! rejected up front by [`validate_schema`]; anything that degrades after
//! that (a reference broken mid-session) resolves conservatively instead of
//! erroring.

pub mod domain;
pub mod preview;
pub mod sample;
pub mod scoring;
pub mod validation;
pub mod visibility;

#[cfg(test)]
mod tests;

pub use domain::{
    AnswerSet, AnswerValue, CategoryId, ChoiceOption, Condition, ConditionOperator, Question,
    QuestionId, QuestionKind, Rule, RuleAction, RuleCombinator, Schema, ScoreCategory, ScoreSpec,
    Section,
};
pub use preview::{PreviewHarness, Scenario, ScenarioOutcome};
pub use scoring::{
    resolve_score, ScoreResult, ScoringPolicy, DEFAULT_FALLBACK_SCORE, DEFAULT_NORMALIZATION_BASE,
};
pub use validation::{validate_schema, SchemaError};
pub use visibility::{resolve_visibility, VisibilityMap};
