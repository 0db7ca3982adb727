//! Author-facing simulation driver: feeds synthetic or handcrafted answer
//! sets through the visibility and scoring resolvers so a schema can be
//! vetted before publication. Answers travel explicitly through every call;
//! the harness holds no mutable preview state.

use serde::Serialize;

use super::domain::{AnswerSet, AnswerValue, QuestionId, QuestionKind, Schema, ScoreSpec};
use super::scoring::{resolve_score, ScoreResult, ScoringPolicy};
use super::validation::{validate_schema, SchemaError};
use super::visibility::{resolve_visibility, VisibilityMap};

/// A named synthetic answer set.
#[derive(Debug, Clone, PartialEq)]
pub struct Scenario {
    pub name: String,
    pub answers: AnswerSet,
}

impl Scenario {
    pub fn new(name: impl Into<String>, answers: AnswerSet) -> Self {
        Self {
            name: name.into(),
            answers,
        }
    }

    /// No questions answered; exercises the documented fallback score.
    pub fn empty(name: impl Into<String>) -> Self {
        Self::new(name, AnswerSet::new())
    }

    /// Synthesizes the best-scoring answer for every question: the
    /// highest-valued option(s) for choice questions, `true` for booleans,
    /// the upper bound for scales, and placeholder text/dates elsewhere.
    pub fn maximal(name: impl Into<String>, schema: &Schema) -> Self {
        let mut answers = AnswerSet::new();
        for question in schema.questions() {
            if let Some(value) = maximal_answer(&question.kind, question.score.as_ref()) {
                answers.insert(question.id.clone(), value);
            }
        }
        Self::new(name, answers)
    }
}

fn maximal_answer(kind: &QuestionKind, score: Option<&ScoreSpec>) -> Option<AnswerValue> {
    match kind {
        QuestionKind::Text => Some(AnswerValue::text("sample response")),
        QuestionKind::Boolean => Some(AnswerValue::flag(true)),
        QuestionKind::Scale { max, .. } => Some(AnswerValue::number(f64::from(*max))),
        QuestionKind::Date => Some(AnswerValue::text(
            chrono::Local::now().date_naive().format("%Y-%m-%d").to_string(),
        )),
        QuestionKind::Select { options } => {
            let best = match score {
                Some(ScoreSpec::PerOption { values, .. }) => options
                    .iter()
                    .max_by(|a, b| {
                        let a_score = values.get(&a.value).copied().unwrap_or(0.0);
                        let b_score = values.get(&b.value).copied().unwrap_or(0.0);
                        a_score.total_cmp(&b_score)
                    })
                    .map(|option| option.value.clone()),
                _ => options.first().map(|option| option.value.clone()),
            };
            best.map(AnswerValue::Text)
        }
        QuestionKind::MultiSelect { options } => {
            let selected: Vec<&str> = match score {
                Some(ScoreSpec::PerOption { values, .. }) => options
                    .iter()
                    .filter(|option| values.get(&option.value).copied().unwrap_or(0.0) > 0.0)
                    .map(|option| option.value.as_str())
                    .collect(),
                _ => options.iter().map(|option| option.value.as_str()).collect(),
            };
            if selected.is_empty() {
                None
            } else {
                Some(AnswerValue::many(selected))
            }
        }
    }
}

/// Outcome of one scenario run, ready for rendering or JSON output.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScenarioOutcome {
    pub scenario: String,
    pub visibility: VisibilityMap,
    /// Questions hidden under this scenario, in display order.
    pub hidden: Vec<QuestionId>,
    pub score: ScoreResult,
}

/// Validates the schema once, then replays scenarios against it.
pub struct PreviewHarness<'a> {
    schema: &'a Schema,
    policy: ScoringPolicy,
}

impl<'a> PreviewHarness<'a> {
    pub fn new(schema: &'a Schema) -> Result<Self, SchemaError> {
        Self::with_policy(schema, ScoringPolicy::default())
    }

    pub fn with_policy(schema: &'a Schema, policy: ScoringPolicy) -> Result<Self, SchemaError> {
        validate_schema(schema)?;
        Ok(Self { schema, policy })
    }

    pub fn schema(&self) -> &Schema {
        self.schema
    }

    pub fn run(&self, scenario: &Scenario) -> ScenarioOutcome {
        let visibility = resolve_visibility(self.schema, &scenario.answers);
        let score = resolve_score(self.schema, &scenario.answers, &self.policy);

        let hidden: Vec<QuestionId> = self
            .schema
            .questions()
            .filter(|question| !visibility.get(&question.id).copied().unwrap_or(true))
            .map(|question| question.id.clone())
            .collect();

        tracing::debug!(
            scenario = %scenario.name,
            answered = scenario.answers.len(),
            hidden = hidden.len(),
            final_score = score.final_score,
            fallback = score.fallback_applied,
            "scenario resolved"
        );

        ScenarioOutcome {
            scenario: scenario.name.clone(),
            visibility,
            hidden,
            score,
        }
    }

    pub fn run_all(&self, scenarios: &[Scenario]) -> Vec<ScenarioOutcome> {
        scenarios.iter().map(|scenario| self.run(scenario)).collect()
    }
}
