use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Identifier wrapper for questions, stable across schema edits.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuestionId(pub String);

impl QuestionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for QuestionId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

// Required by the `thiserror` derive on `SchemaError`: fields named `source`
// must implement `std::error::Error`.
impl std::error::Error for QuestionId {}

/// Identifier wrapper for score categories.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryId(pub String);

impl CategoryId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl fmt::Display for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CategoryId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// One selectable choice on a select or multi-select question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoiceOption {
    pub label: String,
    /// Stored answer value, unique within the owning question.
    pub value: String,
}

impl ChoiceOption {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// Typed question variants. Each variant carries its own operator matrix, so
/// adding a kind forces every `match` on operators to be revisited.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum QuestionKind {
    Text,
    Select { options: Vec<ChoiceOption> },
    MultiSelect { options: Vec<ChoiceOption> },
    Boolean,
    Scale { min: i32, max: i32 },
    Date,
}

impl QuestionKind {
    pub fn options(&self) -> &[ChoiceOption] {
        match self {
            QuestionKind::Select { options } | QuestionKind::MultiSelect { options } => options,
            QuestionKind::Text
            | QuestionKind::Boolean
            | QuestionKind::Scale { .. }
            | QuestionKind::Date => &[],
        }
    }

    /// Operator matrix per question kind. Unsupported pairings are authoring
    /// errors caught by schema validation, never silent runtime falses.
    pub fn supports(&self, operator: ConditionOperator) -> bool {
        use ConditionOperator::*;
        match self {
            QuestionKind::Text => matches!(
                operator,
                Equals
                    | NotEquals
                    | Contains
                    | NotContains
                    | StartsWith
                    | EndsWith
                    | IsEmpty
                    | IsNotEmpty
                    | GreaterThan
                    | LessThan
                    | GreaterOrEqual
                    | LessOrEqual
            ),
            QuestionKind::Select { .. } => {
                matches!(operator, Equals | NotEquals | IsEmpty | IsNotEmpty)
            }
            QuestionKind::MultiSelect { .. } => matches!(
                operator,
                Equals
                    | NotEquals
                    | Contains
                    | NotContains
                    | ContainsAll
                    | ContainsAny
                    | IsEmpty
                    | IsNotEmpty
            ),
            QuestionKind::Boolean => matches!(operator, Equals | NotEquals | IsTrue | IsFalse),
            QuestionKind::Scale { .. } => matches!(
                operator,
                Equals
                    | NotEquals
                    | GreaterThan
                    | LessThan
                    | GreaterOrEqual
                    | LessOrEqual
                    | IsEmpty
                    | IsNotEmpty
            ),
            QuestionKind::Date => matches!(
                operator,
                Equals
                    | NotEquals
                    | GreaterThan
                    | LessThan
                    | GreaterOrEqual
                    | LessOrEqual
                    | IsEmpty
                    | IsNotEmpty
            ),
        }
    }
}

/// One form field with display order and optional scoring annotation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub id: QuestionId,
    pub prompt: String,
    #[serde(flatten)]
    pub kind: QuestionKind,
    /// Strictly increasing across the whole schema; doubles as the dependency
    /// order for rules (sources must precede their targets).
    pub order: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<CategoryId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<ScoreSpec>,
}

/// Display grouping of questions; carries no evaluation semantics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub id: String,
    pub title: String,
    pub questions: Vec<Question>,
}

/// Weighted grouping of questions used during score aggregation. Weights
/// need not sum to 1; the remainder acts as error margin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreCategory {
    pub id: CategoryId,
    pub weight: f64,
}

/// Per-question mapping from answers to numeric contributions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum ScoreSpec {
    /// Contributes `value` whenever the question holds a non-empty answer.
    Flat { value: f64 },
    /// Looks up each selected option value; multi-valued answers sum their
    /// mapped selections, optionally capped.
    PerOption {
        values: BTreeMap<String, f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        cap: Option<f64>,
    },
}

/// Comparison operators available to visibility conditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConditionOperator {
    Equals,
    NotEquals,
    Contains,
    NotContains,
    ContainsAll,
    ContainsAny,
    StartsWith,
    EndsWith,
    IsEmpty,
    IsNotEmpty,
    GreaterThan,
    LessThan,
    GreaterOrEqual,
    LessOrEqual,
    IsTrue,
    IsFalse,
}

/// One atomic comparison between a question's answer and a literal value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    pub source: QuestionId,
    pub operator: ConditionOperator,
    #[serde(default)]
    pub comparison: AnswerValue,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleCombinator {
    /// Every condition must hold.
    All,
    /// At least one condition must hold.
    Any,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleAction {
    Show,
    Hide,
}

/// Boolean combination of conditions controlling one target question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    pub conditions: Vec<Condition>,
    pub combinator: RuleCombinator,
    pub action: RuleAction,
    pub target: QuestionId,
}

/// Immutable form description: ordered sections of questions plus the
/// schema-level rule list (author order is semantic) and score categories.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    pub sections: Vec<Section>,
    #[serde(default)]
    pub rules: Vec<Rule>,
    #[serde(default)]
    pub categories: Vec<ScoreCategory>,
}

impl Schema {
    /// Questions in display order, flattened across sections.
    pub fn questions(&self) -> impl Iterator<Item = &Question> {
        self.sections
            .iter()
            .flat_map(|section| section.questions.iter())
    }

    pub fn question(&self, id: &QuestionId) -> Option<&Question> {
        self.questions().find(|question| &question.id == id)
    }

    pub fn category(&self, id: &CategoryId) -> Option<&ScoreCategory> {
        self.categories.iter().find(|category| &category.id == id)
    }
}

/// A single answer value. The JSON shape is positional: booleans, numbers,
/// strings, string arrays, and `null` for the explicit empty sentinel.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerValue {
    Flag(bool),
    Number(f64),
    Text(String),
    Many(BTreeSet<String>),
    #[default]
    Empty,
}

impl AnswerValue {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    pub fn number(value: f64) -> Self {
        Self::Number(value)
    }

    pub fn flag(value: bool) -> Self {
        Self::Flag(value)
    }

    pub fn many<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Many(values.into_iter().map(Into::into).collect())
    }

    /// The empty sentinel is uniform: `null`, the empty string, and the
    /// empty set all count as unanswered.
    pub fn is_empty(&self) -> bool {
        match self {
            AnswerValue::Empty => true,
            AnswerValue::Text(text) => text.is_empty(),
            AnswerValue::Many(values) => values.is_empty(),
            AnswerValue::Flag(_) | AnswerValue::Number(_) => false,
        }
    }

    /// Numeric or date coercion for the ordered comparison operators.
    /// Dates collapse onto their day ordinal so ISO text answers compare
    /// chronologically alongside plain numbers.
    pub(crate) fn coerce_ordinal(&self) -> Option<f64> {
        match self {
            AnswerValue::Number(value) => Some(*value),
            AnswerValue::Text(text) => {
                let trimmed = text.trim();
                trimmed.parse::<f64>().ok().or_else(|| {
                    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
                        .ok()
                        .map(|date| f64::from(date.num_days_from_ce()))
                })
            }
            AnswerValue::Flag(_) | AnswerValue::Many(_) | AnswerValue::Empty => None,
        }
    }
}

static EMPTY_ANSWER: AnswerValue = AnswerValue::Empty;

/// Snapshot of a respondent's answers keyed by question id. Built
/// incrementally by the form runtime; the engine never mutates it.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerSet(BTreeMap<QuestionId, AnswerValue>);

impl AnswerSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: impl Into<QuestionId>, value: AnswerValue) {
        self.0.insert(id.into(), value);
    }

    /// Absent ids resolve to the empty sentinel so lookups are total.
    pub fn get(&self, id: &QuestionId) -> &AnswerValue {
        self.0.get(id).unwrap_or(&EMPTY_ANSWER)
    }

    pub fn remove(&mut self, id: &QuestionId) -> Option<AnswerValue> {
        self.0.remove(id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&QuestionId, &AnswerValue)> {
        self.0.iter()
    }
}

impl FromIterator<(QuestionId, AnswerValue)> for AnswerSet {
    fn from_iter<T: IntoIterator<Item = (QuestionId, AnswerValue)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}
