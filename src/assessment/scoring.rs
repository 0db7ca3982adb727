//! Weighted readiness scoring over the answered schema.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::domain::{AnswerSet, AnswerValue, CategoryId, Schema, ScoreSpec};

pub const DEFAULT_NORMALIZATION_BASE: f64 = 20.0;
pub const DEFAULT_FALLBACK_SCORE: u8 = 70;

/// Normalization dials for the final score. The base is fixed per deployment
/// so that an all-maximum answer set lands on 100.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoringPolicy {
    normalization_base: f64,
    fallback_score: u8,
}

impl ScoringPolicy {
    pub fn new(normalization_base: f64, fallback_score: u8) -> Self {
        let base = if normalization_base.is_finite() && normalization_base > 0.0 {
            normalization_base
        } else {
            DEFAULT_NORMALIZATION_BASE
        };

        Self {
            normalization_base: base,
            fallback_score: fallback_score.min(100),
        }
    }

    pub fn normalization_base(&self) -> f64 {
        self.normalization_base
    }

    pub fn fallback_score(&self) -> u8 {
        self.fallback_score
    }
}

impl Default for ScoringPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_NORMALIZATION_BASE, DEFAULT_FALLBACK_SCORE)
    }
}

/// Category sub-scores plus the normalized 0-100 readiness score consumed by
/// the downstream tier-selection layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub category_scores: BTreeMap<CategoryId, f64>,
    pub final_score: u8,
    /// True when the weighted total was non-positive or not finite and the
    /// documented fallback was substituted. A deliberate product decision:
    /// always surface a plausible recommendation, even with no signal. This
    /// also means a legitimately all-zero answer set is indistinguishable
    /// from missing data; callers that care can inspect `category_scores`.
    pub fallback_applied: bool,
}

/// Computes category sub-scores and the final readiness score.
///
/// Pure over `(schema, answers)`: contributions of unanswered questions are
/// zero, dangling category references drop their contribution, and every
/// declared category appears in the result (0.0 when untouched). Never
/// errors at runtime; degraded input degrades the score conservatively.
pub fn resolve_score(schema: &Schema, answers: &AnswerSet, policy: &ScoringPolicy) -> ScoreResult {
    let mut category_scores: BTreeMap<CategoryId, f64> = schema
        .categories
        .iter()
        .map(|category| (category.id.clone(), 0.0))
        .collect();

    for question in schema.questions() {
        let Some(spec) = &question.score else {
            continue;
        };
        let contribution = question_contribution(spec, answers.get(&question.id));
        if let Some(category) = &question.category {
            if let Some(slot) = category_scores.get_mut(category) {
                *slot += contribution;
            }
        }
    }

    let weighted_total: f64 = schema
        .categories
        .iter()
        .map(|category| category_scores[&category.id] * category.weight)
        .sum();

    let normalized = 100.0 * weighted_total / policy.normalization_base();
    if !normalized.is_finite() || normalized <= 0.0 {
        return ScoreResult {
            category_scores,
            final_score: policy.fallback_score(),
            fallback_applied: true,
        };
    }

    ScoreResult {
        category_scores,
        final_score: normalized.round().clamp(0.0, 100.0) as u8,
        fallback_applied: false,
    }
}

/// Contribution of one question. Flat specs pay out on any non-empty answer;
/// per-option specs look up single selections (0 when unmapped) or sum
/// multi-selections up to the per-question cap.
fn question_contribution(spec: &ScoreSpec, answer: &AnswerValue) -> f64 {
    if answer.is_empty() {
        return 0.0;
    }

    match spec {
        ScoreSpec::Flat { value } => *value,
        ScoreSpec::PerOption { values, cap } => match answer {
            AnswerValue::Text(selected) => values.get(selected).copied().unwrap_or(0.0),
            AnswerValue::Many(selected) => {
                let sum: f64 = selected
                    .iter()
                    .filter_map(|value| values.get(value))
                    .sum();
                // the cap bounds list-derived sums only
                cap.map_or(sum, |cap| sum.min(cap))
            }
            AnswerValue::Flag(_) | AnswerValue::Number(_) | AnswerValue::Empty => 0.0,
        },
    }
}
