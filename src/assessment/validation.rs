//! Authoring-time schema validation. Configuration errors are rejected here,
//! at save time, so the resolvers never have to raise them at runtime.

use std::collections::BTreeSet;

use super::domain::{CategoryId, ConditionOperator, QuestionId, QuestionKind, Schema, ScoreSpec};

/// Authoring errors that must be fixed before a schema is published.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SchemaError {
    #[error("duplicate question id `{0}`")]
    DuplicateQuestionId(QuestionId),
    #[error("question `{id}` has order {found}, which does not increase past {previous}")]
    OrderNotIncreasing {
        id: QuestionId,
        found: u32,
        previous: u32,
    },
    #[error("question `{id}` declares duplicate option value `{value}`")]
    DuplicateOptionValue { id: QuestionId, value: String },
    #[error("question `{id}` declares scale bounds {min}..{max} with min above max")]
    InvertedScaleBounds {
        id: QuestionId,
        min: i32,
        max: i32,
    },
    #[error("rule {index} targeting `{target}` has no conditions")]
    RuleWithoutConditions { index: usize, target: QuestionId },
    #[error("rule {index} targeting `{target}` references its own target")]
    SelfReferencingRule { index: usize, target: QuestionId },
    #[error("rule {index} targets unknown question `{target}`")]
    UnknownRuleTarget { index: usize, target: QuestionId },
    #[error("rule {index} condition references unknown question `{source}`")]
    UnknownConditionSource { index: usize, source: QuestionId },
    #[error(
        "rule {index}: source `{source}` (order {source_order}) must precede \
         target `{target}` (order {target_order})"
    )]
    SourceDoesNotPrecedeTarget {
        index: usize,
        source: QuestionId,
        source_order: u32,
        target: QuestionId,
        target_order: u32,
    },
    #[error("rule {index}: operator `{operator:?}` is not supported by question `{source}`")]
    UnsupportedOperator {
        index: usize,
        source: QuestionId,
        operator: ConditionOperator,
    },
    #[error("duplicate category id `{0}`")]
    DuplicateCategoryId(CategoryId),
    #[error("category `{id}` declares weight {weight}, outside [0, 1]")]
    CategoryWeightOutOfRange { id: CategoryId, weight: f64 },
    #[error("question `{id}` references unknown category `{category}`")]
    UnknownCategory { id: QuestionId, category: CategoryId },
    #[error("scored question `{0}` belongs to no category")]
    ScoredQuestionWithoutCategory(QuestionId),
    #[error("question `{0}` has per-option scores but declares no options")]
    PerOptionWithoutOptions(QuestionId),
    #[error("question `{id}` scores undeclared option value `{value}`")]
    ScoredOptionNotDeclared { id: QuestionId, value: String },
    #[error("question `{0}` declares a negative per-option cap")]
    NegativeCap(QuestionId),
}

/// Validates a schema before it is published.
///
/// Checks identifier uniqueness, the strictly increasing question order, the
/// rule invariants (non-empty, no self-reference, sources strictly before
/// targets, operators compatible with the source kind), and the scoring
/// annotations. Rules can only depend on earlier questions, which forbids
/// dependency cycles by construction; no runtime cycle detection exists or
/// is needed.
pub fn validate_schema(schema: &Schema) -> Result<(), SchemaError> {
    let mut seen_ids = BTreeSet::new();
    let mut previous_order: Option<u32> = None;

    for question in schema.questions() {
        if !seen_ids.insert(question.id.clone()) {
            return Err(SchemaError::DuplicateQuestionId(question.id.clone()));
        }
        if let Some(previous) = previous_order {
            if question.order <= previous {
                return Err(SchemaError::OrderNotIncreasing {
                    id: question.id.clone(),
                    found: question.order,
                    previous,
                });
            }
        }
        previous_order = Some(question.order);

        if let QuestionKind::Scale { min, max } = question.kind {
            if min > max {
                return Err(SchemaError::InvertedScaleBounds {
                    id: question.id.clone(),
                    min,
                    max,
                });
            }
        }

        let mut seen_values = BTreeSet::new();
        for option in question.kind.options() {
            if !seen_values.insert(option.value.as_str()) {
                return Err(SchemaError::DuplicateOptionValue {
                    id: question.id.clone(),
                    value: option.value.clone(),
                });
            }
        }
    }

    validate_rules(schema)?;
    validate_scoring(schema)?;

    Ok(())
}

fn validate_rules(schema: &Schema) -> Result<(), SchemaError> {
    for (index, rule) in schema.rules.iter().enumerate() {
        if rule.conditions.is_empty() {
            return Err(SchemaError::RuleWithoutConditions {
                index,
                target: rule.target.clone(),
            });
        }

        let target = schema
            .question(&rule.target)
            .ok_or_else(|| SchemaError::UnknownRuleTarget {
                index,
                target: rule.target.clone(),
            })?;

        for condition in &rule.conditions {
            if condition.source == rule.target {
                return Err(SchemaError::SelfReferencingRule {
                    index,
                    target: rule.target.clone(),
                });
            }

            let source = schema.question(&condition.source).ok_or_else(|| {
                SchemaError::UnknownConditionSource {
                    index,
                    source: condition.source.clone(),
                }
            })?;

            if source.order >= target.order {
                return Err(SchemaError::SourceDoesNotPrecedeTarget {
                    index,
                    source: condition.source.clone(),
                    source_order: source.order,
                    target: rule.target.clone(),
                    target_order: target.order,
                });
            }

            if !source.kind.supports(condition.operator) {
                return Err(SchemaError::UnsupportedOperator {
                    index,
                    source: condition.source.clone(),
                    operator: condition.operator,
                });
            }
        }
    }

    Ok(())
}

fn validate_scoring(schema: &Schema) -> Result<(), SchemaError> {
    let mut category_ids = BTreeSet::new();
    for category in &schema.categories {
        if !category_ids.insert(category.id.clone()) {
            return Err(SchemaError::DuplicateCategoryId(category.id.clone()));
        }
        if !(0.0..=1.0).contains(&category.weight) || !category.weight.is_finite() {
            return Err(SchemaError::CategoryWeightOutOfRange {
                id: category.id.clone(),
                weight: category.weight,
            });
        }
    }

    for question in schema.questions() {
        if let Some(category) = &question.category {
            if !category_ids.contains(category) {
                return Err(SchemaError::UnknownCategory {
                    id: question.id.clone(),
                    category: category.clone(),
                });
            }
        }

        let Some(spec) = &question.score else {
            continue;
        };

        if question.category.is_none() {
            return Err(SchemaError::ScoredQuestionWithoutCategory(
                question.id.clone(),
            ));
        }

        if let ScoreSpec::PerOption { values, cap } = spec {
            let declared: BTreeSet<&str> = match &question.kind {
                QuestionKind::Select { options } | QuestionKind::MultiSelect { options } => {
                    options.iter().map(|option| option.value.as_str()).collect()
                }
                QuestionKind::Text
                | QuestionKind::Boolean
                | QuestionKind::Scale { .. }
                | QuestionKind::Date => {
                    return Err(SchemaError::PerOptionWithoutOptions(question.id.clone()));
                }
            };
            for value in values.keys() {
                if !declared.contains(value.as_str()) {
                    return Err(SchemaError::ScoredOptionNotDeclared {
                        id: question.id.clone(),
                        value: value.clone(),
                    });
                }
            }
            if cap.map(|cap| cap < 0.0).unwrap_or(false) {
                return Err(SchemaError::NegativeCap(question.id.clone()));
            }
        }
    }

    Ok(())
}
