use super::common::*;
use crate::assessment::domain::{
    AnswerValue, CategoryId, ConditionOperator, QuestionId, QuestionKind, Rule, RuleAction,
    RuleCombinator, ScoreSpec,
};
use crate::assessment::sample::automation_readiness_schema;
use crate::assessment::validation::{validate_schema, SchemaError};

#[test]
fn sample_schema_passes_validation() {
    assert_eq!(validate_schema(&automation_readiness_schema()), Ok(()));
}

#[test]
fn rejects_duplicate_question_ids() {
    let schema = schema_of(
        vec![
            question("dup", 1, QuestionKind::Text),
            question("dup", 2, QuestionKind::Text),
        ],
        Vec::new(),
    );
    assert_eq!(
        validate_schema(&schema),
        Err(SchemaError::DuplicateQuestionId(QuestionId::new("dup")))
    );
}

#[test]
fn rejects_non_increasing_order() {
    let schema = schema_of(
        vec![
            question("a", 5, QuestionKind::Text),
            question("b", 5, QuestionKind::Text),
        ],
        Vec::new(),
    );
    assert!(matches!(
        validate_schema(&schema),
        Err(SchemaError::OrderNotIncreasing { .. })
    ));
}

#[test]
fn rejects_duplicate_option_values() {
    let schema = schema_of(
        vec![question("pick", 1, select(&["x", "x"]))],
        Vec::new(),
    );
    assert!(matches!(
        validate_schema(&schema),
        Err(SchemaError::DuplicateOptionValue { .. })
    ));
}

#[test]
fn rejects_inverted_scale_bounds() {
    let schema = schema_of(
        vec![question("urgency", 1, QuestionKind::Scale { min: 10, max: 1 })],
        Vec::new(),
    );
    assert_eq!(
        validate_schema(&schema),
        Err(SchemaError::InvertedScaleBounds {
            id: QuestionId::new("urgency"),
            min: 10,
            max: 1,
        })
    );

    let single_point = schema_of(
        vec![question("urgency", 1, QuestionKind::Scale { min: 5, max: 5 })],
        Vec::new(),
    );
    assert_eq!(validate_schema(&single_point), Ok(()));
}

#[test]
fn rejects_rules_without_conditions() {
    let schema = schema_of(
        vec![
            question("a", 1, QuestionKind::Text),
            question("b", 2, QuestionKind::Text),
        ],
        vec![Rule {
            conditions: Vec::new(),
            combinator: RuleCombinator::All,
            action: RuleAction::Show,
            target: QuestionId::new("b"),
        }],
    );
    assert!(matches!(
        validate_schema(&schema),
        Err(SchemaError::RuleWithoutConditions { index: 0, .. })
    ));
}

#[test]
fn rejects_self_referencing_rules() {
    let schema = schema_of(
        vec![
            question("a", 1, QuestionKind::Text),
            question("b", 2, QuestionKind::Text),
        ],
        vec![show_if_equals("b", AnswerValue::text("x"), "b")],
    );
    assert!(matches!(
        validate_schema(&schema),
        Err(SchemaError::SelfReferencingRule { .. })
    ));
}

#[test]
fn rejects_unknown_rule_references() {
    let missing_target = schema_of(
        vec![question("a", 1, QuestionKind::Text)],
        vec![show_if_equals("a", AnswerValue::text("x"), "ghost")],
    );
    assert!(matches!(
        validate_schema(&missing_target),
        Err(SchemaError::UnknownRuleTarget { .. })
    ));

    let missing_source = schema_of(
        vec![question("a", 1, QuestionKind::Text)],
        vec![show_if_equals("ghost", AnswerValue::text("x"), "a")],
    );
    assert!(matches!(
        validate_schema(&missing_source),
        Err(SchemaError::UnknownConditionSource { .. })
    ));
}

#[test]
fn rejects_sources_that_do_not_precede_their_target() {
    let schema = schema_of(
        vec![
            question("early", 1, QuestionKind::Text),
            question("late", 2, QuestionKind::Text),
        ],
        vec![show_if_equals("late", AnswerValue::text("x"), "early")],
    );
    assert!(matches!(
        validate_schema(&schema),
        Err(SchemaError::SourceDoesNotPrecedeTarget { .. })
    ));
}

#[test]
fn rejects_operators_the_source_kind_does_not_support() {
    let schema = schema_of(
        vec![
            question("flagged", 1, QuestionKind::Boolean),
            question("detail", 2, QuestionKind::Text),
        ],
        vec![Rule {
            conditions: vec![condition(
                "flagged",
                ConditionOperator::StartsWith,
                AnswerValue::text("x"),
            )],
            combinator: RuleCombinator::All,
            action: RuleAction::Show,
            target: QuestionId::new("detail"),
        }],
    );
    assert!(matches!(
        validate_schema(&schema),
        Err(SchemaError::UnsupportedOperator {
            operator: ConditionOperator::StartsWith,
            ..
        })
    ));
}

#[test]
fn rejects_bad_categories() {
    let mut duplicate = schema_of(vec![question("a", 1, QuestionKind::Text)], Vec::new());
    duplicate.categories = vec![category("c", 0.5), category("c", 0.5)];
    assert!(matches!(
        validate_schema(&duplicate),
        Err(SchemaError::DuplicateCategoryId(_))
    ));

    let mut heavy = schema_of(vec![question("a", 1, QuestionKind::Text)], Vec::new());
    heavy.categories = vec![category("c", 1.5)];
    assert!(matches!(
        validate_schema(&heavy),
        Err(SchemaError::CategoryWeightOutOfRange { .. })
    ));

    let mut unknown = schema_of(
        vec![{
            let mut q = question("a", 1, QuestionKind::Text);
            q.category = Some(CategoryId::new("ghost"));
            q
        }],
        Vec::new(),
    );
    unknown.categories = vec![category("real", 0.5)];
    assert!(matches!(
        validate_schema(&unknown),
        Err(SchemaError::UnknownCategory { .. })
    ));
}

#[test]
fn rejects_bad_score_specs() {
    let scored_without_category = schema_of(
        vec![{
            let mut q = question("a", 1, QuestionKind::Text);
            q.score = Some(ScoreSpec::Flat { value: 5.0 });
            q
        }],
        Vec::new(),
    );
    assert!(matches!(
        validate_schema(&scored_without_category),
        Err(SchemaError::ScoredQuestionWithoutCategory(_))
    ));

    let mut per_option_on_text = schema_of(
        vec![{
            let mut q = question("a", 1, QuestionKind::Text);
            q.category = Some(CategoryId::new("c"));
            q.score = Some(per_option(&[("x", 1.0)], None));
            q
        }],
        Vec::new(),
    );
    per_option_on_text.categories = vec![category("c", 0.5)];
    assert!(matches!(
        validate_schema(&per_option_on_text),
        Err(SchemaError::PerOptionWithoutOptions(_))
    ));

    let mut undeclared_option = schema_of(
        vec![{
            let mut q = question("a", 1, select(&["x"]));
            q.category = Some(CategoryId::new("c"));
            q.score = Some(per_option(&[("y", 1.0)], None));
            q
        }],
        Vec::new(),
    );
    undeclared_option.categories = vec![category("c", 0.5)];
    assert!(matches!(
        validate_schema(&undeclared_option),
        Err(SchemaError::ScoredOptionNotDeclared { .. })
    ));

    let mut negative_cap = schema_of(
        vec![{
            let mut q = question("a", 1, multi_select(&["x"]));
            q.category = Some(CategoryId::new("c"));
            q.score = Some(per_option(&[("x", 1.0)], Some(-2.0)));
            q
        }],
        Vec::new(),
    );
    negative_cap.categories = vec![category("c", 0.5)];
    assert!(matches!(
        validate_schema(&negative_cap),
        Err(SchemaError::NegativeCap(_))
    ));
}

#[test]
fn chain_schema_is_valid_at_any_length() {
    assert_eq!(validate_schema(&chain_schema(200)), Ok(()));
}
