use std::collections::BTreeMap;

use crate::assessment::domain::{
    AnswerSet, AnswerValue, CategoryId, ChoiceOption, Condition, ConditionOperator, Question,
    QuestionId, QuestionKind, Rule, RuleAction, RuleCombinator, Schema, ScoreCategory, ScoreSpec,
    Section,
};

pub(super) fn question(id: &str, order: u32, kind: QuestionKind) -> Question {
    Question {
        id: QuestionId::new(id),
        prompt: format!("prompt for {id}"),
        kind,
        order,
        category: None,
        score: None,
    }
}

pub(super) fn select(values: &[&str]) -> QuestionKind {
    QuestionKind::Select {
        options: values
            .iter()
            .map(|value| ChoiceOption::new(value.to_uppercase(), *value))
            .collect(),
    }
}

pub(super) fn multi_select(values: &[&str]) -> QuestionKind {
    QuestionKind::MultiSelect {
        options: values
            .iter()
            .map(|value| ChoiceOption::new(value.to_uppercase(), *value))
            .collect(),
    }
}

pub(super) fn per_option(entries: &[(&str, f64)], cap: Option<f64>) -> ScoreSpec {
    ScoreSpec::PerOption {
        values: entries
            .iter()
            .map(|(value, score)| (value.to_string(), *score))
            .collect::<BTreeMap<_, _>>(),
        cap,
    }
}

pub(super) fn schema_of(questions: Vec<Question>, rules: Vec<Rule>) -> Schema {
    Schema {
        sections: vec![Section {
            id: "main".to_string(),
            title: "Main".to_string(),
            questions,
        }],
        rules,
        categories: Vec::new(),
    }
}

pub(super) fn show_if_equals(source: &str, comparison: AnswerValue, target: &str) -> Rule {
    Rule {
        conditions: vec![Condition {
            source: QuestionId::new(source),
            operator: ConditionOperator::Equals,
            comparison,
        }],
        combinator: RuleCombinator::All,
        action: RuleAction::Show,
        target: QuestionId::new(target),
    }
}

pub(super) fn answers(pairs: &[(&str, AnswerValue)]) -> AnswerSet {
    pairs
        .iter()
        .map(|(id, value)| (QuestionId::new(*id), value.clone()))
        .collect()
}

pub(super) fn condition(
    source: &str,
    operator: ConditionOperator,
    comparison: AnswerValue,
) -> Condition {
    Condition {
        source: QuestionId::new(source),
        operator,
        comparison,
    }
}

pub(super) fn category(id: &str, weight: f64) -> ScoreCategory {
    ScoreCategory {
        id: CategoryId::new(id),
        weight,
    }
}

/// Pathological chain: every question's rule references the immediately
/// preceding question, the worst case the ordering invariant allows.
pub(super) fn chain_schema(length: u32) -> Schema {
    let questions = (0..length)
        .map(|index| question(&format!("q{index}"), index + 1, QuestionKind::Text))
        .collect();
    let rules = (1..length)
        .map(|index| {
            show_if_equals(
                &format!("q{}", index - 1),
                AnswerValue::text("yes"),
                &format!("q{index}"),
            )
        })
        .collect();
    schema_of(questions, rules)
}
