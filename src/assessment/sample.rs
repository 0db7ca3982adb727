//! Built-in automation-readiness assessment used by the CLI demo and as a
//! shared fixture. Each category's contributions max out at 20, so an
//! all-maximum answer set normalizes to exactly 100 against the default base.

use std::collections::BTreeMap;

use super::domain::{
    AnswerValue, CategoryId, ChoiceOption, Condition, ConditionOperator, Question, QuestionId,
    QuestionKind, Rule, RuleAction, RuleCombinator, Schema, ScoreCategory, ScoreSpec, Section,
};

fn option_values<const N: usize>(entries: [(&str, f64); N]) -> BTreeMap<String, f64> {
    entries
        .iter()
        .map(|(value, score)| (value.to_string(), *score))
        .collect()
}

fn per_option<const N: usize>(entries: [(&str, f64); N]) -> ScoreSpec {
    ScoreSpec::PerOption {
        values: option_values(entries),
        cap: None,
    }
}

fn per_option_capped<const N: usize>(entries: [(&str, f64); N], cap: f64) -> ScoreSpec {
    ScoreSpec::PerOption {
        values: option_values(entries),
        cap: Some(cap),
    }
}

/// The automation-readiness lead assessment: four weighted categories
/// (experience 0.40, pain points 0.25, company profile 0.20, timeline 0.15)
/// plus unscored follow-up questions driven by visibility rules.
pub fn automation_readiness_schema() -> Schema {
    let profile = Section {
        id: "profile".to_string(),
        title: "Company profile".to_string(),
        questions: vec![
            Question {
                id: QuestionId::new("company_size"),
                prompt: "How large is your team?".to_string(),
                kind: QuestionKind::Select {
                    options: vec![
                        ChoiceOption::new("Just me", "solo"),
                        ChoiceOption::new("2-10 people", "small"),
                        ChoiceOption::new("11-50 people", "medium"),
                        ChoiceOption::new("50+ people", "large"),
                    ],
                },
                order: 10,
                category: Some(CategoryId::new("profile")),
                score: Some(per_option([
                    ("solo", 2.0),
                    ("small", 5.0),
                    ("medium", 8.0),
                    ("large", 10.0),
                ])),
            },
            Question {
                id: QuestionId::new("automation_budget"),
                prompt: "What monthly budget could you commit to automation?".to_string(),
                kind: QuestionKind::Select {
                    options: vec![
                        ChoiceOption::new("Under $1k", "under_1k"),
                        ChoiceOption::new("$1k-$5k", "one_to_five_k"),
                        ChoiceOption::new("$5k-$20k", "five_to_twenty_k"),
                        ChoiceOption::new("Over $20k", "over_twenty_k"),
                    ],
                },
                order: 20,
                category: Some(CategoryId::new("profile")),
                score: Some(per_option([
                    ("under_1k", 2.0),
                    ("one_to_five_k", 5.0),
                    ("five_to_twenty_k", 8.0),
                    ("over_twenty_k", 10.0),
                ])),
            },
        ],
    };

    let experience = Section {
        id: "experience".to_string(),
        title: "Automation experience".to_string(),
        questions: vec![
            Question {
                id: QuestionId::new("automation_experience"),
                prompt: "How much automation do you run today?".to_string(),
                kind: QuestionKind::Select {
                    options: vec![
                        ChoiceOption::new("None yet", "none"),
                        ChoiceOption::new("A few basics", "basic"),
                        ChoiceOption::new("Moderate coverage", "moderate"),
                        ChoiceOption::new("Advanced pipelines", "advanced"),
                    ],
                },
                order: 30,
                category: Some(CategoryId::new("experience")),
                score: Some(per_option([
                    ("none", 0.0),
                    ("basic", 3.0),
                    ("moderate", 6.0),
                    ("advanced", 10.0),
                ])),
            },
            Question {
                id: QuestionId::new("current_tools"),
                prompt: "Which tools are already in your stack?".to_string(),
                kind: QuestionKind::MultiSelect {
                    options: vec![
                        ChoiceOption::new("Spreadsheet macros", "spreadsheets"),
                        ChoiceOption::new("Zapier / Make", "zapier"),
                        ChoiceOption::new("CRM automations", "crm_automation"),
                        ChoiceOption::new("Custom scripts", "custom_scripts"),
                        ChoiceOption::new("An RPA platform", "rpa_platform"),
                        ChoiceOption::new("AI assistants", "ai_assistants"),
                    ],
                },
                order: 40,
                category: Some(CategoryId::new("experience")),
                score: Some(per_option_capped(
                    [
                        ("spreadsheets", 2.0),
                        ("zapier", 2.0),
                        ("crm_automation", 2.0),
                        ("custom_scripts", 2.0),
                        ("rpa_platform", 2.0),
                        ("ai_assistants", 2.0),
                    ],
                    10.0,
                )),
            },
            Question {
                id: QuestionId::new("advanced_stack_detail"),
                prompt: "Tell us about your advanced pipelines.".to_string(),
                kind: QuestionKind::Text,
                order: 50,
                category: None,
                score: None,
            },
        ],
    };

    let needs = Section {
        id: "needs".to_string(),
        title: "Pain points".to_string(),
        questions: vec![
            Question {
                id: QuestionId::new("pain_points"),
                prompt: "Where does your team lose the most time?".to_string(),
                kind: QuestionKind::MultiSelect {
                    options: vec![
                        ChoiceOption::new("Manual data entry", "manual_data_entry"),
                        ChoiceOption::new("Reporting", "reporting"),
                        ChoiceOption::new("Lead follow-up", "lead_followup"),
                        ChoiceOption::new("Invoicing", "invoicing"),
                        ChoiceOption::new("Scheduling", "scheduling"),
                        ChoiceOption::new("Something else", "other"),
                    ],
                },
                order: 60,
                category: Some(CategoryId::new("pain_points")),
                score: Some(per_option_capped(
                    [
                        ("manual_data_entry", 2.0),
                        ("reporting", 2.0),
                        ("lead_followup", 2.0),
                        ("invoicing", 2.0),
                        ("scheduling", 2.0),
                        ("other", 2.0),
                    ],
                    10.0,
                )),
            },
            Question {
                id: QuestionId::new("other_pain_detail"),
                prompt: "What else is slowing you down?".to_string(),
                kind: QuestionKind::Text,
                order: 70,
                category: None,
                score: None,
            },
            Question {
                id: QuestionId::new("biggest_bottleneck"),
                prompt: "Which bottleneck hurts the most?".to_string(),
                kind: QuestionKind::Select {
                    options: vec![
                        ChoiceOption::new("Missed leads", "missed_leads"),
                        ChoiceOption::new("Slow reporting", "slow_reporting"),
                        ChoiceOption::new("Manual errors", "manual_errors"),
                        ChoiceOption::new("Team capacity", "team_capacity"),
                    ],
                },
                order: 80,
                category: Some(CategoryId::new("pain_points")),
                score: Some(per_option([
                    ("missed_leads", 10.0),
                    ("slow_reporting", 8.0),
                    ("manual_errors", 6.0),
                    ("team_capacity", 4.0),
                ])),
            },
        ],
    };

    let timeline = Section {
        id: "timeline".to_string(),
        title: "Timeline".to_string(),
        questions: vec![
            Question {
                id: QuestionId::new("timeline"),
                prompt: "When do you want to start?".to_string(),
                kind: QuestionKind::Select {
                    options: vec![
                        ChoiceOption::new("Immediately", "immediate"),
                        ChoiceOption::new("Within three months", "three_months"),
                        ChoiceOption::new("Six months or later", "six_months_plus"),
                    ],
                },
                order: 90,
                category: Some(CategoryId::new("timeline")),
                score: Some(per_option([
                    ("immediate", 10.0),
                    ("three_months", 6.0),
                    ("six_months_plus", 2.0),
                ])),
            },
            Question {
                id: QuestionId::new("kickoff_date"),
                prompt: "Do you have a kickoff date in mind?".to_string(),
                kind: QuestionKind::Date,
                order: 100,
                category: Some(CategoryId::new("timeline")),
                score: Some(ScoreSpec::Flat { value: 10.0 }),
            },
        ],
    };

    Schema {
        sections: vec![profile, experience, needs, timeline],
        rules: vec![
            // follow-up only for advanced users
            Rule {
                conditions: vec![Condition {
                    source: QuestionId::new("automation_experience"),
                    operator: ConditionOperator::Equals,
                    comparison: AnswerValue::text("advanced"),
                }],
                combinator: RuleCombinator::All,
                action: RuleAction::Show,
                target: QuestionId::new("advanced_stack_detail"),
            },
            // free-text detail only when "other" is picked
            Rule {
                conditions: vec![Condition {
                    source: QuestionId::new("pain_points"),
                    operator: ConditionOperator::Contains,
                    comparison: AnswerValue::text("other"),
                }],
                combinator: RuleCombinator::All,
                action: RuleAction::Show,
                target: QuestionId::new("other_pain_detail"),
            },
            // no kickoff date for leads six or more months out
            Rule {
                conditions: vec![Condition {
                    source: QuestionId::new("timeline"),
                    operator: ConditionOperator::Equals,
                    comparison: AnswerValue::text("six_months_plus"),
                }],
                combinator: RuleCombinator::All,
                action: RuleAction::Hide,
                target: QuestionId::new("kickoff_date"),
            },
        ],
        categories: vec![
            ScoreCategory {
                id: CategoryId::new("experience"),
                weight: 0.40,
            },
            ScoreCategory {
                id: CategoryId::new("pain_points"),
                weight: 0.25,
            },
            ScoreCategory {
                id: CategoryId::new("profile"),
                weight: 0.20,
            },
            ScoreCategory {
                id: CategoryId::new("timeline"),
                weight: 0.15,
            },
        ],
    }
}
