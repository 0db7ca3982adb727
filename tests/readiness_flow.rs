use readiness_engine::assessment::{
    resolve_score, resolve_visibility, sample, validate_schema, AnswerSet, AnswerValue,
    CategoryId, PreviewHarness, QuestionId, Scenario, SchemaError, ScoringPolicy,
};
use serde_json::json;

fn lead_gen_schema() -> readiness_engine::assessment::Schema {
    let raw = json!({
        "sections": [
            {
                "id": "intake",
                "title": "Intake",
                "questions": [
                    {
                        "id": "team_size",
                        "prompt": "How big is the team?",
                        "type": "select",
                        "options": [
                            { "label": "Solo", "value": "solo" },
                            { "label": "Large", "value": "large" }
                        ],
                        "order": 1,
                        "category": "fit",
                        "score": {
                            "mode": "per_option",
                            "values": { "solo": 2.0, "large": 10.0 }
                        }
                    },
                    {
                        "id": "stack",
                        "prompt": "Which tools do you use?",
                        "type": "multi_select",
                        "options": [
                            { "label": "CRM", "value": "crm" },
                            { "label": "Sheets", "value": "sheets" },
                            { "label": "Scripts", "value": "scripts" }
                        ],
                        "order": 2,
                        "category": "fit",
                        "score": {
                            "mode": "per_option",
                            "values": { "crm": 4.0, "sheets": 4.0, "scripts": 4.0 },
                            "cap": 10.0
                        }
                    },
                    {
                        "id": "enterprise_contact",
                        "prompt": "Who should we contact?",
                        "type": "text",
                        "order": 3
                    }
                ]
            }
        ],
        "rules": [
            {
                "conditions": [
                    { "source": "team_size", "operator": "equals", "comparison": "large" }
                ],
                "combinator": "all",
                "action": "show",
                "target": "enterprise_contact"
            }
        ],
        "categories": [
            { "id": "fit", "weight": 1.0 }
        ]
    });

    serde_json::from_value(raw).expect("schema JSON deserializes")
}

#[test]
fn full_lifecycle_over_the_json_contract() {
    let schema = lead_gen_schema();
    validate_schema(&schema).expect("authored schema is valid");

    let answers: AnswerSet = serde_json::from_value(json!({
        "team_size": "large",
        "stack": ["crm", "sheets", "scripts"],
        "enterprise_contact": null
    }))
    .expect("answers JSON deserializes");

    let visibility = resolve_visibility(&schema, &answers);
    assert_eq!(
        visibility.get(&QuestionId::new("enterprise_contact")),
        Some(&true)
    );

    let score = resolve_score(&schema, &answers, &ScoringPolicy::default());
    // 10 (team_size) + 10 (stack, capped from 12) = 20 -> 100 * 20 / 20
    assert_eq!(score.category_scores[&CategoryId::new("fit")], 20.0);
    assert_eq!(score.final_score, 100);
}

#[test]
fn null_answers_count_as_unanswered() {
    let schema = lead_gen_schema();
    let answers: AnswerSet = serde_json::from_value(json!({
        "team_size": null,
        "stack": []
    }))
    .expect("answers JSON deserializes");

    let visibility = resolve_visibility(&schema, &answers);
    assert_eq!(
        visibility.get(&QuestionId::new("enterprise_contact")),
        Some(&false)
    );

    let score = resolve_score(&schema, &answers, &ScoringPolicy::default());
    assert!(score.fallback_applied);
    assert_eq!(score.final_score, 70);
}

#[test]
fn schemas_with_broken_rules_never_reach_the_resolvers() {
    let mut schema = lead_gen_schema();
    schema.rules[0].conditions.clear();
    assert!(matches!(
        validate_schema(&schema),
        Err(SchemaError::RuleWithoutConditions { .. })
    ));
}

#[test]
fn sample_assessment_feeds_the_tier_selection_contract() {
    let schema = sample::automation_readiness_schema();
    let harness = PreviewHarness::new(&schema).expect("sample schema validates");

    let mut answers = AnswerSet::new();
    answers.insert("company_size", AnswerValue::text("medium"));
    answers.insert("automation_budget", AnswerValue::text("one_to_five_k"));
    answers.insert("automation_experience", AnswerValue::text("moderate"));
    answers.insert(
        "current_tools",
        AnswerValue::many(["zapier", "crm_automation", "custom_scripts"]),
    );
    answers.insert(
        "pain_points",
        AnswerValue::many(["manual_data_entry", "reporting", "lead_followup"]),
    );
    answers.insert("biggest_bottleneck", AnswerValue::text("slow_reporting"));
    answers.insert("timeline", AnswerValue::text("three_months"));

    let outcome = harness.run(&Scenario::new("mid-market lead", answers));
    // categories 12 / 14 / 13 / 6; weighted total 11.8 -> score 59, mid-tier
    // on the downstream <41 / 41-79 / >=80 split
    assert_eq!(outcome.score.final_score, 59);
    assert!(!outcome.score.fallback_applied);

    let outcomes = harness.run_all(&[Scenario::empty("empty"), Scenario::maximal("max", &schema)]);
    assert_eq!(outcomes[0].score.final_score, 70);
    assert_eq!(outcomes[1].score.final_score, 100);
}
