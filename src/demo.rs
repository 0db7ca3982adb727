use std::fs;
use std::path::{Path, PathBuf};

use clap::Args;
use tracing::info;

use readiness_engine::assessment::{
    sample, AnswerSet, AnswerValue, PreviewHarness, Scenario, ScenarioOutcome, Schema,
};
use readiness_engine::config::AppConfig;
use readiness_engine::error::AppError;

#[derive(Args, Debug)]
pub(crate) struct ValidateArgs {
    /// Path to a schema JSON file
    #[arg(long)]
    pub(crate) schema: PathBuf,
}

#[derive(Args, Debug)]
pub(crate) struct PreviewArgs {
    /// Path to a schema JSON file
    #[arg(long)]
    pub(crate) schema: PathBuf,
    /// Path to an answers JSON file (question id -> value)
    #[arg(long)]
    pub(crate) answers: PathBuf,
    /// Label for the scenario in the output
    #[arg(long, default_value = "preview")]
    pub(crate) name: String,
    /// Emit the outcome as JSON instead of a text report
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Emit the outcomes as JSON instead of a text report
    #[arg(long)]
    pub(crate) json: bool,
}

fn load_schema(path: &Path) -> Result<Schema, AppError> {
    let raw = fs::read_to_string(path)?;
    let schema: Schema = serde_json::from_str(&raw)?;
    Ok(schema)
}

pub(crate) fn run_validate(args: ValidateArgs) -> Result<(), AppError> {
    let schema = load_schema(&args.schema)?;
    readiness_engine::assessment::validate_schema(&schema)?;

    let questions = schema.questions().count();
    info!(
        questions,
        rules = schema.rules.len(),
        categories = schema.categories.len(),
        "schema is valid"
    );
    println!(
        "schema ok: {} question(s), {} rule(s), {} categorie(s)",
        questions,
        schema.rules.len(),
        schema.categories.len()
    );
    Ok(())
}

pub(crate) fn run_preview(args: PreviewArgs, config: &AppConfig) -> Result<(), AppError> {
    let schema = load_schema(&args.schema)?;
    let raw = fs::read_to_string(&args.answers)?;
    let answers: AnswerSet = serde_json::from_str(&raw)?;

    let harness = PreviewHarness::with_policy(&schema, config.scoring.policy())?;
    let outcome = harness.run(&Scenario::new(args.name, answers));

    if args.json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else {
        render_outcome(&outcome);
    }
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs, config: &AppConfig) -> Result<(), AppError> {
    let schema = sample::automation_readiness_schema();
    let harness = PreviewHarness::with_policy(&schema, config.scoring.policy())?;

    let scenarios = vec![
        Scenario::empty("no answers"),
        early_stage_scenario(),
        Scenario::maximal("all maximum", &schema),
    ];

    let outcomes = harness.run_all(&scenarios);
    if args.json {
        println!("{}", serde_json::to_string_pretty(&outcomes)?);
        return Ok(());
    }

    println!("== Automation readiness demo ==");
    for outcome in &outcomes {
        println!();
        render_outcome(outcome);
    }
    Ok(())
}

/// A small team with light automation, a pressing pain point, and no rush.
fn early_stage_scenario() -> Scenario {
    let mut answers = AnswerSet::new();
    answers.insert("company_size", AnswerValue::text("small"));
    answers.insert("automation_experience", AnswerValue::text("basic"));
    answers.insert(
        "pain_points",
        AnswerValue::many(["manual_data_entry", "other"]),
    );
    answers.insert("other_pain_detail", AnswerValue::text("chasing invoices"));
    answers.insert("timeline", AnswerValue::text("six_months_plus"));
    Scenario::new("early-stage team", answers)
}

fn render_outcome(outcome: &ScenarioOutcome) {
    println!("scenario: {}", outcome.scenario);
    if outcome.score.fallback_applied {
        println!(
            "  readiness score: {} (fallback, no usable signal)",
            outcome.score.final_score
        );
    } else {
        println!("  readiness score: {}", outcome.score.final_score);
    }
    for (category, score) in &outcome.score.category_scores {
        println!("  category {category}: {score:.1}");
    }
    if outcome.hidden.is_empty() {
        println!("  hidden questions: none");
    } else {
        for id in &outcome.hidden {
            println!("  hidden question: {id}");
        }
    }
}
