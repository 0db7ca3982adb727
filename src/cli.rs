use crate::demo::{run_demo, run_preview, run_validate, DemoArgs, PreviewArgs, ValidateArgs};
use clap::{Parser, Subcommand};
use readiness_engine::config::AppConfig;
use readiness_engine::error::AppError;
use readiness_engine::telemetry;

#[derive(Parser, Debug)]
#[command(
    name = "Readiness Assessment Engine",
    about = "Validate assessment schemas and preview visibility and scoring from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Validate a schema file against the authoring invariants
    Validate(ValidateArgs),
    /// Run a schema and an answers file through both resolvers
    Preview(PreviewArgs),
    /// Walk the built-in automation-readiness assessment through canned scenarios (default)
    Demo(DemoArgs),
}

pub(crate) fn run() -> Result<(), AppError> {
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    let cli = Cli::parse();
    let command = cli.command.unwrap_or_else(|| Command::Demo(DemoArgs::default()));

    match command {
        Command::Validate(args) => run_validate(args),
        Command::Preview(args) => run_preview(args, &config),
        Command::Demo(args) => run_demo(args, &config),
    }
}
