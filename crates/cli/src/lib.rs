pub mod commands;

use clap::{Parser, Subcommand};
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(
    name = "optica",
    about = "Optica lens recommendation CLI",
    long_about = "Operate the Optica lens catalog: run migrations, seed the demo catalog, inspect config, and rank lenses against a prescription.",
    after_help = "Examples:\n  optica migrate\n  optica seed\n  optica use-cases\n  optica recommend --sph -2.5 --cyl -0.75 --use-case computer_work\n  optica doctor --json"
)]
pub struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(about = "Apply pending database migrations and return structured status output")]
    Migrate,
    #[command(about = "Load the deterministic demo catalog fixture and verify it landed")]
    Seed,
    #[command(about = "Rank catalog lenses against a prescription, use cases, and budget")]
    Recommend(commands::recommend::RecommendArgs),
    #[command(about = "List the quiz use cases and their display names")]
    UseCases {
        #[arg(long, help = "Emit machine-readable JSON output")]
        json: bool,
    },
    #[command(about = "Inspect effective configuration values with source attribution")]
    Config,
    #[command(about = "Validate config, database connectivity, and catalog readiness")]
    Doctor {
        #[arg(long, help = "Emit machine-readable JSON output")]
        json: bool,
    },
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Migrate => commands::migrate::run(),
        Command::Seed => commands::seed::run(),
        Command::Recommend(args) => commands::recommend::run(&args),
        Command::UseCases { json } => commands::use_cases::run(json),
        Command::Config => {
            commands::CommandResult { exit_code: 0, output: commands::config::run() }
        }
        Command::Doctor { json } => {
            commands::CommandResult { exit_code: 0, output: commands::doctor::run(json) }
        }
    };

    println!("{}", result.output);
    ExitCode::from(result.exit_code)
}
