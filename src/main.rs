use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use u_curriculum::logging;
use u_curriculum::{PlanGenerator, PlanRequest, PlannerConfig};

/// Generate a semester-by-semester programme plan.
#[derive(Parser, Debug)]
#[command(name = "u-curriculum", version, about)]
struct Cli {
    /// JSON plan request (courses, semester_count, optional seed slots)
    #[arg(short, long)]
    request: PathBuf,

    /// TOML planner configuration
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init_cli_logger(cli.verbose);
    tracing::debug!("CLI arguments: {:?}", cli);

    let config = match &cli.config {
        Some(path) => PlannerConfig::from_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => PlannerConfig::default(),
    };

    let content = std::fs::read_to_string(&cli.request)
        .with_context(|| format!("reading request {}", cli.request.display()))?;
    let request: PlanRequest = serde_json::from_str(&content)
        .with_context(|| format!("parsing request {}", cli.request.display()))?;

    match PlanGenerator::new(config).generate(&request) {
        Ok(plan) => {
            println!("{}", serde_json::to_string_pretty(&plan)?);
            Ok(())
        }
        Err(e) => {
            tracing::error!(kind = ?e.kind(), codes = ?e.course_codes(), "plan generation failed");
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    }
}
