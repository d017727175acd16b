use clap::Parser;
use review_config::AppConfig;
use std::process::ExitCode;

mod cli;
mod input;
mod logger;
mod output;
mod page;
mod server;
mod utils;

use cli::{Cli, RunOptions};

const SKILL: &str = include_str!("../assets/skill.md");

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.skill {
        print!("{}", SKILL);
        return ExitCode::SUCCESS;
    }

    match logger::init() {
        Ok(path) => log::info!("Starting line-review, logging to {}", path.display()),
        Err(e) => eprintln!("warning: logging disabled: {:#}", e),
    }

    let options = RunOptions::resolve(&cli, AppConfig::load());

    let input = match input::resolve(cli.diff.as_deref(), &cli.paths) {
        Ok(Some(input)) => input,
        Ok(None) => {
            log::warn!("No input given");
            eprintln!("{}", cli::usage());
            return ExitCode::from(2);
        }
        Err(e) => {
            eprintln!("Error: {:#}", e);
            return ExitCode::FAILURE;
        }
    };

    match run(input, &cli.ranges, &options).await {
        Ok(code) => code,
        Err(e) => {
            log::error!("{:#}", e);
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(
    input: input::ReviewInput,
    ranges: &[String],
    options: &RunOptions,
) -> anyhow::Result<ExitCode> {
    let session = input::build_session(input, ranges)?;

    let Some(comments) = server::run(session, options).await? else {
        eprintln!("review interrupted, no comments written");
        return Ok(ExitCode::from(130));
    };

    output::emit(std::io::stdout().lock(), &comments, options.output_format)?;
    log::info!("Exiting line-review");
    Ok(ExitCode::SUCCESS)
}
