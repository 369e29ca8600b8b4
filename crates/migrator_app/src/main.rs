//! Command-line entry point for the subscription migrator.

mod cli;
mod confirm;
mod logging;
mod progress;

use std::process::ExitCode;

use anyhow::{bail, Result};
use clap::Parser;
use migrator_core::{Action, RunConfig};
use migrator_engine::{load_links, run_extract, run_set, Selectors, Session};
use migrator_logging::migrator_error;

use crate::progress::PrintSink;

fn main() -> ExitCode {
    let cli = cli::Cli::parse();
    logging::initialize(cli.verbose);

    let config = match cli.into_config() {
        Ok(config) => config,
        Err(problems) => {
            for problem in problems {
                println!("{problem}");
            }
            return ExitCode::FAILURE;
        }
    };

    let runtime = match tokio::runtime::Runtime::new() {
        Ok(runtime) => runtime,
        Err(err) => {
            migrator_error!("could not start the async runtime: {err}");
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(run(&config)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            migrator_error!("{err:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(config: &RunConfig) -> Result<()> {
    let selectors = Selectors::default();

    match config.action {
        Action::Extract => run_extract_mode(config, &selectors).await,
        Action::Set => run_set_mode(config, &selectors).await,
    }
}

async fn run_extract_mode(config: &RunConfig, selectors: &Selectors) -> Result<()> {
    let Some(mut session) = confirm::acquire_session(&config.profile, selectors).await? else {
        return Ok(());
    };

    println!("Going to extract channels you're subscribed to");
    let result = run_extract(&session, selectors, &config.filepath, &PrintSink).await;
    session.close().await;

    let report = result?;
    if report.wrote {
        println!("Done");
    } else {
        println!("No channel links to write to file");
    }
    Ok(())
}

async fn run_set_mode(config: &RunConfig, selectors: &Selectors) -> Result<()> {
    // Resolve the input before any browser work: a missing or empty list
    // must terminate the run before a session is ever opened.
    let loaded = load_links(&config.filepath)?;
    if loaded.resumed {
        println!("Continuing from tmp file");
    }
    if loaded.links.is_empty() {
        bail!("No lines found in file");
    }

    let Some(mut session) = confirm::acquire_session(&config.profile, selectors).await? else {
        return Ok(());
    };

    println!("Going to subscribe");
    let report = run_set(
        &session,
        selectors,
        &loaded.links,
        &config.filepath,
        config.save_progress,
        &PrintSink,
    )
    .await;
    session.close().await;

    if let Some(failure) = report.failure {
        return Err(failure.into());
    }
    Ok(())
}
