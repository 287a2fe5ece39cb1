// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// ThriftGenie: photo enhancement for secondhand marketplace listings.
//
// Entry point. Loads configuration, initialises logging and dispatches the
// subcommand.

use std::process::ExitCode;

use clap::Parser;
use thriftgenie_cli::args::{Cli, Commands};
use thriftgenie_cli::commands::{self, Destination, Report};
use thriftgenie_core::AppConfig;
use thriftgenie_core::config::data_dir;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let dir = data_dir();
    let config = AppConfig::load(&dir).unwrap_or_default();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!(data_dir = %dir.display(), "ThriftGenie starting");

    match run(cli.command, &dir, &config).await {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(command: Commands, dir: &std::path::Path, config: &AppConfig) -> anyhow::Result<ExitCode> {
    match command {
        Commands::Enhance(args) => print_report(&commands::enhance(&args, config).await?),
        Commands::Adjust {
            input,
            adjustments,
            output,
        } => print_report(&commands::adjust(&input, adjustments.adjustments(), output).await?),
        Commands::Optimize {
            input,
            max_width,
            output,
        } => print_report(&commands::optimize(&input, max_width, output, config).await?),
        Commands::Inspect { input } => println!("{}", commands::inspect(&input)?),
        Commands::Batch {
            inputs,
            out_dir,
            jobs,
            pipeline,
        } => {
            let jobs = jobs.unwrap_or_else(|| {
                std::thread::available_parallelism().map_or(1, |n| n.get())
            });
            let entries = commands::batch(&inputs, &out_dir, jobs, &pipeline, config).await;
            let mut failed = 0usize;
            for entry in &entries {
                match &entry.result {
                    Ok(report) => print_report(report),
                    Err(err) => {
                        failed += 1;
                        eprintln!("{}: {err:#}", entry.input);
                    }
                }
            }
            println!("{} of {} photos enhanced", entries.len() - failed, entries.len());
            if failed > 0 {
                return Ok(ExitCode::FAILURE);
            }
        }
        Commands::Config { init } => println!("{}", commands::config(init, dir, config)?),
    }
    Ok(ExitCode::SUCCESS)
}

fn print_report(report: &Report) {
    match &report.destination {
        Destination::File(path) => println!(
            "{} -> {} ({} -> {} bytes, {}% smaller, {})",
            report.input,
            path.display(),
            report.original_size,
            report.processed_size,
            report.size_reduction,
            report.processing_time
        ),
        Destination::DataUrl(url) => println!("{url}"),
    }
}
