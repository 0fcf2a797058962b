// SPDX-License-Identifier: MIT OR Apache-2.0

//! certq - Security certification catalog search
//!
//! Query a catalog of security certifications with `key:value` filters,
//! numeric price/year ranges and free-text terms.

mod cli;
mod commands;

use std::process::ExitCode;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use clap_complete::generate;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::{Cli, Commands};
use commands::Context;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(&cli);
    certq::output::apply_color_policy();

    match run(&cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<ExitCode> {
    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = Cli::command();
        let name = cmd.get_name().to_string();
        generate(*shell, &mut cmd, name, &mut std::io::stdout());
        return Ok(ExitCode::SUCCESS);
    }

    let ctx = Context::from_cli(cli);
    match &cli.command {
        Commands::Search {
            query,
            filters,
            limit,
        } => commands::search::run(&ctx, query.as_deref(), filters, *limit)?,
        Commands::Parse { query } => commands::parse::run(&ctx, query)?,
        Commands::Groups { query, by, filters } => {
            commands::groups::run(&ctx, query.as_deref(), *by, filters)?
        }
        Commands::Validate => {
            if !commands::validate::run(&ctx)? {
                return Ok(ExitCode::FAILURE);
            }
        }
        Commands::Summary => commands::summary::run(&ctx)?,
        Commands::Completions { .. } => {}
    }

    Ok(ExitCode::SUCCESS)
}

fn init_tracing(cli: &Cli) {
    if cli.quiet {
        return;
    }

    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}
