//! Tally CLI - Expense analytics from exported snapshots
//!
//! Usage:
//!   tally --file expenses.json summary            Dashboard statistics
//!   tally categories --period this-month          Spending by category
//!   tally trend --granularity weekly              Spending per week
//!   tally chart line --cumulative                 Running total chart data

mod cli;
mod commands;


use anyhow::Result;
use chrono::Local;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    // Logs go to stderr so --json output stays parseable
    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();

    // Presets need no snapshot
    let command = match cli.command {
        Commands::Presets => return commands::cmd_presets(Local::now().date_naive(), cli.json),
        command => command,
    };

    let config = commands::load_config(cli.config.as_deref())?;
    let expenses = commands::load_snapshot(&cli.file, &cli.filters)?;

    match command {
        Commands::Summary => commands::cmd_summary(&expenses, cli.json),
        Commands::Categories => commands::cmd_categories(&expenses, cli.json),
        Commands::PaymentMethods => commands::cmd_payment_methods(&expenses, cli.json),
        Commands::Trend { granularity } => {
            let granularity = commands::parse_granularity(granularity.as_deref(), &config)?;
            commands::cmd_trend(&expenses, granularity, cli.json)
        }
        Commands::Cumulative { granularity } => {
            let granularity = commands::parse_granularity(Some(granularity.as_str()), &config)?;
            commands::cmd_cumulative(&expenses, granularity, cli.json)
        }
        Commands::Merchants { limit } => {
            let limit = limit.unwrap_or(config.top_merchants);
            commands::cmd_merchants(&expenses, limit, cli.json)
        }
        Commands::Compare { periods } => {
            let periods = commands::resolve_compare(&periods, &config)?;
            commands::cmd_compare(&expenses, &periods, cli.json)
        }
        Commands::Chart { chart } => match chart {
            ChartType::Pie => commands::cmd_chart_pie(&expenses),
            ChartType::PaymentPie => commands::cmd_chart_payment_pie(&expenses),
            ChartType::Bar { granularity } => {
                let granularity = commands::parse_granularity(granularity.as_deref(), &config)?;
                commands::cmd_chart_bar(&expenses, granularity)
            }
            ChartType::Line {
                granularity,
                cumulative,
            } => {
                let granularity = commands::parse_granularity(granularity.as_deref(), &config)?;
                commands::cmd_chart_line(&expenses, granularity, cumulative)
            }
            ChartType::Compare { periods } => {
                let periods = commands::resolve_compare(&periods, &config)?;
                commands::cmd_chart_compare(&expenses, &periods)
            }
        },
        Commands::Presets => Ok(()),
    }
}
