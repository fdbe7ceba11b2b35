//! churnwatch - customer churn and health scoring CLI
//!
//! # Usage
//! ```sh
//! churnwatch score --json '{"tenure_months": 3, "monthly_revenue": 45, ...}'
//! churnwatch batch --input customers.csv --summary
//! churnwatch rules --path rules.toml
//! ```
//!
//! Results are written to stdout as JSON; logs go to stderr.
//! See `config` for the environment variables read at startup.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde_json::json;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::{Level, info};
use tracing_subscriber::prelude::*;

use churnwatch::application::{AssessmentService, PortfolioSummary};
use churnwatch::config::{Config, LogFormat};
use churnwatch::domain::assessment::BatchEntry;
use churnwatch::domain::customer::CustomerFeatures;
use churnwatch::domain::recommendation::RuleTable;
use churnwatch::infrastructure::{ServiceFactory, customer_csv, model_loader};

#[derive(Parser)]
#[command(author, version, about = "Customer churn risk, health and intervention scoring", long_about = None)]
struct Cli {
    /// Print Prometheus metrics to stderr on exit
    #[arg(long, global = true)]
    metrics: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Assess a single customer given as a JSON feature object
    Score {
        /// Inline JSON object
        #[arg(long, conflicts_with = "file")]
        json: Option<String>,

        /// File holding the JSON object (stdin when neither is given)
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
    /// Assess every customer in a CSV file
    Batch {
        #[arg(short, long)]
        input: PathBuf,

        /// Print a portfolio summary after the per-customer lines
        #[arg(long)]
        summary: bool,
    },
    /// Validate a rule table and list its rules
    Rules {
        /// Rule table file (bundled table when omitted)
        #[arg(short, long)]
        path: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let mut config = Config::from_env()?;
    if cli.metrics {
        config.observability.metrics_enabled = true;
    }

    init_logging(config.observability.log_format);
    info!("churnwatch {} starting", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Commands::Rules { path } => list_rules(path),
        Commands::Score { json, file } => {
            let service = ServiceFactory::create_service(&config)?;
            score(&service, json, file)?;
            print_metrics(&service);
            Ok(())
        }
        Commands::Batch { input, summary } => {
            let service = ServiceFactory::create_service(&config)?;
            batch(&service, &input, summary)?;
            print_metrics(&service);
            Ok(())
        }
    }
}

fn init_logging(format: LogFormat) {
    let filter =
        tracing_subscriber::EnvFilter::from_default_env().add_directive(Level::INFO.into());
    let layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);

    match format {
        LogFormat::Pretty => tracing_subscriber::registry()
            .with(filter)
            .with(layer.pretty())
            .init(),
        LogFormat::Compact => tracing_subscriber::registry()
            .with(filter)
            .with(layer.compact())
            .init(),
    }
}

fn score(service: &AssessmentService, json: Option<String>, file: Option<PathBuf>) -> Result<()> {
    let raw = match (json, file) {
        (Some(raw), _) => raw,
        (None, Some(path)) => std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {:?}", path))?,
        (None, None) => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read features from stdin")?;
            buffer
        }
    };

    let features = CustomerFeatures::from_json_str(&raw)?;
    let assessment = service.assess(&features)?;
    println!("{}", serde_json::to_string_pretty(&assessment)?);
    Ok(())
}

fn batch(service: &AssessmentService, input: &Path, summary: bool) -> Result<()> {
    let rows = customer_csv::read_customers_file(input)?;
    let entries = customer_csv::assess_rows(service, rows);

    for entry in &entries {
        println!("{}", entry_json(entry)?);
    }

    if summary {
        let summary = PortfolioSummary::from_entries(&entries);
        info!(
            "Portfolio: {} customers, {} high risk, average health {:.2}",
            summary.total_customers, summary.high_risk_customers, summary.average_health_score
        );
        println!("{}", serde_json::to_string_pretty(&summary)?);
    }
    Ok(())
}

fn entry_json(entry: &BatchEntry) -> Result<String> {
    let value = match &entry.outcome {
        Ok(assessment) => serde_json::to_value(assessment)?,
        Err(e) => json!({
            "customer_id": entry.customer_id,
            "error": {
                "kind": e.kind(),
                "field": e.field(),
                "message": e.to_string(),
            }
        }),
    };
    Ok(value.to_string())
}

fn list_rules(path: Option<PathBuf>) -> Result<()> {
    let table = match path {
        Some(path) => model_loader::load_rule_table(&path)?,
        None => RuleTable::standard().context("Bundled rule table is invalid")?,
    };

    println!(
        "Rule table {} ({} rules, max {} recommendations)",
        table.version,
        table.rules.len(),
        table.max_recommendations()
    );
    for rule in &table.rules {
        println!(
            "  {:<28} {:<7} {:<20} {}",
            rule.id,
            rule.priority.as_str(),
            rule.category.as_str(),
            rule.action
        );
    }
    println!(
        "  {:<28} {:<7} {:<20} {}",
        "(fallback: at risk)",
        table.fallback.at_risk.priority.as_str(),
        table.fallback.at_risk.category.as_str(),
        table.fallback.at_risk.action
    );
    if let Some(healthy) = &table.fallback.healthy {
        println!(
            "  {:<28} {:<7} {:<20} {}",
            "(fallback: healthy)",
            healthy.priority.as_str(),
            healthy.category.as_str(),
            healthy.action
        );
    }
    Ok(())
}

fn print_metrics(service: &AssessmentService) {
    if let Some(metrics) = service.metrics() {
        eprintln!("{}", metrics.render());
    }
}
