//! Ponto Attendance - time-and-attendance back office for punch-clock exports.

use std::path::PathBuf;

use anyhow::{Context, bail};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use ponto_attendance as app;

use app::config::{AppConfig, ConfigLoadResult};
use app::importer;
use app::models::TimeRecord;
use app::processing::{ProcessingOptions, Processor, RangeFilter};
use app::store::{MemoryStore, RecordStore};

/// Time-and-attendance back office for punch-clock exports.
#[derive(Parser)]
#[command(name = "ponto-attendance")]
struct Cli {
    /// Use config.toml from current directory (dev mode)
    #[arg(long)]
    dev: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Process a punch sheet: compute metrics and raise occurrences
    Process {
        /// Punch sheet file (TSV, or JSON with .json extension)
        #[arg(long)]
        input: PathBuf,
        /// Restrict processing to one employee
        #[arg(long)]
        employee: Option<String>,
    },
    /// Diagnostic analysis of one employee-day, without persisting
    Analyze {
        /// Punch sheet file (TSV, or JSON with .json extension)
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        employee: String,
        /// Date to analyze (YYYY-MM-DD)
        #[arg(long)]
        date: NaiveDate,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    // Determine config path based on mode
    let config_path = if cli.dev {
        tracing::info!("Dev mode: loading config from current directory");
        PathBuf::from("config.toml")
    } else {
        AppConfig::default_path()
    };
    tracing::info!("Config path: {:?}", config_path);

    let config = match AppConfig::try_load(&config_path) {
        ConfigLoadResult::Loaded(config) => config,
        ConfigLoadResult::Missing => {
            tracing::warn!("Config missing, using defaults (no shifts or employees)");
            AppConfig::default()
        }
        ConfigLoadResult::Invalid(e) => bail!("Invalid config: {e}"),
    };

    match cli.command {
        Command::Process { input, employee } => run_process(&config, &input, employee),
        Command::Analyze {
            input,
            employee,
            date,
        } => run_analyze(&config, &input, &employee, date),
    }
}

/// Seed a store with the config master data and the punch sheet rows.
fn load_store(config: &AppConfig, input: &std::path::Path) -> anyhow::Result<MemoryStore> {
    let mut store = MemoryStore::new();
    for shift in &config.shifts {
        store.add_shift(shift.clone());
    }
    for employee in &config.employees {
        store.add_employee(employee.clone());
    }

    let punch_sets = importer::load_punches(input)
        .with_context(|| format!("Failed to load punch sheet {}", input.display()))?;
    tracing::info!("Loaded {} punch set(s) from {}", punch_sets.len(), input.display());

    for raw in punch_sets {
        if store.employee(&raw.employee_id)?.is_none() {
            tracing::error!(
                employee = %raw.employee_id,
                date = %raw.date,
                "Punch row references unknown employee, skipping"
            );
            continue;
        }
        store.insert_record(TimeRecord::from_punches(&raw));
    }

    Ok(store)
}

fn run_process(
    config: &AppConfig,
    input: &std::path::Path,
    employee: Option<String>,
) -> anyhow::Result<()> {
    let mut store = load_store(config, input)?;

    let all = store.records_in_range(None, NaiveDate::MIN, NaiveDate::MAX)?;
    let Some(from) = all.iter().map(|r| r.date).min() else {
        tracing::warn!("Nothing to process");
        return Ok(());
    };
    let to = all.iter().map(|r| r.date).max().unwrap_or(from);

    let options = ProcessingOptions {
        generate_occurrences: config.processing.generate_occurrences,
        consider_weekends: config.processing.consider_weekends,
        consider_holidays: config.processing.consider_holidays,
        holidays: config.processing.holidays.clone(),
    };
    let filter = RangeFilter {
        employee_id: employee,
        from,
        to,
    };

    let report = Processor::new(&mut store, options).process_range(&filter)?;

    // Emit the processed days as JSON for downstream tooling.
    let mut days = Vec::new();
    for record in store.records_in_range(filter.employee_id.as_deref(), from, to)? {
        let calculation = store
            .calculation(&record.employee_id, record.date)
            .cloned()
            .unwrap_or_default();
        let occurrences = store.occurrences(&record.employee_id, record.date)?;
        days.push(serde_json::json!({
            "record": record,
            "calculation": calculation,
            "occurrences": occurrences,
        }));
    }

    println!(
        "{}",
        serde_json::to_string_pretty(&serde_json::json!({
            "days": days,
            "report": report,
        }))?
    );

    Ok(())
}

fn run_analyze(
    config: &AppConfig,
    input: &std::path::Path,
    employee: &str,
    date: NaiveDate,
) -> anyhow::Result<()> {
    let mut store = load_store(config, input)?;

    let options = ProcessingOptions {
        holidays: config.processing.holidays.clone(),
        ..Default::default()
    };
    let processor = Processor::new(&mut store, options);
    let (record, analysis, calculation) = processor.analyze_day(employee, date)?;

    println!(
        "{}",
        serde_json::to_string_pretty(&serde_json::json!({
            "record": record,
            "analysis": analysis,
            "calculation": calculation,
        }))?
    );

    Ok(())
}
