//! vEasy - personal finance in the terminal
//!
//! Usage:
//!   veasy                         # interactive UI (default)
//!   veasy report --kind income    # ring segments for a report tab
//!   veasy list                    # print every transaction
//!   veasy export out.json         # write transactions as JSON

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;
use tracing::Level;
use tracing_subscriber::EnvFilter;

use veasy::repository::{breakdown, export_json_file};
use veasy::{
    arc_segments, list_rows, report_total, AppConfig, CsvRepository, SampleRepository,
    TransactionKind, TransactionRepository, DEFAULT_EXPORT_PATH, DEFAULT_SPLASH_DELAY_MS,
};

const DEFAULT_LOG_FILE: &str = "veasy.log";

#[derive(Parser)]
#[command(name = "veasy", version, about = "Personal finance tracker")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Read transactions from a CSV (Title,Description,Amount,Time,Category)
    /// instead of the built-in samples
    #[arg(long, value_name = "CSV", global = true)]
    data: Option<PathBuf>,

    /// Splash screen duration in milliseconds
    #[arg(long, default_value_t = DEFAULT_SPLASH_DELAY_MS)]
    splash_ms: u64,

    /// Where the profile screen's "Export Data" writes
    #[arg(long, value_name = "PATH", default_value = DEFAULT_EXPORT_PATH)]
    export_path: PathBuf,

    /// Log destination while the UI owns the terminal
    #[arg(long, value_name = "PATH", default_value = DEFAULT_LOG_FILE)]
    log_file: PathBuf,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Command {
    /// Interactive terminal UI (default)
    Ui,
    /// Print the report ring for one tab
    Report {
        #[arg(long, value_enum, default_value_t = ReportKind::Expense)]
        kind: ReportKind,
        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Print every transaction
    List,
    /// Write every transaction as JSON
    Export {
        #[arg(value_name = "PATH")]
        path: PathBuf,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ReportKind {
    Expense,
    Income,
}

impl From<ReportKind> for TransactionKind {
    fn from(kind: ReportKind) -> Self {
        match kind {
            ReportKind::Expense => TransactionKind::Expense,
            ReportKind::Income => TransactionKind::Income,
        }
    }
}

fn main() -> Result<()> {
    let mut cli = Cli::parse();
    let command = cli.command.take().unwrap_or(Command::Ui);

    match command {
        Command::Ui => init_logging(cli.verbose, Some(&cli.log_file))?,
        _ => init_logging(cli.verbose, None)?,
    }

    let repository = open_repository(cli.data.as_deref());

    match &command {
        Command::Ui => {
            let config = AppConfig {
                splash_delay: Duration::from_millis(cli.splash_ms),
                export_path: cli.export_path.clone(),
            };
            run_ui_mode(repository, config)
        }
        Command::Report { kind, json } => run_report(repository.as_ref(), (*kind).into(), *json),
        Command::List => run_list(repository.as_ref()),
        Command::Export { path } => {
            let transactions = repository.list_transactions()?;
            export_json_file(&transactions, path)?;
            println!("✓ Exported {} transactions to {}", transactions.len(), path.display());
            Ok(())
        }
    }
}

fn init_logging(verbose: u8, log_file: Option<&Path>) -> Result<()> {
    let level = match verbose {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let directive = format!("veasy={}", level)
        .parse()
        .context("Invalid log directive")?;
    let filter = EnvFilter::from_default_env().add_directive(directive);

    match log_file {
        Some(path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .init();
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .with_target(false)
                .init();
        }
    }

    Ok(())
}

fn open_repository(data: Option<&Path>) -> Box<dyn TransactionRepository> {
    match data {
        Some(path) => {
            tracing::info!("reading transactions from {}", path.display());
            Box::new(CsvRepository::new(path))
        }
        None => Box::new(SampleRepository::new()),
    }
}

fn run_report(repository: &dyn TransactionRepository, kind: TransactionKind, json: bool) -> Result<()> {
    let transactions = repository.list_transactions()?;
    let items = breakdown(&transactions, kind);
    let total = report_total(&items);

    let segments = match arc_segments(total, &items) {
        Ok(segments) => segments,
        Err(err) => {
            tracing::warn!("{}", err);
            Vec::new()
        }
    };

    if json {
        let report = serde_json::json!({
            "kind": kind.as_str(),
            "total": total,
            "segments": segments,
            "rows": list_rows(&items, kind),
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("📊 {} report - total {}", kind, veasy::entities::format_amount(total));
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    if segments.is_empty() {
        println!("(no data)");
    }
    for (segment, row) in segments.iter().zip(list_rows(&items, kind)) {
        println!(
            "{:<16} {:>14}  {:>5.1}%  start {:>7.1}°  sweep {:>6.1}°  {}",
            row.label,
            row.amount_label,
            row.share_percent,
            segment.start_angle_deg,
            segment.sweep_angle_deg,
            segment.color.hex(),
        );
    }

    Ok(())
}

fn run_list(repository: &dyn TransactionRepository) -> Result<()> {
    let transactions = repository.list_transactions()?;
    for tx in &transactions {
        println!(
            "{:<9} {:<16} {:<24} {:>14}  {}",
            tx.time,
            tx.title,
            tx.description.as_deref().unwrap_or("-"),
            tx.amount_label(),
            tx.category,
        );
    }
    println!("✓ {} transactions", transactions.len());
    Ok(())
}

#[cfg(feature = "tui")]
fn run_ui_mode(repository: Box<dyn TransactionRepository>, config: AppConfig) -> Result<()> {
    tracing::info!("starting ui (splash {:?})", config.splash_delay);
    let mut app = veasy::ui::App::new(repository, config);
    veasy::ui::run_ui(&mut app)?;
    tracing::info!("ui closed");
    Ok(())
}

#[cfg(not(feature = "tui"))]
fn run_ui_mode(_repository: Box<dyn TransactionRepository>, _config: AppConfig) -> Result<()> {
    eprintln!("❌ TUI mode not available!");
    eprintln!("   Rebuild with: cargo build --features tui");
    eprintln!("   Or use: veasy report | list | export");
    std::process::exit(1);
}
