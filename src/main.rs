//! CLI entry point for the delivery dashboard.
//!
//! Provides subcommands for cleaning the dataset, listing the filter
//! controls, and computing the company, couriers and restaurants views.

use anyhow::{Result, bail};
use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use delivery_dashboard::analyzers::aggregate::ViewKind;
use delivery_dashboard::analyzers::analyzer::{Dashboard, export_view};
use delivery_dashboard::{
    clean::CleanMode,
    config::DashboardConfig,
    filter::FilterParams,
    output::{RunSummary, append_record, print_json, print_pretty, write_clean_csv},
};
use std::ffi::OsStr;
use std::path::Path;
use tracing::{info, warn};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "delivery_dashboard")]
#[command(about = "Delivery logistics metrics: company, couriers and restaurants views", long_about = None)]
struct Cli {
    /// JSON config file
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Dataset CSV (plain or .gz); overrides the config and DATASET_PATH
    #[arg(short, long, global = true)]
    dataset: Option<String>,

    /// Abort on the first malformed row instead of skipping it
    #[arg(long, global = true, default_value_t = false)]
    strict: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Pretty,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Clean the dataset and report dropped rows
    Clean {
        /// Write the cleaned rows to this CSV file
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Show the date range and traffic labels available for filtering
    Options,
    /// Compute one or more dashboard views
    View {
        /// Views to compute (all when omitted)
        #[arg(value_enum)]
        views: Vec<ViewKind>,

        /// Only orders strictly before this date (YYYY-MM-DD)
        #[arg(long)]
        cutoff: Option<NaiveDate>,

        /// Traffic densities to keep; repeat for several (all when omitted)
        #[arg(short, long)]
        traffic: Vec<String>,

        /// Delivery persons per city in the speed rankings
        #[arg(long)]
        top_n: Option<usize>,

        /// Directory to write <view>.json files to
        #[arg(long)]
        out_dir: Option<String>,

        /// Stdout format
        #[arg(short, long, value_enum, default_value_t = Format::Json)]
        format: Format,

        /// CSV file to append a run summary row to
        #[arg(short, long)]
        summary: Option<String>,
    },
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path = std::env::var("LOG_FILE_PATH")
        .unwrap_or_else(|_| "logs/delivery_dashboard.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("delivery_dashboard.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    let mut config = DashboardConfig::resolve(cli.config.as_deref())?;
    if let Some(dataset) = cli.dataset {
        config.dataset_path = dataset;
    }
    if cli.strict {
        config.strict = true;
    }
    let mode = if config.strict {
        CleanMode::Strict
    } else {
        CleanMode::Lenient
    };

    let dashboard = Dashboard::load(&config.dataset_path, mode)?;

    match cli.command {
        Commands::Clean { output } => {
            let report = dashboard.report();
            for (field, count) in &report.dropped {
                info!(%field, count, "Rows dropped for missing value");
            }
            for err in &report.errors {
                warn!(error = %err, "Malformed row");
            }
            print_json(report)?;

            if let Some(path) = output {
                write_clean_csv(&path, dashboard.records())?;
                info!(path = %path, rows = dashboard.records().len(), "Cleaned dataset written");
            }
        }
        Commands::Options => {
            print_json(&dashboard.sidebar(config.default_cutoff))?;
        }
        Commands::View {
            views,
            cutoff,
            traffic,
            top_n,
            out_dir,
            format,
            summary,
        } => {
            let sidebar = dashboard.sidebar(config.default_cutoff);
            let cutoff = cutoff.unwrap_or(config.default_cutoff);

            if let (Some(min), Some(max)) = (sidebar.min_date, sidebar.max_date) {
                if cutoff < min || cutoff > max {
                    warn!(%cutoff, %min, %max, "Cutoff outside the dataset's date range");
                }
            }

            let params = if traffic.is_empty() {
                FilterParams::new(cutoff, sidebar.traffic_labels.iter().cloned())
            } else {
                let unknown: Vec<_> = traffic
                    .iter()
                    .filter(|t| !sidebar.traffic_labels.contains(*t))
                    .collect();
                if !unknown.is_empty() {
                    bail!(
                        "unknown traffic labels {:?}, available: {:?}",
                        unknown,
                        sidebar.traffic_labels
                    );
                }
                FilterParams::new(cutoff, traffic)
            };

            let views = if views.is_empty() {
                ViewKind::ALL.to_vec()
            } else {
                views
            };
            let top_n = top_n.unwrap_or(config.top_n);
            let out_dir = out_dir.unwrap_or_else(|| config.report_dir.clone());

            for kind in views {
                let rendered = dashboard.render(kind, &params, top_n);

                match format {
                    Format::Pretty => print_pretty(&rendered.view),
                    Format::Json => print_json(&rendered.view)?,
                }

                export_view(&rendered, Path::new(&out_dir))?;

                if let Some(path) = &summary {
                    let row = RunSummary::new(
                        kind.name(),
                        &params,
                        dashboard.report(),
                        rendered.filtered_rows,
                    );
                    append_record(path, &row)?;
                }
            }
        }
    }

    Ok(())
}
