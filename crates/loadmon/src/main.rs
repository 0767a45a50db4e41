//! loadmon - normalizes load-test monitoring logs into canonical JSON.
//!
//! Accepts raw Linux `vmstat`/`pidstat` output, their macOS substitutes
//! (`top`, `iostat`, `ps` CSV), or an already-parsed JSON envelope, and
//! emits the canonical envelope with summary statistics attached.

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{Level, error, info};
use tracing_subscriber::EnvFilter;

use loadmon_core::ingest::{self, MonitoringData};

#[derive(Parser)]
#[command(
    name = "loadmon",
    about = "Parse vmstat/pidstat monitoring logs into canonical JSON",
    version
)]
struct Args {
    /// vmstat log file (raw text or pre-parsed JSON envelope).
    #[arg(long)]
    vmstat: Option<PathBuf>,

    /// pidstat log file (raw text, ps CSV capture, or JSON envelope).
    #[arg(long)]
    pidstat: Option<PathBuf>,

    /// Pre-parsed monitoring JSON envelope; takes precedence over
    /// --vmstat/--pidstat.
    #[arg(long)]
    monitoring_json: Option<PathBuf>,

    /// Output JSON file path. Prints to stdout when omitted.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Process name to filter for in pidstat output (case-insensitive
    /// substring).
    #[arg(long, default_value = "ServerLoadTest")]
    process_name: String,

    /// CPU core count of the capture host, recorded in the envelope for
    /// downstream normalization.
    #[arg(long, default_value = "1")]
    cpu_cores: u32,

    /// Increase logging verbosity (-v for debug, -vv for trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Quiet mode - only show errors.
    #[arg(short, long)]
    quiet: bool,
}

/// Initializes the tracing subscriber with the appropriate log level.
fn init_logging(verbose: u8, quiet: bool) {
    let level = if quiet {
        Level::ERROR
    } else {
        match verbose {
            0 => Level::INFO,
            1 => Level::DEBUG,
            _ => Level::TRACE,
        }
    };

    let filter = EnvFilter::from_default_env()
        .add_directive(format!("loadmon={}", level).parse().unwrap())
        .add_directive(format!("loadmon_core={}", level).parse().unwrap());

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose, args.quiet);

    let mut data = if let Some(ref path) = args.monitoring_json {
        let data = ingest::load_monitoring_json(path);
        info!(path = %path.display(), "loaded monitoring data from JSON envelope");
        data
    } else {
        MonitoringData {
            vmstat: args
                .vmstat
                .as_deref()
                .map(ingest::load_vmstat)
                .unwrap_or_default(),
            pidstat: args
                .pidstat
                .as_deref()
                .map(|path| ingest::load_pidstat(path, &args.process_name))
                .unwrap_or_default(),
            ..MonitoringData::default()
        }
    };
    data.cpu_cores = args.cpu_cores;
    let data = data.with_summaries();

    info!(
        vmstat_samples = data.vmstat.len(),
        pidstat_samples = data.pidstat.len(),
        "monitoring data parsed"
    );

    let json = match serde_json::to_string_pretty(&data) {
        Ok(json) => json,
        Err(e) => {
            error!(error = %e, "failed to serialize monitoring data");
            return ExitCode::FAILURE;
        }
    };

    match args.output {
        Some(path) => {
            if let Some(parent) = path.parent()
                && !parent.as_os_str().is_empty()
                && let Err(e) = fs::create_dir_all(parent)
            {
                error!(path = %parent.display(), error = %e, "failed to create output directory");
                return ExitCode::FAILURE;
            }
            if let Err(e) = fs::write(&path, &json) {
                error!(path = %path.display(), error = %e, "failed to write output");
                return ExitCode::FAILURE;
            }
            info!(path = %path.display(), "monitoring data saved");
        }
        None => println!("{json}"),
    }

    ExitCode::SUCCESS
}
