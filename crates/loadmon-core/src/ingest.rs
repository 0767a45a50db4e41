//! File-level ingestion: read, sniff, dispatch to the matching parser.
//!
//! Missing or unreadable files are non-fatal: a warning is logged and an
//! empty sequence returned. Every parser degrades malformed input to fewer
//! samples rather than an error, so ingestion itself never fails either —
//! the user-visible failure mode is always "fewer or zero samples".

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::model::{ProcessSample, VmstatSample};
use crate::parse::{parse_mac_iostat, parse_mac_ps_csv, parse_mac_top, parse_pidstat, parse_vmstat};
use crate::sniff::{self, SourceFormat};
use crate::summary::{self, PidstatSummary, VmstatSummary};

/// Canonical monitoring envelope consumed by downstream report tooling.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Default)]
#[serde(default)]
pub struct MonitoringData {
    pub vmstat: Vec<VmstatSample>,
    pub pidstat: Vec<ProcessSample>,
    /// CPU core count of the capture host, recorded for downstream
    /// normalization; not interpreted here.
    pub cpu_cores: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vmstat_summary: Option<VmstatSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pidstat_summary: Option<PidstatSummary>,
}

impl MonitoringData {
    /// Computes and attaches both summary records. Empty sequences produce
    /// no summary rather than a zero-filled one.
    pub fn with_summaries(mut self) -> Self {
        self.vmstat_summary = summary::summarize_vmstat(&self.vmstat);
        self.pidstat_summary = summary::summarize_process(&self.pidstat);
        self
    }
}

fn read_input(path: &Path) -> Option<String> {
    match fs::read_to_string(path) {
        Ok(content) => Some(content),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "monitoring file unreadable, treating as empty");
            None
        }
    }
}

/// Parses a JSON envelope, salvaging an empty one on malformed input.
fn passthrough(content: &str, path: &Path) -> MonitoringData {
    serde_json::from_str(content).unwrap_or_else(|e| {
        warn!(path = %path.display(), error = %e, "invalid monitoring JSON envelope");
        MonitoringData::default()
    })
}

/// Loads the system (vmstat) input slot: raw `vmstat`, a macOS substitute,
/// or a pre-parsed JSON envelope.
pub fn load_vmstat(path: &Path) -> Vec<VmstatSample> {
    let Some(content) = read_input(path) else {
        return Vec::new();
    };
    let format = sniff::sniff_system(&content);
    debug!(path = %path.display(), ?format, "system slot classified");
    match format {
        SourceFormat::JsonPassthrough => passthrough(&content, path).vmstat,
        SourceFormat::MacosTop => parse_mac_top(&content),
        SourceFormat::MacosIostat => parse_mac_iostat(&content),
        _ => parse_vmstat(&content),
    }
}

/// Loads the process (pidstat) input slot: raw `pidstat`, a ps CSV capture
/// substituted for it, or a pre-parsed JSON envelope.
pub fn load_pidstat(path: &Path, process_name: &str) -> Vec<ProcessSample> {
    let Some(content) = read_input(path) else {
        return Vec::new();
    };
    let format = sniff::sniff_process(&content);
    debug!(path = %path.display(), ?format, "process slot classified");
    match format {
        SourceFormat::JsonPassthrough => passthrough(&content, path).pidstat,
        SourceFormat::MacosPsCsv => parse_mac_ps_csv(&content)
            .into_iter()
            .map(ProcessSample::from)
            .collect(),
        _ => parse_pidstat(&content, process_name)
            .into_iter()
            .map(ProcessSample::from)
            .collect(),
    }
}

/// Loads a pre-parsed monitoring JSON envelope directly.
pub fn load_monitoring_json(path: &Path) -> MonitoringData {
    let Some(content) = read_input(path) else {
        return MonitoringData::default();
    };
    passthrough(&content, path)
}
