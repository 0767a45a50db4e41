//! Summary statistics over parsed sample sequences.
//!
//! Pure single-pass aggregation; the full sequence is memory-resident so no
//! streaming computation is needed. An empty sequence produces no summary
//! record at all, never a zero-filled one.

use serde::{Deserialize, Serialize};

use crate::model::{ProcessSample, VmstatSample};

/// Aggregates over a vmstat-class sample sequence.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct VmstatSummary {
    pub sample_count: usize,
    pub avg_cpu_us_pct: f64,
    pub avg_cpu_sy_pct: f64,
    pub avg_cpu_id_pct: f64,
    /// Lowest observed free memory — the peak memory-pressure point of the
    /// run, not a maximum.
    pub peak_memory_free_kb: u64,
}

/// Aggregates over a per-process sample sequence.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct PidstatSummary {
    pub sample_count: usize,
    pub avg_cpu_total_pct: f64,
    pub peak_cpu_total_pct: f64,
}

/// Summarizes a vmstat sample sequence; `None` when empty.
pub fn summarize_vmstat(samples: &[VmstatSample]) -> Option<VmstatSummary> {
    if samples.is_empty() {
        return None;
    }
    let count = samples.len() as f64;
    Some(VmstatSummary {
        sample_count: samples.len(),
        avg_cpu_us_pct: samples.iter().map(|s| s.cpu_us_pct).sum::<f64>() / count,
        avg_cpu_sy_pct: samples.iter().map(|s| s.cpu_sy_pct).sum::<f64>() / count,
        avg_cpu_id_pct: samples.iter().map(|s| s.cpu_id_pct).sum::<f64>() / count,
        peak_memory_free_kb: samples
            .iter()
            .map(|s| s.memory_free_kb)
            .min()
            .unwrap_or(0),
    })
}

/// Summarizes a per-process sample sequence; `None` when empty.
pub fn summarize_process(samples: &[ProcessSample]) -> Option<PidstatSummary> {
    if samples.is_empty() {
        return None;
    }
    let count = samples.len() as f64;
    Some(PidstatSummary {
        sample_count: samples.len(),
        avg_cpu_total_pct: samples.iter().map(|s| s.cpu_total_pct()).sum::<f64>() / count,
        peak_cpu_total_pct: samples
            .iter()
            .map(|s| s.cpu_total_pct())
            .fold(f64::MIN, f64::max),
    })
}
