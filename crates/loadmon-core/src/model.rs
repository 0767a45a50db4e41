//! Canonical sample types shared by all parsers.
//!
//! Each sample corresponds to one monitoring-tool reporting interval. Samples
//! are created once per parsed line or block and are immutable afterwards;
//! parsers return them in file order and keep no state across calls.

use serde::{Deserialize, Serialize};

/// One system-wide observation normalized from `vmstat`-class tools.
///
/// Linux `vmstat` supplies every field. The macOS substitutes fill what they
/// can: `top` reports CPU user/sys/idle and free memory, `iostat` reports CPU
/// only. Fields a tool does not expose stay at zero.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Default)]
#[serde(default)]
pub struct VmstatSample {
    /// Runnable process count. Source: `vmstat` column `r`.
    pub procs_r: u64,

    /// Processes in uninterruptible sleep. Source: column `b`.
    pub procs_b: u64,

    /// Swap used (kB). Source: column `swpd`.
    pub memory_swpd_kb: u64,

    /// Free memory (kB). Source: column `free`, or the `PhysMem:` figure of
    /// macOS `top` converted from megabytes.
    pub memory_free_kb: u64,

    /// Buffer memory (kB). Source: column `buff`.
    pub memory_buff_kb: u64,

    /// Page cache memory (kB). Source: column `cache`.
    pub memory_cache_kb: u64,

    /// Swap-in rate (kB/s). Source: column `si`.
    pub swap_si_kb: u64,

    /// Swap-out rate (kB/s). Source: column `so`.
    pub swap_so_kb: u64,

    /// Blocks received from block devices (kB/s). Source: column `bi`.
    pub io_bi_kb: u64,

    /// Blocks sent to block devices (kB/s). Source: column `bo`.
    pub io_bo_kb: u64,

    /// Interrupts per second. Source: column `in`.
    pub system_in: u64,

    /// Context switches per second. Source: column `cs`.
    pub system_cs: u64,

    /// User CPU time percent. Source: column `us`.
    pub cpu_us_pct: f64,

    /// System CPU time percent. Source: column `sy`.
    pub cpu_sy_pct: f64,

    /// Idle CPU time percent. Source: column `id`.
    pub cpu_id_pct: f64,

    /// I/O wait percent. Source: column `wa`; macOS tools do not report it.
    pub cpu_wa_pct: f64,

    /// Stolen CPU time percent. Source: column `st`; macOS tools do not
    /// report it.
    pub cpu_st_pct: f64,

    /// Guest CPU time percent, present only when the tool emits an 18th
    /// column. Source: column `gu` (newer vmstat).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cpu_gu_pct: Option<f64>,
}

/// One per-process observation from Linux `pidstat`.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Default)]
pub struct PidstatSample {
    /// Process id. Source: `pidstat` column `PID`.
    pub pid: u32,

    /// User CPU percent. Source: column `%usr`.
    pub cpu_usr_pct: f64,

    /// System CPU percent. Source: column `%system`.
    pub cpu_system_pct: f64,

    /// Guest CPU percent. Source: column `%guest`.
    pub cpu_guest_pct: f64,

    /// Total CPU percent. Source: column `%CPU`.
    pub cpu_total_pct: f64,

    /// Resident set size (kB), present when `pidstat -r` adds the column.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memory_rss_kb: Option<u64>,
}

/// One per-process observation from a macOS `ps` CSV capture,
/// pidstat-compatible for summary purposes.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Default)]
pub struct MacPsSample {
    /// Process id.
    pub pid: u32,

    /// Total CPU percent (`%cpu` from `ps`).
    pub cpu_total_pct: f64,

    /// Capture time, seconds since epoch.
    pub timestamp_epoch_s: i64,
}

/// Per-process sample in either native `pidstat` or macOS `ps` CSV shape.
///
/// The canonical `pidstat` array is heterogeneous: the two shapes share only
/// `pid` and `cpu_total_pct`, and downstream consumers read them duck-typed.
/// Serialized untagged, so the JSON carries the plain field set of whichever
/// shape was parsed.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
#[serde(untagged)]
pub enum ProcessSample {
    Pidstat(PidstatSample),
    MacPs(MacPsSample),
}

impl ProcessSample {
    /// Total CPU percent, available in both shapes.
    pub fn cpu_total_pct(&self) -> f64 {
        match self {
            ProcessSample::Pidstat(s) => s.cpu_total_pct,
            ProcessSample::MacPs(s) => s.cpu_total_pct,
        }
    }

    /// Process id, available in both shapes.
    pub fn pid(&self) -> u32 {
        match self {
            ProcessSample::Pidstat(s) => s.pid,
            ProcessSample::MacPs(s) => s.pid,
        }
    }
}

impl From<PidstatSample> for ProcessSample {
    fn from(s: PidstatSample) -> Self {
        ProcessSample::Pidstat(s)
    }
}

impl From<MacPsSample> for ProcessSample {
    fn from(s: MacPsSample) -> Self {
        ProcessSample::MacPs(s)
    }
}
