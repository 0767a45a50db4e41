//! Heuristic format classification for monitoring log files.
//!
//! Dispatch is an ordered table of `(predicate, format)` pairs evaluated in
//! priority order; the first match wins. Sniffing is advisory, not
//! load-bearing for correctness: every parser re-validates structure and
//! yields zero samples on a mismatch, so a misclassification degrades to an
//! empty result rather than corrupt data.

/// Formats distinguished by the sniffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    /// Pre-parsed JSON envelope with `vmstat`/`pidstat` arrays.
    JsonPassthrough,
    /// Linux `vmstat` periodic text output.
    LinuxVmstat,
    /// macOS `top -l` block output.
    MacosTop,
    /// macOS `iostat` output.
    MacosIostat,
    /// macOS `ps` CSV capture substituted for native pidstat.
    MacosPsCsv,
    /// Linux `pidstat` text output.
    PidstatText,
}

/// Number of leading lines inspected.
pub const PROBE_LINES: usize = 5;

/// Leading-content probe: the first byte plus up to five trimmed lines.
#[derive(Debug)]
pub struct Probe<'a> {
    first_byte: Option<u8>,
    lines: Vec<&'a str>,
}

impl<'a> Probe<'a> {
    pub fn of(content: &'a str) -> Self {
        Self {
            first_byte: content.as_bytes().first().copied(),
            lines: content.lines().take(PROBE_LINES).map(str::trim).collect(),
        }
    }
}

type Predicate = fn(&Probe) -> bool;

fn is_json_envelope(probe: &Probe) -> bool {
    probe.first_byte == Some(b'{')
}

fn is_macos_top(probe: &Probe) -> bool {
    probe
        .lines
        .iter()
        .any(|line| line.contains("CPU usage:") || line.contains("PhysMem:"))
}

fn is_macos_iostat(probe: &Probe) -> bool {
    probe.lines.iter().any(|line| {
        let lower = line.to_lowercase();
        (lower.contains("cpu") && lower.contains("load average"))
            || (line.contains("KB/t") && (line.contains("us") || line.contains("sy")))
    })
}

/// A comma-bearing first line without the pidstat `PID`/`Average` tokens
/// marks a ps CSV capture substituted for native pidstat.
fn is_macos_ps_csv(probe: &Probe) -> bool {
    probe
        .lines
        .first()
        .is_some_and(|line| line.contains(',') && !line.contains("PID") && !line.contains("Average"))
}

/// Rules for the system (vmstat) input slot, in priority order.
const SYSTEM_RULES: &[(Predicate, SourceFormat)] = &[
    (is_json_envelope, SourceFormat::JsonPassthrough),
    (is_macos_top, SourceFormat::MacosTop),
    (is_macos_iostat, SourceFormat::MacosIostat),
];

/// Rules for the process (pidstat) input slot, in priority order.
const PROCESS_RULES: &[(Predicate, SourceFormat)] = &[
    (is_json_envelope, SourceFormat::JsonPassthrough),
    (is_macos_ps_csv, SourceFormat::MacosPsCsv),
];

fn first_match(
    rules: &[(Predicate, SourceFormat)],
    probe: &Probe,
    fallback: SourceFormat,
) -> SourceFormat {
    rules
        .iter()
        .find(|(predicate, _)| predicate(probe))
        .map(|&(_, format)| format)
        .unwrap_or(fallback)
}

/// Classifies content destined for the system (vmstat) slot.
///
/// Defaults to `LinuxVmstat`; that parser performs its own header search and
/// safely yields zero samples if the assumption is wrong.
pub fn sniff_system(content: &str) -> SourceFormat {
    first_match(SYSTEM_RULES, &Probe::of(content), SourceFormat::LinuxVmstat)
}

/// Classifies content destined for the process (pidstat) slot.
pub fn sniff_process(content: &str) -> SourceFormat {
    first_match(PROCESS_RULES, &Probe::of(content), SourceFormat::PidstatText)
}
