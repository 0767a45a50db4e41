//! macOS `top -l` block parser.
//!
//! `top` emits one block per reporting interval, blocks separated by blank
//! lines. The CPU and memory figures sit on separate labelled lines, so this
//! parser accumulates one block at a time and flushes it on the block
//! boundary (blank line or end of file).
//!
//! Percentage extraction scans for the `% <label>` markers directly instead
//! of pulling in a regex dependency; the label set is fixed and distinctive.

use crate::model::VmstatSample;

/// In-progress block accumulator. Empty until a labelled line is seen.
#[derive(Debug, Default, Clone, PartialEq)]
struct Block {
    /// User/sys/idle percentages from the `CPU usage:` line.
    cpu: Option<(f64, f64, f64)>,
    /// Free memory from the `PhysMem:` line, already converted to kB.
    memory_free_kb: Option<u64>,
}

impl Block {
    /// Emits the block as a sample if CPU figures were seen, then resets.
    ///
    /// A block holding only memory data is retained across the boundary and
    /// merges into the next block, matching the capture tool's behavior for
    /// stray `PhysMem:` lines.
    fn flush(&mut self, out: &mut Vec<VmstatSample>) {
        let Some((us, sy, id)) = self.cpu else {
            return;
        };
        out.push(VmstatSample {
            cpu_us_pct: us,
            cpu_sy_pct: sy,
            cpu_id_pct: id,
            // top exposes neither wait nor steal, and free memory is its
            // only memory figure; everything else stays zero.
            memory_free_kb: self.memory_free_kb.unwrap_or(0),
            ..VmstatSample::default()
        });
        *self = Block::default();
    }
}

/// Trailing run of ASCII digits (and optionally a decimal point) in `head`.
fn trailing_number(head: &str, allow_dot: bool) -> &str {
    let mut start = head.len();
    for (i, c) in head.char_indices().rev() {
        if c.is_ascii_digit() || (allow_dot && c == '.') {
            start = i;
        } else {
            break;
        }
    }
    &head[start..]
}

/// Extracts the percentage preceding `% <label>`, e.g. `12.34` for label
/// `user` in `"CPU usage: 12.34% user, 5.67% sys, 82.00% idle"`.
fn pct_before_label(line: &str, label: &str) -> Option<f64> {
    let head = line[..line.find(label)?].trim_end();
    let head = head.strip_suffix('%')?;
    trailing_number(head, true).parse().ok()
}

/// Extracts megabytes from the `<N>M free` figure of a `PhysMem:` line.
fn megabytes_before_free(line: &str) -> Option<u64> {
    let head = line[..line.find("free")?].trim_end();
    let head = head.strip_suffix('M')?;
    trailing_number(head, false).parse().ok()
}

/// Parses macOS `top` output into vmstat-compatible samples.
///
/// A file not terminated by a trailing blank line still yields its final
/// in-progress block.
pub fn parse_mac_top(content: &str) -> Vec<VmstatSample> {
    let mut samples = Vec::new();
    let mut block = Block::default();

    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() {
            block.flush(&mut samples);
        } else if line.contains("CPU usage:") {
            // All three figures must parse; a garbled line sets nothing.
            if let (Some(us), Some(sy), Some(id)) = (
                pct_before_label(line, "user"),
                pct_before_label(line, "sys"),
                pct_before_label(line, "idle"),
            ) {
                block.cpu = Some((us, sy, id));
            }
        } else if line.contains("PhysMem:")
            && let Some(free_mb) = megabytes_before_free(line)
        {
            block.memory_free_kb = Some(free_mb * 1024);
        }
    }

    block.flush(&mut samples);
    samples
}
