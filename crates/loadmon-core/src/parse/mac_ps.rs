//! macOS `ps` CSV capture parser.
//!
//! The capture script samples `ps -o %cpu,pid` into a CSV file, with or
//! without a header row. Header naming varies between capture versions, so
//! column lookup falls back through alias chains before assuming the default
//! `timestamp, cpu, pid` order.

use crate::model::MacPsSample;

use super::num::coerce_u32;

/// Default column order when no header row is present.
mod col {
    pub const TIMESTAMP: usize = 0;
    pub const CPU: usize = 1;
    pub const PID: usize = 2;
}

/// Resolved column indices after alias fallback.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Columns {
    timestamp: usize,
    cpu: usize,
    pid: usize,
}

impl Columns {
    fn default_order() -> Self {
        Self {
            timestamp: col::TIMESTAMP,
            cpu: col::CPU,
            pid: col::PID,
        }
    }

    /// Builds the index map from a case-folded header row, trying each alias
    /// in turn and falling back to the default position.
    fn from_header(header: &[String]) -> Self {
        let find = |aliases: &[&str], fallback: usize| {
            aliases
                .iter()
                .find_map(|name| header.iter().position(|cell| cell == name))
                .unwrap_or(fallback)
        };
        Self {
            timestamp: find(&["timestamp_epoch_s", "timestamp"], col::TIMESTAMP),
            cpu: find(&["cpu_pct", "%cpu", "cpu"], col::CPU),
            pid: find(&["pid"], col::PID),
        }
    }

    fn max_index(&self) -> usize {
        self.timestamp.max(self.cpu).max(self.pid)
    }
}

/// Splits a CSV line respecting double-quote escaping.
fn split_csv_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            if c == '"' {
                if chars.peek() == Some(&'"') {
                    // Escaped quote
                    chars.next();
                    current.push('"');
                } else {
                    in_quotes = false;
                }
            } else {
                current.push(c);
            }
        } else if c == '"' {
            in_quotes = true;
        } else if c == ',' {
            fields.push(std::mem::take(&mut current));
        } else {
            current.push(c);
        }
    }
    fields.push(current);

    fields
}

/// Parses a macOS `ps` CSV capture into pidstat-compatible samples.
///
/// The first row is a header when any of its cells mentions `cpu` or
/// `timestamp` (case-folded). Rows shorter than the highest referenced
/// column are discarded; a row whose cpu or timestamp cell fails to parse is
/// dropped whole, while a non-numeric pid coerces to 0. The cpu cell
/// tolerates a comma as decimal separator.
pub fn parse_mac_ps_csv(content: &str) -> Vec<MacPsSample> {
    let rows: Vec<Vec<String>> = content.lines().map(split_csv_line).collect();
    let Some(first) = rows.first() else {
        return Vec::new();
    };

    let header: Vec<String> = first
        .iter()
        .map(|cell| cell.trim().to_lowercase())
        .collect();
    let has_header = header
        .iter()
        .any(|cell| cell.contains("cpu") || cell.contains("timestamp"));
    let columns = if has_header {
        Columns::from_header(&header)
    } else {
        Columns::default_order()
    };
    let start = usize::from(has_header);

    let mut samples = Vec::new();
    for row in &rows[start..] {
        if row.len() <= columns.max_index() {
            continue;
        }
        let ts_raw = row[columns.timestamp].trim();
        let cpu_raw = row[columns.cpu].trim();
        let pid_raw = row[columns.pid].trim();

        let cpu_total_pct = if cpu_raw.is_empty() {
            0.0
        } else {
            match cpu_raw.replace(',', ".").parse::<f64>() {
                Ok(v) => v,
                Err(_) => continue,
            }
        };
        let timestamp_epoch_s = if ts_raw.is_empty() {
            0
        } else {
            match ts_raw.parse::<f64>() {
                Ok(v) => v as i64,
                Err(_) => continue,
            }
        };

        samples.push(MacPsSample {
            pid: coerce_u32(pid_raw),
            cpu_total_pct,
            timestamp_epoch_s,
        });
    }

    samples
}
