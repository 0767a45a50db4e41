//! macOS `iostat` parser.
//!
//! Output layout:
//!
//! ```text
//!           disk0       cpu    load average
//! KB/t  tps  MB/s  us sy id   1m   5m   15m
//! 4.49 4596 20.15  14 11 74  4.34 3.85 3.82
//! ```
//!
//! The section header and the column header must both be seen, in that
//! order, before data rows are read.

use crate::model::VmstatSample;

/// CPU column offsets in data rows, following `KB/t tps MB/s`.
mod col {
    pub const CPU_US: usize = 3;
    pub const CPU_SY: usize = 4;
    pub const CPU_ID: usize = 5;
}

/// Minimum token count for a data row.
const MIN_COLUMNS: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq)]
enum State {
    SeekingSectionHeader,
    SeekingColumnHeader,
    ReadingData,
}

fn is_section_header(line: &str) -> bool {
    let lower = line.to_lowercase();
    lower.contains("cpu") && lower.contains("load average")
}

fn is_column_header(line: &str) -> bool {
    (line.contains("KB/t") || line.contains("tps")) && (line.contains("us") || line.contains("sy"))
}

/// Parses macOS `iostat` output into vmstat-compatible samples.
///
/// iostat repeats its headers periodically on long runs; repeated header
/// lines inside the data section are skipped. iostat reports no memory or
/// wait/steal figures, so those fields stay zero.
pub fn parse_mac_iostat(content: &str) -> Vec<VmstatSample> {
    let mut samples = Vec::new();
    let mut state = State::SeekingSectionHeader;

    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match state {
            State::SeekingSectionHeader => {
                if is_section_header(line) {
                    state = State::SeekingColumnHeader;
                }
            }
            State::SeekingColumnHeader => {
                if is_column_header(line) {
                    state = State::ReadingData;
                }
            }
            State::ReadingData => {
                if is_section_header(line) || is_column_header(line) {
                    continue;
                }
                let parts: Vec<&str> = line.split_whitespace().collect();
                if parts.len() < MIN_COLUMNS {
                    continue;
                }
                // A row whose CPU columns fail to parse is dropped whole.
                let (Ok(us), Ok(sy), Ok(id)) = (
                    parts[col::CPU_US].parse::<f64>(),
                    parts[col::CPU_SY].parse::<f64>(),
                    parts[col::CPU_ID].parse::<f64>(),
                ) else {
                    continue;
                };
                samples.push(VmstatSample {
                    cpu_us_pct: us,
                    cpu_sy_pct: sy,
                    cpu_id_pct: id,
                    ..VmstatSample::default()
                });
            }
        }
    }

    samples
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXTURE: &str = "\
          disk0       cpu    load average
KB/t  tps  MB/s  us sy id   1m   5m   15m
4.49 4596 20.15  14 11 74  4.34 3.85 3.82
5.12 3200 16.40  20 15 65  4.50 3.90 3.85
";

    #[test]
    fn test_basic_parse() {
        let samples = parse_mac_iostat(FIXTURE);
        assert_eq!(samples.len(), 2);
        assert_eq!(samples[0].cpu_us_pct, 14.0);
        assert_eq!(samples[0].cpu_sy_pct, 11.0);
        assert_eq!(samples[0].cpu_id_pct, 74.0);
        assert_eq!(samples[1].cpu_us_pct, 20.0);
        // iostat has no memory or wait/steal figures.
        assert_eq!(samples[0].memory_free_kb, 0);
        assert_eq!(samples[0].cpu_wa_pct, 0.0);
        assert_eq!(samples[0].cpu_st_pct, 0.0);
    }

    #[test]
    fn test_data_requires_both_headers_in_order() {
        // Column header without the section header first: nothing is read.
        let content = "\
KB/t  tps  MB/s  us sy id   1m   5m   15m
4.49 4596 20.15  14 11 74  4.34 3.85 3.82
";
        assert!(parse_mac_iostat(content).is_empty());
    }

    #[test]
    fn test_repeated_headers_skipped() {
        let content = format!(
            "{FIXTURE}          disk0       cpu    load average\n\
             KB/t  tps  MB/s  us sy id   1m   5m   15m\n\
             6.00 1000 10.00  30 20 50  5.00 4.00 3.90\n"
        );
        let samples = parse_mac_iostat(&content);
        assert_eq!(samples.len(), 3);
        assert_eq!(samples[2].cpu_us_pct, 30.0);
    }

    #[test]
    fn test_short_row_discarded() {
        let content = "\
          disk0       cpu    load average
KB/t  tps  MB/s  us sy id   1m   5m   15m
4.49 4596 20.15  14
";
        assert!(parse_mac_iostat(content).is_empty());
    }

    #[test]
    fn test_unparsable_cpu_row_dropped_whole() {
        let content = "\
          disk0       cpu    load average
KB/t  tps  MB/s  us sy id   1m   5m   15m
4.49 4596 20.15  xx 11 74  4.34 3.85 3.82
";
        assert!(parse_mac_iostat(content).is_empty());
    }

    #[test]
    fn test_empty_input() {
        assert!(parse_mac_iostat("").is_empty());
    }
}
