//! Linux `vmstat` periodic output parser.
//!
//! `vmstat <interval>` prints a two-line header followed by one data row per
//! interval, repeating the header periodically on long runs.

use crate::model::VmstatSample;

use super::num::{coerce_pct, coerce_u64};

/// Positional schema of the canonical `vmstat` layout:
/// `r b swpd free buff cache si so bi bo in cs us sy id wa st [gu]`.
mod col {
    pub const PROCS_R: usize = 0;
    pub const PROCS_B: usize = 1;
    pub const SWPD: usize = 2;
    pub const FREE: usize = 3;
    pub const BUFF: usize = 4;
    pub const CACHE: usize = 5;
    pub const SWAP_SI: usize = 6;
    pub const SWAP_SO: usize = 7;
    pub const IO_BI: usize = 8;
    pub const IO_BO: usize = 9;
    pub const SYSTEM_IN: usize = 10;
    pub const SYSTEM_CS: usize = 11;
    pub const CPU_US: usize = 12;
    pub const CPU_SY: usize = 13;
    pub const CPU_ID: usize = 14;
    pub const CPU_WA: usize = 15;
    pub const CPU_ST: usize = 16;
    pub const CPU_GU: usize = 17;
}

/// Minimum token count for a complete data row.
const MIN_COLUMNS: usize = 17;

#[derive(Debug, Clone, Copy, PartialEq)]
enum State {
    SeekingHeader,
    ReadingData,
}

/// Header rows start with `procs` (banner line) or with `r` as the first
/// token (column line).
fn is_header(line: &str) -> bool {
    line.starts_with("procs") || line.split_whitespace().next() == Some("r")
}

/// Parses Linux `vmstat` output.
///
/// Stays in `SeekingHeader` until a header row appears, then reads data
/// rows; repeated headers are skipped and the state never reverts. Rows with
/// fewer than 17 tokens are incomplete and discarded, not an error.
pub fn parse_vmstat(content: &str) -> Vec<VmstatSample> {
    let mut samples = Vec::new();
    let mut state = State::SeekingHeader;

    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if is_header(line) {
            state = State::ReadingData;
            continue;
        }
        if state == State::SeekingHeader {
            continue;
        }

        let parts: Vec<&str> = line.split_whitespace().collect();
        if parts.len() < MIN_COLUMNS {
            continue;
        }

        samples.push(VmstatSample {
            procs_r: coerce_u64(parts[col::PROCS_R]),
            procs_b: coerce_u64(parts[col::PROCS_B]),
            memory_swpd_kb: coerce_u64(parts[col::SWPD]),
            memory_free_kb: coerce_u64(parts[col::FREE]),
            memory_buff_kb: coerce_u64(parts[col::BUFF]),
            memory_cache_kb: coerce_u64(parts[col::CACHE]),
            swap_si_kb: coerce_u64(parts[col::SWAP_SI]),
            swap_so_kb: coerce_u64(parts[col::SWAP_SO]),
            io_bi_kb: coerce_u64(parts[col::IO_BI]),
            io_bo_kb: coerce_u64(parts[col::IO_BO]),
            system_in: coerce_u64(parts[col::SYSTEM_IN]),
            system_cs: coerce_u64(parts[col::SYSTEM_CS]),
            cpu_us_pct: coerce_pct(parts[col::CPU_US]),
            cpu_sy_pct: coerce_pct(parts[col::CPU_SY]),
            cpu_id_pct: coerce_pct(parts[col::CPU_ID]),
            cpu_wa_pct: coerce_pct(parts[col::CPU_WA]),
            cpu_st_pct: coerce_pct(parts[col::CPU_ST]),
            cpu_gu_pct: parts.get(col::CPU_GU).map(|tok| coerce_pct(tok)),
        });
    }

    samples
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "\
procs -----------memory---------- ---swap-- -----io---- -system-- -------cpu-------
 r  b   swpd   free   buff  cache   si   so    bi    bo   in   cs  us  sy  id  wa st
";

    #[test]
    fn test_field_order() {
        let content = format!(
            "{HEADER}2 0 0 102400 20480 512000 0 0 5 10 100 200 15.0 5.0 78.0 2.0 0.0\n"
        );
        let samples = parse_vmstat(&content);
        assert_eq!(samples.len(), 1);

        let s = &samples[0];
        assert_eq!(s.procs_r, 2);
        assert_eq!(s.procs_b, 0);
        assert_eq!(s.memory_free_kb, 102400);
        assert_eq!(s.memory_buff_kb, 20480);
        assert_eq!(s.memory_cache_kb, 512000);
        assert_eq!(s.io_bi_kb, 5);
        assert_eq!(s.io_bo_kb, 10);
        assert_eq!(s.system_in, 100);
        assert_eq!(s.system_cs, 200);
        assert_eq!(s.cpu_us_pct, 15.0);
        assert_eq!(s.cpu_sy_pct, 5.0);
        assert_eq!(s.cpu_id_pct, 78.0);
        assert_eq!(s.cpu_wa_pct, 2.0);
        assert_eq!(s.cpu_st_pct, 0.0);
        assert_eq!(s.cpu_gu_pct, None);
    }

    #[test]
    fn test_guest_column() {
        let content = format!("{HEADER}2 0 0 102400 20480 512000 0 0 5 10 100 200 15 5 78 2 0 1\n");
        let samples = parse_vmstat(&content);
        assert_eq!(samples[0].cpu_gu_pct, Some(1.0));
    }

    #[test]
    fn test_short_row_discarded() {
        // 16 tokens: incomplete row yields no sample.
        let content = format!("{HEADER}2 0 0 102400 20480 512000 0 0 5 10 100 200 15 5 78 2\n");
        assert!(parse_vmstat(&content).is_empty());
    }

    #[test]
    fn test_data_before_header_ignored() {
        let content = "2 0 0 102400 20480 512000 0 0 5 10 100 200 15 5 78 2 0\n";
        assert!(parse_vmstat(content).is_empty());
    }

    #[test]
    fn test_repeated_headers_skipped() {
        let content = format!(
            "{HEADER}1 0 0 1000 1 1 0 0 0 0 10 20 10 5 85 0 0\n\
             {HEADER}2 0 0 2000 1 1 0 0 0 0 10 20 20 5 75 0 0\n"
        );
        let samples = parse_vmstat(&content);
        assert_eq!(samples.len(), 2);
        assert_eq!(samples[0].memory_free_kb, 1000);
        assert_eq!(samples[1].memory_free_kb, 2000);
    }

    #[test]
    fn test_malformed_tokens_coerced_to_zero() {
        let content = format!("{HEADER}x 0 0 102400 20480 512000 0 0 5 10 100 200 ?? 5 78 2 0\n");
        let samples = parse_vmstat(&content);
        assert_eq!(samples.len(), 1);
        assert_eq!(samples[0].procs_r, 0);
        assert_eq!(samples[0].cpu_us_pct, 0.0);
        assert_eq!(samples[0].cpu_sy_pct, 5.0);
    }

    #[test]
    fn test_numeric_looking_garbage_keeps_row() {
        // A double-dot token fails float parsing but the row still emits a
        // sample with that field zeroed, same as plainly non-numeric tokens.
        let content = format!("{HEADER}2 0 0 102400 20480 512000 0 0 5 10 100 200 12..5 5 78 2 0\n");
        let samples = parse_vmstat(&content);
        assert_eq!(samples.len(), 1);
        assert_eq!(samples[0].cpu_us_pct, 0.0);
        assert_eq!(samples[0].cpu_sy_pct, 5.0);
    }

    #[test]
    fn test_empty_input() {
        assert!(parse_vmstat("").is_empty());
    }

    #[test]
    fn test_idempotent() {
        let content = format!("{HEADER}2 0 0 102400 20480 512000 0 0 5 10 100 200 15 5 78 2 0\n");
        assert_eq!(parse_vmstat(&content), parse_vmstat(&content));
    }
}
