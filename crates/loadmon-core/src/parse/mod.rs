//! Format-specific parsers for monitoring tool output.
//!
//! All parsers are pure functions over file content, designed to be easily
//! testable with string inputs. Each validates structure independently of
//! the sniffer and yields zero samples rather than an error on a format
//! mismatch; malformed lines are skipped, never fatal.

pub mod mac_iostat;
pub mod mac_ps;
pub mod mac_top;
pub mod num;
pub mod pidstat;
pub mod vmstat;

pub use mac_iostat::parse_mac_iostat;
pub use mac_ps::parse_mac_ps_csv;
pub use mac_top::parse_mac_top;
pub use pidstat::parse_pidstat;
pub use vmstat::parse_vmstat;
