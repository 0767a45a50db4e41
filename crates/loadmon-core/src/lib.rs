//! loadmon-core — parsing core for load-test monitoring logs.
//!
//! Normalizes the periodic text output of five OS monitoring tools into one
//! canonical sample schema plus summary statistics:
//! - Linux `vmstat` and `pidstat`
//! - macOS `top`, `iostat`, and `ps` CSV captures
//!
//! Provides:
//! - `sniff` — heuristic format classification
//! - `parse` — the five format-specific parsers and numeric coercion
//! - `model` — canonical sample types
//! - `summary` — count/mean/min/max aggregates over parsed sequences
//! - `ingest` — file-level loading and the canonical JSON envelope

pub mod ingest;
pub mod model;
pub mod parse;
pub mod sniff;
pub mod summary;
