//! swimtally Library
//!
//! Parses a coach's free-text swim session into distance totals per stroke
//! and activity, with a per-line audit of what was read and what was not.

pub mod cli;
pub mod config;
pub mod logging;
pub mod parser;
pub mod report;

pub use config::Config;
pub use parser::{
    parse, parse_bytes, parse_line, Activity, Contribution, ParseError, ParseResult, ParsedLine,
    SessionTotals, Stroke, UnparsedReason,
};
pub use report::{OutputFormat, ReportOptions};
