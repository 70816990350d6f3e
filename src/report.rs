//! Rendering parse results for people and programs.
//!
//! Rounding and the pool-length sanity check live here rather than in the
//! parser: the parser keeps exact distances, the report decides how to
//! show them.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::config::ReportConfig;
use crate::parser::{Activity, ParseResult, ParsedLine, Stroke};

/// Output format for `swimtally parse`.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Knobs for rendering one result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportOptions {
    pub decimals: usize,
    pub pool_length: u32,
    pub show_lines: bool,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self::from(&ReportConfig::default())
    }
}

impl From<&ReportConfig> for ReportOptions {
    fn from(config: &ReportConfig) -> Self {
        Self {
            decimals: config.decimals,
            pool_length: config.pool_length,
            show_lines: config.show_lines,
        }
    }
}

const LABEL_WIDTH: usize = 18;
const COLUMN_WIDTH: usize = 9;
const AUDIT_TEXT_WIDTH: usize = 36;

/// Format metres with thousands separators, e.g. `1,375`.
pub fn format_distance(distance: f64, decimals: usize) -> String {
    let fixed = format!("{:.*}", decimals, distance);
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (fixed.as_str(), None),
    };
    let (sign, digits) = match int_part.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", int_part),
    };

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    match frac_part {
        Some(frac) => format!("{sign}{grouped}.{frac}"),
        None => format!("{sign}{grouped}"),
    }
}

/// Truncate to a display width, adding an ellipsis if needed.
pub fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    if max_width <= 3 {
        return take_width(s, max_width);
    }
    format!("{}...", take_width(s, max_width - 3))
}

fn take_width(s: &str, max_width: usize) -> String {
    let mut out = String::new();
    let mut width = 0;
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if width + w > max_width {
            break;
        }
        width += w;
        out.push(c);
    }
    out
}

fn pad_to_width(s: &str, width: usize) -> String {
    let padding = width.saturating_sub(s.width());
    format!("{}{}", s, " ".repeat(padding))
}

/// The informative pool check, `None` when the total looks right.
pub fn pool_note(result: &ParseResult, options: &ReportOptions) -> Option<String> {
    if result.is_multiple_of(options.pool_length) {
        return None;
    }
    Some(format!(
        "Note: total {}m is not a multiple of the {}m pool",
        format_distance(result.total_distance(), options.decimals),
        options.pool_length
    ))
}

fn line_detail(line: &ParsedLine, decimals: usize) -> String {
    if let Some(reason) = line.unparsed_reason {
        return reason.to_string();
    }
    let mut detail = line
        .contributions
        .iter()
        .map(|c| {
            format!(
                "{} {} {}m",
                c.stroke.abbreviation(),
                c.activity,
                format_distance(c.distance, decimals)
            )
        })
        .collect::<Vec<_>>()
        .join(", ");
    if let Some(warning) = &line.warning {
        let _ = write!(detail, " ({})", warning);
    }
    detail
}

fn status_glyph(line: &ParsedLine) -> char {
    if line.parsed && line.warning.is_some() {
        '!'
    } else if line.parsed {
        '+'
    } else {
        '-'
    }
}

/// Human-readable report.
pub fn render_text(result: &ParseResult, options: &ReportOptions) -> String {
    let mut out = String::new();
    let d = options.decimals;

    let strokes: Vec<Stroke> = Stroke::ALL
        .into_iter()
        .filter(|s| result.totals.stroke_total(*s) != 0.0)
        .collect();

    if strokes.is_empty() {
        out.push_str("No distance found.\n");
    } else {
        let _ = write!(out, "{:<LABEL_WIDTH$}", "Stroke");
        for activity in Activity::ALL {
            let _ = write!(out, "{:>COLUMN_WIDTH$}", activity.to_string());
        }
        let _ = writeln!(out, "{:>COLUMN_WIDTH$}", "Total");

        for stroke in &strokes {
            let _ = write!(out, "{:<LABEL_WIDTH$}", stroke.to_string());
            for activity in Activity::ALL {
                let value = format_distance(result.totals.get(*stroke, activity), d);
                let _ = write!(out, "{:>COLUMN_WIDTH$}", value);
            }
            let total = format_distance(result.totals.stroke_total(*stroke), d);
            let _ = writeln!(out, "{:>COLUMN_WIDTH$}", total);
        }

        let _ = writeln!(out, "{}", "-".repeat(LABEL_WIDTH + COLUMN_WIDTH * 5));
        let _ = write!(out, "{:<LABEL_WIDTH$}", "Total");
        for activity in Activity::ALL {
            let value = format_distance(result.totals.activity_total(activity), d);
            let _ = write!(out, "{:>COLUMN_WIDTH$}", value);
        }
        let total = format_distance(result.total_distance(), d);
        let _ = writeln!(out, "{:>COLUMN_WIDTH$}", total);
    }

    let _ = writeln!(
        out,
        "\nLines: {} parsed, {} with warnings, {} unparsed",
        result.parsed_count, result.warning_count, result.unparsed_count
    );

    if let Some(note) = pool_note(result, options) {
        let _ = writeln!(out, "{}", note);
    }

    for line in result.warnings() {
        if let Some(warning) = &line.warning {
            let _ = writeln!(out, "Warning (line {}): {}", line.line_number, warning);
        }
    }

    if options.show_lines {
        out.push_str("\nLine audit:\n");
        for line in result.lines.iter().filter(|l| !l.is_layout()) {
            let text = pad_to_width(
                &truncate_to_width(line.text.trim(), AUDIT_TEXT_WIDTH),
                AUDIT_TEXT_WIDTH,
            );
            let row = format!(
                "{} {:>4}  {}  {}",
                status_glyph(line),
                line.line_number,
                text,
                line_detail(line, d)
            );
            let _ = writeln!(out, "{}", row.trim_end());
        }
    }

    out
}

#[derive(Serialize)]
struct JsonReport<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    source: Option<&'a str>,
    total_distance: f64,
    pool_length: u32,
    multiple_of_pool: bool,
    #[serde(flatten)]
    result: &'a ParseResult,
}

fn json_report<'a>(
    result: &'a ParseResult,
    options: &ReportOptions,
    source: Option<&'a str>,
) -> JsonReport<'a> {
    JsonReport {
        source,
        total_distance: result.total_distance(),
        pool_length: options.pool_length,
        multiple_of_pool: result.is_multiple_of(options.pool_length),
        result,
    }
}

/// Machine-readable report: the full parse result plus the pool check.
pub fn render_json(
    result: &ParseResult,
    options: &ReportOptions,
    source: Option<&str>,
) -> Result<String> {
    serde_json::to_string_pretty(&json_report(result, options, source))
        .context("Failed to serialize report")
}

/// Several sessions as one JSON array, in the order given.
pub fn render_json_batch(
    sessions: &[(String, ParseResult)],
    options: &ReportOptions,
) -> Result<String> {
    let reports: Vec<JsonReport<'_>> = sessions
        .iter()
        .map(|(source, result)| json_report(result, options, Some(source.as_str())))
        .collect();
    serde_json::to_string_pretty(&reports).context("Failed to serialize report")
}
