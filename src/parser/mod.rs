//! Swim session text parser.
//!
//! Turns a coach's free-text session into per stroke, per activity
//! distance totals with a line-by-line audit trail.
//!
//! # Rule chain
//!
//! Each line goes through, in order:
//!
//! 1. Blank / separator lines are skipped without diagnostics.
//! 2. `repeat` replays the lines just above it ([`repeat`]).
//! 3. ODD/EVEN lane-conditional text and nested multipliers are reported
//!    as unsupported.
//! 4. A distance must be found ([`distance`]), otherwise the line is
//!    unparsed.
//! 5. `as a / b / c` breakdowns ([`breakdown`]).
//! 6. Special patterns ([`patterns`]).
//! 7. The default single contribution, defaulting activity silently and
//!    stroke with a warning ([`vocab::DEFAULT_POLICY`]).
//!
//! No line can abort the parse: every failure becomes `parsed = false`.

pub mod breakdown;
pub mod context;
pub mod detect;
pub mod distance;
pub mod error;
pub mod line;
pub mod patterns;
pub mod repeat;
pub mod types;
pub mod vocab;

pub use error::ParseError;
pub use types::{Contribution, ParseResult, ParsedLine, SessionTotals, UnparsedReason};
pub use vocab::{Activity, Stroke};

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use breakdown::Breakdown;
use context::LineContext;
use line::{LineKind, LineView};
use vocab::{DEFAULT_POLICY, STROKE_DEFAULT_WARNING};

static LANE_CONDITIONAL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(?:odds?|evens?)\s*(?:lanes?\b|:|/|-|=)")
        .expect("lane-conditional regex is valid")
});

/// Parse a whole session.
///
/// Pure and deterministic: the same text always gives an equal result.
pub fn parse(text: &str) -> ParseResult {
    let mut result = ParseResult::default();
    for (index, raw) in text.lines().enumerate() {
        let line = parse_line(index + 1, raw, &result.lines);
        debug!(
            line = line.line_number,
            parsed = line.parsed,
            distance = line.distance(),
            reason = ?line.unparsed_reason,
            "parsed line"
        );
        result.push(line);
    }
    debug!(
        total = result.total_distance(),
        parsed = result.parsed_count,
        warnings = result.warning_count,
        unparsed = result.unparsed_count,
        "parsed session"
    );
    result
}

/// Parse raw bytes, rejecting anything that is not UTF-8 text.
pub fn parse_bytes(bytes: &[u8]) -> Result<ParseResult, ParseError> {
    let text = std::str::from_utf8(bytes)?;
    Ok(parse(text))
}

/// Analyze one line given the lines already parsed above it.
pub fn parse_line(line_number: usize, raw: &str, previous: &[ParsedLine]) -> ParsedLine {
    match line::classify(raw) {
        LineKind::Blank => return ParsedLine::unparsed(line_number, raw, UnparsedReason::Blank),
        LineKind::Separator => {
            return ParsedLine::unparsed(line_number, raw, UnparsedReason::Separator)
        }
        LineKind::Content => {}
    }

    let view = LineView::new(raw);

    if repeat::is_repeat(&view.normalized) {
        return match repeat::resolve_repeat(previous) {
            Some((contributions, count)) => {
                debug!(line = line_number, count, "repeat");
                ParsedLine::parsed(
                    line_number,
                    raw,
                    contributions,
                    Some(format!("Repeated previous {} line(s)", count)),
                )
            }
            None => ParsedLine::unparsed(line_number, raw, UnparsedReason::NoRepeatSource),
        };
    }

    if LANE_CONDITIONAL_RE.is_match(&view.normalized) {
        return ParsedLine::unparsed(line_number, raw, UnparsedReason::LaneConditional);
    }

    if distance::count_multipliers(&view.measurable) > 1 {
        return ParsedLine::unparsed(line_number, raw, UnparsedReason::NestedMultiplier);
    }

    let Some(found) = distance::extract_distance(&view.measurable) else {
        return ParsedLine::unparsed(line_number, raw, UnparsedReason::NoDistance);
    };

    let ctx = LineContext::new(&view, &found);

    let breakdown_found = match breakdown::parse_breakdown(&ctx) {
        Breakdown::Parts {
            contributions,
            warnings,
        } => {
            debug!(line = line_number, rule = "breakdown", "matched");
            return ParsedLine::parsed(line_number, raw, contributions, join_warnings(warnings));
        }
        Breakdown::NoDistances => true,
        Breakdown::NotApplicable => false,
    };

    if let Some((rule, contributions)) = patterns::apply(&ctx) {
        debug!(line = line_number, rule, "matched");
        return ParsedLine::parsed(line_number, raw, contributions, None);
    }

    if breakdown_found {
        return ParsedLine::unparsed(
            line_number,
            raw,
            UnparsedReason::BreakdownWithoutDistances,
        );
    }

    default_contribution(line_number, raw, &ctx)
}

fn default_contribution(line_number: usize, raw: &str, ctx: &LineContext<'_>) -> ParsedLine {
    let (stroke, warning) = match ctx.stroke {
        Some(stroke) => (stroke, None),
        None => (
            DEFAULT_POLICY.stroke.value,
            DEFAULT_POLICY
                .stroke
                .warn
                .then(|| STROKE_DEFAULT_WARNING.to_string()),
        ),
    };
    let activity = ctx.activity_or_default();
    ParsedLine::parsed(
        line_number,
        raw,
        vec![Contribution::new(stroke, activity, ctx.total())],
        warning,
    )
}

fn join_warnings(warnings: Vec<String>) -> Option<String> {
    if warnings.is_empty() {
        None
    } else {
        Some(warnings.join("; "))
    }
}
