//! Distance extraction.
//!
//! Operates on the measurable view of a line (see [`super::line`]), so
//! rest intervals and lane numbers are already gone.

use once_cell::sync::Lazy;
use regex::Regex;
use std::ops::Range;

/// A distance read from a line.
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceMatch {
    /// Repetition count, 1 for a bare distance.
    pub reps: u32,
    /// Written distance of one repetition, in metres.
    pub per_rep: f64,
    /// Whether the line spelled out a `reps x distance` multiplier.
    pub explicit_reps: bool,
    /// Byte range of the match in the measurable text.
    pub span: Range<usize>,
}

impl DistanceMatch {
    /// `reps * per_rep`.
    pub fn total(&self) -> f64 {
        f64::from(self.reps) * self.per_rep
    }
}

static REPS_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(\d+)\s*[x*]\s*(\d+)(?:\s*(?:metres|meters|mtrs|m)\b|s\b)?")
        .expect("reps regex is valid")
});

static UNIT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(\d+)\s*(?:metres|meters|mtrs|m)\b").expect("unit regex is valid")
});

static NUMBER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(\d+)s?\b").expect("number regex is valid"));

static MULTIPLIER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b\d+\s*[x*](?:[^a-z]|$)").expect("multiplier regex is valid"));

/// Smallest pool length; unit-less numbers only count as distances when
/// they are a whole number of these.
const LENGTH_QUANTUM: u32 = 25;

/// Read `reps x distance`, else a bare distance, else `None`.
pub fn extract_distance(text: &str) -> Option<DistanceMatch> {
    if let Some(caps) = REPS_RE.captures(text) {
        let whole = caps.get(0)?;
        let reps = caps.get(1)?.as_str().parse::<u32>().ok()?;
        let per_rep = caps.get(2)?.as_str().parse::<u32>().ok()?;
        return Some(DistanceMatch {
            reps,
            per_rep: f64::from(per_rep),
            explicit_reps: true,
            span: whole.range(),
        });
    }

    let (per_rep, span) = bare_distance(text)?;
    Some(DistanceMatch {
        reps: 1,
        per_rep,
        explicit_reps: false,
        span,
    })
}

/// A single distance with no multiplier: a number with a metre unit, or
/// failing that a unit-less whole number of lengths (25, 50, 100, ...).
pub fn bare_distance(text: &str) -> Option<(f64, Range<usize>)> {
    if let Some(caps) = UNIT_RE.captures(text) {
        let value = caps.get(1)?.as_str().parse::<u32>().ok()?;
        return Some((f64::from(value), caps.get(0)?.range()));
    }

    NUMBER_RE.captures_iter(text).find_map(|caps| {
        let whole = caps.get(0)?;
        let value = caps.get(1)?.as_str().parse::<u32>().ok()?;
        (value >= LENGTH_QUANTUM && value % LENGTH_QUANTUM == 0)
            .then(|| (f64::from(value), whole.range()))
    })
}

/// Where each distance written in `text` starts, in order. Counts the
/// same numbers [`bare_distance`] would accept.
pub fn distance_starts(text: &str) -> Vec<usize> {
    let mut starts: Vec<usize> = UNIT_RE.find_iter(text).map(|m| m.start()).collect();
    starts.extend(NUMBER_RE.captures_iter(text).filter_map(|caps| {
        let whole = caps.get(0)?;
        let value = caps.get(1)?.as_str().parse::<u32>().ok()?;
        (value >= LENGTH_QUANTUM && value % LENGTH_QUANTUM == 0).then_some(whole.start())
    }));
    starts.sort_unstable();
    starts.dedup();
    starts
}

/// Number of `N x` multipliers on the line.
pub fn count_multipliers(text: &str) -> usize {
    MULTIPLIER_RE.find_iter(text).count()
}

/// `text` with `span` blanked out, for rules that read around the
/// distance without tripping over its numbers.
pub fn without_span(text: &str, span: &Range<usize>) -> String {
    let mut out = String::with_capacity(text.len());
    out.push_str(&text[..span.start]);
    out.push(' ');
    out.push_str(&text[span.end..]);
    out
}
