//! The `as <part> / <part> / ...` breakdown construct.
//!
//! "4 x 100m FC as 25m Kick / 25m Drill / 25m Pull / 25m Swim" splits each
//! 100 into four explicitly-distanced parts; every part is then multiplied
//! by the line's repetition count.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::trace;

use super::context::LineContext;
use super::detect::{detect_activity, detect_stroke};
use super::distance::{bare_distance, distance_starts};
use super::types::Contribution;
use super::vocab::{DEFAULT_POLICY, STROKE_DEFAULT_WARNING};

static AS_CLAUSE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\bas\b\s*(.*)$").expect("as-clause regex is valid"));

/// What the breakdown parser made of a line.
#[derive(Debug, Clone, PartialEq)]
pub enum Breakdown {
    /// No breakdown clause on the line.
    NotApplicable,
    /// A breakdown clause whose parts carry no distances. Pattern handlers
    /// may still claim the line; otherwise it is unparsed.
    NoDistances,
    /// One contribution per distanced part.
    Parts {
        contributions: Vec<Contribution>,
        warnings: Vec<String>,
    },
}

/// Split an `as` clause into parts. Prose like "as fast as possible" has
/// neither digits nor slashes and is not a breakdown.
fn split_clause(measurable: &str) -> Option<(&str, Vec<&str>)> {
    let caps = AS_CLAUSE_RE.captures(measurable)?;
    let whole = caps.get(0)?;
    let clause = caps.get(1)?.as_str();
    if !clause.chars().any(|c| c.is_ascii_digit() || c == '/') {
        return None;
    }
    let head = &measurable[..whole.start()];
    let parts = clause
        .split(['/', ','])
        .flat_map(split_at_distances)
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect();
    Some((head, parts))
}

/// "25 fly 25 free" is two parts even without a slash. Text before the
/// first distance stays with it.
fn split_at_distances(part: &str) -> Vec<&str> {
    let starts = distance_starts(part);
    if starts.len() < 2 {
        return vec![part];
    }
    let mut cuts = starts;
    cuts[0] = 0;
    cuts.iter()
        .enumerate()
        .map(|(i, &start)| {
            let end = cuts.get(i + 1).copied().unwrap_or(part.len());
            &part[start..end]
        })
        .collect()
}

pub fn parse_breakdown(ctx: &LineContext<'_>) -> Breakdown {
    let Some((head, parts)) = split_clause(ctx.measurable) else {
        return Breakdown::NotApplicable;
    };

    let reps = f64::from(ctx.distance.reps);
    let head_stroke = detect_stroke(head);
    let mut contributions = Vec::new();
    let mut warnings = Vec::new();
    let mut per_rep_sum = 0.0;
    let mut undistanced = 0usize;
    let mut defaulted_stroke = false;

    for part in &parts {
        let Some((distance, _)) = bare_distance(part) else {
            undistanced += 1;
            continue;
        };
        let stroke = match detect_stroke(part).or(head_stroke) {
            Some(stroke) => stroke,
            None => {
                defaulted_stroke |= DEFAULT_POLICY.stroke.warn;
                DEFAULT_POLICY.stroke.value
            }
        };
        let activity = detect_activity(part).unwrap_or(DEFAULT_POLICY.activity.value);
        trace!(part, ?stroke, ?activity, distance, "breakdown part");
        per_rep_sum += distance;
        contributions.push(Contribution::new(stroke, activity, distance * reps));
    }

    if contributions.is_empty() {
        return Breakdown::NoDistances;
    }

    if defaulted_stroke {
        warnings.push(STROKE_DEFAULT_WARNING.to_string());
    }
    if undistanced > 0 {
        warnings.push(format!(
            "Ignored {} breakdown part(s) without a distance",
            undistanced
        ));
    }
    if (per_rep_sum - ctx.distance.per_rep).abs() > f64::EPSILON {
        warnings.push(format!(
            "Breakdown parts add up to {}m per rep, written {}m",
            per_rep_sum, ctx.distance.per_rep
        ));
    }

    Breakdown::Parts {
        contributions,
        warnings,
    }
}
