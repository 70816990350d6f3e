//! Special-pattern handlers.
//!
//! An ordered list of pure rules layered over the default path. Each rule
//! sees the same [`LineContext`] and either claims the line by returning
//! its contributions or passes. The first claim wins, so precedence is the
//! order of [`HANDLERS`].

use once_cell::sync::Lazy;
use regex::Regex;

use super::context::LineContext;
use super::detect::{contains_keyword, detect_activity, detect_all_strokes, stroke_mentions};
use super::distance::without_span;
use super::types::Contribution;
use super::vocab::{Stroke, DEFAULT_POLICY};

/// A special-pattern rule.
pub type Handler = fn(&LineContext<'_>) -> Option<Vec<Contribution>>;

/// Handlers in priority order, with names for logging.
pub const HANDLERS: &[(&str, Handler)] = &[
    ("alternating-stroke", alternating_strokes),
    ("im-per-stroke", im_per_stroke),
    ("halves-split", halves_split),
    ("rep-distributed", rep_distributed),
];

/// Run the handlers in order; the first match wins.
pub fn apply(ctx: &LineContext<'_>) -> Option<(&'static str, Vec<Contribution>)> {
    HANDLERS
        .iter()
        .find_map(|(name, handler)| handler(ctx).map(|contributions| (*name, contributions)))
}

static ALT_LENGTHS_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\balt(?:\.|ernate|ernating)?\s*(?:lengths?|lens?)\b")
        .expect("alt-lengths regex is valid")
});

static HALVES_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(drill|kick|pull|swim)s?\s+as\s+(.+)$").expect("halves regex is valid")
});

static TRAILING_COUNT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:^|[^0-9a-z])(\d+)\s*$").expect("count regex is valid"));

/// "alt lengths": the total is shared evenly by every stroke mentioned.
pub fn alternating_strokes(ctx: &LineContext<'_>) -> Option<Vec<Contribution>> {
    if !ALT_LENGTHS_RE.is_match(ctx.normalized) {
        return None;
    }
    let strokes = detect_all_strokes(ctx.normalized);
    if strokes.len() < 2 {
        return None;
    }
    let share = ctx.total() / strokes.len() as f64;
    let activity = ctx.activity_or_default();
    Some(
        strokes
            .into_iter()
            .map(|stroke| Contribution::new(stroke, activity, share))
            .collect(),
    )
}

/// IM "per stroke": a quarter each of fly, back, breast, free.
pub fn im_per_stroke(ctx: &LineContext<'_>) -> Option<Vec<Contribution>> {
    if ctx.stroke != Some(Stroke::IndividualMedley) {
        return None;
    }
    if !(contains_keyword(ctx.normalized, "per stroke")
        || contains_keyword(ctx.normalized, "per-stroke"))
    {
        return None;
    }
    let quarter = ctx.total() / 4.0;
    let activity = ctx.activity_or_default();
    Some(
        Stroke::MEDLEY_ORDER
            .into_iter()
            .map(|stroke| Contribution::new(stroke, activity, quarter))
            .collect(),
    )
}

/// Count written immediately before a mention ("4 no1", "4fc").
fn count_before(text: &str, start: usize) -> Option<u32> {
    let caps = TRAILING_COUNT_RE.captures(&text[..start])?;
    caps.get(1)?.as_str().parse().ok()
}

/// Stroke weights in order of first appearance, merging repeats.
/// `None` when the written counts overflow.
fn weighted_strokes(text: &str, default_count: Option<u32>) -> Option<Vec<(Stroke, u32)>> {
    let mut weights: Vec<(Stroke, u32)> = Vec::new();
    for mention in stroke_mentions(text) {
        let Some(count) = count_before(text, mention.span.start).or(default_count) else {
            continue;
        };
        match weights.iter_mut().find(|(stroke, _)| *stroke == mention.stroke) {
            Some((_, weight)) => *weight = weight.checked_add(count)?,
            None => weights.push((mention.stroke, count)),
        }
    }
    Some(weights)
}

fn sum_weights(weights: &[(Stroke, u32)]) -> Option<u32> {
    weights
        .iter()
        .try_fold(0u32, |acc, (_, weight)| acc.checked_add(*weight))
}

/// "2 pull as 1 bk 1 fc": the named activity, split across the strokes in
/// proportion to their counts (even when the counts are equal).
pub fn halves_split(ctx: &LineContext<'_>) -> Option<Vec<Contribution>> {
    let caps = HALVES_RE.captures(ctx.measurable)?;
    let activity = detect_activity(caps.get(1)?.as_str())?;
    let weights = weighted_strokes(caps.get(2)?.as_str(), Some(1))?;
    if weights.len() < 2 {
        return None;
    }
    let total_weight = sum_weights(&weights)?;
    if total_weight == 0 {
        return None;
    }
    let total = ctx.total();
    Some(
        weights
            .into_iter()
            .map(|(stroke, weight)| {
                Contribution::new(
                    stroke,
                    activity,
                    total * f64::from(weight) / f64::from(total_weight),
                )
            })
            .collect(),
    )
}

/// "8 x 50m 4 no1 4fc": per-stroke rep counts sharing one per-rep
/// distance. The counts must account for exactly the written reps.
pub fn rep_distributed(ctx: &LineContext<'_>) -> Option<Vec<Contribution>> {
    if !ctx.distance.explicit_reps {
        return None;
    }
    let remainder = without_span(ctx.measurable, &ctx.distance.span);
    let weights = weighted_strokes(&remainder, None)?;
    if weights.len() < 2 {
        return None;
    }
    let counted = sum_weights(&weights)?;
    if counted != ctx.distance.reps {
        return None;
    }
    let activity = ctx.activity.unwrap_or(DEFAULT_POLICY.activity.value);
    Some(
        weights
            .into_iter()
            .map(|(stroke, count)| {
                Contribution::new(stroke, activity, f64::from(count) * ctx.distance.per_rep)
            })
            .collect(),
    )
}
