//! Stroke and activity detection over normalized text.
//!
//! Matching is keyword containment on token boundaries: a keyword that
//! starts or ends with a letter must not touch another letter on that
//! side, one that starts or ends with a digit must not touch another
//! alphanumeric. So `im` never fires inside `swim`, while `4fc` still
//! yields `fc`.

use tracing::trace;

use super::vocab::{Activity, Stroke, ACTIVITY_KEYWORDS, DRILL_KEYWORDS, STROKE_KEYWORDS};

/// A keyword hit: byte span in the searched text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    fn overlaps(&self, other: &Span) -> bool {
        self.start < other.end && other.start < self.end
    }
}

fn boundary_ok(edge: char, outside: Option<char>) -> bool {
    let Some(outside) = outside else {
        return true;
    };
    if edge.is_ascii_alphabetic() {
        !outside.is_ascii_alphabetic()
    } else if edge.is_ascii_digit() {
        !outside.is_ascii_alphanumeric()
    } else {
        true
    }
}

/// All boundary-respecting occurrences of `keyword` in `text`.
pub fn find_keyword(text: &str, keyword: &str) -> Vec<Span> {
    let (Some(first), Some(last)) = (keyword.chars().next(), keyword.chars().last()) else {
        return Vec::new();
    };
    text.match_indices(keyword)
        .filter_map(|(start, _)| {
            let end = start + keyword.len();
            let before = text[..start].chars().next_back();
            let after = text[end..].chars().next();
            (boundary_ok(first, before) && boundary_ok(last, after)).then_some(Span { start, end })
        })
        .collect()
}

/// Whether `keyword` occurs in `text` on token boundaries.
pub fn contains_keyword(text: &str, keyword: &str) -> bool {
    !find_keyword(text, keyword).is_empty()
}

/// First stroke in precedence order, or `None`.
pub fn detect_stroke(text: &str) -> Option<Stroke> {
    let hit = STROKE_KEYWORDS
        .iter()
        .find(|(keyword, _)| contains_keyword(text, keyword))
        .map(|(keyword, stroke)| (*keyword, *stroke));
    if let Some((keyword, stroke)) = hit {
        trace!(keyword, ?stroke, "stroke keyword");
    }
    hit.map(|(_, stroke)| stroke)
}

/// A stroke mention located in the text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StrokeMention {
    pub stroke: Stroke,
    pub span: Span,
}

/// Every stroke mention, ordered by position.
///
/// Spans claimed by a higher-precedence keyword mask out anything inside
/// them, so "not fc" is one SwimmersChoice mention and never also a
/// FrontCrawl one.
pub fn stroke_mentions(text: &str) -> Vec<StrokeMention> {
    let mut claimed: Vec<StrokeMention> = Vec::new();
    for (keyword, stroke) in STROKE_KEYWORDS {
        for span in find_keyword(text, keyword) {
            if claimed.iter().all(|m| !m.span.overlaps(&span)) {
                claimed.push(StrokeMention {
                    stroke: *stroke,
                    span,
                });
            }
        }
    }
    claimed.sort_by_key(|m| m.span.start);
    claimed
}

/// Distinct strokes in order of first appearance.
pub fn detect_all_strokes(text: &str) -> Vec<Stroke> {
    let mut strokes = Vec::new();
    for mention in stroke_mentions(text) {
        if !strokes.contains(&mention.stroke) {
            strokes.push(mention.stroke);
        }
    }
    strokes
}

/// Drill names first, then explicit activity words.
pub fn detect_activity(text: &str) -> Option<Activity> {
    if let Some(drill) = DRILL_KEYWORDS.iter().find(|kw| contains_keyword(text, kw)) {
        trace!(keyword = *drill, "drill keyword");
        return Some(Activity::Drill);
    }
    let hit = ACTIVITY_KEYWORDS
        .iter()
        .find(|(keyword, _)| contains_keyword(text, keyword))
        .map(|(keyword, activity)| (*keyword, *activity));
    if let Some((keyword, activity)) = hit {
        trace!(keyword, ?activity, "activity keyword");
    }
    hit.map(|(_, activity)| activity)
}
