//! Line normalization and classification.
//!
//! Every rule downstream works on one of two views of a line:
//!
//! - `normalized`: ASCII, lower-case, trimmed, single-spaced. Used for
//!   keyword detection.
//! - `measurable`: `normalized` with rest intervals, clock times, lane
//!   assignments and digit-free parenthesised notes removed. Used wherever
//!   numbers are read, so "@1:30" or "lanes 1-3" never become distances.

use once_cell::sync::Lazy;
use regex::Regex;

/// Coarse classification applied before any parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// Empty or whitespace only.
    Blank,
    /// Only dashes, underscores or equals signs.
    Separator,
    /// Anything else.
    Content,
}

/// Classify a raw line.
pub fn classify(raw: &str) -> LineKind {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        LineKind::Blank
    } else if trimmed.chars().all(|c| matches!(c, '-' | '_' | '=')) {
        LineKind::Separator
    } else {
        LineKind::Content
    }
}

/// Both views of a content line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineView {
    pub normalized: String,
    pub measurable: String,
}

impl LineView {
    pub fn new(raw: &str) -> Self {
        let normalized = normalize(raw);
        let measurable = strip_annotations(&normalized);
        Self {
            normalized,
            measurable,
        }
    }
}

/// Transliterate to ASCII, lower-case, trim and collapse whitespace.
pub fn normalize(raw: &str) -> String {
    // deunicode has no single-letter mapping we can rely on for the
    // multiplication sign, coaches use it as the reps separator.
    let replaced = raw.replace('×', " x ");
    let ascii = deunicode::deunicode(&replaced);
    collapse_whitespace(&ascii.to_lowercase())
}

/// Collapse runs of whitespace to one space and trim the ends.
pub fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

const DURATION_UNITS: &str = r"(?:seconds|second|secs|sec|s|minutes|minute|mins|min)";

static REST_AT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"@\s*\+?\s*\d+(?::\d{{2}})?(?:\s*{DURATION_UNITS}\b)?"
    ))
    .expect("rest-at regex is valid")
});

static REST_WORD_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"\brest\s*:?\s*\d+(?::\d{{2}})?(?:\s*{DURATION_UNITS}\b)?|\b\d+(?::\d{{2}})?\s*{DURATION_UNITS}\s+rest\b"
    ))
    .expect("rest-word regex is valid")
});

// Bare "50s" is deliberately absent: coaches write "8 x 50s" for fifties.
static DURATION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b\d+\s*(?:seconds|second|secs|sec|minutes|minute|mins|min)\b")
        .expect("duration regex is valid")
});

static CLOCK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b\d{1,2}:\d{2}\b").expect("clock regex is valid"));

static LANE_HEAD_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\blanes?\s*\d+\b").expect("lane regex is valid"));

static LANE_MORE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(?:-|/|&|and\b|to\b)\s*\d+\b").expect("lane range regex is valid")
});

static DISTANCE_FOLLOWS_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(?:metres\b|meters\b|mtrs\b|m\b|x\b|\*)")
        .expect("distance-follows regex is valid")
});

static NOTE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\([^()0-9]*\)").expect("note regex is valid"));

/// Remove `lane 3`, `lanes 1-3`, `lanes 4/5` and the like. A number that
/// carries a metre unit or a multiplier ends the lane list: it is the set.
fn strip_lanes(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut kept_until = 0;
    for head in LANE_HEAD_RE.find_iter(text) {
        if head.start() < kept_until || DISTANCE_FOLLOWS_RE.is_match(&text[head.end()..]) {
            continue;
        }
        let mut end = head.end();
        while let Some(more) = LANE_MORE_RE.find(&text[end..]) {
            let next = end + more.end();
            if DISTANCE_FOLLOWS_RE.is_match(&text[next..]) {
                break;
            }
            end = next;
        }
        out.push_str(&text[kept_until..head.start()]);
        out.push(' ');
        kept_until = end;
    }
    out.push_str(&text[kept_until..]);
    out
}

/// Remove fragments that contain numbers but never describe distance.
pub fn strip_annotations(normalized: &str) -> String {
    let mut text = normalized.to_string();
    for re in [&*REST_AT_RE, &*REST_WORD_RE, &*DURATION_RE, &*CLOCK_RE] {
        text = re.replace_all(&text, " ").into_owned();
    }
    text = strip_lanes(&text);
    text = NOTE_RE.replace_all(&text, " ").into_owned();
    collapse_whitespace(&text)
}
