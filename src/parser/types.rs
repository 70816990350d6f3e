//! Parse output types.

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use std::fmt;

use super::vocab::{Activity, Stroke};

/// One atomic amount of distance attributed while parsing a line.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Contribution {
    pub stroke: Stroke,
    pub activity: Activity,
    /// Metres. Fractions only come from uneven division and are kept as-is.
    pub distance: f64,
}

impl Contribution {
    pub fn new(stroke: Stroke, activity: Activity, distance: f64) -> Self {
        Self {
            stroke,
            activity,
            distance,
        }
    }
}

/// Why a line contributed nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum UnparsedReason {
    Blank,
    Separator,
    NoDistance,
    NestedMultiplier,
    LaneConditional,
    BreakdownWithoutDistances,
    NoRepeatSource,
}

impl UnparsedReason {
    /// Blank and separator lines are layout, not failed parses.
    pub fn is_layout(self) -> bool {
        matches!(self, UnparsedReason::Blank | UnparsedReason::Separator)
    }
}

impl fmt::Display for UnparsedReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = match self {
            UnparsedReason::Blank => "blank line",
            UnparsedReason::Separator => "separator line",
            UnparsedReason::NoDistance => "no distance found",
            UnparsedReason::NestedMultiplier => "nested multipliers are not supported",
            UnparsedReason::LaneConditional => "odd/even lane assignments are not supported",
            UnparsedReason::BreakdownWithoutDistances => {
                "breakdown parts have no explicit distances"
            }
            UnparsedReason::NoRepeatSource => "nothing above to repeat",
        };
        f.write_str(message)
    }
}

/// Outcome of analyzing one line of session text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParsedLine {
    /// 1-based position in the session text.
    pub line_number: usize,
    /// The line exactly as written.
    pub text: String,
    pub parsed: bool,
    pub contributions: Vec<Contribution>,
    /// Set when the line parsed under an assumption worth checking.
    pub warning: Option<String>,
    /// Reserved; line analysis never fails hard.
    pub error: Option<String>,
    pub unparsed_reason: Option<UnparsedReason>,
}

impl ParsedLine {
    pub(crate) fn parsed(
        line_number: usize,
        text: &str,
        contributions: Vec<Contribution>,
        warning: Option<String>,
    ) -> Self {
        Self {
            line_number,
            text: text.to_string(),
            parsed: true,
            contributions,
            warning,
            error: None,
            unparsed_reason: None,
        }
    }

    pub(crate) fn unparsed(line_number: usize, text: &str, reason: UnparsedReason) -> Self {
        Self {
            line_number,
            text: text.to_string(),
            parsed: false,
            contributions: Vec::new(),
            warning: None,
            error: None,
            unparsed_reason: Some(reason),
        }
    }

    /// Sum of this line's contributions.
    pub fn distance(&self) -> f64 {
        self.contributions.iter().map(|c| c.distance).sum()
    }

    /// Blank or separator line.
    pub fn is_layout(&self) -> bool {
        self.unparsed_reason.is_some_and(UnparsedReason::is_layout)
    }
}

/// Per stroke, per activity distance totals for a session.
///
/// Only ever built by folding contributions in line order, so it is
/// always the exact sum of what the lines report.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionTotals {
    cells: [[f64; 4]; 6],
}

impl SessionTotals {
    /// Re-derive totals from a list of parsed lines.
    pub fn from_lines(lines: &[ParsedLine]) -> Self {
        let mut totals = Self::default();
        for line in lines {
            for contribution in &line.contributions {
                totals.add(contribution);
            }
        }
        totals
    }

    pub(crate) fn add(&mut self, contribution: &Contribution) {
        self.cells[contribution.stroke.index()][contribution.activity.index()] +=
            contribution.distance;
    }

    pub fn get(&self, stroke: Stroke, activity: Activity) -> f64 {
        self.cells[stroke.index()][activity.index()]
    }

    pub fn stroke_total(&self, stroke: Stroke) -> f64 {
        self.cells[stroke.index()].iter().sum()
    }

    pub fn activity_total(&self, activity: Activity) -> f64 {
        self.cells.iter().map(|row| row[activity.index()]).sum()
    }

    pub fn total(&self) -> f64 {
        self.cells.iter().flatten().sum()
    }

    /// Non-zero cells in canonical stroke then activity order.
    pub fn iter_nonzero(&self) -> impl Iterator<Item = (Stroke, Activity, f64)> + '_ {
        Stroke::ALL.into_iter().flat_map(move |stroke| {
            Activity::ALL.into_iter().filter_map(move |activity| {
                let distance = self.get(stroke, activity);
                (distance != 0.0).then_some((stroke, activity, distance))
            })
        })
    }
}

struct ActivityRow<'a>(&'a [f64; 4]);

impl Serialize for ActivityRow<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(Activity::ALL.len()))?;
        for activity in Activity::ALL {
            map.serialize_entry(&activity, &self.0[activity.index()])?;
        }
        map.end()
    }
}

impl Serialize for SessionTotals {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(Stroke::ALL.len()))?;
        for stroke in Stroke::ALL {
            map.serialize_entry(&stroke, &ActivityRow(&self.cells[stroke.index()]))?;
        }
        map.end()
    }
}

/// Everything produced by one parse of a session's text.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ParseResult {
    pub totals: SessionTotals,
    pub lines: Vec<ParsedLine>,
    /// Lines parsed with no warning.
    pub parsed_count: usize,
    /// Lines parsed with a warning.
    pub warning_count: usize,
    /// Lines that failed hard. Always 0 from line analysis.
    pub error_count: usize,
    /// Content lines that contributed nothing (blank and separator lines
    /// are not counted).
    pub unparsed_count: usize,
}

impl ParseResult {
    /// Fold a finished line into the totals and counters.
    pub(crate) fn push(&mut self, line: ParsedLine) {
        for contribution in &line.contributions {
            self.totals.add(contribution);
        }
        if line.error.is_some() {
            self.error_count += 1;
        } else if line.parsed && line.warning.is_some() {
            self.warning_count += 1;
        } else if line.parsed {
            self.parsed_count += 1;
        } else if !line.is_layout() {
            self.unparsed_count += 1;
        }
        self.lines.push(line);
    }

    pub fn total_distance(&self) -> f64 {
        self.totals.total()
    }

    /// Whether the session total is a whole number of pool lengths.
    ///
    /// Informative only: a mismatch usually means a line was misread.
    pub fn is_multiple_of(&self, pool_length: u32) -> bool {
        if pool_length == 0 {
            return false;
        }
        let lengths = self.total_distance() / f64::from(pool_length);
        (lengths - lengths.round()).abs() < 1e-9
    }

    /// Lines that parsed with a warning.
    pub fn warnings(&self) -> impl Iterator<Item = &ParsedLine> {
        self.lines.iter().filter(|l| l.warning.is_some())
    }

    /// Content lines that did not parse.
    pub fn unparsed(&self) -> impl Iterator<Item = &ParsedLine> {
        self.lines.iter().filter(|l| !l.parsed && !l.is_layout())
    }
}
