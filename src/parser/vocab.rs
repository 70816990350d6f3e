//! Vocabulary tables for stroke and activity classification.
//!
//! Keyword tables are ordered by precedence: the detectors walk them top to
//! bottom and the first hit wins, so compound or negated phrases must sit
//! above the shorter tokens they contain.

use serde::Serialize;
use std::fmt;

/// Canonical stroke categories tracked per session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Stroke {
    FrontCrawl,
    Backstroke,
    Breaststroke,
    Butterfly,
    IndividualMedley,
    /// Swimmer's choice ("No.1"), including "anything but front crawl".
    SwimmersChoice,
}

impl Stroke {
    /// All strokes in canonical display order.
    pub const ALL: [Stroke; 6] = [
        Stroke::FrontCrawl,
        Stroke::Backstroke,
        Stroke::Breaststroke,
        Stroke::Butterfly,
        Stroke::IndividualMedley,
        Stroke::SwimmersChoice,
    ];

    /// Order used when an IM is expanded into its component strokes.
    pub const MEDLEY_ORDER: [Stroke; 4] = [
        Stroke::Butterfly,
        Stroke::Backstroke,
        Stroke::Breaststroke,
        Stroke::FrontCrawl,
    ];

    /// Position of this stroke in [`Stroke::ALL`].
    pub fn index(self) -> usize {
        match self {
            Stroke::FrontCrawl => 0,
            Stroke::Backstroke => 1,
            Stroke::Breaststroke => 2,
            Stroke::Butterfly => 3,
            Stroke::IndividualMedley => 4,
            Stroke::SwimmersChoice => 5,
        }
    }

    /// Short coach-style abbreviation.
    pub fn abbreviation(self) -> &'static str {
        match self {
            Stroke::FrontCrawl => "FC",
            Stroke::Backstroke => "BK",
            Stroke::Breaststroke => "BR",
            Stroke::Butterfly => "FLY",
            Stroke::IndividualMedley => "IM",
            Stroke::SwimmersChoice => "No.1",
        }
    }
}

impl fmt::Display for Stroke {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Stroke::FrontCrawl => "Front Crawl",
            Stroke::Backstroke => "Backstroke",
            Stroke::Breaststroke => "Breaststroke",
            Stroke::Butterfly => "Butterfly",
            Stroke::IndividualMedley => "Individual Medley",
            Stroke::SwimmersChoice => "No.1",
        };
        f.write_str(label)
    }
}

/// Mode of movement for a given distance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Activity {
    Swim,
    Drill,
    Kick,
    Pull,
}

impl Activity {
    /// All activities in canonical display order.
    pub const ALL: [Activity; 4] = [
        Activity::Swim,
        Activity::Drill,
        Activity::Kick,
        Activity::Pull,
    ];

    /// Position of this activity in [`Activity::ALL`].
    pub fn index(self) -> usize {
        match self {
            Activity::Swim => 0,
            Activity::Drill => 1,
            Activity::Kick => 2,
            Activity::Pull => 3,
        }
    }
}

impl fmt::Display for Activity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Activity::Swim => "Swim",
            Activity::Drill => "Drill",
            Activity::Kick => "Kick",
            Activity::Pull => "Pull",
        };
        f.write_str(label)
    }
}

/// Stroke keywords in precedence order.
///
/// Keywords are matched against normalized (lower-case, ASCII) text on
/// letter boundaries, see [`crate::parser::detect`].
pub const STROKE_KEYWORDS: &[(&str, Stroke)] = &[
    // Negations first: "not fc" contains "fc".
    ("not freestyle", Stroke::SwimmersChoice),
    ("not free", Stroke::SwimmersChoice),
    ("not fc", Stroke::SwimmersChoice),
    ("non fc", Stroke::SwimmersChoice),
    ("non-fc", Stroke::SwimmersChoice),
    ("number 1", Stroke::SwimmersChoice),
    ("no. 1", Stroke::SwimmersChoice),
    ("no.1", Stroke::SwimmersChoice),
    ("no 1", Stroke::SwimmersChoice),
    ("no1", Stroke::SwimmersChoice),
    ("choice", Stroke::SwimmersChoice),
    ("i.m.", Stroke::IndividualMedley),
    ("medley", Stroke::IndividualMedley),
    ("im", Stroke::IndividualMedley),
    ("butterfly", Stroke::Butterfly),
    ("fly", Stroke::Butterfly),
    ("backstroke", Stroke::Backstroke),
    ("bk", Stroke::Backstroke),
    ("breaststroke", Stroke::Breaststroke),
    ("breast", Stroke::Breaststroke),
    ("brs", Stroke::Breaststroke),
    ("br", Stroke::Breaststroke),
    ("front crawl", Stroke::FrontCrawl),
    ("freestyle", Stroke::FrontCrawl),
    ("free", Stroke::FrontCrawl),
    ("crawl", Stroke::FrontCrawl),
    ("fc", Stroke::FrontCrawl),
    ("fs", Stroke::FrontCrawl),
    // Last: "back half fast" is pacing, so any named stroke beats it.
    ("back", Stroke::Backstroke),
];

/// Named drills. Any of these marks the distance as [`Activity::Drill`]
/// even when the line also says "swim" or "kick" descriptively.
pub const DRILL_KEYWORDS: &[&str] = &[
    "catch up",
    "catch-up",
    "catchup",
    "single arm",
    "one arm",
    "6 kick",
    "doggy paddle",
    "fingertip drag",
    "finger drag",
    "fist",
    "fists",
    "zipper",
    "sculling",
    "scull",
    "evf",
    "tarzan",
    "head up",
    "torpedo",
    "3-3-3",
    "superman",
];

/// Explicit activity words, checked after [`DRILL_KEYWORDS`].
pub const ACTIVITY_KEYWORDS: &[(&str, Activity)] = &[
    ("drills", Activity::Drill),
    ("drill", Activity::Drill),
    ("kicks", Activity::Kick),
    ("kick", Activity::Kick),
    ("pulls", Activity::Pull),
    ("pull", Activity::Pull),
    ("swims", Activity::Swim),
    ("swim", Activity::Swim),
];

/// Fallback applied when a detector finds nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDefault<T> {
    pub value: T,
    /// Whether using the fallback is surfaced to the author as a warning.
    pub warn: bool,
}

/// Policy table for undetected fields.
///
/// The asymmetry is deliberate and load-bearing for existing totals: a
/// missing activity silently means Swim, a missing stroke is assumed to
/// be Front Crawl but flagged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DefaultPolicy {
    pub stroke: FieldDefault<Stroke>,
    pub activity: FieldDefault<Activity>,
}

pub const DEFAULT_POLICY: DefaultPolicy = DefaultPolicy {
    stroke: FieldDefault {
        value: Stroke::FrontCrawl,
        warn: true,
    },
    activity: FieldDefault {
        value: Activity::Swim,
        warn: false,
    },
};

/// Warning attached to a line whose stroke came from [`DEFAULT_POLICY`].
pub const STROKE_DEFAULT_WARNING: &str = "No stroke specified, defaulted to Front Crawl";
