//! Per-line facts shared by the breakdown parser and pattern handlers.

use super::detect::{detect_activity, detect_stroke};
use super::distance::DistanceMatch;
use super::line::LineView;
use super::vocab::{Activity, Stroke, DEFAULT_POLICY};

/// A content line with a distance, ready for the rule chain.
#[derive(Debug, Clone)]
pub struct LineContext<'a> {
    pub normalized: &'a str,
    pub measurable: &'a str,
    pub distance: &'a DistanceMatch,
    /// Stroke detected anywhere on the line.
    pub stroke: Option<Stroke>,
    /// Activity detected anywhere on the line.
    pub activity: Option<Activity>,
}

impl<'a> LineContext<'a> {
    pub fn new(view: &'a LineView, distance: &'a DistanceMatch) -> Self {
        Self {
            normalized: &view.normalized,
            measurable: &view.measurable,
            distance,
            stroke: detect_stroke(&view.normalized),
            activity: detect_activity(&view.normalized),
        }
    }

    /// Repetitions times written distance.
    pub fn total(&self) -> f64 {
        self.distance.total()
    }

    /// Detected activity, else the silent default.
    pub fn activity_or_default(&self) -> Activity {
        self.activity.unwrap_or(DEFAULT_POLICY.activity.value)
    }
}
