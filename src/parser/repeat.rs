//! "Repeat" lines replay what came just before them.

use super::types::{Contribution, ParsedLine};

/// Most lines a single "repeat" replays.
pub const REPEAT_WINDOW: usize = 2;

/// Whether the line asks for a replay.
pub fn is_repeat(normalized: &str) -> bool {
    normalized.contains("repeat")
}

/// Contributions to replay, and how many lines they came from.
///
/// Walks backwards over the lines parsed so far, collecting the nearest
/// contiguous run of parsed lines. A blank or separator line ends the walk;
/// an unparsed content line is skipped until something has been collected,
/// after which it ends the walk too.
pub fn resolve_repeat(previous: &[ParsedLine]) -> Option<(Vec<Contribution>, usize)> {
    let mut collected: Vec<&ParsedLine> = Vec::new();
    for line in previous.iter().rev() {
        if line.is_layout() {
            break;
        }
        if line.parsed {
            collected.push(line);
            if collected.len() == REPEAT_WINDOW {
                break;
            }
        } else if !collected.is_empty() {
            break;
        }
    }

    if collected.is_empty() {
        return None;
    }

    let count = collected.len();
    let contributions = collected
        .into_iter()
        .rev()
        .flat_map(|line| line.contributions.iter().copied())
        .collect();
    Some((contributions, count))
}
