//! Whole-session parsing, line by line

use swimtally::{parse, parse_bytes, Activity, Contribution, ParseError, Stroke, UnparsedReason};

use crate::helpers::{assert_close, load_fixture, parse_fixture};

fn only_line(text: &str) -> swimtally::ParsedLine {
    let mut result = parse(text);
    assert_eq!(result.lines.len(), 1);
    result.lines.remove(0)
}

// ============================================================================
// Reference scenarios
// ============================================================================

#[test]
fn simple_repetition_line() {
    let line = only_line("4 x 100m FC Swim");
    assert!(line.parsed);
    assert_eq!(
        line.contributions,
        vec![Contribution::new(Stroke::FrontCrawl, Activity::Swim, 400.0)]
    );
    assert!(line.warning.is_none());
}

#[test]
fn four_way_breakdown() {
    let result = parse("4 x 100m FC as 25m Kick / 25m Drill / 25m Pull / 25m Swim");
    let line = &result.lines[0];
    assert_eq!(line.contributions.len(), 4);
    for activity in Activity::ALL {
        assert_close(result.totals.get(Stroke::FrontCrawl, activity), 100.0);
    }
    assert_close(result.total_distance(), 400.0);
    assert!(line.warning.is_none());
}

#[test]
fn slash_strokes_without_as_are_not_split() {
    let line = only_line("4 x 100m FC/BK Swim");
    assert!(line.parsed);
    assert_eq!(line.contributions.len(), 1);
    assert_close(line.distance(), 400.0);
}

#[test]
fn activity_default_is_silent() {
    let line = only_line("4 x 100m FC");
    assert_eq!(
        line.contributions,
        vec![Contribution::new(Stroke::FrontCrawl, Activity::Swim, 400.0)]
    );
    assert!(line.warning.is_none());
}

#[test]
fn nested_multiplier_is_rejected_whole() {
    let line = only_line("6 x 25m as 3 x ( Y <> EVF ) / 1 x BR Arm Pull + FC Kick (Fins)");
    assert!(!line.parsed);
    assert!(line.contributions.is_empty());
    assert_eq!(line.unparsed_reason, Some(UnparsedReason::NestedMultiplier));
}

#[test]
fn separator_line_is_silent() {
    let line = only_line("----");
    assert!(!line.parsed);
    assert!(line.contributions.is_empty());
    assert!(line.warning.is_none());
    assert!(line.error.is_none());
}

// ============================================================================
// Fixture sessions
// ============================================================================

#[test]
fn club_session_totals() {
    let result = parse_fixture("club_session.txt");

    assert_close(result.totals.get(Stroke::FrontCrawl, Activity::Swim), 1200.0);
    assert_close(result.totals.get(Stroke::FrontCrawl, Activity::Kick), 200.0);
    assert_close(result.totals.get(Stroke::FrontCrawl, Activity::Drill), 200.0);
    assert_close(result.totals.get(Stroke::FrontCrawl, Activity::Pull), 200.0);
    assert_close(result.totals.get(Stroke::SwimmersChoice, Activity::Swim), 400.0);
    assert_close(result.totals.get(Stroke::SwimmersChoice, Activity::Kick), 200.0);
    assert_close(result.total_distance(), 2400.0);

    assert_eq!(result.lines.len(), 11);
    assert_eq!(result.parsed_count, 4);
    assert_eq!(result.warning_count, 2);
    assert_eq!(result.unparsed_count, 3);
    assert_eq!(result.error_count, 0);
}

#[test]
fn club_session_repeat_replays_two_lines() {
    let result = parse_fixture("club_session.txt");
    let repeat = &result.lines[7];
    assert_eq!(repeat.line_number, 8);
    assert!(repeat.parsed);
    assert_eq!(repeat.warning.as_deref(), Some("Repeated previous 2 line(s)"));

    let mut expected = result.lines[5].contributions.clone();
    expected.extend(result.lines[6].contributions.iter().copied());
    assert_eq!(repeat.contributions, expected);
}

#[test]
fn club_session_unparsed_lines_are_headers() {
    let result = parse_fixture("club_session.txt");
    let unparsed: Vec<usize> = result.unparsed().map(|l| l.line_number).collect();
    assert_eq!(unparsed, vec![1, 5, 10]);
    assert!(result
        .unparsed()
        .all(|l| l.unparsed_reason == Some(UnparsedReason::NoDistance)));
}

#[test]
fn unsupported_constructs_are_reported_not_guessed() {
    let result = parse_fixture("unsupported.txt");
    let reasons: Vec<_> = result.lines.iter().map(|l| l.unparsed_reason).collect();
    assert_eq!(
        reasons,
        vec![
            Some(UnparsedReason::LaneConditional),
            Some(UnparsedReason::NestedMultiplier),
            Some(UnparsedReason::BreakdownWithoutDistances),
            None,
        ]
    );
    assert_close(result.total_distance(), 200.0);
    assert_close(result.totals.get(Stroke::Backstroke, Activity::Kick), 200.0);
}

#[test]
fn drills_and_patterns_session() {
    let result = parse_fixture("drills_and_patterns.txt");

    assert_close(result.totals.get(Stroke::FrontCrawl, Activity::Drill), 200.0);
    assert_close(result.totals.get(Stroke::FrontCrawl, Activity::Swim), 500.0);
    assert_close(result.totals.get(Stroke::FrontCrawl, Activity::Pull), 50.0);
    assert_close(result.totals.get(Stroke::Backstroke, Activity::Swim), 200.0);
    assert_close(result.totals.get(Stroke::Backstroke, Activity::Pull), 50.0);
    assert_close(result.totals.get(Stroke::Butterfly, Activity::Swim), 300.0);
    assert_close(result.totals.get(Stroke::Breaststroke, Activity::Swim), 100.0);
    assert_close(result.total_distance(), 1400.0);

    assert_eq!(result.parsed_count, 5);
    assert_eq!(result.warning_count, 1);
    assert_eq!(result.unparsed_count, 1);
}

#[test]
fn rest_and_clock_numbers_are_ignored() {
    let result = parse_fixture("drills_and_patterns.txt");
    assert_close(result.lines[5].distance(), 100.0);
    assert_close(result.lines[6].distance(), 400.0);
}

// ============================================================================
// Input handling
// ============================================================================

#[test]
fn crlf_line_endings_match_lf() {
    let lf = load_fixture("club_session.txt");
    let crlf = lf.replace('\n', "\r\n");
    assert_eq!(parse(&crlf).totals, parse(&lf).totals);
}

#[test]
fn empty_text_is_an_empty_result() {
    let result = parse("");
    assert!(result.lines.is_empty());
    assert_close(result.total_distance(), 0.0);
}

#[test]
fn non_utf8_bytes_are_rejected() {
    let bytes = std::fs::read(crate::helpers::fixture_path("not_text.bin")).unwrap();
    let err = parse_bytes(&bytes).unwrap_err();
    assert!(matches!(err, ParseError::NotText { valid_up_to: 11 }));
    assert!(err.to_string().contains("UTF-8"));
}

#[test]
fn unicode_times_sign_is_a_multiplier() {
    let line = only_line("4 × 100m Fly");
    assert_eq!(
        line.contributions,
        vec![Contribution::new(Stroke::Butterfly, Activity::Swim, 400.0)]
    );
}

#[test]
fn negated_front_crawl_is_swimmers_choice() {
    let line = only_line("200m not fc");
    assert_eq!(line.contributions[0].stroke, Stroke::SwimmersChoice);
}

// ============================================================================
// Coach phrasing that must not cost distance
// ============================================================================

#[test]
fn huge_counts_never_abort_the_session() {
    let result = parse(
        "2 x 50m pull as 4000000001 bk 4000000001 fc\n8 x 50m 4000000001 no1 4000000001 fc",
    );
    assert_eq!(result.lines.len(), 2);
    assert_eq!(result.unparsed_count, 1);
    assert_close(result.total_distance(), 400.0);
}

#[test]
fn lane_numbers_leave_the_set_distance() {
    let result = parse("Lane 3, 400m FC\nLanes 1-3, 200m BK");
    assert_eq!(result.unparsed_count, 0);
    assert_close(result.totals.get(Stroke::FrontCrawl, Activity::Swim), 400.0);
    assert_close(result.totals.get(Stroke::Backstroke, Activity::Swim), 200.0);
}

#[test]
fn odds_evens_pacing_keeps_the_set() {
    let line = only_line("8 x 50m FC odds easy, evens fast");
    assert!(line.parsed);
    assert_close(line.distance(), 400.0);
}

#[test]
fn back_half_pacing_keeps_front_crawl() {
    let line = only_line("4 x 100m FC, back half fast");
    assert_eq!(
        line.contributions,
        vec![Contribution::new(Stroke::FrontCrawl, Activity::Swim, 400.0)]
    );
}

#[test]
fn breakdown_without_slashes() {
    let line = only_line("2 x 50m as 25 fly 25 free");
    assert!(line.warning.is_none());
    assert_eq!(
        line.contributions,
        vec![
            Contribution::new(Stroke::Butterfly, Activity::Swim, 50.0),
            Contribution::new(Stroke::FrontCrawl, Activity::Swim, 50.0),
        ]
    );
}
