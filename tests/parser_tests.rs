#![allow(clippy::unwrap_used)]

use chrono::Weekday;
use shift_reminder_bot::schedule::{
    merge_specs, parse_shift_line, ParseProblem, ShiftKind, ShiftSpec,
};

#[test]
fn test_parse_single_token() {
    let outcome = parse_shift_line("ראשון:בוקר");
    assert_eq!(outcome.specs.len(), 1);
    assert!(outcome.problems.is_empty());
    assert_eq!(outcome.specs[0].day, Weekday::Sun);
    assert_eq!(outcome.specs[0].kind, ShiftKind::Morning);
}

#[test]
fn test_parse_multiple_tokens() {
    let outcome = parse_shift_line("ראשון:בוקר שני:צהריים שלישי:לילה");
    assert!(outcome.problems.is_empty());
    assert_eq!(
        outcome.specs,
        vec![
            ShiftSpec::new(Weekday::Sun, ShiftKind::Morning),
            ShiftSpec::new(Weekday::Mon, ShiftKind::Evening),
            ShiftSpec::new(Weekday::Tue, ShiftKind::Night),
        ]
    );
}

#[test]
fn test_parse_underscore_normalization() {
    let outcome = parse_shift_line("שישי:כפולה_בוקר שבת:כפולה_לילה");
    assert!(outcome.problems.is_empty());
    assert_eq!(outcome.specs[0].kind, ShiftKind::DoubleMorning);
    assert_eq!(outcome.specs[1].kind, ShiftKind::DoubleNight);
}

#[test]
fn test_parse_unknown_day() {
    let outcome = parse_shift_line("יומולדת:בוקר");
    assert!(outcome.specs.is_empty());
    assert_eq!(
        outcome.problems,
        vec![ParseProblem::UnknownDay("יומולדת".to_string())]
    );
}

#[test]
fn test_parse_unknown_shift() {
    let outcome = parse_shift_line("ראשון:ערב");
    assert!(outcome.specs.is_empty());
    assert_eq!(
        outcome.problems,
        vec![ParseProblem::UnknownShift("ערב".to_string())]
    );
}

#[test]
fn test_parse_missing_colon() {
    let outcome = parse_shift_line("ראשון בוקר");
    assert!(outcome.specs.is_empty());
    assert_eq!(outcome.problems.len(), 2);
    assert!(matches!(outcome.problems[0], ParseProblem::Malformed(_)));
}

#[test]
fn test_parse_mixed_valid_and_invalid() {
    // valid tokens go through even when neighbors fail
    let outcome = parse_shift_line("ראשון:בוקר חמישי:ערב שבת:לילה");
    assert_eq!(outcome.specs.len(), 2);
    assert_eq!(outcome.problems.len(), 1);
    assert_eq!(outcome.specs[0].day, Weekday::Sun);
    assert_eq!(outcome.specs[1].day, Weekday::Sat);
}

#[test]
fn test_parse_duplicate_day_last_wins() {
    let outcome = parse_shift_line("ראשון:בוקר ראשון:לילה");
    assert_eq!(outcome.specs.len(), 1);
    assert_eq!(outcome.specs[0].kind, ShiftKind::Night);
    assert_eq!(outcome.problems, vec![ParseProblem::ReplacedDay(Weekday::Sun)]);
}

#[test]
fn test_parse_duplicate_same_kind_no_notice() {
    let outcome = parse_shift_line("ראשון:בוקר ראשון:בוקר");
    assert_eq!(outcome.specs.len(), 1);
    assert!(outcome.problems.is_empty());
}

#[test]
fn test_parse_empty_input() {
    let outcome = parse_shift_line("");
    assert!(outcome.is_empty());
    let outcome = parse_shift_line("   \n  ");
    assert!(outcome.is_empty());
}

#[test]
fn test_problem_display_is_hebrew() {
    let problem = ParseProblem::UnknownDay("בלה".to_string());
    assert_eq!(problem.to_string(), "יום לא מוכר: בלה");
    let problem = ParseProblem::ReplacedDay(Weekday::Fri);
    assert_eq!(problem.to_string(), "המשמרת ליום שישי הוחלפה");
}

#[test]
fn test_merge_specs_replaces_across_messages() {
    let mut drafts = vec![ShiftSpec::new(Weekday::Sun, ShiftKind::Morning)];
    let notices = merge_specs(
        &mut drafts,
        vec![
            ShiftSpec::new(Weekday::Sun, ShiftKind::Night),
            ShiftSpec::new(Weekday::Mon, ShiftKind::Evening),
        ],
    );
    assert_eq!(drafts.len(), 2);
    assert_eq!(drafts[0].kind, ShiftKind::Night);
    assert_eq!(notices, vec![ParseProblem::ReplacedDay(Weekday::Sun)]);
}
