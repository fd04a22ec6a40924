use chrono::Weekday;
use std::fmt;

use super::shift::{weekday_from_label, weekday_label, ShiftKind, ShiftSpec};

/// Result of tokenizing one line (or message) of `day:shift` tokens.
///
/// Parsing is lenient: bad tokens are collected as problems and the valid
/// ones still go through, so the reply can show both.
#[derive(Debug, Default)]
pub struct ParseOutcome {
    pub specs: Vec<ShiftSpec>,
    pub problems: Vec<ParseProblem>,
}

impl ParseOutcome {
    pub fn is_empty(&self) -> bool {
        self.specs.is_empty() && self.problems.is_empty()
    }
}

/// A per-token parse failure, or a notice about a replaced day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseProblem {
    UnknownDay(String),
    UnknownShift(String),
    Malformed(String),
    ReplacedDay(Weekday),
}

impl fmt::Display for ParseProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseProblem::UnknownDay(day) => write!(f, "יום לא מוכר: {day}"),
            ParseProblem::UnknownShift(shift) => write!(f, "משמרת לא מוכרת: {shift}"),
            ParseProblem::Malformed(token) => {
                write!(f, "פורמט לא תקין: {token} (צריך יום:משמרת)")
            }
            ParseProblem::ReplacedDay(day) => {
                write!(f, "המשמרת ליום {} הוחלפה", weekday_label(*day))
            }
        }
    }
}

/// Tokenizes whitespace-separated `day:shift` tokens.
///
/// Underscores in the shift part are normalized to spaces, so the
/// multi-word shift names can be typed as a single token
/// (`כפולה_בוקר` → `כפולה בוקר`). A later token for a day already seen
/// replaces the earlier one and records a notice.
pub fn parse_shift_line(input: &str) -> ParseOutcome {
    let mut outcome = ParseOutcome::default();

    for token in input.split_whitespace() {
        let Some((day_part, shift_part)) = token.split_once(':') else {
            outcome.problems.push(ParseProblem::Malformed(token.to_string()));
            continue;
        };

        let day_part = day_part.trim();
        let Some(day) = weekday_from_label(day_part) else {
            outcome
                .problems
                .push(ParseProblem::UnknownDay(day_part.to_string()));
            continue;
        };

        let shift_name = shift_part.replace('_', " ");
        let shift_name = shift_name.trim();
        let Some(kind) = ShiftKind::from_label(shift_name) else {
            outcome
                .problems
                .push(ParseProblem::UnknownShift(shift_name.to_string()));
            continue;
        };

        let spec = ShiftSpec::new(day, kind);
        let replaced = merge_specs(&mut outcome.specs, vec![spec]);
        outcome.problems.extend(replaced);
    }

    outcome
}

/// Merges `incoming` entries into `existing`, replacing any entry for a day
/// that appears again. Returns the replacement notices.
pub fn merge_specs(existing: &mut Vec<ShiftSpec>, incoming: Vec<ShiftSpec>) -> Vec<ParseProblem> {
    let mut notices = Vec::new();

    for spec in incoming {
        if let Some(slot) = existing.iter_mut().find(|s| s.day == spec.day) {
            if slot.kind != spec.kind {
                notices.push(ParseProblem::ReplacedDay(spec.day));
            }
            *slot = spec;
        } else {
            existing.push(spec);
        }
    }

    notices
}
