use chrono::{NaiveTime, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Builds a `NaiveTime` from static hour/minute pairs.
/// Inputs are compile-time constants, so the fallback never triggers.
fn hm(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or(NaiveTime::MIN)
}

/// A shift type on the weekly roster, with fixed start and end times.
///
/// The night variants cross midnight, so their end boundary falls on the
/// following weekday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShiftKind {
    Morning,
    Evening,
    Night,
    DoubleMorning,
    DoubleNight,
}

impl ShiftKind {
    pub const ALL: [ShiftKind; 5] = [
        ShiftKind::Morning,
        ShiftKind::Evening,
        ShiftKind::Night,
        ShiftKind::DoubleMorning,
        ShiftKind::DoubleNight,
    ];

    /// Hebrew roster label, as users type it (after underscore normalization).
    pub fn label(&self) -> &'static str {
        match self {
            ShiftKind::Morning => "בוקר",
            ShiftKind::Evening => "צהריים",
            ShiftKind::Night => "לילה",
            ShiftKind::DoubleMorning => "כפולה בוקר",
            ShiftKind::DoubleNight => "כפולה לילה",
        }
    }

    /// Short ASCII code, stable enough for callback data.
    pub fn code(&self) -> &'static str {
        match self {
            ShiftKind::Morning => "morning",
            ShiftKind::Evening => "evening",
            ShiftKind::Night => "night",
            ShiftKind::DoubleMorning => "dmorning",
            ShiftKind::DoubleNight => "dnight",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|k| k.label() == label)
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|k| k.code() == code)
    }

    pub fn start(&self) -> NaiveTime {
        match self {
            ShiftKind::Morning | ShiftKind::DoubleMorning => hm(7, 0),
            ShiftKind::Evening => hm(15, 0),
            ShiftKind::Night => hm(23, 0),
            ShiftKind::DoubleNight => hm(19, 0),
        }
    }

    pub fn end(&self) -> NaiveTime {
        match self {
            ShiftKind::Morning => hm(15, 0),
            ShiftKind::Evening => hm(23, 0),
            ShiftKind::Night | ShiftKind::DoubleNight => hm(7, 0),
            ShiftKind::DoubleMorning => hm(19, 0),
        }
    }

    /// True when the shift ends on the day after it starts.
    pub fn crosses_midnight(&self) -> bool {
        self.end() <= self.start()
    }
}

/// The two boundary events of a shift that need a punch in the tracker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BoundaryAction {
    CheckIn,
    CheckOut,
}

impl BoundaryAction {
    pub fn label(&self) -> &'static str {
        match self {
            BoundaryAction::CheckIn => "כניסה",
            BoundaryAction::CheckOut => "יציאה",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            BoundaryAction::CheckIn => "🟢",
            BoundaryAction::CheckOut => "🔴",
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            BoundaryAction::CheckIn => "in",
            BoundaryAction::CheckOut => "out",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "in" => Some(BoundaryAction::CheckIn),
            "out" => Some(BoundaryAction::CheckOut),
            _ => None,
        }
    }
}

/// Hebrew weekday name. The roster week starts on Sunday.
pub fn weekday_label(day: Weekday) -> &'static str {
    match day {
        Weekday::Sun => "ראשון",
        Weekday::Mon => "שני",
        Weekday::Tue => "שלישי",
        Weekday::Wed => "רביעי",
        Weekday::Thu => "חמישי",
        Weekday::Fri => "שישי",
        Weekday::Sat => "שבת",
    }
}

pub fn weekday_from_label(label: &str) -> Option<Weekday> {
    match label {
        "ראשון" => Some(Weekday::Sun),
        "שני" => Some(Weekday::Mon),
        "שלישי" => Some(Weekday::Tue),
        "רביעי" => Some(Weekday::Wed),
        "חמישי" => Some(Weekday::Thu),
        "שישי" => Some(Weekday::Fri),
        "שבת" => Some(Weekday::Sat),
        _ => None,
    }
}

pub fn weekday_code(day: Weekday) -> &'static str {
    match day {
        Weekday::Sun => "sun",
        Weekday::Mon => "mon",
        Weekday::Tue => "tue",
        Weekday::Wed => "wed",
        Weekday::Thu => "thu",
        Weekday::Fri => "fri",
        Weekday::Sat => "sat",
    }
}

pub fn weekday_from_code(code: &str) -> Option<Weekday> {
    match code {
        "sun" => Some(Weekday::Sun),
        "mon" => Some(Weekday::Mon),
        "tue" => Some(Weekday::Tue),
        "wed" => Some(Weekday::Wed),
        "thu" => Some(Weekday::Thu),
        "fri" => Some(Weekday::Fri),
        "sat" => Some(Weekday::Sat),
        _ => None,
    }
}

/// One roster entry: a shift type on a weekday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftSpec {
    pub day: Weekday,
    pub kind: ShiftKind,
}

impl ShiftSpec {
    pub fn new(day: Weekday, kind: ShiftKind) -> Self {
        Self { day, kind }
    }

    /// The two recurring reminders this entry produces.
    pub fn slots(&self) -> [SlotKey; 2] {
        [
            SlotKey::new(BoundaryAction::CheckIn, self.day, self.kind),
            SlotKey::new(BoundaryAction::CheckOut, self.day, self.kind),
        ]
    }

    pub fn describe(&self) -> String {
        format!("{}: {}", weekday_label(self.day), self.kind.label())
    }
}

/// A concrete weekly boundary derived from a slot: the weekday the event
/// actually occurs on (end boundaries of midnight-crossing shifts land on
/// the next day) and its wall-clock time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Boundary {
    pub occurs_on: Weekday,
    pub time: NaiveTime,
}

/// Stable identity of one recurring reminder. Round-trips through a short
/// ASCII string that fits Telegram callback-data limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SlotKey {
    pub action: BoundaryAction,
    pub day: Weekday,
    pub kind: ShiftKind,
}

impl SlotKey {
    pub fn new(action: BoundaryAction, day: Weekday, kind: ShiftKind) -> Self {
        Self { action, day, kind }
    }

    pub fn parse(input: &str) -> Option<Self> {
        let mut parts = input.split(':');
        let action = BoundaryAction::from_code(parts.next()?)?;
        let day = weekday_from_code(parts.next()?)?;
        let kind = ShiftKind::from_code(parts.next()?)?;
        if parts.next().is_some() {
            return None;
        }
        Some(Self { action, day, kind })
    }

    pub fn boundary(&self) -> Boundary {
        match self.action {
            BoundaryAction::CheckIn => Boundary {
                occurs_on: self.day,
                time: self.kind.start(),
            },
            BoundaryAction::CheckOut => Boundary {
                occurs_on: if self.kind.crosses_midnight() {
                    self.day.succ()
                } else {
                    self.day
                },
                time: self.kind.end(),
            },
        }
    }
}

impl fmt::Display for SlotKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}",
            self.action.code(),
            weekday_code(self.day),
            self.kind.code()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shift_times() {
        assert_eq!(ShiftKind::Morning.start(), hm(7, 0));
        assert_eq!(ShiftKind::Morning.end(), hm(15, 0));
        assert_eq!(ShiftKind::Evening.start(), hm(15, 0));
        assert_eq!(ShiftKind::DoubleNight.start(), hm(19, 0));
        assert_eq!(ShiftKind::DoubleNight.end(), hm(7, 0));
    }

    #[test]
    fn test_crosses_midnight() {
        assert!(ShiftKind::Night.crosses_midnight());
        assert!(ShiftKind::DoubleNight.crosses_midnight());
        assert!(!ShiftKind::Morning.crosses_midnight());
        assert!(!ShiftKind::Evening.crosses_midnight());
        assert!(!ShiftKind::DoubleMorning.crosses_midnight());
    }

    #[test]
    fn test_label_round_trip() {
        for kind in ShiftKind::ALL {
            assert_eq!(ShiftKind::from_label(kind.label()), Some(kind));
            assert_eq!(ShiftKind::from_code(kind.code()), Some(kind));
        }
        assert_eq!(ShiftKind::from_label("ערב"), None);
    }

    #[test]
    fn test_weekday_round_trip() {
        for day in [
            Weekday::Sun,
            Weekday::Mon,
            Weekday::Tue,
            Weekday::Wed,
            Weekday::Thu,
            Weekday::Fri,
            Weekday::Sat,
        ] {
            assert_eq!(weekday_from_label(weekday_label(day)), Some(day));
            assert_eq!(weekday_from_code(weekday_code(day)), Some(day));
        }
    }

    #[test]
    fn test_slot_key_round_trip() {
        let slot = SlotKey::new(BoundaryAction::CheckOut, Weekday::Fri, ShiftKind::DoubleNight);
        let encoded = slot.to_string();
        assert_eq!(encoded, "out:fri:dnight");
        assert!(encoded.len() <= 64);
        assert_eq!(SlotKey::parse(&encoded), Some(slot));
    }

    #[test]
    fn test_slot_key_rejects_malformed() {
        assert_eq!(SlotKey::parse(""), None);
        assert_eq!(SlotKey::parse("in:sun"), None);
        assert_eq!(SlotKey::parse("in:sun:morning:extra"), None);
        assert_eq!(SlotKey::parse("sideways:sun:morning"), None);
        assert_eq!(SlotKey::parse("in:someday:morning"), None);
    }

    #[test]
    fn test_end_boundary_rolls_to_next_day() {
        let slot = SlotKey::new(BoundaryAction::CheckOut, Weekday::Sun, ShiftKind::Night);
        let boundary = slot.boundary();
        assert_eq!(boundary.occurs_on, Weekday::Mon);
        assert_eq!(boundary.time, hm(7, 0));

        let slot = SlotKey::new(BoundaryAction::CheckOut, Weekday::Sun, ShiftKind::Morning);
        assert_eq!(slot.boundary().occurs_on, Weekday::Sun);
    }

    #[test]
    fn test_spec_slots() {
        let spec = ShiftSpec::new(Weekday::Tue, ShiftKind::Evening);
        let [check_in, check_out] = spec.slots();
        assert_eq!(check_in.action, BoundaryAction::CheckIn);
        assert_eq!(check_out.action, BoundaryAction::CheckOut);
        assert_eq!(check_in.day, Weekday::Tue);
        assert_eq!(spec.describe(), "שלישי: צהריים");
    }
}
