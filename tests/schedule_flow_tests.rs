#![allow(clippy::unwrap_used)]

//! End-to-end checks of the scheduling math: a roster entry expands into
//! slots, each slot resolves to a boundary, and each boundary to a fire
//! instant. This is the path the reminder engine walks for every commit.

use chrono::{DateTime, Datelike, Duration, TimeZone, Weekday};
use chrono_tz::Asia::Jerusalem;
use chrono_tz::Tz;
use shift_reminder_bot::schedule::{
    next_fire, BoundaryAction, ShiftKind, ShiftSpec, SlotKey,
};

fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Tz> {
    Jerusalem.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
}

fn fire_for(now: DateTime<Tz>, slot: SlotKey) -> DateTime<Tz> {
    let boundary = slot.boundary();
    next_fire(now, boundary.occurs_on, boundary.time, Duration::minutes(5))
}

#[test]
fn test_morning_shift_fires_five_minutes_early() {
    // 2024-11-04 is a Monday; the roster entry is for Tuesday.
    let now = at(2024, 11, 4, 12, 0);
    let spec = ShiftSpec::new(Weekday::Tue, ShiftKind::Morning);
    let [check_in, check_out] = spec.slots();

    assert_eq!(fire_for(now, check_in), at(2024, 11, 5, 6, 55));
    assert_eq!(fire_for(now, check_out), at(2024, 11, 5, 14, 55));
}

#[test]
fn test_night_shift_checkout_lands_on_next_day() {
    // Sunday night shift 23:00-07:00: check-out reminder Monday 06:55.
    let now = at(2024, 11, 8, 12, 0); // Friday
    let spec = ShiftSpec::new(Weekday::Sun, ShiftKind::Night);
    let [check_in, check_out] = spec.slots();

    assert_eq!(fire_for(now, check_in), at(2024, 11, 10, 22, 55));
    let out_fire = fire_for(now, check_out);
    assert_eq!(out_fire, at(2024, 11, 11, 6, 55));
    assert_eq!(out_fire.weekday(), Weekday::Mon);
}

#[test]
fn test_double_night_spans_the_evening_and_morning() {
    let now = at(2024, 11, 4, 12, 0); // Monday
    let spec = ShiftSpec::new(Weekday::Fri, ShiftKind::DoubleNight);
    let [check_in, check_out] = spec.slots();

    assert_eq!(fire_for(now, check_in), at(2024, 11, 8, 18, 55));
    assert_eq!(fire_for(now, check_out), at(2024, 11, 9, 6, 55));
}

#[test]
fn test_missed_lead_window_targets_next_week() {
    // It is already 06:58 on the shift day; this week's 06:55 reminder is
    // unreachable, so the slot arms for next week.
    let now = at(2024, 11, 5, 6, 58);
    let spec = ShiftSpec::new(Weekday::Tue, ShiftKind::Morning);
    let [check_in, _] = spec.slots();

    assert_eq!(fire_for(now, check_in), at(2024, 11, 12, 6, 55));
}

#[test]
fn test_mid_shift_commit_still_catches_checkout() {
    // Committed at 10:00 during a Tuesday morning shift: check-in waits for
    // next week, check-out still fires today.
    let now = at(2024, 11, 5, 10, 0);
    let spec = ShiftSpec::new(Weekday::Tue, ShiftKind::Morning);
    let [check_in, check_out] = spec.slots();

    assert_eq!(fire_for(now, check_in), at(2024, 11, 12, 6, 55));
    assert_eq!(fire_for(now, check_out), at(2024, 11, 5, 14, 55));
}

#[test]
fn test_full_roster_produces_two_slots_per_entry() {
    let roster = [
        ShiftSpec::new(Weekday::Sun, ShiftKind::Morning),
        ShiftSpec::new(Weekday::Mon, ShiftKind::Evening),
        ShiftSpec::new(Weekday::Tue, ShiftKind::Night),
    ];
    let now = at(2024, 11, 6, 12, 0);

    let mut fires: Vec<DateTime<Tz>> = roster
        .iter()
        .flat_map(|spec| spec.slots())
        .map(|slot| fire_for(now, slot))
        .collect();
    assert_eq!(fires.len(), 6);

    // every fire instant is in the future and within the coming week
    fires.sort();
    assert!(fires[0] > now);
    assert!(fires[5] <= now + Duration::days(8));
}

#[test]
fn test_slot_callback_data_round_trip_through_engine_format() {
    // the confirm button carries "confirm:<slot>"; the handler strips the
    // prefix and parses what is left
    let slot = SlotKey::new(BoundaryAction::CheckOut, Weekday::Sun, ShiftKind::Night);
    let callback_data = format!("confirm:{slot}");
    assert!(callback_data.len() <= 64);

    let parsed = callback_data
        .strip_prefix("confirm:")
        .and_then(SlotKey::parse)
        .unwrap();
    assert_eq!(parsed, slot);
}
