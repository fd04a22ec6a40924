//! Next-occurrence arithmetic for weekly boundaries.
//!
//! This is the date math behind every reminder: find the next local instant
//! a weekday-plus-time happens, then pull it back by the lead time. All
//! computation stays in the configured timezone until the caller converts.

use chrono::{DateTime, Datelike, Days, Duration, LocalResult, NaiveDate, NaiveTime, TimeZone, Weekday};
use chrono_tz::Tz;

/// Resolves a naive local datetime in `tz`.
///
/// Ambiguous instants (fall-back fold) take the earlier wall time. Instants
/// erased by a spring-forward gap shift one hour later, which is when the
/// skipped wall time actually comes to pass.
fn resolve_local(tz: Tz, date: NaiveDate, time: NaiveTime) -> DateTime<Tz> {
    let naive = date.and_time(time);
    match tz.from_local_datetime(&naive) {
        LocalResult::Single(dt) => dt,
        LocalResult::Ambiguous(earlier, _) => earlier,
        LocalResult::None => {
            let shifted = naive + Duration::hours(1);
            tz.from_local_datetime(&shifted)
                .earliest()
                .unwrap_or_else(|| tz.from_utc_datetime(&shifted))
        }
    }
}

/// The earliest instant strictly after `now` that falls on `day` at `time`.
///
/// A same-day occurrence still ahead of `now` counts; otherwise the date
/// advances in whole weeks, re-resolving the local time so the wall clock
/// stays fixed across DST transitions.
pub fn next_occurrence(now: DateTime<Tz>, day: Weekday, time: NaiveTime) -> DateTime<Tz> {
    let tz = now.timezone();
    let days_ahead = (i64::from(day.num_days_from_sunday())
        - i64::from(now.weekday().num_days_from_sunday()))
    .rem_euclid(7) as u64;

    let date = now.date_naive() + Days::new(days_ahead);
    let candidate = resolve_local(tz, date, time);
    if candidate > now {
        candidate
    } else {
        resolve_local(tz, date + Days::new(7), time)
    }
}

/// The instant the reminder for a boundary should fire: the boundary's next
/// occurrence minus `lead`. If the lead window around the nearest occurrence
/// has already opened, the reminder targets the following week instead.
pub fn next_fire(
    now: DateTime<Tz>,
    occurs_on: Weekday,
    time: NaiveTime,
    lead: Duration,
) -> DateTime<Tz> {
    let boundary = next_occurrence(now, occurs_on, time);
    let fire = boundary - lead;
    if fire > now {
        fire
    } else {
        next_occurrence(boundary, occurs_on, time) - lead
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use chrono_tz::Asia::Jerusalem;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Tz> {
        Jerusalem.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
    }

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn test_same_day_later_time() {
        // 2024-11-04 is a Monday.
        let now = at(2024, 11, 4, 12, 0);
        let next = next_occurrence(now, Weekday::Mon, time(15, 0));
        assert_eq!(next, at(2024, 11, 4, 15, 0));
    }

    #[test]
    fn test_same_day_earlier_time_rolls_a_week() {
        let now = at(2024, 11, 4, 12, 0);
        let next = next_occurrence(now, Weekday::Mon, time(7, 0));
        assert_eq!(next, at(2024, 11, 11, 7, 0));
    }

    #[test]
    fn test_exact_now_rolls_a_week() {
        let now = at(2024, 11, 4, 7, 0);
        let next = next_occurrence(now, Weekday::Mon, time(7, 0));
        assert_eq!(next, at(2024, 11, 11, 7, 0));
    }

    #[test]
    fn test_wraps_week_sunday_first() {
        // From Monday, the coming Sunday is six days out.
        let now = at(2024, 11, 4, 12, 0);
        let next = next_occurrence(now, Weekday::Sun, time(7, 0));
        assert_eq!(next, at(2024, 11, 10, 7, 0));
    }

    #[test]
    fn test_fire_lead_subtracted() {
        let now = at(2024, 11, 4, 12, 0);
        let fire = next_fire(now, Weekday::Tue, time(7, 0), Duration::minutes(5));
        assert_eq!(fire, at(2024, 11, 5, 6, 55));
    }

    #[test]
    fn test_fire_inside_lead_window_rolls_a_week() {
        // 06:57 on the target day: the 06:55 reminder is already in the past.
        let now = at(2024, 11, 5, 6, 57);
        let fire = next_fire(now, Weekday::Tue, time(7, 0), Duration::minutes(5));
        assert_eq!(fire, at(2024, 11, 12, 6, 55));
    }

    #[test]
    fn test_fire_lead_crosses_midnight() {
        // Boundary at 00:02 Wednesday; reminder lands on Tuesday 23:57.
        let now = at(2024, 11, 4, 12, 0);
        let fire = next_fire(now, Weekday::Wed, time(0, 2), Duration::minutes(5));
        assert_eq!(fire, at(2024, 11, 5, 23, 57));
        assert_eq!(fire.weekday(), Weekday::Tue);
    }

    #[test]
    fn test_dst_gap_resolves_one_hour_later() {
        // Israel springs forward on 2025-03-28: 02:00 -> 03:00.
        let now = at(2025, 3, 27, 12, 0);
        let next = next_occurrence(now, Weekday::Fri, time(2, 30));
        assert_eq!(next, at(2025, 3, 28, 3, 30));
    }

    #[test]
    fn test_weekly_roll_keeps_wall_clock_across_dst() {
        // A week that spans the spring-forward transition keeps 07:00 local.
        let now = at(2025, 3, 26, 8, 0);
        let next = next_occurrence(now, Weekday::Wed, time(7, 0));
        assert_eq!(next, at(2025, 4, 2, 7, 0));
        assert_eq!(next.weekday(), Weekday::Wed);
    }
}
