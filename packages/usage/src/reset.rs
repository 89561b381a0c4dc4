//! Weekly window boundary: the next Monday at local midnight.

use chrono::{DateTime, Datelike, Days, NaiveTime, TimeDelta, TimeZone, Weekday};

/// Days from `weekday` to the next Monday, in `1..=7`.
///
/// Computed as `(8 - weekday) mod 7` with Sunday as `0`. A result of `0`
/// (it is already Monday) becomes a full week, so the boundary is never
/// "now".
#[must_use]
pub fn days_until_monday(weekday: Weekday) -> u32 {
    match (8 - weekday.num_days_from_sunday()) % 7 {
        0 => 7,
        days => days,
    }
}

/// Start of the next weekly window: the upcoming Monday at 00:00 in `now`'s
/// time zone. Always strictly after `now`.
///
/// If local midnight falls in a DST gap, the first valid hour after it is
/// used instead.
#[must_use]
pub fn next_reset<Tz: TimeZone>(now: &DateTime<Tz>) -> DateTime<Tz> {
    let days = days_until_monday(now.weekday());
    let date = now.date_naive() + Days::new(u64::from(days));
    let midnight = date.and_time(NaiveTime::MIN);
    let tz = now.timezone();

    tz.from_local_datetime(&midnight)
        .earliest()
        .or_else(|| {
            tz.from_local_datetime(&(midnight + TimeDelta::hours(1)))
                .earliest()
        })
        .unwrap_or_else(|| tz.from_utc_datetime(&midnight))
}

#[cfg(test)]
mod tests {
    use chrono::{FixedOffset, Utc};

    use super::*;

    #[test]
    fn days_until_monday_for_every_weekday() {
        let expected = [
            (Weekday::Mon, 7),
            (Weekday::Tue, 6),
            (Weekday::Wed, 5),
            (Weekday::Thu, 4),
            (Weekday::Fri, 3),
            (Weekday::Sat, 2),
            (Weekday::Sun, 1),
        ];
        for (weekday, days) in expected {
            assert_eq!(days_until_monday(weekday), days, "{weekday}");
        }
    }

    #[test]
    fn resets_on_following_monday_midnight() {
        // 2024-06-05 is a Wednesday
        let now = Utc.with_ymd_and_hms(2024, 6, 5, 15, 30, 0).unwrap();
        let reset = next_reset(&now);
        assert_eq!(reset, Utc.with_ymd_and_hms(2024, 6, 10, 0, 0, 0).unwrap());
    }

    #[test]
    fn monday_midnight_rolls_a_full_week() {
        let now = Utc.with_ymd_and_hms(2024, 6, 3, 0, 0, 0).unwrap();
        assert_eq!(
            next_reset(&now),
            Utc.with_ymd_and_hms(2024, 6, 10, 0, 0, 0).unwrap()
        );
    }

    #[test]
    fn sunday_night_resets_within_the_day() {
        let now = Utc.with_ymd_and_hms(2024, 6, 9, 23, 59, 59).unwrap();
        assert_eq!(
            next_reset(&now),
            Utc.with_ymd_and_hms(2024, 6, 10, 0, 0, 0).unwrap()
        );
    }

    #[test]
    fn uses_local_midnight_of_the_given_zone() {
        let tz = FixedOffset::west_opt(5 * 3600).unwrap();
        // Sunday 22:00 local (Monday 03:00 UTC)
        let now = tz.with_ymd_and_hms(2024, 6, 9, 22, 0, 0).unwrap();
        let reset = next_reset(&now);
        assert_eq!(reset, tz.with_ymd_and_hms(2024, 6, 10, 0, 0, 0).unwrap());
        assert_eq!(reset.with_timezone(&Utc).to_string(), "2024-06-10 05:00:00 UTC");
    }

    #[test]
    fn reset_is_always_in_the_future() {
        let start = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
        for hours in 0..(24 * 14) {
            let now = start + TimeDelta::hours(hours);
            let reset = next_reset(&now);
            assert!(reset > now, "reset {reset} not after {now}");
            assert!(reset - now <= TimeDelta::days(7));
            assert_eq!(reset.weekday(), Weekday::Mon);
        }
    }
}
