//! Period window resolution
//!
//! Maps a goal's period kind, the owner's timezone and optional explicit
//! date overrides onto a half-open instant interval `[start, end)`. Pure:
//! callers pass a single `now` so one recompute never observes two clocks.

use chrono::{DateTime as ChronoDateTime, NaiveTime};

use crate::{entity::GoalPeriod, prelude::*};

/// Window length used when a Custom goal carries no usable period length.
pub const DEFAULT_CUSTOM_PERIOD_DAYS: f64 = 7.0;

/// Half-open instant interval `[start, end)`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Window {
  pub start: ChronoDateTime<Utc>,
  pub end: ChronoDateTime<Utc>,
}

impl Window {
  /// Calendar day the window opens on, in the resolving timezone.
  pub fn start_date(&self, tz: Tz) -> Date {
    self.start.with_timezone(&tz).date_naive()
  }
}

/// Parse a stored IANA zone name, falling back to UTC when absent or bogus.
pub fn user_tz(timezone: Option<&str>) -> Tz {
  timezone.and_then(|name| name.parse().ok()).unwrap_or(Tz::UTC)
}

/// Resolve the active window for a goal.
///
/// An explicit `start_date` overrides the period's natural start; an
/// explicit `end_date` closes the window at midnight of the following day,
/// otherwise the window stays open until `now`.
pub fn resolve(
  period: GoalPeriod,
  tz: Tz,
  start_date: Option<Date>,
  end_date: Option<Date>,
  custom_period_days: Option<f64>,
  now: ChronoDateTime<Utc>,
) -> Window {
  let start = match start_date {
    Some(date) => midnight(tz, date),
    None => natural_start(period, tz, custom_period_days, now),
  };

  let end = match end_date {
    Some(date) => midnight(tz, date + TimeDelta::days(1)),
    None => now,
  };

  Window { start, end }
}

fn natural_start(
  period: GoalPeriod,
  tz: Tz,
  custom_period_days: Option<f64>,
  now: ChronoDateTime<Utc>,
) -> ChronoDateTime<Utc> {
  let today = now.with_timezone(&tz).date_naive();

  match period {
    GoalPeriod::Daily => midnight(tz, today),
    GoalPeriod::Weekly => {
      let monday =
        today - TimeDelta::days(today.weekday().num_days_from_monday() as i64);
      midnight(tz, monday)
    }
    GoalPeriod::Monthly => {
      let first = Date::from_ymd_opt(today.year(), today.month(), 1)
        .unwrap_or(today);
      midnight(tz, first)
    }
    GoalPeriod::Quarterly => {
      let month = (today.month0() / 3) * 3 + 1;
      let first = Date::from_ymd_opt(today.year(), month, 1).unwrap_or(today);
      midnight(tz, first)
    }
    GoalPeriod::Custom => {
      let days = custom_period_days
        .filter(|days| *days > 0.0)
        .unwrap_or(DEFAULT_CUSTOM_PERIOD_DAYS);
      // whole minutes, matching how sub-day lengths are rounded elsewhere
      let minutes = (days * 24.0 * 60.0).round().max(0.0) as i64;
      now - TimeDelta::minutes(minutes)
    }
  }
}

/// Local midnight of `date` as a UTC instant.
///
/// A DST gap can make local midnight nonexistent; the earliest valid local
/// time is used, and a zone without any mapping falls back to UTC midnight.
fn midnight(tz: Tz, date: Date) -> ChronoDateTime<Utc> {
  let local = date.and_time(NaiveTime::MIN);
  match tz.from_local_datetime(&local).earliest() {
    Some(instant) => instant.with_timezone(&Utc),
    None => Utc.from_utc_datetime(&local),
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  // 2026-08-19 is a Wednesday
  fn wednesday() -> ChronoDateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 8, 19, 15, 30, 0).unwrap()
  }

  #[test]
  fn daily_starts_at_local_midnight() {
    let window =
      resolve(GoalPeriod::Daily, Tz::UTC, None, None, None, wednesday());

    assert_eq!(window.start, Utc.with_ymd_and_hms(2026, 8, 19, 0, 0, 0).unwrap());
    assert_eq!(window.end, wednesday());
  }

  #[test]
  fn weekly_starts_on_most_recent_monday() {
    let window =
      resolve(GoalPeriod::Weekly, Tz::UTC, None, None, None, wednesday());

    assert_eq!(window.start, Utc.with_ymd_and_hms(2026, 8, 17, 0, 0, 0).unwrap());
  }

  #[test]
  fn weekly_on_a_monday_starts_today() {
    // 2026-08-17 is a Monday
    let monday = Utc.with_ymd_and_hms(2026, 8, 17, 9, 0, 0).unwrap();
    let window = resolve(GoalPeriod::Weekly, Tz::UTC, None, None, None, monday);

    assert_eq!(window.start, Utc.with_ymd_and_hms(2026, 8, 17, 0, 0, 0).unwrap());
  }

  #[test]
  fn weekly_respects_timezone_day_boundary() {
    // 23:30 UTC on Sunday is already Monday in Berlin
    let late_sunday = Utc.with_ymd_and_hms(2026, 8, 16, 23, 30, 0).unwrap();
    let tz: Tz = "Europe/Berlin".parse().unwrap();
    let window =
      resolve(GoalPeriod::Weekly, tz, None, None, None, late_sunday);

    // Monday 2026-08-17 00:00 Berlin == Sunday 22:00 UTC
    assert_eq!(window.start, Utc.with_ymd_and_hms(2026, 8, 16, 22, 0, 0).unwrap());
  }

  #[test]
  fn monthly_starts_on_the_first() {
    let window =
      resolve(GoalPeriod::Monthly, Tz::UTC, None, None, None, wednesday());

    assert_eq!(window.start, Utc.with_ymd_and_hms(2026, 8, 1, 0, 0, 0).unwrap());
  }

  #[test]
  fn quarterly_starts_on_quarter_boundary() {
    let window =
      resolve(GoalPeriod::Quarterly, Tz::UTC, None, None, None, wednesday());

    assert_eq!(window.start, Utc.with_ymd_and_hms(2026, 7, 1, 0, 0, 0).unwrap());

    let february = Utc.with_ymd_and_hms(2026, 2, 10, 12, 0, 0).unwrap();
    let window =
      resolve(GoalPeriod::Quarterly, Tz::UTC, None, None, None, february);

    assert_eq!(window.start, Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap());
  }

  #[test]
  fn custom_defaults_to_trailing_week() {
    let now = wednesday();

    for days in [None, Some(0.0), Some(-1.0)] {
      let window = resolve(GoalPeriod::Custom, Tz::UTC, None, None, days, now);
      assert_eq!(window.start, now - TimeDelta::days(7));
      assert_eq!(window.end, now);
    }
  }

  #[test]
  fn custom_rounds_fractional_days_to_minutes() {
    let now = wednesday();
    let window =
      resolve(GoalPeriod::Custom, Tz::UTC, None, None, Some(1.5), now);

    assert_eq!(window.start, now - TimeDelta::minutes(36 * 60));
  }

  #[test]
  fn explicit_dates_override_natural_window() {
    let start = Date::from_ymd_opt(2026, 8, 1).unwrap();
    let end = Date::from_ymd_opt(2026, 8, 10).unwrap();
    let window = resolve(
      GoalPeriod::Weekly,
      Tz::UTC,
      Some(start),
      Some(end),
      None,
      wednesday(),
    );

    assert_eq!(window.start, Utc.with_ymd_and_hms(2026, 8, 1, 0, 0, 0).unwrap());
    // end is exclusive: midnight after the end date
    assert_eq!(window.end, Utc.with_ymd_and_hms(2026, 8, 11, 0, 0, 0).unwrap());
  }

  #[test]
  fn invalid_timezone_falls_back_to_utc() {
    assert_eq!(user_tz(Some("Not/AZone")), Tz::UTC);
    assert_eq!(user_tz(None), Tz::UTC);
    assert_eq!(user_tz(Some("Asia/Tokyo")), "Asia/Tokyo".parse().unwrap());
  }
}
