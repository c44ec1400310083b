//! Date arithmetic evaluated against a **fixed civil timezone**.
//!
//! "Today" is always resolved in Asia/Tokyo, never in the host machine's
//! local timezone.  A deployment in Frankfurt and one in São Paulo therefore
//! agree on the day count at any given instant, and the anniversary check
//! flips at JST midnight regardless of where the process runs.
//!
//! Every computation comes in two flavours:
//!
//! * an `*_on(today, …)` form that takes `today` explicitly — pure, and the
//!   one unit tests exercise;
//! * a short form that resolves `today` via [`today_jst`] first.
//!
//! Callers are expected to validate `birth ≤ today` **before** calling the
//! arithmetic functions; see the contract notes on [`days_lived_on`].

use chrono::{Datelike, NaiveDate, Utc};
use chrono_tz::Tz;

/// The timezone "today" is evaluated in.
pub const REFERENCE_TIMEZONE: Tz = chrono_tz::Asia::Tokyo;

/// Earliest accepted birth year.  Dates before this are rejected by the
/// interaction layer rather than silently producing six-digit day counts.
pub const MIN_BIRTH_YEAR: i32 = 1900;

/// Current date in the reference timezone (JST).
pub fn today_jst() -> NaiveDate {
    Utc::now().with_timezone(&REFERENCE_TIMEZONE).date_naive()
}

/// Whole days elapsed between `birth` and `today`.
///
/// Contract: `birth ≤ today` (the caller validates beforehand), so the result
/// is non-negative.  A birth date of yesterday yields `1`.
pub fn days_lived_on(today: NaiveDate, birth: NaiveDate) -> i64 {
    (today - birth).num_days()
}

/// Whole days elapsed between `birth` and today in JST.
pub fn days_lived(birth: NaiveDate) -> i64 {
    days_lived_on(today_jst(), birth)
}

/// Age in completed years on `today`.
///
/// `today.year - birth.year`, minus one when today's `(month, day)` tuple is
/// lexicographically less than the birth date's — i.e. the anniversary has
/// not yet occurred this year.
pub fn age_years_on(today: NaiveDate, birth: NaiveDate) -> i32 {
    let mut age = today.year() - birth.year();
    if (today.month(), today.day()) < (birth.month(), birth.day()) {
        age -= 1;
    }
    age
}

/// Age in completed years as of today in JST.
pub fn age_years(birth: NaiveDate) -> i32 {
    age_years_on(today_jst(), birth)
}

/// Whether `today` is the anniversary of `birth` — `(month, day)` equality
/// with the year ignored.
///
/// Leap-day convention: a **Feb 29** birth date is observed on **Mar 1** in
/// common years.  The anniversary marks a full year elapsed, and in a common
/// year that point is reached only once Feb 28 has fully passed.  (In leap
/// years Feb 29 matches exactly as usual.)
pub fn is_anniversary_on(today: NaiveDate, birth: NaiveDate) -> bool {
    let (bm, bd) = (birth.month(), birth.day());
    if (bm, bd) == (2, 29) && !is_leap_year(today.year()) {
        return (today.month(), today.day()) == (3, 1);
    }
    (today.month(), today.day()) == (bm, bd)
}

/// Whether today in JST is the anniversary of `birth`.
pub fn is_anniversary_today(birth: NaiveDate) -> bool {
    is_anniversary_on(today_jst(), birth)
}

fn is_leap_year(year: i32) -> bool {
    NaiveDate::from_ymd_opt(year, 2, 29).is_some()
}

/// Everything the rest of the program needs to know about one accepted birth
/// date, computed in a single pass.
///
/// `age_years` is only present on the anniversary — on ordinary days the tool
/// shows the day count alone, so the age is never computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LifeFacts {
    pub days_lived: i64,
    pub is_anniversary: bool,
    pub age_years: Option<i32>,
}

impl LifeFacts {
    /// Derive all facts for `birth` as seen from `today`.
    pub fn on(today: NaiveDate, birth: NaiveDate) -> Self {
        let is_anniversary = is_anniversary_on(today, birth);
        Self {
            days_lived: days_lived_on(today, birth),
            is_anniversary,
            age_years: is_anniversary.then(|| age_years_on(today, birth)),
        }
    }

    /// Derive all facts for `birth` as of today in JST.
    pub fn today(birth: NaiveDate) -> Self {
        Self::on(today_jst(), birth)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn days_lived_counts_exact_calendar_days() {
        let today = d(2024, 3, 15);
        // 24 * 365 plus the six leap days 2004, 2008, …, 2024.
        assert_eq!(days_lived_on(today, d(2000, 3, 15)), 8766);
        assert_eq!(days_lived_on(today, d(2024, 3, 14)), 1);
        assert_eq!(days_lived_on(today, today), 0);
    }

    #[test]
    fn age_on_the_anniversary_is_the_full_year_count() {
        let today = d(2024, 3, 15);
        assert_eq!(age_years_on(today, d(2000, 3, 15)), 24);
    }

    #[test]
    fn age_decrements_when_the_anniversary_is_still_ahead() {
        let today = d(2024, 3, 15);
        assert_eq!(age_years_on(today, d(2000, 3, 16)), 23);
        // Anniversary already passed this year.
        assert_eq!(age_years_on(today, d(2000, 3, 14)), 24);
    }

    #[test]
    fn anniversary_matches_month_and_day_ignoring_year() {
        let today = d(2024, 3, 15);
        assert!(is_anniversary_on(today, d(2000, 3, 15)));
        assert!(is_anniversary_on(today, d(1956, 3, 15)));
        assert!(!is_anniversary_on(today, d(2000, 3, 16)));
        assert!(!is_anniversary_on(today, d(2000, 4, 15)));
    }

    #[test]
    fn leap_day_birth_is_observed_on_march_first_in_common_years() {
        let birth = d(2000, 2, 29);
        assert!(is_anniversary_on(d(2023, 3, 1), birth));
        assert!(!is_anniversary_on(d(2023, 2, 28), birth));
        // Leap year: the exact date matches, Mar 1 does not.
        assert!(is_anniversary_on(d(2024, 2, 29), birth));
        assert!(!is_anniversary_on(d(2024, 3, 1), birth));
    }

    #[test]
    fn facts_include_age_only_on_the_anniversary() {
        let today = d(2024, 3, 15);

        let on_day = LifeFacts::on(today, d(2000, 3, 15));
        assert_eq!(on_day.days_lived, 8766);
        assert!(on_day.is_anniversary);
        assert_eq!(on_day.age_years, Some(24));

        let off_day = LifeFacts::on(today, d(2000, 3, 16));
        assert!(!off_day.is_anniversary);
        assert_eq!(off_day.age_years, None);
    }

    #[test]
    fn leap_day_age_increments_by_the_observed_anniversary() {
        let birth = d(2000, 2, 29);
        let facts = LifeFacts::on(d(2023, 3, 1), birth);
        assert!(facts.is_anniversary);
        assert_eq!(facts.age_years, Some(23));
    }
}
