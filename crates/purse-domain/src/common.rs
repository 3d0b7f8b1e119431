//! Shared traits, calendar windows, and enums for budgeting primitives.

use std::{fmt, str::FromStr};

use chrono::{DateTime, Datelike, Duration, Months, NaiveDate, NaiveTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Exposes a stable identifier for entities owned by a collection.
pub trait Identifiable {
    fn id(&self) -> Uuid;
}

/// Associates entities with the catalog category they reference.
pub trait BelongsToCategory {
    fn category_id(&self) -> &str;
}

/// Enumerates the supported budgeting cadences.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum BudgetPeriod {
    Weekly,
    #[default]
    Monthly,
}

impl BudgetPeriod {
    pub fn as_str(self) -> &'static str {
        match self {
            BudgetPeriod::Weekly => "weekly",
            BudgetPeriod::Monthly => "monthly",
        }
    }

    /// Returns the calendar window of this cadence that contains `reference`.
    ///
    /// Windows cut off by the edges of the representable range are clamped to
    /// `DateTime::<Utc>::MIN_UTC` and `DateTime::<Utc>::MAX_UTC`.
    pub fn range_containing(self, reference: DateTime<Utc>) -> PeriodRange {
        let date = reference.date_naive();
        let (first, next) = match self {
            BudgetPeriod::Weekly => {
                let offset = date.weekday().num_days_from_monday() as i64;
                (
                    date.checked_sub_signed(Duration::days(offset)),
                    date.checked_add_signed(Duration::days(7 - offset)),
                )
            }
            BudgetPeriod::Monthly => {
                let first = date.with_day(1);
                (first, first.and_then(|day| day.checked_add_months(Months::new(1))))
            }
        };
        PeriodRange {
            start: first.map_or(DateTime::<Utc>::MIN_UTC, start_of_day),
            end: next.map_or(DateTime::<Utc>::MAX_UTC, |day| {
                start_of_day(day) - Duration::milliseconds(1)
            }),
        }
    }
}

impl fmt::Display for BudgetPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BudgetPeriod {
    type Err = UnknownPeriod;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "weekly" => Ok(BudgetPeriod::Weekly),
            "monthly" => Ok(BudgetPeriod::Monthly),
            _ => Err(UnknownPeriod(value.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Raised when a period label matches none of the supported cadences.
pub struct UnknownPeriod(pub String);

impl fmt::Display for UnknownPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unsupported budget period `{}`", self.0)
    }
}

impl std::error::Error for UnknownPeriod {}

/// Inclusive instant range covering one budgeting window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl PeriodRange {
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        instant >= self.start && instant <= self.end
    }
}

/// Returns `true` when `instant` lies within the optional inclusive bounds.
pub fn within_bounds(
    instant: DateTime<Utc>,
    start: Option<DateTime<Utc>>,
    end: Option<DateTime<Utc>>,
) -> bool {
    start.map_or(true, |start| instant >= start) && end.map_or(true, |end| instant <= end)
}

fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
    Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
    }

    #[test]
    fn weekly_range_starts_on_monday() {
        // 2025-03-13 is a Thursday.
        let range = BudgetPeriod::Weekly.range_containing(at(2025, 3, 13, 15));
        assert_eq!(range.start, at(2025, 3, 10, 0));
        assert_eq!(range.end, at(2025, 3, 17, 0) - Duration::milliseconds(1));
    }

    #[test]
    fn weekly_range_on_sunday_stays_in_same_week() {
        let range = BudgetPeriod::Weekly.range_containing(at(2025, 3, 16, 23));
        assert_eq!(range.start, at(2025, 3, 10, 0));
        assert!(range.contains(at(2025, 3, 16, 23)));
        assert!(!range.contains(at(2025, 3, 17, 0)));
    }

    #[test]
    fn monthly_range_covers_leap_february() {
        let range = BudgetPeriod::Monthly.range_containing(at(2024, 2, 14, 9));
        assert_eq!(range.start, at(2024, 2, 1, 0));
        assert_eq!(range.end, at(2024, 3, 1, 0) - Duration::milliseconds(1));
    }

    #[test]
    fn monthly_range_rolls_over_december() {
        let range = BudgetPeriod::Monthly.range_containing(at(2025, 12, 31, 22));
        assert_eq!(range.start, at(2025, 12, 1, 0));
        assert_eq!(range.end, at(2026, 1, 1, 0) - Duration::milliseconds(1));
    }

    #[test]
    fn windows_at_the_end_of_time_clamp_instead_of_overflowing() {
        let last = DateTime::<Utc>::MAX_UTC;

        let monthly = BudgetPeriod::Monthly.range_containing(last);
        assert_eq!(monthly.end, last);
        assert_eq!(monthly.start.day(), 1);
        assert!(monthly.contains(last - Duration::hours(12)));

        let weekly = BudgetPeriod::Weekly.range_containing(last);
        assert_eq!(weekly.end, last);
        assert_eq!(weekly.start.weekday(), chrono::Weekday::Mon);
        assert!(weekly.contains(last));
    }

    #[test]
    fn windows_at_the_start_of_time_clamp_instead_of_overflowing() {
        let first = DateTime::<Utc>::MIN_UTC;

        let weekly = BudgetPeriod::Weekly.range_containing(first);
        assert!(weekly.start <= first);
        assert!(weekly.contains(first));

        let monthly = BudgetPeriod::Monthly.range_containing(first);
        assert!(monthly.contains(first));
    }

    #[test]
    fn parses_period_labels() {
        assert_eq!("weekly".parse::<BudgetPeriod>(), Ok(BudgetPeriod::Weekly));
        assert_eq!(" Monthly ".parse::<BudgetPeriod>(), Ok(BudgetPeriod::Monthly));
        assert_eq!(
            "yearly".parse::<BudgetPeriod>(),
            Err(UnknownPeriod("yearly".into()))
        );
    }

    #[test]
    fn open_bounds_match_everything() {
        let instant = at(1999, 1, 1, 0);
        assert!(within_bounds(instant, None, None));
        assert!(within_bounds(instant, None, Some(instant)));
        assert!(!within_bounds(instant, Some(at(2000, 1, 1, 0)), None));
    }
}
