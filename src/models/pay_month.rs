//! Pay month, week and period models.
//!
//! This module contains the [`PayMonth`] computation window, the
//! Monday-start [`Week`] used for the weekly holiday allowance, and the
//! [`PayPeriod`] label attached to calculation results.

use chrono::{Datelike, Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};

/// A Monday-to-Sunday calendar week.
///
/// # Example
///
/// ```
/// use payroll_engine::models::Week;
/// use chrono::NaiveDate;
///
/// // 2026-01-28 is a Wednesday
/// let week = Week::containing(NaiveDate::from_ymd_opt(2026, 1, 28).unwrap()).unwrap();
/// assert_eq!(week.monday, NaiveDate::from_ymd_opt(2026, 1, 26).unwrap());
/// assert_eq!(week.sunday, NaiveDate::from_ymd_opt(2026, 2, 1).unwrap());
/// assert_eq!(week.label(), "1.26~2.1");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Week {
    /// The first day of the week.
    pub monday: NaiveDate,
    /// The last day of the week.
    pub sunday: NaiveDate,
}

impl Week {
    /// Returns the week containing `date`, or `None` if the week runs past
    /// the representable calendar.
    pub fn containing(date: NaiveDate) -> Option<Self> {
        let offset = u64::from(date.weekday().num_days_from_monday());
        let monday = date.checked_sub_days(Days::new(offset))?;
        let sunday = monday.checked_add_days(Days::new(6))?;
        Some(Self { monday, sunday })
    }

    /// Checks whether `date` falls within the week (inclusive).
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.monday && date <= self.sunday
    }

    /// Returns the week after this one.
    pub fn next(&self) -> Option<Self> {
        Week::containing(self.sunday.succ_opt()?)
    }

    /// A short `M.d~M.d` label for display.
    pub fn label(&self) -> String {
        format!(
            "{}.{}~{}.{}",
            self.monday.month(),
            self.monday.day(),
            self.sunday.month(),
            self.sunday.day()
        )
    }
}

/// A calendar month used as the computation window for monthly pay.
///
/// # Example
///
/// ```
/// use payroll_engine::models::PayMonth;
/// use chrono::NaiveDate;
///
/// let month = PayMonth::containing(NaiveDate::from_ymd_opt(2026, 2, 14).unwrap());
/// assert_eq!(month.first_day(), NaiveDate::from_ymd_opt(2026, 2, 1).unwrap());
/// assert_eq!(month.last_day(), NaiveDate::from_ymd_opt(2026, 2, 28).unwrap());
/// assert!(month.contains(NaiveDate::from_ymd_opt(2026, 2, 28).unwrap()));
/// assert!(!month.contains(NaiveDate::from_ymd_opt(2026, 3, 1).unwrap()));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PayMonth {
    first_day: NaiveDate,
    last_day: NaiveDate,
}

impl PayMonth {
    /// Returns the month containing `date`.
    pub fn containing(date: NaiveDate) -> Self {
        let first_day = date.with_day(1).unwrap_or(date);
        // Only the final representable month has no successor
        let last_day = first_day
            .checked_add_months(Months::new(1))
            .and_then(|next| next.pred_opt())
            .unwrap_or(NaiveDate::MAX);
        Self {
            first_day,
            last_day,
        }
    }

    /// Returns the given month, or `None` if the year or month is out of range.
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(Self::containing)
    }

    /// The first day of the month.
    pub fn first_day(&self) -> NaiveDate {
        self.first_day
    }

    /// The last day of the month.
    pub fn last_day(&self) -> NaiveDate {
        self.last_day
    }

    /// The calendar year.
    pub fn year(&self) -> i32 {
        self.first_day.year()
    }

    /// The calendar month (1..=12).
    pub fn month(&self) -> u32 {
        self.first_day.month()
    }

    /// Checks if a date falls within this month (inclusive).
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.first_day && date <= self.last_day
    }

    /// The number of days in the month.
    pub fn len_days(&self) -> u32 {
        self.last_day.day()
    }

    /// The month after this one, or `None` at the end of the calendar.
    pub fn next(&self) -> Option<Self> {
        self.last_day.succ_opt().map(Self::containing)
    }

    /// Whether every week covering the month lies within the representable
    /// calendar. Months failing this have no [`weeks`](Self::weeks).
    ///
    /// ```
    /// use payroll_engine::models::PayMonth;
    /// use chrono::NaiveDate;
    ///
    /// assert!(PayMonth::new(2026, 3).unwrap().has_full_weeks());
    /// assert!(!PayMonth::containing(NaiveDate::MAX).has_full_weeks());
    /// ```
    pub fn has_full_weeks(&self) -> bool {
        Week::containing(self.first_day).is_some() && Week::containing(self.last_day).is_some()
    }

    /// The Monday-start weeks covering the whole month, from the Monday on
    /// or before the 1st through the Sunday on or after the last day.
    ///
    /// Empty when the covering weeks do not fit the calendar.
    ///
    /// ```
    /// use payroll_engine::models::PayMonth;
    /// use chrono::NaiveDate;
    ///
    /// // March 2026 starts on a Sunday and ends on a Tuesday.
    /// let weeks = PayMonth::new(2026, 3).unwrap().weeks();
    /// assert_eq!(weeks.len(), 6);
    /// assert_eq!(weeks[0].monday, NaiveDate::from_ymd_opt(2026, 2, 23).unwrap());
    /// assert_eq!(weeks[5].sunday, NaiveDate::from_ymd_opt(2026, 4, 5).unwrap());
    /// ```
    pub fn weeks(&self) -> Vec<Week> {
        let (Some(first), Some(last)) = (
            Week::containing(self.first_day),
            Week::containing(self.last_day),
        ) else {
            return Vec::new();
        };
        std::iter::successors(Some(first), |week| {
            if week.monday < last.monday {
                week.next()
            } else {
                None
            }
        })
        .collect()
    }

    /// A week belongs to the month its Sunday falls in.
    pub fn owns(&self, week: &Week) -> bool {
        self.contains(week.sunday)
    }
}

/// The period a calculation result covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum PayPeriod {
    /// A single calendar month.
    Month {
        /// The calendar year.
        year: i32,
        /// The calendar month (1..=12).
        month: u32,
    },
    /// A whole calendar year, aggregated month by month.
    Year {
        /// The calendar year.
        year: i32,
    },
}

impl From<PayMonth> for PayPeriod {
    fn from(month: PayMonth) -> Self {
        PayPeriod::Month {
            year: month.year(),
            month: month.month(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_date(date_str: &str) -> NaiveDate {
        NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_len_days() {
        let len = |year, month| PayMonth::new(year, month).unwrap().len_days();
        assert_eq!(len(2026, 1), 31);
        assert_eq!(len(2026, 2), 28);
        assert_eq!(len(2028, 2), 29);
        assert_eq!(len(1900, 2), 28);
        assert_eq!(len(2000, 2), 29);
        assert_eq!(len(2026, 4), 30);
        assert_eq!(len(2026, 12), 31);
    }

    #[test]
    fn test_containing_leap_february() {
        let month = PayMonth::containing(make_date("2028-02-10"));
        assert_eq!(month.last_day(), make_date("2028-02-29"));
    }

    #[test]
    fn test_new_rejects_invalid_month() {
        assert!(PayMonth::new(2026, 13).is_none());
        assert!(PayMonth::new(2026, 0).is_none());
        assert!(PayMonth::new(2026, 12).is_some());
    }

    #[test]
    fn test_next_rolls_over_year() {
        let december = PayMonth::new(2026, 12).unwrap();
        let january = december.next().unwrap();
        assert_eq!(january.year(), 2027);
        assert_eq!(january.month(), 1);
    }

    #[test]
    fn test_week_containing_sunday() {
        let week = Week::containing(make_date("2026-03-01")).unwrap();
        assert_eq!(week.monday, make_date("2026-02-23"));
        assert_eq!(week.sunday, make_date("2026-03-01"));
    }

    #[test]
    fn test_week_contains_bounds() {
        let week = Week::containing(make_date("2026-03-04")).unwrap();
        assert!(week.contains(make_date("2026-03-02")));
        assert!(week.contains(make_date("2026-03-08")));
        assert!(!week.contains(make_date("2026-03-01")));
        assert!(!week.contains(make_date("2026-03-09")));
    }

    #[test]
    fn test_weeks_for_month_starting_on_monday() {
        // June 2026 starts on a Monday and ends on a Tuesday.
        let weeks = PayMonth::new(2026, 6).unwrap().weeks();
        assert_eq!(weeks.len(), 5);
        assert_eq!(weeks[0].monday, make_date("2026-06-01"));
        assert_eq!(weeks[4].sunday, make_date("2026-07-05"));
    }

    #[test]
    fn test_weeks_are_contiguous() {
        let weeks = PayMonth::new(2026, 1).unwrap().weeks();
        for pair in weeks.windows(2) {
            assert_eq!(pair[0].sunday.succ_opt().unwrap(), pair[1].monday);
        }
    }

    #[test]
    fn test_owns_week_by_sunday() {
        let january = PayMonth::new(2026, 1).unwrap();
        let straddling = Week::containing(make_date("2026-01-28")).unwrap();
        assert!(!january.owns(&straddling));
        assert!(january.next().unwrap().owns(&straddling));
    }

    #[test]
    fn test_last_representable_month() {
        let month = PayMonth::containing(NaiveDate::MAX);
        assert_eq!(month.last_day(), NaiveDate::MAX);
        assert!(month.next().is_none());
        assert!(!month.has_full_weeks());
        assert!(month.weeks().is_empty());
    }

    #[test]
    fn test_first_representable_month() {
        let month = PayMonth::containing(NaiveDate::MIN);
        assert_eq!(month.first_day(), NaiveDate::MIN);
        assert_eq!(month.weeks().is_empty(), !month.has_full_weeks());
    }

    #[test]
    fn test_week_at_calendar_edges() {
        assert!(Week::containing(NaiveDate::MAX).is_none());

        let last_full = Week::containing(make_date("2026-03-04")).unwrap();
        assert_eq!(last_full.next().unwrap().monday, make_date("2026-03-09"));
    }

    #[test]
    fn test_pay_period_serialization() {
        let period: PayPeriod = PayMonth::new(2026, 3).unwrap().into();
        let json = serde_json::to_string(&period).unwrap();
        assert_eq!(json, r#"{"kind":"month","year":2026,"month":3}"#);

        let year = serde_json::to_string(&PayPeriod::Year { year: 2026 }).unwrap();
        assert_eq!(year, r#"{"kind":"year","year":2026}"#);
    }
}
