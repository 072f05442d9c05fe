//! Configuration types for pay calculation.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::models::PayMonth;

/// Weekly holiday allowance parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyAllowancePolicy {
    /// Hours a week must reach before the allowance is owed.
    pub min_weekly_hours: Decimal,
    /// Weekly hours above this cap do not increase the allowance.
    pub max_weekly_hours: Decimal,
    /// Paid hours granted for a week at the cap.
    pub paid_hours: Decimal,
}

impl Default for WeeklyAllowancePolicy {
    fn default() -> Self {
        Self {
            min_weekly_hours: dec!(15),
            max_weekly_hours: dec!(40),
            paid_hours: dec!(8),
        }
    }
}

/// The rates and thresholds the pay engine applies.
///
/// The default is the statutory policy: 1.5× night shifts, a 15 hour
/// weekly threshold capped at 40 hours for 8 paid hours, and withholding
/// truncated to multiples of 10.
///
/// # Example
///
/// ```
/// use payroll_engine::config::PayPolicy;
/// use rust_decimal::Decimal;
///
/// let policy = PayPolicy::default();
/// assert_eq!(policy.night_shift_multiplier, Decimal::new(15, 1));
/// assert_eq!(policy.tax_truncation_unit, Decimal::from(10));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayPolicy {
    /// Multiplier applied to night-shift hours.
    pub night_shift_multiplier: Decimal,
    /// Weekly holiday allowance parameters.
    pub weekly_allowance: WeeklyAllowancePolicy,
    /// Withholding is floored to a multiple of this amount.
    pub tax_truncation_unit: Decimal,
}

impl Default for PayPolicy {
    fn default() -> Self {
        Self {
            night_shift_multiplier: dec!(1.5),
            weekly_allowance: WeeklyAllowancePolicy::default(),
            tax_truncation_unit: dec!(10),
        }
    }
}

impl PayPolicy {
    /// The premium portion of the night multiplier (0.5 for 1.5×).
    pub fn night_premium(&self) -> Decimal {
        self.night_shift_multiplier - Decimal::ONE
    }
}

/// A public holiday.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicHoliday {
    /// The calendar date.
    pub date: NaiveDate,
    /// Display name.
    pub name: String,
}

/// One `holidays/<year>.yaml` file.
#[derive(Debug, Clone, Deserialize)]
pub struct HolidayYear {
    /// The year the file covers.
    pub year: i32,
    /// Holidays in that year.
    pub holidays: Vec<PublicHoliday>,
}

/// Date to holiday name lookup used for calendar display.
///
/// The pay engine never consults the calendar: hours logged on a holiday
/// are paid like any other hours.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HolidayCalendar {
    holidays: BTreeMap<NaiveDate, String>,
}

impl HolidayCalendar {
    /// Builds a calendar from loaded holiday files. Later entries for the
    /// same date replace earlier ones.
    pub fn new(years: Vec<HolidayYear>) -> Self {
        let holidays = years
            .into_iter()
            .flat_map(|year| year.holidays)
            .map(|holiday| (holiday.date, holiday.name))
            .collect();
        Self { holidays }
    }

    /// Returns the holiday name for `date`, if it is a holiday.
    ///
    /// # Example
    ///
    /// ```
    /// use payroll_engine::config::{HolidayCalendar, HolidayYear, PublicHoliday};
    /// use chrono::NaiveDate;
    ///
    /// let new_year = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
    /// let calendar = HolidayCalendar::new(vec![HolidayYear {
    ///     year: 2026,
    ///     holidays: vec![PublicHoliday { date: new_year, name: "신정".to_string() }],
    /// }]);
    ///
    /// assert_eq!(calendar.name_for(new_year), Some("신정"));
    /// assert_eq!(calendar.name_for(new_year.succ_opt().unwrap()), None);
    /// ```
    pub fn name_for(&self, date: NaiveDate) -> Option<&str> {
        self.holidays.get(&date).map(String::as_str)
    }

    /// Checks whether `date` is a public holiday.
    pub fn is_holiday(&self, date: NaiveDate) -> bool {
        self.holidays.contains_key(&date)
    }

    /// Holidays within `month`, in date order.
    pub fn holidays_in(&self, month: PayMonth) -> Vec<PublicHoliday> {
        self.holidays
            .range(month.first_day()..=month.last_day())
            .map(|(date, name)| PublicHoliday {
                date: *date,
                name: name.clone(),
            })
            .collect()
    }

    /// Number of holidays loaded.
    pub fn len(&self) -> usize {
        self.holidays.len()
    }

    /// Returns true if no holidays are loaded.
    pub fn is_empty(&self) -> bool {
        self.holidays.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_date(date_str: &str) -> NaiveDate {
        NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
    }

    fn holiday(date: &str, name: &str) -> PublicHoliday {
        PublicHoliday {
            date: make_date(date),
            name: name.to_string(),
        }
    }

    #[test]
    fn test_policy_yaml_parsing() {
        let yaml = r#"
night_shift_multiplier: 1.5
weekly_allowance:
  min_weekly_hours: 15
  max_weekly_hours: 40
  paid_hours: 8
tax_truncation_unit: 10
"#;
        let policy: PayPolicy = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(policy, PayPolicy::default());
        assert_eq!(policy.night_premium(), dec!(0.5));
    }

    #[test]
    fn test_holiday_year_yaml_parsing() {
        let yaml = r#"
year: 2026
holidays:
  - date: 2026-01-01
    name: 신정
  - date: 2026-03-01
    name: 삼일절
"#;
        let year: HolidayYear = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(year.year, 2026);
        assert_eq!(year.holidays.len(), 2);
        assert_eq!(year.holidays[1], holiday("2026-03-01", "삼일절"));
    }

    #[test]
    fn test_calendar_merges_years() {
        let calendar = HolidayCalendar::new(vec![
            HolidayYear {
                year: 2025,
                holidays: vec![holiday("2025-12-25", "성탄절")],
            },
            HolidayYear {
                year: 2026,
                holidays: vec![holiday("2026-01-01", "신정")],
            },
        ]);

        assert_eq!(calendar.len(), 2);
        assert!(calendar.is_holiday(make_date("2025-12-25")));
        assert!(calendar.is_holiday(make_date("2026-01-01")));
        assert!(!calendar.is_holiday(make_date("2026-01-02")));
    }

    #[test]
    fn test_holidays_in_month_are_sorted_and_bounded() {
        let calendar = HolidayCalendar::new(vec![HolidayYear {
            year: 2026,
            holidays: vec![
                holiday("2026-03-02", "대체공휴일"),
                holiday("2026-03-01", "삼일절"),
                holiday("2026-02-18", "설날"),
                holiday("2026-05-05", "어린이날"),
            ],
        }]);

        let march = calendar.holidays_in(PayMonth::new(2026, 3).unwrap());
        assert_eq!(
            march,
            vec![holiday("2026-03-01", "삼일절"), holiday("2026-03-02", "대체공휴일")]
        );
    }

    #[test]
    fn test_empty_calendar() {
        let calendar = HolidayCalendar::default();
        assert!(calendar.is_empty());
        assert_eq!(calendar.name_for(make_date("2026-01-01")), None);
    }
}
