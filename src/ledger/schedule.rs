//! Repeat schedules.
//!
//! A repeat schedule expands one work-log draft into a log for every chosen
//! weekday over a number of months. The generated logs share a repeat group
//! so they can later be deleted together.

use std::collections::HashSet;

use chrono::{Datelike, Months, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{EngineError, EngineResult};
use crate::models::{Employee, NewWorkLog, WorkLog, new_record_id};

/// Longest schedule, in months.
pub const MAX_SCHEDULE_MONTHS: u32 = 6;

/// A weekly repeat rule for new work logs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepeatSchedule {
    /// First day of the schedule.
    pub start: NaiveDate,
    /// Days of the week to create logs on.
    pub weekdays: Vec<Weekday>,
    /// Length of the schedule in months (1 to 6).
    pub duration_months: u32,
}

/// Logs produced by a repeat schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepeatOutcome {
    /// The shared repeat group of the new logs.
    pub group_id: String,
    /// The new logs, in date order.
    pub logs: Vec<WorkLog>,
    /// Scheduled dates skipped because the employee already had a log.
    pub skipped: Vec<NaiveDate>,
}

impl RepeatSchedule {
    fn validate(&self) -> EngineResult<()> {
        if !(1..=MAX_SCHEDULE_MONTHS).contains(&self.duration_months) {
            return Err(EngineError::InvalidSchedule {
                message: format!(
                    "durationMonths must be between 1 and {}, got {}",
                    MAX_SCHEDULE_MONTHS, self.duration_months
                ),
            });
        }
        if self.weekdays.is_empty() {
            return Err(EngineError::InvalidSchedule {
                message: "at least one weekday is required".to_string(),
            });
        }
        Ok(())
    }

    /// Last day of the schedule: the start date moved forward by the
    /// duration, clamped to the end of that month.
    pub fn end(&self) -> EngineResult<NaiveDate> {
        self.validate()?;
        self.start
            .checked_add_months(Months::new(self.duration_months))
            .ok_or_else(|| EngineError::InvalidSchedule {
                message: format!("schedule starting {} runs past the calendar", self.start),
            })
    }

    /// Every scheduled date from `start` to [`end`](Self::end) inclusive
    /// that falls on one of the weekdays.
    ///
    /// # Examples
    ///
    /// ```
    /// use payroll_engine::ledger::RepeatSchedule;
    /// use chrono::{NaiveDate, Weekday};
    ///
    /// let schedule = RepeatSchedule {
    ///     start: NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
    ///     weekdays: vec![Weekday::Sun],
    ///     duration_months: 1,
    /// };
    ///
    /// let dates = schedule.dates().unwrap();
    /// assert_eq!(dates.first(), NaiveDate::from_ymd_opt(2026, 3, 1).as_ref());
    /// assert_eq!(dates.last(), NaiveDate::from_ymd_opt(2026, 3, 29).as_ref());
    /// ```
    pub fn dates(&self) -> EngineResult<Vec<NaiveDate>> {
        let end = self.end()?;
        Ok(self
            .start
            .iter_days()
            .take_while(|date| *date <= end)
            .filter(|date| self.weekdays.contains(&date.weekday()))
            .collect())
    }

    /// Creates the scheduled logs for `employee` from `draft`.
    ///
    /// Dates on which the employee already has a log in `existing` are
    /// skipped. Every generated log captures the employee's current
    /// configuration and carries the same `repeat_...` group ID.
    pub fn generate(
        &self,
        draft: &NewWorkLog,
        employee: &Employee,
        existing: &[WorkLog],
        created_at: i64,
    ) -> EngineResult<RepeatOutcome> {
        draft.validate("new")?;
        let dates = self.dates()?;

        let taken: HashSet<NaiveDate> = existing
            .iter()
            .filter(|log| log.employee_id == draft.employee_id)
            .map(|log| log.date)
            .collect();

        let group_id = format!("repeat_{}", new_record_id());
        let (skipped, free): (Vec<NaiveDate>, Vec<NaiveDate>) =
            dates.into_iter().partition(|date| taken.contains(date));

        let logs: Vec<WorkLog> = free
            .into_iter()
            .map(|date| {
                let mut log = WorkLog::record(draft, employee, date, created_at);
                log.repeat_group_id = Some(group_id.clone());
                log
            })
            .collect();

        info!(
            employee_id = %draft.employee_id,
            group_id = %group_id,
            created = logs.len(),
            skipped = skipped.len(),
            "Generated repeat schedule"
        );

        Ok(RepeatOutcome {
            group_id,
            logs,
            skipped,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PaymentType;
    use rust_decimal_macros::dec;

    fn make_date(date_str: &str) -> NaiveDate {
        NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
    }

    fn schedule(start: &str, weekdays: Vec<Weekday>, duration_months: u32) -> RepeatSchedule {
        RepeatSchedule {
            start: make_date(start),
            weekdays,
            duration_months,
        }
    }

    fn draft() -> NewWorkLog {
        NewWorkLog {
            employee_id: "emp_001".to_string(),
            quantity: Some(dec!(5)),
            ..Default::default()
        }
    }

    #[test]
    fn test_dates_include_end_day() {
        // 2026-03-02 is a Monday; one month later is Thursday 2026-04-02
        let dates = schedule("2026-03-02", vec![Weekday::Mon, Weekday::Thu], 1)
            .dates()
            .unwrap();

        assert_eq!(dates.first(), Some(&make_date("2026-03-02")));
        assert_eq!(dates.last(), Some(&make_date("2026-04-02")));
        assert_eq!(dates.len(), 10);
        assert!(
            dates
                .iter()
                .all(|d| matches!(d.weekday(), Weekday::Mon | Weekday::Thu))
        );
    }

    #[test]
    fn test_end_clamps_to_month_end() {
        let end = schedule("2026-01-31", vec![Weekday::Sat], 1).end().unwrap();
        assert_eq!(end, make_date("2026-02-28"));
    }

    #[test]
    fn test_duration_limits() {
        assert!(matches!(
            schedule("2026-03-02", vec![Weekday::Mon], 0).dates(),
            Err(EngineError::InvalidSchedule { .. })
        ));
        assert!(matches!(
            schedule("2026-03-02", vec![Weekday::Mon], 7).dates(),
            Err(EngineError::InvalidSchedule { .. })
        ));
        assert!(schedule("2026-03-02", vec![Weekday::Mon], 6).dates().is_ok());
    }

    #[test]
    fn test_weekdays_required() {
        let result = schedule("2026-03-02", vec![], 1).dates();
        assert!(matches!(result, Err(EngineError::InvalidSchedule { .. })));
    }

    #[test]
    fn test_generate_skips_existing_dates_and_groups_logs() {
        let employee = Employee::new("emp_001", "Kim", PaymentType::Hourly, dec!(10030));
        let existing = vec![
            WorkLog::record(&draft(), &employee, make_date("2026-03-09"), 0),
            WorkLog::record(
                &NewWorkLog {
                    employee_id: "emp_002".to_string(),
                    ..Default::default()
                },
                &employee,
                make_date("2026-03-16"),
                0,
            ),
        ];

        let outcome = schedule("2026-03-02", vec![Weekday::Mon], 1)
            .generate(&draft(), &employee, &existing, 99)
            .unwrap();

        assert_eq!(outcome.skipped, vec![make_date("2026-03-09")]);
        let dates: Vec<NaiveDate> = outcome.logs.iter().map(|l| l.date).collect();
        assert_eq!(
            dates,
            vec![
                make_date("2026-03-02"),
                make_date("2026-03-16"),
                make_date("2026-03-23"),
                make_date("2026-03-30"),
            ]
        );
        assert!(outcome.group_id.starts_with("repeat_"));
        assert!(outcome.logs.iter().all(|l| {
            l.repeat_group_id.as_deref() == Some(outcome.group_id.as_str())
                && l.hours == Some(dec!(5))
                && l.snapshot_rate() == Some(dec!(10030))
                && l.created_at == 99
        }));
    }

    #[test]
    fn test_generate_rejects_invalid_draft() {
        let employee = Employee::new("emp_001", "Kim", PaymentType::Hourly, dec!(10030));
        let mut bad = draft();
        bad.quantity = Some(dec!(-2));

        let result = schedule("2026-03-02", vec![Weekday::Mon], 1).generate(&bad, &employee, &[], 0);
        assert!(matches!(result, Err(EngineError::InvalidWorkLog { .. })));
    }

    #[test]
    fn test_deserialize_schedule() {
        let json = r#"{"start": "2026-03-02", "weekdays": ["Mon", "Fri"], "durationMonths": 2}"#;
        let parsed: RepeatSchedule = serde_json::from_str(json).unwrap();

        assert_eq!(parsed.weekdays, vec![Weekday::Mon, Weekday::Fri]);
        assert_eq!(parsed.duration_months, 2);
    }
}
