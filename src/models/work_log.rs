//! Work log model and related types.
//!
//! A [`WorkLog`] records one work session of one employee on one calendar
//! day. Several logs per employee per day are allowed and are summed.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

use super::{Employee, MAX_AMOUNT, PaymentType, new_record_id};

/// The largest hours or count a single log may carry.
pub const MAX_QUANTITY: Decimal = dec!(1000000);

/// A point-in-time copy of the employee's configuration taken when the
/// log was created.
///
/// When present, the snapshot takes precedence over the employee's current
/// configuration for that log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateSnapshot {
    /// The rate in force when the log was written.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hourly_rate: Option<Decimal>,
    /// The withholding percentage in force when the log was written.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tax_rate: Option<Decimal>,
    /// The employee's name when the log was written.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employee_name: Option<String>,
}

impl RateSnapshot {
    /// Captures the employee's current rate, tax rate and name.
    pub fn capture(employee: &Employee) -> Self {
        Self {
            hourly_rate: Some(employee.amount),
            tax_rate: Some(employee.tax_rate),
            employee_name: Some(employee.name.clone()),
        }
    }
}

/// One work session of an employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkLog {
    /// Unique identifier for the log.
    pub id: String,
    /// The business the log was recorded under. Missing on legacy records.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub business_id: Option<String>,
    /// The employee who worked.
    pub employee_id: String,
    /// The calendar day worked.
    pub date: NaiveDate,
    /// Hours worked (hourly employees).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hours: Option<Decimal>,
    /// Number of days or tasks (daily and per-task employees).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<Decimal>,
    /// Optional free-text note.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memo: Option<String>,
    /// Rate configuration captured at creation time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snapshot: Option<RateSnapshot>,
    /// Hours in this log are paid at the night-shift multiplier.
    #[serde(default)]
    pub is_night_shift: bool,
    /// The log belongs to a paid month and must not be edited.
    #[serde(default)]
    pub is_locked: bool,
    /// Groups logs created by one repeat schedule.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repeat_group_id: Option<String>,
    /// Creation time in epoch milliseconds.
    #[serde(default)]
    pub created_at: i64,
}

/// The user-entered part of a new work log.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewWorkLog {
    /// The employee who worked.
    pub employee_id: String,
    /// Hours for hourly employees, otherwise a day/task count.
    #[serde(default)]
    pub quantity: Option<Decimal>,
    /// Optional free-text note.
    #[serde(default)]
    pub memo: Option<String>,
    /// Whether the session was a night shift.
    #[serde(default)]
    pub is_night_shift: bool,
    /// The business to record the log under.
    #[serde(default)]
    pub business_id: Option<String>,
}

impl NewWorkLog {
    /// Rejects drafts without an employee or with a negative quantity.
    ///
    /// `log_id` names the log being written in the error.
    pub fn validate(&self, log_id: &str) -> EngineResult<()> {
        if self.employee_id.trim().is_empty() {
            return Err(EngineError::InvalidWorkLog {
                log_id: log_id.to_string(),
                message: "employeeId must not be empty".to_string(),
            });
        }
        if self.quantity.is_some_and(|q| q < Decimal::ZERO) {
            return Err(EngineError::InvalidWorkLog {
                log_id: log_id.to_string(),
                message: "quantity must not be negative".to_string(),
            });
        }
        if self.quantity.is_some_and(|q| q > MAX_QUANTITY) {
            return Err(EngineError::InvalidWorkLog {
                log_id: log_id.to_string(),
                message: format!("quantity must not exceed {}", MAX_QUANTITY),
            });
        }
        Ok(())
    }
}

impl WorkLog {
    /// Rejects logs whose quantities or snapshot rates are too large to
    /// calculate with.
    ///
    /// Negative values pass; the engine reports them as warnings.
    pub fn check_bounds(&self) -> EngineResult<()> {
        let out_of_bounds = |message: String| EngineError::InvalidWorkLog {
            log_id: self.id.clone(),
            message,
        };
        for (field, value) in [("hours", self.hours), ("count", self.count)] {
            if value.is_some_and(|v| v.abs() > MAX_QUANTITY) {
                return Err(out_of_bounds(format!("{} must not exceed {}", field, MAX_QUANTITY)));
            }
        }
        if let Some(snapshot) = &self.snapshot {
            if snapshot.hourly_rate.is_some_and(|rate| rate.abs() > MAX_AMOUNT) {
                return Err(out_of_bounds(format!(
                    "snapshot hourlyRate must not exceed {}",
                    MAX_AMOUNT
                )));
            }
            if snapshot.tax_rate.is_some_and(|rate| rate.abs() > Decimal::ONE_HUNDRED) {
                return Err(out_of_bounds("snapshot taxRate must not exceed 100".to_string()));
            }
        }
        Ok(())
    }

    /// Creates a log for `date` from a draft, capturing the employee's
    /// current configuration as the snapshot.
    ///
    /// For hourly employees the quantity becomes `hours` (default 0);
    /// otherwise it becomes `count` (default 1).
    ///
    /// # Examples
    ///
    /// ```
    /// use payroll_engine::models::{Employee, NewWorkLog, PaymentType, WorkLog};
    /// use chrono::NaiveDate;
    /// use rust_decimal::Decimal;
    ///
    /// let employee = Employee::new("emp_001", "Kim", PaymentType::Hourly, Decimal::from(10_000));
    /// let draft = NewWorkLog {
    ///     employee_id: "emp_001".to_string(),
    ///     quantity: Some(Decimal::from(6)),
    ///     ..Default::default()
    /// };
    ///
    /// let log = WorkLog::record(&draft, &employee, NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(), 0);
    /// assert_eq!(log.hours, Some(Decimal::from(6)));
    /// assert_eq!(log.snapshot.unwrap().hourly_rate, Some(Decimal::from(10_000)));
    /// ```
    pub fn record(
        draft: &NewWorkLog,
        employee: &Employee,
        date: NaiveDate,
        created_at: i64,
    ) -> Self {
        let (hours, count) = match employee.payment_type {
            PaymentType::Hourly => (Some(draft.quantity.unwrap_or(Decimal::ZERO)), None),
            _ => (None, Some(draft.quantity.unwrap_or(Decimal::ONE))),
        };

        Self {
            id: new_record_id(),
            business_id: draft.business_id.clone(),
            employee_id: draft.employee_id.clone(),
            date,
            hours,
            count,
            memo: draft.memo.clone(),
            snapshot: Some(RateSnapshot::capture(employee)),
            is_night_shift: draft.is_night_shift,
            is_locked: false,
            repeat_group_id: None,
            created_at,
        }
    }

    /// Hours worked, treating a missing value as zero.
    pub fn hours_or_zero(&self) -> Decimal {
        self.hours.unwrap_or(Decimal::ZERO)
    }

    /// Day/task count, treating a missing value as one.
    pub fn count_or_one(&self) -> Decimal {
        self.count.unwrap_or(Decimal::ONE)
    }

    /// The snapshot rate, if the log carries one.
    pub fn snapshot_rate(&self) -> Option<Decimal> {
        self.snapshot.as_ref().and_then(|s| s.hourly_rate)
    }

    /// The snapshot tax rate, if the log carries one.
    pub fn snapshot_tax_rate(&self) -> Option<Decimal> {
        self.snapshot.as_ref().and_then(|s| s.tax_rate)
    }
}
