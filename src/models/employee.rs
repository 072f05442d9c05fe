//! Employee model and related types.
//!
//! This module defines the [`Employee`] compensation record, the
//! [`PaymentType`] enum and the [`Compensation`] view the engine matches on.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// The largest pay amount, rate or advance accepted from a caller.
pub const MAX_AMOUNT: Decimal = dec!(1000000000000);

/// How an employee's `amount` is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentType {
    /// `amount` is paid per hour worked.
    Hourly,
    /// `amount` is paid once per logged day.
    Daily,
    /// `amount` is paid per completed task.
    PerTask,
    /// Any payment type this engine does not recognise. Contributes zero pay.
    #[serde(other)]
    Unknown,
}

/// The payment scheme of an employee with the fields each scheme needs.
///
/// Derived from an [`Employee`] via [`Employee::compensation`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Compensation {
    /// Paid by the hour; may be entitled to the weekly holiday allowance.
    Hourly {
        /// Current hourly rate.
        rate: Decimal,
        /// Whether the weekly holiday allowance applies.
        holiday_allowance: bool,
    },
    /// Paid a flat amount per logged day.
    Daily {
        /// Current day rate.
        rate: Decimal,
    },
    /// Paid per task.
    PerTask {
        /// Current rate per task.
        rate: Decimal,
    },
    /// Unknown payment type.
    Unrecognised,
}

/// A cash advance granted to an employee on a given date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Advance {
    /// Unique identifier for the advance.
    pub id: String,
    /// Amount paid out in advance.
    pub amount: Decimal,
    /// The calendar date the advance was granted.
    pub date: NaiveDate,
    /// Optional free-text note.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memo: Option<String>,
    /// Creation time in epoch milliseconds.
    #[serde(default)]
    pub created_at: i64,
}

/// The configured pay day of an employee.
///
/// Stored on the record as a raw number where `99` means "last day of the
/// month".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PayDay {
    /// A fixed day of the month (1..=31), clamped to the month's last day.
    DayOfMonth(u32),
    /// The last day of every month.
    EndOfMonth,
}

impl PayDay {
    /// The raw value that encodes [`PayDay::EndOfMonth`].
    pub const END_OF_MONTH: u32 = 99;

    /// Parses a raw stored pay day. Returns `None` for values outside
    /// `1..=31` other than the end-of-month sentinel.
    ///
    /// ```
    /// use payroll_engine::models::PayDay;
    ///
    /// assert_eq!(PayDay::from_raw(25), Some(PayDay::DayOfMonth(25)));
    /// assert_eq!(PayDay::from_raw(99), Some(PayDay::EndOfMonth));
    /// assert_eq!(PayDay::from_raw(0), None);
    /// ```
    pub fn from_raw(raw: u32) -> Option<Self> {
        match raw {
            Self::END_OF_MONTH => Some(PayDay::EndOfMonth),
            1..=31 => Some(PayDay::DayOfMonth(raw)),
            _ => None,
        }
    }
}

fn default_active() -> bool {
    true
}

/// An employee's compensation configuration.
///
/// `amount`, `tax_rate` and `apply_holiday_allowance` may change over time.
/// Work logs carry a [`RateSnapshot`](super::RateSnapshot) so those edits do
/// not rewrite historical pay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    /// Unique identifier for the employee.
    pub id: String,
    /// The business this employee belongs to. Missing on legacy records.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub business_id: Option<String>,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// How `amount` is interpreted.
    pub payment_type: PaymentType,
    /// Current rate: per hour, per day or per task.
    pub amount: Decimal,
    /// Current withholding percentage (0 to 100).
    #[serde(default)]
    pub tax_rate: Decimal,
    /// Whether the weekly holiday allowance applies (hourly only).
    #[serde(default)]
    pub apply_holiday_allowance: bool,
    /// Bank name as entered by the user.
    #[serde(default)]
    pub bank_name: String,
    /// Account number for transfers.
    #[serde(default)]
    pub account_number: String,
    /// Whether the employee is shown in active listings.
    #[serde(default = "default_active")]
    pub active: bool,
    /// Soft-retired employees keep their history.
    #[serde(default)]
    pub is_retired: bool,
    /// Raw pay day (1..=31, or 99 for the last day of the month).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pay_day: Option<u32>,
    /// Cash advances, in the order they were granted.
    #[serde(default)]
    pub advances: Vec<Advance>,
    /// Creation time in epoch milliseconds.
    #[serde(default)]
    pub created_at: i64,
}

impl Employee {
    /// Creates an active employee with no tax, no allowance and no advances.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        payment_type: PaymentType,
        amount: Decimal,
    ) -> Self {
        Self {
            id: id.into(),
            business_id: None,
            name: name.into(),
            payment_type,
            amount,
            tax_rate: Decimal::ZERO,
            apply_holiday_allowance: false,
            bank_name: String::new(),
            account_number: String::new(),
            active: true,
            is_retired: false,
            pay_day: None,
            advances: Vec::new(),
            created_at: 0,
        }
    }

    /// Returns the payment scheme with the fields that scheme uses.
    ///
    /// # Examples
    ///
    /// ```
    /// use payroll_engine::models::{Compensation, Employee, PaymentType};
    /// use rust_decimal::Decimal;
    ///
    /// let mut employee = Employee::new("emp_001", "Kim", PaymentType::Hourly, Decimal::from(10_030));
    /// employee.apply_holiday_allowance = true;
    ///
    /// assert_eq!(
    ///     employee.compensation(),
    ///     Compensation::Hourly { rate: Decimal::from(10_030), holiday_allowance: true }
    /// );
    /// ```
    pub fn compensation(&self) -> Compensation {
        match self.payment_type {
            PaymentType::Hourly => Compensation::Hourly {
                rate: self.amount,
                holiday_allowance: self.apply_holiday_allowance,
            },
            PaymentType::Daily => Compensation::Daily { rate: self.amount },
            PaymentType::PerTask => Compensation::PerTask { rate: self.amount },
            PaymentType::Unknown => Compensation::Unrecognised,
        }
    }

    /// Returns true if the employee is active and not retired.
    pub fn is_current(&self) -> bool {
        self.active && !self.is_retired
    }

    /// Returns the parsed pay day, if one is configured and valid.
    pub fn pay_day(&self) -> Option<PayDay> {
        self.pay_day.and_then(PayDay::from_raw)
    }

    /// Checks the record before it is accepted from a caller.
    ///
    /// The pay engine never calls this and never clamps its inputs.
    pub fn validate(&self) -> EngineResult<()> {
        if self.id.trim().is_empty() {
            return Err(invalid("id", "must not be empty"));
        }
        if self.amount < Decimal::ZERO {
            return Err(invalid("amount", "must not be negative"));
        }
        if self.amount > MAX_AMOUNT {
            return Err(invalid("amount", &format!("must not exceed {}", MAX_AMOUNT)));
        }
        if self.tax_rate < Decimal::ZERO || self.tax_rate > Decimal::ONE_HUNDRED {
            return Err(invalid("taxRate", "must be between 0 and 100"));
        }
        if let Some(raw) = self.pay_day {
            if PayDay::from_raw(raw).is_none() {
                return Err(invalid("payDay", "must be 1-31 or 99"));
            }
        }
        if let Some(advance) = self.advances.iter().find(|a| a.amount < Decimal::ZERO) {
            return Err(invalid(
                "advances",
                &format!("advance '{}' has a negative amount", advance.id),
            ));
        }
        if let Some(advance) = self.advances.iter().find(|a| a.amount > MAX_AMOUNT) {
            return Err(invalid(
                "advances",
                &format!("advance '{}' exceeds {}", advance.id, MAX_AMOUNT),
            ));
        }
        Ok(())
    }
}

fn invalid(field: &str, message: &str) -> EngineError {
    EngineError::InvalidEmployee {
        field: field.to_string(),
        message: message.to_string(),
    }
}
