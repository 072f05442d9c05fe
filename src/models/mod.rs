//! Core data models for the payroll engine.
//!
//! This module contains all the domain models used throughout the engine.

mod calculation_result;
mod employee;
mod pay_detail;
mod pay_month;
mod work_log;

use uuid::Uuid;

pub use calculation_result::{AuditStep, AuditTrace, AuditWarning, PayCalculation};
pub use employee::{Advance, Compensation, Employee, MAX_AMOUNT, PayDay, PaymentType};
pub use pay_detail::{PayDetail, WeeklyDetail};
pub use pay_month::{PayMonth, PayPeriod, Week};
pub use work_log::{MAX_QUANTITY, NewWorkLog, RateSnapshot, WorkLog};

/// Generates an identifier for a new employee, work log or repeat group.
pub fn new_record_id() -> String {
    Uuid::new_v4().to_string()
}
