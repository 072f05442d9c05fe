//! Rate resolution functionality.
//!
//! A work log's snapshot pins the rate and tax rate that were in force when
//! the log was written. These functions decide, for a single log or a whole
//! month, which value applies.

use rust_decimal::Decimal;

use crate::models::{AuditStep, Employee, WorkLog};

/// Returns the rate that applies to `log`.
///
/// The snapshot's rate takes precedence; the employee's current `amount`
/// is used only when the log has no snapshot rate.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::resolved_rate;
/// use payroll_engine::models::{Employee, PaymentType, RateSnapshot, WorkLog};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let employee = Employee::new("emp_001", "Kim", PaymentType::Hourly, Decimal::from(20_000));
/// let log = WorkLog {
///     id: "log_001".to_string(),
///     business_id: None,
///     employee_id: "emp_001".to_string(),
///     date: NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(),
///     hours: Some(Decimal::from(4)),
///     count: None,
///     memo: None,
///     snapshot: Some(RateSnapshot {
///         hourly_rate: Some(Decimal::from(10_000)),
///         tax_rate: None,
///         employee_name: None,
///     }),
///     is_night_shift: false,
///     is_locked: false,
///     repeat_group_id: None,
///     created_at: 0,
/// };
///
/// assert_eq!(resolved_rate(&log, &employee), Decimal::from(10_000));
/// ```
pub fn resolved_rate(log: &WorkLog, employee: &Employee) -> Decimal {
    log.snapshot_rate().unwrap_or(employee.amount)
}

/// The result of resolving the month's tax rate, including the audit step.
#[derive(Debug, Clone)]
pub struct TaxRateResolution {
    /// The withholding percentage for the month.
    pub tax_rate: Decimal,
    /// The log whose snapshot supplied the rate, if any.
    pub source_log_id: Option<String>,
    /// The audit step recording this resolution.
    pub audit_step: AuditStep,
}

/// Resolves the withholding percentage for a month.
///
/// The chronologically last log of the month pins the rate when its
/// snapshot carries one. Logs on the same date keep their input order, so
/// the last of them wins. Otherwise the employee's current `tax_rate` applies.
pub fn resolve_tax_rate<'a, I>(month_logs: I, employee: &Employee, step_number: u32) -> TaxRateResolution
where
    I: IntoIterator<Item = &'a WorkLog>,
{
    let last_log = month_logs.into_iter().max_by_key(|log| log.date);
    let pinned = last_log.and_then(|log| log.snapshot_tax_rate().map(|rate| (log, rate)));

    let (tax_rate, source_log_id, reasoning) = match (last_log, pinned) {
        (_, Some((log, rate))) => (
            rate,
            Some(log.id.clone()),
            format!(
                "Last log of the month ({}, {}) carries snapshot tax rate {}%",
                log.id,
                log.date,
                rate.normalize()
            ),
        ),
        (Some(log), None) => (
            employee.tax_rate,
            None,
            format!(
                "Last log of the month ({}) has no snapshot tax rate - using current rate {}%",
                log.id,
                employee.tax_rate.normalize()
            ),
        ),
        (None, None) => (
            employee.tax_rate,
            None,
            format!(
                "No logs in the month - using current rate {}%",
                employee.tax_rate.normalize()
            ),
        ),
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "tax_rate_resolution".to_string(),
        rule_name: "Tax Rate Resolution".to_string(),
        legal_ref: None,
        input: serde_json::json!({
            "employee_id": employee.id,
            "current_tax_rate": employee.tax_rate.normalize().to_string(),
            "last_log_id": last_log.map(|log| log.id.clone()),
        }),
        output: serde_json::json!({
            "tax_rate": tax_rate.normalize().to_string(),
            "source": if source_log_id.is_some() { "snapshot" } else { "employee" },
        }),
        reasoning,
    };

    TaxRateResolution {
        tax_rate,
        source_log_id,
        audit_step,
    }
}

/// Returns the withholding percentage for a month of logs.
///
/// See [`resolve_tax_rate`] for the audited variant.
pub fn resolved_tax_rate<'a, I>(month_logs: I, employee: &Employee) -> Decimal
where
    I: IntoIterator<Item = &'a WorkLog>,
{
    resolve_tax_rate(month_logs, employee, 0).tax_rate
}
