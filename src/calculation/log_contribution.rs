//! Per-log pay contribution.
//!
//! Each work log contributes to gross pay according to the employee's
//! payment type, at the log's resolved rate.

use rust_decimal::Decimal;

use crate::config::PayPolicy;
use crate::models::{AuditStep, Compensation, Employee, WorkLog};

use super::rate_resolution::resolved_rate;

/// Statutory reference for the night work premium.
pub const NIGHT_WORK_REF: &str = "LSA 56(3)";

/// The amounts one work log contributes to the month.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogContribution {
    /// The log this contribution is for.
    pub log_id: String,
    /// The resolved rate used for the log.
    pub rate: Decimal,
    /// Hours counted toward the month (hourly employees only).
    pub hours: Decimal,
    /// Hours counted as night hours (hourly night-shift logs only).
    pub night_hours: Decimal,
    /// The 1.0× portion of the contribution.
    pub base_amount: Decimal,
    /// The night premium portion of the contribution.
    pub night_amount: Decimal,
}

impl LogContribution {
    /// The full contribution to original pay.
    pub fn total(&self) -> Decimal {
        self.base_amount + self.night_amount
    }
}

/// The result of calculating a log's contribution, including the audit step.
#[derive(Debug, Clone)]
pub struct LogContributionResult {
    /// The amounts contributed.
    pub contribution: LogContribution,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Calculates what one work log contributes to gross pay.
///
/// | Payment type | Contribution |
/// |---|---|
/// | Hourly | `hours × rate`, plus `hours × rate × (multiplier - 1)` on night shifts |
/// | Daily | `rate`, whatever `hours` or `count` say |
/// | Per task | `count × rate`, count defaulting to 1 |
/// | Unknown | nothing |
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::calculate_log_contribution;
/// use payroll_engine::config::PayPolicy;
/// use payroll_engine::models::{Employee, NewWorkLog, PaymentType, WorkLog};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let employee = Employee::new("emp_001", "Kim", PaymentType::Hourly, Decimal::from(10_000));
/// let draft = NewWorkLog {
///     employee_id: "emp_001".to_string(),
///     quantity: Some(Decimal::from(4)),
///     is_night_shift: true,
///     ..Default::default()
/// };
/// let log = WorkLog::record(&draft, &employee, NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(), 0);
///
/// let result = calculate_log_contribution(&log, &employee, &PayPolicy::default(), 1);
/// assert_eq!(result.contribution.base_amount, Decimal::from(40_000));
/// assert_eq!(result.contribution.night_amount, Decimal::from(20_000));
/// assert_eq!(result.contribution.total(), Decimal::from(60_000));
/// ```
pub fn calculate_log_contribution(
    log: &WorkLog,
    employee: &Employee,
    policy: &PayPolicy,
    step_number: u32,
) -> LogContributionResult {
    let rate = resolved_rate(log, employee);
    let rate_source = if log.snapshot_rate().is_some() {
        "snapshot"
    } else {
        "employee"
    };

    let mut contribution = LogContribution {
        log_id: log.id.clone(),
        rate,
        hours: Decimal::ZERO,
        night_hours: Decimal::ZERO,
        base_amount: Decimal::ZERO,
        night_amount: Decimal::ZERO,
    };

    let (rule_id, rule_name, reasoning) = match employee.compensation() {
        Compensation::Hourly { .. } => {
            let hours = log.hours_or_zero();
            contribution.hours = hours;
            contribution.base_amount = hours * rate;

            if log.is_night_shift {
                contribution.night_hours = hours;
                contribution.night_amount = hours * rate * policy.night_premium();
                (
                    "hourly_night_pay",
                    "Hourly Night Shift Pay",
                    format!(
                        "{}h × {} × {} = {}",
                        hours.normalize(),
                        rate.normalize(),
                        policy.night_shift_multiplier.normalize(),
                        contribution.total().normalize()
                    ),
                )
            } else {
                (
                    "hourly_pay",
                    "Hourly Pay",
                    format!(
                        "{}h × {} = {}",
                        hours.normalize(),
                        rate.normalize(),
                        contribution.base_amount.normalize()
                    ),
                )
            }
        }
        Compensation::Daily { .. } => {
            contribution.base_amount = rate;
            (
                "daily_pay",
                "Daily Pay",
                format!("Flat day rate {}", rate.normalize()),
            )
        }
        Compensation::PerTask { .. } => {
            let count = log.count_or_one();
            contribution.base_amount = count * rate;
            (
                "per_task_pay",
                "Per Task Pay",
                format!(
                    "{} tasks × {} = {}",
                    count.normalize(),
                    rate.normalize(),
                    contribution.base_amount.normalize()
                ),
            )
        }
        Compensation::Unrecognised => (
            "unrecognised_payment_type",
            "Unrecognised Payment Type",
            "Payment type is not recognised - log contributes nothing".to_string(),
        ),
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: rule_id.to_string(),
        rule_name: rule_name.to_string(),
        legal_ref: (contribution.night_hours != Decimal::ZERO).then(|| NIGHT_WORK_REF.to_string()),
        input: serde_json::json!({
            "log_id": log.id,
            "date": log.date.to_string(),
            "hours": log.hours.map(|h| h.normalize().to_string()),
            "count": log.count.map(|c| c.normalize().to_string()),
            "is_night_shift": log.is_night_shift,
            "rate": rate.normalize().to_string(),
            "rate_source": rate_source,
        }),
        output: serde_json::json!({
            "base_amount": contribution.base_amount.normalize().to_string(),
            "night_amount": contribution.night_amount.normalize().to_string(),
            "total": contribution.total().normalize().to_string(),
        }),
        reasoning,
    };

    LogContributionResult {
        contribution,
        audit_step,
    }
}
