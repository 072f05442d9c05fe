//! Weekly holiday allowance (주휴수당) calculation.
//!
//! Hourly employees who opt in earn paid weekly rest when they work at
//! least the threshold hours in a Monday-start week. A week that straddles
//! two months belongs to the month containing its Sunday.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::config::PayPolicy;
use crate::models::{
    AuditStep, AuditWarning, Compensation, Employee, PayMonth, Week, WeeklyDetail, WorkLog,
};

/// Statutory reference for the weekly paid holiday.
pub const WEEKLY_HOLIDAY_REF: &str = "LSA 55";

/// The result of calculating a month's weekly holiday allowance.
#[derive(Debug, Clone, Default)]
pub struct WeeklyAllowanceResult {
    /// Total allowance attributed to the month.
    pub holiday_allowance: Decimal,
    /// Weeks owned by the month in which work occurred, chronological.
    pub weekly_details: Vec<WeeklyDetail>,
    /// The audit steps recording this calculation.
    pub audit_steps: Vec<AuditStep>,
    /// Warnings raised while calculating.
    pub warnings: Vec<AuditWarning>,
}

/// Returns the allowance for a week with `weekly_hours` at `rate`.
///
/// Below the threshold the allowance is zero; otherwise it is
/// `min(hours, cap) / cap × paid_hours × rate`, kept exact.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::weekly_allowance_amount;
/// use payroll_engine::config::PayPolicy;
/// use rust_decimal::Decimal;
///
/// let policy = PayPolicy::default();
/// let rate = Decimal::from(10_000);
///
/// assert_eq!(weekly_allowance_amount(Decimal::from(15), rate, &policy), Decimal::from(30_000));
/// assert_eq!(weekly_allowance_amount(Decimal::new(149, 1), rate, &policy), Decimal::ZERO);
/// assert_eq!(weekly_allowance_amount(Decimal::from(50), rate, &policy), Decimal::from(80_000));
/// ```
pub fn weekly_allowance_amount(weekly_hours: Decimal, rate: Decimal, policy: &PayPolicy) -> Decimal {
    let allowance = &policy.weekly_allowance;
    if weekly_hours < allowance.min_weekly_hours || allowance.max_weekly_hours <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    let counted = weekly_hours.min(allowance.max_weekly_hours);
    counted * allowance.paid_hours * rate / allowance.max_weekly_hours
}

/// Sums the hours of all of the employee's logs within `week`, whatever
/// month they fall in.
fn week_hours(employee: &Employee, logs: &[WorkLog], week: &Week) -> Decimal {
    logs.iter()
        .filter(|log| log.employee_id == employee.id && week.contains(log.date))
        .map(WorkLog::hours_or_zero)
        .sum()
}

/// Calculates the weekly holiday allowance attributed to `month`.
///
/// Only hourly employees with the allowance enabled earn it. Every
/// Monday-start week covering the month is scanned across its full span,
/// so hours logged in the neighbouring month count toward the threshold.
/// Only weeks whose Sunday falls in `month` are attributed. The allowance
/// uses the employee's current rate, never a log snapshot.
///
/// `logs` is the unfiltered collection; logs of other employees are ignored.
pub fn calculate_weekly_allowance(
    employee: &Employee,
    logs: &[WorkLog],
    month: PayMonth,
    policy: &PayPolicy,
    start_step_number: u32,
) -> WeeklyAllowanceResult {
    let rate = match employee.compensation() {
        Compensation::Hourly {
            rate,
            holiday_allowance: true,
        } => rate,
        _ => {
            let audit_step = AuditStep {
                step_number: start_step_number,
                rule_id: "weekly_holiday_allowance".to_string(),
                rule_name: "Weekly Holiday Allowance".to_string(),
                legal_ref: Some(WEEKLY_HOLIDAY_REF.to_string()),
                input: serde_json::json!({
                    "employee_id": employee.id,
                    "payment_type": employee.payment_type,
                    "apply_holiday_allowance": employee.apply_holiday_allowance,
                }),
                output: serde_json::json!({
                    "eligible": false,
                    "holiday_allowance": "0",
                }),
                reasoning: "Allowance applies only to hourly employees with it enabled".to_string(),
            };
            return WeeklyAllowanceResult {
                audit_steps: vec![audit_step],
                ..Default::default()
            };
        }
    };

    let mut result = WeeklyAllowanceResult::default();
    let mut current_step = start_step_number;

    for week in month.weeks() {
        let work_hours = week_hours(employee, logs, &week);
        let allowance = weekly_allowance_amount(work_hours, rate, policy);
        let has_allowance = work_hours >= policy.weekly_allowance.min_weekly_hours;

        if !month.owns(&week) {
            continue;
        }

        result.holiday_allowance += allowance;

        if work_hours <= Decimal::ZERO {
            continue;
        }

        if has_allowance {
            let differing_snapshot = logs.iter().any(|log| {
                log.employee_id == employee.id
                    && week.contains(log.date)
                    && log.snapshot_rate().is_some_and(|snapshot| snapshot != rate)
            });
            if differing_snapshot {
                result.warnings.push(AuditWarning::new(
                    "ALLOWANCE_USES_CURRENT_RATE",
                    format!(
                        "Week {} allowance uses the current rate {} although logs in the week carry a different snapshot rate",
                        week.label(),
                        rate.normalize()
                    ),
                    "medium",
                ));
            }
        }

        let reasoning = if has_allowance {
            format!(
                "{}h >= {}h: min({}, {}) / {} × {} × {} = {}",
                work_hours.normalize(),
                policy.weekly_allowance.min_weekly_hours.normalize(),
                work_hours.normalize(),
                policy.weekly_allowance.max_weekly_hours.normalize(),
                policy.weekly_allowance.max_weekly_hours.normalize(),
                policy.weekly_allowance.paid_hours.normalize(),
                rate.normalize(),
                allowance.normalize()
            )
        } else {
            format!(
                "{}h is below the {}h weekly threshold",
                work_hours.normalize(),
                policy.weekly_allowance.min_weekly_hours.normalize()
            )
        };

        result.audit_steps.push(AuditStep {
            step_number: current_step,
            rule_id: "weekly_holiday_allowance".to_string(),
            rule_name: "Weekly Holiday Allowance".to_string(),
            legal_ref: Some(WEEKLY_HOLIDAY_REF.to_string()),
            input: serde_json::json!({
                "week": week.label(),
                "week_start": week.monday.to_string(),
                "week_end": week.sunday.to_string(),
                "work_hours": work_hours.normalize().to_string(),
                "rate": rate.normalize().to_string(),
            }),
            output: serde_json::json!({
                "eligible": has_allowance,
                "allowance": allowance.normalize().to_string(),
            }),
            reasoning,
        });
        current_step += 1;

        result.weekly_details.push(WeeklyDetail {
            week_range: week.label(),
            week_start: week.monday,
            week_end: week.sunday,
            work_hours,
            has_holiday_allowance: has_allowance,
            allowance_amount: allowance,
        });
    }

    if result.audit_steps.is_empty() {
        result.audit_steps.push(AuditStep {
            step_number: start_step_number,
            rule_id: "weekly_holiday_allowance".to_string(),
            rule_name: "Weekly Holiday Allowance".to_string(),
            legal_ref: Some(WEEKLY_HOLIDAY_REF.to_string()),
            input: serde_json::json!({
                "employee_id": employee.id,
                "month": format!("{}-{:02}", month.year(), month.month()),
            }),
            output: serde_json::json!({
                "eligible": true,
                "holiday_allowance": result.holiday_allowance.normalize().to_string(),
            }),
            reasoning: "No hours logged in any week owned by the month".to_string(),
        });
    }

    result
}

/// Checks whether the hourly employee's logs in the week containing `date`
/// reach the weekly allowance threshold.
///
/// Used to shade calendar days; it does not consider whether the
/// allowance is enabled for the employee.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::week_meets_allowance_threshold;
/// use payroll_engine::config::PayPolicy;
/// use payroll_engine::models::{Employee, NewWorkLog, PaymentType, WorkLog};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let employee = Employee::new("emp_001", "Kim", PaymentType::Hourly, Decimal::from(10_000));
/// let draft = NewWorkLog {
///     employee_id: "emp_001".to_string(),
///     quantity: Some(Decimal::from(8)),
///     ..Default::default()
/// };
/// let monday = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
/// let logs = vec![
///     WorkLog::record(&draft, &employee, monday, 0),
///     WorkLog::record(&draft, &employee, monday.succ_opt().unwrap(), 0),
/// ];
///
/// let sunday = NaiveDate::from_ymd_opt(2026, 3, 8).unwrap();
/// assert!(week_meets_allowance_threshold(&employee, &logs, sunday, &PayPolicy::default()));
/// ```
pub fn week_meets_allowance_threshold(
    employee: &Employee,
    logs: &[WorkLog],
    date: NaiveDate,
    policy: &PayPolicy,
) -> bool {
    if !matches!(employee.compensation(), Compensation::Hourly { .. }) {
        return false;
    }
    Week::containing(date).is_some_and(|week| {
        week_hours(employee, logs, &week) >= policy.weekly_allowance.min_weekly_hours
    })
}
