//! Monthly pay calculation.
//!
//! Combines per-log contributions, the weekly holiday allowance,
//! withholding and advances into a [`PayDetail`] for one calendar month.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::debug;

use crate::config::PayPolicy;
use crate::models::{
    AuditStep, AuditWarning, Compensation, Employee, PayDetail, PayMonth, WorkLog,
};

use super::advances::calculate_advance_deduction;
use super::log_contribution::calculate_log_contribution;
use super::rate_resolution::resolve_tax_rate;
use super::weekly_allowance::calculate_weekly_allowance;
use super::withholding::calculate_withholding;

/// The result of a monthly pay calculation with its audit trail.
#[derive(Debug, Clone)]
pub struct MonthlyPayResult {
    /// The pay breakdown.
    pub detail: PayDetail,
    /// The audit steps, in the order the rules were applied.
    pub audit_steps: Vec<AuditStep>,
    /// Warnings raised while calculating.
    pub warnings: Vec<AuditWarning>,
}

/// Calculates an employee's pay for the month containing `reference_date`
/// under the statutory policy.
///
/// `logs` may contain logs of any employee and any date; only the
/// employee's logs in the month contribute to gross pay, while the weekly
/// holiday allowance also looks at logs in neighbouring months.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::calculate_pay;
/// use payroll_engine::models::{Employee, NewWorkLog, PaymentType, WorkLog};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let employee = Employee::new("emp_001", "Kim", PaymentType::Daily, Decimal::from(80_000));
/// let draft = NewWorkLog { employee_id: "emp_001".to_string(), ..Default::default() };
/// let logs: Vec<WorkLog> = (2..=4)
///     .map(|day| WorkLog::record(&draft, &employee, NaiveDate::from_ymd_opt(2026, 3, day).unwrap(), 0))
///     .collect();
///
/// let detail = calculate_pay(&employee, &logs, NaiveDate::from_ymd_opt(2026, 3, 15).unwrap());
/// assert_eq!(detail.original_pay, Decimal::from(240_000));
/// assert_eq!(detail.net_pay, Decimal::from(240_000));
/// ```
pub fn calculate_pay(employee: &Employee, logs: &[WorkLog], reference_date: NaiveDate) -> PayDetail {
    calculate_pay_with_policy(employee, logs, reference_date, &PayPolicy::default()).detail
}

/// Calculates an employee's pay for the month containing `reference_date`,
/// recording every rule application.
///
/// The calculation never fails and never mutates its inputs. Negative
/// inputs are not clamped; they are reported as `NEGATIVE_INPUT` warnings.
pub fn calculate_pay_with_policy(
    employee: &Employee,
    logs: &[WorkLog],
    reference_date: NaiveDate,
    policy: &PayPolicy,
) -> MonthlyPayResult {
    let month = PayMonth::containing(reference_date);
    let month_logs: Vec<&WorkLog> = logs
        .iter()
        .filter(|log| log.employee_id == employee.id && month.contains(log.date))
        .collect();

    let mut audit_steps = Vec::new();
    let mut warnings = check_inputs(employee, &month_logs);
    let mut current_step = 1;

    let mut detail = PayDetail::default();

    // Step 1: per-log contributions
    for log in &month_logs {
        let result = calculate_log_contribution(log, employee, policy, current_step);
        let contribution = result.contribution;
        detail.base_pay += contribution.base_amount;
        detail.night_pay += contribution.night_amount;
        detail.total_work_hours += contribution.hours;
        detail.total_night_work_hours += contribution.night_hours;
        audit_steps.push(result.audit_step);
        current_step += 1;
    }
    detail.original_pay = detail.base_pay + detail.night_pay;

    // Step 2: weekly holiday allowance
    let allowance = calculate_weekly_allowance(employee, logs, month, policy, current_step);
    current_step += allowance.audit_steps.len() as u32;
    detail.holiday_allowance = allowance.holiday_allowance;
    detail.weekly_details = allowance.weekly_details;
    audit_steps.extend(allowance.audit_steps);
    warnings.extend(allowance.warnings);

    detail.total_before_tax = detail.original_pay + detail.holiday_allowance;

    // Step 3: tax rate and withholding
    let tax_rate = resolve_tax_rate(month_logs.iter().copied(), employee, current_step);
    audit_steps.push(tax_rate.audit_step);
    current_step += 1;

    let withholding =
        calculate_withholding(detail.total_before_tax, tax_rate.tax_rate, policy, current_step);
    audit_steps.push(withholding.audit_step);
    current_step += 1;

    detail.applied_tax_rate = withholding.tax_rate;
    detail.tax_amount = withholding.tax_amount;
    detail.final_pay = detail.total_before_tax - detail.tax_amount;

    // Step 4: advances
    let advances = calculate_advance_deduction(employee, month, current_step);
    audit_steps.push(advances.audit_step);

    detail.total_advances = advances.total_advances;
    detail.net_pay = detail.final_pay - detail.total_advances;

    debug!(
        employee_id = %employee.id,
        year = month.year(),
        month = month.month(),
        logs = month_logs.len(),
        original_pay = %detail.original_pay,
        holiday_allowance = %detail.holiday_allowance,
        tax_amount = %detail.tax_amount,
        net_pay = %detail.net_pay,
        "Calculated monthly pay"
    );

    MonthlyPayResult {
        detail,
        audit_steps,
        warnings,
    }
}

/// Flags inputs the engine computes with but callers should not send.
fn check_inputs(employee: &Employee, month_logs: &[&WorkLog]) -> Vec<AuditWarning> {
    let mut warnings = Vec::new();

    if employee.compensation() == Compensation::Unrecognised {
        warnings.push(AuditWarning::new(
            "UNKNOWN_PAYMENT_TYPE",
            format!(
                "Employee {} has an unrecognised payment type; logs contribute nothing",
                employee.id
            ),
            "high",
        ));
    }

    if employee.amount < Decimal::ZERO {
        warnings.push(AuditWarning::new(
            "NEGATIVE_INPUT",
            format!("Employee {} has a negative rate {}", employee.id, employee.amount),
            "high",
        ));
    }

    for log in month_logs {
        let negative = log.hours.is_some_and(|h| h < Decimal::ZERO)
            || log.count.is_some_and(|c| c < Decimal::ZERO)
            || log.snapshot_rate().is_some_and(|r| r < Decimal::ZERO);
        if negative {
            warnings.push(AuditWarning::new(
                "NEGATIVE_INPUT",
                format!("Log {} on {} has a negative hours, count or rate", log.id, log.date),
                "high",
            ));
        }
    }

    warnings
}
