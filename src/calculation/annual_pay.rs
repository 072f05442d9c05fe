//! Annual pay rollup.

use tracing::debug;

use crate::config::PayPolicy;
use crate::models::{AuditStep, AuditWarning, Employee, PayDetail, PayMonth, WorkLog};

use super::monthly_pay::calculate_pay_with_policy;

/// The result of an annual rollup.
#[derive(Debug, Clone)]
pub struct AnnualPayResult {
    /// The summed breakdown for the year.
    pub detail: PayDetail,
    /// The twelve monthly breakdowns the year was summed from.
    pub months: Vec<PayDetail>,
    /// One summary step per month.
    pub audit_steps: Vec<AuditStep>,
    /// Distinct warnings raised by any month.
    pub warnings: Vec<AuditWarning>,
}

/// Calculates an employee's pay for a whole year under the statutory policy.
///
/// See [`calculate_annual_pay_with_policy`].
pub fn calculate_annual_pay(employee: &Employee, logs: &[WorkLog], year: i32) -> PayDetail {
    calculate_annual_pay_with_policy(employee, logs, year, &PayPolicy::default()).detail
}

/// Calculates each month of `year` and sums the scalar fields.
///
/// The yearly view has no weekly details and does not deduct advances:
/// `total_advances` is zero and `net_pay` equals `final_pay`.
/// `applied_tax_rate` is left at zero because each month resolves its own.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::calculate_annual_pay;
/// use payroll_engine::models::{Employee, NewWorkLog, PaymentType, WorkLog};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let employee = Employee::new("emp_001", "Kim", PaymentType::Daily, Decimal::from(80_000));
/// let draft = NewWorkLog { employee_id: "emp_001".to_string(), ..Default::default() };
/// let logs: Vec<WorkLog> = (1..=12)
///     .map(|month| WorkLog::record(&draft, &employee, NaiveDate::from_ymd_opt(2026, month, 10).unwrap(), 0))
///     .collect();
///
/// let detail = calculate_annual_pay(&employee, &logs, 2026);
/// assert_eq!(detail.original_pay, Decimal::from(960_000));
/// assert!(detail.weekly_details.is_empty());
/// ```
pub fn calculate_annual_pay_with_policy(
    employee: &Employee,
    logs: &[WorkLog],
    year: i32,
    policy: &PayPolicy,
) -> AnnualPayResult {
    let mut detail = PayDetail::default();
    let mut months = Vec::with_capacity(12);
    let mut audit_steps = Vec::with_capacity(12);
    let mut warnings: Vec<AuditWarning> = Vec::new();

    for month in (1..=12).filter_map(|month| PayMonth::new(year, month)) {
        let monthly = calculate_pay_with_policy(employee, logs, month.first_day(), policy);
        let month_detail = monthly.detail;

        detail.original_pay += month_detail.original_pay;
        detail.base_pay += month_detail.base_pay;
        detail.night_pay += month_detail.night_pay;
        detail.total_work_hours += month_detail.total_work_hours;
        detail.total_night_work_hours += month_detail.total_night_work_hours;
        detail.holiday_allowance += month_detail.holiday_allowance;
        detail.tax_amount += month_detail.tax_amount;
        detail.final_pay += month_detail.final_pay;

        audit_steps.push(AuditStep {
            step_number: month.month(),
            rule_id: "monthly_rollup".to_string(),
            rule_name: "Monthly Rollup".to_string(),
            legal_ref: None,
            input: serde_json::json!({
                "year": year,
                "month": month.month(),
                "steps": monthly.audit_steps.len(),
            }),
            output: serde_json::json!({
                "original_pay": month_detail.original_pay.normalize().to_string(),
                "holiday_allowance": month_detail.holiday_allowance.normalize().to_string(),
                "tax_amount": month_detail.tax_amount.normalize().to_string(),
                "final_pay": month_detail.final_pay.normalize().to_string(),
            }),
            reasoning: format!(
                "{}-{:02}: final pay {}",
                year,
                month.month(),
                month_detail.final_pay.normalize()
            ),
        });

        for warning in monthly.warnings {
            if !warnings.contains(&warning) {
                warnings.push(warning);
            }
        }

        months.push(month_detail);
    }

    detail.total_before_tax = detail.original_pay + detail.holiday_allowance;
    detail.net_pay = detail.final_pay;

    debug!(
        employee_id = %employee.id,
        year,
        final_pay = %detail.final_pay,
        "Calculated annual pay"
    );

    AnnualPayResult {
        detail,
        months,
        audit_steps,
        warnings,
    }
}
