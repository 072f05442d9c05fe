//! Calculation logic for the payroll engine.
//!
//! This module contains the pay calculation functions: rate and tax rate
//! resolution from log snapshots, per-log contributions with the night
//! premium, the weekly holiday allowance, withholding, advance deduction,
//! the monthly and annual pay views, and pay-day proximity classification.

mod advances;
mod annual_pay;
mod log_contribution;
mod monthly_pay;
mod pay_day;
mod rate_resolution;
mod weekly_allowance;
mod withholding;

pub use advances::{AdvanceDeductionResult, calculate_advance_deduction};
pub use annual_pay::{AnnualPayResult, calculate_annual_pay, calculate_annual_pay_with_policy};
pub use log_contribution::{
    LogContribution, LogContributionResult, NIGHT_WORK_REF, calculate_log_contribution,
};
pub use monthly_pay::{MonthlyPayResult, calculate_pay, calculate_pay_with_policy};
pub use pay_day::{
    PayDayNotice, PayDayNotices, PayDayStatus, PayDayUrgency, classify_pay_day, next_pay_date,
    pay_day_notices,
};
pub use rate_resolution::{TaxRateResolution, resolve_tax_rate, resolved_rate, resolved_tax_rate};
pub use weekly_allowance::{
    WEEKLY_HOLIDAY_REF, WeeklyAllowanceResult, calculate_weekly_allowance,
    week_meets_allowance_threshold, weekly_allowance_amount,
};
pub use withholding::{WithholdingResult, calculate_withholding, truncate_to_unit};
