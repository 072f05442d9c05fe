//! Pay breakdown models.
//!
//! [`PayDetail`] is the output of the pay engine for one month or one year.
//! [`WeeklyDetail`] records the weekly holiday allowance of one week.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The weekly holiday allowance outcome for one Monday-start week.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyDetail {
    /// Display label, e.g. `"1.26~2.1"`.
    pub week_range: String,
    /// Monday of the week.
    pub week_start: NaiveDate,
    /// Sunday of the week.
    pub week_end: NaiveDate,
    /// Hours worked across the whole week, including days in other months.
    pub work_hours: Decimal,
    /// Whether the weekly threshold was met.
    pub has_holiday_allowance: bool,
    /// The allowance earned for the week.
    pub allowance_amount: Decimal,
}

/// A complete pay breakdown.
///
/// # Invariants
///
/// - `original_pay = base_pay + night_pay` for hourly employees
/// - `total_before_tax = original_pay + holiday_allowance`
/// - `final_pay = total_before_tax - tax_amount`
/// - `net_pay = final_pay - total_advances`
///
/// # Example
///
/// ```
/// use payroll_engine::models::PayDetail;
/// use rust_decimal::Decimal;
///
/// let detail = PayDetail::default();
/// assert_eq!(detail.net_pay, Decimal::ZERO);
/// assert!(detail.weekly_details.is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayDetail {
    /// Sum of per-log contributions, before the holiday allowance.
    pub original_pay: Decimal,
    /// Hours × rate over all hourly logs, night or not.
    pub base_pay: Decimal,
    /// The extra half rate paid on night-shift hours.
    pub night_pay: Decimal,
    /// Total hours logged (hourly employees only).
    pub total_work_hours: Decimal,
    /// Hours logged on night shifts (hourly employees only).
    pub total_night_work_hours: Decimal,
    /// Weekly holiday allowance attributed to the period.
    pub holiday_allowance: Decimal,
    /// Per-week allowance breakdown, chronological. Empty for annual views.
    pub weekly_details: Vec<WeeklyDetail>,
    /// `original_pay + holiday_allowance`.
    pub total_before_tax: Decimal,
    /// The withholding percentage used for the month.
    pub applied_tax_rate: Decimal,
    /// Withholding, truncated to the truncation unit.
    pub tax_amount: Decimal,
    /// `total_before_tax - tax_amount`.
    pub final_pay: Decimal,
    /// Advances granted within the period.
    pub total_advances: Decimal,
    /// `final_pay - total_advances`.
    pub net_pay: Decimal,
}
