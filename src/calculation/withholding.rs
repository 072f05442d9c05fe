//! Tax withholding calculation.

use rust_decimal::Decimal;

use crate::config::PayPolicy;
use crate::models::AuditStep;

/// The result of calculating withholding, including the audit step.
#[derive(Debug, Clone)]
pub struct WithholdingResult {
    /// The withholding percentage applied.
    pub tax_rate: Decimal,
    /// The amount withheld, truncated to the policy's unit.
    pub tax_amount: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Floors `amount` to the nearest lower multiple of `unit`.
///
/// A non-positive unit leaves the amount unchanged.
///
/// ```
/// use payroll_engine::calculation::truncate_to_unit;
/// use rust_decimal::Decimal;
///
/// let unit = Decimal::from(10);
/// assert_eq!(truncate_to_unit(Decimal::new(3300231, 3), unit), Decimal::from(3300));
/// assert_eq!(truncate_to_unit(Decimal::from(9), unit), Decimal::ZERO);
/// ```
pub fn truncate_to_unit(amount: Decimal, unit: Decimal) -> Decimal {
    if unit <= Decimal::ZERO {
        return amount;
    }
    (amount / unit).floor() * unit
}

/// Calculates withholding on `total_before_tax` at `tax_rate` percent.
///
/// The raw amount is floored to the policy's truncation unit, never rounded
/// up.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::calculate_withholding;
/// use payroll_engine::config::PayPolicy;
/// use rust_decimal::Decimal;
///
/// let result = calculate_withholding(
///     Decimal::from(100_007),
///     Decimal::new(33, 1),
///     &PayPolicy::default(),
///     1,
/// );
/// assert_eq!(result.tax_amount, Decimal::from(3300));
/// ```
pub fn calculate_withholding(
    total_before_tax: Decimal,
    tax_rate: Decimal,
    policy: &PayPolicy,
    step_number: u32,
) -> WithholdingResult {
    let raw_tax = total_before_tax * tax_rate / Decimal::ONE_HUNDRED;
    let tax_amount = truncate_to_unit(raw_tax, policy.tax_truncation_unit);

    let audit_step = AuditStep {
        step_number,
        rule_id: "tax_withholding".to_string(),
        rule_name: "Tax Withholding".to_string(),
        legal_ref: None,
        input: serde_json::json!({
            "total_before_tax": total_before_tax.normalize().to_string(),
            "tax_rate": tax_rate.normalize().to_string(),
            "truncation_unit": policy.tax_truncation_unit.normalize().to_string(),
        }),
        output: serde_json::json!({
            "raw_tax": raw_tax.normalize().to_string(),
            "tax_amount": tax_amount.normalize().to_string(),
        }),
        reasoning: format!(
            "{} × {}% = {}, truncated to {}",
            total_before_tax.normalize(),
            tax_rate.normalize(),
            raw_tax.normalize(),
            tax_amount.normalize()
        ),
    };

    WithholdingResult {
        tax_rate,
        tax_amount,
        audit_step,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn withhold(total: Decimal, rate: Decimal) -> Decimal {
        calculate_withholding(total, rate, &PayPolicy::default(), 1).tax_amount
    }

    #[test]
    fn test_truncates_down_to_ten() {
        let result = calculate_withholding(dec!(100007), dec!(3.3), &PayPolicy::default(), 5);

        assert_eq!(result.tax_amount, dec!(3300));
        assert_eq!(result.audit_step.step_number, 5);
        assert_eq!(result.audit_step.output["raw_tax"], "3300.231");
        assert_eq!(dec!(100007) - result.tax_amount, dec!(96707));
    }

    #[test]
    fn test_never_rounds_up() {
        assert_eq!(withhold(dec!(10299), dec!(10)), dec!(1020));
        assert_eq!(withhold(dec!(99999), dec!(3.3)), dec!(3290));
    }

    #[test]
    fn test_zero_rate_withholds_nothing() {
        assert_eq!(withhold(dec!(1234567), dec!(0)), dec!(0));
    }

    #[test]
    fn test_full_rate_withholds_everything_truncated() {
        assert_eq!(withhold(dec!(12345), dec!(100)), dec!(12340));
    }

    #[test]
    fn test_fractional_total() {
        // 31000.5 × 3.3% = 1023.0165
        assert_eq!(withhold(dec!(31000.5), dec!(3.3)), dec!(1020));
    }

    #[test]
    fn test_custom_truncation_unit() {
        let mut policy = PayPolicy::default();
        policy.tax_truncation_unit = dec!(100);

        let result = calculate_withholding(dec!(100007), dec!(3.3), &policy, 1);
        assert_eq!(result.tax_amount, dec!(3300));

        let result = calculate_withholding(dec!(99999), dec!(3.3), &policy, 1);
        assert_eq!(result.tax_amount, dec!(3200));
    }

    #[test]
    fn test_truncate_to_unit_with_zero_unit() {
        assert_eq!(truncate_to_unit(dec!(123.45), dec!(0)), dec!(123.45));
    }
}
