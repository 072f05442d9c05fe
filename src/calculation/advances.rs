//! Advance deduction.

use rust_decimal::Decimal;

use crate::models::{AuditStep, Employee, PayMonth};

/// The result of totalling a month's advances, including the audit step.
#[derive(Debug, Clone)]
pub struct AdvanceDeductionResult {
    /// Sum of advances granted within the month.
    pub total_advances: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Totals the employee's advances dated within `month`.
pub fn calculate_advance_deduction(
    employee: &Employee,
    month: PayMonth,
    step_number: u32,
) -> AdvanceDeductionResult {
    let in_month: Vec<_> = employee
        .advances
        .iter()
        .filter(|advance| month.contains(advance.date))
        .collect();
    let total_advances: Decimal = in_month.iter().map(|advance| advance.amount).sum();

    let audit_step = AuditStep {
        step_number,
        rule_id: "advance_deduction".to_string(),
        rule_name: "Advance Deduction".to_string(),
        legal_ref: None,
        input: serde_json::json!({
            "employee_id": employee.id,
            "advance_ids": in_month.iter().map(|advance| advance.id.as_str()).collect::<Vec<_>>(),
            "excluded_count": employee.advances.len() - in_month.len(),
        }),
        output: serde_json::json!({
            "total_advances": total_advances.normalize().to_string(),
        }),
        reasoning: format!(
            "{} advance(s) in {}-{:02} totalling {}",
            in_month.len(),
            month.year(),
            month.month(),
            total_advances.normalize()
        ),
    };

    AdvanceDeductionResult {
        total_advances,
        audit_step,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Advance, PaymentType};
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn advance(id: &str, amount: Decimal, date: &str) -> Advance {
        Advance {
            id: id.to_string(),
            amount,
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            memo: None,
            created_at: 0,
        }
    }

    #[test]
    fn test_only_advances_in_month_are_counted() {
        let mut employee = Employee::new("emp_001", "Kim", PaymentType::Hourly, dec!(10000));
        employee.advances = vec![
            advance("adv_1", dec!(20000), "2026-03-01"),
            advance("adv_2", dec!(5000), "2026-03-31"),
            advance("adv_3", dec!(70000), "2026-04-01"),
            advance("adv_4", dec!(10000), "2026-02-28"),
        ];

        let result = calculate_advance_deduction(&employee, PayMonth::new(2026, 3).unwrap(), 9);

        assert_eq!(result.total_advances, dec!(25000));
        assert_eq!(result.audit_step.step_number, 9);
        assert_eq!(result.audit_step.input["excluded_count"], 2);
    }

    #[test]
    fn test_no_advances() {
        let employee = Employee::new("emp_001", "Kim", PaymentType::Daily, dec!(80000));

        let result = calculate_advance_deduction(&employee, PayMonth::new(2026, 3).unwrap(), 1);

        assert_eq!(result.total_advances, dec!(0));
    }
}
