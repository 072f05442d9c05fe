//! Bank transfer links for paying employees.
//!
//! Resolves an employee's free-text bank name to a Korean bank code and
//! builds a Toss deep link that opens a prefilled transfer. The link is only
//! returned; opening it is up to the client.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{EngineError, EngineResult};
use crate::models::Employee;

/// Known bank names and their codes, in match order.
///
/// Partial matches take the first name contained in the input, so a
/// shorter name listed earlier wins (`"농협"` before `"단위농협"`).
pub const BANK_CODES: &[(&str, &str)] = &[
    ("산업", "02"),
    ("기업", "03"),
    ("국민", "04"),
    ("수협", "07"),
    ("농협", "11"),
    ("단위농협", "12"),
    ("우리", "20"),
    ("SC", "23"),
    ("SC제일", "23"),
    ("대구", "31"),
    ("부산", "32"),
    ("광주", "34"),
    ("제주", "35"),
    ("전북", "37"),
    ("경남", "39"),
    ("새마을", "45"),
    ("신협", "48"),
    ("저축", "50"),
    ("우체국", "71"),
    ("하나", "81"),
    ("신한", "88"),
    ("케이", "89"),
    ("케이뱅크", "89"),
    ("카카오", "90"),
    ("카카오뱅크", "90"),
    ("토스", "92"),
    ("토스뱅크", "92"),
];

/// A prefilled transfer to an employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferLink {
    /// Two-digit bank code.
    pub bank_code: String,
    /// Destination account number, as entered.
    pub account_number: String,
    /// Amount to send.
    pub amount: Decimal,
    /// The `supertoss://send` deep link.
    pub url: String,
}

fn normalize_bank_name(bank_name: &str) -> String {
    let compact: String = bank_name.chars().filter(|c| !c.is_whitespace()).collect();
    if let Some(stripped) = compact.strip_suffix("은행") {
        return stripped.to_string();
    }
    let lower = compact.to_ascii_lowercase();
    if lower.ends_with("bank") && compact.len() > 4 {
        return compact[..compact.len() - 4].to_string();
    }
    compact
}

/// Looks up the bank code for a bank name.
///
/// Whitespace and a trailing `은행` or `bank` are ignored. An exact name
/// match wins; otherwise the first known name contained in the input is
/// used.
///
/// ```
/// use payroll_engine::transfer::resolve_bank_code;
///
/// assert_eq!(resolve_bank_code("국민 은행"), Some("04"));
/// assert_eq!(resolve_bank_code("KB국민"), Some("04"));
/// assert_eq!(resolve_bank_code("단위농협"), Some("12"));
/// assert_eq!(resolve_bank_code("Chase"), None);
/// ```
pub fn resolve_bank_code(bank_name: &str) -> Option<&'static str> {
    let normalized = normalize_bank_name(bank_name);
    if normalized.is_empty() {
        return None;
    }

    BANK_CODES
        .iter()
        .find(|(name, _)| *name == normalized)
        .or_else(|| {
            BANK_CODES
                .iter()
                .find(|(name, _)| normalized.contains(name))
        })
        .map(|(_, code)| *code)
}

/// Builds the transfer link for paying `amount` to `employee`.
///
/// # Errors
///
/// - [`EngineError::InvalidTransferAmount`] if `amount` is not positive
/// - [`EngineError::UnknownBank`] if the employee's bank is not recognised
pub fn build_transfer_link(employee: &Employee, amount: Decimal) -> EngineResult<TransferLink> {
    if amount <= Decimal::ZERO {
        warn!(employee_id = %employee.id, amount = %amount, "Nothing to transfer");
        return Err(EngineError::InvalidTransferAmount { amount });
    }

    let bank_code = resolve_bank_code(&employee.bank_name).ok_or_else(|| {
        warn!(employee_id = %employee.id, bank_name = %employee.bank_name, "Unknown bank");
        EngineError::UnknownBank {
            bank_name: employee.bank_name.clone(),
        }
    })?;

    let amount = amount.normalize();
    let url = format!(
        "supertoss://send?bankCode={}&accountNo={}&amount={}&originAuth=Y",
        bank_code, employee.account_number, amount
    );
    debug!(employee_id = %employee.id, bank_code, "Built transfer link");

    Ok(TransferLink {
        bank_code: bank_code.to_string(),
        account_number: employee.account_number.clone(),
        amount,
        url,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PaymentType;
    use rust_decimal_macros::dec;

    fn employee_with_bank(bank_name: &str) -> Employee {
        let mut employee = Employee::new("emp_001", "Kim", PaymentType::Hourly, dec!(10030));
        employee.bank_name = bank_name.to_string();
        employee.account_number = "110-123-456789".to_string();
        employee
    }

    #[test]
    fn test_exact_match_after_normalizing() {
        assert_eq!(resolve_bank_code("신한"), Some("88"));
        assert_eq!(resolve_bank_code("신한은행"), Some("88"));
        assert_eq!(resolve_bank_code(" 우 체 국 "), Some("71"));
        assert_eq!(resolve_bank_code("SC제일은행"), Some("23"));
        assert_eq!(resolve_bank_code("토스뱅크"), Some("92"));
        assert_eq!(resolve_bank_code("SCbank"), Some("23"));
    }

    #[test]
    fn test_partial_match_uses_table_order() {
        assert_eq!(resolve_bank_code("KB국민은행"), Some("04"));
        assert_eq!(resolve_bank_code("NH농협"), Some("11"));
        // Contains both 농협 and 단위농협; 농협 is listed first
        assert_eq!(resolve_bank_code("지역단위농협"), Some("11"));
        assert_eq!(resolve_bank_code("카카오 뱅크"), Some("90"));
    }

    #[test]
    fn test_unknown_or_empty_bank() {
        assert_eq!(resolve_bank_code(""), None);
        assert_eq!(resolve_bank_code("은행"), None);
        assert_eq!(resolve_bank_code("Bank of Nowhere"), None);
    }

    #[test]
    fn test_build_transfer_link() {
        let link = build_transfer_link(&employee_with_bank("국민은행"), dec!(1234560)).unwrap();

        assert_eq!(link.bank_code, "04");
        assert_eq!(link.amount, dec!(1234560));
        assert_eq!(
            link.url,
            "supertoss://send?bankCode=04&accountNo=110-123-456789&amount=1234560&originAuth=Y"
        );
    }

    #[test]
    fn test_build_transfer_link_rejects_non_positive_amount() {
        let employee = employee_with_bank("국민");
        assert!(matches!(
            build_transfer_link(&employee, Decimal::ZERO),
            Err(EngineError::InvalidTransferAmount { .. })
        ));
        assert!(matches!(
            build_transfer_link(&employee, dec!(-10)),
            Err(EngineError::InvalidTransferAmount { .. })
        ));
    }

    #[test]
    fn test_build_transfer_link_rejects_unknown_bank() {
        match build_transfer_link(&employee_with_bank("Monzo"), dec!(1000)) {
            Err(EngineError::UnknownBank { bank_name }) => assert_eq!(bank_name, "Monzo"),
            other => panic!("Expected UnknownBank, got {:?}", other),
        }
    }
}
