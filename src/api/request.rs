//! Request types for the payroll engine API.
//!
//! Request bodies use the same camelCase shapes as the persisted employee
//! and work-log records, so records can be posted as stored.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{Employee, WorkLog};

/// Request body for `POST /pay/monthly`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyPayRequest {
    /// The employee to pay.
    pub employee: Employee,
    /// Work logs; logs of other employees and months are ignored.
    #[serde(default)]
    pub work_logs: Vec<WorkLog>,
    /// Any day in the month to calculate.
    pub reference_date: NaiveDate,
}

/// Request body for `POST /pay/annual`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnualPayRequest {
    /// The employee to pay.
    pub employee: Employee,
    /// Work logs; logs of other employees and years are ignored.
    #[serde(default)]
    pub work_logs: Vec<WorkLog>,
    /// The calendar year to calculate.
    pub year: i32,
}

/// Request body for `POST /pay-day/notices`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayDayNoticesRequest {
    /// The employees to check.
    pub employees: Vec<Employee>,
    /// The current date.
    pub today: NaiveDate,
}

/// Request body for `POST /transfer/link`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferLinkRequest {
    /// The employee to pay; supplies the bank and account.
    pub employee: Employee,
    /// The amount to send.
    pub amount: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PaymentType;
    use rust_decimal_macros::dec;

    #[test]
    fn test_deserialize_monthly_request() {
        let json = r#"{
            "employee": {
                "id": "emp_001",
                "name": "Kim",
                "paymentType": "HOURLY",
                "amount": 10030,
                "taxRate": 3.3,
                "applyHolidayAllowance": true
            },
            "workLogs": [
                {
                    "id": "log_001",
                    "employeeId": "emp_001",
                    "date": "2026-03-02",
                    "hours": 8,
                    "isNightShift": true
                }
            ],
            "referenceDate": "2026-03-15"
        }"#;

        let request: MonthlyPayRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.employee.payment_type, PaymentType::Hourly);
        assert_eq!(request.employee.tax_rate, dec!(3.3));
        assert_eq!(request.work_logs.len(), 1);
        assert!(request.work_logs[0].is_night_shift);
        assert_eq!(
            request.reference_date,
            NaiveDate::from_ymd_opt(2026, 3, 15).unwrap()
        );
    }

    #[test]
    fn test_deserialize_annual_request_without_logs() {
        let json = r#"{
            "employee": {"id": "emp_002", "name": "Lee", "paymentType": "DAILY", "amount": 80000},
            "year": 2026
        }"#;

        let request: AnnualPayRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.year, 2026);
        assert!(request.work_logs.is_empty());
    }

    #[test]
    fn test_deserialize_transfer_request() {
        let json = r#"{
            "employee": {
                "id": "emp_001",
                "name": "Kim",
                "paymentType": "HOURLY",
                "amount": 10030,
                "bankName": "국민은행",
                "accountNumber": "123-45-6789"
            },
            "amount": "250000"
        }"#;

        let request: TransferLinkRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.amount, dec!(250000));
        assert_eq!(request.employee.bank_name, "국민은행");
    }
}
