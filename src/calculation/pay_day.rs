//! Pay-day proximity classification.
//!
//! Works out when an employee is next due to be paid and how urgent that
//! is for display. No monetary effect.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::models::{Employee, PayDay, PayMonth};

/// How close a pay date is, for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PayDayUrgency {
    /// Due today.
    Today,
    /// Due tomorrow.
    OneDay,
    /// Due in 2 or 3 days.
    TwoToThreeDays,
    /// Due in 4 or 5 days.
    FourToFiveDays,
    /// Due in 6 days or more.
    Later,
}

impl PayDayUrgency {
    /// Classifies a non-negative day distance.
    pub fn from_days(days_until: i64) -> Self {
        match days_until {
            i64::MIN..=0 => PayDayUrgency::Today,
            1 => PayDayUrgency::OneDay,
            2..=3 => PayDayUrgency::TwoToThreeDays,
            4..=5 => PayDayUrgency::FourToFiveDays,
            _ => PayDayUrgency::Later,
        }
    }
}

/// An employee's next pay date and its display classification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayDayStatus {
    /// The next pay date on or after today.
    pub pay_date: NaiveDate,
    /// Calendar days from today until `pay_date`.
    pub days_until: i64,
    /// `"D-Day"` when due today, otherwise the pay day, e.g. `"25일"`.
    pub label: String,
    /// Display urgency tier.
    pub urgency: PayDayUrgency,
}

/// The pay date for `pay_day` within `month`, clamped to the month's last day.
fn pay_date_in(pay_day: PayDay, month: PayMonth) -> NaiveDate {
    let last_day = month.last_day();
    match pay_day {
        PayDay::EndOfMonth => last_day,
        PayDay::DayOfMonth(day) => month
            .first_day()
            .with_day(day.min(last_day.day()))
            .unwrap_or(last_day),
    }
}

/// Returns the next pay date on or after `today`.
///
/// This month's pay date is used unless it has already passed, in which
/// case next month's is. A day beyond the end of a month clamps to its
/// last day. Returns `None` when the pay date would fall past the end of
/// the representable calendar.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::next_pay_date;
/// use payroll_engine::models::PayDay;
/// use chrono::NaiveDate;
///
/// let today = NaiveDate::from_ymd_opt(2026, 2, 10).unwrap();
/// assert_eq!(
///     next_pay_date(PayDay::DayOfMonth(31), today),
///     NaiveDate::from_ymd_opt(2026, 2, 28)
/// );
///
/// let today = NaiveDate::from_ymd_opt(2026, 1, 26).unwrap();
/// assert_eq!(
///     next_pay_date(PayDay::DayOfMonth(25), today),
///     NaiveDate::from_ymd_opt(2026, 2, 25)
/// );
/// ```
pub fn next_pay_date(pay_day: PayDay, today: NaiveDate) -> Option<NaiveDate> {
    let month = PayMonth::containing(today);
    let this_month = pay_date_in(pay_day, month);
    if this_month < today {
        month.next().map(|next| pay_date_in(pay_day, next))
    } else {
        Some(this_month)
    }
}

/// Classifies how close the employee's next pay date is.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::{PayDayUrgency, classify_pay_day};
/// use payroll_engine::models::PayDay;
/// use chrono::NaiveDate;
///
/// let today = NaiveDate::from_ymd_opt(2026, 3, 22).unwrap();
/// let status = classify_pay_day(PayDay::DayOfMonth(25), today).unwrap();
///
/// assert_eq!(status.days_until, 3);
/// assert_eq!(status.label, "25일");
/// assert_eq!(status.urgency, PayDayUrgency::TwoToThreeDays);
/// ```
pub fn classify_pay_day(pay_day: PayDay, today: NaiveDate) -> Option<PayDayStatus> {
    let pay_date = next_pay_date(pay_day, today)?;
    let days_until = (pay_date - today).num_days().max(0);
    let urgency = PayDayUrgency::from_days(days_until);

    let label = match (urgency, pay_day) {
        (PayDayUrgency::Today, _) => "D-Day".to_string(),
        (_, PayDay::EndOfMonth) => format!("{}일", pay_date.day()),
        (_, PayDay::DayOfMonth(day)) => format!("{}일", day),
    };

    Some(PayDayStatus {
        pay_date,
        days_until,
        label,
        urgency,
    })
}

/// An employee due to be paid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayDayNotice {
    /// The employee's ID.
    pub employee_id: String,
    /// The employee's display name.
    pub name: String,
    /// The pay date.
    pub pay_date: NaiveDate,
}

/// Employees due to be paid today and tomorrow.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayDayNotices {
    /// Employees whose pay date is today.
    pub due_today: Vec<PayDayNotice>,
    /// Employees whose pay date is tomorrow.
    pub due_tomorrow: Vec<PayDayNotice>,
    /// A reminder naming the first employee due, preferring today.
    pub message: Option<String>,
}

/// Finds current employees who are due to be paid today or tomorrow.
///
/// Retired and inactive employees are skipped, as are employees without a
/// valid pay day. Pay days beyond the end of the month are clamped, so a
/// pay day of 31 is due on the 30th of a 30-day month.
pub fn pay_day_notices(employees: &[Employee], today: NaiveDate) -> PayDayNotices {
    let mut notices = PayDayNotices::default();

    for employee in employees.iter().filter(|e| e.is_current()) {
        let Some(status) = employee
            .pay_day()
            .and_then(|pay_day| classify_pay_day(pay_day, today))
        else {
            continue;
        };
        let notice = PayDayNotice {
            employee_id: employee.id.clone(),
            name: employee.name.clone(),
            pay_date: status.pay_date,
        };
        match status.urgency {
            PayDayUrgency::Today => notices.due_today.push(notice),
            PayDayUrgency::OneDay => notices.due_tomorrow.push(notice),
            _ => {}
        }
    }

    notices.message = if let Some(first) = notices.due_today.first() {
        Some(format!(
            "오늘({}일)은 {}님{}의 월급날입니다!",
            today.day(),
            first.name,
            others_suffix(notices.due_today.len())
        ))
    } else {
        notices.due_tomorrow.first().zip(today.succ_opt()).map(|(first, tomorrow)| {
            format!(
                "내일({}일)은 {}님{}의 월급날입니다. 미리 준비하세요!",
                tomorrow.day(),
                first.name,
                others_suffix(notices.due_tomorrow.len())
            )
        })
    };

    notices
}

fn others_suffix(count: usize) -> String {
    if count > 1 {
        format!(" 외 {}명", count - 1)
    } else {
        String::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PaymentType;
    use rust_decimal::Decimal;

    fn make_date(date_str: &str) -> NaiveDate {
        NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
    }

    fn employee_with_pay_day(id: &str, name: &str, pay_day: Option<u32>) -> Employee {
        let mut employee = Employee::new(id, name, PaymentType::Hourly, Decimal::from(10_000));
        employee.pay_day = pay_day;
        employee
    }

    #[test]
    fn test_pay_date_today_is_d_day() {
        let status = classify_pay_day(PayDay::DayOfMonth(10), make_date("2026-03-10")).unwrap();

        assert_eq!(status.pay_date, make_date("2026-03-10"));
        assert_eq!(status.days_until, 0);
        assert_eq!(status.label, "D-Day");
        assert_eq!(status.urgency, PayDayUrgency::Today);
    }

    #[test]
    fn test_passed_pay_date_rolls_to_next_month() {
        let status = classify_pay_day(PayDay::DayOfMonth(10), make_date("2026-03-11")).unwrap();

        assert_eq!(status.pay_date, make_date("2026-04-10"));
        assert_eq!(status.days_until, 30);
        assert_eq!(status.label, "10일");
        assert_eq!(status.urgency, PayDayUrgency::Later);
    }

    #[test]
    fn test_next_month_is_clamped() {
        assert_eq!(
            next_pay_date(PayDay::DayOfMonth(31), make_date("2026-01-31")),
            Some(make_date("2026-01-31"))
        );
        // February has no 30th
        assert_eq!(
            next_pay_date(PayDay::DayOfMonth(30), make_date("2026-01-31")),
            Some(make_date("2026-02-28"))
        );
    }

    #[test]
    fn test_no_pay_date_past_end_of_calendar() {
        let today = NaiveDate::MAX;
        assert_eq!(next_pay_date(PayDay::EndOfMonth, today), Some(today));
        assert_eq!(next_pay_date(PayDay::DayOfMonth(10), today), None);
        assert!(classify_pay_day(PayDay::DayOfMonth(10), today).is_none());

        let employees = vec![employee_with_pay_day("emp_001", "Kim", Some(10))];
        assert_eq!(pay_day_notices(&employees, today), PayDayNotices::default());
    }

    #[test]
    fn test_clamped_pay_date_in_short_month() {
        let status = classify_pay_day(PayDay::DayOfMonth(31), make_date("2026-04-29")).unwrap();

        assert_eq!(status.pay_date, make_date("2026-04-30"));
        assert_eq!(status.urgency, PayDayUrgency::OneDay);
        assert_eq!(status.label, "31일");
    }

    #[test]
    fn test_end_of_month_label_shows_actual_day() {
        let status = classify_pay_day(PayDay::EndOfMonth, make_date("2028-02-25")).unwrap();

        assert_eq!(status.pay_date, make_date("2028-02-29"));
        assert_eq!(status.days_until, 4);
        assert_eq!(status.label, "29일");
        assert_eq!(status.urgency, PayDayUrgency::FourToFiveDays);
    }

    #[test]
    fn test_end_of_month_on_last_day_is_d_day() {
        let status = classify_pay_day(PayDay::EndOfMonth, make_date("2026-12-31")).unwrap();

        assert_eq!(status.label, "D-Day");
        assert_eq!(status.days_until, 0);
    }

    #[test]
    fn test_rollover_across_year_end() {
        let status = classify_pay_day(PayDay::DayOfMonth(5), make_date("2026-12-30")).unwrap();

        assert_eq!(status.pay_date, make_date("2027-01-05"));
        assert_eq!(status.days_until, 6);
        assert_eq!(status.urgency, PayDayUrgency::Later);
    }

    #[test]
    fn test_urgency_tiers() {
        assert_eq!(PayDayUrgency::from_days(0), PayDayUrgency::Today);
        assert_eq!(PayDayUrgency::from_days(1), PayDayUrgency::OneDay);
        assert_eq!(PayDayUrgency::from_days(2), PayDayUrgency::TwoToThreeDays);
        assert_eq!(PayDayUrgency::from_days(3), PayDayUrgency::TwoToThreeDays);
        assert_eq!(PayDayUrgency::from_days(4), PayDayUrgency::FourToFiveDays);
        assert_eq!(PayDayUrgency::from_days(5), PayDayUrgency::FourToFiveDays);
        assert_eq!(PayDayUrgency::from_days(6), PayDayUrgency::Later);
    }

    #[test]
    fn test_notices_split_today_and_tomorrow() {
        let employees = vec![
            employee_with_pay_day("emp_001", "Kim", Some(10)),
            employee_with_pay_day("emp_002", "Lee", Some(11)),
            employee_with_pay_day("emp_003", "Park", Some(10)),
            employee_with_pay_day("emp_004", "Choi", Some(20)),
            employee_with_pay_day("emp_005", "Jung", None),
        ];

        let notices = pay_day_notices(&employees, make_date("2026-03-10"));

        let today: Vec<&str> = notices.due_today.iter().map(|n| n.employee_id.as_str()).collect();
        let tomorrow: Vec<&str> = notices
            .due_tomorrow
            .iter()
            .map(|n| n.employee_id.as_str())
            .collect();
        assert_eq!(today, vec!["emp_001", "emp_003"]);
        assert_eq!(tomorrow, vec!["emp_002"]);
        assert_eq!(
            notices.message.as_deref(),
            Some("오늘(10일)은 Kim님 외 1명의 월급날입니다!")
        );
    }

    #[test]
    fn test_notices_skip_retired_and_inactive() {
        let mut retired = employee_with_pay_day("emp_001", "Kim", Some(10));
        retired.is_retired = true;
        let mut inactive = employee_with_pay_day("emp_002", "Lee", Some(10));
        inactive.active = false;

        let notices = pay_day_notices(&[retired, inactive], make_date("2026-03-10"));

        assert!(notices.due_today.is_empty());
        assert!(notices.message.is_none());
    }

    #[test]
    fn test_notices_tomorrow_message() {
        let employees = vec![employee_with_pay_day("emp_001", "Kim", Some(99))];

        let notices = pay_day_notices(&employees, make_date("2026-04-29"));

        assert!(notices.due_today.is_empty());
        assert_eq!(notices.due_tomorrow.len(), 1);
        assert_eq!(
            notices.message.as_deref(),
            Some("내일(30일)은 Kim님의 월급날입니다. 미리 준비하세요!")
        );
    }

    #[test]
    fn test_notices_skip_invalid_pay_day() {
        let employees = vec![employee_with_pay_day("emp_001", "Kim", Some(45))];

        let notices = pay_day_notices(&employees, make_date("2026-03-10"));
        assert_eq!(notices, PayDayNotices::default());
    }
}
