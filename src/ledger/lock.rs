//! Month locking.
//!
//! Marking a month as paid locks every log the employee has in it. Locked
//! logs must not be edited or deleted until the month is unlocked.

use tracing::info;

use crate::error::{EngineError, EngineResult};
use crate::models::{PayMonth, WorkLog};

fn set_month_lock(logs: &mut [WorkLog], employee_id: &str, month: PayMonth, locked: bool) -> usize {
    let mut changed = 0;
    for log in logs
        .iter_mut()
        .filter(|log| log.employee_id == employee_id && month.contains(log.date))
    {
        if log.is_locked != locked {
            log.is_locked = locked;
            changed += 1;
        }
    }
    changed
}

/// Locks the employee's logs in `month`, returning how many changed.
///
/// # Examples
///
/// ```
/// use payroll_engine::ledger::{is_month_locked, lock_month};
/// use payroll_engine::models::{Employee, NewWorkLog, PayMonth, PaymentType, WorkLog};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let employee = Employee::new("emp_001", "Kim", PaymentType::Daily, Decimal::from(80_000));
/// let draft = NewWorkLog { employee_id: "emp_001".to_string(), ..Default::default() };
/// let date = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
/// let mut logs = vec![WorkLog::record(&draft, &employee, date, 0)];
///
/// let march = PayMonth::containing(date);
/// assert_eq!(lock_month(&mut logs, "emp_001", march), 1);
/// assert!(is_month_locked(&logs, "emp_001", march));
/// ```
pub fn lock_month(logs: &mut [WorkLog], employee_id: &str, month: PayMonth) -> usize {
    let changed = set_month_lock(logs, employee_id, month, true);
    info!(
        employee_id,
        year = month.year(),
        month = month.month(),
        changed,
        "Locked month"
    );
    changed
}

/// Unlocks the employee's logs in `month`, returning how many changed.
pub fn unlock_month(logs: &mut [WorkLog], employee_id: &str, month: PayMonth) -> usize {
    let changed = set_month_lock(logs, employee_id, month, false);
    info!(
        employee_id,
        year = month.year(),
        month = month.month(),
        changed,
        "Unlocked month"
    );
    changed
}

/// A month is locked when the employee has at least one log in it and
/// every such log is locked.
pub fn is_month_locked(logs: &[WorkLog], employee_id: &str, month: PayMonth) -> bool {
    let mut month_logs = logs
        .iter()
        .filter(|log| log.employee_id == employee_id && month.contains(log.date))
        .peekable();

    month_logs.peek().is_some() && month_logs.all(|log| log.is_locked)
}

/// Rejects changes to a locked log.
pub fn ensure_editable(log: &WorkLog) -> EngineResult<()> {
    if log.is_locked {
        return Err(EngineError::WorkLogLocked {
            log_id: log.id.clone(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn make_date(date_str: &str) -> NaiveDate {
        NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
    }

    fn create_log(id: &str, employee_id: &str, date: &str) -> WorkLog {
        WorkLog {
            id: id.to_string(),
            business_id: None,
            employee_id: employee_id.to_string(),
            date: make_date(date),
            hours: None,
            count: None,
            memo: None,
            snapshot: None,
            is_night_shift: false,
            is_locked: false,
            repeat_group_id: None,
            created_at: 0,
        }
    }

    fn sample_logs() -> Vec<WorkLog> {
        vec![
            create_log("log_001", "emp_001", "2026-02-28"),
            create_log("log_002", "emp_001", "2026-03-01"),
            create_log("log_003", "emp_001", "2026-03-31"),
            create_log("log_004", "emp_002", "2026-03-15"),
        ]
    }

    fn march() -> PayMonth {
        PayMonth::new(2026, 3).unwrap()
    }

    #[test]
    fn test_lock_month_only_touches_employee_and_month() {
        let mut logs = sample_logs();

        assert_eq!(lock_month(&mut logs, "emp_001", march()), 2);

        let locked: Vec<&str> = logs
            .iter()
            .filter(|l| l.is_locked)
            .map(|l| l.id.as_str())
            .collect();
        assert_eq!(locked, vec!["log_002", "log_003"]);
    }

    #[test]
    fn test_lock_month_twice_changes_nothing() {
        let mut logs = sample_logs();
        lock_month(&mut logs, "emp_001", march());

        assert_eq!(lock_month(&mut logs, "emp_001", march()), 0);
    }

    #[test]
    fn test_unlock_month() {
        let mut logs = sample_logs();
        lock_month(&mut logs, "emp_001", march());

        assert_eq!(unlock_month(&mut logs, "emp_001", march()), 2);
        assert!(logs.iter().all(|l| !l.is_locked));
    }

    #[test]
    fn test_is_month_locked() {
        let mut logs = sample_logs();
        assert!(!is_month_locked(&logs, "emp_001", march()));

        lock_month(&mut logs, "emp_001", march());
        assert!(is_month_locked(&logs, "emp_001", march()));
        assert!(!is_month_locked(&logs, "emp_002", march()));

        logs[2].is_locked = false;
        assert!(!is_month_locked(&logs, "emp_001", march()));
    }

    #[test]
    fn test_month_without_logs_is_not_locked() {
        let logs = sample_logs();
        assert!(!is_month_locked(&logs, "emp_001", PayMonth::new(2026, 5).unwrap()));
    }

    #[test]
    fn test_ensure_editable() {
        let mut log = create_log("log_001", "emp_001", "2026-03-02");
        assert!(ensure_editable(&log).is_ok());

        log.is_locked = true;
        match ensure_editable(&log) {
            Err(EngineError::WorkLogLocked { log_id }) => assert_eq!(log_id, "log_001"),
            other => panic!("Expected WorkLogLocked, got {:?}", other),
        }
    }
}
