//! Editing and deleting work logs.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{EngineError, EngineResult};
use crate::models::{Employee, NewWorkLog, WorkLog};

use super::lock::ensure_editable;

/// Which logs a delete removes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DeleteScope {
    /// Only the selected log.
    Only,
    /// The selected log and the later logs of its repeat group.
    Following,
    /// Every log of the selected log's repeat group.
    Group,
}

/// Rewrites a log from an edit draft.
///
/// The log keeps its ID, creation time, lock state and repeat group. An
/// existing snapshot is kept so the edit does not reprice the log; a log
/// without one gets the employee's current configuration.
///
/// # Errors
///
/// - [`EngineError::WorkLogNotFound`] if no log has `log_id`
/// - [`EngineError::WorkLogLocked`] if the log is locked
/// - [`EngineError::InvalidWorkLog`] if the draft is invalid
pub fn update_log<'a>(
    logs: &'a mut [WorkLog],
    log_id: &str,
    draft: &NewWorkLog,
    employee: &Employee,
    date: NaiveDate,
) -> EngineResult<&'a WorkLog> {
    let log = logs
        .iter_mut()
        .find(|log| log.id == log_id)
        .ok_or_else(|| EngineError::WorkLogNotFound {
            log_id: log_id.to_string(),
        })?;
    ensure_editable(log)?;
    draft.validate(log_id)?;

    let edited = WorkLog::record(draft, employee, date, log.created_at);
    log.employee_id = edited.employee_id;
    log.business_id = edited.business_id;
    log.date = edited.date;
    log.hours = edited.hours;
    log.count = edited.count;
    log.memo = edited.memo;
    log.is_night_shift = edited.is_night_shift;
    if log.snapshot.is_none() {
        log.snapshot = edited.snapshot;
    }

    info!(log_id, "Updated work log");
    Ok(log)
}

/// Deletes the log with `log_id` and, depending on `scope`, related logs
/// of its repeat group. Returns the removed logs.
///
/// A log without a repeat group is deleted alone whatever the scope.
/// Nothing is deleted if any targeted log is locked.
///
/// # Examples
///
/// ```
/// use payroll_engine::ledger::{DeleteScope, delete_logs};
/// use payroll_engine::models::{Employee, NewWorkLog, PaymentType, WorkLog};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let employee = Employee::new("emp_001", "Kim", PaymentType::Daily, Decimal::from(80_000));
/// let draft = NewWorkLog { employee_id: "emp_001".to_string(), ..Default::default() };
/// let log = WorkLog::record(&draft, &employee, NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(), 0);
/// let id = log.id.clone();
/// let mut logs = vec![log];
///
/// let removed = delete_logs(&mut logs, &id, DeleteScope::Only).unwrap();
/// assert_eq!(removed.len(), 1);
/// assert!(logs.is_empty());
/// ```
pub fn delete_logs(
    logs: &mut Vec<WorkLog>,
    log_id: &str,
    scope: DeleteScope,
) -> EngineResult<Vec<WorkLog>> {
    let selected = logs
        .iter()
        .find(|log| log.id == log_id)
        .ok_or_else(|| EngineError::WorkLogNotFound {
            log_id: log_id.to_string(),
        })?;

    let group = selected.repeat_group_id.clone();
    let from_date = selected.date;

    let is_target = |log: &WorkLog| -> bool {
        match (&group, scope) {
            (Some(group), DeleteScope::Following) => {
                log.repeat_group_id.as_ref() == Some(group) && log.date >= from_date
            }
            (Some(group), DeleteScope::Group) => log.repeat_group_id.as_ref() == Some(group),
            _ => log.id == log_id,
        }
    };

    if let Some(locked) = logs.iter().find(|log| is_target(log) && log.is_locked) {
        return Err(EngineError::WorkLogLocked {
            log_id: locked.id.clone(),
        });
    }

    let (removed, kept): (Vec<WorkLog>, Vec<WorkLog>) =
        std::mem::take(logs).into_iter().partition(|log| is_target(log));
    *logs = kept;

    info!(log_id, ?scope, removed = removed.len(), "Deleted work logs");
    Ok(removed)
}
