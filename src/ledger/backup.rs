//! Backup and restore of the employee and work-log collections.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, warn};

use crate::error::{EngineError, EngineResult};
use crate::models::{Employee, WorkLog};

/// Business ID given to records saved before businesses existed.
pub const DEFAULT_BUSINESS_ID: &str = "1";

/// A full export of the ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Backup {
    /// All employees.
    pub employees: Vec<Employee>,
    /// All work logs.
    pub work_logs: Vec<WorkLog>,
    /// When the backup was taken.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backup_date: Option<DateTime<Utc>>,
}

impl Backup {
    /// Creates a backup of the given collections taken at `backup_date`.
    pub fn new(
        employees: Vec<Employee>,
        work_logs: Vec<WorkLog>,
        backup_date: DateTime<Utc>,
    ) -> Self {
        Self {
            employees,
            work_logs,
            backup_date: Some(backup_date),
        }
    }

    /// Parses a backup document.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidBackup`] if the document is not JSON,
    /// lacks `employees` or `workLogs`, or holds malformed records.
    pub fn from_json(json: &str) -> EngineResult<Self> {
        let value: Value = serde_json::from_str(json).map_err(|e| EngineError::InvalidBackup {
            message: format!("not a JSON document: {}", e),
        })?;

        for key in ["employees", "workLogs"] {
            if value.get(key).is_none_or(Value::is_null) {
                warn!(missing = key, "Rejected backup");
                return Err(EngineError::InvalidBackup {
                    message: format!("missing `{}`", key),
                });
            }
        }

        let backup: Backup =
            serde_json::from_value(value).map_err(|e| EngineError::InvalidBackup {
                message: e.to_string(),
            })?;

        info!(
            employees = backup.employees.len(),
            work_logs = backup.work_logs.len(),
            "Parsed backup"
        );
        Ok(backup)
    }

    /// Serialises the backup as pretty-printed JSON.
    pub fn to_json(&self) -> EngineResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| EngineError::InvalidBackup {
            message: e.to_string(),
        })
    }

    /// Assigns `default_business_id` to every employee and log without a
    /// business, returning how many records changed.
    pub fn migrate_business_ids(&mut self, default_business_id: &str) -> usize {
        let mut changed = 0;
        let slots = self
            .employees
            .iter_mut()
            .map(|e| &mut e.business_id)
            .chain(self.work_logs.iter_mut().map(|l| &mut l.business_id));
        for slot in slots.filter(|slot| slot.is_none()) {
            *slot = Some(default_business_id.to_string());
            changed += 1;
        }
        if changed > 0 {
            info!(changed, default_business_id, "Migrated records without a business");
        }
        changed
    }

    /// Download file name for a backup taken on `date`.
    ///
    /// ```
    /// use payroll_engine::ledger::Backup;
    /// use chrono::NaiveDate;
    ///
    /// let date = NaiveDate::from_ymd_opt(2026, 3, 7).unwrap();
    /// assert_eq!(Backup::file_name(date), "todaypay_backup_2026-03-07.json");
    /// ```
    pub fn file_name(date: NaiveDate) -> String {
        format!("todaypay_backup_{}.json", date.format("%Y-%m-%d"))
    }
}
