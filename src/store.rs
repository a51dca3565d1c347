use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;
use strum_macros::{AsRefStr, Display, EnumIter};
use tracing::{error, info, warn};

use crate::db::KeyValueStore;
use crate::error::Result;
use crate::model::employee::Employee;

/// Storage keys, spelled the way the browser build wrote them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, AsRefStr, EnumIter)]
#[strum(serialize_all = "camelCase")]
pub enum CollectionKey {
    Employees,
    LeaveRequests,
    JobPositions,
    Candidates,
    PayslipRecords,
    MasterPayrollItems,
    AttendanceRecords,
    Users,
    CurrentUser,
}

pub struct RecordStore<S> {
    backend: S,
}

impl<S: KeyValueStore> RecordStore<S> {
    pub fn new(backend: S) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &S {
        &self.backend
    }

    /// Loads a collection, falling back to `default` when the key is missing,
    /// empty, `[]`, unreadable or fails to parse.
    pub fn load<T: DeserializeOwned>(&self, key: CollectionKey, default: T) -> T {
        match self.read_value(key) {
            Some(value) => match serde_json::from_value(value) {
                Ok(parsed) => parsed,
                Err(e) => {
                    error!(error = %e, key = %key, "Error parsing stored value");
                    default
                }
            },
            None => default,
        }
    }

    pub fn save<T: Serialize + ?Sized>(&self, key: CollectionKey, value: &T) -> Result<()> {
        let raw = serde_json::to_string(value)?;
        self.backend.set_raw(key.as_ref(), &raw).map_err(|e| {
            error!(error = %e, key = %key, "Error writing stored value");
            e
        })
    }

    /// Loads the roster, upgrading records that predate payroll lines.
    ///
    /// Missing `earnings`/`deductions` become empty sequences and the upgraded
    /// roster is written back once.
    pub fn load_employees(&self, default: Vec<Employee>) -> Vec<Employee> {
        let Some(Value::Array(mut rows)) = self.read_value(CollectionKey::Employees) else {
            return self.load(CollectionKey::Employees, default);
        };

        let upgraded = upgrade_employee_rows(&mut rows);

        let employees: Vec<Employee> = match serde_json::from_value(Value::Array(rows)) {
            Ok(employees) => employees,
            Err(e) => {
                error!(error = %e, key = %CollectionKey::Employees, "Error parsing stored value");
                return default;
            }
        };

        if upgraded > 0 {
            info!(upgraded, "Migrated employee records missing payroll lines");
            if let Err(e) = self.save(CollectionKey::Employees, &employees) {
                warn!(error = %e, "Migrated employees could not be written back");
            }
        }

        employees
    }

    fn read_value(&self, key: CollectionKey) -> Option<Value> {
        let raw = match self.backend.get_raw(key.as_ref()) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                error!(error = %e, key = %key, "Error reading stored value");
                return None;
            }
        };

        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed == "[]" {
            return None;
        }

        match serde_json::from_str(trimmed) {
            Ok(Value::Null) => None,
            Ok(value) => Some(value),
            Err(e) => {
                error!(error = %e, key = %key, "Error parsing stored value");
                None
            }
        }
    }
}

fn upgrade_employee_rows(rows: &mut [Value]) -> usize {
    let mut upgraded = 0;
    for row in rows.iter_mut() {
        let Some(obj) = row.as_object_mut() else {
            continue;
        };

        let mut touched = false;
        for field in ["earnings", "deductions"] {
            let missing = obj.get(field).is_none_or(Value::is_null);
            if missing {
                obj.insert(field.to_string(), Value::Array(Vec::new()));
                touched = true;
            }
        }

        if touched {
            upgraded += 1;
        }
    }
    upgraded
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryStore;
    use crate::model::user::User;
    use crate::seed;
    use pretty_assertions::assert_eq;

    fn store() -> RecordStore<MemoryStore> {
        RecordStore::new(MemoryStore::new())
    }

    #[test]
    fn keys_match_browser_names() {
        assert_eq!(CollectionKey::LeaveRequests.as_ref(), "leaveRequests");
        assert_eq!(CollectionKey::MasterPayrollItems.as_ref(), "masterPayrollItems");
        assert_eq!(CollectionKey::CurrentUser.to_string(), "currentUser");
    }

    #[test]
    fn missing_and_empty_values_fall_back_to_seed() {
        let store = store();
        let users: Vec<User> = store.load(CollectionKey::Users, seed::users());
        assert_eq!(users, seed::users());

        store.backend().set_raw("users", "[]").unwrap();
        let users: Vec<User> = store.load(CollectionKey::Users, seed::users());
        assert_eq!(users.len(), 2);
    }

    #[test]
    fn corrupt_value_falls_back_to_seed() {
        let store = store();
        store.backend().set_raw("users", "{not json").unwrap();
        let users: Vec<User> = store.load(CollectionKey::Users, seed::users());
        assert_eq!(users, seed::users());
    }

    #[test]
    fn saved_value_round_trips() {
        let store = store();
        let mut users = seed::users();
        users.truncate(1);
        store.save(CollectionKey::Users, &users).unwrap();

        let loaded: Vec<User> = store.load(CollectionKey::Users, seed::users());
        assert_eq!(loaded, users);
    }

    #[test]
    fn old_employee_records_gain_empty_payroll_lines() {
        let store = store();
        let legacy = r#"[{
            "id": "emp-9",
            "employeeId": "EMP009",
            "firstName": "Old",
            "lastName": "Record",
            "email": "old@example.com",
            "department": "Sales",
            "position": "Clerk",
            "dateOfJoining": "2019-02-01T00:00:00.000Z",
            "salary": 30000
        }]"#;
        store.backend().set_raw("employees", legacy).unwrap();

        let employees = store.load_employees(seed::employees());
        assert_eq!(employees.len(), 1);
        assert!(employees[0].earnings.is_empty());
        assert!(employees[0].deductions.is_empty());

        let raw = store.backend().get_raw("employees").unwrap().unwrap();
        assert!(raw.contains("\"earnings\":[]"));
    }

    #[test]
    fn null_salary_does_not_discard_the_roster() {
        let store = store();
        let mut employees = seed::employees();
        employees.truncate(1);
        let mut rows = serde_json::to_value(&employees).unwrap();

        let mut blank = rows[0].clone();
        blank["id"] = "emp-77".into();
        blank["employeeId"] = "EMP077".into();
        blank["salary"] = Value::Null;
        rows.as_array_mut().unwrap().push(blank);
        store.backend().set_raw("employees", &rows.to_string()).unwrap();

        let loaded = store.load_employees(seed::employees());
        let ids: Vec<&str> = loaded.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["emp-1", "emp-77"]);
        assert_eq!(loaded[1].salary, 0.0);
    }

    #[test]
    fn current_employee_records_load_unchanged() {
        let store = store();
        store.save(CollectionKey::Employees, &seed::employees()).unwrap();

        let employees = store.load_employees(Vec::new());
        assert_eq!(employees, seed::employees());
    }
}
