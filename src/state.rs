use serde::Serialize;
use strum::IntoEnumIterator;
use tracing::debug;
use uuid::Uuid;

use crate::db::KeyValueStore;
use crate::error::{HrmError, Result};
use crate::model::{
    attendance::AttendanceRecord,
    candidate::Candidate,
    department::Department,
    employee::Employee,
    job_position::{JobPosition, PositionStatus},
    leave_request::{LeaveRequest, LeaveStatus},
    payroll::MasterPayrollItem,
    user::User,
};
use crate::models::DashboardSummary;
use crate::payroll::PayrollRunStore;
use crate::seed;
use crate::store::{CollectionKey, RecordStore};

/// Every collection the application works on, plus the store that mirrors them.
///
/// Reads go through the accessors; writes go through the named operations in
/// `crate::api`, each of which persists the collection it touched.
pub struct AppState<S> {
    pub(crate) store: RecordStore<S>,
    pub(crate) employees: Vec<Employee>,
    pub(crate) leave_requests: Vec<LeaveRequest>,
    pub(crate) job_positions: Vec<JobPosition>,
    pub(crate) candidates: Vec<Candidate>,
    pub(crate) payslips: PayrollRunStore,
    pub(crate) master_items: Vec<MasterPayrollItem>,
    pub(crate) attendance: Vec<AttendanceRecord>,
    pub(crate) users: Vec<User>,
    pub(crate) current_user: Option<User>,
}

impl<S: KeyValueStore> AppState<S> {
    pub fn load(backend: S) -> Self {
        let store = RecordStore::new(backend);

        let state = Self {
            employees: store.load_employees(seed::employees()),
            leave_requests: store.load(CollectionKey::LeaveRequests, seed::leave_requests()),
            job_positions: store.load(CollectionKey::JobPositions, seed::job_positions()),
            candidates: store.load(CollectionKey::Candidates, seed::candidates()),
            payslips: PayrollRunStore::new(
                store.load(CollectionKey::PayslipRecords, seed::payslip_records()),
            ),
            master_items: store.load(CollectionKey::MasterPayrollItems, seed::master_payroll_items()),
            attendance: store.load(CollectionKey::AttendanceRecords, seed::attendance_records()),
            users: store.load(CollectionKey::Users, seed::users()),
            current_user: store.load(CollectionKey::CurrentUser, None),
            store,
        };

        debug!(
            employees = state.employees.len(),
            payslips = state.payslips.len(),
            "Application state loaded"
        );
        state
    }

    pub(crate) fn persist<T: Serialize + ?Sized>(&self, key: CollectionKey, value: &T) -> Result<()> {
        self.store.save(key, value)
    }

    pub fn store(&self) -> &RecordStore<S> {
        &self.store
    }

    pub fn employees(&self) -> &[Employee] {
        &self.employees
    }

    pub fn leave_requests(&self) -> &[LeaveRequest] {
        &self.leave_requests
    }

    pub fn job_positions(&self) -> &[JobPosition] {
        &self.job_positions
    }

    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    pub fn payslips(&self) -> &PayrollRunStore {
        &self.payslips
    }

    pub fn master_items(&self) -> &[MasterPayrollItem] {
        &self.master_items
    }

    pub fn attendance(&self) -> &[AttendanceRecord] {
        &self.attendance
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn dashboard(&self) -> DashboardSummary {
        let department_distribution = Department::iter()
            .map(|dept| {
                let count = self.employees.iter().filter(|e| e.department == dept).count();
                (dept, count)
            })
            .filter(|(_, count)| *count > 0)
            .collect();

        DashboardSummary {
            employee_count: self.employees.len(),
            pending_leave_requests: self
                .leave_requests
                .iter()
                .filter(|r| r.status == LeaveStatus::Pending)
                .count(),
            open_positions: self
                .job_positions
                .iter()
                .filter(|p| p.status == PositionStatus::Open)
                .count(),
            department_distribution,
        }
    }
}

pub(crate) fn new_id(prefix: &str) -> String {
    format!("{}-{}", prefix, Uuid::new_v4().to_simple())
}

/// Form-boundary check for required text fields.
pub(crate) fn require(value: &str, field: &'static str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(HrmError::MissingField(field));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryStore;
    use pretty_assertions::assert_eq;

    #[test]
    fn fresh_store_loads_seed_data() {
        let state = AppState::load(MemoryStore::new());

        assert_eq!(state.employees().len(), 3);
        assert_eq!(state.users().len(), 2);
        assert_eq!(state.master_items().len(), 4);
        assert!(state.payslips().is_empty());
        assert!(state.attendance().is_empty());
    }

    #[test]
    fn dashboard_counts() {
        let state = AppState::load(MemoryStore::new());
        let summary = state.dashboard();

        assert_eq!(summary.employee_count, 3);
        assert_eq!(summary.pending_leave_requests, 1);
        assert_eq!(summary.open_positions, 2);
        assert_eq!(
            summary.department_distribution,
            vec![
                (Department::Engineering, 1),
                (Department::Marketing, 1),
                (Department::Sales, 1),
            ]
        );
    }

    #[test]
    fn require_rejects_blank() {
        assert!(matches!(require("  ", "Email"), Err(HrmError::MissingField("Email"))));
        assert!(require("x", "Email").is_ok());
    }

    #[test]
    fn ids_carry_prefix_and_differ() {
        let a = new_id("emp");
        let b = new_id("emp");
        assert!(a.starts_with("emp-"));
        assert_ne!(a, b);
    }
}
