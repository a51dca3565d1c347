use tracing::{error, info};

use crate::db::KeyValueStore;
use crate::error::{HrmError, Result};
use crate::model::leave_request::{LeaveRequest, LeaveStatus};
use crate::models::NewLeaveRequest;
use crate::state::{AppState, new_id, require};
use crate::store::CollectionKey;

impl<S: KeyValueStore> AppState<S> {
    /// Submits a request as Pending. The employee name is resolved from the
    /// roster at submission time.
    pub fn add_leave_request(&mut self, payload: NewLeaveRequest) -> Result<LeaveRequest> {
        require(&payload.employee_id, "Employee")?;
        require(&payload.reason, "Reason")?;
        if payload.start_date > payload.end_date {
            return Err(HrmError::InvalidDateRange);
        }

        let employee_name = self
            .employee(&payload.employee_id)
            .map(|e| e.full_name())
            .unwrap_or_else(|| "Unknown".to_string());

        let request = LeaveRequest {
            id: new_id("lr"),
            employee_id: payload.employee_id,
            employee_name,
            leave_type: payload.leave_type,
            start_date: payload.start_date,
            end_date: payload.end_date,
            reason: payload.reason,
            status: LeaveStatus::Pending,
        };

        self.leave_requests.push(request.clone());
        self.persist(CollectionKey::LeaveRequests, &self.leave_requests)
            .inspect_err(|e| error!(error = %e, employee_id = %request.employee_id, "Failed to create leave request"))?;

        Ok(request)
    }

    pub fn approve_leave(&mut self, leave_id: &str) -> Result<()> {
        self.decide_leave(leave_id, LeaveStatus::Approved)
    }

    pub fn reject_leave(&mut self, leave_id: &str) -> Result<()> {
        self.decide_leave(leave_id, LeaveStatus::Rejected)
    }

    /// Only pending requests can be decided.
    fn decide_leave(&mut self, leave_id: &str, status: LeaveStatus) -> Result<()> {
        let request = self
            .leave_requests
            .iter_mut()
            .find(|r| r.id == leave_id && r.status == LeaveStatus::Pending)
            .ok_or_else(|| HrmError::LeaveAlreadyProcessed(leave_id.to_string()))?;
        request.status = status;

        self.persist(CollectionKey::LeaveRequests, &self.leave_requests)?;
        info!(leave_id, %status, "Leave request decided");
        Ok(())
    }

    /// Admins see every request; an employee sees only their own.
    pub fn visible_leave_requests(&self) -> Vec<&LeaveRequest> {
        match &self.current_user {
            Some(user) if !user.role.is_admin() => self
                .leave_requests
                .iter()
                .filter(|r| Some(&r.employee_id) == user.employee_id.as_ref())
                .collect(),
            _ => self.leave_requests.iter().collect(),
        }
    }
}
