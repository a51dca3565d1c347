use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;

use crate::model::{
    department::Department, job_position::PositionStatus, leave_request::LeaveType,
    payroll::{PayrollItem, PayrollItemType},
};

#[derive(Debug, Clone, Deserialize)]
pub struct NewEmployee {
    pub employee_id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub department: Department,
    pub position: String,
    pub date_of_joining: DateTime<Utc>,
    pub salary: f64,
    #[serde(default)]
    pub earnings: Vec<PayrollItem>,
    #[serde(default)]
    pub deductions: Vec<PayrollItem>,
}

#[derive(Debug, Default, Clone, Deserialize)]
pub struct EmployeeQuery {
    pub department: Option<Department>,
    /// Case-insensitive match on name, email or staff number
    pub search: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewLeaveRequest {
    pub employee_id: String,
    pub leave_type: LeaveType,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub reason: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewJobPosition {
    pub title: String,
    pub department: Department,
    pub status: PositionStatus,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewCandidate {
    pub job_id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewMasterItem {
    pub code: String,
    pub description: String,
    pub item_type: PayrollItemType,
    pub period: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardSummary {
    pub employee_count: usize,
    pub pending_leave_requests: usize,
    pub open_positions: usize,
    pub department_distribution: Vec<(Department, usize)>,
}
