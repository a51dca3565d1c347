//! Starting datasets used when a collection has never been stored.

use chrono::{DateTime, NaiveDate, Utc};

use crate::model::{
    attendance::AttendanceRecord,
    candidate::{Candidate, CandidateStatus},
    department::Department,
    employee::Employee,
    job_position::{JobPosition, PositionStatus},
    leave_request::{LeaveRequest, LeaveStatus, LeaveType},
    payroll::{MasterPayrollItem, PayrollItem, PayrollItemType, PayslipRecord},
    role::Role,
    user::User,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

fn midnight(y: i32, m: u32, d: u32) -> DateTime<Utc> {
    date(y, m, d).and_hms_opt(0, 0, 0).unwrap_or_default().and_utc()
}

pub fn users() -> Vec<User> {
    vec![
        User {
            id: "user-1".into(),
            username: "Admin User".into(),
            role: Role::Admin,
            employee_id: None,
        },
        User {
            id: "user-2".into(),
            username: "Jane Doe".into(),
            role: Role::Employee,
            employee_id: Some("emp-2".into()),
        },
    ]
}

#[allow(clippy::too_many_arguments)]
fn employee(
    n: u32,
    first_name: &str,
    last_name: &str,
    department: Department,
    position: &str,
    joined: DateTime<Utc>,
    salary: f64,
    base: f64,
    tax: f64,
    pension: f64,
) -> Employee {
    Employee {
        id: format!("emp-{n}"),
        employee_id: format!("EMP{n:03}"),
        first_name: first_name.into(),
        last_name: last_name.into(),
        email: format!(
            "{}.{}@example.com",
            first_name.to_lowercase(),
            last_name.to_lowercase()
        ),
        department,
        position: position.into(),
        date_of_joining: joined,
        salary,
        earnings: vec![PayrollItem::new(format!("earn-{n}"), "Base Salary", base)],
        deductions: vec![
            PayrollItem::new(format!("deduct-{}", n * 2 - 1), "Tax", tax),
            PayrollItem::new(format!("deduct-{}", n * 2), "Pension", pension),
        ],
    }
}

pub fn employees() -> Vec<Employee> {
    vec![
        employee(
            1,
            "John",
            "Smith",
            Department::Engineering,
            "Senior Developer",
            midnight(2022, 1, 15),
            90000.0,
            7500.0,
            1500.0,
            500.0,
        ),
        employee(
            2,
            "Jane",
            "Doe",
            Department::Marketing,
            "Marketing Manager",
            midnight(2021, 3, 20),
            80000.0,
            6666.67,
            1200.0,
            400.0,
        ),
        employee(
            3,
            "Peter",
            "Jones",
            Department::Sales,
            "Sales Executive",
            midnight(2023, 5, 10),
            65000.0,
            5416.67,
            900.0,
            300.0,
        ),
    ]
}

pub fn leave_requests() -> Vec<LeaveRequest> {
    let request = |n: u32,
                   employee_id: &str,
                   employee_name: &str,
                   leave_type: LeaveType,
                   start: NaiveDate,
                   end: NaiveDate,
                   reason: &str,
                   status: LeaveStatus| LeaveRequest {
        id: format!("lr-{n}"),
        employee_id: employee_id.into(),
        employee_name: employee_name.into(),
        leave_type,
        start_date: start,
        end_date: end,
        reason: reason.into(),
        status,
    };

    vec![
        request(
            1,
            "emp-1",
            "John Smith",
            LeaveType::Annual,
            date(2024, 8, 1),
            date(2024, 8, 5),
            "Vacation",
            LeaveStatus::Approved,
        ),
        request(
            2,
            "emp-2",
            "Jane Doe",
            LeaveType::Sick,
            date(2024, 7, 20),
            date(2024, 7, 21),
            "Flu",
            LeaveStatus::Approved,
        ),
        request(
            3,
            "emp-2",
            "Jane Doe",
            LeaveType::Annual,
            date(2024, 9, 10),
            date(2024, 9, 15),
            "Family trip",
            LeaveStatus::Pending,
        ),
    ]
}

pub fn job_positions() -> Vec<JobPosition> {
    [
        ("jp-1", "Frontend Developer", Department::Engineering, PositionStatus::Open),
        ("jp-2", "Product Designer", Department::Design, PositionStatus::Open),
        ("jp-3", "HR Generalist", Department::Hr, PositionStatus::Closed),
    ]
    .into_iter()
    .map(|(id, title, department, status)| JobPosition {
        id: id.into(),
        title: title.into(),
        department,
        status,
    })
    .collect()
}

pub fn candidates() -> Vec<Candidate> {
    [
        ("can-1", "jp-1", "Alice", "Williams", "alice.w@example.com", CandidateStatus::Interviewing),
        ("can-2", "jp-1", "Bob", "Brown", "bob.b@example.com", CandidateStatus::Applied),
        ("can-3", "jp-2", "Charlie", "Davis", "charlie.d@example.com", CandidateStatus::Offered),
    ]
    .into_iter()
    .map(|(id, job_id, first_name, last_name, email, status)| Candidate {
        id: id.into(),
        job_id: job_id.into(),
        first_name: first_name.into(),
        last_name: last_name.into(),
        email: email.into(),
        status,
    })
    .collect()
}

pub fn payslip_records() -> Vec<PayslipRecord> {
    Vec::new()
}

pub fn master_payroll_items() -> Vec<MasterPayrollItem> {
    [
        ("mpi-1", "001", "Base Salary", PayrollItemType::Earning),
        ("mpi-2", "002", "Overtime", PayrollItemType::Earning),
        ("mpi-3", "101", "Tax (PAYE)", PayrollItemType::Deduction),
        ("mpi-4", "102", "Pension Contribution", PayrollItemType::Deduction),
    ]
    .into_iter()
    .map(|(id, code, description, item_type)| MasterPayrollItem {
        id: id.into(),
        code: code.into(),
        description: description.into(),
        item_type,
        period: "999".into(),
    })
    .collect()
}

pub fn attendance_records() -> Vec<AttendanceRecord> {
    Vec::new()
}
