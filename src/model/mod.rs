pub mod attendance;
pub mod candidate;
pub mod department;
pub mod employee;
pub mod job_position;
pub mod leave_request;
pub mod payroll;
pub mod role;
pub mod user;
