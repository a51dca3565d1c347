//! Named update operations on [`AppState`](crate::state::AppState), one file
//! per record kind they touch.

pub mod attendance;
pub mod employee;
pub mod leave_request;
pub mod payroll;
pub mod recruitment;
pub mod session;
