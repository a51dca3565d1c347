//! Payroll computation pipeline: line-item totals, payslip generation and the
//! append-only payslip history. Nothing in here touches storage.

pub mod calc;
pub mod history;
pub mod payslip;

pub use calc::{PayTotals, net_pay, sum_deductions, sum_earnings};
pub use history::{HistoryFilter, PayrollRunStore};
pub use payslip::{render_payslip, run_payroll};
