use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

use super::employee::Employee;

/// A single earning or deduction line. Amounts are signed and carry no currency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayrollItem {
    pub id: String,
    pub description: String,
    pub amount: f64,
}

impl PayrollItem {
    pub fn new(id: impl Into<String>, description: impl Into<String>, amount: f64) -> Self {
        Self {
            id: id.into(),
            description: description.into(),
            amount,
        }
    }
}

/// Frozen pay record for one employee and one period.
///
/// The totals and the `employee_snapshot` are computed once, when the payroll
/// run happens, and are never recomputed from the live employee afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayslipRecord {
    pub id: String,
    pub employee_id: String,
    pub pay_period: String,
    pub date_issued: DateTime<Utc>,
    pub earnings: Vec<PayrollItem>,
    pub deductions: Vec<PayrollItem>,
    pub gross_pay: f64,
    pub total_deductions: f64,
    pub net_pay: f64,
    pub employee_snapshot: Employee,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum PayrollItemType {
    Earning,
    Deduction,
}

/// Catalog entry for a reusable earning/deduction category. Not linked to any
/// `PayrollItem` instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MasterPayrollItem {
    pub id: String,
    pub code: String,
    pub description: String,
    #[serde(rename = "type")]
    pub item_type: PayrollItemType,
    pub period: String,
}
