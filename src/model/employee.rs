use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use super::department::Department;
use super::payroll::PayrollItem;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: String,

    /// Human-facing staff number, e.g. `EMP001`
    pub employee_id: String,

    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub department: Department,
    pub position: String,
    pub date_of_joining: DateTime<Utc>,

    /// Annual figure, never reconciled against `earnings`. A blank salary
    /// field was stored as `null` and reads back as zero.
    #[serde(default, deserialize_with = "null_as_zero")]
    pub salary: f64,

    /// Standing monthly lines; absent in records written by older versions
    #[serde(default)]
    pub earnings: Vec<PayrollItem>,
    #[serde(default)]
    pub deductions: Vec<PayrollItem>,
}

fn null_as_zero<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or_default())
}

impl Employee {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}
