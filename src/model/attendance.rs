use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceRecord {
    pub id: String,
    pub employee_id: String,
    pub employee_name: String,
    pub date: NaiveDate,
    pub clock_in: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clock_out: Option<DateTime<Utc>>,
}

impl AttendanceRecord {
    pub fn is_open(&self) -> bool {
        self.clock_out.is_none()
    }
}
