use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

use super::department::Department;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum PositionStatus {
    Open,
    Closed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobPosition {
    pub id: String,
    pub title: String,
    pub department: Department,
    pub status: PositionStatus,
}
