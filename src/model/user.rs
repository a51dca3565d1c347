use serde::{Deserialize, Serialize};

use super::role::Role;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub username: String,
    pub role: Role,
    /// Present only if this user is linked to an employee record
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employee_id: Option<String>,
}
