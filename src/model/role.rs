use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize, Display, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum Role {
    Admin,
    Employee,
}

impl Role {
    pub fn is_admin(&self) -> bool {
        *self == Role::Admin
    }
}
