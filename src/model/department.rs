use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Display,
    EnumString, EnumIter,
)]
#[strum(ascii_case_insensitive)]
pub enum Department {
    Engineering,
    Marketing,
    Sales,
    #[serde(rename = "HR")]
    #[strum(serialize = "HR")]
    Hr,
    Design,
}
