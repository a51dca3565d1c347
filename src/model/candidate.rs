use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

/// Recruitment pipeline stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum CandidateStatus {
    Applied,
    Interviewing,
    Offered,
    Hired,
    Rejected,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub id: String,
    pub job_id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub status: CandidateStatus,
}
