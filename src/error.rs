use thiserror::Error;

pub type Result<T> = std::result::Result<T, HrmError>;

#[derive(Debug, Error)]
pub enum HrmError {
    #[error("Please enter a pay period.")]
    EmptyPayPeriod,

    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("Please select a job position.")]
    NoJobPositionSelected,

    #[error("{0} is already clocked in.")]
    AlreadyClockedIn(String),

    #[error("{0} is not clocked in.")]
    NotClockedIn(String),

    #[error("start date cannot be after end date")]
    InvalidDateRange,

    #[error("Leave request {0} not found or already processed")]
    LeaveAlreadyProcessed(String),

    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },

    #[error("No data to export.")]
    NothingToExport,

    #[error("storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

impl HrmError {
    pub fn not_found(kind: &'static str, id: impl Into<String>) -> Self {
        HrmError::NotFound {
            kind,
            id: id.into(),
        }
    }

    /// True for errors raised at the form boundary, before any state changes
    pub fn is_user_notice(&self) -> bool {
        matches!(
            self,
            HrmError::EmptyPayPeriod
                | HrmError::MissingField(_)
                | HrmError::NoJobPositionSelected
                | HrmError::AlreadyClockedIn(_)
                | HrmError::NotClockedIn(_)
                | HrmError::InvalidDateRange
                | HrmError::LeaveAlreadyProcessed(_)
                | HrmError::NotFound { .. }
                | HrmError::NothingToExport
        )
    }
}
