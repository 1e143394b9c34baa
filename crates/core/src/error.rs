use thiserror::Error;

/// Errors raised while loading or validating the diagnosis catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog dataset is not valid JSON: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("duplicate diagnosis id {0} in catalog")]
    DuplicateId(u32),

    #[error("diagnosis {id}: {reason}")]
    InvalidEntry { id: u32, reason: String },
}

/// Errors raised at the patient intake boundary.
///
/// Malformed intake never reaches the matcher or the document builders;
/// it is rejected here, before a session exists.
#[derive(Debug, Error)]
pub enum IntakeError {
    #[error("patient name must not be empty")]
    EmptyName,

    #[error("patient id must not be empty")]
    EmptyId,
}
