use thiserror::Error;

pub type BridgeResult<T> = Result<T, BridgeError>;

#[derive(Debug, Error)]
pub enum BridgeError {
    #[error("spec must contain a selection mapping")]
    MissingSelection,

    #[error(
        "{kind} selection `{name}` must be projected onto a non-empty list of encodings or fields"
    )]
    UnprojectedSelection { name: String, kind: String },

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("invalid bridge config: {0}")]
    InvalidConfig(String),

    #[error("dataset name `{0}` collides with a reserved component argument")]
    ReservedDatasetName(String),

    #[error("component host failed: {0}")]
    Host(String),
}
