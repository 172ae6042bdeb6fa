use thiserror::Error;

#[derive(Error, Debug)]
pub enum EscalationError {
    #[error("Directory transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Directory call '{method}' failed with HTTP {status}")]
    HttpStatus { method: String, status: u16 },

    #[error("Directory call '{method}' returned no result: {message}")]
    Rpc { method: String, message: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type EscalationResult<T> = Result<T, EscalationError>;
