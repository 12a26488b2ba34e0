use thiserror::Error;

use crate::gemini::GeminiError;

#[derive(Error, Debug)]
pub enum AuraError {
    #[error("Record not found: {0}")]
    RecordNotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Api Error: {0}")]
    Api(String),

    #[error(transparent)]
    Gemini(#[from] GeminiError),
}

pub type Result<T> = std::result::Result<T, AuraError>;
