use crate::query_document::QueryParserError;
use memory_connector::ConnectorError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    /// The document failed validation against the schema graph. Execution
    /// never starts; every collected error is carried here.
    #[error("{} validation error(s) encountered", _0.len())]
    Validation(Vec<QueryParserError>),

    #[error("{}", _0)]
    Connector(#[from] ConnectorError),

    #[error("Deadline exceeded: the field was not resolved.")]
    DeadlineExceeded,

    #[error("Internal error: {}", _0)]
    Internal(String),
}

impl CoreError {
    pub fn internal(message: impl Into<String>) -> Self {
        CoreError::Internal(message.into())
    }

    /// True for the category that is always a defect when triggered by valid
    /// input.
    pub fn is_internal(&self) -> bool {
        match self {
            CoreError::Internal(_) => true,
            CoreError::Connector(err) => err.is_internal(),
            _ => false,
        }
    }
}
