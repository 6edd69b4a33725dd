use social_models::EntityKind;
use thiserror::Error;

#[derive(Debug, Error)]
#[error("{}", kind)]
pub struct ConnectorError {
    /// The error information for internal use.
    pub kind: ErrorKind,
}

#[derive(Debug, Error)]
pub enum ErrorKind {
    #[error("No {kind} record found for identifier `{id}`.")]
    RecordNotFound { kind: EntityKind, id: String },

    #[error("Unique constraint failed on {constraint}.")]
    UniqueConstraintViolation { constraint: String },

    #[error("Foreign key constraint failed on `{field}`: no {referenced} record with identifier `{id}`.")]
    ForeignKeyViolation {
        field: String,
        referenced: EntityKind,
        id: String,
    },

    #[error("Inconsistent store state: {details}")]
    InconsistentState { details: String },
}

impl ConnectorError {
    pub fn from_kind(kind: ErrorKind) -> Self {
        Self { kind }
    }

    pub fn record_not_found(kind: EntityKind, id: impl ToString) -> Self {
        Self::from_kind(ErrorKind::RecordNotFound {
            kind,
            id: id.to_string(),
        })
    }

    pub fn unique_violation(constraint: impl Into<String>) -> Self {
        Self::from_kind(ErrorKind::UniqueConstraintViolation {
            constraint: constraint.into(),
        })
    }

    pub fn foreign_key_violation(
        field: impl Into<String>,
        referenced: EntityKind,
        id: impl ToString,
    ) -> Self {
        Self::from_kind(ErrorKind::ForeignKeyViolation {
            field: field.into(),
            referenced,
            id: id.to_string(),
        })
    }

    pub fn inconsistent(details: impl Into<String>) -> Self {
        Self::from_kind(ErrorKind::InconsistentState {
            details: details.into(),
        })
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self.kind, ErrorKind::RecordNotFound { .. })
    }

    /// True for the constraint-violation kinds a surrounding transport maps
    /// to a 400-style outcome.
    pub fn is_validation(&self) -> bool {
        matches!(
            self.kind,
            ErrorKind::UniqueConstraintViolation { .. } | ErrorKind::ForeignKeyViolation { .. }
        )
    }

    /// True for states that are never reachable through valid input.
    pub fn is_internal(&self) -> bool {
        matches!(self.kind, ErrorKind::InconsistentState { .. })
    }
}
