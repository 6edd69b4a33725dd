use std::fmt;
use thiserror::Error;

/// Dotted position of a validation error inside the query document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryPath {
    segments: Vec<String>,
}

impl QueryPath {
    pub fn new(initial_segment: String) -> Self {
        Self {
            segments: vec![initial_segment],
        }
    }

    pub fn add(&self, segment: String) -> Self {
        let mut path = self.clone();
        path.segments.push(segment);
        path
    }

    pub fn last(&self) -> Option<&str> {
        self.segments.last().map(|s| s.as_str())
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }
}

impl fmt::Display for QueryPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments.join("."))
    }
}

#[derive(Debug, Clone, Error)]
#[error("Query validation error at `{path}`: {kind}")]
pub struct QueryParserError {
    pub path: QueryPath,
    pub kind: QueryParserErrorKind,
}

impl QueryParserError {
    pub fn new(path: QueryPath, kind: QueryParserErrorKind) -> Self {
        Self { path, kind }
    }
}

#[derive(Debug, Clone, Error)]
pub enum QueryParserErrorKind {
    #[error("Field `{field}` does not exist on type `{object}`.")]
    UnknownSelectionField { field: String, object: String },

    #[error("Field `{field}` is a scalar and cannot carry a selection set.")]
    SelectionSetOnScalar { field: String },

    #[error("Field `{field}` returns an object and requires a selection set.")]
    MissingSelectionSet { field: String },

    #[error("Unknown argument `{argument}`.")]
    UnknownArgument { argument: String },

    #[error("Required argument `{argument}` is missing.")]
    RequiredArgumentMissing { argument: String },

    #[error("Invalid value for argument `{argument}`: expected `{expected}`, got `{got}`.")]
    ValueTypeMismatch {
        argument: String,
        expected: String,
        got: String,
    },

    #[error("Query exceeds the maximum permitted depth of {max_depth} (selection at depth {depth}).")]
    DepthLimitExceeded { depth: usize, max_depth: usize },
}
