use crate::error::HandlerError;
use query_core::{FieldError, Map, QueryParserError, ResponseData};

/// The response envelope: `data` mirrors the selection tree (null when the
/// request failed before execution), `errors` carries every recorded error
/// with its document position.
#[derive(Debug, serde::Serialize, Default, PartialEq)]
pub struct GQLResponse {
    pub data: Option<Map>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<GQLError>,
}

#[derive(Debug, serde::Serialize, serde::Deserialize, PartialEq)]
pub struct GQLError {
    pub message: String,

    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub path: Vec<String>,
}

impl GQLError {
    pub fn new(message: impl Into<String>, path: Vec<String>) -> Self {
        Self {
            message: message.into(),
            path,
        }
    }
}

impl GQLResponse {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn from_handler_error(err: HandlerError) -> Self {
        GQLResponse {
            data: None,
            errors: vec![GQLError::new(err.to_string(), Vec::new())],
        }
    }

    pub fn from_validation_errors(errors: Vec<QueryParserError>) -> Self {
        GQLResponse {
            data: None,
            errors: errors
                .into_iter()
                .map(|err| {
                    let path = err.path.segments().to_vec();
                    GQLError::new(err.to_string(), path)
                })
                .collect(),
        }
    }
}

impl From<FieldError> for GQLError {
    fn from(err: FieldError) -> Self {
        GQLError::new(err.message(), err.path)
    }
}

impl From<ResponseData> for GQLResponse {
    fn from(response: ResponseData) -> Self {
        GQLResponse {
            data: Some(response.data),
            errors: response.errors.into_iter().map(GQLError::from).collect(),
        }
    }
}
