use graphql_parser::query::ParseError;
use query_core::CoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HandlerError {
    /// Malformed query document text. The whole request terminates with this
    /// single error and `data: null`.
    #[error("Error parsing GraphQL query: {}", _0)]
    Syntax(String),

    #[error("Unsupported feature: {}. {}", feature_name, message)]
    UnsupportedFeature {
        feature_name: &'static str,
        message: String,
    },

    #[error("Variable `${}` is not defined in the request variables.", name)]
    UndefinedVariable { name: String },

    #[error("{}", _0)]
    QueryConversion(String),

    #[error("{}", _0)]
    Core(#[from] CoreError),
}

impl HandlerError {
    pub fn unsupported_feature(feature_name: &'static str, message: impl ToString) -> Self {
        Self::UnsupportedFeature {
            feature_name,
            message: message.to_string(),
        }
    }

    pub fn query_conversion(message: impl ToString) -> Self {
        Self::QueryConversion(message.to_string())
    }
}

impl From<ParseError> for HandlerError {
    fn from(err: ParseError) -> Self {
        Self::Syntax(err.to_string())
    }
}
