use serde::{Deserialize, Serialize};

/// The wire shape of a request: the query text, an optional operation name
/// selecting one of several operations in the document, and an optional JSON
/// map of variable values.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphqlBody {
    pub query: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub operation_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub variables: Option<serde_json::Map<String, serde_json::Value>>,
}

impl GraphqlBody {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            operation_name: None,
            variables: None,
        }
    }

    pub fn with_variables(
        mut self,
        variables: serde_json::Map<String, serde_json::Value>,
    ) -> Self {
        self.variables = Some(variables);
        self
    }

    pub fn with_operation_name(mut self, name: impl Into<String>) -> Self {
        self.operation_name = Some(name.into());
        self
    }
}

impl From<&str> for GraphqlBody {
    fn from(query: &str) -> Self {
        Self::new(query)
    }
}
