use crate::graphql::{GraphQlProtocolAdapter, GraphqlBody};
use crate::response::GQLResponse;
use query_core::{CoreError, QueryExecutor};
use schema::QuerySchemaRef;
use std::fmt;
use std::time::Instant;

pub struct RequestHandler<'a> {
    executor: &'a QueryExecutor,
    query_schema: &'a QuerySchemaRef,
}

impl fmt::Debug for RequestHandler<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestHandler").finish()
    }
}

impl<'a> RequestHandler<'a> {
    pub fn new(executor: &'a QueryExecutor, query_schema: &'a QuerySchemaRef) -> Self {
        Self {
            executor,
            query_schema,
        }
    }

    pub fn handle(&self, body: GraphqlBody) -> GQLResponse {
        self.handle_with_deadline(body, None)
    }

    /// Drives the whole pipeline for one request. Syntax errors, unsupported
    /// constructs and validation failures answer with `data: null`; execution
    /// always answers with a data tree, possibly carrying field errors.
    pub fn handle_with_deadline(
        &self,
        body: GraphqlBody,
        deadline: Option<Instant>,
    ) -> GQLResponse {
        tracing::debug!(query = %body.query, "incoming GraphQL query");

        let variables = body.variables.unwrap_or_default();
        let operation = match GraphQlProtocolAdapter::convert(
            &body.query,
            body.operation_name.as_deref(),
            &variables,
        ) {
            Ok(operation) => operation,
            Err(err) => return GQLResponse::from_handler_error(err),
        };

        match self.executor.execute(self.query_schema, operation, deadline) {
            Ok(response_data) => GQLResponse::from(response_data),
            Err(CoreError::Validation(errors)) => GQLResponse::from_validation_errors(errors),
            Err(err) => GQLResponse::from_handler_error(err.into()),
        }
    }
}
