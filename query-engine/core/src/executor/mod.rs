//! Operation execution. Root fields dispatch on their schema `QueryInfo`;
//! nested fields run through the relation-resolver registry, depth-first,
//! with sibling isolation of failures.

mod read;
mod write;

use crate::error::CoreError;
use crate::query_document::{Operation, OperationType, QueryDocumentParser};
use crate::response_ir::{FieldError, Item, Map, ResponseData};
use memory_connector::DataStore;
use schema::QuerySchema;
use std::sync::Arc;
use std::time::Instant;

pub struct QueryExecutor {
    store: Arc<DataStore>,
}

impl QueryExecutor {
    pub fn new(store: Arc<DataStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &DataStore {
        &self.store
    }

    /// Runs the full pipeline for one operation: validation against the
    /// schema graph, then depth-first resolution. Validation failure aborts
    /// before any resolver runs; execution-time failures degrade to
    /// field-level errors in the returned [`ResponseData`].
    ///
    /// The optional `deadline` is checked before every field resolution; once
    /// it passes, remaining fields are nulled with `DeadlineExceeded` errors.
    pub fn execute(
        &self,
        schema: &QuerySchema,
        operation: Operation,
        deadline: Option<Instant>,
    ) -> crate::Result<ResponseData> {
        let operation = operation.dedup_selections();
        let root_object = match operation.operation_type {
            OperationType::Query => schema.query_object(),
            OperationType::Mutation => schema.mutation_object(),
        };

        let parsed = QueryDocumentParser::parse(schema, root_object, &operation.selections)
            .map_err(CoreError::Validation)?;

        tracing::debug!(
            operation = ?operation.operation_type,
            root_fields = parsed.fields.len(),
            "executing operation"
        );

        let mut ctx = ResolutionContext {
            store: &self.store,
            deadline,
            errors: Vec::new(),
        };

        let mut data = Map::with_capacity(parsed.fields.len());
        for pair in &parsed.fields {
            let key = pair.parsed_field.response_key().to_owned();
            let path = vec![key.clone()];

            let resolved = match operation.operation_type {
                OperationType::Query => read::resolve_root(&mut ctx, pair, &path),
                OperationType::Mutation => write::resolve_root(&mut ctx, pair, &path),
            };

            match resolved {
                Ok(item) => {
                    data.insert(key, item);
                }
                Err(error) => {
                    ctx.errors.push(FieldError::new(path, error));
                    data.insert(key, Item::null());
                }
            }
        }

        Ok(ResponseData {
            data,
            errors: ctx.errors,
        })
    }
}

pub(crate) struct ResolutionContext<'a> {
    pub(crate) store: &'a DataStore,
    pub(crate) deadline: Option<Instant>,
    pub(crate) errors: Vec<FieldError>,
}

impl ResolutionContext<'_> {
    pub(crate) fn check_deadline(&self) -> crate::Result<()> {
        match self.deadline {
            Some(deadline) if Instant::now() >= deadline => Err(CoreError::DeadlineExceeded),
            _ => Ok(()),
        }
    }
}
