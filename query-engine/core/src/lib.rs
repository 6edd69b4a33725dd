#![deny(rust_2018_idioms, unsafe_code)]

//! The query engine core. A request runs the `Parse -> Validate -> Execute ->
//! Serialize` pipeline: the protocol layer hands an [`Operation`] in, the
//! validating parser checks it against the schema graph (collecting every
//! error, bounding structural depth), and the executor walks the parsed tree
//! depth-first against the entity store, recording field-level errors without
//! aborting siblings.

mod error;
pub mod executor;
pub mod query_document;
pub mod response_ir;

pub use error::CoreError;
pub use executor::QueryExecutor;
pub use query_document::*;
pub use response_ir::{FieldError, Item, List, Map, ResponseData};

pub type Result<T> = std::result::Result<T, CoreError>;
