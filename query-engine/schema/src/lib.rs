#![deny(rust_2018_idioms, unsafe_code)]

//! The static schema graph: entity object types, their scalar and relation
//! fields, the root query/mutation entry points and the relation-resolver
//! registry. Built once at process start and shared read-only between
//! requests as a [`QuerySchemaRef`].

mod build;
mod enum_type;
mod input_types;
mod output_types;
mod query_schema;
mod resolvers;

pub use build::build;
pub use enum_type::EnumType;
pub use input_types::{InputField, InputType};
pub use output_types::{InnerOutputType, ObjectId, ObjectType, OutputField, OutputType, ScalarType};
pub use query_schema::{QueryInfo, QuerySchema, QuerySchemaRef, QueryTag, DEFAULT_MAX_DEPTH};
pub use resolvers::{RelationResolver, ResolvedRelation};

use std::sync::Arc;

/// Builds the schema with the default depth limit.
pub fn build_default() -> QuerySchemaRef {
    Arc::new(build(DEFAULT_MAX_DEPTH))
}
