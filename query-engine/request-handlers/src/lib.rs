#![deny(rust_2018_idioms, unsafe_code)]

//! The transport-agnostic request surface: a GraphQL body in, a
//! `{ data, errors }` envelope out. The surrounding HTTP layer only
//! deserializes into [`GraphqlBody`] and serializes the [`GQLResponse`].

mod error;
mod graphql;
mod handler;
mod response;

pub use error::HandlerError;
pub use graphql::{GraphQlProtocolAdapter, GraphqlBody};
pub use handler::RequestHandler;
pub use response::{GQLError, GQLResponse};

pub type Result<T> = std::result::Result<T, HandlerError>;
