#![deny(rust_2018_idioms, unsafe_code)]

//! Domain records for the social platform: users, posts, profiles, member
//! types and the subscription edge set, plus the scalar value representation
//! shared by the store, the schema graph and the query engine.

mod error;
mod inputs;
mod records;
mod value;

pub use error::ConversionFailure;
pub use inputs::*;
pub use records::*;
pub use value::ScalarValue;

pub mod prelude {
    pub use crate::error::ConversionFailure;
    pub use crate::inputs::*;
    pub use crate::records::*;
    pub use crate::value::ScalarValue;
}
