mod body;
mod protocol_adapter;

pub use body::GraphqlBody;
pub use protocol_adapter::GraphQlProtocolAdapter;
