pub mod editorial_aggregator;
pub mod fan_out;
pub mod ports;
pub mod resolve_data;
pub mod signature_resolver;

pub use editorial_aggregator::EditorialAggregator;
pub use ports::Backends;
pub use resolve_data::ResolveData;
pub use signature_resolver::SignatureResolver;
