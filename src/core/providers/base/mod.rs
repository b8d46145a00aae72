//! Module
//!
//! Contains base components shared by all providers

pub mod config;
pub mod connection_pool;
pub mod pricing;
pub mod sse;

pub use config::BaseConfig;
pub use connection_pool::{
    ConnectionPool, GlobalPoolManager, HttpMethod, PoolConfig,
};
pub use pricing::{PricingDatabase, get_pricing_db};
pub use sse::{
    AnthropicTransformer, OpenAICompatibleTransformer, SSEEvent, SSEEventType, SSETransformer,
    UnifiedSSEParser, UnifiedSSEStream,
};
