// Module declarations
mod analytics_ops;
mod api_key_ops;
mod batch_ops;
mod connection;
mod token_ops;
mod types;
mod user_ops;

// Re-export public types
pub use types::{DatabaseBackendType, DatabaseStats, SeaOrmDatabase};
