//! Network and Client utilities
//!
//! This module provides HTTP client management and network utilities.

pub mod client;
pub mod http;

// Re-export commonly used types and functions
pub use client::types::{HttpClientConfig, RequestMetrics, RetryConfig};
pub use client::utils::ClientUtils;
pub use http::*;
