//! Request types - re-exports from split modules for backward compatibility
//!
//! This module provides backward compatibility for code that imports from requests::

// Re-export everything from the new split modules
pub use super::anthropic::*;
pub use super::chat::*;
pub use super::content::*;
pub use super::embedding::*;
pub use super::image::*;
pub use super::message::*;
pub use super::tools::*;
