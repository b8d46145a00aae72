//! Authentication and authorization types

use crate::core::models::{ApiKey, User, UserSession};
use crate::core::models::RequestContext;

/// Authentication result
#[derive(Debug, Clone)]
pub struct AuthResult {
    /// Whether authentication was successful
    pub success: bool,
    /// Authenticated user (if any)
    pub user: Option<User>,
    /// API key used (if any)
    pub api_key: Option<ApiKey>,
    /// Session information (if any)
    pub session: Option<UserSession>,
    /// Error message (if authentication failed)
    pub error: Option<String>,
    /// Request context
    pub context: RequestContext,
}

/// Authentication method
#[derive(Debug, Clone)]
pub enum AuthMethod {
    /// API key authentication
    ApiKey(String),
    /// No authentication
    None,
}
