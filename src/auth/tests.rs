//! Tests for authentication module

#[cfg(test)]
mod tests {
    use crate::auth::types::{AuthMethod, AuthResult};
    use crate::core::models::RequestContext;

    #[test]
    fn test_auth_result_creation() {
        let context = RequestContext::new();
        let result = AuthResult {
            success: true,
            user: None,
            api_key: None,
            session: None,
            error: None,
            context,
        };

        assert!(result.success);
        assert!(result.error.is_none());
    }

    #[test]
    fn test_auth_result_failed() {
        let context = RequestContext::new();
        let result = AuthResult {
            success: false,
            user: None,
            api_key: None,
            session: None,
            error: Some("Authentication failed".to_string()),
            context,
        };

        assert!(!result.success);
        assert!(result.error.is_some());
        assert_eq!(result.error.unwrap(), "Authentication failed");
    }

    #[test]
    fn test_auth_method_variants() {
        let api_key_method = AuthMethod::ApiKey("key".to_string());
        let none_method = AuthMethod::None;

        assert!(matches!(api_key_method, AuthMethod::ApiKey(_)));
        assert!(matches!(none_method, AuthMethod::None));
    }

    #[test]
    fn test_auth_method_api_key_extraction() {
        let key = "sk-test-key-12345";
        let method = AuthMethod::ApiKey(key.to_string());

        if let AuthMethod::ApiKey(extracted) = method {
            assert_eq!(extracted, key);
        } else {
            panic!("Expected ApiKey variant");
        }
    }

    #[test]
    fn test_auth_result_clone() {
        let context = RequestContext::new();
        let result = AuthResult {
            success: true,
            user: None,
            api_key: None,
            session: None,
            error: None,
            context,
        };

        let cloned = result.clone();
        assert_eq!(result.success, cloned.success);
    }

    #[test]
    fn test_auth_method_clone() {
        let method = AuthMethod::ApiKey("token".to_string());
        let cloned = method.clone();

        if let (AuthMethod::ApiKey(orig), AuthMethod::ApiKey(cloned_key)) = (&method, &cloned) {
            assert_eq!(orig, cloned_key);
        } else {
            panic!("Clone failed");
        }
    }
}
