//! Tests for auth module
//!
//! These tests verify core authentication functionality including:
//! - JWT token encoding and validation
//! - Sign-up validation (attribute and password policy)
//! - Claims structure

#[cfg(test)]
mod tests {
    use super::super::*;
    use crate::common::Validator;
    use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

    fn signup_request(password: &str) -> models::SignupRequest {
        models::SignupRequest {
            email: "x@y.com".to_string(),
            given_name: "A".to_string(),
            family_name: "B".to_string(),
            password: password.to_string(),
        }
    }

    #[test]
    fn test_claims_structure() {
        let claims = models::Claims {
            sub: "U_TESTID".to_string(),
            email: Some("test@example.com".to_string()),
            jti: "K_TESTID".to_string(),
            exp: 1234567890,
        };

        assert_eq!(claims.sub, "U_TESTID");
        assert_eq!(claims.email.as_deref(), Some("test@example.com"));
        assert_eq!(claims.exp, 1234567890);
    }

    #[test]
    fn test_jwt_encoding_and_decoding() {
        let secret = "test_secret_key";
        let claims = models::Claims {
            sub: "U_TEST01".to_string(),
            email: Some("test@example.com".to_string()),
            jti: "K_TEST01".to_string(),
            exp: 9999999999, // Far future
        };

        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .expect("Failed to encode token");

        let decoded = decode::<models::Claims>(
            &token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &Validation::new(Algorithm::HS256),
        )
        .expect("Failed to decode token");

        assert_eq!(decoded.claims.sub, "U_TEST01");
        assert_eq!(decoded.claims.email.as_deref(), Some("test@example.com"));
        assert_eq!(decoded.claims.exp, 9999999999);
    }

    #[test]
    fn test_jwt_validation_fails_with_wrong_secret() {
        let secret = "test_secret_key";
        let wrong_secret = "wrong_secret_key";

        let claims = models::Claims {
            sub: "U_TEST01".to_string(),
            email: None,
            jti: "K_TEST01".to_string(),
            exp: 9999999999,
        };

        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .expect("Failed to encode token");

        let result = decode::<models::Claims>(
            &token,
            &DecodingKey::from_secret(wrong_secret.as_bytes()),
            &Validation::new(Algorithm::HS256),
        );

        assert!(
            result.is_err(),
            "Token validation should fail with wrong secret"
        );
    }

    #[test]
    fn test_jwt_validation_fails_when_expired() {
        let secret = "test_secret_key";
        let claims = models::Claims {
            sub: "U_TEST01".to_string(),
            email: None,
            jti: "K_TEST01".to_string(),
            exp: 1, // 1970, long expired
        };

        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .expect("Failed to encode token");

        let result = decode::<models::Claims>(
            &token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &Validation::new(Algorithm::HS256),
        );

        assert!(result.is_err(), "Expired token should be rejected");
    }

    #[test]
    fn test_signup_validator_accepts_policy_compliant_request() {
        // The canonical acceptance scenario: length >= 8, upper, lower, digit
        let result = validators::SignupValidator.validate(&signup_request("Abcdef12"));
        assert!(result.is_valid());
        assert!(result.errors.is_empty());
    }

    #[test]
    fn test_signup_validator_rejects_short_password() {
        let result = validators::SignupValidator.validate(&signup_request("Abc12"));
        assert!(!result.is_valid());
        assert!(result.has_error_on("password"));
    }

    #[test]
    fn test_signup_validator_rejects_missing_uppercase() {
        let result = validators::SignupValidator.validate(&signup_request("abcdef12"));
        assert!(!result.is_valid());
        assert!(result.has_error_on("password"));
    }

    #[test]
    fn test_signup_validator_rejects_missing_lowercase() {
        let result = validators::SignupValidator.validate(&signup_request("ABCDEF12"));
        assert!(!result.is_valid());
        assert!(result.has_error_on("password"));
    }

    #[test]
    fn test_signup_validator_rejects_missing_digit() {
        let result = validators::SignupValidator.validate(&signup_request("Abcdefgh"));
        assert!(!result.is_valid());
        assert!(result.has_error_on("password"));
    }

    #[test]
    fn test_signup_validator_does_not_require_symbols() {
        // Policy divergence resolved: symbols are not required
        let result = validators::SignupValidator.validate(&signup_request("Abcdef12"));
        assert!(result.is_valid());

        // ...but they are allowed
        let result = validators::SignupValidator.validate(&signup_request("Abcdef1!"));
        assert!(result.is_valid());
    }

    #[test]
    fn test_signup_validator_rejects_bad_attributes() {
        let mut request = signup_request("Abcdef12");
        request.email = "not-an-email".to_string();
        request.given_name = "  ".to_string();
        request.family_name = String::new();

        let result = validators::SignupValidator.validate(&request);
        assert!(!result.is_valid());
        assert!(result.has_error_on("email"));
        assert!(result.has_error_on("given_name"));
        assert!(result.has_error_on("family_name"));
    }

    #[test]
    fn test_login_validator_requires_both_fields() {
        let result = validators::LoginValidator.validate(&models::LoginRequest {
            email: String::new(),
            password: String::new(),
        });
        assert!(!result.is_valid());
        assert!(result.has_error_on("email"));
        assert!(result.has_error_on("password"));
    }

    #[test]
    fn test_user_attributes_report_email_verified_as_string() {
        let user = models::User {
            id: "U_TEST01".to_string(),
            email: "test@example.com".to_string(),
            given_name: "Test".to_string(),
            family_name: "User".to_string(),
            email_verified: true,
            password_hash: "$argon2id$irrelevant".to_string(),
            created_at: Some("2024-01-01".to_string()),
        };

        let attrs = user.attributes();
        assert_eq!(attrs["sub"], "U_TEST01");
        assert_eq!(attrs["email"], "test@example.com");
        // Boolean-as-string, matching the provider contract
        assert_eq!(attrs["email_verified"], "true");
        assert_eq!(attrs["given_name"], "Test");
        assert_eq!(attrs["family_name"], "User");
    }

    #[test]
    fn test_user_serialization_never_exposes_password_hash() {
        let user = models::User {
            id: "U_TEST01".to_string(),
            email: "test@example.com".to_string(),
            given_name: "Test".to_string(),
            family_name: "User".to_string(),
            email_verified: false,
            password_hash: "$argon2id$secret".to_string(),
            created_at: None,
        };

        let json = serde_json::to_string(&user).expect("Failed to serialize user");
        assert!(!json.contains("argon2"));
        assert!(!json.contains("password_hash"));
    }

    #[test]
    fn test_bare_bearer_token_strips_scheme() {
        assert_eq!(extractors::bare_bearer_token("Bearer abc.def.ghi"), "abc.def.ghi");
        assert_eq!(extractors::bare_bearer_token("abc.def.ghi"), "abc.def.ghi");
    }
}
