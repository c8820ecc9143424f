// src/auth/validators.rs

use regex::Regex;
use std::sync::OnceLock;

use super::models::{LoginRequest, SignupRequest};
use crate::common::{ValidationResult, Validator};

// ============================================================================
// Sign-up / Sign-in Validators
// ============================================================================

fn email_looks_valid(email: &str) -> bool {
    static EMAIL_RE: OnceLock<Regex> = OnceLock::new();
    let re = EMAIL_RE
        .get_or_init(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email regex is valid"));
    re.is_match(email)
}

pub struct SignupValidator;

impl Validator<SignupRequest> for SignupValidator {
    fn validate(&self, data: &SignupRequest) -> ValidationResult {
        let mut result = ValidationResult::new();

        // Validate email
        if data.email.trim().is_empty() {
            result.add_error("email", "Email is required");
        } else if data.email.len() > 255 {
            result.add_error("email", "Email must be less than 255 characters");
        } else if !email_looks_valid(&data.email) {
            result.add_error("email", "Email address is not valid");
        }

        // Validate given_name
        if data.given_name.trim().is_empty() {
            result.add_error("given_name", "First name is required");
        } else if data.given_name.len() > 255 {
            result.add_error("given_name", "First name must be less than 255 characters");
        }

        // Validate family_name
        if data.family_name.trim().is_empty() {
            result.add_error("family_name", "Last name is required");
        } else if data.family_name.len() > 255 {
            result.add_error("family_name", "Last name must be less than 255 characters");
        }

        // Password policy: minimum length 8, at least one uppercase letter,
        // one lowercase letter and one digit. Symbols are not required.
        if data.password.chars().count() < 8 {
            result.add_error("password", "Password must be at least 8 characters");
        }
        if !data.password.chars().any(|c| c.is_uppercase()) {
            result.add_error("password", "Password must contain an uppercase letter");
        }
        if !data.password.chars().any(|c| c.is_lowercase()) {
            result.add_error("password", "Password must contain a lowercase letter");
        }
        if !data.password.chars().any(|c| c.is_ascii_digit()) {
            result.add_error("password", "Password must contain a digit");
        }

        result
    }
}

pub struct LoginValidator;

impl Validator<LoginRequest> for LoginValidator {
    fn validate(&self, data: &LoginRequest) -> ValidationResult {
        let mut result = ValidationResult::new();

        if data.email.trim().is_empty() {
            result.add_error("email", "Email is required");
        }
        if data.password.is_empty() {
            result.add_error("password", "Password is required");
        }

        result
    }
}
