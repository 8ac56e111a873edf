//! Request validation run by the handlers before any use case.
//!
//! Every check runs; all violations are reported together.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::AuthServiceError;

pub const PASSWORD_MIN_LEN: usize = 8;
pub const PASSWORD_MAX_LEN: usize = 128;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email regex compiles")
});

/// Rules `password` breaks, in a fixed order. Length counts characters.
pub fn password_violations(password: &str) -> Vec<String> {
    let mut violations = Vec::new();
    let len = password.chars().count();
    if len < PASSWORD_MIN_LEN {
        violations.push(format!("must be at least {PASSWORD_MIN_LEN} characters"));
    }
    if len > PASSWORD_MAX_LEN {
        violations.push(format!("must be at most {PASSWORD_MAX_LEN} characters"));
    }
    if !password.chars().any(char::is_uppercase) {
        violations.push("must contain at least one uppercase letter".to_owned());
    }
    if !password.chars().any(char::is_lowercase) {
        violations.push("must contain at least one lowercase letter".to_owned());
    }
    if !password.chars().any(char::is_numeric) {
        violations.push("must contain at least one number".to_owned());
    }
    if !password.chars().any(|c| !c.is_alphanumeric()) {
        violations.push("must contain at least one special character".to_owned());
    }
    violations
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

fn check_email(email: &str, violations: &mut Vec<String>) {
    if is_blank(email) {
        violations.push("email is required".to_owned());
    } else if !is_valid_email(email) {
        violations.push("email must be a well-formed email address".to_owned());
    }
}

fn into_result(violations: Vec<String>) -> Result<(), AuthServiceError> {
    if violations.is_empty() {
        Ok(())
    } else {
        Err(AuthServiceError::ValidationFailed(violations))
    }
}

pub fn validate_register(email: &str, password: &str, name: &str) -> Result<(), AuthServiceError> {
    let mut violations = Vec::new();
    check_email(email, &mut violations);
    if is_blank(password) {
        violations.push("password is required".to_owned());
    } else {
        let rules = password_violations(password);
        if !rules.is_empty() {
            violations.push(format!("password {}", rules.join(", ")));
        }
    }
    if is_blank(name) {
        violations.push("name is required".to_owned());
    }
    into_result(violations)
}

pub fn validate_login(email: &str, password: &str) -> Result<(), AuthServiceError> {
    let mut violations = Vec::new();
    check_email(email, &mut violations);
    if is_blank(password) {
        violations.push("password is required".to_owned());
    }
    into_result(violations)
}

pub fn validate_verify_email(identifier: &str, value: &str) -> Result<(), AuthServiceError> {
    let mut violations = Vec::new();
    if is_blank(identifier) {
        violations.push("identifier is required".to_owned());
    }
    if is_blank(value) {
        violations.push("value is required".to_owned());
    }
    into_result(violations)
}
