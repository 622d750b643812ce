use lazy_static::lazy_static;
use regex::Regex;

use crate::auth::dto::RegisterRequest;
use crate::error::FieldError;

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

/// Checks every registration field and reports all failures together, not
/// just the first one.
pub(crate) fn validate_registration(payload: &RegisterRequest) -> Vec<FieldError> {
    let mut errors = Vec::new();

    if payload.firstname.trim().is_empty() {
        errors.push(FieldError {
            field: "firstname",
            message: "First name is required",
        });
    }
    if payload.lastname.trim().is_empty() {
        errors.push(FieldError {
            field: "lastname",
            message: "Last name is required",
        });
    }
    if !is_valid_email(&payload.email) {
        errors.push(FieldError {
            field: "email",
            message: "Valid email is required",
        });
    }
    if payload.password.chars().count() < 6 {
        errors.push(FieldError {
            field: "password",
            message: "Password must be at least 6 characters",
        });
    }

    errors
}
