//! Boundary validation for user-supplied fields.
//!
//! One function per rule, each returning a specific reason on failure so
//! the presentation layer can show it verbatim. Limits match the ones the
//! storage schema enforces as a last resort.

use std::sync::OnceLock;

use regex::Regex;

use crate::error::TypeError;

/// Handles are 4–20 characters after trimming.
pub const HANDLE_MIN: usize = 4;
pub const HANDLE_MAX: usize = 20;
/// Secrets must be at least 6 characters.
pub const SECRET_MIN: usize = 6;
/// Display names are capped at 100 characters.
pub const DISPLAY_NAME_MAX: usize = 100;
/// Addresses are capped at 500 characters.
pub const ADDRESS_MAX: usize = 500;
/// Quantities are in kilograms, capped at one metric ton per request.
pub const QUANTITY_MAX_KG: f64 = 1000.0;

fn email_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[a-zA-Z0-9_+&*-]+(?:\.[a-zA-Z0-9_+&*-]+)*@(?:[a-zA-Z0-9-]+\.)+[a-zA-Z]{2,7}$")
            .expect("email pattern is valid")
    })
}

fn phone_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[0-9]{10,15}$").expect("phone pattern is valid"))
}

/// Validate a login handle: 4–20 characters after trimming.
pub fn validate_handle(handle: &str) -> Result<(), TypeError> {
    let len = handle.trim().chars().count();
    if !(HANDLE_MIN..=HANDLE_MAX).contains(&len) {
        return Err(TypeError::invalid(
            "handle",
            format!("must be {HANDLE_MIN}-{HANDLE_MAX} characters"),
        ));
    }
    Ok(())
}

/// Validate a secret: at least 6 characters, untrimmed.
pub fn validate_secret(secret: &str) -> Result<(), TypeError> {
    if secret.chars().count() < SECRET_MIN {
        return Err(TypeError::invalid(
            "secret",
            format!("must be at least {SECRET_MIN} characters"),
        ));
    }
    Ok(())
}

/// Validate a display name: non-empty, at most 100 characters.
pub fn validate_display_name(name: &str) -> Result<(), TypeError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(TypeError::invalid("display name", "must not be empty"));
    }
    if trimmed.chars().count() > DISPLAY_NAME_MAX {
        return Err(TypeError::invalid(
            "display name",
            format!("must be at most {DISPLAY_NAME_MAX} characters"),
        ));
    }
    Ok(())
}

/// Validate a contact email address.
pub fn validate_email(email: &str) -> Result<(), TypeError> {
    if email.trim().is_empty() || !email_pattern().is_match(email) {
        return Err(TypeError::invalid("email", "not a valid address"));
    }
    Ok(())
}

/// Validate a contact phone number: 10–15 digits.
pub fn validate_phone(phone: &str) -> Result<(), TypeError> {
    if !phone_pattern().is_match(phone) {
        return Err(TypeError::invalid("phone", "must be 10-15 digits"));
    }
    Ok(())
}

/// Validate a pickup quantity: positive, at most 1000 kg.
pub fn validate_quantity(quantity_kg: f64) -> Result<(), TypeError> {
    if !quantity_kg.is_finite() || quantity_kg <= 0.0 {
        return Err(TypeError::invalid("quantity", "must be greater than zero"));
    }
    if quantity_kg > QUANTITY_MAX_KG {
        return Err(TypeError::invalid(
            "quantity",
            format!("must be at most {QUANTITY_MAX_KG} kg"),
        ));
    }
    Ok(())
}

/// Validate a pickup address: non-empty, at most 500 characters.
pub fn validate_address(address: &str) -> Result<(), TypeError> {
    let trimmed = address.trim();
    if trimmed.is_empty() {
        return Err(TypeError::invalid("address", "must not be empty"));
    }
    if trimmed.chars().count() > ADDRESS_MAX {
        return Err(TypeError::invalid(
            "address",
            format!("must be at most {ADDRESS_MAX} characters"),
        ));
    }
    Ok(())
}

/// Validate a feedback rating: whole stars, 1 through 5.
pub fn validate_rating(rating: u8) -> Result<(), TypeError> {
    if !(1..=5).contains(&rating) {
        return Err(TypeError::invalid("rating", "must be between 1 and 5"));
    }
    Ok(())
}

/// Validate feedback comments: required, non-empty.
pub fn validate_comments(comments: &str) -> Result<(), TypeError> {
    if comments.trim().is_empty() {
        return Err(TypeError::invalid("comments", "must not be empty"));
    }
    Ok(())
}
