//! Field checks shared by the request DTOs.

use crate::error::AppError;
use regex::Regex;
use rust_decimal::Decimal;
use std::sync::OnceLock;

const EMAIL_PATTERN: &str = r"^[^@\s]+@[^@\s]+\.[^@\s]+$";

static EMAIL_RE: OnceLock<Option<Regex>> = OnceLock::new();

fn email_regex() -> Result<&'static Regex, AppError> {
    EMAIL_RE
        .get_or_init(|| Regex::new(EMAIL_PATTERN).ok())
        .as_ref()
        .ok_or_else(|| AppError::Internal("invalid email pattern".into()))
}

pub fn required_text(field: &str, value: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{} is required", field)));
    }
    Ok(())
}

pub fn optional_text(field: &str, value: Option<&str>) -> Result<(), AppError> {
    match value {
        Some(v) => required_text(field, v),
        None => Ok(()),
    }
}

pub fn max_length(field: &str, value: &str, max: usize) -> Result<(), AppError> {
    if value.chars().count() > max {
        return Err(AppError::Validation(format!(
            "{} must be at most {} characters",
            field, max
        )));
    }
    Ok(())
}

pub fn email(field: &str, value: &str) -> Result<(), AppError> {
    if !email_regex()?.is_match(value.trim()) {
        return Err(AppError::Validation(format!("{} must be a valid email", field)));
    }
    Ok(())
}

pub fn non_negative(field: &str, value: Decimal) -> Result<(), AppError> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(AppError::Validation(format!(
            "{} must be a non-negative number",
            field
        )));
    }
    Ok(())
}

pub fn positive(field: &str, value: Decimal) -> Result<(), AppError> {
    if value <= Decimal::ZERO {
        return Err(AppError::Validation(format!(
            "{} must be a number greater than 0",
            field
        )));
    }
    Ok(())
}

pub fn positive_int(field: &str, value: i32) -> Result<(), AppError> {
    if value <= 0 {
        return Err(AppError::Validation(format!(
            "{} must be a whole number greater than 0",
            field
        )));
    }
    Ok(())
}

pub fn password(value: &str) -> Result<(), AppError> {
    if value.chars().count() < 6 {
        return Err(AppError::Validation(
            "Password must be at least 6 characters".into(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_must_not_be_blank() {
        assert!(required_text("F_Name", "Ravi").is_ok());
        assert!(required_text("F_Name", "   ").is_err());
        assert!(optional_text("Address", None).is_ok());
        assert!(optional_text("Address", Some("")).is_err());
    }

    #[test]
    fn email_shape() {
        assert!(email("Email", "asha@bank.in").is_ok());
        assert!(email("Email", "asha.bank.in").is_err());
        assert!(email("Email", "asha@bank").is_err());
    }

    #[test]
    fn email_pattern_compiled_once() {
        let first = email_regex().unwrap();
        let second = email_regex().unwrap();
        assert!(std::ptr::eq(first, second));
    }

    #[test]
    fn amounts() {
        assert!(non_negative("Balance", Decimal::ZERO).is_ok());
        assert!(non_negative("Balance", Decimal::new(-1, 2)).is_err());
        assert!(positive("Amount", Decimal::ZERO).is_err());
        assert!(positive("Amount", Decimal::new(1, 2)).is_ok());
        let err = positive("Amount", Decimal::new(-500, 0)).unwrap_err();
        assert_eq!(err.to_string(), "Amount must be a number greater than 0");
    }

    #[test]
    fn length_limits() {
        assert!(max_length("Purpose", "car", 3).is_ok());
        assert!(max_length("Purpose", "cars", 3).is_err());
        assert!(password("12345").is_err());
        assert!(password("123456").is_ok());
    }
}
