//! Composable field validators. Each function checks one constraint and
//! returns `None` on success; record-level validators aggregate the field
//! errors so a response can report everything wrong with a payload at once.

use crate::error::{AppError, AppResult};

pub const LATITUDE_RANGE: (f64, f64) = (-90.0, 90.0);
pub const LONGITUDE_RANGE: (f64, f64) = (-180.0, 180.0);

#[derive(Debug, Clone, PartialEq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Non-empty check for required string fields
pub fn required(field: &'static str, value: &str) -> Option<FieldError> {
    if value.trim().is_empty() {
        Some(FieldError::new(field, format!("{} is required", field)))
    } else {
        None
    }
}

/// Minimal structural email check: one '@' with non-empty local and domain
pub fn email_format(field: &'static str, value: &str) -> Option<FieldError> {
    let mut parts = value.splitn(2, '@');
    let local = parts.next().unwrap_or_default();
    let domain = parts.next();

    match domain {
        Some(domain) if !local.is_empty() && domain.contains('.') && !domain.starts_with('.') => {
            None
        }
        _ => Some(FieldError::new(field, "must be a valid email address")),
    }
}

/// Numeric parse plus range check for a coordinate stored as text
pub fn coordinate(field: &'static str, raw: &str, (min, max): (f64, f64)) -> Option<FieldError> {
    let value: f64 = match raw.trim().parse() {
        Ok(v) => v,
        Err(_) => return Some(FieldError::new(field, "must be numeric")),
    };

    if value < min || value > max {
        Some(FieldError::new(
            field,
            format!("must be between {} and {}", min, max),
        ))
    } else {
        None
    }
}

/// Coordinate pair rule: range validation applies only when BOTH values are
/// supplied; a partial update touching a single coordinate skips it.
pub fn coordinate_pair(latitude: Option<&str>, longitude: Option<&str>) -> Vec<FieldError> {
    let (Some(lat), Some(lon)) = (latitude, longitude) else {
        return Vec::new();
    };

    [
        coordinate("latitude", lat, LATITUDE_RANGE),
        coordinate("longitude", lon, LONGITUDE_RANGE),
    ]
    .into_iter()
    .flatten()
    .collect()
}

/// Record-level validator for registration payloads
pub fn registration(email: &str, password: &str, name: &str) -> Vec<FieldError> {
    let mut errors: Vec<FieldError> = [
        required("email", email),
        required("password", password),
        required("name", name),
    ]
    .into_iter()
    .flatten()
    .collect();

    if errors.iter().all(|e| e.field != "email") {
        errors.extend(email_format("email", email));
    }

    errors
}

/// Collapse field errors into a single `AppError::Validation`
pub fn ensure(errors: Vec<FieldError>) -> AppResult<()> {
    if errors.is_empty() {
        return Ok(());
    }

    let message = errors
        .iter()
        .map(|e| format!("{}: {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join("; ");

    Err(AppError::Validation(message))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_rejects_blank_values() {
        assert!(required("name", "").is_some());
        assert!(required("name", "   ").is_some());
        assert!(required("name", "Pothole").is_none());
    }

    #[test]
    fn email_format_accepts_plausible_addresses() {
        assert!(email_format("email", "user@example.com").is_none());
        assert!(email_format("email", "no-at-sign").is_some());
        assert!(email_format("email", "@example.com").is_some());
        assert!(email_format("email", "user@nodot").is_some());
    }

    #[test]
    fn coordinate_checks_parse_and_range() {
        assert!(coordinate("latitude", "40.0", LATITUDE_RANGE).is_none());
        assert!(coordinate("latitude", "-90", LATITUDE_RANGE).is_none());
        assert!(coordinate("latitude", "90.1", LATITUDE_RANGE).is_some());
        assert!(coordinate("latitude", "abc", LATITUDE_RANGE).is_some());
        assert!(coordinate("longitude", "-180", LONGITUDE_RANGE).is_none());
        assert!(coordinate("longitude", "181", LONGITUDE_RANGE).is_some());
    }

    #[test]
    fn coordinate_pair_skips_partial_input() {
        assert!(coordinate_pair(Some("999"), None).is_empty());
        assert!(coordinate_pair(None, Some("not-a-number")).is_empty());
        assert_eq!(coordinate_pair(Some("91"), Some("0")).len(), 1);
        assert_eq!(coordinate_pair(Some("abc"), Some("xyz")).len(), 2);
        assert!(coordinate_pair(Some("40.0"), Some("-75.0")).is_empty());
    }

    #[test]
    fn registration_aggregates_field_errors() {
        let errors = registration("", "", "");
        assert_eq!(errors.len(), 3);

        let errors = registration("not-an-email", "secret123", "A User");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "email");

        assert!(registration("user@example.com", "secret123", "A User").is_empty());
    }

    #[test]
    fn ensure_joins_messages() {
        let err = ensure(vec![
            FieldError::new("latitude", "must be numeric"),
            FieldError::new("longitude", "must be numeric"),
        ])
        .unwrap_err();

        let text = err.to_string();
        assert!(text.contains("latitude"));
        assert!(text.contains("longitude"));
    }
}
