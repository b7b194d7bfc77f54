//! Identifier classification and masking utilities
//!
//! Login and recovery accept a single "email or phone" identifier, and the
//! services log the targets they act on. These helpers classify an
//! identifier and mask it before it reaches a log line.

use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap());

/// Check whether an identifier looks like an email address
///
/// Anything containing `@` is routed to the email channel; the stricter
/// regex is only used for format validation at the edges.
pub fn is_email(identifier: &str) -> bool {
    identifier.contains('@')
}

/// Check whether a string is a well-formed email address
pub fn is_valid_email(identifier: &str) -> bool {
    EMAIL_REGEX.is_match(identifier)
}

/// Mask a phone number for display (e.g., +9665****5678)
pub fn mask_phone(phone: &str) -> String {
    let normalized: String = phone
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '+')
        .collect();
    if normalized.len() >= 9 {
        format!(
            "{}****{}",
            &normalized[0..5],
            &normalized[normalized.len() - 4..]
        )
    } else {
        "****".to_string()
    }
}

/// Mask an email address for display (e.g., ah****@example.com)
pub fn mask_email(email: &str) -> String {
    match email.split_once('@') {
        Some((local, domain)) if local.len() > 2 => {
            format!("{}****@{}", &local[0..2], domain)
        }
        Some((_, domain)) => format!("****@{}", domain),
        None => "****".to_string(),
    }
}

/// Mask either kind of identifier based on its shape
pub fn mask_identifier(identifier: &str) -> String {
    if is_email(identifier) {
        mask_email(identifier)
    } else {
        mask_phone(identifier)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_email() {
        assert!(is_email("user@example.com"));
        assert!(!is_email("+966512345678"));
    }

    #[test]
    fn test_is_valid_email() {
        assert!(is_valid_email("user@example.com"));
        assert!(!is_valid_email("user@example"));
        assert!(!is_valid_email("not an email"));
    }

    #[test]
    fn test_mask_phone() {
        assert_eq!(mask_phone("+966512345678"), "+9665****5678");
        assert_eq!(mask_phone("12345"), "****");
    }

    #[test]
    fn test_mask_email() {
        assert_eq!(mask_email("ahmad@example.com"), "ah****@example.com");
        assert_eq!(mask_email("ab@example.com"), "****@example.com");
        assert_eq!(mask_email("not-an-email"), "****");
    }

    #[test]
    fn test_mask_identifier_routes_by_shape() {
        assert_eq!(mask_identifier("ahmad@example.com"), "ah****@example.com");
        assert_eq!(mask_identifier("+966512345678"), "+9665****5678");
    }
}
