//! # Validation Module
//!
//! Input validation utilities for DealDesk forms.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Dashboard form (TypeScript)                                  │
//! │  ├── Basic format checks (empty, length)                               │
//! │  └── Immediate user feedback                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE (before anything leaves the machine)             │
//! │  ├── Field format and range rules                                      │
//! │  └── Keeps obviously bad payloads off the wire                         │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Backend service                                              │
//! │  └── Authoritative validation; its rejections are surfaced verbatim    │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The email/URL/tax-id checks here are pragmatic form checks, not full
//! RFC parsers. The backend is the authority; these only catch typos early.

use crate::error::ValidationError;
use crate::{MAX_DOCUMENT_ITEMS, MAX_ITEM_QUANTITY};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a company or client name.
///
/// ## Rules
/// - Must not be empty
/// - Must be at most 200 characters
pub fn validate_company_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "company_name".to_string(),
        });
    }

    if name.len() > 200 {
        return Err(ValidationError::TooLong {
            field: "company_name".to_string(),
            max: 200,
        });
    }

    Ok(())
}

/// Validates an offer/contract title or a line-item name.
///
/// ## Rules
/// - Must not be empty
/// - Must be at most 200 characters
pub fn validate_title(field: &str, value: &str) -> ValidationResult<()> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if value.len() > 200 {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: 200,
        });
    }

    Ok(())
}

/// Validates an email address.
///
/// ## Rules
/// - Must not be empty, at most 254 characters, no whitespace
/// - Exactly one `@` with a non-empty local part
/// - Domain must contain a dot that is not at either edge
pub fn validate_email(email: &str) -> ValidationResult<()> {
    let email = email.trim();

    if email.is_empty() {
        return Err(ValidationError::Required {
            field: "email".to_string(),
        });
    }

    if email.len() > 254 {
        return Err(ValidationError::TooLong {
            field: "email".to_string(),
            max: 254,
        });
    }

    let invalid = |reason: &str| ValidationError::InvalidFormat {
        field: "email".to_string(),
        reason: reason.to_string(),
    };

    if email.chars().any(char::is_whitespace) {
        return Err(invalid("must not contain whitespace"));
    }

    let mut parts = email.split('@');
    let (local, domain) = match (parts.next(), parts.next(), parts.next()) {
        (Some(local), Some(domain), None) => (local, domain),
        _ => return Err(invalid("must contain exactly one '@'")),
    };

    if local.is_empty() {
        return Err(invalid("missing part before '@'"));
    }

    if !domain.contains('.') || domain.starts_with('.') || domain.ends_with('.') {
        return Err(invalid("domain must contain a dot"));
    }

    Ok(())
}

/// Validates a website URL.
///
/// ## Rules
/// - Must start with `http://` or `https://`
/// - Must have a non-empty host and no whitespace
pub fn validate_website(url: &str) -> ValidationResult<()> {
    let url = url.trim();

    let invalid = |reason: &str| ValidationError::InvalidFormat {
        field: "website".to_string(),
        reason: reason.to_string(),
    };

    if url.is_empty() {
        return Err(ValidationError::Required {
            field: "website".to_string(),
        });
    }

    let rest = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
        .ok_or_else(|| invalid("must start with http:// or https://"))?;

    if rest.is_empty() {
        return Err(invalid("missing host"));
    }

    if url.chars().any(char::is_whitespace) {
        return Err(invalid("must not contain whitespace"));
    }

    Ok(())
}

/// Validates a tax identification number (VAT ID or local equivalent).
///
/// ## Rules
/// - Must not be empty, at most 32 characters
/// - Letters, digits, hyphens, dots, and spaces only
pub fn validate_tax_id(tax_id: &str) -> ValidationResult<()> {
    let tax_id = tax_id.trim();

    if tax_id.is_empty() {
        return Err(ValidationError::Required {
            field: "tax_id".to_string(),
        });
    }

    if tax_id.len() > 32 {
        return Err(ValidationError::TooLong {
            field: "tax_id".to_string(),
            max: 32,
        });
    }

    if !tax_id
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-' || c == '.' || c == ' ')
    {
        return Err(ValidationError::InvalidFormat {
            field: "tax_id".to_string(),
            reason: "must contain only letters, digits, hyphens, dots, and spaces".to_string(),
        });
    }

    Ok(())
}

/// Validates a search query.
///
/// ## Rules
/// - Can be empty (returns all/default results)
/// - Maximum 100 characters
///
/// ## Returns
/// The trimmed query string.
pub fn validate_search_query(query: &str) -> ValidationResult<String> {
    let query = query.trim();

    if query.len() > 100 {
        return Err(ValidationError::TooLong {
            field: "query".to_string(),
            max: 100,
        });
    }

    Ok(query.to_string())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a line-item quantity.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed MAX_ITEM_QUANTITY
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if qty > MAX_ITEM_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_ITEM_QUANTITY,
        });
    }

    Ok(())
}

/// Validates a unit price in cents.
///
/// ## Rules
/// - Must be non-negative (>= 0)
/// - Zero is allowed (free lines)
pub fn validate_unit_price_cents(cents: i64) -> ValidationResult<()> {
    if cents < 0 {
        return Err(ValidationError::OutOfRange {
            field: "unit_price".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

/// Validates a percentage rate in basis points (discount or VAT).
///
/// ## Rules
/// - Must be between 0 and 10000 (0% to 100%)
pub fn validate_rate_bps(field: &str, bps: u32) -> ValidationResult<()> {
    if bps > 10000 {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: 0,
            max: 10000,
        });
    }

    Ok(())
}

// =============================================================================
// Collection Validators
// =============================================================================

/// Validates document size (number of line items) before adding one more.
///
/// ## Rules
/// - Must not exceed MAX_DOCUMENT_ITEMS
pub fn validate_document_size(current_items: usize) -> ValidationResult<()> {
    if current_items >= MAX_DOCUMENT_ITEMS {
        return Err(ValidationError::OutOfRange {
            field: "line items".to_string(),
            min: 0,
            max: MAX_DOCUMENT_ITEMS as i64,
        });
    }

    Ok(())
}

// =============================================================================
// UUID Validators
// =============================================================================

/// Validates a UUID string format.
///
/// ## Rules
/// - Must be a valid UUID format
/// - 36 characters with hyphens: xxxxxxxx-xxxx-xxxx-xxxx-xxxxxxxxxxxx
pub fn validate_uuid(id: &str) -> ValidationResult<()> {
    if id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "id".to_string(),
        });
    }

    uuid::Uuid::parse_str(id).map_err(|_| ValidationError::InvalidFormat {
        field: "id".to_string(),
        reason: "must be a valid UUID".to_string(),
    })?;

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_company_name() {
        assert!(validate_company_name("Acme GmbH").is_ok());
        assert!(validate_company_name("").is_err());
        assert!(validate_company_name("   ").is_err());
        assert!(validate_company_name(&"A".repeat(300)).is_err());
    }

    #[test]
    fn test_validate_title() {
        assert!(validate_title("title", "Website redesign Q3").is_ok());
        assert!(validate_title("title", "").is_err());
        assert!(validate_title("name", &"x".repeat(201)).is_err());
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("anna@example.com").is_ok());
        assert!(validate_email("a.b+tag@mail.example.co").is_ok());

        assert!(validate_email("").is_err());
        assert!(validate_email("no-at-sign").is_err());
        assert!(validate_email("two@@example.com").is_err());
        assert!(validate_email("@example.com").is_err());
        assert!(validate_email("user@nodot").is_err());
        assert!(validate_email("user@.com").is_err());
        assert!(validate_email("has space@example.com").is_err());
    }

    #[test]
    fn test_validate_website() {
        assert!(validate_website("https://example.com").is_ok());
        assert!(validate_website("http://intranet").is_ok());

        assert!(validate_website("").is_err());
        assert!(validate_website("ftp://example.com").is_err());
        assert!(validate_website("example.com").is_err());
        assert!(validate_website("https://").is_err());
        assert!(validate_website("https://bad host.com").is_err());
    }

    #[test]
    fn test_validate_tax_id() {
        assert!(validate_tax_id("DE123456789").is_ok());
        assert!(validate_tax_id("PL 527-020-11-11").is_ok());

        assert!(validate_tax_id("").is_err());
        assert!(validate_tax_id(&"1".repeat(40)).is_err());
        assert!(validate_tax_id("DE#123").is_err());
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(MAX_ITEM_QUANTITY).is_ok());

        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-1).is_err());
        assert!(validate_quantity(MAX_ITEM_QUANTITY + 1).is_err());
    }

    #[test]
    fn test_validate_unit_price_cents() {
        assert!(validate_unit_price_cents(0).is_ok()); // free line
        assert!(validate_unit_price_cents(1099).is_ok());
        assert!(validate_unit_price_cents(-100).is_err());
    }

    #[test]
    fn test_validate_rate_bps() {
        assert!(validate_rate_bps("vat_rate", 0).is_ok());
        assert!(validate_rate_bps("vat_rate", 2300).is_ok());
        assert!(validate_rate_bps("discount", 10000).is_ok());
        assert!(validate_rate_bps("discount", 10001).is_err());
    }

    #[test]
    fn test_validate_document_size() {
        assert!(validate_document_size(0).is_ok());
        assert!(validate_document_size(MAX_DOCUMENT_ITEMS - 1).is_ok());
        assert!(validate_document_size(MAX_DOCUMENT_ITEMS).is_err());
    }

    #[test]
    fn test_validate_uuid() {
        assert!(validate_uuid("550e8400-e29b-41d4-a716-446655440000").is_ok());
        assert!(validate_uuid("").is_err());
        assert!(validate_uuid("not-a-uuid").is_err());
    }

    #[test]
    fn test_validate_search_query() {
        assert_eq!(validate_search_query("  acme  ").unwrap(), "acme");
        assert_eq!(validate_search_query("").unwrap(), "");
        assert!(validate_search_query(&"q".repeat(150)).is_err());
    }
}
