//! # Wire Payloads
//!
//! Request and response shapes for the backend REST API.
//!
//! Entities (Client, Offer, Contract, FollowUp) come back in the shapes
//! defined by `dealdesk-core::types`; this module adds the envelopes and
//! inputs around them: list queries, pagination, create/update bodies,
//! status changes, chat turns, and workspace settings.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use dealdesk_core::types::{FollowUpPriority, LineItem};
use dealdesk_core::validation::{
    self, ValidationResult,
};

// =============================================================================
// List Queries & Pagination
// =============================================================================

/// Query parameters for list endpoints.
///
/// ## Usage
/// ```rust
/// use dealdesk_client::dto::ListQuery;
///
/// let query = ListQuery::page(2).with_per_page(50).with_search("acme");
/// assert_eq!(
///     query.to_query_pairs(),
///     vec![
///         ("page", "2".to_string()),
///         ("per_page", "50".to_string()),
///         ("search", "acme".to_string()),
///     ]
/// );
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListQuery {
    /// 1-based page number.
    pub page: u32,

    /// Items per page.
    pub per_page: u32,

    /// Sort key, backend-defined ("created_at", "-total_gross").
    pub sort: Option<String>,

    /// Free-text search filter.
    pub search: Option<String>,
}

impl Default for ListQuery {
    fn default() -> Self {
        ListQuery {
            page: 1,
            per_page: 25,
            sort: None,
            search: None,
        }
    }
}

impl ListQuery {
    /// Query for the given 1-based page with default page size.
    pub fn page(page: u32) -> Self {
        ListQuery {
            page: page.max(1),
            ..Default::default()
        }
    }

    /// Sets the page size.
    pub fn with_per_page(mut self, per_page: u32) -> Self {
        self.per_page = per_page.max(1);
        self
    }

    /// Sets the sort key.
    pub fn with_sort(mut self, sort: impl Into<String>) -> Self {
        self.sort = Some(sort.into());
        self
    }

    /// Sets the search filter. Empty/whitespace-only search is dropped.
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        let search = search.into();
        let trimmed = search.trim();
        self.search = if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        };
        self
    }

    /// Encodes the query as URL query pairs, skipping unset fields.
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("page", self.page.to_string()),
            ("per_page", self.per_page.to_string()),
        ];
        if let Some(ref sort) = self.sort {
            pairs.push(("sort", sort.clone()));
        }
        if let Some(ref search) = self.search {
            pairs.push(("search", search.clone()));
        }
        pairs
    }
}

/// One page of a list response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    /// Items on this page, in backend order.
    pub items: Vec<T>,

    /// Total matching items across all pages.
    pub total: u64,

    /// 1-based page number echoed back.
    pub page: u32,

    /// Page size echoed back.
    pub per_page: u32,
}

impl<T> Page<T> {
    /// True if pages after this one exist.
    pub fn has_more(&self) -> bool {
        (self.page as u64) * (self.per_page as u64) < self.total
    }

    /// Total number of pages (at least 1).
    pub fn total_pages(&self) -> u32 {
        if self.total == 0 {
            1
        } else {
            ((self.total + self.per_page as u64 - 1) / self.per_page as u64) as u32
        }
    }
}

// =============================================================================
// Create/Update Inputs
// =============================================================================

/// Body for creating or updating a client.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClientInput {
    pub company_name: String,
    pub contact_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub tax_id: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub postal_code: Option<String>,
    pub country: Option<String>,
    pub notes: Option<String>,
}

impl ClientInput {
    /// Validates the input before it is sent to the backend.
    ///
    /// Optional fields are only checked when present and non-empty.
    pub fn validate(&self) -> ValidationResult<()> {
        validation::validate_company_name(&self.company_name)?;

        if let Some(email) = non_empty(&self.email) {
            validation::validate_email(email)?;
        }
        if let Some(website) = non_empty(&self.website) {
            validation::validate_website(website)?;
        }
        if let Some(tax_id) = non_empty(&self.tax_id) {
            validation::validate_tax_id(tax_id)?;
        }

        Ok(())
    }
}

/// Body for creating or updating an offer.
///
/// Status is absent on purpose: new documents start as drafts and status
/// changes go through the dedicated status endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OfferInput {
    pub client_id: String,
    pub title: String,
    pub items: Vec<LineItem>,
    pub valid_until: Option<NaiveDate>,
    pub notes: Option<String>,
}

impl OfferInput {
    /// Validates the input before it is sent to the backend.
    pub fn validate(&self) -> ValidationResult<()> {
        validation::validate_uuid(&self.client_id)?;
        validation::validate_title("title", &self.title)?;
        validate_items(&self.items)
    }
}

/// Body for creating or updating a contract.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContractInput {
    pub client_id: String,
    pub title: String,
    pub items: Vec<LineItem>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub notes: Option<String>,
}

impl ContractInput {
    /// Validates the input before it is sent to the backend.
    pub fn validate(&self) -> ValidationResult<()> {
        validation::validate_uuid(&self.client_id)?;
        validation::validate_title("title", &self.title)?;
        validate_items(&self.items)
    }
}

/// Body for creating or updating a follow-up task.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FollowUpInput {
    pub title: String,
    pub description: Option<String>,
    pub due_date: DateTime<Utc>,
    pub priority: FollowUpPriority,
    pub client_id: Option<String>,
    pub offer_id: Option<String>,
    pub contract_id: Option<String>,
}

impl FollowUpInput {
    /// Validates the input before it is sent to the backend.
    pub fn validate(&self) -> ValidationResult<()> {
        validation::validate_title("title", &self.title)?;

        for id in [&self.client_id, &self.offer_id, &self.contract_id]
            .into_iter()
            .flatten()
        {
            validation::validate_uuid(id)?;
        }

        Ok(())
    }
}

/// Body for the status-change endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusChange<S> {
    pub status: S,
}

// Shared line-item validation for offers and contracts.
fn validate_items(items: &[LineItem]) -> ValidationResult<()> {
    if items.len() > dealdesk_core::MAX_DOCUMENT_ITEMS {
        return Err(dealdesk_core::ValidationError::OutOfRange {
            field: "line items".to_string(),
            min: 0,
            max: dealdesk_core::MAX_DOCUMENT_ITEMS as i64,
        });
    }

    for item in items {
        validation::validate_title("name", &item.name)?;
        validation::validate_quantity(item.quantity)?;
        validation::validate_unit_price_cents(item.unit_price_cents)?;
        validation::validate_rate_bps("vat_rate", item.vat_rate_bps)?;
        validation::validate_rate_bps("discount", item.discount_bps)?;
    }

    Ok(())
}

fn non_empty(field: &Option<String>) -> Option<&str> {
    field.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

// =============================================================================
// AI Chat
// =============================================================================

/// Who said a chat turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatRole {
    User,
    Assistant,
}

/// One prior turn of the assistant conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: ChatRole,
    pub content: String,
}

/// Body for `POST /ai/chat`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    /// The new user message.
    pub message: String,

    /// Prior turns, oldest first. The backend owns the model invocation;
    /// this is just enough context for it to continue the conversation.
    pub history: Vec<ChatTurn>,
}

/// Response from `POST /ai/chat`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatReply {
    pub reply: String,
}

// =============================================================================
// Settings
// =============================================================================

/// Workspace settings as exposed by `GET /settings`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkspaceSettings {
    /// Name shown on generated documents.
    pub company_name: String,

    /// Default VAT rate for new line items, basis points.
    pub default_vat_rate_bps: u32,

    /// ISO 4217 currency code ("EUR", "USD").
    pub currency: String,
}

/// Body for `POST /settings/api-key`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiKeyUpdate {
    pub api_key: String,
}

// =============================================================================
// Error Body
// =============================================================================

/// Error body shape the backend uses for non-2xx responses.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    pub message: String,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn item(quantity: i64, unit_price_cents: i64) -> LineItem {
        LineItem {
            name: "Line".to_string(),
            description: None,
            quantity,
            unit: "pcs".to_string(),
            unit_price_cents,
            vat_rate_bps: 2300,
            discount_bps: 0,
        }
    }

    #[test]
    fn test_query_pairs_skip_unset() {
        let query = ListQuery::page(1);
        assert_eq!(
            query.to_query_pairs(),
            vec![("page", "1".to_string()), ("per_page", "25".to_string())]
        );
    }

    #[test]
    fn test_query_search_trimmed() {
        let query = ListQuery::page(1).with_search("  acme  ");
        assert_eq!(query.search.as_deref(), Some("acme"));

        let query = ListQuery::page(1).with_search("   ");
        assert!(query.search.is_none());
    }

    #[test]
    fn test_page_has_more() {
        let page = Page::<u32> {
            items: vec![],
            total: 60,
            page: 2,
            per_page: 25,
        };
        assert!(page.has_more());
        assert_eq!(page.total_pages(), 3);

        let last = Page::<u32> {
            items: vec![],
            total: 60,
            page: 3,
            per_page: 25,
        };
        assert!(!last.has_more());
    }

    #[test]
    fn test_empty_page() {
        let page = Page::<u32> {
            items: vec![],
            total: 0,
            page: 1,
            per_page: 25,
        };
        assert!(!page.has_more());
        assert_eq!(page.total_pages(), 1);
    }

    #[test]
    fn test_client_input_validation() {
        let mut input = ClientInput {
            company_name: "Acme GmbH".to_string(),
            ..Default::default()
        };
        assert!(input.validate().is_ok());

        // Empty optional fields are ignored
        input.email = Some("".to_string());
        assert!(input.validate().is_ok());

        input.email = Some("not-an-email".to_string());
        assert!(input.validate().is_err());

        input.email = Some("anna@example.com".to_string());
        input.website = Some("https://acme.example".to_string());
        input.tax_id = Some("DE123456789".to_string());
        assert!(input.validate().is_ok());
    }

    #[test]
    fn test_offer_input_validation() {
        let input = OfferInput {
            client_id: "550e8400-e29b-41d4-a716-446655440000".to_string(),
            title: "Website redesign".to_string(),
            items: vec![item(2, 10000)],
            valid_until: None,
            notes: None,
        };
        assert!(input.validate().is_ok());

        let bad_client = OfferInput {
            client_id: "not-a-uuid".to_string(),
            ..input.clone()
        };
        assert!(bad_client.validate().is_err());

        let bad_quantity = OfferInput {
            items: vec![item(0, 10000)],
            ..input
        };
        assert!(bad_quantity.validate().is_err());
    }

    #[test]
    fn test_chat_request_wire_shape() {
        let request = ChatRequest {
            message: "Summarize open offers".to_string(),
            history: vec![ChatTurn {
                role: ChatRole::Assistant,
                content: "Hello!".to_string(),
            }],
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["message"], "Summarize open offers");
        assert_eq!(json["history"][0]["role"], "assistant");
    }
}
