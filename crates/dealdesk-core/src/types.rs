//! # Domain Types
//!
//! Core domain types used throughout DealDesk.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │     Client      │   │     Offer       │   │    Contract     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │   │  id             │   │  id             │       │
//! │  │  company_name   │   │  number         │   │  number         │       │
//! │  │  email, tax_id  │   │  status, items  │   │  status, items  │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │      Rate       │   │    LineItem     │   │    FollowUp     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  bps (u32)      │   │  quantity, unit │   │  due_date       │       │
//! │  │  2300 = 23%     │   │  price, rates   │   │  status, prio   │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! All entities here are owned by the backend service; this crate mirrors
//! their shapes for local computation and preview, and never persists them.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Rate
// =============================================================================

/// A percentage rate represented in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000
/// 2300 bps = 23% (e.g., a common VAT rate)
/// 1000 bps = 10% (e.g., a line discount)
///
/// The same type covers VAT rates and discounts, so both flow through the
/// same rounding rule in [`Money::apply_rate`](crate::money::Money::apply_rate).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Rate(u32);

impl Rate {
    /// Creates a rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        Rate(bps)
    }

    /// Creates a rate from a percentage (for convenience).
    pub fn from_percentage(pct: f64) -> Self {
        Rate((pct * 100.0).round() as u32)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Zero rate.
    #[inline]
    pub const fn zero() -> Self {
        Rate(0)
    }

    /// Checks if the rate is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl Default for Rate {
    fn default() -> Self {
        Rate::zero()
    }
}

// =============================================================================
// Client
// =============================================================================

/// A client (customer company) offers and contracts are addressed to.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Client {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Legal/display name of the company.
    pub company_name: String,

    /// Primary contact person.
    pub contact_name: Option<String>,

    /// Contact email address.
    pub email: Option<String>,

    /// Contact phone number.
    pub phone: Option<String>,

    /// Company website URL.
    pub website: Option<String>,

    /// Tax identification number (VAT ID or local equivalent).
    pub tax_id: Option<String>,

    /// Street address.
    pub address: Option<String>,

    /// City.
    pub city: Option<String>,

    /// Postal code.
    pub postal_code: Option<String>,

    /// Country.
    pub country: Option<String>,

    /// Free-form notes.
    pub notes: Option<String>,

    /// When the client was created.
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,

    /// When the client was last updated.
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

// =============================================================================
// Line Item
// =============================================================================

/// A single line of an offer or contract.
///
/// Net/VAT/gross amounts are derived, never stored: they are recomputed from
/// these fields on every preview (see [`crate::totals`]).
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LineItem {
    /// Short name shown in the document table.
    pub name: String,

    /// Optional longer description.
    pub description: Option<String>,

    /// Quantity in whole units.
    pub quantity: i64,

    /// Free-form unit label ("pcs", "hour", "day").
    pub unit: String,

    /// Price per unit in cents.
    pub unit_price_cents: i64,

    /// VAT rate in basis points (2300 = 23%).
    pub vat_rate_bps: u32,

    /// Discount in basis points (1000 = 10%). 0 means no discount.
    pub discount_bps: u32,
}

impl LineItem {
    /// Returns the unit price as Money.
    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_cents(self.unit_price_cents)
    }

    /// Returns the VAT rate.
    #[inline]
    pub fn vat_rate(&self) -> Rate {
        Rate::from_bps(self.vat_rate_bps)
    }

    /// Returns the discount rate.
    #[inline]
    pub fn discount(&self) -> Rate {
        Rate::from_bps(self.discount_bps)
    }
}

// =============================================================================
// Offer
// =============================================================================

/// Lifecycle status of an offer.
///
/// Transition rules live in [`crate::lifecycle`]; the backend has the final
/// say on every change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum OfferStatus {
    /// Being edited, not yet visible to the client.
    Draft,
    /// Delivered to the client.
    Sent,
    /// Client has opened the offer.
    Viewed,
    /// Terms are being discussed.
    Negotiation,
    /// Client accepted. Terminal.
    Accepted,
    /// Client declined.
    Rejected,
    /// Validity window elapsed without a decision.
    Expired,
}

impl Default for OfferStatus {
    fn default() -> Self {
        OfferStatus::Draft
    }
}

impl std::fmt::Display for OfferStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            OfferStatus::Draft => "draft",
            OfferStatus::Sent => "sent",
            OfferStatus::Viewed => "viewed",
            OfferStatus::Negotiation => "negotiation",
            OfferStatus::Accepted => "accepted",
            OfferStatus::Rejected => "rejected",
            OfferStatus::Expired => "expired",
        };
        write!(f, "{}", s)
    }
}

/// A sales offer (quote) with line items and a lifecycle status.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Offer {
    pub id: String,
    pub client_id: String,
    /// Human-readable offer number assigned by the backend ("OF-2026-0042").
    pub number: String,
    pub title: String,
    pub status: OfferStatus,
    pub items: Vec<LineItem>,
    /// Rollup totals as stored by the backend. Always equal to the in-order
    /// sum of per-line totals; recompute locally with
    /// [`DocumentTotals::of`](crate::totals::DocumentTotals::of) for previews.
    pub total_net_cents: i64,
    pub total_vat_cents: i64,
    pub total_gross_cents: i64,
    /// Last day the offer can be accepted.
    #[ts(as = "Option<String>")]
    pub valid_until: Option<NaiveDate>,
    pub notes: Option<String>,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

// =============================================================================
// Contract
// =============================================================================

/// Lifecycle status of a contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum ContractStatus {
    /// Being drafted.
    Draft,
    /// Sent out for signature.
    PendingSignature,
    /// Signed and in force.
    Active,
    /// Fulfilled. Terminal.
    Completed,
    /// Ended early. Terminal.
    Terminated,
    /// Lapsed without signature. Terminal.
    Expired,
}

impl Default for ContractStatus {
    fn default() -> Self {
        ContractStatus::Draft
    }
}

impl std::fmt::Display for ContractStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ContractStatus::Draft => "draft",
            ContractStatus::PendingSignature => "pending_signature",
            ContractStatus::Active => "active",
            ContractStatus::Completed => "completed",
            ContractStatus::Terminated => "terminated",
            ContractStatus::Expired => "expired",
        };
        write!(f, "{}", s)
    }
}

/// A signed agreement, structurally similar to an offer but with its own
/// lifecycle and validity period.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Contract {
    pub id: String,
    pub client_id: String,
    /// Human-readable contract number assigned by the backend.
    pub number: String,
    pub title: String,
    pub status: ContractStatus,
    pub items: Vec<LineItem>,
    pub total_net_cents: i64,
    pub total_vat_cents: i64,
    pub total_gross_cents: i64,
    #[ts(as = "Option<String>")]
    pub start_date: Option<NaiveDate>,
    #[ts(as = "Option<String>")]
    pub end_date: Option<NaiveDate>,
    /// When the client signed, if they have.
    #[ts(as = "Option<String>")]
    pub signed_at: Option<DateTime<Utc>>,
    pub notes: Option<String>,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

// =============================================================================
// Follow-Up
// =============================================================================

/// Status of a follow-up task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum FollowUpStatus {
    /// Still open.
    Pending,
    /// Done.
    Completed,
    /// No longer needed.
    Cancelled,
    /// Echoed by the backend for tasks past due. Local display logic never
    /// reads this variant; it derives overdue-ness via
    /// [`FollowUp::is_overdue`] instead.
    Overdue,
}

impl Default for FollowUpStatus {
    fn default() -> Self {
        FollowUpStatus::Pending
    }
}

/// Priority of a follow-up task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum FollowUpPriority {
    Low,
    Medium,
    High,
    Urgent,
}

impl Default for FollowUpPriority {
    fn default() -> Self {
        FollowUpPriority::Medium
    }
}

/// A scheduled task/reminder, optionally linked to a client, offer, or
/// contract.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct FollowUp {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    #[ts(as = "String")]
    pub due_date: DateTime<Utc>,
    pub status: FollowUpStatus,
    pub priority: FollowUpPriority,
    pub client_id: Option<String>,
    pub offer_id: Option<String>,
    pub contract_id: Option<String>,
    #[ts(as = "Option<String>")]
    pub completed_at: Option<DateTime<Utc>>,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl FollowUp {
    /// Display-time overdue predicate, recomputed on each render.
    ///
    /// A task is overdue iff it is still pending and its due date has
    /// passed. Any other status is never overdue, no matter the date.
    /// The caller passes `now` in; this crate does not read the clock.
    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        self.status == FollowUpStatus::Pending && self.due_date < now
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn follow_up(status: FollowUpStatus, due: DateTime<Utc>) -> FollowUp {
        FollowUp {
            id: "f-1".to_string(),
            title: "Call back about the renewal".to_string(),
            description: None,
            due_date: due,
            status,
            priority: FollowUpPriority::High,
            client_id: Some("c-1".to_string()),
            offer_id: None,
            contract_id: None,
            completed_at: None,
            created_at: due - Duration::days(7),
            updated_at: due - Duration::days(7),
        }
    }

    #[test]
    fn test_rate_from_bps() {
        let rate = Rate::from_bps(2300);
        assert_eq!(rate.bps(), 2300);
        assert!((rate.percentage() - 23.0).abs() < 0.001);
    }

    #[test]
    fn test_rate_from_percentage() {
        let rate = Rate::from_percentage(8.25);
        assert_eq!(rate.bps(), 825);
    }

    #[test]
    fn test_status_defaults() {
        assert_eq!(OfferStatus::default(), OfferStatus::Draft);
        assert_eq!(ContractStatus::default(), ContractStatus::Draft);
        assert_eq!(FollowUpStatus::default(), FollowUpStatus::Pending);
        assert_eq!(FollowUpPriority::default(), FollowUpPriority::Medium);
    }

    #[test]
    fn test_overdue_pending_past_due() {
        let now = Utc::now();
        let task = follow_up(FollowUpStatus::Pending, now - Duration::hours(1));
        assert!(task.is_overdue(now));
    }

    #[test]
    fn test_overdue_pending_not_yet_due() {
        let now = Utc::now();
        let task = follow_up(FollowUpStatus::Pending, now + Duration::hours(1));
        assert!(!task.is_overdue(now));
    }

    #[test]
    fn test_overdue_ignores_non_pending() {
        let now = Utc::now();
        let past = now - Duration::days(30);
        for status in [
            FollowUpStatus::Completed,
            FollowUpStatus::Cancelled,
            FollowUpStatus::Overdue,
        ] {
            let task = follow_up(status, past);
            assert!(!task.is_overdue(now), "{:?} must never be overdue", status);
        }
    }

    #[test]
    fn test_status_wire_format() {
        let json = serde_json::to_string(&ContractStatus::PendingSignature).unwrap();
        assert_eq!(json, "\"pending_signature\"");

        let back: OfferStatus = serde_json::from_str("\"negotiation\"").unwrap();
        assert_eq!(back, OfferStatus::Negotiation);
    }
}
