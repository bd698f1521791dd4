//! # dealdesk-core: Pure Business Logic for DealDesk
//!
//! This crate is the **heart** of DealDesk. It contains all business logic
//! as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        DealDesk Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  Dashboard Frontend (TypeScript)                │   │
//! │  │    Offer editor ──► Client pages ──► Follow-ups ──► AI chat    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                  dealdesk-app (session layer)                   │   │
//! │  │    drafts, list views, chat history, command glue              │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ dealdesk-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │  totals   │  │ lifecycle │  │   │
//! │  │   │  Offer    │  │   Money   │  │ LineTotals│  │ advisory  │  │   │
//! │  │   │  Contract │  │   Rate    │  │ rollups   │  │  tables   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO NETWORK • NO CLOCK READS • PURE FUNCTIONS        │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              dealdesk-client (REST API collaborator)            │   │
//! │  │        the remote backend owns persistence and authority        │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Client, Offer, Contract, FollowUp, etc.)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`totals`] - Line-item and document pricing calculation
//! - [`lifecycle`] - Advisory status-transition tables
//! - [`error`] - Domain error types
//! - [`validation`] - Form input validation
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Network, file system, and clock access is FORBIDDEN here
//! 3. **Integer Money**: All monetary values are in cents (i64) to avoid float errors
//! 4. **Explicit Errors**: All errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use dealdesk_core::types::LineItem;
//!
//! let item = LineItem {
//!     name: "Consulting".into(),
//!     description: None,
//!     quantity: 2,
//!     unit: "day".into(),
//!     unit_price_cents: 10000, // 100.00/day
//!     vat_rate_bps: 2300,      // 23%
//!     discount_bps: 1000,      // 10%
//! };
//!
//! let totals = item.totals();
//! assert_eq!(totals.net_cents, 18000);   // 180.00
//! assert_eq!(totals.vat_cents, 4140);    // 41.40
//! assert_eq!(totals.gross_cents, 22140); // 221.40
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod lifecycle;
pub mod money;
pub mod totals;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use dealdesk_core::Money` instead of
// `use dealdesk_core::money::Money`

pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use totals::{DocumentTotals, LineTotals};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum line items allowed in a single offer or contract
///
/// ## Business Reason
/// Prevents runaway documents and keeps previews and PDFs readable.
/// Can be made configurable per-workspace in future versions.
pub const MAX_DOCUMENT_ITEMS: usize = 100;

/// Maximum quantity of a single line item
///
/// ## Business Reason
/// Prevents accidental over-ordering (e.g., typing 1000 instead of 10).
/// Configurable per-workspace in future versions.
pub const MAX_ITEM_QUANTITY: i64 = 999;
