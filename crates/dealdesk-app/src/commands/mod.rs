//! # Commands Module
//!
//! All commands exposed to the dashboard frontend.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs        ◄─── You are here (exports)
//! ├── clients.rs    ◄─── Client CRUD
//! ├── offers.rs     ◄─── Offer editing, status changes, PDF download
//! ├── contracts.rs  ◄─── Contract editing, status changes, PDF download
//! ├── followups.rs  ◄─── Follow-up tasks, completion, overdue filtering
//! ├── chat.rs       ◄─── AI assistant conversation
//! └── settings.rs   ◄─── Workspace settings and API key rotation
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Command Flow                                      │
//! │                                                                         │
//! │  1. Validate input with dealdesk-core (cheap, local, no network)       │
//! │  2. Call the backend through ApiClient                                 │
//! │  3. On success: update the relevant state container                    │
//! │  4. On failure: return AppError, LEAVE LOCAL STATE UNTOUCHED           │
//! │                                                                         │
//! │  Step 4 is the contract that keeps previews honest: a status change    │
//! │  the server rejected never sticks locally, and a list view never       │
//! │  shows a page the user already navigated away from.                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod chat;
pub mod clients;
pub mod contracts;
pub mod followups;
pub mod offers;
pub mod settings;
