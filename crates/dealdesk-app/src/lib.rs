//! # dealdesk-app: Session Layer for the DealDesk Dashboard
//!
//! The UI-facing orchestration layer between the dashboard frontend and
//! the backend API.
//!
//! ## Module Organization
//! ```text
//! dealdesk_app/
//! ├── lib.rs           ◄─── You are here (exports)
//! ├── state/
//! │   ├── mod.rs       ◄─── State type exports
//! │   ├── draft.rs     ◄─── Offer/contract line items under edit
//! │   ├── views.rs     ◄─── Paginated lists + stale-response guard
//! │   ├── chat.rs      ◄─── Bounded assistant conversation
//! │   └── settings.rs  ◄─── Workspace settings, masked API key
//! ├── commands/
//! │   ├── clients.rs   ◄─── Client CRUD
//! │   ├── offers.rs    ◄─── Offers: drafts, status, PDF
//! │   ├── contracts.rs ◄─── Contracts: drafts, status, PDF
//! │   ├── followups.rs ◄─── Tasks, completion, overdue filter
//! │   ├── chat.rs      ◄─── Assistant conversation
//! │   └── settings.rs  ◄─── Settings + API key rotation
//! ├── error.rs         ◄─── AppError for the frontend
//! └── logging.rs       ◄─── tracing-subscriber setup
//! ```
//!
//! ## Execution Model
//! Single-session, event-driven: every command runs inside one user
//! interaction or one network response. State containers lock briefly and
//! never across an await. There is no background work here; retries and
//! timeouts live in `dealdesk-client`, persistence lives in the backend.
//!
//! ## Session Wiring
//! ```rust,no_run
//! use dealdesk_app::state::{ChatState, DraftState, ListViewState, SettingsState};
//! use dealdesk_client::{ApiClient, ApiConfig};
//! use dealdesk_core::types::Offer;
//!
//! dealdesk_app::logging::init();
//!
//! let config = ApiConfig::load_or_default(None);
//! let page_size = config.page_size();
//! let api = ApiClient::new(config).expect("API configuration is invalid");
//!
//! let offers: ListViewState<Offer> = ListViewState::new(page_size);
//! let draft = DraftState::new();
//! let chat = ChatState::new();
//! let settings = SettingsState::new();
//! // Hand these to the frontend bridge; commands take them by reference.
//! ```

pub mod commands;
pub mod error;
pub mod logging;
pub mod state;

pub use error::{AppError, ErrorCode};
