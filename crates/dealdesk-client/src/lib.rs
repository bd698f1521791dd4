//! # dealdesk-client: Backend API Collaborator
//!
//! Typed HTTP client for the remote backend that owns every DealDesk
//! entity. This workspace never persists anything itself: clients, offers,
//! contracts, follow-ups, chat, and settings all live behind the REST API
//! this crate speaks to.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      DealDesk Client Layer                              │
//! │                                                                         │
//! │  dealdesk-app ──► ApiClient ──► backend REST API                        │
//! │                      │                                                  │
//! │                      ├── config.rs   TOML + env configuration           │
//! │                      ├── dto.rs      queries, pages, inputs, chat       │
//! │                      ├── client.rs   typed calls, retry on reads        │
//! │                      └── error.rs    error taxonomy + categorization    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Key Behaviors
//! - Bearer auth when an API key is configured
//! - Idempotent GETs retried with exponential backoff; writes never replayed
//! - Server rejections surfaced verbatim as [`ClientError::Api`]
//! - Per-request timeout from configuration

pub mod client;
pub mod config;
pub mod dto;
pub mod error;

pub use client::ApiClient;
pub use config::ApiConfig;
pub use dto::{ChatRole, ChatTurn, ListQuery, Page};
pub use error::{ClientError, ClientResult};
