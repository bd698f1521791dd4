//! # State Module
//!
//! Session state for the DealDesk dashboard.
//!
//! ## Why Multiple State Types?
//! Instead of a single `AppState` struct containing everything,
//! we use separate state types. This approach:
//!
//! 1. **Better Separation of Concerns**: Each state type has a single responsibility
//! 2. **Easier Testing**: Can exercise individual states in isolation
//! 3. **Clearer Command Signatures**: Commands declare exactly what state they need
//! 4. **Reduced Contention**: Independent states don't block each other
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌──────────────┐  ┌──────────────┐  ┌──────────────┐  ┌────────────┐  │
//! │  │  DraftState  │  │ListViewState │  │  ChatState   │  │ Settings   │  │
//! │  │              │  │              │  │              │  │ State      │  │
//! │  │  line items  │  │  page, epoch │  │  turns       │  │ workspace, │  │
//! │  │  under edit  │  │  items       │  │  (bounded)   │  │ masked key │  │
//! │  └──────────────┘  └──────────────┘  └──────────────┘  └────────────┘  │
//! │                                                                         │
//! │  THREAD SAFETY: each state is its own Arc<Mutex<T>>; commands lock     │
//! │  briefly, compute with dealdesk-core, and release before any await.    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod chat;
mod draft;
mod settings;
mod views;

pub use chat::{ChatHistory, ChatState, MAX_CHAT_TURNS};
pub use draft::{DocumentDraft, DraftItem, DraftState};
pub use settings::{mask_key, Settings, SettingsState};
pub use views::{ListView, ListViewState, LoadToken};
