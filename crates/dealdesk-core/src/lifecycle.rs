//! # Lifecycle Module
//!
//! Advisory status-transition tables for offers and contracts.
//!
//! ## Offer Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   ┌───────┐      ┌──────┐      ┌────────┐                              │
//! │   │ Draft │─────►│ Sent │─────►│ Viewed │                              │
//! │   └───▲───┘      └──┬───┘      └───┬────┘                              │
//! │       │             │   ┌──────────┤                                    │
//! │       │             ▼   ▼          ▼                                    │
//! │       │      ┌─────────────┐   ┌──────────┐    ┌──────────┐            │
//! │       ├──────│  Rejected   │◄──│Negotiation│──►│ Accepted │ (terminal) │
//! │       │      └─────────────┘   └─────┬────┘    └──────────┘            │
//! │       │                              │ (back to Sent is allowed:       │
//! │       │      ┌─────────────┐         │  a revised offer goes out)      │
//! │       └──────│   Expired   │         ▼                                  │
//! │              └─────────────┘       Sent                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## These Tables Are Advisory
//! They decide which action buttons the dashboard renders, nothing more.
//! The backend validates every status change itself and may reject one the
//! table allows (or accept one it doesn't list). Callers must treat a server
//! rejection as final: surface the message, keep the previous status.

use crate::error::{CoreError, CoreResult};
use crate::types::{ContractStatus, OfferStatus};

// =============================================================================
// Offer Transitions
// =============================================================================

impl OfferStatus {
    /// Statuses this one may move to, per the advisory table.
    ///
    /// Terminal statuses return the empty slice.
    pub const fn transitions(&self) -> &'static [OfferStatus] {
        use OfferStatus::*;
        match self {
            Draft => &[Sent],
            Sent => &[Viewed, Negotiation, Accepted, Rejected],
            Viewed => &[Negotiation, Accepted, Rejected],
            Negotiation => &[Accepted, Rejected, Sent],
            Accepted => &[],
            Rejected => &[Draft],
            Expired => &[Draft],
        }
    }

    /// Checks whether the table offers a move to `next`.
    pub fn can_transition_to(&self, next: OfferStatus) -> bool {
        self.transitions().contains(&next)
    }

    /// True if no further transitions are offered.
    pub fn is_terminal(&self) -> bool {
        self.transitions().is_empty()
    }

    /// Errors with [`CoreError::InvalidTransition`] when the table does not
    /// offer the move. Used by the command layer so the UI never sends a
    /// request it would not have rendered a button for.
    pub fn ensure_can_transition_to(&self, next: OfferStatus) -> CoreResult<()> {
        if self.can_transition_to(next) {
            Ok(())
        } else {
            Err(CoreError::InvalidTransition {
                entity: "Offer",
                from: self.to_string(),
                to: next.to_string(),
            })
        }
    }
}

// =============================================================================
// Contract Transitions
// =============================================================================

impl ContractStatus {
    /// Statuses this one may move to, per the advisory table.
    ///
    /// Terminal statuses return the empty slice.
    pub const fn transitions(&self) -> &'static [ContractStatus] {
        use ContractStatus::*;
        match self {
            Draft => &[PendingSignature],
            PendingSignature => &[Active, Terminated],
            Active => &[Completed, Terminated],
            Completed => &[],
            Terminated => &[],
            Expired => &[],
        }
    }

    /// Checks whether the table offers a move to `next`.
    pub fn can_transition_to(&self, next: ContractStatus) -> bool {
        self.transitions().contains(&next)
    }

    /// True if no further transitions are offered.
    pub fn is_terminal(&self) -> bool {
        self.transitions().is_empty()
    }

    /// Errors with [`CoreError::InvalidTransition`] when the table does not
    /// offer the move.
    pub fn ensure_can_transition_to(&self, next: ContractStatus) -> CoreResult<()> {
        if self.can_transition_to(next) {
            Ok(())
        } else {
            Err(CoreError::InvalidTransition {
                entity: "Contract",
                from: self.to_string(),
                to: next.to_string(),
            })
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offer_table() {
        use OfferStatus::*;
        assert_eq!(Draft.transitions(), &[Sent]);
        assert_eq!(Sent.transitions(), &[Viewed, Negotiation, Accepted, Rejected]);
        assert_eq!(Viewed.transitions(), &[Negotiation, Accepted, Rejected]);
        assert_eq!(Negotiation.transitions(), &[Accepted, Rejected, Sent]);
        assert_eq!(Accepted.transitions(), &[] as &[OfferStatus]);
        assert_eq!(Rejected.transitions(), &[Draft]);
        assert_eq!(Expired.transitions(), &[Draft]);
    }

    #[test]
    fn test_contract_table() {
        use ContractStatus::*;
        assert_eq!(Draft.transitions(), &[PendingSignature]);
        assert_eq!(PendingSignature.transitions(), &[Active, Terminated]);
        assert_eq!(Active.transitions(), &[Completed, Terminated]);
        assert_eq!(Completed.transitions(), &[] as &[ContractStatus]);
        assert_eq!(Terminated.transitions(), &[] as &[ContractStatus]);
        assert_eq!(Expired.transitions(), &[] as &[ContractStatus]);
    }

    #[test]
    fn test_terminal_statuses() {
        assert!(OfferStatus::Accepted.is_terminal());
        assert!(!OfferStatus::Rejected.is_terminal()); // can be reworked into a draft

        assert!(ContractStatus::Completed.is_terminal());
        assert!(ContractStatus::Terminated.is_terminal());
        assert!(ContractStatus::Expired.is_terminal());
        assert!(!ContractStatus::Active.is_terminal());
    }

    #[test]
    fn test_can_transition_to() {
        assert!(OfferStatus::Draft.can_transition_to(OfferStatus::Sent));
        assert!(!OfferStatus::Draft.can_transition_to(OfferStatus::Accepted));
        assert!(OfferStatus::Negotiation.can_transition_to(OfferStatus::Sent));
        assert!(!OfferStatus::Accepted.can_transition_to(OfferStatus::Draft));
    }

    #[test]
    fn test_ensure_can_transition_to() {
        assert!(OfferStatus::Draft
            .ensure_can_transition_to(OfferStatus::Sent)
            .is_ok());

        let err = ContractStatus::Completed
            .ensure_can_transition_to(ContractStatus::Active)
            .unwrap_err();
        assert_eq!(err.to_string(), "Contract cannot move from completed to active");
    }
}
