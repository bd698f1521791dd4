//! # Offer Commands
//!
//! Commands for the offer pages: list loading, draft saving, status
//! changes, and PDF download.
//!
//! ## Status Change Contract
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  User clicks "Mark accepted" on a sent offer                            │
//! │                    │                                                    │
//! │                    ▼                                                    │
//! │  Local table check: Sent → Accepted offered? ── no ──► InvalidTransition│
//! │                    │ yes                                                │
//! │                    ▼                                                    │
//! │  POST /offers/{id}/status                                               │
//! │                    │                                                    │
//! │        ┌───────────┴───────────┐                                        │
//! │        ▼                       ▼                                        │
//! │  2xx: adopt the offer    4xx/5xx: return the server's message;         │
//! │  the server returned     the caller's offer keeps its old status       │
//! │                                                                         │
//! │  The local table only decides which buttons render. The backend is     │
//! │  the authority and may still say no.                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::NaiveDate;
use tracing::debug;

use dealdesk_client::dto::OfferInput;
use dealdesk_client::{ApiClient, ListQuery};
use dealdesk_core::types::{Offer, OfferStatus};

use crate::error::AppError;
use crate::state::{DraftState, ListViewState};

/// Loads a page of offers into the list view.
///
/// A response that arrives after the user has navigated elsewhere is
/// dropped by the view's epoch check.
pub async fn load_offers(
    api: &ApiClient,
    view: &ListViewState<Offer>,
    query: ListQuery,
) -> Result<(), AppError> {
    let token = view.with_view_mut(|v| v.begin_load());

    match api.list_offers(&query).await {
        Ok(page) => {
            let applied = view.with_view_mut(|v| v.apply(token, page));
            if !applied {
                debug!("Dropped stale offers page");
            }
            Ok(())
        }
        Err(e) => {
            view.with_view_mut(|v| v.fail(token));
            Err(e.into())
        }
    }
}

/// Creates an offer from the current draft.
///
/// The draft is marked saved only after the backend confirms.
pub async fn save_offer_draft(
    api: &ApiClient,
    draft: &DraftState,
    client_id: &str,
    title: &str,
    valid_until: Option<NaiveDate>,
    notes: Option<String>,
) -> Result<Offer, AppError> {
    let input = build_input(draft, client_id, title, valid_until, notes)?;
    let offer = api.create_offer(&input).await?;
    draft.with_draft_mut(|d| d.mark_saved());
    Ok(offer)
}

/// Updates an existing offer's content from the current draft.
pub async fn update_offer_draft(
    api: &ApiClient,
    draft: &DraftState,
    offer_id: &str,
    client_id: &str,
    title: &str,
    valid_until: Option<NaiveDate>,
    notes: Option<String>,
) -> Result<Offer, AppError> {
    let input = build_input(draft, client_id, title, valid_until, notes)?;
    let offer = api.update_offer(offer_id, &input).await?;
    draft.with_draft_mut(|d| d.mark_saved());
    Ok(offer)
}

/// Requests a status change and returns the offer as the server now sees
/// it. On rejection the caller's offer is untouched; show the message and
/// keep rendering the old status.
pub async fn change_offer_status(
    api: &ApiClient,
    offer: &Offer,
    next: OfferStatus,
) -> Result<Offer, AppError> {
    offer.status.ensure_can_transition_to(next)?;

    let updated = api.set_offer_status(&offer.id, next).await?;
    debug!(offer_id = %offer.id, from = %offer.status, to = %updated.status, "Offer status changed");
    Ok(updated)
}

/// Deletes an offer.
pub async fn delete_offer(api: &ApiClient, offer_id: &str) -> Result<(), AppError> {
    api.delete_offer(offer_id).await.map_err(Into::into)
}

/// Downloads the rendered PDF for an offer. Rendering happens server-side;
/// these are opaque bytes for the frontend to save or preview.
pub async fn download_offer_pdf(api: &ApiClient, offer_id: &str) -> Result<Vec<u8>, AppError> {
    api.offer_pdf(offer_id).await.map_err(Into::into)
}

// Builds and validates the wire input from the draft and form fields.
fn build_input(
    draft: &DraftState,
    client_id: &str,
    title: &str,
    valid_until: Option<NaiveDate>,
    notes: Option<String>,
) -> Result<OfferInput, AppError> {
    let input = OfferInput {
        client_id: client_id.to_string(),
        title: title.to_string(),
        items: draft.with_draft(|d| d.line_items()),
        valid_until,
        notes,
    };
    input.validate()?;
    Ok(input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use crate::state::DraftItem;
    use chrono::Utc;
    use dealdesk_client::ApiConfig;

    fn test_api() -> ApiClient {
        ApiClient::new(ApiConfig::default()).unwrap()
    }

    fn offer_with_status(status: OfferStatus) -> Offer {
        Offer {
            id: "550e8400-e29b-41d4-a716-446655440000".to_string(),
            client_id: "550e8400-e29b-41d4-a716-446655440001".to_string(),
            number: "OF-2026-0042".to_string(),
            title: "Website redesign".to_string(),
            status,
            items: vec![],
            total_net_cents: 0,
            total_vat_cents: 0,
            total_gross_cents: 0,
            valid_until: None,
            notes: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_out_of_table_transition_blocked_locally() {
        let api = test_api();
        let offer = offer_with_status(OfferStatus::Accepted);

        // Accepted is terminal; no request is ever sent.
        let err = change_offer_status(&api, &offer, OfferStatus::Draft)
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidTransition);
    }

    #[tokio::test]
    async fn test_save_rejects_invalid_draft_before_network() {
        let api = test_api();
        let draft = DraftState::new();
        draft
            .with_draft_mut(|d| d.add_item(DraftItem::new("Consulting", 2, "day", 10000, 2300, 0)))
            .unwrap();

        // Bad client id fails validation locally.
        let err = save_offer_draft(&api, &draft, "not-a-uuid", "Redesign", None, None)
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        // Draft still counts as unsaved.
        assert!(draft.with_draft(|d| d.dirty));
    }

    #[tokio::test]
    async fn test_save_rejects_empty_title_before_network() {
        let api = test_api();
        let draft = DraftState::new();

        let err = save_offer_draft(
            &api,
            &draft,
            "550e8400-e29b-41d4-a716-446655440001",
            "   ",
            None,
            None,
        )
        .await
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }
}
