//! # Contract Commands
//!
//! Commands for the contract pages. Contracts share the offer editing
//! model (same line items, same draft state) but carry their own lifecycle
//! and a validity period instead of a single expiry date.

use chrono::NaiveDate;
use tracing::debug;

use dealdesk_client::dto::ContractInput;
use dealdesk_client::{ApiClient, ListQuery};
use dealdesk_core::types::{Contract, ContractStatus};

use crate::error::AppError;
use crate::state::{DraftState, ListViewState};

/// Loads a page of contracts into the list view.
pub async fn load_contracts(
    api: &ApiClient,
    view: &ListViewState<Contract>,
    query: ListQuery,
) -> Result<(), AppError> {
    let token = view.with_view_mut(|v| v.begin_load());

    match api.list_contracts(&query).await {
        Ok(page) => {
            let applied = view.with_view_mut(|v| v.apply(token, page));
            if !applied {
                debug!("Dropped stale contracts page");
            }
            Ok(())
        }
        Err(e) => {
            view.with_view_mut(|v| v.fail(token));
            Err(e.into())
        }
    }
}

/// Creates a contract from the current draft.
pub async fn save_contract_draft(
    api: &ApiClient,
    draft: &DraftState,
    client_id: &str,
    title: &str,
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
    notes: Option<String>,
) -> Result<Contract, AppError> {
    let input = build_input(draft, client_id, title, start_date, end_date, notes)?;
    let contract = api.create_contract(&input).await?;
    draft.with_draft_mut(|d| d.mark_saved());
    Ok(contract)
}

/// Updates an existing contract's content from the current draft.
pub async fn update_contract_draft(
    api: &ApiClient,
    draft: &DraftState,
    contract_id: &str,
    client_id: &str,
    title: &str,
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
    notes: Option<String>,
) -> Result<Contract, AppError> {
    let input = build_input(draft, client_id, title, start_date, end_date, notes)?;
    let contract = api.update_contract(contract_id, &input).await?;
    draft.with_draft_mut(|d| d.mark_saved());
    Ok(contract)
}

/// Requests a status change and returns the contract as the server now
/// sees it. On rejection the caller's contract is untouched.
pub async fn change_contract_status(
    api: &ApiClient,
    contract: &Contract,
    next: ContractStatus,
) -> Result<Contract, AppError> {
    contract.status.ensure_can_transition_to(next)?;

    let updated = api.set_contract_status(&contract.id, next).await?;
    debug!(
        contract_id = %contract.id,
        from = %contract.status,
        to = %updated.status,
        "Contract status changed"
    );
    Ok(updated)
}

/// Deletes a contract.
pub async fn delete_contract(api: &ApiClient, contract_id: &str) -> Result<(), AppError> {
    api.delete_contract(contract_id).await.map_err(Into::into)
}

/// Downloads the rendered PDF for a contract.
pub async fn download_contract_pdf(
    api: &ApiClient,
    contract_id: &str,
) -> Result<Vec<u8>, AppError> {
    api.contract_pdf(contract_id).await.map_err(Into::into)
}

// Builds and validates the wire input from the draft and form fields.
fn build_input(
    draft: &DraftState,
    client_id: &str,
    title: &str,
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
    notes: Option<String>,
) -> Result<ContractInput, AppError> {
    let input = ContractInput {
        client_id: client_id.to_string(),
        title: title.to_string(),
        items: draft.with_draft(|d| d.line_items()),
        start_date,
        end_date,
        notes,
    };
    input.validate()?;
    Ok(input)
}
