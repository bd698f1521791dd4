//! # Client Commands
//!
//! Commands for the client (customer) pages.

use tracing::debug;

use dealdesk_client::dto::ClientInput;
use dealdesk_client::{ApiClient, ListQuery};
use dealdesk_core::types::Client;
use dealdesk_core::validation;

use crate::error::AppError;
use crate::state::ListViewState;

/// Loads a page of clients into the list view.
pub async fn load_clients(
    api: &ApiClient,
    view: &ListViewState<Client>,
    query: ListQuery,
) -> Result<(), AppError> {
    let token = view.with_view_mut(|v| v.begin_load());

    match api.list_clients(&query).await {
        Ok(page) => {
            let applied = view.with_view_mut(|v| v.apply(token, page));
            if !applied {
                debug!("Dropped stale clients page");
            }
            Ok(())
        }
        Err(e) => {
            view.with_view_mut(|v| v.fail(token));
            Err(e.into())
        }
    }
}

/// Searches clients by free text (company name, contact, email).
pub async fn search_clients(
    api: &ApiClient,
    view: &ListViewState<Client>,
    search: &str,
) -> Result<(), AppError> {
    let search = validation::validate_search_query(search)?;
    let query = ListQuery::page(1).with_search(search);
    load_clients(api, view, query).await
}

/// Creates a client.
pub async fn create_client(api: &ApiClient, input: ClientInput) -> Result<Client, AppError> {
    input.validate()?;
    api.create_client(&input).await.map_err(Into::into)
}

/// Updates a client.
pub async fn update_client(
    api: &ApiClient,
    client_id: &str,
    input: ClientInput,
) -> Result<Client, AppError> {
    input.validate()?;
    api.update_client(client_id, &input).await.map_err(Into::into)
}

/// Deletes a client.
pub async fn delete_client(api: &ApiClient, client_id: &str) -> Result<(), AppError> {
    api.delete_client(client_id).await.map_err(Into::into)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use dealdesk_client::ApiConfig;

    fn test_api() -> ApiClient {
        ApiClient::new(ApiConfig::default()).unwrap()
    }

    #[tokio::test]
    async fn test_create_rejects_bad_email_before_network() {
        let api = test_api();
        let input = ClientInput {
            company_name: "Acme GmbH".to_string(),
            email: Some("not-an-email".to_string()),
            ..Default::default()
        };

        let err = create_client(&api, input).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }

    #[tokio::test]
    async fn test_create_rejects_missing_name_before_network() {
        let api = test_api();
        let input = ClientInput::default();

        let err = create_client(&api, input).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert!(err.message.contains("company_name"));
    }

    #[tokio::test]
    async fn test_search_rejects_overlong_query() {
        let api = test_api();
        let view = ListViewState::new(25);

        let err = search_clients(&api, &view, &"q".repeat(150))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }
}
