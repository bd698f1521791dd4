//! # Settings Commands
//!
//! Commands for the settings page: workspace settings and API key
//! rotation.

use tracing::info;

use dealdesk_client::dto::WorkspaceSettings;
use dealdesk_client::ApiClient;
use dealdesk_core::validation;

use crate::error::AppError;
use crate::state::SettingsState;

/// Fetches workspace settings into the session state.
pub async fn load_settings(api: &ApiClient, state: &SettingsState) -> Result<(), AppError> {
    let workspace = api.get_settings().await?;
    state.with_settings_mut(|s| s.set_workspace(workspace));
    Ok(())
}

/// Updates workspace settings. The session copy is replaced only with
/// what the backend confirmed.
pub async fn update_settings(
    api: &ApiClient,
    state: &SettingsState,
    settings: WorkspaceSettings,
) -> Result<WorkspaceSettings, AppError> {
    validation::validate_company_name(&settings.company_name)?;
    validation::validate_rate_bps("default_vat_rate", settings.default_vat_rate_bps)?;

    let confirmed = api.update_settings(&settings).await?;
    state.with_settings_mut(|s| s.set_workspace(confirmed.clone()));
    Ok(confirmed)
}

/// Rotates the integration API key. Only the masked form is kept in
/// session state for the settings page to display.
pub async fn rotate_api_key(
    api: &ApiClient,
    state: &SettingsState,
    new_key: &str,
) -> Result<(), AppError> {
    let new_key = new_key.trim();
    if new_key.is_empty() {
        return Err(AppError::validation("api_key is required"));
    }

    api.set_api_key(new_key).await?;
    state.with_settings_mut(|s| s.set_api_key(new_key));
    info!("API key rotated");
    Ok(())
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
    async fn test_update_rejects_bad_settings_before_network() {
        let api = test_api();
        let state = SettingsState::new();

        let err = update_settings(
            &api,
            &state,
            WorkspaceSettings {
                company_name: "".to_string(),
                default_vat_rate_bps: 2300,
                currency: "EUR".to_string(),
            },
        )
        .await
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        let err = update_settings(
            &api,
            &state,
            WorkspaceSettings {
                company_name: "Acme GmbH".to_string(),
                default_vat_rate_bps: 10001,
                currency: "EUR".to_string(),
            },
        )
        .await
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }

    #[tokio::test]
    async fn test_rotate_rejects_empty_key_before_network() {
        let api = test_api();
        let state = SettingsState::new();

        let err = rotate_api_key(&api, &state, "  ").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert!(state.with_settings(|s| s.api_key_masked.is_none()));
    }
}
