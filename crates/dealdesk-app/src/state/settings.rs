//! # Settings State
//!
//! Runtime copy of workspace settings and the API-key surface.
//!
//! Secrets never travel back to the frontend in full: the key is masked
//! for display the moment it enters this state.

use std::sync::{Arc, Mutex};

use dealdesk_client::dto::WorkspaceSettings;

/// Session-local settings snapshot.
#[derive(Debug, Clone, Default)]
pub struct Settings {
    /// Workspace settings as last fetched from the backend, if any.
    pub workspace: Option<WorkspaceSettings>,

    /// Masked form of the configured API key, for the settings page.
    pub api_key_masked: Option<String>,
}

impl Settings {
    /// Records freshly fetched workspace settings.
    pub fn set_workspace(&mut self, workspace: WorkspaceSettings) {
        self.workspace = Some(workspace);
    }

    /// Records a new API key, storing only its masked form.
    pub fn set_api_key(&mut self, key: &str) {
        self.api_key_masked = Some(mask_key(key));
    }
}

/// Masks an API key for display: first four characters, an ellipsis, and
/// the last two. Short keys are fully masked.
pub fn mask_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() <= 6 {
        return "••••".to_string();
    }

    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 2..].iter().collect();
    format!("{}…{}", head, tail)
}

/// Shared settings state.
#[derive(Debug, Default)]
pub struct SettingsState {
    settings: Arc<Mutex<Settings>>,
}

impl SettingsState {
    /// Creates a new empty settings state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Executes a function with read access to the settings.
    pub fn with_settings<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Settings) -> R,
    {
        let settings = self.settings.lock().expect("Settings mutex poisoned");
        f(&settings)
    }

    /// Executes a function with write access to the settings.
    pub fn with_settings_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut Settings) -> R,
    {
        let mut settings = self.settings.lock().expect("Settings mutex poisoned");
        f(&mut settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_key() {
        assert_eq!(mask_key("dd_live_4f8a2c91"), "dd_l…91");
        assert_eq!(mask_key("short"), "••••");
        assert_eq!(mask_key(""), "••••");
    }

    #[test]
    fn test_set_api_key_stores_masked_only() {
        let mut settings = Settings::default();
        settings.set_api_key("dd_live_4f8a2c91");

        let masked = settings.api_key_masked.unwrap();
        assert!(!masked.contains("4f8a2c"));
        assert!(masked.starts_with("dd_l"));
    }
}
