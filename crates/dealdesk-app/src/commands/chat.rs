//! # Chat Commands
//!
//! Commands for the AI assistant panel. The backend owns the model; this
//! layer only ships the conversation over and records the turns.

use tracing::debug;

use dealdesk_client::ApiClient;

use crate::error::AppError;
use crate::state::ChatState;

/// Sends a message to the assistant and returns the reply.
///
/// The turn pair is recorded only after the backend answers: a failed
/// request leaves the history exactly as it was, so a retry sends the
/// same conversation.
pub async fn send_message(
    api: &ApiClient,
    chat: &ChatState,
    message: &str,
) -> Result<String, AppError> {
    let message = message.trim();
    if message.is_empty() {
        return Err(AppError::validation("message is required"));
    }

    let history = chat.with_history(|h| h.turns().to_vec());
    debug!(turns = history.len(), "Sending chat message");

    let reply = api.chat(message, &history).await?;

    chat.with_history_mut(|h| {
        h.push_user(message);
        h.push_assistant(reply.as_str());
    });

    Ok(reply)
}

/// Forgets the current conversation.
pub fn clear_conversation(chat: &ChatState) {
    chat.with_history_mut(|h| h.clear());
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
    async fn test_empty_message_rejected_before_network() {
        let api = test_api();
        let chat = ChatState::new();

        let err = send_message(&api, &chat, "   ").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        // Nothing was recorded.
        assert!(chat.with_history(|h| h.is_empty()));
    }

    #[test]
    fn test_clear_conversation() {
        let chat = ChatState::new();
        chat.with_history_mut(|h| {
            h.push_user("hello");
            h.push_assistant("hi");
        });

        clear_conversation(&chat);
        assert!(chat.with_history(|h| h.is_empty()));
    }
}
