//! # Follow-Up Commands
//!
//! Commands for the follow-up task pages.
//!
//! Overdue-ness is a display-time property: it is derived on every render
//! from `status == Pending && due_date < now` and never written anywhere.

use chrono::{DateTime, Utc};
use tracing::debug;

use dealdesk_client::dto::FollowUpInput;
use dealdesk_client::{ApiClient, ListQuery};
use dealdesk_core::types::FollowUp;

use crate::error::AppError;
use crate::state::ListViewState;

/// Loads a page of follow-ups into the list view.
pub async fn load_followups(
    api: &ApiClient,
    view: &ListViewState<FollowUp>,
    query: ListQuery,
) -> Result<(), AppError> {
    let token = view.with_view_mut(|v| v.begin_load());

    match api.list_followups(&query).await {
        Ok(page) => {
            let applied = view.with_view_mut(|v| v.apply(token, page));
            if !applied {
                debug!("Dropped stale follow-ups page");
            }
            Ok(())
        }
        Err(e) => {
            view.with_view_mut(|v| v.fail(token));
            Err(e.into())
        }
    }
}

/// Creates a follow-up task.
pub async fn create_followup(api: &ApiClient, input: FollowUpInput) -> Result<FollowUp, AppError> {
    input.validate()?;
    api.create_followup(&input).await.map_err(Into::into)
}

/// Updates a follow-up task.
pub async fn update_followup(
    api: &ApiClient,
    followup_id: &str,
    input: FollowUpInput,
) -> Result<FollowUp, AppError> {
    input.validate()?;
    api.update_followup(followup_id, &input)
        .await
        .map_err(Into::into)
}

/// Marks a follow-up as completed and returns it as the server now sees
/// it. On failure the task keeps rendering as pending.
pub async fn complete_followup(api: &ApiClient, followup_id: &str) -> Result<FollowUp, AppError> {
    api.complete_followup(followup_id).await.map_err(Into::into)
}

/// Deletes a follow-up task.
pub async fn delete_followup(api: &ApiClient, followup_id: &str) -> Result<(), AppError> {
    api.delete_followup(followup_id).await.map_err(Into::into)
}

/// Display-time filter: the tasks that should render with the overdue
/// badge right now.
pub fn overdue_tasks<'a>(tasks: &'a [FollowUp], now: DateTime<Utc>) -> Vec<&'a FollowUp> {
    tasks.iter().filter(|t| t.is_overdue(now)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use chrono::Duration;
    use dealdesk_client::ApiConfig;
    use dealdesk_core::types::{FollowUpPriority, FollowUpStatus};

    fn test_api() -> ApiClient {
        ApiClient::new(ApiConfig::default()).unwrap()
    }

    fn task(id: &str, status: FollowUpStatus, due: DateTime<Utc>) -> FollowUp {
        FollowUp {
            id: id.to_string(),
            title: "Check in".to_string(),
            description: None,
            due_date: due,
            status,
            priority: FollowUpPriority::Medium,
            client_id: None,
            offer_id: None,
            contract_id: None,
            completed_at: None,
            created_at: due - Duration::days(3),
            updated_at: due - Duration::days(3),
        }
    }

    #[test]
    fn test_overdue_filter() {
        let now = Utc::now();
        let tasks = vec![
            task("late", FollowUpStatus::Pending, now - Duration::hours(2)),
            task("future", FollowUpStatus::Pending, now + Duration::hours(2)),
            task("done", FollowUpStatus::Completed, now - Duration::days(5)),
            task("cancelled", FollowUpStatus::Cancelled, now - Duration::days(5)),
        ];

        let overdue = overdue_tasks(&tasks, now);
        assert_eq!(overdue.len(), 1);
        assert_eq!(overdue[0].id, "late");
    }

    #[tokio::test]
    async fn test_create_rejects_empty_title_before_network() {
        let api = test_api();
        let input = FollowUpInput {
            title: "  ".to_string(),
            description: None,
            due_date: Utc::now(),
            priority: FollowUpPriority::High,
            client_id: None,
            offer_id: None,
            contract_id: None,
        };

        let err = create_followup(&api, input).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }

    #[tokio::test]
    async fn test_create_rejects_bad_link_id_before_network() {
        let api = test_api();
        let input = FollowUpInput {
            title: "Call about renewal".to_string(),
            description: None,
            due_date: Utc::now(),
            priority: FollowUpPriority::High,
            client_id: Some("not-a-uuid".to_string()),
            offer_id: None,
            contract_id: None,
        };

        let err = create_followup(&api, input).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }
}
