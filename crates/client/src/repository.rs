use api_types::expense::CreateExpenseRequest;
use api_types::group::{CreateGroupRequest, MemberPayload};
use reqwest::multipart;
use serde_json::Value;

use crate::decode;
use crate::error::RepoError;
use crate::group_index::GroupIndex;
use crate::models::{
    Expense, ExpenseCategories, Group, GroupExpenses, ReceiptScanResult, SettlementResult, User,
};
use crate::resource::{ResourceStream, spawn_resource};
use crate::transport::{ApiClient, ApiResponse};

/// Public data-access contract: one method per use case.
///
/// Every method returns immediately with a [`ResourceStream`] and runs the
/// work on its own task. Concurrent calls are independent and are not
/// deduplicated; issuing a refresh while a prior call is pending starts a
/// second operation, and the last one to complete wins.
#[derive(Debug, Clone)]
pub struct Repository {
    client: ApiClient,
    groups: GroupIndex,
}

/// Unwraps a successful envelope's `data`, classifying HTTP and envelope
/// failures with the operation's fallback message.
fn unwrap_data(response: ApiResponse, fallback: &str) -> Result<Value, RepoError> {
    if !response.status.is_success() {
        return Err(RepoError::http_status(response.status));
    }
    match response.envelope {
        Some(envelope) if envelope.success => match envelope.data {
            Some(data) => Ok(data),
            None => Err(RepoError::envelope(envelope.message, fallback)),
        },
        Some(envelope) => Err(RepoError::envelope(envelope.message, fallback)),
        None => Err(RepoError::Unexpected("malformed response body".to_string())),
    }
}

impl Repository {
    pub fn new(client: ApiClient) -> Self {
        Self::with_index(client, GroupIndex::new())
    }

    /// Shares an externally owned index, e.g. one seeded at startup.
    pub fn with_index(client: ApiClient, groups: GroupIndex) -> Self {
        Self { client, groups }
    }

    /// Handle to the process-lifetime group index.
    pub fn group_index(&self) -> GroupIndex {
        self.groups.clone()
    }

    /// `GET /` connectivity probe. Success carries the server's greeting.
    pub fn test_connection(&self) -> ResourceStream<String> {
        let client = self.client.clone();
        spawn_resource(async move {
            let response = client.get("/").await?;
            if !response.status.is_success() {
                return Err(RepoError::http_status(response.status));
            }
            let message = response
                .envelope
                .map(|envelope| envelope.message)
                .filter(|message| !message.is_empty())
                .unwrap_or_else(|| "Connection successful!".to_string());
            Ok(message)
        })
    }

    /// `GET /categories`.
    pub fn get_categories(&self) -> ResourceStream<ExpenseCategories> {
        let client = self.client.clone();
        spawn_resource(async move {
            let response = client.get("/categories").await?;
            let data = unwrap_data(response, "Failed to fetch categories")?;
            Ok(decode::categories(&data))
        })
    }

    /// `POST /groups/create`. On success the new group's id is registered
    /// in the index so the group can be re-discovered later.
    pub fn create_group(&self, name: &str, members: &[User]) -> ResourceStream<Group> {
        let client = self.client.clone();
        let groups = self.groups.clone();
        let request = CreateGroupRequest {
            name: name.to_string(),
            members: members
                .iter()
                .map(|member| MemberPayload {
                    id: member.id.clone(),
                    name: member.name.clone(),
                    email: member.email.clone(),
                })
                .collect(),
        };
        spawn_resource(async move {
            let response = client.post_json("/groups/create", &request).await?;
            let data = unwrap_data(response, "Failed to create group")?;
            let group = decode::group(&data)?;
            groups.add(&group.id);
            tracing::debug!(group_id = %group.id, "group registered");
            Ok(group)
        })
    }

    /// `GET /groups/{id}`.
    pub fn get_group_details(&self, group_id: &str) -> ResourceStream<Group> {
        let client = self.client.clone();
        let path = format!("/groups/{group_id}");
        spawn_resource(async move {
            let response = client.get(&path).await?;
            let data = unwrap_data(response, "Group not found")?;
            Ok(decode::group(&data)?)
        })
    }

    /// `POST /expenses/manual`. `category: None` lets the server
    /// categorize the expense.
    pub fn create_expense(
        &self,
        description: &str,
        amount: f64,
        paid_by_user_id: &str,
        split_among_user_ids: &[String],
        group_id: &str,
        category: Option<&str>,
    ) -> ResourceStream<Expense> {
        let client = self.client.clone();
        let group_id = group_id.to_string();
        let request = CreateExpenseRequest {
            description: description.to_string(),
            amount,
            paid_by_user_id: paid_by_user_id.to_string(),
            split_among_user_ids: split_among_user_ids.to_vec(),
            group_id: group_id.clone(),
            category: category.map(str::to_string),
        };
        spawn_resource(async move {
            let response = client.post_json("/expenses/manual", &request).await?;
            let data = unwrap_data(response, "Failed to create expense")?;
            Ok(decode::expense(&data, &group_id)?)
        })
    }

    /// `GET /groups/{id}/expenses`.
    pub fn get_group_expenses(&self, group_id: &str) -> ResourceStream<GroupExpenses> {
        let client = self.client.clone();
        let path = format!("/groups/{group_id}/expenses");
        spawn_resource(async move {
            let response = client.get(&path).await?;
            let data = unwrap_data(response, "Failed to fetch expenses")?;
            Ok(decode::group_expenses(&data))
        })
    }

    /// `POST /groups/{id}/calculate-settlement`. The simplification runs
    /// server-side; the result is decoded, never recomputed or cached.
    pub fn calculate_settlement(&self, group_id: &str) -> ResourceStream<SettlementResult> {
        let client = self.client.clone();
        let path = format!("/groups/{group_id}/calculate-settlement");
        spawn_resource(async move {
            let response = client.post_empty(&path).await?;
            let data = unwrap_data(response, "Failed to calculate settlement")?;
            Ok(decode::settlement_result(&data))
        })
    }

    /// `POST /scan-receipt` multipart upload: the image plus the split
    /// parameters; the backend extracts the amount and creates the
    /// expense in one call.
    pub fn scan_receipt(
        &self,
        image: Vec<u8>,
        group_id: &str,
        paid_by_user_id: &str,
        split_among_user_ids: &[String],
    ) -> ResourceStream<ReceiptScanResult> {
        let client = self.client.clone();
        let group_id = group_id.to_string();
        let paid_by_user_id = paid_by_user_id.to_string();
        let split_among_user_ids = split_among_user_ids.to_vec();
        spawn_resource(async move {
            let split_json = serde_json::to_string(&split_among_user_ids)?;
            let part = multipart::Part::bytes(image)
                .file_name("receipt.jpg")
                .mime_str("image/*")
                .map_err(|err| RepoError::Unexpected(err.to_string()))?;
            let form = multipart::Form::new()
                .part("file", part)
                .text("group_id", group_id.clone())
                .text("paid_by_user_id", paid_by_user_id)
                .text("split_among_user_ids", split_json);

            let response = client.post_multipart("/scan-receipt", form).await?;
            let data = unwrap_data(response, "Failed to scan receipt")?;
            Ok(decode::receipt_scan(&data, &group_id)?)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use api_types::Envelope;
    use reqwest::StatusCode;
    use serde_json::json;

    fn response(status: StatusCode, envelope: Option<Envelope>) -> ApiResponse {
        ApiResponse { status, envelope }
    }

    #[test]
    fn unwrap_data_rejects_http_failures() {
        let err = unwrap_data(response(StatusCode::NOT_FOUND, None), "fallback").unwrap_err();
        assert_eq!(err.to_string(), "Error: 404 - Not Found");
    }

    #[test]
    fn unwrap_data_prefers_the_server_message() {
        let envelope = Envelope {
            success: false,
            message: "group not found".to_string(),
            data: None,
        };
        let err = unwrap_data(response(StatusCode::OK, Some(envelope)), "fallback").unwrap_err();
        assert_eq!(err.to_string(), "group not found");
    }

    #[test]
    fn unwrap_data_falls_back_when_the_message_is_empty() {
        let envelope = Envelope {
            success: false,
            message: String::new(),
            data: None,
        };
        let err =
            unwrap_data(response(StatusCode::OK, Some(envelope)), "Failed to fetch expenses")
                .unwrap_err();
        assert_eq!(err.to_string(), "Failed to fetch expenses");
    }

    #[test]
    fn unwrap_data_treats_success_without_data_as_rejected() {
        let envelope = Envelope {
            success: true,
            message: String::new(),
            data: None,
        };
        let err = unwrap_data(response(StatusCode::OK, Some(envelope)), "fallback").unwrap_err();
        assert_eq!(err.to_string(), "fallback");
    }

    #[test]
    fn unwrap_data_returns_the_open_payload() {
        let envelope = Envelope {
            success: true,
            message: "ok".to_string(),
            data: Some(json!({"group": {"id": "g1"}})),
        };
        let data = unwrap_data(response(StatusCode::OK, Some(envelope)), "fallback").unwrap();
        assert_eq!(data["group"]["id"], "g1");
    }

    #[test]
    fn unwrap_data_flags_unparseable_bodies() {
        let err = unwrap_data(response(StatusCode::OK, None), "fallback").unwrap_err();
        assert_eq!(err.to_string(), "Unexpected Error: malformed response body");
    }
}
