use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::Deserialize;
use serde::Serialize;
use serde::de::DeserializeOwned;
use url::Url;

use crate::error::{AppError, AppResult};

use super::drafts;
use super::messages;
use super::models::{AttachmentData, Draft, MessageRef, RawMessage, SentMessage};
use super::transport::MailTransport;

/// HTTP transport against the Gmail REST API for a single authenticated user.
#[derive(Debug, Clone)]
pub struct GmailClient {
    http: Client,
    base_url: String,
    access_token: String,
}

impl GmailClient {
    pub fn with_base_url(access_token: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into(),
            access_token: access_token.into(),
        }
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        query: Option<&[(String, String)]>,
    ) -> AppResult<T> {
        let url = self.endpoint_url(endpoint)?;
        let mut request = self.http.get(url);
        if let Some(query) = query {
            request = request.query(query);
        }

        let response = self.authorized(request).send().await?;
        parse_json_response(response).await
    }

    async fn post_json<T: DeserializeOwned, B: Serialize>(
        &self,
        endpoint: &str,
        body: &B,
    ) -> AppResult<T> {
        let url = self.endpoint_url(endpoint)?;
        let response = self
            .authorized(self.http.post(url))
            .json(body)
            .send()
            .await?;

        parse_json_response(response).await
    }

    async fn delete(&self, endpoint: &str) -> AppResult<()> {
        let url = self.endpoint_url(endpoint)?;
        let response = self.authorized(self.http.delete(url)).send().await?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        Err(map_api_error(status, &body))
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request.bearer_auth(&self.access_token)
    }

    fn endpoint_url(&self, endpoint: &str) -> AppResult<Url> {
        let mut url = Url::parse(&self.base_url)?;
        url.set_path(endpoint.trim_start_matches('/'));
        Ok(url)
    }
}

#[async_trait]
impl MailTransport for GmailClient {
    async fn list_message_ids(
        &self,
        query: &str,
        max_results: u32,
    ) -> AppResult<Vec<MessageRef>> {
        let params = messages::list_query(max_results, query);
        tracing::debug!(query, max_results, "listing message ids");
        let resource: GmailMessageListResource = self
            .get_json(messages::list_endpoint(), Some(&params))
            .await?;
        Ok(resource.messages.unwrap_or_default())
    }

    async fn get_message(&self, id: &str) -> AppResult<RawMessage> {
        let endpoint = messages::message_endpoint(id);
        let query = messages::get_query();
        tracing::debug!(id, "fetching message");
        self.get_json(&endpoint, Some(&query)).await
    }

    async fn create_draft(&self, raw: &str, thread_id: Option<&str>) -> AppResult<Draft> {
        let request = GmailDraftRequest {
            message: GmailRawMessage::new(raw, thread_id),
        };
        self.post_json(drafts::drafts_endpoint(), &request).await
    }

    async fn delete_draft(&self, id: &str) -> AppResult<()> {
        self.delete(&drafts::draft_endpoint(id)).await
    }

    async fn send_message(&self, raw: &str, thread_id: Option<&str>) -> AppResult<SentMessage> {
        let request = GmailRawMessage::new(raw, thread_id);
        self.post_json(messages::send_endpoint(), &request).await
    }

    async fn get_attachment(
        &self,
        message_id: &str,
        attachment_id: &str,
    ) -> AppResult<AttachmentData> {
        let endpoint = messages::attachment_endpoint(message_id, attachment_id);
        self.get_json(&endpoint, None).await
    }
}

#[derive(Debug, Deserialize)]
struct GmailMessageListResource {
    messages: Option<Vec<MessageRef>>,
}

#[derive(Debug, Serialize)]
struct GmailRawMessage {
    raw: String,
    #[serde(rename = "threadId", skip_serializing_if = "Option::is_none")]
    thread_id: Option<String>,
}

impl GmailRawMessage {
    fn new(raw: &str, thread_id: Option<&str>) -> Self {
        Self {
            raw: raw.to_string(),
            thread_id: thread_id.map(ToOwned::to_owned),
        }
    }
}

#[derive(Debug, Serialize)]
struct GmailDraftRequest {
    message: GmailRawMessage,
}

#[derive(Debug, Deserialize)]
struct GmailApiErrorEnvelope {
    error: GmailApiError,
}

#[derive(Debug, Deserialize)]
struct GmailApiError {
    code: Option<u16>,
    status: Option<String>,
    message: Option<String>,
    errors: Option<Vec<GmailApiErrorDetail>>,
}

#[derive(Debug, Deserialize)]
struct GmailApiErrorDetail {
    reason: Option<String>,
}

async fn parse_json_response<T: DeserializeOwned>(response: reqwest::Response) -> AppResult<T> {
    let status = response.status();
    if status.is_success() {
        return Ok(response.json().await?);
    }

    let body = response.text().await.unwrap_or_default();
    Err(map_api_error(status, &body))
}

fn map_api_error(status: StatusCode, body: &str) -> AppError {
    let message = parse_api_error_message(body).unwrap_or_else(|| {
        let body = body.trim();
        if body.is_empty() {
            "no error details in response body".to_string()
        } else {
            body.to_string()
        }
    });

    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        return AppError::Auth(format!(
            "gmail api authorization failed ({status}): {message}"
        ));
    }

    AppError::Api(format!("gmail api request failed ({status}): {message}"))
}

fn parse_api_error_message(body: &str) -> Option<String> {
    let envelope = serde_json::from_str::<GmailApiErrorEnvelope>(body).ok()?;
    let mut parts = Vec::new();

    if let Some(message) = envelope.error.message {
        parts.push(message);
    }

    if let Some(status) = envelope.error.status {
        parts.push(format!("status={status}"));
    }

    if let Some(code) = envelope.error.code {
        parts.push(format!("code={code}"));
    }

    if let Some(reason) = envelope
        .error
        .errors
        .and_then(|errors| errors.into_iter().find_map(|detail| detail.reason))
    {
        parts.push(format!("reason={reason}"));
    }

    if parts.is_empty() {
        return None;
    }

    Some(parts.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_endpoint_urls_against_base() {
        let client = GmailClient::with_base_url("token", "http://127.0.0.1:9000/");
        let url = client
            .endpoint_url(&messages::message_endpoint("msg1"))
            .expect("url");
        assert_eq!(
            url.as_str(),
            "http://127.0.0.1:9000/gmail/v1/users/me/messages/msg1"
        );
    }

    #[test]
    fn list_resource_without_messages_is_empty() {
        let resource: GmailMessageListResource =
            serde_json::from_str(r#"{"resultSizeEstimate":0}"#).expect("parse");
        assert!(resource.messages.unwrap_or_default().is_empty());
    }

    #[test]
    fn serializes_draft_request_with_thread() {
        let request = GmailDraftRequest {
            message: GmailRawMessage::new("cmF3", Some("thr1")),
        };
        let value = serde_json::to_value(&request).expect("serialize");
        assert_eq!(
            value,
            serde_json::json!({"message": {"raw": "cmF3", "threadId": "thr1"}})
        );
    }

    #[test]
    fn omits_missing_thread_id() {
        let value =
            serde_json::to_value(GmailRawMessage::new("cmF3", None)).expect("serialize");
        assert_eq!(value, serde_json::json!({"raw": "cmF3"}));
    }

    #[test]
    fn maps_unauthorized_as_auth_error() {
        let error = map_api_error(
            StatusCode::UNAUTHORIZED,
            r#"{"error":{"code":401,"message":"Request had invalid authentication credentials.","status":"UNAUTHENTICATED"}}"#,
        );

        match error {
            AppError::Auth(message) => {
                assert!(message.contains("invalid authentication credentials"));
            }
            other => panic!("expected auth error, got {other:?}"),
        }
    }

    #[test]
    fn maps_not_found_as_api_error() {
        let error = map_api_error(
            StatusCode::NOT_FOUND,
            r#"{"error":{"code":404,"message":"Requested entity was not found.","status":"NOT_FOUND","errors":[{"reason":"notFound"}]}}"#,
        );

        match error {
            AppError::Api(message) => {
                assert!(message.contains("Requested entity was not found"));
                assert!(message.contains("reason=notFound"));
            }
            other => panic!("expected api error, got {other:?}"),
        }
    }

    #[test]
    fn falls_back_to_raw_body() {
        let error = map_api_error(StatusCode::BAD_GATEWAY, "  upstream broke ");
        assert_eq!(
            error.to_string(),
            "api error: gmail api request failed (502 Bad Gateway): upstream broke"
        );
    }
}
