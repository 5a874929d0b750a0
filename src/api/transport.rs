use async_trait::async_trait;

use crate::error::AppResult;

use super::models::{AttachmentData, Draft, MessageRef, RawMessage, SentMessage};

/// The mail provider operations the service depends on. Every call acts on
/// behalf of the authenticated mailbox owner.
#[async_trait]
pub trait MailTransport: Send + Sync {
    /// Ids matching `query`; an empty result is not an error.
    async fn list_message_ids(
        &self,
        query: &str,
        max_results: u32,
    ) -> AppResult<Vec<MessageRef>>;

    async fn get_message(&self, id: &str) -> AppResult<RawMessage>;

    async fn create_draft(&self, raw: &str, thread_id: Option<&str>) -> AppResult<Draft>;

    async fn delete_draft(&self, id: &str) -> AppResult<()>;

    async fn send_message(&self, raw: &str, thread_id: Option<&str>) -> AppResult<SentMessage>;

    async fn get_attachment(
        &self,
        message_id: &str,
        attachment_id: &str,
    ) -> AppResult<AttachmentData>;
}
