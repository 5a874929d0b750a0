//! Mailbox facade: fetch and parse messages, compose drafts and replies.
//!
//! Every operation comes in two flavours. `try_*` methods return the
//! underlying [`AppError`] so callers can tell transport failures from
//! validation failures. The plain methods absorb any error, log it, and
//! degrade to an empty or absent result.

use serde::Serialize;

use crate::api::MailTransport;
use crate::api::models::{AttachmentData, Draft, SentMessage};
use crate::auth::{CredentialStore, Credentials};
use crate::config::settings::DEFAULT_MAX_RESULTS;
use crate::error::{AppError, AppResult};
use crate::mail::{
    self, AttachmentIndex, ComposeRequest, ParsedEmail, ParsedMessage, mime, parse_message,
};

/// Parameters for [`GmailService::query_emails`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailQuery {
    pub query: String,
    pub max_results: u32,
    pub include_body: bool,
}

impl Default for EmailQuery {
    fn default() -> Self {
        Self {
            query: String::new(),
            max_results: DEFAULT_MAX_RESULTS,
            include_body: false,
        }
    }
}

impl EmailQuery {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Self::default()
        }
    }

    pub fn max_results(mut self, max_results: u32) -> Self {
        self.max_results = max_results;
        self
    }

    pub fn include_body(mut self, include_body: bool) -> Self {
        self.include_body = include_body;
        self
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ReplyOutcome {
    Sent(SentMessage),
    Drafted(Draft),
}

impl ReplyOutcome {
    pub fn id(&self) -> &str {
        match self {
            ReplyOutcome::Sent(message) => &message.id,
            ReplyOutcome::Drafted(draft) => &draft.id,
        }
    }
}

#[derive(Debug)]
pub struct GmailService<T> {
    user_id: String,
    transport: T,
}

impl<T: MailTransport> GmailService<T> {
    /// Loads the user's stored credentials and builds the transport from
    /// them. Missing credentials are fatal; `build` is never called then.
    pub fn connect<S, F>(user_id: &str, store: &S, build: F) -> AppResult<Self>
    where
        S: CredentialStore + ?Sized,
        F: FnOnce(Credentials) -> T,
    {
        let credentials =
            store
                .get_stored_credentials(user_id)?
                .ok_or_else(|| AppError::NoCredentials {
                    user_id: user_id.to_string(),
                })?;

        tracing::info!(user_id, "gmail service ready");
        Ok(Self {
            user_id: user_id.to_string(),
            transport: build(credentials),
        })
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Lists matching ids and fetches each message in order. Any failing
    /// fetch fails the whole query.
    pub async fn try_query_emails(&self, query: &EmailQuery) -> AppResult<Vec<ParsedEmail>> {
        let refs = self
            .transport
            .list_message_ids(&query.query, query.max_results)
            .await?;

        let mut emails = Vec::with_capacity(refs.len());
        for entry in refs {
            let record = self.transport.get_message(&entry.id).await?;
            emails.push(parse_message(&record, query.include_body).email);
        }

        Ok(emails)
    }

    pub async fn query_emails(&self, query: &EmailQuery) -> Vec<ParsedEmail> {
        absorb("query_emails", self.try_query_emails(query).await).unwrap_or_default()
    }

    pub async fn try_get_email_with_attachments(&self, id: &str) -> AppResult<ParsedMessage> {
        let record = self.transport.get_message(id).await?;
        Ok(parse_message(&record, true))
    }

    pub async fn get_email_with_attachments(
        &self,
        id: &str,
    ) -> (Option<ParsedEmail>, AttachmentIndex) {
        match absorb(
            "get_email_with_attachments",
            self.try_get_email_with_attachments(id).await,
        ) {
            Some(parsed) => (Some(parsed.email), parsed.attachments),
            None => (None, AttachmentIndex::new()),
        }
    }

    pub async fn try_create_draft(&self, request: &ComposeRequest) -> AppResult<Draft> {
        let raw = mime::build_raw_message(request, None);
        self.transport.create_draft(&raw, None).await
    }

    pub async fn create_draft(&self, request: &ComposeRequest) -> Option<Draft> {
        absorb("create_draft", self.try_create_draft(request).await)
    }

    pub async fn try_delete_draft(&self, id: &str) -> AppResult<()> {
        self.transport.delete_draft(id).await
    }

    pub async fn delete_draft(&self, id: &str) -> bool {
        absorb("delete_draft", self.try_delete_draft(id).await).is_some()
    }

    /// Replies to `original` in its thread, either sending straight away or
    /// leaving a draft. The transport is not touched when the original has
    /// no sender.
    pub async fn try_create_reply(
        &self,
        original: &ParsedEmail,
        reply_body: &str,
        send: bool,
        cc: Vec<String>,
    ) -> AppResult<ReplyOutcome> {
        let reply = mail::build_reply(original, reply_body, cc)?;
        let thread_id = reply.thread_id.as_deref();

        if send {
            let sent = self.transport.send_message(&reply.raw, thread_id).await?;
            return Ok(ReplyOutcome::Sent(sent));
        }

        let draft = self.transport.create_draft(&reply.raw, thread_id).await?;
        Ok(ReplyOutcome::Drafted(draft))
    }

    pub async fn create_reply(
        &self,
        original: &ParsedEmail,
        reply_body: &str,
        send: bool,
        cc: Vec<String>,
    ) -> Option<ReplyOutcome> {
        absorb(
            "create_reply",
            self.try_create_reply(original, reply_body, send, cc).await,
        )
    }

    pub async fn try_get_attachment(
        &self,
        message_id: &str,
        attachment_id: &str,
    ) -> AppResult<AttachmentData> {
        self.transport
            .get_attachment(message_id, attachment_id)
            .await
    }

    pub async fn get_attachment(
        &self,
        message_id: &str,
        attachment_id: &str,
    ) -> Option<AttachmentData> {
        absorb(
            "get_attachment",
            self.try_get_attachment(message_id, attachment_id).await,
        )
    }
}

fn absorb<V>(operation: &'static str, result: AppResult<V>) -> Option<V> {
    match result {
        Ok(value) => Some(value),
        Err(err) => {
            tracing::warn!(operation, kind = ?err.kind(), error = %err, "operation failed");
            None
        }
    }
}
