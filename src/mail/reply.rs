use crate::error::{AppError, AppResult};

use super::mime::{self, ComposeRequest, Threading};
use super::parse::ParsedEmail;

/// An encoded reply ready to hand to the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplyMessage {
    pub request: ComposeRequest,
    pub threading: Threading,
    pub thread_id: Option<String>,
    pub raw: String,
}

/// Derives recipient, subject, threading and quoted body from `original`.
/// Fails when the original has no sender to reply to.
pub fn build_reply(
    original: &ParsedEmail,
    reply_body: &str,
    cc: Vec<String>,
) -> AppResult<ReplyMessage> {
    let from = original
        .from
        .as_deref()
        .filter(|from| !from.is_empty())
        .ok_or_else(|| AppError::MissingOriginator {
            message_id: original.id.clone(),
        })?;

    let request = ComposeRequest {
        to: from.to_string(),
        subject: reply_subject(original.subject.as_deref().unwrap_or_default()),
        body: quoted_reply_body(
            reply_body,
            original.date.as_deref().unwrap_or_default(),
            from,
            original.body.as_deref().unwrap_or_default(),
        ),
        cc,
    };
    let threading = Threading {
        in_reply_to: original.id.clone(),
        references: original.id.clone(),
    };
    let raw = mime::build_raw_message(&request, Some(&threading));

    Ok(ReplyMessage {
        request,
        threading,
        thread_id: original.thread_id.clone(),
        raw,
    })
}

pub fn reply_subject(subject: &str) -> String {
    format!("Re: {subject}")
}

pub fn quoted_reply_body(reply_body: &str, date: &str, from: &str, original_body: &str) -> String {
    format!(
        "{reply_body}\n\nOn {date}, {from} wrote:\n{}",
        quote(original_body)
    )
}

fn quote(body: &str) -> String {
    format!("> {}", body.replace('\n', "\n> "))
}
