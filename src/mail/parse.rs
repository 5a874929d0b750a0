use std::collections::BTreeMap;

use base64::Engine;
use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use serde::{Deserialize, Serialize};

use crate::api::models::{Header, RawMessage};
use crate::error::{AppError, AppResult};

use super::tree::{LeafContent, Part};

/// The provider pads some payloads and not others.
const URL_SAFE_LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Flat view of a provider message. `body` is only present when a
/// `text/plain` leaf was found.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedEmail {
    pub id: String,
    #[serde(default)]
    pub thread_id: Option<String>,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub from: Option<String>,
    #[serde(default)]
    pub to: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub snippet: Option<String>,
    #[serde(default)]
    pub mime_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttachmentDescriptor {
    pub filename: String,
    pub mime_type: String,
    pub attachment_id: String,
    pub size: u64,
}

/// Attachments keyed by the `partId` of the leaf that carries them.
pub type AttachmentIndex = BTreeMap<String, AttachmentDescriptor>;

#[derive(Debug, Clone, PartialEq)]
pub struct ParsedMessage {
    pub email: ParsedEmail,
    pub attachments: AttachmentIndex,
}

pub fn parse_message(record: &RawMessage, include_body: bool) -> ParsedMessage {
    let payload = record.payload.as_ref();
    let headers = payload.map(|node| node.headers.as_slice()).unwrap_or_default();

    let mut body = None;
    let mut attachments = AttachmentIndex::new();

    for node in payload.into_iter().flat_map(|root| root.walk()) {
        let Part::Leaf(leaf) = node.classify() else {
            continue;
        };

        if leaf.is_attachment() {
            if let LeafContent::Attachment {
                attachment_id,
                size,
            } = leaf.content
            {
                attachments.insert(
                    leaf.part_id.to_string(),
                    AttachmentDescriptor {
                        filename: leaf.filename.unwrap_or_default().to_string(),
                        mime_type: leaf.mime_type.to_string(),
                        attachment_id: attachment_id.to_string(),
                        size,
                    },
                );
            }
            continue;
        }

        if !include_body || body.is_some() {
            continue;
        }

        if let Some(data) = leaf.plain_text_data() {
            match decode_text(data) {
                Ok(text) => body = Some(text),
                Err(err) => {
                    tracing::debug!(
                        message_id = %record.id,
                        part_id = leaf.part_id,
                        error = %err,
                        "skipping undecodable text/plain part"
                    );
                }
            }
        }
    }

    let email = ParsedEmail {
        id: record.id.clone(),
        thread_id: record.thread_id.clone(),
        subject: header_value(headers, "Subject"),
        from: header_value(headers, "From"),
        to: header_value(headers, "To"),
        date: header_value(headers, "Date"),
        snippet: record.snippet.clone(),
        mime_type: payload.map(|node| node.mime_type.clone()),
        body,
    };

    ParsedMessage { email, attachments }
}

pub fn decode_base64url(data: &str) -> AppResult<Vec<u8>> {
    URL_SAFE_LENIENT
        .decode(data.trim())
        .map_err(|err| AppError::Decode(format!("invalid base64url data: {err}")))
}

fn decode_text(data: &str) -> AppResult<String> {
    let bytes = decode_base64url(data)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

fn header_value(headers: &[Header], target: &str) -> Option<String> {
    headers
        .iter()
        .find(|header| header.name == target)
        .map(|header| header.value.clone())
}
