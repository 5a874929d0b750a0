use base64::Engine;
use base64::engine::general_purpose::{STANDARD, URL_SAFE};

/// Addressing and content for a new plain-text message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposeRequest {
    pub to: String,
    pub subject: String,
    pub body: String,
    pub cc: Vec<String>,
}

impl ComposeRequest {
    pub fn new(to: impl Into<String>, subject: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            to: to.into(),
            subject: subject.into(),
            body: body.into(),
            cc: Vec::new(),
        }
    }

    pub fn with_cc(mut self, cc: Vec<String>) -> Self {
        self.cc = cc;
        self
    }
}

/// Threading headers tying an outgoing message to an earlier one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Threading {
    pub in_reply_to: String,
    pub references: String,
}

/// Serializes a single-part `text/plain` message and base64url encodes it
/// (padded) for the provider's `raw` field.
pub fn build_raw_message(request: &ComposeRequest, threading: Option<&Threading>) -> String {
    URL_SAFE.encode(render_message(request, threading).as_bytes())
}

pub fn render_message(request: &ComposeRequest, threading: Option<&Threading>) -> String {
    let mut headers = content_headers(&request.body);
    headers.push(address_header("To", &request.to));

    if !request.cc.is_empty() {
        headers.push(address_header("Cc", &request.cc.join(",")));
    }

    headers.push(header("Subject", &request.subject));

    if let Some(threading) = threading {
        headers.push(header("In-Reply-To", &threading.in_reply_to));
        headers.push(header("References", &threading.references));
    }

    format!("{}\r\n\r\n{}", headers.join("\r\n"), request.body)
}

fn content_headers(body: &str) -> Vec<String> {
    let transfer_encoding = if body.is_ascii() { "7bit" } else { "8bit" };
    vec![
        "Content-Type: text/plain; charset=\"utf-8\"".to_string(),
        "MIME-Version: 1.0".to_string(),
        format!("Content-Transfer-Encoding: {transfer_encoding}"),
    ]
}

fn header(name: &str, value: &str) -> String {
    format!("{name}: {}", encode_header_value(&sanitize_header_value(value)))
}

fn sanitize_header_value(input: &str) -> String {
    input
        .chars()
        .filter(|value| *value != '\r' && *value != '\n')
        .collect()
}

/// Address headers keep every `<addr>` and separator verbatim; only a
/// non-ASCII display name becomes an encoded word.
fn address_header(name: &str, value: &str) -> String {
    let value = sanitize_header_value(value);
    let mailboxes = split_address_list(&value)
        .into_iter()
        .map(encode_mailbox)
        .collect::<Vec<_>>();
    format!("{name}: {}", mailboxes.join(","))
}

/// Splits on commas outside quoted display names and angle brackets.
fn split_address_list(value: &str) -> Vec<&str> {
    let mut mailboxes = Vec::new();
    let mut start = 0;
    let mut in_quotes = false;
    let mut in_angle = false;

    for (index, ch) in value.char_indices() {
        match ch {
            '"' if !in_angle => in_quotes = !in_quotes,
            '<' if !in_quotes => in_angle = true,
            '>' if !in_quotes => in_angle = false,
            ',' if !in_quotes && !in_angle => {
                mailboxes.push(&value[start..index]);
                start = index + 1;
            }
            _ => {}
        }
    }
    mailboxes.push(&value[start..]);
    mailboxes
}

fn encode_mailbox(mailbox: &str) -> String {
    if mailbox.is_ascii() || !mailbox.trim_end().ends_with('>') {
        return mailbox.to_string();
    }
    let Some(open) = mailbox.rfind('<') else {
        return mailbox.to_string();
    };

    let (display, address) = mailbox.split_at(open);
    let leading = &display[..display.len() - display.trim_start().len()];
    let display_name = display.trim().trim_matches('"');
    if display_name.is_ascii() {
        return mailbox.to_string();
    }

    format!("{leading}{} {address}", encode_header_value(display_name))
}

/// RFC 2047 encoded word for values that are not plain ASCII.
fn encode_header_value(value: &str) -> String {
    if value.is_ascii() {
        return value.to_string();
    }

    format!("=?utf-8?b?{}?=", STANDARD.encode(value.as_bytes()))
}
