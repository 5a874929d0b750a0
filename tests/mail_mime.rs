use base64::Engine;
use base64::engine::general_purpose::URL_SAFE;

use gmail_service::mail::mime::{ComposeRequest, Threading, build_raw_message, render_message};

fn decode(raw: &str) -> String {
    String::from_utf8(URL_SAFE.decode(raw).expect("base64 decode")).expect("utf8 payload")
}

#[test]
fn builds_plain_text_draft() {
    let request = ComposeRequest::new(
        "recipient@example.com",
        "Test Draft",
        "This is the draft body.",
    );

    let decoded = decode(&build_raw_message(&request, None));

    assert_eq!(
        decoded,
        "Content-Type: text/plain; charset=\"utf-8\"\r\n\
         MIME-Version: 1.0\r\n\
         Content-Transfer-Encoding: 7bit\r\n\
         To: recipient@example.com\r\n\
         Subject: Test Draft\r\n\
         \r\n\
         This is the draft body."
    );
    assert!(!decoded.contains("Cc:"));
    assert!(!decoded.contains("In-Reply-To:"));
}

#[test]
fn joins_cc_without_spaces() {
    let request = ComposeRequest::new("recipient@example.com", "Test Draft CC", "Body")
        .with_cc(vec![
            "cc1@example.com".to_string(),
            "cc2@example.com".to_string(),
        ]);

    let decoded = decode(&build_raw_message(&request, None));
    assert!(decoded.contains("\r\nCc: cc1@example.com,cc2@example.com\r\n"));
}

#[test]
fn encoding_is_padded_base64url() {
    // The standard alphabet would need `+` and `/` for these bytes.
    let request = ComposeRequest::new("a@b.c", "?>?>", "??>>??>>~~");
    let raw = build_raw_message(&request, None);

    assert!(raw.contains('-'));
    assert!(!raw.contains('+'));
    assert!(!raw.contains('/'));
    assert!(raw.ends_with("Pj5-fg=="));
    assert_eq!(decode(&raw), render_message(&request, None));
}

#[test]
fn identical_requests_serialize_identically() {
    let request = ComposeRequest::new("to@example.com", "Same", "Body")
        .with_cc(vec!["cc@example.com".to_string()]);

    assert_eq!(
        build_raw_message(&request, None),
        build_raw_message(&request.clone(), None)
    );
}

#[test]
fn includes_raw_id_threading_headers() {
    let request = ComposeRequest::new("dev@example.com", "Re: Test", "Hello");
    let threading = Threading {
        in_reply_to: "orig_msg1".to_string(),
        references: "orig_msg1".to_string(),
    };

    let decoded = decode(&build_raw_message(&request, Some(&threading)));

    assert!(decoded.contains("In-Reply-To: orig_msg1\r\n"));
    assert!(decoded.contains("References: orig_msg1\r\n"));
    assert!(decoded.ends_with("\r\n\r\nHello"));
}

#[test]
fn non_ascii_display_names_leave_addresses_intact() {
    let request = ComposeRequest::new("José Núñez <jose@example.com>", "Hola", "Body").with_cc(vec![
        "Zoë <zoe@example.com>".to_string(),
        "x@example.com".to_string(),
    ]);

    let decoded = decode(&build_raw_message(&request, None));

    assert!(decoded.contains("\r\nTo: =?utf-8?b?Sm9zw6kgTsO6w7Fleg==?= <jose@example.com>\r\n"));
    assert!(decoded.contains("\r\nCc: =?utf-8?b?Wm/Dqw==?= <zoe@example.com>,x@example.com\r\n"));
}

#[test]
fn ascii_address_lists_are_written_verbatim() {
    let request = ComposeRequest::new(
        "\"Doe, Jane\" <jane@example.com>, bob@example.com",
        "Hi",
        "Body",
    );

    let decoded = decode(&build_raw_message(&request, None));
    assert!(decoded.contains("\r\nTo: \"Doe, Jane\" <jane@example.com>, bob@example.com\r\n"));
}

#[test]
fn subject_is_still_an_encoded_word() {
    let request = ComposeRequest::new("a@example.com", "Ünïcode", "Body");

    let decoded = decode(&build_raw_message(&request, None));
    assert!(decoded.contains("\r\nSubject: =?utf-8?b?w5xuw69jb2Rl?=\r\n"));
}
