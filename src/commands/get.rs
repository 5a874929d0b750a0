use serde::Serialize;

use crate::cli::GetArgs;
use crate::context::AppContext;
use crate::error::AppResult;
use crate::mail::{AttachmentIndex, ParsedEmail};

#[derive(Debug, Serialize)]
struct EmailWithAttachments<'a> {
    email: &'a ParsedEmail,
    attachments: &'a AttachmentIndex,
}

pub async fn run(ctx: &AppContext, args: GetArgs) -> AppResult<()> {
    let service = ctx.service().await?;
    let (email, attachments) = service.get_email_with_attachments(&args.id).await;

    let Some(email) = email else {
        return ctx
            .output
            .emit_none(&format!("message {} could not be retrieved", args.id));
    };

    let text = render(&email, &attachments);
    ctx.output.emit(
        &text,
        &EmailWithAttachments {
            email: &email,
            attachments: &attachments,
        },
    )
}

fn render(email: &ParsedEmail, attachments: &AttachmentIndex) -> String {
    let mut out = String::new();
    out.push_str(&format!("id: {}\n", email.id));
    for (label, value) in [
        ("from", &email.from),
        ("to", &email.to),
        ("date", &email.date),
        ("subject", &email.subject),
        ("type", &email.mime_type),
    ] {
        if let Some(value) = value {
            out.push_str(&format!("{label}: {value}\n"));
        }
    }

    out.push('\n');
    match &email.body {
        Some(body) => out.push_str(body),
        None => out.push_str("(no plain-text body)"),
    }
    out.push('\n');

    if !attachments.is_empty() {
        out.push_str(&format!("\n{} attachments\n", attachments.len()));
        for (part_id, attachment) in attachments {
            out.push_str(&format!(
                "  [{part_id}] {} ({}, {} bytes) id: {}\n",
                attachment.filename, attachment.mime_type, attachment.size, attachment.attachment_id
            ));
        }
    }

    out
}
