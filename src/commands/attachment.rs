use std::fs;

use serde_json::json;

use crate::cli::AttachmentArgs;
use crate::context::AppContext;
use crate::error::AppResult;

pub async fn run(ctx: &AppContext, args: AttachmentArgs) -> AppResult<()> {
    let service = ctx.service().await?;
    let Some(attachment) = service
        .get_attachment(&args.message_id, &args.attachment_id)
        .await
    else {
        return ctx.output.emit_none(&format!(
            "attachment {} of message {} could not be retrieved",
            args.attachment_id, args.message_id
        ));
    };

    let Some(path) = args.out else {
        let text = format!("{} bytes\n{}", attachment.size, attachment.data);
        return ctx.output.emit(&text, &attachment);
    };

    let bytes = attachment.decode()?;
    fs::write(&path, &bytes)?;

    let text = format!("wrote {} bytes to {}", bytes.len(), path.display());
    ctx.output.emit(
        &text,
        &json!({
            "size": attachment.size,
            "written": bytes.len(),
            "path": path.display().to_string(),
        }),
    )
}
