use serde_json::json;

use crate::cli::{DraftCommand, DraftCreateArgs};
use crate::context::AppContext;
use crate::error::AppResult;
use crate::mail::ComposeRequest;

pub async fn run(ctx: &AppContext, command: DraftCommand) -> AppResult<()> {
    match command {
        DraftCommand::Create(args) => create(ctx, args).await,
        DraftCommand::Delete(args) => {
            let service = ctx.service().await?;
            let deleted = service.delete_draft(&args.id).await;

            let text = if deleted {
                format!("deleted draft {}", args.id)
            } else {
                format!("draft {} was not deleted", args.id)
            };
            ctx.output
                .emit(&text, &json!({ "id": args.id, "deleted": deleted }))
        }
    }
}

async fn create(ctx: &AppContext, args: DraftCreateArgs) -> AppResult<()> {
    let request = ComposeRequest::new(args.to, args.subject, args.body).with_cc(args.cc);
    let service = ctx.service().await?;

    match service.create_draft(&request).await {
        Some(draft) => ctx.output.emit(&format!("created draft {}", draft.id), &draft),
        None => ctx.output.emit_none("draft was not created"),
    }
}
