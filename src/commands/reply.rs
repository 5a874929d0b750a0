use crate::cli::ReplyArgs;
use crate::context::AppContext;
use crate::error::AppResult;
use crate::service::ReplyOutcome;

pub async fn run(ctx: &AppContext, args: ReplyArgs) -> AppResult<()> {
    let service = ctx.service().await?;
    let (original, _) = service.get_email_with_attachments(&args.id).await;
    let Some(original) = original else {
        return ctx
            .output
            .emit_none(&format!("message {} could not be retrieved", args.id));
    };

    // Validation failures surface as errors; provider failures only as "no result".
    let outcome = match service
        .try_create_reply(&original, &args.body, args.send, args.cc)
        .await
    {
        Ok(outcome) => outcome,
        Err(err) if err.is_transport() => {
            tracing::warn!(message_id = %args.id, error = %err, "reply failed");
            return ctx.output.emit_none("reply was not created");
        }
        Err(err) => return Err(err),
    };

    ctx.output.emit(&describe(&outcome), &outcome)
}

fn describe(outcome: &ReplyOutcome) -> String {
    match outcome {
        ReplyOutcome::Sent(message) => format!("sent reply {}", message.id),
        ReplyOutcome::Drafted(draft) => format!("saved reply draft {}", draft.id),
    }
}
