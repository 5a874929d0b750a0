use crate::cli::QueryArgs;
use crate::context::AppContext;
use crate::error::{AppError, AppResult};
use crate::mail::ParsedEmail;
use crate::service::EmailQuery;

pub async fn run(ctx: &AppContext, args: QueryArgs) -> AppResult<()> {
    let query = build_query(&args, ctx.settings.default_max_results())?;
    let service = ctx.service().await?;
    let emails = service.query_emails(&query).await;

    ctx.output.emit(&render(&emails), &emails)
}

fn build_query(args: &QueryArgs, default_max_results: u32) -> AppResult<EmailQuery> {
    let max_results = args.max_results.unwrap_or(default_max_results);
    if max_results == 0 {
        return Err(AppError::InvalidInput(
            "--max-results must be greater than 0".to_string(),
        ));
    }

    let query = args.q.as_deref().map(str::trim).unwrap_or_default();
    Ok(EmailQuery::new(query)
        .max_results(max_results)
        .include_body(args.body))
}

fn render(emails: &[ParsedEmail]) -> String {
    if emails.is_empty() {
        return "0 messages".to_string();
    }

    let mut out = String::new();
    for (index, email) in emails.iter().enumerate() {
        let from = email.from.as_deref().unwrap_or("(unknown sender)");
        let subject = email.subject.as_deref().unwrap_or("(no subject)");
        let date = email.date.as_deref().unwrap_or("(no date)");

        out.push_str(&format!("{}. {}\n", index + 1, email.id));
        out.push_str(&format!("   from: {from}\n"));
        out.push_str(&format!("   subject: {subject}\n"));
        out.push_str(&format!("   date: {date}\n\n"));
        out.push_str(&format!("   {}\n", format_preview(email.snippet.as_deref())));

        if let Some(body) = &email.body {
            out.push('\n');
            for line in body.lines() {
                out.push_str(&format!("   | {line}\n"));
            }
        }

        if index + 1 < emails.len() {
            out.push('\n');
        }
    }

    out
}

fn format_preview(snippet: Option<&str>) -> String {
    let snippet = snippet.unwrap_or("(no preview)");
    let decoded = html_escape::decode_html_entities(snippet).to_string();
    let compact = decoded.split_whitespace().collect::<Vec<_>>().join(" ");

    if compact.len() <= 120 {
        return compact;
    }

    let mut end = 120;
    while !compact.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &compact[..end])
}
