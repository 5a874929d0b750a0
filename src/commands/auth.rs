use std::fs;
use std::time::SystemTime;

use serde::Serialize;

use crate::auth::{CredentialStore, Credentials};
use crate::cli::{AuthCommand, ImportArgs};
use crate::context::AppContext;
use crate::error::{AppError, AppResult};

#[derive(Debug, Serialize)]
struct AuthStatus {
    user_id: String,
    stored: bool,
    email: Option<String>,
    expired: Option<bool>,
    expires_in_seconds: Option<i64>,
    has_refresh_token: Option<bool>,
}

pub fn run(ctx: &AppContext, command: AuthCommand) -> AppResult<()> {
    match command {
        AuthCommand::Import(args) => import(ctx, args),
        AuthCommand::Status => {
            let credentials = ctx.credential_store.get_stored_credentials(&ctx.user_id)?;
            let status = status_of(&ctx.user_id, credentials.as_ref(), SystemTime::now());
            ctx.output.emit(&describe(&status), &status)
        }
        AuthCommand::Logout => {
            ctx.credential_store.clear(&ctx.user_id)?;
            let status = status_of(&ctx.user_id, None, SystemTime::now());
            ctx.output
                .emit(&format!("{}: credentials removed", ctx.user_id), &status)
        }
    }
}

fn import(ctx: &AppContext, args: ImportArgs) -> AppResult<()> {
    let raw = fs::read_to_string(&args.path)?;
    let credentials: Credentials = serde_json::from_str(&raw)?;
    if credentials.access_token.trim().is_empty() {
        return Err(AppError::InvalidInput(format!(
            "{} has an empty access_token",
            args.path.display()
        )));
    }

    ctx.credential_store
        .store_credentials(&ctx.user_id, &credentials)?;
    tracing::info!(user_id = %ctx.user_id, "credentials imported");

    let status = status_of(&ctx.user_id, Some(&credentials), SystemTime::now());
    ctx.output.emit(
        &format!("{}: credentials imported", ctx.user_id),
        &status,
    )
}

fn status_of(user_id: &str, credentials: Option<&Credentials>, now: SystemTime) -> AuthStatus {
    let Some(credentials) = credentials else {
        return AuthStatus {
            user_id: user_id.to_string(),
            stored: false,
            email: None,
            expired: None,
            expires_in_seconds: None,
            has_refresh_token: None,
        };
    };

    AuthStatus {
        user_id: user_id.to_string(),
        stored: true,
        email: credentials.email.clone(),
        expired: Some(credentials.is_expired(now)),
        expires_in_seconds: credentials.expires_in_seconds(now),
        has_refresh_token: Some(credentials.has_refresh_token()),
    }
}

fn describe(status: &AuthStatus) -> String {
    if !status.stored {
        return format!("{}: no stored credentials", status.user_id);
    }

    let email = status
        .email
        .as_ref()
        .map(|email| format!(" as {email}"))
        .unwrap_or_default();
    let expiry = match status.expired {
        Some(true) => " (expired)",
        _ => "",
    };
    let refresh_hint = match status.has_refresh_token {
        Some(true) => " (refresh available)",
        _ => " (no refresh token)",
    };

    format!(
        "{}: credentials stored{email}{expiry}{refresh_hint}",
        status.user_id
    )
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, UNIX_EPOCH};

    use super::*;

    #[test]
    fn describes_missing_credentials() {
        let status = status_of("me", None, SystemTime::now());
        assert_eq!(describe(&status), "me: no stored credentials");
    }

    #[test]
    fn describes_expired_credentials() {
        let mut credentials = Credentials::bearer("token");
        credentials.email = Some("me@example.com".to_string());
        credentials.expires_at_unix = Some(10);

        let status = status_of("me", Some(&credentials), UNIX_EPOCH + Duration::from_secs(100));
        assert_eq!(status.expires_in_seconds, Some(-90));
        assert_eq!(
            describe(&status),
            "me: credentials stored as me@example.com (expired) (no refresh token)"
        );
    }
}
