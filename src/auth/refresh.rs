use std::collections::HashMap;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::Deserialize;

use crate::config::Settings;
use crate::error::{AppError, AppResult};

use super::Credentials;
use super::store::CredentialStore;

const GOOGLE_TOKEN_ENDPOINT: &str = "https://oauth2.googleapis.com/token";

#[derive(Debug, Deserialize)]
struct OAuthTokenResponse {
    access_token: String,
    refresh_token: Option<String>,
    expires_in: Option<u64>,
    token_type: Option<String>,
    scope: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OAuthErrorResponse {
    error: Option<String>,
    error_description: Option<String>,
}

/// Returns the user's stored credentials, exchanging the refresh token first
/// when the access token has expired. `None` means nothing is stored.
pub async fn refresh_if_expired<S: CredentialStore>(
    user_id: &str,
    settings: &Settings,
    store: &S,
) -> AppResult<Option<Credentials>> {
    let Some(current) = store.get_stored_credentials(user_id)? else {
        return Ok(None);
    };

    if !current.is_expired(SystemTime::now()) {
        return Ok(Some(current));
    }

    let refresh_token = current.refresh_token.clone().ok_or_else(|| {
        AppError::Auth("access token expired and no refresh token is stored".to_string())
    })?;

    tracing::info!(user_id, "access token expired, refreshing");
    let mut refreshed = exchange_refresh_token(settings, &refresh_token).await?;
    if refreshed.refresh_token.is_none() {
        refreshed.refresh_token = Some(refresh_token);
    }
    if refreshed.email.is_none() {
        refreshed.email = current.email;
    }

    store.store_credentials(user_id, &refreshed)?;
    Ok(Some(refreshed))
}

async fn exchange_refresh_token(settings: &Settings, refresh_token: &str) -> AppResult<Credentials> {
    let mut form = HashMap::from([
        ("grant_type", "refresh_token".to_string()),
        ("refresh_token", refresh_token.to_string()),
        ("client_id", settings.client_id()?.to_string()),
    ]);

    if let Some(client_secret) = settings.client_secret() {
        form.insert("client_secret", client_secret.to_string());
    }

    let response = reqwest::Client::new()
        .post(GOOGLE_TOKEN_ENDPOINT)
        .form(&form)
        .send()
        .await?;

    let status = response.status();
    if status.is_success() {
        let payload: OAuthTokenResponse = response.json().await?;
        return Ok(Credentials {
            access_token: payload.access_token,
            refresh_token: payload.refresh_token,
            expires_at_unix: expires_at_unix(payload.expires_in),
            token_type: payload.token_type,
            scope: payload.scope,
            email: None,
        });
    }

    let body = response.text().await?;
    Err(token_error(status, &body))
}

fn token_error(status: reqwest::StatusCode, body: &str) -> AppError {
    if let Ok(payload) = serde_json::from_str::<OAuthErrorResponse>(body) {
        let error = payload
            .error
            .unwrap_or_else(|| "unknown_oauth_error".to_string());
        let description = payload
            .error_description
            .unwrap_or_else(|| "no description".to_string());
        return AppError::Auth(format!(
            "oauth token refresh failed ({status}): {error} ({description})"
        ));
    }

    AppError::Auth(format!("oauth token refresh failed ({status}): {body}"))
}

fn expires_at_unix(expires_in: Option<u64>) -> Option<u64> {
    let expires_in = expires_in?;
    let now = SystemTime::now().duration_since(UNIX_EPOCH).ok()?.as_secs();
    Some(now.saturating_add(expires_in))
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use reqwest::StatusCode;

    use super::*;

    #[derive(Default)]
    struct MemoryStore {
        stored: RefCell<Option<Credentials>>,
    }

    impl CredentialStore for MemoryStore {
        fn get_stored_credentials(&self, _user_id: &str) -> AppResult<Option<Credentials>> {
            Ok(self.stored.borrow().clone())
        }

        fn store_credentials(&self, _user_id: &str, credentials: &Credentials) -> AppResult<()> {
            *self.stored.borrow_mut() = Some(credentials.clone());
            Ok(())
        }

        fn clear(&self, _user_id: &str) -> AppResult<()> {
            self.stored.borrow_mut().take();
            Ok(())
        }
    }

    #[tokio::test]
    async fn nothing_stored_yields_none() {
        let store = MemoryStore::default();
        let result = refresh_if_expired("me", &Settings::default(), &store)
            .await
            .expect("no error");
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn fresh_credentials_are_returned_as_is() {
        let store = MemoryStore::default();
        store
            .store_credentials("me", &Credentials::bearer("still-valid"))
            .expect("store");

        let result = refresh_if_expired("me", &Settings::default(), &store)
            .await
            .expect("no error")
            .expect("credentials");
        assert_eq!(result.access_token, "still-valid");
    }

    #[tokio::test]
    async fn expired_without_refresh_token_is_an_auth_error() {
        let store = MemoryStore::default();
        let mut creds = Credentials::bearer("stale");
        creds.expires_at_unix = Some(1);
        store.store_credentials("me", &creds).expect("store");

        let err = refresh_if_expired("me", &Settings::default(), &store)
            .await
            .expect_err("should fail");
        assert!(matches!(err, AppError::Auth(_)));
    }

    #[test]
    fn formats_oauth_error_payload() {
        let err = token_error(
            StatusCode::BAD_REQUEST,
            r#"{"error":"invalid_grant","error_description":"Token has been expired or revoked."}"#,
        );
        match err {
            AppError::Auth(message) => {
                assert!(message.contains("invalid_grant"));
                assert!(message.contains("expired or revoked"));
            }
            other => panic!("expected auth error, got {other:?}"),
        }
    }
}
