use crate::api::GmailClient;
use crate::auth::{self, FileCredentialStore};
use crate::config::{self, AppPaths, Settings};
use crate::error::AppResult;
use crate::output::Output;
use crate::service::GmailService;

#[derive(Debug)]
pub struct AppContext {
    pub user_id: String,
    pub paths: AppPaths,
    pub settings: Settings,
    pub credential_store: FileCredentialStore,
    pub output: Output,
}

impl AppContext {
    pub fn bootstrap(user: String, json: bool) -> AppResult<Self> {
        let user_id = config::resolve_user(&user);
        let paths = AppPaths::discover()?;
        let settings = config::load_settings(&paths, &user_id)?;
        let credential_store = FileCredentialStore::new(paths.clone());
        let output = Output::new(json);

        Ok(Self {
            user_id,
            paths,
            settings,
            credential_store,
            output,
        })
    }

    /// Refreshes expired credentials, then builds the service on top of an
    /// HTTP transport.
    pub async fn service(&self) -> AppResult<GmailService<GmailClient>> {
        auth::refresh_if_expired(&self.user_id, &self.settings, &self.credential_store).await?;

        let base_url = self.settings.api_base_url();
        GmailService::connect(&self.user_id, &self.credential_store, |credentials| {
            GmailClient::with_base_url(credentials.access_token, base_url)
        })
    }
}
