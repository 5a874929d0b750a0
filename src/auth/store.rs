use std::fs;

use crate::config::AppPaths;
use crate::error::AppResult;

use super::Credentials;

/// Source of stored OAuth2 credentials, keyed by user id.
pub trait CredentialStore {
    fn get_stored_credentials(&self, user_id: &str) -> AppResult<Option<Credentials>>;
    fn store_credentials(&self, user_id: &str, credentials: &Credentials) -> AppResult<()>;
    fn clear(&self, user_id: &str) -> AppResult<()>;
}

#[derive(Debug, Clone)]
pub struct FileCredentialStore {
    paths: AppPaths,
}

impl FileCredentialStore {
    pub fn new(paths: AppPaths) -> Self {
        Self { paths }
    }
}

impl CredentialStore for FileCredentialStore {
    fn get_stored_credentials(&self, user_id: &str) -> AppResult<Option<Credentials>> {
        let path = self.paths.credentials_file(user_id);
        if !path.exists() {
            return Ok(None);
        }

        let raw = fs::read_to_string(path)?;
        let credentials = serde_json::from_str(&raw)?;
        Ok(Some(credentials))
    }

    fn store_credentials(&self, user_id: &str, credentials: &Credentials) -> AppResult<()> {
        let path = self.paths.credentials_file(user_id);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let payload = serde_json::to_string_pretty(credentials)?;
        fs::write(&path, payload)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;

            let mut perms = fs::metadata(&path)?.permissions();
            perms.set_mode(0o600);
            fs::set_permissions(&path, perms)?;
        }

        Ok(())
    }

    fn clear(&self, user_id: &str) -> AppResult<()> {
        let path = self.paths.credentials_file(user_id);
        if path.exists() {
            fs::remove_file(path)?;
        }

        Ok(())
    }
}
