use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{AppError, AppResult};

const APP_DIR: &str = "gmail-service";

#[derive(Debug, Clone)]
pub struct AppPaths {
    users_dir: PathBuf,
    credentials_dir: PathBuf,
}

impl AppPaths {
    pub fn discover() -> AppResult<Self> {
        let config_root = dirs::config_dir()
            .ok_or_else(|| AppError::Config("unable to resolve config directory".to_string()))?;
        let data_root = dirs::data_dir()
            .ok_or_else(|| AppError::Config("unable to resolve data directory".to_string()))?;

        Self::at(config_root.join(APP_DIR), data_root.join(APP_DIR))
    }

    /// Lays the directory tree out under explicit roots.
    pub fn at(config_dir: impl AsRef<Path>, data_dir: impl AsRef<Path>) -> AppResult<Self> {
        let users_dir = config_dir.as_ref().join("users");
        let credentials_dir = data_dir.as_ref().join("credentials");

        fs::create_dir_all(&users_dir)?;
        fs::create_dir_all(&credentials_dir)?;

        Ok(Self {
            users_dir,
            credentials_dir,
        })
    }

    pub fn settings_file(&self, user_id: &str) -> PathBuf {
        self.users_dir.join(format!("{}.json", file_stem(user_id)))
    }

    pub fn credentials_file(&self, user_id: &str) -> PathBuf {
        self.credentials_dir
            .join(format!("{}.json", file_stem(user_id)))
    }
}

fn file_stem(user_id: &str) -> String {
    user_id
        .chars()
        .map(|ch| match ch {
            '/' | '\\' | ':' => '_',
            other => other,
        })
        .collect()
}
