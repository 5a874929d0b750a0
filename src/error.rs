use std::io;

use thiserror::Error;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("configuration error: {0}")]
    Config(String),
    #[error("auth error: {0}")]
    Auth(String),
    #[error("api error: {0}")]
    Api(String),
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("no oauth2 credentials stored for user `{user_id}`")]
    NoCredentials { user_id: String },
    #[error("message `{message_id}` has no originator address to reply to")]
    MissingOriginator { message_id: String },
    #[error("decode error: {0}")]
    Decode(String),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("url parse error: {0}")]
    Url(#[from] url::ParseError),
}

/// Coarse classification used to decide whether a failure is worth retrying.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum ErrorKind {
    /// The service cannot be constructed at all.
    Fatal,
    /// The request itself is unusable; retrying will not help.
    Validation,
    /// The mail provider or the network failed.
    Transport,
    /// Local configuration or filesystem trouble.
    Local,
}

impl AppError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AppError::NoCredentials { .. } => ErrorKind::Fatal,
            AppError::MissingOriginator { .. } | AppError::InvalidInput(_) => {
                ErrorKind::Validation
            }
            AppError::Auth(_)
            | AppError::Api(_)
            | AppError::Http(_)
            | AppError::Json(_)
            | AppError::Decode(_) => ErrorKind::Transport,
            AppError::Config(_) | AppError::Io(_) | AppError::Url(_) => ErrorKind::Local,
        }
    }

    pub fn is_transport(&self) -> bool {
        self.kind() == ErrorKind::Transport
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_error_kinds() {
        let fatal = AppError::NoCredentials {
            user_id: "me@example.com".to_string(),
        };
        assert_eq!(fatal.kind(), ErrorKind::Fatal);

        let validation = AppError::MissingOriginator {
            message_id: "msg1".to_string(),
        };
        assert_eq!(validation.kind(), ErrorKind::Validation);
        assert!(!validation.is_transport());

        assert!(AppError::Api("boom".to_string()).is_transport());
        assert_eq!(
            AppError::Config("bad".to_string()).kind(),
            ErrorKind::Local
        );
    }

    #[test]
    fn renders_no_credentials_message() {
        let err = AppError::NoCredentials {
            user_id: "test@example.com".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "no oauth2 credentials stored for user `test@example.com`"
        );
    }
}
