pub mod credentials;
pub mod refresh;
pub mod store;

pub use credentials::Credentials;
pub use refresh::refresh_if_expired;
pub use store::{CredentialStore, FileCredentialStore};
