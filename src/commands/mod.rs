pub mod attachment;
pub mod auth;
pub mod draft;
pub mod get;
pub mod query;
pub mod reply;
