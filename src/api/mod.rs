pub mod client;
pub mod drafts;
pub mod messages;
pub mod models;
pub mod transport;

pub use client::GmailClient;
pub use transport::MailTransport;
