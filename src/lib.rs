pub mod api;
pub mod app;
pub mod auth;
pub mod cli;
pub mod commands;
pub mod config;
pub mod context;
pub mod error;
pub mod logging;
pub mod mail;
pub mod output;
pub mod service;

use cli::Cli;
use error::AppResult;

pub use service::{EmailQuery, GmailService, ReplyOutcome};

pub async fn run(cli: Cli) -> AppResult<()> {
    app::run(cli).await
}
