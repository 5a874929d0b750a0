use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(
    name = "gmail-service",
    version,
    about = "Query, read, draft and reply to Gmail messages"
)]
pub struct Cli {
    #[arg(
        long,
        global = true,
        default_value = "default",
        help = "User whose stored credentials to use"
    )]
    pub user: String,
    #[arg(long, global = true, help = "Emit JSON output")]
    pub json: bool,
    #[arg(short = 'v', long, global = true, action = ArgAction::Count, help = "Verbose logging")]
    pub verbose: u8,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    Auth(AuthArgs),
    Query(QueryArgs),
    Get(GetArgs),
    Draft(DraftArgs),
    Reply(ReplyArgs),
    Attachment(AttachmentArgs),
}

#[derive(Debug, Args)]
pub struct AuthArgs {
    #[command(subcommand)]
    pub command: AuthCommand,
}

#[derive(Debug, Subcommand)]
pub enum AuthCommand {
    /// Store a credentials JSON file obtained elsewhere.
    Import(ImportArgs),
    Status,
    Logout,
}

#[derive(Debug, Args)]
pub struct ImportArgs {
    #[arg(help = "Path to a credentials JSON file")]
    pub path: PathBuf,
}

#[derive(Debug, Args)]
pub struct QueryArgs {
    #[arg(long, help = "Gmail search query")]
    pub q: Option<String>,
    #[arg(long, help = "Maximum messages to return")]
    pub max_results: Option<u32>,
    #[arg(long, help = "Include the plain-text body of each message")]
    pub body: bool,
}

#[derive(Debug, Args)]
pub struct GetArgs {
    #[arg(help = "Gmail message id")]
    pub id: String,
}

#[derive(Debug, Args)]
pub struct DraftArgs {
    #[command(subcommand)]
    pub command: DraftCommand,
}

#[derive(Debug, Subcommand)]
pub enum DraftCommand {
    Create(DraftCreateArgs),
    Delete(DraftDeleteArgs),
}

#[derive(Debug, Args)]
pub struct DraftCreateArgs {
    #[arg(long, help = "Recipient address")]
    pub to: String,
    #[arg(long, visible_alias = "subj", help = "Email subject")]
    pub subject: String,
    #[arg(long, help = "Plain-text body")]
    pub body: String,
    #[arg(long, value_delimiter = ',', num_args = 1.., help = "CC addresses")]
    pub cc: Vec<String>,
}

#[derive(Debug, Args)]
pub struct DraftDeleteArgs {
    #[arg(help = "Draft id")]
    pub id: String,
}

#[derive(Debug, Args)]
pub struct ReplyArgs {
    #[arg(help = "Id of the message being replied to")]
    pub id: String,
    #[arg(long, help = "Plain-text reply body")]
    pub body: String,
    #[arg(long, value_delimiter = ',', num_args = 1.., help = "CC addresses")]
    pub cc: Vec<String>,
    #[arg(long, help = "Send immediately instead of saving a draft")]
    pub send: bool,
}

#[derive(Debug, Args)]
pub struct AttachmentArgs {
    #[arg(help = "Gmail message id")]
    pub message_id: String,
    #[arg(help = "Attachment id from `get`")]
    pub attachment_id: String,
    #[arg(long, help = "Write the decoded bytes to this file")]
    pub out: Option<PathBuf>,
}
