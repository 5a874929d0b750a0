use crate::cli::{Cli, Command};
use crate::commands;
use crate::context::AppContext;
use crate::error::AppResult;

pub async fn run(cli: Cli) -> AppResult<()> {
    let Cli {
        user,
        json,
        verbose: _,
        command,
    } = cli;

    let ctx = AppContext::bootstrap(user, json)?;

    match command {
        Command::Auth(args) => commands::auth::run(&ctx, args.command),
        Command::Query(args) => commands::query::run(&ctx, args).await,
        Command::Get(args) => commands::get::run(&ctx, args).await,
        Command::Draft(args) => commands::draft::run(&ctx, args.command).await,
        Command::Reply(args) => commands::reply::run(&ctx, args).await,
        Command::Attachment(args) => commands::attachment::run(&ctx, args).await,
    }
}
