use clap::Parser;

#[tokio::main]
async fn main() {
    let cli = gmail_service::cli::Cli::parse();
    gmail_service::logging::init(cli.verbose);

    if let Err(err) = gmail_service::run(cli).await {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
