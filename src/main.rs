use carstream::adapter::inbound::cli::command::Cli;
use carstream::adapter::inbound::cli::{self, output};
use clap::Parser;
use tracing::info;

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    let args = Cli::parse();

    if let Err(e) = cli::execute(&args).await {
        output::error(&e.to_string());
        std::process::exit(1);
    }

    info!("carstream stopped");
}
