use clap::Parser;
use weather_refinery::cli::{run, Cli};
use weather_refinery::error::Result;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    run(cli).await
}
