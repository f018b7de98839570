use clap::Parser;
use infrastructure::config::Config;
use presentation::cli::{Cli, CliApp};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let mut app = CliApp::new(Config::load());
    app.run(cli).await?;
    Ok(())
}
