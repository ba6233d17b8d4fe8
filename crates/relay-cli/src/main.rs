//! relay - conversational orchestration CLI

mod app;
mod args;

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;

use relay_core::{ConsoleLogger, NoOpLogger, SharedLogger};

use app::App;
use args::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    if let Err(message) = cli.validate() {
        eprintln!("error: {}", message);
        std::process::exit(2);
    }

    let logger: SharedLogger = if cli.verbose {
        Arc::new(ConsoleLogger::new())
    } else {
        Arc::new(NoOpLogger)
    };

    let app = App::build(cli, logger)?;
    app.run().await
}
