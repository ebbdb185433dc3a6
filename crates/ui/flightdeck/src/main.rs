mod action;
mod app;
mod cli;
mod components;
mod config;
mod errors;
mod logging;
mod pages;
mod state;
mod tasks;
mod tui;

use clap::Parser;
use color_eyre::Result;

use crate::app::App;
use crate::cli::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();
    errors::init()?;
    let _log_guard = logging::init()?;

    let mut app = App::new(args)?;
    app.run().await?;
    Ok(())
}
