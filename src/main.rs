use std::future::Future;
use std::path::PathBuf;
use std::pin::Pin;

use anyhow::{Context, Result};
use clap::Parser;
use cmdbot::dispatch::{ChatMessage as _, Dispatcher};
use cmdbot::store;
use cmdbot::utils::{unwrap_or_def_verbose, ResultExt as _};
use console::ConsoleMessage;
use log::{debug, info, trace};
use tokio::io::{AsyncBufReadExt as _, BufReader};
use tokio::signal;

mod console;
mod logging;

/// Chat command console: every line typed is handled as a chat message
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Config file. Defaults to config.yaml in the data directory
    #[arg(long, short)]
    config: Option<PathBuf>,

    /// Author of typed messages. Overrides `consoleUsername` from config
    #[arg(long, short)]
    username: Option<String>,
}

async fn run_console(dispatcher: Dispatcher<ConsoleMessage>, username: String) -> Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.context("Failed to read stdin")? {
        let message = ConsoleMessage::new(username.as_str(), line);
        match dispatcher.on_message(&message).await {
            Some(response) => debug!("Response: {response}"),
            None => trace!("Not a command: {}", message.content()),
        }
    }
    info!("End of input.");
    Ok(())
}

async fn terminate_on_signal() -> Result<()> {
    let interrupt_signal: Pin<Box<dyn Future<Output = _>>> = Box::pin(async {
        signal::unix::signal(signal::unix::SignalKind::interrupt())
            .context("Failed to register terminate signal handlers!")?
            .recv()
            .await;
        Ok(())
    });
    let terminate_signal = Box::pin(async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .context("Failed to register terminate signal handlers!")?
            .recv()
            .await;
        Ok(())
    });
    futures_util::future::select_all([interrupt_signal, terminate_signal])
        .await
        .0
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let _logger = logging::init();
    let config = unwrap_or_def_verbose(match &args.config {
        Some(path) => store::load_config_from(path),
        None => store::load_config(),
    });
    let username = args
        .username
        .unwrap_or_else(|| config.console_username.clone());
    let dispatcher = console::make_dispatcher(&config)?;

    info!(
        "Running. Type `{}help` to list commands.",
        dispatcher.prefix()
    );
    tokio::select! {
        result = run_console(dispatcher, username) => result.print_err(),
        result = terminate_on_signal() => result.print_err(),
    }
    info!("Terminating.");
    Ok(())
}
