use std::io::Write;
use std::sync::Arc;

use clap::Parser;
use kotoba_config::Config;
use tokio::io::BufReader;
use tokio::signal;
use tracing_subscriber::EnvFilter;

pub mod cli;
pub mod commands;
pub mod controller;
pub mod events;
pub mod io;
pub mod output;
pub mod state;

#[cfg(test)]
mod tests;

use self::cli::{Cli, Commands};
use self::controller::AppController;
use self::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env is fine
    let _ = dotenvy::dotenv();

    // Logs go to stderr so stdout only carries command output
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = Config::load(&cli.config)?;
    if let Some(dir) = &cli.data_dir {
        config.storage.data_dir = dir.display().to_string();
    }

    let state = Arc::new(AppState::new(config));
    let mut processor = state.open_processor().await;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Commands::Extract {
            source,
            dry_run,
            text,
        } => commands::extract(&mut processor, text, source.into(), dry_run, &mut out)?,
        Commands::Import { file } => commands::import(&mut processor, &file, &mut out)?,
        Commands::Export { target, output } => {
            commands::export(&processor, target, output.as_deref(), &mut out)?
        }
        Commands::Notebook(command) => commands::notebook(&mut processor, command, &mut out)?,
        Commands::Chat => {
            drop(out);
            run_chat(state, processor).await?;
            return Ok(());
        }
    }

    out.flush()?;
    Ok(())
}

/// Conversation mode: stdin lines in, recorded words out, until EOF or Ctrl+C
async fn run_chat(
    state: Arc<AppState>,
    processor: kotoba_lang_japanese::JapaneseProcessor,
) -> anyhow::Result<()> {
    if atty::is(atty::Stream::Stdin) {
        eprintln!("Paste replies line by line. Prefix your own lines with \"user:\", type :unknown to list unknown words.");
    }

    let controller = AppController::new(state);
    let mut tasks = controller.spawn_tasks(
        processor,
        BufReader::new(tokio::io::stdin()),
        tokio::io::stdout(),
    );

    let mut shutting_down = false;
    loop {
        tokio::select! {
            result = signal::ctrl_c(), if !shutting_down => {
                if let Err(e) = result {
                    tracing::error!("Failed to listen for Ctrl+C: {e}");
                }
                tracing::info!("Shutdown requested");
                shutting_down = true;
                controller.shutdown();
            }
            joined = tasks.join_next() => match joined {
                None => break,
                Some(Ok(Ok(()))) => {}
                Some(Ok(Err(e))) => tracing::error!("task exited with error: {e}"),
                Some(Err(e)) => tracing::error!("task panicked: {e}"),
            },
        }
    }

    Ok(())
}
