use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};
use dokan_session::config::timeout_from_ms;
use dokan_session::{AppShell, Role, SessionConfig, SessionError, status_report};
use serde_json::Value;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("session operation failed: {0}")]
    Session(#[from] SessionError),
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "dokan-session", about = "Inspect and drive the local marketplace session")]
struct Cli {
    /// Session document path (overrides `SESSION_STORE_PATH`).
    #[arg(long, env = "SESSION_STORE_PATH")]
    store: Option<PathBuf>,

    /// Per-call storage timeout in milliseconds; 0 waits forever.
    #[arg(long, env = "SESSION_STORAGE_TIMEOUT_MS")]
    timeout_ms: Option<u64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Restore the session and print the resulting status.
    Status,
    /// Persist a session token and role.
    Login {
        #[arg(long, env = "SESSION_TOKEN")]
        token: String,
        #[arg(long)]
        role: Role,
    },
    /// Clear the persisted session.
    Logout,
    /// Restore the session, then print every status transition until Ctrl-C.
    Watch,
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let mut config = SessionConfig::from_env();
    if let Some(store) = cli.store {
        config.store_path = store;
    }
    if let Some(ms) = cli.timeout_ms {
        config.storage_timeout = timeout_from_ms(ms);
    }
    // No splash screen in a terminal.
    config.splash = Duration::ZERO;

    let shell = AppShell::from_config(&config);
    let status = match cli.command {
        Command::Status => {
            shell.boot().await;
            shell.controller().status()
        }
        Command::Login { token, role } => shell.controller().login(&token, role).await?,
        Command::Logout => shell.controller().logout().await?,
        Command::Watch => return run_watch(&shell).await,
    };

    print_json(&status_report(status)?)
}

async fn run_watch(shell: &AppShell) -> Result<(), CliError> {
    shell.boot().await;
    let mut rx = shell.subscribe();
    print_json(&status_report(*rx.borrow_and_update())?)?;

    loop {
        tokio::select! {
            changed = rx.changed() => {
                if changed.is_err() {
                    return Ok(());
                }
                let status = *rx.borrow_and_update();
                print_json(&status_report(status)?)?;
            }
            _ = tokio::signal::ctrl_c() => return Ok(()),
        }
    }
}

fn print_json(value: &Value) -> Result<(), CliError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[cfg(test)]
#[path = "main_test.rs"]
mod tests;
