//! CLI entry and dispatch.

use anyhow::{Context, Result};
use clap::Parser;
use rukkor_core::config;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "rukkor")]
#[command(version)]
#[command(about = "Rukkor workplace client")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Log in with email and password
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },

    /// Verify a one-time password sent to an email address
    VerifyOtp {
        #[arg(long)]
        otp: String,
        #[arg(long)]
        email: String,
    },

    /// Log out (clear the stored token)
    Logout,

    /// Show authentication status
    Status,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(clap::Subcommand)]
enum ConfigCommands {
    /// Show the path to the config file
    Path,
    /// Initialize a default config file (if not present)
    Init,
    /// Set the backend base URL
    SetUrl {
        #[arg(value_name = "URL")]
        url: String,
    },
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // Keep the non-blocking writer alive for the process lifetime.
    let _log_guard = init_logging();

    // one tokio runtime for everything
    let rt = tokio::runtime::Runtime::new().context("create tokio runtime")?;

    rt.block_on(async move { dispatch(cli).await })
}

/// Initializes file-based logging under the app home dir.
///
/// Logging must never write to the terminal: the TUI owns it. Filter comes
/// from `RUKKOR_LOG`; logging is skipped entirely if the directory cannot be
/// created.
fn init_logging() -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let log_dir = config::paths::log_dir();
    std::fs::create_dir_all(&log_dir).ok()?;

    let appender = tracing_appender::rolling::daily(log_dir, "rukkor.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let filter = EnvFilter::try_from_env("RUKKOR_LOG").unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .try_init();

    Some(guard)
}

async fn dispatch(cli: Cli) -> Result<()> {
    let config = config::Config::load().context("load config")?;

    // default to the interactive app
    let Some(command) = cli.command else {
        return rukkor_tui::run_app(&config).await;
    };

    match command {
        Commands::Login { email, password } => {
            commands::auth::login(&config, &email, &password).await
        }
        Commands::VerifyOtp { otp, email } => {
            commands::auth::verify_otp(&config, &otp, &email).await
        }
        Commands::Logout => commands::auth::logout(),
        Commands::Status => commands::auth::status(),
        Commands::Config { command } => match command {
            ConfigCommands::Path => commands::config::path(),
            ConfigCommands::Init => commands::config::init(),
            ConfigCommands::SetUrl { url } => commands::config::set_url(&url),
        },
    }
}
