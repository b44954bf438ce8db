//! Parley - conversational interviews from the terminal
//!
//! - `parley serve`: HTTP API server
//! - `parley chat`: run an interview on stdin/stdout
//! - `parley plan`: generate an interview plan as JSON
//! - `parley login`: store an API key

use anyhow::Result;
use clap::{Parser, Subcommand};

use parley_core::config::ParleyConfig;
use parley_core::interview::InterviewContext;
use parley_core::{constants, paths, InterviewMode};

mod chat;
mod login;
mod plan;
mod serve;

/// Parley - AI interview orchestrator
#[derive(Parser)]
#[command(name = "parley")]
#[command(about = "Run AI-led interviews with a single interviewer or a deliberating panel", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the Parley HTTP API server
    ///
    /// On first run, prompts for provider and API key configuration.
    Serve {
        /// Port to listen on (defaults to config, then 5001)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Interview yourself in the terminal
    ///
    /// Type answers at the prompt; `/quit` or end of input ends the interview.
    /// Logs go to ~/.parley/logs/parley.log.
    Chat {
        /// `panel` (three deliberating agents) or `single`
        #[arg(short, long)]
        mode: Option<InterviewMode>,
        /// Who is being interviewed
        #[arg(long, default_value = "")]
        context: String,
        /// What the interview should find out
        #[arg(long, default_value = "")]
        goals: String,
        #[arg(long, default_value = "")]
        additional_context: String,
    },

    /// Generate an interview plan and print it as JSON
    Plan {
        #[arg(long, default_value = "")]
        context: String,
        #[arg(long, default_value = "")]
        background: String,
        #[arg(long, default_value = "")]
        goals: String,
    },

    /// Store an API key for a provider
    Login,
}

/// Send logs to ~/.parley/logs so stdout stays clean for the conversation
fn init_file_logging() -> Result<()> {
    let log_dir = paths::logs_dir();
    if let Err(e) = std::fs::create_dir_all(&log_dir) {
        eprintln!("Failed to create log directory: {}", e);
    }

    #[cfg(unix)]
    let null_device = "/dev/null";
    #[cfg(windows)]
    let null_device = "NUL";

    let log_file = match std::fs::File::create(log_dir.join(constants::paths::LOG_FILE_NAME)) {
        Ok(file) => file,
        Err(e) => {
            eprintln!(
                "Failed to create log file: {}, falling back to null device",
                e
            );
            std::fs::File::create(null_device)?
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::sync::Mutex::new(log_file))
        .with_ansi(false)
        .init();

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let command = match cli.command {
        // Serve mode has its own logging (stdout)
        Commands::Serve { port } => {
            let mut settings = ParleyConfig::load()?;
            if let Some(port) = port {
                settings.port = port;
            }
            return serve::run(settings).await;
        }
        other => other,
    };

    init_file_logging()?;
    let settings = ParleyConfig::load()?;

    match command {
        Commands::Chat {
            mode,
            context,
            goals,
            additional_context,
        } => {
            let mode = mode.unwrap_or(settings.default_mode);
            let context = InterviewContext::new(context, goals, additional_context);
            chat::run(&settings, context, mode).await
        }
        Commands::Plan {
            context,
            background,
            goals,
        } => plan::run(&settings, &context, &background, &goals).await,
        Commands::Login => login::run_setup_wizard(),
        Commands::Serve { .. } => Ok(()),
    }
}
