//! Quill CLI - Main entry point

mod collect;
mod commands;
mod pretty;

use clap::{Parser, Subcommand};
use collect::LinePrompter;
use pretty::Pretty;
use quill_core::{CancellationToken, Quill};
use quill_foundation::Result;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Quill - scaffold, build and serve bot-backed projects
#[derive(Parser, Debug)]
#[command(name = "quill")]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    debug: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Initialize a Quill project in the current directory
    Init,
    /// Create a new project directory
    New {
        /// Project name (directory to create)
        name: PathBuf,
    },
    /// Build and serve the project
    Serve {
        /// Plugin manifest file or directory to load first
        file: Option<PathBuf>,

        /// Port to listen on (overrides [server] port)
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Build the project
    Build,
    /// Deploy the project
    Deploy,
    /// Run the project's tests
    Test,
    /// List registered type names
    Types,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    // Initialize logging
    let log_level = if args.debug { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    let pretty = Pretty::new();
    match run(args.command, &pretty).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            debug!("{:?}", e);
            pretty.error(e.kind(), &e.to_string());
            ExitCode::FAILURE
        }
    }
}

async fn run(command: Command, pretty: &Pretty) -> Result<()> {
    let cwd = std::env::current_dir()?;
    let quill = Quill::with_builtins()?;

    match command {
        Command::Init => {
            let stdin = std::io::stdin();
            let mut prompter = LinePrompter::new(stdin.lock(), std::io::stdout());
            commands::init(&cwd, &quill, &mut prompter, pretty).await
        }
        Command::New { name } => {
            let stdin = std::io::stdin();
            let mut prompter = LinePrompter::new(stdin.lock(), std::io::stdout());
            commands::new(&cwd, &name, &quill, &mut prompter, pretty).await
        }
        Command::Serve { file, port } => {
            let shutdown = shutdown_on_ctrl_c();
            commands::serve(&cwd, file.as_deref(), port, &quill, pretty, shutdown).await
        }
        Command::Build => commands::build(&cwd, &quill, pretty).await,
        Command::Deploy => commands::deploy(&cwd, &quill, pretty).await,
        Command::Test => commands::test(&cwd, &quill, pretty).await,
        Command::Types => commands::types(&cwd, &quill, pretty).await,
    }
}

/// Ctrl-C가 들어오면 취소되는 토큰
fn shutdown_on_ctrl_c() -> CancellationToken {
    let token = CancellationToken::new();
    let trigger = token.clone();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                debug!("Ctrl-C received, shutting down");
                trigger.cancel();
            }
            Err(e) => warn!("Failed to listen for Ctrl-C: {}", e),
        }
    });
    token
}
