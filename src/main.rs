//! Recipebox CLI application entry point
//!
//! Command-line front end for a recipe service. Every invocation mounts a
//! fresh session: the collection is loaded, the query is seeded from
//! `--address` and the flags, and the requested gesture runs against it.
//!
//! # Usage
//!
//! ```bash
//! # First page, newest first (default command)
//! recipebox
//!
//! # Search and filter, then print the shareable address
//! recipebox list -s soup -d easy --print-address
//!
//! # Resume a shared view
//! recipebox list --address "search=soup&sort=title&page=2"
//!
//! # Move the first recipe on page 2 to the fourth slot
//! recipebox move 0 3 --page 2
//!
//! # Email two recipes
//! recipebox share 4 7 --open
//! ```

use colored::Colorize;
use recipebox::api::RecipeClient;
use recipebox::cli::{Cli, Commands};
use recipebox::commands::{self, flush_notices, share::LinkTarget};
use recipebox::config::RecipeBoxConfig;
use recipebox::session::RecipeSession;
use recipebox::{RecipeBoxError, Result, completions};
use std::io;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::debug;
use tracing_subscriber::EnvFilter;

type Session = RecipeSession<RecipeClient>;

/// Install the stderr log subscriber
///
/// `RUST_LOG` wins over `--verbose` when set.
fn init_logging(default_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("recipebox={default_level}")));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

/// Mount the session, printing the failure notice if loading fails
async fn mount(session: &mut Session, address: &str, quiet: bool) -> Result<()> {
    let result = session.mount(address).await;
    flush_notices(session, quiet);
    result.map(|count| debug!("loaded {count} recipes"))
}

/// Dispatch a command that needs the backend
async fn run(
    session: &mut Session,
    command: Commands,
    config: &RecipeBoxConfig,
    quiet: bool,
) -> Result<()> {
    match command {
        Commands::List {
            query,
            format,
            print_address,
        } => {
            mount(session, query.address(), quiet).await?;
            commands::list(session, &query, format, print_address, quiet)
        }
        Commands::Featured { limit } => {
            commands::featured(session, limit.unwrap_or(config.featured_limit), quiet).await
        }
        Commands::Show { id } => {
            mount(session, "", quiet).await?;
            commands::show(session, &id, quiet)
        }
        Commands::Create { fields } => {
            mount(session, "", quiet).await?;
            commands::create(session, fields, quiet).await
        }
        Commands::Edit { id, fields } => {
            mount(session, "", quiet).await?;
            commands::edit(session, &id, fields, quiet).await
        }
        Commands::Delete { id, yes } => {
            mount(session, "", quiet).await?;
            commands::delete(session, &id, yes, quiet).await
        }
        Commands::Move { from, to, query } => {
            mount(session, query.address(), quiet).await?;
            commands::reorder(session, from, to, &query, quiet).await
        }
        Commands::Share {
            ids,
            subject,
            open,
            copy,
        } => {
            mount(session, "", quiet).await?;
            let subject = subject.as_deref().unwrap_or(&config.share_subject);
            commands::share(session, &ids, subject, LinkTarget::from_flags(open, copy), quiet)
                .map(|_| ())
        }
        Commands::Config { .. } | Commands::Completions { .. } => Ok(()),
    }
}

async fn try_main(cli: Cli) -> Result<()> {
    let command = cli.get_command();

    if let Commands::Completions { shell } = &command {
        completions::generate(*shell, &mut io::stdout());
        return Ok(());
    }

    let mut config = RecipeBoxConfig::load_or_setup()?;
    let quiet = cli.quiet || config.quiet;

    if let Commands::Config { command } = &command {
        let path = RecipeBoxConfig::config_path()?;
        return commands::config(config, command, &path, quiet);
    }

    if let Some(api_url) = &cli.api_url {
        config.set("api_url", api_url)?;
    }
    debug!("using recipe service at {}", config.api_url);

    let client = RecipeClient::new(&config.api_url, config.request_timeout())?;
    let mut session = RecipeSession::with_quiet_period(Arc::new(client), config.search_debounce());
    run(&mut session, command, &config, quiet).await
}

/// Main entry point for the recipebox application
///
/// Parses arguments, installs logging and dispatches. Load failures have
/// already been reported as notices; any other error is printed here.
#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse_args();
    init_logging(cli.log_level());

    match try_main(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(RecipeBoxError::Fetch(_)) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("{} {}", "❌".red(), e.user_message());
            ExitCode::FAILURE
        }
    }
}
