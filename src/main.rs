//! taskmate - task management CLI
//!
#![doc = "taskmate - task management CLI"]
#![doc = "Main entry point for the taskmate application."]

use anyhow::Result;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use taskmate::cli::{Cli, Commands};
use taskmate::commands;
use taskmate::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse first so logging flags are known
    let cli = Cli::parse_args();

    init_tracing(cli.verbose, cli.json_logs);

    // Load configuration
    let config_path = cli.config.as_deref().unwrap_or("config/config.yaml");
    let config = Config::load(config_path, &cli)?;

    // Validate configuration
    config.validate()?;

    // Execute command
    match cli.command {
        Commands::Chat { no_delay } => {
            commands::chat::run_chat(config, no_delay).await?;
            Ok(())
        }
        Commands::Ask { message, no_delay } => {
            tracing::info!("Asking the assistant a single question");
            commands::ask::run_ask(config, message, no_delay).await?;
            Ok(())
        }
        Commands::Login { email, password } => {
            commands::auth::login(&config, &email, password).await?;
            Ok(())
        }
        Commands::Register {
            fullname,
            email,
            password,
        } => {
            commands::auth::register(&config, &fullname, &email, password).await?;
            Ok(())
        }
        Commands::Logout => {
            commands::auth::logout(&config)?;
            Ok(())
        }
        Commands::Whoami => {
            commands::auth::whoami(&config).await?;
            Ok(())
        }
        Commands::Tasks { command } => {
            tracing::debug!("Starting task command: {:?}", command);
            commands::tasks::handle_tasks(&config, command).await?;
            Ok(())
        }
    }
}

/// Initialize tracing subscriber with environment filter
///
/// `RUST_LOG` wins over `--verbose`; logs go to stderr so command output
/// stays clean.
fn init_tracing(verbose: bool, json: bool) {
    let default_directive = if verbose { "taskmate=debug" } else { "taskmate=info" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    let registry = tracing_subscriber::registry().with(env_filter);
    if json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}
