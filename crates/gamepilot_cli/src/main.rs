use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::{debug, error};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use gamepilot_cli::commands::{
    config_cmd::{self, ConfigCommands},
    doctor_cmd,
    extensions_cmd::{self, ExtensionCommands},
    script_cmd::{self, ScriptCommands},
};
use config_manager::ConfigManager;
use gamepilot_cli::config::GlobalOptions;
use gamepilot_cli::errors::{is_development, Error, ENVIRONMENT_VARIABLE};

#[cfg(test)]
#[path = "main_tests.rs"]
mod tests;

/// gamepilot CLI: Automate a cloud-hosted browser game
#[derive(Parser, Debug)]
#[command(name = "gamepilot")]
#[command(about = "Automate a cloud-hosted browser game", long_about = None)]
struct Cli {
    /// Workspace root used to find workspace config files
    #[arg(long, global = true)]
    workspace: Option<PathBuf>,

    /// Extra config file, read ahead of the workspace config files
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Check the configuration and environment
    Doctor,

    #[command(subcommand)]
    Script(ScriptCommands),

    /// Sign in to the game
    Login,

    /// Run the daily task routine
    Daily,

    #[command(subcommand)]
    Extensions(ExtensionCommands),

    /// Show the CLI version
    Version,
}

impl Cli {
    fn options(&self) -> GlobalOptions {
        GlobalOptions {
            workspace: self.workspace.clone(),
            config: self.config.clone(),
        }
    }
}

/// Loads the configuration once and applies its `cli.color` preference.
fn load_configuration(options: &GlobalOptions) -> Result<ConfigManager, Error> {
    let mut manager = options.manager()?;
    let config = manager.get_config()?;
    colored::control::set_override(config.cli.color);
    Ok(manager)
}

async fn run(cli: Cli) -> Result<(), Error> {
    let options = cli.options();
    debug!(message = "Running command", command = ?cli.command, options = ?options);

    match cli.command {
        Commands::Config(cmd) => {
            // Listing locations must work even when a file is broken.
            let mut manager = match cmd {
                ConfigCommands::Paths => options.manager()?,
                _ => load_configuration(&options)?,
            };
            config_cmd::execute(cmd, &mut manager)
        }
        Commands::Doctor => doctor_cmd::execute(load_configuration(&options)?).await,
        Commands::Script(cmd) => {
            let mut manager = load_configuration(&options)?;
            script_cmd::execute(cmd, &mut manager).await
        }
        Commands::Login => {
            println!("Game login: (not yet implemented)");
            Ok(())
        }
        Commands::Daily => {
            println!("Daily task routine: (not yet implemented)");
            Ok(())
        }
        Commands::Extensions(cmd) => {
            println!("{}", extensions_cmd::describe(&cmd));
            Ok(())
        }
        Commands::Version => {
            println!(
                "gamepilot version {}",
                option_env!("GAMEPILOT_VERSION").unwrap_or(env!("CARGO_PKG_VERSION"))
            );
            Ok(())
        }
    }
}

#[tokio::main]
async fn main() {
    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer().pretty())
        .with(EnvFilter::from_env("GAMEPILOT_LOG"))
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(cli).await {
        error!(message = "Command failed", error = %e);
        let development = is_development(std::env::var(ENVIRONMENT_VARIABLE).ok().as_deref());
        eprintln!("{}", e.render(development));
        std::process::exit(e.exit_code());
    }
}
