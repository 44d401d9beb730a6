use clap::Subcommand;

#[cfg(test)]
#[path = "extensions_cmd_tests.rs"]
mod tests;

/// Subcommands for the extensions command
#[derive(Subcommand, Debug)]
pub enum ExtensionCommands {
    /// List installed extensions
    List,

    /// Install an extension
    Install {
        /// Extension name
        name: String,
    },

    /// Remove an installed extension
    Remove {
        /// Extension name
        name: String,
    },
}

/// The message printed for an extensions command.
pub fn describe(cmd: &ExtensionCommands) -> String {
    match cmd {
        ExtensionCommands::List => "Installed extensions: (not yet implemented)".to_string(),
        ExtensionCommands::Install { name } => {
            format!("Install extension '{}': (not yet implemented)", name)
        }
        ExtensionCommands::Remove { name } => {
            format!("Remove extension '{}': (not yet implemented)", name)
        }
    }
}
