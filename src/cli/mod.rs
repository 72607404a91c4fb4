//! CLI module - Command-line interface for devicetrail
//!
//! This module provides a structured CLI using clap for argument parsing.

mod commands;

pub use commands::{
    cmd_add_user, cmd_list_devices, cmd_rotate_api_key, cmd_set_password, render_device_table,
};

use clap::{Parser, Subcommand};

/// devicetrail - Device history and security log service
#[derive(Parser)]
#[command(name = "devicetrail")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the HTTP server (default)
    Serve,

    /// Create default config file
    Init,

    /// Manage user accounts
    User {
        #[command(subcommand)]
        command: UserCommands,
    },

    /// Show the device history of a user
    #[command(alias = "ls")]
    Devices {
        /// Username whose devices to show
        username: String,
    },
}

#[derive(Subcommand)]
pub enum UserCommands {
    /// Create a new account
    Add {
        username: String,
        password: String,
    },

    /// Set a new password
    Passwd {
        username: String,
        password: String,
    },

    /// Issue a new API key, revoking the current one
    #[command(name = "rotate-key")]
    RotateKey { username: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_devices_command() {
        let cli = Cli::try_parse_from(["devicetrail", "devices", "alice"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::Devices { ref username }) if username == "alice"
        ));
    }

    #[test]
    fn test_no_subcommand_defaults_to_none() {
        let cli = Cli::try_parse_from(["devicetrail"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_parse_rotate_key() {
        let cli = Cli::try_parse_from(["devicetrail", "user", "rotate-key", "admin"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::User {
                command: UserCommands::RotateKey { ref username }
            }) if username == "admin"
        ));
    }

    #[test]
    fn test_user_add_requires_password() {
        assert!(Cli::try_parse_from(["devicetrail", "user", "add", "bob"]).is_err());
    }
}
