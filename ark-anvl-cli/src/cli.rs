//! Command-line argument structures.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use ark_anvl::{BaseConfig, Columns};
use ark_anvl_client::{ClientConfig, Credentials, DEFAULT_URL, SessionStore};
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "ark",
    version,
    about = "Mint, fetch and edit ARK identifiers and their ANVL metadata"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalArgs,
}

/// Options shared by every command.
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Naming authority number identifiers resolve against
    #[arg(long, global = true, env = "ARK_NAAN", default_value = ark_anvl::DEFAULT_NAAN)]
    pub naan: String,

    /// Shoulder identifiers resolve against
    #[arg(long, global = true, env = "ARK_SHOULDER", default_value = ark_anvl::DEFAULT_SHOULDER)]
    pub shoulder: String,

    /// Registry base URL
    #[arg(long, global = true, env = "ARK_REGISTRY_URL", default_value = DEFAULT_URL)]
    pub url: String,

    /// Registry user name
    #[arg(long, global = true, env = "ARK_USER")]
    pub user: Option<String>,

    /// Registry password
    #[arg(long, global = true, env = "ARK_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Session cookie file (defaults to ~/.ark_session)
    #[arg(long, global = true, env = "ARK_SESSION_FILE", value_name = "PATH")]
    pub session_file: Option<PathBuf>,

    /// Request timeout in seconds
    #[arg(long, global = true, default_value_t = 30, value_name = "SECONDS")]
    pub timeout: u64,
}

impl GlobalArgs {
    /// Builds the base from `--naan` and `--shoulder`.
    pub fn base_config(&self) -> Result<BaseConfig> {
        BaseConfig::new(&self.naan, &self.shoulder).context("invalid base configuration")
    }

    /// Builds the client configuration. The session is filled in later.
    pub fn client_config(&self) -> ClientConfig {
        let mut config = ClientConfig::new()
            .with_url(self.url.as_str())
            .with_timeout(Duration::from_secs(self.timeout));
        if let (Some(user), Some(password)) = (&self.user, &self.password) {
            config = config.with_credentials(Credentials::new(user.as_str(), password.as_str()));
        }
        config
    }

    /// Returns the session store at `--session-file` or the default path.
    pub fn session_store(&self) -> Result<SessionStore> {
        match &self.session_file {
            Some(path) => Ok(SessionStore::new(path)),
            None => SessionStore::at_default().context("no session file location"),
        }
    }
}

/// Flags for commands that print records.
#[derive(Args, Debug, Clone, Default)]
pub struct OutputArgs {
    /// Write CSV rows with these columns
    #[arg(long, value_name = "COL:COL")]
    pub csv: Option<Columns>,

    /// Write the CSV header row first
    #[arg(long, requires = "csv")]
    pub header: bool,

    /// Write a JSON object per record
    #[arg(long, conflicts_with = "csv")]
    pub array: bool,

    /// Fallback value for the `ark` element
    #[arg(long, value_name = "ID")]
    pub ark: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the fully-qualified form of each identifier
    Fq {
        /// Identifiers, in any shorthand
        #[arg(required = true, value_name = "ID")]
        ids: Vec<String>,
    },

    /// Read ANVL from stdin and write it back out
    Anvl {
        #[command(flatten)]
        output: OutputArgs,
    },

    /// Print name:value arguments as a record
    #[command(name = "args_to_anvl", alias = "args-to-anvl")]
    ArgsToAnvl {
        /// Elements as name:value
        #[arg(value_name = "NAME:VALUE")]
        elements: Vec<String>,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Read a JSON object from stdin and print it as a record
    #[command(name = "array_to_anvl", alias = "array-to-anvl")]
    ArrayToAnvl {
        #[command(flatten)]
        output: OutputArgs,
    },

    /// Fetch the metadata of each identifier
    Get {
        /// Identifiers, in any shorthand
        #[arg(required = true, value_name = "ID")]
        ids: Vec<String>,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Mint identifiers on the configured shoulder
    Mint {
        /// Number of identifiers to mint
        #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
        count: u32,

        /// Metadata as name:value
        #[arg(value_name = "NAME:VALUE")]
        elements: Vec<String>,
    },

    /// Create an identifier with a chosen name
    Create {
        /// Identifier to create
        id: String,

        /// Metadata as name:value
        #[arg(value_name = "NAME:VALUE")]
        elements: Vec<String>,
    },

    /// Set metadata elements on an identifier
    Update {
        /// Identifier to update
        id: String,

        /// Metadata as name:value
        #[arg(required = true, value_name = "NAME:VALUE")]
        elements: Vec<String>,
    },

    /// Delete identifiers
    Delete {
        /// Identifiers, in any shorthand
        #[arg(required = true, value_name = "ID")]
        ids: Vec<String>,
    },

    /// Log in with --user/--password and keep the session
    Login,

    /// End the session and forget it
    Logout,
}
