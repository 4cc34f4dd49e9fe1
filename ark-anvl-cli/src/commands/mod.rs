//! Command implementations for the CLI.
//!
//! `local` commands only transform text; `remote` commands talk to the
//! registry through any `Transport`.

use std::fmt::Display;
use std::io::{self, Read};

use anyhow::{Context, Result, bail};
use ark_anvl::BaseConfig;
use ark_anvl_client::{RegistryClient, ReqwestTransport, SessionStore};

use crate::cli::{Cli, Commands, GlobalArgs};
use crate::output::Printer;

pub mod local;
pub mod remote;

/// Collects per-item failures of a batch command.
///
/// Each failure is reported on stderr as it happens; the batch keeps going
/// and fails as a whole at the end.
#[derive(Debug, Default)]
pub struct Batch {
    failures: Vec<String>,
}

impl Batch {
    /// Returns the value, or reports the error against `item`.
    pub fn check<T, E: Display>(&mut self, item: &str, result: Result<T, E>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(err) => {
                let message = format!("{item}: {err}");
                log::debug!("batch item failed: {message}");
                eprintln!("error: {message}");
                self.failures.push(message);
                None
            }
        }
    }

    #[cfg(test)]
    pub fn failures(&self) -> &[String] {
        &self.failures
    }

    /// Fails if any item failed.
    pub fn finish(self, total: usize) -> Result<()> {
        match self.failures.len() {
            0 => Ok(()),
            n => bail!("{n} of {total} failed"),
        }
    }
}

fn read_stdin() -> Result<String> {
    let mut input = String::new();
    io::stdin()
        .read_to_string(&mut input)
        .context("failed to read standard input")?;
    Ok(input)
}

/// Builds an HTTP client. A stored session is used only when no
/// credentials were given.
fn connect(
    global: &GlobalArgs,
    base: BaseConfig,
    store: &SessionStore,
) -> Result<RegistryClient<ReqwestTransport>> {
    let mut config = global.client_config();
    if config.credentials.is_none() {
        if let Some(session) = store.load()? {
            config = config.with_session(session);
        }
    }
    Ok(RegistryClient::from_config(&config, base)?)
}

/// Runs the parsed command line.
pub fn dispatch(cli: Cli) -> Result<()> {
    let global = cli.global;
    let base = global.base_config()?;
    let stdout = io::stdout().lock();

    match cli.command {
        Commands::Fq { ids } => local::fq(&base, &ids, stdout),
        Commands::Anvl { output } => {
            local::anvl(&read_stdin()?, &mut Printer::new(stdout, &output))
        }
        Commands::ArgsToAnvl { elements, output } => {
            local::args_to_anvl(&elements, &mut Printer::new(stdout, &output))
        }
        Commands::ArrayToAnvl { output } => {
            local::array_to_anvl(&read_stdin()?, &mut Printer::new(stdout, &output))
        }
        Commands::Get { ids, output } => {
            let client = connect(&global, base, &global.session_store()?)?;
            remote::get(&client, &ids, &mut Printer::new(stdout, &output))
        }
        Commands::Mint { count, elements } => {
            let client = connect(&global, base, &global.session_store()?)?;
            remote::mint(&client, count, &elements, stdout)
        }
        Commands::Create { id, elements } => {
            let client = connect(&global, base, &global.session_store()?)?;
            remote::create(&client, &id, &elements, stdout)
        }
        Commands::Update { id, elements } => {
            let client = connect(&global, base, &global.session_store()?)?;
            remote::update(&client, &id, &elements, stdout)
        }
        Commands::Delete { ids } => {
            let client = connect(&global, base, &global.session_store()?)?;
            remote::delete(&client, &ids, stdout)
        }
        Commands::Login => {
            let store = global.session_store()?;
            let mut client = RegistryClient::from_config(&global.client_config(), base)?;
            remote::login(&mut client, &store, stdout)
        }
        Commands::Logout => {
            let store = global.session_store()?;
            let mut client = connect(&global, base, &store)?;
            remote::logout(&mut client, &store, stdout)
        }
    }
}
