//! `ark`: command-line client for ARK identifiers and ANVL metadata.
//!
//! Offline commands (`fq`, `anvl`, `args_to_anvl`, `array_to_anvl`) only
//! transform text. The rest talk to the registry configured with `--url`.
//! Every failure exits with status 1.

use std::process;

use clap::Parser;

mod cli;
mod commands;
mod output;

use cli::Cli;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    log::debug!("running {:?}", cli.command);

    if let Err(err) = commands::dispatch(cli) {
        eprintln!("error: {err:#}");
        process::exit(1);
    }
}
