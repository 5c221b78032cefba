//! Fixed command-line arguments. Service options are added at runtime from
//! the registry, see [`command`].

use burrow::registry::cli::augment_command;
use burrow::registry::{OptionRegistry, Transport};
use clap::{CommandFactory, Parser};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "burrow")]
#[command(author = env!("CARGO_PKG_AUTHORS"))]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Builds tunnel services from command-line options")]
pub(crate) struct Cli {
    /// Config file (`.toml`, `.json`, `.yaml`, ...). Defaults to `burrow.*` if present.
    #[arg(short, long, value_name = "PATH")]
    pub(crate) config: Option<PathBuf>,

    /// List registered service options and exit.
    #[arg(long)]
    pub(crate) list: bool,
}

/// Builds the full command: fixed arguments plus one argument per service
/// option registered in `registry`.
pub(crate) fn command<T: Transport>(registry: &OptionRegistry<T>) -> clap::Command {
    augment_command(Cli::command(), registry)
}
