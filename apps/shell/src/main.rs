mod args;
mod config;

use burrow::register_builtin;
use burrow::registry::cli::parse_matches;
use burrow::registry::{OptionRegistry, RegistryFamily};
use burrow_logger::Logger;
use clap::FromArgMatches;
use config::ShellConfig;

/// Stream transport the shell builds services for.
#[derive(Debug)]
enum StreamTransport {}

fn main() -> anyhow::Result<()> {
    let registry = RegistryFamily::global().registry::<StreamTransport>();
    register_builtin(&registry);

    let matches = args::command(&registry).get_matches();
    let cli = args::Cli::from_arg_matches(&matches)?;

    let config = ShellConfig::load(cli.config.as_deref())?;
    let _logger = Logger::builder().name(env!("CARGO_BIN_NAME")).settings(&config.log)?.init()?;

    if cli.list {
        print_options(&registry);
        return Ok(());
    }

    let services = parse_matches(&registry, &matches)?;
    if services.is_empty() {
        tracing::warn!("No service options given");
    }

    for service in &services {
        tracing::info!(service = service.name(), "Service ready");
        println!("{service}");
    }

    Ok(())
}

fn print_options(registry: &OptionRegistry<StreamTransport>) {
    for option in registry.describe() {
        println!(
            "{:<4} --{:<16} {:<36} {}",
            option.token, option.fullname, option.value_name, option.description
        );
    }
}
