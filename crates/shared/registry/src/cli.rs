//! `clap` adapter: registered options become command-line arguments, and
//! matched occurrences are parsed back into services.
//!
//! ```rust
//! use burrow_registry::OptionRegistry;
//! use burrow_registry::cli::{augment_command, parse_matches};
//!
//! struct Demux;
//!
//! let registry = OptionRegistry::<Demux>::new();
//! let command = augment_command(clap::Command::new("burrow"), &registry);
//! let matches = command.try_get_matches_from(["burrow"]).unwrap();
//! assert!(parse_matches(&registry, &matches).unwrap().is_empty());
//! ```

use crate::descriptor::OptionDescription;
use crate::error::ServiceError;
use crate::registry::OptionRegistry;
use crate::service::{ServiceHandle, Transport};
use clap::{Arg, ArgAction, ArgGroup, ArgMatches, Command, Id};
use fxhash::FxHashSet;
use std::collections::BTreeSet;
use tracing::{trace, warn};

/// Help heading the service arguments are grouped under.
pub const SERVICE_HEADING: &str = "Supported service commands";

/// Id of the argument group holding every service argument.
pub const SERVICE_GROUP: &str = "burrow-services";

/// Adds one argument per registered option to `command`.
///
/// The argument id is the option token and its long flag is the option's
/// fullname. A single-character token (`"D"` or `"-D"`) also becomes the short
/// flag. Every argument takes one value per occurrence and may repeat.
///
/// Flags already used by `command` (including the implicit `-h/--help` and,
/// when a version is set, `-V/--version`) or by an earlier option are not
/// reused: the clashing flag is dropped, and an option left with neither a
/// short nor a long flag is skipped.
#[must_use]
pub fn augment_command<T: Transport>(command: Command, registry: &OptionRegistry<T>) -> Command {
    let mut taken = TakenNames::of(&command);
    let args: Vec<Arg> =
        registry.describe().iter().filter_map(|option| taken.claim(option)).collect();

    if args.is_empty() {
        return command;
    }

    let command = if command.get_groups().any(|group| group.get_id().as_str() == SERVICE_GROUP) {
        command
    } else {
        command.group(ArgGroup::new(SERVICE_GROUP).multiple(true))
    };
    command.args(args)
}

/// Parses every matched service option, in command-line order.
///
/// Options given on the command line but unregistered since the command was
/// built yield [`ServiceError::ServiceNotFound`].
///
/// # Errors
/// Returns the first error produced by [`OptionRegistry::parse`], unchanged.
pub fn parse_matches<T: Transport>(
    registry: &OptionRegistry<T>,
    matches: &ArgMatches,
) -> Result<Vec<ServiceHandle<T>>, ServiceError> {
    // Group values are the ids of the arguments that were present.
    let present: BTreeSet<String> = match matches.try_get_many::<Id>(SERVICE_GROUP) {
        Ok(Some(ids)) => ids.map(|id| id.as_str().to_owned()).collect(),
        _ => BTreeSet::new(),
    };

    let mut occurrences = Vec::new();
    for token in present {
        let Ok(Some(values)) = matches.try_get_many::<String>(&token) else {
            continue;
        };
        let Some(indices) = matches.indices_of(&token) else {
            continue;
        };
        occurrences.extend(indices.zip(values).map(|(index, value)| (index, token.clone(), value)));
    }

    occurrences.sort_by_key(|(index, ..)| *index);
    trace!(count = occurrences.len(), "Parsing service options from command line");

    occurrences.into_iter().map(|(_, token, value)| registry.parse(&token, value)).collect()
}

/// Ids and flags already claimed on a command.
#[derive(Debug, Default)]
struct TakenNames {
    ids: FxHashSet<String>,
    shorts: FxHashSet<char>,
    longs: FxHashSet<String>,
}

impl TakenNames {
    fn of(command: &Command) -> Self {
        let mut taken = Self::default();

        for arg in command.get_arguments() {
            taken.ids.insert(arg.get_id().as_str().to_owned());
            taken.shorts.extend(arg.get_short_and_visible_aliases().into_iter().flatten());
            taken.longs.extend(
                arg.get_long_and_visible_aliases().into_iter().flatten().map(str::to_owned),
            );
        }

        if !command.is_disable_help_flag_set() {
            taken.reserve("help", 'h');
        }
        let versioned = command.get_version().is_some() || command.get_long_version().is_some();
        if versioned && !command.is_disable_version_flag_set() {
            taken.reserve("version", 'V');
        }

        taken
    }

    fn reserve(&mut self, name: &str, short: char) {
        self.ids.insert(name.to_owned());
        self.longs.insert(name.to_owned());
        self.shorts.insert(short);
    }

    /// Builds the argument for `option` from the names still free, and claims them.
    fn claim(&mut self, option: &OptionDescription) -> Option<Arg> {
        let token = option.token.as_str();
        if self.ids.contains(token) {
            warn!(token, "Service option id already used by the command, skipped");
            return None;
        }

        let short = short_flag(token);
        let free_short = short.filter(|c| !self.shorts.contains(c));
        if let Some(short) = short
            && free_short.is_none()
        {
            warn!(token, %short, "Short flag already in use, dropped");
        }

        let long = valid_long(&option.fullname);
        let free_long = long.filter(|name| !self.longs.contains(*name));
        if let Some(long) = long
            && free_long.is_none()
        {
            warn!(token, long, "Long flag already in use, dropped");
        }

        if free_short.is_none() && free_long.is_none() {
            warn!(token, "Service option has no usable flag, skipped");
            return None;
        }

        self.ids.insert(token.to_owned());
        self.shorts.extend(free_short);
        self.longs.extend(free_long.map(str::to_owned));

        Some(service_arg(option, free_short, free_long))
    }
}

fn service_arg(option: &OptionDescription, short: Option<char>, long: Option<&str>) -> Arg {
    let arg = Arg::new(option.token.clone())
        .value_name(option.value_name.clone())
        .help(option.description.clone())
        .help_heading(SERVICE_HEADING)
        .group(SERVICE_GROUP)
        .value_parser(clap::value_parser!(String))
        .num_args(1)
        .action(ArgAction::Append);

    let arg = match long {
        Some(long) => arg.long(long.to_owned()),
        None => arg,
    };
    match short {
        Some(short) => arg.short(short),
        None => arg,
    }
}

fn short_flag(token: &str) -> Option<char> {
    let mut chars = token.strip_prefix('-').unwrap_or(token).chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii_alphanumeric() => Some(c),
        _ => None,
    }
}

fn valid_long(fullname: &str) -> Option<&str> {
    (!fullname.is_empty() && !fullname.starts_with('-') && !fullname.contains(char::is_whitespace))
        .then_some(fullname)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_flag() {
        assert_eq!(short_flag("-D"), Some('D'));
        assert_eq!(short_flag("L"), Some('L'));
        assert_eq!(short_flag("--socks"), None);
        assert_eq!(short_flag("-"), None);
        assert_eq!(short_flag("-?"), None);
    }

    #[test]
    fn test_valid_long() {
        assert_eq!(valid_long("socks"), Some("socks"));
        assert_eq!(valid_long(""), None);
        assert_eq!(valid_long("--socks"), None);
        assert_eq!(valid_long("two words"), None);
    }

    #[test]
    fn test_implicit_flags_are_reserved() {
        let taken = TakenNames::of(&Command::new("burrow"));
        assert!(taken.shorts.contains(&'h'));
        assert!(taken.longs.contains("help"));
        assert!(!taken.shorts.contains(&'V'));

        let taken = TakenNames::of(&Command::new("burrow").version("1.0"));
        assert!(taken.shorts.contains(&'V'));

        let taken = TakenNames::of(&Command::new("burrow").disable_help_flag(true));
        assert!(!taken.shorts.contains(&'h'));
    }
}
