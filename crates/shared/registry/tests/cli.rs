mod fixtures;

use burrow_registry::cli::{SERVICE_HEADING, augment_command, parse_matches};
use burrow_registry::{OptionRegistry, ServiceError};
use clap::error::ErrorKind;
use clap::{Arg, Command};
use fixtures::*;

fn registry() -> OptionRegistry<StreamDemux> {
    let registry = OptionRegistry::new();
    registry.register("-L", "local-forward", "host:port", "Forward a local port", recording("local"));
    registry.register_option::<SocksOption>();
    registry
}

#[test]
fn help_lists_registered_services() {
    let registry = registry();
    let mut command = augment_command(Command::new("burrow"), &registry);
    let help = command.render_help().to_string();

    assert!(help.contains(SERVICE_HEADING));
    assert!(help.contains("--local-forward <host:port>"));
    assert!(help.contains("--socks <port>"));
    assert!(help.contains("Run a SOCKS proxy on the given local port"));
}

#[test]
fn occurrences_are_parsed_in_command_line_order() {
    let registry = registry();
    let command = augment_command(Command::new("burrow"), &registry);
    let matches = command
        .try_get_matches_from(["burrow", "-D", "1080", "-L", "8080:db:5432", "--socks", "9050"])
        .unwrap();

    let services = parse_matches(&registry, &matches).unwrap();
    let parsed: Vec<_> = services.iter().map(recorded).collect();
    assert_eq!(
        parsed,
        [
            Recorded { kind: "socks", parameters: "1080".to_owned() },
            Recorded { kind: "local", parameters: "8080:db:5432".to_owned() },
            Recorded { kind: "socks", parameters: "9050".to_owned() },
        ]
    );
}

#[test]
fn first_parser_error_is_returned_unchanged() {
    let registry = registry();
    let command = augment_command(Command::new("burrow"), &registry);
    let matches = command.try_get_matches_from(["burrow", "-D", "many"]).unwrap();

    let err = parse_matches(&registry, &matches).unwrap_err();
    assert!(matches!(err, ServiceError::InvalidParameters { .. }));
}

#[test]
fn options_registered_after_build_are_ignored() {
    let registry = registry();
    let command = augment_command(Command::new("burrow"), &registry);
    registry.register("-R", "remote-forward", "host:port", "late", recording("late"));

    let matches = command.try_get_matches_from(["burrow"]).unwrap();
    assert!(parse_matches(&registry, &matches).unwrap().is_empty());
}

#[test]
fn options_unregistered_after_build_are_reported() {
    let registry = registry();
    let command = augment_command(Command::new("burrow"), &registry);
    assert!(registry.unregister("-L"));

    let matches = command.try_get_matches_from(["burrow", "-D", "1080", "-L", "8080:db:5432"]).unwrap();
    let err = parse_matches(&registry, &matches).unwrap_err();
    assert_eq!(err, ServiceError::not_found("-L"));
}

#[test]
fn help_short_flag_stays_with_clap() {
    let registry = registry();
    registry.register("-h", "hop", "host", "Jump through a host", recording("hop"));
    registry.register("-H", "help", "topic", "Shadows --help", recording("shadow"));

    let command = augment_command(Command::new("burrow"), &registry);
    let err = command.clone().try_get_matches_from(["burrow", "-h"]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::DisplayHelp);

    let matches = command.try_get_matches_from(["burrow", "--hop", "bastion", "-H", "x"]).unwrap();
    let parsed: Vec<_> = parse_matches(&registry, &matches).unwrap().iter().map(recorded).collect();
    assert_eq!(
        parsed,
        [
            Recorded { kind: "hop", parameters: "bastion".to_owned() },
            Recorded { kind: "shadow", parameters: "x".to_owned() },
        ]
    );
}

#[test]
fn shared_fullname_keeps_the_first_long_flag() {
    let registry = registry();
    registry.register("-S", "socks", "port", "Second socks", recording("second"));

    let command = augment_command(Command::new("burrow"), &registry);
    let matches = command.try_get_matches_from(["burrow", "--socks", "1080", "-S", "9050"]).unwrap();

    let parsed: Vec<_> = parse_matches(&registry, &matches).unwrap().iter().map(recorded).collect();
    assert_eq!(
        parsed,
        [
            Recorded { kind: "socks", parameters: "1080".to_owned() },
            Recorded { kind: "second", parameters: "9050".to_owned() },
        ]
    );
}

#[test]
fn host_short_flag_is_not_taken_over() {
    let registry = registry();
    registry.register("-c", "compress", "level", "Compress traffic", recording("compress"));
    registry.register("-x", "config", "path", "Long flag owned by the host", recording("exec"));

    let host = Command::new("burrow").arg(Arg::new("config").short('c').long("config"));
    let command = augment_command(host, &registry);
    let help = command.clone().render_help().to_string();
    assert!(help.contains("--compress <level>"));

    let matches = command
        .try_get_matches_from(["burrow", "-c", "burrow.toml", "--compress", "9", "-x", "1"])
        .unwrap();

    assert_eq!(matches.get_one::<String>("config").map(String::as_str), Some("burrow.toml"));
    let parsed: Vec<_> = parse_matches(&registry, &matches).unwrap().iter().map(recorded).collect();
    assert_eq!(
        parsed,
        [
            Recorded { kind: "compress", parameters: "9".to_owned() },
            Recorded { kind: "exec", parameters: "1".to_owned() },
        ]
    );
}

#[test]
fn augmenting_twice_does_not_duplicate_arguments() {
    let registry = registry();
    let command = augment_command(Command::new("burrow"), &registry);
    let command = augment_command(command, &registry);

    let matches = command.try_get_matches_from(["burrow", "-D", "1080"]).unwrap();
    assert_eq!(parse_matches(&registry, &matches).unwrap().len(), 1);
}
