use burrow_forward::{Direction, PortForward, register};
use burrow_kernel::endpoint::Endpoint;
use burrow_registry::{OptionRegistry, ServiceError};

struct Demux;

fn forward(registry: &OptionRegistry<Demux>, token: &str, parameters: &str) -> PortForward {
    let service = registry.parse(token, parameters).expect("forward should parse");
    service.as_any().downcast_ref::<PortForward>().cloned().expect("service should be a PortForward")
}

#[test]
fn registers_local_and_remote_options() {
    let registry = OptionRegistry::<Demux>::new();
    assert_eq!(register(&registry), 2);
    assert_eq!(registry.tokens(), ["-L", "-R"]);

    let described = registry.describe();
    assert_eq!(described[0].fullname, "local-forward");
    assert_eq!(described[1].fullname, "remote-forward");
    assert_eq!(described[0].value_name, "[bind_address:]port:host:hostport");
}

#[test]
fn second_registration_is_skipped() {
    let registry = OptionRegistry::<Demux>::new();
    assert_eq!(register(&registry), 2);
    assert_eq!(register(&registry), 0);
    assert_eq!(registry.len(), 2);
}

#[test]
fn parses_local_forward() {
    let registry = OptionRegistry::<Demux>::new();
    register(&registry);

    let parsed = forward(&registry, "-L", "8080:db.internal:5432");
    assert_eq!(parsed.direction, Direction::Local);
    assert_eq!(parsed.listen, Endpoint::new("127.0.0.1", 8080));
    assert_eq!(parsed.target, Endpoint::new("db.internal", 5432));
    assert_eq!(parsed.to_string(), "local forward 127.0.0.1:8080 -> db.internal:5432");
}

#[test]
fn parses_remote_forward_with_bind_address() {
    let registry = OptionRegistry::<Demux>::new();
    register(&registry);

    let service = registry.parse("-R", "*:2222:localhost:22").unwrap();
    assert_eq!(service.name(), "remote-forward");

    let parsed = forward(&registry, "-R", "*:2222:localhost:22");
    assert_eq!(parsed.direction, Direction::Remote);
    assert_eq!(parsed.listen, Endpoint::new("0.0.0.0", 2222));
}

#[test]
fn malformed_parameters_are_invalid() {
    let registry = OptionRegistry::<Demux>::new();
    register(&registry);

    let err = registry.parse("-L", "8080").unwrap_err();
    assert!(
        matches!(&err, ServiceError::InvalidParameters { token, .. } if token == "-L"),
        "unexpected error: {err}"
    );
}
