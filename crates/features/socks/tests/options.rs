use burrow_kernel::endpoint::Endpoint;
use burrow_registry::{OptionRegistry, RegistryFamily, ServiceError};
use burrow_socks::{Socks, register};

struct Demux;
struct OtherDemux;

#[test]
fn parses_port_only() {
    let registry = OptionRegistry::<Demux>::new();
    assert_eq!(register(&registry), 1);

    let service = registry.parse("-D", "1080").unwrap();
    assert_eq!(service.name(), "dynamic-forward");
    assert_eq!(service.to_string(), "socks proxy on 127.0.0.1:1080");

    let socks = service.as_any().downcast_ref::<Socks>().unwrap();
    assert_eq!(socks.listen, Endpoint::new("127.0.0.1", 1080));
}

#[test]
fn parses_bind_address() {
    let registry = OptionRegistry::<Demux>::new();
    register(&registry);

    let service = registry.parse("-D", "[::1]:9050").unwrap();
    let socks = service.as_any().downcast_ref::<Socks>().unwrap();
    assert_eq!(socks.listen, Endpoint::new("::1", 9050));
}

#[test]
fn rejects_bad_port() {
    let registry = OptionRegistry::<Demux>::new();
    register(&registry);

    let err = registry.parse("-D", "socks").unwrap_err();
    assert_eq!(err, ServiceError::invalid("-D", "Invalid port: 'socks'"));
}

#[test]
fn registers_once_per_transport() {
    let family = RegistryFamily::new();
    assert_eq!(register(family.registry::<Demux>().as_ref()), 1);
    assert_eq!(register(family.registry::<Demux>().as_ref()), 0);
    assert_eq!(register(family.registry::<OtherDemux>().as_ref()), 1);
}
