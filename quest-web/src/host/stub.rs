use quest_gateway::{
    BackendGateway, GatewayConfig, HostEnvironment, MockTransport, Transport, TransportFactory,
};

pub(super) fn detect_environment() -> HostEnvironment {
    HostEnvironment::standalone()
}

/// Outside a browser neither a bridge nor a fetch client exists; every
/// selection is served by the mock.
struct NativeTransports;

impl TransportFactory for NativeTransports {
    fn bridge(&self, config: &GatewayConfig) -> Box<dyn Transport> {
        log::warn!("no embedded bridge outside the browser; using mock");
        self.mock(config)
    }

    fn http(&self, base_url: &str, config: &GatewayConfig) -> Box<dyn Transport> {
        log::warn!("no fetch client outside the browser for {base_url}; using mock");
        Box::new(MockTransport::from_config(config))
    }
}

pub(super) fn connect_gateway(env: &HostEnvironment, config: &GatewayConfig) -> BackendGateway {
    BackendGateway::connect(env, config, &NativeTransports)
}
