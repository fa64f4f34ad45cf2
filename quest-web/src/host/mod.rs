//! Binds the gateway to whatever hosts the page.
//!
//! In the browser this reads `window.pywebview.api` and `window.location`
//! and wires JS-backed transports. Native builds (tests, SSR) always see a
//! standalone page and get the mock.
#[cfg(not(target_arch = "wasm32"))]
mod stub;
#[cfg(target_arch = "wasm32")]
mod wasm;

use quest_gateway::{BackendGateway, GatewayConfig, HostEnvironment};

/// Snapshot the hosting environment for transport detection.
#[must_use]
pub fn detect_environment() -> HostEnvironment {
    #[cfg(target_arch = "wasm32")]
    {
        wasm::detect_environment()
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        stub::detect_environment()
    }
}

/// Detect the environment once and build the gateway for it.
#[must_use]
pub fn connect_gateway(config: &GatewayConfig) -> BackendGateway {
    let env = detect_environment();
    #[cfg(target_arch = "wasm32")]
    {
        wasm::connect_gateway(&env, config)
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        stub::connect_gateway(&env, config)
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;
    use quest_gateway::TransportKind;

    #[test]
    fn native_builds_fall_back_to_mock() {
        let gateway = connect_gateway(&GatewayConfig::default());
        assert_eq!(gateway.kind(), TransportKind::Mock);
        assert_eq!(gateway.selection().reason, "no backend detected");
    }
}
