//! Builds the environment and gateway the checks run against.
use crate::client::ReqwestClient;
use anyhow::Result;
use quest_gateway::{
    BRIDGE_METHODS, BackendGateway, BridgeTransport, FixedBridge, GatewayConfig, GlobeLauncher,
    HostEnvironment, HttpTransport, PageLocation, QuestHost, SignalMessage, StartSignal, Transport,
    TransportFactory,
};
use std::cell::RefCell;
use std::rc::Rc;

/// Globe launcher that only remembers what it was asked to show.
#[derive(Clone, Default)]
pub struct RecordingLauncher {
    launches: Rc<RefCell<Vec<String>>>,
}

impl GlobeLauncher for RecordingLauncher {
    fn launch(&self, continent: &str) -> Result<(), String> {
        self.launches.borrow_mut().push(continent.to_string());
        Ok(())
    }
}

/// Start signal that is recorded instead of posted to a page.
#[derive(Clone, Default)]
pub struct RecordingSignal {
    posted: Rc<RefCell<Vec<SignalMessage>>>,
}

impl StartSignal for RecordingSignal {
    fn post(&self, message: SignalMessage, delay_ms: u32) {
        log::info!("{} signal queued (delay {delay_ms} ms)", message.kind);
        self.posted.borrow_mut().push(message);
    }
}

struct TesterTransports {
    host: Option<Rc<QuestHost>>,
    signal: RecordingSignal,
    client: ReqwestClient,
}

impl TransportFactory for TesterTransports {
    fn bridge(&self, config: &GatewayConfig) -> Box<dyn Transport> {
        let locator = match &self.host {
            Some(host) => {
                let host: Rc<QuestHost> = Rc::clone(host);
                FixedBridge::attached(host)
            }
            None => FixedBridge::absent(),
        };
        Box::new(BridgeTransport::new(
            Rc::new(locator),
            Vec::new(),
            Box::new(self.signal.clone()),
            config,
        ))
    }

    fn http(&self, base_url: &str, config: &GatewayConfig) -> Box<dyn Transport> {
        Box::new(HttpTransport::new(self.client.clone(), base_url, config))
    }
}

/// Describe the page as the browser would see it.
pub fn describe_environment(page_url: Option<&str>, bridge: bool) -> HostEnvironment {
    let env = page_url.map_or_else(HostEnvironment::standalone, |url| {
        HostEnvironment::new(PageLocation::parse(url))
    });
    if bridge {
        env.with_bridge(BRIDGE_METHODS)
    } else {
        env
    }
}

pub struct Harness {
    pub env: HostEnvironment,
    pub config: GatewayConfig,
    pub gateway: BackendGateway,
    /// In-process backend behind the bridge, when one is attached.
    pub host: Option<Rc<QuestHost>>,
    pub launcher: RecordingLauncher,
    pub signal: RecordingSignal,
}

impl Harness {
    pub fn build(page_url: Option<&str>, bridge: bool, seed: u64) -> Result<Self> {
        let env = describe_environment(page_url, bridge);
        let config = GatewayConfig::default_config().with_mock_seed(seed);
        let launcher = RecordingLauncher::default();
        let host = bridge.then(|| Rc::new(QuestHost::with_launcher(Box::new(launcher.clone()))));
        let signal = RecordingSignal::default();
        let factory = TesterTransports {
            host: host.clone(),
            signal: signal.clone(),
            client: ReqwestClient::new()?,
        };
        let gateway = BackendGateway::connect(&env, &config, &factory);
        Ok(Self {
            env,
            config,
            gateway,
            host,
            launcher,
            signal,
        })
    }

    pub fn launches(&self) -> Vec<String> {
        self.launcher.launches.borrow().clone()
    }

    pub fn signals_posted(&self) -> usize {
        self.signal.posted.borrow().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quest_gateway::TransportKind;

    #[test]
    fn flags_map_to_transports() {
        let cases = [
            (None, false, TransportKind::Mock),
            (None, true, TransportKind::EmbeddedBridge),
            (Some("http://localhost:5000/"), false, TransportKind::HttpApi),
            (
                Some("file:///opt/quest/continental_quest_landing.html"),
                false,
                TransportKind::EmbeddedBridge,
            ),
            (Some("file:///tmp/other.html"), false, TransportKind::Mock),
        ];
        for (url, bridge, expected) in cases {
            let harness = Harness::build(url, bridge, 1).unwrap();
            assert_eq!(harness.gateway.kind(), expected, "{url:?} bridge={bridge}");
            assert_eq!(harness.host.is_some(), bridge);
        }
    }

    #[test]
    fn bridge_harness_records_launches() {
        let harness = Harness::build(None, true, 1).unwrap();
        let result = tokio_test::block_on(
            harness
                .gateway
                .launch_continent(quest_gateway::Continent::Europe),
        );
        assert!(result.is_success());
        assert_eq!(harness.launches(), vec!["europe"]);
    }
}
