//! Transport for pages hosted inside a desktop shell that injects a bridge
//! object. The bridge may attach after page load, so it is located on every
//! call instead of being captured at construction.
use super::{StartOptions, Transport};
use crate::config::GatewayConfig;
use crate::continent::Continent;
use crate::difficulty::Difficulty;
use crate::environment::TransportKind;
use crate::error::GatewayError;
use crate::progress::ProgressValue;
use async_trait::async_trait;
use serde::Serialize;
use serde_json::{Value, json};
use std::rc::Rc;

/// Method surface of the host-provided bridge object.
#[async_trait(?Send)]
pub trait BridgeApi {
    /// Whether the bridge currently exposes `method`.
    fn exposes(&self, _method: &str) -> bool {
        true
    }

    async fn launch_continent(&self, name: &str) -> Result<Value, GatewayError>;

    async fn start_game(&self, options: &StartOptions) -> Result<Value, GatewayError>;

    async fn set_difficulty(&self, level: &str) -> Result<Value, GatewayError>;

    async fn get_progress(&self, continent: Option<&str>) -> Result<Value, GatewayError>;

    async fn update_progress(&self, continent: &str, progress: f64)
    -> Result<Value, GatewayError>;

    async fn test_connection(&self) -> Result<Value, GatewayError>;
}

/// Finds the bridge object at call time.
pub trait BridgeLocator {
    fn locate(&self) -> Option<Rc<dyn BridgeApi>>;
}

/// A bridge that is either attached for good or never attaches.
#[derive(Clone, Default)]
pub struct FixedBridge(pub Option<Rc<dyn BridgeApi>>);

impl FixedBridge {
    #[must_use]
    pub fn attached(api: Rc<dyn BridgeApi>) -> Self {
        Self(Some(api))
    }

    #[must_use]
    pub const fn absent() -> Self {
        Self(None)
    }
}

impl BridgeLocator for FixedBridge {
    fn locate(&self) -> Option<Rc<dyn BridgeApi>> {
        self.0.clone()
    }
}

/// One place a start-game entry point may live.
#[async_trait(?Send)]
pub trait StartGameSite {
    fn name(&self) -> &str;

    /// Checked synchronously; a site that is not there yet is skipped.
    fn is_available(&self) -> bool;

    async fn start(&self, options: &StartOptions) -> Result<Value, GatewayError>;
}

/// Message posted when no start-game site answers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SignalMessage {
    #[serde(rename = "type")]
    pub kind: String,
    pub options: StartOptions,
}

/// Fire-and-forget delivery of a [`SignalMessage`] into the page context.
pub trait StartSignal {
    fn post(&self, message: SignalMessage, delay_ms: u32);
}

struct BridgeStartSite {
    locator: Rc<dyn BridgeLocator>,
}

#[async_trait(?Send)]
impl StartGameSite for BridgeStartSite {
    fn name(&self) -> &str {
        "bridge.start_game"
    }

    fn is_available(&self) -> bool {
        self.locator
            .locate()
            .is_some_and(|api| api.exposes("start_game"))
    }

    async fn start(&self, options: &StartOptions) -> Result<Value, GatewayError> {
        let api = self.locator.locate().ok_or_else(detached)?;
        api.start_game(options).await
    }
}

fn detached() -> GatewayError {
    GatewayError::TransportUnavailable(String::from("embedded bridge is not attached"))
}

pub struct BridgeTransport {
    locator: Rc<dyn BridgeLocator>,
    start_sites: Vec<Box<dyn StartGameSite>>,
    signal: Box<dyn StartSignal>,
    signal_kind: String,
    signal_delay_ms: u32,
}

impl BridgeTransport {
    /// `fallback_sites` are probed after the bridge's own `start_game`, in
    /// the order given.
    #[must_use]
    pub fn new(
        locator: Rc<dyn BridgeLocator>,
        fallback_sites: Vec<Box<dyn StartGameSite>>,
        signal: Box<dyn StartSignal>,
        config: &GatewayConfig,
    ) -> Self {
        let mut start_sites: Vec<Box<dyn StartGameSite>> = vec![Box::new(BridgeStartSite {
            locator: Rc::clone(&locator),
        })];
        start_sites.extend(fallback_sites);
        Self {
            locator,
            start_sites,
            signal,
            signal_kind: config.start_signal.clone(),
            signal_delay_ms: config.signal_delay_ms,
        }
    }

    /// Names of the start-game sites in probe order.
    #[cfg(test)]
    fn start_site_names(&self) -> Vec<&str> {
        self.start_sites.iter().map(|site| site.name()).collect()
    }

    fn api_for(&self, method: &str) -> Result<Rc<dyn BridgeApi>, GatewayError> {
        let api = self.locator.locate().ok_or_else(detached)?;
        if api.exposes(method) {
            Ok(api)
        } else {
            Err(GatewayError::TransportUnavailable(format!(
                "embedded bridge does not expose {method}"
            )))
        }
    }
}

#[async_trait(?Send)]
impl Transport for BridgeTransport {
    fn kind(&self) -> TransportKind {
        TransportKind::EmbeddedBridge
    }

    async fn launch_continent(&self, continent: Continent) -> Result<Value, GatewayError> {
        self.api_for("launch_continent")?
            .launch_continent(continent.id())
            .await
    }

    async fn start_game(&self, options: &StartOptions) -> Result<Value, GatewayError> {
        if let Some(site) = self.start_sites.iter().find(|site| site.is_available()) {
            log::debug!("starting game through {}", site.name());
            return site.start(options).await;
        }
        log::warn!(
            "no start-game entry point attached; posting unconfirmed {} signal",
            self.signal_kind
        );
        self.signal.post(
            SignalMessage {
                kind: self.signal_kind.clone(),
                options: options.clone(),
            },
            self.signal_delay_ms,
        );
        Ok(json!({
            "status": "success",
            "message": "Bridge: starting 3D globe",
            "confirmed": false,
        }))
    }

    async fn set_difficulty(&self, difficulty: Difficulty) -> Result<Value, GatewayError> {
        self.api_for("set_difficulty")?
            .set_difficulty(difficulty.id())
            .await
    }

    async fn get_progress(&self, continent: Option<Continent>) -> Result<Value, GatewayError> {
        self.api_for("get_progress")?
            .get_progress(continent.map(Continent::id))
            .await
    }

    async fn update_progress(
        &self,
        continent: Continent,
        progress: ProgressValue,
    ) -> Result<Value, GatewayError> {
        self.api_for("update_progress")?
            .update_progress(continent.id(), progress.get())
            .await
    }

    async fn test_connection(&self) -> Result<Value, GatewayError> {
        self.api_for("test_connection")?.test_connection().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use std::cell::RefCell;

    #[derive(Default)]
    struct RecordingSignal {
        posted: Rc<RefCell<Vec<(SignalMessage, u32)>>>,
    }

    impl StartSignal for RecordingSignal {
        fn post(&self, message: SignalMessage, delay_ms: u32) {
            self.posted.borrow_mut().push((message, delay_ms));
        }
    }

    struct GlobalSite {
        present: bool,
        calls: Rc<RefCell<u32>>,
    }

    #[async_trait(?Send)]
    impl StartGameSite for GlobalSite {
        fn name(&self) -> &str {
            "start_game"
        }

        fn is_available(&self) -> bool {
            self.present
        }

        async fn start(&self, _options: &StartOptions) -> Result<Value, GatewayError> {
            *self.calls.borrow_mut() += 1;
            Ok(json!({ "status": "success", "via": "global" }))
        }
    }

    /// Bridge exposing everything except `start_game`.
    struct NoStartBridge;

    #[async_trait(?Send)]
    impl BridgeApi for NoStartBridge {
        fn exposes(&self, method: &str) -> bool {
            method != "start_game"
        }

        async fn launch_continent(&self, name: &str) -> Result<Value, GatewayError> {
            Ok(json!({ "status": "success", "continent": name }))
        }

        async fn start_game(&self, _options: &StartOptions) -> Result<Value, GatewayError> {
            Err(GatewayError::Bridge("not exposed".into()))
        }

        async fn set_difficulty(&self, level: &str) -> Result<Value, GatewayError> {
            Ok(json!({ "status": "success", "difficulty": level }))
        }

        async fn get_progress(&self, _continent: Option<&str>) -> Result<Value, GatewayError> {
            Ok(json!(10))
        }

        async fn update_progress(
            &self,
            continent: &str,
            progress: f64,
        ) -> Result<Value, GatewayError> {
            Ok(json!({ "continent": continent, "progress": progress }))
        }

        async fn test_connection(&self) -> Result<Value, GatewayError> {
            Ok(json!({ "status": "success" }))
        }
    }

    fn transport(
        locator: FixedBridge,
        fallbacks: Vec<Box<dyn StartGameSite>>,
        signal: RecordingSignal,
    ) -> BridgeTransport {
        BridgeTransport::new(
            Rc::new(locator),
            fallbacks,
            Box::new(signal),
            &GatewayConfig::default(),
        )
    }

    #[test]
    fn start_game_signals_when_no_site_is_present() {
        let signal = RecordingSignal::default();
        let posted = Rc::clone(&signal.posted);
        let transport = transport(FixedBridge::absent(), Vec::new(), signal);

        let mut options = StartOptions::new();
        options.insert("difficulty".into(), json!("hard"));
        let payload = block_on(transport.start_game(&options)).unwrap();

        assert_eq!(payload["status"], "success");
        assert_eq!(payload["confirmed"], false);
        let posted = posted.borrow();
        assert_eq!(posted.len(), 1);
        assert_eq!(posted[0].0.kind, "START_GLOBE");
        assert_eq!(posted[0].0.options["difficulty"], "hard");
        assert_eq!(posted[0].1, 100);
        assert_eq!(
            serde_json::to_value(&posted[0].0).unwrap()["type"],
            "START_GLOBE"
        );
    }

    #[test]
    fn start_game_prefers_first_available_fallback() {
        let calls = Rc::new(RefCell::new(0));
        let signal = RecordingSignal::default();
        let posted = Rc::clone(&signal.posted);
        let fallbacks: Vec<Box<dyn StartGameSite>> = vec![
            Box::new(GlobalSite {
                present: false,
                calls: Rc::new(RefCell::new(0)),
            }),
            Box::new(GlobalSite {
                present: true,
                calls: Rc::clone(&calls),
            }),
        ];
        let transport = transport(
            FixedBridge::attached(Rc::new(NoStartBridge)),
            fallbacks,
            signal,
        );

        let payload = block_on(transport.start_game(&StartOptions::new())).unwrap();
        assert_eq!(payload["via"], "global");
        assert_eq!(*calls.borrow(), 1);
        assert!(posted.borrow().is_empty());
        assert_eq!(transport.start_site_names()[0], "bridge.start_game");
    }

    #[test]
    fn detached_bridge_is_unavailable_for_other_operations() {
        let transport = transport(
            FixedBridge::absent(),
            Vec::new(),
            RecordingSignal::default(),
        );
        let err = block_on(transport.test_connection()).unwrap_err();
        assert!(matches!(err, GatewayError::TransportUnavailable(_)));
    }

    #[test]
    fn forwards_ids_to_the_bridge() {
        let transport = transport(
            FixedBridge::attached(Rc::new(NoStartBridge)),
            Vec::new(),
            RecordingSignal::default(),
        );
        let launched = block_on(transport.launch_continent(Continent::SouthAmerica)).unwrap();
        assert_eq!(launched["continent"], "south-america");
        let progress = ProgressValue::new(33.0).unwrap();
        let updated = block_on(transport.update_progress(Continent::Asia, progress)).unwrap();
        assert_eq!(updated["progress"], 33.0);
    }
}
