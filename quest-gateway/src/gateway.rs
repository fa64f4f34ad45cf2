//! The single entry point UI code talks to.
use crate::config::GatewayConfig;
use crate::continent::Continent;
use crate::difficulty::Difficulty;
use crate::environment::{HostEnvironment, TransportKind, TransportSelection};
use crate::error::GatewayError;
use crate::outcome::OperationResult;
use crate::progress::ProgressValue;
use crate::transport::mock::MockTransport;
use crate::transport::{StartOptions, Transport};
use serde_json::Value;

/// Builds the transport matching a detected [`TransportKind`].
///
/// Hosts implement this with their own bridge lookup and HTTP client.
pub trait TransportFactory {
    fn bridge(&self, config: &GatewayConfig) -> Box<dyn Transport>;

    fn http(&self, base_url: &str, config: &GatewayConfig) -> Box<dyn Transport>;

    fn mock(&self, config: &GatewayConfig) -> Box<dyn Transport> {
        Box::new(MockTransport::from_config(config))
    }
}

/// Uniform asynchronous API over whichever transport the host offers.
///
/// The transport is fixed at construction. Every operation resolves to an
/// [`OperationResult`]; transport faults never escape as errors.
pub struct BackendGateway {
    selection: TransportSelection,
    transport: Box<dyn Transport>,
}

impl BackendGateway {
    /// Detect the transport for `env` and build it through `factory`.
    #[must_use]
    pub fn connect(
        env: &HostEnvironment,
        config: &GatewayConfig,
        factory: &dyn TransportFactory,
    ) -> Self {
        let selection = TransportSelection::resolve(env, config);
        let transport = match (selection.kind, selection.base_url.as_deref()) {
            (TransportKind::EmbeddedBridge, _) => factory.bridge(config),
            (TransportKind::HttpApi, Some(base_url)) => factory.http(base_url, config),
            (TransportKind::HttpApi, None) | (TransportKind::Mock, _) => factory.mock(config),
        };
        Self::with_transport(selection, transport)
    }

    #[must_use]
    pub fn with_transport(selection: TransportSelection, transport: Box<dyn Transport>) -> Self {
        if selection.kind != transport.kind() {
            log::warn!(
                "selection {} served by {} transport",
                selection.kind,
                transport.kind()
            );
        }
        Self {
            selection,
            transport,
        }
    }

    #[must_use]
    pub fn kind(&self) -> TransportKind {
        self.transport.kind()
    }

    #[must_use]
    pub const fn selection(&self) -> &TransportSelection {
        &self.selection
    }

    pub async fn launch_continent(&self, continent: Continent) -> OperationResult {
        log::info!("launching {continent}");
        settle(
            "launch_continent",
            self.transport.launch_continent(continent).await,
        )
    }

    pub async fn start_game(&self, options: Option<StartOptions>) -> OperationResult {
        let options = options.unwrap_or_default();
        log::info!("starting game via {} ({} options)", self.kind(), options.len());
        settle("start_game", self.transport.start_game(&options).await)
    }

    pub async fn set_difficulty(&self, difficulty: Difficulty) -> OperationResult {
        log::info!("setting difficulty to {difficulty}");
        settle(
            "set_difficulty",
            self.transport.set_difficulty(difficulty).await,
        )
    }

    pub async fn get_progress(&self, continent: Option<Continent>) -> OperationResult {
        settle("get_progress", self.transport.get_progress(continent).await)
    }

    /// Values outside `0..=100` fail without reaching the transport.
    pub async fn update_progress(&self, continent: Continent, progress: f64) -> OperationResult {
        let progress = match ProgressValue::new(progress) {
            Ok(progress) => progress,
            Err(err) => return settle("update_progress", Err(err)),
        };
        settle(
            "update_progress",
            self.transport.update_progress(continent, progress).await,
        )
    }

    pub async fn test_connection(&self) -> OperationResult {
        settle("test_connection", self.transport.test_connection().await)
    }
}

fn settle(operation: &str, outcome: Result<Value, GatewayError>) -> OperationResult {
    match outcome {
        Ok(payload) => {
            let result = OperationResult::from_payload(payload);
            if let OperationResult::Failure(message) = &result {
                log::warn!("{operation} rejected by backend: {message}");
            }
            result
        }
        Err(err) => {
            log::warn!("{operation} failed ({}): {err}", err.category());
            OperationResult::Failure(err.to_string())
        }
    }
}
