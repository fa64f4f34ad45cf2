//! Continental Quest Gateway
//!
//! Platform-agnostic backend gateway for the Continental Quest landing page.
//! Detects which transport the hosting environment offers (embedded webview
//! bridge, HTTP API, or an in-memory mock) and exposes one asynchronous
//! operation surface over it. Browser and network specifics live in the
//! crates that implement the transport traits.

pub mod config;
pub mod continent;
pub mod difficulty;
pub mod environment;
pub mod error;
pub mod gateway;
pub mod host;
pub mod outcome;
pub mod progress;
pub mod transport;

// Re-export commonly used types
pub use config::GatewayConfig;
pub use continent::{Continent, UnknownContinent};
pub use difficulty::{Difficulty, UnknownDifficulty};
pub use environment::{
    BRIDGE_METHODS, HostEnvironment, PageLocation, TransportKind, TransportSelection,
};
pub use error::GatewayError;
pub use gateway::{BackendGateway, TransportFactory};
pub use host::{GlobeLauncher, QuestHost};
pub use outcome::OperationResult;
pub use progress::{ProgressBoard, ProgressValue};
pub use transport::{
    StartOptions, Transport,
    bridge::{
        BridgeApi, BridgeLocator, BridgeTransport, FixedBridge, SignalMessage, StartGameSite,
        StartSignal,
    },
    http::{HttpClient, HttpMethod, HttpRequest, HttpResponse, HttpTransport},
    mock::MockTransport,
};
