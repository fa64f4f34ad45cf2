//! Transport detection from a snapshot of the hosting environment.
//!
//! Detection runs once at startup. The resulting [`TransportSelection`] is
//! handed to the gateway and never re-evaluated.
use crate::config::GatewayConfig;
use serde::{Deserialize, Serialize};
use std::fmt;
use url::Url;

/// Methods a bridge object must expose to be selected on sight.
pub const BRIDGE_METHODS: [&str; 6] = [
    "launch_continent",
    "start_game",
    "set_difficulty",
    "get_progress",
    "update_progress",
    "test_connection",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransportKind {
    EmbeddedBridge,
    HttpApi,
    Mock,
}

impl TransportKind {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::EmbeddedBridge => "embedded_bridge",
            Self::HttpApi => "http_api",
            Self::Mock => "mock",
        }
    }
}

impl fmt::Display for TransportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The parts of `window.location` detection looks at.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PageLocation {
    /// Scheme including the trailing colon, lowercased (`"https:"`).
    pub protocol: String,
    pub href: String,
    /// `scheme://host[:port]` for network schemes, `"null"` otherwise.
    pub origin: String,
}

impl PageLocation {
    /// Derive protocol and origin from a full URL, normalised the way a
    /// browser would (default ports dropped, `\` read as `/` on web schemes).
    #[must_use]
    pub fn parse(url: &str) -> Self {
        let href = url.trim();
        match Url::parse(href) {
            Ok(parsed) => Self {
                protocol: format!("{}:", parsed.scheme()),
                origin: parsed.origin().ascii_serialization(),
                href: String::from(parsed),
            },
            Err(err) => {
                log::debug!("unparseable page URL {href:?}: {err}");
                Self {
                    protocol: String::new(),
                    href: href.to_string(),
                    origin: String::from("null"),
                }
            }
        }
    }

    /// Replace the derived origin with one the host reported directly.
    #[must_use]
    pub fn with_origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = origin.into();
        self
    }

    #[must_use]
    pub fn is_network(&self) -> bool {
        matches!(self.protocol.as_str(), "http:" | "https:") && self.origin != "null"
    }
}

/// What page-load detection can observe about its host.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HostEnvironment {
    /// Method names exposed by the bridge object, `None` when no bridge exists.
    pub bridge_methods: Option<Vec<String>>,
    pub location: PageLocation,
}

impl HostEnvironment {
    #[must_use]
    pub fn new(location: PageLocation) -> Self {
        Self {
            bridge_methods: None,
            location,
        }
    }

    /// No bridge, no URL: a page opened outside any shell or server.
    #[must_use]
    pub fn standalone() -> Self {
        Self::new(PageLocation::parse("about:blank"))
    }

    #[must_use]
    pub fn with_bridge<I, S>(mut self, methods: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.bridge_methods = Some(methods.into_iter().map(Into::into).collect());
        self
    }

    #[must_use]
    pub fn bridge_exposes(&self, method: &str) -> bool {
        self.bridge_methods
            .as_ref()
            .is_some_and(|methods| methods.iter().any(|m| m == method))
    }
}

/// Resolved transport plus the base address used by the HTTP transport.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransportSelection {
    pub kind: TransportKind,
    pub base_url: Option<String>,
    pub reason: &'static str,
}

type Detector = fn(&HostEnvironment, &GatewayConfig) -> bool;

/// Evaluated in order; the first match wins.
const DETECTORS: [(TransportKind, &str, Detector); 3] = [
    (
        TransportKind::EmbeddedBridge,
        "bridge object attached",
        bridge_attached,
    ),
    (
        TransportKind::EmbeddedBridge,
        "landing page opened from a local file",
        served_from_landing_file,
    ),
    (
        TransportKind::HttpApi,
        "page served over the network",
        served_over_network,
    ),
];

fn bridge_attached(env: &HostEnvironment, _config: &GatewayConfig) -> bool {
    env.bridge_methods.is_some()
        && BRIDGE_METHODS
            .iter()
            .all(|method| env.bridge_exposes(method))
}

fn served_from_landing_file(env: &HostEnvironment, config: &GatewayConfig) -> bool {
    env.location.protocol == "file:" && env.location.href.contains(&config.landing_page)
}

fn served_over_network(env: &HostEnvironment, _config: &GatewayConfig) -> bool {
    env.location.is_network()
}

impl TransportSelection {
    #[must_use]
    pub fn resolve(env: &HostEnvironment, config: &GatewayConfig) -> Self {
        let selection = DETECTORS
            .iter()
            .find(|(_, _, detector)| detector(env, config))
            .map_or_else(
                || Self::fixed(TransportKind::Mock, None, "no backend detected"),
                |(kind, reason, _)| {
                    let base_url = matches!(kind, TransportKind::HttpApi)
                        .then(|| env.location.origin.clone());
                    Self::fixed(*kind, base_url, *reason)
                },
            );
        log::info!(
            "detected backend: {} ({})",
            selection.kind,
            selection.reason
        );
        selection
    }

    #[must_use]
    pub const fn fixed(
        kind: TransportKind,
        base_url: Option<String>,
        reason: &'static str,
    ) -> Self {
        Self {
            kind,
            base_url,
            reason,
        }
    }
}
