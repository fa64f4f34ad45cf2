use yew::prelude::*;

/// State of the initial `test_connection` round trip.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ConnectionStatus {
    #[default]
    Checking,
    Online,
    Offline(AttrValue),
}

impl ConnectionStatus {
    #[must_use]
    pub fn label(&self, transport: &str) -> String {
        match self {
            Self::Checking => format!("Connecting to {transport}…"),
            Self::Online => format!("Connected · {transport}"),
            Self::Offline(reason) => format!("Offline · {reason}"),
        }
    }

    const fn class(&self) -> &'static str {
        match self {
            Self::Checking => "connection-badge connection-badge--checking",
            Self::Online => "connection-badge connection-badge--online",
            Self::Offline(_) => "connection-badge connection-badge--offline",
        }
    }
}

#[derive(Properties, PartialEq, Clone)]
pub struct FooterProps {
    pub status: ConnectionStatus,
    pub transport: AttrValue,
}

#[function_component(Footer)]
pub fn footer(props: &FooterProps) -> Html {
    html! {
        <footer class="footer">
            <span class={props.status.class()} data-testid="connection-badge">
                { props.status.label(&props.transport) }
            </span>
            <p>{ "© Continental Quest" }</p>
        </footer>
    }
}

#[cfg(test)]
mod tests {
    use super::ConnectionStatus;

    #[test]
    fn labels_mention_transport_or_reason() {
        assert_eq!(
            ConnectionStatus::Online.label("mock"),
            "Connected · mock"
        );
        assert_eq!(
            ConnectionStatus::Offline("network error: timeout".into()).label("http_api"),
            "Offline · network error: timeout"
        );
    }
}
