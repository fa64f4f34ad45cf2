//! JSON-over-HTTP transport against the page's own origin.
use super::{StartOptions, Transport};
use crate::config::GatewayConfig;
use crate::continent::Continent;
use crate::difficulty::Difficulty;
use crate::environment::TransportKind;
use crate::error::GatewayError;
use crate::progress::ProgressValue;
use async_trait::async_trait;
use serde_json::{Value, json};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Get => "GET",
            Self::Post => "POST",
        })
    }
}

/// A single request; a body implies `Content-Type: application/json`.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub body: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }
}

/// Sends one request and hands back the raw response.
///
/// Implementations must not retry; timeouts are whatever the client does
/// by default.
#[async_trait(?Send)]
pub trait HttpClient {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, GatewayError>;
}

pub struct HttpTransport<C> {
    client: C,
    api_base: String,
}

impl<C: HttpClient> HttpTransport<C> {
    #[must_use]
    pub fn new(client: C, base_url: &str, config: &GatewayConfig) -> Self {
        let api_base = format!("{}{}", base_url.trim_end_matches('/'), config.api_root());
        Self { client, api_base }
    }

    #[must_use]
    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.api_base, path)
    }

    async fn call(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<Value>,
    ) -> Result<Value, GatewayError> {
        let request = HttpRequest {
            method,
            url: self.url(path),
            body,
        };
        log::debug!("{} {}", request.method, request.url);
        let response = self.client.send(request).await?;
        decode_response(&response)
    }
}

fn decode_response(response: &HttpResponse) -> Result<Value, GatewayError> {
    if !response.is_success() {
        let message = serde_json::from_str::<Value>(&response.body)
            .ok()
            .and_then(|body| {
                body.get("message")
                    .or_else(|| body.get("error"))
                    .and_then(Value::as_str)
                    .map(str::to_string)
            })
            .unwrap_or_else(|| String::from("request failed"));
        return Err(GatewayError::Status {
            status: response.status,
            message,
        });
    }
    Ok(serde_json::from_str(&response.body)?)
}

#[async_trait(?Send)]
impl<C: HttpClient> Transport for HttpTransport<C> {
    fn kind(&self) -> TransportKind {
        TransportKind::HttpApi
    }

    async fn launch_continent(&self, continent: Continent) -> Result<Value, GatewayError> {
        self.call(HttpMethod::Get, &format!("launch/{continent}"), None)
            .await
    }

    async fn start_game(&self, options: &StartOptions) -> Result<Value, GatewayError> {
        self.call(
            HttpMethod::Post,
            "start-game",
            Some(Value::Object(options.clone())),
        )
        .await
    }

    async fn set_difficulty(&self, difficulty: Difficulty) -> Result<Value, GatewayError> {
        self.call(
            HttpMethod::Post,
            "difficulty",
            Some(json!({ "difficulty": difficulty })),
        )
        .await
    }

    async fn get_progress(&self, continent: Option<Continent>) -> Result<Value, GatewayError> {
        let path = continent.map_or_else(
            || String::from("progress"),
            |continent| format!("progress/{continent}"),
        );
        self.call(HttpMethod::Get, &path, None).await
    }

    async fn update_progress(
        &self,
        continent: Continent,
        progress: ProgressValue,
    ) -> Result<Value, GatewayError> {
        self.call(
            HttpMethod::Post,
            &format!("progress/{continent}"),
            Some(json!({ "progress": progress })),
        )
        .await
    }

    async fn test_connection(&self) -> Result<Value, GatewayError> {
        self.call(HttpMethod::Get, "test", None).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Clone)]
    struct Canned {
        seen: Rc<RefCell<Vec<HttpRequest>>>,
        response: HttpResponse,
    }

    #[async_trait(?Send)]
    impl HttpClient for Canned {
        async fn send(&self, request: HttpRequest) -> Result<HttpResponse, GatewayError> {
            self.seen.borrow_mut().push(request);
            Ok(self.response.clone())
        }
    }

    fn canned(status: u16, body: &str) -> Canned {
        Canned {
            seen: Rc::default(),
            response: HttpResponse {
                status,
                body: body.to_string(),
            },
        }
    }

    #[test]
    fn builds_paths_under_api_prefix() {
        let client = canned(200, "{}");
        let transport = HttpTransport::new(client.clone(), "http://localhost:5000/", &GatewayConfig::default());
        assert_eq!(transport.api_base(), "http://localhost:5000/api");
        block_on(transport.get_progress(Some(Continent::NorthAmerica))).unwrap();
        block_on(transport.get_progress(None)).unwrap();
        let seen = client.seen.borrow();
        assert_eq!(seen[0].url, "http://localhost:5000/api/progress/north-america");
        assert_eq!(seen[1].url, "http://localhost:5000/api/progress");
    }

    #[test]
    fn posts_json_bodies() {
        let client = canned(200, r#"{"status":"success"}"#);
        let transport = HttpTransport::new(client.clone(), "https://q.example", &GatewayConfig::default());
        block_on(transport.set_difficulty(Difficulty::Hard)).unwrap();
        let progress = ProgressValue::new(42.0).unwrap();
        block_on(transport.update_progress(Continent::Europe, progress)).unwrap();
        let seen = client.seen.borrow();
        assert_eq!(seen[0].method, HttpMethod::Post);
        assert_eq!(seen[0].body, Some(json!({ "difficulty": "hard" })));
        assert_eq!(seen[1].url, "https://q.example/api/progress/europe");
        assert_eq!(seen[1].body, Some(json!({ "progress": 42.0 })));
    }

    #[test]
    fn start_game_posts_the_options_map() {
        let client = canned(200, r#"{"status":"success"}"#);
        let transport = HttpTransport::new(client.clone(), "http://localhost:5000", &GatewayConfig::default());
        let mut options = StartOptions::new();
        options.insert("difficulty".into(), json!("extreme"));
        options.insert("continent".into(), json!("antarctica"));
        block_on(transport.start_game(&options)).unwrap();
        block_on(transport.start_game(&StartOptions::new())).unwrap();
        let seen = client.seen.borrow();
        assert_eq!(seen[0].method, HttpMethod::Post);
        assert_eq!(seen[0].url, "http://localhost:5000/api/start-game");
        assert_eq!(
            seen[0].body,
            Some(json!({ "difficulty": "extreme", "continent": "antarctica" }))
        );
        assert_eq!(seen[1].body, Some(json!({})));
    }

    #[test]
    fn non_success_status_carries_backend_message() {
        let client = canned(500, r#"{"error":"globe crashed"}"#);
        let transport = HttpTransport::new(client.clone(), "http://h", &GatewayConfig::default());
        let err = block_on(transport.test_connection()).unwrap_err();
        assert!(matches!(err, GatewayError::Status { status: 500, .. }));
        assert!(err.to_string().contains("globe crashed"));
    }

    #[test]
    fn malformed_body_is_a_json_error() {
        let client = canned(200, "<html>oops</html>");
        let transport = HttpTransport::new(client.clone(), "http://h", &GatewayConfig::default());
        let err = block_on(transport.test_connection()).unwrap_err();
        assert!(matches!(err, GatewayError::Json(_)));
    }
}
