use anyhow::{Context, Result};
use async_trait::async_trait;
use quest_gateway::{GatewayError, HttpClient, HttpMethod, HttpRequest, HttpResponse};

/// [`HttpClient`] over `reqwest`, one request per call and no retries.
#[derive(Clone)]
pub struct ReqwestClient {
    client: reqwest::Client,
}

impl ReqwestClient {
    pub fn new() -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("quest-tester/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("failed to build HTTP client")?;
        Ok(Self { client })
    }
}

fn network_fault(err: &reqwest::Error) -> GatewayError {
    GatewayError::Network(err.to_string())
}

#[async_trait(?Send)]
impl HttpClient for ReqwestClient {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, GatewayError> {
        let builder = match request.method {
            HttpMethod::Get => self.client.get(&request.url),
            HttpMethod::Post => self.client.post(&request.url),
        };
        let builder = match &request.body {
            Some(body) => builder.json(body),
            None => builder,
        };
        let response = builder.send().await.map_err(|err| network_fault(&err))?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(|err| network_fault(&err))?;
        Ok(HttpResponse { status, body })
    }
}
