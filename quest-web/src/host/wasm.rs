use crate::dom;
use async_trait::async_trait;
use gloo_net::http::Request;
use js_sys::{Array, Function};
use quest_gateway::{
    BRIDGE_METHODS, BackendGateway, BridgeApi, BridgeLocator, BridgeTransport, GatewayConfig,
    GatewayError, HostEnvironment, HttpClient, HttpMethod, HttpRequest, HttpResponse,
    HttpTransport, MockTransport, PageLocation, SignalMessage, StartGameSite, StartOptions,
    StartSignal, Transport, TransportFactory,
};
use serde::Serialize;
use serde_json::Value;
use std::rc::Rc;
use wasm_bindgen::JsValue;

fn bridge_object() -> Option<JsValue> {
    let win = JsValue::from(dom::window()?);
    let pywebview = dom::property(&win, "pywebview")?;
    dom::property(&pywebview, "api")
}

pub(super) fn detect_environment() -> HostEnvironment {
    let Some(win) = dom::window() else {
        return HostEnvironment::standalone();
    };
    let location = win.location();
    let href = location.href().unwrap_or_default();
    let parsed = PageLocation::parse(&href);
    let page = match location.origin() {
        Ok(origin) => parsed.with_origin(origin),
        Err(_) => parsed,
    };
    let env = HostEnvironment::new(page);
    match bridge_object() {
        Some(api) => env.with_bridge(
            BRIDGE_METHODS
                .into_iter()
                .filter(|name| dom::method(&api, name).is_some()),
        ),
        None => env,
    }
}

pub(super) fn connect_gateway(env: &HostEnvironment, config: &GatewayConfig) -> BackendGateway {
    BackendGateway::connect(env, config, &BrowserTransports)
}

fn to_js<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, GatewayError> {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(|err| GatewayError::Bridge(err.to_string()))
}

fn from_js(value: JsValue) -> Result<Value, GatewayError> {
    if value.is_undefined() {
        return Ok(Value::Null);
    }
    serde_wasm_bindgen::from_value(value).map_err(|err| GatewayError::Bridge(err.to_string()))
}

fn js_fault(err: &JsValue) -> GatewayError {
    GatewayError::Bridge(dom::js_error_message(err))
}

async fn invoke(function: &Function, this: &JsValue, args: &[JsValue]) -> Result<Value, GatewayError> {
    let args: Array = args.iter().collect();
    let returned = function.apply(this, &args).map_err(|err| js_fault(&err))?;
    let settled = dom::settle(returned).await.map_err(|err| js_fault(&err))?;
    from_js(settled)
}

/// `window.pywebview.api`, whose methods return promises.
struct JsBridgeApi {
    api: JsValue,
}

impl JsBridgeApi {
    async fn call(&self, name: &str, args: &[JsValue]) -> Result<Value, GatewayError> {
        let function = dom::method(&self.api, name).ok_or_else(|| {
            GatewayError::TransportUnavailable(format!("embedded bridge does not expose {name}"))
        })?;
        log::debug!("bridge.{name}");
        invoke(&function, &self.api, args).await
    }
}

#[async_trait(?Send)]
impl BridgeApi for JsBridgeApi {
    fn exposes(&self, method: &str) -> bool {
        dom::method(&self.api, method).is_some()
    }

    async fn launch_continent(&self, name: &str) -> Result<Value, GatewayError> {
        self.call("launch_continent", &[JsValue::from_str(name)])
            .await
    }

    async fn start_game(&self, options: &StartOptions) -> Result<Value, GatewayError> {
        self.call("start_game", &[to_js(options)?]).await
    }

    async fn set_difficulty(&self, level: &str) -> Result<Value, GatewayError> {
        self.call("set_difficulty", &[JsValue::from_str(level)])
            .await
    }

    async fn get_progress(&self, continent: Option<&str>) -> Result<Value, GatewayError> {
        let args: Vec<JsValue> = continent.map(JsValue::from_str).into_iter().collect();
        self.call("get_progress", &args).await
    }

    async fn update_progress(
        &self,
        continent: &str,
        progress: f64,
    ) -> Result<Value, GatewayError> {
        self.call(
            "update_progress",
            &[JsValue::from_str(continent), JsValue::from_f64(progress)],
        )
        .await
    }

    async fn test_connection(&self) -> Result<Value, GatewayError> {
        self.call("test_connection", &[]).await
    }
}

/// pywebview injects its API after load; look it up on every call.
struct PywebviewLocator;

impl BridgeLocator for PywebviewLocator {
    fn locate(&self) -> Option<Rc<dyn BridgeApi>> {
        bridge_object().map(|api| Rc::new(JsBridgeApi { api }) as Rc<dyn BridgeApi>)
    }
}

#[derive(Clone, Copy)]
enum SiteScope {
    Global,
    Window,
}

/// A bare `start_game` function on the global object or on `window`.
struct GlobalStartSite {
    scope: SiteScope,
}

impl GlobalStartSite {
    fn target(&self) -> Option<JsValue> {
        match self.scope {
            SiteScope::Global => Some(js_sys::global().into()),
            SiteScope::Window => dom::window().map(JsValue::from),
        }
    }

    fn function(&self) -> Option<(JsValue, Function)> {
        let target = self.target()?;
        let function = dom::method(&target, "start_game")?;
        Some((target, function))
    }
}

#[async_trait(?Send)]
impl StartGameSite for GlobalStartSite {
    fn name(&self) -> &str {
        match self.scope {
            SiteScope::Global => "start_game",
            SiteScope::Window => "window.start_game",
        }
    }

    fn is_available(&self) -> bool {
        self.function().is_some()
    }

    async fn start(&self, options: &StartOptions) -> Result<Value, GatewayError> {
        let (target, function) = self.function().ok_or_else(|| {
            GatewayError::TransportUnavailable(format!("{} is not defined", self.name()))
        })?;
        invoke(&function, &target, &[to_js(options)?]).await
    }
}

/// Delivers the start signal with `window.postMessage` after a short delay.
struct PostMessageSignal;

impl StartSignal for PostMessageSignal {
    fn post(&self, message: SignalMessage, delay_ms: u32) {
        wasm_bindgen_futures::spawn_local(async move {
            let delay = i32::try_from(delay_ms).unwrap_or(i32::MAX);
            if let Err(err) = dom::sleep_ms(delay).await {
                log::warn!("start signal timer failed: {}", dom::js_error_message(&err));
                return;
            }
            let Some(win) = dom::window() else {
                return;
            };
            let delivered = to_js(&message).and_then(|payload| {
                win.post_message(&payload, "*")
                    .map_err(|err| js_fault(&err))
            });
            if let Err(err) = delivered {
                log::warn!("start signal not delivered: {err}");
            }
        });
    }
}

/// `fetch` through gloo-net.
struct FetchClient;

fn network_fault(err: gloo_net::Error) -> GatewayError {
    GatewayError::Network(err.to_string())
}

#[async_trait(?Send)]
impl HttpClient for FetchClient {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, GatewayError> {
        let builder = match request.method {
            HttpMethod::Get => Request::get(&request.url),
            HttpMethod::Post => Request::post(&request.url),
        };
        let prepared = match &request.body {
            Some(body) => builder.json(body),
            None => builder.build(),
        }
        .map_err(network_fault)?;
        let response = prepared.send().await.map_err(network_fault)?;
        let status = response.status();
        let body = response.text().await.map_err(network_fault)?;
        Ok(HttpResponse { status, body })
    }
}

struct BrowserTransports;

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn entropy_seed() -> u64 {
    let word = || (js_sys::Math::random() * f64::from(u32::MAX)) as u64;
    (word() << 32) | word()
}

impl TransportFactory for BrowserTransports {
    fn bridge(&self, config: &GatewayConfig) -> Box<dyn Transport> {
        let fallbacks: Vec<Box<dyn StartGameSite>> = vec![
            Box::new(GlobalStartSite {
                scope: SiteScope::Global,
            }),
            Box::new(GlobalStartSite {
                scope: SiteScope::Window,
            }),
        ];
        Box::new(BridgeTransport::new(
            Rc::new(PywebviewLocator),
            fallbacks,
            Box::new(PostMessageSignal),
            config,
        ))
    }

    fn http(&self, base_url: &str, config: &GatewayConfig) -> Box<dyn Transport> {
        Box::new(HttpTransport::new(FetchClient, base_url, config))
    }

    fn mock(&self, config: &GatewayConfig) -> Box<dyn Transport> {
        Box::new(MockTransport::new(
            config.mock_seed.unwrap_or_else(entropy_seed),
        ))
    }
}
