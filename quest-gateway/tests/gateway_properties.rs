use async_trait::async_trait;
use futures::executor::block_on;
use quest_gateway::{
    BackendGateway, BridgeTransport, Continent, Difficulty, FixedBridge, GatewayConfig,
    GatewayError, GlobeLauncher, HostEnvironment, HttpClient, HttpMethod, HttpRequest,
    HttpResponse, HttpTransport, OperationResult, PageLocation, ProgressBoard, QuestHost,
    SignalMessage, StartOptions, StartSignal, Transport, TransportFactory, TransportKind,
};
use serde_json::{Value, json};
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Clone, Default)]
struct Recording {
    requests: Rc<RefCell<Vec<HttpRequest>>>,
    response: Rc<RefCell<Option<HttpResponse>>>,
}

impl Recording {
    fn answering(status: u16, body: &str) -> Self {
        let recording = Self::default();
        *recording.response.borrow_mut() = Some(HttpResponse {
            status,
            body: body.to_string(),
        });
        recording
    }
}

#[async_trait(?Send)]
impl HttpClient for Recording {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, GatewayError> {
        self.requests.borrow_mut().push(request);
        self.response
            .borrow()
            .clone()
            .ok_or_else(|| GatewayError::Network("connection refused".into()))
    }
}

#[derive(Clone, Default)]
struct Signals(Rc<RefCell<Vec<SignalMessage>>>);

impl StartSignal for Signals {
    fn post(&self, message: SignalMessage, _delay_ms: u32) {
        self.0.borrow_mut().push(message);
    }
}

struct Launches;

impl GlobeLauncher for Launches {
    fn launch(&self, _continent: &str) -> Result<(), String> {
        Ok(())
    }
}

struct Factory {
    http: Recording,
    signals: Signals,
    host: Option<Rc<QuestHost>>,
}

impl Factory {
    fn new(http: Recording) -> Self {
        Self {
            http,
            signals: Signals::default(),
            host: None,
        }
    }
}

impl TransportFactory for Factory {
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
            Box::new(self.signals.clone()),
            config,
        ))
    }

    fn http(&self, base_url: &str, config: &GatewayConfig) -> Box<dyn Transport> {
        Box::new(HttpTransport::new(self.http.clone(), base_url, config))
    }
}

fn served_from(url: &str) -> HostEnvironment {
    HostEnvironment::new(PageLocation::parse(url))
}

fn mock_gateway() -> BackendGateway {
    let config = GatewayConfig::default().with_mock_seed(11);
    BackendGateway::connect(
        &HostEnvironment::standalone(),
        &config,
        &Factory::new(Recording::default()),
    )
}

#[test]
fn mock_answers_every_operation_with_success() {
    let gateway = mock_gateway();
    assert_eq!(gateway.kind(), TransportKind::Mock);
    let results = block_on(async {
        vec![
            gateway.launch_continent(Continent::Australia).await,
            gateway.start_game(None).await,
            gateway.set_difficulty(Difficulty::Hard).await,
            gateway.get_progress(None).await,
            gateway.update_progress(Continent::Asia, 12.5).await,
            gateway.test_connection().await,
        ]
    });
    assert!(results.iter().all(OperationResult::is_success), "{results:?}");
}

#[test]
fn mock_progress_board_has_seven_values_in_range() {
    let gateway = mock_gateway();
    for _ in 0..20 {
        let result = block_on(gateway.get_progress(None));
        let board = ProgressBoard::from_payload(result.payload().unwrap());
        assert!(board.is_complete());
        assert!(board.iter().all(|(_, value)| (0.0..100.0).contains(&value)));

        let single = block_on(gateway.get_progress(Some(Continent::Europe)));
        let value = single.payload().and_then(Value::as_f64).unwrap();
        assert!((0.0..100.0).contains(&value));
    }
}

#[test]
fn http_launch_issues_one_get_and_returns_body() {
    let client = Recording::answering(200, r#"{"status":"success","continent":"asia"}"#);
    let requests = Rc::clone(&client.requests);
    let gateway = BackendGateway::connect(
        &served_from("http://localhost:5000/index.html"),
        &GatewayConfig::default(),
        &Factory::new(client),
    );
    assert_eq!(gateway.kind(), TransportKind::HttpApi);

    let result = block_on(gateway.launch_continent(Continent::Asia));
    assert_eq!(
        result,
        OperationResult::Success(json!({ "status": "success", "continent": "asia" }))
    );
    let requests = requests.borrow();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, HttpMethod::Get);
    assert_eq!(requests[0].url, "http://localhost:5000/api/launch/asia");
}

#[test]
fn http_faults_fold_into_failures() {
    let env = served_from("https://quest.example/");
    let config = GatewayConfig::default();

    let rejected = BackendGateway::connect(
        &env,
        &config,
        &Factory::new(Recording::answering(404, r#"{"message":"no such route"}"#)),
    );
    let result = block_on(rejected.test_connection());
    assert!(!result.is_success());
    assert!(result.message().unwrap().contains("no such route"));

    let garbled = BackendGateway::connect(
        &env,
        &config,
        &Factory::new(Recording::answering(200, "not json")),
    );
    assert!(!block_on(garbled.get_progress(None)).is_success());

    let offline = BackendGateway::connect(&env, &config, &Factory::new(Recording::default()));
    let result = block_on(offline.set_difficulty(Difficulty::Easy));
    assert_eq!(
        result,
        OperationResult::Failure("network error: connection refused".into())
    );
}

#[test]
fn bridge_start_game_without_sites_signals_and_succeeds() {
    let factory = Factory::new(Recording::default());
    let signals = factory.signals.clone();
    let gateway = BackendGateway::connect(
        &served_from("file:///opt/quest/continental_quest_landing.html"),
        &GatewayConfig::default(),
        &factory,
    );
    assert_eq!(gateway.kind(), TransportKind::EmbeddedBridge);

    let result = block_on(gateway.start_game(Some(StartOptions::new())));
    assert!(result.is_success());
    let posted = signals.0.borrow();
    assert_eq!(posted.len(), 1);
    assert_eq!(posted[0].kind, "START_GLOBE");
}

#[test]
fn bridge_backed_by_host_round_trips_progress() {
    let host = Rc::new(QuestHost::with_launcher(Box::new(Launches)));
    let mut factory = Factory::new(Recording::default());
    factory.host = Some(Rc::clone(&host));
    let env = HostEnvironment::standalone().with_bridge(quest_gateway::BRIDGE_METHODS);
    let gateway = BackendGateway::connect(&env, &GatewayConfig::default(), &factory);

    let (africa, asia) = block_on(async {
        futures::join!(
            gateway.update_progress(Continent::Africa, 10.0),
            gateway.update_progress(Continent::Asia, 20.0),
        )
    });
    assert_eq!(africa.payload().unwrap()["continent"], "africa");
    assert_eq!(africa.payload().unwrap()["progress"], 10.0);
    assert_eq!(asia.payload().unwrap()["continent"], "asia");
    assert_eq!(asia.payload().unwrap()["progress"], 20.0);

    let started = block_on(gateway.start_game(None));
    assert_eq!(started.message(), Some("3D Globe started for earth"));
    assert!(host.is_game_running());
}

#[test]
fn host_without_globe_reports_failure_through_gateway() {
    let host = Rc::new(QuestHost::new());
    let mut factory = Factory::new(Recording::default());
    factory.host = Some(host);
    let env = HostEnvironment::standalone().with_bridge(quest_gateway::BRIDGE_METHODS);
    let gateway = BackendGateway::connect(&env, &GatewayConfig::default(), &factory);

    let result = block_on(gateway.launch_continent(Continent::Antarctica));
    assert_eq!(
        result,
        OperationResult::Failure("3D globe not available".into())
    );
}
