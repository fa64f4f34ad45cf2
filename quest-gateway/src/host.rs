//! In-process stand-in for the desktop shell that injects the bridge object.
use crate::continent::Continent;
use crate::difficulty::Difficulty;
use crate::error::GatewayError;
use crate::progress::ProgressValue;
use crate::transport::StartOptions;
use crate::transport::bridge::BridgeApi;
use async_trait::async_trait;
use serde_json::{Map, Value, json};
use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;

const DEFAULT_CONTINENT: &str = "earth";

const SEEDED_PROGRESS: [(Continent, f64); 7] = [
    (Continent::NorthAmerica, 75.0),
    (Continent::SouthAmerica, 60.0),
    (Continent::Europe, 85.0),
    (Continent::Africa, 45.0),
    (Continent::Asia, 55.0),
    (Continent::Australia, 90.0),
    (Continent::Antarctica, 25.0),
];

/// Starts the 3D globe for a continent id (or `earth`).
pub trait GlobeLauncher {
    /// # Errors
    ///
    /// Returns a human-readable reason when the globe cannot start.
    fn launch(&self, continent: &str) -> Result<(), String>;
}

/// Backend state the shell keeps between bridge calls.
pub struct QuestHost {
    launcher: Option<Box<dyn GlobeLauncher>>,
    current_continent: RefCell<Option<String>>,
    difficulty: RefCell<String>,
    game_running: Cell<bool>,
    progress: RefCell<BTreeMap<Continent, f64>>,
}

impl Default for QuestHost {
    fn default() -> Self {
        Self::new()
    }
}

impl QuestHost {
    /// A host with no globe installed; every start attempt reports an error.
    #[must_use]
    pub fn new() -> Self {
        Self {
            launcher: None,
            current_continent: RefCell::new(None),
            difficulty: RefCell::new(Difficulty::default().id().to_string()),
            game_running: Cell::new(false),
            progress: RefCell::new(SEEDED_PROGRESS.into_iter().collect()),
        }
    }

    #[must_use]
    pub fn with_launcher(launcher: Box<dyn GlobeLauncher>) -> Self {
        Self {
            launcher: Some(launcher),
            ..Self::new()
        }
    }

    #[must_use]
    pub fn current_continent(&self) -> Option<String> {
        self.current_continent.borrow().clone()
    }

    #[must_use]
    pub fn difficulty(&self) -> String {
        self.difficulty.borrow().clone()
    }

    #[must_use]
    pub fn is_game_running(&self) -> bool {
        self.game_running.get()
    }

    fn start_globe(&self, continent: &str) -> Value {
        let Some(launcher) = &self.launcher else {
            return json!({ "status": "error", "message": "3D globe not available" });
        };
        match launcher.launch(continent) {
            Ok(()) => {
                log::info!("globe started for {continent}");
                self.game_running.set(true);
                json!({
                    "status": "success",
                    "continent": continent,
                    "message": format!("3D Globe started for {continent}"),
                })
            }
            Err(reason) => {
                log::warn!("globe failed to start: {reason}");
                json!({
                    "status": "error",
                    "message": format!("Failed to start 3D globe: {reason}"),
                })
            }
        }
    }
}

fn option_str<'a>(options: &'a StartOptions, key: &str, fallback: &'a str) -> &'a str {
    options.get(key).and_then(Value::as_str).unwrap_or(fallback)
}

#[async_trait(?Send)]
impl BridgeApi for QuestHost {
    async fn launch_continent(&self, name: &str) -> Result<Value, GatewayError> {
        *self.current_continent.borrow_mut() = Some(name.to_string());
        Ok(self.start_globe(name))
    }

    async fn start_game(&self, options: &StartOptions) -> Result<Value, GatewayError> {
        let continent = option_str(options, "continent", DEFAULT_CONTINENT);
        let difficulty = option_str(options, "difficulty", Difficulty::default().id());
        log::debug!("start_game: {continent} ({difficulty})");
        *self.current_continent.borrow_mut() = Some(continent.to_string());
        *self.difficulty.borrow_mut() = difficulty.to_string();
        Ok(self.start_globe(continent))
    }

    async fn set_difficulty(&self, level: &str) -> Result<Value, GatewayError> {
        *self.difficulty.borrow_mut() = level.to_string();
        Ok(json!({ "status": "success", "difficulty": level }))
    }

    async fn get_progress(&self, continent: Option<&str>) -> Result<Value, GatewayError> {
        let progress = self.progress.borrow();
        let Some(id) = continent else {
            let table: Map<String, Value> = progress
                .iter()
                .map(|(continent, value)| (continent.id().to_string(), json!(value)))
                .collect();
            return Ok(Value::Object(table));
        };
        let value = id
            .parse::<Continent>()
            .ok()
            .and_then(|continent| progress.get(&continent).copied())
            .unwrap_or(0.0);
        Ok(json!(value))
    }

    async fn update_progress(
        &self,
        continent: &str,
        progress: f64,
    ) -> Result<Value, GatewayError> {
        let Ok(known) = continent.parse::<Continent>() else {
            return Ok(json!({
                "status": "error",
                "message": format!("unknown continent: {continent}"),
            }));
        };
        let value = ProgressValue::clamped(progress).get();
        self.progress.borrow_mut().insert(known, value);
        Ok(json!({ "status": "success", "continent": known, "progress": value }))
    }

    async fn test_connection(&self) -> Result<Value, GatewayError> {
        Ok(json!({
            "status": "success",
            "message": "Bridge API is working!",
            "timestamp": chrono::Utc::now().timestamp(),
        }))
    }
}
