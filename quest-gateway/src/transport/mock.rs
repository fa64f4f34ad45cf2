use super::{StartOptions, Transport};
use crate::config::GatewayConfig;
use crate::continent::Continent;
use crate::difficulty::Difficulty;
use crate::environment::TransportKind;
use crate::error::GatewayError;
use crate::progress::ProgressValue;
use async_trait::async_trait;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde_json::{Map, Value, json};
use std::cell::RefCell;

const DEFAULT_MOCK_SEED: u64 = 0x00C0_FFEE;

/// Canned, no-network transport for standalone development.
///
/// Progress values are regenerated on every call.
pub struct MockTransport {
    rng: RefCell<SmallRng>,
}

impl MockTransport {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: RefCell::new(SmallRng::seed_from_u64(seed)),
        }
    }

    #[must_use]
    pub fn from_config(config: &GatewayConfig) -> Self {
        Self::new(config.mock_seed.unwrap_or(DEFAULT_MOCK_SEED))
    }

    fn roll(&self, continent: Continent) -> f64 {
        self.rng
            .borrow_mut()
            .gen_range(0.0..continent.mock_ceiling())
    }
}

#[async_trait(?Send)]
impl Transport for MockTransport {
    fn kind(&self) -> TransportKind {
        TransportKind::Mock
    }

    async fn launch_continent(&self, continent: Continent) -> Result<Value, GatewayError> {
        Ok(json!({
            "status": "success",
            "continent": continent,
            "message": format!("Mock: Would launch {continent}"),
        }))
    }

    async fn start_game(&self, _options: &StartOptions) -> Result<Value, GatewayError> {
        Ok(json!({
            "status": "success",
            "message": "Mock: Game would start now",
        }))
    }

    async fn set_difficulty(&self, difficulty: Difficulty) -> Result<Value, GatewayError> {
        Ok(json!({
            "status": "success",
            "difficulty": difficulty,
            "message": format!("Mock: Difficulty set to {difficulty}"),
        }))
    }

    async fn get_progress(&self, continent: Option<Continent>) -> Result<Value, GatewayError> {
        if let Some(continent) = continent {
            return Ok(json!(self.roll(continent)));
        }
        let board: Map<String, Value> = Continent::ALL
            .into_iter()
            .map(|continent| (continent.id().to_string(), json!(self.roll(continent))))
            .collect();
        Ok(Value::Object(board))
    }

    async fn update_progress(
        &self,
        continent: Continent,
        progress: ProgressValue,
    ) -> Result<Value, GatewayError> {
        Ok(json!({
            "status": "success",
            "continent": continent,
            "progress": progress,
        }))
    }

    async fn test_connection(&self) -> Result<Value, GatewayError> {
        Ok(json!({
            "status": "success",
            "message": "Mock: Connection test successful",
            "backend": self.kind(),
        }))
    }
}
