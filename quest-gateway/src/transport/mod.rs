//! Transport implementations behind the gateway.
//!
//! Every transport answers the same six operations with a raw JSON payload
//! or a [`GatewayError`]. Normalisation into
//! [`crate::OperationResult`] happens in the gateway, not here.

pub mod bridge;
pub mod http;
pub mod mock;

use crate::continent::Continent;
use crate::difficulty::Difficulty;
use crate::environment::TransportKind;
use crate::error::GatewayError;
use crate::progress::ProgressValue;
use async_trait::async_trait;
use serde_json::{Map, Value};

/// Free-form options passed to `start_game`.
pub type StartOptions = Map<String, Value>;

/// One backend call convention. Futures are not `Send`: the page runs on a
/// single UI thread.
#[async_trait(?Send)]
pub trait Transport {
    fn kind(&self) -> TransportKind;

    async fn launch_continent(&self, continent: Continent) -> Result<Value, GatewayError>;

    async fn start_game(&self, options: &StartOptions) -> Result<Value, GatewayError>;

    async fn set_difficulty(&self, difficulty: Difficulty) -> Result<Value, GatewayError>;

    async fn get_progress(&self, continent: Option<Continent>) -> Result<Value, GatewayError>;

    async fn update_progress(
        &self,
        continent: Continent,
        progress: ProgressValue,
    ) -> Result<Value, GatewayError>;

    async fn test_connection(&self) -> Result<Value, GatewayError>;
}
