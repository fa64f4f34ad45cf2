use crate::harness::Harness;
use colored::Colorize;
use quest_gateway::{
    Continent, Difficulty, OperationResult, ProgressBoard, TransportKind, TransportSelection,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Check {
    Detection,
    TestConnection,
    Launch,
    StartGame,
    Difficulty,
    ProgressAll,
    ProgressSingle,
    UpdateProgress,
    ConcurrentUpdates,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown check: {0}")]
pub struct UnknownCheck(pub String);

impl Check {
    pub const ALL: [Self; 9] = [
        Self::Detection,
        Self::TestConnection,
        Self::Launch,
        Self::StartGame,
        Self::Difficulty,
        Self::ProgressAll,
        Self::ProgressSingle,
        Self::UpdateProgress,
        Self::ConcurrentUpdates,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Self::Detection => "detection",
            Self::TestConnection => "test-connection",
            Self::Launch => "launch",
            Self::StartGame => "start-game",
            Self::Difficulty => "difficulty",
            Self::ProgressAll => "progress-all",
            Self::ProgressSingle => "progress-single",
            Self::UpdateProgress => "update-progress",
            Self::ConcurrentUpdates => "concurrent-updates",
        }
    }

    pub const fn description(self) -> &'static str {
        match self {
            Self::Detection => "Transport detection is deterministic and matches the gateway",
            Self::TestConnection => "test_connection resolves successfully",
            Self::Launch => "launch_continent succeeds for every continent",
            Self::StartGame => "start_game succeeds with default options",
            Self::Difficulty => "set_difficulty accepts every level",
            Self::ProgressAll => "get_progress returns all seven continents within 0-100",
            Self::ProgressSingle => "get_progress for one continent returns a number within 0-100",
            Self::UpdateProgress => "update_progress echoes the stored value",
            Self::ConcurrentUpdates => "Interleaved update_progress calls stay independent",
        }
    }
}

impl fmt::Display for Check {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Check {
    type Err = UnknownCheck;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|check| check.name() == wanted)
            .ok_or_else(|| UnknownCheck(s.to_string()))
    }
}

/// Resolve requested names, expanding `all`. Unknown names are returned
/// separately so the caller can warn about them.
pub fn expand_checks(names: &[String]) -> (Vec<Check>, Vec<UnknownCheck>) {
    let mut checks = Vec::new();
    let mut unknown = Vec::new();
    for name in names {
        if name.eq_ignore_ascii_case("all") {
            checks.extend(Check::ALL);
            continue;
        }
        match name.parse::<Check>() {
            Ok(check) => checks.push(check),
            Err(err) => unknown.push(err),
        }
    }
    let mut seen = Vec::new();
    checks.retain(|check| {
        if seen.contains(check) {
            false
        } else {
            seen.push(*check);
            true
        }
    });
    (checks, unknown)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckResult {
    pub check_name: String,
    pub transport: String,
    pub passed: bool,
    pub iterations_run: usize,
    pub successful_iterations: usize,
    pub failures: Vec<String>,
    #[serde(with = "duration_serde")]
    pub average_duration: Duration,
    #[serde(with = "duration_vec_serde")]
    pub performance_data: Vec<Duration>,
}

pub struct CheckRunner {
    verbose: bool,
    seed: u64,
}

impl CheckRunner {
    pub const fn new(verbose: bool, seed: u64) -> Self {
        Self { verbose, seed }
    }

    pub async fn run(&self, check: Check, harness: &Harness, iterations: usize) -> CheckResult {
        if self.verbose {
            println!(
                "🧪 Running check: {} ({} transport)",
                check.name().bright_white(),
                harness.gateway.kind()
            );
        }

        let mut failures = Vec::new();
        let mut performance_data = Vec::with_capacity(iterations);
        for iteration in 0..iterations {
            let started = Instant::now();
            let outcome = self.run_once(check, harness, iteration).await;
            performance_data.push(started.elapsed());
            if let Err(reason) = outcome {
                if self.verbose {
                    println!("   ❌ iteration {iteration}: {}", reason.red());
                }
                failures.push(format!("iteration {iteration}: {reason}"));
            }
        }

        let average_duration = if performance_data.is_empty() {
            Duration::ZERO
        } else {
            performance_data.iter().sum::<Duration>()
                / u32::try_from(performance_data.len()).unwrap_or(1)
        };

        CheckResult {
            check_name: check.name().to_string(),
            transport: harness.gateway.kind().label().to_string(),
            passed: failures.is_empty(),
            iterations_run: iterations,
            successful_iterations: iterations - failures.len(),
            failures,
            average_duration,
            performance_data,
        }
    }

    async fn run_once(
        &self,
        check: Check,
        harness: &Harness,
        iteration: usize,
    ) -> Result<(), String> {
        let gateway = &harness.gateway;
        let continent = Continent::ALL[iteration % Continent::ALL.len()];
        match check {
            Check::Detection => {
                let first = TransportSelection::resolve(&harness.env, &harness.config);
                let second = TransportSelection::resolve(&harness.env, &harness.config);
                if first != second {
                    return Err(format!("detection drifted: {first:?} vs {second:?}"));
                }
                if &first != gateway.selection() || first.kind != gateway.kind() {
                    return Err(format!(
                        "gateway uses {} but detection picks {}",
                        gateway.kind(),
                        first.kind
                    ));
                }
                Ok(())
            }
            Check::TestConnection => succeeded(gateway.test_connection().await).map(drop),
            Check::Launch => {
                succeeded(gateway.launch_continent(continent).await)?;
                if let Some(host) = &harness.host {
                    let current = host.current_continent();
                    if current.as_deref() != Some(continent.id()) {
                        return Err(format!("host recorded {current:?}, expected {continent}"));
                    }
                    if !harness.launches().iter().any(|id| id == continent.id()) {
                        return Err(format!("globe never launched for {continent}"));
                    }
                }
                Ok(())
            }
            Check::StartGame => {
                let signals_before = harness.signals_posted();
                succeeded(gateway.start_game(None).await)?;
                if let Some(host) = &harness.host {
                    if !host.is_game_running() {
                        return Err("host reports the game is not running".into());
                    }
                } else if gateway.kind() == TransportKind::EmbeddedBridge
                    && harness.signals_posted() <= signals_before
                {
                    return Err("no start signal was posted".into());
                }
                Ok(())
            }
            Check::Difficulty => {
                let difficulty = Difficulty::ALL[iteration % Difficulty::ALL.len()];
                let payload = succeeded(gateway.set_difficulty(difficulty).await)?;
                match payload.get("difficulty").and_then(Value::as_str) {
                    Some(echoed) if echoed != difficulty.id() => Err(format!(
                        "backend echoed {echoed}, expected {difficulty}"
                    )),
                    _ => Ok(()),
                }
            }
            Check::ProgressAll => {
                let payload = succeeded(gateway.get_progress(None).await)?;
                let board = ProgressBoard::from_payload(&payload);
                if !board.is_complete() {
                    return Err(format!("board lists {} of 7 continents", board.len()));
                }
                match board.iter().find(|(_, value)| !in_range(*value)) {
                    Some((continent, value)) => {
                        Err(format!("{continent} progress {value} outside 0-100"))
                    }
                    None => Ok(()),
                }
            }
            Check::ProgressSingle => {
                let payload = succeeded(gateway.get_progress(Some(continent)).await)?;
                match payload.as_f64() {
                    Some(value) if in_range(value) => Ok(()),
                    Some(value) => Err(format!("{continent} progress {value} outside 0-100")),
                    None => Err(format!("expected a number, got {payload}")),
                }
            }
            Check::UpdateProgress => {
                let value = self.update_value(iteration);
                let payload = succeeded(gateway.update_progress(continent, value).await)?;
                expect_echo(&payload, continent, value)?;
                if harness.host.is_some() {
                    let stored = succeeded(gateway.get_progress(Some(continent)).await)?;
                    if stored.as_f64() != Some(value) {
                        return Err(format!("host stored {stored}, expected {value}"));
                    }
                }
                Ok(())
            }
            Check::ConcurrentUpdates => {
                let (africa, asia) = tokio::join!(
                    gateway.update_progress(Continent::Africa, 10.0),
                    gateway.update_progress(Continent::Asia, 20.0),
                );
                expect_echo(&succeeded(africa)?, Continent::Africa, 10.0)?;
                expect_echo(&succeeded(asia)?, Continent::Asia, 20.0)
            }
        }
    }

    #[allow(clippy::cast_precision_loss)]
    fn update_value(&self, iteration: usize) -> f64 {
        (self.seed.wrapping_add(iteration as u64) % 101) as f64
    }
}

fn succeeded(result: OperationResult) -> Result<Value, String> {
    match result {
        OperationResult::Success(payload) => Ok(payload),
        OperationResult::Failure(message) => Err(message),
    }
}

fn in_range(value: f64) -> bool {
    (0.0..=100.0).contains(&value)
}

/// Payload fields that are present must describe this call, not another.
fn expect_echo(payload: &Value, continent: Continent, value: f64) -> Result<(), String> {
    if let Some(echoed) = payload.get("continent").and_then(Value::as_str)
        && echoed != continent.id()
    {
        return Err(format!("update for {continent} echoed {echoed}"));
    }
    if let Some(echoed) = payload.get("progress").and_then(Value::as_f64)
        && (echoed - value).abs() > f64::EPSILON
    {
        return Err(format!("update to {value} echoed {echoed}"));
    }
    Ok(())
}

mod duration_serde {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        duration.as_millis().serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let millis = u128::deserialize(deserializer)?;
        Ok(Duration::from_millis(u64::try_from(millis).unwrap_or(0)))
    }
}

mod duration_vec_serde {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(durations: &[Duration], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let millis: Vec<u128> = durations.iter().map(Duration::as_millis).collect();
        millis.serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<Duration>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let millis_vec = Vec::<u128>::deserialize(deserializer)?;
        Ok(millis_vec
            .into_iter()
            .map(|millis| Duration::from_millis(u64::try_from(millis).unwrap_or(0)))
            .collect())
    }
}
