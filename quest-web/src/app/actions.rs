//! Gateway round trips behind the landing page's buttons.
//!
//! Kept free of Yew state so they can be driven directly in tests.
use crate::components::footer::ConnectionStatus;
use crate::components::notice::Notice;
use quest_gateway::{
    BackendGateway, Continent, Difficulty, OperationResult, ProgressBoard, StartOptions,
};
use serde_json::Value;

/// What the page shows once the initial checks complete.
#[derive(Debug, Clone, PartialEq)]
pub struct Dashboard {
    pub status: ConnectionStatus,
    pub board: ProgressBoard,
    pub notice: Option<Notice>,
}

pub async fn load_dashboard(gateway: &BackendGateway) -> Dashboard {
    let status = match gateway.test_connection().await {
        OperationResult::Success(_) => ConnectionStatus::Online,
        OperationResult::Failure(reason) => ConnectionStatus::Offline(reason.into()),
    };
    let progress = gateway.get_progress(None).await;
    let (board, notice) = match progress.payload() {
        Some(payload) => (ProgressBoard::from_payload(payload), None),
        None => (
            ProgressBoard::default(),
            Some(Notice::from_result("Loading progress", &progress)),
        ),
    };
    Dashboard {
        status,
        board,
        notice,
    }
}

pub async fn launch(gateway: &BackendGateway, continent: Continent) -> Notice {
    let result = gateway.launch_continent(continent).await;
    Notice::from_result(&format!("Launch {}", continent.display_name()), &result)
}

/// Record the difficulty, then start the globe with it.
pub async fn begin_journey(gateway: &BackendGateway, difficulty: Difficulty) -> Notice {
    let level = gateway.set_difficulty(difficulty).await;
    if !level.is_success() {
        return Notice::from_result("Set difficulty", &level);
    }
    let mut options = StartOptions::new();
    options.insert(
        "difficulty".into(),
        Value::String(difficulty.id().to_string()),
    );
    let started = gateway.start_game(Some(options)).await;
    Notice::from_result("Start", &started)
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;
    use crate::components::notice::NoticeTone;
    use futures::executor::block_on;
    use quest_gateway::GatewayConfig;

    fn gateway() -> BackendGateway {
        crate::host::connect_gateway(&GatewayConfig::default().with_mock_seed(5))
    }

    #[test]
    fn dashboard_loads_full_board_from_mock() {
        let dashboard = block_on(load_dashboard(&gateway()));
        assert_eq!(dashboard.status, ConnectionStatus::Online);
        assert!(dashboard.board.is_complete());
        assert!(dashboard.notice.is_none());
    }

    #[test]
    fn launch_and_start_report_success() {
        let gateway = gateway();
        let launched = block_on(launch(&gateway, Continent::Antarctica));
        assert_eq!(launched.tone, NoticeTone::Success);
        assert_eq!(launched.text.as_str(), "Mock: Would launch antarctica");

        let started = block_on(begin_journey(&gateway, Difficulty::Extreme));
        assert_eq!(started.text.as_str(), "Mock: Game would start now");
    }
}
