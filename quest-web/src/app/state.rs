use crate::components::footer::ConnectionStatus;
use crate::components::notice::Notice;
use quest_gateway::ProgressBoard;
use yew::prelude::*;

#[derive(Clone)]
pub struct LandingState {
    pub status: UseStateHandle<ConnectionStatus>,
    pub board: UseStateHandle<ProgressBoard>,
    pub notice: UseStateHandle<Option<Notice>>,
    pub picker_open: UseStateHandle<bool>,
    pub busy: UseStateHandle<bool>,
}

#[hook]
pub fn use_landing_state() -> LandingState {
    LandingState {
        status: use_state(ConnectionStatus::default),
        board: use_state(ProgressBoard::default),
        notice: use_state(|| None::<Notice>),
        picker_open: use_state(|| false),
        busy: use_state(|| false),
    }
}
