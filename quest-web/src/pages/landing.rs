use crate::components::continent_card::ContinentCard;
use crate::components::difficulty_picker::DifficultyPicker;
use crate::components::footer::{ConnectionStatus, Footer};
use crate::components::modal::Modal;
use crate::components::notice::{Notice, NoticeBanner};
use quest_gateway::{Continent, Difficulty, ProgressBoard};
use yew::prelude::*;

#[derive(Properties, Clone, PartialEq)]
pub struct LandingPageProps {
    pub transport: AttrValue,
    pub status: ConnectionStatus,
    #[prop_or_default]
    pub board: ProgressBoard,
    #[prop_or_default]
    pub notice: Option<Notice>,
    #[prop_or_default]
    pub picker_open: bool,
    #[prop_or_default]
    pub busy: bool,
    pub on_launch: Callback<Continent>,
    pub on_begin: Callback<()>,
    pub on_pick: Callback<Difficulty>,
    pub on_close_picker: Callback<()>,
    pub on_dismiss: Callback<()>,
}

/// Mean completion across the continents the board knows about.
#[must_use]
pub fn overall_progress(board: &ProgressBoard) -> Option<u8> {
    if board.is_empty() {
        return None;
    }
    let total: f64 = board.iter().map(|(_, value)| value).sum();
    #[allow(
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss
    )]
    let mean = (total / board.len() as f64).clamp(0.0, 100.0).round() as u8;
    Some(mean)
}

#[function_component(LandingPage)]
pub fn landing_page(props: &LandingPageProps) -> Html {
    let on_begin = {
        let cb = props.on_begin.clone();
        Callback::from(move |_: MouseEvent| cb.emit(()))
    };
    let summary = overall_progress(&props.board).map_or_else(
        || String::from("Progress loading…"),
        |mean| format!("World progress: {mean}%"),
    );

    html! {
        <div class="landing" data-testid="landing-screen">
            <NoticeBanner notice={props.notice.clone()} on_dismiss={props.on_dismiss.clone()} />
            <section id="home" class="hero">
                <h1 class="hero-title">{ "🌍 Continental Quest 🌍" }</h1>
                <p class="hero-subtitle">{ "Explore seven continents on an interactive 3D globe" }</p>
                <button type="button" class="cta-button" onclick={on_begin} disabled={props.busy}>
                    { "Start Adventure" }
                </button>
                <p class="hero-progress">{ summary }</p>
            </section>
            <section id="continents" class="continents">
                <h2 class="section-title">{ "Choose Your Continent" }</h2>
                <div class="continent-grid">
                    { for Continent::ALL.into_iter().map(|continent| html! {
                        <ContinentCard
                            key={continent.id()}
                            {continent}
                            progress={props.board.get(continent)}
                            on_launch={props.on_launch.clone()}
                        />
                    }) }
                </div>
            </section>
            <Modal
                open={props.picker_open}
                title="Select Your Challenge Level"
                on_close={props.on_close_picker.clone()}
            >
                <DifficultyPicker on_pick={props.on_pick.clone()} busy={props.busy} />
            </Modal>
            <Footer status={props.status.clone()} transport={props.transport.clone()} />
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::overall_progress;
    use quest_gateway::ProgressBoard;
    use serde_json::json;

    #[test]
    fn overall_progress_averages_known_entries() {
        assert_eq!(overall_progress(&ProgressBoard::default()), None);
        let board = ProgressBoard::from_payload(&json!({ "europe": 85, "asia": 55 }));
        assert_eq!(overall_progress(&board), Some(70));
    }
}
