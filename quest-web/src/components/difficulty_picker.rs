use crate::content::difficulty_icon;
use quest_gateway::Difficulty;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct DifficultyPickerProps {
    pub on_pick: Callback<Difficulty>,
    /// Disables every option while a start request is in flight.
    #[prop_or_default]
    pub busy: bool,
}

#[function_component(DifficultyPicker)]
pub fn difficulty_picker(props: &DifficultyPickerProps) -> Html {
    html! {
        <div class="difficulty-options" role="group" aria-label="Challenge level">
            { for Difficulty::ALL.into_iter().map(|difficulty| {
                let cb = props.on_pick.clone();
                let onclick = Callback::from(move |_: MouseEvent| cb.emit(difficulty));
                html! {
                    <button
                        type="button"
                        class={classes!("difficulty-btn", difficulty.id())}
                        data-difficulty={difficulty.id()}
                        disabled={props.busy}
                        {onclick}
                    >
                        <span class="difficulty-icon" aria-hidden="true">{ difficulty_icon(difficulty) }</span>
                        <span class="difficulty-name">{ difficulty.title() }</span>
                        <span class="difficulty-desc">{ difficulty.blurb() }</span>
                    </button>
                }
            }) }
        </div>
    }
}
