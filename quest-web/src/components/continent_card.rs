use crate::content::continent_details;
use quest_gateway::Continent;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct ContinentCardProps {
    pub continent: Continent,
    /// Percent complete; `None` while the board has not loaded.
    #[prop_or_default]
    pub progress: Option<f64>,
    pub on_launch: Callback<Continent>,
}

/// Width for the progress bar, rounded to whole percent.
#[must_use]
pub fn progress_width(progress: Option<f64>) -> u8 {
    let value = progress.unwrap_or(0.0);
    if value.is_nan() {
        return 0;
    }
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let rounded = value.clamp(0.0, 100.0).round() as u8;
    rounded
}

#[function_component(ContinentCard)]
pub fn continent_card(props: &ContinentCardProps) -> Html {
    let details = continent_details(props.continent);
    let width = progress_width(props.progress);
    let label = props
        .progress
        .map_or_else(|| String::from("--"), |_| format!("{width}%"));
    let on_click = {
        let cb = props.on_launch.clone();
        let continent = props.continent;
        Callback::from(move |_: MouseEvent| cb.emit(continent))
    };

    html! {
        <article class="continent-card" data-continent={props.continent.id()}>
            <div class="continent-icon" aria-hidden="true">{ details.icon }</div>
            <h3>{ props.continent.display_name() }</h3>
            <p class="continent-description">{ details.description }</p>
            <ul class="continent-challenges">
                { for details.challenges.iter().map(|challenge| html! { <li>{ *challenge }</li> }) }
            </ul>
            <div class="progress-bar" role="progressbar" aria-valuemin="0" aria-valuemax="100" aria-valuenow={width.to_string()}>
                <div class="progress-fill" style={format!("width: {width}%")}></div>
            </div>
            <span class="progress-text">{ label }</span>
            <button type="button" class="launch-btn" onclick={on_click}>
                { format!("Launch {}", props.continent.display_name()) }
            </button>
        </article>
    }
}

#[cfg(test)]
mod tests {
    use super::progress_width;

    #[test]
    fn progress_width_clamps_and_rounds() {
        assert_eq!(progress_width(None), 0);
        assert_eq!(progress_width(Some(42.6)), 43);
        assert_eq!(progress_width(Some(130.0)), 100);
        assert_eq!(progress_width(Some(-3.0)), 0);
        assert_eq!(progress_width(Some(f64::NAN)), 0);
    }
}
