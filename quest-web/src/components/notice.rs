use quest_gateway::OperationResult;
use yew::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeTone {
    Success,
    Error,
}

impl NoticeTone {
    const fn class(self) -> &'static str {
        match self {
            Self::Success => "notice notice--success",
            Self::Error => "notice notice--error",
        }
    }
}

/// Transient message describing the last operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub tone: NoticeTone,
    pub text: AttrValue,
}

impl Notice {
    /// Summarise `result` for the user. `action` names what was attempted.
    #[must_use]
    pub fn from_result(action: &str, result: &OperationResult) -> Self {
        match result {
            OperationResult::Success(_) => Self {
                tone: NoticeTone::Success,
                text: result
                    .message()
                    .map_or_else(|| format!("{action}: done"), str::to_string)
                    .into(),
            },
            OperationResult::Failure(message) => Self {
                tone: NoticeTone::Error,
                text: format!("{action} failed: {message}").into(),
            },
        }
    }
}

#[derive(Properties, PartialEq, Clone)]
pub struct NoticeBannerProps {
    #[prop_or_default]
    pub notice: Option<Notice>,
    pub on_dismiss: Callback<()>,
}

#[function_component(NoticeBanner)]
pub fn notice_banner(props: &NoticeBannerProps) -> Html {
    let Some(notice) = props.notice.as_ref() else {
        return Html::default();
    };
    let on_dismiss = {
        let cb = props.on_dismiss.clone();
        Callback::from(move |_: MouseEvent| cb.emit(()))
    };
    let role = if notice.tone == NoticeTone::Error {
        "alert"
    } else {
        "status"
    };
    html! {
        <div class={notice.tone.class()} {role}>
            <span>{ notice.text.clone() }</span>
            <button type="button" class="notice__dismiss" aria-label="Dismiss" onclick={on_dismiss}>{"×"}</button>
        </div>
    }
}
