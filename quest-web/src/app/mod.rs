use crate::pages::landing::LandingPage;
use quest_gateway::{BackendGateway, Continent, Difficulty, GatewayConfig};
use std::ops::Deref;
use std::rc::Rc;
use yew::platform::spawn_local;
use yew::prelude::*;

pub mod actions;
pub mod state;

/// Shared gateway handed to components through context.
#[derive(Clone)]
pub struct GatewayHandle(Rc<BackendGateway>);

impl GatewayHandle {
    #[must_use]
    pub fn connect(config: &GatewayConfig) -> Self {
        Self(Rc::new(crate::host::connect_gateway(config)))
    }
}

impl PartialEq for GatewayHandle {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Deref for GatewayHandle {
    type Target = BackendGateway;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

#[function_component(App)]
pub fn app() -> Html {
    let gateway = use_memo((), |_| {
        GatewayHandle::connect(&GatewayConfig::default_config())
    });
    html! {
        <ContextProvider<GatewayHandle> context={(*gateway).clone()}>
            <Landing />
        </ContextProvider<GatewayHandle>>
    }
}

#[function_component(Landing)]
fn landing() -> Html {
    let gateway = use_context::<GatewayHandle>();
    let state = state::use_landing_state();

    {
        let gateway = gateway.clone();
        let state = state.clone();
        use_effect_with((), move |_| {
            if let Some(gateway) = gateway {
                spawn_local(async move {
                    let dashboard = actions::load_dashboard(&gateway).await;
                    state.status.set(dashboard.status);
                    state.board.set(dashboard.board);
                    if dashboard.notice.is_some() {
                        state.notice.set(dashboard.notice);
                    }
                });
            }
            || {}
        });
    }

    let Some(gateway) = gateway else {
        log::error!("landing page rendered without a gateway");
        return html! { <p class="notice notice--error">{ "Backend gateway unavailable" }</p> };
    };

    let on_launch = {
        let gateway = gateway.clone();
        let notice = state.notice.clone();
        Callback::from(move |continent: Continent| {
            let gateway = gateway.clone();
            let notice = notice.clone();
            spawn_local(async move {
                notice.set(Some(actions::launch(&gateway, continent).await));
            });
        })
    };
    let on_begin = {
        let picker_open = state.picker_open.clone();
        Callback::from(move |()| picker_open.set(true))
    };
    let on_close_picker = {
        let picker_open = state.picker_open.clone();
        Callback::from(move |()| picker_open.set(false))
    };
    let on_pick = {
        let gateway = gateway.clone();
        let state = state.clone();
        Callback::from(move |difficulty: Difficulty| {
            let gateway = gateway.clone();
            let state = state.clone();
            state.busy.set(true);
            spawn_local(async move {
                let notice = actions::begin_journey(&gateway, difficulty).await;
                state.busy.set(false);
                state.picker_open.set(false);
                state.notice.set(Some(notice));
            });
        })
    };
    let on_dismiss = {
        let notice = state.notice.clone();
        Callback::from(move |()| notice.set(None))
    };

    html! {
        <LandingPage
            transport={gateway.kind().label()}
            status={(*state.status).clone()}
            board={(*state.board).clone()}
            notice={(*state.notice).clone()}
            picker_open={*state.picker_open}
            busy={*state.busy}
            {on_launch}
            {on_begin}
            {on_pick}
            {on_close_picker}
            {on_dismiss}
        />
    }
}
