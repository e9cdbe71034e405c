use yew::format::Json;
use yew::prelude::*;
use yew::services::storage::{Area, StorageService};

use std::rc::Rc;

use crate::api::{ApiConfig, Session};
use crate::{Documents, Login};

const LS_SESSION: &str = "kenfuse-session";

pub struct App {
    link: ComponentLink<Self>,
    storage: Option<StorageService>,
    state: State,
}

pub struct State {
    config: Rc<ApiConfig>,
    session: Option<Rc<Session>>,
}

pub enum Msg {
    SetSession(Session),
    SessionExpired,
    SignOut,
}

impl Component for App {
    type Message = Msg;
    type Properties = ();

    fn create(_props: Self::Properties, link: ComponentLink<Self>) -> Self {
        let storage = StorageService::new(Area::Local)
            .map_err(|err| log::warn!("local storage not available: {}", err))
            .ok();
        let session = storage.as_ref().and_then(|storage| {
            if let Json(Ok(restored_session)) = storage.restore(LS_SESSION) {
                Some(Rc::new(restored_session))
            } else {
                None
            }
        });
        let config = Rc::new(ApiConfig::default());
        log::debug!("using API at {}", config.base_url);
        App {
            link,
            storage,
            state: State { config, session },
        }
    }

    fn change(&mut self, _props: Self::Properties) -> ShouldRender {
        false
    }

    fn update(&mut self, msg: Self::Message) -> ShouldRender {
        match msg {
            Msg::SetSession(session) => {
                self.state.session = Some(Rc::new(session));
                if let Some(storage) = self.storage.as_mut() {
                    storage.store(LS_SESSION, Json(&self.state.session.as_deref()));
                }
            }
            // the view drops to the login form once the stored session is past its expiry
            Msg::SessionExpired => {}
            Msg::SignOut => {
                self.state.session = None;
                if let Some(storage) = self.storage.as_mut() {
                    storage.remove(LS_SESSION);
                }
            }
        }
        true
    }

    fn view(&self) -> Html {
        if let Some(session) = self
            .state
            .session
            .as_ref()
            .filter(|s| s.expiration_timeout() > 0)
            .to_owned()
        {
            let onsignout = self.link.callback(|_| Msg::SignOut);
            let onexpired = self.link.callback(|_| Msg::SessionExpired);
            html! {
                <main>
                    <Documents
                        config=self.state.config.clone()
                        session=session
                        onsignout=onsignout
                        onexpired=onexpired
                    />
                </main>
            }
        } else {
            let onlogin = self.link.callback(Msg::SetSession);
            html! {
                <main>
                    <Login config=self.state.config.clone() session=self.state.session.clone() onlogin=onlogin />
                </main>
            }
        }
    }
}
