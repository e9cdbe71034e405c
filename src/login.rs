use anyhow::Error;
use http::Response;
use if_chain::if_chain;
use yew::services::fetch::{FetchService, FetchTask};
use yew::{format::Json, html::Html, prelude::*, services::Task, Properties};

use std::rc::Rc;

use crate::api::{self, ApiConfig, Session};
use crate::api_types::{ApiError, LoginRequest, LoginResponse};

pub struct Login {
    link: ComponentLink<Self>,
    props: Props,
    state: State,
    fetch_task: Option<FetchTask>,
}

#[derive(Clone, PartialEq, Properties)]
pub struct Props {
    pub config: Rc<ApiConfig>,
    pub session: Option<Rc<Session>>,
    pub onlogin: Callback<Session>,
}

#[derive(Default)]
pub struct State {
    email: String,
    password: String,
    error_message: Option<String>,
}

pub enum Msg {
    SetEmail(String),
    SetPassword(String),
    Submit,
    LoggedIn(LoginResponse),
    SetError(String),
}

impl Component for Login {
    type Message = Msg;
    type Properties = Props;

    fn create(props: Self::Properties, link: ComponentLink<Self>) -> Self {
        let email = props
            .session
            .as_ref()
            .map(|session| session.email.clone())
            .unwrap_or_default();
        Login {
            link,
            props,
            state: State {
                email,
                ..Default::default()
            },
            fetch_task: None,
        }
    }

    fn update(&mut self, msg: Self::Message) -> ShouldRender {
        match msg {
            Msg::SetEmail(email) => self.state.email = email,
            Msg::SetPassword(password) => self.state.password = password,
            Msg::Submit => self.login(),
            Msg::LoggedIn(response) => {
                self.state.error_message = None;
                self.state.password.clear();
                let now = js_sys::Date::now() as i64;
                log::info!("signed in as {}", response.user.email);
                self.props.onlogin.emit(Session::new(
                    response.user.email,
                    response.access_token,
                    now,
                ));
            }
            Msg::SetError(error_message) => {
                self.state.error_message = Some(error_message);
            }
        }
        true
    }

    fn change(&mut self, props: Self::Properties) -> ShouldRender {
        self.props = props;
        true
    }

    fn view(&self) -> Html {
        let render_error_message = if let Some(error) = self.state.error_message.as_ref() {
            html! {<div class="error">{error}</div>}
        } else {
            html! {}
        };

        let render_expired = if self.props.session.is_some() {
            html! {<div>{"Your session has expired, please sign in again"}</div>}
        } else {
            html! {}
        };

        let is_submitting = self
            .fetch_task
            .as_ref()
            .map_or(false, |task| task.is_active());

        let oninput_email = self.link.callback(|e: InputData| Msg::SetEmail(e.value));
        let oninput_password = self.link.callback(|e: InputData| Msg::SetPassword(e.value));
        let onclick_submit = self.link.callback(|_| Msg::Submit);

        html! {
            <div>
                {render_error_message}
                {render_expired}
                <div>
                    <span class="form">{"Email:"}</span>
                    <input class="inline" type="email" value=&self.state.email oninput=oninput_email/>
                </div>
                <div>
                    <span class="form">{"Password:"}</span>
                    <input class="inline" type="password" value=&self.state.password oninput=oninput_password/>
                </div>
                <br/>
                <div>
                    <button
                        class="main"
                        onclick=onclick_submit
                        disabled=is_submitting || self.state.email.is_empty() || self.state.password.is_empty()
                    >
                        {"Sign in"}
                    </button>
                    {
                        if is_submitting {
                            html! {<div class="inline lds-dual-ring"/>}
                        } else {
                            html! {}
                        }
                    }
                </div>
            </div>
        }
    }
}

impl Login {
    fn login(&mut self) {
        let credentials = LoginRequest {
            email: self.state.email.trim().to_string(),
            password: self.state.password.clone(),
        };

        let request = match api::login_request(&self.props.config, &credentials) {
            Ok(request) => request,
            Err(err) => {
                log::error!("failed to build login request: {:?}", err);
                self.state.error_message = Some("Sign in failed".to_string());
                return;
            }
        };

        let callback = self.link.callback(
            move |response: Response<Json<Result<serde_json::Value, Error>>>| {
                let (meta, Json(body)) = response.into_parts();
                if_chain! {
                    if meta.status.is_success();
                    if let Ok(body) = body.as_ref();
                    if let Ok(login) = serde_json::from_value::<LoginResponse>(body.clone());
                    then {
                        return Msg::LoggedIn(login);
                    }
                }
                let reason = body
                    .ok()
                    .and_then(|body| serde_json::from_value::<ApiError>(body).ok())
                    .map(|api_error| api_error.error)
                    .unwrap_or_else(|| format!("status {}", meta.status));
                log::warn!("sign in failed: {}", reason);
                Msg::SetError(format!("Sign in failed: {}", reason))
            },
        );

        match FetchService::fetch(request, callback) {
            Ok(task) => self.fetch_task = Some(task),
            Err(err) => {
                log::error!("failed to start login request: {:?}", err);
                self.state.error_message = Some("Sign in failed".to_string());
            }
        }
    }
}
