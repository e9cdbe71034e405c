use crate::api::{self, ApiConfig, Session};
use crate::api_types::{MemorialList, WillList};
use crate::document_types::DocumentRef;
use crate::DocumentItem;

use anyhow::Error;
use http::Response;
use yew::services::fetch::{FetchService, FetchTask};
use yew::services::{interval::IntervalTask, IntervalService, Task};
use yew::{format::Json, html::Html, prelude::*, Properties};

use std::{rc::Rc, time::Duration};

pub struct Documents {
    link: ComponentLink<Self>,
    props: Props,
    state: State,
    fetch_tasks: Vec<FetchTask>,
    _interval_task: IntervalTask,
}

#[derive(Clone, PartialEq, Properties)]
pub struct Props {
    pub config: Rc<ApiConfig>,
    pub session: Rc<Session>,
    pub onsignout: Callback<()>,
    pub onexpired: Callback<()>,
}

pub struct State {
    memorials: Vec<Rc<DocumentRef>>,
    wills: Vec<Rc<DocumentRef>>,
    last_download: Option<(Rc<DocumentRef>, bool)>,
    error_message: Option<String>,
}

pub enum Msg {
    MemorialsLoaded(Vec<DocumentRef>),
    WillsLoaded(Vec<DocumentRef>),
    Downloaded(Rc<DocumentRef>, bool),
    SignOut,
    Tick,
    SetError(String),
}

impl Component for Documents {
    type Message = Msg;
    type Properties = Props;

    fn create(props: Self::Properties, link: ComponentLink<Self>) -> Self {
        let _interval_task =
            IntervalService::spawn(Duration::from_secs(60), link.callback(|_| Msg::Tick));
        let mut documents = Documents {
            link,
            props,
            state: State {
                memorials: Vec::new(),
                wills: Vec::new(),
                last_download: None,
                error_message: None,
            },
            fetch_tasks: Vec::new(),
            _interval_task,
        };
        documents.get_memorials();
        documents.get_wills();
        documents
    }

    fn update(&mut self, msg: Self::Message) -> ShouldRender {
        self.fetch_tasks.retain(|task| task.is_active());
        match msg {
            Msg::MemorialsLoaded(memorials) => {
                self.state.memorials = memorials.into_iter().map(Rc::new).collect();
            }
            Msg::WillsLoaded(wills) => {
                self.state.wills = wills.into_iter().map(Rc::new).collect();
            }
            Msg::Downloaded(document, success) => {
                self.state.last_download = Some((document, success));
            }
            Msg::SignOut => {
                self.props.onsignout.emit(());
            }
            Msg::Tick => {
                let now = js_sys::Date::now() as i64;
                if self.props.session.is_expired_at(now) {
                    log::info!("session of {} expired", self.props.session.email);
                    self.props.onexpired.emit(());
                }
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
        let ondownloaded = self
            .link
            .callback(|(document, success)| Msg::Downloaded(document, success));
        let onclick_sign_out = self.link.callback(|_| Msg::SignOut);

        let render_error_message = if let Some(error_message) = self.state.error_message.as_ref() {
            html! {<div class="error">{error_message}</div>}
        } else {
            html! {}
        };

        let render_is_loading = if self.fetch_tasks.iter().any(FetchTask::is_active) {
            html! {<div class="inline lds-dual-ring"/>}
        } else {
            html! {}
        };

        let render_message = match self.state.last_download.as_ref() {
            Some((document, true)) => {
                html! {<div class="inline success">{format!("✔ Downloaded {}", document.file_name())}</div>}
            }
            Some((document, false)) => {
                html! {<div class="error">{format!("Could not download \"{}\", please try again", document.title)}</div>}
            }
            None => html! {},
        };

        html! {
            <div>
                {render_error_message}
                {render_is_loading}
                <table>
                    <thead>
                        <tr>
                            <th>{"Type"}</th>
                            <th>{"Title"}</th>
                            <th>{"PDF"}</th>
                        </tr>
                    </thead>
                    <tbody>
                        {
                            for self.state.memorials.iter().chain(self.state.wills.iter()).cloned().map(|document| {
                                html! {
                                    <DocumentItem
                                        config=self.props.config.clone()
                                        session=self.props.session.clone()
                                        document=document
                                        ondownloaded=ondownloaded.clone()
                                    />
                                }
                            })
                        }
                    </tbody>
                </table>
                <br/>
                {render_message}
                <br/>
                <div class="status">
                    {format!(
                        "Signed in as {}, your session will expire in {} minutes",
                        self.props.session.email,
                        self.props.session.expiration_timeout() / 1_000 / 60
                    )}
                    <button onclick=onclick_sign_out>{"Sign out"}</button>
                </div>
            </div>
        }
    }
}

impl Documents {
    fn get_memorials(&mut self) {
        let request = match api::memorials_request(&self.props.config, &self.props.session) {
            Ok(request) => request,
            Err(err) => {
                log::error!("failed to build memorials request: {:?}", err);
                return;
            }
        };

        if let Ok(task) = FetchService::fetch(
            request,
            self.link.callback(
                move |response: Response<Json<Result<MemorialList, Error>>>| {
                    if let (meta, Json(Ok(list))) = response.into_parts() {
                        if meta.status.is_success() {
                            let memorials = list.memorials.into_iter().map(Into::into).collect();
                            return Msg::MemorialsLoaded(memorials);
                        }
                    }
                    Msg::SetError("Request failed: get memorials".to_string())
                },
            ),
        ) {
            self.fetch_tasks.push(task);
        }
    }

    fn get_wills(&mut self) {
        let request = match api::wills_request(&self.props.config, &self.props.session) {
            Ok(request) => request,
            Err(err) => {
                log::error!("failed to build wills request: {:?}", err);
                return;
            }
        };

        if let Ok(task) = FetchService::fetch(
            request,
            self.link.callback(
                move |response: Response<Json<Result<WillList, Error>>>| {
                    if let (meta, Json(Ok(list))) = response.into_parts() {
                        if meta.status.is_success() {
                            log::debug!("loaded {} wills", list.count);
                            let wills = list.into_documents();
                            return Msg::WillsLoaded(wills);
                        }
                    }
                    Msg::SetError("Request failed: get wills".to_string())
                },
            ),
        ) {
            self.fetch_tasks.push(task);
        }
    }
}
