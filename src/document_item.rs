use crate::api::{ApiConfig, Session};
use crate::document_types::DocumentRef;
use crate::download::download_document;

use yew::services::fetch::FetchTask;
use yew::{html::Html, prelude::*, services::Task, Properties};

use std::rc::Rc;

pub struct DocumentItem {
    link: ComponentLink<Self>,
    props: Props,
    fetch_task: Option<FetchTask>,
}

#[derive(Clone, PartialEq, Properties)]
pub struct Props {
    pub config: Rc<ApiConfig>,
    pub session: Rc<Session>,
    pub document: Rc<DocumentRef>,
    pub ondownloaded: Callback<(Rc<DocumentRef>, bool)>,
}

pub enum Msg {
    Download,
    Downloaded(bool),
}

impl Component for DocumentItem {
    type Message = Msg;
    type Properties = Props;

    fn create(props: Self::Properties, link: ComponentLink<Self>) -> Self {
        DocumentItem {
            link,
            props,
            fetch_task: None,
        }
    }

    fn update(&mut self, msg: Self::Message) -> ShouldRender {
        match msg {
            Msg::Download => {
                // a single request per row
                if !self.is_downloading() {
                    let ondone = self.link.callback(Msg::Downloaded);
                    self.fetch_task = download_document(
                        &self.props.config,
                        &self.props.session,
                        &self.props.document,
                        ondone,
                    );
                }
            }
            Msg::Downloaded(success) => {
                self.fetch_task = None;
                self.props
                    .ondownloaded
                    .emit((self.props.document.clone(), success));
            }
        }
        true
    }

    fn change(&mut self, props: Self::Properties) -> ShouldRender {
        self.props = props;
        true
    }

    fn view(&self) -> Html {
        let document = &self.props.document;
        let onclick_download = self.link.callback(|_| Msg::Download);

        html! {
            <tr>
                <td>{document.kind.label()}</td>
                <td>{&document.title}</td>
                <td>
                    <button onclick=onclick_download disabled=self.is_downloading()>
                        {"Download PDF"}
                    </button>
                    {
                        if self.is_downloading() {
                            html! {<div class="inline lds-dual-ring"/>}
                        } else {
                            html! {}
                        }
                    }
                </td>
            </tr>
        }
    }
}

impl DocumentItem {
    fn is_downloading(&self) -> bool {
        self.fetch_task
            .as_ref()
            .map_or(false, |task| task.is_active())
    }
}
