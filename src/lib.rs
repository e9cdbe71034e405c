#![recursion_limit = "1024"]

#[macro_use]
extern crate serde_derive;

pub mod api;
mod api_types;
mod app;
mod document_item;
mod document_types;
mod documents;
pub mod download;
pub mod download_host;
mod login;

pub use api::{ApiConfig, Session};
pub use app::App;
pub use document_item::DocumentItem;
pub use document_types::{suggested_file_name, DocumentKind, DocumentRef};
pub use documents::Documents;
pub use download::{complete_download, download_document, save_document};
pub use download_host::{BrowserHost, DownloadHost};
pub use login::Login;

use wasm_bindgen::prelude::*;

// When the `wee_alloc` feature is enabled, use `wee_alloc` as the global
// allocator.
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

// This is the entry point for the web app
#[wasm_bindgen]
pub fn run_app() -> Result<(), JsValue> {
    wasm_logger::init(wasm_logger::Config::default());
    yew::start_app::<app::App>();
    Ok(())
}
