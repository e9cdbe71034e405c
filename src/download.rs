use crate::api::{self, ApiConfig, Session};
use crate::document_types::{DocumentRef, PDF_CONTENT_TYPE};
use crate::download_host::{BrowserHost, DownloadHost};

use anyhow::Error;
use http::Response;
use yew::format::Binary;
use yew::services::fetch::{FetchService, FetchTask};
use yew::Callback;

/// Saves `bytes` through the host as `file_name`.
///
/// The object URL is revoked and the anchor detached before returning, also
/// when a later step fails.
pub fn save_document<H: DownloadHost>(
    host: &H,
    bytes: &[u8],
    file_name: &str,
) -> Result<(), Error> {
    let url = host.create_object_url(bytes, PDF_CONTENT_TYPE)?;
    let result = click_link(host, &url, file_name);
    let revoked = host.revoke_object_url(&url);
    result.and(revoked)
}

fn click_link<H: DownloadHost>(host: &H, url: &str, file_name: &str) -> Result<(), Error> {
    let anchor = host.create_anchor(url, file_name)?;
    host.attach(&anchor)?;
    host.activate(&anchor);
    host.detach(&anchor)
}

/// Turns a fetch outcome into the boolean download result. Any failure is
/// logged and reported as `false`.
pub fn complete_download<H: DownloadHost>(
    host: Result<H, Error>,
    fetched: Result<Vec<u8>, Error>,
    file_name: &str,
) -> bool {
    let outcome = fetched.and_then(|bytes| {
        let host = host?;
        save_document(&host, &bytes, file_name)?;
        Ok(bytes.len())
    });
    match outcome {
        Ok(size) => {
            log::info!("downloaded {} ({} bytes)", file_name, size);
            true
        }
        Err(err) => {
            log::error!("Error downloading PDF {}: {:?}", file_name, err);
            false
        }
    }
}

/// Fetches `document` from the API and saves it in the browser.
///
/// `ondone` receives `true` once the file has been handed to the browser and
/// `false` on any failure. The returned task must be kept alive until then;
/// dropping it aborts the request.
pub fn download_document(
    config: &ApiConfig,
    session: &Session,
    document: &DocumentRef,
    ondone: Callback<bool>,
) -> Option<FetchTask> {
    let file_name = document.file_name();
    log::debug!("fetching {} {} as {}", document.kind, document.id, file_name);

    let request = match api::document_pdf_request(config, session, document.kind, document.id) {
        Ok(request) => request,
        Err(err) => {
            log::error!("Error downloading PDF {}: {:?}", file_name, err);
            ondone.emit(false);
            return None;
        }
    };

    let callback = Callback::from({
        let ondone = ondone.clone();
        move |response: Response<Binary>| {
            let fetched = api::fetched_body(response);
            ondone.emit(complete_download(BrowserHost::new(), fetched, &file_name));
        }
    });

    match FetchService::fetch_binary(request, callback) {
        Ok(task) => Some(task),
        Err(err) => {
            log::error!("Error downloading PDF {}: {:?}", document.file_name(), err);
            ondone.emit(false);
            None
        }
    }
}
