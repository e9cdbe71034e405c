use anyhow::{anyhow, Error};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Blob, BlobPropertyBag, Document, HtmlAnchorElement, HtmlElement, Url};

/// The primitives a host must provide to save a byte buffer as a named file.
pub trait DownloadHost {
    type Anchor;

    /// Wraps `bytes` into a blob of `content_type` and mints an object URL for it.
    fn create_object_url(&self, bytes: &[u8], content_type: &str) -> Result<String, Error>;

    fn revoke_object_url(&self, url: &str) -> Result<(), Error>;

    /// Creates a detached, invisible anchor pointing at `href` that saves as `file_name`.
    fn create_anchor(&self, href: &str, file_name: &str) -> Result<Self::Anchor, Error>;

    fn attach(&self, anchor: &Self::Anchor) -> Result<(), Error>;

    fn activate(&self, anchor: &Self::Anchor);

    fn detach(&self, anchor: &Self::Anchor) -> Result<(), Error>;
}

pub struct BrowserHost {
    document: Document,
    body: HtmlElement,
}

impl BrowserHost {
    pub fn new() -> Result<BrowserHost, Error> {
        let window = web_sys::window().ok_or_else(|| anyhow!("window not available"))?;
        let document = window
            .document()
            .ok_or_else(|| anyhow!("document not available"))?;
        let body = document
            .body()
            .ok_or_else(|| anyhow!("document body not available"))?;
        Ok(BrowserHost { document, body })
    }
}

impl DownloadHost for BrowserHost {
    type Anchor = HtmlAnchorElement;

    fn create_object_url(&self, bytes: &[u8], content_type: &str) -> Result<String, Error> {
        let parts = js_sys::Array::new();
        parts.push(&js_sys::Uint8Array::from(bytes));
        let mut options = BlobPropertyBag::new();
        options.type_(content_type);
        let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &options)
            .map_err(js_error)?;
        Url::create_object_url_with_blob(&blob).map_err(js_error)
    }

    fn revoke_object_url(&self, url: &str) -> Result<(), Error> {
        Url::revoke_object_url(url).map_err(js_error)
    }

    fn create_anchor(&self, href: &str, file_name: &str) -> Result<HtmlAnchorElement, Error> {
        let anchor = self
            .document
            .create_element("a")
            .map_err(js_error)?
            .dyn_into::<HtmlAnchorElement>()
            .map_err(|_| anyhow!("created element is not an anchor"))?;
        anchor.set_href(href);
        anchor.set_download(file_name);
        anchor
            .style()
            .set_property("display", "none")
            .map_err(js_error)?;
        Ok(anchor)
    }

    fn attach(&self, anchor: &HtmlAnchorElement) -> Result<(), Error> {
        self.body.append_child(anchor).map_err(js_error)?;
        Ok(())
    }

    fn activate(&self, anchor: &HtmlAnchorElement) {
        anchor.click();
    }

    fn detach(&self, anchor: &HtmlAnchorElement) -> Result<(), Error> {
        self.body.remove_child(anchor).map_err(js_error)?;
        Ok(())
    }
}

fn js_error(value: JsValue) -> Error {
    match value.as_string() {
        Some(message) => anyhow!(message),
        None => anyhow!("{:?}", value),
    }
}
