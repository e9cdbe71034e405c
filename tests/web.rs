//! Browser tests for the web-sys download host. Run with `wasm-pack test --headless --firefox`.

#![cfg(target_arch = "wasm32")]

use kenfuse_documents::{complete_download, save_document, BrowserHost, DownloadHost};
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn anchor_count() -> u32 {
    web_sys::window()
        .unwrap()
        .document()
        .unwrap()
        .query_selector_all("a[download]")
        .unwrap()
        .length()
}

#[wasm_bindgen_test]
fn object_url_is_a_blob_url() {
    let host = BrowserHost::new().unwrap();
    let url = host
        .create_object_url(b"%PDF-1.4", "application/pdf")
        .unwrap();
    assert!(url.starts_with("blob:"));
    host.revoke_object_url(&url).unwrap();
}

#[wasm_bindgen_test]
fn anchor_is_hidden_and_named() {
    let host = BrowserHost::new().unwrap();
    let anchor = host
        .create_anchor("blob:null/test", "will_John_Doe.pdf")
        .unwrap();
    assert_eq!("will_John_Doe.pdf", anchor.download());
    assert_eq!("none", anchor.style().get_property_value("display").unwrap());
    assert!(anchor.parent_node().is_none());
}

#[wasm_bindgen_test]
fn save_leaves_no_anchor_behind() {
    let before = anchor_count();
    let host = BrowserHost::new().unwrap();
    save_document(&host, b"%PDF-1.4", "memorial_John_Doe.pdf").unwrap();
    assert_eq!(before, anchor_count());
}

#[wasm_bindgen_test]
fn failed_fetch_reports_false() {
    let before = anchor_count();
    let fetched = Err(anyhow::anyhow!("request failed with status 500"));
    assert!(!complete_download(BrowserHost::new(), fetched, "will_x.pdf"));
    assert_eq!(before, anchor_count());
}

#[wasm_bindgen_test]
fn attached_anchor_lives_in_body() {
    let host = BrowserHost::new().unwrap();
    let anchor = host.create_anchor("blob:null/test", "memorial_A.pdf").unwrap();
    host.attach(&anchor).unwrap();
    let parent = anchor.parent_node().unwrap();
    assert!(parent.dyn_ref::<web_sys::HtmlElement>().is_some());
    host.detach(&anchor).unwrap();
    assert!(anchor.parent_node().is_none());
}
