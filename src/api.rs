use crate::api_types::LoginRequest;
use crate::document_types::{DocumentKind, PDF_CONTENT_TYPE};

use anyhow::{anyhow, Error};
use dotenv_codegen::dotenv;
use http::{Request, Response};
use yew::format::{Binary, Json, Nothing};

/// Access tokens issued by `/auth/login` expire after one hour.
pub const SESSION_LIFETIME_MS: i64 = 60 * 60 * 1_000;

#[derive(Debug, Clone, PartialEq)]
pub struct ApiConfig {
    pub base_url: String,
}

impl ApiConfig {
    pub fn new(base_url: impl Into<String>) -> ApiConfig {
        let base_url = base_url.into();
        ApiConfig {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl Default for ApiConfig {
    fn default() -> ApiConfig {
        ApiConfig::new(dotenv!("API_BASE_URL"))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub email: String,
    pub access_token: String,
    pub expiration_ts: i64,
}

impl Session {
    pub fn new(email: String, access_token: String, now: i64) -> Session {
        Session {
            email,
            access_token,
            expiration_ts: now + SESSION_LIFETIME_MS,
        }
    }

    pub fn expiration_timeout(&self) -> i64 {
        let now = js_sys::Date::now() as i64;
        self.remaining_at(now)
    }

    pub fn remaining_at(&self, now: i64) -> i64 {
        self.expiration_ts - now
    }

    pub fn is_expired_at(&self, now: i64) -> bool {
        self.remaining_at(now) <= 0
    }

    fn bearer(&self) -> String {
        format!("Bearer {}", self.access_token)
    }
}

pub fn document_pdf_request(
    config: &ApiConfig,
    session: &Session,
    kind: DocumentKind,
    id: i64,
) -> Result<Request<Nothing>, Error> {
    let request = Request::get(config.url(&kind.endpoint(id)))
        .header("Authorization", session.bearer())
        .header("Accept", PDF_CONTENT_TYPE)
        .body(Nothing)?;
    Ok(request)
}

pub fn login_request<'a>(
    config: &ApiConfig,
    credentials: &'a LoginRequest,
) -> Result<Request<Json<&'a LoginRequest>>, Error> {
    let request = Request::post(config.url("/auth/login"))
        .header("Content-Type", "application/json")
        .body(Json(credentials))?;
    Ok(request)
}

pub fn wills_request(config: &ApiConfig, session: &Session) -> Result<Request<Nothing>, Error> {
    let request = Request::get(config.url("/wills/"))
        .header("Authorization", session.bearer())
        .body(Nothing)?;
    Ok(request)
}

pub fn memorials_request(config: &ApiConfig, session: &Session) -> Result<Request<Nothing>, Error> {
    let request = Request::get(config.url("/memorials"))
        .header("Authorization", session.bearer())
        .body(Nothing)?;
    Ok(request)
}

/// Unwraps a binary response body, treating any non-2xx status as a failure.
pub fn fetched_body(response: Response<Binary>) -> Result<Vec<u8>, Error> {
    let (meta, body) = response.into_parts();
    if !meta.status.is_success() {
        return Err(anyhow!("request failed with status {}", meta.status));
    }
    body
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    fn session() -> Session {
        Session::new("jane@example.com".to_string(), "tok".to_string(), 1_000)
    }

    #[wasm_bindgen_test]
    fn config_trims_trailing_slash() {
        let config = ApiConfig::new("http://localhost:5000/api/");
        assert_eq!(
            "http://localhost:5000/api/memorials/1/pdf",
            config.url(&DocumentKind::Memorial.endpoint(1))
        );
    }

    #[wasm_bindgen_test]
    fn pdf_request_carries_bearer_token() {
        let config = ApiConfig::new("https://api.kenfuse.com/api");
        let request = document_pdf_request(&config, &session(), DocumentKind::Will, 12).unwrap();
        assert_eq!(
            "https://api.kenfuse.com/api/wills/12/export-pdf",
            request.uri().to_string()
        );
        assert_eq!("Bearer tok", request.headers()["Authorization"]);
        assert_eq!(PDF_CONTENT_TYPE, request.headers()["Accept"]);
    }

    #[wasm_bindgen_test]
    fn login_request_is_json_post() {
        let config = ApiConfig::new("https://api.kenfuse.com/api");
        let credentials = LoginRequest {
            email: "jane@example.com".to_string(),
            password: "secret".to_string(),
        };
        let request = login_request(&config, &credentials).unwrap();
        assert_eq!(http::Method::POST, request.method());
        assert_eq!("application/json", request.headers()["Content-Type"]);
        assert!(request.headers().get("Authorization").is_none());
    }

    #[wasm_bindgen_test]
    fn session_expires_after_one_hour() {
        let session = session();
        assert_eq!(1_000 + SESSION_LIFETIME_MS, session.expiration_ts);
        assert_eq!(SESSION_LIFETIME_MS, session.remaining_at(1_000));
        assert!(session.remaining_at(1_000 + SESSION_LIFETIME_MS + 1) < 0);
    }

    #[wasm_bindgen_test]
    fn session_expiry_boundary() {
        let session = session();
        assert!(!session.is_expired_at(1_000 + SESSION_LIFETIME_MS - 1));
        assert!(session.is_expired_at(1_000 + SESSION_LIFETIME_MS));
    }

    #[wasm_bindgen_test]
    fn fetched_body_on_success() {
        let response = Response::builder()
            .status(200)
            .body(Ok(b"%PDF-1.4".to_vec()))
            .unwrap();
        assert_eq!(b"%PDF-1.4".to_vec(), fetched_body(response).unwrap());
    }

    #[wasm_bindgen_test]
    fn fetched_body_rejects_error_status() {
        let response = Response::builder()
            .status(404)
            .body(Ok(br#"{"error": "Memorial not found"}"#.to_vec()))
            .unwrap();
        let error = fetched_body(response).unwrap_err();
        assert!(error.to_string().contains("404"));
    }

    #[wasm_bindgen_test]
    fn fetched_body_passes_transport_error() {
        let response = Response::builder()
            .status(200)
            .body(Err(anyhow!("connection reset")))
            .unwrap();
        assert!(fetched_body(response).is_err());
    }
}
