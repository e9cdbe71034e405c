use crate::document_types::{DocumentKind, DocumentRef};

#[derive(Debug, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ApiUser {
    pub id: String,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub user: ApiUser,
}

/// Wills are keyed by UUID strings on the wire.
#[derive(Debug, Serialize, Deserialize)]
pub struct WillSummary {
    pub id: String,
    pub title: String,
    pub status: Option<String>,
}

impl WillSummary {
    /// Returns `None` when the id is not numeric; PDF downloads are addressed by number.
    pub fn into_document(self) -> Option<DocumentRef> {
        match self.id.trim().parse::<i64>() {
            Ok(id) => Some(DocumentRef::new(DocumentKind::Will, id, self.title)),
            Err(_) => {
                log::warn!("skipping will {:?}: id {:?} is not numeric", self.title, self.id);
                None
            }
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct WillList {
    pub wills: Vec<WillSummary>,
    pub count: usize,
}

impl WillList {
    pub fn into_documents(self) -> Vec<DocumentRef> {
        self.wills
            .into_iter()
            .filter_map(WillSummary::into_document)
            .collect()
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MemorialSummary {
    pub id: i64,
    pub title: String,
    pub name: Option<String>,
}

impl From<MemorialSummary> for DocumentRef {
    fn from(f: MemorialSummary) -> DocumentRef {
        DocumentRef::new(DocumentKind::Memorial, f.id, f.title)
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MemorialList {
    pub memorials: Vec<MemorialSummary>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ApiError {
    pub error: String,
}
