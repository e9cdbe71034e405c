use strum_macros::{Display, EnumIter, EnumString, IntoStaticStr};

pub const PDF_CONTENT_TYPE: &str = "application/pdf";

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
    EnumString,
    IntoStaticStr,
)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    #[strum(serialize = "memorial")]
    Memorial,
    #[strum(serialize = "will")]
    Will,
}

impl DocumentKind {
    /// Prefix of the suggested file name, e.g. `memorial` in `memorial_John_Doe.pdf`.
    pub fn file_prefix(self) -> &'static str {
        self.into()
    }

    /// Path of the PDF endpoint, relative to the API base URL.
    pub fn endpoint(self, id: i64) -> String {
        match self {
            DocumentKind::Memorial => format!("/memorials/{}/pdf", id),
            DocumentKind::Will => format!("/wills/{}/export-pdf", id),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DocumentKind::Memorial => "Memorial",
            DocumentKind::Will => "Will",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentRef {
    pub kind: DocumentKind,
    pub id: i64,
    pub title: String,
}

impl DocumentRef {
    pub fn new(kind: DocumentKind, id: i64, title: impl Into<String>) -> DocumentRef {
        DocumentRef {
            kind,
            id,
            title: title.into(),
        }
    }

    pub fn file_name(&self) -> String {
        suggested_file_name(self.kind, &self.title)
    }
}

/// Builds `<prefix>_<title>.pdf`, replacing every whitespace character of the
/// title with an underscore. Nothing else is escaped.
pub fn suggested_file_name(kind: DocumentKind, title: &str) -> String {
    let title = title
        .chars()
        .map(|c| if c.is_whitespace() { '_' } else { c })
        .collect::<String>();
    format!("{}_{}.pdf", kind.file_prefix(), title)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;
    use wasm_bindgen_test::*;

    #[wasm_bindgen_test]
    fn file_name_per_kind() {
        assert_eq!(
            "memorial_John_Doe.pdf",
            suggested_file_name(DocumentKind::Memorial, "John Doe")
        );
        assert_eq!(
            "will_John_Doe.pdf",
            suggested_file_name(DocumentKind::Will, "John Doe")
        );
    }

    #[wasm_bindgen_test]
    fn file_name_replaces_each_whitespace() {
        assert_eq!(
            "memorial_A__B.pdf",
            suggested_file_name(DocumentKind::Memorial, "A  B")
        );
        assert_eq!(
            "will__tab_and_newline_.pdf",
            suggested_file_name(DocumentKind::Will, "\ttab\tand\nnewline ")
        );
    }

    #[wasm_bindgen_test]
    fn file_name_keeps_other_characters() {
        assert_eq!(
            "will_../etc/passwd.pdf",
            suggested_file_name(DocumentKind::Will, "../etc/passwd")
        );
        assert_eq!("memorial_.pdf", suggested_file_name(DocumentKind::Memorial, ""));
    }

    #[wasm_bindgen_test]
    fn endpoints() {
        assert_eq!("/memorials/7/pdf", DocumentKind::Memorial.endpoint(7));
        assert_eq!("/wills/42/export-pdf", DocumentKind::Will.endpoint(42));
    }

    #[wasm_bindgen_test]
    fn kind_names() {
        let names = DocumentKind::iter()
            .map(|kind| kind.to_string())
            .collect::<Vec<_>>();
        assert_eq!(vec!["memorial", "will"], names);
        assert_eq!(Ok(DocumentKind::Will), DocumentKind::from_str("will"));
        assert!(DocumentKind::from_str("fundraiser").is_err());
    }

    #[wasm_bindgen_test]
    fn document_ref_file_name() {
        let document = DocumentRef::new(DocumentKind::Will, 3, "Last Will");
        assert_eq!("will_Last_Will.pdf", document.file_name());
    }
}
