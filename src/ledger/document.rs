use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Metadata for an uploaded file. No bytes are stored; uploads are simulated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub id: u64,
    pub name: String,
    pub uploaded_at: NaiveDate,
    /// Display string such as `245 KB`, generated by the simulated upload.
    pub size: String,
    pub kind: DocumentKind,
    /// Owning bill by convention; documents also live as a top-level list.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bill_id: Option<u64>,
}

impl Document {
    pub fn new(
        id: u64,
        name: impl Into<String>,
        uploaded_at: NaiveDate,
        size: impl Into<String>,
        bill_id: Option<u64>,
    ) -> Self {
        let name = name.into();
        let kind = DocumentKind::infer(&name);
        Self {
            id,
            name,
            uploaded_at,
            size: size.into(),
            kind,
            bill_id,
        }
    }
}

/// File kind inferred from the extension, used only for display grouping.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    Pdf,
    Image,
    Other,
}

impl DocumentKind {
    pub fn infer(file_name: &str) -> Self {
        match extension(file_name).as_deref() {
            Some("pdf") => DocumentKind::Pdf,
            Some("jpg") | Some("jpeg") | Some("png") => DocumentKind::Image,
            _ => DocumentKind::Other,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DocumentKind::Pdf => "PDF",
            DocumentKind::Image => "Image",
            DocumentKind::Other => "File",
        }
    }
}

/// Lowercased extension after the final dot, if any.
pub fn extension(file_name: &str) -> Option<String> {
    let trimmed = file_name.trim();
    let (stem, ext) = trimmed.rsplit_once('.')?;
    if stem.is_empty() || ext.is_empty() {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_inferred_from_extension() {
        assert_eq!(DocumentKind::infer("May_2023_Bill.pdf"), DocumentKind::Pdf);
        assert_eq!(DocumentKind::infer("receipt.JPG"), DocumentKind::Image);
        assert_eq!(DocumentKind::infer("notes.txt"), DocumentKind::Other);
        assert_eq!(DocumentKind::infer("no-extension"), DocumentKind::Other);
    }

    #[test]
    fn extension_ignores_leading_dot_files() {
        assert_eq!(extension(".hidden"), None);
        assert_eq!(extension("archive.tar.gz").as_deref(), Some("gz"));
    }
}
