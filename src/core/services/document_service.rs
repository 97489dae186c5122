use crate::ledger::{Document, Ledger};
use crate::upload::UploadedFile;

use super::{ServiceError, ServiceResult};

pub struct DocumentService;

impl DocumentService {
    /// Registers a completed simulated upload as a document record.
    pub fn register(ledger: &mut Ledger, uploaded: UploadedFile) -> u64 {
        let id = ledger.allocate_document_id();
        ledger.add_document(Document::new(
            id,
            uploaded.name,
            uploaded.uploaded_at,
            uploaded.size,
            uploaded.bill_id,
        ))
    }

    pub fn remove(ledger: &mut Ledger, id: u64) -> ServiceResult<Document> {
        ledger
            .remove_document(id)
            .ok_or_else(|| ServiceError::Invalid("Document not found".into()))
    }

    /// Documents attached to the given bill, newest first.
    pub fn for_bill(ledger: &Ledger, bill_id: u64) -> Vec<&Document> {
        ledger
            .documents
            .iter()
            .filter(|doc| doc.bill_id == Some(bill_id))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::DocumentKind;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn uploaded(name: &str, bill_id: Option<u64>) -> UploadedFile {
        UploadedFile {
            name: name.into(),
            size: "199 KB".into(),
            uploaded_at: date(2023, 6, 20),
            bill_id,
        }
    }

    #[test]
    fn register_prepends_with_inferred_kind() {
        let mut ledger = Ledger::sample();
        let id = DocumentService::register(&mut ledger, uploaded("June_2023_Bill.pdf", Some(1)));
        assert_eq!(id, 5);
        assert_eq!(ledger.documents[0].name, "June_2023_Bill.pdf");
        assert_eq!(ledger.documents[0].kind, DocumentKind::Pdf);
    }

    #[test]
    fn for_bill_filters_by_convention() {
        let ledger = Ledger::sample();
        let attached = DocumentService::for_bill(&ledger, 1);
        assert_eq!(attached.len(), 2);
        assert!(DocumentService::for_bill(&ledger, 2).is_empty());
    }

    #[test]
    fn remove_deletes_independently_of_bills() {
        let mut ledger = Ledger::sample();
        let removed = DocumentService::remove(&mut ledger, 3).unwrap();
        assert_eq!(removed.name, "March_2023_Bill.pdf");
        assert!(DocumentService::remove(&mut ledger, 3).is_err());
        // The referenced bill is untouched.
        assert!(ledger.bill(1).is_some());
    }
}
