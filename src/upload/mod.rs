//! Simulated document uploads.
//!
//! The dashboard never stores real bytes; an upload is a staged file name, a
//! confirmation, and a delayed completion. The delay runs on a background
//! thread as an explicit task with cooperative cancellation and real error
//! variants, so the interface matches what a real upload would need even
//! though the happy path cannot fail.

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use chrono::NaiveDate;
use rand::Rng;
use thiserror::Error;
use uuid::Uuid;

use crate::ledger::document;

/// Latency of the simulated transfer; tests pass something shorter.
pub const DEFAULT_UPLOAD_DELAY: Duration = Duration::from_millis(1500);

/// Extensions the upload form accepts.
pub const ACCEPTED_EXTENSIONS: [&str; 4] = ["pdf", "jpg", "jpeg", "png"];

const CANCEL_POLL: Duration = Duration::from_millis(25);

/// Phase one of the two-phase flow: a selected file awaiting confirmation.
#[derive(Debug, Clone)]
pub struct StagedUpload {
    pub file_name: String,
    pub bill_id: Option<u64>,
}

impl StagedUpload {
    pub fn new(file_name: impl Into<String>, bill_id: Option<u64>) -> Self {
        Self {
            file_name: file_name.into(),
            bill_id,
        }
    }
}

/// Result of a completed simulated upload, ready to become a `Document`.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub name: String,
    /// Randomly generated display size in the 150–249 KB range.
    pub size: String,
    pub uploaded_at: NaiveDate,
    pub bill_id: Option<u64>,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum UploadError {
    #[error("file name cannot be empty")]
    EmptyFileName,
    #[error("unsupported file type `{0}` (accepted: pdf, jpg, jpeg, png)")]
    UnsupportedType(String),
    #[error("upload was cancelled")]
    Cancelled,
}

/// A simulated upload in flight on a background thread.
pub struct UploadTask {
    id: Uuid,
    file_name: String,
    cancel: Arc<AtomicBool>,
    handle: JoinHandle<Result<UploadedFile, UploadError>>,
}

impl UploadTask {
    /// Confirms a staged upload: validates it, then simulates the transfer
    /// for `delay` before yielding the uploaded-file metadata.
    pub fn spawn(staged: StagedUpload, uploaded_at: NaiveDate, delay: Duration) -> Self {
        let id = Uuid::new_v4();
        let file_name = staged.file_name.clone();
        let cancel = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&cancel);
        let handle = thread::spawn(move || run_transfer(staged, uploaded_at, delay, flag));
        tracing::info!(upload = %id, file = %file_name, "upload started");
        Self {
            id,
            file_name,
            cancel,
            handle,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Requests cancellation; the transfer notices at its next poll tick.
    pub fn cancel(&self) {
        self.cancel.store(true, Ordering::Relaxed);
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Blocks until the transfer finishes and returns its outcome.
    pub fn join(self) -> Result<UploadedFile, UploadError> {
        let outcome = self.handle.join().expect("upload worker panicked");
        match &outcome {
            Ok(file) => tracing::info!(upload = %self.id, file = %file.name, "upload complete"),
            Err(err) => tracing::warn!(upload = %self.id, %err, "upload failed"),
        }
        outcome
    }
}

fn run_transfer(
    staged: StagedUpload,
    uploaded_at: NaiveDate,
    delay: Duration,
    cancel: Arc<AtomicBool>,
) -> Result<UploadedFile, UploadError> {
    validate(&staged.file_name)?;

    let mut remaining = delay;
    while !remaining.is_zero() {
        if cancel.load(Ordering::Relaxed) {
            return Err(UploadError::Cancelled);
        }
        let tick = remaining.min(CANCEL_POLL);
        thread::sleep(tick);
        remaining -= tick;
    }
    if cancel.load(Ordering::Relaxed) {
        return Err(UploadError::Cancelled);
    }

    Ok(UploadedFile {
        name: staged.file_name.trim().to_string(),
        size: random_size_label(),
        uploaded_at,
        bill_id: staged.bill_id,
    })
}

fn validate(file_name: &str) -> Result<(), UploadError> {
    if file_name.trim().is_empty() {
        return Err(UploadError::EmptyFileName);
    }
    match document::extension(file_name) {
        Some(ext) if ACCEPTED_EXTENSIONS.contains(&ext.as_str()) => Ok(()),
        Some(ext) => Err(UploadError::UnsupportedType(ext)),
        None => Err(UploadError::UnsupportedType("none".into())),
    }
}

fn random_size_label() -> String {
    let kb = rand::thread_rng().gen_range(150..250);
    format!("{} KB", kb)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn spawn_fast(name: &str) -> UploadTask {
        UploadTask::spawn(
            StagedUpload::new(name, Some(1)),
            date(2023, 6, 20),
            Duration::ZERO,
        )
    }

    #[test]
    fn completed_upload_carries_generated_metadata() {
        let uploaded = spawn_fast("June_2023_Bill.pdf").join().unwrap();
        assert_eq!(uploaded.name, "June_2023_Bill.pdf");
        assert_eq!(uploaded.bill_id, Some(1));
        assert_eq!(uploaded.uploaded_at, date(2023, 6, 20));

        let kb: u32 = uploaded
            .size
            .strip_suffix(" KB")
            .expect("size label ends in KB")
            .parse()
            .expect("numeric size");
        assert!((150..250).contains(&kb), "unexpected size {kb}");
    }

    #[test]
    fn rejects_unsupported_extensions() {
        let err = spawn_fast("virus.exe").join().unwrap_err();
        assert_eq!(err, UploadError::UnsupportedType("exe".into()));

        let err = spawn_fast("no-extension").join().unwrap_err();
        assert!(matches!(err, UploadError::UnsupportedType(_)));
    }

    #[test]
    fn rejects_empty_file_names() {
        let err = spawn_fast("   ").join().unwrap_err();
        assert_eq!(err, UploadError::EmptyFileName);
    }

    #[test]
    fn cancellation_aborts_an_in_flight_transfer() {
        let task = UploadTask::spawn(
            StagedUpload::new("receipt.png", None),
            date(2023, 6, 20),
            Duration::from_secs(30),
        );
        task.cancel();
        let err = task.join().unwrap_err();
        assert_eq!(err, UploadError::Cancelled);
    }
}
