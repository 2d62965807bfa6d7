use std::sync::Arc;

use tracing::info;

use trackdb_core::error::Result;
use trackdb_core::traits::TrackStore;
use trackdb_core::types::TrackSubmission;

/// What became of a submission. None of these are errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Stored as a new catalog record.
    Accepted,
    /// The file id is already known; the submission is silently dropped.
    Duplicate,
    /// No title on the payload; nothing was stored and the sender should
    /// be told to fix it.
    MissingTitle,
}

/// Validates and deduplicates submissions before they reach the store.
pub struct IngestionService<S> {
    store: Arc<S>,
}

impl<S: TrackStore> IngestionService<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// The dedup lookup runs before title validation: a resubmission of an
    /// already-known file id stays silent even when the payload has no
    /// title.
    ///
    /// Dedup is check-then-insert without a transaction; two racing
    /// submissions of one file id can both land.
    pub fn submit(&self, sender: u64, submission: TrackSubmission) -> Result<SubmitOutcome> {
        if self.store.find_by_file_id(&submission.file_id)?.is_some() {
            return Ok(SubmitOutcome::Duplicate);
        }
        let Some(track) = submission.into_track(sender) else {
            return Ok(SubmitOutcome::MissingTitle);
        };
        self.store.insert(&track)?;
        info!(
            sender,
            performer = track.performer.as_deref(),
            title = %track.title,
            "track added"
        );
        Ok(SubmitOutcome::Accepted)
    }
}
