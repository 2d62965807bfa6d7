//! Domain types shared by the store and the engine.

use serde::{Deserialize, Serialize};

/// One accepted audio item in the catalog.
///
/// - `file_id`: opaque identifier assigned by the transport; dedup key
/// - `title`: always present on a stored track (title-less submissions
///   are rejected before they reach the store)
/// - `sender`: id of the submitting user
///
/// Tracks are written once and never updated or deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    pub file_id: String,
    pub title: String,
    pub performer: Option<String>,
    pub duration: Option<u64>,
    pub file_size: Option<u64>,
    pub sender: u64,
}

/// An inbound submission before validation. `title` may still be missing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TrackSubmission {
    pub file_id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub performer: Option<String>,
    #[serde(default)]
    pub duration: Option<u64>,
    #[serde(default)]
    pub file_size: Option<u64>,
}

impl TrackSubmission {
    /// Attach the sender and promote to a storable record.
    /// `None` when the submission carries no title.
    pub fn into_track(self, sender: u64) -> Option<Track> {
        let title = self.title?;
        Some(Track {
            file_id: self.file_id,
            title,
            performer: self.performer,
            duration: self.duration,
            file_size: self.file_size,
            sender,
        })
    }
}

/// An opted-in participant. `profile` holds whatever the transport
/// provided at enrolment time, captured verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Member {
    pub id: u64,
    pub profile: serde_json::Value,
}

/// A track annotated with a relevance score for one query.
///
/// The score scale belongs to the underlying index; higher is always
/// better. Scores are never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredTrack {
    pub track: Track,
    pub score: f32,
}
