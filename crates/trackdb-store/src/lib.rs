//! trackdb-store
//!
//! Tantivy-backed implementations of the catalog store contracts: a durable
//! track collection text-indexed on title and performer, and the member
//! registry. See `tracks` and `members`.

pub mod members;
pub mod schema;
pub mod tracks;

mod query;

pub use members::TantivyMemberStore;
pub use tracks::TantivyTrackStore;
