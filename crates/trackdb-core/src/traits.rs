use crate::error::Result;
use crate::types::{Member, ScoredTrack, Track};

/// Catalog storage contract: a durable track collection with a text index
/// over title and performer.
///
/// Implementations are shared across concurrent requests; every method is
/// safe to call from multiple threads.
pub trait TrackStore: Send + Sync {
    /// Exact lookup on the transport-assigned identifier. A miss is
    /// `Ok(None)`, not an error.
    fn find_by_file_id(&self, file_id: &str) -> Result<Option<Track>>;

    /// Append one record. Performs no uniqueness check; dedup is the
    /// caller's job.
    fn insert(&self, track: &Track) -> Result<()>;

    /// Scored free-text match over title and performer. Returns the
    /// `skip`/`limit` window of the full ranked result set, descending by
    /// score, plus the total number of matches independent of the window.
    ///
    /// Double-quoted segments in `query` are required phrase matches, and
    /// several quoted segments must all match; unquoted terms match
    /// loosely. Malformed user input never fails the parse.
    fn search_text(&self, query: &str, skip: usize, limit: usize)
        -> Result<(Vec<ScoredTrack>, u64)>;

    /// Track count and byte sum over `file_size`. The sum is `None` iff
    /// the catalog holds no tracks; tracks without a size contribute zero
    /// bytes but still count.
    fn aggregate_size(&self) -> Result<(u64, Option<u64>)>;
}

/// Member registry contract: at most one record per id.
pub trait MemberStore: Send + Sync {
    fn find(&self, id: u64) -> Result<Option<Member>>;

    fn insert(&self, member: &Member) -> Result<()>;

    /// Returns whether a record was actually removed.
    fn remove(&self, id: u64) -> Result<bool>;
}
