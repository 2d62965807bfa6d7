//! trackdb-engine
//!
//! The catalog services: deduplicated ingestion, scored search with
//! stateless pagination, stats reporting and member enrolment. Everything
//! here is generic over the store contracts in `trackdb-core`; the only
//! error that escapes is `StoreError`.

pub mod ingest;
pub mod members;
pub mod messages;
pub mod page;
pub mod search;
pub mod stats;

pub use ingest::{IngestionService, SubmitOutcome};
pub use members::{Enrolment, JoinOutcome, LeaveOutcome};
pub use page::{Continuation, ResultPage};
pub use search::{SearchEngine, SearchOutcome, DEFAULT_EXACT_MATCH_SCORE, DEFAULT_PAGE_SIZE};
pub use stats::{human_size, StatsReporter};
