use std::sync::Arc;

use tracing::info;

use trackdb_core::error::Result;
use trackdb_core::traits::TrackStore;

use crate::page::{total_pages, Continuation, ResultPage};

/// Results per page.
pub const DEFAULT_PAGE_SIZE: usize = 3;

/// Top-window score at or above which a query is considered to have one
/// unambiguous best match, e.g. an exact quoted-phrase hit. An empirical
/// heuristic calibrated against the index's scoring scale; a different
/// index or analyzer needs a different value.
pub const DEFAULT_EXACT_MATCH_SCORE: f32 = 2.0;

/// Outcome of one page request.
#[derive(Debug)]
pub enum SearchOutcome {
    /// Nothing matched the query at all. Distinct from an empty window
    /// past the last page of a query that does match.
    NotFound,
    Found(ResultPage),
}

/// Issues scored queries and computes the pagination window for each
/// request. Stateless: `(query, page)` fully determines the response, so
/// interleaved sessions cannot observe each other.
pub struct SearchEngine<S> {
    store: Arc<S>,
    page_size: usize,
    exact_match_score: f32,
}

impl<S: TrackStore> SearchEngine<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self::with_limits(store, DEFAULT_PAGE_SIZE, DEFAULT_EXACT_MATCH_SCORE)
    }

    pub fn with_limits(store: Arc<S>, page_size: usize, exact_match_score: f32) -> Self {
        Self { store, page_size: page_size.max(1), exact_match_score }
    }

    /// Produce the `page`-th window (1-based) for `query`. Idempotent
    /// against an unchanged catalog.
    pub fn search(&self, query: &str, page: u32) -> Result<SearchOutcome> {
        let page = page.max(1);
        let offset = (page as usize - 1) * self.page_size;
        let (window, total) = self.store.search_text(query, offset, self.page_size)?;
        info!(query, page, total, "search");

        if total == 0 {
            return Ok(SearchOutcome::NotFound);
        }

        // An unambiguous best match collapses the first page to that single
        // result with no affordance. Later pages never collapse: a real
        // exact match ranks first, so a high score past page 1 is a scoring
        // anomaly, not a best match.
        if page == 1 {
            if let Some(top) = window.first() {
                if top.score >= self.exact_match_score {
                    let single = window.into_iter().take(1).collect();
                    return Ok(SearchOutcome::Found(ResultPage::new(
                        query.to_string(),
                        page,
                        total,
                        false,
                        None,
                        single,
                    )));
                }
            }
        }

        let show_more = total > (offset + self.page_size) as u64;
        let continuation = show_more.then(|| Continuation {
            page,
            total_pages: total_pages(total, self.page_size),
            query: query.to_string(),
        });
        Ok(SearchOutcome::Found(ResultPage::new(
            query.to_string(),
            page,
            total,
            show_more,
            continuation,
            window,
        )))
    }

    /// Follow a continuation the caller echoed back: same query, next page.
    pub fn more(&self, continuation: &Continuation) -> Result<SearchOutcome> {
        self.search(&continuation.query, continuation.next_page())
    }
}
