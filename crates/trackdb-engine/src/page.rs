//! Pagination without server-held state. Everything a follow-up request
//! needs travels inside the page itself, as a [`Continuation`] the caller
//! echoes back verbatim.

use serde::{Deserialize, Serialize};

use trackdb_core::types::ScoredTrack;

/// Continuation metadata for a "show more" follow-up.
///
/// Rendered as a label the chat surface puts on its affordance button;
/// parsing the label back recovers everything needed to produce the next
/// window, so no session storage exists anywhere.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Continuation {
    /// 1-based page the label was issued for.
    pub page: u32,
    pub total_pages: u32,
    pub query: String,
}

impl Continuation {
    pub fn next_page(&self) -> u32 {
        self.page + 1
    }

    /// The affordance label: `(page/total_pages) Show more for "query"`.
    pub fn label(&self) -> String {
        format!("({}/{}) Show more for \"{}\"", self.page, self.total_pages, self.query)
    }

    /// Parse a label produced by [`Continuation::label`]. `None` for
    /// anything else.
    pub fn parse(label: &str) -> Option<Self> {
        let rest = label.trim().strip_prefix('(')?;
        let (pages, rest) = rest.split_once(") ")?;
        let (page, total_pages) = pages.split_once('/')?;
        let rest = rest
            .strip_prefix("Show more for \"")
            .or_else(|| rest.strip_prefix("show more for \""))?;
        let query = rest.strip_suffix('"')?;
        Some(Self {
            page: page.parse().ok()?,
            total_pages: total_pages.parse().ok()?,
            query: query.to_string(),
        })
    }
}

/// One window of results plus everything needed to ask for the next one.
///
/// Recomputed per request, carries no identity of its own. Consuming the
/// page yields tracks best-first, one at a time; once consumed it cannot
/// be replayed, only re-searched.
#[derive(Debug)]
pub struct ResultPage {
    pub query: String,
    /// 1-based.
    pub page: u32,
    /// Total matches for the query, independent of this window.
    pub total: u64,
    pub show_more: bool,
    /// Present exactly when `show_more` is true.
    pub continuation: Option<Continuation>,
    results: Vec<ScoredTrack>,
}

impl ResultPage {
    pub(crate) fn new(
        query: String,
        page: u32,
        total: u64,
        show_more: bool,
        continuation: Option<Continuation>,
        results: Vec<ScoredTrack>,
    ) -> Self {
        Self { query, page, total, show_more, continuation, results }
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// The window in descending-score order, for inspection without
    /// consuming the page.
    pub fn results(&self) -> &[ScoredTrack] {
        &self.results
    }
}

impl IntoIterator for ResultPage {
    type Item = ScoredTrack;
    type IntoIter = std::vec::IntoIter<ScoredTrack>;

    fn into_iter(self) -> Self::IntoIter {
        self.results.into_iter()
    }
}

/// Number of pages needed for `total` matches at `page_size` per page.
pub(crate) fn total_pages(total: u64, page_size: usize) -> u32 {
    total.div_ceil(page_size as u64) as u32
}
