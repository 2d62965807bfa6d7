use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use tantivy::collector::{Count, TopDocs};
use tantivy::directory::MmapDirectory;
use tantivy::query::{QueryParser, TermQuery};
use tantivy::schema::{Field, IndexRecordOption, Value};
use tantivy::{doc, Index, IndexReader, IndexWriter, ReloadPolicy, TantivyDocument, Term};

use trackdb_core::error::{Result, StoreError};
use trackdb_core::traits::TrackStore;
use trackdb_core::types::{ScoredTrack, Track};

use crate::query::mark_required_phrases;
use crate::schema::{build_track_schema, register_tokenizer};

const WRITER_HEAP_BYTES: usize = 50_000_000;

/// Durable track collection backed by a tantivy index.
///
/// One handle serves all concurrent requests: searches go through a shared
/// reader, writes serialize on the writer lock. Every insert commits and
/// reloads the reader, so a record is visible to the dedup lookup of the
/// next submission that follows its commit.
pub struct TantivyTrackStore {
    index: Index,
    reader: IndexReader,
    writer: Mutex<IndexWriter>,
    file_id_field: Field,
    title_field: Field,
    performer_field: Field,
    duration_field: Field,
    file_size_field: Field,
    sender_field: Field,
}

impl TantivyTrackStore {
    /// Open the catalog at `index_dir`, creating it on first use.
    pub fn open(index_dir: &Path) -> Result<Self> {
        std::fs::create_dir_all(index_dir).map_err(StoreError::unavailable)?;
        let dir = MmapDirectory::open(index_dir).map_err(StoreError::unavailable)?;
        let index =
            Index::open_or_create(dir, build_track_schema()).map_err(StoreError::unavailable)?;
        register_tokenizer(&index);
        let reader: IndexReader = index
            .reader_builder()
            .reload_policy(ReloadPolicy::Manual)
            .try_into()
            .map_err(StoreError::unavailable)?;
        let writer = index.writer(WRITER_HEAP_BYTES).map_err(StoreError::unavailable)?;
        let schema = index.schema();
        let field = |name: &str| schema.get_field(name).map_err(StoreError::unavailable);
        Ok(Self {
            file_id_field: field("file_id")?,
            title_field: field("title")?,
            performer_field: field("performer")?,
            duration_field: field("duration")?,
            file_size_field: field("file_size")?,
            sender_field: field("sender")?,
            writer: Mutex::new(writer),
            reader,
            index,
        })
    }

    fn writer(&self) -> Result<MutexGuard<'_, IndexWriter>> {
        self.writer
            .lock()
            .map_err(|_| StoreError::Unavailable("index writer lock poisoned".into()))
    }

    fn track_from_doc(&self, doc: &TantivyDocument) -> Result<Track> {
        let file_id = doc
            .get_first(self.file_id_field)
            .and_then(|v| v.as_str())
            .ok_or_else(|| StoreError::Corrupt("track record without file_id".into()))?
            .to_string();
        let title = doc
            .get_first(self.title_field)
            .and_then(|v| v.as_str())
            .ok_or_else(|| StoreError::Corrupt(format!("track {} without title", file_id)))?
            .to_string();
        let sender = doc
            .get_first(self.sender_field)
            .and_then(|v| v.as_u64())
            .ok_or_else(|| StoreError::Corrupt(format!("track {} without sender", file_id)))?;
        Ok(Track {
            performer: doc
                .get_first(self.performer_field)
                .and_then(|v| v.as_str())
                .map(str::to_string),
            duration: doc.get_first(self.duration_field).and_then(|v| v.as_u64()),
            file_size: doc.get_first(self.file_size_field).and_then(|v| v.as_u64()),
            file_id,
            title,
            sender,
        })
    }
}

impl TrackStore for TantivyTrackStore {
    fn find_by_file_id(&self, file_id: &str) -> Result<Option<Track>> {
        let searcher = self.reader.searcher();
        let query = TermQuery::new(
            Term::from_field_text(self.file_id_field, file_id),
            IndexRecordOption::Basic,
        );
        let top = searcher
            .search(&query, &TopDocs::with_limit(1))
            .map_err(StoreError::unavailable)?;
        match top.first() {
            Some((_score, addr)) => {
                let doc: TantivyDocument =
                    searcher.doc(*addr).map_err(StoreError::unavailable)?;
                Ok(Some(self.track_from_doc(&doc)?))
            }
            None => Ok(None),
        }
    }

    fn insert(&self, track: &Track) -> Result<()> {
        let mut document = doc!(
            self.file_id_field => track.file_id.clone(),
            self.title_field => track.title.clone(),
            self.sender_field => track.sender,
        );
        if let Some(performer) = &track.performer {
            document.add_text(self.performer_field, performer);
        }
        if let Some(duration) = track.duration {
            document.add_u64(self.duration_field, duration);
        }
        if let Some(size) = track.file_size {
            document.add_u64(self.file_size_field, size);
        }
        let mut writer = self.writer()?;
        writer.add_document(document).map_err(StoreError::unavailable)?;
        writer.commit().map_err(StoreError::unavailable)?;
        self.reader.reload().map_err(StoreError::unavailable)
    }

    fn search_text(
        &self,
        query: &str,
        skip: usize,
        limit: usize,
    ) -> Result<(Vec<ScoredTrack>, u64)> {
        let searcher = self.reader.searcher();
        let parser =
            QueryParser::for_index(&self.index, vec![self.title_field, self.performer_field]);
        // Lenient: whatever the user typed, the worst case is an empty
        // result set, never a failed request.
        let (parsed, _errors) = parser.parse_query_lenient(&mark_required_phrases(query));
        if limit == 0 {
            let total = searcher
                .search(&parsed, &Count)
                .map_err(StoreError::unavailable)?;
            return Ok((Vec::new(), total as u64));
        }
        let (top, total) = searcher
            .search(&parsed, &(TopDocs::with_limit(limit).and_offset(skip), Count))
            .map_err(StoreError::unavailable)?;
        let mut results = Vec::with_capacity(top.len());
        for (score, addr) in top {
            let doc: TantivyDocument = searcher.doc(addr).map_err(StoreError::unavailable)?;
            results.push(ScoredTrack {
                track: self.track_from_doc(&doc)?,
                score,
            });
        }
        Ok((results, total as u64))
    }

    fn aggregate_size(&self) -> Result<(u64, Option<u64>)> {
        let searcher = self.reader.searcher();
        let count = searcher.num_docs();
        if count == 0 {
            return Ok((0, None));
        }
        let mut total_bytes = 0u64;
        for segment in searcher.segment_readers() {
            let column = segment
                .fast_fields()
                .u64("file_size")
                .map_err(StoreError::unavailable)?;
            for doc_id in 0..segment.max_doc() {
                if let Some(bytes) = column.first(doc_id) {
                    total_bytes += bytes;
                }
            }
        }
        Ok((count, Some(total_bytes)))
    }
}
