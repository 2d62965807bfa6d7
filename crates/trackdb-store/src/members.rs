use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use tantivy::collector::TopDocs;
use tantivy::directory::MmapDirectory;
use tantivy::query::TermQuery;
use tantivy::schema::{Field, IndexRecordOption, Value};
use tantivy::{doc, Index, IndexReader, IndexWriter, ReloadPolicy, TantivyDocument, Term};

use trackdb_core::error::{Result, StoreError};
use trackdb_core::traits::MemberStore;
use trackdb_core::types::Member;

use crate::schema::build_member_schema;

const WRITER_HEAP_BYTES: usize = 50_000_000;

/// Member registry backed by its own tantivy index. Opt-out is the only
/// delete path in the system.
pub struct TantivyMemberStore {
    reader: IndexReader,
    writer: Mutex<IndexWriter>,
    id_field: Field,
    profile_field: Field,
}

impl TantivyMemberStore {
    pub fn open(index_dir: &Path) -> Result<Self> {
        std::fs::create_dir_all(index_dir).map_err(StoreError::unavailable)?;
        let dir = MmapDirectory::open(index_dir).map_err(StoreError::unavailable)?;
        let index =
            Index::open_or_create(dir, build_member_schema()).map_err(StoreError::unavailable)?;
        let reader: IndexReader = index
            .reader_builder()
            .reload_policy(ReloadPolicy::Manual)
            .try_into()
            .map_err(StoreError::unavailable)?;
        let writer = index.writer(WRITER_HEAP_BYTES).map_err(StoreError::unavailable)?;
        let schema = index.schema();
        let field = |name: &str| schema.get_field(name).map_err(StoreError::unavailable);
        Ok(Self {
            id_field: field("id")?,
            profile_field: field("profile")?,
            writer: Mutex::new(writer),
            reader,
        })
    }

    fn writer(&self) -> Result<MutexGuard<'_, IndexWriter>> {
        self.writer
            .lock()
            .map_err(|_| StoreError::Unavailable("member writer lock poisoned".into()))
    }
}

impl MemberStore for TantivyMemberStore {
    fn find(&self, id: u64) -> Result<Option<Member>> {
        let searcher = self.reader.searcher();
        let query = TermQuery::new(
            Term::from_field_u64(self.id_field, id),
            IndexRecordOption::Basic,
        );
        let top = searcher
            .search(&query, &TopDocs::with_limit(1))
            .map_err(StoreError::unavailable)?;
        match top.first() {
            Some((_score, addr)) => {
                let doc: TantivyDocument =
                    searcher.doc(*addr).map_err(StoreError::unavailable)?;
                let profile = match doc.get_first(self.profile_field).and_then(|v| v.as_str()) {
                    Some(raw) => serde_json::from_str(raw)
                        .map_err(|e| StoreError::Corrupt(format!("member {} profile: {}", id, e)))?,
                    None => serde_json::Value::Null,
                };
                Ok(Some(Member { id, profile }))
            }
            None => Ok(None),
        }
    }

    fn insert(&self, member: &Member) -> Result<()> {
        let profile =
            serde_json::to_string(&member.profile).map_err(StoreError::unavailable)?;
        let mut writer = self.writer()?;
        writer
            .add_document(doc!(
                self.id_field => member.id,
                self.profile_field => profile,
            ))
            .map_err(StoreError::unavailable)?;
        writer.commit().map_err(StoreError::unavailable)?;
        self.reader.reload().map_err(StoreError::unavailable)
    }

    fn remove(&self, id: u64) -> Result<bool> {
        if self.find(id)?.is_none() {
            return Ok(false);
        }
        let mut writer = self.writer()?;
        writer.delete_term(Term::from_field_u64(self.id_field, id));
        writer.commit().map_err(StoreError::unavailable)?;
        self.reader.reload().map_err(StoreError::unavailable)?;
        Ok(true)
    }
}
