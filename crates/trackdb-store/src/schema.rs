use tantivy::schema::{
    IndexRecordOption, Schema, TextFieldIndexing, TextOptions, FAST, INDEXED, STORED, STRING,
};
use tantivy::tokenizer::{LowerCaser, SimpleTokenizer, TextAnalyzer};
use tantivy::Index;

/// Name of the analyzer applied to title and performer text.
pub const METADATA_TOKENIZER: &str = "metadata";

/// Track collection schema: raw `file_id` for exact lookup, tokenized
/// title/performer with positions (phrase queries need them), `file_size`
/// as a fast field for the aggregate sum.
pub fn build_track_schema() -> Schema {
    let mut schema_builder = Schema::builder();
    let _file_id = schema_builder.add_text_field("file_id", STRING | STORED);
    let text_indexing = TextFieldIndexing::default()
        .set_tokenizer(METADATA_TOKENIZER)
        .set_index_option(IndexRecordOption::WithFreqsAndPositions);
    let text_options = TextOptions::default()
        .set_indexing_options(text_indexing)
        .set_stored();
    let _title = schema_builder.add_text_field("title", text_options.clone());
    let _performer = schema_builder.add_text_field("performer", text_options);
    let _duration = schema_builder.add_u64_field("duration", STORED);
    let _file_size = schema_builder.add_u64_field("file_size", STORED | FAST);
    let _sender = schema_builder.add_u64_field("sender", STORED);
    schema_builder.build()
}

/// Member registry schema: the id is indexed for lookup and removal, the
/// profile is an opaque stored JSON string.
pub fn build_member_schema() -> Schema {
    let mut schema_builder = Schema::builder();
    let _id = schema_builder.add_u64_field("id", INDEXED | STORED);
    let _profile = schema_builder.add_text_field("profile", STORED);
    schema_builder.build()
}

/// Register the metadata analyzer on an `Index` handle. Must run on every
/// open, before the index parses or executes queries.
///
/// Lowercase only, no stopword removal: track titles are short and often
/// consist entirely of words a prose stopword list would drop.
pub fn register_tokenizer(index: &Index) {
    let tokenizer = TextAnalyzer::builder(SimpleTokenizer::default())
        .filter(LowerCaser)
        .build();
    index.tokenizers().register(METADATA_TOKENIZER, tokenizer);
}
