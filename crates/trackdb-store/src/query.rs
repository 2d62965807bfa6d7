//! Catalog queries keep the free-text syntax of the chat surface: bare
//! words match loosely, double-quoted segments are exact phrases, and every
//! quoted segment is required. Tantivy's parser treats clauses as optional
//! by default, so quoted segments get a `+` occurrence marker before
//! parsing.

/// Mark each double-quoted segment as a required clause.
///
/// Segments already carrying an explicit `+` or `-` marker are left alone.
/// An unbalanced trailing quote opens a phrase that never closes; the
/// lenient parser downstream copes with that.
pub(crate) fn mark_required_phrases(query: &str) -> String {
    let mut out = String::with_capacity(query.len() + 4);
    let mut in_phrase = false;
    let mut prev: Option<char> = None;
    for c in query.chars() {
        if c == '"' {
            if !in_phrase && !matches!(prev, Some('+') | Some('-')) {
                out.push('+');
            }
            in_phrase = !in_phrase;
        }
        out.push(c);
        prev = Some(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::mark_required_phrases;

    #[test]
    fn bare_words_pass_through() {
        assert_eq!(mark_required_phrases("summer of haze"), "summer of haze");
    }

    #[test]
    fn quoted_segment_becomes_required() {
        assert_eq!(mark_required_phrases("\"summer of haze\""), "+\"summer of haze\"");
    }

    #[test]
    fn every_quoted_segment_is_required() {
        assert_eq!(
            mark_required_phrases("\"aes dana\" \"haze\""),
            "+\"aes dana\" +\"haze\""
        );
    }

    #[test]
    fn mixed_query_marks_only_phrases() {
        assert_eq!(mark_required_phrases("sad \"family\" remix"), "sad +\"family\" remix");
    }

    #[test]
    fn explicit_markers_are_kept() {
        assert_eq!(mark_required_phrases("+\"a b\" -\"c d\""), "+\"a b\" -\"c d\"");
    }
}
