use tempfile::TempDir;

use trackdb_core::traits::{MemberStore, TrackStore};
use trackdb_core::types::{Member, Track};
use trackdb_store::{TantivyMemberStore, TantivyTrackStore};

fn track(file_id: &str, title: &str, performer: Option<&str>, file_size: Option<u64>) -> Track {
    Track {
        file_id: file_id.to_string(),
        title: title.to_string(),
        performer: performer.map(str::to_string),
        duration: Some(180),
        file_size,
        sender: 7,
    }
}

#[test]
fn insert_then_lookup_roundtrip() {
    let tmp = TempDir::new().unwrap();
    let store = TantivyTrackStore::open(tmp.path()).expect("open");
    let original = track("CQADBAAD", "Summer of Haze", Some("AES DANA"), Some(9_000_000));
    store.insert(&original).expect("insert");

    let found = store.find_by_file_id("CQADBAAD").expect("lookup").expect("present");
    assert_eq!(found, original);
}

#[test]
fn lookup_miss_is_none() {
    let tmp = TempDir::new().unwrap();
    let store = TantivyTrackStore::open(tmp.path()).expect("open");
    assert!(store.find_by_file_id("nope").expect("lookup").is_none());
}

#[test]
fn records_survive_reopen() {
    let tmp = TempDir::new().unwrap();
    {
        let store = TantivyTrackStore::open(tmp.path()).expect("open");
        store.insert(&track("keep-1", "Night Drive", None, None)).expect("insert");
    }
    let reopened = TantivyTrackStore::open(tmp.path()).expect("reopen");
    let found = reopened.find_by_file_id("keep-1").expect("lookup").expect("present");
    assert_eq!(found.title, "Night Drive");
}

#[test]
fn search_orders_and_windows() {
    let tmp = TempDir::new().unwrap();
    let store = TantivyTrackStore::open(tmp.path()).expect("open");
    for (id, title) in [
        ("h1", "Haze"),
        ("h2", "Purple Haze"),
        ("h3", "Haze of Summer"),
        ("h4", "Endless Haze Nights"),
        ("h5", "Haze Haze Haze"),
        ("x1", "Sunshine"),
    ] {
        store.insert(&track(id, title, Some("Various"), None)).expect("insert");
    }

    let (full, total) = store.search_text("haze", 0, 10).expect("search");
    assert_eq!(total, 5);
    assert_eq!(full.len(), 5);
    for pair in full.windows(2) {
        assert!(pair[0].score >= pair[1].score);
    }
    assert!(full.iter().all(|hit| hit.track.file_id != "x1"));

    // a window is a slice of the same ranking, not a re-ranking
    let (window, window_total) = store.search_text("haze", 2, 2).expect("search");
    assert_eq!(window_total, 5);
    let expected: Vec<&str> = full[2..4].iter().map(|h| h.track.file_id.as_str()).collect();
    let got: Vec<&str> = window.iter().map(|h| h.track.file_id.as_str()).collect();
    assert_eq!(got, expected);
}

#[test]
fn quoted_segments_are_all_required() {
    let tmp = TempDir::new().unwrap();
    let store = TantivyTrackStore::open(tmp.path()).expect("open");
    store.insert(&track("a", "Summer of Haze", Some("AES DANA"), None)).expect("insert");
    store.insert(&track("b", "Haze", Some("Someone Else"), None)).expect("insert");
    store.insert(&track("c", "Spring Tide", Some("AES DANA"), None)).expect("insert");

    let (hits, total) = store.search_text("\"aes dana\" \"haze\"", 0, 10).expect("search");
    assert_eq!(total, 1);
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].track.file_id, "a");

    // a single quoted phrase is an exact-phrase constraint
    let (hits, total) = store.search_text("\"summer of haze\"", 0, 10).expect("search");
    assert_eq!(total, 1);
    assert_eq!(hits[0].track.file_id, "a");

    // the loose form of the same words matches more
    let (_, loose_total) = store.search_text("summer haze", 0, 10).expect("search");
    assert!(loose_total > 1);
}

#[test]
fn malformed_query_matches_nothing_instead_of_failing() {
    let tmp = TempDir::new().unwrap();
    let store = TantivyTrackStore::open(tmp.path()).expect("open");
    store.insert(&track("a", "Summer of Haze", None, None)).expect("insert");

    let (_, total) = store.search_text("\"unbalanced", 0, 10).expect("must not fail");
    let _ = total; // any result count is acceptable, failure is not
    let (_, total) = store.search_text("", 0, 10).expect("must not fail");
    assert_eq!(total, 0);
}

#[test]
fn aggregate_sums_known_sizes() {
    let tmp = TempDir::new().unwrap();
    let store = TantivyTrackStore::open(tmp.path()).expect("open");
    store.insert(&track("a", "One", None, Some(1000))).expect("insert");
    store.insert(&track("b", "Two", None, Some(536))).expect("insert");
    store.insert(&track("c", "Three", None, None)).expect("insert");

    let (count, bytes) = store.aggregate_size().expect("aggregate");
    assert_eq!(count, 3);
    assert_eq!(bytes, Some(1536));
}

#[test]
fn empty_catalog_has_no_byte_sum() {
    let tmp = TempDir::new().unwrap();
    let store = TantivyTrackStore::open(tmp.path()).expect("open");
    assert_eq!(store.aggregate_size().expect("aggregate"), (0, None));
}

#[test]
fn member_roundtrip_and_removal() {
    let tmp = TempDir::new().unwrap();
    let store = TantivyMemberStore::open(tmp.path()).expect("open");
    let member = Member {
        id: 42,
        profile: serde_json::json!({ "first_name": "Kay", "username": "kay" }),
    };
    store.insert(&member).expect("insert");

    let found = store.find(42).expect("find").expect("present");
    assert_eq!(found, member);

    assert!(store.remove(42).expect("remove"));
    assert!(store.find(42).expect("find").is_none());
    assert!(!store.remove(42).expect("second remove"));
}
