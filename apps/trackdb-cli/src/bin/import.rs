use std::env;
use std::fs;
use std::path::PathBuf;

use trackdb_core::config::Config;
use trackdb_core::types::TrackSubmission;
use trackdb_engine::{IngestionService, SubmitOutcome};
use trackdb_store::TantivyTrackStore;

// Walks a directory of .json track payload files and submits each one
// through the ingestion service, so batch imports obey the same dedup and
// validation rules as live submissions.
// Usage:
//   trackdb-import <dir> [--sender N]

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();
    let config = Config::load().map_err(|e| { eprintln!("Error loading config: {}", e); e })?;

    let args: Vec<String> = env::args().skip(1).collect();
    let mut data_dir = None;
    let mut sender = 0u64;
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--sender" => {
                if i + 1 >= args.len() { eprintln!("--sender requires a number"); std::process::exit(2); }
                sender = args[i + 1].parse().unwrap_or(sender);
                i += 2; continue;
            }
            s if s.starts_with('-') => {
                eprintln!("Unknown flag: {}", s); std::process::exit(2);
            }
            s => { data_dir = Some(PathBuf::from(s)); i += 1; continue; }
        }
    }
    let data_dir = data_dir.unwrap_or_else(|| {
        eprintln!("Usage: trackdb-import <dir> [--sender N]");
        std::process::exit(1)
    });

    println!("Track importer\n==============");
    println!("Payload directory: {}", data_dir.display());

    let tracks_dir: String =
        config.get_or("catalog.tracks_index_dir", "data/indexes/tracks".to_string());
    let store = std::sync::Arc::new(TantivyTrackStore::open(&PathBuf::from(tracks_dir))?);
    let ingest = IngestionService::new(store);

    let mut added = 0usize;
    let mut duplicates = 0usize;
    let mut rejected = 0usize;
    let mut unreadable = 0usize;
    for entry in walkdir::WalkDir::new(&data_dir).into_iter().filter_map(|e| e.ok()) {
        if !entry.file_type().is_file()
            || entry.path().extension().and_then(|s| s.to_str()) != Some("json")
        {
            continue;
        }
        let raw = match fs::read_to_string(entry.path()) {
            Ok(raw) => raw,
            Err(e) => {
                eprintln!("  skipping {}: {}", entry.path().display(), e);
                unreadable += 1;
                continue;
            }
        };
        let submission: TrackSubmission = match serde_json::from_str(&raw) {
            Ok(submission) => submission,
            Err(e) => {
                eprintln!("  skipping {}: {}", entry.path().display(), e);
                unreadable += 1;
                continue;
            }
        };
        match ingest.submit(sender, submission)? {
            SubmitOutcome::Accepted => added += 1,
            SubmitOutcome::Duplicate => duplicates += 1,
            SubmitOutcome::MissingTitle => {
                eprintln!("  {}: missing title", entry.path().display());
                rejected += 1;
            }
        }
    }

    println!(
        "\n✅ Import complete: {} added, {} duplicates, {} missing title, {} unreadable",
        added, duplicates, rejected, unreadable
    );
    Ok(())
}
