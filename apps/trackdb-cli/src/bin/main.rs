use std::env;
use std::path::PathBuf;
use std::sync::Arc;

use trackdb_core::config::Config;
use trackdb_core::types::{Member, TrackSubmission};
use trackdb_engine::{
    messages, Continuation, Enrolment, IngestionService, ResultPage, SearchEngine, SearchOutcome,
    StatsReporter, SubmitOutcome, DEFAULT_EXACT_MATCH_SCORE, DEFAULT_PAGE_SIZE,
};
use trackdb_store::{TantivyMemberStore, TantivyTrackStore};

fn parse_args() -> (String, Vec<String>) {
    let mut args: Vec<String> = env::args().collect();
    let prog = args.remove(0);
    if args.is_empty() {
        eprintln!("Usage: {} <submit|search|more|stats|join|leave|help> [args...]", prog);
        std::process::exit(1);
    }
    let cmd = args.remove(0);
    (cmd, args)
}

fn tracks_store(config: &Config) -> anyhow::Result<Arc<TantivyTrackStore>> {
    let dir: String = config.get_or("catalog.tracks_index_dir", "data/indexes/tracks".to_string());
    Ok(Arc::new(TantivyTrackStore::open(&PathBuf::from(dir))?))
}

fn members_store(config: &Config) -> anyhow::Result<Arc<TantivyMemberStore>> {
    let dir: String =
        config.get_or("catalog.members_index_dir", "data/indexes/members".to_string());
    Ok(Arc::new(TantivyMemberStore::open(&PathBuf::from(dir))?))
}

fn search_engine(
    config: &Config,
    store: Arc<TantivyTrackStore>,
) -> SearchEngine<TantivyTrackStore> {
    let page_size = config.get_or("search.page_size", DEFAULT_PAGE_SIZE);
    let score = config.get_or("search.exact_match_score", DEFAULT_EXACT_MATCH_SCORE);
    SearchEngine::with_limits(store, page_size, score)
}

fn parse_submission(args: &[String]) -> (u64, TrackSubmission) {
    let mut submission = TrackSubmission::default();
    let mut sender = 0u64;
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--sender" => {
                if i + 1 >= args.len() { eprintln!("--sender requires a number"); std::process::exit(2); }
                sender = args[i + 1].parse().unwrap_or(sender);
                i += 2; continue;
            }
            "--title" => {
                if i + 1 >= args.len() { eprintln!("--title requires a value"); std::process::exit(2); }
                submission.title = Some(args[i + 1].clone());
                i += 2; continue;
            }
            "--performer" => {
                if i + 1 >= args.len() { eprintln!("--performer requires a value"); std::process::exit(2); }
                submission.performer = Some(args[i + 1].clone());
                i += 2; continue;
            }
            "--duration" => {
                if i + 1 >= args.len() { eprintln!("--duration requires seconds"); std::process::exit(2); }
                submission.duration = args[i + 1].parse().ok();
                i += 2; continue;
            }
            "--size" => {
                if i + 1 >= args.len() { eprintln!("--size requires bytes"); std::process::exit(2); }
                submission.file_size = args[i + 1].parse().ok();
                i += 2; continue;
            }
            s if s.starts_with('-') => {
                eprintln!("Unknown flag: {}", s); std::process::exit(2);
            }
            s => {
                if submission.file_id.is_empty() { submission.file_id = s.to_string(); }
                i += 1; continue;
            }
        }
    }
    if submission.file_id.is_empty() {
        eprintln!("Missing <file_id> argument");
        std::process::exit(1);
    }
    (sender, submission)
}

fn parse_search(args: &[String]) -> (String, u32) {
    let mut query = String::new();
    let mut page = 1u32;
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--page" => {
                if i + 1 >= args.len() { eprintln!("--page requires a number"); std::process::exit(2); }
                page = args[i + 1].parse().unwrap_or(page);
                i += 2; continue;
            }
            s if s.starts_with('-') => {
                eprintln!("Unknown flag: {}", s); std::process::exit(2);
            }
            s => {
                if query.is_empty() { query = s.to_string(); }
                i += 1; continue;
            }
        }
    }
    if query.is_empty() {
        eprintln!("Missing <query> argument");
        std::process::exit(1);
    }
    (query, page)
}

fn render_page(page: ResultPage) {
    println!("🔍 {} match(es) for \"{}\" (page {})", page.total, page.query, page.page);
    let continuation = page.continuation.clone();
    for (i, hit) in page.into_iter().enumerate() {
        let track = hit.track;
        let performer = track.performer.unwrap_or_else(|| "?".to_string());
        let duration = track.duration.map(|d| format!(" {}s", d)).unwrap_or_default();
        println!(
            "  {}. score={:.3} {} - {}{} [{}]",
            i + 1, hit.score, performer, track.title, duration, track.file_id
        );
    }
    if let Some(continuation) = continuation {
        println!("\n{}", continuation.label());
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();
    let config = Config::load().map_err(|e| { eprintln!("Error loading config: {}", e); e })?;
    let (cmd, args) = parse_args();
    match cmd.as_str() {
        "submit" => {
            let (sender, submission) = parse_submission(&args);
            let ingest = IngestionService::new(tracks_store(&config)?);
            match ingest.submit(sender, submission)? {
                SubmitOutcome::Accepted => println!("✅ Track added"),
                // Duplicates stay silent.
                SubmitOutcome::Duplicate => {}
                SubmitOutcome::MissingTitle => println!("{}", messages::MISSING_TITLE),
            }
        }
        "search" => {
            let (query, page) = parse_search(&args);
            let engine = search_engine(&config, tracks_store(&config)?);
            match engine.search(&query, page)? {
                SearchOutcome::NotFound => println!("{}", messages::NOT_FOUND),
                SearchOutcome::Found(page) => render_page(page),
            }
        }
        "more" => {
            let label = args.first().cloned().unwrap_or_else(|| {
                eprintln!("Usage: trackdb more '<continuation label>'");
                std::process::exit(1)
            });
            let Some(continuation) = Continuation::parse(&label) else {
                eprintln!("Not a continuation label: {}", label);
                std::process::exit(1);
            };
            let engine = search_engine(&config, tracks_store(&config)?);
            match engine.more(&continuation)? {
                SearchOutcome::NotFound => println!("{}", messages::NOT_FOUND),
                SearchOutcome::Found(page) => render_page(page),
            }
        }
        "stats" => {
            let reporter = StatsReporter::new(tracks_store(&config)?);
            println!("{}", reporter.report()?);
        }
        "join" => {
            let id: u64 = args.first().and_then(|s| s.parse().ok()).unwrap_or_else(|| {
                eprintln!("Usage: trackdb join <id> [profile-json]");
                std::process::exit(1)
            });
            let profile = match args.get(1) {
                Some(raw) => serde_json::from_str(raw)?,
                None => serde_json::Value::Null,
            };
            let enrolment = Enrolment::new(members_store(&config)?);
            enrolment.join(Member { id, profile })?;
            // The greeting goes out on every join, first or repeat.
            println!("{}", messages::GREETING);
        }
        "leave" => {
            let id: u64 = args.first().and_then(|s| s.parse().ok()).unwrap_or_else(|| {
                eprintln!("Usage: trackdb leave <id>");
                std::process::exit(1)
            });
            let enrolment = Enrolment::new(members_store(&config)?);
            enrolment.leave(id)?;
            println!("{}", messages::GOODBYE);
        }
        "help" => println!("{}", messages::HELP),
        _ => {
            eprintln!("Unknown command: {}", cmd);
            std::process::exit(1);
        }
    }
    Ok(())
}
