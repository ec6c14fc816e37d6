mod common;

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use common::{Reply, chapter_body, serve};
use surah::catalog::{CatalogClient, FetchFailure};
use surah::models::{ChapterIndex, ChapterRecord, FetchState};
use surah::retriever::ChapterSource;
use surah::session::Session;
use surah::settings::Labels;
use surah::view::{Screen, VersesView};

const WAIT: Duration = Duration::from_secs(3);

/// Wraps the real client and counts how many fetches went out.
struct Counting {
    inner: CatalogClient,
    calls: AtomicUsize,
}

impl ChapterSource for Counting {
    fn fetch_chapter(&self, index: ChapterIndex) -> Result<ChapterRecord, FetchFailure> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.fetch_chapter(index)
    }
}

fn counting(base: &str, timeout: Duration) -> Arc<Counting> {
    Arc::new(Counting {
        inner: CatalogClient::new(base, timeout).unwrap(),
        calls: AtomicUsize::new(0),
    })
}

fn chapter(value: u32) -> ChapterIndex {
    ChapterIndex::new(value).unwrap()
}

#[test]
fn first_chapter_with_seven_verses() {
    let (base, server) = serve(vec![Reply::Json("200 OK", chapter_body(1, 7))]);
    let source = counting(&base, WAIT);
    let mut session = Session::new(source.clone(), ChapterIndex::FIRST);

    assert!(session.fetch_state().is_fetching());
    assert!(session.wait_settled(WAIT));
    let requests = server.join().unwrap();
    assert!(requests[0].starts_with("GET /surah/1 "));

    let labels = Labels::default();
    let Screen::Chapter(view) = Screen::new(session.fetch_state(), &labels) else {
        panic!("expected chapter 1 to load");
    };
    assert_eq!(view.long_name, "long 1");
    assert_eq!(view.translated_name, "indonesian 1");
    assert_eq!(view.transliterated_name, "Surah 1");

    let VersesView::Listed(verses) = view.verses else {
        panic!("expected verses");
    };
    let numbers: Vec<usize> = verses.iter().map(|v| v.number).collect();
    assert_eq!(numbers, vec![1, 2, 3, 4, 5, 6, 7]);
    let arabic: Vec<&str> = verses.iter().map(|v| v.arabic).collect();
    assert_eq!(arabic, (1..=7).map(|n| format!("arab {n}")).collect::<Vec<_>>());
    assert_eq!(verses[0].transliteration, "latin 1");

    assert!(session.at_lower_bound());
    assert!(!session.at_upper_bound());
    assert_eq!(source.calls.load(Ordering::SeqCst), 1);
}

#[test]
fn advance_at_last_chapter_issues_no_request() {
    let (base, server) = serve(vec![Reply::Json("200 OK", chapter_body(114, 6))]);
    let source = counting(&base, WAIT);
    let mut session = Session::new(source.clone(), ChapterIndex::LAST);
    assert!(session.wait_settled(WAIT));
    server.join().unwrap();

    assert!(session.at_upper_bound());
    assert!(!session.advance());
    assert_eq!(session.current_index(), ChapterIndex::LAST);
    assert!(matches!(session.fetch_state(), FetchState::Loaded(_)));

    // Give a stray request a chance to show up before counting.
    std::thread::sleep(Duration::from_millis(100));
    assert_eq!(source.calls.load(Ordering::SeqCst), 1);
}

#[test]
fn timeout_settles_absent_and_navigation_fetches_again() {
    let (base, server) = serve(vec![
        Reply::Hang(Duration::from_millis(1500)),
        Reply::Json("200 OK", chapter_body(4, 12)),
    ]);
    let source = counting(&base, Duration::from_millis(300));
    let mut session = Session::new(source.clone(), chapter(5));

    assert!(session.wait_settled(WAIT));
    assert_eq!(session.fetch_state(), &FetchState::Absent);
    assert_eq!(session.current_index(), chapter(5));

    let labels = Labels::default();
    assert_eq!(
        Screen::new(session.fetch_state(), &labels),
        Screen::NotFound(labels.chapter_not_found.as_str())
    );

    assert!(session.retreat());
    assert!(session.fetch_state().is_fetching());
    assert!(session.wait_settled(WAIT));
    assert_eq!(
        session.fetch_state().record().map(|r| r.verses.len()),
        Some(12)
    );

    let requests = server.join().unwrap();
    assert!(requests[0].starts_with("GET /surah/5 "));
    assert!(requests[1].starts_with("GET /surah/4 "));
    assert_eq!(source.calls.load(Ordering::SeqCst), 2);
}

#[test]
fn envelope_miss_and_server_error_settle_absent() {
    let (base, server) = serve(vec![
        Reply::Json(
            "200 OK",
            r#"{ "code": 404, "status": "Not Found.", "message": "Surah is not found.", "data": {} }"#
                .to_string(),
        ),
        Reply::Json("502 Bad Gateway", "{}".to_string()),
    ]);
    let source = counting(&base, WAIT);
    let mut session = Session::new(source, chapter(10));
    assert!(session.wait_settled(WAIT));
    assert_eq!(session.fetch_state(), &FetchState::Absent);

    assert!(session.advance());
    assert!(session.wait_settled(WAIT));
    assert_eq!(session.fetch_state(), &FetchState::Absent);
    assert_eq!(session.current_index(), chapter(11));
    server.join().unwrap();
}

#[test]
fn zero_verses_is_distinct_from_absent() {
    let (base, server) = serve(vec![Reply::Json("200 OK", chapter_body(9, 0))]);
    let mut session = Session::new(counting(&base, WAIT), chapter(9));
    assert!(session.wait_settled(WAIT));
    server.join().unwrap();

    let labels = Labels::default();
    let Screen::Chapter(view) = Screen::new(session.fetch_state(), &labels) else {
        panic!("a chapter without verses still loads");
    };
    assert_eq!(view.verses, VersesView::Empty(labels.verses_not_found.as_str()));
}

#[test]
fn missing_translation_uses_fallback() {
    let body = r#"{
      "code": 200,
      "status": "OK.",
      "data": {
        "name": { "long": "long 2", "short": "short 2", "translation": { "en": "The Cow" }, "transliteration": { "id": "Al-Baqarah" } },
        "numberOfVerses": 1,
        "verses": [ { "text": { "arab": "arab 1", "transliteration": {} } } ]
      }
    }"#;
    let (base, server) = serve(vec![Reply::Json("200 OK", body.to_string())]);
    let mut session = Session::new(counting(&base, WAIT), chapter(2));
    assert!(session.wait_settled(WAIT));
    server.join().unwrap();

    let labels = Labels::default();
    let Screen::Chapter(view) = Screen::new(session.fetch_state(), &labels) else {
        panic!("expected chapter 2 to load");
    };
    assert_eq!(view.translated_name, labels.translation_not_found);
    assert_eq!(view.transliterated_name, "Al-Baqarah");
    let VersesView::Listed(verses) = view.verses else {
        panic!("expected verses");
    };
    assert_eq!(verses[0].transliteration, labels.transliteration_not_found);
}
