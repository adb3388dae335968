//! Unit tests for the SearchController.
//!
//! A scripted `ArticleStore` stands in for the remote service so every
//! outcome (found, ambiguous, not found, transport failure) can be driven
//! deterministically. Files go to a temporary directory.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::rc::Rc;

use tempfile::TempDir;
use wikisearch::managers::history_manager::HistoryLogTrait;
use wikisearch::services::article_store::ArticleStore;
use wikisearch::services::search_controller::SearchController;
use wikisearch::types::article::{ArticleResult, ReplayOutcome, SearchOutcome};
use wikisearch::types::errors::LookupError;
use wikisearch::types::history::HistoryEntry;

type Calls = Rc<RefCell<Vec<(String, String)>>>;

/// Answers from a fixed table and records every call.
#[derive(Default)]
struct ScriptedStore {
    answers: HashMap<(String, String), Result<ArticleResult, LookupError>>,
    calls: Calls,
}

impl ScriptedStore {
    fn answer(mut self, query: &str, code: &str, result: Result<ArticleResult, LookupError>) -> Self {
        self.answers
            .insert((query.to_string(), code.to_string()), result);
        self
    }
}

impl ArticleStore for ScriptedStore {
    fn lookup(&self, query: &str, language_code: &str) -> Result<ArticleResult, LookupError> {
        self.calls
            .borrow_mut()
            .push((query.to_string(), language_code.to_string()));
        self.answers
            .get(&(query.to_string(), language_code.to_string()))
            .cloned()
            .unwrap_or(Ok(ArticleResult::NotFound))
    }
}

fn found(text: &str) -> Result<ArticleResult, LookupError> {
    Ok(ArticleResult::Found {
        text: text.to_string(),
    })
}

fn mercury_options() -> Vec<String> {
    vec![
        "Mercury (planet)".to_string(),
        "Mercury (element)".to_string(),
    ]
}

/// Controller over `store` writing into `dir`, plus a handle on the call log.
fn setup(store: ScriptedStore, dir: &TempDir) -> (SearchController, Calls) {
    let calls = store.calls.clone();
    let controller = SearchController::new(Box::new(store), dir.path())
        .with_history_file(dir.path().join("previous_search.txt"));
    (controller, calls)
}

#[test]
fn test_empty_query_skips_the_store() {
    let dir = TempDir::new().unwrap();
    let (mut controller, calls) = setup(ScriptedStore::default(), &dir);

    assert_eq!(controller.search("", "EN"), SearchOutcome::EmptyQuery);
    assert_eq!(controller.search("   \t", "EN"), SearchOutcome::EmptyQuery);
    assert!(calls.borrow().is_empty());
    assert!(controller.history().is_empty());
}

#[test]
fn test_found_writes_content_and_history() {
    let dir = TempDir::new().unwrap();
    let store = ScriptedStore::default().answer("Cats", "EN", found("Cats are small."));
    let (mut controller, _) = setup(store, &dir);

    let outcome = controller.search("Cats", "EN");

    assert_eq!(
        outcome,
        SearchOutcome::Displayed {
            text: "Cats are small.".to_string()
        }
    );
    let content = fs::read_to_string(dir.path().join("Cats_en.txt")).unwrap();
    assert_eq!(content, "Cats are small.");
    assert_eq!(controller.history().all(), &[HistoryEntry::new("Cats", "EN")]);

    let history_file = fs::read_to_string(dir.path().join("previous_search.txt")).unwrap();
    assert_eq!(history_file, "Cats (EN)\n");
}

#[test]
fn test_query_is_trimmed_before_lookup() {
    let dir = TempDir::new().unwrap();
    let store = ScriptedStore::default().answer("Cats", "EN", found("text"));
    let (mut controller, calls) = setup(store, &dir);

    controller.search("  Cats \n", "EN");

    assert_eq!(calls.borrow().as_slice(), &[("Cats".to_string(), "EN".to_string())]);
    assert!(controller.history().contains(&HistoryEntry::new("Cats", "EN")));
}

/// Line breaks are folded into spaces, so the stored entry reloads as itself.
#[test]
fn test_line_breaks_in_query_survive_reload() {
    let dir = TempDir::new().unwrap();
    let store = ScriptedStore::default().answer("Cats Dogs (EN)  Cats", "EN", found("mixed"));
    let (mut controller, calls) = setup(store, &dir);

    let outcome = controller.search("Cats\nDogs (EN)\r\nCats", "EN");

    assert_eq!(outcome, SearchOutcome::Displayed { text: "mixed".to_string() });
    assert_eq!(calls.borrow()[0].0, "Cats Dogs (EN)  Cats");
    let entry = HistoryEntry::new("Cats Dogs (EN)  Cats", "EN");
    assert_eq!(controller.history().all(), &[entry.clone()]);

    let (mut reloaded, _) = setup(ScriptedStore::default(), &dir);
    reloaded.load_history().unwrap();
    assert_eq!(reloaded.history().all(), &[entry.clone()]);
    assert_eq!(
        reloaded.replay(&entry),
        ReplayOutcome::Loaded { text: "mixed".to_string() }
    );
}

/// A code that cannot be written between parentheses is refused up front.
#[test]
fn test_malformed_language_code_fails_without_lookup() {
    let dir = TempDir::new().unwrap();
    let (mut controller, calls) = setup(ScriptedStore::default(), &dir);

    for code in ["", "E)N", "EN\n", "x (y"] {
        let outcome = controller.search("Cats", code);
        assert!(matches!(outcome, SearchOutcome::Failed { .. }), "code {:?}", code);
    }
    assert!(calls.borrow().is_empty());
    assert!(controller.history().is_empty());
}

/// Queries that differ only in characters the file name has to encode
/// still replay their own article.
#[test]
fn test_similar_queries_keep_separate_content_files() {
    let dir = TempDir::new().unwrap();
    let store = ScriptedStore::default()
        .answer("AC/DC", "EN", found("band"))
        .answer("AC_DC", "EN", found("underscore"))
        .answer("AC%2FDC", "EN", found("escaped"));
    let (mut controller, _) = setup(store, &dir);

    controller.search("AC/DC", "EN");
    controller.search("AC_DC", "EN");
    controller.search("AC%2FDC", "EN");

    for (query, text) in [("AC/DC", "band"), ("AC_DC", "underscore"), ("AC%2FDC", "escaped")] {
        assert_eq!(
            controller.replay(&HistoryEntry::new(query, "EN")),
            ReplayOutcome::Loaded { text: text.to_string() }
        );
    }
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 4);
}

/// The same query under a label and under a raw code is two entries with two files.
#[test]
fn test_label_and_raw_code_do_not_share_a_file() {
    let dir = TempDir::new().unwrap();
    let store = ScriptedStore::default()
        .answer("Cats", "EN", found("label"))
        .answer("Cats", "en", found("code"));
    let (mut controller, _) = setup(store, &dir);

    controller.search("Cats", "EN");
    controller.search("Cats", "en");

    assert_eq!(
        controller.replay(&HistoryEntry::new("Cats", "EN")),
        ReplayOutcome::Loaded { text: "label".to_string() }
    );
    assert_eq!(
        controller.replay(&HistoryEntry::new("Cats", "en")),
        ReplayOutcome::Loaded { text: "code".to_string() }
    );
}

#[test]
fn test_repeated_search_keeps_one_entry() {
    let dir = TempDir::new().unwrap();
    let store = ScriptedStore::default().answer("Cats", "EN", found("text"));
    let (mut controller, calls) = setup(store, &dir);

    for _ in 0..3 {
        controller.search("Cats", "EN");
    }

    assert_eq!(calls.borrow().len(), 3);
    assert_eq!(controller.history().len(), 1);
    let history_file = fs::read_to_string(dir.path().join("previous_search.txt")).unwrap();
    assert_eq!(history_file.lines().count(), 1);
}

#[test]
fn test_ambiguous_keeps_order_and_saves_nothing() {
    let dir = TempDir::new().unwrap();
    let store = ScriptedStore::default().answer(
        "Mercury",
        "EN",
        Ok(ArticleResult::Ambiguous {
            options: mercury_options(),
        }),
    );
    let (mut controller, _) = setup(store, &dir);

    let outcome = controller.search("Mercury", "EN");

    assert_eq!(
        outcome,
        SearchOutcome::Ambiguous {
            options: mercury_options()
        }
    );
    assert!(controller.history().is_empty());
    assert!(!dir.path().join("Mercury_en.txt").exists());
    assert!(!dir.path().join("previous_search.txt").exists());
}

#[test]
fn test_not_found_saves_nothing() {
    let dir = TempDir::new().unwrap();
    let (mut controller, _) = setup(ScriptedStore::default(), &dir);

    assert_eq!(controller.search("Qwzxv", "EN"), SearchOutcome::NotFound);
    assert!(controller.history().is_empty());
    assert!(!dir.path().join("Qwzxv_en.txt").exists());
}

#[test]
fn test_transport_failure_is_reported() {
    let dir = TempDir::new().unwrap();
    let store = ScriptedStore::default().answer(
        "Cats",
        "EN",
        Err(LookupError::Transport("network unreachable".to_string())),
    );
    let (mut controller, _) = setup(store, &dir);

    match controller.search("Cats", "EN") {
        SearchOutcome::Failed { reason } => assert!(reason.contains("network unreachable")),
        other => panic!("expected Failed, got {:?}", other),
    }
    assert!(controller.history().is_empty());
}

/// The file written by `search` is the one the history resolves to later.
#[test]
fn test_content_file_key_matches_history_resolution() {
    let dir = TempDir::new().unwrap();
    let store = ScriptedStore::default().answer("Cats", "EN", found("text"));
    let (mut controller, _) = setup(store, &dir);

    controller.search("Cats", "EN");

    let key = controller
        .history()
        .resolve_content_file(&HistoryEntry::new("Cats", "EN"))
        .unwrap();
    assert_eq!(
        dir.path().join(&key),
        controller.content_path("Cats", "EN")
    );
    assert!(dir.path().join(key).exists());
}

#[test]
fn test_replay_loaded_then_missing() {
    let dir = TempDir::new().unwrap();
    let store = ScriptedStore::default().answer("Cats", "EN", found("Cats are small."));
    let (mut controller, calls) = setup(store, &dir);
    controller.search("Cats", "EN");
    let entry = HistoryEntry::new("Cats", "EN");

    assert_eq!(
        controller.replay(&entry),
        ReplayOutcome::Loaded {
            text: "Cats are small.".to_string()
        }
    );
    assert_eq!(calls.borrow().len(), 1, "replay must not call the store");

    fs::remove_file(dir.path().join("Cats_en.txt")).unwrap();
    assert_eq!(controller.replay(&entry), ReplayOutcome::FileMissing);
}

#[test]
fn test_replay_unknown_entry() {
    let dir = TempDir::new().unwrap();
    let (controller, _) = setup(ScriptedStore::default(), &dir);
    assert_eq!(
        controller.replay(&HistoryEntry::new("Dogs", "EN")),
        ReplayOutcome::NotInHistory
    );
}

/// Content files are truncated, not appended to, when overwritten.
#[test]
fn test_overwrite_truncates_previous_content() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("Cats_en.txt"), "an older and much longer article body").unwrap();
    let store = ScriptedStore::default().answer("Cats", "EN", found("short"));
    let (mut controller, _) = setup(store, &dir);

    controller.search("Cats", "EN");

    assert_eq!(
        fs::read_to_string(dir.path().join("Cats_en.txt")).unwrap(),
        "short"
    );
}

/// When the article cannot be saved it is still shown, but not remembered.
#[test]
fn test_unwritable_content_dir_still_displays() {
    let dir = TempDir::new().unwrap();
    let not_a_dir = dir.path().join("occupied");
    fs::write(&not_a_dir, "file in the way").unwrap();

    let store = ScriptedStore::default().answer("Cats", "EN", found("text"));
    let mut controller = SearchController::new(Box::new(store), &not_a_dir);

    assert_eq!(
        controller.search("Cats", "EN"),
        SearchOutcome::Displayed {
            text: "text".to_string()
        }
    );
    assert!(controller.history().is_empty());
}

#[test]
fn test_history_survives_reload() {
    let dir = TempDir::new().unwrap();
    let store = ScriptedStore::default()
        .answer("Cats", "EN", found("a"))
        .answer("Berlin", "DE", found("b"));
    let (mut controller, _) = setup(store, &dir);
    controller.search("Cats", "EN");
    controller.search("Berlin", "DE");

    let (mut reopened, _) = setup(ScriptedStore::default(), &dir);
    assert_eq!(reopened.load_history().unwrap(), 2);
    assert_eq!(
        reopened.history().all(),
        &[HistoryEntry::new("Cats", "EN"), HistoryEntry::new("Berlin", "DE")]
    );
}

#[test]
fn test_resolve_option_builds_links() {
    let dir = TempDir::new().unwrap();
    let (controller, calls) = setup(ScriptedStore::default(), &dir);

    let link = controller.resolve_option("Mercury (planet)", "EN");

    assert_eq!(link.direct, "https://en.wikipedia.org/wiki/Mercury_(planet)");
    assert_eq!(
        link.search_fallback,
        "https://en.wikipedia.org/wiki/Special:Search?search=Mercury+(planet)"
    );
    assert!(calls.borrow().is_empty());
}

#[test]
fn test_resolve_option_custom_domain() {
    let dir = TempDir::new().unwrap();
    let controller = SearchController::new(Box::new(ScriptedStore::default()), dir.path())
        .with_service_domain("wikipedia.example");
    let link = controller.resolve_option("Paris", "fr");
    assert_eq!(link.direct, "https://fr.wikipedia.example/wiki/Paris");
}
