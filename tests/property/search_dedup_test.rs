//! Property-based tests for search history dedup and persistence.
//!
//! However many times the same successful search is repeated, the history
//! holds exactly one entry for that (query, language) pair. Whatever the
//! queries contain, the saved history reloads unchanged and every entry
//! replays its own article.

use proptest::prelude::*;
use tempfile::TempDir;
use wikisearch::managers::history_manager::HistoryLogTrait;
use wikisearch::services::article_store::ArticleStore;
use wikisearch::services::search_controller::SearchController;
use wikisearch::types::article::{ArticleResult, ReplayOutcome, SearchOutcome};
use wikisearch::types::errors::LookupError;
use wikisearch::types::history::HistoryEntry;

/// Finds an article for every query.
struct AlwaysFound;

impl ArticleStore for AlwaysFound {
    fn lookup(&self, query: &str, _language_code: &str) -> Result<ArticleResult, LookupError> {
        Ok(ArticleResult::Found {
            text: format!("Article about {}", query),
        })
    }
}

fn arb_query() -> impl Strategy<Value = String> {
    "[A-Za-z0-9][A-Za-z0-9 ]{0,20}[A-Za-z0-9]"
}

fn arb_code() -> impl Strategy<Value = String> {
    prop_oneof![Just("EN"), Just("RU"), Just("DE"), Just("JA")].prop_map(String::from)
}

/// Queries full of characters that are awkward in file names and history lines.
fn arb_awkward_query() -> impl Strategy<Value = String> {
    "[a-zA-Z_%/()\\\\ \n\r\t]{1,16}"
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn repeated_search_yields_single_entry(
        query in arb_query(),
        code in arb_code(),
        repeats in 1usize..6,
    ) {
        let dir = TempDir::new().unwrap();
        let mut controller = SearchController::new(Box::new(AlwaysFound), dir.path())
            .with_history_file(dir.path().join("previous_search.txt"));

        for _ in 0..repeats {
            let outcome = controller.search(&query, &code);
            let is_displayed = matches!(outcome, SearchOutcome::Displayed { .. });
            prop_assert!(is_displayed);
        }

        let wanted = HistoryEntry::new(query.clone(), code.clone());
        let matching = controller
            .history()
            .all()
            .iter()
            .filter(|e| **e == wanted)
            .count();
        prop_assert_eq!(matching, 1);
        prop_assert!(controller.history().resolve_content_file(&wanted).is_some());
    }

    #[test]
    fn saved_history_reloads_and_replays(
        queries in prop::collection::vec((arb_awkward_query(), arb_code()), 1..8),
    ) {
        let dir = TempDir::new().unwrap();
        let history_file = dir.path().join("previous_search.txt");
        let mut controller = SearchController::new(Box::new(AlwaysFound), dir.path())
            .with_history_file(&history_file);

        for (query, code) in &queries {
            controller.search(query, code);
        }

        let mut reloaded = SearchController::new(Box::new(AlwaysFound), dir.path())
            .with_history_file(&history_file);
        reloaded.load_history().unwrap();
        prop_assert_eq!(reloaded.history().all(), controller.history().all());

        for entry in reloaded.history().all() {
            prop_assert_eq!(
                reloaded.replay(entry),
                ReplayOutcome::Loaded {
                    text: format!("Article about {}", entry.query)
                }
            );
        }
    }
}
