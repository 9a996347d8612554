//! Integration tests for the search session: state transitions and reloads
//! racing with searches.

mod common;

use common::sample_voters;
use std::sync::Arc;
use std::thread;
use voter_roll_search::{LoadState, MatchOptions, SearchSession, VoterRecord, DEFAULT_LIMIT};

fn roll(prefix: &str, count: usize) -> Vec<VoterRecord> {
    (0..count)
        .map(|i| VoterRecord::new(format!("{}{:07}", prefix, i)).with_name_latin("Lakshmi Amma"))
        .collect()
}

#[test]
fn test_install_and_search() {
    let session = SearchSession::default();
    assert_eq!(session.install(sample_voters()), LoadState::Ready { records: 5 });
    assert_eq!(session.stats().total, 5);
    assert!(!session.search("ravi", DEFAULT_LIMIT).is_empty());
}

#[test]
fn test_install_empty_clears_previous_corpus() {
    let session = SearchSession::default();
    session.install(sample_voters());
    assert_eq!(session.install(Vec::new()), LoadState::Empty);
    assert!(session.search("ravi", DEFAULT_LIMIT).is_empty());
    assert_eq!(session.stats().total, 0);
}

#[test]
fn test_session_options_are_applied() {
    let strict = MatchOptions {
        threshold: 0.0,
        ..Default::default()
    };
    let session = SearchSession::new(strict);
    session.install(sample_voters());

    assert!(session.search("Mohanan Pilai", DEFAULT_LIMIT).is_empty());
    assert!(!session.search("Mohanan Pillai", DEFAULT_LIMIT).is_empty());
}

#[test]
fn test_searches_see_whole_corpus_during_reload() {
    let session = Arc::new(SearchSession::default());
    session.install(roll("OLD", 200));

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let session = session.clone();
            thread::spawn(move || {
                for _ in 0..50 {
                    let results = session.search("lakshmi", DEFAULT_LIMIT);
                    assert_eq!(results.len(), DEFAULT_LIMIT);
                    let old = results.iter().filter(|r| r.record.voter_id.starts_with("OLD")).count();
                    assert!(old == 0 || old == results.len(), "mixed corpora in one result set");
                }
            })
        })
        .collect();

    for round in 0..10 {
        let prefix = if round % 2 == 0 { "NEW" } else { "OLD" };
        session.install(roll(prefix, 200));
    }

    for reader in readers {
        reader.join().unwrap();
    }
    assert_eq!(session.metrics().snapshot_loads_total(), 11);
}
