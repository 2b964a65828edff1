//! Property-based tests for the survey state machine and artifacts.
//!
//! These tests use proptest to verify navigation and persistence
//! properties hold across many randomly generated catalogs and inputs.

use chromasurvey::artifact::{self, ArtifactName, DEFAULT_PREFIX};
use chromasurvey::core::{Catalog, Color, Position, ResponseSet};
use chromasurvey::session::{InProgress, Survey};
use proptest::prelude::*;
use std::collections::BTreeMap;

prop_compose! {
    fn arbitrary_catalog()(sizes in prop::collection::vec(1..5usize, 1..5)) -> Catalog {
        Catalog::new(sizes.iter().enumerate().map(|(c, &n)| {
            (format!("Category{c}"), (0..n).map(|w| format!("Word{c}_{w}")).collect::<Vec<_>>())
        }))
        .unwrap()
    }
}

prop_compose! {
    fn arbitrary_response_set()(
        entries in prop::collection::vec(("[A-Z][a-z]{0,8}", "[A-Za-z ]{1,10}", "#[0-9a-fA-F]{6}"), 0..12),
        unanswered in prop::collection::vec("[A-Z][a-z]{0,8}", 0..3)
    ) -> ResponseSet {
        let mut raw: BTreeMap<String, BTreeMap<String, Color>> = BTreeMap::new();
        for category in unanswered {
            raw.entry(category).or_default();
        }
        for (category, word, color) in entries {
            raw.entry(category).or_default().insert(word, Color::new(color));
        }
        ResponseSet::from(raw)
    }
}

fn hex() -> impl Strategy<Value = String> {
    "#[0-9A-F]{6}"
}

fn expect_running(survey: Survey) -> InProgress {
    match survey {
        Survey::InProgress(running) => running,
        Survey::Complete(_) => panic!("Expected InProgress"),
    }
}

/// Advance `steps` words with a fixed color.
fn walk(catalog: Catalog, steps: usize) -> InProgress {
    let mut running = InProgress::start(catalog);
    for _ in 0..steps {
        running = expect_running(running.submit_and_advance("#808080"));
    }
    running
}

proptest! {
    #[test]
    fn full_pass_completes_with_one_entry_per_word(
        catalog in arbitrary_catalog(),
        seed in prop::collection::vec(hex(), 20),
    ) {
        let total = catalog.total_words();
        let colors: Vec<String> = (0..total).map(|i| seed[i % seed.len()].clone()).collect();

        let mut survey = Survey::start(catalog.clone());
        for color in &colors {
            prop_assert!(!survey.is_complete());
            survey = expect_running(survey).submit_and_advance(color.as_str());
        }

        let done = survey.as_complete().expect("survey should be complete");
        let set = done.response_set();
        prop_assert_eq!(set.len(), total);
        for (i, key) in catalog.keys().enumerate() {
            let (category, word) = catalog.word(key).unwrap();
            prop_assert_eq!(set.get(category, word).map(Color::as_str), Some(colors[i].as_str()));
        }
    }

    #[test]
    fn has_previous_only_false_at_start(
        catalog in arbitrary_catalog(),
        ops in prop::collection::vec(any::<bool>(), 0..30),
    ) {
        let total = catalog.total_words();
        let mut running = InProgress::start(catalog);
        let mut advanced = 0usize;

        for forward in ops {
            if forward && advanced + 1 < total {
                running = expect_running(running.submit_and_advance("#123456"));
                advanced += 1;
            } else if running.has_previous() {
                running.retreat().unwrap();
                advanced -= 1;
            }
            prop_assert_eq!(running.has_previous(), running.position() != Position::start());
            prop_assert_eq!(running.progress().passed, advanced);
        }
    }

    #[test]
    fn retreat_then_submit_overwrites_in_place(
        catalog in arbitrary_catalog(),
        steps in 1..20usize,
        color in hex(),
    ) {
        let total = catalog.total_words();
        prop_assume!(total > 1);
        let steps = 1 + steps % (total - 1);

        let mut running = walk(catalog, steps);
        let before = running.position();
        let answered = running.responses().len();

        running.retreat().unwrap();
        let revisited = running.current_word().key;
        let running = expect_running(running.submit_and_advance(color.as_str()));

        prop_assert_eq!(running.position(), before);
        prop_assert_eq!(running.responses().len(), answered);
        prop_assert_eq!(running.responses().get(revisited), Some(&Color::new(color)));
        for (key, recorded) in running.responses().iter() {
            if key != revisited {
                prop_assert_eq!(recorded.as_str(), "#808080");
            }
        }
    }

    #[test]
    fn progress_is_monotonic_and_ends_just_below_one(catalog in arbitrary_catalog()) {
        let total = catalog.total_words();
        let mut running = InProgress::start(catalog);
        let mut last = running.progress().fraction();
        prop_assert_eq!(last, 0.0);

        for _ in 1..total {
            running = expect_running(running.submit_and_advance("#FFFFFF"));
            let fraction = running.progress().fraction();
            prop_assert!(fraction >= last);
            prop_assert!(fraction < 1.0);
            last = fraction;
        }

        prop_assert_eq!(last, (total - 1) as f64 / total as f64);
        prop_assert!(running.submit_and_advance("#FFFFFF").is_complete());
    }

    #[test]
    fn export_import_export_is_identity(set in arbitrary_response_set()) {
        let name = ArtifactName::new(DEFAULT_PREFIX, chrono::NaiveDateTime::default());
        let first = artifact::export(&set, name.clone()).unwrap();
        let imported = artifact::import(&first.bytes).unwrap();
        let second = artifact::export(&imported, name).unwrap();

        prop_assert_eq!(&imported, &set);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn malformed_import_leaves_session_unchanged(
        catalog in arbitrary_catalog(),
        steps in 0..10usize,
        junk in "[^{}]{0,40}",
    ) {
        let steps = steps % catalog.total_words();
        let mut survey = Survey::from(walk(catalog, steps));
        let phase = survey.phase();
        let responses = survey.responses().clone();

        let err = survey.load_prior(junk.as_bytes()).unwrap_err();

        prop_assert!(err.is_malformed());
        prop_assert_eq!(survey.phase(), phase);
        prop_assert_eq!(survey.responses(), &responses);
        prop_assert!(survey.prior().is_none());
    }
}
