//! Regression tests against a full WordNet 3.1 dictionary.
//!
//! Point `WORDNET_DIR` at the `dict` directory of a WordNet 3.1 install to
//! run these; they are skipped with a notice otherwise. The record counts
//! asserted here are snapshot-specific, not algorithmic laws.

use std::collections::HashSet;
use std::env;
use std::sync::OnceLock;

use wnram_db::{Criteria, Database, RelationKind};
use wnram_types::PartOfSpeech;

fn database() -> Option<&'static Database> {
    static DB: OnceLock<Option<Database>> = OnceLock::new();
    DB.get_or_init(|| {
        let dir = env::var("WORDNET_DIR").ok()?;
        Some(Database::open(dir).expect("load WordNet 3.1"))
    })
    .as_ref()
}

macro_rules! require_dict {
    () => {
        match database() {
            Some(db) => db,
            None => {
                eprintln!("skipping: WORDNET_DIR not set");
                return;
            }
        }
    };
}

#[test]
fn finds_an_adjective_for_good() {
    let db = require_dict!();
    let found = db.lookup(Criteria::matching("good")).expect("lookup");
    assert!(found.iter().any(|l| l.pos() == PartOfSpeech::Adjective));
}

#[test]
fn exception_plural_resolves_to_a_noun() {
    let db = require_dict!();
    let found = db.lookup(Criteria::matching("wolves")).expect("lookup");
    assert!(found.iter().any(|l| l.pos() == PartOfSpeech::Noun));
}

#[test]
fn regular_inflections_resolve() {
    let db = require_dict!();
    for (inflected, pos) in [
        ("dogs", PartOfSpeech::Noun),
        ("cars", PartOfSpeech::Noun),
        ("houses", PartOfSpeech::Noun),
        ("runs", PartOfSpeech::Verb),
        ("flies", PartOfSpeech::Verb),
        ("plays", PartOfSpeech::Verb),
        ("faster", PartOfSpeech::Adjective),
        ("stronger", PartOfSpeech::Adjective),
    ] {
        let found = db.lookup(Criteria::matching(inflected)).expect("lookup");
        assert!(
            found.iter().any(|l| l.pos() == pos),
            "no {pos} result for {inflected}"
        );
    }
}

#[test]
fn awesome_is_one_cluster_headed_by_amazing() {
    let db = require_dict!();
    let found = db
        .lookup(Criteria::matching("awesome").with_pos(&[PartOfSpeech::Adjective]))
        .expect("lookup");
    assert_eq!(found.len(), 1, "got {found:?}");
    assert_eq!(found[0].head_word(), "amazing");
}

#[test]
fn yummy_synonyms_include_delicious_and_delectable() {
    let db = require_dict!();
    let found = db
        .lookup(Criteria::matching("yummy").with_pos(&[PartOfSpeech::Adjective]))
        .expect("lookup");
    assert_eq!(found.len(), 1, "got {found:?}");
    let syns = found[0].synonyms();
    assert!(syns.contains(&"delicious"), "missing delicious in {syns:?}");
    assert!(syns.contains(&"delectable"), "missing delectable in {syns:?}");
}

#[test]
fn antonyms_of_good_include_bad_and_evil() {
    let db = require_dict!();
    let found = db
        .lookup(Criteria::matching("good").with_pos(&[PartOfSpeech::Adjective]))
        .expect("lookup");
    let mut antonyms = HashSet::new();
    for f in &found {
        for a in f.related(RelationKind::Antonym).expect("antonyms") {
            antonyms.insert(a.head_word().to_string());
        }
    }
    assert!(antonyms.contains("bad"), "missing bad in {antonyms:?}");
    assert!(antonyms.contains("evil"), "missing evil in {antonyms:?}");
}

#[test]
fn hypernyms_of_jab_include_punch() {
    let db = require_dict!();
    let found = db
        .lookup(Criteria::matching("jab").with_pos(&[PartOfSpeech::Noun]))
        .expect("lookup");
    let mut hypernyms = HashSet::new();
    for f in &found {
        for h in f.related(RelationKind::Hypernym).expect("hypernyms") {
            hypernyms.insert(h.head_word().to_string());
        }
    }
    assert!(hypernyms.contains("punch"), "missing punch in {hypernyms:?}");
}

#[test]
fn hyponyms_of_food_include_everyday_dishes() {
    let db = require_dict!();
    let found = db
        .lookup(Criteria::matching("food").with_pos(&[PartOfSpeech::Noun]))
        .expect("lookup");
    let mut hyponyms = HashSet::new();
    for f in &found {
        for h in f.related(RelationKind::Hyponym).expect("hyponyms") {
            for word in h.synonyms() {
                hyponyms.insert(word.to_string());
            }
        }
    }
    for expected in ["chocolate", "cheese", "pasta", "leftovers"] {
        assert!(hyponyms.contains(expected), "missing {expected}");
    }
}

#[test]
fn noun_record_count_matches_the_snapshot() {
    let db = require_dict!();
    let mut count = 0usize;
    db.iterate::<_, std::convert::Infallible>(&[PartOfSpeech::Noun], |_| {
        count += 1;
        Ok(())
    })
    .expect("iterate");
    assert_eq!(count, 82_192);
}

#[test]
fn no_lookup_emits_a_synset_twice() {
    let db = require_dict!();
    for word in ["good", "works", "flies", "better", "food"] {
        let found = db.lookup(Criteria::matching(word)).expect("lookup");
        let mut seen = HashSet::new();
        for l in &found {
            assert!(seen.insert(l.id()), "{word} emitted {} twice", l.id());
        }
    }
}

#[test]
fn morph_word_against_the_full_tables() {
    let db = require_dict!();
    let cases: &[(&str, PartOfSpeech, Option<&str>)] = &[
        ("dogs", PartOfSpeech::Noun, Some("dog")),
        ("buses", PartOfSpeech::Noun, Some("bus")),
        ("boxes", PartOfSpeech::Noun, Some("box")),
        ("handful", PartOfSpeech::Noun, Some("hand")),
        ("men", PartOfSpeech::Noun, Some("man")),
        ("ladies", PartOfSpeech::Noun, Some("lady")),
        ("fullness", PartOfSpeech::Noun, None),
        ("a", PartOfSpeech::Noun, None),
        ("runs", PartOfSpeech::Verb, Some("run")),
        ("flies", PartOfSpeech::Verb, Some("fly")),
        ("played", PartOfSpeech::Verb, Some("play")),
        ("playing", PartOfSpeech::Verb, Some("play")),
        ("faster", PartOfSpeech::Adjective, Some("fast")),
        ("fastest", PartOfSpeech::Adjective, Some("fast")),
        ("stronger", PartOfSpeech::Adjective, Some("strong")),
        ("strongest", PartOfSpeech::Adjective, Some("strong")),
        ("quickly", PartOfSpeech::Adverb, None),
        ("slowly", PartOfSpeech::Adverb, None),
    ];
    for (word, pos, want) in cases {
        assert_eq!(
            db.morph_word(word, *pos).as_deref(),
            *want,
            "morph_word({word:?}, {pos})"
        );
    }
}
