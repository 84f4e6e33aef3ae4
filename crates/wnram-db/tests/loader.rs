use std::fs;
use std::path::{Path, PathBuf};

use wnram_db::{Database, Error, LoadMode};
use wnram_types::PartOfSpeech;

fn fixture_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("dict")
}

fn copy_fixture_to(dir: &Path) {
    for entry in fs::read_dir(fixture_dir()).expect("fixture dir") {
        let entry = entry.expect("dir entry");
        fs::copy(entry.path(), dir.join(entry.file_name())).expect("copy fixture file");
    }
}

#[test]
fn loads_the_fixture_dictionary() {
    let db = Database::open(fixture_dir()).expect("load fixtures");
    assert_eq!(db.synset_count(), 33);
    assert_eq!(db.synset_count_for(PartOfSpeech::Noun), 19);
    assert_eq!(db.synset_count_for(PartOfSpeech::Verb), 4);
    assert_eq!(db.synset_count_for(PartOfSpeech::Adjective), 8);
    assert_eq!(db.synset_count_for(PartOfSpeech::Adverb), 2);
    assert_eq!(db.lemma_count(), 24 + 4 + 16 + 2);
}

#[test]
fn lemma_lookups_are_normalized_and_pos_scoped() {
    let db = Database::open(fixture_dir()).expect("load fixtures");
    assert!(db.lemma_exists(PartOfSpeech::Noun, "dog"));
    assert!(db.lemma_exists(PartOfSpeech::Noun, " Oil Change "));
    assert!(!db.lemma_exists(PartOfSpeech::Verb, "dog"));
    assert!(!db.lemma_exists(PartOfSpeech::Noun, "run"));
}

#[test]
fn owned_mode_loads_identically() {
    let mmap = Database::open_with_mode(fixture_dir(), LoadMode::Mmap).expect("mmap load");
    let owned = Database::open_with_mode(fixture_dir(), LoadMode::Owned).expect("owned load");
    assert_eq!(mmap.synset_count(), owned.synset_count());
    assert_eq!(mmap.lemma_count(), owned.lemma_count());
}

#[test]
fn preamble_lines_are_not_entries() {
    // Both index and data fixtures begin with license-style lines; none of
    // their tokens may leak into the tables.
    let db = Database::open(fixture_dir()).expect("load fixtures");
    assert!(!db.lemma_exists(PartOfSpeech::Noun, "1"));
    assert!(!db.lemma_exists(PartOfSpeech::Noun, "this"));
    assert!(!db.lemma_exists(PartOfSpeech::Adverb, "preamble"));
}

#[test]
fn missing_required_file_is_an_initialization_error() {
    let tmp = tempfile::tempdir().expect("tempdir");
    copy_fixture_to(tmp.path());
    fs::remove_file(tmp.path().join("index.verb")).expect("remove index.verb");
    let err = Database::open(tmp.path()).unwrap_err();
    assert!(matches!(err, Error::MissingFile { .. }), "got {err}");
}

#[test]
fn absent_exception_lists_are_tolerated() {
    // The fixture deliberately ships no verb.exc; regular verb morphology
    // must still work.
    let db = Database::open(fixture_dir()).expect("load fixtures");
    assert_eq!(db.morph_word("runs", PartOfSpeech::Verb).as_deref(), Some("run"));
}

#[test]
fn malformed_data_line_aborts_the_load() {
    let tmp = tempfile::tempdir().expect("tempdir");
    copy_fixture_to(tmp.path());
    let path = tmp.path().join("data.noun");
    let mut contents = fs::read_to_string(&path).expect("read data.noun");
    contents.push_str("00009000 05 n zz mouse 0 000 | word count is not hex\n");
    fs::write(&path, contents).expect("write data.noun");

    let err = Database::open(tmp.path()).unwrap_err();
    assert!(
        matches!(err, Error::Parse { file: "data.noun", .. }),
        "got {err}"
    );
}

#[test]
fn malformed_index_line_aborts_the_load() {
    let tmp = tempfile::tempdir().expect("tempdir");
    copy_fixture_to(tmp.path());
    let path = tmp.path().join("index.adv");
    let mut contents = fs::read_to_string(&path).expect("read index.adv");
    contents.push_str("badly r x 0 1 1 00009000\n");
    fs::write(&path, contents).expect("write index.adv");

    let err = Database::open(tmp.path()).unwrap_err();
    assert!(
        matches!(err, Error::Parse { file: "index.adv", .. }),
        "got {err}"
    );
}

#[test]
fn duplicate_offsets_abort_the_load() {
    let tmp = tempfile::tempdir().expect("tempdir");
    copy_fixture_to(tmp.path());
    let path = tmp.path().join("data.adv");
    let mut contents = fs::read_to_string(&path).expect("read data.adv");
    contents.push_str("00004000 02 r 01 rapidly 0 000 | reuses an existing offset\n");
    fs::write(&path, contents).expect("write data.adv");

    let err = Database::open(tmp.path()).unwrap_err();
    assert!(matches!(err, Error::Parse { file: "data.adv", .. }), "got {err}");
}
