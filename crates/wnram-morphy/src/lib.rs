//! Morphological analysis for inflected surface forms.
//!
//! Maps an inflected word ("wolves", "played", "fastest") to the base lemma
//! a dictionary index would carry, using two fixed tables: the per-POS
//! irregular-inflection exception lists shipped with the dictionary (`*.exc`
//! files) and a suffix-rule table whose row ordinals are stable and part of
//! the public contract.
//!
//! The crate stays decoupled from any concrete database layout: the search
//! verifies rule candidates through a caller-supplied `is_defined` predicate,
//! which typically delegates to an index-membership check.
//!
//! ```rust
//! use wnram_morphy::{Morphy, word_base};
//! use wnram_types::PartOfSpeech;
//!
//! // Raw rule application, no existence check:
//! assert_eq!(word_base("dogs", 0), "dog");
//!
//! // Full search against a toy index:
//! let morph = Morphy::default();
//! let defined = |_: PartOfSpeech, lemma: &str| lemma == "dog";
//! assert_eq!(
//!     morph.morph_word("dogs", PartOfSpeech::Noun, defined),
//!     Some("dog".to_string()),
//! );
//! ```

use std::borrow::Cow;
use std::collections::HashMap;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

use thiserror::Error;
use wnram_types::{PartOfSpeech, normalize_lemma};

/// One row of the suffix-rule table: strip `suffix`, append `replacement`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct SuffixRule {
    pub pos: PartOfSpeech,
    pub suffix: &'static str,
    pub replacement: &'static str,
}

const fn rule(pos: PartOfSpeech, suffix: &'static str, replacement: &'static str) -> SuffixRule {
    SuffixRule {
        pos,
        suffix,
        replacement,
    }
}

/// The detachment rules, in historical order. Row ordinals are stable:
/// nouns occupy 0..=7, verbs 8..=15, adjectives 16..=19. External tooling
/// addresses rows by ordinal, so rows must never be reordered.
pub const SUFFIX_RULES: [SuffixRule; 20] = [
    rule(PartOfSpeech::Noun, "s", ""),
    rule(PartOfSpeech::Noun, "ses", "s"),
    rule(PartOfSpeech::Noun, "xes", "x"),
    rule(PartOfSpeech::Noun, "zes", "z"),
    rule(PartOfSpeech::Noun, "ches", "ch"),
    rule(PartOfSpeech::Noun, "shes", "sh"),
    rule(PartOfSpeech::Noun, "men", "man"),
    rule(PartOfSpeech::Noun, "ies", "y"),
    rule(PartOfSpeech::Verb, "s", ""),
    rule(PartOfSpeech::Verb, "ies", "y"),
    rule(PartOfSpeech::Verb, "es", "e"),
    rule(PartOfSpeech::Verb, "es", ""),
    rule(PartOfSpeech::Verb, "ed", "e"),
    rule(PartOfSpeech::Verb, "ed", ""),
    rule(PartOfSpeech::Verb, "ing", "e"),
    rule(PartOfSpeech::Verb, "ing", ""),
    rule(PartOfSpeech::Adjective, "er", ""),
    rule(PartOfSpeech::Adjective, "est", ""),
    rule(PartOfSpeech::Adjective, "er", "e"),
    rule(PartOfSpeech::Adjective, "est", "e"),
];

/// Nouns shorter than this never yield a rule candidate.
const MIN_NOUN_LEN: usize = 3;

/// Apply one suffix rule to a word by ordinal, with no existence check and
/// no POS gating beyond the suffix text itself.
///
/// Returns the stem plus replacement even when the result is nonsensical for
/// the word; returns the word unchanged when the suffix does not match.
///
/// # Panics
///
/// Panics if `ordinal` is outside `0..SUFFIX_RULES.len()`.
pub fn word_base(word: &str, ordinal: usize) -> Cow<'_, str> {
    let rule = &SUFFIX_RULES[ordinal];
    match word.strip_suffix(rule.suffix) {
        Some(stem) => Cow::Owned(format!("{stem}{}", rule.replacement)),
        None => Cow::Borrowed(word),
    }
}

/// Failure to read an exception list that exists on disk.
#[derive(Debug, Error)]
#[error("reading exception list {}: {source}", .path.display())]
pub struct ExcError {
    pub path: PathBuf,
    #[source]
    pub source: io::Error,
}

/// Exception tables plus the rule search. Built once from a dictionary
/// directory and immutable afterwards.
#[derive(Debug, Default)]
pub struct Morphy {
    exceptions: [HashMap<String, Vec<String>>; 4],
}

impl Morphy {
    /// Load the per-POS exception lists (`noun.exc`, `verb.exc`, `adj.exc`,
    /// `adv.exc`) from a dictionary directory.
    ///
    /// A missing file means that POS has no irregular forms; an unreadable
    /// one is an error.
    pub fn load(dict_dir: impl AsRef<Path>) -> Result<Self, ExcError> {
        let dir = dict_dir.as_ref();
        let mut exceptions: [HashMap<String, Vec<String>>; 4] = Default::default();
        for pos in PartOfSpeech::ALL {
            let path = dir.join(format!("{}.exc", pos.file_suffix()));
            exceptions[pos.index()] = load_exc(path)?;
        }
        Ok(Self { exceptions })
    }

    /// Irregular base forms recorded for an inflected surface form, in file
    /// order, or an empty slice.
    pub fn exceptions(&self, pos: PartOfSpeech, inflected: &str) -> &[String] {
        self.exceptions[pos.index()]
            .get(inflected)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Find the base form of an inflected word, verifying rule candidates
    /// through `is_defined`.
    ///
    /// The search never returns the input unchanged: a word already in base
    /// form comes back as `None` unless an exception or rule maps it
    /// somewhere. Adverbs only resolve through the exception list. Multi-token
    /// forms are morphed as one underscore-joined string, so suffix rules act
    /// on the final token and irregular compounds need explicit exception
    /// entries.
    pub fn morph_word<F>(&self, word: &str, pos: PartOfSpeech, is_defined: F) -> Option<String>
    where
        F: Fn(PartOfSpeech, &str) -> bool,
    {
        let word = normalize_lemma(word);

        if let Some(bases) = self.exceptions[pos.index()].get(&word) {
            return bases.first().cloned();
        }
        if pos == PartOfSpeech::Adverb {
            return None;
        }

        let mut stem = word.as_str();
        let mut held = "";
        if pos == PartOfSpeech::Noun {
            if let Some(s) = stem.strip_suffix("ful") {
                stem = s;
                held = "ful";
            } else if stem.ends_with("ss") || stem.len() < MIN_NOUN_LEN {
                return None;
            }
        }

        for ordinal in 0..SUFFIX_RULES.len() {
            if SUFFIX_RULES[ordinal].pos != pos {
                continue;
            }
            let candidate = word_base(stem, ordinal);
            if candidate != stem && is_defined(pos, &candidate) {
                return Some(format!("{candidate}{held}"));
            }
        }

        // "spoonful"-style nouns whose bare stem is itself a lemma.
        if !held.is_empty() && is_defined(pos, stem) {
            return Some(stem.to_string());
        }

        None
    }
}

fn load_exc(path: PathBuf) -> Result<HashMap<String, Vec<String>>, ExcError> {
    if !path.exists() {
        return Ok(HashMap::new());
    }
    let file = File::open(&path).map_err(|source| ExcError {
        path: path.clone(),
        source,
    })?;
    let reader = BufReader::new(file);
    let mut map = HashMap::new();
    for line in reader.lines() {
        let line = line.map_err(|source| ExcError {
            path: path.clone(),
            source,
        })?;
        let mut parts = line.split_whitespace();
        let Some(inflected) = parts.next() else {
            continue;
        };
        let bases: Vec<String> = parts.map(normalize_lemma).collect();
        if !bases.is_empty() {
            map.insert(normalize_lemma(inflected), bases);
        }
    }
    Ok(map)
}
