//! Read-only, fully memory-resident lexical database over WordNet-format
//! dictionary files.
//!
//! [`Database::open`] ingests the per-POS `index.*`/`data.*` files plus the
//! optional `*.exc` exception lists from one directory and builds three
//! immutable table families: a sorted lemma index, a per-POS synset store
//! keyed by record offset, and the irregular-inflection tables used by
//! morphological search. Construction is atomic: any missing file or
//! malformed line fails the whole load and no instance is produced.
//!
//! Queries run against the loaded value with no further I/O and no locks;
//! `&Database` is freely shareable across threads. A [`Lookup`] is a cheap
//! borrowed view of one synonym cluster, and relations between clusters are
//! resolved on demand through the synset store rather than materialized as
//! in-memory links, since the relation graph is cyclic (hypernym/hyponym are
//! mutual inverses).
//!
//! # Example
//! ```no_run
//! use wnram_db::{Criteria, Database, RelationKind};
//! use wnram_types::PartOfSpeech;
//!
//! # fn main() -> Result<(), wnram_db::Error> {
//! let db = Database::open("/path/to/dict")?;
//! for hit in db.lookup(Criteria::matching("wolves"))? {
//!     println!("{} [{}]: {}", hit.head_word(), hit.pos(), hit.gloss());
//!     for ant in hit.related(RelationKind::Antonym)? {
//!         println!("  antonym: {}", ant.head_word());
//!     }
//! }
//! assert_eq!(db.morph_word("wolves", PartOfSpeech::Noun), Some("wolf".into()));
//! # Ok(()) }
//! ```

mod error;
mod parse;

use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::time::Instant;

use memmap2::Mmap;
use tracing::{debug, info};
use wnram_morphy::Morphy;
use wnram_types::normalize_lemma;

pub use error::Error;
pub use wnram_types::{PartOfSpeech, RelationKind, SynsetId};

/// Strategy for reading dictionary files during load.
///
/// Parsing always builds owned in-memory tables; the mode only chooses how
/// the source bytes are brought in, and the backing is released once the
/// load finishes.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum LoadMode {
    /// Memory-map each file while parsing (default).
    Mmap,
    /// Read each file into an owned buffer (portable fallback).
    Owned,
}

enum Buffer {
    Mmap(Mmap),
    Owned(Vec<u8>),
}

impl Buffer {
    fn as_slice(&self) -> &[u8] {
        match self {
            Buffer::Mmap(m) => m.as_ref(),
            Buffer::Owned(v) => v.as_slice(),
        }
    }
}

#[derive(Default, Debug)]
struct PosTables {
    /// Lemma -> sense offsets, sorted ascending by lemma.
    index: BTreeMap<String, Vec<u32>>,
    /// Record offset -> record, sorted ascending for iteration.
    synsets: BTreeMap<u32, parse::SynsetData>,
}

/// A fully loaded, immutable dictionary.
///
/// Built once by [`Database::open`]; every table is read-only afterwards,
/// so queries may run concurrently from any number of threads.
#[derive(Debug)]
pub struct Database {
    tables: [PosTables; 4],
    morph: Morphy,
}

/// Search criteria for [`Database::lookup`].
///
/// `matching` is required. An empty `pos` slice searches all four parts of
/// speech; filter order does not matter, results always come out in the
/// fixed Noun, Verb, Adjective, Adverb order.
#[derive(Clone, Copy, Debug, Default)]
pub struct Criteria<'a> {
    pub matching: &'a str,
    pub pos: &'a [PartOfSpeech],
}

impl<'a> Criteria<'a> {
    /// Criteria matching a word across all parts of speech.
    pub fn matching(word: &'a str) -> Self {
        Self {
            matching: word,
            pos: &[],
        }
    }

    /// Restrict the search to the given parts of speech.
    pub fn with_pos(mut self, pos: &'a [PartOfSpeech]) -> Self {
        self.pos = pos;
        self
    }
}

/// One typed edge of a synset record, as enumerated by [`Lookup::relations`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Relation {
    pub kind: RelationKind,
    pub target: SynsetId,
    /// Word number within the source record; `None` = whole cluster.
    pub source_word: Option<u16>,
    /// Word number within the target record; `None` = whole cluster.
    pub target_word: Option<u16>,
}

/// One synonym cluster produced by a query: a borrowed view binding a synset
/// record to the database it came from. Copyable, never owns storage, valid
/// for the database's lifetime.
#[derive(Clone, Copy)]
pub struct Lookup<'db> {
    db: &'db Database,
    pos: PartOfSpeech,
    record: &'db parse::SynsetData,
    /// 1-based word number a sense-level pointer aimed at, if any.
    head: Option<u16>,
}

impl Database {
    /// Load a dictionary directory, memory-mapping the source files.
    pub fn open(dict_dir: impl AsRef<Path>) -> Result<Self, Error> {
        Self::open_with_mode(dict_dir, LoadMode::Mmap)
    }

    /// Load a dictionary directory, choosing the read strategy at runtime.
    pub fn open_with_mode(dict_dir: impl AsRef<Path>, mode: LoadMode) -> Result<Self, Error> {
        let dir = dict_dir.as_ref();
        let start = Instant::now();

        // Every required file must exist before any parsing starts, so a
        // half-missing dictionary fails fast.
        for pos in PartOfSpeech::ALL {
            for name in [index_file(pos), data_file(pos)] {
                let path = dir.join(name);
                if !path.exists() {
                    return Err(Error::MissingFile { path });
                }
            }
        }

        let mut tables: [PosTables; 4] = Default::default();
        for pos in PartOfSpeech::ALL {
            let t = &mut tables[pos.index()];

            let name = index_file(pos);
            let buf = read_file(&dir.join(name), mode)?;
            for (lineno, raw) in buf.as_slice().split(|b| *b == b'\n').enumerate() {
                if let Some(entry) = parse::parse_index_line(name, lineno + 1, raw)? {
                    t.index.insert(entry.lemma, entry.offsets);
                }
            }

            let name = data_file(pos);
            let buf = read_file(&dir.join(name), mode)?;
            for (lineno, raw) in buf.as_slice().split(|b| *b == b'\n').enumerate() {
                if let Some(record) = parse::parse_data_line(name, lineno + 1, raw, pos)? {
                    let offset = record.offset;
                    if t.synsets.insert(offset, record).is_some() {
                        return Err(Error::Parse {
                            file: name,
                            line: lineno + 1,
                            reason: format!("duplicate synset offset {offset}"),
                        });
                    }
                }
            }

            debug!(
                pos = %pos,
                lemmas = t.index.len(),
                synsets = t.synsets.len(),
                "loaded tables"
            );
        }

        let morph = Morphy::load(dir)?;

        let db = Self { tables, morph };
        info!(
            lemmas = db.lemma_count(),
            synsets = db.synset_count(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "dictionary loaded"
        );
        Ok(db)
    }

    /// Check whether a lemma exists for a POS according to the index table.
    pub fn lemma_exists(&self, pos: PartOfSpeech, lemma: &str) -> bool {
        self.tables[pos.index()]
            .index
            .contains_key(&normalize_lemma(lemma))
    }

    /// Base form of an inflected word, or `None` when no transformation
    /// applies. Exception entries win over suffix rules; rule candidates
    /// must exist in the index table. The input is never echoed back
    /// unchanged.
    pub fn morph_word(&self, word: &str, pos: PartOfSpeech) -> Option<String> {
        self.morph
            .morph_word(word, pos, |p, lemma| self.lemma_exists(p, lemma))
    }

    /// Resolve a query word to its synonym clusters.
    ///
    /// For each searched POS, exact index hits are emitted first (in sense
    /// order), then hits found through the morphological base form; a
    /// `(pos, offset)` pair is never emitted twice in one call. A word with
    /// no match under any path yields an empty vector, which is not an
    /// error; an `Err` only reports a data-integrity failure.
    pub fn lookup(&self, criteria: Criteria<'_>) -> Result<Vec<Lookup<'_>>, Error> {
        let word = normalize_lemma(criteria.matching);
        let mut seen: HashSet<SynsetId> = HashSet::new();
        let mut results = Vec::new();

        for pos in PartOfSpeech::ALL {
            if !criteria.pos.is_empty() && !criteria.pos.contains(&pos) {
                continue;
            }
            let tables = &self.tables[pos.index()];

            let mut pending: Vec<u32> = Vec::new();
            if let Some(offsets) = tables.index.get(&word) {
                pending.extend_from_slice(offsets);
            }
            if let Some(base) = self.morph_word(&word, pos)
                && let Some(offsets) = tables.index.get(&base)
            {
                pending.extend_from_slice(offsets);
            }

            for offset in pending {
                if !seen.insert(SynsetId { pos, offset }) {
                    continue;
                }
                results.push(self.make_lookup(pos, offset, None)?);
            }
        }

        Ok(results)
    }

    /// Visit every synset of the requested parts of speech (empty set = all
    /// four), in ascending offset order, constructing one fresh [`Lookup`]
    /// per record. The first error returned by `visit` stops iteration
    /// immediately and is handed back to the caller.
    pub fn iterate<F, E>(&self, pos_set: &[PartOfSpeech], mut visit: F) -> Result<(), E>
    where
        F: FnMut(Lookup<'_>) -> Result<(), E>,
    {
        for pos in PartOfSpeech::ALL {
            if !pos_set.is_empty() && !pos_set.contains(&pos) {
                continue;
            }
            for record in self.tables[pos.index()].synsets.values() {
                visit(Lookup {
                    db: self,
                    pos,
                    record,
                    head: None,
                })?;
            }
        }
        Ok(())
    }

    /// Number of lemma keys across all index tables.
    pub fn lemma_count(&self) -> usize {
        self.tables.iter().map(|t| t.index.len()).sum()
    }

    /// Number of synset records across all parts of speech.
    pub fn synset_count(&self) -> usize {
        self.tables.iter().map(|t| t.synsets.len()).sum()
    }

    /// Number of synset records for one part of speech.
    pub fn synset_count_for(&self, pos: PartOfSpeech) -> usize {
        self.tables[pos.index()].synsets.len()
    }

    fn make_lookup(
        &self,
        pos: PartOfSpeech,
        offset: u32,
        head: Option<u16>,
    ) -> Result<Lookup<'_>, Error> {
        let record = self.tables[pos.index()]
            .synsets
            .get(&offset)
            .ok_or(Error::UnknownSynset { pos, offset })?;
        if let Some(word) = head
            && record.words.len() < word as usize
        {
            return Err(Error::WordOutOfRange { pos, offset, word });
        }
        Ok(Lookup {
            db: self,
            pos,
            record,
            head,
        })
    }
}

impl<'db> Lookup<'db> {
    /// The part of speech of this cluster.
    pub fn pos(&self) -> PartOfSpeech {
        self.pos
    }

    /// The `(pos, offset)` identity of the underlying record.
    pub fn id(&self) -> SynsetId {
        SynsetId {
            pos: self.pos,
            offset: self.record.offset,
        }
    }

    /// The cluster's head word: the specific word a sense-level relation
    /// targeted, or the record's first word.
    pub fn head_word(&self) -> &'db str {
        let idx = self.head.map_or(0, |w| w as usize - 1);
        &self.record.words[idx].text
    }

    /// Every word of the cluster, head word included, in record order.
    pub fn synonyms(&self) -> Vec<&'db str> {
        self.record.words.iter().map(|w| w.text.as_str()).collect()
    }

    /// `(word, lex_id)` pairs in record order.
    pub fn words(&self) -> Vec<(&'db str, u8)> {
        self.record
            .words
            .iter()
            .map(|w| (w.text.as_str(), w.lex_id))
            .collect()
    }

    /// The record's definition/example text, verbatim.
    pub fn gloss(&self) -> &'db str {
        &self.record.gloss
    }

    /// Enumerate the record's typed edges in declaration order without
    /// resolving them. Formatting a human-readable dump on top of this is a
    /// caller concern.
    pub fn relations(&self) -> Vec<Relation> {
        self.record
            .pointers
            .iter()
            .map(|p| Relation {
                kind: p.kind,
                target: p.target,
                source_word: p.src_word,
                target_word: p.dst_word,
            })
            .collect()
    }

    /// Resolve this record's pointers of one kind into related clusters, in
    /// declaration order, without dedup (a record may list the same target
    /// under several kinds).
    ///
    /// A pointer whose target offset is absent from the target synset store
    /// is a data-integrity error, not a miss; the error is local to this
    /// traversal and does not invalidate the database.
    pub fn related(&self, kind: RelationKind) -> Result<Vec<Lookup<'db>>, Error> {
        let mut out = Vec::new();
        for ptr in &self.record.pointers {
            if ptr.kind != kind {
                continue;
            }
            out.push(
                self.db
                    .make_lookup(ptr.target.pos, ptr.target.offset, ptr.dst_word)?,
            );
        }
        Ok(out)
    }
}

impl fmt::Debug for Lookup<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Lookup")
            .field("id", &self.id())
            .field("head_word", &self.head_word())
            .finish_non_exhaustive()
    }
}

fn index_file(pos: PartOfSpeech) -> &'static str {
    match pos {
        PartOfSpeech::Noun => "index.noun",
        PartOfSpeech::Verb => "index.verb",
        PartOfSpeech::Adjective => "index.adj",
        PartOfSpeech::Adverb => "index.adv",
    }
}

fn data_file(pos: PartOfSpeech) -> &'static str {
    match pos {
        PartOfSpeech::Noun => "data.noun",
        PartOfSpeech::Verb => "data.verb",
        PartOfSpeech::Adjective => "data.adj",
        PartOfSpeech::Adverb => "data.adv",
    }
}

fn read_file(path: &Path, mode: LoadMode) -> Result<Buffer, Error> {
    let read_err = |source| Error::Read {
        path: path.to_path_buf(),
        source,
    };
    match mode {
        LoadMode::Mmap => {
            let file = File::open(path).map_err(read_err)?;
            unsafe { Mmap::map(&file) }.map(Buffer::Mmap).map_err(read_err)
        }
        LoadMode::Owned => {
            let mut file = File::open(path).map_err(read_err)?;
            let mut buf = Vec::new();
            file.read_to_end(&mut buf).map_err(read_err)?;
            Ok(Buffer::Owned(buf))
        }
    }
}
