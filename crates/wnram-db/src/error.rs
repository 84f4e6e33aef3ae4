use std::io;
use std::path::PathBuf;

use thiserror::Error;
use wnram_types::PartOfSpeech;

/// Errors produced while opening a dictionary or resolving relations.
///
/// Construction failures ([`Error::MissingFile`], [`Error::Read`],
/// [`Error::Exceptions`], [`Error::Parse`]) are fatal to that load attempt
/// only; no partially built database is ever returned. The integrity
/// variants ([`Error::UnknownSynset`], [`Error::WordOutOfRange`]) indicate a
/// corrupt or mismatched dataset discovered lazily during relation
/// resolution and are local to the traversal that hit them; a plain query
/// miss is an empty result, not an error.
#[derive(Debug, Error)]
pub enum Error {
    /// A required index or data file is missing.
    #[error("missing required dictionary file {}", .path.display())]
    MissingFile { path: PathBuf },

    /// A dictionary file could not be opened, read, or mapped.
    #[error("reading {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// An exception list exists but could not be read.
    #[error(transparent)]
    Exceptions(#[from] wnram_morphy::ExcError),

    /// A line does not match the fixed field grammar.
    #[error("{file}:{line}: {reason}")]
    Parse {
        file: &'static str,
        line: usize,
        reason: String,
    },

    /// A pointer or index entry references a synset that does not exist.
    #[error("no {pos} synset at offset {offset}")]
    UnknownSynset { pos: PartOfSpeech, offset: u32 },

    /// A pointer names a word position beyond its target's word list.
    #[error("word {word} out of range for {pos} synset at offset {offset}")]
    WordOutOfRange {
        pos: PartOfSpeech,
        offset: u32,
        word: u16,
    },
}
