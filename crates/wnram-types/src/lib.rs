//! Shared vocabulary for the wnram lexical database.
//!
//! Everything that both the loader and the morphological analyzer need to
//! agree on lives here: the part-of-speech enum as used by the `index.*`/
//! `data.*` file characters, the `(pos, offset)` synset key, the pointer
//! relation vocabulary, and the lemma normalization applied to every key.
//!
//! ```rust
//! use wnram_types::{PartOfSpeech, RelationKind, SynsetId, normalize_lemma};
//!
//! let pos = PartOfSpeech::from_char('n').unwrap();
//! let id = SynsetId { pos, offset: 1740 };
//! assert_eq!(RelationKind::from_symbol("@"), Some(RelationKind::Hypernym));
//! assert_eq!(normalize_lemma("  Domestic Dog "), "domestic_dog");
//! # let _ = id;
//! ```

use std::fmt;

/// Part-of-speech marker as used by the dictionary files (`n`, `v`, `a`/`s`, `r`).
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub enum PartOfSpeech {
    Noun,
    Verb,
    Adjective,
    Adverb,
}

impl PartOfSpeech {
    /// Fixed traversal order used by lookup and iteration.
    pub const ALL: [PartOfSpeech; 4] = [
        PartOfSpeech::Noun,
        PartOfSpeech::Verb,
        PartOfSpeech::Adjective,
        PartOfSpeech::Adverb,
    ];

    /// Parse a POS character into an enum. `s` (adjective satellite) counts
    /// as an adjective.
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'n' => Some(PartOfSpeech::Noun),
            'v' => Some(PartOfSpeech::Verb),
            'a' | 's' => Some(PartOfSpeech::Adjective),
            'r' => Some(PartOfSpeech::Adverb),
            _ => None,
        }
    }

    /// Emit the POS character used in `index.*`/`data.*` file names and lines.
    pub fn to_char(self) -> char {
        match self {
            PartOfSpeech::Noun => 'n',
            PartOfSpeech::Verb => 'v',
            PartOfSpeech::Adjective => 'a',
            PartOfSpeech::Adverb => 'r',
        }
    }

    /// Dense table index, stable across the [`Self::ALL`] order.
    pub fn index(self) -> usize {
        match self {
            PartOfSpeech::Noun => 0,
            PartOfSpeech::Verb => 1,
            PartOfSpeech::Adjective => 2,
            PartOfSpeech::Adverb => 3,
        }
    }

    /// File suffix used by the dictionary (`index.noun`, `data.verb`, `adj.exc`, …).
    pub fn file_suffix(self) -> &'static str {
        match self {
            PartOfSpeech::Noun => "noun",
            PartOfSpeech::Verb => "verb",
            PartOfSpeech::Adjective => "adj",
            PartOfSpeech::Adverb => "adv",
        }
    }
}

impl fmt::Display for PartOfSpeech {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PartOfSpeech::Noun => "noun",
            PartOfSpeech::Verb => "verb",
            PartOfSpeech::Adjective => "adjective",
            PartOfSpeech::Adverb => "adverb",
        })
    }
}

/// `(pos, offset)` pair uniquely identifying a synset record.
///
/// Offsets are only unique within one part of speech's record space, so the
/// POS is part of the key.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct SynsetId {
    pub pos: PartOfSpeech,
    pub offset: u32,
}

impl fmt::Display for SynsetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{:08}", self.pos.to_char(), self.offset)
    }
}

/// Typed semantic relation between synsets, one variant per pointer symbol.
///
/// The vocabulary is fixed by the dataset. `\` doubles as "derived from
/// adjective" on adverb records; it maps to [`RelationKind::Pertainym`].
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum RelationKind {
    Antonym,
    Hypernym,
    InstanceHypernym,
    Hyponym,
    InstanceHyponym,
    MemberHolonym,
    SubstanceHolonym,
    PartHolonym,
    MemberMeronym,
    SubstanceMeronym,
    PartMeronym,
    Attribute,
    DerivationallyRelated,
    DomainTopic,
    MemberOfDomainTopic,
    DomainRegion,
    MemberOfDomainRegion,
    DomainUsage,
    MemberOfDomainUsage,
    Entailment,
    Cause,
    AlsoSee,
    VerbGroup,
    SimilarTo,
    ParticipleOf,
    Pertainym,
}

impl RelationKind {
    /// Map a pointer symbol from a data line to its relation kind.
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        use RelationKind::*;
        match symbol {
            "!" => Some(Antonym),
            "@" => Some(Hypernym),
            "@i" => Some(InstanceHypernym),
            "~" => Some(Hyponym),
            "~i" => Some(InstanceHyponym),
            "#m" => Some(MemberHolonym),
            "#s" => Some(SubstanceHolonym),
            "#p" => Some(PartHolonym),
            "%m" => Some(MemberMeronym),
            "%s" => Some(SubstanceMeronym),
            "%p" => Some(PartMeronym),
            "=" => Some(Attribute),
            "+" => Some(DerivationallyRelated),
            ";c" => Some(DomainTopic),
            "-c" => Some(MemberOfDomainTopic),
            ";r" => Some(DomainRegion),
            "-r" => Some(MemberOfDomainRegion),
            ";u" => Some(DomainUsage),
            "-u" => Some(MemberOfDomainUsage),
            "*" => Some(Entailment),
            ">" => Some(Cause),
            "^" => Some(AlsoSee),
            "$" => Some(VerbGroup),
            "&" => Some(SimilarTo),
            "<" => Some(ParticipleOf),
            "\\" => Some(Pertainym),
            _ => None,
        }
    }

    /// The pointer symbol as written in data files.
    pub fn symbol(self) -> &'static str {
        use RelationKind::*;
        match self {
            Antonym => "!",
            Hypernym => "@",
            InstanceHypernym => "@i",
            Hyponym => "~",
            InstanceHyponym => "~i",
            MemberHolonym => "#m",
            SubstanceHolonym => "#s",
            PartHolonym => "#p",
            MemberMeronym => "%m",
            SubstanceMeronym => "%s",
            PartMeronym => "%p",
            Attribute => "=",
            DerivationallyRelated => "+",
            DomainTopic => ";c",
            MemberOfDomainTopic => "-c",
            DomainRegion => ";r",
            MemberOfDomainRegion => "-r",
            DomainUsage => ";u",
            MemberOfDomainUsage => "-u",
            Entailment => "*",
            Cause => ">",
            AlsoSee => "^",
            VerbGroup => "$",
            SimilarTo => "&",
            ParticipleOf => "<",
            Pertainym => "\\",
        }
    }
}

impl fmt::Display for RelationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use RelationKind::*;
        f.write_str(match self {
            Antonym => "antonym",
            Hypernym => "hypernym",
            InstanceHypernym => "instance hypernym",
            Hyponym => "hyponym",
            InstanceHyponym => "instance hyponym",
            MemberHolonym => "member holonym",
            SubstanceHolonym => "substance holonym",
            PartHolonym => "part holonym",
            MemberMeronym => "member meronym",
            SubstanceMeronym => "substance meronym",
            PartMeronym => "part meronym",
            Attribute => "attribute",
            DerivationallyRelated => "derivationally related form",
            DomainTopic => "domain of synset (topic)",
            MemberOfDomainTopic => "member of domain (topic)",
            DomainRegion => "domain of synset (region)",
            MemberOfDomainRegion => "member of domain (region)",
            DomainUsage => "domain of synset (usage)",
            MemberOfDomainUsage => "member of domain (usage)",
            Entailment => "entailment",
            Cause => "cause",
            AlsoSee => "also see",
            VerbGroup => "verb group",
            SimilarTo => "similar to",
            ParticipleOf => "participle of verb",
            Pertainym => "pertainym",
        })
    }
}

/// Decode the four-hex source/target field used in pointer blocks.
///
/// High byte is the source word number, low byte is the target word number.
/// Zero means "whole cluster" per the file format and decodes to `None`.
pub fn decode_source_target(hex4: &str) -> (Option<u16>, Option<u16>) {
    if hex4.len() != 4 {
        return (None, None);
    }

    match u16::from_str_radix(hex4, 16) {
        Ok(val) => {
            let src = val >> 8;
            let dst = val & 0x00ff;
            let src = if src == 0 { None } else { Some(src) };
            let dst = if dst == 0 { None } else { Some(dst) };
            (src, dst)
        }
        Err(_) => (None, None),
    }
}

/// Canonical form for index keys, exception entries, and query words:
/// trimmed, lowercased, spaces joined with `_`.
pub fn normalize_lemma(text: &str) -> String {
    text.trim().to_lowercase().replace(' ', "_")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pos_char_round_trip() {
        for pos in PartOfSpeech::ALL {
            assert_eq!(PartOfSpeech::from_char(pos.to_char()), Some(pos));
        }
        assert_eq!(PartOfSpeech::from_char('s'), Some(PartOfSpeech::Adjective));
        assert_eq!(PartOfSpeech::from_char('x'), None);
    }

    #[test]
    fn relation_symbol_round_trip() {
        for symbol in [
            "!", "@", "@i", "~", "~i", "#m", "#s", "#p", "%m", "%s", "%p", "=", "+", ";c", "-c",
            ";r", "-r", ";u", "-u", "*", ">", "^", "$", "&", "<", "\\",
        ] {
            let kind = RelationKind::from_symbol(symbol).expect("known symbol");
            assert_eq!(kind.symbol(), symbol);
        }
        assert_eq!(RelationKind::from_symbol("?"), None);
    }

    #[test]
    fn decode_source_target_field() {
        assert_eq!(decode_source_target("0000"), (None, None));
        assert_eq!(decode_source_target("0100"), (Some(1), None));
        assert_eq!(decode_source_target("00ff"), (None, Some(255)));
        assert_eq!(decode_source_target("0a0b"), (Some(10), Some(11)));
        assert_eq!(decode_source_target("bad"), (None, None));
    }

    #[test]
    fn normalizes_lemmas() {
        assert_eq!(normalize_lemma("Dog"), "dog");
        assert_eq!(normalize_lemma("  oil change "), "oil_change");
        assert_eq!(normalize_lemma("attorney general"), "attorney_general");
    }
}
