//! Line parsers for the fixed index/data file grammar.
//!
//! Both file kinds are whitespace-tokenized, one record per line, with a
//! non-data preamble of lines starting with whitespace (the license block).
//! Parsers return `Ok(None)` for preamble and blank lines and a
//! [`Error::Parse`] for anything that violates the grammar; per-line
//! recovery is deliberately not attempted, since a malformed line means a
//! corrupt dataset.

use std::str::FromStr;

use wnram_types::{PartOfSpeech, RelationKind, SynsetId, decode_source_target, normalize_lemma};

use crate::error::Error;

/// One `(word, lex_id)` pair of a synset record.
#[derive(Debug)]
pub(crate) struct WordData {
    pub text: String,
    pub lex_id: u8,
}

/// A typed, directed edge to another record, kept as `(pos, offset)` rather
/// than a direct reference; the relation graph is cyclic and only ever
/// resolved through the synset store.
#[derive(Debug)]
pub(crate) struct PointerData {
    pub kind: RelationKind,
    pub target: SynsetId,
    pub src_word: Option<u16>,
    pub dst_word: Option<u16>,
}

/// A parsed `data.*` record, keyed by the offset field it carries.
#[derive(Debug)]
pub(crate) struct SynsetData {
    pub offset: u32,
    pub words: Vec<WordData>,
    pub pointers: Vec<PointerData>,
    pub gloss: String,
}

/// A parsed `index.*` record: normalized lemma plus sense offsets in sense
/// order. The other index fields are validated and dropped.
#[derive(Debug)]
pub(crate) struct IndexLine {
    pub lemma: String,
    pub offsets: Vec<u32>,
}

/// Parse one `index.*` line:
/// `lemma pos synset_cnt p_cnt ptr_symbol... sense_cnt tagsense_cnt offset...`
pub(crate) fn parse_index_line(
    file: &'static str,
    line: usize,
    raw: &[u8],
) -> Result<Option<IndexLine>, Error> {
    let Some(text) = data_text(file, line, raw)? else {
        return Ok(None);
    };
    let tokens: Vec<&str> = text.split_ascii_whitespace().collect();
    if tokens.len() < 6 {
        return Err(parse_err(file, line, "too few fields for an index entry"));
    }

    let lemma = normalize_lemma(tokens[0]);
    let synset_cnt: usize = parse_num(file, line, "synset_cnt", tokens[2])?;
    let p_cnt: usize = parse_num(file, line, "p_cnt", tokens[3])?;

    let mut idx = 4;
    if tokens.len() < idx + p_cnt + 2 {
        return Err(parse_err(file, line, "truncated pointer symbol list"));
    }
    idx += p_cnt;
    let _sense_cnt: usize = parse_num(file, line, "sense_cnt", tokens[idx])?;
    let _tagsense_cnt: usize = parse_num(file, line, "tagsense_cnt", tokens[idx + 1])?;
    idx += 2;

    let offsets = tokens[idx..]
        .iter()
        .map(|t| parse_num::<u32>(file, line, "synset offset", t))
        .collect::<Result<Vec<_>, _>>()?;
    if offsets.len() != synset_cnt {
        return Err(parse_err(
            file,
            line,
            format!("expected {synset_cnt} synset offsets, got {}", offsets.len()),
        ));
    }

    Ok(Some(IndexLine { lemma, offsets }))
}

/// Parse one `data.*` line:
/// `offset lex_filenum ss_type w_cnt (word lex_id)... p_cnt
///  (symbol offset pos src/tgt)... [f_cnt (+ f_num w_num)...] | gloss`
///
/// The frame block only occurs in verb files; it is validated and dropped.
pub(crate) fn parse_data_line(
    file: &'static str,
    line: usize,
    raw: &[u8],
    pos: PartOfSpeech,
) -> Result<Option<SynsetData>, Error> {
    let Some(text) = data_text(file, line, raw)? else {
        return Ok(None);
    };
    let (fields, gloss) = match text.split_once('|') {
        Some((fields, gloss)) => (fields, gloss.trim()),
        None => (text, ""),
    };
    let tokens: Vec<&str> = fields.split_ascii_whitespace().collect();
    if tokens.len() < 7 {
        return Err(parse_err(file, line, "too few fields for a synset record"));
    }

    let offset: u32 = parse_num(file, line, "offset", tokens[0])?;
    let _lex_filenum: u8 = parse_num(file, line, "lex_filenum", tokens[1])?;
    let ss_pos = tokens[2].chars().next().and_then(PartOfSpeech::from_char);
    if ss_pos != Some(pos) {
        return Err(parse_err(
            file,
            line,
            format!("ss_type `{}` does not belong in a {pos} file", tokens[2]),
        ));
    }

    let w_cnt = parse_hex(file, line, "w_cnt", tokens[3])? as usize;
    if w_cnt == 0 {
        return Err(parse_err(file, line, "synset record with no words"));
    }
    let mut idx = 4;
    if tokens.len() < idx + 2 * w_cnt + 1 {
        return Err(parse_err(file, line, "truncated word list"));
    }
    let mut words = Vec::with_capacity(w_cnt);
    for _ in 0..w_cnt {
        let lex_id = parse_hex(file, line, "lex_id", tokens[idx + 1])? as u8;
        words.push(WordData {
            text: strip_adj_marker(tokens[idx]).to_string(),
            lex_id,
        });
        idx += 2;
    }

    let p_cnt: usize = parse_num(file, line, "p_cnt", tokens[idx])?;
    idx += 1;
    let mut pointers = Vec::with_capacity(p_cnt);
    for _ in 0..p_cnt {
        if tokens.len() < idx + 4 {
            return Err(parse_err(file, line, "truncated pointer block"));
        }
        let kind = RelationKind::from_symbol(tokens[idx]).ok_or_else(|| {
            parse_err(file, line, format!("unknown pointer symbol `{}`", tokens[idx]))
        })?;
        let target_offset: u32 = parse_num(file, line, "pointer offset", tokens[idx + 1])?;
        let target_pos = tokens[idx + 2]
            .chars()
            .next()
            .and_then(PartOfSpeech::from_char)
            .ok_or_else(|| {
                parse_err(file, line, format!("bad pointer pos `{}`", tokens[idx + 2]))
            })?;
        let st = tokens[idx + 3];
        if st.len() != 4 || u16::from_str_radix(st, 16).is_err() {
            return Err(parse_err(file, line, format!("bad source/target field `{st}`")));
        }
        let (src_word, dst_word) = decode_source_target(st);
        pointers.push(PointerData {
            kind,
            target: SynsetId {
                pos: target_pos,
                offset: target_offset,
            },
            src_word,
            dst_word,
        });
        idx += 4;
    }

    if pos == PartOfSpeech::Verb && tokens.len() > idx {
        let f_cnt: usize = parse_num(file, line, "f_cnt", tokens[idx])?;
        idx += 1;
        for _ in 0..f_cnt {
            if tokens.len() < idx + 3 {
                return Err(parse_err(file, line, "truncated frame block"));
            }
            if tokens[idx] != "+" {
                return Err(parse_err(file, line, "expected `+` before frame entry"));
            }
            let _frame_number: u16 = parse_num(file, line, "frame number", tokens[idx + 1])?;
            parse_hex(file, line, "frame word number", tokens[idx + 2])?;
            idx += 3;
        }
    }
    if idx != tokens.len() {
        return Err(parse_err(file, line, "unexpected trailing fields"));
    }

    Ok(Some(SynsetData {
        offset,
        words,
        pointers,
        gloss: gloss.to_string(),
    }))
}

/// Strip the CR of CRLF input, skip preamble/blank lines, insist on UTF-8.
fn data_text<'a>(file: &'static str, line: usize, raw: &'a [u8]) -> Result<Option<&'a str>, Error> {
    let raw = match raw.last() {
        Some(b'\r') => &raw[..raw.len() - 1],
        _ => raw,
    };
    if raw.is_empty() || matches!(raw.first(), Some(b' ' | b'\t')) {
        return Ok(None);
    }
    std::str::from_utf8(raw)
        .map(Some)
        .map_err(|_| parse_err(file, line, "invalid utf-8"))
}

/// Adjective words may carry a syntactic position marker; the marker is not
/// part of the word.
fn strip_adj_marker(token: &str) -> &str {
    for marker in ["(a)", "(p)", "(ip)"] {
        if let Some(word) = token.strip_suffix(marker) {
            return word;
        }
    }
    token
}

fn parse_err(file: &'static str, line: usize, reason: impl Into<String>) -> Error {
    Error::Parse {
        file,
        line,
        reason: reason.into(),
    }
}

fn parse_num<T: FromStr>(
    file: &'static str,
    line: usize,
    field: &str,
    token: &str,
) -> Result<T, Error> {
    token
        .parse()
        .map_err(|_| parse_err(file, line, format!("non-numeric {field} `{token}`")))
}

fn parse_hex(file: &'static str, line: usize, field: &str, token: &str) -> Result<u32, Error> {
    u32::from_str_radix(token, 16)
        .map_err(|_| parse_err(file, line, format!("non-hexadecimal {field} `{token}`")))
}
