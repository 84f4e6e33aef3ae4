use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use wnram_db::{Criteria, Database};
use wnram_types::PartOfSpeech;

fn main() -> Result<()> {
    let mut args = env::args().skip(1);
    let dict_dir = args
        .next()
        .map(PathBuf::from)
        .context("usage: cargo run -p wnram-db --example lemmas -- <dict-dir> <word>...")?;
    let words: Vec<String> = args.collect();
    if words.is_empty() {
        bail!("usage: cargo run -p wnram-db --example lemmas -- <dict-dir> <word>...");
    }

    let db = Database::open(&dict_dir)
        .with_context(|| format!("loading dictionary from {}", dict_dir.display()))?;

    for word in words {
        println!("{word}:");
        for pos in PartOfSpeech::ALL {
            if let Some(base) = db.morph_word(&word, pos) {
                println!("  {pos} base form: {base}");
            }
        }
        for hit in db.lookup(Criteria::matching(&word))? {
            println!("  {} {}", hit.id(), hit.gloss());
            println!("    synonyms: {}", hit.synonyms().join(", "));
            for relation in hit.relations() {
                println!("    {} -> {}", relation.kind, relation.target);
            }
        }
    }

    Ok(())
}
