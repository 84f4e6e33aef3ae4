use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;
use wnram_db::{Database, LoadMode};
use wnram_types::PartOfSpeech;

fn main() -> Result<()> {
    init_tracing();

    let dict_dir = env::args()
        .nth(1)
        .map(PathBuf::from)
        .context("usage: cargo run -p wnram-db --example stats -- <path-to-dict-dir>")?;

    let db = Database::open_with_mode(&dict_dir, LoadMode::Mmap)
        .with_context(|| format!("loading dictionary from {}", dict_dir.display()))?;

    println!("Dictionary : {}", dict_dir.display());
    println!("Lemma keys : {}", db.lemma_count());
    println!("Synsets    : {}", db.synset_count());
    for pos in PartOfSpeech::ALL {
        println!("  {:<9}: {}", pos.to_string(), db.synset_count_for(pos));
    }

    let mut words = 0usize;
    let mut pointers = 0usize;
    db.iterate::<_, std::convert::Infallible>(&[], |l| {
        words += l.synonyms().len();
        pointers += l.relations().len();
        Ok(())
    })
    .expect("infallible");
    println!("Words in synsets: {words}");
    println!("Pointers        : {pointers}");

    // Spot-check a couple of lemmas to confirm lookup.
    for (pos, lemma) in [(PartOfSpeech::Noun, "dog"), (PartOfSpeech::Verb, "run")] {
        println!(
            "Lemma '{lemma}' ({pos}) exists? {}",
            db.lemma_exists(pos, lemma)
        );
    }

    Ok(())
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .init();
}
