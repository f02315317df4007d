//! Shared test fixtures for the tarot-deck integration tests.
//!
//! Provides a small sample dataset (three Majors, a handful of Minors, and one
//! card with an unknown rank) plus helpers for writing it to disk.

#![allow(dead_code)]

use flate2::write::GzEncoder;
use flate2::Compression;
use std::io::Write;
use std::path::PathBuf;
use tarot_deck::{RawDeck, TarotDeck};

/// The sample dataset, in the order the decoder must reproduce.
pub const SAMPLE_CODES: [&str; 8] = [
    "MAJ-00", "W-01", "S-QUEEN", "MAJ-13", "C-10", "P-KNIGHT", "MAJ-21", "C-PAGE",
];

pub fn sample_json() -> String {
    serde_json::json!({
        "MAJ-00": {"name": "The Fool", "description": "Beginnings.", "image": "/cards/MAJ-00.png"},
        "W-01": {"name": "Ace of Wands", "description": "A spark.", "image": "/cards/W-01.png"},
        "S-QUEEN": {"name": "Queen of Swords", "description": "Clarity.", "image": "/cards/S-QUEEN.png"},
        "MAJ-13": {"name": "Death", "description": "Transformation.", "image": "/cards/MAJ-13.png"},
        "C-10": {"name": "Ten of Cups", "description": "Fulfilment.", "image": "/cards/C-10.png"},
        "P-KNIGHT": {"name": "Knight of Pentacles", "description": "Diligence.", "image": "/cards/P-KNIGHT.png"},
        "MAJ-21": {"name": "The World", "description": "Completion.", "image": "/cards/MAJ-21.png"},
        "C-PAGE": {"name": "Page of Cups", "description": "A message.", "image": "/cards/C-PAGE.png"}
    })
    .to_string()
}

pub fn sample_raw_deck() -> RawDeck {
    RawDeck::from_json_str(&sample_json()).unwrap()
}

/// A seeded deck built from the sample dataset.
pub fn setup_sample_deck() -> TarotDeck {
    TarotDeck::builder()
        .json(sample_json())
        .seed(42)
        .build()
        .unwrap()
}

/// Write `json` to a file in a fresh temp directory, gzipping it when
/// `gzip` is set.
///
/// Returns `(path, tempfile::TempDir)`. The caller must keep the `TempDir`
/// alive for the duration of the test.
pub fn write_dataset(json: &str, gzip: bool) -> (PathBuf, tempfile::TempDir) {
    let tmp_dir = tempfile::tempdir().unwrap();

    let path = if gzip {
        let path = tmp_dir.path().join("deck.json.gz");
        let file = std::fs::File::create(&path).unwrap();
        let mut encoder = GzEncoder::new(file, Compression::default());
        encoder.write_all(json.as_bytes()).unwrap();
        encoder.finish().unwrap();
        path
    } else {
        let path = tmp_dir.path().join("deck.json");
        std::fs::write(&path, json).unwrap();
        path
    };

    (path, tmp_dir)
}
