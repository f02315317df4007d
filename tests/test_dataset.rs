//! Dataset loading and deck builder tests.

mod common;

use std::time::Duration;
use tarot_deck::{RawDeck, TarotDeck, TarotError};

// ---------------------------------------------------------------------------
// RawDeck loading
// ---------------------------------------------------------------------------

#[test]
fn from_path_reads_plain_json() {
    let (path, _tmp) = common::write_dataset(&common::sample_json(), false);
    let raw = RawDeck::from_path(&path).unwrap();
    assert_eq!(raw.len(), common::SAMPLE_CODES.len());
    let codes: Vec<&str> = raw.codes().collect();
    assert_eq!(codes, common::SAMPLE_CODES);
}

#[test]
fn from_path_reads_gzipped_json() {
    let (path, _tmp) = common::write_dataset(&common::sample_json(), true);
    let raw = RawDeck::from_path(&path).unwrap();
    assert_eq!(raw, common::sample_raw_deck());
}

#[test]
fn from_path_missing_file_is_io_error() {
    let tmp = tempfile::tempdir().unwrap();
    let result = RawDeck::from_path(tmp.path().join("nope.json"));
    assert!(matches!(result, Err(TarotError::Io(_))));
}

#[test]
fn truncated_json_is_json_error() {
    let result = RawDeck::from_json_str(r#"{"MAJ-00": {"name": "The Fo"#);
    assert!(matches!(result, Err(TarotError::Json(_))));
}

#[test]
fn top_level_array_is_rejected() {
    let result = RawDeck::from_json_str(r#"[{"name": "The Fool"}]"#);
    match result {
        Err(TarotError::InvalidDataset(msg)) => assert!(msg.contains("an array")),
        other => panic!("expected InvalidDataset, got {:?}", other),
    }
}

#[test]
fn non_object_record_is_rejected() {
    let result = RawDeck::from_json_str(r#"{"MAJ-00": "The Fool"}"#);
    match result {
        Err(TarotError::InvalidDataset(msg)) => {
            assert!(msg.contains("MAJ-00"));
            assert!(msg.contains("a string"));
        }
        other => panic!("expected InvalidDataset, got {:?}", other),
    }
}

#[test]
fn bundled_dataset_loads() {
    let raw = RawDeck::bundled().unwrap();
    assert_eq!(raw.len(), 78);
    assert!(raw.contains("MAJ-00"));
    assert!(raw.contains("P-KING"));
    assert_eq!(raw.get("C-QUEEN").unwrap()["name"], "Queen of Cups");
}

// ---------------------------------------------------------------------------
// TarotDeckBuilder
// ---------------------------------------------------------------------------

#[test]
fn builder_defaults_to_bundled_dataset() {
    let deck = TarotDeck::builder().build().unwrap();
    assert_eq!(deck.len(), 78);
    assert_eq!(deck.raw().len(), 78);
}

#[test]
fn builder_loads_from_path() {
    let (path, _tmp) = common::write_dataset(&common::sample_json(), true);
    let deck = TarotDeck::builder().path(&path).build().unwrap();
    assert_eq!(deck.len(), common::SAMPLE_CODES.len());
}

#[test]
fn builder_accepts_preloaded_raw_deck() {
    let deck = TarotDeck::builder()
        .raw(common::sample_raw_deck())
        .build()
        .unwrap();
    assert_eq!(deck.cards().get("C-PAGE").unwrap().name(), Some("Page of Cups"));
}

#[test]
fn builder_rejects_empty_dataset() {
    let result = TarotDeck::builder().json("{}").build();
    assert!(matches!(result, Err(TarotError::InvalidDataset(_))));
}

#[test]
fn builder_rejects_out_of_range_reversal_chance() {
    for chance in [-0.1, 1.5, f64::NAN] {
        let result = TarotDeck::builder().reversal_chance(chance).build();
        assert!(matches!(result, Err(TarotError::InvalidArgument(_))), "{}", chance);
    }
}

#[test]
fn lenient_builder_keeps_degraded_cards() {
    let deck = TarotDeck::builder()
        .json(r#"{"W-99": {"name": "Mystery"}}"#)
        .build()
        .unwrap();
    let card = deck.cards().get("W-99").unwrap();
    assert!(card.rank.is_none());
}

#[test]
fn strict_builder_rejects_degraded_cards() {
    let result = TarotDeck::builder()
        .json(r#"{"W-99": {"name": "Mystery"}}"#)
        .strict(true)
        .build();
    assert!(matches!(result, Err(TarotError::MalformedCode(_))));
}

#[test]
fn builder_settle_delay_reaches_smooth_stop() {
    let deck = TarotDeck::builder()
        .json(common::sample_json())
        .settle_delay(Duration::from_millis(120))
        .build()
        .unwrap();
    let timer = std::rc::Rc::new(tarot_deck::animation::ManualTimer::new());
    let reset = deck.smooth_stop(timer);
    assert_eq!(reset.default_delay(), Duration::from_millis(120));
}

#[test]
fn display_summarises_deck() {
    let deck = common::setup_sample_deck();
    let text = deck.to_string();
    assert!(text.contains("cards=8"));
    assert!(text.contains("major=3"));
    assert!(text.contains("minor=5"));
}
