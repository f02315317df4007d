//! Card-code decoding.
//!
//! Turns the compact identifiers of the source dataset (`MAJ-00`, `W-01`,
//! `S-QUEEN`, ...) into typed [`CardDescriptor`]s. Decoding is lenient by
//! default: an unrecognized suit or rank token leaves that field unset instead
//! of failing the whole deck. [`decode_strict`] is the checked alternative.

use crate::config::{CODE_SEPARATOR, MAJOR_PREFIX};
use crate::dataset::RawDeck;
use crate::error::{Result, TarotError};
use crate::models::{Arcana, CardDescriptor, Rank, RawCardRecord, Suit};

/// Record keys owned by the decoder. A record attribute with one of these
/// names is dropped in favour of the decoded value.
const RESERVED_KEYS: [&str; 4] = ["id", "type", "suit", "rank"];

// ---------------------------------------------------------------------------
// ParsedCode
// ---------------------------------------------------------------------------

/// The structure read out of a single card code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedCode {
    pub arcana: Arcana,
    pub suit: Option<Suit>,
    pub rank: Option<Rank>,
}

impl ParsedCode {
    /// Parse a card code.
    ///
    /// Anything starting with `MAJ` is Major arcana. Everything else is
    /// treated as Minor and split on `-`: the first piece is the suit token,
    /// the second the rank token, and further pieces are ignored.
    pub fn parse(id: &str) -> Self {
        if id.starts_with(MAJOR_PREFIX) {
            return Self {
                arcana: Arcana::Major,
                suit: None,
                rank: None,
            };
        }

        let mut pieces = id.split(CODE_SEPARATOR);
        let suit = pieces.next().and_then(Suit::from_code);
        let rank = pieces.next().and_then(Rank::from_code);

        Self {
            arcana: Arcana::Minor,
            suit,
            rank,
        }
    }

    /// `true` for Major codes and for Minor codes whose suit and rank both
    /// resolved.
    pub fn is_complete(&self) -> bool {
        match self.arcana {
            Arcana::Major => true,
            Arcana::Minor => self.suit.is_some() && self.rank.is_some(),
        }
    }
}

// ---------------------------------------------------------------------------
// Decoding
// ---------------------------------------------------------------------------

/// Decode every entry of `records`, in dataset order.
///
/// Never fails. A Minor code with an unknown suit or rank decodes with that
/// field left as `None`.
pub fn decode(records: &RawDeck) -> Vec<CardDescriptor> {
    let cards: Vec<CardDescriptor> = records
        .iter()
        .map(|(id, record)| decode_card(id, record))
        .collect();
    log::debug!("decoded {} cards", cards.len());
    cards
}

/// Decode a single `(code, record)` pair.
pub fn decode_card(id: &str, record: &RawCardRecord) -> CardDescriptor {
    let parsed = ParsedCode::parse(id);
    if !parsed.is_complete() {
        log::warn!(
            "card code {:?} has an unrecognized suit or rank; leaving it unset",
            id
        );
    }
    build_descriptor(id, record, parsed)
}

/// Decode every entry of `records`, failing on the first Minor code whose
/// suit or rank is not in the code tables.
pub fn decode_strict(records: &RawDeck) -> Result<Vec<CardDescriptor>> {
    records
        .iter()
        .map(|(id, record)| {
            let parsed = ParsedCode::parse(id);
            if !parsed.is_complete() {
                return Err(TarotError::MalformedCode(format!(
                    "'{}' is neither a Major code nor <suit>-<rank> with a known suit and rank",
                    id
                )));
            }
            Ok(build_descriptor(id, record, parsed))
        })
        .collect()
}

fn build_descriptor(id: &str, record: &RawCardRecord, parsed: ParsedCode) -> CardDescriptor {
    let attributes: RawCardRecord = record
        .iter()
        .filter(|(key, _)| !RESERVED_KEYS.contains(&key.as_str()))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect();

    CardDescriptor {
        id: id.to_string(),
        attributes,
        arcana: parsed.arcana,
        suit: parsed.suit,
        rank: parsed.rank,
    }
}
