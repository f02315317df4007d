//! Tarot deck toolkit for Rust.
//!
//! Decodes a card dataset keyed by compact card codes (`MAJ-00`, `W-01`,
//! `S-QUEEN`, ...) into typed cards, exposes card board queries and random
//! draws over the decoded deck, and provides lifecycle-bound animation helpers
//! driven by injected tick and timer sources.
//!
//! # Quick start
//!
//! ```
//! use tarot_deck::models::Suit;
//! use tarot_deck::TarotDeck;
//!
//! let deck = TarotDeck::builder().seed(7).build().unwrap();
//!
//! // Browse the board
//! let wands = deck.cards().by_suit(Suit::Wands);
//! assert_eq!(wands.len(), 14);
//!
//! // Draw a three-card spread
//! let spread = deck.drawer().draw(3).unwrap();
//! assert_eq!(spread.len(), 3);
//! ```

pub mod animation;
pub mod config;
pub mod dataset;
pub mod decoder;
pub mod draw;
pub mod error;
pub mod models;
pub mod queries;

pub use dataset::RawDeck;
pub use decoder::{decode, decode_card, decode_strict, ParsedCode};
pub use error::{Result, TarotError};

use std::cell::RefCell;
use std::fmt;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::animation::{DelayedFlagReset, TimerFacility};
use crate::models::{Arcana, CardDescriptor};

// ---------------------------------------------------------------------------
// TarotDeckBuilder
// ---------------------------------------------------------------------------

enum DeckSource {
    Bundled,
    Path(PathBuf),
    Json(String),
    Raw(RawDeck),
}

/// Builder for configuring and constructing a [`TarotDeck`].
///
/// Use [`TarotDeck::builder()`] to obtain a builder, chain configuration
/// methods, and call [`build()`](TarotDeckBuilder::build) to create the deck.
pub struct TarotDeckBuilder {
    source: DeckSource,
    seed: Option<u64>,
    reversal_chance: f64,
    strict: bool,
    settle_delay: Duration,
}

impl Default for TarotDeckBuilder {
    fn default() -> Self {
        Self {
            source: DeckSource::Bundled,
            seed: None,
            reversal_chance: config::DEFAULT_REVERSAL_CHANCE,
            strict: false,
            settle_delay: config::DEFAULT_SETTLE_DELAY,
        }
    }
}

impl TarotDeckBuilder {
    /// Load the dataset from a JSON file (optionally gzipped) instead of the
    /// bundled one.
    pub fn path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.source = DeckSource::Path(path.as_ref().to_path_buf());
        self
    }

    /// Use a dataset given as a JSON string.
    pub fn json(mut self, json: impl Into<String>) -> Self {
        self.source = DeckSource::Json(json.into());
        self
    }

    /// Use an already-loaded dataset.
    pub fn raw(mut self, raw: RawDeck) -> Self {
        self.source = DeckSource::Raw(raw);
        self
    }

    /// Seed the random number generator used for draws.
    ///
    /// Without a seed the generator is seeded from OS entropy.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Probability in `[0, 1]` that a drawn card is reversed. Defaults to 0.5.
    pub fn reversal_chance(mut self, chance: f64) -> Self {
        self.reversal_chance = chance;
        self
    }

    /// Reject card codes with an unknown suit or rank instead of decoding
    /// them with the field unset. Defaults to `false`.
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Default delay for the [`DelayedFlagReset`]s handed out by
    /// [`TarotDeck::smooth_stop`]. Defaults to 300 ms.
    pub fn settle_delay(mut self, delay: Duration) -> Self {
        self.settle_delay = delay;
        self
    }

    /// Load and decode the dataset.
    pub fn build(self) -> Result<TarotDeck> {
        draw::spread::check_reversal_chance(self.reversal_chance)?;

        let raw = match self.source {
            DeckSource::Bundled => RawDeck::bundled()?,
            DeckSource::Path(path) => RawDeck::from_path(path)?,
            DeckSource::Json(json) => RawDeck::from_json_str(&json)?,
            DeckSource::Raw(raw) => raw,
        };

        if raw.is_empty() {
            return Err(TarotError::InvalidDataset(
                "the dataset contains no cards".to_string(),
            ));
        }

        let cards = if self.strict {
            decode_strict(&raw)?
        } else {
            decode(&raw)
        };

        let rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Ok(TarotDeck {
            raw,
            cards,
            rng: RefCell::new(rng),
            reversal_chance: self.reversal_chance,
            settle_delay: self.settle_delay,
        })
    }
}

// ---------------------------------------------------------------------------
// TarotDeck
// ---------------------------------------------------------------------------

/// The main entry point: a decoded deck plus the random state used to draw
/// from it.
///
/// Query and draw interfaces are lightweight wrappers borrowing from the deck.
pub struct TarotDeck {
    raw: RawDeck,
    cards: Vec<CardDescriptor>,
    rng: RefCell<StdRng>,
    reversal_chance: f64,
    settle_delay: Duration,
}

impl TarotDeck {
    /// Create a new builder for configuring the deck.
    pub fn builder() -> TarotDeckBuilder {
        TarotDeckBuilder::default()
    }

    /// Build a deck from the bundled dataset with default settings.
    pub fn bundled() -> Result<Self> {
        Self::builder().build()
    }

    /// Access the card board query interface.
    pub fn cards(&self) -> queries::CardQuery<'_> {
        queries::CardQuery::new(&self.cards)
    }

    /// Access the card drawer.
    pub fn drawer(&self) -> draw::CardDrawer<'_> {
        draw::CardDrawer::with_checked_chance(&self.cards, &self.rng, self.reversal_chance)
    }

    /// A [`DelayedFlagReset`] bound to `timer` using this deck's settle delay.
    pub fn smooth_stop(&self, timer: Rc<dyn TimerFacility>) -> DelayedFlagReset {
        DelayedFlagReset::with_delay(timer, self.settle_delay)
    }

    /// The dataset the deck was decoded from.
    pub fn raw(&self) -> &RawDeck {
        &self.raw
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Display
// ---------------------------------------------------------------------------

impl fmt::Display for TarotDeck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let majors = self
            .cards
            .iter()
            .filter(|c| c.arcana == Arcana::Major)
            .count();
        write!(
            f,
            "TarotDeck(cards={}, major={}, minor={}, reversal_chance={})",
            self.cards.len(),
            majors,
            self.cards.len() - majors,
            self.reversal_chance
        )
    }
}
