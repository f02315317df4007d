//! Card drawing.
//!
//! Draws distinct cards from a decoded deck in random order and decides
//! independently for each one whether it lands reversed.

use crate::error::{Result, TarotError};
use crate::models::{CardDescriptor, DrawnCard, Orientation};
use rand::prelude::*;
use rand::seq::index;
use std::cell::RefCell;

/// Draws cards from a decoded deck using the deck's random number generator.
///
/// Built with a seed, the deck makes every draw sequence reproducible.
pub struct CardDrawer<'a> {
    cards: &'a [CardDescriptor],
    rng: &'a RefCell<StdRng>,
    reversal_chance: f64,
}

impl<'a> CardDrawer<'a> {
    /// Create a new `CardDrawer`.
    ///
    /// Fails with [`TarotError::InvalidArgument`] unless `reversal_chance`
    /// lies in `[0, 1]`.
    pub fn new(
        cards: &'a [CardDescriptor],
        rng: &'a RefCell<StdRng>,
        reversal_chance: f64,
    ) -> Result<Self> {
        check_reversal_chance(reversal_chance)?;
        Ok(Self::with_checked_chance(cards, rng, reversal_chance))
    }

    /// Construct without re-checking a chance the caller already validated.
    pub(crate) fn with_checked_chance(
        cards: &'a [CardDescriptor],
        rng: &'a RefCell<StdRng>,
        reversal_chance: f64,
    ) -> Self {
        Self {
            cards,
            rng,
            reversal_chance,
        }
    }

    /// Draw `count` distinct cards.
    ///
    /// Returns an empty vector for `count == 0`, and an error when `count`
    /// exceeds the number of cards in the deck.
    pub fn draw(&self, count: usize) -> Result<Vec<DrawnCard>> {
        if count > self.cards.len() {
            return Err(TarotError::InvalidArgument(format!(
                "cannot draw {} cards from a deck of {}",
                count,
                self.cards.len()
            )));
        }

        let mut rng = self.rng.borrow_mut();
        let picks = index::sample(&mut *rng, self.cards.len(), count);

        let drawn: Vec<DrawnCard> = picks
            .into_iter()
            .map(|idx| DrawnCard {
                card: self.cards[idx].clone(),
                orientation: pick_orientation(&mut *rng, self.reversal_chance),
            })
            .collect();

        log::debug!("drew {} of {} cards", drawn.len(), self.cards.len());
        Ok(drawn)
    }

    /// Draw a single card.
    pub fn draw_one(&self) -> Result<DrawnCard> {
        self.draw(1)?
            .pop()
            .ok_or_else(|| TarotError::NotFound("the deck has no cards to draw".to_string()))
    }

    /// Return the whole deck in a random order, without orientations.
    pub fn shuffled(&self) -> Vec<CardDescriptor> {
        let mut cards = self.cards.to_vec();
        cards.shuffle(&mut *self.rng.borrow_mut());
        cards
    }
}

// ---------------------------------------------------------------------------
// Free-standing helpers
// ---------------------------------------------------------------------------

/// Reject reversal chances outside `[0, 1]`, NaN included.
pub(crate) fn check_reversal_chance(chance: f64) -> Result<()> {
    if (0.0..=1.0).contains(&chance) {
        Ok(())
    } else {
        Err(TarotError::InvalidArgument(format!(
            "reversal chance must be between 0 and 1, got {}",
            chance
        )))
    }
}

fn pick_orientation<R: Rng + ?Sized>(rng: &mut R, reversal_chance: f64) -> Orientation {
    if rng.gen_bool(reversal_chance) {
        Orientation::Reversed
    } else {
        Orientation::Upright
    }
}
