//! Card board queries over a decoded deck.

use crate::models::{Arcana, CardDescriptor, Rank, Suit};

// ---------------------------------------------------------------------------
// SearchCardsParams
// ---------------------------------------------------------------------------

/// Parameters for the card board search.
///
/// All fields are optional. When `None`, the corresponding filter is skipped.
#[derive(Debug, Clone, Default)]
pub struct SearchCardsParams {
    pub arcana: Option<Arcana>,
    pub suit: Option<Suit>,
    pub rank: Option<Rank>,
    /// Case-insensitive substring match on the card's `name` attribute.
    pub name: Option<String>,
    pub limit: Option<usize>,
    pub offset: Option<usize>,
}

// ---------------------------------------------------------------------------
// CardQuery
// ---------------------------------------------------------------------------

/// Query interface over the decoded cards of a deck. Results keep deck order.
pub struct CardQuery<'a> {
    cards: &'a [CardDescriptor],
}

impl<'a> CardQuery<'a> {
    /// Create a new `CardQuery` over the given decoded cards.
    pub fn new(cards: &'a [CardDescriptor]) -> Self {
        Self { cards }
    }

    /// Every card, in deck order.
    pub fn all(&self) -> &'a [CardDescriptor] {
        self.cards
    }

    pub fn count(&self) -> usize {
        self.cards.len()
    }

    // -- Single card lookup ------------------------------------------------

    /// Retrieve a single card by its code.
    pub fn get(&self, id: &str) -> Option<&'a CardDescriptor> {
        self.cards.iter().find(|card| card.id == id)
    }

    /// Retrieve a single card by exact name, ignoring case.
    pub fn get_by_name(&self, name: &str) -> Option<&'a CardDescriptor> {
        self.cards.iter().find(|card| {
            card.name()
                .map(|n| n.eq_ignore_ascii_case(name))
                .unwrap_or(false)
        })
    }

    // -- Grouping ----------------------------------------------------------

    pub fn majors(&self) -> Vec<&'a CardDescriptor> {
        self.filter(|card| card.arcana == Arcana::Major)
    }

    pub fn minors(&self) -> Vec<&'a CardDescriptor> {
        self.filter(|card| card.arcana == Arcana::Minor)
    }

    pub fn by_suit(&self, suit: Suit) -> Vec<&'a CardDescriptor> {
        self.filter(|card| card.suit == Some(suit))
    }

    pub fn by_rank(&self, rank: Rank) -> Vec<&'a CardDescriptor> {
        self.filter(|card| card.rank == Some(rank))
    }

    // -- Advanced search ---------------------------------------------------

    /// Search the board using the optional filters of [`SearchCardsParams`].
    ///
    /// Filters combine with AND; `offset` and `limit` apply after filtering.
    pub fn search(&self, params: &SearchCardsParams) -> Vec<&'a CardDescriptor> {
        let needle = params.name.as_ref().map(|n| n.to_lowercase());

        self.cards
            .iter()
            .filter(|card| params.arcana.map_or(true, |a| card.arcana == a))
            .filter(|card| params.suit.map_or(true, |s| card.suit == Some(s)))
            .filter(|card| params.rank.map_or(true, |r| card.rank == Some(r)))
            .filter(|card| match &needle {
                Some(needle) => card
                    .name()
                    .map(|n| n.to_lowercase().contains(needle.as_str()))
                    .unwrap_or(false),
                None => true,
            })
            .skip(params.offset.unwrap_or(0))
            .take(params.limit.unwrap_or(usize::MAX))
            .collect()
    }

    fn filter<F>(&self, predicate: F) -> Vec<&'a CardDescriptor>
    where
        F: Fn(&CardDescriptor) -> bool,
    {
        self.cards.iter().filter(|card| predicate(*card)).collect()
    }
}
