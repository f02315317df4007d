//! Query modules for a decoded deck.
//!
//! Each module provides a query struct that borrows the decoded cards of a
//! [`TarotDeck`](crate::TarotDeck) and returns references into them.

pub mod cards;

pub use cards::{CardQuery, SearchCardsParams};
