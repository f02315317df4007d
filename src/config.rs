use std::time::Duration;

/// Identifier prefix shared by every Major arcana card code.
pub const MAJOR_PREFIX: &str = "MAJ";

/// Separator between the suit and rank tokens of a Minor arcana code.
pub const CODE_SEPARATOR: char = '-';

/// Delay before a [`DelayedFlagReset`](crate::animation::DelayedFlagReset)
/// clears its flags when no custom delay is given.
pub const DEFAULT_SETTLE_DELAY: Duration = Duration::from_millis(300);

/// Probability that a drawn card comes out reversed.
pub const DEFAULT_REVERSAL_CHANCE: f64 = 0.5;

/// The 78-card dataset shipped with the crate, as JSON.
pub const BUNDLED_DECK_JSON: &str = include_str!("../data/deck.json");
