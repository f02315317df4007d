use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Opaque attribute bag attached to a card code in the source dataset
/// (`name`, `description`, `image`, ...).
pub type RawCardRecord = Map<String, Value>;

// ---------------------------------------------------------------------------
// Arcana
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Arcana {
    Major,
    Minor,
}

impl fmt::Display for Arcana {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arcana::Major => f.write_str("Major"),
            Arcana::Minor => f.write_str("Minor"),
        }
    }
}

// ---------------------------------------------------------------------------
// Suit
// ---------------------------------------------------------------------------

/// Minor arcana suit, paired with its one-letter code token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Suit {
    Wands,
    Cups,
    Swords,
    Pentacles,
}

impl Suit {
    /// Every suit, in deck order.
    pub const ALL: [Suit; 4] = [Suit::Wands, Suit::Cups, Suit::Swords, Suit::Pentacles];

    /// Look up a suit by its code token (`W`, `C`, `S`, `P`).
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "W" => Some(Suit::Wands),
            "C" => Some(Suit::Cups),
            "S" => Some(Suit::Swords),
            "P" => Some(Suit::Pentacles),
            _ => None,
        }
    }

    /// The code token used for this suit inside a card code.
    pub fn code(self) -> &'static str {
        match self {
            Suit::Wands => "W",
            Suit::Cups => "C",
            Suit::Swords => "S",
            Suit::Pentacles => "P",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Suit::Wands => "Wands",
            Suit::Cups => "Cups",
            Suit::Swords => "Swords",
            Suit::Pentacles => "Pentacles",
        }
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// Rank
// ---------------------------------------------------------------------------

/// Minor arcana rank. Pip ranks serialize as their numerals (`"2"`..`"10"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Rank {
    Ace,
    #[serde(rename = "2")]
    Two,
    #[serde(rename = "3")]
    Three,
    #[serde(rename = "4")]
    Four,
    #[serde(rename = "5")]
    Five,
    #[serde(rename = "6")]
    Six,
    #[serde(rename = "7")]
    Seven,
    #[serde(rename = "8")]
    Eight,
    #[serde(rename = "9")]
    Nine,
    #[serde(rename = "10")]
    Ten,
    Page,
    Knight,
    Queen,
    King,
}

impl Rank {
    /// Every rank, Ace through King.
    pub const ALL: [Rank; 14] = [
        Rank::Ace,
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Page,
        Rank::Knight,
        Rank::Queen,
        Rank::King,
    ];

    /// Look up a rank by its code token (`01`..`10`, `PAGE`, `KNIGHT`,
    /// `QUEEN`, `KING`). Tokens are matched exactly: `1` or `page` are
    /// not ranks.
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|rank| rank.code() == code)
    }

    /// The code token used for this rank inside a card code.
    pub fn code(self) -> &'static str {
        match self {
            Rank::Ace => "01",
            Rank::Two => "02",
            Rank::Three => "03",
            Rank::Four => "04",
            Rank::Five => "05",
            Rank::Six => "06",
            Rank::Seven => "07",
            Rank::Eight => "08",
            Rank::Nine => "09",
            Rank::Ten => "10",
            Rank::Page => "PAGE",
            Rank::Knight => "KNIGHT",
            Rank::Queen => "QUEEN",
            Rank::King => "KING",
        }
    }

    /// Display name, matching the serialized form.
    pub fn name(self) -> &'static str {
        match self {
            Rank::Ace => "Ace",
            Rank::Two => "2",
            Rank::Three => "3",
            Rank::Four => "4",
            Rank::Five => "5",
            Rank::Six => "6",
            Rank::Seven => "7",
            Rank::Eight => "8",
            Rank::Nine => "9",
            Rank::Ten => "10",
            Rank::Page => "Page",
            Rank::Knight => "Knight",
            Rank::Queen => "Queen",
            Rank::King => "King",
        }
    }

    pub fn is_court(self) -> bool {
        matches!(self, Rank::Page | Rank::Knight | Rank::Queen | Rank::King)
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// CardDescriptor
// ---------------------------------------------------------------------------

/// A card record with its code decoded into typed metadata.
///
/// The raw record's attributes are flattened next to `id`/`type`/`suit`/`rank`
/// when serialized. `suit` and `rank` are only ever set on Minor cards, and
/// are omitted from the output when absent. Deserializing a Major card that
/// carries a suit or rank fails.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "DescriptorFields")]
pub struct CardDescriptor {
    pub id: String,
    #[serde(flatten)]
    pub attributes: RawCardRecord,
    #[serde(rename = "type")]
    pub arcana: Arcana,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suit: Option<Suit>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rank: Option<Rank>,
}

/// Wire shape of [`CardDescriptor`], checked before conversion.
#[derive(Deserialize)]
struct DescriptorFields {
    id: String,
    #[serde(flatten)]
    attributes: RawCardRecord,
    #[serde(rename = "type")]
    arcana: Arcana,
    #[serde(default)]
    suit: Option<Suit>,
    #[serde(default)]
    rank: Option<Rank>,
}

impl TryFrom<DescriptorFields> for CardDescriptor {
    type Error = String;

    fn try_from(fields: DescriptorFields) -> Result<Self, Self::Error> {
        if fields.arcana == Arcana::Major && (fields.suit.is_some() || fields.rank.is_some()) {
            return Err(format!(
                "Major card '{}' cannot have a suit or rank",
                fields.id
            ));
        }
        Ok(Self {
            id: fields.id,
            attributes: fields.attributes,
            arcana: fields.arcana,
            suit: fields.suit,
            rank: fields.rank,
        })
    }
}

impl CardDescriptor {
    /// Return the named attribute from the source record.
    pub fn attribute(&self, key: &str) -> Option<&Value> {
        self.attributes.get(key)
    }

    /// The card's `name` attribute, if it is a string.
    pub fn name(&self) -> Option<&str> {
        self.attribute("name").and_then(|v| v.as_str())
    }

    pub fn description(&self) -> Option<&str> {
        self.attribute("description").and_then(|v| v.as_str())
    }

    pub fn image(&self) -> Option<&str> {
        self.attribute("image").and_then(|v| v.as_str())
    }

    pub fn is_major(&self) -> bool {
        self.arcana == Arcana::Major
    }
}

// ---------------------------------------------------------------------------
// DrawnCard
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    Upright,
    Reversed,
}

impl Orientation {
    pub fn is_reversed(self) -> bool {
        self == Orientation::Reversed
    }
}

/// A card pulled from the deck for a reading, with the way it landed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawnCard {
    #[serde(flatten)]
    pub card: CardDescriptor,
    pub orientation: Orientation,
}
