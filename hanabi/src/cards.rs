use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::CardFromStrErr;

/// The total number of card instances in the deck.
pub const DECK_SIZE: usize = 50;

/// A single physical card of the Hanabi deck.
///
/// Two copies of the same color and rank are distinguished by their
/// `instance`, so equality and hashing cover all three fields.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawCard")]
pub struct Card {
    pub color: Color,
    pub rank: Rank,
    /// Which copy of this color/rank combination this is, in `0..rank.copies()`.
    pub instance: u8,
}

// A card as it comes over the wire, before the instance is checked.
#[derive(Deserialize)]
struct RawCard {
    color: Color,
    rank: Rank,
    instance: u8,
}

impl TryFrom<RawCard> for Card {
    type Error = CardFromStrErr;

    fn try_from(raw: RawCard) -> Result<Self, Self::Error> {
        Card::new(raw.color, raw.rank, raw.instance).ok_or(CardFromStrErr::InvalidInstance)
    }
}

/// The color of a [card](Card).
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum Color {
    Red,
    Yellow,
    Green,
    Blue,
    White,
}

/// The rank of a [card](Card), from one to five.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
#[repr(u8)]
pub enum Rank {
    One = 1,
    Two,
    Three,
    Four,
    Five,
}

impl Color {
    pub const ALL: [Color; 5] = [
        Color::Red,
        Color::Yellow,
        Color::Green,
        Color::Blue,
        Color::White,
    ];

    pub fn letter(self) -> char {
        match self {
            Color::Red => 'r',
            Color::Yellow => 'y',
            Color::Green => 'g',
            Color::Blue => 'b',
            Color::White => 'w',
        }
    }
}

impl Rank {
    pub const ALL: [Rank; 5] = [Rank::One, Rank::Two, Rank::Three, Rank::Four, Rank::Five];

    /// How many instances of each color exist for this rank.
    pub fn copies(self) -> u8 {
        match self {
            Rank::One => 3,
            Rank::Two | Rank::Three | Rank::Four => 2,
            Rank::Five => 1,
        }
    }

    pub fn value(self) -> u8 {
        self as u8
    }

    /// The rank that follows this one on a pile, if any.
    pub fn next(self) -> Option<Rank> {
        Rank::try_from(self.value() + 1).ok()
    }

    // Index of the first card of this rank in the canonical deck order.
    fn offset(self) -> u8 {
        match self {
            Rank::One => 0,
            Rank::Two => 15,
            Rank::Three => 25,
            Rank::Four => 35,
            Rank::Five => 45,
        }
    }
}

impl TryFrom<u8> for Rank {
    type Error = CardFromStrErr;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Rank::One),
            2 => Ok(Rank::Two),
            3 => Ok(Rank::Three),
            4 => Ok(Rank::Four),
            5 => Ok(Rank::Five),
            _ => Err(CardFromStrErr::InvalidRank),
        }
    }
}

impl From<Rank> for u8 {
    fn from(rank: Rank) -> u8 {
        rank.value()
    }
}

impl Card {
    /// Creates a card, checking that the instance exists in the deck.
    pub fn new(color: Color, rank: Rank, instance: u8) -> Option<Self> {
        (instance < rank.copies()).then_some(Card {
            color,
            rank,
            instance,
        })
    }

    /// Position of this card in the canonical deck order.
    ///
    /// Cards are ordered by rank, then by copy, then by color.
    pub fn to_index(self) -> u8 {
        self.rank.offset() + self.instance * 5 + self.color as u8
    }

    /// Inverse of [`Card::to_index()`]. Panics if `idx >= 50`.
    pub fn from_index(idx: u8) -> Self {
        let rank = *Rank::ALL
            .iter()
            .rev()
            .find(|rank| rank.offset() <= idx)
            .expect("rank offsets start at zero");
        let within_rank = idx - rank.offset();
        assert!(within_rank < rank.copies() * 5, "card index {} out of range", idx);
        Card {
            color: Color::ALL[usize::from(within_rank % 5)],
            rank,
            instance: within_rank / 5,
        }
    }

    /// All cards of the deck, in canonical order.
    pub fn deck() -> impl Iterator<Item = Card> {
        (0..DECK_SIZE as u8).map(Card::from_index)
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Color::Red => "red",
            Color::Yellow => "yellow",
            Color::Green => "green",
            Color::Blue => "blue",
            Color::White => "white",
        };
        write!(f, "{}", name)
    }
}

impl std::fmt::Display for Rank {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value())
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.rank, self.color.letter())?;
        if self.instance > 0 {
            write!(f, ".{}", self.instance)?;
        }
        Ok(())
    }
}

impl FromStr for Card {
    type Err = CardFromStrErr;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (kind, instance) = match s.split_once('.') {
            Some((kind, instance)) => (
                kind,
                instance
                    .parse::<u8>()
                    .map_err(|_| CardFromStrErr::InvalidInstance)?,
            ),
            None => (s, 0),
        };
        let mut chars = kind.chars();
        let rank_char = chars.next().ok_or(CardFromStrErr::LessThanTwoChars)?;
        let color_char = chars.next().ok_or(CardFromStrErr::LessThanTwoChars)?;
        if chars.next().is_some() {
            return Err(CardFromStrErr::MoreThanTwoChars);
        }
        let rank = rank_char
            .to_digit(10)
            .and_then(|d| Rank::try_from(d as u8).ok())
            .ok_or(CardFromStrErr::InvalidRank)?;
        let color = Color::ALL
            .into_iter()
            .find(|c| c.letter() == color_char)
            .ok_or(CardFromStrErr::InvalidColor)?;
        Card::new(color, rank, instance).ok_or(CardFromStrErr::InvalidInstance)
    }
}

/// Shorthand for creating cards from a short string.
///
/// The first character is the [rank](Rank), the second is the first
/// letter of the [color](Color). An optional `.n` suffix selects the
/// instance, which defaults to zero.
///
/// This macro is just calling the [`FromStr`] instance of [`Card`].
/// ```
/// # use hanabi::{card, Card, Color, Rank};
/// assert_eq!(
///     card!("1g.2"),
///     Card { color: Color::Green, rank: Rank::One, instance: 2 }
/// );
/// ```
#[macro_export]
macro_rules! card {
    ($rs:literal) => {
        <$crate::Card as std::str::FromStr>::from_str($rs)
            .expect("Invalid card code given to card! macro")
    };
}
// The import is for using the macro in other modules, see https://stackoverflow.com/a/31749071/1726797
#[allow(unused_imports)]
pub(crate) use card;
