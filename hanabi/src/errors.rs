use crate::{Card, Color};

/// The error type for the [`FromStr`](std::str::FromStr) instance of [`Card`],
/// also used when a rank number is out of range.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CardFromStrErr {
    LessThanTwoChars,
    MoreThanTwoChars,
    InvalidRank,
    InvalidColor,
    InvalidInstance,
}

impl std::error::Error for CardFromStrErr {}

impl std::fmt::Display for CardFromStrErr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CardFromStrErr::LessThanTwoChars => write!(f, "Card code has less than two characters"),
            CardFromStrErr::MoreThanTwoChars => write!(f, "Card code has more than two characters"),
            CardFromStrErr::InvalidRank => write!(f, "Rank must be a number from 1 to 5"),
            CardFromStrErr::InvalidColor => write!(f, "Color must be one of r, y, g, b, w"),
            CardFromStrErr::InvalidInstance => {
                write!(f, "Instance number does not exist for this rank")
            }
        }
    }
}

/// The error type for [`PublicState::from_snapshot()`](crate::PublicState::from_snapshot).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SnapshotError {
    UnknownPlayer { name: String },
    PileOutOfOrder { color: Color, card: Card },
    TooManyTokens { hint: u8, mistake: u8 },
}

impl std::error::Error for SnapshotError {}

impl std::fmt::Display for SnapshotError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SnapshotError::UnknownPlayer { name } => {
                write!(f, "Player '{}' is not part of the game", name)
            }
            SnapshotError::PileOutOfOrder { color, card } => {
                write!(f, "Card {} does not belong at its place on the {} pile", card, color)
            }
            SnapshotError::TooManyTokens { hint, mistake } => write!(
                f,
                "Token counts out of range: {}/8 hint tokens and {}/3 mistake tokens used",
                hint, mistake
            ),
        }
    }
}
