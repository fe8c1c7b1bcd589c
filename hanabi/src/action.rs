use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::{Card, CardsSet, Color, Rank};

/// The information carried by a hint: either a color or a rank.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum HintValue {
    Color(Color),
    Rank(Rank),
}

impl HintValue {
    /// Whether the hint predicate holds for this card.
    pub fn covers(self, card: Card) -> bool {
        match self {
            HintValue::Color(color) => card.color == color,
            HintValue::Rank(rank) => card.rank == rank,
        }
    }

    /// Every card of the deck this hint would cover.
    pub fn matching(self) -> CardsSet {
        match self {
            HintValue::Color(color) => CardsSet::of_color(color),
            HintValue::Rank(rank) => CardsSet::of_rank(rank),
        }
    }
}

impl std::fmt::Display for HintValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HintValue::Color(color) => write!(f, "{}", color),
            HintValue::Rank(rank) => write!(f, "{}", rank),
        }
    }
}

/// A move a player can make on their turn.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Action {
    /// Play the card at this index of the own hand.
    Play { card_index: usize },
    /// Discard the card at this index of the own hand, which returns a hint token.
    Discard { card_index: usize },
    /// Tell another player which of their cards have a color or rank.
    Hint { target: String, value: HintValue },
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Action::Play { card_index } => write!(f, "play card {}", card_index),
            Action::Discard { card_index } => write!(f, "discard card {}", card_index),
            Action::Hint { target, value } => write!(f, "hint {} to {}", value, target),
        }
    }
}

/// A hint that has been given, as observed by every player.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Hint {
    pub sender: String,
    pub receiver: String,
    pub value: HintValue,
    /// Indices in the receiver's hand whose cards satisfy the hint.
    pub positions: BTreeSet<usize>,
}

impl Hint {
    pub fn covers(&self, card: Card) -> bool {
        self.value.covers(card)
    }

    pub fn matches_position(&self, idx: usize) -> bool {
        self.positions.contains(&idx)
    }
}

/// The observed outcome of one player's turn.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ActionResult {
    Hinted(Hint),
    /// The card extended its pile.
    Played {
        player: String,
        card_index: usize,
        card: Card,
    },
    /// The card could not be placed and cost a mistake token.
    Misplayed {
        player: String,
        card_index: usize,
        card: Card,
    },
    Discarded {
        player: String,
        card_index: usize,
        card: Card,
    },
}

impl ActionResult {
    /// The player whose turn produced this result.
    pub fn actor(&self) -> &str {
        match self {
            ActionResult::Hinted(hint) => &hint.sender,
            ActionResult::Played { player, .. }
            | ActionResult::Misplayed { player, .. }
            | ActionResult::Discarded { player, .. } => player,
        }
    }

    /// The hand index and identity of the card that left the actor's hand, if any.
    pub fn revealed_card(&self) -> Option<(usize, Card)> {
        match self {
            ActionResult::Hinted(_) => None,
            ActionResult::Played {
                card_index, card, ..
            }
            | ActionResult::Misplayed {
                card_index, card, ..
            }
            | ActionResult::Discarded {
                card_index, card, ..
            } => Some((*card_index, *card)),
        }
    }
}
