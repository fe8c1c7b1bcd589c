use crate::{Card, CardsSet, Color, Rank, SnapshotError, StateSnapshot};

pub const MAX_HINT_TOKENS: u8 = 8;
pub const MAX_MISTAKE_TOKENS: u8 = 3;

/// A player as seen from the outside.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlayerView {
    pub name: String,
    /// Empty for the observing player, whose own cards are hidden.
    pub hand: Vec<Card>,
}

/// Everything about the game that every player can see.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PublicState {
    /// Played cards for each color, indexed by `Color as usize`, bottom first.
    pub piles: [Vec<Card>; 5],
    pub discard_pile: CardsSet,
    pub players: Vec<PlayerView>,
    pub used_hint_tokens: u8,
    pub used_mistake_tokens: u8,
    pub current_player: usize,
    pub draw_pile_size: usize,
}

impl PublicState {
    pub fn from_snapshot(snapshot: &StateSnapshot) -> Result<Self, SnapshotError> {
        if snapshot.used_hint_tokens > MAX_HINT_TOKENS
            || snapshot.used_mistake_tokens > MAX_MISTAKE_TOKENS
        {
            return Err(SnapshotError::TooManyTokens {
                hint: snapshot.used_hint_tokens,
                mistake: snapshot.used_mistake_tokens,
            });
        }

        let mut piles: [Vec<Card>; 5] = Default::default();
        for (&color, cards) in &snapshot.table_cards {
            for (height, &card) in cards.iter().enumerate() {
                if card.color != color || usize::from(card.rank.value()) != height + 1 {
                    return Err(SnapshotError::PileOutOfOrder { color, card });
                }
            }
            piles[color as usize] = cards.clone();
        }

        let players: Vec<PlayerView> = snapshot
            .players
            .iter()
            .map(|p| PlayerView {
                name: p.name.clone(),
                hand: p.hand.clone(),
            })
            .collect();
        let current_player = players
            .iter()
            .position(|p| p.name == snapshot.current_player)
            .ok_or_else(|| SnapshotError::UnknownPlayer {
                name: snapshot.current_player.clone(),
            })?;

        Ok(Self {
            piles,
            discard_pile: CardsSet::from_iter(&snapshot.discard_pile),
            players,
            used_hint_tokens: snapshot.used_hint_tokens,
            used_mistake_tokens: snapshot.used_mistake_tokens,
            current_player,
            draw_pile_size: snapshot.draw_pile_size,
        })
    }

    pub fn pile(&self, color: Color) -> &[Card] {
        &self.piles[color as usize]
    }

    /// The rank that would extend this color's pile, or `None` once it is complete.
    pub fn next_rank(&self, color: Color) -> Option<Rank> {
        match self.pile(color).last() {
            None => Some(Rank::One),
            Some(top) => top.rank.next(),
        }
    }

    pub fn player_index(&self, name: &str) -> Option<usize> {
        self.players.iter().position(|p| p.name == name)
    }

    pub fn player(&self, name: &str) -> Option<&PlayerView> {
        self.players.iter().find(|p| p.name == name)
    }

    /// Hints consume a token, so they need at least one left.
    pub fn can_hint(&self) -> bool {
        self.used_hint_tokens < MAX_HINT_TOKENS
    }

    /// All cards lying on the piles.
    pub fn table_cards(&self) -> CardsSet {
        self.piles.iter().flatten().collect()
    }

    pub fn score(&self) -> usize {
        self.piles.iter().map(Vec::len).sum()
    }

    /// The card instances that would extend some pile right now.
    pub fn playable_now(&self) -> CardsSet {
        let mut playable = CardsSet::new();
        for color in Color::ALL {
            if let Some(rank) = self.next_rank(color) {
                playable |= CardsSet::of_kind(color, rank) & !self.discard_pile;
            }
        }
        playable
    }

    /// The card instances that could still extend some pile in the future.
    ///
    /// A color stops at the first rank whose instances have all been discarded,
    /// since no higher rank of that color can ever be played afterwards.
    pub fn future_playable(&self) -> CardsSet {
        let mut playable = CardsSet::new();
        for color in Color::ALL {
            let mut rank = self.next_rank(color);
            while let Some(r) = rank {
                let kind = CardsSet::of_kind(color, r);
                if kind.is_subset(self.discard_pile) {
                    break;
                }
                playable |= kind & !self.discard_pile;
                rank = r.next();
            }
        }
        playable
    }
}
