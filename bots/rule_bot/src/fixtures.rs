//! Game states for rule tests, seen by "alice" on her own turn.

use std::collections::BTreeMap;

use hanabi::{ActionResult, Card, Color, Hint, HintValue, PlayerSnapshot, Rank, StateSnapshot};
use hanabi_bot_utils::GameState;

pub(crate) struct Table {
    snapshot: StateSnapshot,
}

impl Table {
    pub(crate) fn new() -> Self {
        Self {
            snapshot: StateSnapshot {
                current_player: String::from("alice"),
                players: vec![PlayerSnapshot {
                    name: String::from("alice"),
                    hand: vec![],
                }],
                table_cards: BTreeMap::new(),
                discard_pile: vec![],
                used_hint_tokens: 0,
                used_mistake_tokens: 0,
                draw_pile_size: 20,
            },
        }
    }

    pub(crate) fn player(mut self, name: &str, hand: Vec<Card>) -> Self {
        self.snapshot.players.push(PlayerSnapshot {
            name: String::from(name),
            hand,
        });
        self
    }

    pub(crate) fn piles(mut self, cards: Vec<Card>) -> Self {
        for card in cards {
            self.snapshot
                .table_cards
                .entry(card.color)
                .or_default()
                .push(card);
        }
        self
    }

    pub(crate) fn hint_tokens(mut self, used: u8) -> Self {
        self.snapshot.used_hint_tokens = used;
        self
    }

    pub(crate) fn mistakes(mut self, used: u8) -> Self {
        self.snapshot.used_mistake_tokens = used;
        self
    }

    pub(crate) fn build(self) -> GameState {
        GameState::new("alice", &self.snapshot).unwrap()
    }
}

/// The first `height` cards of a pile.
pub(crate) fn pile(color: Color, height: usize) -> Vec<Card> {
    Rank::ALL[..height]
        .iter()
        .map(|&rank| Card::new(color, rank, 0).unwrap())
        .collect()
}

pub(crate) fn hint_me(state: &mut GameState, value: HintValue, positions: &[usize]) {
    let sender = state.relative_player_order()[0].name.clone();
    give_hint(state, &sender, "alice", value, positions);
}

pub(crate) fn hint_player(
    state: &mut GameState,
    receiver: &str,
    value: HintValue,
    positions: &[usize],
) {
    give_hint(state, "alice", receiver, value, positions);
}

fn give_hint(
    state: &mut GameState,
    sender: &str,
    receiver: &str,
    value: HintValue,
    positions: &[usize],
) {
    let hint = Hint {
        sender: String::from(sender),
        receiver: String::from(receiver),
        value,
        positions: positions.iter().copied().collect(),
    };
    // The snapshot stays the same so that it is still alice's turn.
    let snapshot = snapshot_of(state);
    state.apply(&ActionResult::Hinted(hint), &snapshot).unwrap();
}

fn snapshot_of(state: &GameState) -> StateSnapshot {
    let public = state.public();
    StateSnapshot {
        current_player: state.current_player().to_owned(),
        players: public
            .players
            .iter()
            .map(|p| PlayerSnapshot {
                name: p.name.clone(),
                hand: p.hand.clone(),
            })
            .collect(),
        table_cards: Color::ALL
            .into_iter()
            .filter(|&c| !public.pile(c).is_empty())
            .map(|c| (c, public.pile(c).to_vec()))
            .collect(),
        discard_pile: public.discard_pile.into_iter().collect(),
        used_hint_tokens: public.used_hint_tokens,
        used_mistake_tokens: public.used_mistake_tokens,
        draw_pile_size: public.draw_pile_size,
    }
}
