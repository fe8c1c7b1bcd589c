use std::collections::BTreeMap;

use hanabi::{ActionResult, CardsSet, PlayerView, PublicState, SnapshotError, StateSnapshot};
use tracing::debug;

use crate::Inference;

/// Everything one agent knows about the running game.
///
/// Combines the public table state with the agent's beliefs about its own
/// hand, and keeps a ledger of which cards of the other players have
/// already been hinted.
#[derive(Clone, Debug)]
pub struct GameState {
    me: String,
    my_index: usize,
    public: PublicState,
    inference: Inference,
    // Card instances that were touched by a hint, per receiving player.
    clues: BTreeMap<String, CardsSet>,
}

impl GameState {
    /// Builds the state from the first snapshot of a game.
    pub fn new(me: &str, snapshot: &StateSnapshot) -> anyhow::Result<Self> {
        let public = PublicState::from_snapshot(snapshot)?;
        let my_index = public
            .player_index(me)
            .ok_or_else(|| SnapshotError::UnknownPlayer {
                name: String::from(me),
            })?;
        let hand_size = Inference::hand_size_for(public.players.len());
        let mut state = Self {
            me: String::from(me),
            my_index,
            inference: Inference::new(hand_size, CardsSet::new()),
            public,
            clues: BTreeMap::new(),
        };
        state.inference.observe_all(state.visible_cards())?;
        debug!(
            player = %state.me,
            hand_size,
            visible = state.inference.visible().len(),
            "Initialized game state"
        );
        Ok(state)
    }

    /// Applies the result of a turn together with the snapshot fetched right after it.
    pub fn apply(&mut self, result: &ActionResult, snapshot: &StateSnapshot) -> anyhow::Result<()> {
        match result {
            ActionResult::Hinted(hint) if hint.receiver == self.me => {
                self.inference.apply_hint(hint)?;
                debug!(
                    from = %hint.sender,
                    value = %hint.value,
                    positions = ?hint.positions,
                    chop = ?self.inference.chop_index(),
                    "Received a hint"
                );
            }
            ActionResult::Hinted(hint) => {
                let receiver = self.public.player(&hint.receiver).ok_or_else(|| {
                    SnapshotError::UnknownPlayer {
                        name: hint.receiver.clone(),
                    }
                })?;
                let touched: CardsSet = hint
                    .positions
                    .iter()
                    .filter_map(|&i| receiver.hand.get(i))
                    .collect();
                *self.clues.entry(hint.receiver.clone()).or_default() |= touched;
            }
            _ => {
                if let Some((card_index, card)) = result.revealed_card() {
                    if result.actor() == self.me {
                        if self.public.draw_pile_size > 0 {
                            self.inference.replace_slot(card_index, card)?;
                        } else {
                            self.inference.remove_slot(card_index, card)?;
                        }
                        debug!(card_index, %card, "Own card revealed");
                    }
                }
            }
        }

        self.public = PublicState::from_snapshot(snapshot)?;
        self.my_index = self
            .public
            .player_index(&self.me)
            .ok_or_else(|| SnapshotError::UnknownPlayer {
                name: self.me.clone(),
            })?;
        self.inference.observe_all(self.visible_cards())?;
        Ok(())
    }

    pub fn me(&self) -> &str {
        &self.me
    }

    pub fn my_index(&self) -> usize {
        self.my_index
    }

    pub fn public(&self) -> &PublicState {
        &self.public
    }

    pub fn inference(&self) -> &Inference {
        &self.inference
    }

    pub fn is_my_turn(&self) -> bool {
        self.public.current_player == self.my_index
    }

    pub fn current_player(&self) -> &str {
        &self.public.players[self.public.current_player].name
    }

    pub fn can_hint(&self) -> bool {
        self.public.can_hint()
    }

    pub fn chop_index(&self) -> Option<usize> {
        self.inference.chop_index()
    }

    pub fn playable_now(&self) -> CardsSet {
        self.public.playable_now()
    }

    pub fn future_playable(&self) -> CardsSet {
        self.public.future_playable()
    }

    /// Cards of this player that some earlier hint already pointed at.
    pub fn clued_cards(&self, player: &str) -> CardsSet {
        let Some(view) = self.public.player(player) else {
            return CardsSet::new();
        };
        let ledger = self.clues.get(player).copied().unwrap_or_default();
        CardsSet::from_iter(&view.hand) & ledger
    }

    /// The other players, starting with the one after us and wrapping around.
    pub fn relative_player_order(&self) -> Vec<&PlayerView> {
        let n = self.public.players.len();
        (1..n)
            .map(|offset| &self.public.players[(self.my_index + offset) % n])
            .collect()
    }

    /// Cards we know are not in our own hand.
    fn visible_cards(&self) -> CardsSet {
        let mut visible = self.public.table_cards() | self.public.discard_pile;
        for (i, player) in self.public.players.iter().enumerate() {
            if i != self.my_index {
                visible |= CardsSet::from_iter(&player.hand);
            }
        }
        visible
    }
}
