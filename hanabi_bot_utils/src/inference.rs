use hanabi::{Card, CardsSet, Hint, FULL_DECK};

use crate::InferenceError;

/// What is known about one hidden card in our own hand.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BeliefSlot {
    /// Every card instance consistent with all observations so far.
    pub candidates: CardsSet,
    /// Hints that touched this slot, in the order they arrived.
    pub received_hints: Vec<Hint>,
    /// Hints given to us that did not touch this slot.
    pub not_received_hints: Vec<Hint>,
}

impl BeliefSlot {
    /// A freshly drawn card: anything that is not visible elsewhere.
    pub fn new(visible: CardsSet) -> Self {
        Self {
            candidates: FULL_DECK & !visible,
            received_hints: Vec::new(),
            not_received_hints: Vec::new(),
        }
    }

    pub fn is_hinted(&self) -> bool {
        !self.received_hints.is_empty()
    }

    /// Probability that this slot holds exactly `card`, with all candidates equally likely.
    pub fn probability(&self, card: Card) -> f64 {
        if self.candidates.contains(card) {
            1.0 / f64::from(self.candidates.len())
        } else {
            0.0
        }
    }

    /// Fraction of the candidates that lie in `set`.
    pub fn ratio_in(&self, set: CardsSet) -> f64 {
        if self.candidates.is_empty() {
            return 0.0;
        }
        f64::from((self.candidates & set).len()) / f64::from(self.candidates.len())
    }

    fn add_positive_knowledge(&mut self, hint: &Hint) {
        self.candidates &= hint.value.matching();
        self.received_hints.push(hint.clone());
    }

    fn add_negative_knowledge(&mut self, hint: &Hint) {
        self.candidates &= !hint.value.matching();
        self.not_received_hints.push(hint.clone());
    }
}

/// Tracks the possible identities of every card in our own hand.
///
/// Slot order follows the hand order on the server: played or discarded
/// cards leave a gap that is closed by shifting, and drawn cards are
/// appended at the end.
#[derive(Clone, Debug)]
pub struct Inference {
    slots: Vec<BeliefSlot>,
    visible: CardsSet,
    chop: Option<usize>,
}

impl Inference {
    /// Hand size for a game with this many players.
    pub fn hand_size_for(num_players: usize) -> usize {
        if num_players <= 3 {
            5
        } else {
            4
        }
    }

    pub fn new(hand_size: usize, visible: CardsSet) -> Self {
        let mut inference = Self {
            slots: vec![BeliefSlot::new(visible); hand_size],
            visible,
            chop: None,
        };
        inference.recompute_chop();
        inference
    }

    pub fn slots(&self) -> &[BeliefSlot] {
        &self.slots
    }

    pub fn hand_size(&self) -> usize {
        self.slots.len()
    }

    /// Cards known not to be in our hand.
    pub fn visible(&self) -> CardsSet {
        self.visible
    }

    /// The first slot that never received a hint.
    pub fn chop_index(&self) -> Option<usize> {
        self.chop
    }

    /// Narrows every slot with a hint given to us.
    ///
    /// Touched slots keep only matching candidates, all other slots lose
    /// the matching ones.
    pub fn apply_hint(&mut self, hint: &Hint) -> Result<(), InferenceError> {
        if let Some(&index) = hint.positions.iter().find(|&&i| i >= self.slots.len()) {
            return Err(InferenceError::SlotOutOfRange {
                index,
                hand_size: self.slots.len(),
            });
        }
        for (i, slot) in self.slots.iter_mut().enumerate() {
            if hint.matches_position(i) {
                slot.add_positive_knowledge(hint);
            } else {
                slot.add_negative_knowledge(hint);
            }
        }
        self.recompute_chop();
        self.check_consistency()
    }

    /// Records a card seen outside our hand. Observing a card twice has no further effect.
    pub fn observe(&mut self, card: Card) -> Result<(), InferenceError> {
        self.observe_all(CardsSet::new().insert(card))
    }

    pub fn observe_all(&mut self, cards: CardsSet) -> Result<(), InferenceError> {
        self.visible |= cards;
        for slot in &mut self.slots {
            slot.candidates &= !cards;
        }
        self.check_consistency()
    }

    /// Our card at `index` left the hand as `revealed`, and a new card was drawn.
    pub fn replace_slot(&mut self, index: usize, revealed: Card) -> Result<(), InferenceError> {
        self.remove_slot(index, revealed)?;
        self.slots.push(BeliefSlot::new(self.visible));
        self.recompute_chop();
        self.check_consistency()
    }

    /// Our card at `index` left the hand as `revealed`, with nothing left to draw.
    pub fn remove_slot(&mut self, index: usize, revealed: Card) -> Result<(), InferenceError> {
        if index >= self.slots.len() {
            return Err(InferenceError::SlotOutOfRange {
                index,
                hand_size: self.slots.len(),
            });
        }
        // The slot goes first: if it was fully known, observing its card
        // would otherwise empty it.
        self.slots.remove(index);
        self.recompute_chop();
        self.observe(revealed)
    }

    fn recompute_chop(&mut self) {
        self.chop = self.slots.iter().position(|slot| !slot.is_hinted());
    }

    fn check_consistency(&self) -> Result<(), InferenceError> {
        match self.slots.iter().position(|slot| slot.candidates.is_empty()) {
            Some(slot) => Err(InferenceError::Contradiction { slot }),
            None => Ok(()),
        }
    }
}
