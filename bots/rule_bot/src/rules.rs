use std::collections::BTreeMap;

use hanabi::{Action, CardsSet, HintValue, MAX_MISTAKE_TOKENS};
use hanabi_bot_utils::GameState;

/// Default for [`Rule::PlayAlmostSafeCard`].
pub const ALMOST_SAFE_THRESHOLD: f64 = 0.7;

/// A single decision rule. Each rule looks at the game state and either
/// proposes an action or passes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Rule {
    /// Play the first card that is playable whatever its identity.
    PlaySafeCard,
    /// Play the first card whose chance of being playable exceeds the threshold.
    PlayAlmostSafeCard { threshold: f64 },
    /// Play the card most likely to be playable.
    PlayLessRiskyCard,
    /// Discard the first card that can never be played again.
    DiscardUselessCard,
    /// Discard the card least likely to be needed in the future.
    DiscardLessUsefulCard,
    /// Discard the oldest card without a hint.
    DiscardChop,
    /// Give a hint that touches only playable, not yet hinted cards.
    HintPlayableCard,
    /// Hint the color or rank shared by the most cards in one hand.
    HintMostCards,
    /// Like `HintMostCards`, counting only cards without a hint.
    HintMostUncluedCards,
    /// Point out a card that will never be playable, so it gets discarded.
    HintUselessCard,
}

impl Rule {
    pub fn evaluate(&self, state: &GameState) -> Option<Action> {
        match *self {
            Rule::PlaySafeCard => play_safe_card(state),
            Rule::PlayAlmostSafeCard { threshold } => play_almost_safe_card(state, threshold),
            Rule::PlayLessRiskyCard => play_less_risky_card(state),
            Rule::DiscardUselessCard => discard_useless_card(state),
            Rule::DiscardLessUsefulCard => discard_less_useful_card(state),
            Rule::DiscardChop => state
                .chop_index()
                .map(|card_index| Action::Discard { card_index }),
            Rule::HintPlayableCard => hint_playable_card(state),
            Rule::HintMostCards => hint_most_cards(state, false),
            Rule::HintMostUncluedCards => hint_most_cards(state, true),
            Rule::HintUselessCard => hint_useless_card(state),
        }
    }
}

// A third mistake ends the game, so guesses stop one mistake earlier.
fn can_risk_mistake(state: &GameState) -> bool {
    state.public().used_mistake_tokens + 1 < MAX_MISTAKE_TOKENS
}

fn play_safe_card(state: &GameState) -> Option<Action> {
    let playable = state.playable_now();
    state
        .inference()
        .slots()
        .iter()
        .position(|slot| slot.candidates.is_subset(playable))
        .map(|card_index| Action::Play { card_index })
}

fn play_almost_safe_card(state: &GameState, threshold: f64) -> Option<Action> {
    if !can_risk_mistake(state) {
        return None;
    }
    let playable = state.playable_now();
    state
        .inference()
        .slots()
        .iter()
        .position(|slot| slot.ratio_in(playable) > threshold)
        .map(|card_index| Action::Play { card_index })
}

fn play_less_risky_card(state: &GameState) -> Option<Action> {
    if !can_risk_mistake(state) {
        return None;
    }
    let playable = state.playable_now();
    let mut best: Option<(usize, f64)> = None;
    for (i, slot) in state.inference().slots().iter().enumerate() {
        let ratio = slot.ratio_in(playable);
        // A card with no chance at all is a certain mistake.
        if ratio > 0.0 && best.map_or(true, |(_, best_ratio)| ratio > best_ratio) {
            best = Some((i, ratio));
        }
    }
    best.map(|(card_index, _)| Action::Play { card_index })
}

fn discard_useless_card(state: &GameState) -> Option<Action> {
    let future = state.future_playable();
    state
        .inference()
        .slots()
        .iter()
        .position(|slot| slot.candidates.is_disjoint(future))
        .map(|card_index| Action::Discard { card_index })
}

fn discard_less_useful_card(state: &GameState) -> Option<Action> {
    let future = state.future_playable();
    let mut best: Option<(usize, f64)> = None;
    for (i, slot) in state.inference().slots().iter().enumerate() {
        let ratio = slot.ratio_in(future);
        if best.map_or(true, |(_, best_ratio)| ratio < best_ratio) {
            best = Some((i, ratio));
        }
    }
    best.map(|(card_index, _)| Action::Discard { card_index })
}

fn hint_playable_card(state: &GameState) -> Option<Action> {
    if !state.can_hint() {
        return None;
    }
    let playable = state.playable_now();
    for player in state.relative_player_order() {
        let hand = CardsSet::from_iter(&player.hand);
        let hintable = hand & playable & !state.clued_cards(&player.name);
        for &card in player.hand.iter().filter(|&&c| hintable.contains(c)) {
            for value in [HintValue::Color(card.color), HintValue::Rank(card.rank)] {
                // The hint must not point at anything but hintable cards.
                if (hand & value.matching()).is_subset(hintable) {
                    return Some(Action::Hint {
                        target: player.name.clone(),
                        value,
                    });
                }
            }
        }
    }
    None
}

fn hint_most_cards(state: &GameState, unclued_only: bool) -> Option<Action> {
    if !state.can_hint() {
        return None;
    }
    let mut best: Option<(&str, HintValue, usize)> = None;
    for player in state.relative_player_order() {
        let skipped = if unclued_only {
            state.clued_cards(&player.name)
        } else {
            CardsSet::new()
        };
        let mut counts: BTreeMap<HintValue, usize> = BTreeMap::new();
        for &card in player.hand.iter().filter(|&&c| !skipped.contains(c)) {
            *counts.entry(HintValue::Color(card.color)).or_default() += 1;
            *counts.entry(HintValue::Rank(card.rank)).or_default() += 1;
        }
        for (value, count) in counts {
            if best.map_or(true, |(_, _, best_count)| count > best_count) {
                best = Some((&player.name, value, count));
            }
        }
    }
    best.map(|(target, value, _)| Action::Hint {
        target: String::from(target),
        value,
    })
}

fn hint_useless_card(state: &GameState) -> Option<Action> {
    if !state.can_hint() {
        return None;
    }
    let future = state.future_playable();
    for player in state.relative_player_order() {
        let clued = state.clued_cards(&player.name);
        if let Some(card) = player
            .hand
            .iter()
            .find(|&&c| !future.contains(c) && !clued.contains(c))
        {
            return Some(Action::Hint {
                target: player.name.clone(),
                value: HintValue::Color(card.color),
            });
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use hanabi::{card, Color, Rank};

    use super::*;
    use crate::fixtures::{hint_me, hint_player, pile, Table};

    fn bob_hand() -> Vec<hanabi::Card> {
        vec![card!("1r"), card!("2r"), card!("1g"), card!("4b"), card!("5w")]
    }

    fn hint(target: &str, value: HintValue) -> Option<Action> {
        Some(Action::Hint {
            target: String::from(target),
            value,
        })
    }

    #[test]
    fn play_safe_card_picks_lowest_certain_slot() {
        let mut state = Table::new().player("bob", bob_hand()).build();
        assert_eq!(Rule::PlaySafeCard.evaluate(&state), None);

        hint_me(&mut state, HintValue::Rank(Rank::One), &[1, 3]);
        assert_eq!(
            Rule::PlaySafeCard.evaluate(&state),
            Some(Action::Play { card_index: 1 })
        );
    }

    #[test]
    fn ones_are_not_safe_once_one_is_played() {
        let mut state = Table::new()
            .player("bob", bob_hand())
            .piles(pile(Color::Yellow, 1))
            .build();
        hint_me(&mut state, HintValue::Rank(Rank::One), &[0]);
        assert_eq!(Rule::PlaySafeCard.evaluate(&state), None);
        // 10 of the 12 unseen ones are still playable.
        assert_eq!(
            Rule::PlayAlmostSafeCard { threshold: 0.7 }.evaluate(&state),
            Some(Action::Play { card_index: 0 })
        );
        assert_eq!(
            Rule::PlayAlmostSafeCard { threshold: 0.9 }.evaluate(&state),
            None
        );
        assert_eq!(
            Rule::PlayLessRiskyCard.evaluate(&state),
            Some(Action::Play { card_index: 0 })
        );
    }

    #[test]
    fn risky_plays_stop_before_last_mistake() {
        let mut state = Table::new()
            .player("bob", bob_hand())
            .piles(pile(Color::Yellow, 1))
            .mistakes(2)
            .build();
        hint_me(&mut state, HintValue::Rank(Rank::One), &[0]);
        assert_eq!(
            Rule::PlayAlmostSafeCard { threshold: 0.7 }.evaluate(&state),
            None
        );
        assert_eq!(Rule::PlayLessRiskyCard.evaluate(&state), None);
    }

    #[test]
    fn less_risky_needs_some_chance() {
        let mut state = Table::new()
            .player(
                "bob",
                vec![card!("1r.1"), card!("2r.1"), card!("1g.1"), card!("4b.1"), card!("3w.1")],
            )
            .piles(Color::ALL.into_iter().flat_map(|c| pile(c, 5)).collect())
            .build();
        hint_me(&mut state, HintValue::Rank(Rank::Two), &[0]);
        assert_eq!(Rule::PlayLessRiskyCard.evaluate(&state), None);
    }

    #[test]
    fn less_risky_picks_highest_ratio() {
        let mut state = Table::new()
            .player("bob", bob_hand())
            .piles(pile(Color::Yellow, 1))
            .build();
        // Slot 1 is one of 9 yellows, of which only the two twos are playable.
        // The other slots each hold one of 35 cards, 10 of them playable ones.
        hint_me(&mut state, HintValue::Color(Color::Yellow), &[1]);
        assert_eq!(
            Rule::PlayLessRiskyCard.evaluate(&state),
            Some(Action::Play { card_index: 0 })
        );

        hint_me(&mut state, HintValue::Rank(Rank::One), &[3]);
        assert_eq!(
            Rule::PlayLessRiskyCard.evaluate(&state),
            Some(Action::Play { card_index: 3 })
        );
    }

    #[test]
    fn less_useful_picks_lowest_ratio() {
        let mut state = Table::new()
            .player("bob", bob_hand())
            .piles(pile(Color::Yellow, 5))
            .build();
        hint_me(&mut state, HintValue::Color(Color::Yellow), &[3]);
        assert_eq!(
            Rule::DiscardLessUsefulCard.evaluate(&state),
            Some(Action::Discard { card_index: 3 })
        );
        assert_eq!(
            Rule::DiscardChop.evaluate(&state),
            Some(Action::Discard { card_index: 0 })
        );
    }

    #[test]
    fn discard_rules() {
        let mut state = Table::new()
            .player("bob", bob_hand())
            .piles(pile(Color::Yellow, 5))
            .build();
        assert_eq!(Rule::DiscardUselessCard.evaluate(&state), None);
        assert_eq!(
            Rule::DiscardChop.evaluate(&state),
            Some(Action::Discard { card_index: 0 })
        );
        assert_eq!(
            Rule::DiscardLessUsefulCard.evaluate(&state),
            Some(Action::Discard { card_index: 0 })
        );

        // Every yellow card left is useless now that the yellow pile is complete.
        hint_me(&mut state, HintValue::Color(Color::Yellow), &[0, 2]);
        assert_eq!(
            Rule::DiscardUselessCard.evaluate(&state),
            Some(Action::Discard { card_index: 0 })
        );
        assert_eq!(
            Rule::DiscardChop.evaluate(&state),
            Some(Action::Discard { card_index: 1 })
        );
        hint_me(&mut state, HintValue::Rank(Rank::Five), &[1, 3, 4]);
        assert_eq!(Rule::DiscardChop.evaluate(&state), None);
    }

    #[test]
    fn hint_playable_card_isolates_playable_cards() {
        let mut state = Table::new().player("bob", bob_hand()).build();
        // Red would also touch 2r, so the rank is used.
        assert_eq!(
            Rule::HintPlayableCard.evaluate(&state),
            hint("bob", HintValue::Rank(Rank::One))
        );

        hint_player(&mut state, "bob", HintValue::Color(Color::Red), &[0, 1]);
        assert_eq!(
            Rule::HintPlayableCard.evaluate(&state),
            hint("bob", HintValue::Color(Color::Green))
        );
    }

    #[test]
    fn hints_need_a_token() {
        let state = Table::new()
            .player("bob", bob_hand())
            .hint_tokens(8)
            .build();
        assert_eq!(Rule::HintPlayableCard.evaluate(&state), None);
        assert_eq!(Rule::HintMostCards.evaluate(&state), None);
        assert_eq!(Rule::HintMostUncluedCards.evaluate(&state), None);
        assert_eq!(Rule::HintUselessCard.evaluate(&state), None);
    }

    #[test]
    fn hint_most_cards_counts_values() {
        let mut state = Table::new()
            .player("bob", bob_hand())
            .player(
                "carol",
                vec![card!("3y"), card!("3y.1"), card!("4y"), card!("2g"), card!("2b")],
            )
            .build();
        assert_eq!(
            Rule::HintMostCards.evaluate(&state),
            hint("carol", HintValue::Color(Color::Yellow))
        );

        hint_player(&mut state, "carol", HintValue::Color(Color::Yellow), &[0, 1, 2]);
        assert_eq!(
            Rule::HintMostCards.evaluate(&state),
            hint("carol", HintValue::Color(Color::Yellow))
        );
        // Without the clued yellows, bob's two reds win.
        assert_eq!(
            Rule::HintMostUncluedCards.evaluate(&state),
            hint("bob", HintValue::Color(Color::Red))
        );
    }

    #[test]
    fn hint_useless_card_points_at_played_duplicates() {
        let mut state = Table::new()
            .player("bob", vec![card!("3g"), card!("1r.1"), card!("4b")])
            .player("carol", vec![card!("2y"), card!("1w")])
            .piles(pile(Color::Red, 2))
            .build();
        assert_eq!(
            Rule::HintUselessCard.evaluate(&state),
            hint("bob", HintValue::Color(Color::Red))
        );

        hint_player(&mut state, "bob", HintValue::Rank(Rank::One), &[1]);
        assert_eq!(Rule::HintUselessCard.evaluate(&state), None);
    }
}
