use hanabi::Action;
use hanabi_bot_utils::GameState;

use crate::{Rule, ALMOST_SAFE_THRESHOLD};

/// Where the chosen action came from.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DecisionSource {
    Rule(Rule),
    /// No rule proposed a usable action.
    Fallback,
}

/// What one rule said during a decision.
#[derive(Clone, Debug, PartialEq)]
pub struct RuleOutcome {
    pub rule: Rule,
    pub proposed: Option<Action>,
    /// The proposal was refused by the server earlier this turn.
    pub already_rejected: bool,
}

/// The chosen action, together with how it was reached.
#[derive(Clone, Debug, PartialEq)]
pub struct Decision {
    pub action: Action,
    pub source: DecisionSource,
    /// Every rule that was evaluated, in order. Rules after the matching one are not listed.
    pub trace: Vec<RuleOutcome>,
}

/// An ordered list of rules; the first one that proposes an action wins.
#[derive(Clone, Debug, PartialEq)]
pub struct RulePolicy {
    rules: Vec<Rule>,
}

impl Default for RulePolicy {
    fn default() -> Self {
        Self::with_threshold(ALMOST_SAFE_THRESHOLD)
    }
}

impl RulePolicy {
    pub fn new(rules: Vec<Rule>) -> Self {
        Self { rules }
    }

    /// The default rule order, with a custom threshold for almost safe plays.
    pub fn with_threshold(threshold: f64) -> Self {
        Self::new(vec![
            Rule::PlaySafeCard,
            Rule::PlayAlmostSafeCard { threshold },
            Rule::HintPlayableCard,
            Rule::DiscardUselessCard,
            Rule::HintUselessCard,
            Rule::HintMostUncluedCards,
            Rule::DiscardChop,
            Rule::DiscardLessUsefulCard,
        ])
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Picks an action, never one of `rejected`, unless every discard was rejected too.
    pub fn decide(&self, state: &GameState, rejected: &[Action]) -> Decision {
        let mut trace = Vec::with_capacity(self.rules.len());
        for &rule in &self.rules {
            let proposed = rule.evaluate(state);
            let already_rejected = proposed.as_ref().is_some_and(|a| rejected.contains(a));
            trace.push(RuleOutcome {
                rule,
                proposed: proposed.clone(),
                already_rejected,
            });
            if let (Some(action), false) = (proposed, already_rejected) {
                return Decision {
                    action,
                    source: DecisionSource::Rule(rule),
                    trace,
                };
            }
        }
        Decision {
            action: fallback(state, rejected),
            source: DecisionSource::Fallback,
            trace,
        }
    }
}

// Discarding is always legal, so the chop, or else the oldest card, is the last resort.
fn fallback(state: &GameState, rejected: &[Action]) -> Action {
    let hand_size = state.inference().hand_size();
    state
        .chop_index()
        .into_iter()
        .chain(0..hand_size)
        .map(|card_index| Action::Discard { card_index })
        .find(|action| !rejected.contains(action))
        .unwrap_or(Action::Discard {
            card_index: state.chop_index().unwrap_or(0),
        })
}
