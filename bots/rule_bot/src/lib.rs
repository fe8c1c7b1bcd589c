mod policy;
mod rules;
pub use policy::*;
pub use rules::*;

#[cfg(test)]
mod fixtures;

use hanabi::Action;
use hanabi_bot_utils::{Bot, GameState};
use tracing::{debug, trace};

/// A bot that follows a [`RulePolicy`] and remembers why it chose its last action.
#[derive(Default)]
pub struct RuleBot {
    policy: RulePolicy,
    last_decision: Option<Decision>,
}

impl RuleBot {
    pub fn new(policy: RulePolicy) -> Self {
        Self {
            policy,
            last_decision: None,
        }
    }

    pub fn policy(&self) -> &RulePolicy {
        &self.policy
    }

    pub fn last_decision(&self) -> Option<&Decision> {
        self.last_decision.as_ref()
    }
}

impl Bot for RuleBot {
    fn new_game(&mut self, state: &GameState) {
        self.last_decision = None;
        debug!(
            "Playing as {} with {} cards in hand",
            state.me(),
            state.inference().hand_size()
        );
    }

    fn play_turn(&mut self, state: &GameState, rejected: &[Action]) -> Action {
        let decision = self.policy.decide(state, rejected);
        for outcome in &decision.trace {
            trace!(
                rule = ?outcome.rule,
                proposed = ?outcome.proposed,
                already_rejected = outcome.already_rejected,
                "Evaluated rule"
            );
        }
        debug!("Chose {} from {:?}", decision.action, decision.source);
        let action = decision.action.clone();
        self.last_decision = Some(decision);
        action
    }
}
