use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{Card, Color, HintValue};

/// Request sent from a player to the server.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Request {
    /// Join the server under a name.
    ///
    /// The response should be a [`Response::ConnectionOk`].
    Join { name: String },
    /// Ask to start a game as soon as every connected player agrees.
    ///
    /// The response should be a [`Response::StartAccepted`].
    Start { name: String },
    /// Confirm having received [`Response::GameStart`].
    Ready { name: String },
    /// Ask for the current [`StateSnapshot`].
    GetState { name: String },
    PlayCard { name: String, card_index: usize },
    DiscardCard { name: String, card_index: usize },
    GiveHint {
        name: String,
        destination: String,
        #[serde(flatten)]
        value: HintValue,
    },
}

/// Message sent from the server to a player.
///
/// Results of actions (hints, plays, discards) are broadcast to every player.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Response {
    ConnectionOk { name: String },
    StartAccepted { accepted: usize, connected: usize },
    GameStart { players: Vec<String> },
    GameState(StateSnapshot),
    HintData {
        sender: String,
        destination: String,
        #[serde(flatten)]
        value: HintValue,
        positions: Vec<usize>,
    },
    DiscardOk {
        sender: String,
        card_index: usize,
        card: Card,
    },
    PlayOk {
        sender: String,
        card_index: usize,
        card: Card,
    },
    /// A card was played that did not fit its pile.
    Mistake {
        sender: String,
        card_index: usize,
        card: Card,
    },
    /// The requested action is not allowed right now. Only sent to the requester.
    InvalidAction { message: String },
    /// The request was malformed. Only sent to the requester.
    InvalidData { message: String },
    GameOver { score: u8, message: String },
}

impl Response {
    /// Name of the message kind, for error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Response::ConnectionOk { .. } => "ConnectionOk",
            Response::StartAccepted { .. } => "StartAccepted",
            Response::GameStart { .. } => "GameStart",
            Response::GameState(_) => "GameState",
            Response::HintData { .. } => "HintData",
            Response::DiscardOk { .. } => "DiscardOk",
            Response::PlayOk { .. } => "PlayOk",
            Response::Mistake { .. } => "Mistake",
            Response::InvalidAction { .. } => "InvalidAction",
            Response::InvalidData { .. } => "InvalidData",
            Response::GameOver { .. } => "GameOver",
        }
    }
}

/// The authoritative game state as seen by the requesting player.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateSnapshot {
    pub current_player: String,
    /// All players in turn order. The requester's own hand is left empty.
    pub players: Vec<PlayerSnapshot>,
    /// The played cards of each color, bottom first.
    #[serde(default)]
    pub table_cards: BTreeMap<Color, Vec<Card>>,
    #[serde(default)]
    pub discard_pile: Vec<Card>,
    pub used_hint_tokens: u8,
    pub used_mistake_tokens: u8,
    /// How many cards are left to draw.
    pub draw_pile_size: usize,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSnapshot {
    pub name: String,
    #[serde(default)]
    pub hand: Vec<Card>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{card, Rank};

    #[test]
    fn hint_request_is_flat() {
        let req = Request::GiveHint {
            name: String::from("alice"),
            destination: String::from("bob"),
            value: HintValue::Rank(Rank::One),
        };
        let json = serde_json::to_string(&req).unwrap();
        assert_eq!(
            json,
            r#"{"type":"GiveHint","name":"alice","destination":"bob","kind":"rank","value":1}"#
        );
        assert_eq!(serde_json::from_str::<Request>(&json).unwrap(), req);
    }

    #[test]
    fn parse_snapshot() {
        let json = r#"{
            "type": "GameState",
            "current_player": "bob",
            "players": [
                {"name": "alice"},
                {"name": "bob", "hand": [{"color": "red", "rank": 1, "instance": 0}]}
            ],
            "table_cards": {"green": [{"color": "green", "rank": 1, "instance": 2}]},
            "used_hint_tokens": 1,
            "used_mistake_tokens": 0,
            "draw_pile_size": 30
        }"#;
        let Response::GameState(snapshot) = serde_json::from_str::<Response>(json).unwrap() else {
            panic!("expected a state snapshot");
        };
        assert_eq!(snapshot.players[0].hand, vec![]);
        assert_eq!(snapshot.players[1].hand, vec![card!("1r")]);
        assert_eq!(snapshot.table_cards[&Color::Green], vec![card!("1g.2")]);
        assert!(snapshot.discard_pile.is_empty());
    }
}
