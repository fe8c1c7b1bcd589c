use hanabi::{Action, ActionResult, Hint, Request, Response, StateSnapshot};
use tracing::{debug, info, warn};

use crate::{Bot, GameState, ProtocolError, Transport};

/// Where the client is in the life of a connection.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClientState {
    Disconnected,
    Connected,
    Lobby,
    InGame,
    GameOver,
}

/// How a game ended, as reported by the server.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameOutcome {
    pub score: u8,
    pub message: String,
}

// What the server told us while waiting for a turn to resolve.
enum Event {
    Resolved(ActionResult),
    Rejected(String),
    Ended(GameOutcome),
}

// What the server answered to a state request.
enum Fetched {
    Snapshot(StateSnapshot),
    Ended(GameOutcome),
}

/// Drives one player through join, lobby and game turns.
pub struct Client<T> {
    name: String,
    transport: T,
    state: ClientState,
}

impl<T: Transport> Client<T> {
    pub fn new(name: &str, transport: T) -> Self {
        Self {
            name: String::from(name),
            transport,
            state: ClientState::Disconnected,
        }
    }

    pub fn state(&self) -> ClientState {
        self.state
    }

    pub fn into_transport(self) -> T {
        self.transport
    }

    /// Runs the whole lifecycle: join, start, and play until the game is over.
    pub fn run<B: Bot>(&mut self, bot: &mut B) -> anyhow::Result<GameOutcome> {
        self.connect()?;
        self.request_start()?;
        let game = self.wait_start()?;
        bot.new_game(&game);
        self.play_game(bot, game)
    }

    pub fn connect(&mut self) -> anyhow::Result<()> {
        self.expect_state(ClientState::Disconnected)?;
        self.transport.send(&Request::Join {
            name: self.name.clone(),
        })?;
        match self.transport.receive()? {
            Response::ConnectionOk { .. } => {
                self.state = ClientState::Connected;
                info!(player = %self.name, "Connection accepted");
                Ok(())
            }
            other => Err(unexpected("ConnectionOk", &other).into()),
        }
    }

    pub fn request_start(&mut self) -> anyhow::Result<()> {
        self.expect_state(ClientState::Connected)?;
        self.transport.send(&Request::Start {
            name: self.name.clone(),
        })?;
        match self.transport.receive()? {
            Response::StartAccepted {
                accepted,
                connected,
            } => {
                self.state = ClientState::Lobby;
                info!(player = %self.name, accepted, connected, "Waiting in lobby");
                Ok(())
            }
            other => Err(unexpected("StartAccepted", &other).into()),
        }
    }

    /// Waits for the game to start and builds the initial state.
    pub fn wait_start(&mut self) -> anyhow::Result<GameState> {
        self.expect_state(ClientState::Lobby)?;
        loop {
            match self.transport.receive()? {
                Response::GameStart { players } => {
                    debug!(?players, "Game is starting");
                    break;
                }
                // Other players joining or getting ready.
                other => debug!(kind = other.kind(), "Skipping message in lobby"),
            }
        }
        self.transport.send(&Request::Ready {
            name: self.name.clone(),
        })?;
        self.state = ClientState::InGame;
        match self.fetch_state()? {
            Fetched::Snapshot(snapshot) => {
                let game = GameState::new(&self.name, &snapshot)?;
                info!(player = %self.name, "Game started");
                Ok(game)
            }
            Fetched::Ended(_) => Err(ProtocolError::UnexpectedResponse {
                expected: "GameState",
                received: "GameOver",
            }
            .into()),
        }
    }

    /// Plays turns until the server announces the end of the game.
    pub fn play_game<B: Bot>(
        &mut self,
        bot: &mut B,
        mut game: GameState,
    ) -> anyhow::Result<GameOutcome> {
        self.expect_state(ClientState::InGame)?;
        loop {
            let event = if game.is_my_turn() {
                self.take_turn(bot, &game)?
            } else {
                debug!(current = game.current_player(), "Waiting for other player");
                self.next_event()?
            };
            let result = match event {
                Event::Resolved(result) => result,
                Event::Ended(outcome) => return Ok(self.finish(outcome, &game)),
                Event::Rejected(_) => {
                    return Err(ProtocolError::UnexpectedResponse {
                        expected: "action result",
                        received: "InvalidAction",
                    }
                    .into())
                }
            };
            // Own and others' draws only become known through the snapshot, so
            // state is updated strictly after receiving it.
            match self.fetch_state()? {
                Fetched::Snapshot(snapshot) => game.apply(&result, &snapshot)?,
                Fetched::Ended(outcome) => return Ok(self.finish(outcome, &game)),
            }
        }
    }

    fn take_turn<B: Bot>(&mut self, bot: &mut B, game: &GameState) -> anyhow::Result<Event> {
        let mut rejected: Vec<Action> = Vec::new();
        loop {
            let action = bot.play_turn(game, &rejected);
            if rejected.contains(&action) {
                return Err(ProtocolError::NoActionLeft {
                    rejected: rejected.len(),
                }
                .into());
            }
            info!(player = %self.name, %action, "Taking action");
            let request = self.action_request(&action);
            self.transport.send(&request)?;
            match self.next_event()? {
                Event::Rejected(message) => {
                    warn!(%action, reason = %message, "Action rejected, choosing another one");
                    rejected.push(action);
                }
                event => return Ok(event),
            }
        }
    }

    fn next_event(&mut self) -> anyhow::Result<Event> {
        let event = match self.transport.receive()? {
            Response::HintData {
                sender,
                destination,
                value,
                positions,
            } => Event::Resolved(ActionResult::Hinted(Hint {
                sender,
                receiver: destination,
                value,
                positions: positions.into_iter().collect(),
            })),
            Response::PlayOk {
                sender,
                card_index,
                card,
            } => Event::Resolved(ActionResult::Played {
                player: sender,
                card_index,
                card,
            }),
            Response::Mistake {
                sender,
                card_index,
                card,
            } => Event::Resolved(ActionResult::Misplayed {
                player: sender,
                card_index,
                card,
            }),
            Response::DiscardOk {
                sender,
                card_index,
                card,
            } => Event::Resolved(ActionResult::Discarded {
                player: sender,
                card_index,
                card,
            }),
            Response::InvalidAction { message } | Response::InvalidData { message } => {
                Event::Rejected(message)
            }
            Response::GameOver { score, message } => Event::Ended(GameOutcome { score, message }),
            other => return Err(unexpected("action result", &other).into()),
        };
        Ok(event)
    }

    fn fetch_state(&mut self) -> anyhow::Result<Fetched> {
        self.expect_state(ClientState::InGame)?;
        self.transport.send(&Request::GetState {
            name: self.name.clone(),
        })?;
        match self.transport.receive()? {
            Response::GameState(snapshot) => Ok(Fetched::Snapshot(snapshot)),
            Response::GameOver { score, message } => {
                Ok(Fetched::Ended(GameOutcome { score, message }))
            }
            other => Err(unexpected("GameState", &other).into()),
        }
    }

    fn action_request(&self, action: &Action) -> Request {
        let name = self.name.clone();
        match action {
            Action::Play { card_index } => Request::PlayCard {
                name,
                card_index: *card_index,
            },
            Action::Discard { card_index } => Request::DiscardCard {
                name,
                card_index: *card_index,
            },
            Action::Hint { target, value } => Request::GiveHint {
                name,
                destination: target.clone(),
                value: *value,
            },
        }
    }

    fn finish(&mut self, outcome: GameOutcome, game: &GameState) -> GameOutcome {
        self.state = ClientState::GameOver;
        info!(
            player = %self.name,
            score = outcome.score,
            table_score = game.public().score(),
            reason = %outcome.message,
            "Game over"
        );
        outcome
    }

    fn expect_state(&self, expected: ClientState) -> Result<(), ProtocolError> {
        if self.state == expected {
            Ok(())
        } else {
            Err(ProtocolError::WrongState {
                expected,
                actual: self.state,
            })
        }
    }
}

fn unexpected(expected: &'static str, received: &Response) -> ProtocolError {
    ProtocolError::UnexpectedResponse {
        expected,
        received: received.kind(),
    }
}
