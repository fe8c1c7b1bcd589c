mod client;
mod error;
mod game_state;
mod inference;
mod transport;
pub use client::*;
pub use error::*;
pub use game_state::*;
pub use inference::*;
pub use transport::*;

use std::net::ToSocketAddrs;

use hanabi::Action;

/// A trait to simplify writing bots.
pub trait Bot {
    /// Called once per game, as soon as the initial state is known.
    fn new_game(&mut self, _state: &GameState) {}

    /// Chooses the action for our turn.
    ///
    /// `rejected` lists the actions the server already refused during this
    /// turn. Returning one of them again ends the game with an error.
    fn play_turn(&mut self, state: &GameState, rejected: &[Action]) -> Action;

    /// Connects to the server at `addr` and plays one game.
    fn run(&mut self, name: &str, addr: impl ToSocketAddrs) -> anyhow::Result<GameOutcome>
    where
        Self: Sized,
    {
        let transport = JsonLinesTransport::connect(addr)?;
        Client::new(name, transport).run(self)
    }
}
