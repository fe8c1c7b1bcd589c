pub use action::*;
pub use cards::*;
pub use cards_set::*;
pub use errors::*;
pub use protocol_types::*;
pub use state::*;

mod action;
#[cfg(any(test, feature = "quickcheck"))]
mod arbitrary;
mod cards;
mod cards_set;
mod errors;
mod protocol_types;
mod state;
