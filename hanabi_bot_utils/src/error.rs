use crate::ClientState;

/// The error type for [`Inference`](crate::Inference) updates.
///
/// Any of these means the agent's beliefs no longer match the game, so
/// they are never recovered from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InferenceError {
    /// No card of the deck is consistent with what is known about this slot.
    Contradiction { slot: usize },
    SlotOutOfRange { index: usize, hand_size: usize },
}

impl std::error::Error for InferenceError {}

impl std::fmt::Display for InferenceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InferenceError::Contradiction { slot } => {
                write!(f, "No card is consistent with everything known about slot {}", slot)
            }
            InferenceError::SlotOutOfRange { index, hand_size } => write!(
                f,
                "Slot {} does not exist in a hand of {} cards",
                index, hand_size
            ),
        }
    }
}

/// The error type for the conversation with the server.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ProtocolError {
    /// The server sent a different message than the protocol requires.
    UnexpectedResponse {
        expected: &'static str,
        received: &'static str,
    },
    WrongState {
        expected: ClientState,
        actual: ClientState,
    },
    ConnectionClosed,
    /// Every action the bot came up with this turn was rejected.
    NoActionLeft { rejected: usize },
}

impl std::error::Error for ProtocolError {}

impl std::fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProtocolError::UnexpectedResponse { expected, received } => {
                write!(f, "Expected a {} message, but received {}", expected, received)
            }
            ProtocolError::WrongState { expected, actual } => write!(
                f,
                "This step needs the client to be {:?}, but it is {:?}",
                expected, actual
            ),
            ProtocolError::ConnectionClosed => write!(f, "The server closed the connection"),
            ProtocolError::NoActionLeft { rejected } => write!(
                f,
                "The server rejected all {} actions proposed this turn",
                rejected
            ),
        }
    }
}
