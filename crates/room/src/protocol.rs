use super::*;

/// Errors that can occur while decoding client frames.
#[derive(Debug, Clone)]
pub enum ProtocolError {
    Malformed(String),
}

impl std::fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Malformed(s) => write!(f, "malformed frame: {}", s),
        }
    }
}

impl std::error::Error for ProtocolError {}

/// Wire layer between JSON text frames and typed client messages.
/// Malformed frames are dropped by the transport; nothing is ever
/// acknowledged or rejected back to the sender.
pub struct Protocol;

impl Protocol {
    /// Parses a JSON text frame into a ClientMessage.
    pub fn decode(s: &str) -> Result<ClientMessage, ProtocolError> {
        serde_json::from_str(s).map_err(|e| ProtocolError::Malformed(e.to_string()))
    }
}
