// Error taxonomy for a client session.
//
// Only one condition in the protocol is recoverable — an inbound tag with no
// registered handler, which the dispatch loop logs and skips. Everything
// here is fatal: it propagates out of the session and ends it. There is no
// retry or reconnection logic anywhere in the client.

use std::error::Error;
use std::fmt;
use std::io;

use tarmac_protocol::FrameError;

/// A fatal session failure.
#[derive(Debug)]
pub enum ClientError {
    /// Transport, connection-closed, or line decode failure (see
    /// `FrameError` for the split).
    Frame(FrameError),
    /// The connect acknowledgement's `status` was not true.
    HandshakeRejected,
    /// A recognized message's payload fields did not match the expected
    /// shape.
    Payload(serde_json::Error),
    /// A message violated protocol structure (missing tag, wrong nested
    /// tag, inconsistent track data).
    Protocol(String),
    /// A registered handler failed.
    Handler(String),
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClientError::Frame(e) => write!(f, "{e}"),
            ClientError::HandshakeRejected => write!(f, "handshake rejected by server"),
            ClientError::Payload(e) => write!(f, "malformed payload: {e}"),
            ClientError::Protocol(reason) => write!(f, "protocol violation: {reason}"),
            ClientError::Handler(reason) => write!(f, "handler failed: {reason}"),
        }
    }
}

impl Error for ClientError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ClientError::Frame(e) => Some(e),
            ClientError::Payload(e) => Some(e),
            _ => None,
        }
    }
}

impl From<FrameError> for ClientError {
    fn from(e: FrameError) -> Self {
        ClientError::Frame(e)
    }
}

impl From<io::Error> for ClientError {
    fn from(e: io::Error) -> Self {
        ClientError::Frame(FrameError::Io(e))
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(e: serde_json::Error) -> Self {
        ClientError::Payload(e)
    }
}

impl ClientError {
    /// True when the session ended because the remote closed the stream.
    pub fn is_closed(&self) -> bool {
        matches!(self, ClientError::Frame(FrameError::Closed))
    }
}
