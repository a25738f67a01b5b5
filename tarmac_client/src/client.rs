// Connect handshake and the observer role.
//
// Both session roles open the stream, send one identification message, and
// block for the acknowledgement before anything else flows. The server
// answers with `{"status": <bool>, ...}` — no `message` tag — so the ack is
// parsed straight off the envelope rather than dispatched.
//
// `ObserverSession` is the passive role: after the handshake it only
// receives. The active role lives in `session.rs`.

use std::io::{Read, Write};
use std::net::TcpStream;

use tarmac_protocol::{ClientMessage, ConnectAck, ConnectRequest, Envelope, LineFramer};

use crate::config::ClientConfig;
use crate::error::ClientError;

/// Open a TCP stream per `config` and wrap it in a framer.
pub(crate) fn tcp_framer(config: &ClientConfig) -> Result<LineFramer<TcpStream>, ClientError> {
    let stream = TcpStream::connect(config.addr())?;
    Ok(LineFramer::with_chunk_size(stream, config.chunk_size))
}

/// Send a connect request and block for the acknowledgement. A non-true
/// `status` rejects the handshake.
pub(crate) fn handshake<S: Read + Write>(
    framer: &mut LineFramer<S>,
    request: ConnectRequest,
) -> Result<(), ClientError> {
    framer.send(&ClientMessage::Connect(request))?;
    let ack: ConnectAck = framer.recv()?.parse()?;
    if !ack.status {
        return Err(ClientError::HandshakeRejected);
    }
    Ok(())
}

/// A connected passive observer. Receives the server's broadcast stream and
/// sends nothing after the handshake.
pub struct ObserverSession<S> {
    framer: LineFramer<S>,
}

impl<S> std::fmt::Debug for ObserverSession<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObserverSession").finish_non_exhaustive()
    }
}

impl ObserverSession<TcpStream> {
    /// Connect over TCP and perform the observer handshake.
    pub fn connect(config: &ClientConfig) -> Result<Self, ClientError> {
        Self::establish(tcp_framer(config)?)
    }
}

impl<S: Read + Write> ObserverSession<S> {
    /// Perform the observer handshake over an already-open stream.
    pub fn establish(mut framer: LineFramer<S>) -> Result<Self, ClientError> {
        handshake(&mut framer, ConnectRequest::Observer)?;
        Ok(Self { framer })
    }

    /// Block for the next broadcast message.
    pub fn recv(&mut self) -> Result<Envelope, ClientError> {
        Ok(self.framer.recv()?)
    }
}
