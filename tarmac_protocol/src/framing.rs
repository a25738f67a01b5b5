// Newline-delimited message framing over a byte stream.
//
// The race server speaks one JSON object per line, terminated by a single
// `\n` — no length prefix. The underlying transport delivers arbitrary byte
// chunks that may contain zero, one, or many complete lines, or a partial
// line, so `LineFramer` keeps a residual buffer across calls: `recv()`
// consumes exactly one line from the front of the buffer and retains the
// remainder for the next call. It never blocks for more data than one
// already-buffered line requires, and never drops bytes belonging to a
// subsequent message.
//
// The framer is generic over `std::io::Read`/`Write` so tests can drive it
// with in-memory streams; production use wraps a `TcpStream`.

use std::error::Error;
use std::fmt;
use std::io::{self, Read, Write};

use serde::Serialize;

use crate::envelope::Envelope;

/// Default size of one underlying read, in bytes.
pub const DEFAULT_CHUNK_SIZE: usize = 100;

const TERMINATOR: u8 = b'\n';

/// A framing failure. Every variant is fatal for the session — the protocol
/// has no recovery point inside a stream.
#[derive(Debug)]
pub enum FrameError {
    /// Underlying read or write failed.
    Io(io::Error),
    /// The remote closed the stream before a line terminator arrived.
    Closed,
    /// A complete line was not well-formed JSON.
    Json(serde_json::Error),
}

impl fmt::Display for FrameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FrameError::Io(e) => write!(f, "transport error: {e}"),
            FrameError::Closed => write!(f, "connection closed"),
            FrameError::Json(e) => write!(f, "malformed message: {e}"),
        }
    }
}

impl Error for FrameError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            FrameError::Io(e) => Some(e),
            FrameError::Closed => None,
            FrameError::Json(e) => Some(e),
        }
    }
}

impl From<io::Error> for FrameError {
    fn from(e: io::Error) -> Self {
        FrameError::Io(e)
    }
}

/// Line-delimited JSON framing over an owned stream.
///
/// Owns the stream handle and the residual receive buffer, so multiple
/// simultaneous sessions never share framing state.
pub struct LineFramer<S> {
    stream: S,
    residual: Vec<u8>,
    chunk_size: usize,
}

impl<S> LineFramer<S> {
    pub fn new(stream: S) -> Self {
        Self::with_chunk_size(stream, DEFAULT_CHUNK_SIZE)
    }

    pub fn with_chunk_size(stream: S, chunk_size: usize) -> Self {
        Self {
            stream,
            residual: Vec::new(),
            chunk_size,
        }
    }

    pub fn stream(&self) -> &S {
        &self.stream
    }
}

impl<S: Write> LineFramer<S> {
    /// Serialize `msg` to one line of JSON followed by exactly one `\n`.
    ///
    /// Payload values must not contain raw line terminators; serde_json
    /// escapes control characters inside strings, so any `Serialize` output
    /// satisfies this.
    pub fn send<T: Serialize + ?Sized>(&mut self, msg: &T) -> Result<(), FrameError> {
        let mut line = serde_json::to_vec(msg).map_err(FrameError::Json)?;
        line.push(TERMINATOR);
        self.stream.write_all(&line)?;
        self.stream.flush()?;
        Ok(())
    }
}

impl<S: Read> LineFramer<S> {
    /// Block until one complete line is buffered, then decode it.
    ///
    /// Reads chunks into the residual buffer until a terminator is present.
    /// A zero-length read is orderly remote shutdown and yields
    /// `FrameError::Closed` — distinct from a successfully received empty
    /// line, which is a decode error. Bytes after the terminator stay
    /// buffered for the next call.
    pub fn recv(&mut self) -> Result<Envelope, FrameError> {
        loop {
            if let Some(pos) = self.residual.iter().position(|&b| b == TERMINATOR) {
                let line: Vec<u8> = self.residual.drain(..=pos).collect();
                return serde_json::from_slice(&line[..pos]).map_err(FrameError::Json);
            }

            let mut chunk = vec![0u8; self.chunk_size];
            let n = self.stream.read(&mut chunk)?;
            if n == 0 {
                return Err(FrameError::Closed);
            }
            self.residual.extend_from_slice(&chunk[..n]);
        }
    }
}
