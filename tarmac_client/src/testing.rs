// In-memory stream double for session tests.
//
// Plays the server side of a connection: `Read` hands out a pre-scripted
// inbound byte sequence (exhaustion reads as orderly shutdown), `Write`
// captures everything the client sends for later assertions.

use std::io::{self, Cursor, Read, Write};

use serde_json::Value;

pub(crate) struct MockStream {
    input: Cursor<Vec<u8>>,
    output: Vec<u8>,
}

impl MockStream {
    pub fn with_input(input: &str) -> Self {
        Self {
            input: Cursor::new(input.as_bytes().to_vec()),
            output: Vec::new(),
        }
    }

    /// Every line the client has sent, decoded as JSON.
    pub fn sent_lines(&self) -> Vec<Value> {
        self.output
            .split(|&b| b == b'\n')
            .filter(|line| !line.is_empty())
            .map(|line| serde_json::from_slice(line).expect("client sent malformed JSON"))
            .collect()
    }
}

impl Read for MockStream {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.input.read(buf)
    }
}

impl Write for MockStream {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.output.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
