// tarmac_protocol — wire protocol for the Tarmac race-game client.
//
// The race server speaks newline-delimited JSON over a plain TCP stream:
// one object per line, each carrying a `message` type tag plus tag-specific
// payload fields. This crate defines that wire layer and nothing above it —
// session roles, dispatch, and track reconstruction live in `tarmac_client`.
//
// Module overview:
// - `types.rs`:    Shared wire types — `Direction` headings, `TileKind`,
//                  `GridVec` integer vectors.
// - `envelope.rs`: `Envelope`, a dynamic key-value view of one decoded
//                  message. The inbound tag set is open, so inbound traffic
//                  is envelopes rather than a closed enum.
// - `message.rs`:  Outbound `ClientMessage`/`ConnectRequest` enums and typed
//                  payload structs for the tags the client understands.
// - `framing.rs`:  `LineFramer` — terminator-based framing with a residual
//                  buffer over any `Read`/`Write` stream.
//
// Design decisions:
// - **JSON via serde_json.** The server's format; the codec is treated as a
//   black box producing and consuming key-value structures.
// - **No async runtime.** Blocking `std::io` throughout — the client is
//   single-threaded by design.

pub mod envelope;
pub mod framing;
pub mod message;
pub mod types;

pub use envelope::{Envelope, TAG_FIELD};
pub use framing::{DEFAULT_CHUNK_SIZE, FrameError, LineFramer};
pub use message::{
    ActionPayload, ClientMessage, ConnectAck, ConnectRequest, GameStartPayload,
    GameStatePayload, TileSpec, TrackMessage,
};
pub use types::{Direction, GridVec, TileKind};
