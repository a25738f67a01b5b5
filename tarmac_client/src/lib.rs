// tarmac_client — session layer for the Tarmac race-game client.
//
// Connects to the race server over plain TCP, performs the role handshake,
// and drives a single-threaded blocking dispatch loop: one newline-delimited
// JSON message in, one named handler invoked. The other half of the crate
// rebuilds the physical track from the server's abstract tile descriptors.
//
// Module overview:
// - `config.rs`:  `ClientConfig` — host (env-overridable), fixed port and
//                 read chunk size.
// - `error.rs`:   `ClientError` — the fatal failure taxonomy; only unhandled
//                 message tags are recovered, inside the loop itself.
// - `client.rs`:  Connect handshake and the passive `ObserverSession`.
// - `session.rs`: `PlayerSession` — open handler registry, built-in
//                 gamestart/action/gamestate handlers, tick and action
//                 hooks, `send_action`.
// - `track.rs`:   `Track`/`Tile` reconstruction — heading propagation over
//                 the tile chain, or row-major grid reshaping.
//
// Design decisions:
// - **No threads, no async.** All suspension happens inside the framer's
//   blocking receive; a non-responsive server blocks the session.
// - **Dispatch is dynamic by name.** The server's tag set is open; handlers
//   are registered per tag string, and unknown tags warn instead of failing.
//
// Dependencies: `tarmac_protocol` (framing, envelopes, message types).

pub mod client;
pub mod config;
pub mod error;
pub mod session;
pub mod track;

#[cfg(test)]
pub(crate) mod testing;

pub use client::ObserverSession;
pub use config::ClientConfig;
pub use error::ClientError;
pub use session::{GameState, PlayerIdentity, PlayerSession, SessionCtx};
pub use track::{CellGrid, SEGMENT_LENGTH, TRACK_WIDTH, TURN_EXTENT, Tile, Track, TrackLayout};
