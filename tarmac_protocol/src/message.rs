// Protocol vocabulary for client-server communication.
//
// Outbound traffic is small and fixed, so `ClientMessage` is a closed serde
// enum internally tagged with the envelope's `message` field. Inbound
// traffic is open-ended — the server may send arbitrary tags — so inbound
// messages arrive as `Envelope`s and only the payloads this client
// understands get typed structs here (`ConnectAck`, `GameStartPayload`,
// `ActionPayload`, `GameStatePayload`, `TrackMessage`).
//
// Fields whose semantics belong to the game rules rather than the protocol
// (player rosters, car states, missiles, mines, grid cell codes) stay as
// opaque `serde_json::Value`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::types::{Direction, TileKind};

/// Messages this client sends to the server.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "message", rename_all = "lowercase")]
pub enum ClientMessage {
    /// Handshake: identify as an observer or a player.
    Connect(ConnectRequest),
    /// Fire-and-forget action request; no acknowledgement follows.
    Action {
        #[serde(rename = "type")]
        kind: String,
    },
}

impl ClientMessage {
    pub fn action(kind: impl Into<String>) -> Self {
        ClientMessage::Action { kind: kind.into() }
    }
}

/// The role half of a connect handshake, tagged by the `type` field.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ConnectRequest {
    /// Passive observer: receives broadcasts, sends nothing further.
    Observer,
    /// Active player, carrying identity and the tiled-track capability flag.
    Player {
        name: String,
        character: String,
        cartype: String,
        tracktiled: bool,
    },
}

/// The server's reply to a connect request. Arrives without a `message`
/// tag; any `status` other than `true` is a rejected handshake.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct ConnectAck {
    pub status: bool,
}

/// Payload of `gamestart`: roster, lap count, and the track description.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct GameStartPayload {
    pub players: Value,
    pub laps: u32,
    pub track: TrackMessage,
}

/// Payload of `action`: another player's action broadcast.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct ActionPayload {
    #[serde(rename = "type")]
    pub kind: String,
    pub player: Value,
}

/// Payload of `gamestate`: one tick snapshot.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct GameStatePayload {
    pub time: f64,
    pub cars: Value,
    pub missiles: Value,
    pub mines: Value,
}

/// The track description nested inside `gamestart`. Carries its own
/// `message` tag, which must be `"track"`.
///
/// Exactly one of `tiles` (tiled representation) or `data` (row-major grid
/// of opaque cell codes) is populated, selected by `tiled`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TrackMessage {
    pub message: String,
    pub width: u32,
    pub height: u32,
    pub startdir: Direction,
    pub tiled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tiles: Option<Vec<TileSpec>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Vec<Value>>,
}

/// One tile triple from a tiled track message: `[kind, x, y]`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TileSpec(pub TileKind, pub i32, pub i32);
