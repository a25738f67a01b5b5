// The player session and its dispatch loop.
//
// After the player handshake, the server drives the session: each iteration
// of the loop receives one envelope, removes the `message` tag, and routes
// by name through a handler registry. The registry is an explicit map
// populated at construction with the built-in handlers (`gamestart`,
// `action`, `gamestate`) and open to arbitrary additional tags via
// `register` — registering an existing tag replaces it. A tag with no entry
// is logged and skipped; every other failure ends the session.
//
// Handlers receive `&mut SessionCtx` — the framer plus the recorded game
// state — so they can both mutate state and send action requests. The
// registry lives outside the context struct, which is what lets a handler
// borrow the context mutably while the loop holds the handler.

use std::collections::HashMap;
use std::io::{Read, Write};
use std::net::TcpStream;

use serde_json::Value;

use tarmac_protocol::{
    ActionPayload, ClientMessage, ConnectRequest, Envelope, GameStartPayload, GameStatePayload,
    LineFramer,
};

use crate::client::{handshake, tcp_framer};
use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::track::Track;

/// Identity sent in the player handshake. `tracktiled` asks the server for
/// the tiled track representation; `new` defaults it to true.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlayerIdentity {
    pub name: String,
    pub character: String,
    pub cartype: String,
    pub tracktiled: bool,
}

impl PlayerIdentity {
    pub fn new(
        name: impl Into<String>,
        character: impl Into<String>,
        cartype: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            character: character.into(),
            cartype: cartype.into(),
            tracktiled: true,
        }
    }

    fn into_request(self) -> ConnectRequest {
        ConnectRequest::Player {
            name: self.name,
            character: self.character,
            cartype: self.cartype,
            tracktiled: self.tracktiled,
        }
    }
}

/// Everything the session has recorded from the server so far.
///
/// `players`, `cars`, `missiles`, and `mines` stay opaque JSON — their
/// semantics belong to the game rules, not the protocol.
#[derive(Debug, Default)]
pub struct GameState {
    pub players: Value,
    pub laps: u32,
    pub track: Option<Track>,
    pub time: f64,
    pub cars: Value,
    pub missiles: Value,
    pub mines: Value,
}

/// A named message handler.
pub type Handler<S> = Box<dyn FnMut(&mut SessionCtx<S>, Envelope) -> Result<(), ClientError>>;

/// Hook invoked after each recorded `gamestate` tick.
pub type TickHook<S> = Box<dyn FnMut(&mut SessionCtx<S>) -> Result<(), ClientError>>;

/// Hook invoked for each `action` broadcast.
pub type ActionHook<S> =
    Box<dyn FnMut(&mut SessionCtx<S>, &ActionPayload) -> Result<(), ClientError>>;

/// The mutable session context handlers operate on: the framer for outbound
/// messages and the recorded game state.
pub struct SessionCtx<S> {
    framer: LineFramer<S>,
    pub game: GameState,
    tick_hook: Option<TickHook<S>>,
    action_hook: Option<ActionHook<S>>,
}

impl<S: Read + Write> SessionCtx<S> {
    /// Send an action request. Fire-and-forget: no acknowledgement is
    /// awaited, and no reply may be assumed.
    pub fn send_action(&mut self, kind: &str) -> Result<(), ClientError> {
        Ok(self.framer.send(&ClientMessage::action(kind))?)
    }

    pub fn stream(&self) -> &S {
        self.framer.stream()
    }

    // The hook is moved out for the call so it can take `&mut self` without
    // aliasing its own storage slot.
    fn run_tick_hook(&mut self) -> Result<(), ClientError> {
        let Some(mut hook) = self.tick_hook.take() else {
            return Ok(());
        };
        let result = hook(self);
        self.tick_hook = Some(hook);
        result
    }

    fn run_action_hook(&mut self, payload: &ActionPayload) -> Result<(), ClientError> {
        let Some(mut hook) = self.action_hook.take() else {
            return Ok(());
        };
        let result = hook(self, payload);
        self.action_hook = Some(hook);
        result
    }
}

/// A connected active player: handler registry plus session context.
pub struct PlayerSession<S> {
    ctx: SessionCtx<S>,
    handlers: HashMap<String, Handler<S>>,
}

impl<S> std::fmt::Debug for PlayerSession<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlayerSession").finish_non_exhaustive()
    }
}

impl PlayerSession<TcpStream> {
    /// Connect over TCP and perform the player handshake.
    pub fn connect(config: &ClientConfig, identity: PlayerIdentity) -> Result<Self, ClientError> {
        Self::establish(tcp_framer(config)?, identity)
    }
}

impl<S: Read + Write + 'static> PlayerSession<S> {
    /// Perform the player handshake over an already-open stream and set up
    /// the built-in handlers.
    pub fn establish(
        mut framer: LineFramer<S>,
        identity: PlayerIdentity,
    ) -> Result<Self, ClientError> {
        handshake(&mut framer, identity.into_request())?;

        let mut session = Self {
            ctx: SessionCtx {
                framer,
                game: GameState::default(),
                tick_hook: None,
                action_hook: None,
            },
            handlers: HashMap::new(),
        };

        session.register("gamestart", |ctx, env| {
            let payload: GameStartPayload = env.parse()?;
            ctx.game.players = payload.players;
            ctx.game.laps = payload.laps;
            ctx.game.track = Some(Track::from_message(payload.track)?);
            Ok(())
        });

        session.register("action", |ctx, env| {
            let payload: ActionPayload = env.parse()?;
            ctx.run_action_hook(&payload)
        });

        session.register("gamestate", |ctx, env| {
            let payload: GameStatePayload = env.parse()?;
            ctx.game.time = payload.time;
            ctx.game.cars = payload.cars;
            ctx.game.missiles = payload.missiles;
            ctx.game.mines = payload.mines;
            ctx.run_tick_hook()
        });

        Ok(session)
    }

    /// Register a handler for a message tag. Replaces any existing handler,
    /// built-ins included.
    pub fn register(
        &mut self,
        tag: impl Into<String>,
        handler: impl FnMut(&mut SessionCtx<S>, Envelope) -> Result<(), ClientError> + 'static,
    ) {
        self.handlers.insert(tag.into(), Box::new(handler));
    }

    /// Set the hook run after every recorded `gamestate` tick.
    pub fn on_tick(
        &mut self,
        hook: impl FnMut(&mut SessionCtx<S>) -> Result<(), ClientError> + 'static,
    ) {
        self.ctx.tick_hook = Some(Box::new(hook));
    }

    /// Set the hook run for every `action` broadcast.
    pub fn on_action(
        &mut self,
        hook: impl FnMut(&mut SessionCtx<S>, &ActionPayload) -> Result<(), ClientError> + 'static,
    ) {
        self.ctx.action_hook = Some(Box::new(hook));
    }

    pub fn game(&self) -> &GameState {
        &self.ctx.game
    }

    /// Send an action request outside of a handler.
    pub fn send_action(&mut self, kind: &str) -> Result<(), ClientError> {
        self.ctx.send_action(kind)
    }

    /// Receive and dispatch exactly one message.
    ///
    /// An unrecognized tag is a warning, not an error; the next call keeps
    /// going. A missing tag, a framing failure, or a handler failure is
    /// fatal.
    pub fn step(&mut self) -> Result<(), ClientError> {
        let mut env = self.ctx.framer.recv()?;
        let Some(tag) = env.take_tag() else {
            return Err(ClientError::Protocol("message without a type tag".into()));
        };
        match self.handlers.get_mut(&tag) {
            Some(handler) => handler(&mut self.ctx, env),
            None => {
                eprintln!("WARN: unhandled message {tag}");
                Ok(())
            }
        }
    }

    /// Run the dispatch loop until the connection ends or a fatal error
    /// occurs. Never returns `Ok` during normal operation.
    pub fn run(&mut self) -> Result<(), ClientError> {
        loop {
            self.step()?;
        }
    }
}
