//! Deterministic game simulation
//!
//! The simulation is pure state-in, state-out: `tick` advances a `GameState`
//! by exactly one frame given a `TickInput`. No platform types appear here,
//! which keeps the whole module testable on native targets.

pub mod collision;
pub mod floor;
pub mod state;
pub mod tick;

pub use floor::{Cubicle, TaskKind, generate_floor};
pub use state::{Client, ClientState, GameEvent, GamePhase, GameState, Player, Projectile};
pub use tick::{TickInput, tick};
