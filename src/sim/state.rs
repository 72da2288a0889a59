//! Game state and core simulation types
//!
//! Everything the simulation mutates lives here. Cosmetic-only entity lists
//! (particles, splats, steam) are skipped during serialization.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::floor::{Cubicle, TaskKind};
use crate::consts::*;

/// Current phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Pre-game, waiting for the start signal
    Idle,
    /// Floor layout shown, study countdown running
    Memorize,
    /// Active gameplay
    Playing,
    /// Score goal met, waiting for the advance signal
    LevelDone,
    /// Sanity depleted, run ended
    GameOver,
}

/// Discrete notifications for the audio/DOM layer.
///
/// Drained by the platform loop each frame; the simulation never depends on
/// whether anyone listens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// Playing phase entered (cue for the audio layer)
    LevelStarted,
    ClientSpawned,
    TaskPickedUp(TaskKind),
    ItemTrashed,
    TaskDelivered(TaskKind),
    DeliveryRejected,
    ClientTurnedHostile,
    PlayerHit,
    LevelCleared,
    GameOver { new_high_score: bool },
}

/// The player character
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub size: f32,
    /// Task currently carried (at most one)
    pub holding: Option<TaskKind>,
    /// Walk-cycle phase, advances only while moving
    pub anim_frame: f32,
    /// Frames of immobility remaining after a projectile hit
    pub stun: u32,
}

impl Player {
    pub fn new() -> Self {
        Self {
            pos: Vec2::new(480.0, 350.0),
            size: PLAYER_SIZE,
            holding: None,
            anim_frame: 0.0,
            stun: 0,
        }
    }

    /// Reset transient state at level start (position is kept)
    pub fn reset(&mut self) {
        self.holding = None;
        self.stun = 0;
    }

    #[inline]
    pub fn is_stunned(&self) -> bool {
        self.stun > 0
    }
}

impl Default for Player {
    fn default() -> Self {
        Self::new()
    }
}

/// Client mood - Waiting clients can be served, Chads throw things
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClientState {
    Waiting,
    Chad,
}

/// A client standing at the front desk
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Client {
    pub pos: Vec2,
    pub size: f32,
    /// Task this client wants delivered
    pub task: TaskKind,
    /// Decays while waiting; hitting zero flips the client to Chad
    pub patience: f32,
    pub state: ClientState,
    /// Frames until the next throw (Chad only)
    pub attack_timer: u32,
    /// Frames of resting between attack bursts (Chad only)
    pub cooldown: u32,
}

impl Client {
    pub fn new(slot: usize, task: TaskKind) -> Self {
        Self {
            pos: Vec2::new(
                CLIENT_SLOT_X + slot as f32 * CLIENT_SLOT_SPACING,
                DESK_Y + 40.0,
            ),
            size: CLIENT_SIZE,
            task,
            patience: PATIENCE_MAX,
            state: ClientState::Waiting,
            attack_timer: 0,
            cooldown: 0,
        }
    }

    /// Serve interactions target the head, above the body anchor
    #[inline]
    pub fn head_pos(&self) -> Vec2 {
        self.pos - Vec2::new(0.0, CLIENT_HEAD_OFFSET)
    }
}

/// A thrown coffee cup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Cosmetic rotation
    pub rot: f32,
}

/// A floating emoji marker (cosmetic)
#[derive(Debug, Clone)]
pub struct Particle {
    pub pos: Vec2,
    pub icon: &'static str,
    pub color: &'static str,
    pub life: u32,
}

/// A coffee stain on the floor (cosmetic)
#[derive(Debug, Clone)]
pub struct Splat {
    pub pos: Vec2,
    pub life: u32,
}

/// A rising steam puff (cosmetic)
#[derive(Debug, Clone)]
pub struct SteamPuff {
    pub pos: Vec2,
    pub life: u32,
}

/// RNG state wrapper for serialization
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
}

impl RngState {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Derive a generator for a salted stream (one per floor generation)
    pub fn rng_for(&self, salt: u64) -> Pcg32 {
        Pcg32::seed_from_u64(self.seed.wrapping_add(salt.wrapping_mul(0x9E37_79B9_7F4A_7C15)))
    }
}

/// Complete game state, threaded through update and draw
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng_state: RngState,
    pub phase: GamePhase,
    /// Current level (1-based)
    pub level: u32,
    /// Deliveries made this level
    pub score: u32,
    /// Deliveries needed to clear the level
    pub goal: u32,
    /// Health-like resource, clamped to [0, 100]
    pub sanity: f32,
    /// Frame counter, advances only while Playing
    pub frame: u64,
    /// Memorize countdown, frames remaining
    pub memorize_frames: u32,
    /// Best level reached across runs (loaded at startup)
    pub high_score: u32,
    pub player: Player,
    /// Cubicles on the current floor, regenerated each Memorize phase
    pub floor: Vec<Cubicle>,
    pub clients: Vec<Client>,
    pub projectiles: Vec<Projectile>,
    #[serde(skip)]
    pub particles: Vec<Particle>,
    #[serde(skip)]
    pub splats: Vec<Splat>,
    #[serde(skip)]
    pub steam: Vec<SteamPuff>,
    /// Pending notifications for the presentation layer
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a fresh pre-game state with the given seed
    pub fn new(seed: u64, high_score: u32) -> Self {
        Self {
            seed,
            rng_state: RngState::new(seed),
            phase: GamePhase::Idle,
            level: 1,
            score: 0,
            goal: 2,
            sanity: SANITY_MAX,
            frame: 0,
            memorize_frames: 0,
            high_score,
            player: Player::new(),
            floor: Vec::new(),
            clients: Vec::new(),
            projectiles: Vec::new(),
            particles: Vec::new(),
            splats: Vec::new(),
            steam: Vec::new(),
            events: Vec::new(),
        }
    }

    /// Clear per-level transient state when gameplay (re)starts
    pub fn reset_level_transients(&mut self) {
        self.score = 0;
        self.sanity = SANITY_MAX;
        self.goal = self.level + 1;
        self.player.reset();
        self.clients.clear();
        self.projectiles.clear();
        self.particles.clear();
        self.splats.clear();
        self.steam.clear();
    }

    pub fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take all pending events (called once per frame by the platform loop)
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Spawn a floating emoji marker
    pub fn emit_particle(&mut self, pos: Vec2, icon: &'static str, color: &'static str) {
        self.particles.push(Particle {
            pos,
            icon,
            color,
            life: PARTICLE_LIFE,
        });
    }
}
