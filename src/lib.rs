//! Consulting Chaos - an office survival arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, phases, collisions)
//! - `input`: Logical key tracking and action edge detection
//! - `renderer`: 2D canvas rendering (wasm only)
//! - `audio`: Procedural Web Audio sound effects (wasm only)
//! - `highscores`: Best-level persistence

pub mod highscores;
pub mod input;
pub mod sim;

#[cfg(target_arch = "wasm32")]
pub mod audio;
#[cfg(target_arch = "wasm32")]
pub mod renderer;

pub use highscores::HighScore;

/// Game configuration constants
pub mod consts {
    /// Simulation rate (one tick per display frame, 60 Hz nominal)
    pub const FRAME_RATE: u32 = 60;

    /// Play-field dimensions (canvas pixels)
    pub const FIELD_WIDTH: f32 = 960.0;
    pub const FIELD_HEIGHT: f32 = 640.0;
    /// Y of the front desk separating the floor from the client queue
    pub const DESK_Y: f32 = 520.0;

    /// Player defaults
    pub const PLAYER_SIZE: f32 = 30.0;
    pub const PLAYER_SPEED: f32 = 6.0;
    /// Walkable bounds (the player never crosses the desk)
    pub const PLAYER_MIN_X: f32 = 20.0;
    pub const PLAYER_MAX_X: f32 = 940.0;
    pub const PLAYER_MIN_Y: f32 = 20.0;
    pub const PLAYER_MAX_Y: f32 = DESK_Y - 30.0;

    /// Trash bin position and interaction radius
    pub const TRASH_X: f32 = 880.0;
    pub const TRASH_Y: f32 = 540.0;
    pub const TRASH_RADIUS: f32 = 80.0;

    /// Client defaults
    pub const CLIENT_SIZE: f32 = 40.0;
    /// Concurrent client population cap
    pub const MAX_CLIENTS: usize = 3;
    /// Desk slot layout: x = CLIENT_SLOT_X + n * CLIENT_SLOT_SPACING
    pub const CLIENT_SLOT_X: f32 = 150.0;
    pub const CLIENT_SLOT_SPACING: f32 = 250.0;
    /// Serve checks target the client's head, this far above its anchor
    pub const CLIENT_HEAD_OFFSET: f32 = 60.0;
    pub const CLIENT_SERVE_RADIUS: f32 = 90.0;

    /// Resource caps
    pub const SANITY_MAX: f32 = 100.0;
    pub const PATIENCE_MAX: f32 = 100.0;

    /// Sanity deltas
    pub const CHAD_SANITY_COST: f32 = 10.0;
    pub const MISMATCH_SANITY_COST: f32 = 10.0;
    pub const DELIVERY_SANITY_HEAL: f32 = 15.0;
    pub const HIT_SANITY_DAMAGE: f32 = 15.0;

    /// Projectile tuning
    pub const PROJECTILE_HIT_RADIUS: f32 = 30.0;
    pub const PROJECTILE_BASE_SPEED: f32 = 7.0;
    pub const PROJECTILE_SPEED_PER_LEVEL: f32 = 0.5;
    /// Cosmetic spin, radians per frame
    pub const PROJECTILE_SPIN: f32 = 0.2;
    pub const STUN_FRAMES: u32 = 45;

    /// Hostile client timing
    pub const CHAD_FIRST_ATTACK_FRAMES: u32 = 60;
    pub const CHAD_REST_FRAMES: u32 = 180;

    /// Memorize phase countdown (20 seconds)
    pub const MEMORIZE_FRAMES: u32 = 20 * FRAME_RATE;

    /// Cosmetic lifetimes (frames)
    pub const PARTICLE_LIFE: u32 = 60;
    pub const SPLAT_LIFE: u32 = 600;
    pub const STEAM_LIFE: u32 = 40;
}
