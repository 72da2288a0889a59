//! Task catalog and floor-plan generation
//!
//! The floor is a grid of cubicles, each assigned a distinct task from the
//! catalog. It is regenerated at the start of every Memorize phase, so clients
//! can only ever request a task that is actually placed somewhere on the map.

use glam::Vec2;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use super::state::GameState;

/// The fixed task catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskKind {
    Deck,
    Model,
    Legal,
    Coffee,
    It,
    Hr,
    Audit,
    Design,
}

impl TaskKind {
    pub const ALL: [TaskKind; 8] = [
        TaskKind::Deck,
        TaskKind::Model,
        TaskKind::Legal,
        TaskKind::Coffee,
        TaskKind::It,
        TaskKind::Hr,
        TaskKind::Audit,
        TaskKind::Design,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            TaskKind::Deck => "Deck",
            TaskKind::Model => "Model",
            TaskKind::Legal => "Legal",
            TaskKind::Coffee => "Coffee",
            TaskKind::It => "IT",
            TaskKind::Hr => "HR",
            TaskKind::Audit => "Audit",
            TaskKind::Design => "Design",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            TaskKind::Deck => "📊",
            TaskKind::Model => "📉",
            TaskKind::Legal => "📜",
            TaskKind::Coffee => "☕",
            TaskKind::It => "💻",
            TaskKind::Hr => "📝",
            TaskKind::Audit => "🧾",
            TaskKind::Design => "🎨",
        }
    }

    /// Cubicle fill color (CSS hex)
    pub fn color(&self) -> &'static str {
        match self {
            TaskKind::Deck => "#ff6b6b",
            TaskKind::Model => "#1dd1a1",
            TaskKind::Legal => "#feca57",
            TaskKind::Coffee => "#54a0ff",
            TaskKind::It => "#5f27cd",
            TaskKind::Hr => "#ff9f43",
            TaskKind::Audit => "#00d2d3",
            TaskKind::Design => "#ff9ff3",
        }
    }
}

/// A cubicle cell on the floor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cubicle {
    /// Top-left corner
    pub pos: Vec2,
    /// Width and height
    pub size: Vec2,
    pub task: TaskKind,
}

impl Cubicle {
    /// Containment test used by the interact action (strict, matching the
    /// walkable interior rather than the walls)
    pub fn contains(&self, point: Vec2) -> bool {
        point.x > self.pos.x
            && point.x < self.pos.x + self.size.x
            && point.y > self.pos.y
            && point.y < self.pos.y + self.size.y
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size / 2.0
    }
}

/// Grid dimensions (rows, cols) for a level.
///
/// Level 1 places six of the eight tasks; from level 2 the full catalog is
/// on the floor.
pub fn grid_for_level(level: u32) -> (usize, usize) {
    if level <= 1 { (2, 3) } else { (2, 4) }
}

/// Regenerate the floor plan for the state's current level.
///
/// Task assignment is a seeded shuffle, so the same seed and level always
/// produce the same layout.
pub fn generate_floor(state: &mut GameState) {
    let (rows, cols) = grid_for_level(state.level);
    let mut tasks = TaskKind::ALL.to_vec();
    let mut rng = state.rng_state.rng_for(state.level as u64);
    tasks.shuffle(&mut rng);

    // Narrower cells when four columns must fit the 960px field
    let (x0, cell_w, stride) = if cols == 3 {
        (80.0, 220.0, 290.0)
    } else {
        (45.0, 200.0, 225.0)
    };

    state.floor.clear();
    for row in 0..rows {
        for col in 0..cols {
            state.floor.push(Cubicle {
                pos: Vec2::new(x0 + col as f32 * stride, 80.0 + row as f32 * 240.0),
                size: Vec2::new(cell_w, 160.0),
                task: tasks[row * cols + col],
            });
        }
    }

    log::info!(
        "Level {} floor: {}x{} grid, {} cubicles",
        state.level,
        rows,
        cols,
        state.floor.len()
    );
}
