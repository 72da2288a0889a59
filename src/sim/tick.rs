//! Fixed timestep simulation tick
//!
//! One `tick` call per display frame. Only the Playing phase mutates
//! gameplay state; Memorize counts its study timer down and every other
//! phase just waits for its one-shot signal.

use glam::Vec2;

use super::collision::{out_of_field, projectile_hits_player, within_radius};
use super::floor::{TaskKind, generate_floor};
use super::state::{
    ClientState, GameEvent, GamePhase, GameState, Projectile, Splat, SteamPuff,
};
use crate::consts::*;

/// Input commands for a single tick.
///
/// Direction flags reflect currently-held keys. The remaining flags are
/// one-shot edges produced by the input sampler or the DOM overlay buttons.
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    /// Action edge (press, not hold)
    pub interact: bool,
    /// Begin the run (Idle only)
    pub start: bool,
    /// Cut the memorize countdown short
    pub skip_memorize: bool,
    /// Move on to the next level (LevelDone only)
    pub advance_level: bool,
}

/// Advance the game by one frame
pub fn tick(state: &mut GameState, input: &TickInput) {
    match state.phase {
        GamePhase::Idle => {
            if input.start {
                begin_memorize(state);
            }
        }
        GamePhase::Memorize => {
            if input.skip_memorize {
                begin_playing(state);
                return;
            }
            state.memorize_frames = state.memorize_frames.saturating_sub(1);
            if state.memorize_frames == 0 {
                begin_playing(state);
            }
        }
        GamePhase::Playing => step_playing(state, input),
        GamePhase::LevelDone => {
            if input.advance_level {
                state.level += 1;
                begin_memorize(state);
            }
        }
        GamePhase::GameOver => {}
    }
}

/// Generate a fresh floor for the current level and arm the study countdown
fn begin_memorize(state: &mut GameState) {
    generate_floor(state);
    state.memorize_frames = MEMORIZE_FRAMES;
    state.phase = GamePhase::Memorize;
}

/// Reset per-level transients and open the floor
fn begin_playing(state: &mut GameState) {
    state.reset_level_transients();
    state.phase = GamePhase::Playing;
    state.push_event(GameEvent::LevelStarted);
    spawn_client(state);
    log::info!("Level {} started, goal {}", state.level, state.goal);
}

/// Client arrival interval in frames (arrivals speed up with level)
fn spawn_interval(level: u32) -> u64 {
    (1800u64.saturating_sub(200 * level as u64)).max(600)
}

/// Frames between Chad throws (attacks speed up with level)
fn attack_interval(level: u32) -> u32 {
    120u32.saturating_sub(10 * level).max(30)
}

/// Deterministic pseudo-random roll tied to the frame counter.
/// Keeps in-tick randomness free of RNG state that would need carrying.
fn hash_roll(seed: u64, salt: u32) -> u32 {
    (seed as u32)
        .wrapping_mul(2654435761)
        .wrapping_add(salt.wrapping_mul(7919))
}

fn step_playing(state: &mut GameState, input: &TickInput) {
    state.frame += 1;

    // 1. Player: stun freezes both movement and interaction
    if state.player.is_stunned() {
        state.player.stun -= 1;
    } else {
        let mut delta = Vec2::ZERO;
        if input.up {
            delta.y -= PLAYER_SPEED;
        }
        if input.down {
            delta.y += PLAYER_SPEED;
        }
        if input.left {
            delta.x -= PLAYER_SPEED;
        }
        if input.right {
            delta.x += PLAYER_SPEED;
        }

        let player = &mut state.player;
        player.pos.x = (player.pos.x + delta.x).clamp(PLAYER_MIN_X, PLAYER_MAX_X);
        player.pos.y = (player.pos.y + delta.y).clamp(PLAYER_MIN_Y, PLAYER_MAX_Y);
        if delta != Vec2::ZERO {
            player.anim_frame += 0.25;
        }

        if input.interact {
            interact(state);
            // A delivery can end the level or the run mid-frame
            if state.phase != GamePhase::Playing {
                return;
            }
        }
    }

    // 2. Client spawn (rate-limited, population capped)
    if state.frame % spawn_interval(state.level) == 0 && state.clients.len() < MAX_CLIENTS {
        spawn_client(state);
    }

    // 3. Client behavior (mutations against the rest of the state deferred)
    let player_pos = state.player.pos;
    let level = state.level;
    let frame = state.frame;
    let seed = state.seed;
    let decay = 0.05 + 0.015 * level as f32;
    let mut went_hostile: Vec<Vec2> = Vec::new();
    let mut thrown_from: Vec<Vec2> = Vec::new();

    for (i, client) in state.clients.iter_mut().enumerate() {
        match client.state {
            ClientState::Waiting => {
                client.patience = (client.patience - decay).max(0.0);
                if client.patience <= 0.0 {
                    // One-way flip; patience becomes the Chad's "anger" bar
                    client.state = ClientState::Chad;
                    client.patience = PATIENCE_MAX;
                    client.attack_timer = CHAD_FIRST_ATTACK_FRAMES;
                    client.cooldown = 0;
                    went_hostile.push(client.pos);
                }
            }
            ClientState::Chad => {
                if client.cooldown > 0 {
                    client.cooldown -= 1;
                } else {
                    client.attack_timer = client.attack_timer.saturating_sub(1);
                    if client.attack_timer == 0 {
                        thrown_from.push(client.pos);
                        client.attack_timer = attack_interval(level);
                        // ~30% of bursts end in a rest
                        if hash_roll(seed ^ frame, i as u32) % 100 < 30 {
                            client.cooldown = CHAD_REST_FRAMES;
                        }
                    }
                }
            }
        }
    }

    for pos in went_hostile {
        state.sanity = (state.sanity - CHAD_SANITY_COST).max(0.0);
        state.emit_particle(pos, "🤬", "red");
        state.push_event(GameEvent::ClientTurnedHostile);
    }
    for origin in thrown_from {
        throw_projectile(state, origin, player_pos);
    }
    if state.sanity <= 0.0 {
        game_over(state);
        return;
    }

    // 4. Projectiles: integrate, cull, resolve player hits
    let mut i = 0;
    while i < state.projectiles.len() {
        {
            let p = &mut state.projectiles[i];
            p.pos += p.vel;
            p.rot += PROJECTILE_SPIN;
        }
        let pos = state.projectiles[i].pos;

        if out_of_field(pos) {
            state.projectiles.remove(i);
            continue;
        }
        if projectile_hits_player(pos, state.player.pos) {
            state.projectiles.remove(i);
            state.sanity = (state.sanity - HIT_SANITY_DAMAGE).max(0.0);
            state.player.stun = STUN_FRAMES;
            let hit_pos = state.player.pos;
            state.splats.push(Splat {
                pos: hit_pos,
                life: SPLAT_LIFE,
            });
            state.emit_particle(hit_pos, "💥", "orange");
            state.push_event(GameEvent::PlayerHit);
            continue;
        }
        i += 1;
    }
    if state.sanity <= 0.0 {
        game_over(state);
        return;
    }

    // 5. Cosmetic lifetimes
    for particle in state.particles.iter_mut() {
        particle.pos.y -= 1.0;
        particle.life = particle.life.saturating_sub(1);
    }
    state.particles.retain(|p| p.life > 0);

    for splat in state.splats.iter_mut() {
        splat.life = splat.life.saturating_sub(1);
    }
    state.splats.retain(|s| s.life > 0);

    for puff in state.steam.iter_mut() {
        puff.pos.y -= 0.5;
        puff.life = puff.life.saturating_sub(1);
    }
    state.steam.retain(|s| s.life > 0);
}

/// Spawn a client requesting a task drawn from the cubicles on the floor
fn spawn_client(state: &mut GameState) {
    if state.floor.is_empty() || state.clients.len() >= MAX_CLIENTS {
        return;
    }
    let roll = hash_roll(state.seed ^ state.frame, state.clients.len() as u32);
    let task = state.floor[roll as usize % state.floor.len()].task;
    let client = super::state::Client::new(state.clients.len(), task);
    state.clients.push(client);
    state.push_event(GameEvent::ClientSpawned);
}

/// Launch a coffee cup from `origin` aimed at the player's current position
fn throw_projectile(state: &mut GameState, origin: Vec2, target: Vec2) {
    let speed = PROJECTILE_BASE_SPEED + state.level as f32 * PROJECTILE_SPEED_PER_LEVEL;
    let dir = (target - origin).normalize_or(Vec2::NEG_Y);
    state.projectiles.push(Projectile {
        pos: origin,
        vel: dir * speed,
        rot: 0.0,
    });
}

/// Contextual action: cubicle pickup, then trash drop, then client serve
fn interact(state: &mut GameState) {
    let pos = state.player.pos;

    // a. Inside a cubicle: pick up its task (replaces anything held)
    if let Some(cubicle) = state.floor.iter().find(|c| c.contains(pos)) {
        let task = cubicle.task;
        state.player.holding = Some(task);
        state.emit_particle(pos - Vec2::new(0.0, 50.0), task.icon(), "black");
        if task == TaskKind::Coffee {
            for i in 0u32..3 {
                state.steam.push(SteamPuff {
                    pos: pos + Vec2::new(i as f32 * 8.0 - 8.0, -60.0),
                    life: STEAM_LIFE + i * 8,
                });
            }
        }
        state.push_event(GameEvent::TaskPickedUp(task));
        return;
    }

    // b. Near the trash bin: drop whatever is held
    let trash = Vec2::new(TRASH_X, TRASH_Y);
    if within_radius(pos, trash, TRASH_RADIUS) {
        if state.player.holding.take().is_some() {
            state.emit_particle(trash - Vec2::new(0.0, 50.0), "🗑️", "gray");
            state.push_event(GameEvent::ItemTrashed);
        }
        return;
    }

    // c. Near a waiting client's head: attempt delivery
    for i in 0..state.clients.len() {
        if state.clients[i].state != ClientState::Waiting {
            continue;
        }
        let head = state.clients[i].head_pos();
        if !within_radius(pos, head, CLIENT_SERVE_RADIUS) {
            continue;
        }

        let wanted = state.clients[i].task;
        match state.player.holding {
            Some(held) if held == wanted => {
                let served = state.clients.remove(i);
                state.score += 1;
                state.sanity = (state.sanity + DELIVERY_SANITY_HEAL).min(SANITY_MAX);
                state.player.holding = None;
                state.emit_particle(served.pos - Vec2::new(0.0, 100.0), "✅", "green");
                state.push_event(GameEvent::TaskDelivered(wanted));
                if state.score >= state.goal {
                    state.phase = GamePhase::LevelDone;
                    state.push_event(GameEvent::LevelCleared);
                }
            }
            Some(_) => {
                state.sanity = (state.sanity - MISMATCH_SANITY_COST).max(0.0);
                state.emit_particle(head - Vec2::new(0.0, 40.0), "❌", "red");
                state.push_event(GameEvent::DeliveryRejected);
                if state.sanity <= 0.0 {
                    game_over(state);
                }
            }
            None => {}
        }
        return; // at most one client per action
    }
}

/// End the run, recording a new best level if earned
fn game_over(state: &mut GameState) {
    state.phase = GamePhase::GameOver;
    let new_high_score = state.level > state.high_score;
    if new_high_score {
        state.high_score = state.level;
    }
    state.push_event(GameEvent::GameOver { new_high_score });
    log::info!("Game over at level {} (best {})", state.level, state.high_score);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::Client;

    fn start_input() -> TickInput {
        TickInput {
            start: true,
            ..Default::default()
        }
    }

    fn interact_input() -> TickInput {
        TickInput {
            interact: true,
            ..Default::default()
        }
    }

    /// Drive a fresh state through Idle -> Memorize -> Playing
    fn playing_state(seed: u64) -> GameState {
        let mut state = GameState::new(seed, 0);
        tick(&mut state, &start_input());
        assert_eq!(state.phase, GamePhase::Memorize);
        tick(
            &mut state,
            &TickInput {
                skip_memorize: true,
                ..Default::default()
            },
        );
        assert_eq!(state.phase, GamePhase::Playing);
        state
    }

    /// Park the player in range of the client in slot 0
    fn move_to_first_client(state: &mut GameState) {
        let head = state.clients[0].head_pos();
        state.player.pos = Vec2::new(head.x, PLAYER_MAX_Y);
        assert!(within_radius(state.player.pos, head, CLIENT_SERVE_RADIUS));
    }

    #[test]
    fn test_start_signal_enters_memorize() {
        let mut state = GameState::new(1, 0);
        tick(&mut state, &TickInput::default());
        assert_eq!(state.phase, GamePhase::Idle);

        tick(&mut state, &start_input());
        assert_eq!(state.phase, GamePhase::Memorize);
        assert_eq!(state.memorize_frames, MEMORIZE_FRAMES);
        assert_eq!(state.floor.len(), 6);
    }

    #[test]
    fn test_memorize_countdown_expires_into_playing() {
        let mut state = GameState::new(1, 0);
        tick(&mut state, &start_input());
        for _ in 0..MEMORIZE_FRAMES {
            tick(&mut state, &TickInput::default());
        }
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_playing_starts_with_reset_state_and_one_client() {
        let state = playing_state(42);
        assert_eq!(state.score, 0);
        assert_eq!(state.sanity, SANITY_MAX);
        assert_eq!(state.goal, 2);
        assert_eq!(state.clients.len(), 1);
    }

    #[test]
    fn test_player_clamped_to_field() {
        let mut state = playing_state(42);
        let held = TickInput {
            left: true,
            up: true,
            ..Default::default()
        };
        for _ in 0..200 {
            tick(&mut state, &held);
        }
        assert_eq!(state.player.pos, Vec2::new(PLAYER_MIN_X, PLAYER_MIN_Y));

        let held = TickInput {
            right: true,
            down: true,
            ..Default::default()
        };
        for _ in 0..200 {
            tick(&mut state, &held);
        }
        assert_eq!(state.player.pos, Vec2::new(PLAYER_MAX_X, PLAYER_MAX_Y));
    }

    #[test]
    fn test_stun_freezes_player_and_counts_down() {
        let mut state = playing_state(42);
        state.player.stun = 3;
        let before = state.player.pos;
        tick(
            &mut state,
            &TickInput {
                right: true,
                interact: true,
                ..Default::default()
            },
        );
        assert_eq!(state.player.pos, before);
        assert_eq!(state.player.stun, 2);
        assert!(state.player.holding.is_none());
    }

    #[test]
    fn test_anim_frame_advances_only_while_moving() {
        let mut state = playing_state(42);
        tick(&mut state, &TickInput::default());
        assert_eq!(state.player.anim_frame, 0.0);
        tick(
            &mut state,
            &TickInput {
                right: true,
                ..Default::default()
            },
        );
        assert_eq!(state.player.anim_frame, 0.25);
    }

    #[test]
    fn test_patience_flips_to_chad_once_around_frame_1539() {
        // Level 1 decay is 0.065/frame, so 100 patience lasts ~1539 frames
        let mut state = playing_state(42);
        let mut flip_frame = None;
        for _ in 0..2000 {
            tick(&mut state, &TickInput::default());
            if flip_frame.is_none() && state.clients[0].state == ClientState::Chad {
                flip_frame = Some(state.frame);
                break;
            }
        }
        let flip_frame = flip_frame.expect("client never went hostile");
        assert!(
            (1535..=1543).contains(&flip_frame),
            "flipped at frame {flip_frame}"
        );
        assert_eq!(state.sanity, SANITY_MAX - CHAD_SANITY_COST);
        assert_eq!(state.clients[0].patience, PATIENCE_MAX);
        assert_eq!(state.clients[0].attack_timer, CHAD_FIRST_ATTACK_FRAMES);
        assert!(
            state
                .drain_events()
                .contains(&GameEvent::ClientTurnedHostile)
        );

        // Never reverts, and the transform cost is not applied twice
        let sanity_after_flip = state.sanity;
        for _ in 0..30 {
            tick(&mut state, &TickInput::default());
        }
        assert_eq!(state.clients[0].state, ClientState::Chad);
        assert_eq!(state.sanity, sanity_after_flip);
    }

    #[test]
    fn test_matching_delivery_scores_and_heals() {
        let mut state = playing_state(42);
        move_to_first_client(&mut state);
        state.player.holding = Some(state.clients[0].task);
        state.sanity = 50.0;

        tick(&mut state, &interact_input());
        assert_eq!(state.score, 1);
        assert!(state.clients.is_empty());
        assert!(state.player.holding.is_none());
        assert_eq!(state.sanity, 50.0 + DELIVERY_SANITY_HEAL);
        assert!(
            state
                .drain_events()
                .iter()
                .any(|e| matches!(e, GameEvent::TaskDelivered(_)))
        );
    }

    #[test]
    fn test_two_deliveries_clear_level_one() {
        let mut state = playing_state(42);
        assert_eq!(state.goal, 2);

        for expected_score in 1..=2u32 {
            let task = state.clients[0].task;
            move_to_first_client(&mut state);
            state.player.holding = Some(task);
            tick(&mut state, &interact_input());
            assert_eq!(state.score, expected_score);
            if expected_score < 2 {
                // Queue another client for the second delivery
                state.clients.push(Client::new(0, state.floor[0].task));
            }
        }
        assert_eq!(state.phase, GamePhase::LevelDone);
        // Healing is capped: sanity never left 100
        assert_eq!(state.sanity, SANITY_MAX);
        assert!(state.drain_events().contains(&GameEvent::LevelCleared));

        // LevelDone is idle until the advance signal
        let frame = state.frame;
        tick(&mut state, &TickInput::default());
        assert_eq!(state.phase, GamePhase::LevelDone);
        assert_eq!(state.frame, frame);
    }

    #[test]
    fn test_mismatched_delivery_costs_sanity_keeps_client() {
        let mut state = playing_state(42);
        move_to_first_client(&mut state);
        let wanted = state.clients[0].task;
        let wrong = TaskKind::ALL
            .into_iter()
            .find(|t| *t != wanted)
            .expect("catalog has more than one task");
        state.player.holding = Some(wrong);

        tick(&mut state, &interact_input());
        assert_eq!(state.score, 0);
        assert_eq!(state.clients.len(), 1);
        assert_eq!(state.sanity, SANITY_MAX - MISMATCH_SANITY_COST);
        // The wrong item stays in hand
        assert_eq!(state.player.holding, Some(wrong));
        assert!(state.drain_events().contains(&GameEvent::DeliveryRejected));
    }

    #[test]
    fn test_empty_hands_near_client_is_a_no_op() {
        let mut state = playing_state(42);
        move_to_first_client(&mut state);
        tick(&mut state, &interact_input());
        assert_eq!(state.score, 0);
        assert_eq!(state.clients.len(), 1);
        assert_eq!(state.sanity, SANITY_MAX);
    }

    #[test]
    fn test_cubicle_pickup_and_trash_drop() {
        let mut state = playing_state(42);
        let cubicle_center = state.floor[0].center();
        let task = state.floor[0].task;
        state.player.pos = cubicle_center;

        tick(&mut state, &interact_input());
        assert_eq!(state.player.holding, Some(task));
        assert!(
            state
                .drain_events()
                .contains(&GameEvent::TaskPickedUp(task))
        );

        // Drop it in the trash
        state.player.pos = Vec2::new(TRASH_X, PLAYER_MAX_Y);
        tick(&mut state, &interact_input());
        assert!(state.player.holding.is_none());
        assert!(state.drain_events().contains(&GameEvent::ItemTrashed));

        // Trashing with empty hands emits nothing
        tick(&mut state, &interact_input());
        assert!(!state.drain_events().contains(&GameEvent::ItemTrashed));
    }

    #[test]
    fn test_pickup_replaces_held_item() {
        let mut state = playing_state(42);
        state.player.holding = Some(state.floor[1].task);
        state.player.pos = state.floor[0].center();
        tick(&mut state, &interact_input());
        assert_eq!(state.player.holding, Some(state.floor[0].task));
    }

    #[test]
    fn test_projectile_hit_damage_and_stun() {
        let mut state = playing_state(42);
        state.clients.clear(); // isolate the projectile
        let player_pos = state.player.pos;
        state.projectiles.push(Projectile {
            pos: player_pos + Vec2::new(100.0, 0.0),
            vel: Vec2::new(-7.5, 0.0),
            rot: 0.0,
        });

        let mut hit_frame = None;
        for _ in 0..40 {
            tick(&mut state, &TickInput::default());
            if state.projectiles.is_empty() {
                hit_frame = Some(state.frame);
                break;
            }
        }
        assert!(hit_frame.is_some(), "projectile never resolved");
        assert_eq!(state.sanity, SANITY_MAX - HIT_SANITY_DAMAGE);
        assert_eq!(state.player.stun, STUN_FRAMES);
        assert_eq!(state.splats.len(), 1);
        assert!(state.drain_events().contains(&GameEvent::PlayerHit));
    }

    #[test]
    fn test_projectile_leaves_field() {
        let mut state = playing_state(42);
        state.clients.clear();
        state.projectiles.push(Projectile {
            pos: Vec2::new(10.0, 10.0),
            vel: Vec2::new(-8.0, 0.0),
            rot: 0.0,
        });
        for _ in 0..5 {
            tick(&mut state, &TickInput::default());
        }
        assert!(state.projectiles.is_empty());
        assert_eq!(state.sanity, SANITY_MAX);
    }

    #[test]
    fn test_chad_throw_rearms_attack_timer() {
        let mut state = playing_state(42);
        state.player.pos = Vec2::new(480.0, 100.0);
        let client = &mut state.clients[0];
        client.state = ClientState::Chad;
        client.attack_timer = 1;
        client.cooldown = 0;

        tick(&mut state, &TickInput::default());
        assert_eq!(state.projectiles.len(), 1);
        assert_eq!(state.clients[0].attack_timer, attack_interval(1));
        // The cup flies toward where the player stood
        assert!(state.projectiles[0].vel.y < 0.0);
    }

    #[test]
    fn test_resting_chad_does_not_throw() {
        let mut state = playing_state(42);
        let client = &mut state.clients[0];
        client.state = ClientState::Chad;
        client.attack_timer = 1;
        client.cooldown = 10;

        tick(&mut state, &TickInput::default());
        assert!(state.projectiles.is_empty());
        assert_eq!(state.clients[0].cooldown, 9);
        assert_eq!(state.clients[0].attack_timer, 1);
    }

    #[test]
    fn test_population_cap_holds() {
        let mut state = playing_state(42);
        while state.clients.len() < MAX_CLIENTS {
            let n = state.clients.len();
            state.clients.push(Client::new(n, state.floor[0].task));
        }
        // Cross a spawn boundary
        state.frame = spawn_interval(state.level) - 1;
        tick(&mut state, &TickInput::default());
        assert_eq!(state.clients.len(), MAX_CLIENTS);
    }

    #[test]
    fn test_spawned_clients_request_on_floor_tasks() {
        let mut state = playing_state(42);
        let floor_tasks: Vec<TaskKind> = state.floor.iter().map(|c| c.task).collect();
        for n in 0..20 {
            state.clients.clear();
            state.frame = n * 37; // vary the roll
            spawn_client(&mut state);
            assert!(floor_tasks.contains(&state.clients[0].task));
        }
    }

    #[test]
    fn test_game_over_records_new_high_score_once() {
        let mut state = playing_state(42);
        state.clients.clear();
        state.sanity = 10.0;
        state.projectiles.push(Projectile {
            pos: state.player.pos + Vec2::new(20.0, 0.0),
            vel: Vec2::ZERO,
            rot: 0.0,
        });

        tick(&mut state, &TickInput::default());
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.high_score, 1);
        assert!(
            state
                .drain_events()
                .contains(&GameEvent::GameOver { new_high_score: true })
        );

        // GameOver is terminal: further ticks change nothing
        let frame = state.frame;
        tick(&mut state, &TickInput::default());
        assert_eq!(state.frame, frame);
        assert_eq!(state.phase, GamePhase::GameOver);
    }

    #[test]
    fn test_game_over_keeps_better_stored_score() {
        let mut state = GameState::new(42, 5);
        tick(&mut state, &start_input());
        tick(
            &mut state,
            &TickInput {
                skip_memorize: true,
                ..Default::default()
            },
        );
        state.clients.clear();
        state.sanity = 5.0;
        state.projectiles.push(Projectile {
            pos: state.player.pos,
            vel: Vec2::ZERO,
            rot: 0.0,
        });

        tick(&mut state, &TickInput::default());
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.high_score, 5);
        assert!(
            state
                .drain_events()
                .contains(&GameEvent::GameOver { new_high_score: false })
        );
    }

    #[test]
    fn test_advance_level_regenerates_floor() {
        let mut state = playing_state(42);
        state.phase = GamePhase::LevelDone;
        tick(
            &mut state,
            &TickInput {
                advance_level: true,
                ..Default::default()
            },
        );
        assert_eq!(state.level, 2);
        assert_eq!(state.phase, GamePhase::Memorize);
        assert_eq!(state.floor.len(), 8);
        assert_eq!(state.memorize_frames, MEMORIZE_FRAMES);
    }

    #[test]
    fn test_particles_expire() {
        let mut state = playing_state(42);
        state.emit_particle(Vec2::new(480.0, 300.0), "✅", "green");
        for _ in 0..PARTICLE_LIFE {
            tick(&mut state, &TickInput::default());
        }
        assert!(state.particles.is_empty());
    }

    #[test]
    fn test_determinism() {
        let mut a = playing_state(99999);
        let mut b = playing_state(99999);
        let inputs = [
            TickInput {
                right: true,
                ..Default::default()
            },
            TickInput {
                down: true,
                ..Default::default()
            },
            TickInput {
                interact: true,
                ..Default::default()
            },
            TickInput::default(),
        ];
        for _ in 0..500 {
            for input in &inputs {
                tick(&mut a, input);
                tick(&mut b, input);
            }
        }
        assert_eq!(a.frame, b.frame);
        assert_eq!(a.sanity, b.sanity);
        assert_eq!(a.clients.len(), b.clients.len());
        assert_eq!(a.player.pos, b.player.pos);
    }
}
