//! 2D canvas renderer
//!
//! Draws the whole scene from a `GameState` each frame. Emoji glyphs stand in
//! for sprites, so there are no assets to load. Canvas calls that can fail
//! are ignored: a dropped draw is invisible for one frame at worst.

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::consts::*;
use crate::sim::{ClientState, GamePhase, GameState};

/// Canvas renderer bound to the game's 2d context
pub struct Renderer {
    ctx: CanvasRenderingContext2d,
}

impl Renderer {
    /// Bind to a canvas, sizing it to the fixed play field
    pub fn new(canvas: &HtmlCanvasElement) -> Option<Self> {
        canvas.set_width(FIELD_WIDTH as u32);
        canvas.set_height(FIELD_HEIGHT as u32);
        let ctx = canvas
            .get_context("2d")
            .ok()??
            .dyn_into::<CanvasRenderingContext2d>()
            .ok()?;
        Some(Self { ctx })
    }

    /// Draw one frame. `time` is the rAF timestamp, used only for blink
    /// effects that should run even while the simulation is idle.
    pub fn render(&self, state: &GameState, time: f64) {
        self.draw_background();
        self.draw_cubicles(state);
        self.draw_splats(state);
        self.draw_desk_area(state);
        self.draw_clients(state);
        self.draw_player(state, time);
        self.draw_projectiles(state);
        self.draw_steam(state);
        self.draw_particles(state);
        self.draw_overlays(state, time);
    }

    fn draw_background(&self) {
        let ctx = &self.ctx;
        // Office carpet
        ctx.set_fill_style_str("#2c3145");
        ctx.fill_rect(0.0, 0.0, FIELD_WIDTH as f64, FIELD_HEIGHT as f64);

        // Carpet tile seams
        ctx.set_stroke_style_str("#343a52");
        ctx.set_line_width(1.0);
        let mut x = 0.0;
        while x <= FIELD_WIDTH as f64 {
            ctx.begin_path();
            ctx.move_to(x, 0.0);
            ctx.line_to(x, DESK_Y as f64);
            ctx.stroke();
            x += 80.0;
        }
    }

    fn draw_cubicles(&self, state: &GameState) {
        let ctx = &self.ctx;
        let revealed = state.phase == GamePhase::Memorize;

        for cubicle in &state.floor {
            let (x, y) = (cubicle.pos.x as f64, cubicle.pos.y as f64);
            let (w, h) = (cubicle.size.x as f64, cubicle.size.y as f64);

            // Walls
            ctx.set_fill_style_str("#454c6b");
            ctx.fill_rect(x, y, w, h);
            ctx.set_stroke_style_str(cubicle.task.color());
            ctx.set_line_width(3.0);
            ctx.stroke_rect(x, y, w, h);

            let center = cubicle.center();
            ctx.set_text_align("center");
            if revealed {
                // Study phase: show what lives where
                ctx.set_font("42px sans-serif");
                let _ = ctx.fill_text(cubicle.task.icon(), center.x as f64, center.y as f64);
                ctx.set_font("16px sans-serif");
                ctx.set_fill_style_str("#e8e8f0");
                let _ = ctx.fill_text(
                    cubicle.task.name(),
                    center.x as f64,
                    center.y as f64 + 34.0,
                );
            } else {
                // Play phase: only the colored frame remains as a hint
                ctx.set_font("42px sans-serif");
                ctx.set_fill_style_str("#6a718f");
                let _ = ctx.fill_text("?", center.x as f64, center.y as f64 + 14.0);
            }
        }
    }

    fn draw_splats(&self, state: &GameState) {
        let ctx = &self.ctx;
        for splat in &state.splats {
            let alpha = (splat.life as f64 / SPLAT_LIFE as f64).min(1.0) * 0.6;
            ctx.set_global_alpha(alpha);
            ctx.set_font("36px sans-serif");
            ctx.set_text_align("center");
            let _ = ctx.fill_text("🟤", splat.pos.x as f64, splat.pos.y as f64);
        }
        ctx.set_global_alpha(1.0);
    }

    fn draw_desk_area(&self, state: &GameState) {
        let ctx = &self.ctx;
        // Front desk
        ctx.set_fill_style_str("#8d6e4a");
        ctx.fill_rect(0.0, DESK_Y as f64, FIELD_WIDTH as f64, 14.0);
        ctx.set_fill_style_str("#1f2333");
        ctx.fill_rect(
            0.0,
            DESK_Y as f64 + 14.0,
            FIELD_WIDTH as f64,
            (FIELD_HEIGHT - DESK_Y) as f64 - 14.0,
        );

        // Trash bin, pulsing faintly when the player carries something
        ctx.set_font("44px sans-serif");
        ctx.set_text_align("center");
        if state.player.holding.is_some() {
            ctx.set_global_alpha(0.8);
        }
        let _ = ctx.fill_text("🗑️", TRASH_X as f64, TRASH_Y as f64 + 14.0);
        ctx.set_global_alpha(1.0);
    }

    fn draw_clients(&self, state: &GameState) {
        let ctx = &self.ctx;
        ctx.set_text_align("center");

        for client in &state.clients {
            let (x, y) = (client.pos.x as f64, client.pos.y as f64);
            let head = client.head_pos();

            let (face, mood) = match client.state {
                ClientState::Waiting if client.patience < 30.0 => ("😠", "💤"),
                ClientState::Waiting => ("🧑‍💼", "💤"),
                ClientState::Chad => ("😡", "🤬"),
            };

            // Body and head poke up over the desk
            ctx.set_font("40px sans-serif");
            let _ = ctx.fill_text(face, head.x as f64, head.y as f64 + 14.0);
            ctx.set_font("20px sans-serif");
            let _ = ctx.fill_text(mood, x + 26.0, head.y as f64 - 10.0);

            // Speech bubble with the requested task
            let bubble_y = head.y as f64 - 46.0;
            ctx.set_fill_style_str("#f5f5fa");
            ctx.begin_path();
            let _ = ctx.arc(head.x as f64, bubble_y, 22.0, 0.0, std::f64::consts::TAU);
            ctx.fill();
            ctx.set_font("24px sans-serif");
            let _ = ctx.fill_text(client.task.icon(), head.x as f64, bubble_y + 8.0);

            // Patience bar (Waiting only; a Chad is already lost)
            if client.state == ClientState::Waiting {
                let frac = (client.patience / PATIENCE_MAX) as f64;
                let bar = if client.patience < 30.0 {
                    "#ff4d4d"
                } else {
                    "#4dd06a"
                };
                ctx.set_fill_style_str("#14161f");
                ctx.fill_rect(x - 30.0, y + 26.0, 60.0, 6.0);
                ctx.set_fill_style_str(bar);
                ctx.fill_rect(x - 30.0, y + 26.0, 60.0 * frac, 6.0);
            }
        }
    }

    fn draw_player(&self, state: &GameState, time: f64) {
        let ctx = &self.ctx;
        let player = &state.player;
        let (x, y) = (player.pos.x as f64, player.pos.y as f64);

        // Stun flicker: skip every other blink interval
        if player.is_stunned() && (time / 80.0) as u64 % 2 == 0 {
            ctx.set_font("24px sans-serif");
            ctx.set_text_align("center");
            let _ = ctx.fill_text("💫", x, y - 34.0);
            return;
        }

        // Walk bobbing from the animation phase
        let bob = (player.anim_frame as f64 * std::f64::consts::PI).sin() * 3.0;
        ctx.set_font("38px sans-serif");
        ctx.set_text_align("center");
        let glyph = if player.anim_frame.fract() != 0.0 {
            "🏃"
        } else {
            "🧍"
        };
        let _ = ctx.fill_text(glyph, x, y + 14.0 + bob);

        if let Some(task) = player.holding {
            ctx.set_font("26px sans-serif");
            let _ = ctx.fill_text(task.icon(), x, y - 28.0 + bob);
        }
        if player.is_stunned() {
            ctx.set_font("24px sans-serif");
            let _ = ctx.fill_text("💫", x, y - 34.0);
        }
    }

    fn draw_projectiles(&self, state: &GameState) {
        let ctx = &self.ctx;
        ctx.set_font("28px sans-serif");
        ctx.set_text_align("center");
        for p in &state.projectiles {
            ctx.save();
            let _ = ctx.translate(p.pos.x as f64, p.pos.y as f64);
            let _ = ctx.rotate(p.rot as f64);
            let _ = ctx.fill_text("☕", 0.0, 10.0);
            ctx.restore();
        }
    }

    fn draw_steam(&self, state: &GameState) {
        let ctx = &self.ctx;
        for puff in &state.steam {
            let alpha = puff.life as f64 / STEAM_LIFE as f64;
            ctx.set_global_alpha(alpha.min(1.0));
            ctx.set_font("16px sans-serif");
            ctx.set_text_align("center");
            let _ = ctx.fill_text("♨️", puff.pos.x as f64, puff.pos.y as f64);
        }
        ctx.set_global_alpha(1.0);
    }

    fn draw_particles(&self, state: &GameState) {
        let ctx = &self.ctx;
        ctx.set_text_align("center");
        for particle in &state.particles {
            let alpha = particle.life as f64 / PARTICLE_LIFE as f64;
            ctx.set_global_alpha(alpha);
            ctx.set_font("26px sans-serif");
            ctx.set_fill_style_str(particle.color);
            let _ = ctx.fill_text(particle.icon, particle.pos.x as f64, particle.pos.y as f64);
        }
        ctx.set_global_alpha(1.0);
        ctx.set_fill_style_str("#e8e8f0");
    }

    fn draw_overlays(&self, state: &GameState, time: f64) {
        let ctx = &self.ctx;

        if state.phase == GamePhase::Memorize {
            let secs = state.memorize_frames.div_ceil(FRAME_RATE);
            ctx.set_fill_style_str("#ffd166");
            ctx.set_font("32px sans-serif");
            ctx.set_text_align("center");
            let _ = ctx.fill_text(
                &format!("Memorize the floor! {secs}"),
                FIELD_WIDTH as f64 / 2.0,
                46.0,
            );
            ctx.set_fill_style_str("#e8e8f0");
        }

        // Flashing red vignette when the run is nearly lost
        if state.phase == GamePhase::Playing
            && state.sanity <= 30.0
            && (time / 400.0) as u64 % 2 == 0
        {
            ctx.set_stroke_style_str("#ff3b3b");
            ctx.set_line_width(10.0);
            ctx.stroke_rect(5.0, 5.0, FIELD_WIDTH as f64 - 10.0, FIELD_HEIGHT as f64 - 10.0);
        }
    }
}
