//! Audio system using Web Audio API
//!
//! Procedurally generated sound effects - no external files needed!

use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

use crate::sim::{GameEvent, TaskKind};

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Playing phase entered
    LevelStart,
    /// A client arrives at the desk
    ClientArrive,
    /// Coffee pickup - slurp
    CoffeeSlurp,
    /// IT pickup - keyboard clatter
    KeyboardClack,
    /// Finance-flavored pickup - ka-ching
    CashRegister,
    /// Paperwork pickup - rustle
    PaperShuffle,
    /// Held item dropped in the trash
    Trash,
    /// Matching delivery accepted
    Delivered,
    /// Wrong item offered
    Rejected,
    /// Client flips to Chad
    Hostile,
    /// Coffee cup hits the player
    PlayerHit,
    /// Level goal met
    LevelClear,
    /// Sanity depleted
    GameOver,
    /// Run set a new best level
    HighScore,
}

impl SoundEffect {
    /// Map a simulation event to its sound, if it has one
    pub fn for_event(event: &GameEvent) -> Option<SoundEffect> {
        match event {
            GameEvent::LevelStarted => Some(SoundEffect::LevelStart),
            GameEvent::ClientSpawned => Some(SoundEffect::ClientArrive),
            GameEvent::TaskPickedUp(kind) => Some(match kind {
                TaskKind::Coffee => SoundEffect::CoffeeSlurp,
                TaskKind::It => SoundEffect::KeyboardClack,
                TaskKind::Deck | TaskKind::Model | TaskKind::Audit => SoundEffect::CashRegister,
                TaskKind::Legal | TaskKind::Hr | TaskKind::Design => SoundEffect::PaperShuffle,
            }),
            GameEvent::ItemTrashed => Some(SoundEffect::Trash),
            GameEvent::TaskDelivered(_) => Some(SoundEffect::Delivered),
            GameEvent::DeliveryRejected => Some(SoundEffect::Rejected),
            GameEvent::ClientTurnedHostile => Some(SoundEffect::Hostile),
            GameEvent::PlayerHit => Some(SoundEffect::PlayerHit),
            GameEvent::LevelCleared => Some(SoundEffect::LevelClear),
            GameEvent::GameOver { new_high_score } => Some(if *new_high_score {
                SoundEffect::HighScore
            } else {
                SoundEffect::GameOver
            }),
        }
    }
}

/// Audio manager for the game
pub struct AudioManager {
    ctx: Option<AudioContext>,
    master_volume: f32,
    muted: bool,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioManager {
    pub fn new() -> Self {
        // May fail outside a secure context
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("Failed to create AudioContext - audio disabled");
        }
        Self {
            ctx,
            master_volume: 0.8,
            muted: false,
        }
    }

    /// Resume audio context (required after user gesture)
    pub fn resume(&self) {
        if let Some(ctx) = &self.ctx {
            let _ = ctx.resume();
        }
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    fn effective_volume(&self) -> f32 {
        if self.muted { 0.0 } else { self.master_volume }
    }

    /// Play a sound effect
    pub fn play(&self, effect: SoundEffect) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }

        let Some(ctx) = &self.ctx else { return };

        // Browsers keep the context suspended until a user gesture
        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }

        match effect {
            SoundEffect::LevelStart => self.play_level_start(ctx, vol),
            SoundEffect::ClientArrive => self.play_client_arrive(ctx, vol),
            SoundEffect::CoffeeSlurp => self.play_coffee_slurp(ctx, vol),
            SoundEffect::KeyboardClack => self.play_keyboard_clack(ctx, vol),
            SoundEffect::CashRegister => self.play_cash_register(ctx, vol),
            SoundEffect::PaperShuffle => self.play_paper_shuffle(ctx, vol),
            SoundEffect::Trash => self.play_trash(ctx, vol),
            SoundEffect::Delivered => self.play_delivered(ctx, vol),
            SoundEffect::Rejected => self.play_rejected(ctx, vol),
            SoundEffect::Hostile => self.play_hostile(ctx, vol),
            SoundEffect::PlayerHit => self.play_player_hit(ctx, vol),
            SoundEffect::LevelClear => self.play_level_clear(ctx, vol),
            SoundEffect::GameOver => self.play_game_over(ctx, vol),
            SoundEffect::HighScore => self.play_high_score(ctx, vol),
        }
    }

    // === Sound generators ===

    /// Create an oscillator with gain envelope
    fn create_osc(
        &self,
        ctx: &AudioContext,
        freq: f32,
        osc_type: OscillatorType,
    ) -> Option<(OscillatorNode, GainNode)> {
        let osc = ctx.create_oscillator().ok()?;
        let gain = ctx.create_gain().ok()?;

        osc.set_type(osc_type);
        osc.frequency().set_value(freq);
        osc.connect_with_audio_node(&gain).ok()?;
        gain.connect_with_audio_node(&ctx.destination()).ok()?;

        Some((osc, gain))
    }

    /// Doorbell-ish two-tone chime
    fn play_client_arrive(&self, ctx: &AudioContext, vol: f32) {
        for (i, freq) in [660.0, 520.0].iter().enumerate() {
            let delay = i as f64 * 0.12;
            if let Some((osc, gain)) = self.create_osc(ctx, *freq, OscillatorType::Sine) {
                let t = ctx.current_time() + delay;
                gain.gain().set_value_at_time(vol * 0.3, t).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, t + 0.2)
                    .ok();
                osc.start_with_when(t).ok();
                osc.stop_with_when(t + 0.25).ok();
            }
        }
    }

    /// Level start - quick upbeat riff
    fn play_level_start(&self, ctx: &AudioContext, vol: f32) {
        for (i, freq) in [330.0, 440.0, 550.0, 660.0].iter().enumerate() {
            let delay = i as f64 * 0.09;
            if let Some((osc, gain)) = self.create_osc(ctx, *freq, OscillatorType::Triangle) {
                let t = ctx.current_time() + delay;
                gain.gain().set_value_at_time(vol * 0.25, t).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, t + 0.2)
                    .ok();
                osc.start_with_when(t).ok();
                osc.stop_with_when(t + 0.25).ok();
            }
        }
    }

    /// IT pickup - fast keyboard clatter
    fn play_keyboard_clack(&self, ctx: &AudioContext, vol: f32) {
        for (i, freq) in [2200.0, 1800.0, 2400.0, 2000.0].iter().enumerate() {
            let delay = i as f64 * 0.04;
            if let Some((osc, gain)) = self.create_osc(ctx, *freq, OscillatorType::Square) {
                let t = ctx.current_time() + delay;
                gain.gain().set_value_at_time(vol * 0.08, t).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, t + 0.03)
                    .ok();
                osc.start_with_when(t).ok();
                osc.stop_with_when(t + 0.04).ok();
            }
        }
    }

    /// Finance pickup - two-tone ka-ching
    fn play_cash_register(&self, ctx: &AudioContext, vol: f32) {
        for (i, freq) in [1100.0, 1500.0].iter().enumerate() {
            let delay = i as f64 * 0.07;
            if let Some((osc, gain)) = self.create_osc(ctx, *freq, OscillatorType::Sine) {
                let t = ctx.current_time() + delay;
                gain.gain().set_value_at_time(vol * 0.25, t).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, t + 0.18)
                    .ok();
                osc.start_with_when(t).ok();
                osc.stop_with_when(t + 0.22).ok();
            }
        }
    }

    /// Paperwork pickup - soft rustle
    fn play_paper_shuffle(&self, ctx: &AudioContext, vol: f32) {
        let Some((osc, gain)) = self.create_osc(ctx, 900.0, OscillatorType::Sawtooth) else {
            return;
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time(vol * 0.08, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.15)
            .ok();
        osc.frequency().set_value_at_time(900.0, t).ok();
        osc.frequency().set_value_at_time(1300.0, t + 0.04).ok();
        osc.frequency().set_value_at_time(700.0, t + 0.08).ok();
        osc.frequency().set_value_at_time(1100.0, t + 0.12).ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.18).ok();
    }

    /// Coffee pickup - burbling slurp
    fn play_coffee_slurp(&self, ctx: &AudioContext, vol: f32) {
        let Some((osc, gain)) = self.create_osc(ctx, 200.0, OscillatorType::Sine) else {
            return;
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time(vol * 0.3, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.3)
            .ok();
        // Burble
        osc.frequency().set_value_at_time(200.0, t).ok();
        osc.frequency().set_value_at_time(300.0, t + 0.05).ok();
        osc.frequency().set_value_at_time(180.0, t + 0.1).ok();
        osc.frequency().set_value_at_time(280.0, t + 0.15).ok();
        osc.frequency().set_value_at_time(150.0, t + 0.2).ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.35).ok();
    }

    /// Trash drop - dull clunk
    fn play_trash(&self, ctx: &AudioContext, vol: f32) {
        let Some((osc, gain)) = self.create_osc(ctx, 140.0, OscillatorType::Sine) else {
            return;
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time(vol * 0.4, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.15)
            .ok();
        osc.frequency().set_value_at_time(140.0, t).ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(50.0, t + 0.12)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.2).ok();
    }

    /// Delivery accepted - happy ascending ding
    fn play_delivered(&self, ctx: &AudioContext, vol: f32) {
        for (i, freq) in [600.0, 800.0, 1000.0].iter().enumerate() {
            let delay = i as f64 * 0.08;
            if let Some((osc, gain)) = self.create_osc(ctx, *freq, OscillatorType::Sine) {
                let t = ctx.current_time() + delay;
                gain.gain().set_value_at_time(vol * 0.25, t).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, t + 0.15)
                    .ok();
                osc.start_with_when(t).ok();
                osc.stop_with_when(t + 0.2).ok();
            }
        }
    }

    /// Wrong item - flat buzzer
    fn play_rejected(&self, ctx: &AudioContext, vol: f32) {
        let Some((osc, gain)) = self.create_osc(ctx, 180.0, OscillatorType::Square) else {
            return;
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time(vol * 0.25, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.25)
            .ok();
        osc.frequency().set_value_at_time(180.0, t).ok();
        osc.frequency().set_value_at_time(160.0, t + 0.12).ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.3).ok();
    }

    /// Client turns hostile - low growling sweep
    fn play_hostile(&self, ctx: &AudioContext, vol: f32) {
        let t = ctx.current_time();

        if let Some((osc, gain)) = self.create_osc(ctx, 300.0, OscillatorType::Sawtooth) {
            gain.gain().set_value_at_time(vol * 0.35, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.4)
                .ok();
            osc.frequency().set_value_at_time(300.0, t).ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(80.0, t + 0.35)
                .ok();
            osc.start().ok();
            osc.stop_with_when(t + 0.45).ok();
        }

        // Sub rumble under the growl
        if let Some((osc, gain)) = self.create_osc(ctx, 50.0, OscillatorType::Sine) {
            gain.gain().set_value_at_time(vol * 0.3, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.3)
                .ok();
            osc.start().ok();
            osc.stop_with_when(t + 0.35).ok();
        }
    }

    /// Coffee cup impact - splat thump
    fn play_player_hit(&self, ctx: &AudioContext, vol: f32) {
        let t = ctx.current_time();

        if let Some((osc, gain)) = self.create_osc(ctx, 150.0, OscillatorType::Sine) {
            gain.gain().set_value_at_time(vol * 0.5, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.15)
                .ok();
            osc.frequency().set_value_at_time(150.0, t).ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(60.0, t + 0.12)
                .ok();
            osc.start().ok();
            osc.stop_with_when(t + 0.2).ok();
        }

        // Splash fizz
        if let Some((osc, gain)) = self.create_osc(ctx, 2500.0, OscillatorType::Square) {
            gain.gain().set_value_at_time(vol * 0.1, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.08)
                .ok();
            osc.frequency().set_value_at_time(2500.0, t).ok();
            osc.frequency().set_value_at_time(1800.0, t + 0.03).ok();
            osc.start().ok();
            osc.stop_with_when(t + 0.1).ok();
        }
    }

    /// Level cleared - triumphant fanfare
    fn play_level_clear(&self, ctx: &AudioContext, vol: f32) {
        for (i, freq) in [400.0, 500.0, 600.0, 800.0].iter().enumerate() {
            let delay = i as f64 * 0.1;
            if let Some((osc, gain)) = self.create_osc(ctx, *freq, OscillatorType::Triangle) {
                let t = ctx.current_time() + delay;
                gain.gain().set_value_at_time(vol * 0.3, t).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, t + 0.4)
                    .ok();
                osc.start_with_when(t).ok();
                osc.stop_with_when(t + 0.5).ok();
            }
        }
    }

    /// Game over - sad descending
    fn play_game_over(&self, ctx: &AudioContext, vol: f32) {
        for (i, freq) in [400.0, 350.0, 300.0, 200.0].iter().enumerate() {
            let delay = i as f64 * 0.2;
            if let Some((osc, gain)) = self.create_osc(ctx, *freq, OscillatorType::Sine) {
                let t = ctx.current_time() + delay;
                gain.gain().set_value_at_time(vol * 0.3, t).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, t + 0.3)
                    .ok();
                osc.start_with_when(t).ok();
                osc.stop_with_when(t + 0.4).ok();
            }
        }
    }

    /// New best level - celebratory run
    fn play_high_score(&self, ctx: &AudioContext, vol: f32) {
        for (i, freq) in [500.0, 600.0, 700.0, 800.0, 1000.0].iter().enumerate() {
            let delay = i as f64 * 0.08;
            if let Some((osc, gain)) = self.create_osc(ctx, *freq, OscillatorType::Triangle) {
                let t = ctx.current_time() + delay;
                gain.gain().set_value_at_time(vol * 0.25, t).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, t + 0.25)
                    .ok();
                osc.start_with_when(t).ok();
                osc.stop_with_when(t + 0.3).ok();
            }
        }
    }
}
