//! Audio cue collaborator
//!
//! The core only announces what happened; synthesis, envelopes and timing
//! belong to whoever implements [`AudioCues`].

/// Sound effect vocabulary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Car hit an obstacle, enemy, boat or decoy
    Horn,
    /// An enemy took the spot
    EnemySiren,
    /// Car parked
    WinJingle,
    /// Next level started
    LevelUp,
    /// Background music loop
    Music,
}

/// Fire-and-forget notifications from the session
pub trait AudioCues {
    fn on_crash(&mut self) {}
    fn on_enemy_reached_spot(&mut self) {}
    fn on_park_success(&mut self) {}
    fn on_level_advance(&mut self, _new_level: u32) {}
    /// Menu left, music may start
    fn on_session_start(&mut self) {}
    /// Called every active tick with whether the car is being driven
    fn on_motor(&mut self, _moving: bool) {}
}

/// Ignores every cue
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentAudio;

impl AudioCues for SilentAudio {}

type Player = Box<dyn FnMut(SoundEffect, f32)>;

/// Maps cues to sound effects and hands them to a backend with a volume
pub struct AudioManager {
    player: Option<Player>,
    master_volume: f32,
    muted: bool,
    motor_running: bool,
    /// Most recent effect, for hosts that poll instead of installing a player
    last_effect: Option<SoundEffect>,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for AudioManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AudioManager")
            .field("has_player", &self.player.is_some())
            .field("master_volume", &self.master_volume)
            .field("muted", &self.muted)
            .field("motor_running", &self.motor_running)
            .field("last_effect", &self.last_effect)
            .finish()
    }
}

impl AudioManager {
    /// Manager without a backend; effects are only logged
    pub fn new() -> Self {
        Self {
            player: None,
            master_volume: 0.8,
            muted: false,
            motor_running: false,
            last_effect: None,
        }
    }

    /// Manager that forwards effects to `player`
    pub fn with_player(player: impl FnMut(SoundEffect, f32) + 'static) -> Self {
        Self {
            player: Some(Box::new(player)),
            ..Self::new()
        }
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    pub fn motor_running(&self) -> bool {
        self.motor_running
    }

    pub fn last_effect(&self) -> Option<SoundEffect> {
        self.last_effect
    }

    fn effective_volume(&self) -> f32 {
        if self.muted { 0.0 } else { self.master_volume }
    }

    /// Play a sound effect
    pub fn play(&mut self, effect: SoundEffect) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }
        log::debug!("Playing {effect:?} at volume {vol:.2}");
        self.last_effect = Some(effect);
        if let Some(player) = self.player.as_mut() {
            player(effect, vol);
        }
    }
}

impl AudioCues for AudioManager {
    fn on_crash(&mut self) {
        self.play(SoundEffect::Horn);
    }

    fn on_enemy_reached_spot(&mut self) {
        self.play(SoundEffect::EnemySiren);
    }

    fn on_park_success(&mut self) {
        self.play(SoundEffect::WinJingle);
    }

    fn on_level_advance(&mut self, new_level: u32) {
        log::debug!("Audio: level {new_level}");
        self.play(SoundEffect::LevelUp);
    }

    fn on_session_start(&mut self) {
        self.play(SoundEffect::Music);
    }

    fn on_motor(&mut self, moving: bool) {
        self.motor_running = moving;
    }
}
