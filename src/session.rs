//! Session state machine
//!
//! Menu → Playing → (LevelWon | LevelLost) → Playing … → GameComplete → Menu.
//! The host feeds it ticks and key actions and reads the world back for
//! drawing.

use crate::audio::AudioCues;
use crate::error::SessionError;
use crate::input::{InputSource, KeyAction};
use crate::settings::GameConfig;
use crate::sim::{
    GameEvent, GamePhase, LevelDifficulty, TickInput, TickOutcome, WorldState, generate_level,
    tick,
};

/// Where the session is, as seen by the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Waiting for a player name
    Menu,
    /// A level is in progress
    Playing,
    /// Car parked; waiting for the advance action
    LevelWon,
    /// Crash or stolen spot; waiting for the restart action
    LevelLost,
    /// Every level cleared
    GameComplete,
}

/// Owns the world and drives it from host input
#[derive(Debug)]
pub struct SessionController<A: AudioCues> {
    config: GameConfig,
    world: WorldState,
    audio: A,
    audio_enabled: bool,
    dev_overlay: bool,
}

impl<A: AudioCues> SessionController<A> {
    /// New session seeded from the config, or randomly when it has no seed
    pub fn new(config: GameConfig, audio: A) -> Self {
        let seed = config.seed.unwrap_or_else(rand::random);
        Self::with_seed(config, audio, seed)
    }

    pub fn with_seed(config: GameConfig, audio: A, seed: u64) -> Self {
        log::info!("Session created with seed {seed}");
        let world = WorldState::new(seed, config.arena);
        Self {
            audio_enabled: config.audio_enabled_at_start(),
            dev_overlay: config.dev.development && config.dev.show_dev_ui,
            config,
            world,
            audio,
        }
    }

    /// Dev shortcut: start straight away when the config skips the menu
    pub fn boot(&mut self) -> bool {
        if !self.config.skips_menu() || self.state() != SessionState::Menu {
            return false;
        }
        log::info!(
            "Development mode: skipping menu, starting level {}",
            self.config.start_level()
        );
        self.start("Developer").is_ok()
    }

    /// Leave the menu with the given player name
    pub fn start(&mut self, player_name: &str) -> Result<(), SessionError> {
        let name = player_name.trim();
        if name.is_empty() {
            return Err(SessionError::EmptyPlayerName);
        }
        if self.state() != SessionState::Menu {
            log::warn!("Start ignored: session already running");
            return Ok(());
        }

        self.world.player_name = name.to_string();
        self.world.phase = GamePhase::Playing;
        self.world.level = self.config.start_level();
        log::info!("{} starts at level {}", name, self.world.level);
        if self.audio_enabled {
            self.audio.on_session_start();
        }
        self.load_level(self.world.level);
        Ok(())
    }

    /// Advance one frame using the host's held directions
    pub fn tick(&mut self, input: &impl InputSource) -> TickOutcome {
        if self.state() != SessionState::Playing {
            return TickOutcome::default();
        }
        let input = TickInput::sample(input);
        let outcome = tick(&mut self.world, &input, self.config.max_levels);

        let events = self.world.drain_events();
        if self.audio_enabled {
            if outcome.simulated {
                self.audio.on_motor(outcome.car_moving);
            }
            for event in events {
                match event {
                    GameEvent::Crash(_) => self.audio.on_crash(),
                    GameEvent::EnemyReachedSpot => self.audio.on_enemy_reached_spot(),
                    GameEvent::Parked => self.audio.on_park_success(),
                }
            }
        }
        outcome
    }

    /// React to a discrete key press. Returns whether it changed anything.
    pub fn handle_action(&mut self, action: KeyAction) -> bool {
        match action {
            KeyAction::RestartLevel => self.restart_level(),
            KeyAction::AdvanceLevel => self.advance_level(),
            KeyAction::RestartGame => self.restart_game(),
            KeyAction::ToggleDevOverlay => {
                self.dev_overlay = !self.dev_overlay;
                true
            }
            KeyAction::ToggleAudio => {
                self.audio_enabled = !self.audio_enabled;
                log::info!("Audio {}", if self.audio_enabled { "on" } else { "off" });
                true
            }
        }
    }

    /// Replay the same level after a loss
    pub fn restart_level(&mut self) -> bool {
        if self.state() != SessionState::LevelLost {
            return false;
        }
        log::info!("Restarting level {}", self.world.level);
        self.load_level(self.world.level);
        true
    }

    /// Move to the next level after a win, or finish the game
    pub fn advance_level(&mut self) -> bool {
        if self.state() != SessionState::LevelWon {
            return false;
        }
        self.world.level += 1;
        if self.is_game_complete() {
            log::info!(
                "{} cleared all {} levels",
                self.world.player_name,
                self.config.max_levels
            );
            self.world.reset_level();
            return true;
        }
        self.load_level(self.world.level);
        if self.audio_enabled {
            self.audio.on_level_advance(self.world.level);
        }
        true
    }

    /// Back to the menu once every level is cleared
    pub fn restart_game(&mut self) -> bool {
        if self.state() != SessionState::GameComplete {
            return false;
        }
        log::info!("Game reset to menu");
        self.world.reset_game();
        true
    }

    pub fn state(&self) -> SessionState {
        match self.world.phase {
            GamePhase::Menu => SessionState::Menu,
            GamePhase::Playing if self.is_game_complete() => SessionState::GameComplete,
            GamePhase::Playing if self.world.win => SessionState::LevelWon,
            GamePhase::Playing if self.world.game_over => SessionState::LevelLost,
            GamePhase::Playing => SessionState::Playing,
        }
    }

    pub fn is_game_complete(&self) -> bool {
        self.world.level > self.config.max_levels
    }

    /// Read-only view for the renderer
    pub fn world(&self) -> &WorldState {
        &self.world
    }

    /// Direct world access for hosts and tests that stage scenarios
    pub fn world_mut(&mut self) -> &mut WorldState {
        &mut self.world
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn audio(&self) -> &A {
        &self.audio
    }

    pub fn audio_mut(&mut self) -> &mut A {
        &mut self.audio
    }

    pub fn audio_enabled(&self) -> bool {
        self.audio_enabled
    }

    pub fn current_difficulty(&self) -> LevelDifficulty {
        self.config.difficulty.calculate(self.world.level)
    }

    /// Dev overlay text, when the overlay is on
    pub fn dev_overlay(&self) -> Option<Vec<String>> {
        if !self.dev_overlay {
            return None;
        }
        let world = &self.world;
        let mut lines = vec![
            self.config.difficulty.summary(world.level),
            format!(
                "Obstacles: {}  Decoys: {}  Enemies: {}  Boats: {}",
                world.obstacles.len(),
                world.fake_parking_spots.len(),
                world.enemies.len(),
                world.boats.len()
            ),
            format!("Placement fallbacks: {}", world.placement_fallbacks),
            format!("State: {:?}  Ticks: {}", self.state(), world.level_ticks),
        ];
        if let Some(car) = &world.car {
            lines.push(format!(
                "Car: ({:.1}, {:.1}) angle {:.2}",
                car.pos.x, car.pos.y, car.angle
            ));
        }
        Some(lines)
    }

    fn load_level(&mut self, level: u32) {
        self.world.reset_car();
        generate_level(&mut self.world, &self.config, level);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::{AudioManager, SilentAudio, SoundEffect};
    use crate::input::{Direction, HeldKeys};
    use crate::sim::{CrashKind, Obstacle, ObstacleKind};

    /// Counts cues by kind
    #[derive(Debug, Default)]
    struct CueLog {
        crashes: u32,
        sirens: u32,
        parks: u32,
        advances: Vec<u32>,
        starts: u32,
    }

    impl AudioCues for CueLog {
        fn on_crash(&mut self) {
            self.crashes += 1;
        }
        fn on_enemy_reached_spot(&mut self) {
            self.sirens += 1;
        }
        fn on_park_success(&mut self) {
            self.parks += 1;
        }
        fn on_level_advance(&mut self, new_level: u32) {
            self.advances.push(new_level);
        }
        fn on_session_start(&mut self) {
            self.starts += 1;
        }
    }

    fn config(max_levels: u32) -> GameConfig {
        GameConfig {
            max_levels,
            ..Default::default()
        }
    }

    fn session(max_levels: u32) -> SessionController<CueLog> {
        SessionController::with_seed(config(max_levels), CueLog::default(), 42)
    }

    fn park<A: AudioCues>(session: &mut SessionController<A>) {
        let world = session.world_mut();
        let spot = world.parking_spot.expect("level loaded");
        let car = world.car.as_mut().expect("car present");
        car.pos = spot.pos;
        car.angle = 0.0;
        session.tick(&HeldKeys::default());
    }

    fn crash<A: AudioCues>(session: &mut SessionController<A>) {
        let world = session.world_mut();
        let at = world.car.as_ref().expect("car present").pos;
        world.obstacles.push(Obstacle {
            pos: at,
            size: ObstacleKind::Car.size(),
            kind: ObstacleKind::Car,
            color: ObstacleKind::Car.color(),
        });
        session.tick(&HeldKeys::default());
    }

    #[test]
    fn test_empty_name_rejected() {
        let mut s = session(10);
        assert_eq!(s.start(""), Err(SessionError::EmptyPlayerName));
        assert_eq!(s.start("   "), Err(SessionError::EmptyPlayerName));
        assert_eq!(s.state(), SessionState::Menu);
        assert!(s.world().car.is_none());
    }

    #[test]
    fn test_start_loads_level_one() {
        let mut s = session(10);
        s.start(" Ada ").unwrap();
        assert_eq!(s.state(), SessionState::Playing);
        assert_eq!(s.world().player_name, "Ada");
        assert_eq!(s.world().level, 1);
        assert!(s.world().car.is_some());
        assert!(s.world().parking_spot.is_some());
        assert_eq!(s.audio().starts, 1);
    }

    #[test]
    fn test_menu_ignores_ticks_and_actions() {
        let mut s = session(10);
        assert!(!s.tick(&HeldKeys::default()).simulated);
        assert!(!s.handle_action(KeyAction::AdvanceLevel));
        assert!(!s.handle_action(KeyAction::RestartLevel));
        assert!(!s.handle_action(KeyAction::RestartGame));
    }

    #[test]
    fn test_end_to_end_two_levels() {
        let mut s = session(2);
        s.start("Ada").unwrap();

        park(&mut s);
        assert!(s.world().win);
        assert!(!s.world().game_over);
        assert_eq!(s.state(), SessionState::LevelWon);
        assert_eq!(s.audio().parks, 1);

        assert!(s.advance_level());
        assert_eq!(s.world().level, 2);
        assert_eq!(s.state(), SessionState::Playing);
        assert_eq!(s.audio().advances, vec![2]);

        park(&mut s);
        assert_eq!(s.state(), SessionState::LevelWon);
        assert!(s.advance_level());
        assert_eq!(s.state(), SessionState::GameComplete);
        assert!(s.is_game_complete());
        // No level 3 was generated
        assert_eq!(s.audio().advances, vec![2]);
        assert!(s.world().obstacles.is_empty());

        assert!(s.handle_action(KeyAction::RestartGame));
        assert_eq!(s.state(), SessionState::Menu);
        assert_eq!(s.world().level, 1);
        assert!(s.world().player_name.is_empty());
    }

    #[test]
    fn test_restart_after_loss_keeps_level() {
        let mut s = session(10);
        s.start("Ada").unwrap();
        park(&mut s);
        s.advance_level();
        let obstacles = s.world().obstacles.len();

        crash(&mut s);
        assert_eq!(s.state(), SessionState::LevelLost);
        assert_eq!(s.audio().crashes, 1);
        // Advancing is not allowed after a loss
        assert!(!s.handle_action(KeyAction::AdvanceLevel));

        assert!(s.handle_action(KeyAction::RestartLevel));
        assert_eq!(s.state(), SessionState::Playing);
        assert_eq!(s.world().level, 2);
        assert_eq!(s.world().obstacles.len(), obstacles);
        assert_eq!(s.world().car.as_ref().unwrap().pos, crate::consts::CAR_START);
    }

    #[test]
    fn test_crash_cue_fires_once() {
        let mut s = session(10);
        s.start("Ada").unwrap();
        crash(&mut s);
        for _ in 0..5 {
            s.tick(&HeldKeys::default());
        }
        assert_eq!(s.audio().crashes, 1);
        assert!(!s.world().win);
    }

    #[test]
    fn test_enemy_steal_fires_siren() {
        let mut s = session(10);
        s.start("Ada").unwrap();
        let world = s.world_mut();
        let spot = world.parking_spot.unwrap();
        world.enemies[0].pos = spot.pos;
        world.enemies[0].speed = 0.0;
        s.tick(&HeldKeys::default());
        assert_eq!(s.state(), SessionState::LevelLost);
        assert_eq!(s.audio().sirens, 1);
        assert_eq!(s.audio().crashes, 0);
    }

    #[test]
    fn test_driving_moves_car() {
        let mut s = SessionController::with_seed(config(10), AudioManager::new(), 42);
        s.start("Ada").unwrap();
        let mut keys = HeldKeys::default();
        keys.press(Direction::Up);
        let outcome = s.tick(&keys);
        assert!(outcome.car_moving);
        assert!(s.audio().motor_running());
        assert!(s.world().car.as_ref().unwrap().pos.x > crate::consts::CAR_START.x);
        assert_eq!(s.audio().last_effect(), Some(SoundEffect::Music));
    }

    #[test]
    fn test_audio_toggle_silences_cues() {
        let mut s = session(10);
        s.start("Ada").unwrap();
        assert!(s.handle_action(KeyAction::ToggleAudio));
        assert!(!s.audio_enabled());
        crash(&mut s);
        assert_eq!(s.audio().crashes, 0);
        // Events are drained even while muted
        assert!(s.world().events.is_empty());
    }

    #[test]
    fn test_dev_boot_and_overlay() {
        let mut config = config(10);
        config.dev.development = true;
        config.dev.skip_home_if_dev = true;
        config.dev.auto_start_level = Some(3);
        config.dev.disable_audio_in_dev = true;
        let mut s = SessionController::with_seed(config, SilentAudio, 1);
        assert!(s.dev_overlay().is_none());
        assert!(s.boot());
        assert!(!s.boot());
        assert!(!s.audio_enabled());
        assert_eq!(s.world().player_name, "Developer");
        assert_eq!(s.world().level, 3);
        assert_eq!(s.current_difficulty(), s.config().difficulty.calculate(3));

        assert!(s.handle_action(KeyAction::ToggleDevOverlay));
        let lines = s.dev_overlay().unwrap();
        assert!(lines[0].starts_with("Level 3:"));
        assert!(lines.iter().any(|l| l.starts_with("Car: (120.0, 550.0)")));
    }

    #[test]
    fn test_boot_without_dev_flags_stays_in_menu() {
        let mut s = session(10);
        assert!(!s.boot());
        assert_eq!(s.state(), SessionState::Menu);
    }

    #[test]
    fn test_crash_kind_reported_in_outcome() {
        let mut s = session(10);
        s.start("Ada").unwrap();
        let world = s.world_mut();
        let at = world.car.as_ref().unwrap().pos;
        world.obstacles.push(Obstacle {
            pos: at,
            size: ObstacleKind::Palm.size(),
            kind: ObstacleKind::Palm,
            color: ObstacleKind::Palm.color(),
        });
        let outcome = s.tick(&HeldKeys::default());
        assert_eq!(
            outcome.verdict,
            Some(crate::sim::Verdict::Lost(GameEvent::Crash(CrashKind::Obstacle)))
        );
    }
}
