//! Per-frame session driver
//!
//! Owns the avatar, obstacle field and pickups, runs the game-state machine
//! and hands notifications and end-of-session tallies to its collaborators.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::audio::AudioSink;
use crate::persistence::SessionRecorder;
use crate::sim::{
    Avatar, CollectibleField, Command, GameEvent, GamePhase, ObstacleField, SessionEvent,
    SessionSummary,
};
use crate::tuning::Tuning;

/// Game session: one `step` per rendered frame
pub struct Session<A: AudioSink, R: SessionRecorder> {
    phase: GamePhase,
    avatar: Avatar,
    field: ObstacleField,
    pickups: CollectibleField,
    /// Scrolling begins with the first impulse
    started: bool,
    currency: u32,
    /// Simulated seconds in the current session
    elapsed: f32,
    sessions_played: u32,
    tuning: Tuning,
    /// Pickup placement
    rng: Pcg32,
    events: Vec<GameEvent>,
    audio: A,
    recorder: R,
}

impl<A: AudioSink, R: SessionRecorder> Session<A, R> {
    /// Create a session sitting in the menu
    pub fn new(tuning: Tuning, seed: u64, audio: A, recorder: R) -> Self {
        let tuning = tuning.sanitized();
        Self {
            phase: GamePhase::Menu,
            avatar: Avatar::new(&tuning.avatar, &tuning.playfield),
            field: ObstacleField::new(&tuning, seed),
            pickups: CollectibleField::new(&tuning.pickups),
            started: false,
            currency: 0,
            elapsed: 0.0,
            sessions_played: 0,
            rng: Pcg32::seed_from_u64(seed.wrapping_add(1)),
            tuning,
            events: Vec::new(),
            audio,
            recorder,
        }
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn avatar(&self) -> &Avatar {
        &self.avatar
    }

    pub fn field(&self) -> &ObstacleField {
        &self.field
    }

    pub fn pickups(&self) -> &CollectibleField {
        &self.pickups
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn score(&self) -> u32 {
        self.field.score
    }

    pub fn level(&self) -> u32 {
        self.field.level()
    }

    /// Currency earned so far this session (points and pickups)
    pub fn currency(&self) -> u32 {
        self.currency
    }

    /// Whether the first impulse has happened
    pub fn started(&self) -> bool {
        self.started
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn sessions_played(&self) -> u32 {
        self.sessions_played
    }

    pub fn audio(&self) -> &A {
        &self.audio
    }

    pub fn audio_mut(&mut self) -> &mut A {
        &mut self.audio
    }

    pub fn recorder(&self) -> &R {
        &self.recorder
    }

    /// Advance one frame. Commands are applied in order before the simulation runs.
    pub fn step(&mut self, dt: f32, commands: &[Command]) -> SessionEvent {
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        let mut outcome = SessionEvent::Continue;
        let mut impulse = false;

        for &command in commands {
            match (self.phase, command) {
                (GamePhase::Menu, Command::Start) | (GamePhase::GameOver, Command::Restart) => {
                    self.begin();
                    outcome = SessionEvent::Started;
                }
                (GamePhase::Menu, Command::Quit) => {
                    self.flush_events();
                    return SessionEvent::Exit;
                }
                (GamePhase::Playing, Command::Impulse) => impulse = true,
                (GamePhase::Playing, Command::Pause) => {
                    self.phase = GamePhase::Paused;
                    outcome = SessionEvent::Paused;
                }
                (GamePhase::Paused, Command::Resume) => {
                    self.phase = GamePhase::Playing;
                    outcome = SessionEvent::Resumed;
                }
                (GamePhase::Playing | GamePhase::Paused, Command::Quit)
                | (GamePhase::GameOver, Command::ReturnToMenu) => {
                    if self.phase != GamePhase::GameOver {
                        log::info!("Session abandoned at score {}", self.field.score);
                    }
                    self.phase = GamePhase::Menu;
                    outcome = SessionEvent::ReturnedToMenu;
                }
                (phase, command) => log::trace!("Ignoring {command:?} in {phase:?}"),
            }
        }

        if self.phase == GamePhase::Playing {
            if let Some(summary) = self.tick(dt, impulse) {
                outcome = SessionEvent::GameOver(summary);
            }
        }

        self.flush_events();
        outcome
    }

    /// Fresh spawn state for a new session
    fn begin(&mut self) {
        self.avatar.reset();
        self.field.reset();
        self.pickups.reset();
        self.started = false;
        self.currency = 0;
        self.elapsed = 0.0;
        self.sessions_played += 1;
        self.phase = GamePhase::Playing;
        log::info!("Session {} started", self.sessions_played);
    }

    /// One frame of play; returns the summary if the avatar died
    fn tick(&mut self, dt: f32, impulse: bool) -> Option<SessionSummary> {
        self.elapsed += dt;

        if impulse {
            self.started = true;
            self.avatar.impulse(&mut self.events);
        }
        self.avatar.update(dt);

        // Field stays frozen until the first impulse
        if self.started {
            let report = self.field.update(dt, &mut self.avatar, &mut self.events);
            self.currency += report.scored * self.tuning.pickups.currency_per_point;

            if let Some(site) = report.spawned {
                if self.rng.random_bool(self.tuning.pickups.spawn_chance) {
                    self.pickups.spawn(site);
                }
            }

            // Death frame included
            self.currency += self.pickups.update(
                dt,
                self.field.speed(),
                self.avatar.pos,
                &mut self.events,
            );
        }

        if self.avatar.alive {
            None
        } else {
            Some(self.finish())
        }
    }

    /// Enter game over and hand the tallies to the recorder
    fn finish(&mut self) -> SessionSummary {
        self.events.push(GameEvent::Death);
        self.phase = GamePhase::GameOver;

        let summary = SessionSummary {
            final_score: self.field.score,
            collected_currency: self.currency,
            level: self.field.level(),
            duration_secs: self.elapsed,
        };
        log::info!(
            "Game over: score={}, currency={}, level={}, {:.1}s",
            summary.final_score,
            summary.collected_currency,
            summary.level,
            summary.duration_secs
        );

        if let Err(e) = self.recorder.record(&summary) {
            log::warn!("Failed to record session: {e:#}");
        }
        summary
    }

    /// Deliver queued notifications; failures are dropped
    fn flush_events(&mut self) {
        for event in self.events.drain(..) {
            if let Err(e) = self.audio.play(event) {
                log::debug!("Dropped {event:?} notification: {e:#}");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec2;

    use super::*;
    use crate::consts::*;

    type TestSession = Session<Vec<GameEvent>, Vec<SessionSummary>>;

    fn session() -> TestSession {
        Session::new(Tuning::default(), 12345, Vec::new(), Vec::new())
    }

    fn playing() -> TestSession {
        let mut s = session();
        assert_eq!(s.step(SIM_DT, &[Command::Start]), SessionEvent::Started);
        s
    }

    #[test]
    fn test_menu_to_playing() {
        let mut s = session();
        assert_eq!(s.phase(), GamePhase::Menu);
        assert_eq!(s.step(SIM_DT, &[]), SessionEvent::Continue);
        assert_eq!(s.phase(), GamePhase::Menu);
        assert_eq!(s.step(SIM_DT, &[Command::Start]), SessionEvent::Started);
        assert_eq!(s.phase(), GamePhase::Playing);
        assert_eq!(s.sessions_played(), 1);
    }

    #[test]
    fn test_field_frozen_until_first_impulse() {
        let mut s = playing();
        for _ in 0..30 {
            s.step(SIM_DT, &[]);
        }
        assert!(!s.started());
        assert_eq!(s.field().spawn_timer, 0.0);
        assert!(s.avatar().pos.y > AVATAR_START_Y);

        s.step(SIM_DT, &[Command::Impulse]);
        assert!(s.started());
        assert!(s.field().spawn_timer > 0.0);
        assert_eq!(s.audio().last(), Some(&GameEvent::Impulse));
    }

    #[test]
    fn test_idle_fall_ends_session_once() {
        let mut s = playing();
        let mut summary = None;
        for _ in 0..600 {
            if let SessionEvent::GameOver(sum) = s.step(SIM_DT, &[]) {
                assert!(summary.is_none());
                summary = Some(sum);
            }
        }
        let summary = summary.expect("avatar should hit the ground");
        assert_eq!(summary.final_score, 0);
        assert_eq!(summary.collected_currency, 0);
        assert_eq!(s.phase(), GamePhase::GameOver);
        assert_eq!(s.recorder().len(), 1);
        assert_eq!(s.audio().iter().filter(|e| **e == GameEvent::Death).count(), 1);
    }

    #[test]
    fn test_pause_freezes_everything() {
        let mut s = playing();
        s.step(SIM_DT, &[Command::Impulse]);
        assert_eq!(s.step(SIM_DT, &[Command::Pause]), SessionEvent::Paused);

        let pos = s.avatar().pos;
        let timer = s.field().spawn_timer;
        let elapsed = s.elapsed();
        for _ in 0..120 {
            assert_eq!(s.step(SIM_DT, &[Command::Impulse]), SessionEvent::Continue);
        }
        assert_eq!(s.avatar().pos, pos);
        assert_eq!(s.field().spawn_timer, timer);
        assert_eq!(s.elapsed(), elapsed);

        assert_eq!(s.step(SIM_DT, &[Command::Resume]), SessionEvent::Resumed);
        assert_eq!(s.phase(), GamePhase::Playing);
        assert!(s.elapsed() > elapsed);
    }

    #[test]
    fn test_quit_from_pause_skips_recording() {
        let mut s = playing();
        s.step(SIM_DT, &[Command::Pause]);
        assert_eq!(s.step(SIM_DT, &[Command::Quit]), SessionEvent::ReturnedToMenu);
        assert_eq!(s.phase(), GamePhase::Menu);
        assert!(s.recorder().is_empty());
        assert_eq!(s.step(SIM_DT, &[Command::Quit]), SessionEvent::Exit);
    }

    #[test]
    fn test_game_over_accepts_only_restart_or_menu() {
        let mut s = playing();
        while s.phase() == GamePhase::Playing {
            s.step(SIM_DT, &[]);
        }
        for command in [Command::Impulse, Command::Pause, Command::Resume, Command::Start, Command::Quit] {
            assert_eq!(s.step(SIM_DT, &[command]), SessionEvent::Continue);
            assert_eq!(s.phase(), GamePhase::GameOver);
        }
        assert_eq!(s.step(SIM_DT, &[Command::Restart]), SessionEvent::Started);
        assert!(s.avatar().alive);
        assert_eq!(s.sessions_played(), 2);
    }

    #[test]
    fn test_return_to_menu_from_game_over() {
        let mut s = playing();
        while s.phase() == GamePhase::Playing {
            s.step(SIM_DT, &[]);
        }
        assert_eq!(s.step(SIM_DT, &[Command::ReturnToMenu]), SessionEvent::ReturnedToMenu);
        assert_eq!(s.phase(), GamePhase::Menu);
        assert_eq!(s.recorder().len(), 1);
    }

    #[test]
    fn test_restart_resets_to_spawn_defaults() {
        let mut s = playing();
        s.step(SIM_DT, &[Command::Impulse]);
        s.field.score = 17;
        s.currency = 9;
        while s.phase() == GamePhase::Playing {
            s.step(SIM_DT, &[]);
        }
        assert_eq!(s.recorder()[0].final_score, 17);

        s.step(0.0, &[Command::Restart]);
        assert_eq!(s.score(), 0);
        assert_eq!(s.currency(), 0);
        assert_eq!(s.level(), 1);
        assert_eq!(s.elapsed(), 0.0);
        assert!(!s.started());
        assert!(s.field().obstacles.is_empty());
        assert!(s.pickups().pickups.is_empty());
        assert_eq!(s.avatar().pos.y, AVATAR_START_Y);
        assert_eq!(s.avatar().vel_y, 0.0);
    }

    struct BrokenAudio;

    impl AudioSink for BrokenAudio {
        fn play(&mut self, _event: GameEvent) -> anyhow::Result<()> {
            anyhow::bail!("no device")
        }
    }

    struct BrokenDisk;

    impl SessionRecorder for BrokenDisk {
        fn record(&mut self, _summary: &SessionSummary) -> anyhow::Result<()> {
            anyhow::bail!("disk full")
        }
    }

    #[test]
    fn test_collaborator_failures_do_not_affect_play() {
        let mut broken = Session::new(Tuning::default(), 5, BrokenAudio, BrokenDisk);
        let mut healthy = Session::new(Tuning::default(), 5, Vec::new(), Vec::new());
        let script = [Command::Start, Command::Impulse];
        broken.step(SIM_DT, &script);
        healthy.step(SIM_DT, &script);

        for frame in 0..900 {
            let commands: &[Command] = if frame % 22 == 0 { &[Command::Impulse] } else { &[] };
            let a = broken.step(SIM_DT, commands);
            let b = healthy.step(SIM_DT, commands);
            assert_eq!(a, b);
            assert_eq!(broken.avatar().pos, healthy.avatar().pos);
            assert_eq!(broken.score(), healthy.score());
        }
    }

    #[test]
    fn test_pickup_touched_on_death_frame_counts() {
        let mut s = playing();
        s.step(SIM_DT, &[Command::Impulse]);
        let ground = s.tuning().playfield.ground_y();
        s.avatar.pos.y = ground - 1.0;
        s.avatar.vel_y = 600.0;
        s.pickups.spawn(Vec2::new(AVATAR_X, ground));

        let summary = match s.step(SIM_DT, &[]) {
            SessionEvent::GameOver(summary) => summary,
            other => panic!("expected game over, got {other:?}"),
        };
        assert_eq!(summary.collected_currency, 1);
        assert_eq!(s.pickups().collected_count, 1);
        assert!(s.pickups().pickups.is_empty());
        assert_eq!(s.recorder()[0].collected_currency, 1);
    }

    #[test]
    fn test_bad_dt_is_ignored() {
        let mut s = playing();
        let pos = s.avatar().pos;
        s.step(f32::NAN, &[]);
        s.step(-1.0, &[]);
        assert_eq!(s.avatar().pos, pos);
    }
}
