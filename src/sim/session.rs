//! Game loop orchestration
//!
//! A [`Session`] owns every piece of mutable game state and drives it from
//! timers on a virtual millisecond clock: saber damping, saber tilt decay,
//! the collision tick and the spawn chain. The shell feeds it pointer
//! samples, arena size, difficulty and phase, calls [`Session::advance`]
//! every frame, and reads back what to draw.
//!
//! All callbacks run to completion one at a time. Signal changes are queued
//! and handled between callbacks.

use std::collections::{BTreeSet, VecDeque};

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::damage::{Damage, DamageOutcome};
use super::polygon::HitPolygon;
use super::saber::{PointerSample, Saber};
use super::signal::{Control, ControlQueue, Signal};
use super::spawn::{SpawnPlan, first_delay, next_delay};
use super::state::{ArenaBounds, BodyPart, GameEvent, GamePhase, Projectile, ProjectileId};
use super::tick::{RenderRegistry, TickInput, tick};
use super::timer::{Interval, TimerKind, Timeout};
use crate::settings::Difficulty;
use crate::tuning::{Tuning, TuningError};

/// One player's game, from difficulty selection through game over and back
pub struct Session {
    tuning: Tuning,
    seed: u64,
    rng: Pcg32,
    now_ms: u64,

    phase: Signal<GamePhase>,
    difficulty: Signal<Difficulty>,
    controls: ControlQueue,

    bounds: ArenaBounds,
    saber: Saber,
    pointer: VecDeque<PointerSample>,
    shots: Vec<Projectile>,
    score: u64,
    damage: Damage,
    /// Pixels per collision tick for the current tier
    shot_speed: f32,

    damping_timer: Interval,
    decay_timer: Interval,
    tick_timer: Option<Interval>,
    spawn_timer: Option<Timeout>,

    registry: Option<Box<dyn RenderRegistry>>,
    events: Vec<GameEvent>,
    next_id: u32,
}

impl Session {
    pub fn new(seed: u64) -> Self {
        Self::build(seed, Tuning::default())
    }

    /// Session with custom balance. Rejects tuning that fails validation.
    pub fn with_tuning(seed: u64, tuning: Tuning) -> Result<Self, TuningError> {
        tuning.validate()?;
        Ok(Self::build(seed, tuning))
    }

    fn build(seed: u64, tuning: Tuning) -> Self {
        let difficulty = Difficulty::default();
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            now_ms: 0,
            phase: Signal::new(GamePhase::Selecting),
            difficulty: Signal::new(difficulty),
            controls: ControlQueue::new(),
            bounds: ArenaBounds::default(),
            saber: Saber::default(),
            pointer: VecDeque::new(),
            shots: Vec::new(),
            score: 0,
            damage: Damage::new(tuning.damage_policy),
            shot_speed: difficulty.shot_speed(),
            damping_timer: Interval::starting_at(0, tuning.saber_damping_ms),
            decay_timer: Interval::starting_at(0, tuning.saber_decay_ms),
            tick_timer: None,
            spawn_timer: None,
            registry: None,
            events: Vec::new(),
            next_id: 1,
            tuning,
        }
    }

    // === Inputs from the shell ===

    /// Request a phase change (Playing or Selecting from the shell)
    pub fn set_phase(&mut self, phase: GamePhase) {
        if self.phase.set(phase) {
            self.controls.push(Control::Phase(phase));
        }
    }

    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        if self.difficulty.set(difficulty) {
            self.controls.push(Control::Difficulty(difficulty));
        }
    }

    /// Play surface measured or resized
    pub fn set_arena_bounds(&mut self, width: f32, height: f32) {
        let bounds = ArenaBounds::new(width, height);
        if bounds != self.bounds {
            log::debug!("Arena bounds: {}x{}", width, height);
            self.bounds = bounds;
        }
    }

    /// Raw pointer position; applied on the next damping tick
    pub fn push_pointer(&mut self, x: f32, y: f32) {
        self.pointer.push_back(PointerSample {
            pos: Vec2::new(x, y),
            at_ms: self.now_ms,
        });
    }

    pub fn attach_registry(&mut self, registry: Box<dyn RenderRegistry>) {
        self.registry = Some(registry);
    }

    /// Put the saber somewhere immediately, upright and at rest
    pub fn place_saber(&mut self, x: f32, y: f32) {
        self.pointer.clear();
        self.saber.place_at(Vec2::new(x, y));
    }

    /// Add a shot along a planned path right now
    pub fn spawn_shot(&mut self, plan: SpawnPlan) -> ProjectileId {
        let id = ProjectileId(self.next_id);
        self.next_id += 1;
        self.shots.push(plan.into_projectile(id));
        self.events.push(GameEvent::Spawned { id });
        id
    }

    /// Credit a specific body zone as if a shot had struck it
    pub fn strike(&mut self, zone: BodyPart) {
        let outcome = self.damage.apply_hit(zone);
        self.handle_damage(outcome);
    }

    // === Clock ===

    /// Run every timer that comes due in the next `elapsed_ms`
    pub fn advance(&mut self, elapsed_ms: u64) {
        self.pump();
        let until = self.now_ms + elapsed_ms;
        while let Some((due, kind)) = self.next_due(until) {
            self.now_ms = due;
            self.fire(kind);
            self.pump();
        }
        self.now_ms = until;
    }

    /// Handle queued signal changes in arrival order
    pub fn pump(&mut self) {
        while let Some(control) = self.controls.pop() {
            match control {
                Control::Phase(phase) => self.on_phase(phase),
                Control::Difficulty(difficulty) => self.on_difficulty(difficulty),
            }
        }
    }

    fn next_due(&self, until: u64) -> Option<(u64, TimerKind)> {
        [
            Some((self.damping_timer.due_ms(), TimerKind::SaberDamping)),
            Some((self.decay_timer.due_ms(), TimerKind::SaberDecay)),
            self.tick_timer.map(|t| (t.due_ms(), TimerKind::Collision)),
            self.spawn_timer.map(|t| (t.due_ms(), TimerKind::Spawn)),
        ]
        .into_iter()
        .flatten()
        .filter(|(due, _)| *due <= until)
        .min()
    }

    fn fire(&mut self, kind: TimerKind) {
        match kind {
            TimerKind::SaberDamping => {
                self.damping_timer.rearm();
                self.on_damping_tick();
            }
            TimerKind::SaberDecay => {
                self.decay_timer.rearm();
                self.saber.decay_tilt(self.now_ms, &self.tuning);
            }
            TimerKind::Collision => {
                if let Some(timer) = self.tick_timer.as_mut() {
                    timer.rearm();
                }
                self.on_collision_tick();
            }
            TimerKind::Spawn => {
                self.spawn_timer = None;
                self.on_spawn();
            }
        }
    }

    // === Handlers ===

    fn on_phase(&mut self, phase: GamePhase) {
        log::info!("Phase changed to {:?}", phase);
        match phase {
            GamePhase::Playing => {
                self.reset();
                self.start();
            }
            GamePhase::Selecting | GamePhase::GameOver => self.stop(),
        }
        self.events.push(GameEvent::PhaseChanged { phase });
    }

    fn on_difficulty(&mut self, difficulty: Difficulty) {
        self.shot_speed = difficulty.shot_speed();
        log::info!(
            "Difficulty {}: shot speed {}, spawn window {:?} ms",
            difficulty,
            self.shot_speed,
            difficulty.spawn_window_ms()
        );
    }

    fn on_damping_tick(&mut self) {
        while let Some(sample) = self.pointer.pop_front() {
            self.saber.apply_sample(sample, &self.tuning);
        }
        self.saber.damp(self.tuning.damping);
    }

    fn on_collision_tick(&mut self) {
        let blade = self.saber.hit_polygon(&self.tuning);
        let input = TickInput {
            bounds: self.bounds,
            speed: self.shot_speed,
            blade,
            tilt_radians: self.saber.tilt_radians(),
            registry: self.registry.as_deref(),
        };
        let report = tick(&mut self.shots, &input, &self.tuning);

        for id in report.deflected {
            self.score += 1;
            self.events.push(GameEvent::Deflected {
                id,
                score: self.score,
            });
        }
        for id in report.missed {
            self.events.push(GameEvent::Missed { id });
            let outcome = self.damage.register_miss(&mut self.rng);
            self.handle_damage(outcome);
        }
    }

    fn on_spawn(&mut self) {
        if self.damage.is_game_over() || self.phase.get() != GamePhase::Playing {
            return;
        }

        match SpawnPlan::random(self.bounds, self.tuning.shot_width, &mut self.rng) {
            Some(plan) => {
                self.spawn_shot(plan);
            }
            None => log::debug!("Arena bounds unknown, deferring spawn"),
        }

        let delay = next_delay(self.difficulty.get(), &mut self.rng);
        self.spawn_timer = Some(Timeout::after(self.now_ms, delay));
    }

    fn handle_damage(&mut self, outcome: DamageOutcome) {
        match outcome {
            DamageOutcome::Wounded(zone) => self.events.push(GameEvent::ZoneHit { zone }),
            DamageOutcome::Fatal(zone) => {
                self.events.push(GameEvent::ZoneHit { zone });
                self.events.push(GameEvent::GameOver { zone });
                self.stop();
                self.set_phase(GamePhase::GameOver);
            }
            DamageOutcome::Repeat(_) | DamageOutcome::AlreadyOver | DamageOutcome::Dropped => {}
        }
    }

    // === Lifecycle ===

    fn reset(&mut self) {
        self.stop();
        self.shots.clear();
        self.score = 0;
        self.damage.set_policy(self.tuning.damage_policy);
        self.damage.reset();
        log::info!("Game has been reset");
    }

    fn start(&mut self) {
        if !self.bounds.is_known() {
            log::warn!("Starting before the arena was measured; ticks defer until it is");
        }
        let tier = self.difficulty.get();
        self.tick_timer = Some(Interval::starting_at(self.now_ms, self.tuning.tick_ms));
        self.spawn_timer = Some(Timeout::after(self.now_ms, first_delay(tier)));
        log::info!("Game started on {} (seed {})", tier, self.seed);
    }

    /// Cancel the collision tick and any pending spawn. Safe to repeat.
    fn stop(&mut self) {
        let had_tick = self.tick_timer.take().is_some();
        let had_spawn = self.spawn_timer.take().is_some();
        if had_tick || had_spawn {
            log::debug!("Game mechanics stopped");
        }
    }

    // === Read-only views for the shell ===

    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn phase(&self) -> GamePhase {
        self.phase.get()
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty.get()
    }

    pub fn shot_speed(&self) -> f32 {
        self.shot_speed
    }

    pub fn bounds(&self) -> ArenaBounds {
        self.bounds
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn hit_zones(&self) -> &BTreeSet<BodyPart> {
        self.damage.hit_zones()
    }

    pub fn is_game_over(&self) -> bool {
        self.damage.is_game_over()
    }

    pub fn killing_blow(&self) -> Option<BodyPart> {
        self.damage.killing_blow()
    }

    pub fn saber(&self) -> &Saber {
        &self.saber
    }

    pub fn hit_polygon(&self) -> HitPolygon {
        self.saber.hit_polygon(&self.tuning)
    }

    pub fn projectiles(&self) -> &[Projectile] {
        &self.shots
    }

    /// Collision tick is running
    pub fn is_running(&self) -> bool {
        self.tick_timer.is_some()
    }

    pub fn spawn_pending(&self) -> bool {
        self.spawn_timer.is_some()
    }

    /// Take all events raised since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
