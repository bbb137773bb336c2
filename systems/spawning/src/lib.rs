#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic spawn direction for Astro Siege.
//!
//! The [`SpawnDirector`] is a pure system: it consumes the event stream plus
//! immutable world views and emits spawn commands. It owns every scheduling
//! decision the world itself stays ignorant of: wave cadence and sizing,
//! timed saucer arrivals, and brute escalation at kill milestones. All
//! randomness flows from labeled streams derived from a single seed, so two
//! directors built from the same configuration emit identical command
//! sequences for identical inputs.

use std::f32::consts::TAU;
use std::time::Duration;

use astro_siege_core::{
    ArenaBounds, Command, Event, HostileCensus, SessionState, SizeTier, SpawnArchetype,
    SpawnDescriptor,
};
use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use sha2::{Digest, Sha256};

const RNG_STREAM_WAVE: &str = "wave-layout";
const RNG_STREAM_SAUCER: &str = "saucer-cadence";
const RNG_STREAM_ESCALATION: &str = "escalation";

/// Attempts made to place a hostile outside the player's safe radius before
/// the last sample is accepted as-is.
const SAFE_PLACEMENT_ATTEMPTS: u32 = 10;

/// Chance that a timed saucer pursues the player instead of drifting.
const AGGRESSIVE_SAUCER_CHANCE: f64 = 0.5;

/// Wave sizing and placement parameters.
#[derive(Clone, Copy, Debug)]
pub struct WaveConfig {
    base_count: u32,
    delay: Duration,
    safe_distance: f32,
    speed_min: f32,
    speed_max: f32,
}

impl WaveConfig {
    /// Creates a wave configuration.
    #[must_use]
    pub const fn new(
        base_count: u32,
        delay: Duration,
        safe_distance: f32,
        speed_min: f32,
        speed_max: f32,
    ) -> Self {
        Self {
            base_count,
            delay,
            safe_distance,
            speed_min,
            speed_max,
        }
    }
}

impl Default for WaveConfig {
    fn default() -> Self {
        Self {
            base_count: 3,
            delay: Duration::from_secs(2),
            safe_distance: 150.0,
            speed_min: 40.0,
            speed_max: 120.0,
        }
    }
}

/// Configuration parameters required to construct the spawn director.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    wave: WaveConfig,
    saucer_interval: Duration,
    saucer_speed: f32,
    boss_kill_step: u32,
    seed: u64,
}

impl Config {
    /// Creates a new configuration from explicit scheduling parameters.
    #[must_use]
    pub const fn new(
        wave: WaveConfig,
        saucer_interval: Duration,
        saucer_speed: f32,
        boss_kill_step: u32,
        seed: u64,
    ) -> Self {
        Self {
            wave,
            saucer_interval,
            saucer_speed,
            boss_kill_step,
            seed,
        }
    }

    /// Default cadence with the provided seed.
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self::new(
            WaveConfig::default(),
            Duration::from_secs(15),
            120.0,
            25,
            seed,
        )
    }
}

/// Pure system that deterministically schedules every hostile arrival.
#[derive(Debug)]
pub struct SpawnDirector {
    config: Config,
    wave_rng: ChaCha8Rng,
    saucer_rng: ChaCha8Rng,
    escalation_rng: ChaCha8Rng,
    wave_accumulator: Duration,
    saucer_accumulator: Duration,
    wave_pending: bool,
    brutes_dispatched: u32,
}

impl SpawnDirector {
    /// Creates a new director using the supplied configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            config,
            wave_rng: stream_rng(config.seed, RNG_STREAM_WAVE),
            saucer_rng: stream_rng(config.seed, RNG_STREAM_SAUCER),
            escalation_rng: stream_rng(config.seed, RNG_STREAM_ESCALATION),
            wave_accumulator: Duration::ZERO,
            saucer_accumulator: Duration::ZERO,
            wave_pending: false,
            brutes_dispatched: 0,
        }
    }

    /// Consumes events and immutable views to emit spawn commands.
    ///
    /// `wave` is the number of waves the world has already started; the
    /// batch emitted here sizes the one that comes next.
    #[allow(clippy::too_many_arguments)]
    pub fn handle(
        &mut self,
        events: &[Event],
        session: SessionState,
        census: HostileCensus,
        wave: u32,
        player: Option<Vec2>,
        arena: ArenaBounds,
        out: &mut Vec<Command>,
    ) {
        for event in events {
            match event {
                Event::SessionChanged {
                    state: SessionState::Start,
                } => self.reset(),
                Event::WaveStarted { .. } => {
                    self.wave_pending = false;
                    self.wave_accumulator = Duration::ZERO;
                }
                _ => {}
            }
        }

        if session != SessionState::Playing {
            self.wave_accumulator = Duration::ZERO;
            self.saucer_accumulator = Duration::ZERO;
            return;
        }

        let mut accumulated = Duration::ZERO;
        for event in events {
            if let Event::TimeAdvanced { dt } = event {
                accumulated = accumulated.saturating_add(*dt);
            }
        }

        self.schedule_wave(accumulated, census, wave, player, arena, out);
        self.schedule_saucers(accumulated, player, arena, out);
        self.schedule_brutes(events, player, arena, out);
    }

    fn reset(&mut self) {
        *self = Self::new(self.config);
    }

    fn schedule_wave(
        &mut self,
        accumulated: Duration,
        census: HostileCensus,
        wave: u32,
        player: Option<Vec2>,
        arena: ArenaBounds,
        out: &mut Vec<Command>,
    ) {
        if census.asteroids > 0 {
            self.wave_pending = false;
            self.wave_accumulator = Duration::ZERO;
            return;
        }
        if self.wave_pending {
            return;
        }

        self.wave_accumulator = self.wave_accumulator.saturating_add(accumulated);
        if self.wave_accumulator < self.config.wave.delay {
            return;
        }

        let count = self.config.wave.base_count + wave + 1;
        let descriptors = (0..count)
            .map(|_| self.asteroid_descriptor(player, arena))
            .collect();
        out.push(Command::StartWave { descriptors });
        self.wave_pending = true;
    }

    fn schedule_saucers(
        &mut self,
        accumulated: Duration,
        player: Option<Vec2>,
        arena: ArenaBounds,
        out: &mut Vec<Command>,
    ) {
        if self.config.saucer_interval.is_zero() || accumulated.is_zero() {
            return;
        }

        self.saucer_accumulator = self.saucer_accumulator.saturating_add(accumulated);
        while self.saucer_accumulator >= self.config.saucer_interval {
            self.saucer_accumulator -= self.config.saucer_interval;
            let descriptor = self.saucer_descriptor(player, arena);
            out.push(Command::Spawn { descriptor });
        }
    }

    fn schedule_brutes(
        &mut self,
        events: &[Event],
        player: Option<Vec2>,
        arena: ArenaBounds,
        out: &mut Vec<Command>,
    ) {
        if self.config.boss_kill_step == 0 {
            return;
        }

        let mut latest_kills = None;
        for event in events {
            if let Event::HostileDestroyed { kills, .. } = event {
                latest_kills = Some(*kills);
            }
        }
        let Some(kills) = latest_kills else {
            return;
        };

        let safe_squared = self.config.wave.safe_distance * self.config.wave.safe_distance;
        while kills / self.config.boss_kill_step > self.brutes_dispatched {
            self.brutes_dispatched += 1;
            let position =
                safe_edge_position(&mut self.escalation_rng, safe_squared, player, arena);
            out.push(Command::Spawn {
                descriptor: SpawnDescriptor::new(position, Vec2::ZERO, SpawnArchetype::Brute),
            });
        }
    }

    fn asteroid_descriptor(&mut self, player: Option<Vec2>, arena: ArenaBounds) -> SpawnDescriptor {
        let safe_squared = self.config.wave.safe_distance * self.config.wave.safe_distance;
        let position = safe_edge_position(&mut self.wave_rng, safe_squared, player, arena);
        let angle = self.wave_rng.gen_range(0.0..TAU);
        let speed = self
            .wave_rng
            .gen_range(self.config.wave.speed_min..=self.config.wave.speed_max);
        SpawnDescriptor::new(
            position,
            Vec2::from_angle(angle) * speed,
            SpawnArchetype::Asteroid {
                tier: SizeTier::Large,
            },
        )
    }

    fn saucer_descriptor(&mut self, player: Option<Vec2>, arena: ArenaBounds) -> SpawnDescriptor {
        let from_left = self.saucer_rng.gen_bool(0.5);
        let aggressive = self.saucer_rng.gen_bool(AGGRESSIVE_SAUCER_CHANCE);
        let mut y = self.saucer_rng.gen_range(0.0..arena.height());
        if let Some(player) = player {
            let mut attempts = 0;
            while (y - player.y).abs() < self.config.wave.safe_distance
                && attempts < SAFE_PLACEMENT_ATTEMPTS
            {
                y = self.saucer_rng.gen_range(0.0..arena.height());
                attempts += 1;
            }
        }
        let (x, direction) = if from_left {
            (0.0, Vec2::X)
        } else {
            (arena.width(), -Vec2::X)
        };
        SpawnDescriptor::new(
            Vec2::new(x, y),
            direction * self.config.saucer_speed,
            SpawnArchetype::Saucer { aggressive },
        )
    }
}

fn safe_edge_position(
    rng: &mut ChaCha8Rng,
    safe_squared: f32,
    player: Option<Vec2>,
    arena: ArenaBounds,
) -> Vec2 {
    let mut position = sample_edge(rng, arena);
    if let Some(player) = player {
        let mut attempts = 0;
        while position.distance_squared(player) < safe_squared && attempts < SAFE_PLACEMENT_ATTEMPTS
        {
            position = sample_edge(rng, arena);
            attempts += 1;
        }
    }
    position
}

fn sample_edge(rng: &mut ChaCha8Rng, arena: ArenaBounds) -> Vec2 {
    match rng.gen_range(0u8..4) {
        0 => Vec2::new(rng.gen_range(0.0..arena.width()), 0.0),
        1 => Vec2::new(rng.gen_range(0.0..arena.width()), arena.height()),
        2 => Vec2::new(0.0, rng.gen_range(0.0..arena.height())),
        _ => Vec2::new(arena.width(), rng.gen_range(0.0..arena.height())),
    }
}

fn stream_rng(seed: u64, label: &str) -> ChaCha8Rng {
    let mut hasher = Sha256::new();
    hasher.update(seed.to_le_bytes());
    hasher.update(label.as_bytes());
    let digest = hasher.finalize();
    let mut stream_seed = [0u8; 32];
    stream_seed.copy_from_slice(&digest);
    ChaCha8Rng::from_seed(stream_seed)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn arena() -> ArenaBounds {
        ArenaBounds::new(1600.0, 1200.0)
    }

    fn director() -> SpawnDirector {
        SpawnDirector::new(Config::with_seed(7))
    }

    fn tick_events(dt: Duration) -> Vec<Event> {
        vec![Event::TimeAdvanced { dt }]
    }

    fn empty_census() -> HostileCensus {
        HostileCensus::default()
    }

    fn wave_count(commands: &[Command]) -> Option<usize> {
        commands.iter().find_map(|command| match command {
            Command::StartWave { descriptors } => Some(descriptors.len()),
            _ => None,
        })
    }

    #[test]
    fn first_wave_has_base_plus_one_hostiles() {
        let mut director = director();
        let mut out = Vec::new();
        director.handle(
            &tick_events(Duration::from_secs(3)),
            SessionState::Playing,
            empty_census(),
            0,
            None,
            arena(),
            &mut out,
        );
        assert_eq!(wave_count(&out), Some(4));
    }

    #[test]
    fn later_waves_grow_by_one() {
        let mut director = director();
        let mut out = Vec::new();
        director.handle(
            &tick_events(Duration::from_secs(3)),
            SessionState::Playing,
            empty_census(),
            4,
            None,
            arena(),
            &mut out,
        );
        assert_eq!(wave_count(&out), Some(8));
    }

    #[test]
    fn wave_waits_for_field_to_clear() {
        let mut director = director();
        let mut out = Vec::new();
        let census = HostileCensus {
            asteroids: 2,
            ..HostileCensus::default()
        };
        director.handle(
            &tick_events(Duration::from_secs(30)),
            SessionState::Playing,
            census,
            1,
            None,
            arena(),
            &mut out,
        );
        assert_eq!(wave_count(&out), None);
    }

    #[test]
    fn wave_is_not_reissued_before_world_confirms() {
        let mut director = director();
        let mut out = Vec::new();
        director.handle(
            &tick_events(Duration::from_secs(3)),
            SessionState::Playing,
            empty_census(),
            0,
            None,
            arena(),
            &mut out,
        );
        assert!(wave_count(&out).is_some());

        out.clear();
        director.handle(
            &tick_events(Duration::from_secs(3)),
            SessionState::Playing,
            empty_census(),
            0,
            None,
            arena(),
            &mut out,
        );
        assert_eq!(wave_count(&out), None, "pending wave suppresses a rerun");

        director.handle(
            &[Event::WaveStarted {
                wave: 1,
                hostiles: 4,
            }],
            SessionState::Playing,
            HostileCensus {
                asteroids: 4,
                ..HostileCensus::default()
            },
            1,
            None,
            arena(),
            &mut out,
        );
        assert_eq!(wave_count(&out), None);
    }

    #[test]
    fn wave_hostiles_respect_safe_distance() {
        let player = Vec2::new(800.0, 600.0);
        let mut director = director();
        let mut out = Vec::new();
        director.handle(
            &tick_events(Duration::from_secs(3)),
            SessionState::Playing,
            empty_census(),
            0,
            Some(player),
            arena(),
            &mut out,
        );

        for command in &out {
            if let Command::StartWave { descriptors } = command {
                for descriptor in descriptors {
                    assert!(
                        descriptor.position().distance(player) >= 150.0,
                        "hostile placed inside the safe radius"
                    );
                }
            }
        }
    }

    #[test]
    fn saucers_arrive_on_cadence() {
        let mut director = director();
        let mut out = Vec::new();
        let census = HostileCensus {
            asteroids: 1,
            ..HostileCensus::default()
        };
        director.handle(
            &tick_events(Duration::from_secs(31)),
            SessionState::Playing,
            census,
            1,
            None,
            arena(),
            &mut out,
        );

        let saucers = out
            .iter()
            .filter(|command| {
                matches!(
                    command,
                    Command::Spawn { descriptor }
                        if matches!(descriptor.archetype(), SpawnArchetype::Saucer { .. })
                )
            })
            .count();
        assert_eq!(saucers, 2, "two intervals elapsed");
    }

    #[test]
    fn brute_dispatched_at_each_kill_milestone() {
        let mut director = director();
        let mut out = Vec::new();
        let census = HostileCensus {
            asteroids: 1,
            ..HostileCensus::default()
        };
        let kill_event = |kills| Event::HostileDestroyed {
            id: astro_siege_core::EntityId::new(9),
            kind: astro_siege_core::HostileKind::Asteroid {
                tier: SizeTier::Small,
            },
            kills,
        };

        director.handle(
            &[kill_event(24)],
            SessionState::Playing,
            census,
            1,
            None,
            arena(),
            &mut out,
        );
        assert!(out.is_empty(), "no brute below the milestone");

        director.handle(
            &[kill_event(25)],
            SessionState::Playing,
            census,
            1,
            None,
            arena(),
            &mut out,
        );
        let brutes = out
            .iter()
            .filter(|command| {
                matches!(
                    command,
                    Command::Spawn { descriptor }
                        if descriptor.archetype() == SpawnArchetype::Brute
                )
            })
            .count();
        assert_eq!(brutes, 1);

        out.clear();
        director.handle(
            &[kill_event(50)],
            SessionState::Playing,
            census,
            1,
            None,
            arena(),
            &mut out,
        );
        let brutes = out
            .iter()
            .filter(|command| {
                matches!(
                    command,
                    Command::Spawn { descriptor }
                        if descriptor.archetype() == SpawnArchetype::Brute
                )
            })
            .count();
        assert_eq!(brutes, 1, "milestones repeat every step");
    }

    #[test]
    fn session_reset_restores_initial_schedule() {
        let mut director = director();
        let mut out = Vec::new();
        director.handle(
            &tick_events(Duration::from_secs(3)),
            SessionState::Playing,
            empty_census(),
            0,
            None,
            arena(),
            &mut out,
        );
        let first = out.clone();

        out.clear();
        director.handle(
            &[Event::SessionChanged {
                state: SessionState::Start,
            }],
            SessionState::Start,
            empty_census(),
            0,
            None,
            arena(),
            &mut out,
        );
        assert!(out.is_empty());

        director.handle(
            &tick_events(Duration::from_secs(3)),
            SessionState::Playing,
            empty_census(),
            0,
            None,
            arena(),
            &mut out,
        );
        assert_eq!(out, first, "reset replays the same schedule");
    }

    #[test]
    fn nothing_is_scheduled_outside_play() {
        let mut director = director();
        let mut out = Vec::new();
        director.handle(
            &tick_events(Duration::from_secs(60)),
            SessionState::GameOver,
            empty_census(),
            3,
            None,
            arena(),
            &mut out,
        );
        assert!(out.is_empty());
    }
}
