#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for Astro Siege.
//!
//! The [`World`] exclusively owns every entity collection and all session
//! counters. State changes flow through [`apply`], which executes a
//! [`Command`] and broadcasts the resulting [`Event`] values; read access
//! flows through the snapshot functions in [`query`]. No wall clock is ever
//! consulted: simulated time is exclusively the `dt` carried by tick
//! commands, so identical command sequences replay identically.

use std::f32::consts::{FRAC_PI_2, TAU};
use std::time::Duration;

use astro_siege_core::{
    ArenaBounds, AudioCue, Command, EntityId, EntityKind, Event, HostileKind, InputFrame,
    PickupKind, ProjectileOwner, SessionState, SizeTier, SpawnArchetype, SpawnDescriptor,
    WorldTuning,
};
use glam::Vec2;

const WORLD_SEED: u64 = 0x51ab_7c2d_93e4_f015;

const DEFAULT_ARENA_WIDTH: f32 = 1600.0;
const DEFAULT_ARENA_HEIGHT: f32 = 1200.0;

/// Facing assigned to the ship before any movement input arrives.
const INITIAL_FACING: f32 = -FRAC_PI_2;

/// Floor applied to the parent speed when computing split-child velocity.
const MIN_SPLIT_SPEED: f32 = 40.0;

#[derive(Clone, Debug)]
struct PlayerState {
    id: EntityId,
    position: Vec2,
    velocity: Vec2,
    facing: f32,
    hp: i32,
    max_hp: i32,
    lives: i32,
    invulnerability: Duration,
    fire_cooldown: Duration,
    ammo: Option<u32>,
    damage_multiplier: i32,
}

#[derive(Clone, Debug)]
struct HostileState {
    id: EntityId,
    kind: HostileKind,
    position: Vec2,
    velocity: Vec2,
    hp: i32,
    fire_cooldown: Duration,
}

#[derive(Clone, Debug)]
struct ProjectileState {
    id: EntityId,
    owner: ProjectileOwner,
    position: Vec2,
    velocity: Vec2,
    damage: i32,
    traveled: f32,
    max_range: f32,
}

#[derive(Clone, Debug)]
struct PickupState {
    id: EntityId,
    kind: PickupKind,
    position: Vec2,
}

/// Represents the authoritative Astro Siege world state.
#[derive(Debug)]
pub struct World {
    tuning: WorldTuning,
    arena: ArenaBounds,
    session: SessionState,
    score: u32,
    wave: u32,
    kills: u32,
    elapsed: Duration,
    next_id: u32,
    rng_seed: u64,
    rng_state: u64,
    player: Option<PlayerState>,
    hostiles: Vec<HostileState>,
    projectiles: Vec<ProjectileState>,
    pickups: Vec<PickupState>,
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

impl World {
    /// Creates a new world with default tuning, arena, and seed.
    #[must_use]
    pub fn new() -> Self {
        Self::with_tuning(
            WorldTuning::default(),
            ArenaBounds::new(DEFAULT_ARENA_WIDTH, DEFAULT_ARENA_HEIGHT),
            WORLD_SEED,
        )
    }

    /// Creates a new world from explicitly assembled configuration.
    #[must_use]
    pub fn with_tuning(tuning: WorldTuning, arena: ArenaBounds, seed: u64) -> Self {
        Self {
            tuning,
            arena,
            session: SessionState::Start,
            score: 0,
            wave: 0,
            kills: 0,
            elapsed: Duration::ZERO,
            next_id: 0,
            rng_seed: seed,
            rng_state: seed,
            player: None,
            hostiles: Vec::new(),
            projectiles: Vec::new(),
            pickups: Vec::new(),
        }
    }

    fn reset(&mut self) {
        self.score = 0;
        self.wave = 0;
        self.kills = 0;
        self.elapsed = Duration::ZERO;
        self.next_id = 0;
        self.rng_state = self.rng_seed;
        self.player = None;
        self.hostiles.clear();
        self.projectiles.clear();
        self.pickups.clear();
    }

    fn allocate_id(&mut self) -> EntityId {
        let id = EntityId::new(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        id
    }

    fn advance_rng(&mut self) -> u64 {
        self.rng_state = next_random(self.rng_state);
        self.rng_state
    }

    fn rng_unit(&mut self) -> f64 {
        const SCALE: f64 = 1.0 / ((1u64 << 53) as f64);
        (self.advance_rng() >> 11) as f64 * SCALE
    }

    fn spawn_player(&mut self) -> EntityId {
        let tuning = self.tuning.player;
        let id = self.allocate_id();
        self.player = Some(PlayerState {
            id,
            position: self.arena.center(),
            velocity: Vec2::ZERO,
            facing: INITIAL_FACING,
            hp: tuning.max_hp,
            max_hp: tuning.max_hp,
            lives: tuning.lives,
            invulnerability: tuning.hit_invulnerability,
            fire_cooldown: Duration::ZERO,
            ammo: tuning.ammo,
            damage_multiplier: 1,
        });
        id
    }

    fn insert_descriptor(&mut self, descriptor: SpawnDescriptor) -> (EntityId, HostileKind) {
        let (kind, hp) = match descriptor.archetype() {
            SpawnArchetype::Asteroid { tier } => {
                (HostileKind::Asteroid { tier }, self.tuning.asteroid.hp)
            }
            SpawnArchetype::Saucer { aggressive } => {
                (HostileKind::Saucer { aggressive }, self.tuning.saucer.hp)
            }
            SpawnArchetype::Brute => (HostileKind::Brute, self.tuning.brute.hp),
        };
        let id = self.allocate_id();
        self.hostiles.push(HostileState {
            id,
            kind,
            position: self.arena.wrap(descriptor.position()),
            velocity: descriptor.velocity(),
            hp,
            fire_cooldown: self.tuning.saucer.fire_interval,
        });
        (id, kind)
    }

    fn live_ship_projectiles(&self) -> u32 {
        self.projectiles
            .iter()
            .filter(|projectile| projectile.owner.is_ship())
            .count() as u32
    }

    fn hostile_index(&self, id: EntityId) -> Option<usize> {
        self.hostiles.iter().position(|hostile| hostile.id == id)
    }

    fn projectile_index(&self, id: EntityId) -> Option<usize> {
        self.projectiles
            .iter()
            .position(|projectile| projectile.id == id)
    }

    fn advance_timers(&mut self, dt: Duration) {
        if let Some(player) = self.player.as_mut() {
            player.invulnerability = player.invulnerability.saturating_sub(dt);
            player.fire_cooldown = player.fire_cooldown.saturating_sub(dt);
        }
        for hostile in &mut self.hostiles {
            if matches!(hostile.kind, HostileKind::Saucer { .. }) {
                hostile.fire_cooldown = hostile.fire_cooldown.saturating_sub(dt);
            }
        }
    }

    fn integrate(&mut self, dt: Duration, input: &InputFrame) {
        let dt_secs = dt.as_secs_f32();
        let player_position = self.player.as_ref().map(|player| player.position);

        if let Some(player) = self.player.as_mut() {
            let intent = input.movement.normalize_or_zero();
            player.velocity = intent * self.tuning.player.speed;
            if intent != Vec2::ZERO {
                player.facing = intent.y.atan2(intent.x);
            }
            player.position = self
                .arena
                .wrap(player.position + player.velocity * dt_secs);
        }

        for hostile in &mut self.hostiles {
            let pursuit_speed = match hostile.kind {
                HostileKind::Saucer { aggressive: true } => Some(self.tuning.saucer.speed),
                HostileKind::Brute => Some(self.tuning.brute.speed),
                _ => None,
            };
            if let (Some(speed), Some(target)) = (pursuit_speed, player_position) {
                let heading = (target - hostile.position).normalize_or_zero();
                if heading != Vec2::ZERO {
                    hostile.velocity = heading * speed;
                }
            }
            hostile.position = self.arena.wrap(hostile.position + hostile.velocity * dt_secs);
        }

        for projectile in &mut self.projectiles {
            let step = projectile.velocity * dt_secs;
            projectile.position += step;
            projectile.traveled += step.length();
        }
    }

    fn handle_hyperspace(&mut self, out_events: &mut Vec<Event>) {
        let destination = Vec2::new(
            (self.rng_unit() as f32) * self.arena.width(),
            (self.rng_unit() as f32) * self.arena.height(),
        );
        if let Some(player) = self.player.as_mut() {
            player.position = destination;
            player.velocity = Vec2::ZERO;
        }
        self.score = self
            .score
            .saturating_sub(self.tuning.player.hyperspace_cost);
        out_events.push(Event::Cue(AudioCue::Hyperspace));
    }

    fn try_fire(&mut self, out_events: &mut Vec<Event>) {
        let tuning = self.tuning.player;
        let live = self.live_ship_projectiles();
        let Some(player) = self.player.as_mut() else {
            return;
        };

        if !player.fire_cooldown.is_zero() {
            return;
        }
        if live >= tuning.max_live_projectiles {
            return;
        }
        if player.ammo == Some(0) {
            return;
        }

        let firer = player.id;
        let origin = player.position;
        let direction = Vec2::from_angle(player.facing);
        let damage = tuning.projectile_damage * player.damage_multiplier;
        player.fire_cooldown = tuning.fire_cooldown;
        if let Some(ammo) = player.ammo.as_mut() {
            *ammo -= 1;
        }

        let id = self.allocate_id();
        self.projectiles.push(ProjectileState {
            id,
            owner: ProjectileOwner::Ship { firer },
            position: origin,
            velocity: direction * tuning.projectile_speed,
            damage,
            traveled: 0.0,
            max_range: tuning.projectile_max_range,
        });
        out_events.push(Event::ProjectileFired {
            id,
            owner: ProjectileOwner::Ship { firer },
        });
        out_events.push(Event::Cue(AudioCue::Shoot));
    }

    fn fire_saucers(&mut self, out_events: &mut Vec<Event>) {
        let Some(target) = self.player.as_ref().map(|player| player.position) else {
            return;
        };
        let tuning = self.tuning.saucer;

        let mut shots: Vec<(EntityId, Vec2)> = Vec::new();
        for hostile in &mut self.hostiles {
            if !matches!(hostile.kind, HostileKind::Saucer { .. }) {
                continue;
            }
            if !hostile.fire_cooldown.is_zero() {
                continue;
            }
            hostile.fire_cooldown = tuning.fire_interval;
            shots.push((hostile.id, hostile.position));
        }

        for (firer, origin) in shots {
            let heading = (target - origin).normalize_or_zero();
            if heading == Vec2::ZERO {
                continue;
            }
            let id = self.allocate_id();
            self.projectiles.push(ProjectileState {
                id,
                owner: ProjectileOwner::Saucer { firer },
                position: origin,
                velocity: heading * tuning.projectile_speed,
                damage: tuning.projectile_damage,
                traveled: 0.0,
                max_range: tuning.projectile_max_range,
            });
            out_events.push(Event::ProjectileFired {
                id,
                owner: ProjectileOwner::Saucer { firer },
            });
            out_events.push(Event::Cue(AudioCue::SaucerShoot));
        }
    }

    fn expire_projectiles(&mut self) {
        let arena = self.arena;
        self.projectiles
            .retain(|projectile| {
                projectile.traveled < projectile.max_range && arena.contains(projectile.position)
            });
    }

    fn award_score(&mut self, points: u32, out_events: &mut Vec<Event>) {
        self.score = self.score.saturating_add(points);
        out_events.push(Event::ScoreAwarded {
            points,
            total: self.score,
        });
    }

    fn split_asteroid(&mut self, position: Vec2, velocity: Vec2, tier: SizeTier) {
        let Some(child_tier) = tier.split_into() else {
            return;
        };
        let speed = velocity.length().max(MIN_SPLIT_SPEED) * self.tuning.asteroid.split_speed_scale;
        for _ in 0..2 {
            let angle = (self.rng_unit() as f32) * TAU;
            let heading = Vec2::from_angle(angle);
            let descriptor = SpawnDescriptor::new(
                position,
                heading * speed,
                SpawnArchetype::Asteroid { tier: child_tier },
            );
            let _ = self.insert_descriptor(descriptor);
        }
    }

    fn maybe_drop_pickup(&mut self, position: Vec2, out_events: &mut Vec<Event>) {
        let tuning = self.tuning.pickup;
        if self.pickups.len() >= tuning.max_live {
            return;
        }
        if self.rng_unit() >= tuning.drop_chance {
            return;
        }

        // Weighted table: medkit 2, ammo 5, armor 2, boost 1. Drawn from the
        // high bits; the LCG's low bits alternate parity.
        let kind = match (self.rng_unit() * 10.0) as u32 {
            0 | 1 => PickupKind::Medkit,
            2..=6 => PickupKind::AmmoPack,
            7 | 8 => PickupKind::Armor,
            _ => PickupKind::DamageBoost,
        };
        let id = self.allocate_id();
        self.pickups.push(PickupState { id, kind, position });
        out_events.push(Event::PickupDropped { id, kind });
    }

    fn destroy_hostile(&mut self, index: usize, scored: bool, out_events: &mut Vec<Event>) {
        let hostile = self.hostiles.remove(index);
        out_events.push(Event::Cue(hostile.kind.explosion_cue()));

        if scored {
            self.kills = self.kills.saturating_add(1);
            self.award_score(hostile.kind.score(), out_events);
        }
        out_events.push(Event::HostileDestroyed {
            id: hostile.id,
            kind: hostile.kind,
            kills: self.kills,
        });

        match hostile.kind {
            HostileKind::Asteroid { tier } => {
                if scored {
                    self.split_asteroid(hostile.position, hostile.velocity, tier);
                }
            }
            HostileKind::Saucer { .. } | HostileKind::Brute => {
                if scored {
                    self.maybe_drop_pickup(hostile.position, out_events);
                }
            }
        }

        if scored {
            self.check_victory(out_events);
        }
    }

    fn apply_strike(
        &mut self,
        projectile: EntityId,
        target: EntityId,
        out_events: &mut Vec<Event>,
    ) {
        let Some(projectile_index) = self.projectile_index(projectile) else {
            return;
        };
        let shot = self.projectiles.remove(projectile_index);

        let Some(target_index) = self.hostile_index(target) else {
            return;
        };
        self.hostiles[target_index].hp -= shot.damage;
        if self.hostiles[target_index].hp <= 0 {
            self.destroy_hostile(target_index, shot.owner.is_ship(), out_events);
        }
    }

    fn apply_player_touch(&mut self, toucher: EntityId, out_events: &mut Vec<Event>) {
        let invulnerable = self
            .player
            .as_ref()
            .map_or(true, |player| !player.invulnerability.is_zero());
        if invulnerable {
            return;
        }

        let damage = if let Some(index) = self.hostile_index(toucher) {
            Some(self.hostiles[index].kind.contact_damage())
        } else if let Some(index) = self.projectile_index(toucher) {
            let projectile = self.projectiles.remove(index);
            match projectile.owner {
                ProjectileOwner::Saucer { .. } => Some(projectile.damage),
                // A stale ship projectile id never harms the player.
                ProjectileOwner::Ship { .. } => None,
            }
        } else {
            None
        };
        let Some(damage) = damage else {
            return;
        };

        let center = self.arena.center();
        let tuning = self.tuning.player;
        let Some(player) = self.player.as_mut() else {
            return;
        };

        player.hp -= damage;
        player.invulnerability = tuning.hit_invulnerability;
        out_events.push(Event::Cue(AudioCue::PlayerHit));

        if player.hp <= 0 {
            player.lives -= 1;
            if player.lives < 0 {
                out_events.push(Event::PlayerHit {
                    hp: 0,
                    lives: player.lives,
                });
                self.session = SessionState::GameOver;
                out_events.push(Event::SessionChanged {
                    state: SessionState::GameOver,
                });
                return;
            }
            player.hp = player.max_hp;
            player.position = center;
            player.velocity = Vec2::ZERO;
            player.facing = INITIAL_FACING;
        }
        out_events.push(Event::PlayerHit {
            hp: player.hp,
            lives: player.lives,
        });
    }

    fn apply_pickup(&mut self, pickup: EntityId, out_events: &mut Vec<Event>) {
        let Some(index) = self.pickups.iter().position(|state| state.id == pickup) else {
            return;
        };
        let collected = self.pickups.remove(index);
        let tuning = self.tuning.pickup;
        let Some(player) = self.player.as_mut() else {
            return;
        };

        match collected.kind {
            PickupKind::Medkit => {
                player.hp = (player.hp + tuning.medkit_heal).min(player.max_hp);
            }
            PickupKind::AmmoPack => {
                if let Some(ammo) = player.ammo.as_mut() {
                    *ammo = (*ammo + tuning.ammo_refill).min(tuning.ammo_cap);
                }
            }
            PickupKind::Armor => {
                let boosted = (player.max_hp + tuning.armor_bonus).min(tuning.armor_cap);
                player.max_hp = boosted;
                player.hp = (player.hp + tuning.armor_bonus).min(boosted);
            }
            PickupKind::DamageBoost => {
                player.damage_multiplier = 2;
            }
        }

        out_events.push(Event::PickupCollected {
            id: collected.id,
            kind: collected.kind,
        });
        out_events.push(Event::Cue(AudioCue::Pickup));
    }

    fn check_victory(&mut self, out_events: &mut Vec<Event>) {
        if self.session != SessionState::Playing {
            return;
        }
        let tuning = self.tuning.session;
        if self.kills >= tuning.kill_target || self.elapsed >= tuning.time_ceiling {
            self.session = SessionState::Victory;
            out_events.push(Event::SessionChanged {
                state: SessionState::Victory,
            });
        }
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::Begin => {
            if world.session != SessionState::Start {
                return;
            }
            let id = world.spawn_player();
            world.session = SessionState::Playing;
            out_events.push(Event::EntitySpawned {
                id,
                kind: EntityKind::Player,
            });
            out_events.push(Event::SessionChanged {
                state: SessionState::Playing,
            });
        }
        Command::Restart => {
            if !world.session.is_terminal() {
                return;
            }
            world.reset();
            world.session = SessionState::Start;
            out_events.push(Event::SessionChanged {
                state: SessionState::Start,
            });
        }
        Command::Tick { dt, input } => {
            if world.session != SessionState::Playing {
                return;
            }
            world.elapsed = world.elapsed.saturating_add(dt);
            out_events.push(Event::TimeAdvanced { dt });

            world.advance_timers(dt);
            world.integrate(dt, &input);
            if input.hyperspace {
                world.handle_hyperspace(out_events);
            }
            if input.fire {
                world.try_fire(out_events);
            }
            world.fire_saucers(out_events);
            world.expire_projectiles();
            world.check_victory(out_events);
        }
        Command::StartWave { descriptors } => {
            if world.session != SessionState::Playing {
                return;
            }
            world.wave = world.wave.saturating_add(1);
            let hostiles = descriptors.len() as u32;
            out_events.push(Event::WaveStarted {
                wave: world.wave,
                hostiles,
            });
            for descriptor in descriptors {
                let (id, kind) = world.insert_descriptor(descriptor);
                out_events.push(Event::EntitySpawned {
                    id,
                    kind: EntityKind::Hostile(kind),
                });
            }
        }
        Command::Spawn { descriptor } => {
            if world.session != SessionState::Playing {
                return;
            }
            let (id, kind) = world.insert_descriptor(descriptor);
            out_events.push(Event::EntitySpawned {
                id,
                kind: EntityKind::Hostile(kind),
            });
            if matches!(kind, HostileKind::Saucer { .. }) {
                out_events.push(Event::Cue(AudioCue::SaucerSpawn));
            }
        }
        Command::Strike { projectile, target } => {
            if world.session != SessionState::Playing {
                return;
            }
            world.apply_strike(projectile, target, out_events);
        }
        Command::TouchPlayer { toucher } => {
            if world.session != SessionState::Playing {
                return;
            }
            world.apply_player_touch(toucher, out_events);
        }
        Command::HostileCollision { saucer, asteroid } => {
            if world.session != SessionState::Playing {
                return;
            }
            if world.hostile_index(asteroid).is_none() {
                return;
            }
            let Some(index) = world.hostile_index(saucer) else {
                return;
            };
            if !matches!(world.hostiles[index].kind, HostileKind::Saucer { .. }) {
                return;
            }
            world.destroy_hostile(index, false, out_events);
        }
        Command::CollectPickup { pickup } => {
            if world.session != SessionState::Playing {
                return;
            }
            world.apply_pickup(pickup, out_events);
        }
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use std::time::Duration;

    use astro_siege_core::{
        ArenaBounds, EntityKind, EntitySnapshot, EntityView, HostileCensus, HostileKind,
        HudSnapshot, PlayerStatus, SessionState,
    };
    use glam::Vec2;

    use super::World;

    /// Current session state.
    #[must_use]
    pub fn session(world: &World) -> SessionState {
        world.session
    }

    /// Arena bounds the simulation wraps and expires against.
    #[must_use]
    pub fn arena(world: &World) -> ArenaBounds {
        world.arena
    }

    /// Simulated time accumulated while playing.
    #[must_use]
    pub fn elapsed(world: &World) -> Duration {
        world.elapsed
    }

    /// Captures a read-only view of every live entity.
    #[must_use]
    pub fn entity_view(world: &World) -> EntityView {
        let mut snapshots: Vec<EntitySnapshot> = Vec::with_capacity(
            world.hostiles.len() + world.projectiles.len() + world.pickups.len() + 1,
        );

        if let Some(player) = world.player.as_ref() {
            snapshots.push(EntitySnapshot {
                id: player.id,
                kind: EntityKind::Player,
                position: player.position,
                velocity: player.velocity,
                radius: world.tuning.player.radius,
                hp: player.hp,
                facing: player.facing,
            });
        }
        for hostile in &world.hostiles {
            snapshots.push(EntitySnapshot {
                id: hostile.id,
                kind: EntityKind::Hostile(hostile.kind),
                position: hostile.position,
                velocity: hostile.velocity,
                radius: hostile.kind.radius(),
                hp: hostile.hp,
                facing: facing_of(hostile.velocity),
            });
        }
        for projectile in &world.projectiles {
            snapshots.push(EntitySnapshot {
                id: projectile.id,
                kind: EntityKind::Projectile(projectile.owner),
                position: projectile.position,
                velocity: projectile.velocity,
                radius: 4.0,
                hp: 1,
                facing: facing_of(projectile.velocity),
            });
        }
        for pickup in &world.pickups {
            snapshots.push(EntitySnapshot {
                id: pickup.id,
                kind: EntityKind::Pickup(pickup.kind),
                position: pickup.position,
                velocity: Vec2::ZERO,
                radius: pickup.kind.radius(),
                hp: 1,
                facing: 0.0,
            });
        }

        EntityView::from_snapshots(snapshots)
    }

    /// Census of live hostiles grouped by class.
    #[must_use]
    pub fn hostile_census(world: &World) -> HostileCensus {
        let mut census = HostileCensus::default();
        for hostile in &world.hostiles {
            match hostile.kind {
                HostileKind::Asteroid { .. } => census.asteroids += 1,
                HostileKind::Saucer { .. } => census.saucers += 1,
                HostileKind::Brute => census.brutes += 1,
            }
        }
        census
    }

    /// Immutable status of the player ship, if one is alive.
    #[must_use]
    pub fn player(world: &World) -> Option<PlayerStatus> {
        world.player.as_ref().map(|player| PlayerStatus {
            position: player.position,
            hp: player.hp,
            max_hp: player.max_hp,
            lives: player.lives,
            invulnerability: player.invulnerability,
            ammo: player.ammo,
        })
    }

    /// HUD data for presentation adapters.
    #[must_use]
    pub fn hud(world: &World) -> HudSnapshot {
        let (lives, hp, max_hp, ammo) = world.player.as_ref().map_or(
            (0, 0, 0, None),
            |player| (player.lives, player.hp, player.max_hp, player.ammo),
        );
        HudSnapshot {
            score: world.score,
            lives,
            hp,
            max_hp,
            wave: world.wave,
            kills: world.kills,
            elapsed: world.elapsed,
            session: world.session,
            ammo,
        }
    }

    fn facing_of(velocity: Vec2) -> f32 {
        if velocity == Vec2::ZERO {
            0.0
        } else {
            velocity.y.atan2(velocity.x)
        }
    }
}

fn next_random(state: u64) -> u64 {
    state.wrapping_mul(6_364_136_223_846_793_005).wrapping_add(1)
}
