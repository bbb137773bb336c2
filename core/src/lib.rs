#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Astro Siege engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters submit [`Command`] values
//! describing desired mutations, the world executes those commands via its
//! `apply` entry point, and then broadcasts [`Event`] values for systems to
//! react to deterministically. Systems consume event streams, query immutable
//! snapshots, and respond exclusively with new command batches.

use std::time::Duration;

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Unique identifier assigned to an entity by the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(u32);

impl EntityId {
    /// Creates a new entity identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Size category of an asteroid-class hostile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SizeTier {
    /// Largest tier, spawned by waves.
    Large,
    /// Intermediate tier produced by splitting a large asteroid.
    Medium,
    /// Smallest tier; destroyed outright without children.
    Small,
}

impl SizeTier {
    /// Tier produced when an asteroid of this tier is destroyed, if any.
    ///
    /// A destroyed asteroid yields exactly two children of the returned tier;
    /// `Small` asteroids never split.
    #[must_use]
    pub const fn split_into(self) -> Option<SizeTier> {
        match self {
            Self::Large => Some(Self::Medium),
            Self::Medium => Some(Self::Small),
            Self::Small => None,
        }
    }

    /// Points awarded for destroying an asteroid of this tier.
    #[must_use]
    pub const fn score(self) -> u32 {
        match self {
            Self::Large => 20,
            Self::Medium => 50,
            Self::Small => 100,
        }
    }

    /// Collision radius of this tier expressed in world units.
    #[must_use]
    pub const fn radius(self) -> f32 {
        match self {
            Self::Large => 48.0,
            Self::Medium => 28.0,
            Self::Small => 14.0,
        }
    }

    /// Explosion cue matching the destroyed tier.
    #[must_use]
    pub const fn explosion_cue(self) -> AudioCue {
        match self {
            Self::Large => AudioCue::ExplosionLarge,
            Self::Medium => AudioCue::ExplosionMedium,
            Self::Small => AudioCue::ExplosionSmall,
        }
    }
}

/// Classification of a hostile entity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HostileKind {
    /// Drifting asteroid of a given size tier.
    Asteroid {
        /// Size tier controlling radius, score, and splitting.
        tier: SizeTier,
    },
    /// Flying saucer spawned on a timer at the arena edge.
    Saucer {
        /// Aggressive saucers re-aim toward the player every tick.
        aggressive: bool,
    },
    /// Elevated-strength hostile spawned by the kill-count escalation.
    Brute,
}

impl HostileKind {
    /// Collision radius of the hostile in world units.
    #[must_use]
    pub const fn radius(self) -> f32 {
        match self {
            Self::Asteroid { tier } => tier.radius(),
            Self::Saucer { .. } => 22.0,
            Self::Brute => 40.0,
        }
    }

    /// Points awarded when the hostile is destroyed by a projectile.
    #[must_use]
    pub const fn score(self) -> u32 {
        match self {
            Self::Asteroid { tier } => tier.score(),
            Self::Saucer { aggressive } => {
                if aggressive {
                    1_000
                } else {
                    200
                }
            }
            Self::Brute => 500,
        }
    }

    /// Damage inflicted on the player by direct contact.
    #[must_use]
    pub const fn contact_damage(self) -> i32 {
        match self {
            Self::Asteroid { .. } | Self::Saucer { .. } => 10,
            Self::Brute => 5,
        }
    }

    /// Explosion cue emitted when the hostile is destroyed.
    #[must_use]
    pub const fn explosion_cue(self) -> AudioCue {
        match self {
            Self::Asteroid { tier } => tier.explosion_cue(),
            Self::Saucer { .. } => AudioCue::ExplosionMedium,
            Self::Brute => AudioCue::ExplosionLarge,
        }
    }
}

/// Originator of a projectile, kept for attribution and fire gating.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProjectileOwner {
    /// Fired by the player ship.
    Ship {
        /// Identifier of the firing player entity.
        firer: EntityId,
    },
    /// Fired by a hostile saucer toward the player.
    Saucer {
        /// Identifier of the firing saucer entity.
        firer: EntityId,
    },
}

impl ProjectileOwner {
    /// Identifier of the entity that fired the projectile.
    ///
    /// The reference is non-owning; the firer may already have been removed.
    #[must_use]
    pub const fn firer(self) -> EntityId {
        match self {
            Self::Ship { firer } | Self::Saucer { firer } => firer,
        }
    }

    /// Reports whether the projectile originated from the player ship.
    #[must_use]
    pub const fn is_ship(self) -> bool {
        matches!(self, Self::Ship { .. })
    }
}

/// Collectible item dropped by destroyed hostiles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PickupKind {
    /// Restores a fixed amount of player hp.
    Medkit,
    /// Grants a clip of ammunition.
    AmmoPack,
    /// Raises the player's maximum hp and heals the difference.
    Armor,
    /// Doubles projectile damage for the rest of the session.
    DamageBoost,
}

impl PickupKind {
    /// Collision radius used when the player collects the pickup.
    #[must_use]
    pub const fn radius(self) -> f32 {
        20.0
    }
}

/// Closed classification of every entity the world can own.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    /// The player ship.
    Player,
    /// A hostile of the given kind.
    Hostile(HostileKind),
    /// A projectile attributed to its firer.
    Projectile(ProjectileOwner),
    /// A collectible pickup.
    Pickup(PickupKind),
}

/// Lifecycle of a play session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SessionState {
    /// Waiting for the player to begin.
    Start,
    /// Simulation is advancing.
    Playing,
    /// Terminal state reached when the player ran out of lives.
    GameOver,
    /// Terminal state reached at the kill target or time ceiling.
    Victory,
}

impl SessionState {
    /// Reports whether the session reached a terminal state.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::GameOver | Self::Victory)
    }
}

/// Named fire-and-forget audio cue emitted alongside simulation events.
///
/// Failure to play a cue must never affect simulation correctness; sinks
/// that cannot resolve a cue simply drop it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AudioCue {
    /// Player projectile fired.
    Shoot,
    /// Small asteroid destroyed.
    ExplosionSmall,
    /// Medium asteroid or saucer destroyed.
    ExplosionMedium,
    /// Large asteroid or brute destroyed.
    ExplosionLarge,
    /// Player took contact damage.
    PlayerHit,
    /// Pickup collected.
    Pickup,
    /// Saucer entered the arena.
    SaucerSpawn,
    /// Saucer fired at the player.
    SaucerShoot,
    /// Player triggered a hyperspace jump.
    Hyperspace,
}

/// Per-tick snapshot of player intent, polled once by the adapter.
///
/// The simulation core is agnostic to the concrete device producing it.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct InputFrame {
    /// Desired movement direction; any magnitude, normalized by the world.
    pub movement: Vec2,
    /// Whether the fire action is pressed this tick.
    pub fire: bool,
    /// Whether the hyperspace (secondary) action is pressed this tick.
    pub hyperspace: bool,
    /// Whether the surrounding loop should terminate after this tick.
    pub quit: bool,
}

/// Archetype of a to-be-created hostile, decoupled from instantiation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpawnArchetype {
    /// Asteroid of the given tier.
    Asteroid {
        /// Size tier assigned at creation.
        tier: SizeTier,
    },
    /// Saucer, optionally aggressive.
    Saucer {
        /// Whether the saucer pursues the player.
        aggressive: bool,
    },
    /// Escalation hostile.
    Brute,
}

/// Data record describing a to-be-created entity's initial state.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpawnDescriptor {
    position: Vec2,
    velocity: Vec2,
    archetype: SpawnArchetype,
}

impl SpawnDescriptor {
    /// Creates a new spawn descriptor.
    #[must_use]
    pub const fn new(position: Vec2, velocity: Vec2, archetype: SpawnArchetype) -> Self {
        Self {
            position,
            velocity,
            archetype,
        }
    }

    /// Initial position of the entity.
    #[must_use]
    pub const fn position(&self) -> Vec2 {
        self.position
    }

    /// Initial velocity of the entity.
    #[must_use]
    pub const fn velocity(&self) -> Vec2 {
        self.velocity
    }

    /// Archetype to instantiate.
    #[must_use]
    pub const fn archetype(&self) -> SpawnArchetype {
        self.archetype
    }
}

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Requests the transition from `Start` to `Playing`.
    Begin,
    /// Requests that a terminal session reinitialize back to `Start`.
    Restart,
    /// Advances the simulation clock by the provided delta time.
    Tick {
        /// Duration of simulated time elapsed since the previous tick.
        dt: Duration,
        /// Input snapshot captured for this tick.
        input: InputFrame,
    },
    /// Requests insertion of a batch of wave hostiles and a wave increment.
    StartWave {
        /// Descriptors for every hostile in the wave.
        descriptors: Vec<SpawnDescriptor>,
    },
    /// Requests insertion of a single hostile outside the wave cycle.
    Spawn {
        /// Descriptor of the hostile to instantiate.
        descriptor: SpawnDescriptor,
    },
    /// Reports that a projectile overlapped a hostile.
    Strike {
        /// Identifier of the projectile; always destroyed.
        projectile: EntityId,
        /// Identifier of the hostile taking damage.
        target: EntityId,
    },
    /// Reports that a hostile or hostile projectile reached the player.
    TouchPlayer {
        /// Identifier of the touching entity.
        toucher: EntityId,
    },
    /// Reports that a saucer rammed an asteroid; the saucer is destroyed.
    HostileCollision {
        /// Identifier of the saucer.
        saucer: EntityId,
        /// Identifier of the asteroid, which survives.
        asteroid: EntityId,
    },
    /// Reports that the player overlapped a pickup.
    CollectPickup {
        /// Identifier of the pickup to consume.
        pickup: EntityId,
    },
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// Indicates that the simulation clock advanced.
    TimeAdvanced {
        /// Duration of simulated time that elapsed in the tick.
        dt: Duration,
    },
    /// Announces that the session entered a new state.
    SessionChanged {
        /// State that became active after processing the command.
        state: SessionState,
    },
    /// Confirms that a wave of hostiles entered the arena.
    WaveStarted {
        /// One-indexed wave number that just began.
        wave: u32,
        /// Number of hostiles inserted for the wave.
        hostiles: u32,
    },
    /// Confirms that an entity was created.
    EntitySpawned {
        /// Identifier assigned by the world.
        id: EntityId,
        /// Kind of the created entity.
        kind: EntityKind,
    },
    /// Confirms that a projectile was fired.
    ProjectileFired {
        /// Identifier assigned to the projectile.
        id: EntityId,
        /// Attribution of the shot.
        owner: ProjectileOwner,
    },
    /// Reports that a hostile was destroyed.
    HostileDestroyed {
        /// Identifier of the destroyed hostile.
        id: EntityId,
        /// Kind of the destroyed hostile.
        kind: HostileKind,
        /// Cumulative kill count after this destruction.
        kills: u32,
    },
    /// Reports points granted to the player.
    ScoreAwarded {
        /// Points granted by the originating policy.
        points: u32,
        /// Running session total after the award.
        total: u32,
    },
    /// Reports that the player took contact damage.
    PlayerHit {
        /// Player hp remaining after the hit.
        hp: i32,
        /// Lives remaining after the hit.
        lives: i32,
    },
    /// Confirms that the player consumed a pickup.
    PickupCollected {
        /// Identifier of the consumed pickup.
        id: EntityId,
        /// Kind of the consumed pickup.
        kind: PickupKind,
    },
    /// Confirms that a destroyed hostile dropped a pickup.
    PickupDropped {
        /// Identifier assigned to the pickup.
        id: EntityId,
        /// Kind of the dropped pickup.
        kind: PickupKind,
    },
    /// Fire-and-forget audio cue for presentation adapters.
    Cue(AudioCue),
}

/// Rectangular playable area anchored at the origin.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ArenaBounds {
    width: f32,
    height: f32,
}

impl ArenaBounds {
    /// Creates new arena bounds with the provided dimensions.
    #[must_use]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Width of the arena in world units.
    #[must_use]
    pub const fn width(&self) -> f32 {
        self.width
    }

    /// Height of the arena in world units.
    #[must_use]
    pub const fn height(&self) -> f32 {
        self.height
    }

    /// Center point of the arena.
    #[must_use]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width * 0.5, self.height * 0.5)
    }

    /// Length of the arena diagonal.
    #[must_use]
    pub fn diagonal(&self) -> f32 {
        Vec2::new(self.width, self.height).length()
    }

    /// Reports whether the position lies inside the arena.
    #[must_use]
    pub fn contains(&self, position: Vec2) -> bool {
        position.x >= 0.0
            && position.x <= self.width
            && position.y >= 0.0
            && position.y <= self.height
    }

    /// Wraps a position toroidally back into the arena.
    #[must_use]
    pub fn wrap(&self, position: Vec2) -> Vec2 {
        Vec2::new(
            position.x.rem_euclid(self.width),
            position.y.rem_euclid(self.height),
        )
    }
}

/// Tuning parameters governing the player ship.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlayerTuning {
    /// Movement speed in world units per second.
    pub speed: f32,
    /// Maximum hp restored on spawn and respawn.
    pub max_hp: i32,
    /// Lives granted at session start.
    pub lives: i32,
    /// Collision radius of the ship.
    pub radius: f32,
    /// Minimum simulated time between successive shots.
    pub fire_cooldown: Duration,
    /// Speed of ship projectiles in world units per second.
    pub projectile_speed: f32,
    /// Base damage dealt by a ship projectile.
    pub projectile_damage: i32,
    /// Distance a projectile may travel before expiring.
    pub projectile_max_range: f32,
    /// Upper bound on simultaneously live ship projectiles.
    ///
    /// A value of one limits the ship to a single live shell at a time.
    pub max_live_projectiles: u32,
    /// Remaining ammunition; `None` means unlimited.
    pub ammo: Option<u32>,
    /// Invulnerability window granted after taking a hit or respawning.
    pub hit_invulnerability: Duration,
    /// Score deducted for a hyperspace jump.
    pub hyperspace_cost: u32,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            speed: 250.0,
            max_hp: 30,
            lives: 3,
            radius: 16.0,
            fire_cooldown: Duration::from_millis(250),
            projectile_speed: 500.0,
            projectile_damage: 1,
            projectile_max_range: 800.0,
            max_live_projectiles: 4,
            ammo: None,
            hit_invulnerability: Duration::from_millis(1_500),
            hyperspace_cost: 50,
        }
    }
}

/// Tuning parameters governing saucer hostiles.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SaucerTuning {
    /// Horizontal cruise speed of a saucer.
    pub speed: f32,
    /// Hp assigned at spawn.
    pub hp: i32,
    /// Minimum simulated time between saucer shots.
    pub fire_interval: Duration,
    /// Speed of saucer projectiles in world units per second.
    pub projectile_speed: f32,
    /// Damage dealt by a saucer projectile on contact with the player.
    pub projectile_damage: i32,
    /// Distance a saucer projectile may travel before expiring.
    pub projectile_max_range: f32,
}

impl Default for SaucerTuning {
    fn default() -> Self {
        Self {
            speed: 120.0,
            hp: 1,
            fire_interval: Duration::from_millis(2_500),
            projectile_speed: 350.0,
            projectile_damage: 10,
            projectile_max_range: 900.0,
        }
    }
}

/// Tuning parameters governing escalation hostiles.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BruteTuning {
    /// Pursuit speed toward the player.
    pub speed: f32,
    /// Hp assigned at spawn.
    pub hp: i32,
}

impl Default for BruteTuning {
    fn default() -> Self {
        Self {
            speed: 70.0,
            hp: 30,
        }
    }
}

/// Tuning parameters governing asteroid hostiles.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AsteroidTuning {
    /// Hp assigned to every asteroid regardless of tier.
    pub hp: i32,
    /// Multiplier applied to the parent speed band when splitting.
    pub split_speed_scale: f32,
}

impl Default for AsteroidTuning {
    fn default() -> Self {
        Self {
            hp: 1,
            split_speed_scale: 1.2,
        }
    }
}

/// Tuning parameters governing session termination.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SessionTuning {
    /// Kill count at which the session transitions to `Victory`.
    pub kill_target: u32,
    /// Elapsed time at which the session transitions to `Victory`.
    pub time_ceiling: Duration,
}

impl Default for SessionTuning {
    fn default() -> Self {
        Self {
            kill_target: 100,
            time_ceiling: Duration::from_secs(300),
        }
    }
}

/// Tuning parameters governing pickup drops.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PickupTuning {
    /// Probability in `0.0..=1.0` that a destroyed non-asteroid drops.
    pub drop_chance: f64,
    /// Upper bound on simultaneously live pickups.
    pub max_live: usize,
    /// Hp restored by a medkit.
    pub medkit_heal: i32,
    /// Rounds granted by an ammo pack.
    pub ammo_refill: u32,
    /// Ceiling on carried ammunition after a refill.
    pub ammo_cap: u32,
    /// Max-hp increase granted by armor.
    pub armor_bonus: i32,
    /// Ceiling on armored max hp.
    pub armor_cap: i32,
}

impl Default for PickupTuning {
    fn default() -> Self {
        Self {
            drop_chance: 0.3,
            max_live: 20,
            medkit_heal: 5,
            ammo_refill: 15,
            ammo_cap: 120,
            armor_bonus: 2,
            armor_cap: 50,
        }
    }
}

/// Aggregated world configuration assembled by the application.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct WorldTuning {
    /// Player ship parameters.
    pub player: PlayerTuning,
    /// Saucer parameters.
    pub saucer: SaucerTuning,
    /// Brute parameters.
    pub brute: BruteTuning,
    /// Asteroid parameters.
    pub asteroid: AsteroidTuning,
    /// Session termination parameters.
    pub session: SessionTuning,
    /// Pickup drop parameters.
    pub pickup: PickupTuning,
}

/// Immutable representation of a single entity's state used for queries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EntitySnapshot {
    /// Unique identifier assigned to the entity.
    pub id: EntityId,
    /// Kind of the entity.
    pub kind: EntityKind,
    /// Position in world units.
    pub position: Vec2,
    /// Velocity in world units per second.
    pub velocity: Vec2,
    /// Collision radius in world units.
    pub radius: f32,
    /// Remaining hp.
    pub hp: i32,
    /// Facing angle in radians, derived from velocity for presentation.
    pub facing: f32,
}

/// Read-only snapshot describing all live entities in deterministic order.
#[derive(Clone, Debug, Default)]
pub struct EntityView {
    snapshots: Vec<EntitySnapshot>,
}

impl EntityView {
    /// Creates a new view from the provided snapshots, sorted by id.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<EntitySnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured snapshots in deterministic order.
    pub fn iter(&self) -> impl Iterator<Item = &EntitySnapshot> {
        self.snapshots.iter()
    }

    /// Number of captured snapshots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Reports whether the view captured no entities.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<EntitySnapshot> {
        self.snapshots
    }
}

/// Read-only census of live hostiles grouped by class.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HostileCensus {
    /// Live asteroids of any tier.
    pub asteroids: u32,
    /// Live saucers.
    pub saucers: u32,
    /// Live brutes.
    pub brutes: u32,
}

impl HostileCensus {
    /// Total number of live hostiles.
    #[must_use]
    pub const fn total(&self) -> u32 {
        self.asteroids + self.saucers + self.brutes
    }
}

/// Immutable player status used by systems.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlayerStatus {
    /// Current position of the ship.
    pub position: Vec2,
    /// Remaining hp.
    pub hp: i32,
    /// Current maximum hp.
    pub max_hp: i32,
    /// Remaining lives.
    pub lives: i32,
    /// Remaining invulnerability window; touches are suppressed while > 0.
    pub invulnerability: Duration,
    /// Remaining ammunition; `None` means unlimited.
    pub ammo: Option<u32>,
}

/// HUD data exposed to presentation adapters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HudSnapshot {
    /// Session score.
    pub score: u32,
    /// Remaining lives.
    pub lives: i32,
    /// Remaining player hp.
    pub hp: i32,
    /// Current maximum player hp.
    pub max_hp: i32,
    /// One-indexed number of the most recent wave, zero before the first.
    pub wave: u32,
    /// Cumulative hostile kill count.
    pub kills: u32,
    /// Simulated time elapsed while playing.
    pub elapsed: Duration,
    /// Current session state.
    pub session: SessionState,
    /// Remaining ammunition; `None` means unlimited.
    pub ammo: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::{
        ArenaBounds, EntityId, HostileKind, PickupKind, SizeTier, SpawnArchetype, SpawnDescriptor,
    };
    use glam::Vec2;
    use serde::{de::DeserializeOwned, Serialize};

    fn assert_round_trip<T>(value: &T)
    where
        T: Serialize + DeserializeOwned + PartialEq + std::fmt::Debug,
    {
        let bytes = bincode::serialize(value).expect("serialize");
        let restored: T = bincode::deserialize(&bytes).expect("deserialize");
        assert_eq!(&restored, value);
    }

    #[test]
    fn entity_id_round_trips_through_bincode() {
        assert_round_trip(&EntityId::new(42));
    }

    #[test]
    fn hostile_kind_round_trips_through_bincode() {
        assert_round_trip(&HostileKind::Asteroid {
            tier: SizeTier::Medium,
        });
        assert_round_trip(&HostileKind::Saucer { aggressive: true });
    }

    #[test]
    fn spawn_descriptor_round_trips_through_bincode() {
        let descriptor = SpawnDescriptor::new(
            Vec2::new(12.0, 7.5),
            Vec2::new(-3.0, 4.0),
            SpawnArchetype::Asteroid {
                tier: SizeTier::Large,
            },
        );
        assert_round_trip(&descriptor);
    }

    #[test]
    fn pickup_kind_round_trips_through_bincode() {
        assert_round_trip(&PickupKind::DamageBoost);
    }

    #[test]
    fn split_table_descends_one_tier_and_stops() {
        assert_eq!(SizeTier::Large.split_into(), Some(SizeTier::Medium));
        assert_eq!(SizeTier::Medium.split_into(), Some(SizeTier::Small));
        assert_eq!(SizeTier::Small.split_into(), None);
    }

    #[test]
    fn smaller_tiers_score_higher() {
        assert!(SizeTier::Small.score() > SizeTier::Medium.score());
        assert!(SizeTier::Medium.score() > SizeTier::Large.score());
    }

    #[test]
    fn arena_wrap_is_toroidal() {
        let arena = ArenaBounds::new(800.0, 600.0);
        let wrapped = arena.wrap(Vec2::new(-10.0, 610.0));
        assert!((wrapped.x - 790.0).abs() < f32::EPSILON);
        assert!((wrapped.y - 10.0).abs() < f32::EPSILON);
        assert!(arena.contains(wrapped));
    }
}
