#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared presentation contracts for Astro Siege adapters.
//!
//! The simulation never draws or plays anything itself; it hands adapters an
//! [`EntityView`] plus a [`HudSnapshot`] and a stream of [`AudioCue`] values.
//! This crate turns those snapshots into backend-neutral descriptors and
//! defines the audio sink trait adapters implement.

use astro_siege_core::{
    AudioCue, EntityKind, EntityView, HostileKind, HudSnapshot, PickupKind, SessionState, SizeTier,
};
use glam::Vec2;
use std::{error::Error, fmt, time::Duration};

/// Sprite selected for a presented entity.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SpriteKind {
    /// The player ship.
    Ship,
    /// Large asteroid.
    AsteroidLarge,
    /// Medium asteroid.
    AsteroidMedium,
    /// Small asteroid.
    AsteroidSmall,
    /// Flying saucer.
    Saucer,
    /// Escalation brute.
    Brute,
    /// Ship projectile.
    ShipShot,
    /// Saucer projectile.
    SaucerShot,
    /// Health pickup.
    Medkit,
    /// Ammunition pickup.
    AmmoPack,
    /// Armor pickup.
    Armor,
    /// Damage boost pickup.
    DamageBoost,
}

impl SpriteKind {
    fn for_entity(kind: EntityKind) -> Self {
        match kind {
            EntityKind::Player => Self::Ship,
            EntityKind::Hostile(HostileKind::Asteroid { tier }) => match tier {
                SizeTier::Large => Self::AsteroidLarge,
                SizeTier::Medium => Self::AsteroidMedium,
                SizeTier::Small => Self::AsteroidSmall,
            },
            EntityKind::Hostile(HostileKind::Saucer { .. }) => Self::Saucer,
            EntityKind::Hostile(HostileKind::Brute) => Self::Brute,
            EntityKind::Projectile(owner) if owner.is_ship() => Self::ShipShot,
            EntityKind::Projectile(_) => Self::SaucerShot,
            EntityKind::Pickup(PickupKind::Medkit) => Self::Medkit,
            EntityKind::Pickup(PickupKind::AmmoPack) => Self::AmmoPack,
            EntityKind::Pickup(PickupKind::Armor) => Self::Armor,
            EntityKind::Pickup(PickupKind::DamageBoost) => Self::DamageBoost,
        }
    }
}

/// One drawable entity instance.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpriteInstance {
    /// Sprite to draw.
    pub kind: SpriteKind,
    /// World-space center of the sprite.
    pub position: Vec2,
    /// Facing angle in radians.
    pub facing: f32,
    /// Collision radius, doubling as the sprite's half-extent.
    pub radius: f32,
}

/// HUD values presented alongside the playfield.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HudPresentation {
    /// Session score.
    pub score: u32,
    /// Remaining lives.
    pub lives: i32,
    /// Current and maximum hit points, for the health bar.
    pub health: (i32, i32),
    /// One-indexed wave number.
    pub wave: u32,
    /// Hostiles destroyed by the player so far.
    pub kills: u32,
    /// Simulated time played.
    pub elapsed: Duration,
    /// Remaining ammunition; `None` renders as unlimited.
    pub ammo: Option<u32>,
    /// Session state, selecting the start/game-over/victory overlays.
    pub session: SessionState,
}

impl From<HudSnapshot> for HudPresentation {
    fn from(hud: HudSnapshot) -> Self {
        Self {
            score: hud.score,
            lives: hud.lives,
            health: (hud.hp, hud.max_hp),
            wave: hud.wave,
            kills: hud.kills,
            elapsed: hud.elapsed,
            ammo: hud.ammo,
            session: hud.session,
        }
    }
}

/// Playfield dimensions presented to the backend.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ArenaPresentation {
    /// Width of the playfield in world units.
    pub width: f32,
    /// Height of the playfield in world units.
    pub height: f32,
}

impl ArenaPresentation {
    /// Creates a validated arena descriptor.
    pub fn new(width: f32, height: f32) -> Result<Self, PresentationError> {
        if width <= 0.0 || height <= 0.0 {
            return Err(PresentationError::DegenerateArena { width, height });
        }
        Ok(Self { width, height })
    }
}

/// Scene content displayed for one frame.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    /// Playfield dimensions.
    pub arena: ArenaPresentation,
    /// Every drawable entity, ordered by id.
    pub sprites: Vec<SpriteInstance>,
    /// HUD values.
    pub hud: HudPresentation,
}

impl Scene {
    /// Builds a scene from simulation snapshots.
    #[must_use]
    pub fn from_snapshots(arena: ArenaPresentation, view: &EntityView, hud: HudSnapshot) -> Self {
        let sprites = view
            .iter()
            .map(|snapshot| SpriteInstance {
                kind: SpriteKind::for_entity(snapshot.kind),
                position: snapshot.position,
                facing: snapshot.facing,
                radius: snapshot.radius,
            })
            .collect();
        Self {
            arena,
            sprites,
            hud: hud.into(),
        }
    }
}

/// Sink that receives fire-and-forget audio cues.
pub trait CueSink {
    /// Plays a single cue; losing a cue must never affect the simulation.
    fn play(&mut self, cue: AudioCue);
}

/// Cue sink that discards everything, for headless runs and tests.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullCueSink;

impl CueSink for NullCueSink {
    fn play(&mut self, _cue: AudioCue) {}
}

/// Errors that can occur when constructing presentation descriptors.
#[derive(Debug, PartialEq)]
pub enum PresentationError {
    /// Arena dimensions must both be positive.
    DegenerateArena {
        /// Provided width that failed validation.
        width: f32,
        /// Provided height that failed validation.
        height: f32,
    },
}

impl fmt::Display for PresentationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DegenerateArena { width, height } => {
                write!(
                    f,
                    "arena dimensions must be positive (received {width}x{height})"
                )
            }
        }
    }
}

impl Error for PresentationError {}

#[cfg(test)]
mod tests {
    use astro_siege_core::{EntityId, EntitySnapshot, ProjectileOwner};

    use super::*;

    fn hud() -> HudSnapshot {
        HudSnapshot {
            score: 120,
            lives: 2,
            hp: 25,
            max_hp: 30,
            wave: 3,
            kills: 14,
            elapsed: Duration::from_secs(90),
            session: SessionState::Playing,
            ammo: Some(40),
        }
    }

    #[test]
    fn arena_rejects_degenerate_dimensions() {
        assert_eq!(
            ArenaPresentation::new(0.0, 600.0),
            Err(PresentationError::DegenerateArena {
                width: 0.0,
                height: 600.0
            })
        );
    }

    #[test]
    fn scene_maps_every_snapshot_to_a_sprite() {
        let arena = ArenaPresentation::new(800.0, 600.0).expect("valid arena");
        let view = EntityView::from_snapshots(vec![
            EntitySnapshot {
                id: EntityId::new(0),
                kind: EntityKind::Player,
                position: Vec2::new(400.0, 300.0),
                velocity: Vec2::ZERO,
                radius: 16.0,
                hp: 30,
                facing: 0.0,
            },
            EntitySnapshot {
                id: EntityId::new(1),
                kind: EntityKind::Hostile(HostileKind::Asteroid {
                    tier: SizeTier::Medium,
                }),
                position: Vec2::new(100.0, 100.0),
                velocity: Vec2::ZERO,
                radius: SizeTier::Medium.radius(),
                hp: 1,
                facing: 0.0,
            },
            EntitySnapshot {
                id: EntityId::new(2),
                kind: EntityKind::Projectile(ProjectileOwner::Saucer {
                    firer: EntityId::new(9),
                }),
                position: Vec2::new(50.0, 50.0),
                velocity: Vec2::ZERO,
                radius: 4.0,
                hp: 1,
                facing: 0.0,
            },
        ]);

        let scene = Scene::from_snapshots(arena, &view, hud());
        let kinds: Vec<SpriteKind> = scene.sprites.iter().map(|sprite| sprite.kind).collect();
        assert_eq!(
            kinds,
            vec![
                SpriteKind::Ship,
                SpriteKind::AsteroidMedium,
                SpriteKind::SaucerShot
            ]
        );
        assert_eq!(scene.hud.health, (25, 30));
        assert_eq!(scene.hud.ammo, Some(40));
    }

    #[test]
    fn null_cue_sink_swallows_cues() {
        let mut sink = NullCueSink;
        sink.play(AudioCue::ExplosionLarge);
        sink.play(AudioCue::Hyperspace);
    }
}
