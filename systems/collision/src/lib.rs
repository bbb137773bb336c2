#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Two-phase collision resolution for Astro Siege.
//!
//! The [`CollisionResolver`] is a pure system over a read-only entity view.
//! Phase one sweeps every unordered entity pair, keeps the ones whose circles
//! strictly overlap and whose kinds have an impact policy, and orders the
//! resulting contacts nearest-first. Phase two walks that ordering and emits
//! impact commands, gating each projectile to a single target, the player to
//! a single touch, each saucer to a single wreck, and each pickup to a single
//! collection per tick. Ordering before gating keeps the outcome independent
//! of entity insertion order.

use std::collections::HashSet;

use astro_siege_core::{
    Command, EntityId, EntityKind, EntitySnapshot, EntityView, HostileKind, PlayerStatus,
    ProjectileOwner,
};

/// Impact policy selected for a strictly overlapping pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Impact {
    /// Ship projectile `a` damages hostile `b`.
    Strike,
    /// Hostile body or saucer projectile `a` touches the player.
    Touch,
    /// Saucer `a` rams asteroid `b` and is wrecked.
    Wreck,
    /// Player collects pickup `b`.
    Collect,
}

#[derive(Clone, Copy, Debug)]
struct Contact {
    distance_squared: f32,
    a: EntityId,
    b: EntityId,
    impact: Impact,
}

/// Pure system that turns geometric overlap into impact commands.
#[derive(Debug, Default)]
pub struct CollisionResolver;

impl CollisionResolver {
    /// Creates a new resolver.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Sweeps the view and emits impact commands for this tick.
    ///
    /// `player` carries the status the view cannot express; touches are
    /// withheld entirely while the invulnerability window is open.
    pub fn handle(
        &self,
        view: &EntityView,
        player: Option<PlayerStatus>,
        out: &mut Vec<Command>,
    ) {
        let player_shielded = player.is_some_and(|status| !status.invulnerability.is_zero());

        let snapshots: Vec<&EntitySnapshot> = view.iter().collect();
        let mut contacts = Vec::new();

        for (index, first) in snapshots.iter().enumerate() {
            for second in &snapshots[index + 1..] {
                let Some((impact, a, b)) = classify(first, second) else {
                    continue;
                };
                if impact == Impact::Touch && player_shielded {
                    continue;
                }

                let distance_squared = first.position.distance_squared(second.position);
                let reach = first.radius + second.radius;
                // Boundary contact is exclusive: exact tangency is a miss.
                if distance_squared >= reach * reach {
                    continue;
                }
                contacts.push(Contact {
                    distance_squared,
                    a,
                    b,
                    impact,
                });
            }
        }

        contacts.sort_by(|left, right| {
            left.distance_squared
                .total_cmp(&right.distance_squared)
                .then_with(|| (left.a, left.b).cmp(&(right.a, right.b)))
        });

        let mut spent_projectiles: HashSet<EntityId> = HashSet::new();
        let mut wrecked_saucers: HashSet<EntityId> = HashSet::new();
        let mut collected_pickups: HashSet<EntityId> = HashSet::new();
        let mut player_touched = false;

        for contact in contacts {
            match contact.impact {
                Impact::Strike => {
                    if !spent_projectiles.insert(contact.a) {
                        continue;
                    }
                    out.push(Command::Strike {
                        projectile: contact.a,
                        target: contact.b,
                    });
                }
                Impact::Touch => {
                    if player_touched {
                        continue;
                    }
                    player_touched = true;
                    out.push(Command::TouchPlayer { toucher: contact.a });
                }
                Impact::Wreck => {
                    if !wrecked_saucers.insert(contact.a) {
                        continue;
                    }
                    out.push(Command::HostileCollision {
                        saucer: contact.a,
                        asteroid: contact.b,
                    });
                }
                Impact::Collect => {
                    if !collected_pickups.insert(contact.b) {
                        continue;
                    }
                    out.push(Command::CollectPickup { pickup: contact.b });
                }
            }
        }
    }
}

/// Maps an unordered snapshot pair to its impact policy, if any.
///
/// Returns the policy together with the ids in policy order: the acting
/// entity first, the acted-upon entity second.
fn classify(
    first: &EntitySnapshot,
    second: &EntitySnapshot,
) -> Option<(Impact, EntityId, EntityId)> {
    match (first.kind, second.kind) {
        (EntityKind::Projectile(owner), EntityKind::Hostile(_)) if owner.is_ship() => {
            Some((Impact::Strike, first.id, second.id))
        }
        (EntityKind::Hostile(_), EntityKind::Projectile(owner)) if owner.is_ship() => {
            Some((Impact::Strike, second.id, first.id))
        }
        (EntityKind::Hostile(_), EntityKind::Player) => Some((Impact::Touch, first.id, second.id)),
        (EntityKind::Player, EntityKind::Hostile(_)) => Some((Impact::Touch, second.id, first.id)),
        (EntityKind::Projectile(ProjectileOwner::Saucer { .. }), EntityKind::Player) => {
            Some((Impact::Touch, first.id, second.id))
        }
        (EntityKind::Player, EntityKind::Projectile(ProjectileOwner::Saucer { .. })) => {
            Some((Impact::Touch, second.id, first.id))
        }
        (
            EntityKind::Hostile(HostileKind::Saucer { .. }),
            EntityKind::Hostile(HostileKind::Asteroid { .. }),
        ) => Some((Impact::Wreck, first.id, second.id)),
        (
            EntityKind::Hostile(HostileKind::Asteroid { .. }),
            EntityKind::Hostile(HostileKind::Saucer { .. }),
        ) => Some((Impact::Wreck, second.id, first.id)),
        (EntityKind::Player, EntityKind::Pickup(_)) => {
            Some((Impact::Collect, first.id, second.id))
        }
        (EntityKind::Pickup(_), EntityKind::Player) => {
            Some((Impact::Collect, second.id, first.id))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use astro_siege_core::SizeTier;
    use glam::Vec2;

    use super::*;

    fn snapshot(id: u32, kind: EntityKind, position: Vec2, radius: f32) -> EntitySnapshot {
        EntitySnapshot {
            id: EntityId::new(id),
            kind,
            position,
            velocity: Vec2::ZERO,
            radius,
            hp: 1,
            facing: 0.0,
        }
    }

    fn player_at(id: u32, position: Vec2) -> EntitySnapshot {
        snapshot(id, EntityKind::Player, position, 16.0)
    }

    fn asteroid_at(id: u32, position: Vec2, tier: SizeTier) -> EntitySnapshot {
        snapshot(
            id,
            EntityKind::Hostile(HostileKind::Asteroid { tier }),
            position,
            tier.radius(),
        )
    }

    fn ship_shot_at(id: u32, position: Vec2) -> EntitySnapshot {
        snapshot(
            id,
            EntityKind::Projectile(ProjectileOwner::Ship {
                firer: EntityId::new(0),
            }),
            position,
            4.0,
        )
    }

    fn vulnerable_player() -> Option<PlayerStatus> {
        Some(PlayerStatus {
            position: Vec2::ZERO,
            hp: 30,
            max_hp: 30,
            lives: 3,
            invulnerability: Duration::ZERO,
            ammo: None,
        })
    }

    fn resolve(snapshots: Vec<EntitySnapshot>, player: Option<PlayerStatus>) -> Vec<Command> {
        let mut out = Vec::new();
        CollisionResolver::new().handle(&EntityView::from_snapshots(snapshots), player, &mut out);
        out
    }

    #[test]
    fn tangent_circles_do_not_collide() {
        let shot = ship_shot_at(1, Vec2::new(0.0, 0.0));
        let rock = asteroid_at(2, Vec2::new(4.0 + SizeTier::Small.radius(), 0.0), SizeTier::Small);
        assert!(resolve(vec![shot, rock], None).is_empty());
    }

    #[test]
    fn strict_overlap_strikes() {
        let shot = ship_shot_at(1, Vec2::new(0.0, 0.0));
        let rock = asteroid_at(2, Vec2::new(10.0, 0.0), SizeTier::Small);
        assert_eq!(
            resolve(vec![shot, rock], None),
            vec![Command::Strike {
                projectile: EntityId::new(1),
                target: EntityId::new(2),
            }]
        );
    }

    #[test]
    fn projectile_strikes_only_nearest_target() {
        let shot = ship_shot_at(1, Vec2::new(0.0, 0.0));
        let near = asteroid_at(2, Vec2::new(8.0, 0.0), SizeTier::Small);
        let far = asteroid_at(3, Vec2::new(12.0, 0.0), SizeTier::Small);
        assert_eq!(
            resolve(vec![shot, far, near], None),
            vec![Command::Strike {
                projectile: EntityId::new(1),
                target: EntityId::new(2),
            }]
        );
    }

    #[test]
    fn equidistant_targets_break_ties_by_id() {
        let shot = ship_shot_at(5, Vec2::new(0.0, 0.0));
        let left = asteroid_at(9, Vec2::new(-8.0, 0.0), SizeTier::Small);
        let right = asteroid_at(3, Vec2::new(8.0, 0.0), SizeTier::Small);
        assert_eq!(
            resolve(vec![shot, left, right], None),
            vec![Command::Strike {
                projectile: EntityId::new(5),
                target: EntityId::new(3),
            }]
        );
    }

    #[test]
    fn player_takes_at_most_one_touch_per_tick() {
        let player = player_at(0, Vec2::ZERO);
        let first = asteroid_at(1, Vec2::new(5.0, 0.0), SizeTier::Small);
        let second = asteroid_at(2, Vec2::new(0.0, 6.0), SizeTier::Small);
        assert_eq!(
            resolve(vec![player, first, second], vulnerable_player()),
            vec![Command::TouchPlayer {
                toucher: EntityId::new(1),
            }]
        );
    }

    #[test]
    fn invulnerable_player_is_never_touched() {
        let mut status = vulnerable_player().expect("status");
        status.invulnerability = Duration::from_millis(500);

        let player = player_at(0, Vec2::ZERO);
        let rock = asteroid_at(1, Vec2::new(5.0, 0.0), SizeTier::Small);
        assert!(resolve(vec![player, rock], Some(status)).is_empty());
    }

    #[test]
    fn saucer_shot_touches_player_but_ship_shot_does_not() {
        let player = player_at(0, Vec2::ZERO);
        let own_shot = ship_shot_at(1, Vec2::new(2.0, 0.0));
        assert!(resolve(vec![player, own_shot], vulnerable_player()).is_empty());

        let player = player_at(0, Vec2::ZERO);
        let hostile_shot = snapshot(
            2,
            EntityKind::Projectile(ProjectileOwner::Saucer {
                firer: EntityId::new(7),
            }),
            Vec2::new(2.0, 0.0),
            4.0,
        );
        assert_eq!(
            resolve(vec![player, hostile_shot], vulnerable_player()),
            vec![Command::TouchPlayer {
                toucher: EntityId::new(2),
            }]
        );
    }

    #[test]
    fn saucer_ramming_asteroid_emits_wreck() {
        let saucer = snapshot(
            4,
            EntityKind::Hostile(HostileKind::Saucer { aggressive: false }),
            Vec2::ZERO,
            HostileKind::Saucer { aggressive: false }.radius(),
        );
        let rock = asteroid_at(6, Vec2::new(20.0, 0.0), SizeTier::Small);
        assert_eq!(
            resolve(vec![saucer, rock], None),
            vec![Command::HostileCollision {
                saucer: EntityId::new(4),
                asteroid: EntityId::new(6),
            }]
        );
    }

    #[test]
    fn asteroids_pass_through_each_other() {
        let first = asteroid_at(1, Vec2::ZERO, SizeTier::Large);
        let second = asteroid_at(2, Vec2::new(10.0, 0.0), SizeTier::Large);
        assert!(resolve(vec![first, second], None).is_empty());
    }

    #[test]
    fn overlapping_pickup_is_collected_once() {
        let player = player_at(0, Vec2::ZERO);
        let pickup = snapshot(
            3,
            EntityKind::Pickup(astro_siege_core::PickupKind::Medkit),
            Vec2::new(5.0, 0.0),
            20.0,
        );
        assert_eq!(
            resolve(vec![player, pickup], vulnerable_player()),
            vec![Command::CollectPickup {
                pickup: EntityId::new(3),
            }]
        );
    }

    #[test]
    fn resolution_is_independent_of_insertion_order() {
        let build = |ids: [u32; 3]| {
            vec![
                ship_shot_at(ids[0], Vec2::ZERO),
                asteroid_at(ids[1], Vec2::new(8.0, 0.0), SizeTier::Small),
                asteroid_at(ids[2], Vec2::new(-8.0, 0.0), SizeTier::Small),
            ]
        };

        let mut forward = build([1, 2, 3]);
        let reversed: Vec<EntitySnapshot> = {
            let mut entities = forward.clone();
            entities.reverse();
            entities
        };
        forward.rotate_left(1);

        assert_eq!(resolve(forward, None), resolve(reversed, None));
    }
}
