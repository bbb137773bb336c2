#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Frame orchestration for Astro Siege.
//!
//! [`Session`] owns the world plus the pure systems and runs the per-frame
//! pipeline: the tick command mutates the world first, the spawn director
//! then reacts to the accumulated event stream, and the collision resolver
//! finally sweeps the fresh entity view. Commands emitted by systems are
//! applied immediately and their events join the frame log, so adapters
//! observe one flat, ordered event sequence per frame.

use std::time::Duration;

use astro_siege_core::{
    ArenaBounds, Command, Event, HudSnapshot, InputFrame, PlayerStatus, SessionState, WorldTuning,
};
use astro_siege_system_collision::CollisionResolver;
use astro_siege_system_spawning::{Config as DirectorConfig, SpawnDirector};
use astro_siege_world::{self as world, query, World};

/// Owns the simulation and drives it one frame at a time.
#[derive(Debug)]
pub struct Session {
    world: World,
    director: SpawnDirector,
    resolver: CollisionResolver,
    // Events produced after the director last ran; it sees them next frame.
    deferred: Vec<Event>,
}

impl Session {
    /// Assembles a session from explicitly constructed parts.
    #[must_use]
    pub fn new(world: World, director: SpawnDirector) -> Self {
        Self {
            world,
            director,
            resolver: CollisionResolver::new(),
            deferred: Vec::new(),
        }
    }

    /// Assembles a session with default tuning and the provided seed.
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self::new(
            World::new(),
            SpawnDirector::new(DirectorConfig::with_seed(seed)),
        )
    }

    /// Assembles a session with custom world tuning.
    #[must_use]
    pub fn with_tuning(
        tuning: WorldTuning,
        arena: ArenaBounds,
        director: DirectorConfig,
        world_seed: u64,
    ) -> Self {
        Self::new(
            World::with_tuning(tuning, arena, world_seed),
            SpawnDirector::new(director),
        )
    }

    /// Requests the transition out of the start screen.
    pub fn begin(&mut self) -> Vec<Event> {
        self.apply_deferred(Command::Begin)
    }

    /// Requests a reinitialization after a terminal state.
    pub fn restart(&mut self) -> Vec<Event> {
        self.apply_deferred(Command::Restart)
    }

    /// Advances the simulation by `dt` under the captured input.
    pub fn tick(&mut self, dt: Duration, input: InputFrame) -> Vec<Event> {
        let mut frame_log = Vec::new();
        world::apply(&mut self.world, Command::Tick { dt, input }, &mut frame_log);

        let mut director_batch = std::mem::take(&mut self.deferred);
        director_batch.extend(frame_log.iter().cloned());

        let mut commands = Vec::new();
        self.director.handle(
            &director_batch,
            query::session(&self.world),
            query::hostile_census(&self.world),
            query::hud(&self.world).wave,
            query::player(&self.world).map(|status| status.position),
            query::arena(&self.world),
            &mut commands,
        );
        for command in commands {
            let mut events = Vec::new();
            world::apply(&mut self.world, command, &mut events);
            self.deferred.extend(events.iter().cloned());
            frame_log.extend(events);
        }

        let view = query::entity_view(&self.world);
        let mut impacts = Vec::new();
        self.resolver
            .handle(&view, query::player(&self.world), &mut impacts);
        for command in impacts {
            let mut events = Vec::new();
            world::apply(&mut self.world, command, &mut events);
            self.deferred.extend(events.iter().cloned());
            frame_log.extend(events);
        }

        frame_log
    }

    /// Current session state.
    #[must_use]
    pub fn state(&self) -> SessionState {
        query::session(&self.world)
    }

    /// HUD snapshot for presentation adapters.
    #[must_use]
    pub fn hud(&self) -> HudSnapshot {
        query::hud(&self.world)
    }

    /// Player status, if a ship is alive.
    #[must_use]
    pub fn player(&self) -> Option<PlayerStatus> {
        query::player(&self.world)
    }

    /// Arena the simulation runs in.
    #[must_use]
    pub fn arena(&self) -> ArenaBounds {
        query::arena(&self.world)
    }

    /// Read-only access to the owned world for snapshot queries.
    #[must_use]
    pub fn world(&self) -> &World {
        &self.world
    }

    fn apply_deferred(&mut self, command: Command) -> Vec<Event> {
        let mut events = Vec::new();
        world::apply(&mut self.world, command, &mut events);
        self.deferred.extend(events.iter().cloned());
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn begin_enters_play() {
        let mut session = Session::with_seed(11);
        assert_eq!(session.state(), SessionState::Start);

        let events = session.begin();
        assert_eq!(session.state(), SessionState::Playing);
        assert!(events.iter().any(|event| matches!(
            event,
            Event::SessionChanged {
                state: SessionState::Playing
            }
        )));
    }

    #[test]
    fn first_wave_arrives_after_the_delay() {
        let mut session = Session::with_seed(11);
        let _ = session.begin();

        let mut saw_wave = None;
        for _ in 0..40 {
            let events = session.tick(Duration::from_millis(100), InputFrame::default());
            if let Some(Event::WaveStarted { wave, hostiles }) =
                events.iter().find(|event| matches!(event, Event::WaveStarted { .. }))
            {
                saw_wave = Some((*wave, *hostiles));
                break;
            }
        }
        assert_eq!(saw_wave, Some((1, 4)));
    }

    #[test]
    fn ticks_before_begin_do_nothing() {
        let mut session = Session::with_seed(11);
        let events = session.tick(Duration::from_secs(5), InputFrame::default());
        assert!(events.is_empty());
        assert_eq!(session.state(), SessionState::Start);
    }
}
