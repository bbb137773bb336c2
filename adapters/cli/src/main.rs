#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that drives a headless Astro Siege session.
//!
//! The binary assembles the simulation, feeds it a scripted pilot for a
//! bounded number of frames, routes audio cues into the log, and prints a
//! closing summary. Set `ASTRO_SIEGE_SEED` to replay a specific run and
//! `RUST_LOG` to control verbosity.

use std::time::Duration;

use anyhow::{Context, Result};
use astro_siege_core::{AudioCue, Event, InputFrame};
use astro_siege_rendering::{ArenaPresentation, CueSink, Scene};
use astro_siege_session::Session;
use astro_siege_world::query;
use glam::Vec2;
use log::{debug, info};

const FRAME: Duration = Duration::from_millis(16);
const MAX_FRAMES: u32 = 18_750; // five simulated minutes

const SEED_VAR: &str = "ASTRO_SIEGE_SEED";
const DEFAULT_SEED: u64 = 0xa5_7205_1e6e;

/// Cue sink that forwards every cue to the log.
#[derive(Debug, Default)]
struct LoggingCueSink;

impl CueSink for LoggingCueSink {
    fn play(&mut self, cue: AudioCue) {
        debug!("cue: {cue:?}");
    }
}

fn resolve_seed() -> Result<u64> {
    match std::env::var(SEED_VAR) {
        Ok(raw) => raw
            .parse::<u64>()
            .with_context(|| format!("{SEED_VAR} must hold an unsigned integer, got {raw:?}")),
        Err(std::env::VarError::NotPresent) => Ok(DEFAULT_SEED),
        Err(error) => Err(error).context(format!("{SEED_VAR} is not valid unicode")),
    }
}

/// Scripted pilot: circles the arena and fires continuously.
fn scripted_input(frame: u32) -> InputFrame {
    let heading = match (frame / 120) % 4 {
        0 => Vec2::new(1.0, 0.0),
        1 => Vec2::new(0.0, 1.0),
        2 => Vec2::new(-1.0, 0.0),
        _ => Vec2::new(0.0, -1.0),
    };
    InputFrame {
        movement: heading,
        fire: true,
        hyperspace: false,
        quit: false,
    }
}

fn announce(events: &[Event], cues: &mut LoggingCueSink) {
    for event in events {
        match event {
            Event::SessionChanged { state } => info!("session -> {state:?}"),
            Event::WaveStarted { wave, hostiles } => {
                info!("wave {wave} inbound with {hostiles} hostiles");
            }
            Event::HostileDestroyed { kind, kills, .. } => {
                debug!("destroyed {kind:?}, {kills} kills total");
            }
            Event::PlayerHit { hp, lives } => info!("ship hit: {hp} hp, {lives} lives"),
            Event::Cue(cue) => cues.play(*cue),
            _ => {}
        }
    }
}

/// Entry point for the Astro Siege command-line interface.
fn main() -> Result<()> {
    env_logger::init();

    let seed = resolve_seed()?;
    info!("starting session with seed {seed:#x}");

    let mut session = Session::with_seed(seed);
    let mut cues = LoggingCueSink;
    announce(&session.begin(), &mut cues);

    let mut frames_run = 0;
    for frame in 0..MAX_FRAMES {
        let input = scripted_input(frame);
        let events = session.tick(FRAME, input);
        announce(&events, &mut cues);
        frames_run = frame + 1;
        if session.state().is_terminal() {
            break;
        }
    }

    let arena = session.arena();
    let scene = Scene::from_snapshots(
        ArenaPresentation::new(arena.width(), arena.height())?,
        &query::entity_view(session.world()),
        session.hud(),
    );

    let hud = session.hud();
    info!(
        "finished after {frames_run} frames in {:?}: score {}, wave {}, {} kills, {} sprites live",
        hud.elapsed,
        hud.score,
        hud.wave,
        hud.kills,
        scene.sprites.len()
    );
    println!(
        "{:?} | score {} | wave {} | kills {} | elapsed {:?}",
        hud.session, hud.score, hud.wave, hud.kills, hud.elapsed
    );

    Ok(())
}
