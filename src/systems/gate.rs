use amethyst::{
    core::{timing::Time, SystemDesc},
    derive::SystemDesc,
    ecs::prelude::{Entities, Join, Read, ReadStorage, System, SystemData, World, Write, WriteStorage},
};
use log::{debug, warn};

use crate::audio::{play, Cue, SoundOutput};
use crate::pong::{Ball, GameRng, GameState, Gate, GateKind, GateSpawner, GATE_SPAWN_INTERVAL, MAX_GATES};
use crate::util::delta_ms;

/// Drops a random gate onto the court every few seconds, up to `MAX_GATES`.
///
/// The clock keeps running between rounds, so the first gate of a round can
/// appear as soon as play resumes.
#[derive(SystemDesc)]
pub struct GateSpawnSystem;

impl<'s> System<'s> for GateSpawnSystem {
    type SystemData = (
        Entities<'s>,
        WriteStorage<'s, Gate>,
        Write<'s, GateSpawner>,
        Write<'s, GameRng>,
        Read<'s, GameState>,
        Read<'s, Time>,
    );

    fn run(&mut self, (entities, mut gates, mut spawner, mut rng, state, time): Self::SystemData) {
        spawner.since_last_spawn += delta_ms(&time);
        if !state.is_playing() {
            return;
        }
        if (&gates).join().count() >= MAX_GATES || spawner.since_last_spawn <= GATE_SPAWN_INTERVAL {
            return;
        }

        let gate = Gate::random(&mut rng.0);
        debug!("spawning {} gate at ({}, {})", gate.kind(), gate.rect().x, gate.rect().y);
        entities.build_entity().with(gate, &mut gates).build();
        spawner.since_last_spawn = 0.0;
    }
}

/// Applies a gate's speed factor to the ball that touches it and consumes the gate.
#[derive(SystemDesc)]
pub struct GateSystem;

impl<'s> System<'s> for GateSystem {
    type SystemData = (
        Entities<'s>,
        ReadStorage<'s, Gate>,
        WriteStorage<'s, Ball>,
        Read<'s, GameState>,
        SoundOutput<'s>,
    );

    fn run(&mut self, (entities, gates, mut balls, state, audio): Self::SystemData) {
        if !state.is_playing() {
            return;
        }
        for ball in (&mut balls).join() {
            for (entity, gate) in (&*entities, &gates).join() {
                if !gate.rect().overlaps(&ball.rect) {
                    continue;
                }
                let kind = *gate.kind();
                debug!("ball hit {} gate", kind);
                ball.scale_velocity(kind.factor());
                play(&audio, match kind {
                    GateKind::SpeedUp => Cue::SpeedUp,
                    GateKind::SlowDown => Cue::SlowDown,
                });
                if let Err(e) = entities.delete(entity) {
                    warn!("gate already gone: {:?}", e);
                }
            }
        }
    }
}
