use amethyst::{
    core::timing::Time,
    core::SystemDesc,
    derive::SystemDesc,
    ecs::prelude::{Join, Read, System, SystemData, World, WriteStorage},
};

use crate::pong::{Ball, GameState};
use crate::util::delta_ms;

#[derive(SystemDesc)]
pub struct MoveSystem;

impl <'s> System<'s> for MoveSystem {
    type SystemData = (
        WriteStorage<'s, Ball>,
        Read<'s, Time>,
        Read<'s, GameState>,
    );
    fn run(&mut self, (mut balls, time, state): Self::SystemData) {
        if !state.is_playing() {
            return;
        }
        let delta = delta_ms(&time);
        for ball in (&mut balls).join() {
            ball.rect.x += ball.velocity_x * delta;
            ball.rect.y += ball.velocity_y * delta;
        }
    }
}
