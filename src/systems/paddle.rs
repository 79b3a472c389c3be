use amethyst::core::{SystemDesc, timing::Time};
use amethyst::derive::SystemDesc;
use amethyst::ecs::{Join, Read, System, SystemData, World, WriteStorage};
use amethyst::input::{InputHandler, StringBindings};

use crate::pong::{GameState, Paddle, Side};
use crate::util::delta_ms;

/// Moves each paddle from its held keys. No debouncing: the axis is sampled every frame.
#[derive(SystemDesc)]
pub struct PaddleSystem;

impl<'s> System<'s> for PaddleSystem {
    type SystemData = (
        WriteStorage<'s, Paddle>,
        Read<'s, InputHandler<StringBindings>>,
        Read<'s, Time>,
        Read<'s, GameState>,
    );

    fn run(&mut self, (mut paddles, input, time, state): Self::SystemData) {
        if !state.is_playing() {
            return;
        }
        let delta = delta_ms(&time);

        for paddle in (&mut paddles).join() {
            let axis = match paddle.side {
                Side::Left => input.axis_value("left_paddle"),
                Side::Right => input.axis_value("right_paddle"),
            };
            paddle.steer(axis.unwrap_or(0.0));
            paddle.advance(delta);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use amethyst::ecs::{Builder, WorldExt};
    use crate::systems::testing::{playing_world, run};

    #[test]
    fn idle_input_stops_the_paddle() {
        let mut world = playing_world();
        let mut paddle = Paddle::new(Side::Left);
        paddle.velocity = 0.8;
        let before = paddle.rect;
        world.register::<Paddle>();
        world.create_entity().with(paddle).build();

        run(&mut world, PaddleSystem);

        let paddles = world.read_storage::<Paddle>();
        let paddle = (&paddles).join().next().expect("paddle");
        assert_eq!(paddle.velocity, 0.0);
        assert_eq!(paddle.rect, before);
    }

    #[test]
    fn frozen_outside_play() {
        let mut world = playing_world();
        *world.write_resource::<GameState>() = GameState::NotStarted;
        let mut paddle = Paddle::new(Side::Right);
        paddle.velocity = -0.8;
        world.register::<Paddle>();
        world.create_entity().with(paddle).build();

        run(&mut world, PaddleSystem);

        let paddles = world.read_storage::<Paddle>();
        let paddle = (&paddles).join().next().expect("paddle");
        assert_eq!(paddle.velocity, -0.8);
        assert_eq!(paddle.rect.top(), 310.0);
    }
}
