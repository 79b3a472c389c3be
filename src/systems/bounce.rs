use amethyst::{
    core::SystemDesc,
    derive::SystemDesc,
    ecs::prelude::{Join, Read, ReadStorage, System, SystemData, World, WriteStorage},
};

use crate::audio::{play, Cue, SoundOutput};
use crate::pong::{Ball, GameState, Paddle, Side, PADDLE_HIT_CLEARANCE, PADDLE_HIT_FACTOR, SCREEN_HEIGHT};

/// Wall and paddle collisions.
///
/// A paddle only returns a ball that is heading toward it, and the ball is
/// then moved clear of the paddle instead of being resolved exactly. A frame
/// long enough to carry the ball through the clearance can still hit twice.
#[derive(SystemDesc)]
pub struct BounceSystem;

impl <'s> System<'s> for BounceSystem {
    type SystemData = (
        ReadStorage<'s, Paddle>,
        WriteStorage<'s, Ball>,
        Read<'s, GameState>,
        SoundOutput<'s>,
    );
    fn run(&mut self, (paddles, mut balls, state, audio): Self::SystemData) {
        if !state.is_playing() {
            return;
        }
        for ball in (&mut balls).join() {
            if ball.rect.top() <= 0.0 || ball.rect.bottom() >= SCREEN_HEIGHT {
                ball.velocity_y = -ball.velocity_y;
            }

            for paddle in (&paddles).join() {
                if paddle.rect.overlaps(&ball.rect) && ball.is_moving_toward(paddle.side) {
                    ball.velocity_x *= -PADDLE_HIT_FACTOR;
                    ball.velocity_y *= PADDLE_HIT_FACTOR;
                    match paddle.side {
                        Side::Left => ball.rect.set_left(paddle.rect.right() + PADDLE_HIT_CLEARANCE),
                        Side::Right => ball.rect.set_right(paddle.rect.left() - PADDLE_HIT_CLEARANCE),
                    }
                    play(&audio, Cue::PaddleHit);
                }
            }
        }
    }
}
