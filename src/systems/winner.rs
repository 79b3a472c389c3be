use amethyst::{
    audio::AudioSink,
    core::SystemDesc,
    derive::SystemDesc,
    ecs::prelude::{Entities, Join, Read, ReadStorage, System, SystemData, World, Write, WriteStorage},
};
use log::info;

use crate::audio::{play, Cue, Music, SoundOutput};
use crate::pong::{
    despawn_gates, Ball, GameRng, GameState, Gate, Paddle, ScoreBoard, Side, SCREEN_WIDTH, WINNING_SCORE,
};

/// Scores a ball that reached the left or right edge and resets the round.
#[derive(SystemDesc)]
pub struct WinnerSystem;

impl <'s> System<'s> for WinnerSystem {
    type SystemData = (
        Entities<'s>,
        WriteStorage<'s, Ball>,
        WriteStorage<'s, Paddle>,
        ReadStorage<'s, Gate>,
        Write<'s, ScoreBoard>,
        Write<'s, GameState>,
        Write<'s, GameRng>,
        Option<Write<'s, Music>>,
        Option<Read<'s, AudioSink>>,
        SoundOutput<'s>,
    );
    fn run(
        &mut self,
        (entities, mut balls, mut paddles, gates, mut score_board, mut state, mut rng, mut music, sink, audio): Self::SystemData,
    ) {
        if !state.is_playing() {
            return;
        }
        for ball in (&mut balls).join() {
            let scorer = if ball.rect.left() <= 0.0 {
                Side::Right
            } else if ball.rect.right() >= SCREEN_WIDTH {
                Side::Left
            } else {
                continue;
            };

            let score = score_board.award(scorer);
            info!("player {} scores, {}", scorer.player_number(), *score_board);
            play(&audio, Cue::Score);

            ball.serve(&mut rng.0);
            despawn_gates(&entities, &gates);
            for paddle in (&mut paddles).join() {
                paddle.velocity = 0.0;
            }

            if score >= WINNING_SCORE {
                info!("player {} wins", scorer.player_number());
                *state = GameState::GameOver;
                if let Some(music) = music.as_mut() {
                    music.stop();
                }
                if let Some(sink) = sink.as_ref() {
                    sink.stop();
                }
            } else {
                *state = GameState::NotStarted;
            }
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use amethyst::ecs::{Builder, WorldExt};
    use crate::audio::test_music;
    use crate::pong::GateKind;
    use crate::systems::testing::{playing_world, run};
    use crate::util::Rect;

    fn setup(ball_x: f32, velocity: (f32, f32)) -> World {
        let mut world = playing_world();
        world.register::<Paddle>();
        world.register::<Ball>();
        world.register::<Gate>();
        let mut paddle = Paddle::new(Side::Left);
        paddle.velocity = 0.8;
        world.create_entity().with(paddle).build();
        world.create_entity().with(Paddle::new(Side::Right)).build();
        world.create_entity().with(Gate::new(GateKind::SpeedUp, 300.0, 100.0)).build();
        world.create_entity().with(Gate::new(GateKind::SlowDown, 600.0, 400.0)).build();

        let mut ball = Ball::new(&mut GameRng::seeded(0).0);
        ball.rect = Rect::new(ball_x, 200.0, 25.0, 25.0);
        ball.velocity_x = velocity.0;
        ball.velocity_y = velocity.1;
        world.create_entity().with(ball).build();
        world.insert(test_music());
        world
    }

    fn ball_center(world: &World) -> (f32, f32) {
        let balls = world.read_storage::<Ball>();
        let ball = (&balls).join().next().expect("ball");
        ball.rect.center()
    }

    #[test]
    fn ball_past_left_edge_scores_for_player_two() {
        let mut world = setup(-1.0, (-0.3, -0.3));

        run(&mut world, WinnerSystem);

        let scores = world.read_resource::<ScoreBoard>();
        assert_eq!((scores.score_left, scores.score_right), (0, 1));
        assert_eq!(ball_center(&world), (480.0, 360.0));
        assert_eq!(*world.read_resource::<GameState>(), GameState::NotStarted);
        assert_eq!(world.read_storage::<Gate>().join().count(), 0);
        assert!(world.read_storage::<Paddle>().join().all(|p| p.velocity == 0.0));
        assert!(world.write_resource::<Music>().next().is_some());
    }

    #[test]
    fn ball_past_right_edge_scores_for_player_one() {
        let mut world = setup(936.0, (0.3, 0.3));

        run(&mut world, WinnerSystem);

        let scores = world.read_resource::<ScoreBoard>();
        assert_eq!((scores.score_left, scores.score_right), (1, 0));
        assert_eq!(ball_center(&world), (480.0, 360.0));
    }

    #[test]
    fn ball_in_play_scores_nothing() {
        let mut world = setup(400.0, (0.3, 0.3));

        run(&mut world, WinnerSystem);

        let scores = world.read_resource::<ScoreBoard>();
        assert_eq!((scores.score_left, scores.score_right), (0, 0));
        assert_eq!(*world.read_resource::<GameState>(), GameState::Playing);
        assert_eq!(world.read_storage::<Gate>().join().count(), 2);
    }

    #[test]
    fn third_point_ends_the_game() {
        let mut world = setup(0.0, (-0.5, 0.5));
        world.write_resource::<ScoreBoard>().score_right = WINNING_SCORE - 1;

        run(&mut world, WinnerSystem);

        assert_eq!(world.read_resource::<ScoreBoard>().winner(), Some(Side::Right));
        assert_eq!(*world.read_resource::<GameState>(), GameState::GameOver);
        let mut music = world.write_resource::<Music>();
        assert!(!music.is_playing());
        assert!(music.next().is_none());
    }

    #[test]
    fn scores_are_frozen_after_game_over() {
        let mut world = setup(-5.0, (-0.3, 0.3));
        world.write_resource::<ScoreBoard>().score_left = WINNING_SCORE;
        *world.write_resource::<GameState>() = GameState::GameOver;

        run(&mut world, WinnerSystem);

        let scores = world.read_resource::<ScoreBoard>();
        assert_eq!((scores.score_left, scores.score_right), (WINNING_SCORE, 0));
    }
}
