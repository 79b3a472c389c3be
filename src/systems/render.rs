use amethyst::{
    core::{math::Vector3, transform::Transform, Hidden, SystemDesc},
    derive::SystemDesc,
    ecs::prelude::{Component, Entities, Entity, Join, Read, ReadStorage, System, SystemData, World, WriteStorage},
    renderer::{resources::Tint, SpriteRender},
};
use log::warn;

use crate::pong::{Ball, GameState, Gate, Paddle, PongSprites, CIRCLE_SPRITE, SCREEN_HEIGHT, SQUARE_SPRITE};
use crate::util::Rect;

/// Side length in pixels of each sprite in `texture/pong_spritesheet.png`.
pub const SPRITE_SIZE: f32 = 16.0;

/// Mirrors the screen-space rectangles of paddles, ball and gates into the
/// renderer's y-up world. Gate colour comes from the gate kind every frame.
/// Outside of play only the HUD is drawn, so the court is hidden.
#[derive(SystemDesc)]
pub struct RenderSyncSystem;

impl<'s> System<'s> for RenderSyncSystem {
    type SystemData = (
        Entities<'s>,
        ReadStorage<'s, Paddle>,
        ReadStorage<'s, Ball>,
        ReadStorage<'s, Gate>,
        WriteStorage<'s, Transform>,
        WriteStorage<'s, SpriteRender>,
        WriteStorage<'s, Tint>,
        WriteStorage<'s, Hidden>,
        Read<'s, GameState>,
        Option<Read<'s, PongSprites>>,
    );

    fn run(
        &mut self,
        (entities, paddles, balls, gates, mut transforms, mut sprite_renders, mut tints, mut hidden, state, sprites): Self::SystemData,
    ) {
        for (entity, paddle) in (&*entities, &paddles).join() {
            place(&mut transforms, entity, &paddle.rect);
        }
        for (entity, ball) in (&*entities, &balls).join() {
            place(&mut transforms, entity, &ball.rect);
        }
        for (entity, gate) in (&*entities, &gates).join() {
            place(&mut transforms, entity, gate.rect());
            attach(&mut tints, entity, Tint(gate.kind().color()));
        }

        let bodies = (&*entities, &paddles)
            .join()
            .map(|(entity, _)| entity)
            .chain((&*entities, &balls).join().map(|(entity, _)| entity))
            .chain((&*entities, &gates).join().map(|(entity, _)| entity))
            .collect::<Vec<_>>();
        for entity in bodies {
            if state.is_playing() {
                hidden.remove(entity);
            } else if !hidden.contains(entity) {
                attach(&mut hidden, entity, Hidden);
            }
        }

        if let Some(sprites) = sprites {
            let needs_sprite = (&*entities, &paddles, !&sprite_renders)
                .join()
                .map(|(entity, _, _)| (entity, SQUARE_SPRITE))
                .chain((&*entities, &gates, !&sprite_renders).join().map(|(entity, _, _)| (entity, SQUARE_SPRITE)))
                .chain((&*entities, &balls, !&sprite_renders).join().map(|(entity, _, _)| (entity, CIRCLE_SPRITE)))
                .collect::<Vec<_>>();
            for (entity, sprite_number) in needs_sprite {
                let sprite = SpriteRender {
                    sprite_sheet: sprites.sheet.clone(),
                    sprite_number,
                };
                attach(&mut sprite_renders, entity, sprite);
            }
        }
    }
}

fn place(transforms: &mut WriteStorage<Transform>, entity: Entity, rect: &Rect) {
    let (x, y) = rect.center();
    let scale = Vector3::new(rect.width / SPRITE_SIZE, rect.height / SPRITE_SIZE, 1.0);
    match transforms.get_mut(entity) {
        Some(transform) => {
            transform.set_translation_xyz(x, SCREEN_HEIGHT - y, 0.0);
            transform.set_scale(scale);
        }
        None => {
            let mut transform = Transform::default();
            transform.set_translation_xyz(x, SCREEN_HEIGHT - y, 0.0);
            transform.set_scale(scale);
            attach(transforms, entity, transform);
        }
    }
}

fn attach<C: Component>(storage: &mut WriteStorage<C>, entity: Entity, component: C) {
    if let Err(e) = storage.insert(entity, component) {
        warn!("cannot attach to dead entity: {:?}", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use amethyst::ecs::{Builder, WorldExt};
    use amethyst::renderer::palette::Srgba;
    use crate::pong::{GameRng, GateKind, Side};
    use crate::systems::testing::{playing_world, run};

    #[test]
    fn rectangles_map_to_y_up_transforms() {
        let mut world = playing_world();
        world.register::<Paddle>();
        world.register::<Ball>();
        world.register::<Gate>();
        let paddle = world.create_entity().with(Paddle::new(Side::Left)).build();
        let ball = world.create_entity().with(Ball::new(&mut GameRng::seeded(0).0)).build();
        let gate = world.create_entity().with(Gate::new(GateKind::SlowDown, 100.0, 50.0)).build();

        run(&mut world, RenderSyncSystem);

        let transforms = world.read_storage::<Transform>();
        let paddle_t = transforms.get(paddle).expect("paddle transform");
        assert_eq!(paddle_t.translation().x, 33.5);
        assert_eq!(paddle_t.translation().y, 360.0);
        assert_eq!(paddle_t.scale().y, 100.0 / SPRITE_SIZE);

        let ball_t = transforms.get(ball).expect("ball transform");
        assert_eq!((ball_t.translation().x, ball_t.translation().y), (480.0, 360.0));

        let gate_t = transforms.get(gate).expect("gate transform");
        assert_eq!(gate_t.translation().y, 720.0 - 100.0);

        let tints = world.read_storage::<Tint>();
        assert_eq!(tints.get(gate).expect("gate tint").0, Srgba::new(1.0, 0.0, 1.0, 1.0));
        assert!(tints.get(ball).is_none());
    }

    #[test]
    fn court_is_hidden_outside_of_play() {
        let mut world = playing_world();
        *world.write_resource::<GameState>() = GameState::NotStarted;
        world.register::<Paddle>();
        world.register::<Ball>();
        world.register::<Gate>();
        let paddle = world.create_entity().with(Paddle::new(Side::Right)).build();
        let ball = world.create_entity().with(Ball::new(&mut GameRng::seeded(0).0)).build();
        let gate = world.create_entity().with(Gate::new(GateKind::SpeedUp, 400.0, 200.0)).build();

        run(&mut world, RenderSyncSystem);
        {
            let hidden = world.read_storage::<Hidden>();
            assert!(hidden.contains(paddle) && hidden.contains(ball) && hidden.contains(gate));
        }

        *world.write_resource::<GameState>() = GameState::Playing;
        run(&mut world, RenderSyncSystem);
        {
            let hidden = world.read_storage::<Hidden>();
            assert!(!hidden.contains(paddle) && !hidden.contains(ball) && !hidden.contains(gate));
        }

        *world.write_resource::<GameState>() = GameState::GameOver;
        run(&mut world, RenderSyncSystem);
        assert!(world.read_storage::<Hidden>().contains(ball));
    }

    #[test]
    fn moved_ball_updates_its_transform() {
        let mut world = playing_world();
        world.register::<Ball>();
        let ball = world.create_entity().with(Ball::new(&mut GameRng::seeded(0).0)).build();
        run(&mut world, RenderSyncSystem);

        world.write_storage::<Ball>().get_mut(ball).expect("ball").rect.x += 10.0;
        run(&mut world, RenderSyncSystem);

        let transforms = world.read_storage::<Transform>();
        assert_eq!(transforms.get(ball).expect("ball transform").translation().x, 490.0);
    }
}
