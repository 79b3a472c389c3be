use amethyst::{
    assets::{AssetStorage, Handle, Loader},
    core::transform::Transform,
    ecs::prelude::{Component, DenseVecStorage, Entities, Entity, Join, ReadStorage},
    input::{get_key, is_close_requested},
    prelude::*,
    renderer::{palette::Srgba, Camera, ImageFormat, SpriteSheet, SpriteSheetFormat, Texture},
    ui::{get_default_font, Anchor, FontAsset, LineMode, UiText, UiTransform},
    winit::{ElementState, VirtualKeyCode},
};
use derive_more::Display;
use getset::Getters;
use log::{info, warn};
use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::audio::initialize_audio;
use crate::util::Rect;

pub const SCREEN_WIDTH: f32 = 960.0;
pub const SCREEN_HEIGHT: f32 = 720.0;

pub const PADDLE_WIDTH: f32 = 7.0;
pub const PADDLE_HEIGHT: f32 = 100.0;
/// Pixels per millisecond.
pub const PADDLE_SPEED: f32 = 0.8;
pub const LEFT_PADDLE_X: f32 = 30.0;
pub const RIGHT_PADDLE_X: f32 = SCREEN_WIDTH - 50.0;

pub const BALL_SIZE: f32 = 25.0;
/// Magnitude of each velocity component when the ball is served.
pub const BALL_SERVE_SPEED: f32 = 0.3;
pub const PADDLE_HIT_FACTOR: f32 = 1.1;
/// Gap left between paddle and ball after a hit so the next frame does not hit again.
pub const PADDLE_HIT_CLEARANCE: f32 = 5.0;

pub const GATE_WIDTH: f32 = 5.0;
pub const GATE_HEIGHT: f32 = 100.0;
pub const SPEED_UP_FACTOR: f32 = 1.3;
pub const SLOW_DOWN_FACTOR: f32 = 0.7;
pub const MAX_GATES: usize = 2;
/// Milliseconds.
pub const GATE_SPAWN_INTERVAL: f32 = 3000.0;
pub const GATE_MARGIN_X: i32 = 100;
pub const GATE_MARGIN_Y: i32 = 50;

pub const WINNING_SCORE: u32 = 3;

pub const SQUARE_SPRITE: usize = 0;
pub const CIRCLE_SPRITE: usize = 1;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn player_number(self) -> u32 {
        match self {
            Side::Left => 1,
            Side::Right => 2,
        }
    }
}

pub struct Paddle {
    pub side: Side,
    pub rect: Rect,
    pub velocity: f32,
}

impl Paddle {
    pub fn new(side: Side) -> Self {
        let x = match side {
            Side::Left => LEFT_PADDLE_X,
            Side::Right => RIGHT_PADDLE_X,
        };
        Paddle {
            side,
            rect: Rect::new(x, SCREEN_HEIGHT / 2.0 - PADDLE_HEIGHT / 2.0, PADDLE_WIDTH, PADDLE_HEIGHT),
            velocity: 0.0,
        }
    }

    /// `axis` is the input axis value: -1 up, 1 down, 0 idle.
    pub fn steer(&mut self, axis: f32) {
        self.velocity = if axis > 0.0 {
            PADDLE_SPEED
        } else if axis < 0.0 {
            -PADDLE_SPEED
        } else {
            0.0
        };
    }

    pub fn advance(&mut self, delta_ms: f32) {
        let top = self.rect.y + self.velocity * delta_ms;
        self.rect.y = num_traits::clamp(top, 0.0, SCREEN_HEIGHT - self.rect.height);
    }
}

impl Component for Paddle {
    type Storage = DenseVecStorage<Self>;
}

pub struct Ball {
    pub rect: Rect,
    pub velocity_x: f32,
    pub velocity_y: f32,
}

impl Ball {
    pub fn new<R: Rng>(rng: &mut R) -> Self {
        let mut ball = Ball {
            rect: Rect::new(0.0, 0.0, BALL_SIZE, BALL_SIZE),
            velocity_x: 0.0,
            velocity_y: 0.0,
        };
        ball.serve(rng);
        ball
    }

    /// Back to the middle of the court, heading in a random diagonal.
    pub fn serve<R: Rng>(&mut self, rng: &mut R) {
        self.rect.set_center((SCREEN_WIDTH / 2.0, SCREEN_HEIGHT / 2.0));
        self.velocity_x = random_sign(rng) * BALL_SERVE_SPEED;
        self.velocity_y = random_sign(rng) * BALL_SERVE_SPEED;
    }

    pub fn scale_velocity(&mut self, factor: f32) {
        self.velocity_x *= factor;
        self.velocity_y *= factor;
    }

    pub fn is_moving_toward(&self, side: Side) -> bool {
        match side {
            Side::Left => self.velocity_x < 0.0,
            Side::Right => self.velocity_x > 0.0,
        }
    }
}

impl Component for Ball {
    type Storage = DenseVecStorage<Self>;
}

fn random_sign<R: Rng>(rng: &mut R) -> f32 {
    if rng.gen_bool(0.5) {
        1.0
    } else {
        -1.0
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Display)]
pub enum GateKind {
    #[display(fmt = "speed-up")]
    SpeedUp,
    #[display(fmt = "slow-down")]
    SlowDown,
}

impl GateKind {
    pub fn random<R: Rng>(rng: &mut R) -> Self {
        if rng.gen_bool(0.5) {
            GateKind::SpeedUp
        } else {
            GateKind::SlowDown
        }
    }

    pub fn factor(self) -> f32 {
        match self {
            GateKind::SpeedUp => SPEED_UP_FACTOR,
            GateKind::SlowDown => SLOW_DOWN_FACTOR,
        }
    }

    pub fn color(self) -> Srgba {
        match self {
            GateKind::SpeedUp => Srgba::new(0.0, 1.0, 1.0, 1.0),
            GateKind::SlowDown => Srgba::new(1.0, 0.0, 1.0, 1.0),
        }
    }
}

/// Single-use zone that rescales the ball's velocity on contact.
#[derive(Getters, Debug)]
pub struct Gate {
    #[get = "pub"]
    kind: GateKind,
    #[get = "pub"]
    rect: Rect,
}

impl Gate {
    pub fn new(kind: GateKind, x: f32, y: f32) -> Self {
        Gate {
            kind,
            rect: Rect::new(x, y, GATE_WIDTH, GATE_HEIGHT),
        }
    }

    pub fn random<R: Rng>(rng: &mut R) -> Self {
        let x = rng.gen_range(GATE_MARGIN_X, SCREEN_WIDTH as i32 - GATE_MARGIN_X + 1);
        let y = rng.gen_range(GATE_MARGIN_Y, SCREEN_HEIGHT as i32 - GATE_MARGIN_Y + 1);
        Gate::new(GateKind::random(rng), x as f32, y as f32)
    }
}

impl Component for Gate {
    type Storage = DenseVecStorage<Self>;
}

#[derive(Default, Debug, Display)]
#[display(fmt = "{}  |  {}", score_left, score_right)]
pub struct ScoreBoard {
    pub score_left: u32,
    pub score_right: u32,
}

impl ScoreBoard {
    /// Awards a point to `side` and returns its new total.
    pub fn award(&mut self, side: Side) -> u32 {
        let score = match side {
            Side::Left => &mut self.score_left,
            Side::Right => &mut self.score_right,
        };
        *score = (*score + 1).min(WINNING_SCORE);
        *score
    }

    pub fn winner(&self) -> Option<Side> {
        if self.score_left >= WINNING_SCORE {
            Some(Side::Left)
        } else if self.score_right >= WINNING_SCORE {
            Some(Side::Right)
        } else {
            None
        }
    }

    pub fn reset(&mut self) {
        self.score_left = 0;
        self.score_right = 0;
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GameState {
    NotStarted,
    Playing,
    GameOver,
}

impl Default for GameState {
    fn default() -> Self {
        GameState::NotStarted
    }
}

impl GameState {
    pub fn is_playing(self) -> bool {
        self == GameState::Playing
    }
}

#[derive(Default)]
pub struct GateSpawner {
    pub since_last_spawn: f32,
}

pub struct GameRng(pub StdRng);

impl GameRng {
    #[cfg(test)]
    pub fn seeded(seed: u64) -> Self {
        GameRng(StdRng::seed_from_u64(seed))
    }
}

impl Default for GameRng {
    fn default() -> Self {
        GameRng(StdRng::from_entropy())
    }
}

pub struct PongSprites {
    pub sheet: Handle<SpriteSheet>,
}

pub struct Hud {
    pub score: Entity,
    pub overlay: Entity,
}

/// Deletes every live gate. Takes effect at the next `maintain`.
pub fn despawn_gates(entities: &Entities, gates: &ReadStorage<Gate>) {
    for (entity, _) in (&**entities, gates).join() {
        if let Err(e) = entities.delete(entity) {
            warn!("gate already gone: {:?}", e);
        }
    }
}

/// Space bar: starts the next round, or a whole new game after a win.
pub fn press_space(world: &mut World) {
    let state = *world.read_resource::<GameState>();
    match state {
        GameState::Playing => return,
        GameState::GameOver => {
            world.write_resource::<ScoreBoard>().reset();
            info!("new game");
        }
        GameState::NotStarted => info!("round started"),
    }
    world.exec(|(entities, gates): (Entities<'_>, ReadStorage<'_, Gate>)| despawn_gates(&entities, &gates));
    world.maintain();
    *world.write_resource::<GameState>() = GameState::Playing;
}

/// Holding a key makes the window repeat its press event, so only the
/// transition from released to pressed counts.
#[derive(Default)]
pub struct Pong {
    space_held: bool,
}

impl Pong {
    fn space_pressed(&mut self, state: ElementState) -> bool {
        let was_held = self.space_held;
        self.space_held = state == ElementState::Pressed;
        self.space_held && !was_held
    }
}

impl SimpleState for Pong {
    fn on_start(&mut self, data: StateData<GameData>) {
        let world = data.world;
        world.insert(ScoreBoard::default());
        world.insert(GameState::default());
        world.insert(GateSpawner::default());
        world.insert(GameRng::default());

        let sheet = load_sprite_sheet(world);
        world.insert(PongSprites { sheet });

        initialize_camera(world);
        initialize_paddles(world);
        initialize_ball(world);
        initialize_hud(world);
        initialize_audio(world);
    }

    fn handle_event(
        &mut self,
        data: StateData<'_, GameData<'_, '_>>,
        event: StateEvent,
    ) -> SimpleTrans {
        if let StateEvent::Window(ref event) = event {
            if is_close_requested(event) {
                return Trans::Quit;
            }
            if let Some((VirtualKeyCode::Space, state)) = get_key(event) {
                if self.space_pressed(state) {
                    press_space(data.world);
                }
            }
        }
        Trans::None
    }
}

fn initialize_camera(world: &mut World) {
    let mut transform = Transform::default();
    transform.set_translation_xyz(SCREEN_WIDTH * 0.5, SCREEN_HEIGHT * 0.5, 1.0);

    world
        .create_entity()
        .with(Camera::standard_2d(SCREEN_WIDTH, SCREEN_HEIGHT))
        .with(transform)
        .build();
}

fn initialize_paddles(world: &mut World) {
    world.create_entity().with(Paddle::new(Side::Left)).build();
    world.create_entity().with(Paddle::new(Side::Right)).build();
}

fn initialize_ball(world: &mut World) {
    let ball = Ball::new(&mut world.write_resource::<GameRng>().0);
    world.create_entity().with(ball).build();
}

fn load_sprite_sheet(world: &mut World) -> Handle<SpriteSheet> {
    let texture_handle = {
        let loader = world.read_resource::<Loader>();
        let texture_storage = world.read_resource::<AssetStorage<Texture>>();
        loader.load(
            "texture/pong_spritesheet.png",
            ImageFormat::default(),
            (),
            &texture_storage,
        )
    };

    let loader = world.read_resource::<Loader>();
    let spritesheet_storage = world.read_resource::<AssetStorage<SpriteSheet>>();
    loader.load(
        "texture/pong_spritesheet.ron",
        SpriteSheetFormat(texture_handle),
        (),
        &spritesheet_storage,
    )
}

fn initialize_hud(world: &mut World) {
    let font = get_default_font(
        &world.read_resource::<Loader>(),
        &world.read_resource::<AssetStorage<FontAsset>>(),
    );

    let score_transform = UiTransform::new(
        "score".to_owned(), Anchor::TopMiddle, Anchor::Middle,
        0., -50., 1., 400., 40.,
    );

    let overlay_transform = UiTransform::new(
        "overlay".to_owned(), Anchor::Middle, Anchor::Middle,
        0., 0., 1., SCREEN_WIDTH, 40.,
    );

    let score = world
        .create_entity()
        .with(score_transform)
        .with(UiText::new(
            font.clone(),
            ScoreBoard::default().to_string(),
            [1., 1., 1., 1.],
            30.,
            LineMode::Single,
            Anchor::Middle,
        ))
        .build();

    let overlay = world
        .create_entity()
        .with(overlay_transform)
        .with(UiText::new(
            font,
            String::new(),
            [1., 1., 1., 1.],
            30.,
            LineMode::Single,
            Anchor::Middle,
        ))
        .build();

    world.insert(Hud { score, overlay });
}
