use std::io;
use std::path::Path;
use amethyst::{
  core::{transform::TransformBundle, frame_limiter::FrameRateLimitStrategy},
  prelude::*,
  renderer::{
    plugins::{RenderFlat2D, RenderToWindow},
    types::DefaultBackend,
    RenderingBundle,
  },
  utils::application_root_dir,
  input::{InputBundle, StringBindings},
  audio::{AudioBundle, DjSystemDesc},
  config::Config,
};

use amethyst::ui::{RenderUi, UiBundle};
use crate::audio::Music;
use crate::config::audio::AudioConfig;
use crate::pong::Pong;
use crate::systems::{
  BounceSystem, GateSpawnSystem, GateSystem, HudSystem, MoveSystem, PaddleSystem, RenderSyncSystem, WinnerSystem,
};

mod audio;
mod config;
mod pong;
mod systems;
mod util;

const REQUIRED_ASSETS: &[&str] = &[
  "texture/pong_spritesheet.png",
  "texture/pong_spritesheet.ron",
  audio::PADDLE_HIT_SOUND,
  audio::SCORE_SOUND,
  audio::SPEED_UP_SOUND,
  audio::SLOW_DOWN_SOUND,
  audio::BACKGROUND_MUSIC,
];

/// Asset loading in the engine is asynchronous and only logs failures, so
/// check up front and refuse to start without them.
fn check_assets(assets_dir: &Path) -> io::Result<()> {
  for asset in REQUIRED_ASSETS {
    let path = assets_dir.join(asset);
    if !path.is_file() {
      return Err(io::Error::new(
        io::ErrorKind::NotFound,
        format!("missing asset {}", path.display()),
      ));
    }
  }
  Ok(())
}

fn main() -> amethyst::Result<()> {
  amethyst::start_logger(Default::default());

  let app_root = application_root_dir()?;
  let display_config_path = app_root.join("config").join("display.ron");

  let bindings_path = app_root.join("config").join("bindings.ron");
  let input_bundle = InputBundle::<StringBindings>::new()
    .with_bindings_from_file(bindings_path)?;

  let audio_path = app_root.join("config").join("audio.ron");
  let audio_config = AudioConfig::load(&audio_path)?;

  let assets_dir = app_root.join("assets");
  check_assets(&assets_dir)?;

  let game_data = GameDataBuilder::default()
    .with_bundle(input_bundle)?
    .with_bundle(AudioBundle::default())?
    .with_system_desc(DjSystemDesc::new(|music: &mut Music| music.next()), "dj_system", &[])
    .with(PaddleSystem, "paddle_system", &["input_system"])
    .with(BounceSystem, "bounce_system", &["paddle_system"])
    .with(WinnerSystem, "winner_system", &["bounce_system"])
    .with(GateSpawnSystem, "gate_spawn_system", &["winner_system"])
    .with(GateSystem, "gate_system", &["gate_spawn_system"])
    .with(MoveSystem, "move_system", &["gate_system"])
    .with(RenderSyncSystem, "render_sync_system", &["move_system"])
    .with(HudSystem, "hud_system", &["winner_system"])
    .with_bundle(TransformBundle::new().with_dep(&["render_sync_system"]))?
    .with_bundle(UiBundle::<StringBindings>::new())?
    .with_bundle(
      RenderingBundle::<DefaultBackend>::new()
        .with_plugin(
          RenderToWindow::from_config_path(display_config_path)?
            .with_clear([0.0, 0.0, 0.0, 1.0]),
        )
        .with_plugin(RenderFlat2D::default())
        .with_plugin(RenderUi::default()),
    )?;

  let mut game = Application::build(assets_dir, Pong::default())?
    .with_resource(audio_config)
    .with_frame_limit(FrameRateLimitStrategy::Sleep, 60)
    .build(game_data)?;
  game.run();
  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn shipped_assets_are_present() {
    let assets_dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("assets");
    check_assets(&assets_dir).expect("assets");
  }

  #[test]
  fn missing_assets_are_reported() {
    let err = check_assets(Path::new("/nonexistent")).expect_err("no assets there");
    assert_eq!(err.kind(), io::ErrorKind::NotFound);
  }
}
