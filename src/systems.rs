pub use self::paddle::PaddleSystem;
pub use self::mov::MoveSystem;
pub use self::bounce::BounceSystem;
pub use self::winner::WinnerSystem;
pub use self::gate::{GateSpawnSystem, GateSystem};
pub use self::render::RenderSyncSystem;
pub use self::hud::HudSystem;

mod paddle;
mod mov;
mod bounce;
mod winner;
mod gate;
mod render;
mod hud;
