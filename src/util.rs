use amethyst::core::timing::Time;

/// Axis-aligned rectangle in screen space: origin at the top-left corner of
/// the window, y growing downward.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Rect {
  pub x: f32,
  pub y: f32,
  pub width: f32,
  pub height: f32,
}

impl Rect {
  pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
    Rect { x, y, width, height }
  }

  pub fn left(&self) -> f32 {
    self.x
  }

  pub fn right(&self) -> f32 {
    self.x + self.width
  }

  pub fn top(&self) -> f32 {
    self.y
  }

  pub fn bottom(&self) -> f32 {
    self.y + self.height
  }

  pub fn center(&self) -> (f32, f32) {
    (self.x + self.width / 2.0, self.y + self.height / 2.0)
  }

  pub fn set_center(&mut self, (cx, cy): (f32, f32)) {
    self.x = cx - self.width / 2.0;
    self.y = cy - self.height / 2.0;
  }

  pub fn set_left(&mut self, left: f32) {
    self.x = left;
  }

  pub fn set_right(&mut self, right: f32) {
    self.x = right - self.width;
  }

  /// Strict overlap: rectangles that only share an edge do not collide.
  pub fn overlaps(&self, other: &Rect) -> bool {
    self.left() < other.right()
      && self.right() > other.left()
      && self.top() < other.bottom()
      && self.bottom() > other.top()
  }
}

/// Frame time in milliseconds; every velocity in the game is expressed in px/ms.
pub fn delta_ms(time: &Time) -> f32 {
  time.delta_seconds() * 1000.0
}
