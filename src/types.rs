/// Position / velocity pair used by every entity.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vector2 {
    pub x: f64,
    pub y: f64,
}

impl Vector2 {
    pub const ZERO: Vector2 = Vector2 { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Vector2 { x, y }
    }

    pub fn add(&self, other: Vector2) -> Self {
        Vector2::new(self.x + other.x, self.y + other.y)
    }
}

/// Axis-aligned rectangle, origin at the top-left corner.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Rect { x, y, width, height }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn center(&self) -> Vector2 {
        Vector2::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Hit test for a circular projectile against this box.
    ///
    /// The box is grown by `radius` on every side and the circle's centre must
    /// fall inside it. This over-reports near the corners compared to a real
    /// circle/rectangle test; edges count as a hit.
    pub fn hit_by(&self, centre: Vector2, radius: f64) -> bool {
        centre.x >= self.x - radius
            && centre.x <= self.right() + radius
            && centre.y >= self.y - radius
            && centre.y <= self.bottom() + radius
    }
}
