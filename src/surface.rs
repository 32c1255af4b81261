/// Drawing interface consumed by every entity's draw step.
///
/// Entities only ever write to a surface; nothing reads back from it. The
/// transform calls (`save`, `restore`, `translate`, `rotate`, `set_alpha`)
/// follow the usual 2D-canvas stack semantics.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const WHITE: Rgb = Rgb(255, 255, 255);
    pub const YELLOW: Rgb = Rgb(255, 255, 0);
    pub const RED: Rgb = Rgb(255, 0, 0);
    /// Player death burst (#b80e39).
    pub const CRIMSON: Rgb = Rgb(0xb8, 0x0e, 0x39);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Sprite {
    Rocket,
    Monster,
}

pub trait RenderSurface {
    fn clear(&mut self);
    fn save(&mut self);
    fn restore(&mut self);
    fn translate(&mut self, dx: f64, dy: f64);
    fn rotate(&mut self, radians: f64);
    /// Multiplies into the current alpha until the matching `restore`.
    fn set_alpha(&mut self, alpha: f64);
    fn blit(&mut self, sprite: Sprite, x: f64, y: f64, width: f64, height: f64);
    fn fill_circle(&mut self, x: f64, y: f64, radius: f64, color: Rgb);
}

// ── Recording surface ────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    Clear,
    Save,
    Restore,
    Translate(f64, f64),
    Rotate(f64),
    Alpha(f64),
    Blit { sprite: Sprite, x: f64, y: f64, width: f64, height: f64 },
    Circle { x: f64, y: f64, radius: f64, color: Rgb },
}

/// Surface that remembers every call instead of drawing.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        RecordingSurface::default()
    }

    pub fn blits(&self, sprite: Sprite) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Blit { sprite: s, .. } if *s == sprite))
            .count()
    }

    pub fn circles(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Circle { .. }))
            .count()
    }
}

impl RenderSurface for RecordingSurface {
    fn clear(&mut self) {
        self.commands.push(DrawCommand::Clear);
    }

    fn save(&mut self) {
        self.commands.push(DrawCommand::Save);
    }

    fn restore(&mut self) {
        self.commands.push(DrawCommand::Restore);
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        self.commands.push(DrawCommand::Translate(dx, dy));
    }

    fn rotate(&mut self, radians: f64) {
        self.commands.push(DrawCommand::Rotate(radians));
    }

    fn set_alpha(&mut self, alpha: f64) {
        self.commands.push(DrawCommand::Alpha(alpha));
    }

    fn blit(&mut self, sprite: Sprite, x: f64, y: f64, width: f64, height: f64) {
        self.commands.push(DrawCommand::Blit { sprite, x, y, width, height });
    }

    fn fill_circle(&mut self, x: f64, y: f64, radius: f64, color: Rgb) {
        self.commands.push(DrawCommand::Circle { x, y, radius, color });
    }
}
