/// Game entities and the master game state.
///
/// Each entity knows how to advance itself one tick, draw itself onto a
/// [`RenderSurface`] and, where it can shoot, append a projectile to a sink.
/// Everything cross-entity (collision, scoring, spawning) lives in `compute`.

use rand::Rng;

use crate::config::GameConfig;
use crate::constants::*;
use crate::surface::{RenderSurface, Rgb, Sprite};
use crate::types::{Rect, Vector2};
use crate::wave::Wave;

/// Opacity at or below this counts as fully faded.
const OPACITY_EPSILON: f64 = 1e-9;

// ── Identity ─────────────────────────────────────────────────────────────────

/// Stable handle for invaders, projectiles and waves. Never reused within a
/// session, so removal bookkeeping does not depend on vector positions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(pub u64);

#[derive(Clone, Debug, Default)]
pub struct IdAllocator {
    next: u64,
}

impl IdAllocator {
    pub fn allocate(&mut self) -> EntityId {
        let id = EntityId(self.next);
        self.next += 1;
        id
    }
}

// ── Asset lifecycle ──────────────────────────────────────────────────────────

/// Whether an entity's sprite has been measured yet. Until it has, the entity
/// uses a placeholder size; collision and drawing work in both phases.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AssetPhase {
    Pending,
    Ready,
}

// ── Player ───────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Player {
    pub position: Vector2,
    pub velocity: Vector2,
    /// Visual tilt in radians; positive leans right.
    pub rotation: f64,
    pub width: f64,
    pub height: f64,
    pub phase: AssetPhase,
}

impl Player {
    /// A player with placeholder geometry, parked bottom-centre.
    pub fn new(field_width: f64, field_height: f64) -> Self {
        let mut player = Player {
            position: Vector2::ZERO,
            velocity: Vector2::ZERO,
            rotation: 0.0,
            width: PLACEHOLDER_SIZE,
            height: PLACEHOLDER_SIZE,
            phase: AssetPhase::Pending,
        };
        player.park(field_width, field_height);
        player
    }

    fn park(&mut self, field_width: f64, field_height: f64) {
        self.position = Vector2::new(
            field_width / 2.0 - self.width / 2.0,
            field_height - self.height - PLAYER_BOTTOM_MARGIN,
        );
    }

    /// The rocket sprite has been measured: scale it down and re-park.
    pub fn asset_ready(
        &mut self,
        natural_width: f64,
        natural_height: f64,
        field_width: f64,
        field_height: f64,
    ) {
        self.width = natural_width * PLAYER_SPRITE_SCALE;
        self.height = natural_height * PLAYER_SPRITE_SCALE;
        self.phase = AssetPhase::Ready;
        self.park(field_width, field_height);
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(self.position.x, self.position.y, self.width, self.height)
    }

    pub fn update(&mut self) {
        self.position = self.position.add(self.velocity);
    }

    /// Draws the tilted rocket; fully transparent once the game is over.
    pub fn draw(&self, surface: &mut impl RenderSurface, game_over: bool) {
        let centre = self.bounds().center();
        surface.save();
        surface.set_alpha(if game_over { 0.0 } else { 1.0 });
        surface.translate(centre.x, centre.y);
        surface.rotate(self.rotation);
        surface.translate(-centre.x, -centre.y);
        surface.blit(
            Sprite::Rocket,
            self.position.x,
            self.position.y,
            self.width,
            self.height,
        );
        surface.restore();
    }

    /// Launch one projectile straight up from the nose of the ship.
    pub fn fire(&self, id: EntityId, sink: &mut Vec<Projectile>) {
        sink.push(Projectile {
            id,
            position: Vector2::new(self.position.x + self.width / 2.0, self.position.y),
            velocity: Vector2::new(0.0, -PLAYER_PROJECTILE_SPEED),
            radius: PLAYER_PROJECTILE_RADIUS,
            color: Rgb::YELLOW,
        });
    }
}

// ── Invader ──────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Invader {
    pub id: EntityId,
    pub position: Vector2,
    /// Set by the owning wave every tick.
    pub velocity: Vector2,
    pub width: f64,
    pub height: f64,
}

impl Invader {
    pub fn new(id: EntityId, position: Vector2, velocity: Vector2, phase: AssetPhase) -> Self {
        let (width, height) = invader_size(phase);
        Invader { id, position, velocity, width, height }
    }

    pub fn asset_ready(&mut self) {
        let (width, height) = invader_size(AssetPhase::Ready);
        self.width = width;
        self.height = height;
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(self.position.x, self.position.y, self.width, self.height)
    }

    pub fn update(&mut self) {
        self.position = self.position.add(self.velocity);
    }

    pub fn draw(&self, surface: &mut impl RenderSurface) {
        surface.blit(
            Sprite::Monster,
            self.position.x,
            self.position.y,
            self.width,
            self.height,
        );
    }

    pub fn fire(&self, id: EntityId, sink: &mut Vec<Projectile>) {
        sink.push(Projectile {
            id,
            position: Vector2::new(self.position.x + self.width / 2.0, self.position.y),
            velocity: Vector2::new(0.0, INVADER_PROJECTILE_SPEED),
            radius: INVADER_PROJECTILE_RADIUS,
            color: Rgb::WHITE,
        });
    }
}

pub fn invader_size(phase: AssetPhase) -> (f64, f64) {
    match phase {
        AssetPhase::Pending => (PLACEHOLDER_SIZE, PLACEHOLDER_SIZE),
        AssetPhase::Ready => (INVADER_WIDTH, INVADER_HEIGHT),
    }
}

// ── Projectile ───────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Projectile {
    pub id: EntityId,
    pub position: Vector2,
    /// Negative y travels up-screen (player fire), positive y down-screen.
    pub velocity: Vector2,
    pub radius: f64,
    pub color: Rgb,
}

impl Projectile {
    pub fn update(&mut self) {
        self.position = self.position.add(self.velocity);
    }

    pub fn draw(&self, surface: &mut impl RenderSurface) {
        surface.fill_circle(self.position.x, self.position.y, self.radius, self.color);
    }

    /// Fully above the top edge.
    pub fn exited_top(&self) -> bool {
        self.position.y + self.radius < 0.0
    }

    /// Fully below the bottom edge.
    pub fn exited_bottom(&self, field_height: f64) -> bool {
        self.position.y - self.radius > field_height
    }
}

// ── Particle ─────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Particle {
    pub position: Vector2,
    pub velocity: Vector2,
    pub radius: f64,
    pub color: Rgb,
    /// In [0, 1].
    pub opacity: f64,
    pub fade: bool,
}

impl Particle {
    /// `BURST_PARTICLES` fading sparks thrown out from `origin`.
    pub fn burst(rng: &mut impl Rng, origin: Vector2, color: Rgb) -> Vec<Particle> {
        (0..BURST_PARTICLES)
            .map(|_| Particle {
                position: origin,
                velocity: Vector2::new(rng.gen_range(-1.0..1.0), rng.gen_range(-1.0..1.0)),
                radius: rng.gen_range(0.0..BURST_MAX_RADIUS),
                color,
                opacity: 1.0,
                fade: true,
            })
            .collect()
    }

    /// One background star somewhere on the field, drifting down.
    pub fn star(rng: &mut impl Rng, field_width: f64, field_height: f64) -> Particle {
        Particle {
            position: Vector2::new(
                rng.gen_range(0.0..field_width),
                rng.gen_range(0.0..field_height),
            ),
            velocity: Vector2::new(0.0, STAR_SPEED),
            radius: rng.gen_range(0.0..STAR_MAX_RADIUS),
            color: Rgb::WHITE,
            opacity: 1.0,
            fade: false,
        }
    }

    pub fn update(&mut self) {
        self.position = self.position.add(self.velocity);
        if self.fade {
            self.opacity = (self.opacity - FADE_PER_TICK).max(0.0);
        }
    }

    /// Move back to the top once past the bottom edge.
    pub fn wrap(&mut self, field_height: f64) {
        if self.position.y >= field_height {
            self.position.y = 0.0;
        }
    }

    pub fn is_spent(&self) -> bool {
        self.fade && self.opacity <= OPACITY_EPSILON
    }

    pub fn draw(&self, surface: &mut impl RenderSurface) {
        surface.save();
        surface.set_alpha(self.opacity);
        surface.fill_circle(self.position.x, self.position.y, self.radius, self.color);
        surface.restore();
    }
}

// ── Status & events ──────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Running,
    Won,
    Lost,
}

impl GameStatus {
    pub fn is_over(&self) -> bool {
        *self != GameStatus::Running
    }

    /// Text for the result display.
    pub fn result_text(&self) -> Option<&'static str> {
        match self {
            GameStatus::Running => None,
            GameStatus::Won => Some("You Win!"),
            GameStatus::Lost => Some("you lose"),
        }
    }
}

/// Things the outside world may want to show, produced by one tick.
#[derive(Clone, Debug, PartialEq)]
pub enum GameEvent {
    ScoreChanged(u32),
    Finished(GameStatus),
    WaveSpawned { columns: usize, rows: usize },
}

// ── Master game state ────────────────────────────────────────────────────────

/// The entire simulation. Cloneable so the pure functions in `compute` can
/// return a new copy without touching the original.
#[derive(Clone, Debug)]
pub struct GameState {
    pub config: GameConfig,
    pub player: Player,
    /// Player-fired projectiles.
    pub projectiles: Vec<Projectile>,
    pub invader_projectiles: Vec<Projectile>,
    pub waves: Vec<Wave>,
    /// Explosion sparks.
    pub particles: Vec<Particle>,
    /// Starfield; never removed.
    pub stars: Vec<Particle>,
    pub score: u32,
    pub status: GameStatus,
    /// Cleared when the loop should stop ticking.
    pub active: bool,
    /// Ticks left before halting after a loss.
    pub grace_remaining: Option<u32>,
    pub frame: u64,
    pub spawn_gap: u64,
    pub spawn_threshold: u64,
    pub invader_phase: AssetPhase,
    pub ids: IdAllocator,
    /// Events raised by the most recent tick.
    pub events: Vec<GameEvent>,
}
