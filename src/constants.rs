// ── Play field ───────────────────────────────────────────────────────────────
pub const FIELD_WIDTH: f64 = 1024.0;
pub const FIELD_HEIGHT: f64 = 576.0;

// ── Timing ───────────────────────────────────────────────────────────────────
pub const TICK_MS: u64 = 16; // ≈60 Hz, one tick per display frame
pub const GRACE_PERIOD_TICKS: u32 = 180; // 3 s of ticks after a loss
pub const INVADER_FIRE_INTERVAL: u64 = 100;
pub const WAVE_SPAWN_GAP_MIN: u64 = 300;
pub const WAVE_SPAWN_GAP_MAX: u64 = 800; // exclusive

// ── Scoring ──────────────────────────────────────────────────────────────────
pub const SCORE_PER_INVADER: u32 = 100;
pub const WIN_SCORE: u32 = 10_000;

// ── Player ───────────────────────────────────────────────────────────────────
pub const PLAYER_SPEED: f64 = 5.0;
pub const PLAYER_TILT: f64 = 0.3; // radians
pub const PLAYER_SPRITE_SCALE: f64 = 0.2;
pub const PLAYER_BOTTOM_MARGIN: f64 = 10.0;
pub const PLAYER_NATURAL_WIDTH: f64 = 250.0;
pub const PLAYER_NATURAL_HEIGHT: f64 = 250.0;

// ── Invaders & waves ─────────────────────────────────────────────────────────
pub const INVADER_WIDTH: f64 = 32.75;
pub const INVADER_HEIGHT: f64 = 37.5;
pub const INVADER_SPEED: f64 = 5.0;
pub const WAVE_COLUMNS_MIN: usize = 5;
pub const WAVE_COLUMNS_MAX: usize = 15; // exclusive
pub const WAVE_ROWS_MIN: usize = 2;
pub const WAVE_ROWS_MAX: usize = 7; // exclusive

/// Size an entity reports before its sprite has been measured.
pub const PLACEHOLDER_SIZE: f64 = 100.0;

// ── Projectiles ──────────────────────────────────────────────────────────────
pub const PLAYER_PROJECTILE_SPEED: f64 = 10.0;
pub const PLAYER_PROJECTILE_RADIUS: f64 = 4.0;
pub const INVADER_PROJECTILE_SPEED: f64 = 5.0;
pub const INVADER_PROJECTILE_RADIUS: f64 = 5.0;

// ── Particles ────────────────────────────────────────────────────────────────
pub const BURST_PARTICLES: usize = 50;
pub const BURST_MAX_RADIUS: f64 = 3.0;
pub const FADE_PER_TICK: f64 = 0.02;
pub const STAR_COUNT: usize = 100;
pub const STAR_SPEED: f64 = 3.0;
pub const STAR_MAX_RADIUS: f64 = 2.0;
