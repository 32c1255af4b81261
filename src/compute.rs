/// Pure game-logic functions.
///
/// Every public function takes an immutable reference to the current
/// `GameState` (and, where needed, an RNG handle) and returns a brand-new
/// `GameState`. Side effects are limited to the injected RNG and logging.

use std::collections::HashSet;

use log::{debug, info};
use rand::Rng;

use crate::config::GameConfig;
use crate::constants::*;
use crate::entities::{
    AssetPhase, EntityId, GameEvent, GameState, GameStatus, IdAllocator, Particle, Player,
};
use crate::input::Intents;
use crate::surface::{RenderSurface, Rgb};
use crate::wave::Wave;

fn roll_spawn_threshold(rng: &mut impl Rng) -> u64 {
    rng.gen_range(WAVE_SPAWN_GAP_MIN..WAVE_SPAWN_GAP_MAX)
}

// ── Constructors ─────────────────────────────────────────────────────────────

/// Build the initial game state: a pending player, a starfield, no waves.
pub fn init_state(config: GameConfig, rng: &mut impl Rng) -> GameState {
    let stars = (0..config.star_count)
        .map(|_| Particle::star(rng, config.field_width, config.field_height))
        .collect();
    GameState {
        player: Player::new(config.field_width, config.field_height),
        projectiles: Vec::new(),
        invader_projectiles: Vec::new(),
        waves: Vec::new(),
        particles: Vec::new(),
        stars,
        score: 0,
        status: GameStatus::Running,
        active: true,
        grace_remaining: None,
        frame: 0,
        spawn_gap: 0,
        spawn_threshold: roll_spawn_threshold(rng),
        invader_phase: AssetPhase::Pending,
        ids: IdAllocator::default(),
        events: Vec::new(),
        config,
    }
}

// ── Asset readiness ──────────────────────────────────────────────────────────

/// The rocket sprite has been measured.
pub fn player_ready(state: &GameState, natural_width: f64, natural_height: f64) -> GameState {
    let mut next = state.clone();
    next.player.asset_ready(
        natural_width,
        natural_height,
        next.config.field_width,
        next.config.field_height,
    );
    info!(
        "Player sprite ready: {:.1}x{:.1}",
        next.player.width, next.player.height
    );
    next
}

/// The monster sprite has been measured; resize live and future invaders.
pub fn invaders_ready(state: &GameState) -> GameState {
    let mut next = state.clone();
    next.invader_phase = AssetPhase::Ready;
    for wave in &mut next.waves {
        wave.asset_ready();
    }
    info!("Invader sprite ready");
    next
}

// ── Input-driven transitions ─────────────────────────────────────────────────

/// Fire once from the player's ship. Ignored once the game is over.
pub fn player_fire(state: &GameState) -> GameState {
    if state.status.is_over() || !state.active {
        return state.clone();
    }
    let mut next = state.clone();
    let id = next.ids.allocate();
    next.player.fire(id, &mut next.projectiles);
    next
}

/// Turn held intents into next tick's velocity and tilt. Right wins when both
/// are held; the ship never moves past either side of the field.
fn steer(player: &mut Player, intents: Intents, config: &GameConfig) {
    let room_right = config.field_width - player.bounds().right();
    let room_left = player.position.x;

    if intents.right && room_right > 0.0 {
        player.velocity.x = config.player_speed.min(room_right);
        player.rotation = config.player_tilt;
    } else if intents.left && room_left > 0.0 {
        player.velocity.x = -config.player_speed.min(room_left);
        player.rotation = -config.player_tilt;
    } else {
        player.velocity.x = 0.0;
        player.rotation = 0.0;
    }
}

// ── Per-frame tick (RNG injected) ─────────────────────────────────────────────

/// Advance the simulation by one frame. All randomness comes through `rng`
/// so callers control determinism (useful for tests with a seeded RNG).
///
/// Removals found while walking a collection are collected as ids and
/// applied once the walk is over, so every comparison in a pass sees the
/// same collection.
pub fn tick(state: &GameState, intents: Intents, rng: &mut impl Rng) -> GameState {
    let mut s = state.clone();
    s.events.clear();
    if !s.active {
        return s;
    }

    let width = s.config.field_width;
    let height = s.config.field_height;
    let lost_before = s.grace_remaining.is_some();

    // ── 1. Starfield ─────────────────────────────────────────────────────────
    for star in &mut s.stars {
        star.wrap(height);
        star.update();
    }

    // ── 2. Player ────────────────────────────────────────────────────────────
    s.player.update();

    // ── 3. Waves: march, then player projectiles ↔ invaders ──────────────────
    let mut spent: HashSet<EntityId> = HashSet::new();
    let mut score_gain: u32 = 0;

    for wave in &mut s.waves {
        wave.drop_escaped(height);
        wave.march(width);

        let mut hit: HashSet<EntityId> = HashSet::new();
        for invader in &wave.invaders {
            let bounds = invader.bounds();
            let struck = s
                .projectiles
                .iter()
                .find(|p| !spent.contains(&p.id) && bounds.hit_by(p.position, p.radius));
            if let Some(projectile) = struck {
                s.particles
                    .extend(Particle::burst(rng, invader.position, Rgb::RED));
                spent.insert(projectile.id);
                hit.insert(invader.id);
                score_gain += SCORE_PER_INVADER;
            }
        }
        wave.remove(&hit);
    }

    s.waves.retain(|wave| {
        if wave.is_empty() {
            info!("Wave {:?} cleared", wave.id);
        }
        !wave.is_empty()
    });

    if score_gain > 0 {
        s.score += score_gain;
        s.events.push(GameEvent::ScoreChanged(s.score));
    }

    if s.frame % s.config.invader_fire_interval.max(1) == 0 {
        for wave in &s.waves {
            if let Some(shooter) = wave.random_shooter(rng) {
                shooter.fire(s.ids.allocate(), &mut s.invader_projectiles);
                debug!("Invader {:?} fired", shooter.id);
            }
        }
    }

    // ── 4. Explosion particles ───────────────────────────────────────────────
    for particle in &mut s.particles {
        particle.update();
    }
    s.particles.retain(|p| !p.is_spent());

    // ── 5. Player projectiles ────────────────────────────────────────────────
    s.projectiles.retain(|p| !spent.contains(&p.id));
    for projectile in &mut s.projectiles {
        projectile.update();
    }
    s.projectiles.retain(|p| !p.exited_top());

    // ── 6. Invader projectiles ↔ player ──────────────────────────────────────
    for projectile in &mut s.invader_projectiles {
        projectile.update();
    }
    s.invader_projectiles.retain(|p| !p.exited_bottom(height));

    if s.status == GameStatus::Running {
        let bounds = s.player.bounds();
        let struck = s
            .invader_projectiles
            .iter()
            .position(|p| bounds.hit_by(p.position, p.radius));
        if let Some(index) = struck {
            s.invader_projectiles.remove(index);
            s.particles
                .extend(Particle::burst(rng, bounds.center(), Rgb::CRIMSON));
            s.status = GameStatus::Lost;
            s.events.push(GameEvent::Finished(GameStatus::Lost));
            info!("Player hit at frame {}; score {}", s.frame, s.score);
            if s.config.grace_period_ticks == 0 {
                s.active = false;
            } else {
                s.grace_remaining = Some(s.config.grace_period_ticks);
            }
        }
    }

    // ── 7. Win condition ─────────────────────────────────────────────────────
    if s.status == GameStatus::Running && s.score >= s.config.win_score {
        s.status = GameStatus::Won;
        s.active = false;
        s.events.push(GameEvent::Finished(GameStatus::Won));
        info!("Win at frame {} with score {}", s.frame, s.score);
    }

    // ── 8. Intents → next tick's player velocity ─────────────────────────────
    // Once the game is over the ship stays still and level.
    let intents = if s.status.is_over() { Intents::default() } else { intents };
    steer(&mut s.player, intents, &s.config);

    // ── 9. Wave spawning ─────────────────────────────────────────────────────
    let gap_due = s.spawn_gap > 0 && s.spawn_gap % s.spawn_threshold == 0;
    if s.active && (s.waves.is_empty() || gap_due) {
        let wave = Wave::new(rng, &mut s.ids, s.invader_phase);
        info!(
            "Wave {:?} spawned: {}x{} at frame {}",
            wave.id, wave.columns, wave.rows, s.frame
        );
        s.events.push(GameEvent::WaveSpawned {
            columns: wave.columns,
            rows: wave.rows,
        });
        s.waves.push(wave);
        s.spawn_gap = 0;
        s.spawn_threshold = roll_spawn_threshold(rng);
    }

    // ── 10. Counters & grace period ──────────────────────────────────────────
    s.frame += 1;
    s.spawn_gap += 1;

    if lost_before {
        if let Some(remaining) = s.grace_remaining {
            let remaining = remaining.saturating_sub(1);
            s.grace_remaining = Some(remaining);
            if remaining == 0 {
                s.active = false;
                info!("Grace period over; halting at frame {}", s.frame);
            }
        }
    }

    s
}

// ── Drawing ──────────────────────────────────────────────────────────────────

/// Draw one complete frame, back to front.
pub fn render(state: &GameState, surface: &mut impl RenderSurface) {
    surface.clear();
    for star in &state.stars {
        star.draw(surface);
    }
    state.player.draw(surface, state.status.is_over());
    for wave in &state.waves {
        wave.draw(surface);
    }
    for particle in &state.particles {
        particle.draw(surface);
    }
    for projectile in &state.projectiles {
        projectile.draw(surface);
    }
    for projectile in &state.invader_projectiles {
        projectile.draw(surface);
    }
}
