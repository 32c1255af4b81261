/// A rectangular formation of invaders that marches and drops together.

use std::collections::HashSet;

use log::debug;
use rand::Rng;

use crate::constants::*;
use crate::entities::{AssetPhase, EntityId, IdAllocator, Invader};
use crate::surface::RenderSurface;
use crate::types::Vector2;

#[derive(Clone, Debug)]
pub struct Wave {
    pub id: EntityId,
    pub columns: usize,
    pub rows: usize,
    /// Column-major: every row of column 0, then column 1, and so on.
    pub invaders: Vec<Invader>,
    /// Shared horizontal speed; the sign is the marching direction.
    pub velocity_x: f64,
}

impl Wave {
    /// A formation of random size, parked in the top-left corner.
    pub fn new(rng: &mut impl Rng, ids: &mut IdAllocator, phase: AssetPhase) -> Self {
        let columns = rng.gen_range(WAVE_COLUMNS_MIN..WAVE_COLUMNS_MAX);
        let rows = rng.gen_range(WAVE_ROWS_MIN..WAVE_ROWS_MAX);
        Wave::with_size(columns, rows, ids, phase)
    }

    pub fn with_size(columns: usize, rows: usize, ids: &mut IdAllocator, phase: AssetPhase) -> Self {
        let velocity = Vector2::new(INVADER_SPEED, 0.0);
        let mut invaders = Vec::with_capacity(columns * rows);
        for column in 0..columns {
            for row in 0..rows {
                let position = Vector2::new(
                    column as f64 * INVADER_WIDTH,
                    row as f64 * INVADER_HEIGHT,
                );
                invaders.push(Invader::new(ids.allocate(), position, velocity, phase));
            }
        }
        Wave {
            id: ids.allocate(),
            columns,
            rows,
            invaders,
            velocity_x: INVADER_SPEED,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.invaders.is_empty()
    }

    /// The invader whose position stands in for the whole formation.
    pub fn leading(&self) -> Option<&Invader> {
        self.invaders.first()
    }

    /// Drop invaders whose bottom edge has reached the floor. No score, no burst.
    pub fn drop_escaped(&mut self, field_height: f64) -> usize {
        let before = self.invaders.len();
        self.invaders
            .retain(|inv| inv.position.y + INVADER_HEIGHT < field_height);
        let escaped = before - self.invaders.len();
        if escaped > 0 {
            debug!("Wave {:?}: {} invader(s) escaped", self.id, escaped);
        }
        escaped
    }

    /// Move every invader one step, then pick next tick's shared velocity.
    ///
    /// When the formation touches either side wall the direction flips and
    /// every invader gets one descend step for the following tick only.
    /// Returns whether a bounce happened.
    pub fn march(&mut self, field_width: f64) -> bool {
        for invader in &mut self.invaders {
            invader.update();
        }

        let bounce = match self.leading() {
            Some(lead) => {
                lead.position.x + INVADER_WIDTH * self.columns as f64 >= field_width
                    || lead.position.x <= 0.0
            }
            None => false,
        };

        let descend = if bounce {
            self.velocity_x = -self.velocity_x;
            INVADER_HEIGHT
        } else {
            0.0
        };
        for invader in &mut self.invaders {
            invader.velocity = Vector2::new(self.velocity_x, descend);
        }
        bounce
    }

    pub fn remove(&mut self, hit: &HashSet<EntityId>) {
        if hit.is_empty() {
            return;
        }
        self.invaders.retain(|inv| !hit.contains(&inv.id));
    }

    /// Uniformly random surviving invader, if any.
    pub fn random_shooter(&self, rng: &mut impl Rng) -> Option<&Invader> {
        if self.invaders.is_empty() {
            return None;
        }
        self.invaders.get(rng.gen_range(0..self.invaders.len()))
    }

    pub fn asset_ready(&mut self) {
        for invader in &mut self.invaders {
            invader.asset_ready();
        }
    }

    pub fn draw(&self, surface: &mut impl RenderSurface) {
        for invader in &self.invaders {
            invader.draw(surface);
        }
    }
}
