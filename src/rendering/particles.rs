use std::collections::VecDeque;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::domain::{Cell, EffectSink, PatternId};

const BIRTH_LIFETIME: f32 = 0.5;
const DEATH_LIFETIME: f32 = 0.9;
/// Cells per second
const BIRTH_SPEED: f32 = 1.5;
const DEATH_SPEED: f32 = 3.0;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ParticleKind {
    Birth,
    Death,
}

/// A spark in grid coordinates. `prev` is the position one update ago and
/// forms the trail segment.
#[derive(Clone, Copy, Debug)]
pub struct Particle {
    pub kind: ParticleKind,
    pub pos: (f32, f32),
    pub prev: (f32, f32),
    velocity: (f32, f32),
    life: f32,
    max_life: f32,
}

impl Particle {
    /// Remaining life in [0, 1], used as opacity
    pub fn fade(&self) -> f32 {
        (self.life / self.max_life).clamp(0.0, 1.0)
    }
}

/// Bounded pool of short-lived particles fed by grid events.
/// When full, the oldest particle is evicted.
pub struct ParticleField {
    particles: VecDeque<Particle>,
    capacity: usize,
    rng: StdRng,
}

impl ParticleField {
    pub fn new(capacity: usize, seed: u64) -> Self {
        let capacity = capacity.max(1);
        Self {
            particles: VecDeque::with_capacity(capacity),
            capacity,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter()
    }

    pub fn clear(&mut self) {
        self.particles.clear();
    }

    /// Emit one particle from the center of `cell`
    pub fn spawn(&mut self, cell: Cell, kind: ParticleKind) {
        let (speed, max_life) = match kind {
            ParticleKind::Birth => (BIRTH_SPEED, BIRTH_LIFETIME),
            ParticleKind::Death => (DEATH_SPEED, DEATH_LIFETIME),
        };
        let angle = self.rng.random_range(0.0..std::f32::consts::TAU);
        let speed = speed * self.rng.random_range(0.5..1.0);
        let center = (cell.col as f32 + 0.5, cell.row as f32 + 0.5);

        if self.particles.len() == self.capacity {
            self.particles.pop_front();
        }
        self.particles.push_back(Particle {
            kind,
            pos: center,
            prev: center,
            velocity: (angle.cos() * speed, angle.sin() * speed),
            life: max_life,
            max_life,
        });
    }

    /// Move every particle and drop the expired ones
    pub fn update(&mut self, delta_time: f32) {
        for p in &mut self.particles {
            p.prev = p.pos;
            p.pos.0 += p.velocity.0 * delta_time;
            p.pos.1 += p.velocity.1 * delta_time;
            p.life -= delta_time;
        }
        self.particles.retain(|p| p.life > 0.0);
    }
}

impl EffectSink for ParticleField {
    fn on_birth(&mut self, cell: Cell) {
        self.spawn(cell, ParticleKind::Birth);
    }

    fn on_death(&mut self, cell: Cell) {
        self.spawn(cell, ParticleKind::Death);
    }

    fn on_pattern_loaded(&mut self, _pattern: PatternId) {
        self.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_oldest_particle_is_evicted() {
        let mut field = ParticleField::new(3, 1);
        for col in 0..5 {
            field.on_birth(Cell::new(col, 0));
        }
        assert_eq!(field.len(), 3);
        let first = field.iter().next().map(|p| p.prev);
        assert_eq!(first, Some((2.5, 0.5)));
    }

    #[test]
    fn test_update_moves_and_expires() {
        let mut field = ParticleField::new(16, 7);
        field.on_birth(Cell::new(5, 5));
        field.on_death(Cell::new(5, 5));

        field.update(0.1);
        assert_eq!(field.len(), 2);
        for p in field.iter() {
            assert_eq!(p.prev, (5.5, 5.5));
            assert_ne!(p.pos, p.prev);
            assert!(p.fade() < 1.0);
        }

        field.update(BIRTH_LIFETIME);
        assert_eq!(field.len(), 1);
        assert_eq!(field.iter().next().map(|p| p.kind), Some(ParticleKind::Death));

        field.update(DEATH_LIFETIME);
        assert!(field.is_empty());
    }

    #[test]
    fn test_pattern_load_clears() {
        let mut field = ParticleField::new(8, 0);
        field.on_death(Cell::new(0, 0));
        field.on_pattern_loaded(PatternId::Glider);
        assert!(field.is_empty());
    }
}
