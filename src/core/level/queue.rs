use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::LevelError;

/// Randomness source feeding the level queue and spawn placement. Seedable
/// from config so runs (and tests) can be made deterministic.
#[derive(Resource)]
pub struct LevelRng(pub StdRng);

impl LevelRng {
    pub fn from_seed_opt(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self(StdRng::seed_from_u64(seed)),
            None => Self(StdRng::from_entropy()),
        }
    }
}

/// Two-slot lookahead deciding the level of the next spawned ball and the one
/// after it. Draws stay inside the bottom quarter of the level table so fresh
/// balls are always small.
#[derive(Resource, Debug, Clone, PartialEq, Eq)]
pub struct LevelQueue {
    pending: [usize; 2],
    draw_range: usize,
}

impl LevelQueue {
    /// Seeds both slots from the same uniform draw `take_next` uses.
    pub fn new(level_count: usize, rng: &mut impl Rng) -> Result<Self, LevelError> {
        let draw_range = level_count / 4;
        if draw_range == 0 {
            return Err(LevelError::DrawRangeEmpty { count: level_count });
        }
        Ok(Self {
            pending: [rng.gen_range(0..draw_range), rng.gen_range(0..draw_range)],
            draw_range,
        })
    }

    /// Pop the level for the spawn happening now and refill the lookahead.
    /// Call exactly once per spawn event, in spawn order, so the two pending
    /// slots always read "next" and "the one after".
    pub fn take_next(&mut self, rng: &mut impl Rng) -> usize {
        let next = self.pending[0];
        self.pending[0] = self.pending[1];
        self.pending[1] = rng.gen_range(0..self.draw_range);
        next
    }

    /// The two pending levels: (spawning next, the one after that).
    pub fn preview(&self) -> (usize, usize) {
        (self.pending[0], self.pending[1])
    }

    pub fn draw_range(&self) -> usize {
        self.draw_range
    }
}
