//! Distributed loads on members

use super::point_load::LoadDirection;
use serde::{Deserialize, Serialize};

/// A linearly varying distributed (line) load on a member
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DistributedLoad {
    /// Load direction (Fx, Fy or Fz)
    pub direction: LoadDirection,
    /// Start magnitude (at start position)
    pub w1: f64,
    /// End magnitude (at end position)
    pub w2: f64,
    /// Start position (distance from i-node)
    pub x1: f64,
    /// End position; `None` runs the load to the j-node
    pub x2: Option<f64>,
}

impl DistributedLoad {
    /// Create a load varying from `w1` to `w2` over the full member length
    pub fn new(direction: LoadDirection, w1: f64, w2: f64) -> Self {
        Self {
            direction,
            w1,
            w2,
            x1: 0.0,
            x2: None,
        }
    }

    /// Create a uniform distributed load over the full member length
    pub fn uniform(direction: LoadDirection, w: f64) -> Self {
        Self::new(direction, w, w)
    }

    /// Restrict the load to the region between `x1` and `x2`
    pub fn between(mut self, x1: f64, x2: f64) -> Self {
        self.x1 = x1;
        self.x2 = Some(x2);
        self
    }

    /// End position, falling back to the member length
    pub fn end(&self, length: f64) -> f64 {
        self.x2.unwrap_or(length)
    }

    /// Load intensity at `x`; zero outside the loaded region
    pub fn intensity_at(&self, x: f64, length: f64) -> f64 {
        let x2 = self.end(length);
        if x < self.x1 || x > x2 || x2 <= self.x1 {
            return 0.0;
        }
        self.w1 + (self.w2 - self.w1) * (x - self.x1) / (x2 - self.x1)
    }

    /// Get the total force from this load
    pub fn total_force(&self, length: f64) -> f64 {
        (self.w1 + self.w2) / 2.0 * (self.end(length) - self.x1)
    }
}
