//! Point loads on members

use serde::{Deserialize, Serialize};

/// Direction of a member load, in the member's local axes
///
/// Transverse forces act in the positive local axis direction when positive.
/// Moments follow the right-hand rule about the local axis.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum LoadDirection {
    /// Force in member's local x direction (axial)
    Fx,
    /// Force in member's local y direction
    Fy,
    /// Force in member's local z direction
    Fz,
    /// Moment about member's local x axis (torsion)
    Mx,
    /// Moment about member's local y axis
    My,
    /// Moment about member's local z axis
    Mz,
}

impl LoadDirection {
    /// Whether the direction is a force (as opposed to a moment)
    pub fn is_force(self) -> bool {
        matches!(self, Self::Fx | Self::Fy | Self::Fz)
    }
}

/// A concentrated load on a member
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointLoad {
    /// Load direction
    pub direction: LoadDirection,
    /// Load magnitude
    pub magnitude: f64,
    /// Distance from i-node
    pub position: f64,
}

impl PointLoad {
    /// Create a new point load
    pub fn new(direction: LoadDirection, magnitude: f64, position: f64) -> Self {
        Self {
            direction,
            magnitude,
            position,
        }
    }
}
