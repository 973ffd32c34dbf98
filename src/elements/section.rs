//! Section and material properties for frame members

use serde::{Deserialize, Serialize};

/// Cross-section and material properties of a member
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Section {
    /// Modulus of elasticity
    pub e: f64,
    /// Shear modulus
    pub g: f64,
    /// Moment of inertia about local y-axis
    pub iy: f64,
    /// Moment of inertia about local z-axis
    pub iz: f64,
    /// Torsional constant
    pub j: f64,
    /// Cross-sectional area
    pub a: f64,
}

impl Section {
    /// Create a section from its six properties
    pub fn new(e: f64, g: f64, iy: f64, iz: f64, j: f64, a: f64) -> Self {
        Self { e, g, iy, iz, j, a }
    }

    /// Create a solid rectangular section
    ///
    /// `width` runs along local z and `depth` along local y, so `iz` is the
    /// strong-axis inertia when depth exceeds width.
    pub fn rectangular(e: f64, g: f64, width: f64, depth: f64) -> Self {
        let a = width * depth;
        let iz = width * depth.powi(3) / 12.0;
        let iy = depth * width.powi(3) / 12.0;

        // Torsional constant for rectangle (approximate)
        let (long, short) = if width > depth { (width, depth) } else { (depth, width) };
        let j = long * short.powi(3) / 3.0 * (1.0 - 0.63 * short / long);

        Self::new(e, g, iy, iz, j, a)
    }

    /// Create a solid circular section
    pub fn circular(e: f64, g: f64, diameter: f64) -> Self {
        let r = diameter / 2.0;
        let a = std::f64::consts::PI * r.powi(2);
        let i = std::f64::consts::PI * r.powi(4) / 4.0;
        let j = std::f64::consts::PI * r.powi(4) / 2.0;

        Self::new(e, g, i, i, j, a)
    }

    /// Check that every property is finite and strictly positive
    pub fn is_valid(&self) -> bool {
        [self.e, self.g, self.iy, self.iz, self.j, self.a]
            .iter()
            .all(|v| v.is_finite() && *v > 0.0)
    }
}
