//! Node element - represents a point in 3D space

use serde::{Deserialize, Serialize};

use crate::loads::{Dof, NodeLoad};

/// Boundary state of one nodal degree of freedom
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum DofState {
    /// Solved for during analysis
    #[default]
    Unresolved,
    /// Prescribed value (zero for a plain support, non-zero for a settlement)
    Known(f64),
}

impl DofState {
    /// The prescribed value, if any
    pub fn known(self) -> Option<f64> {
        match self {
            Self::Known(value) => Some(value),
            Self::Unresolved => None,
        }
    }
}

/// A 3D node in the finite element model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    /// X coordinate
    pub x: f64,
    /// Y coordinate
    pub y: f64,
    /// Z coordinate
    pub z: f64,

    /// Boundary state per DOF [DX, DY, DZ, RX, RY, RZ]
    pub(crate) dofs: [DofState; 6],

    /// Support flags per DOF; a flag marks where a reaction is recovered
    pub(crate) supports: [bool; 6],

    /// Loads applied directly to this node
    pub(crate) loads: Vec<NodeLoad>,

    /// Internal ID assigned during analysis
    #[serde(skip)]
    pub(crate) id: Option<usize>,

    /// Solved displacements [DX, DY, DZ, RX, RY, RZ]
    #[serde(skip)]
    pub(crate) displacements: Option<[f64; 6]>,

    /// Reaction forces [FX, FY, FZ, MX, MY, MZ]
    #[serde(skip)]
    pub(crate) reactions: [f64; 6],
}

impl Node {
    /// Create a new, unsupported node at the given coordinates
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self {
            x,
            y,
            z,
            dofs: [DofState::Unresolved; 6],
            supports: [false; 6],
            loads: Vec::new(),
            id: None,
            displacements: None,
            reactions: [0.0; 6],
        }
    }

    /// Get the coordinates as an array
    pub fn coords(&self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }

    /// Calculate distance to another node
    pub fn distance_to(&self, other: &Node) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        let dz = other.z - self.z;
        (dx * dx + dy * dy + dz * dz).sqrt()
    }

    /// ID assigned by the last renumbering, if any
    pub fn id(&self) -> Option<usize> {
        self.id
    }

    /// Boundary state of a DOF
    pub fn dof_state(&self, dof: Dof) -> DofState {
        self.dofs[dof.index()]
    }

    /// Support flags [DX, DY, DZ, RX, RY, RZ]
    pub fn supports(&self) -> [bool; 6] {
        self.supports
    }

    /// Whether any DOF carries a support
    pub fn is_supported(&self) -> bool {
        self.supports.iter().any(|&s| s)
    }

    /// Loads applied to this node
    pub fn loads(&self) -> &[NodeLoad] {
        &self.loads
    }

    /// Sum of applied nodal loads [FX, FY, FZ, MX, MY, MZ]
    pub fn load_totals(&self) -> [f64; 6] {
        let mut totals = [0.0; 6];
        for load in &self.loads {
            totals[load.direction.index()] += load.magnitude;
        }
        totals
    }

    /// Solved displacements [DX, DY, DZ, RX, RY, RZ], or `None` before analysis
    pub fn displacement(&self) -> Option<[f64; 6]> {
        self.displacements
    }

    /// Displacement of one DOF after analysis
    pub fn displacement_of(&self, dof: Dof) -> Option<f64> {
        self.displacements.map(|d| d[dof.index()])
    }

    /// Reactions [FX, FY, FZ, MX, MY, MZ]; zero for DOFs without a support
    pub fn reaction(&self) -> [f64; 6] {
        self.reactions
    }
}

impl Default for Node {
    fn default() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_creation() {
        let node = Node::new(1.0, 2.0, 3.0);
        assert_eq!(node.coords(), [1.0, 2.0, 3.0]);
        assert!(!node.is_supported());
        assert_eq!(node.dof_state(Dof::RZ), DofState::Unresolved);
        assert!(node.displacement().is_none());
    }

    #[test]
    fn test_node_distance() {
        let n1 = Node::new(0.0, 0.0, 0.0);
        let n2 = Node::new(3.0, 4.0, 0.0);
        assert!((n1.distance_to(&n2) - 5.0).abs() < 1e-10);
    }

    #[test]
    fn test_load_totals_accumulate() {
        let mut node = Node::new(0.0, 0.0, 0.0);
        node.loads.push(NodeLoad::fy(-3.0));
        node.loads.push(NodeLoad::fy(-2.0));
        node.loads.push(NodeLoad::mx(1.5));
        assert_eq!(node.load_totals(), [0.0, -5.0, 0.0, 1.5, 0.0, 0.0]);
    }
}
