//! Node loads - forces and moments applied directly to nodes

use serde::{Deserialize, Serialize};

/// Global direction of a nodal load
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GlobalDirection {
    FX,
    FY,
    FZ,
    MX,
    MY,
    MZ,
}

impl GlobalDirection {
    /// Offset of this direction within a node's six DOFs
    pub fn index(self) -> usize {
        match self {
            Self::FX => 0,
            Self::FY => 1,
            Self::FZ => 2,
            Self::MX => 3,
            Self::MY => 4,
            Self::MZ => 5,
        }
    }
}

/// One of the six nodal degrees of freedom, in global axes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Dof {
    DX,
    DY,
    DZ,
    RX,
    RY,
    RZ,
}

impl Dof {
    /// All six DOFs in storage order
    pub const ALL: [Dof; 6] = [Dof::DX, Dof::DY, Dof::DZ, Dof::RX, Dof::RY, Dof::RZ];

    /// Offset of this DOF within a node's six DOFs
    pub fn index(self) -> usize {
        match self {
            Self::DX => 0,
            Self::DY => 1,
            Self::DZ => 2,
            Self::RX => 3,
            Self::RY => 4,
            Self::RZ => 5,
        }
    }
}

/// A load applied directly to a node
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NodeLoad {
    /// Global direction of the load
    pub direction: GlobalDirection,
    /// Signed magnitude (force or moment)
    pub magnitude: f64,
}

impl NodeLoad {
    /// Create a new node load
    pub fn new(direction: GlobalDirection, magnitude: f64) -> Self {
        Self {
            direction,
            magnitude,
        }
    }

    /// Create a load in X direction
    pub fn fx(value: f64) -> Self {
        Self::new(GlobalDirection::FX, value)
    }

    /// Create a load in Y direction
    pub fn fy(value: f64) -> Self {
        Self::new(GlobalDirection::FY, value)
    }

    /// Create a load in Z direction
    pub fn fz(value: f64) -> Self {
        Self::new(GlobalDirection::FZ, value)
    }

    /// Create a moment about X
    pub fn mx(value: f64) -> Self {
        Self::new(GlobalDirection::MX, value)
    }

    /// Create a moment about Y
    pub fn my(value: f64) -> Self {
        Self::new(GlobalDirection::MY, value)
    }

    /// Create a moment about Z
    pub fn mz(value: f64) -> Self {
        Self::new(GlobalDirection::MZ, value)
    }

    /// Get the load as an array [FX, FY, FZ, MX, MY, MZ]
    pub fn as_array(&self) -> [f64; 6] {
        let mut arr = [0.0; 6];
        arr[self.direction.index()] = self.magnitude;
        arr
    }
}
