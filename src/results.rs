//! Result types for FEA analysis

use serde::{Deserialize, Serialize};

use crate::math::Vec12;

/// Solved displacements and rotations of a node, in global axes
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct NodeDisplacement {
    /// Displacement in X direction
    pub dx: f64,
    /// Displacement in Y direction
    pub dy: f64,
    /// Displacement in Z direction
    pub dz: f64,
    /// Rotation about X axis
    pub rx: f64,
    /// Rotation about Y axis
    pub ry: f64,
    /// Rotation about Z axis
    pub rz: f64,
}

impl NodeDisplacement {
    /// Unpack a node's six solved DOFs
    pub fn from_array(arr: [f64; 6]) -> Self {
        Self {
            dx: arr[0],
            dy: arr[1],
            dz: arr[2],
            rx: arr[3],
            ry: arr[4],
            rz: arr[5],
        }
    }

    /// Length of the translation vector
    pub fn translation_magnitude(&self) -> f64 {
        (self.dx.powi(2) + self.dy.powi(2) + self.dz.powi(2)).sqrt()
    }
}

/// Support reactions recovered at a node; zero on unrestrained DOFs
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Reactions {
    /// Reaction force in X direction
    pub fx: f64,
    /// Reaction force in Y direction
    pub fy: f64,
    /// Reaction force in Z direction
    pub fz: f64,
    /// Reaction moment about X axis
    pub mx: f64,
    /// Reaction moment about Y axis
    pub my: f64,
    /// Reaction moment about Z axis
    pub mz: f64,
}

impl Reactions {
    /// Unpack a node's six reaction components
    pub fn from_array(arr: [f64; 6]) -> Self {
        Self {
            fx: arr[0],
            fy: arr[1],
            fz: arr[2],
            mx: arr[3],
            my: arr[4],
            mz: arr[5],
        }
    }

    /// Length of the reaction force vector
    pub fn force_magnitude(&self) -> f64 {
        (self.fx.powi(2) + self.fy.powi(2) + self.fz.powi(2)).sqrt()
    }
}

/// Internal actions at one end of a member, in the sign convention of
/// [`MemberSegments`](crate::elements::MemberSegments)
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MemberForces {
    /// Axial force (positive = tension)
    pub axial: f64,
    /// Shear force in local y direction
    pub shear_y: f64,
    /// Shear force in local z direction
    pub shear_z: f64,
    /// Torsion
    pub torsion: f64,
    /// Bending moment about local y axis
    pub moment_y: f64,
    /// Bending moment about local z axis
    pub moment_z: f64,
}

impl MemberForces {
    /// Internal actions at the i-end from local end forces
    pub fn from_i_node_forces(forces: &Vec12) -> Self {
        Self {
            axial: -forces[0],
            shear_y: forces[1],
            shear_z: forces[2],
            torsion: -forces[3],
            moment_y: -forces[4],
            moment_z: -forces[5],
        }
    }

    /// Internal actions at the j-end from local end forces
    pub fn from_j_node_forces(forces: &Vec12) -> Self {
        Self {
            axial: forces[6],
            shear_y: -forces[7],
            shear_z: -forces[8],
            torsion: forces[9],
            moment_y: forces[10],
            moment_z: forces[11],
        }
    }
}

/// Peak results over the whole model, for reporting
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalysisSummary {
    /// Largest nodal translation
    pub max_displacement: f64,
    pub max_disp_node: String,
    /// Largest reaction force
    pub max_reaction: f64,
    pub max_reaction_node: String,
    /// Largest member-end axial force, either sign
    pub max_axial: f64,
    pub max_axial_member: String,
    /// Largest member-end bending moment about either local axis
    pub max_moment: f64,
    pub max_moment_member: String,
    pub num_nodes: usize,
    pub num_members: usize,
    pub num_plates: usize,
    /// Six per node
    pub total_dofs: usize,
    /// DOFs without a prescribed value
    pub free_dofs: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_magnitudes() {
        let d = NodeDisplacement::from_array([3.0, 4.0, 0.0, 0.0, 0.0, 0.1]);
        assert_relative_eq!(d.translation_magnitude(), 5.0);
        let r = Reactions::from_array([0.0, -6.0, 8.0, 100.0, 0.0, 0.0]);
        assert_relative_eq!(r.force_magnitude(), 10.0);
    }

    #[test]
    fn test_end_actions_share_sign_convention() {
        // Simply supported span of 10 under a midspan load of 2 (downward)
        let mut f = Vec12::zeros();
        f[1] = 1.0;
        f[7] = 1.0;
        let i = MemberForces::from_i_node_forces(&f);
        let j = MemberForces::from_j_node_forces(&f);
        assert_relative_eq!(i.shear_y, 1.0);
        assert_relative_eq!(j.shear_y, -1.0);
        assert_relative_eq!(i.moment_z, 0.0);
    }
}
