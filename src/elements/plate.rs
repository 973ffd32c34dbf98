//! Plate element - rectangular plate with bending and membrane action
//!
//! Uses a 4-node element with 6 DOFs per node (DX, DY, DZ, RX, RY, RZ).
//! Corner nodes are ordered i, j, m, n around the plate.

use serde::{Deserialize, Serialize};

use super::node::Node;
use crate::error::{FEAError, FEAResult};
use crate::math::plate as plate_math;
use crate::math::{Mat24, Vec24};
use crate::model::NodeKey;

/// A rectangular plate element
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Plate {
    pub(crate) nodes: [NodeKey; 4],
    /// Thickness
    pub thickness: f64,
    /// Modulus of elasticity
    pub e: f64,
    /// Poisson's ratio
    pub nu: f64,
}

impl Plate {
    pub(crate) fn new(nodes: [NodeKey; 4], thickness: f64, e: f64, nu: f64) -> Self {
        Self {
            nodes,
            thickness,
            e,
            nu,
        }
    }

    /// Corner node keys in i, j, m, n order
    pub fn nodes(&self) -> [NodeKey; 4] {
        self.nodes
    }
}

/// Internal actions at a point of a plate
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PlateActions {
    /// Membrane stress Sx (in-plane, x direction)
    pub sx: f64,
    /// Membrane stress Sy (in-plane, y direction)
    pub sy: f64,
    /// Membrane shear stress Txy (in-plane)
    pub txy: f64,
    /// Bending moment Mx per unit width
    pub mx: f64,
    /// Bending moment My per unit width
    pub my: f64,
    /// Twisting moment Mxy per unit width
    pub mxy: f64,
    /// Transverse shear Qx per unit width
    pub qx: f64,
    /// Transverse shear Qy per unit width
    pub qy: f64,
}

/// A plate together with its four corner nodes
#[derive(Debug, Clone, Copy)]
pub struct PlateView<'a> {
    pub plate: &'a Plate,
    pub nodes: [&'a Node; 4],
}

impl<'a> PlateView<'a> {
    fn i(&self) -> &Node {
        self.nodes[0]
    }

    /// Plate width along local x (i to n)
    pub fn width(&self) -> f64 {
        self.i().distance_to(self.nodes[3])
    }

    /// Plate height along local y (i to j)
    pub fn height(&self) -> f64 {
        self.i().distance_to(self.nodes[1])
    }

    pub fn local_stiffness(&self) -> Mat24 {
        let p = self.plate;
        plate_math::plate_local_stiffness(self.width(), self.height(), p.e, p.thickness, p.nu)
    }

    pub fn transformation(&self) -> FEAResult<Mat24> {
        plate_math::plate_transformation_matrix(
            &self.nodes[0].coords(),
            &self.nodes[1].coords(),
            &self.nodes[3].coords(),
        )
    }

    pub fn global_stiffness(&self) -> FEAResult<Mat24> {
        let t = self.transformation()?;
        Ok(t.transpose() * self.local_stiffness() * t)
    }

    /// Fixed end reactions; plates carry no surface loads, so this is zero
    pub fn fixed_end_reactions(&self) -> Vec24 {
        Vec24::zeros()
    }

    pub fn global_fixed_end_reactions(&self) -> Vec24 {
        Vec24::zeros()
    }

    pub fn global_displacements(&self) -> FEAResult<Vec24> {
        let mut d = Vec24::zeros();
        for (n, node) in self.nodes.iter().enumerate() {
            let dn = node.displacement().ok_or(FEAError::NotAnalyzed)?;
            for (k, v) in dn.into_iter().enumerate() {
                d[n * 6 + k] = v;
            }
        }
        Ok(d)
    }

    pub fn local_displacements(&self) -> FEAResult<Vec24> {
        Ok(self.transformation()? * self.global_displacements()?)
    }

    /// Local nodal forces acting on the plate
    pub fn local_forces(&self) -> FEAResult<Vec24> {
        Ok(self.local_stiffness() * self.local_displacements()? + self.fixed_end_reactions())
    }

    pub fn global_forces(&self) -> FEAResult<Vec24> {
        Ok(self.transformation()?.transpose() * self.local_forces()?)
    }

    fn check_point(&self, x: f64, y: f64) -> FEAResult<()> {
        let (w, h) = (self.width(), self.height());
        let tol = 1e-9 * w.max(h);
        if !(x >= -tol && x <= w + tol && y >= -tol && y <= h + tol) {
            return Err(FEAError::InvalidInput(format!(
                "point ({x}, {y}) lies outside the {w} x {h} plate"
            )));
        }
        Ok(())
    }

    /// Internal moments [Mx, My, Mxy] at local point (x, y)
    pub fn moment(&self, x: f64, y: f64) -> FEAResult<[f64; 3]> {
        self.check_point(x, y)?;
        let p = self.plate;
        let m = plate_math::plate_moments(
            self.width(),
            self.height(),
            p.e,
            p.thickness,
            p.nu,
            &self.local_displacements()?,
            x,
            y,
        )?;
        Ok([m[0], m[1], m[2]])
    }

    /// Transverse shears [Qx, Qy] at local point (x, y)
    pub fn shear(&self, x: f64, y: f64) -> FEAResult<[f64; 2]> {
        self.check_point(x, y)?;
        let p = self.plate;
        plate_math::plate_shears(
            self.width(),
            self.height(),
            p.e,
            p.thickness,
            p.nu,
            &self.local_displacements()?,
            x,
            y,
        )
    }

    /// In-plane stresses [Sx, Sy, Txy] at local point (x, y)
    pub fn membrane_stress(&self, x: f64, y: f64) -> FEAResult<[f64; 3]> {
        self.check_point(x, y)?;
        let s = plate_math::membrane_stress(
            self.width(),
            self.height(),
            self.plate.e,
            self.plate.nu,
            &self.local_displacements()?,
            x,
            y,
        );
        Ok([s[0], s[1], s[2]])
    }

    /// All internal actions at local point (x, y)
    pub fn actions(&self, x: f64, y: f64) -> FEAResult<PlateActions> {
        let [sx, sy, txy] = self.membrane_stress(x, y)?;
        let [mx, my, mxy] = self.moment(x, y)?;
        let [qx, qy] = self.shear(x, y)?;
        Ok(PlateActions {
            sx,
            sy,
            txy,
            mx,
            my,
            mxy,
            qx,
            qy,
        })
    }

    /// Internal actions at the plate centre
    pub fn center_actions(&self) -> FEAResult<PlateActions> {
        self.actions(self.width() / 2.0, self.height() / 2.0)
    }
}
