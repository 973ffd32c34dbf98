//! Support reactions and the global statics check

use serde::{Deserialize, Serialize};

use crate::error::{FEAError, FEAResult};
use crate::model::{FEModel, NodeKey};

/// Global load and reaction totals, taken about the global origin
///
/// Both arrays are ordered [FX, FY, FZ, MX, MY, MZ]. Applied loads include
/// member loads as their equivalent nodal loads.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StaticsCheck {
    pub applied: [f64; 6],
    pub reactions: [f64; 6],
}

impl StaticsCheck {
    /// Applied loads plus reactions; zero for a structure in equilibrium
    pub fn residual(&self) -> [f64; 6] {
        let mut r = [0.0; 6];
        for (k, v) in r.iter_mut().enumerate() {
            *v = self.applied[k] + self.reactions[k];
        }
        r
    }

    /// Whether every residual is within `tol` of zero, relative to the largest total
    pub fn is_balanced(&self, tol: f64) -> bool {
        let scale = self
            .applied
            .iter()
            .chain(self.reactions.iter())
            .fold(1.0_f64, |acc, v| acc.max(v.abs()));
        self.residual().iter().all(|r| r.abs() <= tol * scale)
    }
}

/// Add a force/moment set acting at `pos` to running totals about the origin
fn accumulate(sum: &mut [f64; 6], f: &[f64; 6], pos: [f64; 3]) {
    let [x, y, z] = pos;
    let [fx, fy, fz, mx, my, mz] = *f;
    sum[0] += fx;
    sum[1] += fy;
    sum[2] += fz;
    sum[3] += mx - fy * z + fz * y;
    sum[4] += my + fx * z - fz * x;
    sum[5] += mz - fx * y + fy * x;
}

impl FEModel {
    /// Recover reactions at every supported node from element end forces
    pub(crate) fn calculate_reactions(&mut self) -> FEAResult<()> {
        let mut totals: Vec<(NodeKey, [f64; 6])> = Vec::new();

        for (key, _, node) in self.nodes.iter() {
            if !node.is_supported() {
                continue;
            }
            let mut rxn = [0.0; 6];

            for member_key in self.members.keys() {
                let view = self.member_view(member_key)?;
                let end = if view.member.i_node == key {
                    0
                } else if view.member.j_node == key {
                    6
                } else {
                    continue;
                };
                let f = view.global_forces()?;
                for (dof, r) in rxn.iter_mut().enumerate() {
                    *r += f[end + dof];
                }
            }

            for plate_key in self.plates.keys() {
                let view = self.plate_view(plate_key)?;
                let Some(corner) = view.plate.nodes.iter().position(|&n| n == key) else {
                    continue;
                };
                let f = view.global_forces()?;
                for (dof, r) in rxn.iter_mut().enumerate() {
                    *r += f[corner * 6 + dof];
                }
            }

            let supports = node.supports();
            for (dof, (r, load)) in rxn.iter_mut().zip(node.load_totals()).enumerate() {
                *r = if supports[dof] { *r - load } else { 0.0 };
            }
            totals.push((key, rxn));
        }

        for (key, rxn) in totals {
            if let Some(node) = self.nodes.get_mut(key) {
                node.reactions = rxn;
            }
        }
        Ok(())
    }

    /// Sum the applied loads and the reactions about the global origin
    pub fn check_statics(&self) -> FEAResult<StaticsCheck> {
        if self.solution.is_none() {
            return Err(FEAError::NotAnalyzed);
        }
        let p = self.p()?;
        let fer = self.fer()?;

        let mut check = StaticsCheck {
            applied: [0.0; 6],
            reactions: [0.0; 6],
        };
        for (key, _, node) in self.nodes.iter() {
            let base = self.dof_base(key)?;
            let mut applied = [0.0; 6];
            for (dof, f) in applied.iter_mut().enumerate() {
                *f = p[base + dof] - fer[base + dof];
            }
            accumulate(&mut check.applied, &applied, node.coords());
            accumulate(&mut check.reactions, &node.reaction(), node.coords());
        }
        Ok(check)
    }
}
