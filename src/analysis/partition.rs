//! Partitioning of the global system into unknown and known displacements

use crate::elements::DofState;
use crate::error::FEAResult;
use crate::math::{self, Mat, Vec as FEVec};
use crate::model::FEModel;

/// Global DOF indices split by whether their displacement is known
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DofPartition {
    /// Unknown (free) DOF indices, ascending
    pub d1: Vec<usize>,
    /// Known (supported or settled) DOF indices, ascending
    pub d2: Vec<usize>,
    /// Prescribed values of the known DOFs, aligned with `d2`
    pub d2_values: FEVec,
}

impl DofPartition {
    pub fn num_dofs(&self) -> usize {
        self.d1.len() + self.d2.len()
    }

    /// Split a square matrix into (m11, m12, m21, m22)
    pub fn split_matrix(&self, m: &Mat) -> (Mat, Mat, Mat, Mat) {
        (
            m.select_rows(&self.d1).select_columns(&self.d1),
            m.select_rows(&self.d1).select_columns(&self.d2),
            m.select_rows(&self.d2).select_columns(&self.d1),
            m.select_rows(&self.d2).select_columns(&self.d2),
        )
    }

    /// Split a vector into (v1, v2)
    pub fn split_vector(&self, v: &FEVec) -> (FEVec, FEVec) {
        (v.select_rows(&self.d1), v.select_rows(&self.d2))
    }

    /// Interleave solved and known values back into global order
    pub fn assemble(&self, d1: &FEVec) -> FEVec {
        let mut d = FEVec::zeros(self.num_dofs());
        for (&i, &v) in self.d1.iter().zip(d1.iter()) {
            d[i] = v;
        }
        for (&i, &v) in self.d2.iter().zip(self.d2_values.iter()) {
            d[i] = v;
        }
        d
    }

    /// Solve `K11·D1 = P1 − FER1 − K12·D2` and return the full displacement vector
    ///
    /// Returns `None` when the reduced stiffness matrix is singular.
    pub fn solve(&self, k: &Mat, fer: &FEVec, p: &FEVec) -> Option<FEVec> {
        let (k11, k12, _, _) = self.split_matrix(k);
        let (fer1, _) = self.split_vector(fer);
        let (p1, _) = self.split_vector(p);

        let d1 = if self.d1.is_empty() {
            FEVec::zeros(0)
        } else {
            let rhs = p1 - fer1 - k12 * &self.d2_values;
            math::solve_linear_system(&k11, &rhs)?
        };
        Some(self.assemble(&d1))
    }
}

/// Result of checking the reduced stiffness matrix
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stability {
    /// Every DOF is known; nothing to solve
    Empty,
    Stable,
    /// Rank-deficient by `deficiency` DOFs
    Unstable { deficiency: usize },
}

/// Check `K11` for rank deficiency
pub fn check_stability(k11: &Mat) -> Stability {
    let n = k11.nrows();
    if n == 0 {
        return Stability::Empty;
    }
    let rank = math::matrix_rank(k11);
    if rank < n {
        Stability::Unstable {
            deficiency: n - rank,
        }
    } else {
        Stability::Stable
    }
}

impl FEModel {
    /// Partition the global DOFs by their boundary state
    ///
    /// Nodes must be numbered first.
    pub fn partition(&self) -> FEAResult<DofPartition> {
        let mut d1 = Vec::new();
        let mut d2 = Vec::new();
        let mut values = Vec::new();

        let mut nodes: Vec<_> = self
            .nodes
            .iter()
            .map(|(key, _, node)| self.dof_base(key).map(|base| (base, node)))
            .collect::<FEAResult<_>>()?;
        nodes.sort_by_key(|(base, _)| *base);

        for (base, node) in nodes {
            for (offset, state) in node.dofs.iter().enumerate() {
                match state {
                    DofState::Unresolved => d1.push(base + offset),
                    DofState::Known(v) => {
                        d2.push(base + offset);
                        values.push(*v);
                    }
                }
            }
        }

        Ok(DofPartition {
            d1,
            d2,
            d2_values: FEVec::from_vec(values),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn partition() -> DofPartition {
        DofPartition {
            d1: vec![0, 2],
            d2: vec![1],
            d2_values: FEVec::from_vec(vec![0.5]),
        }
    }

    #[test]
    fn test_split_and_assemble() {
        let p = partition();
        let m = Mat::from_row_slice(3, 3, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0]);
        let (m11, m12, m21, m22) = p.split_matrix(&m);
        assert_eq!(m11, Mat::from_row_slice(2, 2, &[1.0, 3.0, 7.0, 9.0]));
        assert_eq!(m12, Mat::from_row_slice(2, 1, &[2.0, 8.0]));
        assert_eq!(m21, Mat::from_row_slice(1, 2, &[4.0, 6.0]));
        assert_eq!(m22[(0, 0)], 5.0);

        let d = p.assemble(&FEVec::from_vec(vec![10.0, 30.0]));
        assert_eq!(d.as_slice(), &[10.0, 0.5, 30.0]);
    }

    #[test]
    fn test_solve_with_prescribed_value() {
        // Two springs in series, the middle node pushed to 0.5
        let p = partition();
        let k = Mat::from_row_slice(3, 3, &[1.0, -1.0, 0.0, -1.0, 2.0, -1.0, 0.0, -1.0, 1.0]);
        let zero = FEVec::zeros(3);
        let mut k_stiff = k;
        k_stiff[(0, 0)] += 1.0;
        k_stiff[(2, 2)] += 1.0;
        let d = p.solve(&k_stiff, &zero, &zero).unwrap();
        assert_relative_eq!(d[0], 0.25, epsilon = 1e-12);
        assert_relative_eq!(d[2], 0.25, epsilon = 1e-12);
    }

    #[test]
    fn test_stability() {
        assert_eq!(check_stability(&Mat::zeros(0, 0)), Stability::Empty);
        assert_eq!(check_stability(&Mat::identity(3, 3)), Stability::Stable);
        let singular = Mat::from_row_slice(2, 2, &[1.0, 1.0, 1.0, 1.0]);
        assert_eq!(
            check_stability(&singular),
            Stability::Unstable { deficiency: 1 }
        );
    }
}
