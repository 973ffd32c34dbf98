//! Global matrix assembly

use crate::error::FEAResult;
use crate::math::{Mat, Vec as FEVec};
use crate::model::{FEModel, NodeKey};

/// Scatter an element matrix into the global matrix, node by node
fn scatter_matrix<const N: usize>(
    global: &mut Mat,
    element: &nalgebra::SMatrix<f64, N, N>,
    bases: &[usize],
) {
    for (a, &row) in bases.iter().enumerate() {
        for (b, &col) in bases.iter().enumerate() {
            for r in 0..6 {
                for c in 0..6 {
                    global[(row + r, col + c)] += element[(a * 6 + r, b * 6 + c)];
                }
            }
        }
    }
}

fn scatter_vector<const N: usize>(
    global: &mut FEVec,
    element: &nalgebra::SVector<f64, N>,
    bases: &[usize],
) {
    for (a, &row) in bases.iter().enumerate() {
        for r in 0..6 {
            global[row + r] += element[a * 6 + r];
        }
    }
}

impl FEModel {
    fn dof_bases(&self, nodes: &[NodeKey]) -> FEAResult<Vec<usize>> {
        nodes.iter().map(|&k| self.dof_base(k)).collect()
    }

    fn num_dofs(&self) -> usize {
        self.nodes.len() * 6
    }

    /// Global elastic stiffness matrix
    ///
    /// Nodes must be numbered first.
    pub fn k(&self) -> FEAResult<Mat> {
        let mut k = Mat::zeros(self.num_dofs(), self.num_dofs());

        for key in self.members.keys() {
            let view = self.member_view(key)?;
            let bases = self.dof_bases(&[view.member.i_node, view.member.j_node])?;
            scatter_matrix(&mut k, &view.global_stiffness()?, &bases);
        }

        for key in self.plates.keys() {
            let view = self.plate_view(key)?;
            let bases = self.dof_bases(&view.plate.nodes)?;
            scatter_matrix(&mut k, &view.global_stiffness()?, &bases);
        }

        Ok(k)
    }

    /// Global geometric stiffness matrix from the current member axial forces
    ///
    /// Fails with `NotAnalyzed` until nodal displacements exist. Plates add nothing.
    pub fn kg(&self) -> FEAResult<Mat> {
        let mut kg = Mat::zeros(self.num_dofs(), self.num_dofs());

        for key in self.members.keys() {
            let view = self.member_view(key)?;
            let p = view.axial_force_from_displacements()?;
            let bases = self.dof_bases(&[view.member.i_node, view.member.j_node])?;
            scatter_matrix(&mut kg, &view.global_geometric_stiffness(p)?, &bases);
        }

        Ok(kg)
    }

    /// Global fixed end reaction vector
    pub fn fer(&self) -> FEAResult<FEVec> {
        let mut fer = FEVec::zeros(self.num_dofs());

        for key in self.members.keys() {
            let view = self.member_view(key)?;
            let bases = self.dof_bases(&[view.member.i_node, view.member.j_node])?;
            scatter_vector(&mut fer, &view.global_fixed_end_reactions()?, &bases);
        }

        for key in self.plates.keys() {
            let view = self.plate_view(key)?;
            let bases = self.dof_bases(&view.plate.nodes)?;
            scatter_vector(&mut fer, &view.global_fixed_end_reactions(), &bases);
        }

        Ok(fer)
    }

    /// Global nodal load vector
    pub fn p(&self) -> FEAResult<FEVec> {
        let mut p = FEVec::zeros(self.num_dofs());
        for (key, _, node) in self.nodes.iter() {
            let base = self.dof_base(key)?;
            for (offset, value) in node.load_totals().into_iter().enumerate() {
                p[base + offset] += value;
            }
        }
        Ok(p)
    }
}

#[cfg(test)]
mod tests {
    use crate::analysis::AnalysisOptions;
    use crate::elements::{Node, Section, Support};
    use crate::error::FEAError;
    use crate::loads::{DistributedLoad, LoadDirection, NodeLoad};
    use crate::model::FEModel;
    use approx::assert_relative_eq;

    fn portal() -> FEModel {
        let s = Section::new(29_000.0, 11_400.0, 100.0, 150.0, 250.0, 20.0);
        let mut model = FEModel::new();
        model.add_node("A", Node::new(0.0, 0.0, 0.0)).unwrap();
        model.add_node("B", Node::new(0.0, 120.0, 0.0)).unwrap();
        model.add_node("C", Node::new(240.0, 120.0, 0.0)).unwrap();
        model.add_member("COL", "A", "B", s).unwrap();
        model.add_member("BM", "B", "C", s).unwrap();
        model.renumber();
        model
    }

    #[test]
    fn test_stiffness_is_symmetric_and_sized() {
        let model = portal();
        let k = model.k().unwrap();
        assert_eq!(k.shape(), (18, 18));
        assert_relative_eq!(k.clone(), k.transpose(), epsilon = 1e-6);
        // Node B collects axial stiffness of the beam and bending stiffness of the column in X
        let expected = 29_000.0 * 20.0 / 240.0 + 12.0 * 29_000.0 * 150.0 / 120.0_f64.powi(3);
        assert_relative_eq!(k[(6, 6)], expected, epsilon = 1e-6);
    }

    #[test]
    fn test_load_vectors() {
        let mut model = portal();
        model.add_node_load("C", NodeLoad::fy(-3.0)).unwrap();
        model.add_node_load("C", NodeLoad::fy(-2.0)).unwrap();
        model
            .add_member_dist_load("BM", DistributedLoad::uniform(LoadDirection::Fy, -0.5))
            .unwrap();
        model.renumber();

        let p = model.p().unwrap();
        assert_relative_eq!(p[13], -5.0);

        let fer = model.fer().unwrap();
        // Equal and opposite end shears of a uniform load, 0.5 * 240 / 2 each
        assert_relative_eq!(fer[7], 60.0, epsilon = 1e-9);
        assert_relative_eq!(fer[13], 60.0, epsilon = 1e-9);
    }

    #[test]
    fn test_geometric_stiffness_is_symmetric() {
        // Three members meeting at B, one along each global axis, so the
        // members bend about both of their local axes
        let s = Section::new(29_000.0, 11_400.0, 100.0, 150.0, 250.0, 20.0);
        let mut model = FEModel::new();
        model.add_node("A", Node::new(0.0, 0.0, 0.0)).unwrap();
        model.add_node("B", Node::new(0.0, 120.0, 0.0)).unwrap();
        model.add_node("C", Node::new(240.0, 120.0, 0.0)).unwrap();
        model.add_node("D", Node::new(0.0, 120.0, 180.0)).unwrap();
        model.add_member("COL", "A", "B", s).unwrap();
        model.add_member("BX", "B", "C", s).unwrap();
        model.add_member("BZ", "B", "D", s).unwrap();
        for name in ["A", "C", "D"] {
            model.define_support(name, Support::fixed()).unwrap();
        }
        model.add_node_load("B", NodeLoad::fx(5.0)).unwrap();
        model.add_node_load("B", NodeLoad::fy(-50.0)).unwrap();
        model.add_node_load("B", NodeLoad::fz(3.0)).unwrap();
        model.analyze_linear(&AnalysisOptions::default()).unwrap();

        let kg = model.kg().unwrap();
        assert_eq!(kg.shape(), (24, 24));
        assert!(kg.norm() > 0.0);
        assert_relative_eq!(kg.clone(), kg.transpose(), epsilon = 1e-9, max_relative = 1e-9);
    }

    #[test]
    fn test_geometric_stiffness_needs_displacements() {
        let model = portal();
        assert!(matches!(model.kg(), Err(FEAError::NotAnalyzed)));
    }
}
