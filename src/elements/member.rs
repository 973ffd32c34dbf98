//! Member element - 3D frame element (beam/column)

use serde::{Deserialize, Serialize};

use super::node::Node;
use super::section::Section;
use super::segment::MemberSegments;
use crate::error::{FEAError, FEAResult};
use crate::loads::{DistributedLoad, PointLoad};
use crate::math::{self, Mat12, Vec12};
use crate::model::{AuxNodeKey, NodeKey};

/// End releases for a member (allowing specific DOFs to rotate/translate freely)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberReleases {
    /// i-node releases [DX, DY, DZ, RX, RY, RZ]
    pub i_node: [bool; 6],
    /// j-node releases [DX, DY, DZ, RX, RY, RZ]
    pub j_node: [bool; 6],
}

impl MemberReleases {
    /// Create releases with no end releases
    pub fn none() -> Self {
        Self::default()
    }

    /// Create releases for a pin at the i-node (moment releases)
    pub fn pin_i() -> Self {
        Self {
            i_node: [false, false, false, false, true, true],
            j_node: [false; 6],
        }
    }

    /// Create releases for a pin at the j-node (moment releases)
    pub fn pin_j() -> Self {
        Self {
            i_node: [false; 6],
            j_node: [false, false, false, false, true, true],
        }
    }

    /// Create releases for pins at both ends
    pub fn pin_both() -> Self {
        Self {
            i_node: [false, false, false, false, true, true],
            j_node: [false, false, false, false, true, true],
        }
    }

    /// Build releases from a 12-entry local DOF array
    pub fn from_array(arr: [bool; 12]) -> Self {
        let mut releases = Self::default();
        releases.i_node.copy_from_slice(&arr[0..6]);
        releases.j_node.copy_from_slice(&arr[6..12]);
        releases
    }

    /// Get combined releases as 12-element array
    pub fn as_array(&self) -> [bool; 12] {
        let mut arr = [false; 12];
        arr[0..6].copy_from_slice(&self.i_node);
        arr[6..12].copy_from_slice(&self.j_node);
        arr
    }

    /// Whether any DOF is released
    pub fn any(&self) -> bool {
        self.as_array().iter().any(|&r| r)
    }
}

/// A 3D frame member (beam or column)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Member {
    pub(crate) i_node: NodeKey,
    pub(crate) j_node: NodeKey,
    pub(crate) aux_node: Option<AuxNodeKey>,
    /// Section and material properties
    pub section: Section,
    /// End releases
    pub releases: MemberReleases,
    pub(crate) point_loads: Vec<PointLoad>,
    pub(crate) dist_loads: Vec<DistributedLoad>,

    /// Internal force functions from the last analysis
    #[serde(skip)]
    pub(crate) segments: Option<MemberSegments>,
}

impl Member {
    pub(crate) fn new(
        i_node: NodeKey,
        j_node: NodeKey,
        aux_node: Option<AuxNodeKey>,
        section: Section,
    ) -> Self {
        Self {
            i_node,
            j_node,
            aux_node,
            section,
            releases: MemberReleases::none(),
            point_loads: Vec::new(),
            dist_loads: Vec::new(),
            segments: None,
        }
    }

    pub fn i_node(&self) -> NodeKey {
        self.i_node
    }

    pub fn j_node(&self) -> NodeKey {
        self.j_node
    }

    pub fn aux_node(&self) -> Option<AuxNodeKey> {
        self.aux_node
    }

    pub fn point_loads(&self) -> &[PointLoad] {
        &self.point_loads
    }

    pub fn dist_loads(&self) -> &[DistributedLoad] {
        &self.dist_loads
    }

    /// Internal force functions, available after an analysis
    pub fn segments(&self) -> FEAResult<&MemberSegments> {
        self.segments.as_ref().ok_or(FEAError::NotAnalyzed)
    }
}

/// A member together with the nodes it frames into
///
/// All element matrices are computed on demand from the current node
/// coordinates and displacements.
#[derive(Debug, Clone, Copy)]
pub struct MemberView<'a> {
    pub member: &'a Member,
    pub i: &'a Node,
    pub j: &'a Node,
    pub aux: Option<&'a Node>,
    /// Include geometric stiffness in the end forces (after a P-Delta solution)
    pub(crate) geometric: bool,
}

impl<'a> MemberView<'a> {
    pub fn length(&self) -> f64 {
        self.i.distance_to(self.j)
    }

    fn releases(&self) -> [bool; 12] {
        self.member.releases.as_array()
    }

    /// Unreleased 12x12 local stiffness
    pub fn local_stiffness(&self) -> Mat12 {
        let s = &self.member.section;
        math::member_local_stiffness(s.e, s.g, s.a, s.iy, s.iz, s.j, self.length())
    }

    /// Local stiffness with end releases condensed out
    pub fn condensed_stiffness(&self) -> FEAResult<Mat12> {
        math::apply_releases(&self.local_stiffness(), &self.releases())
    }

    /// Local geometric stiffness for axial force `p` (tension positive)
    pub fn geometric_stiffness(&self, p: f64) -> Mat12 {
        let s = &self.member.section;
        let kg = math::member_geometric_stiffness(p, s.a, s.iy, s.iz, self.length());
        math::zero_released(&kg, &self.releases())
    }

    /// Global-to-local transformation matrix
    pub fn transformation(&self) -> FEAResult<Mat12> {
        let aux = self.aux.map(Node::coords);
        math::member_transformation_matrix(&self.i.coords(), &self.j.coords(), aux.as_ref())
    }

    /// Condensed stiffness in global coordinates
    pub fn global_stiffness(&self) -> FEAResult<Mat12> {
        let t = self.transformation()?;
        Ok(t.transpose() * self.condensed_stiffness()? * t)
    }

    /// Geometric stiffness in global coordinates
    pub fn global_geometric_stiffness(&self, p: f64) -> FEAResult<Mat12> {
        let t = self.transformation()?;
        Ok(t.transpose() * self.geometric_stiffness(p) * t)
    }

    /// Fixed end reactions of all member loads before condensation
    fn raw_fixed_end_reactions(&self) -> Vec12 {
        let l = self.length();
        let points = self
            .member
            .point_loads
            .iter()
            .map(|p| math::fer_point_load(p.magnitude, p.position, l, p.direction));
        let distributed = self
            .member
            .dist_loads
            .iter()
            .map(|d| math::fer_linear_load(d.w1, d.w2, d.x1, d.end(l), l, d.direction));
        points.chain(distributed).fold(Vec12::zeros(), |acc, f| acc + f)
    }

    /// Local fixed end reactions, condensed for end releases
    pub fn fixed_end_reactions(&self) -> FEAResult<Vec12> {
        math::apply_fer_releases(
            &self.raw_fixed_end_reactions(),
            &self.local_stiffness(),
            &self.releases(),
        )
    }

    pub fn global_fixed_end_reactions(&self) -> FEAResult<Vec12> {
        Ok(self.transformation()?.transpose() * self.fixed_end_reactions()?)
    }

    /// Global displacements of both end nodes
    pub fn global_displacements(&self) -> FEAResult<Vec12> {
        let di = self.i.displacement().ok_or(FEAError::NotAnalyzed)?;
        let dj = self.j.displacement().ok_or(FEAError::NotAnalyzed)?;
        Ok(Vec12::from_iterator(di.into_iter().chain(dj)))
    }

    /// Local end displacements
    ///
    /// Released DOFs hold the member-end value recovered from condensation,
    /// not the node's.
    pub fn local_displacements(&self) -> FEAResult<Vec12> {
        let d = self.transformation()? * self.global_displacements()?;
        math::recover_released_displacements(
            &d,
            &self.local_stiffness(),
            &self.raw_fixed_end_reactions(),
            &self.releases(),
        )
    }

    /// Axial force implied by the current displacements, tension positive
    pub fn axial_force_from_displacements(&self) -> FEAResult<f64> {
        let releases = self.releases();
        if releases[0] || releases[6] {
            return Ok(0.0);
        }
        let d = self.transformation()? * self.global_displacements()?;
        let s = &self.member.section;
        Ok(s.e * s.a / self.length() * (d[6] - d[0]))
    }

    /// Local end forces acting on the member
    pub fn local_forces(&self) -> FEAResult<Vec12> {
        let d = self.local_displacements()?;
        let mut k = self.condensed_stiffness()?;
        if self.geometric {
            k += self.geometric_stiffness(self.axial_force_from_displacements()?);
        }
        Ok(k * d + self.fixed_end_reactions()?)
    }

    pub fn global_forces(&self) -> FEAResult<Vec12> {
        Ok(self.transformation()?.transpose() * self.local_forces()?)
    }

    /// Cut the member into internal force segments
    pub fn build_segments(&self) -> FEAResult<MemberSegments> {
        Ok(MemberSegments::build(
            self.length(),
            &self.member.section,
            &self.local_forces()?,
            &self.local_displacements()?,
            &self.member.point_loads,
            &self.member.dist_loads,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loads::LoadDirection;
    use crate::model::ArenaKey;
    use approx::assert_relative_eq;

    fn beam(l: f64) -> (Member, Node, Node) {
        let member = Member::new(
            NodeKey::from_slot(0),
            NodeKey::from_slot(1),
            None,
            Section::new(29_000.0, 11_400.0, 100.0, 150.0, 250.0, 20.0),
        );
        (member, Node::new(0.0, 0.0, 0.0), Node::new(l, 0.0, 0.0))
    }

    fn view<'a>(member: &'a Member, i: &'a Node, j: &'a Node) -> MemberView<'a> {
        MemberView {
            member,
            i,
            j,
            aux: None,
            geometric: false,
        }
    }

    #[test]
    fn test_releases() {
        let releases = MemberReleases::pin_i();
        let arr = releases.as_array();
        assert!(!arr[0]); // DX not released
        assert!(arr[4]); // RY released
        assert!(arr[5]); // RZ released
        assert_eq!(MemberReleases::from_array(arr), releases);
    }

    #[test]
    fn test_global_stiffness_of_aligned_member_is_local() {
        let (member, i, j) = beam(120.0);
        let v = view(&member, &i, &j);
        assert_relative_eq!(v.global_stiffness().unwrap(), v.local_stiffness(), epsilon = 1e-9);
    }

    #[test]
    fn test_fixed_end_reactions_sum_loads() {
        let (mut member, i, j) = beam(10.0);
        member.point_loads.push(PointLoad::new(LoadDirection::Fy, -4.0, 5.0));
        member
            .dist_loads
            .push(DistributedLoad::uniform(LoadDirection::Fy, -1.0));
        let fer = view(&member, &i, &j).fixed_end_reactions().unwrap();
        assert_relative_eq!(fer[1], 2.0 + 5.0, epsilon = 1e-12);
        assert_relative_eq!(fer[5], 4.0 * 10.0 / 8.0 + 100.0 / 12.0, epsilon = 1e-12);
    }

    #[test]
    fn test_displacements_required_for_forces() {
        let (member, i, j) = beam(10.0);
        assert!(matches!(
            view(&member, &i, &j).local_forces(),
            Err(FEAError::NotAnalyzed)
        ));
    }

    #[test]
    fn test_axial_force_from_stretch() {
        let (member, mut i, mut j) = beam(100.0);
        i.displacements = Some([0.0; 6]);
        j.displacements = Some([0.01, 0.0, 0.0, 0.0, 0.0, 0.0]);
        let v = view(&member, &i, &j);
        assert_relative_eq!(
            v.axial_force_from_displacements().unwrap(),
            29_000.0 * 20.0 / 100.0 * 0.01
        );
        let f = v.local_forces().unwrap();
        assert_relative_eq!(f[6], 58.0, epsilon = 1e-9);
        assert_relative_eq!(f[0], -58.0, epsilon = 1e-9);
    }
}
