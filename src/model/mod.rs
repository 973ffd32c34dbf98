//! FE Model - Main structural model container

mod arena;

pub use arena::{Arena, ArenaKey, AuxNodeKey, MemberKey, NodeKey, PlateKey};

use log::{debug, warn};

use crate::analysis::AnalysisType;
use crate::elements::{
    DofState, Member, MemberReleases, MemberSegments, MemberView, Node, Plate, PlateView,
    Section, Support,
};
use crate::error::{FEAError, FEAResult};
use crate::loads::{Dof, DistributedLoad, LoadDirection, NodeLoad, PointLoad};
use crate::math::{self, plate as plate_math, Vec as FEVec};
use crate::results::{AnalysisSummary, MemberForces, NodeDisplacement, Reactions};

/// Shortest member or plate edge accepted by the model
const MIN_LENGTH: f64 = 1e-10;

/// The main 3D finite element model
#[derive(Debug, Clone, Default)]
pub struct FEModel {
    pub(crate) nodes: Arena<NodeKey, Node>,
    pub(crate) aux_nodes: Arena<AuxNodeKey, Node>,
    pub(crate) members: Arena<MemberKey, Member>,
    pub(crate) plates: Arena<PlateKey, Plate>,

    /// Global displacement vector from the last analysis, indexed by node ID
    pub(crate) displacements: Option<FEVec>,

    /// Analysis solution status
    pub(crate) solution: Option<AnalysisType>,
}

impl FEModel {
    /// Create a new empty model
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop every stored result
    pub(crate) fn invalidate(&mut self) {
        if self.solution.is_none() && self.displacements.is_none() {
            return;
        }
        self.solution = None;
        self.displacements = None;
        for (_, node) in self.nodes.iter_mut() {
            node.displacements = None;
            node.reactions = [0.0; 6];
        }
        for (_, member) in self.members.iter_mut() {
            member.segments = None;
        }
    }

    // ========================
    // Model Building Methods
    // ========================

    /// Add a node to the model
    pub fn add_node(&mut self, name: &str, node: Node) -> FEAResult<NodeKey> {
        let key = self.nodes.insert(name, node)?;
        self.invalidate();
        Ok(key)
    }

    /// Add an auxiliary node, used only to orient members
    pub fn add_aux_node(&mut self, name: &str, x: f64, y: f64, z: f64) -> FEAResult<AuxNodeKey> {
        self.aux_nodes.insert(name, Node::new(x, y, z))
    }

    /// Add a member between two existing nodes using the default orientation
    pub fn add_member(
        &mut self,
        name: &str,
        i_node: &str,
        j_node: &str,
        section: Section,
    ) -> FEAResult<MemberKey> {
        self.insert_member(name, i_node, j_node, None, section)
    }

    /// Add a member whose local xz-plane passes through an auxiliary node
    pub fn add_member_with_aux(
        &mut self,
        name: &str,
        i_node: &str,
        j_node: &str,
        aux_node: &str,
        section: Section,
    ) -> FEAResult<MemberKey> {
        self.insert_member(name, i_node, j_node, Some(aux_node), section)
    }

    fn insert_member(
        &mut self,
        name: &str,
        i_node: &str,
        j_node: &str,
        aux_node: Option<&str>,
        section: Section,
    ) -> FEAResult<MemberKey> {
        let i = self.node_key(i_node)?;
        let j = self.node_key(j_node)?;
        let aux = aux_node.map(|n| self.aux_node_key(n)).transpose()?;

        if !section.is_valid() {
            return Err(FEAError::InvalidInput(format!(
                "member '{name}' needs positive, finite section properties"
            )));
        }

        let (pi, pj) = (self.node_at(i)?, self.node_at(j)?);
        if pi.distance_to(pj) < MIN_LENGTH {
            return Err(FEAError::InvalidGeometry(format!(
                "member '{name}' has zero length: i={i_node}, j={j_node}"
            )));
        }
        // Rejects an auxiliary node on the member axis
        let aux_coords = aux
            .map(|k| self.aux_node_at(k).map(Node::coords))
            .transpose()?;
        math::member_direction_cosines(&pi.coords(), &pj.coords(), aux_coords.as_ref())?;

        let key = self.members.insert(name, Member::new(i, j, aux, section))?;
        self.invalidate();
        Ok(key)
    }

    /// Add a rectangular plate with corners ordered i, j, m, n
    pub fn add_plate(
        &mut self,
        name: &str,
        corners: [&str; 4],
        thickness: f64,
        e: f64,
        nu: f64,
    ) -> FEAResult<PlateKey> {
        let keys = [
            self.node_key(corners[0])?,
            self.node_key(corners[1])?,
            self.node_key(corners[2])?,
            self.node_key(corners[3])?,
        ];

        if !(thickness > 0.0 && e > 0.0 && thickness.is_finite() && e.is_finite()) {
            return Err(FEAError::InvalidInput(format!(
                "plate '{name}' needs a positive thickness and modulus"
            )));
        }
        if !(nu > -1.0 && nu < 0.5) {
            return Err(FEAError::InvalidInput(format!(
                "plate '{name}' has Poisson's ratio {nu} outside (-1, 0.5)"
            )));
        }

        let [i, j, m, n] = [
            self.node_at(keys[0])?,
            self.node_at(keys[1])?,
            self.node_at(keys[2])?,
            self.node_at(keys[3])?,
        ];
        let width = i.distance_to(n);
        let height = i.distance_to(j);
        if width < MIN_LENGTH || height < MIN_LENGTH {
            return Err(FEAError::InvalidGeometry(format!(
                "plate '{name}' has zero width or height"
            )));
        }
        plate_math::plate_direction_cosines(&i.coords(), &j.coords(), &n.coords())?;

        // m should sit at j + (n - i)
        let off = Node::new(j.x + n.x - i.x, j.y + n.y - i.y, j.z + n.z - i.z).distance_to(m);
        let edge_dot =
            (n.x - i.x) * (j.x - i.x) + (n.y - i.y) * (j.y - i.y) + (n.z - i.z) * (j.z - i.z);
        let size = width.max(height);
        if off > 1e-6 * size || edge_dot.abs() > 1e-6 * width * height {
            warn!("plate '{name}' is not rectangular; results use its i-j and i-n edges only");
        }

        let key = self.plates.insert(name, Plate::new(keys, thickness, e, nu))?;
        self.invalidate();
        Ok(key)
    }

    /// Remove a node along with every member and plate attached to it
    pub fn remove_node(&mut self, name: &str) -> FEAResult<()> {
        let key = self.node_key(name)?;

        let members: Vec<MemberKey> = self
            .members
            .iter()
            .filter(|(_, _, m)| m.i_node == key || m.j_node == key)
            .map(|(k, _, _)| k)
            .collect();
        let plates: Vec<PlateKey> = self
            .plates
            .iter()
            .filter(|(_, _, p)| p.nodes.contains(&key))
            .map(|(k, _, _)| k)
            .collect();

        for k in members {
            if let Some((member, _)) = self.members.remove(k) {
                debug!("removed member '{member}' with node '{name}'");
            }
        }
        for k in plates {
            if let Some((plate, _)) = self.plates.remove(k) {
                debug!("removed plate '{plate}' with node '{name}'");
            }
        }
        self.nodes.remove(key);
        self.invalidate();
        Ok(())
    }

    /// Remove an auxiliary node along with the members it orients
    pub fn remove_aux_node(&mut self, name: &str) -> FEAResult<()> {
        let key = self.aux_node_key(name)?;
        let members: Vec<MemberKey> = self
            .members
            .iter()
            .filter(|(_, _, m)| m.aux_node == Some(key))
            .map(|(k, _, _)| k)
            .collect();
        for k in members {
            self.members.remove(k);
        }
        self.aux_nodes.remove(key);
        self.invalidate();
        Ok(())
    }

    /// Remove a member and its loads
    pub fn remove_member(&mut self, name: &str) -> FEAResult<()> {
        let key = self.member_key(name)?;
        self.members.remove(key);
        self.invalidate();
        Ok(())
    }

    pub fn remove_plate(&mut self, name: &str) -> FEAResult<()> {
        let key = self.plate_key(name)?;
        self.plates.remove(key);
        self.invalidate();
        Ok(())
    }

    /// Redefine the supports at a node
    ///
    /// Newly restrained DOFs are held at zero; a DOF that already carries a
    /// settlement keeps it. Unrestrained DOFs become free.
    pub fn define_support(&mut self, node_name: &str, support: Support) -> FEAResult<()> {
        let key = self.node_key(node_name)?;
        let node = self.node_at_mut(key)?;
        for (dof, restrained) in support.as_array().into_iter().enumerate() {
            node.supports[dof] = restrained;
            node.dofs[dof] = match (restrained, node.dofs[dof]) {
                (true, DofState::Known(v)) => DofState::Known(v),
                (true, DofState::Unresolved) => DofState::Known(0.0),
                (false, _) => DofState::Unresolved,
            };
        }
        self.invalidate();
        Ok(())
    }

    /// Prescribe a displacement (support settlement) at one DOF
    ///
    /// The DOF is marked restrained so its reaction is recovered.
    pub fn add_node_displacement(&mut self, node_name: &str, dof: Dof, value: f64) -> FEAResult<()> {
        if !value.is_finite() {
            return Err(FEAError::InvalidInput(format!(
                "settlement at node '{node_name}' must be finite"
            )));
        }
        let key = self.node_key(node_name)?;
        let node = self.node_at_mut(key)?;
        node.dofs[dof.index()] = DofState::Known(value);
        node.supports[dof.index()] = true;
        self.invalidate();
        Ok(())
    }

    /// Set the end releases of a member
    pub fn define_releases(&mut self, member_name: &str, releases: MemberReleases) -> FEAResult<()> {
        let key = self.member_key(member_name)?;
        let previous = std::mem::replace(&mut self.member_at_mut(key)?.releases, releases);

        // Releasing both ends of one DOF leaves nothing to condense against
        if let Err(e) = self.member_view(key)?.condensed_stiffness() {
            self.member_at_mut(key)?.releases = previous;
            return Err(e);
        }
        self.invalidate();
        Ok(())
    }

    /// Add a load to a node
    pub fn add_node_load(&mut self, node_name: &str, load: NodeLoad) -> FEAResult<()> {
        let key = self.node_key(node_name)?;
        self.node_at_mut(key)?.loads.push(load);
        self.invalidate();
        Ok(())
    }

    /// Add a point load or moment to a member
    pub fn add_member_point_load(&mut self, member_name: &str, load: PointLoad) -> FEAResult<()> {
        let key = self.member_key(member_name)?;
        let length = self.member_view(key)?.length();
        if !load.position.is_finite() || load.position < 0.0 || load.position > length {
            return Err(FEAError::InvalidInput(format!(
                "point load at {} lies outside member '{member_name}' (length {length})",
                load.position
            )));
        }
        self.member_at_mut(key)?.point_loads.push(load);
        self.invalidate();
        Ok(())
    }

    /// Add a linearly varying distributed load to a member
    pub fn add_member_dist_load(&mut self, member_name: &str, load: DistributedLoad) -> FEAResult<()> {
        let key = self.member_key(member_name)?;
        let length = self.member_view(key)?.length();

        if !matches!(
            load.direction,
            LoadDirection::Fx | LoadDirection::Fy | LoadDirection::Fz
        ) {
            return Err(FEAError::InvalidInput(format!(
                "distributed load on member '{member_name}' must be a force, not {:?}",
                load.direction
            )));
        }
        let x2 = load.end(length);
        if !(load.x1 >= 0.0 && x2 <= length && load.x1 < x2) {
            return Err(FEAError::InvalidInput(format!(
                "distributed load from {} to {x2} does not fit member '{member_name}' (length {length})",
                load.x1
            )));
        }
        self.member_at_mut(key)?.dist_loads.push(load);
        self.invalidate();
        Ok(())
    }

    /// Remove every node and member load; supports and settlements stay
    pub fn clear_loads(&mut self) {
        for (_, node) in self.nodes.iter_mut() {
            node.loads.clear();
        }
        for (_, member) in self.members.iter_mut() {
            member.point_loads.clear();
            member.dist_loads.clear();
            member.segments = None;
        }
        self.invalidate();
    }

    // ========================
    // Lookup Methods
    // ========================

    pub fn node_key(&self, name: &str) -> FEAResult<NodeKey> {
        self.nodes
            .key(name)
            .ok_or_else(|| FEAError::NodeNotFound(name.to_string()))
    }

    pub fn aux_node_key(&self, name: &str) -> FEAResult<AuxNodeKey> {
        self.aux_nodes
            .key(name)
            .ok_or_else(|| FEAError::AuxNodeNotFound(name.to_string()))
    }

    pub fn member_key(&self, name: &str) -> FEAResult<MemberKey> {
        self.members
            .key(name)
            .ok_or_else(|| FEAError::MemberNotFound(name.to_string()))
    }

    pub fn plate_key(&self, name: &str) -> FEAResult<PlateKey> {
        self.plates
            .key(name)
            .ok_or_else(|| FEAError::PlateNotFound(name.to_string()))
    }

    pub(crate) fn node_at(&self, key: NodeKey) -> FEAResult<&Node> {
        self.nodes
            .get(key)
            .ok_or_else(|| FEAError::NodeNotFound(format!("{key:?}")))
    }

    fn node_at_mut(&mut self, key: NodeKey) -> FEAResult<&mut Node> {
        self.nodes
            .get_mut(key)
            .ok_or_else(|| FEAError::NodeNotFound(format!("{key:?}")))
    }

    fn aux_node_at(&self, key: AuxNodeKey) -> FEAResult<&Node> {
        self.aux_nodes
            .get(key)
            .ok_or_else(|| FEAError::AuxNodeNotFound(format!("{key:?}")))
    }

    fn member_at_mut(&mut self, key: MemberKey) -> FEAResult<&mut Member> {
        self.members
            .get_mut(key)
            .ok_or_else(|| FEAError::MemberNotFound(format!("{key:?}")))
    }

    /// A node by name
    pub fn node(&self, name: &str) -> FEAResult<&Node> {
        self.node_at(self.node_key(name)?)
    }

    /// A member and its nodes by name
    pub fn member(&self, name: &str) -> FEAResult<MemberView<'_>> {
        self.member_view(self.member_key(name)?)
    }

    /// A plate and its nodes by name
    pub fn plate(&self, name: &str) -> FEAResult<PlateView<'_>> {
        self.plate_view(self.plate_key(name)?)
    }

    pub fn member_view(&self, key: MemberKey) -> FEAResult<MemberView<'_>> {
        let member = self
            .members
            .get(key)
            .ok_or_else(|| FEAError::MemberNotFound(format!("{key:?}")))?;
        let aux = member.aux_node.map(|k| self.aux_node_at(k)).transpose()?;
        Ok(MemberView {
            member,
            i: self.node_at(member.i_node)?,
            j: self.node_at(member.j_node)?,
            aux,
            geometric: self.solution == Some(AnalysisType::PDelta),
        })
    }

    pub fn plate_view(&self, key: PlateKey) -> FEAResult<PlateView<'_>> {
        let plate = self
            .plates
            .get(key)
            .ok_or_else(|| FEAError::PlateNotFound(format!("{key:?}")))?;
        let [i, j, m, n] = plate.nodes;
        Ok(PlateView {
            plate,
            nodes: [
                self.node_at(i)?,
                self.node_at(j)?,
                self.node_at(m)?,
                self.node_at(n)?,
            ],
        })
    }

    /// Internal force functions of a member after analysis
    pub fn member_segments(&self, name: &str) -> FEAResult<&MemberSegments> {
        let key = self.member_key(name)?;
        self.members
            .get(key)
            .ok_or_else(|| FEAError::MemberNotFound(name.to_string()))?
            .segments()
    }

    /// Node names in insertion order
    pub fn node_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.nodes.iter().map(|(_, name, _)| name)
    }

    pub fn member_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.members.iter().map(|(_, name, _)| name)
    }

    pub fn plate_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.plates.iter().map(|(_, name, _)| name)
    }

    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    pub fn num_members(&self) -> usize {
        self.members.len()
    }

    pub fn num_plates(&self) -> usize {
        self.plates.len()
    }

    /// Assign dense node IDs in insertion order; returns the node count
    pub(crate) fn renumber(&mut self) -> usize {
        let mut count = 0;
        for (_, node) in self.nodes.iter_mut() {
            node.id = Some(count);
            count += 1;
        }
        count
    }

    /// Global DOF index of a node's first DOF
    pub(crate) fn dof_base(&self, key: NodeKey) -> FEAResult<usize> {
        self.node_at(key)?
            .id
            .map(|id| id * 6)
            .ok_or_else(|| FEAError::MathError(format!("node {key:?} has not been numbered")))
    }

    // ========================
    // Result Access Methods
    // ========================

    /// Global displacement vector from the last analysis
    pub fn displacements(&self) -> FEAResult<&FEVec> {
        self.displacements.as_ref().ok_or(FEAError::NotAnalyzed)
    }

    /// Get node displacement
    pub fn node_displacement(&self, node_name: &str) -> FEAResult<NodeDisplacement> {
        let disp = self.node(node_name)?.displacement().ok_or(FEAError::NotAnalyzed)?;
        Ok(NodeDisplacement::from_array(disp))
    }

    /// Get node reactions
    pub fn node_reactions(&self, node_name: &str) -> FEAResult<Reactions> {
        let node = self.node(node_name)?;
        if self.solution.is_none() {
            return Err(FEAError::NotAnalyzed);
        }
        Ok(Reactions::from_array(node.reaction()))
    }

    /// Get member forces at i-node
    pub fn member_forces_i(&self, member_name: &str) -> FEAResult<MemberForces> {
        let forces = self.member(member_name)?.local_forces()?;
        Ok(MemberForces::from_i_node_forces(&forces))
    }

    /// Get member forces at j-node
    pub fn member_forces_j(&self, member_name: &str) -> FEAResult<MemberForces> {
        let forces = self.member(member_name)?.local_forces()?;
        Ok(MemberForces::from_j_node_forces(&forces))
    }

    /// Get analysis summary
    pub fn summary(&self) -> FEAResult<AnalysisSummary> {
        if self.solution.is_none() {
            return Err(FEAError::NotAnalyzed);
        }

        let restrained: usize = self
            .nodes
            .iter()
            .map(|(_, _, n)| n.dofs.iter().filter(|d| d.known().is_some()).count())
            .sum();
        let mut summary = AnalysisSummary {
            num_nodes: self.nodes.len(),
            num_members: self.members.len(),
            num_plates: self.plates.len(),
            total_dofs: self.nodes.len() * 6,
            free_dofs: self.nodes.len() * 6 - restrained,
            ..Default::default()
        };

        for (_, name, node) in self.nodes.iter() {
            if let Some(disp) = node.displacement() {
                let mag = NodeDisplacement::from_array(disp).translation_magnitude();
                if mag > summary.max_displacement {
                    summary.max_displacement = mag;
                    summary.max_disp_node = name.to_string();
                }
            }
            let mag = Reactions::from_array(node.reaction()).force_magnitude();
            if mag > summary.max_reaction {
                summary.max_reaction = mag;
                summary.max_reaction_node = name.to_string();
            }
        }

        for (key, name, _) in self.members.iter() {
            let forces = self.member_view(key)?.local_forces()?;
            let axial = forces[0].abs().max(forces[6].abs());
            if axial > summary.max_axial {
                summary.max_axial = axial;
                summary.max_axial_member = name.to_string();
            }
            let moment = [forces[4], forces[5], forces[10], forces[11]]
                .iter()
                .fold(0.0_f64, |acc, m| acc.max(m.abs()));
            if moment > summary.max_moment {
                summary.max_moment = moment;
                summary.max_moment_member = name.to_string();
            }
        }

        Ok(summary)
    }

    /// Check if model has been analyzed
    pub fn is_analyzed(&self) -> bool {
        self.solution.is_some()
    }

    /// Type of the last analysis
    pub fn solution_type(&self) -> Option<AnalysisType> {
        self.solution
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn section() -> Section {
        Section::new(29_000.0, 11_400.0, 100.0, 150.0, 250.0, 20.0)
    }

    fn two_node_model() -> FEModel {
        let mut model = FEModel::new();
        model.add_node("N1", Node::new(0.0, 0.0, 0.0)).unwrap();
        model.add_node("N2", Node::new(10.0, 0.0, 0.0)).unwrap();
        model.add_member("M1", "N1", "N2", section()).unwrap();
        model
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let mut model = two_node_model();
        assert!(matches!(
            model.add_node("N1", Node::new(1.0, 1.0, 1.0)),
            Err(FEAError::DuplicateName(_))
        ));
        assert!(matches!(
            model.add_member("M1", "N1", "N2", section()),
            Err(FEAError::DuplicateName(_))
        ));
    }

    #[test]
    fn test_unknown_names_fail_fast() {
        let mut model = two_node_model();
        assert!(matches!(
            model.add_member("M2", "N1", "N9", section()),
            Err(FEAError::NodeNotFound(_))
        ));
        assert!(matches!(
            model.add_node_load("N9", NodeLoad::fy(1.0)),
            Err(FEAError::NodeNotFound(_))
        ));
        assert!(matches!(model.member("M9"), Err(FEAError::MemberNotFound(_))));
        assert!(matches!(
            model.add_member_with_aux("M2", "N1", "N2", "A1", section()),
            Err(FEAError::AuxNodeNotFound(_))
        ));
    }

    #[test]
    fn test_zero_length_member_rejected() {
        let mut model = two_node_model();
        model.add_node("N3", Node::new(0.0, 0.0, 0.0)).unwrap();
        assert!(matches!(
            model.add_member("M2", "N1", "N3", section()),
            Err(FEAError::InvalidGeometry(_))
        ));
    }

    #[test]
    fn test_load_positions_validated() {
        let mut model = two_node_model();
        assert!(model
            .add_member_point_load("M1", PointLoad::new(LoadDirection::Fy, -1.0, 10.0))
            .is_ok());
        assert!(matches!(
            model.add_member_point_load("M1", PointLoad::new(LoadDirection::Fy, -1.0, 10.5)),
            Err(FEAError::InvalidInput(_))
        ));
        assert!(matches!(
            model.add_member_dist_load(
                "M1",
                DistributedLoad::uniform(LoadDirection::Fy, -1.0).between(2.0, 12.0)
            ),
            Err(FEAError::InvalidInput(_))
        ));
        assert!(matches!(
            model.add_member_dist_load("M1", DistributedLoad::uniform(LoadDirection::Mz, 1.0)),
            Err(FEAError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_remove_node_cascades() {
        let mut model = two_node_model();
        model.add_node("N3", Node::new(10.0, 5.0, 0.0)).unwrap();
        model.add_node("N4", Node::new(0.0, 5.0, 0.0)).unwrap();
        model.add_member("M2", "N2", "N3", section()).unwrap();
        model
            .add_plate("P1", ["N1", "N4", "N3", "N2"], 0.5, 29_000.0, 0.3)
            .unwrap();

        model.remove_node("N1").unwrap();

        assert!(model.member("M1").is_err());
        assert!(model.member("M2").is_ok());
        assert!(matches!(model.plate("P1"), Err(FEAError::PlateNotFound(_))));
        assert_eq!(model.node_names().collect::<Vec<_>>(), vec!["N2", "N3", "N4"]);
    }

    #[test]
    fn test_define_support_keeps_settlement() {
        let mut model = two_node_model();
        model.add_node_displacement("N1", Dof::DY, -0.5).unwrap();
        model.define_support("N1", Support::pinned()).unwrap();

        let node = model.node("N1").unwrap();
        assert_eq!(node.dof_state(Dof::DY), DofState::Known(-0.5));
        assert_eq!(node.dof_state(Dof::DX), DofState::Known(0.0));
        assert_eq!(node.dof_state(Dof::RZ), DofState::Unresolved);

        model.define_support("N1", Support::new()).unwrap();
        assert!(!model.node("N1").unwrap().is_supported());
    }

    #[test]
    fn test_renumber_follows_insertion_order() {
        let mut model = two_node_model();
        model.add_node("N3", Node::new(20.0, 0.0, 0.0)).unwrap();
        model.remove_node("N1").unwrap();
        assert_eq!(model.renumber(), 2);
        assert_eq!(model.node("N2").unwrap().id(), Some(0));
        assert_eq!(model.node("N3").unwrap().id(), Some(1));
    }

    #[test]
    fn test_clear_loads() {
        let mut model = two_node_model();
        model.add_node_load("N2", NodeLoad::fy(-1.0)).unwrap();
        model
            .add_member_dist_load("M1", DistributedLoad::uniform(LoadDirection::Fy, -1.0))
            .unwrap();
        model.clear_loads();
        assert!(model.node("N2").unwrap().loads().is_empty());
        assert!(model.member("M1").unwrap().member.dist_loads().is_empty());
    }
}
