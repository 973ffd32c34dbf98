//! Frame Solver - 3D frame and plate analysis by the direct stiffness method
//!
//! This library provides a 3D structural analysis framework supporting:
//! - Frame elements (beams, columns) with end releases
//! - Rectangular plate elements (bending + membrane)
//! - Linear static analysis
//! - P-Delta (second order) analysis
//! - Member shear, moment and deflection diagrams
//!
//! ## Example
//! ```rust
//! use frame_solver::prelude::*;
//!
//! let mut model = FEModel::new();
//!
//! model.add_node("N1", Node::new(0.0, 0.0, 0.0)).unwrap();
//! model.add_node("N2", Node::new(168.0, 0.0, 0.0)).unwrap();
//!
//! let section = Section::new(29_000.0, 11_400.0, 100.0, 150.0, 250.0, 20.0);
//! model.add_member("M1", "N1", "N2", section).unwrap();
//!
//! model.define_support("N1", Support::fixed()).unwrap();
//! model.add_node_load("N2", NodeLoad::fy(-5.0)).unwrap();
//!
//! let report = model.analyze_linear(&AnalysisOptions::default()).unwrap();
//! assert_eq!(report.status, AnalysisStatus::Solved);
//!
//! let tip = model.node_displacement("N2").unwrap();
//! assert!(tip.dy < 0.0);
//! ```

pub mod analysis;
pub mod elements;
pub mod error;
pub mod loads;
pub mod math;
pub mod model;
pub mod results;

// Re-export common types
pub mod prelude {
    pub use crate::analysis::{
        AnalysisOptions, AnalysisReport, AnalysisStatus, AnalysisType, StaticsCheck,
    };
    pub use crate::elements::{
        DeflectionDirection, DofState, Member, MemberReleases, MomentDirection, Node, Plate,
        Section, ShearDirection, Support,
    };
    pub use crate::error::{FEAError, FEAResult};
    pub use crate::loads::{Dof, DistributedLoad, GlobalDirection, LoadDirection, NodeLoad, PointLoad};
    pub use crate::model::FEModel;
    pub use crate::results::{AnalysisSummary, MemberForces, NodeDisplacement, Reactions};
}
