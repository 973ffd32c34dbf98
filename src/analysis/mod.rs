//! Analysis types, options and outcomes

mod assembly;
mod partition;
mod reactions;
mod solver;

pub use partition::{check_stability, DofPartition, Stability};
pub use reactions::StaticsCheck;

use serde::{Deserialize, Serialize};

use crate::error::{FEAError, FEAResult};

/// Type of structural analysis to perform
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnalysisType {
    /// First-order linear static analysis
    #[default]
    Linear,
    /// Second-order P-Delta analysis
    PDelta,
}

/// Options for structural analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisOptions {
    /// Maximum P-Delta iterations before the run is declared diverged
    pub max_iterations: usize,
    /// P-Delta convergence tolerance on the displacement ratio
    pub tolerance: f64,
    /// Sum applied loads and reactions after the solve
    pub check_statics: bool,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            max_iterations: 30,
            tolerance: 0.01,
            check_statics: false,
        }
    }
}

impl AnalysisOptions {
    /// Set maximum iterations
    pub fn with_max_iter(mut self, max_iter: usize) -> Self {
        self.max_iterations = max_iter;
        self
    }

    /// Set convergence tolerance
    pub fn with_tolerance(mut self, tol: f64) -> Self {
        self.tolerance = tol;
        self
    }

    /// Run the statics check after the solve
    pub fn with_statics_check(mut self) -> Self {
        self.check_statics = true;
        self
    }
}

/// How an analysis run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnalysisStatus {
    /// Linear solve completed
    Solved,
    /// P-Delta iteration converged
    Converged { iterations: usize },
    /// P-Delta iteration hit the iteration limit; last iteration's results are kept
    Diverged { iterations: usize },
    /// The reduced stiffness matrix was singular at this iteration; no results are stored
    Unstable { iteration: usize },
}

impl AnalysisStatus {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Solved | Self::Converged { .. })
    }
}

/// Outcome of an analysis run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub status: AnalysisStatus,
    /// Present when `check_statics` was requested and results were produced
    pub statics: Option<StaticsCheck>,
}

impl AnalysisReport {
    /// Turn failure outcomes into errors
    pub fn into_result(self) -> FEAResult<Self> {
        match self.status {
            AnalysisStatus::Solved | AnalysisStatus::Converged { .. } => Ok(self),
            AnalysisStatus::Diverged { iterations } => Err(FEAError::ConvergenceFailed(iterations)),
            AnalysisStatus::Unstable { iteration } => Err(FEAError::Unstable(format!(
                "singular stiffness matrix at iteration {iteration}"
            ))),
        }
    }
}
