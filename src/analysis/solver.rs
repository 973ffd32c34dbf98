//! Linear and P-Delta analysis drivers

use log::{debug, info, warn};

use super::partition::{check_stability, DofPartition, Stability};
use super::{AnalysisOptions, AnalysisReport, AnalysisStatus, AnalysisType};
use crate::error::{FEAError, FEAResult};
use crate::math::{Mat, Vec as FEVec};
use crate::model::FEModel;

/// Denominators smaller than this are skipped in the convergence ratio
const RATIO_FLOOR: f64 = 1e-12;

/// `|1 - max(prev / current)|` over the entries with a usable ratio
///
/// Returns `None` when no entry gives a finite ratio.
fn convergence_error(prev: &FEVec, current: &FEVec) -> Option<f64> {
    prev.iter()
        .zip(current.iter())
        .filter(|(_, c)| c.abs() >= RATIO_FLOOR)
        .map(|(p, c)| p / c)
        .filter(|r| r.is_finite())
        .fold(None, |acc: Option<f64>, r| Some(acc.map_or(r, |m| m.max(r))))
        .map(|max| (1.0 - max).abs())
}

impl FEModel {
    /// Run a first-order linear static analysis
    pub fn analyze_linear(&mut self, options: &AnalysisOptions) -> FEAResult<AnalysisReport> {
        info!("running linear analysis");
        let partition = self.prepare_analysis()?;

        let k = self.k()?;
        let fer = self.fer()?;
        let p = self.p()?;

        let Some(d) = self.solve_step(&partition, &k, &fer, &p, 1) else {
            return Ok(AnalysisReport {
                status: AnalysisStatus::Unstable { iteration: 1 },
                statics: None,
            });
        };
        self.store_displacements(d)?;
        self.solution = Some(AnalysisType::Linear);

        self.finish(AnalysisStatus::Solved, options)
    }

    /// Run a second-order analysis, iterating on member axial forces
    ///
    /// The first iteration uses the elastic stiffness only; later iterations
    /// add the geometric stiffness from the previous displacements.
    /// Recovered end forces use the axial force of the final displacements,
    /// so reactions balance the loads only to within `options.tolerance`.
    pub fn analyze_p_delta(&mut self, options: &AnalysisOptions) -> FEAResult<AnalysisReport> {
        info!(
            "running P-Delta analysis (max {} iterations, tolerance {})",
            options.max_iterations, options.tolerance
        );
        let partition = self.prepare_analysis()?;

        let k = self.k()?;
        let fer = self.fer()?;
        let p = self.p()?;

        let mut prev_d1: Option<FEVec> = None;
        let mut iteration = 1;

        let status = loop {
            debug!("P-Delta iteration {iteration}");
            let k_total = if iteration == 1 { k.clone() } else { &k + self.kg()? };

            let Some(d) = self.solve_step(&partition, &k_total, &fer, &p, iteration) else {
                self.invalidate();
                return Ok(AnalysisReport {
                    status: AnalysisStatus::Unstable { iteration },
                    statics: None,
                });
            };
            let (d1, _) = partition.split_vector(&d);
            self.store_displacements(d)?;

            if let Some(prev) = &prev_d1 {
                let error = convergence_error(prev, &d1);
                debug!("P-Delta iteration {iteration}: convergence error {error:?}");
                if error.map_or(true, |e| e <= options.tolerance) {
                    info!("P-Delta analysis converged after {iteration} iterations");
                    break AnalysisStatus::Converged {
                        iterations: iteration,
                    };
                }
                if iteration > options.max_iterations {
                    warn!("P-Delta analysis failed to converge after {iteration} iterations");
                    break AnalysisStatus::Diverged {
                        iterations: iteration,
                    };
                }
            }

            prev_d1 = Some(d1);
            iteration += 1;
        };

        self.solution = Some(AnalysisType::PDelta);
        self.finish(status, options)
    }

    /// Number nodes, drop stale results and partition the DOFs
    fn prepare_analysis(&mut self) -> FEAResult<DofPartition> {
        let n = self.renumber();
        if n == 0 {
            return Err(FEAError::InvalidInput("model has no nodes".to_string()));
        }
        self.invalidate();
        let partition = self.partition()?;
        debug!(
            "{} nodes, {} unknown and {} known DOFs",
            n,
            partition.d1.len(),
            partition.d2.len()
        );
        Ok(partition)
    }

    /// Check stability and solve one system; `None` when unstable
    fn solve_step(
        &self,
        partition: &DofPartition,
        k: &Mat,
        fer: &FEVec,
        p: &FEVec,
        iteration: usize,
    ) -> Option<FEVec> {
        let (k11, _, _, _) = partition.split_matrix(k);
        match check_stability(&k11) {
            Stability::Unstable { deficiency } => {
                warn!(
                    "stiffness matrix is singular (rank deficient by {deficiency}) at iteration {iteration}; the structure is unstable"
                );
                return None;
            }
            Stability::Empty => debug!("all displacements are prescribed"),
            Stability::Stable => {}
        }
        let d = partition.solve(k, fer, p);
        if d.is_none() {
            warn!("linear solve failed at iteration {iteration}; the structure is unstable");
        }
        d
    }

    /// Write the global displacement vector to the nodes
    fn store_displacements(&mut self, d: FEVec) -> FEAResult<()> {
        let bases: Vec<_> = self
            .nodes
            .keys()
            .map(|key| self.dof_base(key).map(|base| (key, base)))
            .collect::<FEAResult<_>>()?;
        for (key, base) in bases {
            if let Some(node) = self.nodes.get_mut(key) {
                let mut disp = [0.0; 6];
                disp.copy_from_slice(&d.as_slice()[base..base + 6]);
                node.displacements = Some(disp);
            }
        }
        self.displacements = Some(d);
        Ok(())
    }

    /// Segment members, recover reactions and run the optional statics check
    fn finish(&mut self, status: AnalysisStatus, options: &AnalysisOptions) -> FEAResult<AnalysisReport> {
        info!("calculating member internal forces");
        let segments = self
            .members
            .keys()
            .map(|key| Ok((key, self.member_view(key)?.build_segments()?)))
            .collect::<FEAResult<Vec<_>>>()?;
        for (key, seg) in segments {
            if let Some(member) = self.members.get_mut(key) {
                member.segments = Some(seg);
            }
        }

        info!("calculating reactions");
        self.calculate_reactions()?;

        let statics = if options.check_statics {
            let check = self.check_statics()?;
            info!(
                "statics: applied {:?}, reactions {:?}",
                check.applied, check.reactions
            );
            Some(check)
        } else {
            None
        };

        Ok(AnalysisReport { status, statics })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_convergence_error_skips_invalid_ratios() {
        let prev = FEVec::from_vec(vec![0.0, 1.0, 2.0, 5.0]);
        let current = FEVec::from_vec(vec![0.0, 1.0, 2.1, 0.0]);
        // Only the middle two entries have usable denominators
        assert_relative_eq!(convergence_error(&prev, &current).unwrap(), 0.0);

        let prev = FEVec::from_vec(vec![1.1, 0.5]);
        let current = FEVec::from_vec(vec![1.0, 1.0]);
        assert_relative_eq!(convergence_error(&prev, &current).unwrap(), 0.1, epsilon = 1e-12);
    }

    #[test]
    fn test_convergence_error_without_usable_entries() {
        let zero = FEVec::zeros(3);
        assert!(convergence_error(&zero, &zero).is_none());
        assert!(convergence_error(&FEVec::zeros(0), &FEVec::zeros(0)).is_none());
    }
}
