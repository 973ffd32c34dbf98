//! Piecewise internal force functions along a member
//!
//! A member is cut at its ends, at every point load and at both ends of every
//! distributed load. Inside each piece the distributed load varies linearly, so
//! shear, moment, slope and deflection are closed-form polynomials of the
//! distance from the start of the piece. Slopes and deflections are chained
//! from one piece to the next, starting from the member's i-end displacements.

use serde::{Deserialize, Serialize};

use crate::error::{FEAError, FEAResult};
use crate::loads::{DistributedLoad, LoadDirection, PointLoad};
use crate::math::{gauss3, Vec12};

use super::section::Section;

/// Number of samples per piece when searching for deflection extremes
const DEFLECTION_SAMPLES: usize = 40;

/// Local direction of a shear force
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShearDirection {
    Fy,
    Fz,
}

/// Local axis of a bending moment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MomentDirection {
    My,
    Mz,
}

/// Local direction of a member deflection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeflectionDirection {
    Dx,
    Dy,
    Dz,
}

/// One piece of a member in a single bending plane
#[derive(Debug, Clone, Copy, PartialEq)]
struct BeamSegment {
    x1: f64,
    x2: f64,
    v1: f64,
    m1: f64,
    w1: f64,
    w2: f64,
    theta1: f64,
    delta1: f64,
    ei: f64,
}

impl BeamSegment {
    fn length(&self) -> f64 {
        self.x2 - self.x1
    }

    /// Load slope (w2 - w1) / length
    fn dw(&self) -> f64 {
        let len = self.length();
        if len > 0.0 {
            (self.w2 - self.w1) / len
        } else {
            0.0
        }
    }

    fn shear(&self, x: f64) -> f64 {
        let s = x - self.x1;
        self.v1 + self.w1 * s + self.dw() * s * s / 2.0
    }

    fn moment(&self, x: f64) -> f64 {
        let s = x - self.x1;
        self.m1 + self.v1 * s + self.w1 * s.powi(2) / 2.0 + self.dw() * s.powi(3) / 6.0
    }

    fn slope(&self, x: f64) -> f64 {
        let s = x - self.x1;
        self.theta1
            + (self.m1 * s
                + self.v1 * s.powi(2) / 2.0
                + self.w1 * s.powi(3) / 6.0
                + self.dw() * s.powi(4) / 24.0)
                / self.ei
    }

    fn deflection(&self, x: f64) -> f64 {
        let s = x - self.x1;
        self.delta1
            + self.theta1 * s
            + (self.m1 * s.powi(2) / 2.0
                + self.v1 * s.powi(3) / 6.0
                + self.w1 * s.powi(4) / 24.0
                + self.dw() * s.powi(5) / 120.0)
                / self.ei
    }

    /// Positions where the shear can peak: the ends and where the load crosses zero
    fn shear_candidates(&self) -> Vec<f64> {
        let mut xs = vec![self.x1, self.x2];
        let dw = self.dw();
        if dw != 0.0 {
            xs.push(self.x1 - self.w1 / dw);
        }
        self.within(xs)
    }

    /// Positions where the moment can peak: the ends and the shear roots
    fn moment_candidates(&self) -> Vec<f64> {
        let mut xs = vec![self.x1, self.x2];
        for s in quadratic_roots(self.dw() / 2.0, self.w1, self.v1) {
            xs.push(self.x1 + s);
        }
        self.within(xs)
    }

    fn within(&self, xs: Vec<f64>) -> Vec<f64> {
        xs.into_iter()
            .filter(|x| x.is_finite() && *x >= self.x1 && *x <= self.x2)
            .collect()
    }
}

/// One piece of a member's axial field
#[derive(Debug, Clone, Copy, PartialEq)]
struct AxialSegment {
    x1: f64,
    x2: f64,
    /// Axial force at the start, tension positive
    n1: f64,
    p1: f64,
    p2: f64,
    u1: f64,
    ea: f64,
}

impl AxialSegment {
    fn dp(&self) -> f64 {
        let len = self.x2 - self.x1;
        if len > 0.0 {
            (self.p2 - self.p1) / len
        } else {
            0.0
        }
    }

    fn axial(&self, x: f64) -> f64 {
        let s = x - self.x1;
        self.n1 - (self.p1 * s + self.dp() * s * s / 2.0)
    }

    fn displacement(&self, x: f64) -> f64 {
        let s = x - self.x1;
        self.u1 + (self.n1 * s - self.p1 * s.powi(2) / 2.0 - self.dp() * s.powi(3) / 6.0) / self.ea
    }

    fn candidates(&self) -> Vec<f64> {
        let mut xs = vec![self.x1, self.x2];
        let dp = self.dp();
        if dp != 0.0 {
            let x = self.x1 - self.p1 / dp;
            if x > self.x1 && x < self.x2 {
                xs.push(x);
            }
        }
        xs
    }
}

/// One piece of constant torque
#[derive(Debug, Clone, Copy, PartialEq)]
struct TorsionSegment {
    x1: f64,
    x2: f64,
    torque: f64,
}

/// Real roots of a s² + b s + c = 0
fn quadratic_roots(a: f64, b: f64, c: f64) -> Vec<f64> {
    if a.abs() < 1e-14 {
        if b.abs() < 1e-14 {
            return Vec::new();
        }
        return vec![-c / b];
    }
    let disc = b * b - 4.0 * a * c;
    if disc < 0.0 {
        return Vec::new();
    }
    let sq = disc.sqrt();
    vec![(-b + sq) / (2.0 * a), (-b - sq) / (2.0 * a)]
}

/// Loads acting in one local direction, split by kind
#[derive(Debug, Default)]
struct PlaneLoads {
    forces: Vec<(f64, f64)>,
    moments: Vec<(f64, f64)>,
    distributed: Vec<(f64, f64, f64, f64)>,
}

impl PlaneLoads {
    fn collect(
        force_dir: LoadDirection,
        moment_dir: Option<LoadDirection>,
        point_loads: &[PointLoad],
        dist_loads: &[DistributedLoad],
        length: f64,
    ) -> Self {
        let mut loads = Self::default();
        for p in point_loads {
            if p.direction == force_dir {
                loads.forces.push((p.position, p.magnitude));
            } else if Some(p.direction) == moment_dir {
                loads.moments.push((p.position, p.magnitude));
            }
        }
        for d in dist_loads.iter().filter(|d| d.direction == force_dir) {
            let x2 = d.end(length);
            if x2 > d.x1 {
                loads.distributed.push((d.w1, d.w2, d.x1, x2));
            }
        }
        loads
    }

    /// Resultant force and moment about `x` of the distributed loads on [0, x]
    fn distributed_resultants(&self, x: f64) -> (f64, f64) {
        let mut force = 0.0;
        let mut moment = 0.0;
        for &(w1, w2, x1, x2) in &self.distributed {
            let hi = x.min(x2);
            if hi <= x1 {
                continue;
            }
            let w = |s: f64| w1 + (w2 - w1) * (s - x1) / (x2 - x1);
            force += gauss3(x1, hi, &w);
            moment += gauss3(x1, hi, |s| (x - s) * w(s));
        }
        (force, moment)
    }

    /// Distributed load intensity at both ends of the piece [xa, xb]
    fn intensities(&self, xa: f64, xb: f64) -> (f64, f64) {
        let mid = (xa + xb) / 2.0;
        self.distributed
            .iter()
            .filter(|&&(_, _, x1, x2)| mid >= x1 && mid <= x2)
            .fold((0.0, 0.0), |(wa, wb), &(w1, w2, x1, x2)| {
                let w = |s: f64| w1 + (w2 - w1) * (s - x1) / (x2 - x1);
                (wa + w(xa), wb + w(xb))
            })
    }
}

/// Start-of-member state for one bending plane
struct PlaneStart {
    shear: f64,
    moment: f64,
    /// Sign applied to concentrated moments when they enter the moment sum
    moment_sign: f64,
    slope: f64,
    deflection: f64,
    ei: f64,
}

fn beam_segments(breaks: &[f64], tol: f64, start: PlaneStart, loads: &PlaneLoads) -> Vec<BeamSegment> {
    let mut theta = start.slope;
    let mut delta = start.deflection;

    breaks
        .windows(2)
        .map(|w| {
            let (xa, xb) = (w[0], w[1]);
            let (dist_force, dist_moment) = loads.distributed_resultants(xa);

            let mut v1 = start.shear + dist_force;
            let mut m1 = start.moment + start.shear * xa + dist_moment;
            for &(a, p) in loads.forces.iter().filter(|(a, _)| *a <= xa + tol) {
                v1 += p;
                m1 += p * (xa - a);
            }
            for &(_, m) in loads.moments.iter().filter(|(a, _)| *a <= xa + tol) {
                m1 += start.moment_sign * m;
            }

            let (w1, w2) = loads.intensities(xa, xb);
            let seg = BeamSegment {
                x1: xa,
                x2: xb,
                v1,
                m1,
                w1,
                w2,
                theta1: theta,
                delta1: delta,
                ei: start.ei,
            };
            theta = seg.slope(xb);
            delta = seg.deflection(xb);
            seg
        })
        .collect()
}

/// Internal force and deflection functions for one analyzed member
#[derive(Debug, Clone, PartialEq)]
pub struct MemberSegments {
    length: f64,
    /// Bending in the local x-y plane (Fy shear, Mz moment)
    y_plane: Vec<BeamSegment>,
    /// Bending in the local x-z plane (Fz shear, My moment)
    z_plane: Vec<BeamSegment>,
    axial: Vec<AxialSegment>,
    torsion: Vec<TorsionSegment>,
}

impl MemberSegments {
    /// Build the segments from the member's local end forces and displacements
    pub(crate) fn build(
        length: f64,
        section: &Section,
        forces: &Vec12,
        displacements: &Vec12,
        point_loads: &[PointLoad],
        dist_loads: &[DistributedLoad],
    ) -> Self {
        let tol = 1e-9 * length;

        let mut breaks = vec![0.0, length];
        breaks.extend(point_loads.iter().map(|p| p.position));
        for d in dist_loads {
            breaks.push(d.x1);
            breaks.push(d.end(length));
        }
        breaks.sort_by(|a, b| a.total_cmp(b));
        breaks.dedup_by(|b, a| (*b - *a).abs() <= tol);
        if let Some(last) = breaks.last_mut() {
            *last = length;
        }

        let y_loads = PlaneLoads::collect(
            LoadDirection::Fy,
            Some(LoadDirection::Mz),
            point_loads,
            dist_loads,
            length,
        );
        let y_plane = beam_segments(
            &breaks,
            tol,
            PlaneStart {
                shear: forces[1],
                moment: -forces[5],
                moment_sign: -1.0,
                slope: displacements[5],
                deflection: displacements[1],
                ei: section.e * section.iz,
            },
            &y_loads,
        );

        let z_loads = PlaneLoads::collect(
            LoadDirection::Fz,
            Some(LoadDirection::My),
            point_loads,
            dist_loads,
            length,
        );
        let z_plane = beam_segments(
            &breaks,
            tol,
            PlaneStart {
                shear: forces[2],
                moment: forces[4],
                moment_sign: 1.0,
                slope: -displacements[4],
                deflection: displacements[2],
                ei: section.e * section.iy,
            },
            &z_loads,
        );

        let x_loads = PlaneLoads::collect(LoadDirection::Fx, None, point_loads, dist_loads, length);
        let ea = section.e * section.a;
        let mut u = displacements[0];
        let axial = breaks
            .windows(2)
            .map(|w| {
                let (xa, xb) = (w[0], w[1]);
                let (dist_force, _) = x_loads.distributed_resultants(xa);
                let applied: f64 = x_loads
                    .forces
                    .iter()
                    .filter(|(a, _)| *a <= xa + tol)
                    .map(|(_, p)| p)
                    .sum();
                let (p1, p2) = x_loads.intensities(xa, xb);
                let seg = AxialSegment {
                    x1: xa,
                    x2: xb,
                    n1: -(forces[0] + applied + dist_force),
                    p1,
                    p2,
                    u1: u,
                    ea,
                };
                u = seg.displacement(xb);
                seg
            })
            .collect();

        let torques: Vec<(f64, f64)> = point_loads
            .iter()
            .filter(|p| p.direction == LoadDirection::Mx)
            .map(|p| (p.position, p.magnitude))
            .collect();
        let torsion = breaks
            .windows(2)
            .map(|w| {
                let applied: f64 = torques
                    .iter()
                    .filter(|(a, _)| *a <= w[0] + tol)
                    .map(|(_, t)| t)
                    .sum();
                TorsionSegment {
                    x1: w[0],
                    x2: w[1],
                    torque: -(forces[3] + applied),
                }
            })
            .collect();

        Self {
            length,
            y_plane,
            z_plane,
            axial,
            torsion,
        }
    }

    /// Member length the segments cover
    pub fn length(&self) -> f64 {
        self.length
    }

    /// Number of pieces the member was cut into
    pub fn segment_count(&self) -> usize {
        self.y_plane.len()
    }

    fn check_position(&self, x: f64) -> FEAResult<f64> {
        let tol = 1e-9 * self.length.max(1.0);
        if !x.is_finite() || x < -tol || x > self.length + tol {
            return Err(FEAError::InvalidInput(format!(
                "position {x} lies outside the member (length {})",
                self.length
            )));
        }
        Ok(x.clamp(0.0, self.length))
    }

    /// Index of the piece containing `x`; a cut belongs to the piece on its right
    fn locate(x1s: impl Iterator<Item = f64>, x: f64) -> usize {
        x1s.enumerate()
            .skip(1)
            .take_while(|&(_, x1)| x1 <= x)
            .last()
            .map_or(0, |(i, _)| i)
    }

    fn plane(&self, dir: ShearDirection) -> &[BeamSegment] {
        match dir {
            ShearDirection::Fy => &self.y_plane,
            ShearDirection::Fz => &self.z_plane,
        }
    }

    fn beam_at(segments: &[BeamSegment], x: f64) -> &BeamSegment {
        &segments[Self::locate(segments.iter().map(|s| s.x1), x)]
    }

    fn evaluate(&self, quantity: Quantity, x: f64) -> f64 {
        match quantity {
            Quantity::Shear(dir) => Self::beam_at(self.plane(dir), x).shear(x),
            Quantity::Moment(MomentDirection::Mz) => Self::beam_at(&self.y_plane, x).moment(x),
            Quantity::Moment(MomentDirection::My) => -Self::beam_at(&self.z_plane, x).moment(x),
            Quantity::Axial => {
                self.axial[Self::locate(self.axial.iter().map(|s| s.x1), x)].axial(x)
            }
            Quantity::Torque => {
                self.torsion[Self::locate(self.torsion.iter().map(|s| s.x1), x)].torque
            }
            Quantity::Deflection(DeflectionDirection::Dx) => {
                self.axial[Self::locate(self.axial.iter().map(|s| s.x1), x)].displacement(x)
            }
            Quantity::Deflection(DeflectionDirection::Dy) => {
                Self::beam_at(&self.y_plane, x).deflection(x)
            }
            Quantity::Deflection(DeflectionDirection::Dz) => {
                Self::beam_at(&self.z_plane, x).deflection(x)
            }
        }
    }

    /// Every value the quantity takes at its candidate extreme positions,
    /// evaluated on both sides of each cut
    fn extreme_values(&self, quantity: Quantity) -> Vec<f64> {
        match quantity {
            Quantity::Shear(dir) => self
                .plane(dir)
                .iter()
                .flat_map(|s| s.shear_candidates().into_iter().map(move |x| s.shear(x)))
                .collect(),
            Quantity::Moment(dir) => {
                let (segments, sign) = match dir {
                    MomentDirection::Mz => (&self.y_plane, 1.0),
                    MomentDirection::My => (&self.z_plane, -1.0),
                };
                segments
                    .iter()
                    .flat_map(|s| {
                        s.moment_candidates()
                            .into_iter()
                            .map(move |x| sign * s.moment(x))
                    })
                    .collect()
            }
            Quantity::Axial => self
                .axial
                .iter()
                .flat_map(|s| s.candidates().into_iter().map(move |x| s.axial(x)))
                .collect(),
            Quantity::Torque => self.torsion.iter().map(|s| s.torque).collect(),
            Quantity::Deflection(dir) => {
                let n = DEFLECTION_SAMPLES;
                let pieces: Vec<(f64, f64)> = match dir {
                    DeflectionDirection::Dx => self.axial.iter().map(|s| (s.x1, s.x2)).collect(),
                    DeflectionDirection::Dy => self.y_plane.iter().map(|s| (s.x1, s.x2)).collect(),
                    DeflectionDirection::Dz => self.z_plane.iter().map(|s| (s.x1, s.x2)).collect(),
                };
                pieces
                    .into_iter()
                    .flat_map(|(x1, x2)| {
                        (0..=n).map(move |i| x1 + (x2 - x1) * i as f64 / n as f64)
                    })
                    .map(|x| self.evaluate(quantity, x))
                    .collect()
            }
        }
    }

    fn max_of(&self, quantity: Quantity) -> f64 {
        self.extreme_values(quantity)
            .into_iter()
            .fold(f64::NEG_INFINITY, f64::max)
    }

    fn min_of(&self, quantity: Quantity) -> f64 {
        self.extreme_values(quantity)
            .into_iter()
            .fold(f64::INFINITY, f64::min)
    }

    /// Shear at `x`: the sum of forces on the free body left of `x` in the
    /// positive local direction
    pub fn shear(&self, dir: ShearDirection, x: f64) -> FEAResult<f64> {
        Ok(self.evaluate(Quantity::Shear(dir), self.check_position(x)?))
    }

    /// Bending moment at `x`, right-hand rule about the local axis
    pub fn moment(&self, dir: MomentDirection, x: f64) -> FEAResult<f64> {
        Ok(self.evaluate(Quantity::Moment(dir), self.check_position(x)?))
    }

    /// Axial force at `x`, tension positive
    pub fn axial(&self, x: f64) -> FEAResult<f64> {
        Ok(self.evaluate(Quantity::Axial, self.check_position(x)?))
    }

    /// Torque at `x`
    pub fn torque(&self, x: f64) -> FEAResult<f64> {
        Ok(self.evaluate(Quantity::Torque, self.check_position(x)?))
    }

    /// Local displacement of the member axis at `x`
    pub fn deflection(&self, dir: DeflectionDirection, x: f64) -> FEAResult<f64> {
        Ok(self.evaluate(Quantity::Deflection(dir), self.check_position(x)?))
    }

    pub fn max_shear(&self, dir: ShearDirection) -> f64 {
        self.max_of(Quantity::Shear(dir))
    }

    pub fn min_shear(&self, dir: ShearDirection) -> f64 {
        self.min_of(Quantity::Shear(dir))
    }

    pub fn max_moment(&self, dir: MomentDirection) -> f64 {
        self.max_of(Quantity::Moment(dir))
    }

    pub fn min_moment(&self, dir: MomentDirection) -> f64 {
        self.min_of(Quantity::Moment(dir))
    }

    pub fn max_axial(&self) -> f64 {
        self.max_of(Quantity::Axial)
    }

    pub fn min_axial(&self) -> f64 {
        self.min_of(Quantity::Axial)
    }

    pub fn max_torque(&self) -> f64 {
        self.max_of(Quantity::Torque)
    }

    pub fn min_torque(&self) -> f64 {
        self.min_of(Quantity::Torque)
    }

    /// Largest deflection, found by sampling each piece
    pub fn max_deflection(&self, dir: DeflectionDirection) -> f64 {
        self.max_of(Quantity::Deflection(dir))
    }

    /// Smallest deflection, found by sampling each piece
    pub fn min_deflection(&self, dir: DeflectionDirection) -> f64 {
        self.min_of(Quantity::Deflection(dir))
    }

    /// Shear sampled at `points` evenly spaced positions
    pub fn shear_diagram(&self, dir: ShearDirection, points: usize) -> Diagram<'_> {
        Diagram::new(self, Quantity::Shear(dir), points)
    }

    pub fn moment_diagram(&self, dir: MomentDirection, points: usize) -> Diagram<'_> {
        Diagram::new(self, Quantity::Moment(dir), points)
    }

    pub fn axial_diagram(&self, points: usize) -> Diagram<'_> {
        Diagram::new(self, Quantity::Axial, points)
    }

    pub fn torque_diagram(&self, points: usize) -> Diagram<'_> {
        Diagram::new(self, Quantity::Torque, points)
    }

    pub fn deflection_diagram(&self, dir: DeflectionDirection, points: usize) -> Diagram<'_> {
        Diagram::new(self, Quantity::Deflection(dir), points)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Quantity {
    Shear(ShearDirection),
    Moment(MomentDirection),
    Axial,
    Torque,
    Deflection(DeflectionDirection),
}

/// Lazy `(x, value)` samples of one internal force along a member
///
/// Nothing is evaluated until the iterator is advanced; cloning restarts
/// from the clone's current position.
#[derive(Debug, Clone)]
pub struct Diagram<'a> {
    segments: &'a MemberSegments,
    quantity: Quantity,
    next: usize,
    points: usize,
}

impl<'a> Diagram<'a> {
    fn new(segments: &'a MemberSegments, quantity: Quantity, points: usize) -> Self {
        Self {
            segments,
            quantity,
            next: 0,
            points,
        }
    }
}

impl Iterator for Diagram<'_> {
    type Item = (f64, f64);

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.points {
            return None;
        }
        let x = if self.points == 1 {
            0.0
        } else {
            self.segments.length * self.next as f64 / (self.points - 1) as f64
        };
        self.next += 1;
        Some((x, self.segments.evaluate(self.quantity, x)))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.points.saturating_sub(self.next);
        (left, Some(left))
    }
}

impl ExactSizeIterator for Diagram<'_> {}
