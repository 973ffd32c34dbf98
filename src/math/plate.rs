//! Rectangular plate element math
//!
//! Four-node rectangular plate combining an in-plane (membrane) element with a
//! 12-term polynomial Kirchhoff bending element. Nodes are ordered i, j, m, n
//! with local coordinates i(0,0), j(0,b), m(a,b), n(a,0): the local x axis runs
//! from i toward n and the local y axis from i toward j.
//!
//! The bending field is
//! w = a1 + a2 x + a3 y + a4 x² + a5 xy + a6 y² + a7 x³ + a8 x²y + a9 xy² + a10 y³ + a11 x³y + a12 xy³
//! with nodal unknowns w, θx = ∂w/∂y and θy = -∂w/∂x.
//!
//! There is no drilling (RZ) stiffness, so a model made only of coplanar plates
//! needs its RZ rotations restrained.

use nalgebra::SMatrix;

use super::{Mat12, Mat24, Mat3, Vec12, Vec24, Vec3};
use crate::error::{FEAError, FEAResult};

pub type Mat8 = SMatrix<f64, 8, 8>;
type Mat3x12 = SMatrix<f64, 3, 12>;

/// Positions of the bending DOFs (w, θx, θy per node) in the 24-DOF plate vector
pub const BENDING_DOFS: [usize; 12] = [2, 3, 4, 8, 9, 10, 14, 15, 16, 20, 21, 22];

/// Positions of the membrane DOFs (u, v per node) in the 24-DOF plate vector
pub const MEMBRANE_DOFS: [usize; 8] = [0, 1, 6, 7, 12, 13, 18, 19];

const GEOM_TOL: f64 = 1e-12;

/// Local corner coordinates in i, j, m, n order
fn corners(a: f64, b: f64) -> [(f64, f64); 4] {
    [(0.0, 0.0), (0.0, b), (a, b), (a, 0.0)]
}

/// Fill a symmetric matrix from its lower triangle
fn mirror_lower<const N: usize>(lower: &[&[f64]]) -> SMatrix<f64, N, N> {
    let mut k = SMatrix::<f64, N, N>::zeros();
    for (i, row) in lower.iter().enumerate() {
        for (j, &v) in row.iter().enumerate() {
            k[(i, j)] = v;
            k[(j, i)] = v;
        }
    }
    k
}

/// Bending rigidity matrix [D] for an isotropic plate
pub fn bending_rigidity(e: f64, t: f64, nu: f64) -> Mat3 {
    let d = e * t.powi(3) / (12.0 * (1.0 - nu * nu));
    Mat3::new(
        d,      d * nu, 0.0,
        d * nu, d,      0.0,
        0.0,    0.0,    d * (1.0 - nu) / 2.0,
    )
}

/// Plane stress constitutive matrix
pub fn plane_stress_matrix(e: f64, nu: f64) -> Mat3 {
    let c = e / (1.0 - nu * nu);
    Mat3::new(
        c,      c * nu, 0.0,
        c * nu, c,      0.0,
        0.0,    0.0,    c * (1.0 - nu) / 2.0,
    )
}

/// Closed-form 12x12 bending stiffness in local coordinates
///
/// Rows and columns are [w, θx, θy] for nodes i, j, m, n.
/// `a` is the plate width (local x) and `b` its height (local y).
#[rustfmt::skip]
pub fn plate_bending_stiffness(a: f64, b: f64, e: f64, t: f64, nu: f64) -> Mat12 {
    let beta = b / a;
    let b2 = beta * beta;
    let bm = 1.0 / b2;
    let c1 = (14.0 - 4.0 * nu) / 5.0;
    let c2 = (1.0 + 4.0 * nu) / 5.0;
    let c3 = (1.0 - nu) / 5.0;
    let c4 = 4.0 * (1.0 - nu) / 15.0;
    let c5 = (1.0 - nu) / 15.0;
    let diag = 4.0 * (b2 + bm) + c1;

    let k: Mat12 = mirror_lower(&[
        &[diag],
        &[(2.0 * bm + c2) * b, (4.0 / 3.0 * bm + c4) * b * b],
        &[-(2.0 * b2 + c2) * a, -nu * a * b, (4.0 / 3.0 * b2 + c4) * a * a],
        &[2.0 * (b2 - 2.0 * bm) - c1, -(2.0 * bm + c3) * b, (-b2 + c2) * a, diag],
        &[(2.0 * bm + c3) * b, (2.0 / 3.0 * bm - c5) * b * b, 0.0, -(2.0 * bm + c2) * b,
          (4.0 / 3.0 * bm + c4) * b * b],
        &[(-b2 + c2) * a, 0.0, (2.0 / 3.0 * b2 - c4) * a * a, -(2.0 * b2 + c2) * a, nu * a * b,
          (4.0 / 3.0 * b2 + c4) * a * a],
        &[-2.0 * (b2 + bm) + c1, (-bm + c3) * b, (b2 - c3) * a, -2.0 * (2.0 * b2 - bm) - c1,
          (-bm + c2) * b, (2.0 * b2 + c3) * a, diag],
        &[(bm - c3) * b, (1.0 / 3.0 * bm + c5) * b * b, 0.0, (-bm + c2) * b,
          (2.0 / 3.0 * bm - c4) * b * b, 0.0, -(2.0 * bm + c2) * b, (4.0 / 3.0 * bm + c4) * b * b],
        &[(-b2 + c3) * a, 0.0, (1.0 / 3.0 * b2 + c5) * a * a, -(2.0 * b2 + c3) * a, 0.0,
          (2.0 / 3.0 * b2 - c5) * a * a, (2.0 * b2 + c2) * a, -nu * a * b,
          (4.0 / 3.0 * b2 + c4) * a * a],
        &[-2.0 * (2.0 * b2 - bm) - c1, (bm - c2) * b, (2.0 * b2 + c3) * a, -2.0 * (b2 + bm) + c1,
          (bm - c3) * b, (b2 - c3) * a, 2.0 * (b2 - 2.0 * bm) - c1, (2.0 * bm + c3) * b,
          (b2 - c2) * a, diag],
        &[(bm - c2) * b, (2.0 / 3.0 * bm - c4) * b * b, 0.0, (-bm + c3) * b,
          (1.0 / 3.0 * bm + c5) * b * b, 0.0, -(2.0 * bm + c3) * b, (2.0 / 3.0 * bm - c5) * b * b,
          0.0, (2.0 * bm + c2) * b, (4.0 / 3.0 * bm + c4) * b * b],
        &[-(2.0 * b2 + c3) * a, 0.0, (2.0 / 3.0 * b2 - c5) * a * a, (-b2 + c3) * a, 0.0,
          (1.0 / 3.0 * b2 + c5) * a * a, (b2 - c2) * a, 0.0, (2.0 / 3.0 * b2 - c4) * a * a,
          (2.0 * b2 + c2) * a, nu * a * b, (4.0 / 3.0 * b2 + c4) * a * a],
    ]);

    k * (e * t.powi(3) / (12.0 * (1.0 - nu * nu) * a * b))
}

/// Closed-form 8x8 membrane stiffness in local coordinates
///
/// Rows and columns are [u, v] for nodes i, j, m, n.
#[rustfmt::skip]
pub fn plate_membrane_stiffness(a: f64, b: f64, e: f64, t: f64, nu: f64) -> Mat8 {
    let beta = b / a;
    let bi = 1.0 / beta;
    let p = 1.5 * (1.0 + nu);
    let q = 1.5 * (1.0 - 3.0 * nu);
    let du = 4.0 * beta + 2.0 * (1.0 - nu) * bi;
    let dv = 4.0 * bi + 2.0 * (1.0 - nu) * beta;

    let k: Mat8 = mirror_lower(&[
        &[du],
        &[p, dv],
        &[2.0 * beta - 2.0 * (1.0 - nu) * bi, -q, du],
        &[q, -4.0 * bi + (1.0 - nu) * beta, -p, dv],
        &[-2.0 * beta - (1.0 - nu) * bi, -p, -4.0 * beta + (1.0 - nu) * bi, -q, du],
        &[-p, -2.0 * bi - (1.0 - nu) * beta, q, 2.0 * bi - 2.0 * (1.0 - nu) * beta, p, dv],
        &[-4.0 * beta + (1.0 - nu) * bi, q, -2.0 * beta - (1.0 - nu) * bi, p,
          2.0 * beta - 2.0 * (1.0 - nu) * bi, -q, du],
        &[-q, 2.0 * bi - 2.0 * (1.0 - nu) * beta, p, -2.0 * bi - (1.0 - nu) * beta, q,
          -4.0 * bi + (1.0 - nu) * beta, -p, dv],
    ]);

    k * (e * t / (12.0 * (1.0 - nu * nu)))
}

/// Full 24x24 local stiffness: membrane and bending terms placed at their
/// DOF positions, drilling rows left at zero
pub fn plate_local_stiffness(a: f64, b: f64, e: f64, t: f64, nu: f64) -> Mat24 {
    let kb = plate_bending_stiffness(a, b, e, t, nu);
    let km = plate_membrane_stiffness(a, b, e, t, nu);

    let mut k = Mat24::zeros();
    for (r, &gr) in BENDING_DOFS.iter().enumerate() {
        for (c, &gc) in BENDING_DOFS.iter().enumerate() {
            k[(gr, gc)] += kb[(r, c)];
        }
    }
    for (r, &gr) in MEMBRANE_DOFS.iter().enumerate() {
        for (c, &gc) in MEMBRANE_DOFS.iter().enumerate() {
            k[(gr, gc)] += km[(r, c)];
        }
    }
    k
}

/// Direction cosines of the plate's local axes (rows are local x, y, z)
///
/// Local x points from i to n, local z is normal to the plane through i, j
/// and n, and local y completes the right-handed set.
pub fn plate_direction_cosines(i: &[f64; 3], j: &[f64; 3], n: &[f64; 3]) -> FEAResult<Mat3> {
    let pi = Vec3::from(*i);
    let to_n = Vec3::from(*n) - pi;
    let to_j = Vec3::from(*j) - pi;

    if to_n.norm() < GEOM_TOL || to_j.norm() < GEOM_TOL {
        return Err(FEAError::InvalidGeometry(
            "plate has a zero-length edge".to_string(),
        ));
    }

    let x = to_n.normalize();
    let z = x.cross(&to_j);
    if z.norm() < GEOM_TOL {
        return Err(FEAError::InvalidGeometry(
            "plate edges are collinear".to_string(),
        ));
    }
    let z = z.normalize();
    let y = z.cross(&x);

    Ok(Mat3::new(
        x.x, x.y, x.z,
        y.x, y.y, y.z,
        z.x, z.y, z.z,
    ))
}

/// 24x24 global-to-local transformation for a plate
pub fn plate_transformation_matrix(i: &[f64; 3], j: &[f64; 3], n: &[f64; 3]) -> FEAResult<Mat24> {
    let dc = plate_direction_cosines(i, j, n)?;
    let mut t = Mat24::zeros();
    for block in 0..8 {
        t.fixed_view_mut::<3, 3>(block * 3, block * 3).copy_from(&dc);
    }
    Ok(t)
}

/// Relates the 12 polynomial coefficients to the nodal bending DOFs
#[rustfmt::skip]
fn coefficient_matrix(a: f64, b: f64) -> Mat12 {
    let mut c = Mat12::zeros();
    for (node, (x, y)) in corners(a, b).into_iter().enumerate() {
        let r = node * 3;
        let w = [1.0, x, y, x * x, x * y, y * y, x.powi(3), x * x * y, x * y * y, y.powi(3),
                 x.powi(3) * y, x * y.powi(3)];
        let rx = [0.0, 0.0, 1.0, 0.0, x, 2.0 * y, 0.0, x * x, 2.0 * x * y, 3.0 * y * y,
                  x.powi(3), 3.0 * x * y * y];
        let ry = [0.0, -1.0, 0.0, -2.0 * x, -y, 0.0, -3.0 * x * x, -2.0 * x * y, -y * y, 0.0,
                  -3.0 * x * x * y, -y.powi(3)];
        for k in 0..12 {
            c[(r, k)] = w[k];
            c[(r + 1, k)] = rx[k];
            c[(r + 2, k)] = ry[k];
        }
    }
    c
}

/// Curvature operator: maps coefficients to [-w,xx, -w,yy, -2w,xy] at (x, y)
#[rustfmt::skip]
fn curvature_matrix(x: f64, y: f64) -> Mat3x12 {
    Mat3x12::from_row_slice(&[
        0.0, 0.0, 0.0, -2.0, 0.0, 0.0, -6.0 * x, -2.0 * y, 0.0, 0.0, -6.0 * x * y, 0.0,
        0.0, 0.0, 0.0, 0.0, 0.0, -2.0, 0.0, 0.0, -2.0 * x, -6.0 * y, 0.0, -6.0 * x * y,
        0.0, 0.0, 0.0, 0.0, -2.0, 0.0, 0.0, -4.0 * x, -4.0 * y, 0.0, -6.0 * x * x, -6.0 * y * y,
    ])
}

/// Derivative of the curvature operator with respect to x
#[rustfmt::skip]
fn curvature_matrix_dx(x: f64, y: f64) -> Mat3x12 {
    Mat3x12::from_row_slice(&[
        0.0, 0.0, 0.0, 0.0, 0.0, 0.0, -6.0, 0.0, 0.0, 0.0, -6.0 * y, 0.0,
        0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, -2.0, 0.0, 0.0, -6.0 * y,
        0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, -4.0, 0.0, 0.0, -12.0 * x, 0.0,
    ])
}

/// Derivative of the curvature operator with respect to y
#[rustfmt::skip]
fn curvature_matrix_dy(x: f64, y: f64) -> Mat3x12 {
    Mat3x12::from_row_slice(&[
        0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, -2.0, 0.0, 0.0, -6.0 * x, 0.0,
        0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, -6.0, 0.0, -6.0 * x,
        0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, -4.0, 0.0, 0.0, -12.0 * y,
    ])
}

/// Solve for the polynomial coefficients from the local displacement vector
fn bending_coefficients(a: f64, b: f64, d_local: &Vec24) -> FEAResult<Vec12> {
    let db = Vec12::from_fn(|r, _| d_local[BENDING_DOFS[r]]);
    let c_inv = coefficient_matrix(a, b).try_inverse().ok_or_else(|| {
        FEAError::MathError("plate coefficient matrix is singular".to_string())
    })?;
    Ok(c_inv * db)
}

#[allow(clippy::too_many_arguments)]
/// Internal moments [Mx, My, Mxy] per unit width at local point (x, y)
pub fn plate_moments(
    a: f64,
    b: f64,
    e: f64,
    t: f64,
    nu: f64,
    d_local: &Vec24,
    x: f64,
    y: f64,
) -> FEAResult<Vec3> {
    let coeffs = bending_coefficients(a, b, d_local)?;
    Ok(bending_rigidity(e, t, nu) * curvature_matrix(x, y) * coeffs)
}

#[allow(clippy::too_many_arguments)]
/// Transverse shears [Qx, Qy] per unit width at local point (x, y)
pub fn plate_shears(
    a: f64,
    b: f64,
    e: f64,
    t: f64,
    nu: f64,
    d_local: &Vec24,
    x: f64,
    y: f64,
) -> FEAResult<[f64; 2]> {
    let coeffs = bending_coefficients(a, b, d_local)?;
    let d = bending_rigidity(e, t, nu);
    let dm_dx = d * curvature_matrix_dx(x, y) * coeffs;
    let dm_dy = d * curvature_matrix_dy(x, y) * coeffs;

    Ok([dm_dx[0] + dm_dy[2], dm_dy[1] + dm_dx[2]])
}

/// In-plane stresses [σx, σy, τxy] at local point (x, y) from the bilinear
/// membrane field
pub fn membrane_stress(a: f64, b: f64, e: f64, nu: f64, d_local: &Vec24, x: f64, y: f64) -> Vec3 {
    // dN/dx and dN/dy for nodes i, j, m, n
    let dndx = [-(1.0 - y / b) / a, -(y / b) / a, (y / b) / a, (1.0 - y / b) / a];
    let dndy = [-(1.0 - x / a) / b, (1.0 - x / a) / b, (x / a) / b, -(x / a) / b];

    let mut strain = Vec3::zeros();
    for node in 0..4 {
        let u = d_local[MEMBRANE_DOFS[2 * node]];
        let v = d_local[MEMBRANE_DOFS[2 * node + 1]];
        strain[0] += dndx[node] * u;
        strain[1] += dndy[node] * v;
        strain[2] += dndy[node] * u + dndx[node] * v;
    }
    plane_stress_matrix(e, nu) * strain
}
