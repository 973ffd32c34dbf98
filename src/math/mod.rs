//! Mathematical utilities for frame element calculations

pub mod plate;

use nalgebra::{DMatrix, DVector, Matrix3, SMatrix, SVector, Vector3};

use crate::error::{FEAError, FEAResult};
use crate::loads::LoadDirection;

pub type Mat = DMatrix<f64>;
pub type Vec = DVector<f64>;
pub type Mat3 = Matrix3<f64>;
pub type Vec3 = Vector3<f64>;

/// 12x12 matrix for member stiffness
pub type Mat12 = SMatrix<f64, 12, 12>;
/// 12-element vector for member forces/displacements
pub type Vec12 = SVector<f64, 12>;
/// 24x24 matrix for plate stiffness
pub type Mat24 = SMatrix<f64, 24, 24>;
/// 24-element vector for plate forces/displacements
pub type Vec24 = SVector<f64, 24>;

/// Tolerance used to decide whether a direction component is zero
const AXIS_TOL: f64 = 1e-10;

/// Three-point Gauss-Legendre abscissae and weights on [-1, 1]
const GAUSS3: [(f64, f64); 3] = [
    (-0.774_596_669_241_483_4, 5.0 / 9.0),
    (0.0, 8.0 / 9.0),
    (0.774_596_669_241_483_4, 5.0 / 9.0),
];

/// Integrate `f` over [a, b] with three-point Gauss-Legendre quadrature.
///
/// Exact for polynomials up to degree five, which covers every shape
/// function / linear load product used by the beam element.
pub(crate) fn gauss3<F: Fn(f64) -> f64>(a: f64, b: f64, f: F) -> f64 {
    let half = (b - a) / 2.0;
    let mid = (a + b) / 2.0;
    GAUSS3
        .iter()
        .map(|&(xi, w)| w * f(mid + half * xi))
        .sum::<f64>()
        * half
}

/// Build the 3x3 direction cosine matrix for a frame element
///
/// # Arguments
/// * `i_node` - Start node coordinates [X, Y, Z]
/// * `j_node` - End node coordinates [X, Y, Z]
/// * `aux_node` - Optional auxiliary node; the local xz-plane passes through it
///
/// When no auxiliary node is given the default orientation is used:
/// - vertical members: local y along -X (pointing up) or +X (pointing down), z = global Z
/// - horizontal members: local y = global Y, z = x cross y
/// - inclined members: local z stays horizontal, y = z cross x
pub fn member_direction_cosines(
    i_node: &[f64; 3],
    j_node: &[f64; 3],
    aux_node: Option<&[f64; 3]>,
) -> FEAResult<Mat3> {
    let i = Vec3::from_column_slice(i_node);
    let j = Vec3::from_column_slice(j_node);
    let axis = j - i;
    let length = axis.norm();

    if length < AXIS_TOL {
        return Err(FEAError::InvalidGeometry(
            "member has zero length".to_string(),
        ));
    }

    let x = axis / length;

    let (y, z) = if let Some(aux) = aux_node {
        let rxz = Vec3::from_column_slice(aux) - i;
        let y = rxz.cross(&x);
        let y_len = y.norm();
        if y_len < AXIS_TOL * rxz.norm().max(1.0) {
            return Err(FEAError::InvalidGeometry(
                "auxiliary node is collinear with the member".to_string(),
            ));
        }
        let y = y / y_len;
        (y, x.cross(&y))
    } else if x[0].abs() < AXIS_TOL && x[2].abs() < AXIS_TOL {
        // Vertical member
        if x[1] > 0.0 {
            (Vec3::new(-1.0, 0.0, 0.0), Vec3::new(0.0, 0.0, 1.0))
        } else {
            (Vec3::new(1.0, 0.0, 0.0), Vec3::new(0.0, 0.0, 1.0))
        }
    } else if axis[1].abs() < AXIS_TOL {
        // Horizontal member
        let y = Vec3::new(0.0, 1.0, 0.0);
        let z = x.cross(&y).normalize();
        (y, z)
    } else {
        // Inclined member: project onto the global XZ plane
        let proj = Vec3::new(axis[0], 0.0, axis[2]);
        let z = if x[1] > 0.0 {
            proj.cross(&x)
        } else {
            x.cross(&proj)
        }
        .normalize();
        let y = z.cross(&x).normalize();
        (y, z)
    };

    #[rustfmt::skip]
    let r = Mat3::new(
        x[0], x[1], x[2],
        y[0], y[1], y[2],
        z[0], z[1], z[2],
    );
    Ok(r)
}

/// Compute the 12x12 transformation matrix for a 3D frame element
///
/// # Returns
/// Block-diagonal matrix mapping global displacements to local ones (`d = T D`)
pub fn member_transformation_matrix(
    i_node: &[f64; 3],
    j_node: &[f64; 3],
    aux_node: Option<&[f64; 3]>,
) -> FEAResult<Mat12> {
    let r = member_direction_cosines(i_node, j_node, aux_node)?;

    let mut t = Mat12::zeros();
    for block in 0..4 {
        t.fixed_view_mut::<3, 3>(block * 3, block * 3).copy_from(&r);
    }
    Ok(t)
}

/// Compute the local stiffness matrix for a 3D frame element
///
/// # Arguments
/// * `e` - Modulus of elasticity
/// * `g` - Shear modulus
/// * `a` - Cross-sectional area
/// * `iy` - Moment of inertia about local y-axis
/// * `iz` - Moment of inertia about local z-axis
/// * `j` - Torsional constant
/// * `length` - Member length
///
/// # Returns
/// 12x12 local stiffness matrix
pub fn member_local_stiffness(
    e: f64,
    g: f64,
    a: f64,
    iy: f64,
    iz: f64,
    j: f64,
    length: f64,
) -> Mat12 {
    let l = length;
    let l2 = l * l;
    let l3 = l2 * l;

    let ea_l = e * a / l;
    let gj_l = g * j / l;

    let eiy_l3 = e * iy / l3;
    let eiy_l2 = e * iy / l2;
    let eiy_l = e * iy / l;

    let eiz_l3 = e * iz / l3;
    let eiz_l2 = e * iz / l2;
    let eiz_l = e * iz / l;

    #[rustfmt::skip]
    let data = [
        // Row 0: axial at i
        ea_l,      0.0,          0.0,           0.0,    0.0,           0.0,          -ea_l,     0.0,          0.0,           0.0,    0.0,           0.0,
        // Row 1: shear Fy at i
        0.0,       12.0*eiz_l3,  0.0,           0.0,    0.0,           6.0*eiz_l2,   0.0,       -12.0*eiz_l3, 0.0,           0.0,    0.0,           6.0*eiz_l2,
        // Row 2: shear Fz at i
        0.0,       0.0,          12.0*eiy_l3,   0.0,    -6.0*eiy_l2,   0.0,          0.0,       0.0,          -12.0*eiy_l3,  0.0,    -6.0*eiy_l2,   0.0,
        // Row 3: torsion at i
        0.0,       0.0,          0.0,           gj_l,   0.0,           0.0,          0.0,       0.0,          0.0,           -gj_l,  0.0,           0.0,
        // Row 4: moment My at i
        0.0,       0.0,          -6.0*eiy_l2,   0.0,    4.0*eiy_l,     0.0,          0.0,       0.0,          6.0*eiy_l2,    0.0,    2.0*eiy_l,     0.0,
        // Row 5: moment Mz at i
        0.0,       6.0*eiz_l2,   0.0,           0.0,    0.0,           4.0*eiz_l,    0.0,       -6.0*eiz_l2,  0.0,           0.0,    0.0,           2.0*eiz_l,
        // Row 6: axial at j
        -ea_l,     0.0,          0.0,           0.0,    0.0,           0.0,          ea_l,      0.0,          0.0,           0.0,    0.0,           0.0,
        // Row 7: shear Fy at j
        0.0,       -12.0*eiz_l3, 0.0,           0.0,    0.0,           -6.0*eiz_l2,  0.0,       12.0*eiz_l3,  0.0,           0.0,    0.0,           -6.0*eiz_l2,
        // Row 8: shear Fz at j
        0.0,       0.0,          -12.0*eiy_l3,  0.0,    6.0*eiy_l2,    0.0,          0.0,       0.0,          12.0*eiy_l3,   0.0,    6.0*eiy_l2,    0.0,
        // Row 9: torsion at j
        0.0,       0.0,          0.0,           -gj_l,  0.0,           0.0,          0.0,       0.0,          0.0,           gj_l,   0.0,           0.0,
        // Row 10: moment My at j
        0.0,       0.0,          -6.0*eiy_l2,   0.0,    2.0*eiy_l,     0.0,          0.0,       0.0,          6.0*eiy_l2,    0.0,    4.0*eiy_l,     0.0,
        // Row 11: moment Mz at j
        0.0,       6.0*eiz_l2,   0.0,           0.0,    0.0,           2.0*eiz_l,    0.0,       -6.0*eiz_l2,  0.0,           0.0,    0.0,           4.0*eiz_l,
    ];

    Mat12::from_row_slice(&data)
}

/// Compute the geometric stiffness matrix for P-Delta analysis
///
/// # Arguments
/// * `p` - Axial force (positive = tension, which stiffens the member)
/// * `a` - Cross-sectional area
/// * `iy` - Moment of inertia about y
/// * `iz` - Moment of inertia about z
/// * `length` - Member length
pub fn member_geometric_stiffness(p: f64, a: f64, iy: f64, iz: f64, length: f64) -> Mat12 {
    if p.abs() < 1e-10 {
        return Mat12::zeros();
    }

    let l = length;
    let l2 = l * l;
    let ip = iy + iz;

    let p_l = p / l;

    #[rustfmt::skip]
    let data = [
        p_l,        0.0,         0.0,          0.0,           0.0,             0.0,            -p_l,       0.0,         0.0,          0.0,           0.0,             0.0,
        0.0,        6.0*p_l/5.0, 0.0,          0.0,           0.0,             p_l*l/10.0,     0.0,        -6.0*p_l/5.0,0.0,          0.0,           0.0,             p_l*l/10.0,
        0.0,        0.0,         6.0*p_l/5.0,  0.0,           -p_l*l/10.0,     0.0,            0.0,        0.0,         -6.0*p_l/5.0, 0.0,           -p_l*l/10.0,     0.0,
        0.0,        0.0,         0.0,          p_l*ip/a,      0.0,             0.0,            0.0,        0.0,         0.0,          -p_l*ip/a,     0.0,             0.0,
        0.0,        0.0,         -p_l*l/10.0,  0.0,           2.0*p_l*l2/15.0, 0.0,            0.0,        0.0,         p_l*l/10.0,   0.0,           -p_l*l2/30.0,    0.0,
        0.0,        p_l*l/10.0,  0.0,          0.0,           0.0,             2.0*p_l*l2/15.0,0.0,        -p_l*l/10.0, 0.0,          0.0,           0.0,             -p_l*l2/30.0,
        -p_l,       0.0,         0.0,          0.0,           0.0,             0.0,            p_l,        0.0,         0.0,          0.0,           0.0,             0.0,
        0.0,        -6.0*p_l/5.0,0.0,          0.0,           0.0,             -p_l*l/10.0,    0.0,        6.0*p_l/5.0, 0.0,          0.0,           0.0,             -p_l*l/10.0,
        0.0,        0.0,         -6.0*p_l/5.0, 0.0,           p_l*l/10.0,      0.0,            0.0,        0.0,         6.0*p_l/5.0,  0.0,           p_l*l/10.0,      0.0,
        0.0,        0.0,         0.0,          -p_l*ip/a,     0.0,             0.0,            0.0,        0.0,         0.0,          p_l*ip/a,      0.0,             0.0,
        0.0,        0.0,         -p_l*l/10.0,  0.0,           -p_l*l2/30.0,    0.0,            0.0,        0.0,         p_l*l/10.0,   0.0,           2.0*p_l*l2/15.0, 0.0,
        0.0,        p_l*l/10.0,  0.0,          0.0,           0.0,             -p_l*l2/30.0,   0.0,        -p_l*l/10.0, 0.0,          0.0,           0.0,             2.0*p_l*l2/15.0,
    ];

    Mat12::from_row_slice(&data)
}

/// Unreleased (1) and released (2) local DOF index lists
fn release_partition(releases: &[bool; 12]) -> (std::vec::Vec<usize>, std::vec::Vec<usize>) {
    (0..12).partition(|&i| !releases[i])
}

/// Pull the k12 and inv(k22) blocks out of a member stiffness matrix
fn release_blocks(
    k: &Mat12,
    unreleased: &[usize],
    released: &[usize],
) -> FEAResult<(Mat, Mat)> {
    let k12 = Mat::from_fn(unreleased.len(), released.len(), |r, c| {
        k[(unreleased[r], released[c])]
    });
    let k22 = Mat::from_fn(released.len(), released.len(), |r, c| {
        k[(released[r], released[c])]
    });

    let k22_inv = k22.try_inverse().ok_or_else(|| {
        FEAError::InvalidInput(
            "member end releases leave the member without stiffness".to_string(),
        )
    })?;

    Ok((k12, k22_inv))
}

/// Apply static condensation for released DOFs
///
/// Released rows and columns of the result are zero.
///
/// # Arguments
/// * `k` - Full stiffness matrix
/// * `releases` - Boolean array indicating which DOFs are released
pub fn apply_releases(k: &Mat12, releases: &[bool; 12]) -> FEAResult<Mat12> {
    let (unreleased, released) = release_partition(releases);
    if released.is_empty() {
        return Ok(*k);
    }

    let (k12, k22_inv) = release_blocks(k, &unreleased, &released)?;
    let k11 = Mat::from_fn(unreleased.len(), unreleased.len(), |r, c| {
        k[(unreleased[r], unreleased[c])]
    });
    let k21 = k12.transpose();

    // k_cond = k11 - k12 * inv(k22) * k21
    let k_condensed = &k11 - &k12 * &k22_inv * &k21;

    let mut k_result = Mat12::zeros();
    for (r, &ur) in unreleased.iter().enumerate() {
        for (c, &uc) in unreleased.iter().enumerate() {
            k_result[(ur, uc)] = k_condensed[(r, c)];
        }
    }

    Ok(k_result)
}

/// Apply static condensation to the fixed end reaction vector for released DOFs
///
/// `fer_condensed = fer1 - k12 * inv(k22) * fer2`, released entries are zero.
///
/// # Arguments
/// * `fer` - Uncondensed fixed end reaction vector
/// * `k` - Uncondensed local stiffness matrix
/// * `releases` - Boolean array indicating which DOFs are released
pub fn apply_fer_releases(fer: &Vec12, k: &Mat12, releases: &[bool; 12]) -> FEAResult<Vec12> {
    let (unreleased, released) = release_partition(releases);
    if released.is_empty() {
        return Ok(*fer);
    }

    let (k12, k22_inv) = release_blocks(k, &unreleased, &released)?;
    let fer1 = DVector::from_iterator(unreleased.len(), unreleased.iter().map(|&i| fer[i]));
    let fer2 = DVector::from_iterator(released.len(), released.iter().map(|&i| fer[i]));

    let fer_condensed = &fer1 - &k12 * &k22_inv * &fer2;

    let mut fer_result = Vec12::zeros();
    for (r, &ur) in unreleased.iter().enumerate() {
        fer_result[ur] = fer_condensed[r];
    }

    Ok(fer_result)
}

/// Recover the member-end displacements at released DOFs
///
/// A released DOF is free of the node it frames into, so its value follows
/// from the released rows of `k d + fer = 0`:
/// `d2 = -inv(k22) * (k21 * d1 + fer2)`.
pub fn recover_released_displacements(
    d: &Vec12,
    k: &Mat12,
    fer: &Vec12,
    releases: &[bool; 12],
) -> FEAResult<Vec12> {
    let (unreleased, released) = release_partition(releases);
    if released.is_empty() {
        return Ok(*d);
    }

    let (k12, k22_inv) = release_blocks(k, &unreleased, &released)?;
    let k21 = k12.transpose();
    let d1 = DVector::from_iterator(unreleased.len(), unreleased.iter().map(|&i| d[i]));
    let fer2 = DVector::from_iterator(released.len(), released.iter().map(|&i| fer[i]));

    let d2 = -(&k22_inv * (&k21 * &d1 + &fer2));

    let mut result = *d;
    for (r, &rr) in released.iter().enumerate() {
        result[rr] = d2[r];
    }
    Ok(result)
}

/// Zero the rows and columns of released DOFs
pub fn zero_released(k: &Mat12, releases: &[bool; 12]) -> Mat12 {
    let mut out = *k;
    for (i, &released) in releases.iter().enumerate() {
        if released {
            out.row_mut(i).fill(0.0);
            out.column_mut(i).fill(0.0);
        }
    }
    out
}

/// Hermite shape functions for transverse bending on [0, L]
///
/// Returns `[N_vi, N_thetai, N_vj, N_thetaj]` at `x`.
fn hermite(x: f64, l: f64) -> [f64; 4] {
    let s = x / l;
    let s2 = s * s;
    let s3 = s2 * s;
    [
        1.0 - 3.0 * s2 + 2.0 * s3,
        l * (s - 2.0 * s2 + s3),
        3.0 * s2 - 2.0 * s3,
        l * (s3 - s2),
    ]
}

/// Compute fixed end reactions for a point load or moment
///
/// # Arguments
/// * `p` - Load magnitude
/// * `a` - Distance from i-node to load
/// * `length` - Member length
/// * `direction` - Local load direction
pub fn fer_point_load(p: f64, a: f64, length: f64, direction: LoadDirection) -> Vec12 {
    let l = length;
    let b = l - a;
    let l2 = l * l;
    let l3 = l2 * l;

    let mut fer = Vec12::zeros();

    match direction {
        LoadDirection::Fx => {
            fer[0] = -p * b / l;
            fer[6] = -p * a / l;
        }
        LoadDirection::Fy => {
            fer[1] = -p * b * b * (3.0 * a + b) / l3;
            fer[5] = -p * a * b * b / l2;
            fer[7] = -p * a * a * (a + 3.0 * b) / l3;
            fer[11] = p * a * a * b / l2;
        }
        LoadDirection::Fz => {
            fer[2] = -p * b * b * (3.0 * a + b) / l3;
            fer[4] = p * a * b * b / l2;
            fer[8] = -p * a * a * (a + 3.0 * b) / l3;
            fer[10] = -p * a * a * b / l2;
        }
        LoadDirection::Mx => {
            fer[3] = -p * b / l;
            fer[9] = -p * a / l;
        }
        LoadDirection::My => {
            fer[2] = -6.0 * p * a * b / l3;
            fer[4] = p * b * (2.0 * a - b) / l2;
            fer[8] = 6.0 * p * a * b / l3;
            fer[10] = p * a * (2.0 * b - a) / l2;
        }
        LoadDirection::Mz => {
            fer[1] = 6.0 * p * a * b / l3;
            fer[5] = p * b * (2.0 * a - b) / l2;
            fer[7] = -6.0 * p * a * b / l3;
            fer[11] = p * a * (2.0 * b - a) / l2;
        }
    }

    fer
}

/// Compute fixed end reactions for a linearly varying distributed load
///
/// The load varies from `w1` at `x1` to `w2` at `x2`. Work-equivalent end
/// forces are integrated from the element shape functions, so partial-length
/// and triangular loads need no special cases.
///
/// # Arguments
/// * `w1`, `w2` - Intensity at the start and end of the loaded region
/// * `x1`, `x2` - Start and end of the loaded region, measured from the i-node
/// * `length` - Member length
/// * `direction` - Local load direction (Fx, Fy or Fz)
pub fn fer_linear_load(
    w1: f64,
    w2: f64,
    x1: f64,
    x2: f64,
    length: f64,
    direction: LoadDirection,
) -> Vec12 {
    let l = length;
    let mut fer = Vec12::zeros();
    if x2 - x1 <= 0.0 {
        return fer;
    }

    let w = |x: f64| w1 + (w2 - w1) * (x - x1) / (x2 - x1);

    match direction {
        LoadDirection::Fx => {
            fer[0] = -gauss3(x1, x2, |x| w(x) * (1.0 - x / l));
            fer[6] = -gauss3(x1, x2, |x| w(x) * x / l);
        }
        LoadDirection::Fy => {
            for (k, &dof) in [1usize, 5, 7, 11].iter().enumerate() {
                fer[dof] = -gauss3(x1, x2, |x| w(x) * hermite(x, l)[k]);
            }
        }
        LoadDirection::Fz => {
            // Rotation about local y is -dw/dx, so the rotational shape functions flip sign
            for (k, (&dof, sign)) in [2usize, 4, 8, 10]
                .iter()
                .zip([1.0, -1.0, 1.0, -1.0])
                .enumerate()
            {
                fer[dof] = -sign * gauss3(x1, x2, |x| w(x) * hermite(x, l)[k]);
            }
        }
        LoadDirection::Mx | LoadDirection::My | LoadDirection::Mz => {}
    }

    fer
}

/// Solve a linear system using LU decomposition
pub fn solve_linear_system(a: &Mat, b: &Vec) -> Option<Vec> {
    a.clone().lu().solve(b)
}

/// Numerical rank of a matrix from its singular values
///
/// Singular values below `max(sigma) * max(rows, cols) * eps` are treated as zero.
pub fn matrix_rank(a: &Mat) -> usize {
    if a.nrows() == 0 || a.ncols() == 0 {
        return 0;
    }
    let sv = a.clone().svd(false, false).singular_values;
    let s_max = sv.iter().cloned().fold(0.0_f64, f64::max);
    let tol = s_max * a.nrows().max(a.ncols()) as f64 * f64::EPSILON;
    sv.iter().filter(|&&s| s > tol).count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    /// Equivalent point-moment fixed end reactions expressed through shape function slopes
    fn fer_moment_from_slopes(m: f64, a: f64, l: f64) -> [f64; 4] {
        let s = a / l;
        let s2 = s * s;
        let n = [
            (6.0 * s2 - 6.0 * s) / l,
            1.0 - 4.0 * s + 3.0 * s2,
            (6.0 * s - 6.0 * s2) / l,
            3.0 * s2 - 2.0 * s,
        ];
        [-m * n[0], -m * n[1], -m * n[2], -m * n[3]]
    }

    #[test]
    fn test_transformation_matrix_horizontal() {
        let i = [0.0, 0.0, 0.0];
        let j = [10.0, 0.0, 0.0];
        let t = member_transformation_matrix(&i, &j, None).unwrap();

        assert_relative_eq!(t[(0, 0)], 1.0, epsilon = 1e-10);
        assert_relative_eq!(t[(1, 1)], 1.0, epsilon = 1e-10);
        assert_relative_eq!(t[(2, 2)], 1.0, epsilon = 1e-10);
    }

    #[test]
    fn test_transformation_matrix_vertical() {
        let i = [0.0, 0.0, 0.0];
        let j = [0.0, 10.0, 0.0];
        let t = member_transformation_matrix(&i, &j, None).unwrap();

        assert_relative_eq!(t[(0, 1)], 1.0, epsilon = 1e-10); // local x = global Y
        assert_relative_eq!(t[(1, 0)], -1.0, epsilon = 1e-10); // local y = -global X
        assert_relative_eq!(t[(2, 2)], 1.0, epsilon = 1e-10); // local z = global Z
    }

    #[test]
    fn test_transformation_matrix_aux_node() {
        // Aux node above the member along +Z puts local z on global Z
        let i = [0.0, 0.0, 0.0];
        let j = [10.0, 0.0, 0.0];
        let aux = [5.0, 0.0, 3.0];
        let t = member_transformation_matrix(&i, &j, Some(&aux)).unwrap();

        assert_relative_eq!(t[(2, 2)], 1.0, epsilon = 1e-10);
        assert_relative_eq!(t[(1, 1)], 1.0, epsilon = 1e-10);

        // Aux node along +Y rolls the section: local z = global Y, local y = -global Z
        let aux = [5.0, 4.0, 0.0];
        let t = member_transformation_matrix(&i, &j, Some(&aux)).unwrap();
        assert_relative_eq!(t[(2, 1)], 1.0, epsilon = 1e-10);
        assert_relative_eq!(t[(1, 2)], -1.0, epsilon = 1e-10);
    }

    #[test]
    fn test_transformation_is_orthonormal_for_inclined_member() {
        let t = member_direction_cosines(&[1.0, 2.0, 3.0], &[4.0, 7.0, -1.0], None).unwrap();
        let should_be_identity = t * t.transpose();
        for r in 0..3 {
            for c in 0..3 {
                let expected = if r == c { 1.0 } else { 0.0 };
                assert_relative_eq!(should_be_identity[(r, c)], expected, epsilon = 1e-12);
            }
        }
        // Local z stays horizontal
        assert_relative_eq!(t[(2, 1)], 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_zero_length_and_collinear_aux_are_rejected() {
        assert!(member_transformation_matrix(&[1.0; 3], &[1.0; 3], None).is_err());
        assert!(member_transformation_matrix(
            &[0.0, 0.0, 0.0],
            &[10.0, 0.0, 0.0],
            Some(&[20.0, 0.0, 0.0])
        )
        .is_err());
    }

    #[test]
    fn test_local_stiffness_symmetry() {
        let k = member_local_stiffness(200e9, 77e9, 0.01, 1e-4, 2e-4, 1e-5, 10.0);

        for i in 0..12 {
            for j in 0..12 {
                assert_relative_eq!(k[(i, j)], k[(j, i)], epsilon = 1e-6);
            }
        }
    }

    #[test]
    fn test_geometric_stiffness_symmetry() {
        let kg = member_geometric_stiffness(-1500.0, 0.01, 1e-4, 2e-4, 4.0);
        assert_relative_eq!(kg, kg.transpose(), epsilon = 1e-9);
        assert!(kg[(1, 1)] < 0.0, "compression softens the member");
        assert_relative_eq!(kg[(11, 1)], kg[(1, 11)], epsilon = 1e-12);
        assert_relative_eq!(kg[(11, 7)], -kg[(1, 11)], epsilon = 1e-12);
    }

    #[test]
    fn test_uniform_load_fer_matches_textbook() {
        let (w, l) = (-12.0, 6.0);
        let fer = fer_linear_load(w, w, 0.0, l, l, LoadDirection::Fy);

        assert_relative_eq!(fer[1], -w * l / 2.0, epsilon = 1e-9);
        assert_relative_eq!(fer[7], -w * l / 2.0, epsilon = 1e-9);
        assert_relative_eq!(fer[5], -w * l * l / 12.0, epsilon = 1e-9);
        assert_relative_eq!(fer[11], w * l * l / 12.0, epsilon = 1e-9);

        let fer = fer_linear_load(w, w, 0.0, l, l, LoadDirection::Fz);
        assert_relative_eq!(fer[2], -w * l / 2.0, epsilon = 1e-9);
        assert_relative_eq!(fer[4], w * l * l / 12.0, epsilon = 1e-9);
        assert_relative_eq!(fer[10], -w * l * l / 12.0, epsilon = 1e-9);
    }

    #[test]
    fn test_triangular_load_fer_matches_textbook() {
        // Zero at i, w at j: end moments wL^2/30 and wL^2/20
        let (w, l) = (10.0, 5.0);
        let fer = fer_linear_load(0.0, w, 0.0, l, l, LoadDirection::Fy);

        assert_relative_eq!(fer[1], -3.0 * w * l / 20.0, epsilon = 1e-9);
        assert_relative_eq!(fer[7], -7.0 * w * l / 20.0, epsilon = 1e-9);
        assert_relative_eq!(fer[5], -w * l * l / 30.0, epsilon = 1e-9);
        assert_relative_eq!(fer[11], w * l * l / 20.0, epsilon = 1e-9);
    }

    #[test]
    fn test_point_load_fer_equals_concentrated_distributed_limit() {
        let (p, a, l) = (7.0, 1.5, 6.0);
        let fer = fer_point_load(p, a, l, LoadDirection::Fy);

        assert_relative_eq!(fer[1] + fer[7], -p, epsilon = 1e-12);
        assert_relative_eq!(fer[5], -p * a * (l - a).powi(2) / (l * l), epsilon = 1e-12);
    }

    #[test]
    fn test_point_moment_fer_matches_shape_function_slopes() {
        let (m, a, l) = (3.0, 2.0, 5.0);
        let fer = fer_point_load(m, a, l, LoadDirection::Mz);
        let expected = fer_moment_from_slopes(m, a, l);

        assert_relative_eq!(fer[1], expected[0], epsilon = 1e-12);
        assert_relative_eq!(fer[5], expected[1], epsilon = 1e-12);
        assert_relative_eq!(fer[7], expected[2], epsilon = 1e-12);
        assert_relative_eq!(fer[11], expected[3], epsilon = 1e-12);

        // My acts on the xz-plane where the rotational shape functions change sign
        let fer = fer_point_load(m, a, l, LoadDirection::My);
        assert_relative_eq!(fer[2], -expected[0], epsilon = 1e-12);
        assert_relative_eq!(fer[4], expected[1], epsilon = 1e-12);
        assert_relative_eq!(fer[8], -expected[2], epsilon = 1e-12);
        assert_relative_eq!(fer[10], expected[3], epsilon = 1e-12);
    }

    #[test]
    fn test_moment_release_condenses_to_propped_stiffness() {
        let (e, iz, l) = (1.0, 1.0, 1.0);
        let k = member_local_stiffness(e, 1.0, 1.0, 1.0, iz, 1.0, l);
        let mut releases = [false; 12];
        releases[11] = true;

        let kc = apply_releases(&k, &releases).unwrap();

        // Propped cantilever rotational stiffness at the fixed end is 3EI/L
        assert_relative_eq!(kc[(5, 5)], 3.0 * e * iz / l, epsilon = 1e-12);
        assert_relative_eq!(kc[(11, 11)], 0.0);
        assert_relative_eq!(kc[(1, 11)], 0.0);
    }

    #[test]
    fn test_released_displacement_recovery_zeroes_released_forces() {
        let k = member_local_stiffness(29000.0, 11400.0, 20.0, 100.0, 150.0, 250.0, 168.0);
        let fer = fer_point_load(-5.0, 84.0, 168.0, LoadDirection::Fy);
        let mut releases = [false; 12];
        releases[5] = true;
        let mut d = Vec12::zeros();
        d[7] = -0.01;
        d[11] = 0.002;

        let d_full = recover_released_displacements(&d, &k, &fer, &releases).unwrap();
        let f = k * d_full + fer;
        assert_relative_eq!(f[5], 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_matrix_rank_detects_singular() {
        let singular = Mat::from_row_slice(2, 2, &[1.0, -1.0, -1.0, 1.0]);
        let regular = Mat::from_row_slice(2, 2, &[2.0, -1.0, -1.0, 2.0]);
        assert_eq!(matrix_rank(&singular), 1);
        assert_eq!(matrix_rank(&regular), 2);
    }

    #[test]
    fn test_gauss3_is_exact_for_quintic() {
        let integral = gauss3(0.0, 2.0, |x| x.powi(5));
        assert_relative_eq!(integral, 64.0 / 6.0, epsilon = 1e-12);
    }
}
