//! Homogeneous transform helpers.
//!
//! Matrices are `glam::DMat4`. Callers that think in row-major terms can build
//! one with [`from_rows`]. Quaternions use (w, x, y, z) here and are only
//! reordered to the renderer's (x, y, z, w) at the animation boundary
//! ([`js_quaternion`]).

pub use glam::{DMat4, DQuat, DVec3};

/// Build a transform from row-major rows (`rows[r][c]`).
pub fn from_rows(rows: [[f64; 4]; 4]) -> DMat4 {
    DMat4::from_cols_array_2d(&rows).transpose()
}

/// Row-major view of a transform (`rows[r][c]`).
pub fn to_rows(matrix: &DMat4) -> [[f64; 4]; 4] {
    matrix.transpose().to_cols_array_2d()
}

/// Rotation of `angle` radians about `axis` (normalized internally).
pub fn rotation_matrix(angle: f64, axis: DVec3) -> DMat4 {
    DMat4::from_axis_angle(axis.normalize(), angle)
}

pub fn translation_matrix(offset: DVec3) -> DMat4 {
    DMat4::from_translation(offset)
}

/// Extract the rotation of `matrix` as a unit quaternion in (w, x, y, z) order.
///
/// Scale is divided out of the axis columns first, so scaled transforms yield
/// the same rotation as their unscaled counterparts. Extraction branches on
/// the largest diagonal term, so rotations close to 180 degrees stay well
/// conditioned. The result is canonicalised to the `w >= 0` hemisphere so two
/// keyframes of the same orientation never differ by sign.
pub fn quaternion_from_matrix(matrix: &DMat4) -> [f64; 4] {
    let (_, rotation, _) = matrix.to_scale_rotation_translation();
    let q = rotation.normalize();
    let mut wxyz = [q.w, q.x, q.y, q.z];
    if needs_flip(&wxyz) {
        for c in wxyz.iter_mut() {
            *c = -*c;
        }
    }
    wxyz
}

fn needs_flip(wxyz: &[f64; 4]) -> bool {
    const EPS: f64 = 1e-12;
    if wxyz[0].abs() > EPS {
        return wxyz[0] < 0.0;
    }
    // half-turn: w is zero, pick the sign of the first non-zero axis term
    wxyz[1..]
        .iter()
        .find(|c| c.abs() > EPS)
        .is_some_and(|c| *c < 0.0)
}

/// Translation component: the top three entries of the fourth column.
pub fn js_position(matrix: &DMat4) -> [f64; 3] {
    matrix.w_axis.truncate().to_array()
}

/// Rotation as the renderer expects it: (x, y, z, w).
pub fn js_quaternion(matrix: &DMat4) -> [f64; 4] {
    let [w, x, y, z] = quaternion_from_matrix(matrix);
    [x, y, z, w]
}
