use faer::prelude::SpSolver;

use super::perspective::determinant3x3;
use birdseye_image::ImageError;

/// Twice the signed area of the triangle (a, b, c).
fn cross2d(a: &[f64; 2], b: &[f64; 2], c: &[f64; 2]) -> f64 {
    (b[0] - a[0]) * (c[1] - a[1]) - (b[1] - a[1]) * (c[0] - a[0])
}

fn has_collinear_triplet(pts: &[[f64; 2]; 4]) -> bool {
    const TRIPLETS: [[usize; 3]; 4] = [[0, 1, 2], [0, 1, 3], [0, 2, 3], [1, 2, 3]];
    TRIPLETS
        .iter()
        .any(|[i, j, k]| cross2d(&pts[*i], &pts[*j], &pts[*k]).abs() < 1e-9)
}

/// Compute the perspective transform mapping four source points onto four destination
/// points.
///
/// The correspondences are used in the given order: `src[i]` maps exactly onto `dst[i]`.
/// The 8 unknowns of the homography are solved with `h33 = 1` from the 8x8 linear system
///
/// ```text
/// [x y 1 0 0 0 -u*x -u*y] h = u
/// [0 0 0 x y 1 -v*x -v*y] h = v
/// ```
///
/// # Arguments
///
/// * `src` - The source points (x, y).
/// * `dst` - The destination points (u, v).
///
/// # Returns
///
/// The row-major 3x3 transform from src to dst.
///
/// # Errors
///
/// Returns [`ImageError::DegenerateCorrespondences`] when three points of either set are
/// collinear, or when the solution is not finite or not invertible.
pub fn get_perspective_transform(
    src: &[[f64; 2]; 4],
    dst: &[[f64; 2]; 4],
) -> Result<[f64; 9], ImageError> {
    if has_collinear_triplet(src) || has_collinear_triplet(dst) {
        return Err(ImageError::DegenerateCorrespondences(
            "three of the four points are collinear".to_string(),
        ));
    }

    // construct the augmented system [A | b]
    let mut rows = [[0.0f64; 9]; 8];
    for (i, ([x, y], [u, v])) in src.iter().zip(dst.iter()).enumerate() {
        rows[2 * i] = [*x, *y, 1.0, 0.0, 0.0, 0.0, -u * x, -u * y, *u];
        rows[2 * i + 1] = [0.0, 0.0, 0.0, *x, *y, 1.0, -v * x, -v * y, *v];
    }

    let mat_a = faer::Mat::<f64>::from_fn(8, 8, |i, j| rows[i][j]);
    let vec_b = faer::Mat::<f64>::from_fn(8, 1, |i, _| rows[i][8]);

    // solve -> h_mat: 8x1
    let h_mat = mat_a.partial_piv_lu().solve(vec_b);
    let h = h_mat.col(0);

    let m = [h[0], h[1], h[2], h[3], h[4], h[5], h[6], h[7], 1.0];

    if m.iter().any(|v| !v.is_finite()) {
        return Err(ImageError::DegenerateCorrespondences(
            "the linear solve produced non-finite values".to_string(),
        ));
    }

    let det = determinant3x3(&m);
    if det.abs() < 1e-12 {
        return Err(ImageError::DegenerateCorrespondences(format!(
            "determinant {det:e} is too small"
        )));
    }

    log::trace!("perspective transform: {m:?}");

    Ok(m)
}
