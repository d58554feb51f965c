use rayon::prelude::*;

use crate::interpolation::grid::CoordinateMap;
use birdseye_image::Image;

/// Apply a function to each destination pixel, row by row in parallel, with the source
/// coordinates stored for that pixel in `map`.
///
/// PRECONDITION: `map` has the same rows and cols as `dst`.
pub fn par_iter_rows_resample<const C: usize>(
    dst: &mut Image<f32, C>,
    map: &CoordinateMap,
    f: impl Fn(f32, f32, &mut [f32]) + Send + Sync,
) {
    let cols = dst.cols();

    dst.as_slice_mut()
        .par_chunks_exact_mut(C * cols)
        .zip(map.map_x.par_chunks_exact(cols))
        .zip(map.map_y.par_chunks_exact(cols))
        .for_each(|((dst_chunk, map_x_chunk), map_y_chunk)| {
            dst_chunk
                .chunks_exact_mut(C)
                .zip(map_x_chunk.iter().zip(map_y_chunk.iter()))
                .for_each(|(dst_pixel, (&x, &y))| {
                    f(x, y, dst_pixel);
                });
        });
}
