/// A dense per-pixel coordinate map with shape (rows, cols), stored row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct CoordinateMap {
    /// Number of rows of the map.
    pub rows: usize,
    /// Number of columns of the map.
    pub cols: usize,
    /// The x coordinates.
    pub map_x: Vec<f32>,
    /// The y coordinates.
    pub map_y: Vec<f32>,
}

/// Create a meshgrid of x and y coordinates by evaluating `f` at every (col, row).
///
/// # Arguments
///
/// * `cols` - The number of columns indicating the width of the grid
/// * `rows` - The number of rows indicating the height of the grid
/// * `f` - Maps a grid position to the coordinates to store
///
/// # Returns
///
/// A [`CoordinateMap`] of shape (rows, cols).
pub fn meshgrid_from_fn(
    cols: usize,
    rows: usize,
    f: impl Fn(usize, usize) -> (f32, f32),
) -> CoordinateMap {
    let mut map_x = Vec::with_capacity(rows * cols);
    let mut map_y = Vec::with_capacity(rows * cols);

    for r in 0..rows {
        for c in 0..cols {
            let (x, y) = f(c, r);
            map_x.push(x);
            map_y.push(y);
        }
    }

    CoordinateMap {
        rows,
        cols,
        map_x,
        map_y,
    }
}
