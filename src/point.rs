/// A point in 3D integer space, e.g. an RGB colour with one coordinate per channel.
pub type Point = [i32; 3];

/// Number of coordinate axes of a [`Point`].
pub const DIMENSIONS: usize = 3;

/// Squared Euclidean distance between two points.
///
/// A per-axis difference of two `i32` values needs 33 bits and three squared differences
/// need 67, so the sum is accumulated in `i128`.
#[inline]
pub fn distance_sq(a: &Point, b: &Point) -> i128 {
    let mut d2 = 0i128;
    for i in 0..DIMENSIONS {
        let d = a[i] as i128 - b[i] as i128;
        d2 += d * d;
    }
    d2
}

/// Squared separation of two points along a single axis.
#[inline]
pub fn axis_distance_sq(a: &Point, b: &Point, axis: usize) -> i128 {
    let d = a[axis] as i128 - b[axis] as i128;
    d * d
}
