use crate::hash::grad_coord;
use crate::tables::{PRIME_X, PRIME_Y};
use crate::utils::{floor_cell, interp_quintic, lerp};

// Empirical scale that stretches the gradient sum to roughly [−1, +1]
const PERLIN_SCALE: f64 = 1.4247691104677813;

// Raw single‐octave Perlin noise at (x, y)
// Coordinates are already frequency scaled. Returns roughly [−1, +1]
pub fn single_perlin(seed: i32, x: f64, y: f64) -> f64 {
    // Find unit square that contains point (Which square to sample?)
    // Relative x/y within the square, towards both near and far corners
    let (x0, xd0) = floor_cell(x);
    let (y0, yd0) = floor_cell(y);
    let xd1 = xd0 - 1.0;
    let yd1 = yd0 - 1.0;

    let xs = interp_quintic(xd0);
    let ys = interp_quintic(yd0);

    // Prime the lattice coordinates of the four corners
    let x0 = x0.wrapping_mul(PRIME_X);
    let y0 = y0.wrapping_mul(PRIME_Y);
    let x1 = x0.wrapping_add(PRIME_X);
    let y1 = y0.wrapping_add(PRIME_Y);

    let xf0 = lerp(
        grad_coord(seed, x0, y0, xd0, yd0),
        grad_coord(seed, x1, y0, xd1, yd0),
        xs,
    );
    let xf1 = lerp(
        grad_coord(seed, x0, y1, xd0, yd1),
        grad_coord(seed, x1, y1, xd1, yd1),
        xs,
    );

    // Interpolate the two results along y
    lerp(xf0, xf1, ys) * PERLIN_SCALE
}

#[cfg(test)]
mod tests {
    use super::single_perlin;

    #[test]
    fn perlin2_determinism() {
        // Same seed ⇒ same output
        let a = single_perlin(1234, 10.5, -3.7);
        let b = single_perlin(1234, 10.5, -3.7);
        assert_eq!(a.to_bits(), b.to_bits());
    }

    #[test]
    fn perlin2_zero_on_lattice() {
        // Every gradient is dotted with a zero offset at integer points
        for &(x, y) in &[(0.0, 0.0), (3.0, -7.0), (-120.0, 45.0)] {
            assert_eq!(single_perlin(99, x, y), 0.0);
        }
    }

    #[test]
    // Stays within [-1.0, 1.0] range
    fn perlin2_range() {
        for i in 0..2000 {
            let x = i as f64 * 0.173 - 150.0;
            let y = i as f64 * -0.311 + 80.0;
            let v = single_perlin(7, x, y);
            assert!(v.abs() <= 1.0 + 1e-6, "value {} out of range", v);
        }
    }

    #[test]
    fn perlin2_continuous_across_cell_edges() {
        let left = single_perlin(3, 4.0 - 1e-9, 2.5);
        let right = single_perlin(3, 4.0 + 1e-9, 2.5);
        assert!((left - right).abs() < 1e-6);
    }

    #[test]
    fn perlin2_past_i32_lattice() {
        // Lattice indices wrap at 2^32; offsets inside the cell do not
        let shift = 4294967296.0;
        for &x in &[5.0e9 + 0.25, -3.0e9 + 0.75, 2147483647.5] {
            let far = single_perlin(11, x, 0.25);
            assert!(far.abs() <= 1.0 + 1e-6, "value {} at x={}", far, x);
            let near = single_perlin(11, x - shift, 0.25);
            assert_eq!(far.to_bits(), near.to_bits());
        }
    }
}
