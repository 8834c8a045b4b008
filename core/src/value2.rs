use crate::hash::val_coord;
use crate::tables::{PRIME_X, PRIME_Y};
use crate::utils::{cubic_lerp, floor_cell, interp_hermite, lerp};

// Value noise: smoothstep blend of hashed corner values. Returns [−1, +1]
pub fn single_value(seed: i32, x: f64, y: f64) -> f64 {
    let (x0, xd) = floor_cell(x);
    let (y0, yd) = floor_cell(y);

    let xs = interp_hermite(xd);
    let ys = interp_hermite(yd);

    let x0 = x0.wrapping_mul(PRIME_X);
    let y0 = y0.wrapping_mul(PRIME_Y);
    let x1 = x0.wrapping_add(PRIME_X);
    let y1 = y0.wrapping_add(PRIME_Y);

    let xf0 = lerp(val_coord(seed, x0, y0), val_coord(seed, x1, y0), xs);
    let xf1 = lerp(val_coord(seed, x0, y1), val_coord(seed, x1, y1), xs);

    lerp(xf0, xf1, ys)
}

// Bicubic value noise over the surrounding 4x4 lattice points. Returns roughly [−1, +1]
pub fn single_value_cubic(seed: i32, x: f64, y: f64) -> f64 {
    let (x1, xs) = floor_cell(x);
    let (y1, ys) = floor_cell(y);

    let x1 = x1.wrapping_mul(PRIME_X);
    let y1 = y1.wrapping_mul(PRIME_Y);
    let x0 = x1.wrapping_sub(PRIME_X);
    let y0 = y1.wrapping_sub(PRIME_Y);
    let x2 = x1.wrapping_add(PRIME_X);
    let y2 = y1.wrapping_add(PRIME_Y);
    let x3 = x1.wrapping_add(PRIME_X.wrapping_mul(2));
    let y3 = y1.wrapping_add(PRIME_Y.wrapping_mul(2));

    // One cubic per lattice row, then a cubic across the rows
    let row = |yp: i32| {
        cubic_lerp(
            val_coord(seed, x0, yp),
            val_coord(seed, x1, yp),
            val_coord(seed, x2, yp),
            val_coord(seed, x3, yp),
            xs,
        )
    };

    cubic_lerp(row(y0), row(y1), row(y2), row(y3), ys) * (1.0 / (1.5 * 1.5))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_matches_corner_on_lattice() {
        let v = single_value(77, 3.0, -2.0);
        let corner = val_coord(77, 3i32.wrapping_mul(PRIME_X), (-2i32).wrapping_mul(PRIME_Y));
        assert_eq!(v, corner);
    }

    #[test]
    fn value_range() {
        for i in 0..3000 {
            let x = i as f64 * 0.071 - 90.0;
            let y = i as f64 * 0.043 + 12.0;
            let v = single_value(11, x, y);
            assert!((-1.0..=1.0).contains(&v));
            let c = single_value_cubic(11, x, y);
            assert!(c.abs() <= 1.0 + 1e-9, "cubic value {} out of range", c);
        }
    }

    #[test]
    fn value_cubic_determinism() {
        let a = single_value_cubic(5, -0.5, 0.25);
        let b = single_value_cubic(5, -0.5, 0.25);
        assert_eq!(a.to_bits(), b.to_bits());
    }
}
