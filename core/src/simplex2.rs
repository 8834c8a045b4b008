use crate::hash::grad_coord;
use crate::tables::{PRIME_X, PRIME_Y};
use crate::utils::floor_cell;

// Approximate value of sqrt(3)
const SQRT_3: f64 = 1.7320508075688772935274463415059;
// Skewing/Unskewing factors for 2D simplex
// F2 compresses the square into a rhombus made of equilateral triangles
pub const F2: f64 = 0.5 * (SQRT_3 - 1.0);
// G2 reverses the skewing
pub const G2: f64 = (3.0 - SQRT_3) / 6.0;

const SIMPLEX_SCALE: f64 = 99.83685446303647;
const SIMPLEX_SMOOTH_SCALE: f64 = 18.24196194486065;

// Forward skew applied by the batch driver before either simplex sampler.
#[inline(always)]
pub fn skew(x: f64, y: f64) -> (f64, f64) {
    let t = (x + y) * F2;
    (x + t, y + t)
}

// OpenSimplex2 at a pre‐skewed coordinate. Returns roughly [−1, +1]
pub fn single_simplex(seed: i32, x: f64, y: f64) -> f64 {
    // Coordinates of the skewed cell we are in
    let (i, xi) = floor_cell(x);
    let (j, yi) = floor_cell(y);

    // Unskew back to get the relative position to the origin corner
    let t = (xi + yi) * G2;
    let x0 = xi - t;
    let y0 = yi - t;

    let i = i.wrapping_mul(PRIME_X);
    let j = j.wrapping_mul(PRIME_Y);

    let n0;
    let n1;
    let n2;

    // Contribution from corner 0 (circular radius of influence)
    let a = 0.5 - x0 * x0 - y0 * y0;
    if a <= 0.0 {
        n0 = 0.0;
    } else {
        n0 = (a * a) * (a * a) * grad_coord(seed, i, j, x0, y0);
    }

    // Far corner, its falloff derived from the first one
    let c = (2.0 * (1.0 - 2.0 * G2) * (1.0 / G2 - 2.0)) * t
        + ((-2.0 * (1.0 - 2.0 * G2) * (1.0 - 2.0 * G2)) + a);
    if c <= 0.0 {
        n2 = 0.0;
    } else {
        let x2 = x0 + (2.0 * G2 - 1.0);
        let y2 = y0 + (2.0 * G2 - 1.0);
        n2 = (c * c)
            * (c * c)
            * grad_coord(
                seed,
                i.wrapping_add(PRIME_X),
                j.wrapping_add(PRIME_Y),
                x2,
                y2,
            );
    }

    // Middle corner depends on which triangle (lower or upper) we are in
    if y0 > x0 {
        let x1 = x0 + G2;
        let y1 = y0 + (G2 - 1.0);
        let b = 0.5 - x1 * x1 - y1 * y1;
        if b <= 0.0 {
            n1 = 0.0;
        } else {
            n1 = (b * b) * (b * b) * grad_coord(seed, i, j.wrapping_add(PRIME_Y), x1, y1);
        }
    } else {
        let x1 = x0 + (G2 - 1.0);
        let y1 = y0 + G2;
        let b = 0.5 - x1 * x1 - y1 * y1;
        if b <= 0.0 {
            n1 = 0.0;
        } else {
            n1 = (b * b) * (b * b) * grad_coord(seed, i.wrapping_add(PRIME_X), j, x1, y1);
        }
    }

    (n0 + n1 + n2) * SIMPLEX_SCALE
}

// OpenSimplex2S ("smooth") at a pre‐skewed coordinate. Returns roughly [−1, +1]
// Larger kernel radius (2/3) and up to four contributing corners.
pub fn single_simplex_smooth(seed: i32, x: f64, y: f64) -> f64 {
    let (i, xi) = floor_cell(x);
    let (j, yi) = floor_cell(y);

    let i = i.wrapping_mul(PRIME_X);
    let j = j.wrapping_mul(PRIME_Y);
    let i1 = i.wrapping_add(PRIME_X);
    let j1 = j.wrapping_add(PRIME_Y);

    let t = (xi + yi) * G2;
    let x0 = xi - t;
    let y0 = yi - t;

    let a0 = (2.0 / 3.0) - x0 * x0 - y0 * y0;
    let mut value = (a0 * a0) * (a0 * a0) * grad_coord(seed, i, j, x0, y0);

    let a1 = (2.0 * (1.0 - 2.0 * G2) * (1.0 / G2 - 2.0)) * t
        + ((-2.0 * (1.0 - 2.0 * G2) * (1.0 - 2.0 * G2)) + a0);
    let x1 = x0 - (1.0 - 2.0 * G2);
    let y1 = y0 - (1.0 - 2.0 * G2);
    value += (a1 * a1) * (a1 * a1) * grad_coord(seed, i1, j1, x1, y1);

    // The two extra corners are picked asymmetrically from the position in the cell
    let xmyi = xi - yi;
    if t > G2 {
        if xi + xmyi > 1.0 {
            let x2 = x0 + (3.0 * G2 - 2.0);
            let y2 = y0 + (3.0 * G2 - 1.0);
            let a2 = (2.0 / 3.0) - x2 * x2 - y2 * y2;
            if a2 > 0.0 {
                value += (a2 * a2)
                    * (a2 * a2)
                    * grad_coord(seed, i.wrapping_add(PRIME_X << 1), j1, x2, y2);
            }
        } else {
            let x2 = x0 + G2;
            let y2 = y0 + (G2 - 1.0);
            let a2 = (2.0 / 3.0) - x2 * x2 - y2 * y2;
            if a2 > 0.0 {
                value += (a2 * a2) * (a2 * a2) * grad_coord(seed, i, j1, x2, y2);
            }
        }

        if yi - xmyi > 1.0 {
            let x3 = x0 + (3.0 * G2 - 1.0);
            let y3 = y0 + (3.0 * G2 - 2.0);
            let a3 = (2.0 / 3.0) - x3 * x3 - y3 * y3;
            if a3 > 0.0 {
                value += (a3 * a3)
                    * (a3 * a3)
                    * grad_coord(seed, i1, j.wrapping_add(PRIME_Y << 1), x3, y3);
            }
        } else {
            let x3 = x0 + (G2 - 1.0);
            let y3 = y0 + G2;
            let a3 = (2.0 / 3.0) - x3 * x3 - y3 * y3;
            if a3 > 0.0 {
                value += (a3 * a3) * (a3 * a3) * grad_coord(seed, i1, j, x3, y3);
            }
        }
    } else {
        if xi + xmyi < 0.0 {
            let x2 = x0 + (1.0 - G2);
            let y2 = y0 - G2;
            let a2 = (2.0 / 3.0) - x2 * x2 - y2 * y2;
            if a2 > 0.0 {
                value += (a2 * a2)
                    * (a2 * a2)
                    * grad_coord(seed, i.wrapping_sub(PRIME_X), j, x2, y2);
            }
        } else {
            let x2 = x0 + (G2 - 1.0);
            let y2 = y0 + G2;
            let a2 = (2.0 / 3.0) - x2 * x2 - y2 * y2;
            if a2 > 0.0 {
                value += (a2 * a2) * (a2 * a2) * grad_coord(seed, i1, j, x2, y2);
            }
        }

        if yi < xmyi {
            let x2 = x0 - G2;
            let y2 = y0 - (G2 - 1.0);
            let a2 = (2.0 / 3.0) - x2 * x2 - y2 * y2;
            if a2 > 0.0 {
                value += (a2 * a2)
                    * (a2 * a2)
                    * grad_coord(seed, i, j.wrapping_sub(PRIME_Y), x2, y2);
            }
        } else {
            let x2 = x0 + G2;
            let y2 = y0 + (G2 - 1.0);
            let a2 = (2.0 / 3.0) - x2 * x2 - y2 * y2;
            if a2 > 0.0 {
                value += (a2 * a2) * (a2 * a2) * grad_coord(seed, i, j1, x2, y2);
            }
        }
    }

    value * SIMPLEX_SMOOTH_SCALE
}
