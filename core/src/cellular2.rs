use crate::config::{CellularDistanceFunction, CellularReturnType};
use crate::hash::hash2;
use crate::tables::{PRIME_X, PRIME_Y, RAND_VECS_2D};

// Keeps a fully jittered feature point inside its own cell
const JITTER_SCALE: f64 = 0.43701595;

// Worley noise: distance to the nearest and second-nearest jittered cell centre
// among the 3x3 cells around (x, y). Returns roughly [−1, +1]
pub fn single_cellular(
    seed: i32,
    x: f64,
    y: f64,
    distance_function: CellularDistanceFunction,
    return_type: CellularReturnType,
    jitter: f64,
) -> f64 {
    // Nearest cell centre, not the containing cell. The centre stays in f64
    // for the offsets; only the hash inputs wrap.
    let xr = (x + 0.5).floor();
    let yr = (y + 0.5).floor();
    let xr_cell = xr as i64 as i32;
    let yr_cell = yr as i64 as i32;

    let mut distance0 = 1e10_f64;
    let mut distance1 = 1e10_f64;
    let mut closest_hash = 0i32;

    let cell_jitter = JITTER_SCALE * jitter;

    for dx in -1..=1 {
        let x_primed = xr_cell.wrapping_add(dx).wrapping_mul(PRIME_X);
        let cell_x = xr + dx as f64;
        for dy in -1..=1 {
            let y_primed = yr_cell.wrapping_add(dy).wrapping_mul(PRIME_Y);
            let cell_y = yr + dy as f64;
            let hash = hash2(seed, x_primed, y_primed);
            let index = (hash & (255 << 1)) as usize;

            let vec_x = (cell_x - x) + RAND_VECS_2D[index] as f64 * cell_jitter;
            let vec_y = (cell_y - y) + RAND_VECS_2D[index | 1] as f64 * cell_jitter;

            let new_distance = match distance_function {
                // Euclidean compares squared lengths, the sqrt comes later
                CellularDistanceFunction::Euclidean
                | CellularDistanceFunction::EuclideanSquared => vec_x * vec_x + vec_y * vec_y,
                CellularDistanceFunction::Manhattan => vec_x.abs() + vec_y.abs(),
                CellularDistanceFunction::Hybrid => {
                    (vec_x.abs() + vec_y.abs()) + (vec_x * vec_x + vec_y * vec_y)
                }
            };

            if new_distance < distance1 {
                if new_distance < distance0 {
                    distance1 = distance0;
                    distance0 = new_distance;
                    closest_hash = hash;
                } else {
                    distance1 = new_distance;
                }
            }
        }
    }

    // CellValue keeps the squared distances even for Euclidean; EuclideanSquared never roots
    if distance_function == CellularDistanceFunction::Euclidean
        && return_type >= CellularReturnType::Distance
    {
        distance0 = distance0.sqrt();
        if return_type >= CellularReturnType::Distance2 {
            distance1 = distance1.sqrt();
        }
    }

    match return_type {
        CellularReturnType::CellValue => closest_hash as f64 * (1.0 / 2147483648.0),
        CellularReturnType::Distance => distance0 - 1.0,
        CellularReturnType::Distance2 => distance1 - 1.0,
        CellularReturnType::Distance2Add => (distance1 + distance0) * 0.5 - 1.0,
        CellularReturnType::Distance2Sub => distance1 - distance0 - 1.0,
        CellularReturnType::Distance2Mul => distance1 * distance0 * 0.5 - 1.0,
        CellularReturnType::Distance2Div => {
            if distance1 != 0.0 {
                distance0 / distance1 - 1.0
            } else {
                -1.0
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const POINT: (f64, f64) = (3.7, -12.2);

    fn sample(df: CellularDistanceFunction, rt: CellularReturnType) -> f64 {
        single_cellular(1337, POINT.0, POINT.1, df, rt, 1.0)
    }

    #[test]
    fn euclidean_distance_is_root_of_squared() {
        let squared = sample(
            CellularDistanceFunction::EuclideanSquared,
            CellularReturnType::Distance,
        );
        let euclid = sample(
            CellularDistanceFunction::Euclidean,
            CellularReturnType::Distance,
        );
        assert!(((squared + 1.0).sqrt() - (euclid + 1.0)).abs() < 1e-12);
    }

    #[test]
    fn cell_value_ignores_distance_metric_roots() {
        // Same nearest cell, no sqrt applied in either case
        let euclid = sample(
            CellularDistanceFunction::Euclidean,
            CellularReturnType::CellValue,
        );
        let squared = sample(
            CellularDistanceFunction::EuclideanSquared,
            CellularReturnType::CellValue,
        );
        assert_eq!(euclid.to_bits(), squared.to_bits());
        assert!((-1.0..1.0).contains(&euclid));
    }

    #[test]
    fn distance2_never_below_distance() {
        for df in [
            CellularDistanceFunction::Euclidean,
            CellularDistanceFunction::EuclideanSquared,
            CellularDistanceFunction::Manhattan,
            CellularDistanceFunction::Hybrid,
        ] {
            let d0 = sample(df, CellularReturnType::Distance);
            let d1 = sample(df, CellularReturnType::Distance2);
            assert!(d1 >= d0, "{:?}: {} < {}", df, d1, d0);
            let sub = sample(df, CellularReturnType::Distance2Sub);
            assert!(sub >= -1.0);
            let div = sample(df, CellularReturnType::Distance2Div);
            assert!((-1.0..=0.0).contains(&div));
        }
    }

    #[test]
    fn zero_jitter_snaps_to_cell_centres() {
        // With no jitter the nearest centre of (0.2, 0.1) is the origin
        let d = single_cellular(
            5,
            0.2,
            0.1,
            CellularDistanceFunction::EuclideanSquared,
            CellularReturnType::Distance,
            0.0,
        );
        assert!((d - (0.2 * 0.2 + 0.1 * 0.1 - 1.0)).abs() < 1e-12);
    }

    #[test]
    fn large_coordinates_do_not_overflow() {
        for x in [2147483647.0, 3.0e9, -3.0e9, 5.0e12] {
            let d = single_cellular(
                1337,
                x,
                0.5,
                CellularDistanceFunction::Euclidean,
                CellularReturnType::Distance,
                1.0,
            );
            assert!((-1.0..=0.0).contains(&d), "distance {} at x={}", d, x);
        }
    }

    #[test]
    fn cells_wrap_like_the_hash() {
        // Cell indices wrap at 2^32, so shifting by 2^32 lands on the same cells
        let shift = 4294967296.0;
        for rt in [CellularReturnType::CellValue, CellularReturnType::Distance2Add] {
            let far = single_cellular(3, 3.0e9, 0.5, CellularDistanceFunction::Hybrid, rt, 1.0);
            let near =
                single_cellular(3, 3.0e9 - shift, 0.5, CellularDistanceFunction::Hybrid, rt, 1.0);
            assert_eq!(far.to_bits(), near.to_bits());
        }
    }
}
