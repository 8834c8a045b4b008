use crate::tables::{GRADIENTS_2D, HASH_MUL, RAND_VECS_2D};

// All arithmetic here wraps: the hash relies on i32 overflow.

// Mix a seed with two primed lattice coordinates
#[inline(always)]
pub fn hash2(seed: i32, x_primed: i32, y_primed: i32) -> i32 {
    (seed ^ x_primed ^ y_primed).wrapping_mul(HASH_MUL)
}

// Hashed lattice value in [-1, 1]
#[inline(always)]
pub fn val_coord(seed: i32, x_primed: i32, y_primed: i32) -> f64 {
    let hash = hash2(seed, x_primed, y_primed);
    let hash = hash.wrapping_mul(hash);
    let hash = hash ^ (hash << 19);
    (hash as f32 * (1.0 / 2147483648.0)) as f64
}

// Dot product of the hashed gradient with the offset (xd, yd)
#[inline(always)]
pub fn grad_coord(seed: i32, x_primed: i32, y_primed: i32, xd: f64, yd: f64) -> f64 {
    let hash = hash2(seed, x_primed, y_primed);
    let hash = hash ^ (hash >> 15);
    let index = (hash & (127 << 1)) as usize;

    xd * GRADIENTS_2D[index] as f64 + yd * GRADIENTS_2D[index | 1] as f64
}

// Hashed random unit vector, used by the reduced simplex warp
#[inline(always)]
pub fn grad_coord_out(seed: i32, x_primed: i32, y_primed: i32) -> (f64, f64) {
    let index = (hash2(seed, x_primed, y_primed) & (255 << 1)) as usize;
    (RAND_VECS_2D[index] as f64, RAND_VECS_2D[index | 1] as f64)
}

// Gradient dot product scaled along a second, independently hashed random vector
#[inline(always)]
pub fn grad_coord_dual(seed: i32, x_primed: i32, y_primed: i32, xd: f64, yd: f64) -> (f64, f64) {
    let hash = hash2(seed, x_primed, y_primed);
    let index1 = (hash & (127 << 1)) as usize;
    let index2 = ((hash >> 7) & (255 << 1)) as usize;

    let value = xd * GRADIENTS_2D[index1] as f64 + yd * GRADIENTS_2D[index1 | 1] as f64;
    (
        value * RAND_VECS_2D[index2] as f64,
        value * RAND_VECS_2D[index2 | 1] as f64,
    )
}
