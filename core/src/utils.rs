// 2D height map: row‐major Vec<Vec<f64>> of size height×width
// access as `map[y][x]`.
pub type HeightMap2D = Vec<Vec<f64>>;

// flatten a 2D height map (row‐major) into a single Vec<f64>
// For handing a region to consumers that expect a flat buffer (tilemaps, images)
pub fn flatten2(map: &HeightMap2D) -> Vec<f64> {
    map.iter().flat_map(|row| row.iter().cloned()).collect()
}

// `num` evenly spaced samples over [start, end], both ends included
pub fn linspace(start: f64, end: f64, num: usize) -> Vec<f64> {
    match num {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (num - 1) as f64;
            let mut out: Vec<f64> = (0..num).map(|i| start + step * i as f64).collect();
            // Pin the last sample so rounding never drifts past `end`
            out[num - 1] = end;
            out
        }
    }
}

// Lattice cell containing `f` and the offset into it, in [0, 1).
// Floor, not truncation. The cell index wraps to i32 like every primed hash
// input; the offset is taken from the f64 floor so it stays exact.
#[inline(always)]
pub fn floor_cell(f: f64) -> (i32, f64) {
    let floor = f.floor();
    (floor as i64 as i32, f - floor)
}

// Linear interpolation
#[inline(always)]
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + t * (b - a)
}

// Smoothstep: 3t^2 − 2t^3
#[inline(always)]
pub fn interp_hermite(t: f64) -> f64 {
    t * t * (3.0 - 2.0 * t)
}

// Fade function as defined by Ken Perlin: 6t^5 − 15t^4 + 10t^3
// First and second derivatives are zero at t=0 and t=1
#[inline(always)]
pub fn interp_quintic(t: f64) -> f64 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

// Catmull-Rom style cubic through b (t=0) and c (t=1)
#[inline(always)]
pub fn cubic_lerp(a: f64, b: f64, c: f64, d: f64, t: f64) -> f64 {
    let p = (d - c) - (a - b);
    t * t * t * p + t * t * ((a - b) - p) + t * (c - a) + b
}

// Triangle wave with period 2, folding t into [0, 1]
#[inline(always)]
pub fn ping_pong(t: f64) -> f64 {
    let t = t - (t * 0.5).trunc() * 2.0;
    if t < 1.0 { t } else { 2.0 - t }
}
