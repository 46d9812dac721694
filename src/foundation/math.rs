/// Non-negative remainder of `i` modulo `n` (`n > 0`).
#[inline]
pub(crate) fn wrap_index(i: i64, n: u32) -> u32 {
    i.rem_euclid(i64::from(n)) as u32
}

/// `x mod 1` in `[0, 1]`, also for negative `x`.
#[inline]
pub(crate) fn fract_pos(x: f64) -> f64 {
    (x - x.floor()).clamp(0.0, 1.0)
}

/// `round(lower * (1 - r) + upper * r)` for one 8-bit channel, ties to even.
#[inline]
pub(crate) fn lerp_u8(lower: u8, upper: u8, r: f64) -> u8 {
    let v = f64::from(lower) * (1.0 - r) + f64::from(upper) * r;
    v.round_ties_even().clamp(0.0, 255.0) as u8
}
