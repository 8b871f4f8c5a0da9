/// Clamp `v` into `[0, 1]`, mapping non-finite input to `0`.
pub(crate) fn clamp_unit(v: f64) -> f64 {
    if v.is_finite() { v.clamp(0.0, 1.0) } else { 0.0 }
}

/// Position of `v` between `a` and `b`, clamped to `[0, 1]`.
///
/// A degenerate span (`b <= a`) returns `0` for `v < b` and `1` otherwise.
pub(crate) fn inv_lerp_clamped(a: f64, b: f64, v: f64) -> f64 {
    let span = b - a;
    if span.is_nan() || span <= 0.0 {
        return if v < b { 0.0 } else { 1.0 };
    }
    clamp_unit((v - a) / span)
}

pub(crate) fn approx_eq(a: f64, b: f64, eps: f64) -> bool {
    (a - b).abs() <= eps
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
