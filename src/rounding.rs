/// Rounding primitives shared by the engine and the commission ladder
/// Plain f64 arithmetic so results line up with spreadsheet outputs

/// Round `value` to the nearest multiple of `step` (spreadsheet `MROUND`)
/// Halves round away from zero. A zero step returns `value` untouched.
pub fn round_to_nearest(value: f64, step: f64) -> f64 {
    if step == 0.0 {
        return value;
    }
    (value / step).round() * step
}

/// Greatest multiple of `step` not above `value`
pub fn floor_to_multiple(value: f64, step: f64) -> f64 {
    if step == 0.0 {
        return value;
    }
    (value / step).floor() * step
}
