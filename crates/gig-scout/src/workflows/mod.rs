pub mod intake;
pub mod market;
pub mod matching;

/// Round half away from zero to `decimals` places for display-stable scores.
pub(crate) fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}
