/// Excess kurtosis of an exponential distribution with rate `lambda`.
///
/// The value does not depend on the rate: it is `6` for every finite
/// `lambda > 0` and `NaN` otherwise.
pub fn ekurtosis(lambda: f64) -> f64 {
    if !lambda.is_finite() || lambda <= 0.0 {
        return f64::NAN;
    }
    6.0
}
