/// Round half-up to cents. Ties move towards positive infinity, so `-0.125` becomes `-0.12`.
pub fn round2(value: f64) -> f64 {
    (value * 100.0 + 0.5).floor() / 100.0
}

/// Ounces of silver one ounce of gold buys. `None` for a non-positive silver price.
pub fn gold_silver_ratio(gold_price: f64, silver_price: f64) -> Option<f64> {
    (silver_price > 0.0).then(|| gold_price / silver_price)
}

/// Relative move from `from` to `to`, in percent. `None` when `from` is zero.
pub fn percent_change(from: f64, to: f64) -> Option<f64> {
    (from != 0.0).then(|| (to - from) / from * 100.0)
}
