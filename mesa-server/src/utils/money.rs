//! Money rounding
//!
//! All monetary values are rounded to 2 decimals at every aggregation step,
//! not only at the end. Successive roundings are not associative-safe, so
//! sums must re-round in stable (line) order to reproduce stored values.

/// Round a monetary value to 2 decimals. A small epsilon is added before
/// rounding to counter binary floating-point representation error
/// (0.285 * 100 = 28.499999...).
pub fn round_money(value: f64) -> f64 {
    ((value + f64::EPSILON) * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounds_to_cents() {
        assert_eq!(round_money(1.005), 1.01);
        assert_eq!(round_money(2.675), 2.68);
        assert_eq!(round_money(12.3449), 12.34);
        assert_eq!(round_money(0.0), 0.0);
    }

    #[test]
    fn counteracts_representation_error() {
        // 0.1 + 0.2 = 0.30000000000000004
        assert_eq!(round_money(0.1 + 0.2), 0.3);
        // 5.00 + 1.00 per unit, 2 units, 10% tax
        let unit = round_money(5.0 + 1.0);
        let sub = round_money(unit * 2.0);
        let tax = round_money(sub * 10.0 / 100.0);
        assert_eq!(sub, 12.0);
        assert_eq!(tax, 1.2);
        assert_eq!(round_money(sub + tax), 13.2);
    }
}
