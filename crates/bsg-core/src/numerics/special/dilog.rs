use std::f64::consts::PI;

const SERIES_TOLERANCE: f64 = 1.0e-17;
const MAX_SERIES_TERMS: usize = 400;

/// Real dilogarithm `Li₂(x) = -∫₀ˣ ln(1 - t)/t dt` for `x ≤ 1`.
///
/// Arguments above one lie on the branch cut and return NaN.
pub fn dilogarithm(x: f64) -> f64 {
    let pi2_6 = PI * PI / 6.0;
    if x.is_nan() || x > 1.0 {
        return f64::NAN;
    }
    if x == 1.0 {
        return pi2_6;
    }
    if x == 0.0 {
        return 0.0;
    }
    if x < -1.0 {
        let log = (-x).ln();
        return -pi2_6 - 0.5 * log * log - dilogarithm(1.0 / x);
    }
    if x < -0.5 {
        let log = (1.0 - x).ln();
        return -dilogarithm(x / (x - 1.0)) - 0.5 * log * log;
    }
    if x > 0.5 {
        return pi2_6 - x.ln() * (1.0 - x).ln() - dilogarithm(1.0 - x);
    }

    let mut sum = 0.0;
    let mut power = x;
    for k in 1..=MAX_SERIES_TERMS {
        let term = power / (k * k) as f64;
        sum += term;
        if term.abs() < SERIES_TOLERANCE {
            break;
        }
        power *= x;
    }
    sum
}

/// Spence function `L(x) = ∫₀ˣ ln(1 - t)/t dt`, as it appears in the
/// order-α radiative corrections.
pub fn spence(x: f64) -> f64 {
    -dilogarithm(x)
}
