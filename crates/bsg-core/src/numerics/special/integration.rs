#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum IntegrationError {
    #[error("simpson integration requires at least 3 samples, got {actual}")]
    InsufficientPoints { actual: usize },
    #[error("simpson input length mismatch: x={x}, y={y}")]
    LengthMismatch { x: usize, y: usize },
    #[error("simpson abscissae must be strictly increasing, index {index} has {current} after {previous}")]
    NonIncreasingAbscissa {
        index: usize,
        previous: f64,
        current: f64,
    },
}

/// Composite Simpson rule over tabulated, possibly unevenly spaced samples.
///
/// Intervals are consumed in pairs with the three-point weights for unequal
/// spacing. An odd trailing interval is closed with the quadratic through
/// the last three samples, so the rule stays exact for quadratics.
pub fn simpson_samples(x: &[f64], y: &[f64]) -> Result<f64, IntegrationError> {
    if x.len() != y.len() {
        return Err(IntegrationError::LengthMismatch {
            x: x.len(),
            y: y.len(),
        });
    }
    if x.len() < 3 {
        return Err(IntegrationError::InsufficientPoints { actual: x.len() });
    }
    for (index, window) in x.windows(2).enumerate() {
        if !(window[1] > window[0]) {
            return Err(IntegrationError::NonIncreasingAbscissa {
                index: index + 1,
                previous: window[0],
                current: window[1],
            });
        }
    }

    let intervals = x.len() - 1;
    let paired = intervals - intervals % 2;
    let mut total = 0.0;

    for start in (0..paired).step_by(2) {
        let h0 = x[start + 1] - x[start];
        let h1 = x[start + 2] - x[start + 1];
        let sum = h0 + h1;
        total += sum / 6.0
            * ((2.0 - h1 / h0) * y[start]
                + sum * sum / (h0 * h1) * y[start + 1]
                + (2.0 - h0 / h1) * y[start + 2]);
    }

    if paired < intervals {
        let last = intervals;
        let h0 = x[last - 1] - x[last - 2];
        let h1 = x[last] - x[last - 1];
        let alpha = (2.0 * h1 * h1 + 3.0 * h0 * h1) / (6.0 * (h0 + h1));
        let beta = (h1 * h1 + 3.0 * h0 * h1) / (6.0 * h0);
        let eta = h1 * h1 * h1 / (6.0 * h0 * (h0 + h1));
        total += alpha * y[last] + beta * y[last - 1] - eta * y[last - 2];
    }

    Ok(total)
}

/// Simpson rule for a callable on `[lower, upper]`; `intervals` is rounded up to even.
pub fn simpson_function<F>(function: F, lower: f64, upper: f64, intervals: usize) -> f64
where
    F: Fn(f64) -> f64,
{
    let intervals = intervals.max(2).next_multiple_of(2);
    let step = (upper - lower) / intervals as f64;
    let mut total = function(lower) + function(upper);

    for index in 1..intervals {
        let weight = if index % 2 == 1 { 4.0 } else { 2.0 };
        total += weight * function(lower + step * index as f64);
    }

    total * step / 3.0
}
