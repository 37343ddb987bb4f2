pub mod charge;
pub mod special;

pub use charge::{
    HarmonicOscillatorDensity, ShellOccupancy, fit_modified_gaussian, modified_gaussian_r2_ratio,
    modified_gaussian_r4_ratio, shell_filling, valence_shell,
};
pub use special::{
    IntegrationError, dilogarithm, ln_gamma, ln_gamma_complex, simpson_function,
    simpson_samples, spence,
};

fn kahan_add(sum: &mut f64, correction: &mut f64, value: f64) {
    let corrected = value - *correction;
    let next = *sum + corrected;
    *correction = (next - *sum) - corrected;
    *sum = next;
}

/// Compensated summation of `values`.
pub fn stable_sum(values: impl IntoIterator<Item = f64>) -> f64 {
    let mut sum = 0.0;
    let mut correction = 0.0;

    for value in values {
        kahan_add(&mut sum, &mut correction, value);
    }

    sum
}

/// Minimises a unimodal `objective` on `[lower, upper]` by golden-section search.
pub fn golden_section_minimize<F>(objective: F, lower: f64, upper: f64, tolerance: f64) -> f64
where
    F: Fn(f64) -> f64,
{
    let inverse_phi = (5.0_f64.sqrt() - 1.0) / 2.0;
    let (mut a, mut b) = (lower, upper);
    let mut c = b - inverse_phi * (b - a);
    let mut d = a + inverse_phi * (b - a);
    let mut fc = objective(c);
    let mut fd = objective(d);

    for _ in 0..200 {
        if (b - a).abs() <= tolerance {
            break;
        }
        if fc < fd {
            b = d;
            d = c;
            fd = fc;
            c = b - inverse_phi * (b - a);
            fc = objective(c);
        } else {
            a = c;
            c = d;
            fc = fd;
            d = a + inverse_phi * (b - a);
            fd = objective(d);
        }
    }

    (a + b) / 2.0
}
