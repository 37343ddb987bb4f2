use num_complex::Complex64;
use std::f64::consts::PI;

const LANCZOS_G: f64 = 7.0;
const LANCZOS_COEFFICIENTS: [f64; 9] = [
    0.999_999_999_999_809_93,
    676.520_368_121_885_1,
    -1_259.139_216_722_402_8,
    771.323_428_777_653_13,
    -176.615_029_162_140_59,
    12.507_343_278_686_905,
    -0.138_571_095_265_720_12,
    9.984_369_578_019_571_6e-6,
    1.505_632_735_149_311_6e-7,
];

/// Principal branch of `ln Γ(z)` (Lanczos, g = 7).
///
/// The real part is `ln |Γ(z)|` everywhere off the poles; the imaginary part
/// may differ from the continuous branch by multiples of 2π when the
/// reflection formula is used.
pub fn ln_gamma_complex(z: Complex64) -> Complex64 {
    if z.re < 0.5 {
        let reflected = ln_gamma_complex(Complex64::new(1.0, 0.0) - z);
        return Complex64::new(PI.ln(), 0.0) - (PI * z).sin().ln() - reflected;
    }

    let shifted = z - 1.0;
    let mut series = Complex64::new(LANCZOS_COEFFICIENTS[0], 0.0);
    for (index, coefficient) in LANCZOS_COEFFICIENTS.iter().enumerate().skip(1) {
        series += *coefficient / (shifted + index as f64);
    }
    let t = shifted + LANCZOS_G + 0.5;

    0.5 * (2.0 * PI).ln() + (shifted + 0.5) * t.ln() - t + series.ln()
}

/// `ln |Γ(x)|` for real arguments.
pub fn ln_gamma(x: f64) -> f64 {
    ln_gamma_complex(Complex64::new(x, 0.0)).re
}
