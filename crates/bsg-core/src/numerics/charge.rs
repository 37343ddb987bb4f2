//! Nuclear charge distributions.
//!
//! A harmonic-oscillator shell-model density is built by filling proton
//! shells in order, and a modified-Gaussian profile `(1 + h·x²)·exp(-x²)`
//! with the same rms radius is fitted to it. The fitted `h` feeds the
//! shape-dependent electrostatic and isovector corrections.

use super::golden_section_minimize;
use super::special::ln_gamma;
use super::stable_sum;
use std::f64::consts::PI;

const FIT_GRID_POINTS: usize = 400;
const FIT_GRID_EXTENT: f64 = 3.5;
const FIT_UPPER_BOUND: f64 = 10.0;
const FIT_TOLERANCE: f64 = 1.0e-9;

/// Occupation of one `(n, l)` oscillator level, `major = 2n + l`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShellOccupancy {
    pub n: u32,
    pub l: u32,
    pub major: u32,
    pub occupancy: f64,
}

/// Fills `particles` nucleons of one kind into oscillator major shells.
///
/// A partially filled major shell spreads its nucleons over the `(n, l)`
/// levels in proportion to their degeneracy `2(2l + 1)`.
pub fn shell_filling(particles: u32) -> Vec<ShellOccupancy> {
    let mut shells = Vec::new();
    let mut remaining = particles;
    let mut major = 0;

    while remaining > 0 {
        let capacity = (major + 1) * (major + 2);
        let placed = remaining.min(capacity);
        let fraction = f64::from(placed) / f64::from(capacity);
        for l in (major % 2..=major).rev().step_by(2) {
            shells.push(ShellOccupancy {
                n: (major - l) / 2,
                l,
                major,
                occupancy: f64::from(2 * (2 * l + 1)) * fraction,
            });
        }
        remaining -= placed;
        major += 1;
    }

    shells
}

/// Major shell holding the last of `particles` nucleons.
pub fn valence_shell(particles: u32) -> u32 {
    let mut filled = 0;
    let mut major = 0;
    loop {
        filled += (major + 1) * (major + 2);
        if filled >= particles {
            return major;
        }
        major += 1;
    }
}

/// `⟨r²⟩/a²` of the modified-Gaussian density with shape parameter `h`.
pub fn modified_gaussian_r2_ratio(h: f64) -> f64 {
    3.0 * (2.0 + 5.0 * h) / (2.0 * (2.0 + 3.0 * h))
}

/// `⟨r⁴⟩/⟨r²⟩²` of the modified-Gaussian density.
pub fn modified_gaussian_r4_ratio(h: f64) -> f64 {
    5.0 * (2.0 + 7.0 * h) * (2.0 + 3.0 * h) / (3.0 * (2.0 + 5.0 * h).powi(2))
}

/// Modified-Gaussian density normalised to `charge`, with width `a`.
pub fn modified_gaussian_density(r: f64, a: f64, h: f64, charge: f64) -> f64 {
    let x2 = (r / a).powi(2);
    charge * (1.0 + h * x2) * (-x2).exp() / (PI.powf(1.5) * a.powi(3) * (1.0 + 1.5 * h))
}

#[derive(Debug, Clone, PartialEq)]
pub struct HarmonicOscillatorDensity {
    oscillator_length: f64,
    shells: Vec<ShellOccupancy>,
}

impl HarmonicOscillatorDensity {
    /// Shell-model density of `particles` nucleons whose rms radius is `rms`.
    pub fn new(particles: u32, rms: f64) -> Option<Self> {
        if particles == 0 || !(rms > 0.0) {
            return None;
        }
        let shells = shell_filling(particles);
        let weighted = stable_sum(
            shells
                .iter()
                .map(|shell| shell.occupancy * (f64::from(shell.major) + 1.5)),
        );
        let oscillator_length = (rms * rms * f64::from(particles) / weighted).sqrt();
        Some(Self {
            oscillator_length,
            shells,
        })
    }

    pub fn oscillator_length(&self) -> f64 {
        self.oscillator_length
    }

    pub fn shells(&self) -> &[ShellOccupancy] {
        &self.shells
    }

    /// Number density at radius `r`, integrating to the particle count.
    pub fn density(&self, r: f64) -> f64 {
        stable_sum(
            self.shells
                .iter()
                .map(|shell| shell.occupancy * radial_probability(shell.n, shell.l, self.oscillator_length, r)),
        ) / (4.0 * PI)
    }
}

/// `|R_nl(r)|²` of the normalised oscillator radial function.
fn radial_probability(n: u32, l: u32, b: f64, r: f64) -> f64 {
    let x = r / b;
    let alpha = f64::from(l) + 0.5;
    let ln_norm = 2.0_f64.ln() + ln_gamma(f64::from(n) + 1.0)
        - 3.0 * b.ln()
        - ln_gamma(f64::from(n) + alpha + 1.0);
    let laguerre = generalized_laguerre(n, alpha, x * x);
    ln_norm.exp() * x.powi(2 * l as i32) * (-x * x).exp() * laguerre * laguerre
}

fn generalized_laguerre(n: u32, alpha: f64, t: f64) -> f64 {
    if n == 0 {
        return 1.0;
    }
    let mut previous = 1.0;
    let mut current = 1.0 + alpha - t;
    for k in 1..n {
        let k = f64::from(k);
        let next = ((2.0 * k + 1.0 + alpha - t) * current - (k + alpha) * previous) / (k + 1.0);
        previous = current;
        current = next;
    }
    current
}

/// Fits the modified-Gaussian parameter `h` to the oscillator density of `z`
/// protons with rms radius `rms`.
///
/// Both profiles share the rms radius; `h` minimises the squared difference
/// of `r²ρ(r)` on a radial grid. Returns 0 for a single Gaussian shell.
pub fn fit_modified_gaussian(z: i32, rms: f64) -> f64 {
    let Ok(protons) = u32::try_from(z) else {
        return 0.0;
    };
    let Some(reference) = HarmonicOscillatorDensity::new(protons, rms) else {
        return 0.0;
    };
    if reference.shells.iter().all(|shell| shell.major == 0) {
        return 0.0;
    }

    let charge = f64::from(protons);
    let step = FIT_GRID_EXTENT * rms / FIT_GRID_POINTS as f64;
    let grid: Vec<(f64, f64)> = (0..=FIT_GRID_POINTS)
        .map(|index| {
            let r = step * index as f64;
            (r, reference.density(r))
        })
        .collect();

    let objective = |h: f64| {
        let a = rms / modified_gaussian_r2_ratio(h).sqrt();
        stable_sum(grid.iter().map(|&(r, density)| {
            let residual = density - modified_gaussian_density(r, a, h, charge);
            r.powi(4) * residual * residual
        }))
    };

    let h = golden_section_minimize(objective, 0.0, FIT_UPPER_BOUND, FIT_TOLERANCE);
    tracing::debug!(z, rms, h, "fitted modified-Gaussian charge distribution");
    h
}

#[cfg(test)]
mod tests {
    use super::{
        HarmonicOscillatorDensity, fit_modified_gaussian, modified_gaussian_density,
        modified_gaussian_r2_ratio, modified_gaussian_r4_ratio, shell_filling, valence_shell,
    };
    use crate::numerics::special::simpson_function;
    use std::f64::consts::PI;

    #[test]
    fn shell_filling_respects_major_shell_capacities() {
        let shells = shell_filling(8);
        assert_eq!(shells.len(), 2);
        assert_eq!((shells[0].n, shells[0].l, shells[0].occupancy), (0, 0, 2.0));
        assert_eq!((shells[1].n, shells[1].l, shells[1].occupancy), (0, 1, 6.0));

        let partial = shell_filling(14);
        let sd: Vec<_> = partial.iter().filter(|shell| shell.major == 2).collect();
        assert_eq!(sd.len(), 2);
        let total: f64 = partial.iter().map(|shell| shell.occupancy).sum();
        assert!((total - 14.0).abs() < 1.0e-12);
        assert!(shell_filling(0).is_empty());
    }

    #[test]
    fn valence_shell_tracks_magic_numbers() {
        assert_eq!(valence_shell(1), 0);
        assert_eq!(valence_shell(2), 0);
        assert_eq!(valence_shell(3), 1);
        assert_eq!(valence_shell(8), 1);
        assert_eq!(valence_shell(20), 2);
        assert_eq!(valence_shell(21), 3);
    }

    #[test]
    fn oscillator_density_is_normalised_and_matches_rms() {
        let rms = 0.01;
        let density = HarmonicOscillatorDensity::new(20, rms).expect("density");
        let norm = simpson_function(|r| 4.0 * PI * r * r * density.density(r), 0.0, 5.0 * rms, 2000);
        let r2 = simpson_function(
            |r| 4.0 * PI * r.powi(4) * density.density(r),
            0.0,
            5.0 * rms,
            2000,
        );
        assert!((norm - 20.0).abs() < 1.0e-8);
        assert!((r2 / norm - rms * rms).abs() < 1.0e-12);
        assert!(HarmonicOscillatorDensity::new(0, rms).is_none());
    }

    #[test]
    fn closed_p_shell_is_an_exact_modified_gaussian() {
        // 0s² 0p⁶ gives ρ ∝ (1 + 2x²)e^{-x²}.
        let h = fit_modified_gaussian(8, 0.0095);
        assert!((h - 2.0).abs() < 1.0e-5, "h = {h}");
        assert_eq!(fit_modified_gaussian(1, 0.0095), 0.0);
        assert_eq!(fit_modified_gaussian(2, 0.0095), 0.0);
        assert_eq!(fit_modified_gaussian(-3, 0.0095), 0.0);
    }

    #[test]
    fn modified_gaussian_moments_match_numerical_integrals() {
        let (a, h) = (1.0, 1.7);
        let norm = simpson_function(
            |r| 4.0 * PI * r * r * modified_gaussian_density(r, a, h, 1.0),
            0.0,
            8.0,
            4000,
        );
        let r2 = simpson_function(
            |r| 4.0 * PI * r.powi(4) * modified_gaussian_density(r, a, h, 1.0),
            0.0,
            8.0,
            4000,
        );
        let r4 = simpson_function(
            |r| 4.0 * PI * r.powi(6) * modified_gaussian_density(r, a, h, 1.0),
            0.0,
            8.0,
            4000,
        );
        assert!((norm - 1.0).abs() < 1.0e-10);
        assert!((r2 - modified_gaussian_r2_ratio(h)).abs() < 1.0e-10);
        assert!((r4 / (r2 * r2) - modified_gaussian_r4_ratio(h)).abs() < 1.0e-9);
    }
}
