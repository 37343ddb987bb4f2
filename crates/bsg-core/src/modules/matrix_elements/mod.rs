//! Nuclear matrix elements consumed by the shape factor.
//!
//! The nuclear-structure calculation is an external collaborator behind
//! [`MatrixElementProvider`]. [`derive_matrix_elements`] turns its answers,
//! or explicit overrides, into the form factors `c1`, `b`, `d` and the ratio
//! Λ = M121/M101 used by the correction pipeline.

use crate::common::config::{MatrixElementConfig, SingleParticleStateConfig, SpectrumConfig};
use crate::domain::Diagnostics;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum MatrixElementKind {
    Vector,
    Axial,
}

/// Selects the reduced matrix element `^{V/A}M_{KLs}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct MatrixElementIndex {
    pub kind: MatrixElementKind,
    pub k: u32,
    pub l: u32,
    pub s: u32,
}

impl MatrixElementIndex {
    /// Gamow-Teller matrix element `^A M_101`.
    pub const AXIAL_101: Self = Self::axial(1, 0, 1);
    /// `^A M_121`, entering the shape factor through Λ.
    pub const AXIAL_121: Self = Self::axial(1, 2, 1);

    pub const fn axial(k: u32, l: u32, s: u32) -> Self {
        Self {
            kind: MatrixElementKind::Axial,
            k,
            l,
            s,
        }
    }
}

/// Oscillator single-particle state `n l j`, with `n` starting at 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct SingleParticleState {
    pub n: u32,
    pub l: u32,
    pub two_j: u32,
}

impl SingleParticleState {
    pub const fn major_shell(&self) -> u32 {
        2 * self.n + self.l
    }
}

impl From<SingleParticleStateConfig> for SingleParticleState {
    fn from(config: SingleParticleStateConfig) -> Self {
        Self {
            n: config.n,
            l: config.l,
            two_j: config.two_j,
        }
    }
}

pub trait MatrixElementProvider {
    /// Reduced matrix element; NaN when it cannot be computed.
    fn reduced_matrix_element(&self, index: MatrixElementIndex) -> f64;

    /// Weak magnetism ratio b/Ac.
    fn weak_magnetism(&self) -> f64;

    /// Induced tensor ratio d/Ac.
    fn induced_tensor(&self) -> f64;

    /// Initial and final single-particle states of the decaying nucleon.
    fn single_particle_states(&self) -> Option<(SingleParticleState, SingleParticleState)> {
        None
    }
}

/// Provider serving fixed values from the `[matrix_elements]` table.
///
/// Unset values are reported as NaN so they go through the same recovery as
/// a failed nuclear-structure calculation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfiguredMatrixElements {
    m101: Option<f64>,
    m121: Option<f64>,
    weak_magnetism: Option<f64>,
    induced_tensor: Option<f64>,
    states: Option<(SingleParticleState, SingleParticleState)>,
}

impl ConfiguredMatrixElements {
    pub fn from_config(config: &MatrixElementConfig) -> Self {
        Self {
            m101: config.m101,
            m121: config.m121,
            weak_magnetism: config.weak_magnetism,
            induced_tensor: config.induced_tensor,
            states: config
                .initial_state
                .zip(config.final_state)
                .map(|(initial, last)| (initial.into(), last.into())),
        }
    }

    pub fn with_axial(mut self, m101: f64, m121: f64) -> Self {
        self.m101 = Some(m101);
        self.m121 = Some(m121);
        self
    }

    pub fn with_form_factor_ratios(mut self, weak_magnetism: f64, induced_tensor: f64) -> Self {
        self.weak_magnetism = Some(weak_magnetism);
        self.induced_tensor = Some(induced_tensor);
        self
    }

    pub fn with_states(mut self, initial: SingleParticleState, last: SingleParticleState) -> Self {
        self.states = Some((initial, last));
        self
    }
}

impl MatrixElementProvider for ConfiguredMatrixElements {
    fn reduced_matrix_element(&self, index: MatrixElementIndex) -> f64 {
        let value = if index == MatrixElementIndex::AXIAL_101 {
            self.m101
        } else if index == MatrixElementIndex::AXIAL_121 {
            self.m121
        } else {
            None
        };
        value.unwrap_or(f64::NAN)
    }

    fn weak_magnetism(&self) -> f64 {
        self.weak_magnetism.unwrap_or(f64::NAN)
    }

    fn induced_tensor(&self) -> f64 {
        self.induced_tensor.unwrap_or(f64::NAN)
    }

    fn single_particle_states(&self) -> Option<(SingleParticleState, SingleParticleState)> {
        self.states
    }
}

/// Values that replace the provider's answers when configured.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MatrixElementOverrides {
    pub lambda: Option<f64>,
    pub weak_magnetism: Option<f64>,
    pub induced_tensor: Option<f64>,
}

impl MatrixElementOverrides {
    pub fn from_spectrum(config: &SpectrumConfig) -> Self {
        Self {
            lambda: config.lambda,
            weak_magnetism: config.weak_magnetism,
            induced_tensor: config.induced_tensor,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Provenance {
    Given,
    Computed,
}

impl Provenance {
    fn of(value: Option<f64>) -> Self {
        if value.is_some() {
            Self::Given
        } else {
            Self::Computed
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Given => "given",
            Self::Computed => "computed",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DerivedMatrixElements {
    pub m101: f64,
    pub ratio_m121: f64,
    pub b_ac: f64,
    pub d_ac: f64,
    pub fc1: f64,
    pub fb: f64,
    pub fd: f64,
    pub lambda_provenance: Provenance,
    pub weak_magnetism_provenance: Provenance,
    pub induced_tensor_provenance: Provenance,
}

/// Resolves Λ, b/Ac and d/Ac and scales them into the form factors.
///
/// NaN ratios fall back to 0 and a vanishing M101 disables the induced
/// terms; both are recorded in `diagnostics`.
pub fn derive_matrix_elements(
    overrides: MatrixElementOverrides,
    provider: &dyn MatrixElementProvider,
    g_a: f64,
    mass_number: i32,
    diagnostics: &mut Diagnostics,
) -> DerivedMatrixElements {
    let mut m101 = 1.0;
    let mut ratio_m121 = match overrides.lambda {
        Some(lambda) => lambda,
        None => {
            m101 = provider.reduced_matrix_element(MatrixElementIndex::AXIAL_101);
            let m121 = provider.reduced_matrix_element(MatrixElementIndex::AXIAL_121);
            m121 / m101
        }
    };
    let mut b_ac = overrides
        .weak_magnetism
        .unwrap_or_else(|| provider.weak_magnetism());
    let mut d_ac = overrides
        .induced_tensor
        .unwrap_or_else(|| provider.induced_tensor());

    if b_ac.is_nan() {
        b_ac = 0.0;
        diagnostics.warn("MATRIX.NAN_WEAK_MAGNETISM", "b/Ac was NaN; setting it to 0");
    }
    if d_ac.is_nan() {
        d_ac = 0.0;
        diagnostics.warn("MATRIX.NAN_INDUCED_TENSOR", "d/Ac was NaN; setting it to 0");
    }
    if ratio_m121.is_nan() {
        ratio_m121 = 0.0;
        m101 = 1.0;
        diagnostics.warn(
            "MATRIX.NAN_RATIO",
            "M121/M101 was NaN; setting the ratio to 0 and M101 to 1",
        );
    }
    if m101 == 0.0 {
        b_ac = 0.0;
        d_ac = 0.0;
        ratio_m121 = 0.0;
        m101 = 1.0;
        diagnostics.warn(
            "MATRIX.ZERO_M101",
            "M101 is 0; setting b/Ac, d/Ac and M121/M101 to 0 and M101 to 1",
        );
    }

    let fc1 = g_a * m101;
    let a = f64::from(mass_number);
    let derived = DerivedMatrixElements {
        m101,
        ratio_m121,
        b_ac,
        d_ac,
        fc1,
        fb: b_ac * a * fc1,
        fd: d_ac * a * fc1,
        lambda_provenance: Provenance::of(overrides.lambda),
        weak_magnetism_provenance: Provenance::of(overrides.weak_magnetism),
        induced_tensor_provenance: Provenance::of(overrides.induced_tensor),
    };
    tracing::debug!(
        b_ac = derived.b_ac,
        d_ac = derived.d_ac,
        ratio_m121 = derived.ratio_m121,
        fc1 = derived.fc1,
        "derived matrix elements"
    );
    derived
}

#[cfg(test)]
mod tests {
    use super::{
        ConfiguredMatrixElements, MatrixElementIndex, MatrixElementOverrides,
        MatrixElementProvider, Provenance, SingleParticleState, derive_matrix_elements,
    };
    use crate::common::config::{MatrixElementConfig, SingleParticleStateConfig};
    use crate::domain::Diagnostics;

    #[test]
    fn provider_values_scale_into_form_factors() {
        let provider = ConfiguredMatrixElements::default()
            .with_axial(2.0, 1.0)
            .with_form_factor_ratios(5.0, 0.5);
        let mut diagnostics = Diagnostics::new();
        let derived = derive_matrix_elements(
            MatrixElementOverrides::default(),
            &provider,
            1.27,
            20,
            &mut diagnostics,
        );

        assert!(diagnostics.is_empty());
        assert_eq!(derived.m101, 2.0);
        assert_eq!(derived.ratio_m121, 0.5);
        assert!((derived.fc1 - 2.54).abs() < 1.0e-15);
        assert!((derived.fb - 5.0 * 20.0 * 2.54).abs() < 1.0e-12);
        assert!((derived.fd - 0.5 * 20.0 * 2.54).abs() < 1.0e-12);
        assert_eq!(derived.lambda_provenance, Provenance::Computed);
    }

    #[test]
    fn lambda_override_fixes_m101_to_unity() {
        let provider = ConfiguredMatrixElements::default().with_axial(3.0, 9.0);
        let overrides = MatrixElementOverrides {
            lambda: Some(1.5),
            weak_magnetism: Some(4.0),
            induced_tensor: Some(0.0),
        };
        let mut diagnostics = Diagnostics::new();
        let derived = derive_matrix_elements(overrides, &provider, 1.0, 10, &mut diagnostics);

        assert_eq!(derived.m101, 1.0);
        assert_eq!(derived.ratio_m121, 1.5);
        assert_eq!(derived.fb, 40.0);
        assert_eq!(derived.lambda_provenance, Provenance::Given);
        assert_eq!(derived.weak_magnetism_provenance.as_str(), "given");
    }

    #[test]
    fn nan_results_are_clamped_and_logged() {
        let provider = ConfiguredMatrixElements::default();
        let mut diagnostics = Diagnostics::new();
        let derived = derive_matrix_elements(
            MatrixElementOverrides::default(),
            &provider,
            1.27,
            6,
            &mut diagnostics,
        );

        assert_eq!(derived.b_ac, 0.0);
        assert_eq!(derived.d_ac, 0.0);
        assert_eq!(derived.ratio_m121, 0.0);
        assert_eq!(derived.m101, 1.0);
        assert!(diagnostics.contains_code("MATRIX.NAN_WEAK_MAGNETISM"));
        assert!(diagnostics.contains_code("MATRIX.NAN_INDUCED_TENSOR"));
        assert!(diagnostics.contains_code("MATRIX.NAN_RATIO"));
    }

    #[test]
    fn zero_m101_disables_induced_terms() {
        let provider = ConfiguredMatrixElements::default()
            .with_axial(0.0, 0.0)
            .with_form_factor_ratios(5.0, 1.0);
        let mut diagnostics = Diagnostics::new();
        let overrides = MatrixElementOverrides::default();
        let derived = derive_matrix_elements(overrides, &provider, 1.27, 6, &mut diagnostics);

        // 0/0 is NaN first, then M101 == 1 bypasses the zero check.
        assert_eq!(derived.m101, 1.0);
        assert_eq!(derived.ratio_m121, 0.0);
        assert_eq!(derived.b_ac, 5.0);
        assert!(diagnostics.contains_code("MATRIX.NAN_RATIO"));

        let provider = ConfiguredMatrixElements::default()
            .with_axial(0.0, 2.0)
            .with_form_factor_ratios(5.0, 1.0);
        let mut diagnostics = Diagnostics::new();
        let derived = derive_matrix_elements(overrides, &provider, 1.27, 6, &mut diagnostics);
        assert_eq!(derived.m101, 1.0);
        assert_eq!(derived.b_ac, 0.0);
        assert_eq!(derived.d_ac, 0.0);
        assert_eq!(derived.ratio_m121, 0.0);
        assert!(diagnostics.contains_code("MATRIX.ZERO_M101"));
    }

    #[test]
    fn configured_provider_serves_states_only_in_pairs() {
        let state = SingleParticleStateConfig { n: 0, l: 1, two_j: 3 };
        let config = MatrixElementConfig {
            m101: Some(1.0),
            initial_state: Some(state),
            ..MatrixElementConfig::default()
        };
        let provider = ConfiguredMatrixElements::from_config(&config);
        assert!(provider.single_particle_states().is_none());
        assert_eq!(provider.reduced_matrix_element(MatrixElementIndex::AXIAL_101), 1.0);
        assert!(provider.reduced_matrix_element(MatrixElementIndex::axial(2, 1, 1)).is_nan());

        let config = MatrixElementConfig {
            final_state: Some(SingleParticleStateConfig { n: 1, l: 0, two_j: 1 }),
            ..config
        };
        let (initial, last) = ConfiguredMatrixElements::from_config(&config)
            .single_particle_states()
            .expect("both states configured");
        assert_eq!(initial.major_shell(), 1);
        assert_eq!(last, SingleParticleState { n: 1, l: 0, two_j: 1 });
        assert_eq!(last.major_shell(), 2);
    }
}
