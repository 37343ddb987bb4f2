//! Typed run configuration.
//!
//! A run is described by a TOML deck with one table per concern. Every
//! optional key carries its default here; keys without a sensible default
//! are `Option`s resolved through [`require`] when the transition is built.

use crate::common::elements::MAX_ATOMIC_NUMBER;
use crate::domain::{BsgError, ChargeShape, CorrectionProfile, DomainPolicy};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_GA: f64 = 1.2723;
pub const DEFAULT_GP: f64 = 0.0;
pub const DEFAULT_GM: f64 = 4.706;
pub const DEFAULT_STEP_SIZE_KEV: f64 = 1.0;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("required option '{key}' is missing")]
    MissingOption { key: &'static str },
    #[error("option '{key}' has an invalid value: {reason}")]
    InvalidValue { key: &'static str, reason: String },
    #[error("failed to parse configuration '{source_name}': {message}")]
    Parse {
        source_name: String,
        message: String,
    },
    #[error("failed to read configuration '{}': {message}", path.display())]
    Read { path: PathBuf, message: String },
}

impl From<ConfigError> for BsgError {
    fn from(error: ConfigError) -> Self {
        match error {
            ConfigError::MissingOption { .. } => {
                BsgError::configuration("CONFIG.MISSING_OPTION", error.to_string())
            }
            ConfigError::InvalidValue { .. } => {
                BsgError::configuration("CONFIG.INVALID_VALUE", error.to_string())
            }
            ConfigError::Parse { .. } => BsgError::configuration("CONFIG.PARSE", error.to_string()),
            ConfigError::Read { .. } => BsgError::resource("CONFIG.READ", error.to_string()),
        }
    }
}

/// Resolves an optional key, failing with [`ConfigError::MissingOption`].
pub fn require<T>(key: &'static str, value: Option<T>) -> Result<T, ConfigError> {
    value.ok_or(ConfigError::MissingOption { key })
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RunConfig {
    pub transition: TransitionConfig,
    pub mother: NucleusConfig,
    pub daughter: NucleusConfig,
    #[serde(default)]
    pub couplings: CouplingConfig,
    #[serde(default)]
    pub spectrum: SpectrumConfig,
    #[serde(default)]
    pub corrections: CorrectionToggles,
    #[serde(default)]
    pub matrix_elements: MatrixElementConfig,
    /// Text table with one row of exchange coefficients per atomic number.
    #[serde(default)]
    pub exchange_data: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TransitionConfig {
    pub process: Option<String>,
    #[serde(rename = "type")]
    pub decay_type: Option<String>,
    pub mixing_ratio: Option<f64>,
    /// keV
    pub q_value: Option<f64>,
    #[serde(default)]
    pub atomic_energy_deficit: f64,
    /// Seconds.
    pub partial_halflife: Option<f64>,
    pub log_ft: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NucleusConfig {
    pub z: Option<i32>,
    pub a: Option<i32>,
    /// Charge radius in fm; zero selects `1.2·A^(1/3)`. Only read for the daughter.
    #[serde(default)]
    pub radius: f64,
    /// Twice the spin, signed by parity.
    pub spin_parity: Option<i32>,
    /// keV
    #[serde(default)]
    pub excitation_energy: f64,
    #[serde(default)]
    pub beta2: f64,
    #[serde(default)]
    pub beta4: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct CouplingConfig {
    pub g_a: f64,
    pub g_p: f64,
    pub g_m: f64,
}

impl Default for CouplingConfig {
    fn default() -> Self {
        Self {
            g_a: DEFAULT_GA,
            g_p: DEFAULT_GP,
            g_m: DEFAULT_GM,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct SpectrumConfig {
    /// keV
    pub begin: f64,
    /// keV; zero runs up to the endpoint.
    pub end: f64,
    /// keV
    pub step_size: f64,
    /// Number of steps; takes precedence over `step_size`.
    pub steps: Option<u32>,
    pub profile: CorrectionProfile,
    pub out_of_range: DomainPolicy,
    pub es_shape: ChargeShape,
    pub ns_shape: ChargeShape,
    pub mod_gauss_fit: Option<f64>,
    pub v_old: Option<Vec<f64>>,
    pub v_new: Option<Vec<f64>>,
    /// Overrides M121/M101.
    pub lambda: Option<f64>,
    /// Overrides b/Ac.
    pub weak_magnetism: Option<f64>,
    /// Overrides d/Ac.
    pub induced_tensor: Option<f64>,
    pub isovector: bool,
    pub connect: bool,
    /// Adds the neutrino column to the tabulated report.
    pub neutrino: bool,
}

impl Default for SpectrumConfig {
    fn default() -> Self {
        Self {
            begin: 0.0,
            end: 0.0,
            step_size: DEFAULT_STEP_SIZE_KEV,
            steps: None,
            profile: CorrectionProfile::default(),
            out_of_range: DomainPolicy::default(),
            es_shape: ChargeShape::default(),
            ns_shape: ChargeShape::default(),
            mod_gauss_fit: None,
            v_old: None,
            v_new: None,
            lambda: None,
            weak_magnetism: None,
            induced_tensor: None,
            isovector: false,
            connect: false,
            neutrino: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct CorrectionToggles {
    pub phase_space: bool,
    pub fermi: bool,
    pub c: bool,
    pub relativistic: bool,
    pub deformation: bool,
    pub finite_size: bool,
    pub u: bool,
    pub coulomb_recoil: bool,
    pub radiative: bool,
    pub recoil: bool,
    pub screening: bool,
    pub exchange: bool,
    pub atomic_mismatch: bool,
}

impl CorrectionToggles {
    pub const fn all() -> Self {
        Self {
            phase_space: true,
            fermi: true,
            c: true,
            relativistic: true,
            deformation: true,
            finite_size: true,
            u: true,
            coulomb_recoil: true,
            radiative: true,
            recoil: true,
            screening: true,
            exchange: true,
            atomic_mismatch: true,
        }
    }

    pub const fn none() -> Self {
        Self {
            phase_space: false,
            fermi: false,
            c: false,
            relativistic: false,
            deformation: false,
            finite_size: false,
            u: false,
            coulomb_recoil: false,
            radiative: false,
            recoil: false,
            screening: false,
            exchange: false,
            atomic_mismatch: false,
        }
    }
}

impl Default for CorrectionToggles {
    fn default() -> Self {
        Self::all()
    }
}

/// Values served by the configured matrix-element provider.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MatrixElementConfig {
    pub m101: Option<f64>,
    pub m121: Option<f64>,
    pub weak_magnetism: Option<f64>,
    pub induced_tensor: Option<f64>,
    pub initial_state: Option<SingleParticleStateConfig>,
    pub final_state: Option<SingleParticleStateConfig>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SingleParticleStateConfig {
    /// Radial quantum number, starting at 0.
    pub n: u32,
    pub l: u32,
    /// Twice the total angular momentum.
    pub two_j: u32,
}

impl RunConfig {
    pub fn from_toml_str(source_name: &str, text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text).map_err(|error| ConfigError::Parse {
            source_name: source_name.to_string(),
            message: error.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|error| ConfigError::Read {
            path: path.to_path_buf(),
            message: error.to_string(),
        })?;
        Self::from_toml_str(&path.display().to_string(), &text)
    }

    /// Checks every key that has no default and every cross-key constraint.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require("transition.process", self.transition.process.as_ref())?;
        let decay_type = require("transition.type", self.transition.decay_type.as_deref())?;
        require("transition.q_value", self.transition.q_value)?;
        require("mother.z", self.mother.z)?;
        require("mother.a", self.mother.a)?;
        require("mother.spin_parity", self.mother.spin_parity)?;
        let z = require("daughter.z", self.daughter.z)?;
        let a = require("daughter.a", self.daughter.a)?;
        require("daughter.spin_parity", self.daughter.spin_parity)?;

        if is_mixed_type(decay_type) {
            require("transition.mixing_ratio", self.transition.mixing_ratio)?;
        }
        if !(1..=MAX_ATOMIC_NUMBER as i32).contains(&z) {
            return Err(ConfigError::InvalidValue {
                key: "daughter.z",
                reason: format!("atomic number {z} is outside 1..=118"),
            });
        }
        if a < 1 {
            return Err(ConfigError::InvalidValue {
                key: "daughter.a",
                reason: format!("mass number {a} must be positive"),
            });
        }
        if self.daughter.radius < 0.0 || !self.daughter.radius.is_finite() {
            return Err(ConfigError::InvalidValue {
                key: "daughter.radius",
                reason: format!("radius {} fm must be non-negative", self.daughter.radius),
            });
        }
        if self.spectrum.steps == Some(0) {
            return Err(ConfigError::InvalidValue {
                key: "spectrum.steps",
                reason: "step count must be at least 1".to_string(),
            });
        }
        for (key, vector) in [
            ("spectrum.v_old", &self.spectrum.v_old),
            ("spectrum.v_new", &self.spectrum.v_new),
        ] {
            if let Some(values) = vector
                && values.len() != 3
            {
                return Err(ConfigError::InvalidValue {
                    key,
                    reason: format!("expected 3 coefficients, found {}", values.len()),
                });
            }
        }
        if let Some(halflife) = self.transition.partial_halflife
            && halflife <= 0.0
        {
            return Err(ConfigError::InvalidValue {
                key: "transition.partial_halflife",
                reason: format!("half-life {halflife} s must be positive"),
            });
        }
        Ok(())
    }
}

/// Anything that is neither `Fermi` nor `Gamow-Teller` is a mixed transition.
pub fn is_mixed_type(decay_type: &str) -> bool {
    let decay_type = decay_type.trim();
    !(decay_type.eq_ignore_ascii_case("fermi") || decay_type.eq_ignore_ascii_case("gamow-teller"))
}
