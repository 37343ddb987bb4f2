pub mod errors;

pub use errors::{BsgError, BsgErrorCategory, BsgResult, DomainError};

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Charge of the emitted lepton.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum BetaType {
    #[default]
    Electron,
    Positron,
}

impl BetaType {
    /// `+1` for β⁻ and `-1` for β⁺. Daughter Z equals mother Z plus this sign.
    pub const fn sign(self) -> i32 {
        match self {
            Self::Electron => 1,
            Self::Positron => -1,
        }
    }

    pub const fn sign_f64(self) -> f64 {
        self.sign() as f64
    }

    /// Parses the process string; only `B+` (any case) selects a positron.
    pub fn from_process(process: &str) -> Self {
        if process.trim().eq_ignore_ascii_case("b+") {
            Self::Positron
        } else {
            Self::Electron
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Electron => "B-",
            Self::Positron => "B+",
        }
    }
}

impl Display for BetaType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str((*self).as_str())
    }
}

/// Spin-isospin character of the transition.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub enum DecayType {
    Fermi,
    #[default]
    GamowTeller,
    /// Mixed Fermi/Gamow-Teller transition with mixing ratio λ.
    Mixed { mixing_ratio: f64 },
}

impl DecayType {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Fermi => "Fermi",
            Self::GamowTeller => "Gamow-Teller",
            Self::Mixed { .. } => "Mixed",
        }
    }

    pub const fn mixing_ratio(self) -> Option<f64> {
        match self {
            Self::Mixed { mixing_ratio } => Some(mixing_ratio),
            _ => None,
        }
    }

    /// Weighted average `(V + λ²·A)/(1 + λ²)` of a vector and an axial term.
    pub fn blend(self, vector: f64, axial: f64) -> f64 {
        match self {
            Self::Fermi => vector,
            Self::GamowTeller => axial,
            Self::Mixed { mixing_ratio } => {
                let lambda2 = mixing_ratio * mixing_ratio;
                (vector + lambda2 * axial) / (1.0 + lambda2)
            }
        }
    }
}

impl Display for DecayType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str((*self).as_str())
    }
}

/// Radial charge-density model used by the shape-dependent corrections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ChargeShape {
    #[default]
    Fermi,
    #[serde(rename = "Modified_Gaussian", alias = "modified_gaussian")]
    ModifiedGaussian,
}

impl ChargeShape {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Fermi => "Fermi",
            Self::ModifiedGaussian => "Modified_Gaussian",
        }
    }
}

impl Display for ChargeShape {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str((*self).as_str())
    }
}

/// Selects which signature of the profile-dependent corrections is used.
///
/// `Standard` uses the orientation-averaged deformation, the shape-dependent
/// `U` and allows the isovector shape term. `Legacy` uses the closed-form
/// deformation in β2 and β4 and the Fermi-parametrised `U` only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CorrectionProfile {
    #[default]
    Standard,
    Legacy,
}

impl CorrectionProfile {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Legacy => "legacy",
        }
    }
}

/// Treatment of energies outside `[1, W0]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DomainPolicy {
    /// Evaluate the correction chain as-is.
    #[default]
    Evaluate,
    /// Move W onto the nearest domain boundary.
    Clamp,
    /// Drop the point from the spectrum.
    Skip,
    /// Fail with [`DomainError::OutOfRange`].
    Reject,
}

impl DomainPolicy {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Evaluate => "evaluate",
            Self::Clamp => "clamp",
            Self::Skip => "skip",
            Self::Reject => "reject",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum DiagnosticSeverity {
    Info,
    Warning,
    Error,
}

impl DiagnosticSeverity {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Info => "INFO",
            Self::Warning => "WARNING",
            Self::Error => "ERROR",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub severity: DiagnosticSeverity,
    pub code: &'static str,
    pub message: String,
}

impl Diagnostic {
    pub fn render(&self) -> String {
        format!("{}: [{}] {}", self.severity.as_str(), self.code, self.message)
    }
}

/// Run-scoped record of recovered conditions.
///
/// Every entry is also forwarded to `tracing` so a subscriber installed by
/// the caller sees it at the matching level.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn info(&mut self, code: &'static str, message: impl Into<String>) {
        self.push(DiagnosticSeverity::Info, code, message.into());
    }

    pub fn warn(&mut self, code: &'static str, message: impl Into<String>) {
        self.push(DiagnosticSeverity::Warning, code, message.into());
    }

    pub fn error(&mut self, code: &'static str, message: impl Into<String>) {
        self.push(DiagnosticSeverity::Error, code, message.into());
    }

    /// Records a non-fatal error value, keeping its placeholder code.
    pub fn recovered(&mut self, error: &BsgError) {
        self.push(
            DiagnosticSeverity::Warning,
            error.placeholder(),
            error.message().to_string(),
        );
    }

    pub fn entries(&self) -> &[Diagnostic] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains_code(&self, code: &str) -> bool {
        self.entries.iter().any(|entry| entry.code == code)
    }

    pub fn count(&self, severity: DiagnosticSeverity) -> usize {
        self.entries
            .iter()
            .filter(|entry| entry.severity == severity)
            .count()
    }

    fn push(&mut self, severity: DiagnosticSeverity, code: &'static str, message: String) {
        match severity {
            DiagnosticSeverity::Info => tracing::info!(code, "{message}"),
            DiagnosticSeverity::Warning => tracing::warn!(code, "{message}"),
            DiagnosticSeverity::Error => tracing::error!(code, "{message}"),
        }
        self.entries.push(Diagnostic {
            severity,
            code,
            message,
        });
    }
}
