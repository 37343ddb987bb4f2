pub mod corrections;
pub mod matrix_elements;
pub mod spectrum;
pub mod transition;

pub use corrections::{
    Branch, Correction, CorrectionPipeline, CorrectionSettings, DecayRate, DecayRateEvaluator,
    SpectralCorrection,
};
pub use matrix_elements::{ConfiguredMatrixElements, MatrixElementProvider};
pub use spectrum::{GridStep, Spectrum, SpectrumBuilder, SpectrumSample};
pub use transition::NuclearParameters;
