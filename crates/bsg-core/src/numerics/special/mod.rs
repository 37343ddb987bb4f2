pub mod dilog;
pub mod gamma;
pub mod integration;

pub use dilog::{dilogarithm, spence};
pub use gamma::{ln_gamma, ln_gamma_complex};
pub use integration::{IntegrationError, simpson_function, simpson_samples};
