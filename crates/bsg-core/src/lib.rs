//! Allowed and first-forbidden β spectrum generation.
//!
//! The library converts a transition description into a per-energy decay
//! rate by applying an ordered chain of spectral corrections onto the
//! phase-space factor, then integrates the resulting spectrum.

pub mod common;
pub mod domain;
pub mod modules;
pub mod numerics;
