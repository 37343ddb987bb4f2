//! Atomic exchange parameter table.
//!
//! Each row reads `Z a b c d e f g h i`, whitespace separated. Blank lines
//! and lines starting with `#` are ignored.

use crate::domain::BsgError;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ExchangeTableError {
    #[error("failed to read exchange table '{}': {message}", path.display())]
    Read { path: PathBuf, message: String },
    #[error("exchange table line {line}: {message}")]
    Parse { line: usize, message: String },
}

impl From<ExchangeTableError> for BsgError {
    fn from(error: ExchangeTableError) -> Self {
        let placeholder = match error {
            ExchangeTableError::Read { .. } => "EXCHANGE.READ",
            ExchangeTableError::Parse { .. } => "EXCHANGE.PARSE",
        };
        BsgError::resource(placeholder, error.to_string())
    }
}

/// Coefficients of the exchange fit
/// `1 + a/E + b/E² + c·exp(-d·E) + e·sin((W - g)^f + h)·exp(-i·E)`, `E = W - 1`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ExchangeParameters {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub e: f64,
    pub f: f64,
    pub g: f64,
    pub h: f64,
    pub i: f64,
}

impl ExchangeParameters {
    pub fn from_array(values: [f64; 9]) -> Self {
        let [a, b, c, d, e, f, g, h, i] = values;
        Self {
            a,
            b,
            c,
            d,
            e,
            f,
            g,
            h,
            i,
        }
    }

    /// All-zero parameters turn the exchange correction into a no-op.
    pub fn is_zero(&self) -> bool {
        [
            self.a, self.b, self.c, self.d, self.e, self.f, self.g, self.h, self.i,
        ]
        .iter()
        .all(|value| *value == 0.0)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExchangeParameterTable {
    rows: BTreeMap<i32, ExchangeParameters>,
}

impl ExchangeParameterTable {
    pub fn load(path: &Path) -> Result<Self, ExchangeTableError> {
        let source = fs::read_to_string(path).map_err(|error| ExchangeTableError::Read {
            path: path.to_path_buf(),
            message: error.to_string(),
        })?;
        Self::parse(&source)
    }

    pub fn parse(source: &str) -> Result<Self, ExchangeTableError> {
        let mut rows = BTreeMap::new();

        for (index, line) in source.lines().enumerate() {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }

            let values = trimmed
                .split_whitespace()
                .map(|token| {
                    token.parse::<f64>().map_err(|error| ExchangeTableError::Parse {
                        line: index + 1,
                        message: format!("invalid number '{token}': {error}"),
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;
            if values.len() != 10 {
                return Err(ExchangeTableError::Parse {
                    line: index + 1,
                    message: format!("expected 10 columns, found {}", values.len()),
                });
            }
            if values[0].fract() != 0.0 {
                return Err(ExchangeTableError::Parse {
                    line: index + 1,
                    message: format!("atomic number {} is not an integer", values[0]),
                });
            }

            let mut coefficients = [0.0; 9];
            coefficients.copy_from_slice(&values[1..]);
            // Later rows win, matching a sequential scan of the file.
            rows.insert(
                values[0] as i32,
                ExchangeParameters::from_array(coefficients),
            );
        }

        Ok(Self { rows })
    }

    pub fn lookup(&self, z: i32) -> Option<ExchangeParameters> {
        self.rows.get(&z).copied()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
