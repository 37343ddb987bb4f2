use std::error::Error;
use std::fmt::{Display, Formatter};

pub type BsgResult<T> = Result<T, BsgError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BsgErrorCategory {
    Success,
    Configuration,
    Resource,
    Domain,
    Internal,
}

impl BsgErrorCategory {
    pub const fn exit_code(self) -> i32 {
        match self {
            Self::Success => 0,
            Self::Configuration => 2,
            Self::Resource => 3,
            Self::Domain => 4,
            Self::Internal => 5,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "Success",
            Self::Configuration => "ConfigurationError",
            Self::Resource => "ResourceError",
            Self::Domain => "DomainError",
            Self::Internal => "InternalError",
        }
    }

    pub const fn is_fatal(self) -> bool {
        !matches!(self, Self::Success)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BsgError {
    category: BsgErrorCategory,
    placeholder: &'static str,
    message: String,
}

impl BsgError {
    pub fn new(
        category: BsgErrorCategory,
        placeholder: &'static str,
        message: impl Into<String>,
    ) -> Self {
        Self {
            category,
            placeholder,
            message: message.into(),
        }
    }

    pub fn configuration(placeholder: &'static str, message: impl Into<String>) -> Self {
        Self::new(BsgErrorCategory::Configuration, placeholder, message)
    }

    pub fn resource(placeholder: &'static str, message: impl Into<String>) -> Self {
        Self::new(BsgErrorCategory::Resource, placeholder, message)
    }

    pub fn domain(placeholder: &'static str, message: impl Into<String>) -> Self {
        Self::new(BsgErrorCategory::Domain, placeholder, message)
    }

    pub fn internal(placeholder: &'static str, message: impl Into<String>) -> Self {
        Self::new(BsgErrorCategory::Internal, placeholder, message)
    }

    pub const fn category(&self) -> BsgErrorCategory {
        self.category
    }

    pub const fn placeholder(&self) -> &'static str {
        self.placeholder
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub const fn exit_code(&self) -> i32 {
        self.category.exit_code()
    }

    pub fn diagnostic_line(&self) -> String {
        let severity = if self.category.is_fatal() {
            "ERROR"
        } else {
            "INFO"
        };
        format!("{}: [{}] {}", severity, self.placeholder, self.message)
    }

    pub fn fatal_exit_line(&self) -> Option<String> {
        self.category
            .is_fatal()
            .then(|| format!("FATAL EXIT CODE: {}", self.exit_code()))
    }
}

impl Display for BsgError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} [{}] {}",
            self.category.as_str(),
            self.placeholder,
            self.message
        )
    }
}

impl Error for BsgError {}

/// Grid or energy arguments that fall outside what the evaluator accepts.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DomainError {
    #[error("grid step must be positive and finite, got {step_w} (in units of the electron mass)")]
    NonPositiveStep { step_w: f64 },
    #[error("total energy W = {w} lies outside [1, {w0}]")]
    OutOfRange { w: f64, w0: f64 },
}

impl From<DomainError> for BsgError {
    fn from(error: DomainError) -> Self {
        let placeholder = match error {
            DomainError::NonPositiveStep { .. } => "DOMAIN.NON_POSITIVE_STEP",
            DomainError::OutOfRange { .. } => "DOMAIN.OUT_OF_RANGE",
        };
        Self::domain(placeholder, error.to_string())
    }
}
