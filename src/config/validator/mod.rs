//! Configuration validation with error and warning detection
//!
//! Errors make a build configuration unusable; warnings describe settings
//! that work but probably do not do what was intended.
//!
//! There is no configuration file: the binary validates the built-in
//! defaults, so these checks guard `BuildConfig`s assembled in code (a
//! changed default, a test fixture) before any file is read or written.

mod checks;

use anyhow::{anyhow, Result};

use super::types::BuildConfig;

/// Result of configuration validation
#[derive(Debug, Default)]
pub struct ValidationResult {
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn add_warning(&mut self, warning: ValidationWarning) {
        self.warnings.push(warning);
    }
}

/// Hard validation errors that prevent a build
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    MissingRequiredField { field: String },
    InvalidValue { field: String, reason: String },
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::MissingRequiredField { field } => {
                write!(f, "missing required field '{}'", field)
            }
            ValidationError::InvalidValue { field, reason } => {
                write!(f, "invalid value for '{}': {}", field, reason)
            }
        }
    }
}

/// Soft validation warnings
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationWarning {
    DuplicateFragment { name: String },
    UnwatchedFragment { name: String, extension: String },
}

impl std::fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationWarning::DuplicateFragment { name } => {
                write!(f, "Fragment '{}' is listed more than once", name)
            }
            ValidationWarning::UnwatchedFragment { name, extension } => {
                write!(
                    f,
                    "Fragment '{}' does not end in .{} and will not trigger rebuilds",
                    name, extension
                )
            }
        }
    }
}

/// Build configuration validator
pub struct ConfigValidator<'a> {
    pub(super) config: &'a BuildConfig,
    pub(super) result: ValidationResult,
}

impl<'a> ConfigValidator<'a> {
    pub fn new(config: &'a BuildConfig) -> Self {
        Self {
            config,
            result: ValidationResult::default(),
        }
    }

    /// Run all validation checks
    pub fn validate(mut self) -> ValidationResult {
        self.check_fragment_list();
        self.check_fragment_names();
        self.check_duplicate_fragments();
        self.check_output_names();
        self.check_watched_extension();
        self.result
    }
}

/// Validate the config, logging warnings and failing on any error
pub fn validate_or_bail(config: &BuildConfig) -> Result<()> {
    let result = ConfigValidator::new(config).validate();

    for warning in &result.warnings {
        tracing::warn!("{}", warning);
    }

    if !result.is_valid() {
        let messages: Vec<String> = result.errors.iter().map(|e| e.to_string()).collect();
        return Err(anyhow!(
            "Invalid build configuration: {}",
            messages.join("; ")
        ));
    }

    Ok(())
}
