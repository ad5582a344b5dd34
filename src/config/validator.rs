//! Configuration validation rules.
//!
//! Problems are collected rather than reported one at a time, so a user can
//! fix every issue in a single edit.

use crate::config::schema::SetupConfig;
use crate::error::{Result, SetupError};

/// Longest allowed `retry.base_delay_secs`.
pub const MAX_BASE_DELAY_SECS: u64 = 3600;

/// A single validation problem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Rule identifier
    pub rule: String,
    /// Human-readable error message
    pub message: String,
}

impl ValidationError {
    fn new(rule: &str, message: impl Into<String>) -> Self {
        Self {
            rule: rule.to_string(),
            message: message.into(),
        }
    }
}

/// Validate a configuration and return all problems.
pub fn validate_config(config: &SetupConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if config.retry.max_attempts == 0 {
        errors.push(ValidationError::new(
            "retry-attempts",
            "retry.max_attempts must be at least 1",
        ));
    }

    if config.retry.base_delay_secs > MAX_BASE_DELAY_SECS {
        errors.push(ValidationError::new(
            "retry-delay",
            format!(
                "retry.base_delay_secs must be at most {} (got {})",
                MAX_BASE_DELAY_SECS, config.retry.base_delay_secs
            ),
        ));
    }

    if let Some(executables) = &config.probe.executables {
        if executables.is_empty() {
            errors.push(ValidationError::new(
                "probe-executables",
                "probe.executables must list at least one interpreter",
            ));
        }
        if executables.iter().any(|e| e.trim().is_empty()) {
            errors.push(ValidationError::new(
                "probe-executables",
                "probe.executables must not contain blank names",
            ));
        }
    }

    if let Some(files) = &config.search.required_files {
        if files.is_empty() {
            errors.push(ValidationError::new(
                "required-files",
                "search.required_files must not be empty",
            ));
        }
        for file in files {
            if let Err(e) = globset::Glob::new(&file.pattern) {
                errors.push(ValidationError::new(
                    "required-files",
                    format!("search.required_files pattern '{}': {}", file.pattern, e),
                ));
            }
        }
    }

    if config.binding.enabled && config.binding.program.trim().is_empty() {
        errors.push(ValidationError::new(
            "binding-program",
            "binding.program must be set when the binding is enabled",
        ));
    }

    if config.smoke_test.enabled && config.smoke_test.program.trim().is_empty() {
        errors.push(ValidationError::new(
            "smoke-test-program",
            "smoke_test.program must be set when the smoke test is enabled",
        ));
    }

    errors
}

/// Validate and convert problems into a single error.
pub fn validate(config: &SetupConfig) -> Result<()> {
    let errors = validate_config(config);

    if errors.is_empty() {
        Ok(())
    } else {
        let messages: Vec<_> = errors.iter().map(|e| e.message.clone()).collect();
        Err(SetupError::ConfigValidationError {
            message: messages.join("; "),
        })
    }
}
