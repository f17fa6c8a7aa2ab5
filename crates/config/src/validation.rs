//! Validation system for configuration values
//!
//! This module provides traits and utilities for validating configuration values.
//! Each config section implements the `ConfigSection` trait which includes validation.

pub use crate::error::ValidationError;
use hailcast_core::LanguageCatalog;
use std::path::Path;

/// Trait for configuration sections that can validate themselves
///
/// Each config section (AppConfig, LibraryConfig, etc.) implements this trait
/// to provide validation logic. This allows the system to be extended with
/// new config sections without modifying existing code.
pub trait ConfigSection: Default {
    /// Validates the configuration section
    ///
    /// Returns a list of validation errors. Empty list means valid.
    fn validate(&self) -> Result<(), Vec<ValidationError>>;

    /// Merges another config section into this one
    ///
    /// Values from `other` take precedence. This is used for override chains.
    fn merge(&mut self, other: Self);

    /// Returns the section name for error reporting
    fn section_name(&self) -> &'static str;
}

/// Common validators for config values
pub struct Validator;

impl Validator {
    /// Validates that a numeric value is within a range
    pub fn in_range<T>(value: T, min: T, max: T, field: &str) -> Result<(), ValidationError>
    where
        T: PartialOrd + std::fmt::Display + Copy,
    {
        if value < min || value > max {
            Err(ValidationError::with_value(
                field,
                format!("must be between {} and {}", min, max),
                value,
            ))
        } else {
            Ok(())
        }
    }

    /// Validates that a name resolves to a supported language
    pub fn supported_language(value: &str, field: &str) -> Result<(), ValidationError> {
        if LanguageCatalog::resolve(value).is_none() {
            Err(ValidationError::with_value(
                field,
                "must be a supported language",
                value,
            ))
        } else {
            Ok(())
        }
    }

    /// Validates that an optional path, when set, is not empty
    pub fn optional_path_not_empty(path: Option<&Path>, field: &str) -> Result<(), ValidationError> {
        match path {
            Some(p) if p.as_os_str().is_empty() => {
                Err(ValidationError::new(field, "must not be empty when set"))
            }
            _ => Ok(()),
        }
    }

    /// Collects multiple validation results into a single result
    pub fn collect_errors(
        results: Vec<Result<(), ValidationError>>,
    ) -> Result<(), Vec<ValidationError>> {
        let errors: Vec<ValidationError> = results.into_iter().filter_map(|r| r.err()).collect();

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
