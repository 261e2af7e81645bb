// SPDX-FileCopyrightText: 2026 Renova Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde
//! attributes, such as URL schemes, timeout bounds, and known log levels.

use crate::diagnostic::ConfigError;
use crate::model::RenovaConfig;

const KNOWN_LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Maximum records per report page the backend accepts.
const MAX_PAGE_SIZE: u32 = 1000;

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &RenovaConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    let base_url = config.api.base_url.trim();
    if base_url.is_empty() {
        errors.push(ConfigError::Validation {
            message: "api.base_url must not be empty".to_string(),
        });
    } else if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
        errors.push(ConfigError::Validation {
            message: format!("api.base_url `{base_url}` must start with http:// or https://"),
        });
    }

    if config.api.timeout_secs == 0 {
        errors.push(ConfigError::Validation {
            message: "api.timeout_secs must be at least 1".to_string(),
        });
    }

    if config.api.page_size == 0 || config.api.page_size > MAX_PAGE_SIZE {
        errors.push(ConfigError::Validation {
            message: format!(
                "api.page_size must be between 1 and {MAX_PAGE_SIZE}, got {}",
                config.api.page_size
            ),
        });
    }

    if !KNOWN_LOG_LEVELS.contains(&config.log.level.as_str()) {
        errors.push(ConfigError::Validation {
            message: format!(
                "log.level `{}` is not one of: {}",
                config.log.level,
                KNOWN_LOG_LEVELS.join(", ")
            ),
        });
    }

    if config.export.output_dir.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "export.output_dir must not be empty".to_string(),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
