#![forbid(unsafe_code)]

//! Engine configuration.
//!
//! [`EngineConfig`] collects the few tunables of the interaction controller.
//! With the `engine-config` feature it can be loaded from TOML or JSON:
//!
//! ```toml
//! # fgrid.toml
//! concurrent_gesture = "replace"
//! update_hysteresis_px = 2.0
//! check_invariants_on_commit = true
//! ```
//!
//! ```rust,ignore
//! let config = EngineConfig::from_toml_file("fgrid.toml")?;
//! let config = EngineConfig::from_json_str(json)?;
//! ```
//!
//! Missing keys fall back to [`EngineConfig::default`].

#[cfg(feature = "engine-config")]
use std::path::Path;

use serde::{Deserialize, Serialize};

/// What to do with a new gesture while another one is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConcurrentGesturePolicy {
    /// Keep the active gesture; the new one is reported as a no-op.
    #[default]
    Ignore,
    /// Commit the active gesture, then start the new one.
    Replace,
}

/// Tunables for [`crate::GridEngine`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Policy for overlapping pointer-down / drag-start calls.
    pub concurrent_gesture: ConcurrentGesturePolicy,

    /// Minimum pointer travel in pixels between two resize previews.
    /// Zero recomputes on every move.
    pub update_hysteresis_px: f32,

    /// Run the grid invariant check after every commit and log violations.
    pub check_invariants_on_commit: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            concurrent_gesture: ConcurrentGesturePolicy::Ignore,
            update_hysteresis_px: 0.0,
            check_invariants_on_commit: cfg!(debug_assertions),
        }
    }
}

impl EngineConfig {
    #[must_use]
    pub fn with_concurrent_gesture(mut self, policy: ConcurrentGesturePolicy) -> Self {
        self.concurrent_gesture = policy;
        self
    }

    #[must_use]
    pub fn with_update_hysteresis_px(mut self, pixels: f32) -> Self {
        self.update_hysteresis_px = pixels;
        self
    }

    #[must_use]
    pub fn with_invariant_checks(mut self, enabled: bool) -> Self {
        self.check_invariants_on_commit = enabled;
        self
    }

    /// Load from a TOML string.
    #[cfg(feature = "engine-config")]
    pub fn from_toml_str(s: &str) -> Result<Self, EngineConfigError> {
        toml::from_str(s).map_err(EngineConfigError::Toml)
    }

    /// Load from a TOML file on disk.
    #[cfg(feature = "engine-config")]
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, EngineConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(EngineConfigError::Io)?;
        Self::from_toml_str(&content)
    }

    /// Load from a JSON string.
    #[cfg(feature = "engine-config")]
    pub fn from_json_str(s: &str) -> Result<Self, EngineConfigError> {
        serde_json::from_str(s).map_err(EngineConfigError::Json)
    }

    /// Load from a JSON file on disk.
    #[cfg(feature = "engine-config")]
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, EngineConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(EngineConfigError::Io)?;
        Self::from_json_str(&content)
    }

    /// Check parameter ranges. An empty list means the config is valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        if !self.update_hysteresis_px.is_finite() || self.update_hysteresis_px < 0.0 {
            errors.push(format!(
                "update_hysteresis_px must be finite and >= 0, got {}",
                self.update_hysteresis_px
            ));
        }
        errors
    }

    /// `self` if [`validate`](Self::validate) finds nothing.
    pub fn validated(self) -> Result<Self, EngineConfigError> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(self)
        } else {
            Err(EngineConfigError::Validation(errors))
        }
    }
}

/// Errors from loading or validating an [`EngineConfig`].
#[derive(Debug)]
pub enum EngineConfigError {
    /// I/O error reading a file.
    Io(std::io::Error),
    /// TOML parse error.
    #[cfg(feature = "engine-config")]
    Toml(toml::de::Error),
    /// JSON parse error.
    #[cfg(feature = "engine-config")]
    Json(serde_json::Error),
    /// Out-of-range parameters.
    Validation(Vec<String>),
}

impl std::fmt::Display for EngineConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            #[cfg(feature = "engine-config")]
            Self::Toml(e) => write!(f, "TOML parse error: {e}"),
            #[cfg(feature = "engine-config")]
            Self::Json(e) => write!(f, "JSON parse error: {e}"),
            Self::Validation(errors) => {
                write!(f, "validation errors: {}", errors.join("; "))
            }
        }
    }
}

impl std::error::Error for EngineConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            #[cfg(feature = "engine-config")]
            Self::Toml(e) => Some(e),
            #[cfg(feature = "engine-config")]
            Self::Json(e) => Some(e),
            Self::Validation(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_ignores_concurrent_gestures() {
        let config = EngineConfig::default();
        assert_eq!(config.concurrent_gesture, ConcurrentGesturePolicy::Ignore);
        assert_eq!(config.update_hysteresis_px, 0.0);
        assert!(config.validate().is_empty());
    }

    #[test]
    fn validate_catches_negative_hysteresis() {
        let config = EngineConfig::default().with_update_hysteresis_px(-1.0);
        let errors = config.validate();
        assert!(errors.iter().any(|e| e.contains("update_hysteresis_px")));
    }

    #[test]
    fn validate_catches_nan_hysteresis() {
        let config = EngineConfig::default().with_update_hysteresis_px(f32::NAN);
        let err = config.validated().unwrap_err();
        assert!(matches!(err, EngineConfigError::Validation(_)));
        assert!(err.to_string().starts_with("validation errors"));
    }

    #[test]
    fn builders_override_fields() {
        let config = EngineConfig::default()
            .with_concurrent_gesture(ConcurrentGesturePolicy::Replace)
            .with_invariant_checks(false);
        assert_eq!(config.concurrent_gesture, ConcurrentGesturePolicy::Replace);
        assert!(!config.check_invariants_on_commit);
    }
}
