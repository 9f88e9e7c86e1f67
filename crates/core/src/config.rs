use serde::{Deserialize, Serialize};
use site_ux_protocol::{ObserverOptions, PageManifest, RootMargin};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("{field} must be a finite number >= 0, got {value}")]
    Negative { field: &'static str, value: f64 },
    #[error("{field} must be greater than zero, got {value}")]
    NotPositive { field: &'static str, value: f64 },
    #[error("reveal threshold must be within 0..=1, got {0}")]
    Threshold(f64),
}

#[derive(Debug, Error)]
#[error("invalid page manifest: {0}")]
pub struct ManifestError(#[from] serde_json::Error);

/// Parse the host's page manifest.
pub fn parse_manifest(json: &str) -> Result<PageManifest, ManifestError> {
    Ok(serde_json::from_str(json)?)
}

/// Tunables for every component. All fields default to the values the
/// site ships with, so an empty JSON object is a complete config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SiteConfig {
    /// Navbar switches to "scrolled" strictly above this offset (px).
    pub navbar_threshold_px: f64,
    /// Sections count as current this many pixels before their top.
    pub highlight_offset_px: f64,
    pub highlight_debounce_ms: f64,
    pub resize_debounce_ms: f64,
    pub reveal_threshold: f64,
    pub reveal_root_margin: RootMargin,
    pub counter_duration_ms: f64,
    pub counter_tick_ms: f64,
    /// Clearance left above an anchor target for the fixed navbar (px).
    pub anchor_offset_px: f64,
    pub parallax_factor: f64,
    pub star_stagger_ms: f64,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            navbar_threshold_px: 20.0,
            highlight_offset_px: 100.0,
            highlight_debounce_ms: 100.0,
            resize_debounce_ms: 250.0,
            reveal_threshold: 0.1,
            reveal_root_margin: RootMargin {
                bottom: -50.0,
                ..RootMargin::ZERO
            },
            counter_duration_ms: 2000.0,
            counter_tick_ms: 16.0,
            anchor_offset_px: 80.0,
            parallax_factor: 0.5,
            star_stagger_ms: 100.0,
        }
    }
}

impl SiteConfig {
    /// Parse and validate a JSON config. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let non_negative = [
            ("navbarThresholdPx", self.navbar_threshold_px),
            ("highlightOffsetPx", self.highlight_offset_px),
            ("highlightDebounceMs", self.highlight_debounce_ms),
            ("resizeDebounceMs", self.resize_debounce_ms),
            ("anchorOffsetPx", self.anchor_offset_px),
            ("parallaxFactor", self.parallax_factor),
            ("starStaggerMs", self.star_stagger_ms),
        ];
        for (field, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::Negative { field, value });
            }
        }

        let positive = [
            ("counterDurationMs", self.counter_duration_ms),
            ("counterTickMs", self.counter_tick_ms),
        ];
        for (field, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::NotPositive { field, value });
            }
        }

        if !(0.0..=1.0).contains(&self.reveal_threshold) {
            return Err(ConfigError::Threshold(self.reveal_threshold));
        }
        Ok(())
    }

    pub fn reveal_options(&self) -> ObserverOptions {
        ObserverOptions {
            threshold: self.reveal_threshold,
            root_margin: self.reveal_root_margin,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_yields_defaults() {
        let config = SiteConfig::from_json("{}").unwrap_or_else(|_| SiteConfig {
            navbar_threshold_px: -1.0,
            ..SiteConfig::default()
        });
        assert_eq!(config, SiteConfig::default());
        assert_eq!(config.reveal_options().root_margin.to_string(), "0px 0px -50px 0px");
    }

    #[test]
    fn overrides_individual_fields() {
        let config = SiteConfig::from_json(
            r#"{"navbarThresholdPx": 64, "revealRootMargin": "0px 0px -10px 0px"}"#,
        )
        .unwrap_or_default();
        assert_eq!(config.navbar_threshold_px, 64.0);
        assert_eq!(config.reveal_root_margin.bottom, -10.0);
        assert_eq!(config.counter_tick_ms, 16.0);
    }

    #[test]
    fn manifest_errors_are_reported() {
        assert!(parse_manifest(r#"{"navbar": "nav"}"#).is_ok());
        let err = parse_manifest(r#"{"sections": "home"}"#).err();
        assert!(err.is_some_and(|e| e.to_string().starts_with("invalid page manifest")));
    }

    #[test]
    fn rejects_invalid_values() {
        assert!(matches!(
            SiteConfig::from_json(r#"{"counterTickMs": 0}"#),
            Err(ConfigError::NotPositive { field: "counterTickMs", .. })
        ));
        assert!(matches!(
            SiteConfig::from_json(r#"{"highlightDebounceMs": -5}"#),
            Err(ConfigError::Negative { .. })
        ));
        assert!(matches!(
            SiteConfig::from_json(r#"{"revealThreshold": 1.5}"#),
            Err(ConfigError::Threshold(_))
        ));
        assert!(matches!(
            SiteConfig::from_json(r#"{"revealRootMargin": "ten"}"#),
            Err(ConfigError::Json(_))
        ));
    }
}
