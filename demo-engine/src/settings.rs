use crate::error::{CatalogError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Timing and jitter knobs for the simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoSettings {
    /// Period of the jitter recompute.
    pub tick_interval_ms: u64,
    /// Period of the automatic step advance.
    pub advance_interval_ms: u64,
    /// Full width of the jitter band relative to the base (0.05 = ±2.5%).
    pub jitter_ratio: f64,
}

impl Default for DemoSettings {
    fn default() -> Self {
        Self {
            tick_interval_ms: 1500,
            advance_interval_ms: 5000,
            jitter_ratio: 0.05,
        }
    }
}

impl DemoSettings {
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    pub fn advance_interval(&self) -> Duration {
        Duration::from_millis(self.advance_interval_ms)
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        Self::parse(json, "<inline>")
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| CatalogError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let settings = Self::parse(&raw, &path.display().to_string())?;
        tracing::info!(path = %path.display(), "loaded demo settings");
        Ok(settings)
    }

    fn parse(json: &str, origin: &str) -> Result<Self> {
        let settings: Self = serde_json::from_str(json).map_err(|source| CatalogError::Parse {
            path: origin.to_string(),
            source,
        })?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<()> {
        if self.tick_interval_ms == 0 {
            return Err(CatalogError::validation("tick_interval_ms", "must be positive"));
        }
        if self.advance_interval_ms == 0 {
            return Err(CatalogError::validation(
                "advance_interval_ms",
                "must be positive",
            ));
        }
        if !(0.0..=1.0).contains(&self.jitter_ratio) {
            return Err(CatalogError::validation(
                "jitter_ratio",
                format!("{} is outside 0.0..=1.0", self.jitter_ratio),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let s = DemoSettings::default();
        assert_eq!(s.tick_interval(), Duration::from_millis(1500));
        assert_eq!(s.advance_interval(), Duration::from_secs(5));
        assert_eq!(s.jitter_ratio, 0.05);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let s = DemoSettings::from_json_str(r#"{"tick_interval_ms": 500}"#).unwrap();
        assert_eq!(s.tick_interval_ms, 500);
        assert_eq!(s.advance_interval_ms, 5000);
    }

    #[test]
    fn test_rejects_zero_interval() {
        let err = DemoSettings::from_json_str(r#"{"advance_interval_ms": 0}"#).unwrap_err();
        assert!(matches!(err, CatalogError::Validation { ref field, .. } if field == "advance_interval_ms"));
    }

    #[test]
    fn test_rejects_ratio_out_of_range() {
        let err = DemoSettings::from_json_str(r#"{"jitter_ratio": 1.5}"#).unwrap_err();
        assert!(matches!(err, CatalogError::Validation { .. }));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"jitter_ratio": 0.1}}"#).unwrap();
        let s = DemoSettings::from_json_file(file.path()).unwrap();
        assert_eq!(s.jitter_ratio, 0.1);
    }

    #[test]
    fn test_missing_file_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = DemoSettings::from_json_file(dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, CatalogError::Read { .. }));
    }
}
