//! Trainer configuration loaded from YAML.
//!
//! ```yaml
//! key: D
//! signature-key: D        # optional, defaults to key
//! highlight:
//!   roots: true
//!   tritones: true
//! palette:
//!   priority: [roots, tritones]
//!   colors:
//!     roots: "#d00"
//!     tritones: "#0a0"
//! ```
//!
//! Every field is optional; a missing key falls back to the first entry of
//! the key table (no key).

use serde::Deserialize;

use crate::error::HarmonyError;
use crate::highlight::{HighlightModes, HighlightPalette};

#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct TrainerConfig {
    pub key: Option<String>,
    pub signature_key: Option<String>,
    #[serde(default)]
    pub highlight: HighlightModes,
    #[serde(default)]
    pub palette: HighlightPalette,
}

impl TrainerConfig {
    /// Parse a configuration document
    ///
    /// # Example
    /// ```
    /// use harmony::TrainerConfig;
    ///
    /// let config = TrainerConfig::from_yaml("key: Bb\nhighlight:\n  roots: true\n").unwrap();
    /// assert_eq!(config.key.as_deref(), Some("Bb"));
    /// assert!(config.highlight.roots);
    /// assert!(!config.highlight.tritones);
    /// ```
    pub fn from_yaml(source: &str) -> Result<Self, HarmonyError> {
        if source.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(source).map_err(|e| HarmonyError::Config(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::highlight::HighlightMode;

    #[test]
    fn test_full_config() {
        let config = TrainerConfig::from_yaml(
            r##"
key: d
signature-key: F
highlight:
  roots: true
  octaves: true
palette:
  priority: [octaves, roots]
  colors:
    roots: "#d00"
    octaves: "#00d"
"##,
        )
        .unwrap();

        assert_eq!(config.key.as_deref(), Some("d"));
        assert_eq!(config.signature_key.as_deref(), Some("F"));
        assert!(config.highlight.roots && config.highlight.octaves);
        assert!(!config.highlight.doubles);
        assert_eq!(
            config.palette.priority,
            vec![HighlightMode::Octaves, HighlightMode::Roots]
        );
        assert_eq!(
            config.palette.colors.get(&HighlightMode::Roots).map(String::as_str),
            Some("#d00")
        );
    }

    #[test]
    fn test_empty_config() {
        assert_eq!(TrainerConfig::from_yaml("").unwrap(), TrainerConfig::default());
        assert_eq!(TrainerConfig::from_yaml("  \n").unwrap(), TrainerConfig::default());
    }

    #[test]
    fn test_invalid_config() {
        assert!(matches!(
            TrainerConfig::from_yaml("tempo: 120"),
            Err(HarmonyError::Config(_))
        ));
        assert!(matches!(
            TrainerConfig::from_yaml("highlight:\n  fifths: true"),
            Err(HarmonyError::Config(_))
        ));
        assert!(matches!(
            TrainerConfig::from_yaml("palette:\n  priority: [sevenths]"),
            Err(HarmonyError::Config(_))
        ));
    }
}
