use serde::Deserialize;

use crosspath_base::{CrosspathResult, Platform, err};

use crate::comparison::Comparison;

/// Overrides for a [`Provider`](crate::Provider), usually read from a TOML file.
///
/// Every field is optional; missing values fall back to the defaults of the platform reported
/// by the PAL.
///
/// ```toml
/// platform = "windows"
/// separator = "/"
/// comparison = "case_sensitive"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProviderConfig {
    /// Platform whose path grammar is used.
    #[serde(default)]
    pub platform: Option<Platform>,
    /// Separator used when rendering paths.
    #[serde(default)]
    pub separator: Option<char>,
    /// Separator between entries of a path list.
    #[serde(default)]
    pub list_separator: Option<char>,
    #[serde(default)]
    pub comparison: Option<Comparison>,
}

impl ProviderConfig {
    pub fn from_toml_str(input: &str) -> CrosspathResult<Self> {
        toml::from_str(input).map_err(|e| err!("Failed to parse provider config: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config() {
        let config = ProviderConfig::from_toml_str("").unwrap();
        assert_eq!(config, ProviderConfig::default());
    }

    #[test]
    fn test_full_config() {
        let config = ProviderConfig::from_toml_str(
            r#"
            platform = "windows"
            separator = "/"
            list_separator = ","
            comparison = "case_sensitive"
            "#,
        )
        .unwrap();
        assert_eq!(config.platform, Some(Platform::Windows));
        assert_eq!(config.separator, Some('/'));
        assert_eq!(config.list_separator, Some(','));
        assert_eq!(config.comparison, Some(Comparison::CaseSensitive));
    }

    #[test]
    fn test_backslash_separator() {
        let config = ProviderConfig::from_toml_str(r#"separator = "\\""#).unwrap();
        assert_eq!(config.separator, Some('\\'));
    }

    #[test]
    fn test_multi_character_separator_is_rejected() {
        let error = ProviderConfig::from_toml_str(r#"separator = "//""#).unwrap_err();
        assert!(
            error
                .to_string()
                .starts_with("Failed to parse provider config:")
        );
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        assert!(ProviderConfig::from_toml_str("colour = \"blue\"").is_err());
    }
}
