//! Engine settings loaded from the environment.

use std::path::PathBuf;

use armoury_domain::RenderOptions;

pub const CATALOG_PATH_VAR: &str = "ARMOURY_CATALOG_PATH";
pub const AUTO_RESET_GROUPS_VAR: &str = "ARMOURY_AUTO_RESET_GROUPS";
pub const SUMMARY_PARENTHESES_VAR: &str = "ARMOURY_SUMMARY_PARENTHESES";
pub const SUMMARY_COMMAS_VAR: &str = "ARMOURY_SUMMARY_COMMAS";

/// Runtime switches for the sheet use cases.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// JSON array of item documents to serve
    pub catalog_path: Option<PathBuf>,
    /// Rebuild the default grouping after attach/remove instead of leaving it stale
    pub auto_reset_groups: bool,
    pub summary: RenderOptions,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            catalog_path: None,
            auto_reset_groups: true,
            summary: RenderOptions::default(),
        }
    }
}

impl Settings {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from any key lookup. Unparseable values keep their
    /// default and log a warning.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let catalog_path = lookup(CATALOG_PATH_VAR)
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .map(PathBuf::from);

        Self {
            catalog_path,
            auto_reset_groups: bool_var(
                &lookup,
                AUTO_RESET_GROUPS_VAR,
                defaults.auto_reset_groups,
            ),
            summary: RenderOptions {
                parentheses: bool_var(
                    &lookup,
                    SUMMARY_PARENTHESES_VAR,
                    defaults.summary.parentheses,
                ),
                commas: bool_var(&lookup, SUMMARY_COMMAS_VAR, defaults.summary.commas),
            },
        }
    }
}

fn bool_var(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: bool) -> bool {
    let Some(raw) = lookup(key) else {
        return default;
    };
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => true,
        "0" | "false" | "no" | "off" => false,
        other => {
            tracing::warn!(key, value = other, default, "Invalid boolean setting, using default");
            default
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn settings(vars: &[(&str, &str)]) -> Settings {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Settings::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn empty_environment_gives_defaults() {
        assert_eq!(settings(&[]), Settings::default());
        assert!(Settings::default().auto_reset_groups);
    }

    #[test]
    fn reads_all_variables() {
        let s = settings(&[
            (CATALOG_PATH_VAR, "data/catalog.json"),
            (AUTO_RESET_GROUPS_VAR, "false"),
            (SUMMARY_PARENTHESES_VAR, "0"),
            (SUMMARY_COMMAS_VAR, "Off"),
        ]);

        assert_eq!(s.catalog_path, Some(PathBuf::from("data/catalog.json")));
        assert!(!s.auto_reset_groups);
        assert!(!s.summary.parentheses);
        assert!(!s.summary.commas);
    }

    #[test]
    fn invalid_boolean_falls_back_to_default() {
        let s = settings(&[(AUTO_RESET_GROUPS_VAR, "sometimes")]);
        assert!(s.auto_reset_groups);
    }

    #[test]
    fn blank_catalog_path_is_ignored() {
        let s = settings(&[(CATALOG_PATH_VAR, "   ")]);
        assert_eq!(s.catalog_path, None);
    }
}
