//! Application configuration: TOML file loading, CLI overrides, and defaults.
//!
//! Resolution order (first found wins, values merge/override):
//! 1. CLI flags (`--config`, `--ascii`)
//! 2. `$TREENAV_CONFIG` environment variable (path to config file)
//! 3. Project-local `.treenav.toml` in the current working directory
//! 4. Global `~/.config/treenav/config.toml`
//! 5. Built-in defaults

use std::path::{Path, PathBuf};

use serde::Deserialize;

// ── Section configs ──────────────────────────────────────────────────────────

/// Tree panel settings.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct TreeConfig {
    /// Use Unicode row indicators (false = ASCII fallback).
    pub use_icons: Option<bool>,
}

/// Color settings for a custom theme.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct ThemeColorsConfig {
    pub tree_fg: Option<String>,
    pub tree_dir_fg: Option<String>,
    pub tree_file_fg: Option<String>,
    pub tree_selected_bg: Option<String>,
    pub tree_selected_fg: Option<String>,
    pub border_fg: Option<String>,
    pub status_bg: Option<String>,
    pub status_fg: Option<String>,
}

/// Theme configuration section.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct ThemeConfig {
    /// Color scheme: "dark", "light", "custom".
    pub scheme: Option<String>,
    /// Custom color overrides.
    pub custom: Option<ThemeColorsConfig>,
}

// ── Top-level config ─────────────────────────────────────────────────────────

/// Top-level application configuration.
///
/// All fields are optional so that partial configs from different sources
/// can be merged together (higher-priority sources override lower ones).
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub tree: TreeConfig,
    pub theme: ThemeConfig,
}

impl AppConfig {
    /// Merge `other` on top of `self` — `other`'s `Some` values win.
    pub fn merge(self, other: &AppConfig) -> AppConfig {
        AppConfig {
            tree: TreeConfig {
                use_icons: other.tree.use_icons.or(self.tree.use_icons),
            },
            theme: ThemeConfig {
                scheme: other.theme.scheme.clone().or(self.theme.scheme),
                custom: other.theme.custom.clone().or(self.theme.custom),
            },
        }
    }
}

// ── Config file locator ──────────────────────────────────────────────────────

/// Return the list of candidate config file paths in priority order.
///
/// Does NOT include the CLI `--config` path — that is handled separately.
fn candidate_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    // 1. $TREENAV_CONFIG environment variable
    if let Ok(env_path) = std::env::var("TREENAV_CONFIG") {
        paths.push(PathBuf::from(env_path));
    }

    // 2. Project-local `.treenav.toml` in CWD
    if let Ok(cwd) = std::env::current_dir() {
        paths.push(cwd.join(".treenav.toml"));
    }

    // 3. Global `~/.config/treenav/config.toml`
    if let Some(config_dir) = dirs::config_dir() {
        paths.push(config_dir.join("treenav").join("config.toml"));
    }

    paths
}

/// Try to read and parse a TOML config file. Returns `None` if the file
/// doesn't exist or can't be parsed (with a warning printed to stderr).
fn load_file(path: &Path) -> Option<AppConfig> {
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(_) => return None,
    };
    match toml::from_str::<AppConfig>(&content) {
        Ok(cfg) => Some(cfg),
        Err(e) => {
            eprintln!(
                "Warning: failed to parse config file {}: {}",
                path.display(),
                e
            );
            None
        }
    }
}

/// Load the effective configuration.
///
/// An explicit `--config` path skips discovery entirely; otherwise candidate
/// files are layered lowest-priority first so higher-priority sources
/// override.
pub fn load(explicit: Option<&Path>) -> AppConfig {
    if let Some(path) = explicit {
        return load_file(path).unwrap_or_default();
    }

    let mut config = AppConfig::default();
    for path in candidate_paths().iter().rev() {
        if let Some(layer) = load_file(path) {
            config = config.merge(&layer);
        }
    }
    config
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn parse_full_config() {
        let cfg: AppConfig = toml::from_str(
            r##"
            [tree]
            use_icons = false

            [theme]
            scheme = "custom"

            [theme.custom]
            tree_dir_fg = "#ff0000"
            "##,
        )
        .unwrap();
        assert_eq!(cfg.tree.use_icons, Some(false));
        assert_eq!(cfg.theme.scheme.as_deref(), Some("custom"));
        assert_eq!(
            cfg.theme.custom.unwrap().tree_dir_fg.as_deref(),
            Some("#ff0000")
        );
    }

    #[test]
    fn parse_empty_config() {
        let cfg: AppConfig = toml::from_str("").unwrap();
        assert!(cfg.tree.use_icons.is_none());
        assert!(cfg.theme.scheme.is_none());
    }

    #[test]
    fn merge_other_wins() {
        let base: AppConfig = toml::from_str("[tree]\nuse_icons = true").unwrap();
        let over: AppConfig = toml::from_str("[tree]\nuse_icons = false").unwrap();
        let merged = base.merge(&over);
        assert_eq!(merged.tree.use_icons, Some(false));
    }

    #[test]
    fn merge_keeps_base_when_other_is_none() {
        let base: AppConfig = toml::from_str("[theme]\nscheme = \"light\"").unwrap();
        let over = AppConfig::default();
        let merged = base.merge(&over);
        assert_eq!(merged.theme.scheme.as_deref(), Some("light"));
    }

    #[test]
    fn load_file_reads_toml() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[tree]\nuse_icons = false").unwrap();
        let cfg = load_file(file.path()).unwrap();
        assert_eq!(cfg.tree.use_icons, Some(false));
    }

    #[test]
    fn load_file_missing_returns_none() {
        assert!(load_file(Path::new("/nonexistent/treenav.toml")).is_none());
    }

    #[test]
    fn explicit_config_skips_discovery() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[theme]\nscheme = \"light\"").unwrap();
        let cfg = load(Some(file.path()));
        assert_eq!(cfg.theme.scheme.as_deref(), Some("light"));
    }
}
