//! Configuration file loader with multi-source merging

use super::file_config::FileConfig;
use figment::{
    Figment,
    providers::{Format, Serialized, Toml},
};
use std::path::{Path, PathBuf};

/// Project-level config file names, checked in order
const PROJECT_FILES: [&str; 2] = ["werewolf.toml", ".werewolf.toml"];

/// Configuration loader that handles file discovery and merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all sources with proper priority
    ///
    /// Priority (highest to lowest):
    /// 1. Explicit config path (if provided)
    /// 2. Project root: `./werewolf.toml` or `./.werewolf.toml`
    /// 3. XDG config: `$XDG_CONFIG_HOME/werewolf-council/config.toml`
    /// 4. Fallback: `~/.config/werewolf-council/config.toml`
    /// 5. Default values
    pub fn load(config_path: Option<&PathBuf>) -> Result<FileConfig, Box<figment::Error>> {
        Self::load_from(
            Self::global_config_path().as_deref(),
            Self::project_config_path().as_deref(),
            config_path.map(PathBuf::as_path),
        )
    }

    /// Merge the given files over the defaults, later files winning
    fn load_from(
        global: Option<&Path>,
        project: Option<&Path>,
        explicit: Option<&Path>,
    ) -> Result<FileConfig, Box<figment::Error>> {
        let mut figment = Figment::new().merge(Serialized::defaults(FileConfig::default()));

        if let Some(path) = global
            && path.exists()
        {
            figment = figment.merge(Toml::file(path));
        }

        if let Some(path) = project {
            figment = figment.merge(Toml::file(path));
        }

        // A missing explicit file is an error, not a silent fallback
        if let Some(path) = explicit {
            figment = figment.merge(Toml::file_exact(path));
        }

        figment.extract().map_err(Box::new)
    }

    /// Load only default configuration (for --no-config)
    pub fn load_defaults() -> FileConfig {
        FileConfig::default()
    }

    /// Get the global config file path
    ///
    /// Returns XDG_CONFIG_HOME/werewolf-council/config.toml if set,
    /// otherwise falls back to ~/.config/werewolf-council/config.toml
    pub fn global_config_path() -> Option<PathBuf> {
        std::env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .filter(|p| p.is_absolute())
            .or_else(dirs::config_dir)
            .map(|d| d.join("werewolf-council").join("config.toml"))
    }

    /// Get the project-level config file path (if it exists)
    pub fn project_config_path() -> Option<PathBuf> {
        PROJECT_FILES
            .iter()
            .map(PathBuf::from)
            .find(|path| path.exists())
    }

    /// Print the config file locations being used (for debugging)
    pub fn print_config_sources(explicit: Option<&PathBuf>) {
        println!("Configuration sources (in priority order):");

        if let Some(path) = explicit {
            let found = if path.exists() { "FOUND" } else { "MISSING" };
            println!("  [{:<7}] Explicit: {}", found, path.display());
        }

        if let Some(path) = Self::project_config_path() {
            println!("  [FOUND  ] Project:  {}", path.display());
        } else {
            println!("  [       ] Project:  ./werewolf.toml or ./.werewolf.toml");
        }

        if let Some(path) = Self::global_config_path() {
            let found = if path.exists() { "FOUND" } else { "" };
            println!("  [{:<7}] Global:   {}", found, path.display());
        }

        println!("  [       ] Default:  built-in defaults");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OracleKind;
    use std::fs;

    #[test]
    fn test_load_defaults() {
        let config = ConfigLoader::load_defaults();
        assert_eq!(config.game.players, 6);
        assert!(config.roles.is_empty());
    }

    #[test]
    fn test_global_config_path_names_the_app() {
        if let Some(path) = ConfigLoader::global_config_path() {
            assert!(path.to_string_lossy().contains("werewolf-council"));
            assert!(path.ends_with("config.toml"));
        }
    }

    #[test]
    fn test_later_files_override_earlier() {
        let dir = tempfile::tempdir().unwrap();
        let global = dir.path().join("global.toml");
        let project = dir.path().join("werewolf.toml");
        fs::write(&global, "[game]\nplayers = 8\nmax_rounds = 4\n").unwrap();
        fs::write(&project, "[game]\nmax_rounds = 7\n\n[oracle]\nkind = \"chat\"\n").unwrap();

        let config = ConfigLoader::load_from(Some(&global), Some(&project), None).unwrap();
        assert_eq!(config.game.players, 8);
        assert_eq!(config.game.max_rounds, 7);
        assert_eq!(config.oracle.kind, OracleKind::Chat);
        // Untouched sections keep their defaults
        assert!(config.output.color);
    }

    #[test]
    fn test_explicit_file_wins() {
        let dir = tempfile::tempdir().unwrap();
        let project = dir.path().join("werewolf.toml");
        let explicit = dir.path().join("custom.toml");
        fs::write(&project, "[game]\nseed = 1\n").unwrap();
        fs::write(&explicit, "[game]\nseed = 2\n\n[roles]\nwerewolf = 1\nvillager = 3\n").unwrap();

        let config = ConfigLoader::load_from(None, Some(&project), Some(&explicit)).unwrap();
        assert_eq!(config.game.seed, Some(2));
        assert_eq!(config.roles.get("villager"), Some(&3));
    }

    #[test]
    fn test_missing_global_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        let config = ConfigLoader::load_from(Some(&missing), None, None).unwrap();
        assert_eq!(config.game.max_rounds, 10);
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(ConfigLoader::load_from(None, None, Some(&missing)).is_err());
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.toml");
        fs::write(&path, "[game]\nplayers = \"many\"\n").unwrap();
        assert!(ConfigLoader::load_from(None, None, Some(&path)).is_err());
    }
}
