use rack_elevation_engine::{CollisionPolicy, PageLinks, RackParser, Renderer, WikiLinkResolver};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },
}

/// How to settle two items anchored on the same unit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CollisionSetting {
    #[default]
    LastWriteWins,
    KeepFirst,
}

impl From<CollisionSetting> for CollisionPolicy {
    fn from(setting: CollisionSetting) -> Self {
        match setting {
            CollisionSetting::LastWriteWins => CollisionPolicy::LastWriteWins,
            CollisionSetting::KeepFirst => CollisionPolicy::KeepFirst,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// URL template for internal page links; `{id}` is replaced by the page id.
    pub page_url: String,
    pub collision_policy: CollisionSetting,
    /// CSS inlined into standalone HTML pages instead of the built-in style.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stylesheet: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            page_url: PageLinks::DEFAULT_TEMPLATE.to_string(),
            collision_policy: CollisionSetting::default(),
            stylesheet: None,
        }
    }
}

impl Config {
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.to_path_buf(),
                source,
            }
        })?;

        let mut config: Config =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.to_path_buf(),
                source,
            })?;

        // Expand shell variables and tilde in the stylesheet path
        config.stylesheet = config
            .stylesheet
            .map(|path| Self::expand_path(&path).unwrap_or(path));

        Ok(Some(config))
    }

    pub fn load() -> Result<Option<Self>, ConfigError> {
        let config_path = Self::config_path();
        Self::load_from_path(&config_path)
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, config_path: P) -> anyhow::Result<()> {
        let config_path = config_path.as_ref();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        let config_dir = shellexpand::tilde("~/.config/rack-elevation");
        PathBuf::from(config_dir.as_ref()).join("config.toml")
    }

    /// A parser whose internal links use the configured page URL template.
    pub fn parser(&self) -> RackParser {
        RackParser::default().with_links(WikiLinkResolver::new(PageLinks::new(
            self.page_url.as_str(),
        )))
    }

    pub fn renderer(&self) -> Renderer {
        Renderer::new(self.collision_policy.into())
    }

    fn expand_path(path: &Path) -> Option<PathBuf> {
        let path_str = path.to_string_lossy();
        match shellexpand::full(&path_str) {
            Ok(expanded) => Some(PathBuf::from(expanded.as_ref())),
            Err(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rack_elevation_engine::{StructuralRow, render_document};
    use std::env;
    use tempfile::TempDir;

    #[test]
    fn test_config_path() {
        let config_path = Config::config_path();
        let path_str = config_path.to_string_lossy();

        assert!(!path_str.starts_with('~'));
        assert!(path_str.ends_with(".config/rack-elevation/config.toml"));
    }

    #[test]
    fn test_empty_file_gives_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.page_url, "/doku.php?id={id}");
        assert_eq!(config.collision_policy, CollisionSetting::LastWriteWins);
    }

    #[test]
    fn test_collision_policy_names() {
        let config: Config = toml::from_str(r#"collision_policy = "keep-first""#).unwrap();
        assert_eq!(config.collision_policy, CollisionSetting::KeepFirst);
        assert_eq!(
            CollisionPolicy::from(config.collision_policy),
            CollisionPolicy::KeepFirst
        );

        let result: Result<Config, _> = toml::from_str(r#"collision_policy = "first""#);
        assert!(result.is_err());
    }

    #[test]
    fn test_config_serialization_roundtrip() {
        let original = Config {
            page_url: "https://wiki.example.com/{id}".to_string(),
            collision_policy: CollisionSetting::KeepFirst,
            stylesheet: Some(PathBuf::from("/tmp/rack.css")),
        };

        let toml_str = toml::to_string(&original).unwrap();
        let deserialized: Config = toml::from_str(&toml_str).unwrap();

        assert_eq!(original, deserialized);
    }

    #[test]
    fn test_expand_path_with_tilde() {
        let path = PathBuf::from("~/styles/rack.css");
        let expanded = Config::expand_path(&path).unwrap();

        assert!(!expanded.to_string_lossy().starts_with('~'));
        assert!(expanded.to_string_lossy().contains("styles/rack.css"));
    }

    #[test]
    fn test_stylesheet_env_var_is_expanded_on_load() {
        unsafe {
            env::set_var("RACK_STYLE_DIR", "/custom/styles");
        }

        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("config.toml");
        std::fs::write(&config_file, "stylesheet = \"$RACK_STYLE_DIR/rack.css\"\n").unwrap();

        let config = Config::load_from_path(&config_file).unwrap().unwrap();
        assert_eq!(config.stylesheet, Some(PathBuf::from("/custom/styles/rack.css")));

        unsafe {
            env::remove_var("RACK_STYLE_DIR");
        }
    }

    #[test]
    fn test_load_config_file_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let non_existent_config = temp_dir.path().join("nonexistent.toml");

        let result = Config::load_from_path(&non_existent_config).unwrap();

        assert!(result.is_none());
    }

    #[test]
    fn test_load_invalid_toml_reports_path() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("config.toml");
        std::fs::write(&config_file, "page_url = [").unwrap();

        let err = Config::load_from_path(&config_file).unwrap_err();
        assert!(matches!(err, ConfigError::ConfigParseError { .. }));
        assert!(err.to_string().contains("config.toml"));
    }

    #[test]
    fn test_save_and_load_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("nested").join("config.toml");
        let test_config = Config {
            collision_policy: CollisionSetting::KeepFirst,
            ..Config::default()
        };

        test_config.save_to_path(&config_file).unwrap();
        let loaded_config = Config::load_from_path(&config_file).unwrap().unwrap();

        assert_eq!(loaded_config, test_config);
    }

    #[test]
    fn test_parser_and_renderer_follow_config() {
        let config = Config {
            page_url: "/wiki/{id}".to_string(),
            collision_policy: CollisionSetting::KeepFirst,
            stylesheet: None,
        };
        let text = "<rack height=1>\n1 1 First link:[[Ops/PDU]]\n1 1 Second\n</rack>";

        let outputs = render_document(text, &config.parser(), &config.renderer());
        let StructuralRow::Anchor { block, .. } = &outputs[0].rendered.rows[1] else {
            panic!("expected anchor row, got {:?}", outputs[0].rendered.rows[1]);
        };
        assert_eq!(block.label, "First");
        assert_eq!(block.link.as_ref().map(|l| l.url.as_str()), Some("/wiki/ops:pdu"));
    }
}
