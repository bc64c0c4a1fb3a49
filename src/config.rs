use std::fs::read_to_string;
use std::path::{Path, PathBuf};

use clap::ArgMatches;
use yaml_rust2::{Yaml, YamlLoader};

use crate::demo::DEFAULT_DEMO_URL;
use crate::error::ConfigError;
use crate::wishlist::DEFAULT_WISHLIST_URL;

#[derive(Debug, Clone, PartialEq)]
pub struct Endpoints {
    /// Base under which `<steamid>/wishlistdata` lives.
    pub wishlist_url: String,
    pub demo_url: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            wishlist_url: DEFAULT_WISHLIST_URL.to_string(),
            demo_url: DEFAULT_DEMO_URL.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub endpoints: Endpoints,
    pub output: PathBuf,
    pub demos_only: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoints: Endpoints::default(),
            output: PathBuf::from("wishlist.html"),
            demos_only: false,
        }
    }
}

impl Config {
    /// Config file (if any) with command line flags applied on top.
    pub fn from_matches(matches: &ArgMatches) -> Result<Self, ConfigError> {
        let mut config = match matches.get_one::<String>("config") {
            Some(path) => Self::load(Path::new(path))?,
            None => Self::default(),
        };

        if let Some(output) = matches.get_one::<String>("output") {
            config.output = PathBuf::from(output);
        }
        if matches.get_flag("demos_only") {
            config.demos_only = true;
        }

        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&text)
    }

    /// Unknown keys are ignored. Missing keys keep their defaults.
    pub fn from_yaml_str(text: &str) -> Result<Self, ConfigError> {
        let docs = YamlLoader::load_from_str(text)?;
        let mut config = Self::default();

        let Some(doc) = docs.first() else {
            return Ok(config);
        };
        match doc {
            Yaml::Hash(_) => {}
            Yaml::Null => return Ok(config),
            _ => {
                return Err(ConfigError::Invalid(
                    "top level must be a mapping".to_string(),
                ))
            }
        }

        if let Some(url) = string_key(doc, "wishlist_url")? {
            config.endpoints.wishlist_url = url;
        }
        if let Some(url) = string_key(doc, "demo_url")? {
            config.endpoints.demo_url = url;
        }
        if let Some(output) = string_key(doc, "output")? {
            config.output = PathBuf::from(output);
        }
        match &doc["demos_only"] {
            Yaml::BadValue | Yaml::Null => {}
            Yaml::Boolean(b) => config.demos_only = *b,
            _ => {
                return Err(ConfigError::Invalid(
                    "demos_only must be true or false".to_string(),
                ))
            }
        }

        Ok(config)
    }
}

fn string_key(doc: &Yaml, key: &str) -> Result<Option<String>, ConfigError> {
    match &doc[key] {
        Yaml::BadValue | Yaml::Null => Ok(None),
        Yaml::String(s) if !s.trim().is_empty() => Ok(Some(s.trim().to_string())),
        _ => Err(ConfigError::Invalid(format!("{key} must be a non-empty string"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::build_command;

    #[test]
    fn empty_file_gives_defaults() {
        assert_eq!(Config::from_yaml_str("").unwrap(), Config::default());
        assert_eq!(Config::from_yaml_str("~").unwrap(), Config::default());
    }

    #[test]
    fn reads_known_keys() {
        let config = Config::from_yaml_str(
            "wishlist_url: http://localhost:8080/profiles\n\
             demo_url: http://localhost:8080/demos\n\
             output: out/demos.html\n\
             demos_only: true\n\
             something_else: 3\n",
        )
        .unwrap();

        assert_eq!(config.endpoints.wishlist_url, "http://localhost:8080/profiles");
        assert_eq!(config.endpoints.demo_url, "http://localhost:8080/demos");
        assert_eq!(config.output, PathBuf::from("out/demos.html"));
        assert!(config.demos_only);
    }

    #[test]
    fn rejects_wrong_types() {
        assert!(matches!(
            Config::from_yaml_str("demos_only: sometimes"),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            Config::from_yaml_str("output: 12"),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            Config::from_yaml_str("- a\n- b"),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn malformed_yaml_is_an_error() {
        assert!(matches!(
            Config::from_yaml_str("output: [unclosed"),
            Err(ConfigError::Yaml(_))
        ));
    }

    #[test]
    fn flags_override_defaults() {
        let matches = build_command()
            .try_get_matches_from(["demolist", "--user-id", "1", "-o", "me.html", "--demos-only"])
            .unwrap();

        let config = Config::from_matches(&matches).unwrap();

        assert_eq!(config.output, PathBuf::from("me.html"));
        assert!(config.demos_only);
        assert_eq!(config.endpoints, Endpoints::default());
    }

    #[test]
    fn missing_config_file_is_an_error() {
        let matches = build_command()
            .try_get_matches_from(["demolist", "--user-id", "1", "-c", "/nonexistent/demolist.yaml"])
            .unwrap();

        assert!(matches!(
            Config::from_matches(&matches),
            Err(ConfigError::Io { .. })
        ));
    }
}
