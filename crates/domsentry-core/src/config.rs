//! Configuration loading and parsing for domsentry
//!
//! Provides functionality to load and parse `domsentry.toml` configuration files.

use serde::Deserialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

pub const CONFIG_FILENAME: &str = "domsentry.toml";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_USER_AGENT: &str = concat!("domsentry/", env!("CARGO_PKG_VERSION"));

const KNOWN_TOP_LEVEL_KEYS: &[&str] = &["rules", "fetch"];
const KNOWN_RULES_KEYS: &[&str] = &["file", "patterns"];
const KNOWN_FETCH_KEYS: &[&str] = &["timeout_secs", "user_agent"];

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid TOML in '{path}': {message}")]
    ParseError { path: PathBuf, message: String },
}

#[derive(Debug, Clone, Default)]
pub struct ConfigResult {
    pub config: Config,
    pub warnings: Vec<String>,
    /// Where the config was found, if anywhere.
    pub path: Option<PathBuf>,
}

impl ConfigResult {
    /// The configured rules file, resolved against the config file's directory.
    pub fn rules_file(&self) -> Option<PathBuf> {
        let file = self.config.rules.file.as_ref()?;
        match self.path.as_deref().and_then(Path::parent) {
            Some(dir) if file.is_relative() => Some(dir.join(file)),
            _ => Some(file.clone()),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub rules: RulesConfig,
    pub fetch: FetchConfig,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct RulesConfig {
    pub file: Option<PathBuf>,
    /// Extra rule lines appended after the rules file.
    pub patterns: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct FetchConfig {
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();
    loop {
        let config_path = current.join(CONFIG_FILENAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if !current.pop() {
            return None;
        }
    }
}

pub fn load_config_with_warnings(path: &Path) -> Result<ConfigResult, ConfigError> {
    let content = read_config(path)?;
    let config = parse_config(path, &content)?;
    let warnings = detect_unknown_keys(&content);

    Ok(ConfigResult {
        config,
        warnings,
        path: Some(path.to_path_buf()),
    })
}

fn read_config(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.to_path_buf(),
        source: e,
    })
}

fn parse_config(path: &Path, content: &str) -> Result<Config, ConfigError> {
    toml::from_str(content).map_err(|e| ConfigError::ParseError {
        path: path.to_path_buf(),
        message: e.message().to_string(),
    })
}

fn detect_unknown_keys(content: &str) -> Vec<String> {
    let mut warnings = Vec::new();

    let table: toml::Table = match content.parse() {
        Ok(t) => t,
        Err(_) => return warnings,
    };

    let known_top: HashSet<&str> = KNOWN_TOP_LEVEL_KEYS.iter().copied().collect();
    for key in table.keys() {
        if !known_top.contains(key.as_str()) {
            warnings.push(format!("Unknown config option: '{}'", key));
        }
    }

    for (section, known) in [("rules", KNOWN_RULES_KEYS), ("fetch", KNOWN_FETCH_KEYS)] {
        if let Some(toml::Value::Table(entries)) = table.get(section) {
            for key in entries.keys() {
                if !known.contains(&key.as_str()) {
                    warnings.push(format!(
                        "Unknown config option in [{}]: '{}'",
                        section, key
                    ));
                }
            }
        }
    }

    warnings
}

/// Loads the nearest config, or the defaults when there is none. A config file
/// that exists and fails to load is an error.
pub fn load_config_or_default_with_warnings(
    start_dir: &Path,
) -> Result<ConfigResult, ConfigError> {
    match find_config_file(start_dir) {
        Some(path) => load_config_with_warnings(&path),
        None => Ok(ConfigResult::default()),
    }
}

pub const STARTER_CONFIG: &str = r#"# domsentry configuration

[rules]
# Rules file used when --rules is not given, relative to this file.
file = "domsentry-rules.txt"
# Extra patterns appended after the rules file.
patterns = []

[fetch]
timeout_secs = 30
"#;

pub const STARTER_RULES: &str = "\
element.onevent
element.innerHTML
element.outerHTML
document.write
document.cookie
eval
setTimeout
insertAdjacentHTML
html
";

pub const STARTER_RULES_FILENAME: &str = "domsentry-rules.txt";

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn create_temp_dir() -> tempfile::TempDir {
        tempfile::tempdir().expect("Failed to create temp dir")
    }

    #[test]
    fn load_config_from_file() {
        let dir = create_temp_dir();
        let config_path = dir.path().join(CONFIG_FILENAME);
        fs::write(
            &config_path,
            r#"
[rules]
file = "rules.txt"
patterns = ["eval", "document.cookie"]

[fetch]
timeout_secs = 5
user_agent = "scanner-test"
"#,
        )
        .unwrap();

        let config = load_config_with_warnings(&config_path).unwrap().config;

        assert_eq!(config.rules.file, Some(PathBuf::from("rules.txt")));
        assert_eq!(config.rules.patterns, vec!["eval", "document.cookie"]);
        assert_eq!(config.fetch.timeout_secs, 5);
        assert_eq!(config.fetch.user_agent, "scanner-test");
    }

    #[test]
    fn default_config_when_missing() {
        let dir = create_temp_dir();

        let config = load_config_or_default_with_warnings(dir.path()).unwrap().config;

        assert_eq!(config, Config::default());
        assert!(config.rules.file.is_none());
        assert!(config.rules.patterns.is_empty());
        assert_eq!(config.fetch.timeout_secs, DEFAULT_TIMEOUT_SECS);
    }

    #[test]
    fn error_on_invalid_toml() {
        let dir = create_temp_dir();
        let config_path = dir.path().join(CONFIG_FILENAME);
        fs::write(&config_path, "this is not valid { toml }").unwrap();

        let err = load_config_with_warnings(&config_path).unwrap_err();

        match err {
            ConfigError::ParseError { path, message } => {
                assert_eq!(path, config_path);
                assert!(!message.is_empty());
            }
            _ => panic!("Expected ParseError"),
        }
    }

    #[test]
    fn error_on_wrong_value_type() {
        let dir = create_temp_dir();
        let config_path = dir.path().join(CONFIG_FILENAME);
        fs::write(&config_path, "[fetch]\ntimeout_secs = \"soon\"").unwrap();

        assert!(matches!(
            load_config_with_warnings(&config_path),
            Err(ConfigError::ParseError { .. })
        ));
    }

    #[test]
    fn find_config_file_in_current_directory() {
        let dir = create_temp_dir();
        let config_path = dir.path().join(CONFIG_FILENAME);
        fs::write(&config_path, "").unwrap();

        let found = find_config_file(dir.path());

        assert_eq!(found, Some(config_path));
    }

    #[test]
    fn find_config_file_in_parent_directory() {
        let parent = create_temp_dir();
        let child = parent.path().join("site").join("pages");
        fs::create_dir_all(&child).unwrap();
        let config_path = parent.path().join(CONFIG_FILENAME);
        fs::write(&config_path, "").unwrap();

        let found = find_config_file(&child);

        assert_eq!(found, Some(config_path));
    }

    #[test]
    fn find_config_file_returns_none_when_not_found() {
        let dir = create_temp_dir();

        assert!(find_config_file(dir.path()).is_none());
    }

    #[test]
    fn partial_config_uses_defaults() {
        let dir = create_temp_dir();
        let config_path = dir.path().join(CONFIG_FILENAME);
        fs::write(&config_path, "[fetch]\ntimeout_secs = 10").unwrap();

        let config = load_config_with_warnings(&config_path).unwrap().config;

        assert_eq!(config.fetch.timeout_secs, 10);
        assert_eq!(config.fetch.user_agent, DEFAULT_USER_AGENT);
        assert_eq!(config.rules, RulesConfig::default());
    }

    #[test]
    fn config_error_display_is_helpful() {
        let err = ConfigError::ParseError {
            path: PathBuf::from("/path/to/domsentry.toml"),
            message: "expected `=`".to_string(),
        };

        let msg = format!("{}", err);

        assert!(msg.contains("/path/to/domsentry.toml"));
        assert!(msg.contains("expected `=`"));
    }

    #[test]
    fn warns_on_unknown_top_level_option() {
        let dir = create_temp_dir();
        let config_path = dir.path().join(CONFIG_FILENAME);
        fs::write(&config_path, "include = [\"src/**\"]\n[rules]\nfile = \"r.txt\"").unwrap();

        let result = load_config_with_warnings(&config_path).unwrap();

        assert_eq!(result.warnings.len(), 1);
        assert!(result.warnings[0].contains("include"));
    }

    #[test]
    fn warns_on_unknown_section_options() {
        let dir = create_temp_dir();
        let config_path = dir.path().join(CONFIG_FILENAME);
        fs::write(
            &config_path,
            r#"
[rules]
pattern = ["eval"]

[fetch]
retries = 3
"#,
        )
        .unwrap();

        let result = load_config_with_warnings(&config_path).unwrap();

        assert_eq!(
            result.warnings,
            vec![
                "Unknown config option in [rules]: 'pattern'",
                "Unknown config option in [fetch]: 'retries'",
            ]
        );
    }

    #[test]
    fn no_warnings_for_starter_config() {
        let dir = create_temp_dir();
        let config_path = dir.path().join(CONFIG_FILENAME);
        fs::write(&config_path, STARTER_CONFIG).unwrap();

        let result = load_config_with_warnings(&config_path).unwrap();

        assert!(result.warnings.is_empty());
        assert_eq!(
            result.config.rules.file,
            Some(PathBuf::from(STARTER_RULES_FILENAME))
        );
    }

    #[test]
    fn rules_file_resolves_relative_to_config_directory() {
        let dir = create_temp_dir();
        let config_path = dir.path().join(CONFIG_FILENAME);
        fs::write(&config_path, "[rules]\nfile = \"rules/dom.txt\"").unwrap();

        let result = load_config_with_warnings(&config_path).unwrap();

        assert_eq!(
            result.rules_file(),
            Some(dir.path().join("rules").join("dom.txt"))
        );
    }

    #[test]
    fn rules_file_is_none_when_unset() {
        assert_eq!(ConfigResult::default().rules_file(), None);
    }

    #[test]
    fn load_config_or_default_with_warnings_reports_broken_config() {
        let dir = create_temp_dir();
        fs::write(dir.path().join(CONFIG_FILENAME), "[rules\n").unwrap();

        let result = load_config_or_default_with_warnings(dir.path());

        assert!(matches!(result, Err(ConfigError::ParseError { .. })));
    }

    #[test]
    fn load_config_or_default_with_warnings_returns_empty_when_no_config() {
        let dir = create_temp_dir();

        let result = load_config_or_default_with_warnings(dir.path()).unwrap();

        assert_eq!(result.config, Config::default());
        assert!(result.warnings.is_empty());
        assert!(result.path.is_none());
    }

    #[test]
    fn starter_rules_parse_into_every_strategy() {
        let rules = crate::rules::parse_rules(STARTER_RULES.lines());

        assert_eq!(rules.len(), 9);
        assert!(rules.iter().any(|r| r.kind().name() == "element-wildcard"));
        assert!(rules.iter().any(|r| r.kind().name() == "element-exact"));
        assert!(rules.iter().any(|r| r.kind().name() == "dotted-exact"));
        assert!(rules.iter().any(|r| r.kind().name() == "bare-name"));
    }
}
