//! Persistent settings
//!
//! A small YAML file holding the AI provider selection and git behavior
//! flags. A missing file is not an error: defaults apply.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use directories::BaseDirs;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ConfigError;

/// File name of the settings file inside the home directory
pub const CONFIG_FILE_NAME: &str = ".commet.yaml";

/// Supported text-generation backends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    #[default]
    OpenAI,
    Claude,
    Google,
    Groq,
}

impl Provider {
    /// All providers, in the order the config editor cycles through them
    pub const ALL: [Provider; 4] = [
        Provider::OpenAI,
        Provider::Claude,
        Provider::Google,
        Provider::Groq,
    ];

    /// Name as written in the config file and accepted on the command line
    pub const fn name(self) -> &'static str {
        match self {
            Self::OpenAI => "openai",
            Self::Claude => "claude",
            Self::Google => "google",
            Self::Groq => "groq",
        }
    }

    /// Models offered for this provider; the first one is the default
    pub const fn models(self) -> &'static [&'static str] {
        match self {
            Self::OpenAI => &["gpt-4o", "gpt-4-turbo", "gpt-4", "gpt-3.5-turbo"],
            Self::Claude => &[
                "claude-3-5-sonnet-20241022",
                "claude-3-opus-20240229",
                "claude-3-sonnet-20240229",
                "claude-3-haiku-20240307",
            ],
            Self::Google => &[
                "gemini-1.5-pro",
                "gemini-1.5-flash",
                "gemini-pro",
                "gemini-pro-vision",
            ],
            Self::Groq => &[
                "llama-3.1-70b-versatile",
                "llama-3.1-8b-instant",
                "mixtral-8x7b-32768",
                "gemma-7b-it",
            ],
        }
    }

    pub const fn default_model(self) -> &'static str {
        self.models()[0]
    }

    /// The provider after this one, wrapping around
    pub fn next(self) -> Self {
        let index = Self::ALL.iter().position(|p| *p == self).unwrap_or(0);
        Self::ALL[(index + 1) % Self::ALL.len()]
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Provider {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_lowercase();
        Self::ALL
            .into_iter()
            .find(|p| p.name() == lower)
            .ok_or_else(|| ConfigError::InvalidProvider(s.to_string()))
    }
}

/// AI provider settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AiConfig {
    pub provider: Provider,
    pub api_key: String,
    /// Empty means "use the provider default"
    pub model: String,
}

impl AiConfig {
    /// The configured model, or the provider default when unset
    pub fn effective_model(&self) -> &str {
        if self.model.is_empty() {
            self.provider.default_model()
        } else {
            &self.model
        }
    }

    /// Mask the API key for display: first and last four characters only
    pub fn masked_api_key(&self) -> String {
        let chars: Vec<char> = self.api_key.chars().collect();
        if chars.len() <= 8 {
            return "*".repeat(chars.len());
        }

        let head: String = chars[..4].iter().collect();
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{}{}{}", head, "*".repeat(chars.len() - 8), tail)
    }
}

/// Git behavior flags
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GitConfig {
    pub auto_stage: bool,
    pub show_diff: bool,
    pub confirm_push: bool,
    pub direct_commit: bool,
    pub use_ai: bool,
    pub interactive: bool,
}

impl Default for GitConfig {
    fn default() -> Self {
        Self {
            auto_stage: false,
            show_diff: false,
            confirm_push: false,
            direct_commit: false,
            use_ai: true,
            interactive: false,
        }
    }
}

/// Complete settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub ai: AiConfig,
    pub git: GitConfig,
}

impl Config {
    /// Apply `config set` flags. Switching provider without naming a model
    /// drops the old provider's model. Returns whether anything changed.
    pub fn apply_settings(
        &mut self,
        provider: Option<Provider>,
        api_key: Option<String>,
        model: Option<String>,
    ) -> bool {
        let before = self.clone();

        if let Some(provider) = provider {
            if provider != self.ai.provider && model.is_none() {
                self.ai.model.clear();
            }
            self.ai.provider = provider;
        }
        if let Some(api_key) = api_key {
            self.ai.api_key = api_key;
        }
        if let Some(model) = model {
            self.ai.model = model;
        }

        *self != before
    }

    /// Human-readable listing for `config show`, API key masked
    pub fn summary(&self) -> String {
        let key = if self.ai.api_key.is_empty() {
            "(not set)".to_string()
        } else {
            self.ai.masked_api_key()
        };
        let git = &self.git;

        format!(
            "Current Configuration:\n  AI Provider: {}\n  API Key: {}\n  Model: {}\n\n\
             Git Settings:\n  Auto Stage: {}\n  Show Diff: {}\n  Confirm Push: {}\n  \
             Direct Commit: {}\n  Use AI: {}\n  Interactive: {}\n",
            self.ai.provider,
            key,
            self.ai.effective_model(),
            git.auto_stage,
            git.show_diff,
            git.confirm_push,
            git.direct_commit,
            git.use_ai,
            git.interactive,
        )
    }
}

/// Location of the settings file on disk
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    /// Store at an explicit path
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at `~/.commet.yaml`
    pub fn default_location() -> Result<Self, ConfigError> {
        let dirs = BaseDirs::new().ok_or(ConfigError::NoHomeDir)?;
        Ok(Self::at(dirs.home_dir().join(CONFIG_FILE_NAME)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the settings, falling back to defaults when the file is absent
    pub fn load(&self) -> Result<Config, ConfigError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no config file, using defaults");
                return Ok(Config::default());
            }
            Err(source) => {
                return Err(ConfigError::Read {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        if contents.trim().is_empty() {
            return Ok(Config::default());
        }

        serde_yaml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: self.path.clone(),
            source,
        })
    }

    /// Write the settings, replacing the file
    pub fn save(&self, config: &Config) -> Result<(), ConfigError> {
        let yaml = serde_yaml::to_string(config).map_err(ConfigError::Serialize)?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|source| ConfigError::Write {
                    path: self.path.clone(),
                    source,
                })?;
            }
        }

        fs::write(&self.path, yaml).map_err(|source| ConfigError::Write {
            path: self.path.clone(),
            source,
        })?;
        debug!(path = %self.path.display(), "config saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let store = ConfigStore::at(dir.path().join("missing.yaml"));

        let config = store.load().unwrap();
        assert_eq!(config, Config::default());
        assert!(config.git.use_ai);
        assert_eq!(config.ai.provider, Provider::OpenAI);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let store = ConfigStore::at(dir.path().join("nested").join("commet.yaml"));

        let mut config = Config::default();
        config.ai.provider = Provider::Groq;
        config.ai.api_key = "gsk_test".to_string();
        config.git.use_ai = false;
        config.git.confirm_push = true;
        store.save(&config).unwrap();

        assert_eq!(store.load().unwrap(), config);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("commet.yaml");
        fs::write(&path, "ai:\n  provider: claude\ngit:\n  interactive: true\n").unwrap();

        let config = ConfigStore::at(&path).load().unwrap();
        assert_eq!(config.ai.provider, Provider::Claude);
        assert!(config.git.interactive);
        assert!(config.git.use_ai);
        assert!(!config.git.auto_stage);
    }

    #[test]
    fn test_explicit_use_ai_false() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("commet.yaml");
        fs::write(&path, "git:\n  use_ai: false\n").unwrap();

        let config = ConfigStore::at(&path).load().unwrap();
        assert!(!config.git.use_ai);
    }

    #[test]
    fn test_invalid_yaml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("commet.yaml");
        fs::write(&path, "ai: [not, a, map").unwrap();

        let err = ConfigStore::at(&path).load().unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_parse_provider() {
        assert_eq!("OpenAI".parse::<Provider>().unwrap(), Provider::OpenAI);
        assert_eq!("groq".parse::<Provider>().unwrap(), Provider::Groq);
        assert!("mistral".parse::<Provider>().is_err());
    }

    #[test]
    fn test_provider_cycle() {
        assert_eq!(Provider::OpenAI.next(), Provider::Claude);
        assert_eq!(Provider::Claude.next(), Provider::Google);
        assert_eq!(Provider::Google.next(), Provider::Groq);
        assert_eq!(Provider::Groq.next(), Provider::OpenAI);
    }

    #[test]
    fn test_effective_model() {
        let mut ai = AiConfig {
            provider: Provider::Claude,
            ..AiConfig::default()
        };
        assert_eq!(ai.effective_model(), "claude-3-5-sonnet-20241022");

        ai.model = "claude-3-haiku-20240307".to_string();
        assert_eq!(ai.effective_model(), "claude-3-haiku-20240307");
    }

    #[test]
    fn test_masked_api_key() {
        let mut ai = AiConfig::default();
        assert_eq!(ai.masked_api_key(), "");

        ai.api_key = "short".to_string();
        assert_eq!(ai.masked_api_key(), "*****");

        ai.api_key = "sk-abcdefgh1234".to_string();
        assert_eq!(ai.masked_api_key(), "sk-a*******1234");
    }

    #[test]
    fn test_apply_settings() {
        let mut config = Config::default();
        config.ai.model = "gpt-4o-mini".to_string();

        assert!(!config.apply_settings(None, None, None));

        assert!(config.apply_settings(Some(Provider::Claude), Some("ak".into()), None));
        assert_eq!(config.ai.provider, Provider::Claude);
        assert_eq!(config.ai.api_key, "ak");
        assert!(config.ai.model.is_empty());

        assert!(config.apply_settings(Some(Provider::Google), None, Some("gemini-pro".into())));
        assert_eq!(config.ai.model, "gemini-pro");

        // Same provider keeps the model
        assert!(!config.apply_settings(Some(Provider::Google), None, None));
        assert_eq!(config.ai.model, "gemini-pro");
    }

    #[test]
    fn test_summary_masks_key() {
        let mut config = Config::default();
        config.ai.api_key = "sk-abcdefgh1234".to_string();
        let summary = config.summary();

        assert!(summary.contains("AI Provider: openai"));
        assert!(summary.contains("API Key: sk-a*******1234"));
        assert!(!summary.contains("abcdefgh"));
        assert!(summary.contains(&format!("Model: {}", Provider::OpenAI.default_model())));
        assert!(summary.contains("  Use AI: true"));
    }
}
