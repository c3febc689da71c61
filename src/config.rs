use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::utils::{get_config_dir, trim_line};

pub const API_KEY_ENV: &str = "QUIZ_ORACLE_API_KEY";

pub const DEFAULT_BASE_URL: &str = "https://api.deepseek.com";
pub const DEFAULT_MODEL: &str = "deepseek-chat";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

const CONFIG_FILE_NAME: &str = "config.json";
const AI_CONFIG_KEY: &str = "ai_config";
const API_KEY_FIELD: &str = "api_key";

/// The `ai_config` section of the config file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AiConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub timeout_secs: u64,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl AiConfig {
    pub fn has_api_key(&self) -> bool {
        !self.api_key.trim().is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiKeySource {
    Environment,
    ConfigFile,
}

impl ApiKeySource {
    pub fn description(&self) -> &'static str {
        match self {
            ApiKeySource::Environment => "environment variable",
            ApiKeySource::ConfigFile => "config file",
        }
    }
}

#[derive(Debug)]
pub struct ResolvedConfig {
    pub ai: AiConfig,
    pub source: Option<ApiKeySource>,
}

#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn default_location() -> Result<Self> {
        Ok(Self::new(get_config_dir()?.join(CONFIG_FILE_NAME)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads `ai_config`, falling back to defaults if the file is missing,
    /// unreadable or malformed.
    pub fn load_ai_config(&self) -> AiConfig {
        match self.try_load_ai_config() {
            Ok(config) => config,
            Err(err) => {
                warn!("Failed to read AI config, using defaults: {err:#}");
                AiConfig::default()
            }
        }
    }

    fn try_load_ai_config(&self) -> Result<AiConfig> {
        let Some(mut root) = read_config_file(&self.path)? else {
            debug!("No config file at {}, using defaults", self.path.display());
            return Ok(AiConfig::default());
        };
        let Some(section) = root.remove(AI_CONFIG_KEY) else {
            return Ok(AiConfig::default());
        };
        serde_json::from_value(section).with_context(|| {
            format!(
                "Invalid `{AI_CONFIG_KEY}` section in {}",
                self.path.display()
            )
        })
    }

    /// Config file values with the API key taken from the environment first.
    pub fn resolve(&self) -> ResolvedConfig {
        self.resolve_with_env_key(env::var(API_KEY_ENV).ok())
    }

    fn resolve_with_env_key(&self, env_key: Option<String>) -> ResolvedConfig {
        let mut ai = self.load_ai_config();

        if let Some(key) = env_key.as_deref().and_then(trim_line) {
            ai.api_key = key.to_string();
            return ResolvedConfig {
                ai,
                source: Some(ApiKeySource::Environment),
            };
        }

        let source = ai.has_api_key().then_some(ApiKeySource::ConfigFile);
        ResolvedConfig { ai, source }
    }

    pub fn store_api_key(&self, api_key: &str) -> Result<()> {
        let trimmed = trim_line(api_key).with_context(|| "Cannot store an empty API key")?;

        let mut root = read_config_file(&self.path)?.unwrap_or_default();
        let section = root
            .entry(AI_CONFIG_KEY)
            .or_insert_with(|| Value::Object(Map::new()));
        let Value::Object(section) = section else {
            bail!(
                "`{AI_CONFIG_KEY}` in {} is not an object",
                self.path.display()
            );
        };
        section.insert(API_KEY_FIELD.to_string(), Value::String(trimmed.to_string()));

        write_config_file(&self.path, &root)
    }

    /// Removes the stored key. Returns whether there was one to remove.
    pub fn clear_api_key(&self) -> Result<bool> {
        let Some(mut root) = read_config_file(&self.path)? else {
            return Ok(false);
        };
        let Some(Value::Object(section)) = root.get_mut(AI_CONFIG_KEY) else {
            return Ok(false);
        };
        if section.remove(API_KEY_FIELD).is_none() {
            return Ok(false);
        }
        if section.is_empty() {
            root.remove(AI_CONFIG_KEY);
        }

        if root.is_empty() {
            fs::remove_file(&self.path).with_context(|| {
                format!(
                    "Failed to remove empty config file at {}",
                    self.path.display()
                )
            })?;
            return Ok(true);
        }

        write_config_file(&self.path, &root)?;
        Ok(true)
    }
}

fn read_config_file(path: &Path) -> Result<Option<Map<String, Value>>> {
    match fs::read_to_string(path) {
        Ok(contents) => Ok(Some(parse_config_contents(&contents, path)?)),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(err) => {
            Err(err).with_context(|| format!("Failed to read config file at {}", path.display()))
        }
    }
}

fn write_config_file(path: &Path, value: &Map<String, Value>) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    let contents = serialize_config(value)?;
    fs::write(path, contents)
        .with_context(|| format!("Failed to write config file at {}", path.display()))?;
    Ok(())
}

fn parse_config_contents(contents: &str, path: &Path) -> Result<Map<String, Value>> {
    if contents.trim().is_empty() {
        return Ok(Map::new());
    }

    let parsed: Value = serde_json::from_str(contents)
        .with_context(|| format!("Failed to parse config file at {}", path.display()))?;
    match parsed {
        Value::Object(map) => Ok(map),
        _ => bail!("Config file at {} is not a JSON object", path.display()),
    }
}

fn serialize_config(value: &Map<String, Value>) -> Result<String> {
    let contents = serde_json::to_string_pretty(value)?;
    Ok(format!("{}\n", contents))
}
