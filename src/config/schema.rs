use anyhow::{Context, Result};
use directories::UserDirs;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
#[cfg(unix)]
use tokio::fs::File;
use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;

use crate::memory::DEFAULT_CAPACITY;

const CONFIG_FILE_NAME: &str = "config.toml";

// ── Top-level config ──────────────────────────────────────────────

/// Top-level chessbot configuration, loaded from `config.toml`.
///
/// Resolution order: `CHESSBOT_CONFIG_DIR` env → `~/.chessbot/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct Config {
    /// Path to config.toml - computed at load time, not serialized
    #[serde(skip)]
    #[schemars(skip)]
    pub config_path: PathBuf,
    /// API key for the selected provider. Overridden by `CHESSBOT_API_KEY`.
    /// When unset, the provider's own env var (e.g. `GROQ_API_KEY`) is used.
    pub api_key: Option<String>,
    /// Base URL override for the provider API (e.g. a self-hosted OpenAI-compatible gateway).
    pub api_url: Option<String>,
    /// Provider ID: `"groq"`, `"openai"` or `"custom:<URL>"`. Default: `"groq"`.
    pub default_provider: Option<String>,
    /// Model identifier sent with every request. Default: `"llama-3.1-8b-instant"`.
    pub default_model: Option<String>,
    /// Sampling temperature (0.0–2.0). Default: `0.7`.
    pub default_temperature: f64,
    /// Maximum tokens in a model reply. Default: `1024`.
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    /// Total timeout for one model call, in seconds. Default: `120`.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Conversation memory window (`[memory]`).
    #[serde(default)]
    pub memory: MemoryConfig,

    /// Topic guard tuning (`[guard]`).
    #[serde(default)]
    pub guard: GuardConfig,

    /// Chat front-end behaviour (`[chat]`).
    #[serde(default)]
    pub chat: ChatConfig,
}

fn default_max_tokens() -> u32 {
    1024
}

fn default_request_timeout_secs() -> u64 {
    120
}

/// Conversation memory configuration (`[memory]` section).
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct MemoryConfig {
    /// Messages kept as model context; oldest are evicted first. Default: `10`.
    #[serde(default = "default_memory_capacity")]
    pub capacity: usize,
}

fn default_memory_capacity() -> usize {
    DEFAULT_CAPACITY
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            capacity: default_memory_capacity(),
        }
    }
}

/// Topic guard configuration (`[guard]` section).
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct GuardConfig {
    /// Additional chess terms or phrases accepted by the guard.
    #[serde(default)]
    pub extra_keywords: Vec<String>,
}

/// Chat front-end configuration (`[chat]` section).
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ChatConfig {
    /// Answer greeting, introduction and thank-you turns locally instead of
    /// calling the model. Default: `true`.
    #[serde(default = "default_true")]
    pub local_greetings: bool,
    /// Welcome message shown at the start of every session.
    #[serde(default = "default_greeting_message")]
    pub greeting_message: String,
    /// Directory for exported transcripts. Default: current directory.
    #[serde(default)]
    pub export_dir: Option<String>,
}

fn default_true() -> bool {
    true
}

fn default_greeting_message() -> String {
    "👋 Hello! I'm your Chess Q&A Bot!\n\n\
     Ask me anything about chess - rules, openings, strategies, famous players, \
     tournaments, and chess history!"
        .into()
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            local_greetings: true,
            greeting_message: default_greeting_message(),
            export_dir: None,
        }
    }
}

// ── Config impl ──────────────────────────────────────────────────

impl Default for Config {
    fn default() -> Self {
        let home =
            UserDirs::new().map_or_else(|| PathBuf::from("."), |u| u.home_dir().to_path_buf());

        Self {
            config_path: home.join(".chessbot").join(CONFIG_FILE_NAME),
            api_key: None,
            api_url: None,
            default_provider: Some("groq".to_string()),
            default_model: Some("llama-3.1-8b-instant".to_string()),
            default_temperature: 0.7,
            max_tokens: default_max_tokens(),
            request_timeout_secs: default_request_timeout_secs(),
            memory: MemoryConfig::default(),
            guard: GuardConfig::default(),
            chat: ChatConfig::default(),
        }
    }
}

fn default_config_dir() -> Result<PathBuf> {
    let home = UserDirs::new()
        .map(|u| u.home_dir().to_path_buf())
        .context("Could not find home directory")?;
    Ok(home.join(".chessbot"))
}

fn resolve_config_dir() -> Result<PathBuf> {
    if let Ok(custom_config_dir) = std::env::var("CHESSBOT_CONFIG_DIR") {
        let custom_config_dir = custom_config_dir.trim();
        if !custom_config_dir.is_empty() {
            return Ok(PathBuf::from(custom_config_dir));
        }
    }
    default_config_dir()
}

impl Config {
    /// Load `config.toml` from the resolved config directory, creating it with
    /// defaults on first run.
    pub async fn load_or_init() -> Result<Self> {
        let config_dir = resolve_config_dir()?;
        Self::load_or_init_in(&config_dir).await
    }

    /// Load or create `config.toml` inside `config_dir`.
    pub async fn load_or_init_in(config_dir: &Path) -> Result<Self> {
        let config_path = config_dir.join(CONFIG_FILE_NAME);

        fs::create_dir_all(config_dir).await.with_context(|| {
            format!(
                "Failed to create config directory: {}",
                config_dir.display()
            )
        })?;

        let initialized = !config_path.exists();
        let mut config = if initialized {
            let mut config = Config::default();
            config.config_path = config_path.clone();
            config.save().await?;

            // Restrict permissions on newly created config file (may contain API keys)
            #[cfg(unix)]
            {
                use std::{fs::Permissions, os::unix::fs::PermissionsExt};
                let _ = fs::set_permissions(&config_path, Permissions::from_mode(0o600)).await;
            }
            config
        } else {
            // Warn if config file is world-readable (may contain API keys)
            #[cfg(unix)]
            {
                use std::os::unix::fs::PermissionsExt;
                if let Ok(meta) = fs::metadata(&config_path).await {
                    if meta.permissions().mode() & 0o004 != 0 {
                        tracing::warn!(
                            "Config file {:?} is world-readable (mode {:o}). \
                             Consider restricting with: chmod 600 {:?}",
                            config_path,
                            meta.permissions().mode() & 0o777,
                            config_path,
                        );
                    }
                }
            }

            let contents = fs::read_to_string(&config_path)
                .await
                .context("Failed to read config file")?;
            let mut config: Config =
                toml::from_str(&contents).context("Failed to parse config file")?;
            config.config_path = config_path.clone();
            config
        };

        config.apply_env_overrides();
        config.validate()?;
        tracing::info!(
            path = %config.config_path.display(),
            initialized,
            "Config loaded"
        );
        Ok(config)
    }

    /// Validate configuration values that would cause runtime failures.
    ///
    /// Called after TOML deserialization and env-override application to catch
    /// obviously invalid values early instead of failing mid-conversation.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=2.0).contains(&self.default_temperature) {
            anyhow::bail!(
                "default_temperature must be between 0.0 and 2.0 (got {})",
                self.default_temperature
            );
        }
        if self.max_tokens == 0 {
            anyhow::bail!("max_tokens must be greater than 0");
        }
        if self.request_timeout_secs == 0 {
            anyhow::bail!("request_timeout_secs must be greater than 0");
        }
        if self.memory.capacity == 0 {
            anyhow::bail!("memory.capacity must be greater than 0");
        }
        if self
            .default_model
            .as_deref()
            .is_some_and(|m| m.trim().is_empty())
        {
            anyhow::bail!("default_model must not be empty");
        }
        if let Some((i, _)) = self
            .guard
            .extra_keywords
            .iter()
            .enumerate()
            .find(|(_, k)| k.trim().is_empty())
        {
            anyhow::bail!("guard.extra_keywords[{i}] must not be empty");
        }
        Ok(())
    }

    /// Provider ID with the default applied.
    pub fn provider_name(&self) -> &str {
        self.default_provider.as_deref().unwrap_or("groq")
    }

    /// Model ID with the default applied.
    pub fn model_name(&self) -> &str {
        self.default_model
            .as_deref()
            .unwrap_or("llama-3.1-8b-instant")
    }

    /// Apply environment variable overrides to config
    pub fn apply_env_overrides(&mut self) {
        // Provider-native keys (GROQ_API_KEY, OPENAI_API_KEY) and API_KEY are
        // resolved per provider at construction time, not pinned here.
        if let Ok(key) = std::env::var("CHESSBOT_API_KEY") {
            if !key.trim().is_empty() {
                self.api_key = Some(key.trim().to_string());
            }
        }

        if let Ok(provider) = std::env::var("CHESSBOT_PROVIDER") {
            if !provider.is_empty() {
                self.default_provider = Some(provider);
            }
        }

        if let Ok(model) = std::env::var("CHESSBOT_MODEL") {
            if !model.is_empty() {
                self.default_model = Some(model);
            }
        }

        // Out-of-range temperatures are ignored rather than rejected
        if let Ok(temp_str) = std::env::var("CHESSBOT_TEMPERATURE") {
            if let Ok(temp) = temp_str.parse::<f64>() {
                if (0.0..=2.0).contains(&temp) {
                    self.default_temperature = temp;
                }
            }
        }

        if let Ok(raw) = std::env::var("CHESSBOT_MAX_TOKENS") {
            if let Ok(max_tokens) = raw.trim().parse::<u32>() {
                if max_tokens > 0 {
                    self.max_tokens = max_tokens;
                }
            }
        }

        if let Ok(raw) = std::env::var("CHESSBOT_MEMORY_CAPACITY") {
            if let Ok(capacity) = raw.trim().parse::<usize>() {
                if capacity > 0 {
                    self.memory.capacity = capacity;
                }
            }
        }
    }

    pub async fn save(&self) -> Result<()> {
        let toml_str = toml::to_string_pretty(self).context("Failed to serialize config")?;

        let parent_dir = self
            .config_path
            .parent()
            .context("Config path must have a parent directory")?;

        fs::create_dir_all(parent_dir).await.with_context(|| {
            format!(
                "Failed to create config directory: {}",
                parent_dir.display()
            )
        })?;

        let file_name = self
            .config_path
            .file_name()
            .and_then(|v| v.to_str())
            .unwrap_or(CONFIG_FILE_NAME);
        let temp_path = parent_dir.join(format!(".{file_name}.tmp-{}", uuid::Uuid::new_v4()));
        let backup_path = parent_dir.join(format!("{file_name}.bak"));

        let mut temp_file = OpenOptions::new()
            .create_new(true)
            .write(true)
            .open(&temp_path)
            .await
            .with_context(|| {
                format!(
                    "Failed to create temporary config file: {}",
                    temp_path.display()
                )
            })?;
        temp_file
            .write_all(toml_str.as_bytes())
            .await
            .context("Failed to write temporary config contents")?;
        temp_file
            .sync_all()
            .await
            .context("Failed to fsync temporary config file")?;
        drop(temp_file);

        let had_existing_config = self.config_path.exists();
        if had_existing_config {
            fs::copy(&self.config_path, &backup_path)
                .await
                .with_context(|| {
                    format!(
                        "Failed to create config backup before atomic replace: {}",
                        backup_path.display()
                    )
                })?;
        }

        if let Err(e) = fs::rename(&temp_path, &self.config_path).await {
            let _ = fs::remove_file(&temp_path).await;
            if had_existing_config && backup_path.exists() {
                fs::copy(&backup_path, &self.config_path)
                    .await
                    .context("Failed to restore config backup")?;
            }
            anyhow::bail!("Failed to atomically replace config file: {e}");
        }

        sync_directory(parent_dir).await?;

        if had_existing_config {
            let _ = fs::remove_file(&backup_path).await;
        }

        Ok(())
    }
}

async fn sync_directory(path: &Path) -> Result<()> {
    #[cfg(unix)]
    {
        let dir = File::open(path)
            .await
            .with_context(|| format!("Failed to open directory for fsync: {}", path.display()))?;
        dir.sync_all()
            .await
            .with_context(|| format!("Failed to fsync directory metadata: {}", path.display()))?;
        Ok(())
    }

    #[cfg(not(unix))]
    {
        let _ = path;
        Ok(())
    }
}

/// Serialises tests that mutate process environment variables.
#[cfg(test)]
pub(crate) async fn env_override_lock() -> tokio::sync::MutexGuard<'static, ()> {
    static ENV_OVERRIDE_TEST_LOCK: tokio::sync::Mutex<()> = tokio::sync::Mutex::const_new(());
    ENV_OVERRIDE_TEST_LOCK.lock().await
}
