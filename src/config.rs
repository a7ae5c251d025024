//! Configuration System
//!
//! Layered configuration for the client: built-in defaults, the XDG config file,
//! an explicit `--config` file, and `RDCLI_*` environment variables, in increasing
//! order of precedence. Command-line flags are applied on top by the binary.
//!
//! The result is a [`RuntimeConfig`] built once at startup and then passed by
//! reference to every component that needs it. Nothing here is mutated after
//! command execution begins.

use crate::error::ConfigError;
use crate::logging::LoggingConfig;
use crate::output::OutputFormat;
use serde::{Deserialize, Serialize};
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

pub const DEFAULT_BASE_URL: &str = "https://api.raindrop.io/rest/v1";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const MIN_TIMEOUT_SECS: u64 = 1;
pub const MAX_TIMEOUT_SECS: u64 = 300;

const API_DELAY_ENV: &str = "RDCLI_API_DELAY_MS";
const TIMEOUT_ENV: &str = "RDCLI_TIMEOUT";

/// API connection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Bearer token; supplied by the auth layer or `RDCLI_TOKEN`
    #[serde(default)]
    pub token: Option<String>,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Artificial delay before every request (throttled testing); 0 disables
    #[serde(default)]
    pub api_delay_ms: u64,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            token: None,
            timeout_secs: default_timeout_secs(),
            api_delay_ms: 0,
        }
    }
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn api_delay(&self) -> Option<Duration> {
        (self.api_delay_ms > 0).then(|| Duration::from_millis(self.api_delay_ms))
    }
}

/// Output preferences from the config file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Preferred format; falls back to the TTY-aware default when unset
    #[serde(default)]
    pub format: Option<String>,

    #[serde(default)]
    pub no_color: bool,
}

/// File-level configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FileConfig {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub output: OutputConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Flag overrides coming from the command line.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub format: Option<OutputFormat>,
    pub timeout_secs: Option<u64>,
    pub no_color: bool,
    pub verbose: bool,
    pub debug: bool,
}

/// Immutable, fully-resolved configuration for one invocation.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub api: ApiConfig,
    pub logging: LoggingConfig,
    /// Explicit format (flag or config file); `None` means TTY-aware default
    pub format: Option<OutputFormat>,
    /// Whether style functions emit escape sequences
    pub color: bool,
    pub stdout_is_tty: bool,
    pub verbose: bool,
    pub debug: bool,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            logging: LoggingConfig::default(),
            format: None,
            color: false,
            stdout_is_tty: false,
            verbose: false,
            debug: false,
        }
    }
}

impl RuntimeConfig {
    /// Resolve file configuration, environment, and flags into the runtime value.
    pub fn resolve(file: FileConfig, overrides: &Overrides) -> Result<Self, ConfigError> {
        let stdout_is_tty = std::io::stdout().is_terminal();
        let env = ColorEnvironment::from_process();
        Self::resolve_with(file, overrides, stdout_is_tty, &env)
    }

    /// Same as [`RuntimeConfig::resolve`] with terminal state passed in.
    pub fn resolve_with(
        file: FileConfig,
        overrides: &Overrides,
        stdout_is_tty: bool,
        env: &ColorEnvironment,
    ) -> Result<Self, ConfigError> {
        let mut api = file.api;

        if let Some(delay) = env.api_delay_ms.as_deref() {
            api.api_delay_ms = parse_api_delay_ms(Some(delay));
        }
        // An unusable value leaves the file setting alone.
        if let Some(timeout) = env.timeout.as_deref().and_then(parse_timeout_override) {
            api.timeout_secs = timeout;
        }
        if let Some(timeout) = overrides.timeout_secs {
            api.timeout_secs = clamp_timeout(timeout);
        }
        api.timeout_secs = clamp_timeout(api.timeout_secs);

        let format = match overrides.format {
            Some(format) => Some(format),
            None => file
                .output
                .format
                .as_deref()
                .map(str::parse::<OutputFormat>)
                .transpose()
                .map_err(|e| ConfigError::Invalid(e.to_string()))?,
        };

        let color = color_enabled(
            stdout_is_tty,
            overrides.no_color || file.output.no_color,
            env,
        );

        let mut logging = file.logging;
        if overrides.verbose {
            logging.level = "debug".to_string();
        }
        if overrides.debug {
            logging.level = "trace".to_string();
        }
        logging.color = logging.color && color;

        debug!(
            base_url = %api.base_url,
            timeout_secs = api.timeout_secs,
            api_delay_ms = api.api_delay_ms,
            color,
            "Resolved runtime configuration"
        );

        Ok(Self {
            api,
            logging,
            format,
            color,
            stdout_is_tty,
            verbose: overrides.verbose,
            debug: overrides.debug,
        })
    }

    /// Effective output format: explicit choice, else `plain` on a terminal and `json` otherwise.
    pub fn effective_format(&self) -> OutputFormat {
        self.format
            .unwrap_or_else(|| OutputFormat::default_for_terminal(self.stdout_is_tty))
    }
}

/// Environment inputs consulted for color capability and request tuning.
#[derive(Debug, Clone, Default)]
pub struct ColorEnvironment {
    pub no_color: bool,
    pub term: Option<String>,
    pub api_delay_ms: Option<String>,
    pub timeout: Option<String>,
}

impl ColorEnvironment {
    pub fn from_process() -> Self {
        Self {
            no_color: std::env::var_os("NO_COLOR").is_some(),
            term: std::env::var("TERM").ok(),
            api_delay_ms: std::env::var(API_DELAY_ENV).ok(),
            timeout: std::env::var(TIMEOUT_ENV).ok(),
        }
    }
}

/// Color is enabled only on an interactive terminal, without `NO_COLOR` or
/// `--no-color`, and with a `TERM` other than `dumb`.
pub fn color_enabled(stdout_is_tty: bool, no_color_flag: bool, env: &ColorEnvironment) -> bool {
    stdout_is_tty
        && !no_color_flag
        && !env.no_color
        && env.term.as_deref() != Some("dumb")
}

/// Parse `RDCLI_API_DELAY_MS`. Non-numeric or non-positive values disable the delay.
pub fn parse_api_delay_ms(raw: Option<&str>) -> u64 {
    raw.and_then(|v| v.trim().parse::<i64>().ok())
        .filter(|ms| *ms > 0)
        .map(|ms| ms as u64)
        .unwrap_or(0)
}

/// Parse `RDCLI_TIMEOUT` seconds, falling back to the default and clamping to range.
pub fn parse_timeout_secs(raw: Option<&str>) -> u64 {
    raw.and_then(parse_timeout_override)
        .unwrap_or(DEFAULT_TIMEOUT_SECS)
}

/// Clamped seconds for a positive integer, `None` for anything else.
pub fn parse_timeout_override(raw: &str) -> Option<u64> {
    raw.trim()
        .parse::<i64>()
        .ok()
        .filter(|secs| *secs > 0)
        .map(|secs| clamp_timeout(secs as u64))
}

fn clamp_timeout(secs: u64) -> u64 {
    secs.clamp(MIN_TIMEOUT_SECS, MAX_TIMEOUT_SECS)
}

/// Loads [`FileConfig`] from defaults, config files, and environment.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration. An explicit path replaces the XDG file lookup.
    pub fn load(explicit: Option<&Path>) -> Result<FileConfig, ConfigError> {
        let mut builder = ::config::Config::builder();

        match explicit {
            Some(path) => {
                if !path.exists() {
                    return Err(ConfigError::Invalid(format!(
                        "Config file not found: {}",
                        path.display()
                    )));
                }
                builder = builder.add_source(::config::File::from(path.to_path_buf()));
            }
            None => {
                if let Some(path) = Self::xdg_config_path() {
                    debug!(path = %path.display(), "Loading XDG config file if present");
                    builder = builder
                        .add_source(::config::File::from(path).required(false));
                }
            }
        }

        builder = builder.add_source(
            ::config::Environment::with_prefix("RDCLI")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true)
                .ignore_empty(true),
        );

        let mut loaded: FileConfig = builder.build()?.try_deserialize()?;

        // Short-form variables that do not follow the nested naming scheme.
        if let Ok(token) = std::env::var("RDCLI_TOKEN") {
            if !token.trim().is_empty() {
                loaded.api.token = Some(token);
            }
        }
        if let Ok(base_url) = std::env::var("RDCLI_BASE_URL") {
            if !base_url.trim().is_empty() {
                loaded.api.base_url = base_url;
            }
        }

        Ok(loaded)
    }

    /// Load from a single file without consulting the environment.
    pub fn load_from_file(path: &Path) -> Result<FileConfig, ConfigError> {
        let loaded = ::config::Config::builder()
            .add_source(::config::File::from(path.to_path_buf()))
            .build()?
            .try_deserialize()?;
        Ok(loaded)
    }

    /// `<config dir>/rdcli/config.toml`, when a home directory can be determined.
    pub fn xdg_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "rdcli")
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }
}
