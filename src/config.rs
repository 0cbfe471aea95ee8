use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Config {
    #[serde(default = "default_style")]
    pub default_style: String,
    #[serde(default = "default_color")]
    pub color: bool,
    /// 1-based column where the two-space gutter before each fact starts,
    /// so fact text begins at `info_column + 2`.
    #[serde(default = "default_info_column")]
    pub info_column: usize,
    #[serde(default)]
    pub facts: FactsConfig,
    #[serde(default)]
    pub animation: AnimationConfig,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct FactsConfig {
    #[serde(default)]
    pub toolchain: ToolchainConfig,
    #[serde(default)]
    pub cgroup: CgroupConfig,
}

/// External tool queried for the extended facts.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ToolchainConfig {
    #[serde(default = "default_toolchain_enabled")]
    pub enabled: bool,
    #[serde(default = "default_toolchain_program")]
    pub program: String,
    #[serde(default = "default_toolchain_label")]
    pub label: String,
    #[serde(default = "default_runtime_label")]
    pub runtime_label: String,
    /// Runtime whose newest installed version is shown under `runtime_label`.
    #[serde(default = "default_runtime_name")]
    pub runtime_name: String,
    #[serde(default = "default_version_args")]
    pub version_args: Vec<String>,
    #[serde(default = "default_runtimes_args")]
    pub runtimes_args: Vec<String>,
    #[serde(default = "default_sdks_args")]
    pub sdks_args: Vec<String>,
}

/// Candidate files are tried in order, relative to `root`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct CgroupConfig {
    #[serde(default = "default_cgroup_enabled")]
    pub enabled: bool,
    #[serde(default = "default_cgroup_root")]
    pub root: PathBuf,
    #[serde(default = "default_limit_files")]
    pub limit_files: Vec<PathBuf>,
    #[serde(default = "default_usage_files")]
    pub usage_files: Vec<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct AnimationConfig {
    #[serde(default = "default_bounce_cycles")]
    pub bounce_cycles: u32,
    #[serde(default = "default_end_bounce_cycles")]
    pub end_bounce_cycles: u32,
    #[serde(default = "default_bounce_delay", with = "duration_text")]
    pub bounce_delay: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_style: default_style(),
            color: default_color(),
            info_column: default_info_column(),
            facts: FactsConfig::default(),
            animation: AnimationConfig::default(),
        }
    }
}

impl Default for ToolchainConfig {
    fn default() -> Self {
        Self {
            enabled: default_toolchain_enabled(),
            program: default_toolchain_program(),
            label: default_toolchain_label(),
            runtime_label: default_runtime_label(),
            runtime_name: default_runtime_name(),
            version_args: default_version_args(),
            runtimes_args: default_runtimes_args(),
            sdks_args: default_sdks_args(),
        }
    }
}

impl Default for CgroupConfig {
    fn default() -> Self {
        Self {
            enabled: default_cgroup_enabled(),
            root: default_cgroup_root(),
            limit_files: default_limit_files(),
            usage_files: default_usage_files(),
        }
    }
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            bounce_cycles: default_bounce_cycles(),
            end_bounce_cycles: default_end_bounce_cycles(),
            bounce_delay: default_bounce_delay(),
        }
    }
}

impl CgroupConfig {
    pub fn limit_paths(&self) -> Vec<PathBuf> {
        self.limit_files.iter().map(|f| self.root.join(f)).collect()
    }

    pub fn usage_paths(&self) -> Vec<PathBuf> {
        self.usage_files.iter().map(|f| self.root.join(f)).collect()
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to parse YAML in {path}: {source}")]
    Parse {
        path: String,
        source: serde_yaml::Error,
    },
    #[error("invalid configuration: {0}")]
    Validation(String),
}

impl Config {
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path_ref = path.as_ref();
        let path_display = path_ref.display().to_string();
        let text = fs::read_to_string(path_ref).map_err(|source| ConfigError::Read {
            path: path_display.clone(),
            source,
        })?;

        let cfg: Config = serde_yaml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path_display,
            source,
        })?;

        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.default_style.trim().is_empty() {
            return Err(ConfigError::Validation(
                "default_style must not be empty".to_string(),
            ));
        }
        if !(1..=200).contains(&self.info_column) {
            return Err(ConfigError::Validation(
                "info_column must be in range 1..200".to_string(),
            ));
        }

        validate_toolchain(&self.facts.toolchain)?;
        validate_cgroup(&self.facts.cgroup)?;
        validate_animation(&self.animation)?;

        Ok(())
    }

    pub fn example_yaml() -> &'static str {
        include_str!("../config.yaml.example")
    }
}

fn validate_toolchain(cfg: &ToolchainConfig) -> Result<(), ConfigError> {
    if !cfg.enabled {
        return Ok(());
    }
    if cfg.program.trim().is_empty() {
        return Err(ConfigError::Validation(
            "facts.toolchain.program must not be empty when the toolchain is enabled".to_string(),
        ));
    }
    Ok(())
}

fn validate_cgroup(cfg: &CgroupConfig) -> Result<(), ConfigError> {
    if !cfg.enabled {
        return Ok(());
    }
    if cfg.limit_files.is_empty() {
        return Err(ConfigError::Validation(
            "facts.cgroup.limit_files needs at least one candidate".to_string(),
        ));
    }
    Ok(())
}

fn validate_animation(cfg: &AnimationConfig) -> Result<(), ConfigError> {
    if cfg.bounce_cycles < 1 {
        return Err(ConfigError::Validation(
            "animation.bounce_cycles must be >= 1".to_string(),
        ));
    }
    if cfg.bounce_delay > Duration::from_secs(5) {
        return Err(ConfigError::Validation(format!(
            "animation.bounce_delay {} is longer than 5s",
            humantime::format_duration(cfg.bounce_delay)
        )));
    }
    Ok(())
}

mod duration_text {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&humantime::format_duration(*value))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let text = String::deserialize(deserializer)?;
        humantime::parse_duration(text.trim()).map_err(serde::de::Error::custom)
    }
}

fn default_style() -> String {
    "dotnetbot".to_string()
}

const fn default_color() -> bool {
    true
}

const fn default_info_column() -> usize {
    32
}

const fn default_toolchain_enabled() -> bool {
    true
}

fn default_toolchain_program() -> String {
    "dotnet".to_string()
}

fn default_toolchain_label() -> String {
    ".NET SDK".to_string()
}

fn default_runtime_label() -> String {
    ".NET".to_string()
}

fn default_runtime_name() -> String {
    "Microsoft.NETCore.App".to_string()
}

fn default_version_args() -> Vec<String> {
    vec!["--version".to_string()]
}

fn default_runtimes_args() -> Vec<String> {
    vec!["--list-runtimes".to_string()]
}

fn default_sdks_args() -> Vec<String> {
    vec!["--list-sdks".to_string()]
}

const fn default_cgroup_enabled() -> bool {
    true
}

fn default_cgroup_root() -> PathBuf {
    PathBuf::from("/sys/fs/cgroup")
}

fn default_limit_files() -> Vec<PathBuf> {
    [
        "memory.max",
        "memory.high",
        "memory.low",
        "memory/memory.limit_in_bytes",
    ]
    .into_iter()
    .map(PathBuf::from)
    .collect()
}

fn default_usage_files() -> Vec<PathBuf> {
    ["memory.current", "memory/memory.usage_in_bytes"]
        .into_iter()
        .map(PathBuf::from)
        .collect()
}

const fn default_bounce_cycles() -> u32 {
    4
}

const fn default_end_bounce_cycles() -> u32 {
    2
}

const fn default_bounce_delay() -> Duration {
    Duration::from_millis(150)
}
