pub mod cgroup;
pub mod system;
pub mod toolchain;

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Everything the banner shows, gathered once per run.
#[derive(Debug, Clone, PartialEq)]
pub struct HostFacts {
    pub user_name: String,
    pub host_name: String,
    pub os_description: String,
    pub architecture: Architecture,
    pub cpu_count: usize,
    pub total_memory_bytes: u64,
    pub toolchain: Option<ToolchainFacts>,
    pub containment: Option<ContainmentInfo>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ToolchainFacts {
    pub runtime_version: String,
    pub sdk_version: String,
    pub runtime_count: usize,
    pub sdk_count: usize,
}

/// Memory ceiling of the cgroup the process runs in.
#[derive(Debug, Clone, PartialEq)]
pub struct ContainmentInfo {
    pub limit_bytes: u64,
    pub used_bytes: u64,
    pub limit_path: PathBuf,
}

impl ContainmentInfo {
    /// Usage relative to the limit. Can exceed 100 while the kernel reclaims.
    pub fn usage_percent(&self) -> f64 {
        if self.limit_bytes == 0 {
            return 0.0;
        }
        self.used_bytes as f64 / self.limit_bytes as f64 * 100.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Architecture {
    X64,
    X86,
    Arm64,
    Arm,
    Other(String),
}

impl Architecture {
    pub fn current() -> Self {
        Self::from_target(std::env::consts::ARCH)
    }

    pub fn from_target(arch: &str) -> Self {
        match arch {
            "x86_64" => Self::X64,
            "x86" => Self::X86,
            "aarch64" => Self::Arm64,
            "arm" => Self::Arm,
            other => Self::Other(other.to_string()),
        }
    }
}

impl fmt::Display for Architecture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::X64 => f.write_str("X64"),
            Self::X86 => f.write_str("X86"),
            Self::Arm64 => f.write_str("Arm64"),
            Self::Arm => f.write_str("Arm"),
            Self::Other(name) => f.write_str(name),
        }
    }
}

/// Source of [`HostFacts`]. Implementations absorb every probe failure.
pub trait FactCollector {
    fn collect(&self) -> HostFacts;
}

#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("{path} does not hold an integer: {value:?}")]
    Parse { path: String, value: String },
    #[error("{path} holds non-positive limit {value}")]
    NonPositive { path: String, value: i64 },
    #[error("failed to launch {program}: {source}")]
    Launch {
        program: String,
        source: std::io::Error,
    },
    #[error("{program} exited with {status}")]
    ExitStatus {
        program: String,
        status: std::process::ExitStatus,
    },
    #[error("{program} printed nothing")]
    EmptyOutput { program: String },
}
