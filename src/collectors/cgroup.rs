use crate::collectors::{ContainmentInfo, ProbeError};
use crate::config::CgroupConfig;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

pub fn probe(cfg: &CgroupConfig) -> Option<ContainmentInfo> {
    probe_paths(&cfg.limit_paths(), &cfg.usage_paths())
}

/// The first limit candidate holding a positive integer decides containment;
/// usage comes from the first readable usage candidate and defaults to 0.
pub fn probe_paths(limit_paths: &[PathBuf], usage_paths: &[PathBuf]) -> Option<ContainmentInfo> {
    let (limit_bytes, limit_path) = first_value(limit_paths, read_limit)?;
    let used_bytes = first_value(usage_paths, read_usage)
        .map(|(v, _)| v)
        .unwrap_or(0);

    debug!(
        limit_bytes,
        used_bytes,
        limit_path = %limit_path.display(),
        "cgroup memory limit found"
    );

    Some(ContainmentInfo {
        limit_bytes,
        used_bytes,
        limit_path,
    })
}

fn first_value(
    paths: &[PathBuf],
    read: impl Fn(&Path) -> Result<u64, ProbeError>,
) -> Option<(u64, PathBuf)> {
    for path in paths {
        match read(path) {
            Ok(v) => return Some((v, path.clone())),
            Err(err) => debug!(error = %err, "cgroup candidate skipped"),
        }
    }
    None
}

fn read_limit(path: &Path) -> Result<u64, ProbeError> {
    let value = read_integer(path)?;
    if value <= 0 {
        return Err(ProbeError::NonPositive {
            path: path.display().to_string(),
            value,
        });
    }
    Ok(value as u64)
}

fn read_usage(path: &Path) -> Result<u64, ProbeError> {
    let value = read_integer(path)?;
    Ok(value.max(0) as u64)
}

fn read_integer(path: &Path) -> Result<i64, ProbeError> {
    let raw = fs::read_to_string(path).map_err(|source| ProbeError::Read {
        path: path.display().to_string(),
        source,
    })?;
    raw.trim().parse::<i64>().map_err(|_| ProbeError::Parse {
        path: path.display().to_string(),
        value: raw.trim().to_string(),
    })
}
