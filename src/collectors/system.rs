use crate::collectors::toolchain::{self, CommandRunner};
use crate::collectors::{Architecture, ContainmentInfo, FactCollector, HostFacts};
use crate::config::FactsConfig;
use sysinfo::{System, SystemExt};
use tracing::debug;

const UNKNOWN: &str = "unknown";

/// Collects facts from the live host.
pub struct SystemCollector<R> {
    config: FactsConfig,
    runner: R,
}

impl<R: CommandRunner> SystemCollector<R> {
    pub fn new(config: FactsConfig, runner: R) -> Self {
        Self { config, runner }
    }
}

impl<R: CommandRunner> FactCollector for SystemCollector<R> {
    fn collect(&self) -> HostFacts {
        let mut system = System::new();
        system.refresh_memory();

        let containment = self.collect_containment();
        let physical_memory = system.total_memory();
        let total_memory_bytes = available_memory(physical_memory, containment.as_ref());

        let toolchain = if self.config.toolchain.enabled {
            Some(toolchain::collect(&self.config.toolchain, &self.runner))
        } else {
            None
        };

        let facts = HostFacts {
            user_name: user_name(),
            host_name: host_name(&system),
            os_description: os_description(&system),
            architecture: Architecture::current(),
            cpu_count: cpu_count(&mut system),
            total_memory_bytes,
            toolchain,
            containment,
        };
        debug!(
            host = %facts.host_name,
            cpus = facts.cpu_count,
            memory_bytes = facts.total_memory_bytes,
            contained = facts.containment.is_some(),
            "host facts collected"
        );
        facts
    }
}

impl<R> SystemCollector<R> {
    #[cfg(target_os = "linux")]
    fn collect_containment(&self) -> Option<ContainmentInfo> {
        if !self.config.cgroup.enabled {
            return None;
        }
        super::cgroup::probe(&self.config.cgroup)
    }

    #[cfg(not(target_os = "linux"))]
    fn collect_containment(&self) -> Option<ContainmentInfo> {
        None
    }
}

/// A cgroup limit below physical memory is the real ceiling for this process.
fn available_memory(physical: u64, containment: Option<&ContainmentInfo>) -> u64 {
    match containment {
        Some(c) if physical == 0 || c.limit_bytes < physical => c.limit_bytes,
        _ => physical,
    }
}

fn user_name() -> String {
    let name = whoami::username();
    if name.trim().is_empty() {
        debug!("user name unavailable");
        return UNKNOWN.to_string();
    }
    name
}

fn host_name(system: &System) -> String {
    match system.host_name().filter(|h| !h.trim().is_empty()) {
        Some(h) => h,
        None => {
            debug!("host name unavailable");
            UNKNOWN.to_string()
        }
    }
}

fn os_description(system: &System) -> String {
    system
        .long_os_version()
        .or_else(|| system.name())
        .filter(|d| !d.trim().is_empty())
        .unwrap_or_else(|| std::env::consts::OS.to_string())
}

fn cpu_count(system: &mut System) -> usize {
    if let Ok(n) = std::thread::available_parallelism() {
        return n.get();
    }
    system.refresh_cpu();
    system.cpus().len().max(1)
}
