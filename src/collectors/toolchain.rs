use crate::collectors::{ProbeError, ToolchainFacts};
use crate::config::ToolchainConfig;
use std::process::{Command, Stdio};
use tracing::debug;

const NOT_AVAILABLE: &str = "N/A";

/// Runs an external program to completion and returns its stdout lines.
pub trait CommandRunner {
    fn run(&self, program: &str, args: &[String]) -> Result<Vec<String>, ProbeError>;
}

/// Spawns real processes. No timeout: a hanging tool stalls collection.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessRunner;

impl CommandRunner for ProcessRunner {
    fn run(&self, program: &str, args: &[String]) -> Result<Vec<String>, ProbeError> {
        let output = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stderr(Stdio::null())
            .output()
            .map_err(|source| ProbeError::Launch {
                program: program.to_string(),
                source,
            })?;
        if !output.status.success() {
            return Err(ProbeError::ExitStatus {
                program: program.to_string(),
                status: output.status,
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout)
            .lines()
            .map(str::to_string)
            .collect())
    }
}

pub fn collect(cfg: &ToolchainConfig, runner: &dyn CommandRunner) -> ToolchainFacts {
    let runtimes = listing(&cfg.program, &cfg.runtimes_args, runner);
    ToolchainFacts {
        runtime_version: newest_runtime(&runtimes, &cfg.runtime_name)
            .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
        sdk_version: version(cfg, runner),
        runtime_count: runtimes.len(),
        sdk_count: listing(&cfg.program, &cfg.sdks_args, runner).len(),
    }
}

fn version(cfg: &ToolchainConfig, runner: &dyn CommandRunner) -> String {
    let first_line = runner.run(&cfg.program, &cfg.version_args).and_then(|lines| {
        lines
            .into_iter()
            .map(|l| l.trim().to_string())
            .find(|l| !l.is_empty())
            .ok_or_else(|| ProbeError::EmptyOutput {
                program: cfg.program.clone(),
            })
    });

    match first_line {
        Ok(v) => v,
        Err(err) => {
            debug!(error = %err, "toolchain version unavailable");
            NOT_AVAILABLE.to_string()
        }
    }
}

/// Non-blank lines of a listing command, empty when it fails.
fn listing(program: &str, args: &[String], runner: &dyn CommandRunner) -> Vec<String> {
    match runner.run(program, args) {
        Ok(lines) => lines.into_iter().filter(|l| !l.trim().is_empty()).collect(),
        Err(err) => {
            debug!(error = %err, args = ?args, "toolchain listing unavailable");
            Vec::new()
        }
    }
}

/// Highest version among `<name> <version> [<path>]` lines.
fn newest_runtime(lines: &[String], name: &str) -> Option<String> {
    lines
        .iter()
        .filter_map(|line| {
            let mut fields = line.split_whitespace();
            if fields.next()? != name {
                return None;
            }
            fields.next().map(str::to_string)
        })
        .max_by_key(|v| version_key(v))
}

/// Numeric release parts, then release above prerelease of the same numbers.
fn version_key(version: &str) -> (Vec<u64>, bool) {
    let (release, is_release) = match version.split_once('-') {
        Some((release, _)) => (release, false),
        None => (version, true),
    };
    let parts = release
        .split('.')
        .map(|part| part.parse().unwrap_or(0))
        .collect();
    (parts, is_release)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::collections::HashMap;

    /// Answers by first argument; unknown arguments fail to launch.
    pub(crate) struct StubRunner {
        pub(crate) answers: HashMap<String, Vec<String>>,
    }

    impl StubRunner {
        pub(crate) fn dotnet() -> Self {
            let mut answers = HashMap::new();
            answers.insert("--version".to_string(), vec!["9.0.100".to_string()]);
            answers.insert(
                "--list-runtimes".to_string(),
                vec![
                    "Microsoft.AspNetCore.App 9.0.0 [/usr/share/dotnet/shared]".to_string(),
                    "".to_string(),
                    "Microsoft.NETCore.App 9.0.0 [/usr/share/dotnet/shared]".to_string(),
                    "   ".to_string(),
                ],
            );
            answers.insert(
                "--list-sdks".to_string(),
                vec!["9.0.100 [/usr/share/dotnet/sdk]".to_string()],
            );
            Self { answers }
        }
    }

    impl CommandRunner for StubRunner {
        fn run(&self, program: &str, args: &[String]) -> Result<Vec<String>, ProbeError> {
            let key = args.first().cloned().unwrap_or_default();
            self.answers
                .get(&key)
                .cloned()
                .ok_or_else(|| ProbeError::Launch {
                    program: program.to_string(),
                    source: std::io::Error::from(std::io::ErrorKind::NotFound),
                })
        }
    }

    #[test]
    fn counts_ignore_blank_lines() {
        let facts = collect(&ToolchainConfig::default(), &StubRunner::dotnet());
        assert_eq!(
            facts,
            ToolchainFacts {
                runtime_version: "9.0.0".to_string(),
                sdk_version: "9.0.100".to_string(),
                runtime_count: 2,
                sdk_count: 1,
            }
        );
    }

    #[test]
    fn unavailable_tool_falls_back() {
        let runner = StubRunner {
            answers: HashMap::new(),
        };
        let facts = collect(&ToolchainConfig::default(), &runner);
        assert_eq!(facts.runtime_version, "N/A");
        assert_eq!(facts.sdk_version, "N/A");
        assert_eq!(facts.runtime_count, 0);
        assert_eq!(facts.sdk_count, 0);
    }

    #[test]
    fn blank_version_output_falls_back() {
        let mut runner = StubRunner::dotnet();
        runner
            .answers
            .insert("--version".to_string(), vec!["".to_string(), " ".to_string()]);
        let facts = collect(&ToolchainConfig::default(), &runner);
        assert_eq!(facts.sdk_version, "N/A");
    }

    #[test]
    fn runtime_version_is_the_newest_matching_runtime() {
        let mut runner = StubRunner::dotnet();
        runner.answers.insert(
            "--list-runtimes".to_string(),
            [
                "Microsoft.AspNetCore.App 11.0.0 [/usr/share/dotnet/shared]",
                "Microsoft.NETCore.App 8.0.11 [/usr/share/dotnet/shared]",
                "Microsoft.NETCore.App 10.0.0-rc.2 [/usr/share/dotnet/shared]",
                "Microsoft.NETCore.App 9.0.2 [/usr/share/dotnet/shared]",
            ]
            .map(str::to_string)
            .to_vec(),
        );
        let facts = collect(&ToolchainConfig::default(), &runner);
        assert_eq!(facts.runtime_version, "10.0.0-rc.2");
        assert_eq!(facts.runtime_count, 4);
    }

    #[test]
    fn release_outranks_prerelease_of_same_version() {
        let lines = [
            "Microsoft.NETCore.App 10.0.0 [/x]",
            "Microsoft.NETCore.App 10.0.0-rc.2 [/x]",
            "Microsoft.NETCore.App 9.0.10 [/x]",
        ]
        .map(str::to_string);
        assert_eq!(
            newest_runtime(&lines, "Microsoft.NETCore.App").as_deref(),
            Some("10.0.0")
        );
        assert_eq!(newest_runtime(&lines, "Microsoft.WindowsDesktop.App"), None);
    }

    #[test]
    fn missing_runtime_name_falls_back() {
        let cfg = ToolchainConfig {
            runtime_name: "Microsoft.WindowsDesktop.App".to_string(),
            ..ToolchainConfig::default()
        };
        let facts = collect(&cfg, &StubRunner::dotnet());
        assert_eq!(facts.runtime_version, "N/A");
        assert_eq!(facts.runtime_count, 2);
    }

    #[test]
    fn missing_program_is_a_launch_error() {
        let err = ProcessRunner
            .run("runtimeinfo-no-such-program-7f3a", &["--version".to_string()])
            .expect_err("program does not exist");
        assert!(matches!(err, ProbeError::Launch { .. }));

        let cfg = ToolchainConfig {
            program: "runtimeinfo-no-such-program-7f3a".to_string(),
            ..ToolchainConfig::default()
        };
        assert_eq!(collect(&cfg, &ProcessRunner).sdk_version, "N/A");
    }

    #[cfg(unix)]
    #[test]
    fn non_zero_exit_is_reported() {
        let err = ProcessRunner
            .run("sh", &["-c".to_string(), "echo 1.0; exit 3".to_string()])
            .expect_err("exit 3 is a failure");
        assert!(matches!(err, ProbeError::ExitStatus { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn stdout_lines_are_returned() {
        let lines = ProcessRunner
            .run("sh", &["-c".to_string(), "printf 'a\\n\\nb\\n'".to_string()])
            .expect("sh runs");
        assert_eq!(lines, vec!["a", "", "b"]);
    }
}
