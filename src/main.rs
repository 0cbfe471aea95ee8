mod animation;
mod app;
mod collectors;
mod config;
mod logos;
mod render;
mod theme;
mod units;

use app::Invocation;
use clap::Parser;
use collectors::system::SystemCollector;
use collectors::toolchain::ProcessRunner;
use config::Config;
use std::ffi::OsString;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug, Default)]
#[command(name = "runtimeinfo")]
#[command(disable_help_flag = true)]
struct Cli {
    /// Logo style: dotnetbot, animated, ascii, blocktext
    #[arg(allow_hyphen_values = true)]
    style: Option<String>,
    #[arg(short = 'h', long = "help")]
    help: bool,
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    print_default_config: bool,
}

fn main() {
    init_tracing();

    let cli = parse_args(std::env::args_os());

    if cli.print_default_config {
        let mut stdout = io::stdout().lock();
        if let Err(err) = writeln!(stdout, "{}", Config::example_yaml()) {
            error!(error = %err, "failed to write default config");
        }
        return;
    }

    let cfg = load_config(cli.config.as_deref());
    let invocation = Invocation::from_args(cli.style, cli.help, &cfg.default_style);
    info!(?invocation, "starting runtimeinfo");

    let collector = SystemCollector::new(cfg.facts.clone(), ProcessRunner);
    let mut stdout = io::stdout().lock();
    if let Err(err) = app::run(&invocation, &cfg, &collector, &mut stdout) {
        error!(error = %err, "failed to write output");
    }
}

/// Arguments clap rejects never abort the run: the first raw argument after
/// the program name becomes the logo style, decoded lossily.
fn parse_args<I>(args: I) -> Cli
where
    I: IntoIterator<Item = OsString>,
{
    let args: Vec<OsString> = args.into_iter().collect();
    match Cli::try_parse_from(&args) {
        Ok(cli) => cli,
        Err(err) => {
            warn!(error = %err.kind(), "unexpected arguments, using the first one as logo style");
            Cli {
                style: args.get(1).map(|a| a.to_string_lossy().into_owned()),
                ..Cli::default()
            }
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn load_config(path: Option<&Path>) -> Config {
    let Some(path) = path else {
        return Config::default();
    };
    match Config::load_from_file(path) {
        Ok(cfg) => cfg,
        Err(err) => {
            error!(error = %err, "failed to load config, using defaults");
            Config::default()
        }
    }
}
