mod printer;
mod scenario;

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use site_ux_core::SiteConfig;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use crate::scenario::Scenario;

const USAGE: &str = "Usage: site-ux-replay <scenario.json> [--config <config.json>] [--json]";

struct Args {
    scenario: PathBuf,
    config: Option<PathBuf>,
    json: bool,
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Args> {
    let mut scenario = None;
    let mut config = None;
    let mut json = false;
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--json" => json = true,
            "--config" => {
                let Some(path) = args.next() else {
                    bail!("--config needs a file\n{USAGE}");
                };
                config = Some(PathBuf::from(path));
            }
            other if other.starts_with("--") => bail!("unknown flag {other}\n{USAGE}"),
            other => {
                if scenario.replace(PathBuf::from(other)).is_some() {
                    bail!("only one scenario file is accepted\n{USAGE}");
                }
            }
        }
    }
    let Some(scenario) = scenario else {
        bail!("{USAGE}");
    };
    Ok(Args {
        scenario,
        config,
        json,
    })
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(env_filter)
        .init();
}

fn main() -> Result<()> {
    init_tracing();
    let args = parse_args(std::env::args().skip(1))?;

    let data = std::fs::read_to_string(&args.scenario)
        .with_context(|| format!("reading {}", args.scenario.display()))?;
    let scenario = Scenario::from_json(&data)?;

    let config = match &args.config {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            Some(SiteConfig::from_json(&json)?)
        }
        None => None,
    };

    let frames = scenario.run(config)?;
    tracing::info!(frames = frames.len(), "replay finished");

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if args.json {
        printer::write_json(&mut out, &frames)?;
    } else {
        printer::write_text(&mut out, &frames)?;
    }
    out.flush()?;
    Ok(())
}
