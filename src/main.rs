//! fitdash: terminal front end for the fitness dashboard.
//!
//! Usage:
//!   fitdash [show] [--metric steps|heart-rate] [--range 7|14]
//!   fitdash stats [--metric M] [--range R]
//!   fitdash generate
//!   fitdash export <dir>
//!   fitdash verify <dir>

use anyhow::{bail, Context, Result};
use rand::{rngs::StdRng, SeedableRng};
use serde_json::json;
use std::env;
use std::path::PathBuf;

use fitdash::config::Config;
use fitdash::export::{read_dataset, write_dataset};
use fitdash::generator::{generate, generate_seeded};
use fitdash::logging::{log, log_generated, log_selection, log_stats, obj, v_str, Domain, Level};
use fitdash::model::Dataset;
use fitdash::render;
use fitdash::view::DashboardView;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Show,
    Stats,
    Generate,
    Export(PathBuf),
    Verify(PathBuf),
}

/// Applies CLI flags on top of `cfg` and returns the command to run.
fn parse_args(args: &[String], cfg: &mut Config) -> Result<Command> {
    let mut positional: Vec<&str> = Vec::new();
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--metric" | "-m" => {
                let v = iter.next().context("--metric needs a value")?;
                cfg.metric = v.parse()?;
            }
            "--range" | "-r" => {
                let v = iter.next().context("--range needs a value")?;
                cfg.range = v.parse()?;
            }
            "--seed" => {
                let v = iter.next().context("--seed needs a value")?;
                cfg.seed = Some(v.parse().with_context(|| format!("invalid seed {:?}", v))?);
            }
            flag if flag.starts_with('-') => bail!("unknown flag {}", flag),
            other => positional.push(other),
        }
    }

    let dir = |cmd: &str| -> Result<PathBuf> {
        positional
            .get(1)
            .map(PathBuf::from)
            .with_context(|| format!("{} needs a directory argument", cmd))
    };

    match positional.first().copied() {
        None | Some("show") => Ok(Command::Show),
        Some("stats") => Ok(Command::Stats),
        Some("generate") => Ok(Command::Generate),
        Some("export") => Ok(Command::Export(dir("export")?)),
        Some("verify") => Ok(Command::Verify(dir("verify")?)),
        Some(other) => bail!("unknown command {:?}", other),
    }
}

fn build_dataset(cfg: &Config) -> Dataset {
    let dataset = match cfg.seed {
        Some(seed) => generate_seeded(seed, &cfg.generator()),
        None => generate(&mut StdRng::from_entropy(), &cfg.generator()),
    };
    let flagged = dataset.records().iter().filter(|r| r.is_anomaly).count();
    let elevated = dataset.records().iter().filter(|r| r.is_elevated()).count();
    log_generated(cfg.seed, dataset.len(), flagged, elevated);
    dataset
}

fn main() -> Result<()> {
    let mut cfg = Config::from_env()?;
    let args: Vec<String> = env::args().skip(1).collect();
    let command = parse_args(&args, &mut cfg)?;

    log(
        Level::Debug,
        Domain::System,
        "startup",
        obj(&[("command", v_str(&format!("{:?}", command)))]),
    );

    let show = command == Command::Show;
    match command {
        Command::Verify(dir) => {
            let (dataset, manifest) = read_dataset(&dir)?;
            println!(
                "{}",
                json!({ "ok": true, "records": dataset.len(), "sha256": manifest.sha256 })
            );
        }
        Command::Generate => {
            let dataset = build_dataset(&cfg);
            println!("{}", serde_json::to_string_pretty(dataset.records())?);
        }
        Command::Export(dir) => {
            let dataset = build_dataset(&cfg);
            let manifest = write_dataset(&dir, &dataset, cfg.seed)?;
            println!("{}", serde_json::to_string_pretty(&manifest)?);
        }
        Command::Show | Command::Stats => {
            let dataset = build_dataset(&cfg);
            let view = DashboardView::new(&dataset, cfg.selection());
            let stats = view.stats();
            log_selection(&view.selection());
            log_stats(&view.selection(), &stats);
            if show {
                print!("{}", render::dashboard(&view));
            } else {
                let out = json!({
                    "selection": view.selection(),
                    "config": view.config(),
                    "stats": stats,
                    "rows": view.rows(),
                });
                println!("{}", serde_json::to_string_pretty(&out)?);
            }
        }
    }
    Ok(())
}
