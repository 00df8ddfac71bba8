//! gmlgen: generate GameMaker entity scripts and dialogue graphs.
//!
//! Usage:
//!   gmlgen entities --model model.json --project path/to/game
//!   gmlgen dialogue --name inn --input inn.json --output inn.graph.json

mod cli;
mod config;

use crate::{
    cli::{Cli, Cmd, DialogueArgs, EntitiesArgs},
    config::Config,
};
use anyhow::{Context, Result, bail};
use clap::Parser;
use gmlgen::{Summary, dialogue::build_dialogue};
use std::fs;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match Cli::parse().cmd {
        Cmd::Entities(args) => entities(args),
        Cmd::Dialogue(args) => dialogue(&args),
    }
}

fn entities(args: EntitiesArgs) -> Result<()> {
    let config = Config::discover(args.config.as_deref()).context("load config")?;
    let (request, labels) = args.resolve(config)?;

    let summary = gmlgen::run(&request).with_context(|| {
        format!("generate from '{}'", request.model_path.display())
    })?;
    report(&summary);

    if let Some(path) = labels {
        let json = summary.merged_labels().to_json()?;
        fs::write(&path, json).with_context(|| format!("write labels to '{}'", path.display()))?;
        log::info!("labels written to {}", path.display());
    }

    if summary.has_failures() {
        bail!("{} entit(ies) failed", summary.failures.len());
    }

    Ok(())
}

fn report(summary: &Summary) {
    println!(
        "generated {} entit(ies), {} script(s) written",
        summary.generated.len(),
        summary.written.len()
    );
    for script in &summary.skipped {
        println!("  skipped {script} (override)");
    }
    for failure in &summary.failures {
        println!("  failed {}: {}", failure.entity, failure.error);
    }
}

fn dialogue(args: &DialogueArgs) -> Result<()> {
    let text = fs::read_to_string(&args.input)
        .with_context(|| format!("read '{}'", args.input.display()))?;
    let designer: serde_json::Value = serde_json::from_str(&text)
        .with_context(|| format!("parse '{}'", args.input.display()))?;

    let dialogue = build_dialogue(&args.name, &designer, &args.lang)?;
    let json = serde_json::to_string_pretty(&dialogue)?;

    match &args.output {
        Some(path) => {
            fs::write(path, json).with_context(|| format!("write '{}'", path.display()))?;
            log::info!("dialogue {} written to {}", args.name, path.display());
        }
        None => println!("{json}"),
    }

    Ok(())
}
