//! strat-run: headless strategy runner.
//!
//! Usage:
//!   strat-run play --file match.json [--team yellow]
//!   strat-run preview --file match.json [--team yellow]
//!   strat-run decode --blocks workspace.json --name match --output match.json
//!   strat-run list --dir strategies/

use std::path::PathBuf;
use std::process;

use anyhow::{bail, Context};
use tracing::info;

use stratview_app::config::load_config;
use stratview_app::logging::init_logging;
use stratview_app::playback_loop::{run_until_idle, LogSink};
use stratview_app::program::decode_program;
use stratview_app::store::{StrategyFile, StrategyStore};
use stratview_core::commands::ControlCommand;
use stratview_core::config::StudioConfig;
use stratview_core::enums::Team;
use stratview_sim::PlaybackEngine;

/// Tick cap for headless runs: ten minutes of virtual time at 60 Hz.
const MAX_TICKS: u64 = 36_000;

fn main() {
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    if let Err(e) = init_logging() {
        eprintln!("Warning: logging unavailable: {e}");
    }

    let result = match args[1].as_str() {
        "play" => cmd_play(&args[2..]),
        "preview" => cmd_preview(&args[2..]),
        "decode" => cmd_decode(&args[2..]),
        "list" => cmd_list(&args[2..]),
        "help" | "--help" | "-h" => {
            print_usage();
            Ok(())
        }
        other => {
            eprintln!("Unknown command: {other}");
            print_usage();
            process::exit(1);
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn print_usage() {
    eprintln!(
        "strat-run: headless stratview strategy runner\n\
         \n\
         Commands:\n\
         \n\
         play      Run a strategy to completion on the virtual clock\n\
         preview   Build preview curves and report out-of-arena segments\n\
         \n\
           --file <path>      Strategy file (JSON)\n\
           --team <side>      blue (default) or yellow\n\
         \n\
         decode    Convert exported editor blocks into a strategy file\n\
         \n\
           --blocks <path>    JSON array of editor blocks\n\
           --name <name>      Strategy name\n\
           --output <path>    Strategy file to write\n\
         \n\
         list      List strategies in a store directory\n\
         \n\
           --dir <path>       Store directory\n\
         \n\
         STRATVIEW_CONFIG may name a JSON configuration file.\n"
    );
}

// --- Argument helpers ---

fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.iter()
        .position(|arg| arg == flag)
        .and_then(|i| args.get(i + 1))
        .map(String::as_str)
}

fn require_path(args: &[String], flag: &str) -> anyhow::Result<PathBuf> {
    match flag_value(args, flag) {
        Some(value) => Ok(PathBuf::from(value)),
        None => bail!("{flag} <path> is required"),
    }
}

fn parse_team(args: &[String]) -> anyhow::Result<Option<Team>> {
    match flag_value(args, "--team") {
        None => Ok(None),
        Some("blue") => Ok(Some(Team::Blue)),
        Some("yellow") => Ok(Some(Team::Yellow)),
        Some(other) => bail!("unknown team {other:?}, expected blue or yellow"),
    }
}

fn config_for(args: &[String]) -> anyhow::Result<StudioConfig> {
    let mut config = load_config();
    if let Some(team) = parse_team(args)? {
        config.team = team;
    }
    Ok(config)
}

fn read_strategy(args: &[String]) -> anyhow::Result<StrategyFile> {
    let path = require_path(args, "--file")?;
    StrategyFile::read(&path).with_context(|| format!("reading {}", path.display()))
}

// --- Commands ---

fn cmd_play(args: &[String]) -> anyhow::Result<()> {
    let strategy = read_strategy(args)?;
    let config = config_for(args)?;
    let dt = config.dt();

    let mut engine = PlaybackEngine::new(config);
    engine.queue_command(ControlCommand::RunSimulation {
        program: strategy.commands,
    });

    let mut sink = LogSink::default();
    let Some(last) = run_until_idle(&mut engine, &mut sink, MAX_TICKS) else {
        bail!("strategy {:?} did not finish within {MAX_TICKS} ticks", strategy.name);
    };

    let pose = last.robot.pose;
    info!(strategy = %strategy.name, ticks = last.time.tick, "run finished");
    println!(
        "{}: finished after {:.2}s at ({:.1}, {:.1}) heading {:.1}",
        strategy.name,
        last.time.tick as f64 * dt,
        pose.x,
        pose.y,
        last.robot.display_theta
    );
    Ok(())
}

fn cmd_preview(args: &[String]) -> anyhow::Result<()> {
    let strategy = read_strategy(args)?;
    let mut engine = PlaybackEngine::new(config_for(args)?);
    engine.queue_command(ControlCommand::GeneratePreview {
        program: strategy.commands,
    });
    let snapshot = engine.tick();

    for curve in &snapshot.preview.curves {
        let end = curve.segment.curve.p3;
        let flag = if curve.out_of_bounds { "  OUT" } else { "" };
        println!(
            "{:<16} -> ({:.0}, {:.0}){flag}",
            curve.segment.source_id, end.x, end.y
        );
    }
    println!(
        "{} segment(s), {} out of arena",
        snapshot.preview.curves.len(),
        snapshot.preview.violation_count
    );
    Ok(())
}

fn cmd_decode(args: &[String]) -> anyhow::Result<()> {
    let blocks_path = require_path(args, "--blocks")?;
    let output = require_path(args, "--output")?;
    let Some(name) = flag_value(args, "--name") else {
        bail!("--name <name> is required");
    };

    let json = std::fs::read_to_string(&blocks_path)
        .with_context(|| format!("reading {}", blocks_path.display()))?;
    let blocks: Vec<serde_json::Value> =
        serde_json::from_str(&json).context("blocks file must be a JSON array")?;

    let program = decode_program(&blocks);
    let rejected = program.rejected;
    let file = StrategyFile::new(name, program.commands);
    std::fs::write(&output, serde_json::to_string_pretty(&file)?)
        .with_context(|| format!("writing {}", output.display()))?;

    println!(
        "Wrote {} command(s) to {} ({rejected} block(s) rejected)",
        file.commands.len(),
        output.display()
    );
    Ok(())
}

fn cmd_list(args: &[String]) -> anyhow::Result<()> {
    let store = StrategyStore::new(require_path(args, "--dir")?);
    for name in store.list()? {
        println!("{name}");
    }
    Ok(())
}
