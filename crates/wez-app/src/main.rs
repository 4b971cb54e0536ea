//! wez: headless engagement-envelope solver.
//!
//! Usage:
//!   wez [--config <path>] [--cycles <N>] [--seed <N>] [--json] [--log-level <level>]
//!
//! Flies a demo target past a launcher at the origin, solves the envelope on
//! the configured cadence, and prints each published snapshot.

use std::path::PathBuf;
use std::process;
use std::time::Duration;

use serde::Serialize;

use wez_app::cycle_loop::spawn_cycle_loop;
use wez_app::drone::TargetDrone;
use wez_app::logging::{init_logging, LogConfig, LogLevel};
use wez_app::{EnvelopeOrchestrator, Published};
use wez_core::enums::Boundary;
use wez_core::state::EnvelopeSnapshot;
use wez_core::types::{LauncherGeometry, Position};
use wez_core::EnvelopeConfig;

const DEFAULT_CYCLES: u64 = 3;
const DEFAULT_SEED: u64 = 1;

/// One line of `--json` output.
#[derive(Serialize)]
struct SnapshotRecord<'a> {
    generation: u64,
    envelope: &'a EnvelopeSnapshot,
    r_max_boundary: Vec<Position>,
}

struct Options {
    config: Option<PathBuf>,
    cycles: u64,
    seed: u64,
    json: bool,
    log_level: LogLevel,
}

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.iter().any(|a| a == "--help" || a == "-h") {
        print_usage();
        return;
    }

    let options = match parse_options(&args) {
        Ok(options) => options,
        Err(message) => {
            eprintln!("Error: {message}");
            print_usage();
            process::exit(1);
        }
    };

    init_logging(&LogConfig {
        level: options.log_level,
        ..LogConfig::default()
    });

    let config = match &options.config {
        Some(path) => match EnvelopeConfig::load(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Error loading {}: {e}", path.display());
                process::exit(1);
            }
        },
        None => EnvelopeConfig::default(),
    };

    let orchestrator = match EnvelopeOrchestrator::new(config) {
        Ok(orchestrator) => orchestrator,
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    };
    let store = orchestrator.store();

    let drone = TargetDrone::inbound(options.seed);
    let launcher = LauncherGeometry::default();
    let cycle_loop = spawn_cycle_loop(orchestrator, drone);

    let mut seen = 0;
    let mut printed = 0;
    while printed < options.cycles {
        let Some(update) = store.poll_since(seen) else {
            std::thread::sleep(Duration::from_millis(20));
            continue;
        };
        seen = update.generation;

        let Published::Ready(snapshot) = update.published else {
            continue;
        };
        if options.json {
            let record = SnapshotRecord {
                generation: update.generation,
                envelope: &snapshot,
                r_max_boundary: snapshot.boundary_points(Boundary::RMax, &launcher),
            };
            match serde_json::to_string(&record) {
                Ok(line) => println!("{line}"),
                Err(e) => eprintln!("Error serializing snapshot: {e}"),
            }
        } else {
            print!("{snapshot}");
        }
        printed += 1;
    }

    cycle_loop.shutdown();
}

fn parse_options(args: &[String]) -> Result<Options, String> {
    let mut options = Options {
        config: None,
        cycles: DEFAULT_CYCLES,
        seed: DEFAULT_SEED,
        json: false,
        log_level: LogLevel::Info,
    };

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--json" => options.json = true,
            "--config" => options.config = Some(PathBuf::from(value(args, &mut i)?)),
            "--cycles" => {
                options.cycles = value(args, &mut i)?
                    .parse()
                    .map_err(|_| "--cycles expects a positive integer".to_string())?;
            }
            "--seed" => {
                options.seed = value(args, &mut i)?
                    .parse()
                    .map_err(|_| "--seed expects an integer".to_string())?;
            }
            "--log-level" => options.log_level = value(args, &mut i)?.parse()?,
            other => return Err(format!("unknown argument: {other}")),
        }
        i += 1;
    }
    Ok(options)
}

/// Value following the flag at `*i`; advances `*i` onto it.
fn value<'a>(args: &'a [String], i: &mut usize) -> Result<&'a str, String> {
    let flag = &args[*i];
    *i += 1;
    args.get(*i)
        .map(String::as_str)
        .ok_or_else(|| format!("{flag} requires a value"))
}

fn print_usage() {
    eprintln!(
        "wez: weapon engagement zone solver\n\
         \n\
         Options:\n\
         \n\
           --config <path>      Envelope config (.toml or .yaml); defaults if omitted\n\
           --cycles <N>         Snapshots to print before exiting (default: 3)\n\
           --seed <N>           Demo target seed (default: 1)\n\
           --json               Print one JSON record per snapshot\n\
           --log-level <level>  trace, debug, info, warn or error (RUST_LOG overrides)\n"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_options_mixed_flags() {
        let options = parse_options(&args(&[
            "--json",
            "--cycles",
            "5",
            "--config",
            "wez.toml",
            "--log-level",
            "debug",
            "--seed",
            "9",
        ]))
        .unwrap();
        assert!(options.json);
        assert_eq!(options.cycles, 5);
        assert_eq!(options.config, Some(PathBuf::from("wez.toml")));
        assert_eq!(options.log_level, LogLevel::Debug);
        assert_eq!(options.seed, 9);
    }

    #[test]
    fn test_parse_options_defaults_and_errors() {
        let options = parse_options(&[]).unwrap();
        assert!(!options.json);
        assert_eq!(options.cycles, DEFAULT_CYCLES);
        assert_eq!(options.seed, DEFAULT_SEED);

        assert!(parse_options(&args(&["--cycles"])).is_err());
        assert!(parse_options(&args(&["--cycles", "many"])).is_err());
        assert!(parse_options(&args(&["--verbose"])).is_err());
    }
}
