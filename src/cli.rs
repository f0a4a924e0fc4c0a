use std::path::Path;

use crate::config::PipelineConfig;
use crate::data::inspect::{render, summarize_all};
use crate::data::loader::load_all;
use crate::pipeline::{fuse, run};

const USAGE: &str = "usage: lorefuse <fuse|inspect|boss> [args]\n  \
    lorefuse fuse [config.yaml]\n  \
    lorefuse inspect [config.yaml]\n  \
    lorefuse boss <name> [config.yaml]";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Fuse,
    Inspect,
    Boss,
}

pub fn parse_command(args: &[String]) -> Option<Command> {
    match args.get(1).map(String::as_str) {
        Some("fuse") => Some(Command::Fuse),
        Some("inspect") => Some(Command::Inspect),
        Some("boss") => Some(Command::Boss),
        _ => None,
    }
}

/// Dispatch a command line; returns the process exit code
/// (0 ok, 1 failure, 2 usage).
pub fn run_with_args(args: &[String]) -> i32 {
    match parse_command(args) {
        Some(Command::Fuse) => handle_fuse(args),
        Some(Command::Inspect) => handle_inspect(args),
        Some(Command::Boss) => handle_boss(args),
        None => {
            eprintln!("{USAGE}");
            2
        }
    }
}

fn handle_fuse(args: &[String]) -> i32 {
    let Some(config) = load_config(args.get(2)) else {
        return 1;
    };
    match run(&config) {
        Ok(document) => {
            println!(
                "fuse complete: weapons={}, bosses={}, output='{}'",
                document.metadata.total_weapons,
                document.metadata.total_bosses,
                config.output_path.display()
            );
            0
        }
        Err(err) => {
            eprintln!("fuse failed: {err}");
            1
        }
    }
}

fn handle_inspect(args: &[String]) -> i32 {
    let Some(config) = load_config(args.get(2)) else {
        return 1;
    };
    let sources = load_all(&config);
    let summaries = summarize_all(&sources, &config);
    print!("{}", render(&summaries, sources.lore.len()));
    0
}

fn handle_boss(args: &[String]) -> i32 {
    let Some(name) = args.get(2) else {
        eprintln!("usage: lorefuse boss <name> [config.yaml]");
        return 2;
    };
    let Some(config) = load_config(args.get(3)) else {
        return 1;
    };

    let sources = load_all(&config);
    let document = fuse(&sources, &config);
    let Some(boss) = document.find_boss(name, &config) else {
        eprintln!("no boss matching '{name}'");
        return 1;
    };
    match serde_json::to_string_pretty(boss) {
        Ok(payload) => {
            println!("{payload}");
            0
        }
        Err(err) => {
            eprintln!("failed to serialize boss: {err}");
            1
        }
    }
}

/// Explicit config path, or the stock configuration when none is given.
fn load_config(raw: Option<&String>) -> Option<PipelineConfig> {
    let Some(path) = raw else {
        return Some(PipelineConfig::default());
    };
    match PipelineConfig::load(Path::new(path)) {
        Ok(config) => Some(config),
        Err(err) => {
            eprintln!("{err}");
            None
        }
    }
}
