//! Command-line flags for the `blockfall` binary.

use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};

use crate::core::GameConfig;
use crate::types::GameMode;

pub const USAGE: &str = "\
usage: blockfall [options]

  --level <n>       starting level (1-15)
  --mode <name>     classic | marathon | sprint
  --mute            start with sound disabled
  --seed <n>        piece generator seed
  --scores <path>   leaderboard file
  --log <path>      append log output to this file
  -h, --help        show this help";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliOptions {
    pub start_level: Option<u32>,
    pub mode: Option<GameMode>,
    pub mute: bool,
    pub seed: Option<u32>,
    pub scores_path: Option<PathBuf>,
    pub log_path: Option<PathBuf>,
    pub help: bool,
}

impl CliOptions {
    /// Layer the flags over `config` (usually the environment-derived one).
    pub fn apply(&self, config: GameConfig) -> GameConfig {
        let mut config = config;
        if let Some(level) = self.start_level {
            config = config.with_start_level(level);
        }
        if let Some(mode) = self.mode {
            config = config.with_mode(mode);
        }
        if self.mute {
            config = config.with_sound(false);
        }
        config.normalized()
    }
}

/// Parse arguments, excluding the program name.
pub fn parse_args(args: &[String]) -> Result<CliOptions> {
    let mut opts = CliOptions::default();
    let mut i = 0usize;
    while i < args.len() {
        match args[i].as_str() {
            "--level" => {
                let v = value(args, &mut i, "--level")?;
                let level = v
                    .parse::<u32>()
                    .with_context(|| format!("invalid --level value: {v}"))?;
                if level == 0 {
                    return Err(anyhow!("--level must be at least 1"));
                }
                opts.start_level = Some(level);
            }
            "--mode" => {
                let v = value(args, &mut i, "--mode")?;
                let mode = GameMode::from_str(v)
                    .ok_or_else(|| anyhow!("unknown --mode value: {v}"))?;
                opts.mode = Some(mode);
            }
            "--mute" => opts.mute = true,
            "--seed" => {
                let v = value(args, &mut i, "--seed")?;
                opts.seed = Some(
                    v.parse::<u32>()
                        .with_context(|| format!("invalid --seed value: {v}"))?,
                );
            }
            "--scores" => {
                opts.scores_path = Some(PathBuf::from(value(args, &mut i, "--scores")?));
            }
            "--log" => {
                opts.log_path = Some(PathBuf::from(value(args, &mut i, "--log")?));
            }
            "-h" | "--help" => opts.help = true,
            other => return Err(anyhow!("unknown argument: {other}")),
        }
        i += 1;
    }
    Ok(opts)
}

fn value<'a>(args: &'a [String], i: &mut usize, flag: &str) -> Result<&'a str> {
    *i += 1;
    args.get(*i)
        .map(String::as_str)
        .ok_or_else(|| anyhow!("missing value for {flag}"))
}
