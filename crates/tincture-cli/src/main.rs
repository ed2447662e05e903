//! Tincture CLI — inspect, edit, and bake persisted transfer functions.
//!
//! Every command takes a contents string as stored by the host application
//! (or `-` to read it from stdin) and prints either a new contents string or
//! JSON to stdout.

mod commands;
mod config;

use std::io::Read;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tincture_core::Rgb;
use tracing_subscriber::EnvFilter;

use crate::config::CliConfig;

#[derive(Debug, Parser)]
#[command(name = "tincture", version, about = "Transfer-function contents tools")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the contents of the default two-corner transfer function.
    Default,
    /// Decode contents and print the model as JSON.
    Inspect { contents: String },
    /// Replace the scalar range.
    Rescale {
        contents: String,
        #[arg(long, allow_negative_numbers = true)]
        min: f64,
        #[arg(long, allow_negative_numbers = true)]
        max: f64,
    },
    /// Add a control point.
    Add {
        contents: String,
        #[arg(long, allow_negative_numbers = true)]
        position: f64,
        #[arg(long)]
        opacity: f64,
        /// Color as `r,g,b` with channels in [0, 1].
        #[arg(long, value_parser = parse_color, default_value = "0,0,0")]
        color: Rgb,
    },
    /// Remove an interior control point. Corners are kept.
    Remove {
        contents: String,
        #[arg(long)]
        index: usize,
    },
    /// Print the interpolated opacity and color at a normalized position.
    Sample {
        contents: String,
        #[arg(long, allow_negative_numbers = true)]
        at: f64,
    },
    /// Apply a JSON array of editor commands and print the committed contents.
    Edit {
        contents: String,
        /// File holding the commands, or `-` for stdin.
        #[arg(long = "commands")]
        script: PathBuf,
    },
    /// Bake an RGBA LUT. Prints JSON unless `--png` is given.
    Bake {
        contents: String,
        #[arg(long)]
        size: Option<usize>,
        /// Write a gradient strip image instead of JSON.
        #[arg(long)]
        png: Option<PathBuf>,
    },
}

fn parse_color(s: &str) -> Result<Rgb, String> {
    let channels: Vec<f64> = s
        .split(',')
        .map(|c| c.trim().parse::<f64>().map_err(|e| format!("{c:?}: {e}")))
        .collect::<Result<_, _>>()?;
    match channels.as_slice() {
        [r, g, b] => Ok(Rgb::new(*r, *g, *b)),
        _ => Err(format!("expected r,g,b, got {} channel(s)", channels.len())),
    }
}

fn read_arg(value: &str) -> anyhow::Result<String> {
    if value != "-" {
        return Ok(value.to_string());
    }
    let mut buf = String::new();
    std::io::stdin()
        .read_to_string(&mut buf)
        .context("reading contents from stdin")?;
    Ok(buf)
}

fn main() -> anyhow::Result<()> {
    let config = CliConfig::default();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.log_filter))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    tracing::debug!(?cli.command, "running command");

    let output = match cli.command {
        Command::Default => commands::default_contents()?,
        Command::Inspect { contents } => commands::inspect(&read_arg(&contents)?)?,
        Command::Rescale { contents, min, max } => {
            commands::rescale(&read_arg(&contents)?, min, max)?
        }
        Command::Add {
            contents,
            position,
            opacity,
            color,
        } => commands::add(&read_arg(&contents)?, position, opacity, color)?,
        Command::Remove { contents, index } => commands::remove(&read_arg(&contents)?, index)?,
        Command::Sample { contents, at } => commands::sample(&read_arg(&contents)?, at)?,
        Command::Edit { contents, script } => {
            let script = if script.as_os_str() == "-" {
                read_arg("-")?
            } else {
                std::fs::read_to_string(&script)
                    .with_context(|| format!("reading {}", script.display()))?
            };
            commands::edit(&read_arg(&contents)?, &script)?
        }
        Command::Bake {
            contents,
            size,
            png,
        } => {
            let contents = read_arg(&contents)?;
            let size = size.unwrap_or(config.lut_size);
            match png {
                Some(path) => {
                    commands::bake_png(&contents, size, config.preview_height, &path)?;
                    format!("wrote {}", path.display())
                }
                None => commands::bake_json(&contents, size)?,
            }
        }
    };

    println!("{output}");
    Ok(())
}
