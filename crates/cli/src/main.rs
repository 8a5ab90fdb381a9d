#![deny(unsafe_code)]
//! CLI binary for the flowfield visualizer.
//!
//! Subcommands:
//! - `render` runs the simulation headless for N frames and writes a PNG
//! - `params` prints the current dials, their schema, and noise providers

mod error;

use clap::{Parser, Subcommand};
use error::CliError;
use flowfield_core::{
    ColorConfig, FlowConfig, NoiseKind, Player, Seed, Simulation, Srgb,
};
use flowfield_raster::{snapshot, Raster};
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::process;

#[derive(Parser)]
#[command(name = "flowfield", about = "Flow-field particle visualizer CLI")]
struct Cli {
    /// Output as JSON instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the simulation for N frames and write a PNG snapshot.
    Render {
        /// Surface width in pixels.
        #[arg(short = 'W', long, default_value_t = 640)]
        width: usize,

        /// Surface height in pixels.
        #[arg(short = 'H', long, default_value_t = 480)]
        height: usize,

        /// Flow-field cell size in pixels.
        #[arg(short, long, default_value_t = flowfield_core::seed::DEFAULT_CELL_SIZE)]
        cell_size: usize,

        /// Number of frames (one tick each).
        #[arg(short, long, default_value_t = 600)]
        ticks: usize,

        /// PRNG seed for deterministic output.
        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// Noise provider (simplex, perlin).
        #[arg(short, long, default_value = "simplex")]
        noise: String,

        /// Simulation dials as a JSON object.
        #[arg(long, default_value = "{}")]
        params: String,

        /// Color dials as a JSON object.
        #[arg(long, default_value = "{}")]
        color: String,

        /// Background color as hex.
        #[arg(long, default_value = "#000000")]
        background: String,

        /// Replay a seed file; overrides the surface, noise and dial options.
        #[arg(long, value_name = "FILE")]
        replay: Option<PathBuf>,

        /// Also write the run's seed file for later replay.
        #[arg(long, value_name = "FILE")]
        save_seed: Option<PathBuf>,

        /// Output file path.
        #[arg(short, long, default_value = "flowfield.png")]
        output: PathBuf,
    },
    /// Print default dials, their schema, and available noise providers.
    Params,
}

fn parse_object(flag: &str, text: &str) -> Result<Value, CliError> {
    let value: Value = serde_json::from_str(text)
        .map_err(|e| CliError::Input(format!("invalid --{flag} JSON: {e}")))?;
    if !value.is_object() {
        return Err(CliError::Input(format!("--{flag} must be a JSON object")));
    }
    Ok(value)
}

fn read_seed(path: &Path) -> Result<Seed, CliError> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| CliError::Io(format!("reading {}: {e}", path.display())))?;
    serde_json::from_str(&text)
        .map_err(|e| CliError::Input(format!("invalid seed file {}: {e}", path.display())))
}

fn write_seed(seed: &Seed, path: &Path) -> Result<(), CliError> {
    let text = serde_json::to_string_pretty(seed)?;
    std::fs::write(path, text)
        .map_err(|e| CliError::Io(format!("writing {}: {e}", path.display())))
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::Params => {
            let info = serde_json::json!({
                "params": FlowConfig::default().to_json(),
                "color": ColorConfig::default().to_json(),
                "schema": {
                    "params": FlowConfig::schema(),
                    "color": ColorConfig::schema(),
                },
                "noise": NoiseKind::list_names(),
            });
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                println!("Params:");
                println!("{}", serde_json::to_string_pretty(&info["params"])?);
                println!("Color:");
                println!("{}", serde_json::to_string_pretty(&info["color"])?);
                println!("Noise:");
                println!("  {}", NoiseKind::list_names().join(", "));
            }
        }
        Command::Render {
            width,
            height,
            cell_size,
            ticks,
            seed,
            noise,
            params,
            color,
            background,
            replay,
            save_seed,
            output,
        } => {
            let background = Srgb::from_hex(&background)?;
            let seed = match replay {
                Some(path) => read_seed(&path)?,
                None => Seed {
                    width,
                    height,
                    cell_size,
                    noise,
                    params: parse_object("params", &params)?,
                    color: parse_object("color", &color)?,
                    seed,
                    ticks,
                },
            };

            let sim = Simulation::from_seed(&seed)?;
            let mut raster = Raster::new(seed.width, seed.height, background)?;
            let mut player = Player::new(sim);
            player.clear_canvas(&mut raster);
            for _ in 0..seed.ticks {
                player.frame(&mut raster);
            }
            log::debug!("ran {} frames", player.simulation().ticks());

            snapshot::write_png(&raster, &output)?;
            if let Some(path) = &save_seed {
                write_seed(&seed, path)?;
            }

            let sim = player.simulation();
            if cli.json {
                let info = serde_json::json!({
                    "width": seed.width,
                    "height": seed.height,
                    "cell_size": seed.cell_size,
                    "noise": seed.noise,
                    "ticks": seed.ticks,
                    "seed": seed.seed,
                    "particles": sim.particles().len(),
                    "noise_z": sim.noise_z(),
                    "output": output.display().to_string(),
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                eprintln!(
                    "rendered {}x{} ({} particles, {} ticks, seed {}) -> {}",
                    seed.width,
                    seed.height,
                    sim.particles().len(),
                    seed.ticks,
                    seed.seed,
                    output.display()
                );
            }
        }
    }

    Ok(())
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();
    let json_mode = cli.json;
    if let Err(e) = run(cli) {
        if json_mode {
            let j = serde_json::json!({"error": e.to_string(), "exit_code": e.exit_code()});
            eprintln!("{}", serde_json::to_string_pretty(&j).unwrap_or_default());
        } else {
            eprintln!("error: {e}");
        }
        process::exit(e.exit_code());
    }
}
