mod bot;
mod play;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use duopuzzle_core::{compute_grid_layout, PuzzleConfig, PuzzleSettings, Side};
use rand::Rng;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "duopuzzle-cli", version, about = "Play, solve and inspect two-sided puzzles")]
struct Cli {
    /// TOML puzzle config (rows, cols, skin, frame paddings, ...).
    #[arg(long, global = true, env = "DUOPUZZLE_CONFIG")]
    config: Option<PathBuf>,
    #[arg(long, global = true)]
    rows: Option<u32>,
    #[arg(long, global = true)]
    cols: Option<u32>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive play on stdin; type `help` for commands.
    Play {
        #[arg(long)]
        seed: Option<String>,
    },
    /// Let the bot solve a puzzle with ordinary gestures.
    Solve {
        #[arg(long)]
        seed: Option<String>,
        #[arg(long, value_enum, default_value_t = SideArg::Front)]
        side: SideArg,
        /// Chance that a drop lands on a wrong cell first.
        #[arg(long, default_value_t = 0.0)]
        miss_rate: f32,
    },
    /// Print the grid geometry for a container size.
    Layout {
        width: f32,
        height: f32,
    },
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum SideArg {
    Front,
    Back,
}

impl From<SideArg> for Side {
    fn from(value: SideArg) -> Self {
        match value {
            SideArg::Front => Side::Front,
            SideArg::Back => Side::Back,
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("duopuzzle=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let settings = load_settings(cli.config.as_ref(), cli.rows, cli.cols)?;

    match cli.command {
        Commands::Play { seed } => {
            let seed = resolve_seed(seed.as_deref())?;
            let stdin = std::io::stdin();
            let stdout = std::io::stdout();
            play::run(settings, seed, stdin.lock(), stdout.lock())?;
        }
        Commands::Solve {
            seed,
            side,
            miss_rate,
        } => {
            let seed = resolve_seed(seed.as_deref())?;
            let report = bot::solve(
                settings,
                bot::BotConfig {
                    seed,
                    side: side.into(),
                    miss_rate,
                },
            )?;
            println!(
                "seed {seed:#010x}: solved {} side in {} gestures ({} misses)",
                side_name(report.side),
                report.steps,
                report.misses
            );
        }
        Commands::Layout { width, height } => {
            let layout = compute_grid_layout(
                width,
                height,
                settings.rows,
                settings.cols,
                settings.frame_insets(),
            );
            if !layout.visible {
                println!("hidden (opacity 0)");
                return Ok(());
            }
            let (outer_w, outer_h) = layout.outer_size();
            println!("grid: {} x {}", settings.cols, settings.rows);
            println!("cell: {:.3}", layout.cell_size);
            println!("board: {:.3} x {:.3}", layout.grid_width, layout.grid_height);
            println!("outer: {outer_w:.3} x {outer_h:.3}");
            for region in layout.frame_regions() {
                println!(
                    "frame {:?}: {:.1},{:.1} {:.1}x{:.1}",
                    region.part, region.x, region.y, region.width, region.height
                );
            }
        }
    }

    Ok(())
}

fn load_settings(
    path: Option<&PathBuf>,
    rows: Option<u32>,
    cols: Option<u32>,
) -> Result<PuzzleSettings, Box<dyn std::error::Error>> {
    let mut config = match path {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .map_err(|err| format!("reading {}: {err}", path.display()))?;
            PuzzleConfig::from_toml_str(&raw)?
        }
        None => PuzzleConfig::default(),
    };
    if rows.is_some() {
        config.rows = rows;
    }
    if cols.is_some() {
        config.cols = cols;
    }
    Ok(config.resolve())
}

fn resolve_seed(raw: Option<&str>) -> Result<u32, Box<dyn std::error::Error>> {
    match raw {
        Some(raw) => parse_seed_arg(raw),
        None => Ok(rand::rng().random()),
    }
}

fn parse_seed_arg(raw: &str) -> Result<u32, Box<dyn std::error::Error>> {
    let trimmed = raw.trim();
    let value = if let Some(hex) = trimmed.strip_prefix("0x").or_else(|| trimmed.strip_prefix("0X"))
    {
        u32::from_str_radix(hex, 16)?
    } else {
        trimmed.parse::<u32>()?
    };
    Ok(value)
}

pub(crate) fn side_name(side: Side) -> &'static str {
    match side {
        Side::Front => "front",
        Side::Back => "back",
    }
}
