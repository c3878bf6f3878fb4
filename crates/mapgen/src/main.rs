//! Level generator front end
//!
//! Generates a single rooms-and-corridors level and prints it as ASCII or
//! JSON. Parameters come from an optional JSON file, with individual values
//! overridable on the command line.

use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use log::info;
use tracing_subscriber::EnvFilter;

use mg_core::{GenerationParams, Heuristic, MapGenerator, MapRng, MapTemplate};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Ascii,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum HeuristicArg {
    Manhattan,
    Euclidean,
}

impl From<HeuristicArg> for Heuristic {
    fn from(arg: HeuristicArg) -> Self {
        match arg {
            HeuristicArg::Manhattan => Heuristic::Manhattan,
            HeuristicArg::Euclidean => Heuristic::Euclidean,
        }
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "mapgen",
    version,
    about = "Generate a rooms-and-corridors dungeon level"
)]
struct Args {
    /// Seed for the level; random when omitted
    #[arg(short, long)]
    seed: Option<u64>,

    /// JSON file with generation parameters
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Level width in tiles
    #[arg(long)]
    width: Option<i32>,

    /// Level height in tiles
    #[arg(long)]
    height: Option<i32>,

    /// Smallest room side, walls included
    #[arg(long)]
    min_room: Option<i32>,

    /// Largest room side, walls included
    #[arg(long)]
    max_room: Option<i32>,

    /// Minimum gap between a room and its region edge
    #[arg(long)]
    padding: Option<i32>,

    /// Heuristic used to route corridors
    #[arg(long, value_enum)]
    heuristic: Option<HeuristicArg>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Ascii)]
    format: OutputFormat,

    /// Log pipeline stages
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn params(&self) -> anyhow::Result<GenerationParams> {
        let mut params = match &self.config {
            Some(path) => {
                let text = fs::read_to_string(path)
                    .with_context(|| format!("reading config {}", path.display()))?;
                serde_json::from_str(&text)
                    .with_context(|| format!("parsing config {}", path.display()))?
            }
            None => GenerationParams::default(),
        };

        if let Some(width) = self.width {
            params.width = width;
        }
        if let Some(height) = self.height {
            params.height = height;
        }
        if let Some(min_room) = self.min_room {
            params.min_room_dimension = min_room;
        }
        if let Some(max_room) = self.max_room {
            params.max_room_dimension = max_room;
        }
        if let Some(padding) = self.padding {
            params.min_room_padding = padding;
        }
        if let Some(heuristic) = self.heuristic {
            params.heuristic = heuristic.into();
        }
        Ok(params)
    }
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    // Ignore the error if a subscriber is already installed
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init();
}

fn render(map: &MapTemplate, seed: u64) -> String {
    let mut out = format!(
        "seed {seed}  {}x{}  tile set '{}'  {} rooms\n",
        map.width,
        map.height,
        map.tile_set,
        map.rooms.len()
    );
    let mut rows: Vec<Vec<char>> = map
        .tiles
        .rows()
        .iter()
        .map(|row| row.iter().map(|t| t.symbol()).collect())
        .collect();
    let mut mark = |c: mg_core::Coordinates, ch: char| {
        if let Some(cell) = rows
            .get_mut(c.y as usize)
            .and_then(|row| row.get_mut(c.x as usize))
        {
            *cell = ch;
        }
    };
    for &c in &map.item_spawns {
        mark(c, '$');
    }
    for &c in &map.enemy_spawns {
        mark(c, 'e');
    }
    if let Some(start) = map.start {
        mark(start, '@');
    }
    for row in rows {
        out.extend(row);
        out.push('\n');
    }
    out
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let params = args.params()?;
    let generator = MapGenerator::new(params)?;
    let mut rng = args.seed.map_or_else(MapRng::from_entropy, MapRng::new);
    let seed = rng.seed();
    info!("generating level with seed {seed}");

    let map = generator.generate(&mut rng)?;
    match args.format {
        OutputFormat::Ascii => print!("{}", render(&map, seed)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&map)?),
    }
    Ok(())
}
