use std::collections::BTreeMap;
use std::error::Error;
use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use hex_world::ascii::{self, AsciiMode};
use hex_world::field::FieldKind;
use hex_world::fog::{self, FogCounts};
use hex_world::regions::RegionStats;
use hex_world::{Axial, HexDirection, Label, TerrainKind, World, WorldConfig};

#[derive(Parser, Debug)]
#[command(name = "hex_world")]
#[command(about = "Generate a procedural hex world with labeled regions and fog of war")]
struct Args {
    /// Number of hex rings around the origin
    #[arg(short, long)]
    radius: Option<i32>,

    /// Random seed (uses random seed if not specified)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Hex size in pixels (center to corner)
    #[arg(long)]
    hex_size: Option<f64>,

    /// Disable biome edge jitter
    #[arg(long)]
    no_jitter: bool,

    /// Assign terrain on all cores
    #[arg(long)]
    parallel: bool,

    /// Field backing terrain generation (trig or perlin)
    #[arg(long)]
    field: Option<FieldKind>,

    /// Cells revealed around the player
    #[arg(long)]
    reveal: Option<u32>,

    /// JSON world config; command line flags override its values
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Comma separated moves to walk from the origin (e.g. "e,e,ne,nw")
    #[arg(short, long, value_delimiter = ',')]
    walk: Vec<HexDirection>,

    /// Rings of the map preview around the player
    #[arg(long, default_value = "8")]
    view: u32,

    /// Print a JSON report instead of the text preview
    #[arg(long)]
    json: bool,
}

/// Summary printed by `--json`.
#[derive(serde::Serialize)]
struct Report<'a> {
    seed: u64,
    radius: u32,
    cells: usize,
    player: Axial,
    census: BTreeMap<TerrainKind, usize>,
    regions: &'a RegionStats,
    fog: FogCounts,
    labels: &'a [Label],
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn load_config(args: &Args) -> Result<WorldConfig, Box<dyn Error>> {
    let mut config = match &args.config {
        Some(path) => serde_json::from_str(&std::fs::read_to_string(path)?)?,
        None => WorldConfig::default(),
    };

    if let Some(radius) = args.radius {
        config.grid.radius = radius;
    }
    if let Some(hex_size) = args.hex_size {
        config.grid.hex_size = hex_size;
    }
    if let Some(field) = args.field {
        config.grid.field = field;
    }
    if let Some(reveal) = args.reveal {
        config.reveal_radius = reveal;
    }
    if args.no_jitter {
        config.grid.jitter = false;
    }
    if args.parallel {
        config.grid.parallel = true;
    }
    // A seed in the config file wins over a random one
    config.grid.seed = match (args.seed, &args.config) {
        (Some(seed), _) => seed,
        (None, Some(_)) => config.grid.seed,
        (None, None) => rand::random(),
    };
    Ok(config)
}

fn main() -> Result<(), Box<dyn Error>> {
    init_tracing();
    let args = Args::parse();
    let config = load_config(&args)?;

    if !args.json {
        println!("Generating hex world with seed: {}", config.grid.seed);
        println!(
            "Radius: {} rings, hex size {}px, field {:?}{}",
            config.grid.radius,
            config.grid.hex_size,
            config.grid.field,
            if config.grid.jitter { "" } else { ", no jitter" }
        );
    }

    let mut world = World::generate(&config)?;

    let mut blocked = 0;
    for dir in &args.walk {
        if !world.step(*dir) {
            blocked += 1;
        }
    }

    if args.json {
        let report = Report {
            seed: world.seed(),
            radius: world.grid().radius(),
            cells: world.grid().len(),
            player: world.player(),
            census: world.grid().census(),
            regions: world.region_stats(),
            fog: fog::fog_counts(world.grid()),
            labels: world.labels(),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("Created {} cells", world.grid().len());
    println!("\nTerrain:");
    print!("{}", ascii::census_table(&world.grid().census()));

    let stats = world.region_stats();
    println!(
        "\nRegions: {} forests, {} deserts, {} oceans, {} lakes ({} labels)",
        stats.forest.labeled,
        stats.desert.labeled,
        stats.ocean.labeled,
        stats.lake.labeled,
        stats.total_labels()
    );

    if !args.walk.is_empty() {
        println!(
            "\nWalked {} of {} steps, now at {}",
            args.walk.len() - blocked,
            args.walk.len(),
            world.player()
        );
    }
    if let Some(cell) = world.player_cell() {
        println!("Standing on {}", cell.terrain().display_name());
    }

    println!();
    print!(
        "{}",
        ascii::render_window(world.grid(), world.player(), args.view, Some(world.player()), AsciiMode::Explored)
    );
    println!();
    print!("{}", ascii::terrain_legend());

    let visible: Vec<&Label> = world.visible_labels().collect();
    if !visible.is_empty() {
        println!("\nIn sight:");
        for label in visible {
            let at = hex_world::hex::to_axial(label.x, label.y, world.grid().hex_size());
            println!("  {} ({}) near {}", label.text, label.kind.display_name(), at);
        }
    }

    let counts = fog::fog_counts(world.grid());
    println!("\nExplored {:.1}% of the map", 100.0 * counts.revealed_fraction());

    Ok(())
}
