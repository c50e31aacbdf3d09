use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing_subscriber::EnvFilter;

use gridfire::assets::{GameAssets, MirrorMode};
use gridfire::config::Tuning;
use gridfire::engine::EngineBuilder;
use gridfire::enemy::RngSource;
use gridfire::window::{WindowConfig, WindowMode};

#[derive(Parser, Debug)]
#[command(name = "gridfire", version, about = "Ray-cast grid shooter")]
struct Args {
    /// Directory holding wall.png, Ceiling.png, SAKOA0.png and slhv/.
    #[arg(long, default_value = "sprites")]
    assets: PathBuf,

    /// JSON tuning file; omitted fields keep their defaults.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Window magnification of the software frame.
    #[arg(long, default_value_t = 2)]
    scale: u32,

    #[arg(long)]
    borderless: bool,

    /// Use generated art instead of loading files.
    #[arg(long)]
    placeholder_assets: bool,

    /// Seed for enemy decisions; random when omitted.
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();

    let tuning = match &args.config {
        Some(path) => Tuning::load(path).with_context(|| format!("loading config {}", path.display()))?,
        None => Tuning::default(),
    };

    let assets = if args.placeholder_assets {
        GameAssets::placeholder(MirrorMode::DrawTime)
    } else {
        GameAssets::load(&args.assets, MirrorMode::DrawTime)
            .with_context(|| format!("loading assets from {}", args.assets.display()))?
    };

    let rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mode = if args.borderless { WindowMode::Borderless } else { WindowMode::Windowed };
    let window = WindowConfig::for_frame(tuning.render.width, tuning.render.height, args.scale, mode);

    EngineBuilder::default()
        .with_tuning(tuning)
        .with_window(window)
        .run(assets, Box::new(RngSource(rng)))
        .context("game loop failed")
}
