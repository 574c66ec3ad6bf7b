use clap::Parser;
use log::LevelFilter;
use std::path::PathBuf;
use std::sync::Arc;

use frlg_core::{run, DataSnapshot, GameVersion, RandomizerSettings, Result};

#[derive(Debug, Parser)]
#[command(name = "frlg-randomizer", version, about = "Pokémon FireRed/LeafGreen randomizer")]
struct Args {
    /// Extracted game data, plain or gzipped JSON.
    #[arg(long)]
    data: PathBuf,

    /// Directory of region JSON files merged into the game data.
    #[arg(long)]
    regions: Option<PathBuf>,

    /// Settings JSON; anything missing falls back to vanilla.
    #[arg(long)]
    settings: Option<PathBuf>,

    #[arg(long)]
    output: PathBuf,

    #[arg(long)]
    seed: Option<u64>,

    #[arg(long)]
    game_version: Option<GameVersion>,

    #[arg(long, default_value_t = false)]
    spoiler: bool,

    #[arg(long, default_value_t = LevelFilter::Info)]
    log_level: LevelFilter,
}

fn setup_logger(level: LevelFilter) -> std::result::Result<(), log::SetLoggerError> {
    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "{} [{}] {}: {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
                record.level(),
                record.target(),
                message
            ))
        })
        .level(level)
        .chain(std::io::stderr())
        .apply()
}

/// Flags win over the settings file; with neither, the seed is random.
fn apply_overrides(settings: &mut RandomizerSettings, args: &Args) {
    match args.seed {
        Some(seed) => settings.seed = seed,
        None if args.settings.is_none() => settings.seed = rand::random(),
        None => {}
    }
    if let Some(version) = args.game_version {
        settings.game_version = version;
    }
}

fn execute(args: &Args) -> Result<PathBuf> {
    let data = match &args.regions {
        Some(regions) => DataSnapshot::load_with_regions(&args.data, regions)?,
        None => DataSnapshot::load(&args.data)?,
    };

    let mut settings = match &args.settings {
        Some(path) => RandomizerSettings::from_json_file(path)?,
        None => RandomizerSettings::default(),
    };
    apply_overrides(&mut settings, args);
    log::debug!("Effective settings: {}", serde_json::to_string(&settings)?);

    run(Arc::new(data), &settings, &args.output, args.spoiler)
}

fn main() {
    let args = Args::parse();

    if let Err(err) = setup_logger(args.log_level) {
        eprintln!("Failed to initialise logging: {err}");
    }

    match execute(&args) {
        Ok(out_root) => println!("Randomized data written to {}", out_root.display()),
        Err(err) => {
            eprintln!("Error: {err}");
            std::process::exit(1);
        }
    }
}
