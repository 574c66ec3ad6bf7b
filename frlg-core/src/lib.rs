use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;

mod abilities;
mod candidates;
mod compatibility;
mod context;
pub mod data;
mod learnsets;
mod loader;
mod movesets;
pub mod options;
mod spoiler;
mod starters;
mod statics;
pub mod tables;
#[doc(hidden)]
pub mod testkit;
mod trainers;
mod types;
mod wild;

pub use context::RandomizationContext;
pub use data::{
    DataSnapshot, EventData, GameVersion, MapData, SpeciesData, SpeciesId, StarterData,
    StaticPokemonData, TrainerData, BASE_OFFSET,
};

use options::{
    Compatibility, OaksAideRequirements, RandomizeAbilities, RandomizeLegendaryPokemon,
    RandomizeMoves, RandomizeSpecies, RandomizeTypes, WildPokemonGroups,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RandomizerSettings {
    pub seed: u64,
    pub game_version: GameVersion,
    pub types: RandomizeTypes,
    pub abilities: RandomizeAbilities,
    pub moves: RandomizeMoves,
    pub wild_pokemon: RandomizeSpecies,
    pub wild_pokemon_groups: WildPokemonGroups,
    pub starters: RandomizeSpecies,
    pub legendary_pokemon: RandomizeLegendaryPokemon,
    pub misc_pokemon: RandomizeSpecies,
    pub trainers: RandomizeSpecies,
    pub tm_tutor_compatibility: Compatibility,
    pub hm_compatibility: Compatibility,
    pub oaks_aides: OaksAideRequirements,
    pub wild_pokemon_blacklist: BTreeSet<String>,
    pub starter_blacklist: BTreeSet<String>,
    pub trainer_blacklist: BTreeSet<String>,
    pub ability_blacklist: BTreeSet<String>,
    pub move_blacklist: BTreeSet<String>,
}

impl Default for RandomizerSettings {
    fn default() -> Self {
        RandomizerSettings {
            seed: 0,
            game_version: GameVersion::FireRed,
            types: RandomizeTypes::Vanilla,
            abilities: RandomizeAbilities::Vanilla,
            moves: RandomizeMoves::Vanilla,
            wild_pokemon: RandomizeSpecies::Vanilla,
            wild_pokemon_groups: WildPokemonGroups::None,
            starters: RandomizeSpecies::Vanilla,
            legendary_pokemon: RandomizeLegendaryPokemon::Vanilla,
            misc_pokemon: RandomizeSpecies::Vanilla,
            trainers: RandomizeSpecies::Vanilla,
            tm_tutor_compatibility: Compatibility::Vanilla,
            hm_compatibility: Compatibility::Vanilla,
            oaks_aides: OaksAideRequirements::default(),
            wild_pokemon_blacklist: BTreeSet::new(),
            starter_blacklist: BTreeSet::new(),
            trainer_blacklist: BTreeSet::new(),
            ability_blacklist: BTreeSet::new(),
            move_blacklist: BTreeSet::new(),
        }
    }
}

impl RandomizerSettings {
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }
}

#[derive(Debug, Error)]
pub enum RandomizerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("walking region directory: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("configuration error: {0}")]
    Config(String),
    #[error("no candidate species left for {context}")]
    DegenerateUniverse { context: String },
}

pub type Result<T> = std::result::Result<T, RandomizerError>;

/// The working copies after every pass has run, keyed by the same ids as the baseline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RandomizedData {
    pub seed: u64,
    pub game_version: GameVersion,
    pub species: BTreeMap<SpeciesId, SpeciesData>,
    pub maps: BTreeMap<String, MapData>,
    pub trainers: BTreeMap<u16, TrainerData>,
    pub starters: BTreeMap<String, StarterData>,
    pub legendary_pokemon: BTreeMap<String, StaticPokemonData>,
    pub misc_pokemon: BTreeMap<String, StaticPokemonData>,
    pub events: BTreeMap<String, EventData>,
}

/// Runs every pass in order against a fresh context.
pub fn generate(data: Arc<DataSnapshot>, settings: &RandomizerSettings) -> Result<RandomizedData> {
    let mut ctx = RandomizationContext::new(data, settings.clone())?;
    log::info!(
        "Generating seed {} for {}",
        settings.seed,
        settings.game_version
    );

    types::randomize_types(&mut ctx);
    abilities::randomize_abilities(&mut ctx)?;
    learnsets::randomize_moves(&mut ctx)?;
    wild::randomize_wild_encounters(&mut ctx)?;
    starters::randomize_starters(&mut ctx)?;
    statics::randomize_legendaries(&mut ctx)?;
    statics::randomize_misc_pokemon(&mut ctx)?;
    trainers::randomize_trainer_parties(&mut ctx)?;
    compatibility::randomize_tm_hm_compatibility(&mut ctx);

    Ok(ctx.into_randomized())
}

/// Generates a seed and writes its outputs to a per-seed folder under `output_dir`.
pub fn run(
    data: Arc<DataSnapshot>,
    settings: &RandomizerSettings,
    output_dir: &Path,
    write_spoiler: bool,
) -> Result<PathBuf> {
    let randomized = generate(Arc::clone(&data), settings)?;

    // One folder per seed so runs never overwrite each other.
    let out_root = output_dir.join(format!("FRLG_{}", settings.seed));
    fs::create_dir_all(&out_root)?;
    fs::write(
        out_root.join("randomized_data.json"),
        serde_json::to_string_pretty(&randomized)?,
    )?;
    fs::write(out_root.join("settings.json"), serde_json::to_string_pretty(settings)?)?;
    if write_spoiler {
        fs::write(out_root.join("spoiler_log.txt"), randomized.spoiler_log(&data))?;
    }

    log::info!("Wrote seed {} to {}", settings.seed, out_root.display());
    Ok(out_root)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testkit::sample_snapshot;

    fn everything_on(seed: u64) -> RandomizerSettings {
        RandomizerSettings {
            seed,
            types: RandomizeTypes::FollowEvolutions,
            abilities: RandomizeAbilities::FollowEvolutions,
            moves: RandomizeMoves::StartWithFourMoves,
            wild_pokemon: RandomizeSpecies::MatchBaseStatsAndType,
            wild_pokemon_groups: WildPokemonGroups::Dungeons,
            starters: RandomizeSpecies::MatchType,
            legendary_pokemon: RandomizeLegendaryPokemon::Legendaries,
            misc_pokemon: RandomizeSpecies::MatchBaseStats,
            trainers: RandomizeSpecies::Random,
            tm_tutor_compatibility: Compatibility::Percent(50),
            hm_compatibility: Compatibility::Percent(25),
            ..RandomizerSettings::default()
        }
    }

    #[test]
    fn same_seed_produces_identical_output() {
        let data = Arc::new(sample_snapshot());
        let first = generate(Arc::clone(&data), &everything_on(1234)).unwrap();
        let second = generate(Arc::clone(&data), &everything_on(1234)).unwrap();
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[test]
    fn different_seeds_diverge() {
        let data = Arc::new(sample_snapshot());
        let first = generate(Arc::clone(&data), &everything_on(1)).unwrap();
        let second = generate(Arc::clone(&data), &everything_on(2)).unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn vanilla_settings_leave_baseline_untouched() {
        let data = Arc::new(sample_snapshot());
        let out = generate(Arc::clone(&data), &RandomizerSettings::default()).unwrap();
        assert_eq!(out.species, data.species);
        assert_eq!(out.maps, data.maps);
        assert_eq!(out.trainers, data.trainers);
        assert_eq!(out.events, data.events);
    }

    #[test]
    fn baseline_is_never_mutated() {
        let data = Arc::new(sample_snapshot());
        let before = data.species.clone();
        generate(Arc::clone(&data), &everything_on(99)).unwrap();
        assert_eq!(data.species, before);
    }

    #[test]
    fn run_writes_outputs_into_a_seed_folder() {
        let data = Arc::new(sample_snapshot());
        let output = std::env::temp_dir().join(format!("frlg-run-{}", std::process::id()));
        let out_root = run(Arc::clone(&data), &everything_on(31), &output, true).unwrap();

        assert_eq!(out_root, output.join("FRLG_31"));
        let written: RandomizedData =
            serde_json::from_str(&fs::read_to_string(out_root.join("randomized_data.json")).unwrap()).unwrap();
        assert_eq!(written, generate(data, &everything_on(31)).unwrap());
        assert!(out_root.join("settings.json").exists());
        assert!(fs::read_to_string(out_root.join("spoiler_log.txt"))
            .unwrap()
            .starts_with("FRLG Randomizer seed: 31"));

        fs::remove_dir_all(&output).unwrap();
    }

    #[test]
    fn settings_fill_missing_fields_with_defaults() {
        let settings: RandomizerSettings =
            serde_json::from_str(r#"{"seed": 7, "types": "shuffle", "game_version": "leafgreen"}"#).unwrap();
        assert_eq!(settings.seed, 7);
        assert_eq!(settings.types, RandomizeTypes::Shuffle);
        assert_eq!(settings.game_version, GameVersion::LeafGreen);
        assert_eq!(settings.wild_pokemon, RandomizeSpecies::Vanilla);
    }
}
