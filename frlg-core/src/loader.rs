use flate2::read::GzDecoder;
use serde::Deserialize;
use std::collections::{BTreeMap, BTreeSet};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use walkdir::WalkDir;

use crate::data::{
    BaseStats, DataSnapshot, EncounterKind, EventData, Evolution, EvolutionMethod, ItemClassification,
    ItemData, LearnsetMove, LocationData, MapData, MoveId, RegionData, SpeciesData, SpeciesId,
    StarterData, StaticPokemonData, TrainerData, VersionMap, VersionedText, Warp, NUM_TYPES,
};
use crate::{RandomizerError, Result};

#[derive(Deserialize)]
struct RawSnapshot {
    constants: BTreeMap<String, i64>,
    #[serde(default)]
    ram_addresses: VersionMap<BTreeMap<String, u32>>,
    #[serde(default)]
    rom_addresses: VersionMap<BTreeMap<String, u32>>,
    #[serde(default)]
    tmhm_moves: Vec<MoveId>,
    species: Vec<RawSpecies>,
    #[serde(default)]
    maps: BTreeMap<String, MapData>,
    #[serde(default)]
    trainers: Vec<TrainerData>,
    #[serde(default)]
    starters: BTreeMap<String, StarterData>,
    #[serde(default)]
    legendary_pokemon: BTreeMap<String, StaticPokemonData>,
    #[serde(default)]
    misc_pokemon: BTreeMap<String, StaticPokemonData>,
    #[serde(default)]
    locations: BTreeMap<String, RawLocation>,
    #[serde(default)]
    events: BTreeMap<String, RawEvent>,
    #[serde(default)]
    items: BTreeMap<String, RawItem>,
    #[serde(default)]
    regions: BTreeMap<String, RawRegion>,
    #[serde(default)]
    warp_names: BTreeMap<String, String>,
    #[serde(default)]
    warp_map: BTreeMap<String, Option<String>>,
}

#[derive(Deserialize)]
struct RawSpecies {
    id_name: String,
    name: String,
    species_id: SpeciesId,
    national_dex_number: u16,
    base_stats: [u8; 6],
    types: [u8; 2],
    abilities: [u8; 2],
    #[serde(default)]
    evolutions: Vec<RawEvolution>,
    catch_rate: u8,
    friendship: u8,
    learnset: Vec<LearnsetMove>,
    /// Hex string, `0x` prefix optional.
    tmhm_learnset: String,
    #[serde(default)]
    learnset_address: VersionMap<u32>,
    #[serde(default)]
    address: VersionMap<u32>,
}

#[derive(Deserialize)]
struct RawEvolution {
    method: String,
    param: u16,
    species: SpeciesId,
}

#[derive(Deserialize)]
struct RawLocation {
    name: String,
    default_item: u16,
    flag: u16,
    #[serde(default)]
    address: VersionMap<u32>,
    #[serde(default)]
    tags: BTreeSet<String>,
}

#[derive(Deserialize)]
struct RawEvent {
    name: VersionedText,
    item: VersionedText,
}

#[derive(Deserialize)]
struct RawItem {
    name: String,
    classification: String,
    #[serde(default)]
    tags: BTreeSet<String>,
}

#[derive(Deserialize)]
struct RawRegion {
    name: String,
    #[serde(default)]
    parent_map: Option<String>,
    #[serde(default)]
    encounter_region: String,
    #[serde(default)]
    has_land: bool,
    #[serde(default)]
    has_water: bool,
    #[serde(default)]
    has_fishing: bool,
    #[serde(default)]
    exits: Vec<String>,
    #[serde(default)]
    warps: Vec<String>,
    #[serde(default)]
    locations: Vec<String>,
    #[serde(default)]
    events: Vec<String>,
}

fn config(msg: String) -> RandomizerError {
    RandomizerError::Config(msg)
}

fn open_json(path: &Path) -> Result<Box<dyn Read>> {
    let file = BufReader::new(File::open(path)?);
    let gzipped = path.extension().map_or(false, |ext| ext == "gz");
    Ok(if gzipped {
        Box::new(GzDecoder::new(file))
    } else {
        Box::new(file)
    })
}

fn read_region_files(dir: &Path) -> Result<Vec<BTreeMap<String, RawRegion>>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = entry?;
        let is_json = entry.path().extension().map_or(false, |ext| ext == "json");
        if !entry.file_type().is_file() || !is_json {
            continue;
        }
        let regions: BTreeMap<String, RawRegion> = serde_json::from_reader(open_json(entry.path())?)
            .map_err(|err| config(format!("{}: {err}", entry.path().display())))?;
        log::debug!("Loaded {} regions from {}", regions.len(), entry.path().display());
        files.push(regions);
    }
    Ok(files)
}

impl DataSnapshot {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let raw: RawSnapshot = serde_json::from_str(json)?;
        build(raw, Vec::new())
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let raw: RawSnapshot = serde_json::from_reader(reader)?;
        build(raw, Vec::new())
    }

    /// Loads a snapshot file; `.gz` files are decompressed on the fly.
    pub fn load(path: &Path) -> Result<Self> {
        let raw: RawSnapshot = serde_json::from_reader(open_json(path)?)?;
        let snapshot = build(raw, Vec::new())?;
        log::info!(
            "Loaded snapshot {} ({} species, {} maps)",
            path.display(),
            snapshot.species.len(),
            snapshot.maps.len()
        );
        Ok(snapshot)
    }

    /// Loads a snapshot and merges every region file found under `regions_dir`.
    pub fn load_with_regions(path: &Path, regions_dir: &Path) -> Result<Self> {
        let raw: RawSnapshot = serde_json::from_reader(open_json(path)?)?;
        let region_files = read_region_files(regions_dir)?;
        build(raw, region_files)
    }
}

fn build(raw: RawSnapshot, region_files: Vec<BTreeMap<String, RawRegion>>) -> Result<DataSnapshot> {
    let species = build_species(raw.species)?;

    for (map_name, map) in &raw.maps {
        for kind in EncounterKind::ALL {
            let Some(table) = map.table(kind) else { continue };
            for slot in table.slots.values().flatten() {
                if !species.contains_key(&slot.species_id) {
                    return Err(config(format!(
                        "{map_name} encounter references unknown species {}",
                        slot.species_id
                    )));
                }
            }
        }
    }

    let mut raw_regions: BTreeMap<String, RawRegion> = raw.regions;
    for file in region_files {
        for (id, region) in file {
            if raw_regions.contains_key(&id) {
                return Err(config(format!("Region [{id}] was defined multiple times")));
            }
            raw_regions.insert(id, region);
        }
    }

    let mut raw_locations = raw.locations;
    let mut raw_events = raw.events;
    let mut regions = BTreeMap::new();
    let mut locations = BTreeMap::new();
    let mut events = BTreeMap::new();
    let mut warps = BTreeMap::new();

    for (region_id, region) in raw_regions {
        if let Some(parent) = &region.parent_map {
            if !raw.maps.contains_key(parent) {
                return Err(config(format!("Region [{region_id}] has unknown parent map {parent}")));
            }
        }

        for location_id in &region.locations {
            if locations.contains_key(location_id) {
                return Err(config(format!("Location [{location_id}] was claimed by multiple regions")));
            }
            let location = raw_locations.remove(location_id).ok_or_else(|| {
                config(format!("Region [{region_id}] references unknown location {location_id}"))
            })?;
            locations.insert(
                location_id.clone(),
                LocationData {
                    id: location_id.clone(),
                    name: location.name,
                    parent_region_id: region_id.clone(),
                    default_item: location.default_item,
                    address: location.address,
                    flag: location.flag,
                    tags: location.tags,
                },
            );
        }

        for event_id in &region.events {
            if events.contains_key(event_id) {
                return Err(config(format!("Event [{event_id}] was claimed by multiple regions")));
            }
            let event = raw_events.remove(event_id).ok_or_else(|| {
                config(format!("Region [{region_id}] references unknown event {event_id}"))
            })?;
            events.insert(
                event_id.clone(),
                EventData {
                    id: event_id.clone(),
                    name: event.name,
                    item: event.item,
                    parent_region_id: region_id.clone(),
                },
            );
        }

        for encoded in &region.warps {
            if warps.contains_key(encoded) {
                return Err(config(format!("Warp [{encoded}] was claimed by multiple regions")));
            }
            let mut warp = Warp::decode(encoded)?;
            warp.name = raw.warp_names.get(encoded).cloned();
            warp.parent_region_id = Some(region_id.clone());
            warps.insert(encoded.clone(), warp);
        }

        let mut region_events = region.events;
        region_events.sort();
        regions.insert(
            region_id.clone(),
            RegionData {
                id: region_id,
                name: region.name,
                parent_map: region.parent_map,
                encounter_region: region.encounter_region,
                has_land: region.has_land,
                has_water: region.has_water,
                has_fishing: region.has_fishing,
                exits: region.exits,
                warps: region.warps,
                locations: region.locations,
                events: region_events,
            },
        );
    }

    let mut items = BTreeMap::new();
    for (constant_name, item) in raw.items {
        let classification = ItemClassification::parse(&item.classification).ok_or_else(|| {
            config(format!(
                "Could not parse item classification {} for {constant_name}",
                item.classification
            ))
        })?;
        let item_id = raw
            .constants
            .get(&constant_name)
            .and_then(|&code| u16::try_from(code).ok())
            .ok_or_else(|| config(format!("Item {constant_name} has no valid constant")))?;
        items.insert(
            item_id,
            ItemData {
                name: item.name,
                item_id,
                classification,
                tags: item.tags,
            },
        );
    }

    let mut trainers: BTreeMap<u16, TrainerData> = BTreeMap::new();
    for trainer in raw.trainers {
        if let Some(existing) = trainers.get(&trainer.trainer_id) {
            return Err(config(format!(
                "{} and {} share trainer id {}",
                existing.name, trainer.name, trainer.trainer_id
            )));
        }
        trainers.insert(trainer.trainer_id, trainer);
    }

    Ok(DataSnapshot {
        constants: raw.constants,
        ram_addresses: raw.ram_addresses,
        rom_addresses: raw.rom_addresses,
        tmhm_moves: raw.tmhm_moves,
        species,
        maps: raw.maps,
        trainers,
        starters: raw.starters,
        legendary_pokemon: raw.legendary_pokemon,
        misc_pokemon: raw.misc_pokemon,
        events,
        locations,
        items,
        regions,
        warps,
        warp_map: raw.warp_map,
    })
}

fn build_species(raw: Vec<RawSpecies>) -> Result<BTreeMap<SpeciesId, SpeciesData>> {
    let mut species: BTreeMap<SpeciesId, SpeciesData> = BTreeMap::new();
    for s in raw {
        if let Some(existing) = species.get(&s.species_id) {
            return Err(config(format!(
                "{} and {} share species id {}",
                existing.id_name, s.id_name, s.species_id
            )));
        }
        if s.types.iter().any(|&t| t >= NUM_TYPES) {
            return Err(config(format!("{} has an invalid type {:?}", s.id_name, s.types)));
        }
        let hex = s.tmhm_learnset.trim_start_matches("0x");
        let tm_hm_compatibility = u64::from_str_radix(hex, 16)
            .map_err(|_| config(format!("{} has a malformed TM/HM learnset", s.id_name)))?;
        let evolutions = s
            .evolutions
            .iter()
            .map(|evo| {
                let method = EvolutionMethod::parse(&evo.method).ok_or_else(|| {
                    config(format!("{} has unknown evolution method {}", s.id_name, evo.method))
                })?;
                Ok(Evolution {
                    method,
                    param: evo.param,
                    species_id: evo.species,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        species.insert(
            s.species_id,
            SpeciesData {
                id_name: s.id_name,
                name: s.name,
                species_id: s.species_id,
                national_dex_number: s.national_dex_number,
                base_stats: BaseStats::from_array(s.base_stats),
                types: (s.types[0], s.types[1]),
                abilities: (s.abilities[0], s.abilities[1]),
                evolutions,
                pre_evolution: None,
                catch_rate: s.catch_rate,
                friendship: s.friendship,
                learnset: s.learnset,
                tm_hm_compatibility,
                learnset_address: s.learnset_address,
                address: s.address,
            },
        );
    }

    link_pre_evolutions(&mut species)?;
    Ok(species)
}

/// Fills in `pre_evolution`, rejecting anything that is not a forest.
pub(crate) fn link_pre_evolutions(species: &mut BTreeMap<SpeciesId, SpeciesData>) -> Result<()> {
    let links: Vec<(SpeciesId, SpeciesId)> = species
        .values()
        .flat_map(|s| s.evolutions.iter().map(move |e| (s.species_id, e.species_id)))
        .collect();

    for (from, to) in links {
        let target = species
            .get_mut(&to)
            .ok_or_else(|| config(format!("species {from} evolves into unknown species {to}")))?;
        match target.pre_evolution {
            Some(existing) if existing != from => {
                return Err(config(format!(
                    "{} has multiple pre-evolutions ({existing} and {from})",
                    target.id_name
                )));
            }
            _ => target.pre_evolution = Some(from),
        }
    }
    Ok(())
}
