use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

use crate::{tables, RandomizerError, Result};

pub type SpeciesId = u16;
pub type MoveId = u16;
pub type TypeId = u8;
pub type AbilityId = u8;

pub const NUM_TYPES: TypeId = 18;
pub const MYSTERY_TYPE: TypeId = 9;

/// Offset between in-game flag/item ids and the ids the host server uses.
pub const BASE_OFFSET: u32 = 6_420_000;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum GameVersion {
    #[default]
    #[serde(rename = "firered")]
    FireRed,
    #[serde(rename = "leafgreen")]
    LeafGreen,
    #[serde(rename = "firered_rev1")]
    FireRedRev1,
    #[serde(rename = "leafgreen_rev1")]
    LeafGreenRev1,
}

impl GameVersion {
    pub const ALL: [GameVersion; 4] = [
        GameVersion::FireRed,
        GameVersion::LeafGreen,
        GameVersion::FireRedRev1,
        GameVersion::LeafGreenRev1,
    ];

    /// Revision 1 ROMs share species placements with their base release.
    pub fn data_version(self) -> GameVersion {
        match self {
            GameVersion::FireRed | GameVersion::FireRedRev1 => GameVersion::FireRed,
            GameVersion::LeafGreen | GameVersion::LeafGreenRev1 => GameVersion::LeafGreen,
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            GameVersion::FireRed => "firered",
            GameVersion::LeafGreen => "leafgreen",
            GameVersion::FireRedRev1 => "firered_rev1",
            GameVersion::LeafGreenRev1 => "leafgreen_rev1",
        }
    }
}

impl fmt::Display for GameVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for GameVersion {
    type Err = RandomizerError;

    fn from_str(s: &str) -> Result<Self> {
        GameVersion::ALL
            .into_iter()
            .find(|v| v.key() == s)
            .ok_or_else(|| RandomizerError::Config(format!("unknown game version '{s}'")))
    }
}

pub type VersionMap<T> = BTreeMap<GameVersion, T>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseStats {
    pub hp: u8,
    pub attack: u8,
    pub defense: u8,
    pub speed: u8,
    pub special_attack: u8,
    pub special_defense: u8,
}

impl BaseStats {
    pub fn from_array(stats: [u8; 6]) -> Self {
        BaseStats {
            hp: stats[0],
            attack: stats[1],
            defense: stats[2],
            speed: stats[3],
            special_attack: stats[4],
            special_defense: stats[5],
        }
    }

    pub fn total(&self) -> u32 {
        [
            self.hp,
            self.attack,
            self.defense,
            self.speed,
            self.special_attack,
            self.special_defense,
        ]
        .iter()
        .map(|&s| u32::from(s))
        .sum()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EvolutionMethod {
    Level,
    LevelAtkLtDef,
    LevelAtkEqDef,
    LevelAtkGtDef,
    LevelSilcoon,
    LevelCascoon,
    LevelNinjask,
    LevelShedinja,
    Item,
    Friendship,
}

impl EvolutionMethod {
    pub fn parse(name: &str) -> Option<Self> {
        let method = match name {
            "LEVEL" => EvolutionMethod::Level,
            "LEVEL_ATK_LT_DEF" => EvolutionMethod::LevelAtkLtDef,
            "LEVEL_ATK_EQ_DEF" => EvolutionMethod::LevelAtkEqDef,
            "LEVEL_ATK_GT_DEF" => EvolutionMethod::LevelAtkGtDef,
            "LEVEL_SILCOON" => EvolutionMethod::LevelSilcoon,
            "LEVEL_CASCOON" => EvolutionMethod::LevelCascoon,
            "LEVEL_NINJASK" => EvolutionMethod::LevelNinjask,
            "LEVEL_SHEDINJA" => EvolutionMethod::LevelShedinja,
            "ITEM" => EvolutionMethod::Item,
            "FRIENDSHIP" => EvolutionMethod::Friendship,
            _ => return None,
        };
        Some(method)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Evolution {
    pub method: EvolutionMethod,
    pub param: u16,
    pub species_id: SpeciesId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LearnsetMove {
    pub level: u8,
    pub move_id: MoveId,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeciesData {
    pub id_name: String,
    pub name: String,
    pub species_id: SpeciesId,
    pub national_dex_number: u16,
    pub base_stats: BaseStats,
    pub types: (TypeId, TypeId),
    pub abilities: (AbilityId, AbilityId),
    pub evolutions: Vec<Evolution>,
    pub pre_evolution: Option<SpeciesId>,
    pub catch_rate: u8,
    pub friendship: u8,
    pub learnset: Vec<LearnsetMove>,
    pub tm_hm_compatibility: u64,
    pub learnset_address: VersionMap<u32>,
    pub address: VersionMap<u32>,
}

impl SpeciesData {
    pub fn shares_type_with(&self, types: (TypeId, TypeId)) -> bool {
        let (a, b) = self.types;
        a == types.0 || a == types.1 || b == types.0 || b == types.1
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncounterSlot {
    pub species_id: SpeciesId,
    pub min_level: u8,
    pub max_level: u8,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EncounterTable {
    pub slots: VersionMap<Vec<EncounterSlot>>,
    #[serde(default)]
    pub address: VersionMap<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncounterKind {
    Land,
    Water,
    Fishing,
}

impl EncounterKind {
    pub const ALL: [EncounterKind; 3] = [EncounterKind::Land, EncounterKind::Water, EncounterKind::Fishing];
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MapData {
    pub name: String,
    #[serde(default)]
    pub header_address: VersionMap<u32>,
    #[serde(default)]
    pub land_encounters: Option<EncounterTable>,
    #[serde(default)]
    pub water_encounters: Option<EncounterTable>,
    #[serde(default)]
    pub fishing_encounters: Option<EncounterTable>,
}

impl MapData {
    pub fn table(&self, kind: EncounterKind) -> Option<&EncounterTable> {
        match kind {
            EncounterKind::Land => self.land_encounters.as_ref(),
            EncounterKind::Water => self.water_encounters.as_ref(),
            EncounterKind::Fishing => self.fishing_encounters.as_ref(),
        }
    }

    pub fn table_mut(&mut self, kind: EncounterKind) -> Option<&mut EncounterTable> {
        match kind {
            EncounterKind::Land => self.land_encounters.as_mut(),
            EncounterKind::Water => self.water_encounters.as_mut(),
            EncounterKind::Fishing => self.fishing_encounters.as_mut(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainerPokemon {
    pub species_id: SpeciesId,
    pub level: u8,
    pub moves: [MoveId; 4],
    #[serde(default)]
    pub locked: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainerData {
    pub trainer_id: u16,
    pub name: String,
    pub party: Vec<TrainerPokemon>,
    #[serde(default)]
    pub party_address: VersionMap<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StarterData {
    pub species_id: SpeciesId,
    #[serde(default)]
    pub player_address: VersionMap<u32>,
    #[serde(default)]
    pub rival_address: VersionMap<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaticPokemonData {
    pub species_id: VersionMap<SpeciesId>,
    /// `None` when the level is fixed by a game script.
    #[serde(default)]
    pub level: Option<u8>,
    #[serde(default)]
    pub address: VersionMap<u32>,
}

/// Text that is either shared by both releases or given as `[firered, leafgreen]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum VersionedText {
    Single(String),
    PerVersion([String; 2]),
}

impl VersionedText {
    pub fn for_version(&self, version: GameVersion) -> &str {
        match self {
            VersionedText::Single(text) => text,
            VersionedText::PerVersion(texts) => match version.data_version() {
                GameVersion::LeafGreen => &texts[1],
                _ => &texts[0],
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventData {
    pub id: String,
    pub name: VersionedText,
    pub item: VersionedText,
    pub parent_region_id: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemClassification {
    Progression,
    Useful,
    Filler,
    Trap,
}

impl ItemClassification {
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "PROGRESSION" => Some(ItemClassification::Progression),
            "USEFUL" => Some(ItemClassification::Useful),
            "FILLER" => Some(ItemClassification::Filler),
            "TRAP" => Some(ItemClassification::Trap),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemData {
    pub name: String,
    pub item_id: u16,
    pub classification: ItemClassification,
    pub tags: BTreeSet<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationData {
    pub id: String,
    pub name: String,
    pub parent_region_id: String,
    pub default_item: u16,
    pub address: VersionMap<u32>,
    pub flag: u16,
    pub tags: BTreeSet<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionData {
    pub id: String,
    pub name: String,
    pub parent_map: Option<String>,
    pub encounter_region: String,
    pub has_land: bool,
    pub has_water: bool,
    pub has_fishing: bool,
    pub exits: Vec<String>,
    pub warps: Vec<String>,
    pub locations: Vec<String>,
    pub events: Vec<String>,
}

/// A warp encoded as `SOURCE_MAP:0,1/DEST_MAP:2!`, where a trailing `!` marks it one-way.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Warp {
    pub encoded: String,
    pub is_one_way: bool,
    pub source_map: String,
    pub source_ids: Vec<u16>,
    pub dest_map: String,
    pub dest_ids: Vec<u16>,
    pub name: Option<String>,
    pub parent_region_id: Option<String>,
}

impl Warp {
    pub fn decode(encoded: &str) -> Result<Self> {
        let bad = || RandomizerError::Config(format!("malformed warp '{encoded}'"));
        let (body, is_one_way) = match encoded.strip_suffix('!') {
            Some(body) => (body, true),
            None => (encoded, false),
        };
        let (source, dest) = body.split_once('/').ok_or_else(bad)?;
        let (source_map, source_ids) = source.split_once(':').ok_or_else(bad)?;
        let (dest_map, dest_ids) = dest.split_once(':').ok_or_else(bad)?;
        let parse_ids = |ids: &str| -> Result<Vec<u16>> {
            ids.split(',')
                .map(|id| id.trim().parse::<u16>().map_err(|_| bad()))
                .collect()
        };

        Ok(Warp {
            encoded: encoded.to_string(),
            is_one_way,
            source_map: source_map.to_string(),
            source_ids: parse_ids(source_ids)?,
            dest_map: dest_map.to_string(),
            dest_ids: parse_ids(dest_ids)?,
            name: None,
            parent_region_id: None,
        })
    }

    pub fn connects_to(&self, other: &Warp) -> bool {
        self.dest_map == other.source_map
            && self.dest_ids.iter().all(|id| other.source_ids.contains(id))
    }
}

/// The immutable baseline every generation run starts from.
#[derive(Debug, Clone, Default)]
pub struct DataSnapshot {
    pub constants: BTreeMap<String, i64>,
    pub ram_addresses: VersionMap<BTreeMap<String, u32>>,
    pub rom_addresses: VersionMap<BTreeMap<String, u32>>,
    /// Move taught by each TM/HM bit, TMs first.
    pub tmhm_moves: Vec<MoveId>,
    pub species: BTreeMap<SpeciesId, SpeciesData>,
    pub maps: BTreeMap<String, MapData>,
    pub trainers: BTreeMap<u16, TrainerData>,
    pub starters: BTreeMap<String, StarterData>,
    pub legendary_pokemon: BTreeMap<String, StaticPokemonData>,
    pub misc_pokemon: BTreeMap<String, StaticPokemonData>,
    pub events: BTreeMap<String, EventData>,
    pub locations: BTreeMap<String, LocationData>,
    pub items: BTreeMap<u16, ItemData>,
    pub regions: BTreeMap<String, RegionData>,
    pub warps: BTreeMap<String, Warp>,
    pub warp_map: BTreeMap<String, Option<String>>,
}

impl DataSnapshot {
    pub fn constant(&self, name: &str) -> Result<i64> {
        self.constants
            .get(name)
            .copied()
            .ok_or_else(|| RandomizerError::Config(format!("missing constant {name}")))
    }

    pub fn ram_address(&self, version: GameVersion, name: &str) -> Result<u32> {
        lookup_address(&self.ram_addresses, version, name, "RAM")
    }

    pub fn rom_address(&self, version: GameVersion, name: &str) -> Result<u32> {
        lookup_address(&self.rom_addresses, version, name, "ROM")
    }

    /// Matches either the symbolic name (`SPECIES_MEW`) or the display name, ignoring case.
    pub fn species_by_name(&self, name: &str) -> Option<&SpeciesData> {
        self.species
            .values()
            .find(|s| s.id_name.eq_ignore_ascii_case(name) || s.name.eq_ignore_ascii_case(name))
    }

    pub fn legendary_species(&self) -> BTreeSet<SpeciesId> {
        self.species
            .values()
            .filter(|s| tables::LEGENDARY_SPECIES.contains(&s.id_name.as_str()))
            .map(|s| s.species_id)
            .collect()
    }
}

fn lookup_address(
    table: &VersionMap<BTreeMap<String, u32>>,
    version: GameVersion,
    name: &str,
    space: &str,
) -> Result<u32> {
    table
        .get(&version)
        .and_then(|addresses| addresses.get(name))
        .copied()
        .ok_or_else(|| {
            RandomizerError::Config(format!("no {space} address for {name} in {version}"))
        })
}
