//! A small hand-built Kanto snapshot shared by unit and integration tests.

use std::collections::{BTreeMap, BTreeSet};

use crate::data::{
    BaseStats, DataSnapshot, EncounterSlot, EncounterTable, EventData, Evolution, EvolutionMethod,
    GameVersion, ItemClassification, ItemData, LearnsetMove, LocationData, MapData, MoveId,
    RegionData, SpeciesData, SpeciesId, StarterData, StaticPokemonData, TrainerData,
    TrainerPokemon, VersionMap, VersionedText, Warp,
};
use crate::tables::{rival_starter_slots, STARTER_ORDER};

struct SpeciesRow {
    id: SpeciesId,
    id_name: &'static str,
    name: &'static str,
    stats: [u8; 6],
    types: (u8, u8),
    abilities: (u8, u8),
    evolves_to: &'static [(EvolutionMethod, u16, SpeciesId)],
    start: [MoveId; 4],
    levelled: &'static [(u8, MoveId)],
}

use crate::data::EvolutionMethod::{Item, Level};

#[rustfmt::skip]
const SPECIES: &[SpeciesRow] = &[
    SpeciesRow { id: 1, id_name: "SPECIES_BULBASAUR", name: "Bulbasaur", stats: [45, 49, 49, 45, 65, 65], types: (12, 3), abilities: (65, 0), evolves_to: &[(Level, 16, 2)], start: [0, 0, 33, 45], levelled: &[(7, 73), (10, 22), (15, 77), (20, 75)] },
    SpeciesRow { id: 2, id_name: "SPECIES_IVYSAUR", name: "Ivysaur", stats: [60, 62, 63, 60, 80, 80], types: (12, 3), abilities: (65, 0), evolves_to: &[(Level, 32, 3)], start: [0, 33, 45, 73], levelled: &[(10, 22), (15, 77), (22, 75), (38, 76)] },
    SpeciesRow { id: 3, id_name: "SPECIES_VENUSAUR", name: "Venusaur", stats: [80, 82, 83, 80, 100, 100], types: (12, 3), abilities: (65, 0), evolves_to: &[], start: [33, 45, 73, 22], levelled: &[(15, 77), (24, 75), (41, 230), (65, 76)] },
    SpeciesRow { id: 4, id_name: "SPECIES_CHARMANDER", name: "Charmander", stats: [39, 52, 43, 65, 60, 50], types: (10, 10), abilities: (66, 0), evolves_to: &[(Level, 16, 5)], start: [0, 0, 10, 45], levelled: &[(7, 52), (13, 108), (19, 99), (31, 53)] },
    SpeciesRow { id: 5, id_name: "SPECIES_CHARMELEON", name: "Charmeleon", stats: [58, 64, 58, 80, 80, 65], types: (10, 10), abilities: (66, 0), evolves_to: &[(Level, 36, 6)], start: [0, 10, 45, 52], levelled: &[(13, 108), (20, 99), (34, 53), (48, 83)] },
    SpeciesRow { id: 6, id_name: "SPECIES_CHARIZARD", name: "Charizard", stats: [78, 84, 78, 100, 109, 85], types: (10, 2), abilities: (66, 0), evolves_to: &[], start: [10, 45, 52, 108], levelled: &[(20, 99), (36, 17), (44, 53), (64, 83)] },
    SpeciesRow { id: 7, id_name: "SPECIES_SQUIRTLE", name: "Squirtle", stats: [44, 48, 65, 43, 50, 64], types: (11, 11), abilities: (67, 0), evolves_to: &[(Level, 16, 8)], start: [0, 0, 33, 39], levelled: &[(7, 145), (10, 110), (13, 55), (18, 44)] },
    SpeciesRow { id: 8, id_name: "SPECIES_WARTORTLE", name: "Wartortle", stats: [59, 63, 80, 58, 65, 80], types: (11, 11), abilities: (67, 0), evolves_to: &[(Level, 36, 9)], start: [0, 33, 39, 145], levelled: &[(10, 110), (13, 55), (19, 44), (37, 229)] },
    SpeciesRow { id: 9, id_name: "SPECIES_BLASTOISE", name: "Blastoise", stats: [79, 83, 100, 78, 85, 105], types: (11, 11), abilities: (67, 0), evolves_to: &[], start: [33, 39, 145, 110], levelled: &[(13, 55), (19, 44), (42, 229), (68, 56)] },
    SpeciesRow { id: 16, id_name: "SPECIES_PIDGEY", name: "Pidgey", stats: [40, 45, 40, 56, 35, 35], types: (0, 2), abilities: (51, 0), evolves_to: &[(Level, 18, 17)], start: [0, 0, 0, 33], levelled: &[(5, 28), (9, 16), (13, 98), (19, 18)] },
    SpeciesRow { id: 17, id_name: "SPECIES_PIDGEOTTO", name: "Pidgeotto", stats: [63, 60, 55, 71, 50, 50], types: (0, 2), abilities: (51, 0), evolves_to: &[(Level, 36, 18)], start: [0, 0, 33, 28], levelled: &[(9, 16), (13, 98), (20, 18), (27, 17)] },
    SpeciesRow { id: 18, id_name: "SPECIES_PIDGEOT", name: "Pidgeot", stats: [83, 80, 75, 91, 70, 70], types: (0, 2), abilities: (51, 0), evolves_to: &[], start: [33, 28, 16, 98], levelled: &[(20, 18), (29, 17), (40, 97), (54, 119)] },
    SpeciesRow { id: 19, id_name: "SPECIES_RATTATA", name: "Rattata", stats: [30, 56, 35, 72, 25, 35], types: (0, 0), abilities: (50, 62), evolves_to: &[(Level, 20, 20)], start: [0, 0, 33, 39], levelled: &[(7, 98), (13, 158), (20, 116), (27, 162)] },
    SpeciesRow { id: 20, id_name: "SPECIES_RATICATE", name: "Raticate", stats: [55, 81, 60, 97, 50, 70], types: (0, 0), abilities: (50, 62), evolves_to: &[], start: [0, 33, 39, 98], levelled: &[(13, 158), (20, 184), (30, 162), (40, 38)] },
    SpeciesRow { id: 25, id_name: "SPECIES_PIKACHU", name: "Pikachu", stats: [35, 55, 30, 90, 50, 40], types: (13, 13), abilities: (9, 0), evolves_to: &[(Item, 96, 26)], start: [0, 0, 84, 45], levelled: &[(6, 39), (8, 86), (11, 98), (20, 21)] },
    SpeciesRow { id: 26, id_name: "SPECIES_RAICHU", name: "Raichu", stats: [60, 90, 55, 100, 90, 80], types: (13, 13), abilities: (9, 0), evolves_to: &[], start: [84, 39, 86, 98], levelled: &[(20, 85)] },
    SpeciesRow { id: 41, id_name: "SPECIES_ZUBAT", name: "Zubat", stats: [40, 45, 35, 55, 30, 40], types: (3, 2), abilities: (39, 0), evolves_to: &[(Level, 22, 42)], start: [0, 0, 0, 141], levelled: &[(6, 48), (11, 44), (16, 109), (21, 17)] },
    SpeciesRow { id: 42, id_name: "SPECIES_GOLBAT", name: "Golbat", stats: [75, 80, 70, 90, 65, 75], types: (3, 2), abilities: (39, 0), evolves_to: &[], start: [0, 141, 48, 44], levelled: &[(16, 109), (21, 17), (28, 212), (35, 305)] },
    SpeciesRow { id: 72, id_name: "SPECIES_TENTACOOL", name: "Tentacool", stats: [40, 40, 35, 70, 50, 100], types: (11, 3), abilities: (29, 64), evolves_to: &[], start: [0, 0, 0, 40], levelled: &[(6, 48), (12, 132), (19, 51), (25, 35)] },
    SpeciesRow { id: 74, id_name: "SPECIES_GEODUDE", name: "Geodude", stats: [40, 80, 100, 20, 30, 30], types: (5, 4), abilities: (69, 5), evolves_to: &[], start: [0, 0, 33, 111], levelled: &[(6, 300), (11, 88), (16, 222), (21, 120)] },
    SpeciesRow { id: 92, id_name: "SPECIES_GASTLY", name: "Gastly", stats: [30, 35, 30, 80, 100, 35], types: (7, 3), abilities: (26, 0), evolves_to: &[(Level, 25, 93)], start: [0, 0, 122, 95], levelled: &[(8, 180), (13, 109), (16, 101), (21, 174)] },
    SpeciesRow { id: 93, id_name: "SPECIES_HAUNTER", name: "Haunter", stats: [45, 50, 45, 95, 115, 55], types: (7, 3), abilities: (26, 0), evolves_to: &[], start: [0, 122, 95, 180], levelled: &[(13, 109), (16, 101), (25, 325), (31, 171)] },
    SpeciesRow { id: 95, id_name: "SPECIES_ONIX", name: "Onix", stats: [35, 45, 160, 70, 30, 45], types: (5, 4), abilities: (69, 5), evolves_to: &[], start: [0, 0, 33, 103], levelled: &[(9, 20), (13, 88), (21, 99), (25, 317)] },
    SpeciesRow { id: 129, id_name: "SPECIES_MAGIKARP", name: "Magikarp", stats: [20, 10, 55, 80, 15, 20], types: (11, 11), abilities: (33, 0), evolves_to: &[(Level, 20, 130)], start: [0, 0, 0, 150], levelled: &[(15, 33), (30, 175)] },
    SpeciesRow { id: 130, id_name: "SPECIES_GYARADOS", name: "Gyarados", stats: [95, 125, 79, 81, 60, 100], types: (11, 2), abilities: (22, 0), evolves_to: &[], start: [0, 0, 0, 44], levelled: &[(20, 82), (25, 43), (30, 239), (35, 56)] },
    SpeciesRow { id: 133, id_name: "SPECIES_EEVEE", name: "Eevee", stats: [55, 55, 50, 55, 45, 65], types: (0, 0), abilities: (50, 0), evolves_to: &[(Item, 97, 134), (Item, 96, 135), (Item, 95, 136)], start: [0, 0, 33, 270], levelled: &[(8, 28), (16, 39), (23, 98), (30, 44)] },
    SpeciesRow { id: 134, id_name: "SPECIES_VAPOREON", name: "Vaporeon", stats: [130, 65, 60, 65, 110, 95], types: (11, 11), abilities: (11, 0), evolves_to: &[], start: [0, 33, 270, 28], levelled: &[(16, 55), (23, 98), (30, 44), (36, 62)] },
    SpeciesRow { id: 135, id_name: "SPECIES_JOLTEON", name: "Jolteon", stats: [65, 65, 60, 130, 110, 95], types: (13, 13), abilities: (10, 0), evolves_to: &[], start: [0, 33, 270, 28], levelled: &[(16, 84), (23, 98), (30, 24), (36, 86)] },
    SpeciesRow { id: 136, id_name: "SPECIES_FLAREON", name: "Flareon", stats: [65, 130, 60, 65, 95, 110], types: (10, 10), abilities: (18, 0), evolves_to: &[], start: [0, 33, 270, 28], levelled: &[(16, 52), (23, 98), (30, 44), (36, 83)] },
    SpeciesRow { id: 144, id_name: "SPECIES_ARTICUNO", name: "Articuno", stats: [90, 85, 100, 85, 95, 125], types: (15, 2), abilities: (46, 0), evolves_to: &[], start: [0, 0, 64, 181], levelled: &[(13, 54), (25, 97), (37, 58), (49, 219)] },
    SpeciesRow { id: 145, id_name: "SPECIES_ZAPDOS", name: "Zapdos", stats: [90, 90, 85, 100, 125, 90], types: (13, 2), abilities: (46, 0), evolves_to: &[], start: [0, 0, 64, 84], levelled: &[(13, 86), (25, 129), (37, 65), (49, 87)] },
    SpeciesRow { id: 146, id_name: "SPECIES_MOLTRES", name: "Moltres", stats: [90, 100, 90, 90, 125, 85], types: (10, 2), abilities: (46, 0), evolves_to: &[], start: [0, 0, 64, 52], levelled: &[(13, 83), (25, 97), (37, 53), (49, 219)] },
    SpeciesRow { id: 150, id_name: "SPECIES_MEWTWO", name: "Mewtwo", stats: [106, 110, 90, 130, 154, 90], types: (14, 14), abilities: (46, 0), evolves_to: &[], start: [0, 0, 93, 50], levelled: &[(11, 129), (22, 105), (33, 94), (44, 133)] },
    SpeciesRow { id: 151, id_name: "SPECIES_MEW", name: "Mew", stats: [100, 100, 100, 100, 100, 100], types: (14, 14), abilities: (28, 0), evolves_to: &[], start: [0, 0, 0, 1], levelled: &[(10, 144), (20, 5), (30, 118), (40, 94)] },
    SpeciesRow { id: 172, id_name: "SPECIES_PICHU", name: "Pichu", stats: [20, 40, 15, 60, 35, 35], types: (13, 13), abilities: (9, 0), evolves_to: &[(EvolutionMethod::Friendship, 0, 25)], start: [0, 0, 84, 204], levelled: &[(6, 39), (8, 86), (11, 227), (16, 186)] },
];

/// TM01 through TM50 followed by HM01 through HM08.
#[rustfmt::skip]
const TMHM_MOVES: [MoveId; 58] = [
    264, 337, 352, 347, 46, 92, 258, 339, 331, 237,
    241, 269, 58, 59, 63, 113, 182, 240, 202, 219,
    218, 76, 231, 85, 87, 89, 216, 91, 94, 247,
    280, 104, 115, 351, 53, 188, 201, 126, 317, 332,
    259, 263, 290, 156, 213, 168, 211, 285, 289, 315,
    15, 19, 57, 70, 148, 249, 127, 291,
];

#[rustfmt::skip]
const FLAGS: &[(&str, i64)] = &[
    ("FLAG_DEFEATED_BROCK", 0x4B0),
    ("FLAG_DEFEATED_MISTY", 0x4B1),
    ("FLAG_DEFEATED_LT_SURGE", 0x4B2),
    ("FLAG_DEFEATED_ERIKA", 0x4B3),
    ("FLAG_DEFEATED_KOGA", 0x4B4),
    ("FLAG_DEFEATED_SABRINA", 0x4B5),
    ("FLAG_DEFEATED_BLAINE", 0x4B6),
    ("FLAG_DEFEATED_LEADER_GIOVANNI", 0x4B7),
    ("FLAG_DELIVERED_OAKS_PARCEL", 0x2A1),
    ("FLAG_DEFEATED_ROUTE22_RIVAL", 0x2A2),
    ("FLAG_GOT_SS_TICKET", 0x2A3),
    ("FLAG_RESCUED_MR_FUJI", 0x2A4),
    ("FLAG_HIDE_SAFFRON_ROCKETS", 0x2A5),
    ("FLAG_DEFEATED_CHAMP", 0x4BC),
    ("FLAG_RESCUED_LOSTELLE", 0x2A6),
    ("FLAG_SEVII_DETOUR_FINISHED", 0x2A7),
    ("FLAG_LEARNED_YES_NAH_CHANSEY", 0x2A8),
    ("FLAG_SYS_CAN_LINK_WITH_RS", 0x2A9),
    ("FLAG_HIDE_RUIN_VALLEY_SCIENTIST", 0x2AA),
    ("FLAG_PURCHASED_LEMONADE", 0x2AB),
];

const RIVAL_FILLER: [(SpeciesId, u8); 6] = [(16, 9), (19, 10), (41, 12), (74, 14), (25, 16), (129, 18)];

fn per_version<T: Clone>(value: T) -> VersionMap<T> {
    [GameVersion::FireRed, GameVersion::LeafGreen]
        .into_iter()
        .map(|v| (v, value.clone()))
        .collect()
}

fn species_table() -> BTreeMap<SpeciesId, SpeciesData> {
    let mut species: BTreeMap<SpeciesId, SpeciesData> = SPECIES
        .iter()
        .map(|row| {
            let mut learnset: Vec<LearnsetMove> =
                row.start.iter().map(|&move_id| LearnsetMove { level: 1, move_id }).collect();
            learnset.extend(row.levelled.iter().map(|&(level, move_id)| LearnsetMove { level, move_id }));
            let tm_hm = u64::from(row.id).wrapping_mul(0x9E37_79B9_7F4A_7C15) & ((1 << 58) - 1);
            let data = SpeciesData {
                id_name: row.id_name.to_string(),
                name: row.name.to_string(),
                species_id: row.id,
                national_dex_number: row.id,
                base_stats: BaseStats::from_array(row.stats),
                types: row.types,
                abilities: row.abilities,
                evolutions: row
                    .evolves_to
                    .iter()
                    .map(|&(method, param, species_id)| Evolution { method, param, species_id })
                    .collect(),
                pre_evolution: None,
                catch_rate: 45,
                friendship: 70,
                learnset,
                tm_hm_compatibility: tm_hm,
                learnset_address: per_version(0x0825_D7B4 + u32::from(row.id) * 4),
                address: per_version(0x0825_4784 + u32::from(row.id) * 28),
            };
            (row.id, data)
        })
        .collect();

    let links: Vec<(SpeciesId, SpeciesId)> = species
        .values()
        .flat_map(|s| s.evolutions.iter().map(move |e| (e.species_id, s.species_id)))
        .collect();
    for (child, parent) in links {
        if let Some(s) = species.get_mut(&child) {
            s.pre_evolution = Some(parent);
        }
    }
    species
}

fn encounters(species: &[SpeciesId], min_level: u8) -> Option<EncounterTable> {
    if species.is_empty() {
        return None;
    }
    let slots: Vec<EncounterSlot> = species
        .iter()
        .map(|&species_id| EncounterSlot { species_id, min_level, max_level: min_level + 3 })
        .collect();
    Some(EncounterTable { slots: per_version(slots), address: per_version(0x083C_9CB8) })
}

fn map(name: &str, land: &[SpeciesId], water: &[SpeciesId], fishing: &[SpeciesId]) -> (String, MapData) {
    let data = MapData {
        name: name.to_string(),
        header_address: BTreeMap::new(),
        land_encounters: encounters(land, 3),
        water_encounters: encounters(water, 20),
        fishing_encounters: encounters(fishing, 10),
    };
    (name.to_string(), data)
}

fn statics(entries: &[(&str, SpeciesId, Option<u8>)]) -> BTreeMap<String, StaticPokemonData> {
    entries
        .iter()
        .map(|&(name, species_id, level)| {
            let data = StaticPokemonData { species_id: per_version(species_id), level, address: BTreeMap::new() };
            (name.to_string(), data)
        })
        .collect()
}

fn trainers(constants: &mut BTreeMap<String, i64>) -> BTreeMap<u16, TrainerData> {
    let mut trainers = BTreeMap::new();
    let mut next_id: u16 = 326;
    for (starter, first_stage) in STARTER_ORDER.into_iter().zip([1, 7, 4]) {
        let Some(slots) = rival_starter_slots(starter) else { continue };
        for &(constant, index, stage) in slots {
            let mut party: Vec<TrainerPokemon> = RIVAL_FILLER
                .iter()
                .map(|&(species_id, level)| TrainerPokemon { species_id, level, moves: [0; 4], locked: false })
                .collect();
            party[index].species_id = first_stage + stage as SpeciesId;
            constants.insert(constant.to_string(), i64::from(next_id));
            trainers.insert(next_id, TrainerData {
                trainer_id: next_id,
                name: "Rival".to_string(),
                party,
                party_address: BTreeMap::new(),
            });
            next_id += 1;
        }
    }

    for (constant, id, name, party) in [
        ("TRAINER_YOUNGSTER_BEN", 102u16, "Ben", vec![(19, 11), (16, 11)]),
        ("TRAINER_LEADER_BROCK", 414, "Brock", vec![(74, 12), (95, 14)]),
        ("TRAINER_LEADER_MISTY", 415, "Misty", vec![(72, 18), (130, 21)]),
    ] {
        constants.insert(constant.to_string(), i64::from(id));
        trainers.insert(id, TrainerData {
            trainer_id: id,
            name: name.to_string(),
            party: party
                .into_iter()
                .map(|(species_id, level)| TrainerPokemon { species_id, level, moves: [33, 0, 0, 0], locked: false })
                .collect(),
            party_address: BTreeMap::new(),
        });
    }
    trainers
}

fn event(id: &str, name: &str, item: VersionedText, region: &str) -> (String, EventData) {
    let data = EventData {
        id: id.to_string(),
        name: VersionedText::Single(name.to_string()),
        item,
        parent_region_id: region.to_string(),
    };
    (id.to_string(), data)
}

fn location(id: &str, name: &str, region: &str, default_item: u16, flag: u16) -> (String, LocationData) {
    let data = LocationData {
        id: id.to_string(),
        name: name.to_string(),
        parent_region_id: region.to_string(),
        default_item,
        address: BTreeMap::new(),
        flag,
        tags: BTreeSet::from(["Overworld".to_string()]),
    };
    (id.to_string(), data)
}

fn region(id: &str, name: &str, parent_map: &str, locations: &[&str], events: &[&str], warps: &[&str]) -> (String, RegionData) {
    let data = RegionData {
        id: id.to_string(),
        name: name.to_string(),
        parent_map: Some(parent_map.to_string()),
        encounter_region: id.to_string(),
        has_land: true,
        has_water: false,
        has_fishing: false,
        exits: Vec::new(),
        warps: warps.iter().map(|w| w.to_string()).collect(),
        locations: locations.iter().map(|l| l.to_string()).collect(),
        events: events.iter().map(|e| e.to_string()).collect(),
    };
    (id.to_string(), data)
}

fn addresses(pairs: &[(&str, u32)]) -> VersionMap<BTreeMap<String, u32>> {
    let table: BTreeMap<String, u32> = pairs.iter().map(|&(name, addr)| (name.to_string(), addr)).collect();
    GameVersion::ALL.into_iter().map(|v| (v, table.clone())).collect()
}

/// Builds the shared test snapshot.
///
/// Both releases carry identical encounter and static data so tests can pick either one.
pub fn sample_snapshot() -> DataSnapshot {
    let mut constants: BTreeMap<String, i64> = [
        ("MOVES_COUNT", 355),
        ("ABILITIES_COUNT", 78),
        ("ABILITY_NONE", 0),
        ("ABILITY_LEVITATE", 26),
        ("ABILITY_CACOPHONY", 76),
        ("MOVE_NONE", 0),
        ("MOVE_TACKLE", 33),
        ("MOVE_THUNDER_WAVE", 86),
        ("ITEM_POKE_BALL", 4),
        ("ITEM_POTION", 13),
        ("ITEM_OAKS_PARCEL", 349),
        ("TRAINER_FLAGS_START", 0x500),
    ]
    .into_iter()
    .chain(FLAGS.iter().copied())
    .map(|(name, value)| (name.to_string(), value))
    .collect();
    let trainers = trainers(&mut constants);

    let maps: BTreeMap<String, MapData> = [
        map("MAP_ROUTE1", &[16, 19, 16, 19, 16, 19, 16, 19, 16, 19, 16, 19], &[], &[]),
        map("MAP_ROUTE22", &[19, 16, 19, 25, 19, 16], &[72, 72], &[129, 129]),
        map("MAP_MT_MOON_1F", &[41, 74, 41, 74, 41, 92], &[], &[]),
        map("MAP_MT_MOON_B1F", &[41, 74, 92, 41], &[], &[]),
        map(crate::tables::ROUTE_21_NORTH, &[16, 17, 72], &[72, 72, 129], &[129, 130, 72]),
        map(crate::tables::ROUTE_21_SOUTH, &[16, 17, 72], &[72, 72, 129], &[129, 130, 72]),
        map("MAP_PALLET_TOWN", &[], &[72, 72, 72], &[129, 129, 72]),
    ]
    .into_iter()
    .collect();

    let starters: BTreeMap<String, StarterData> = STARTER_ORDER
        .into_iter()
        .zip([1, 7, 4])
        .map(|(name, species_id)| {
            let data = StarterData { species_id, player_address: BTreeMap::new(), rival_address: BTreeMap::new() };
            (name.to_string(), data)
        })
        .collect();

    let single = |text: &str| VersionedText::Single(text.to_string());
    let events: BTreeMap<String, EventData> = [
        event("LEGENDARY_POKEMON_ARTICUNO", "Articuno", single("Static Articuno"), "REGION_SEAFOAM_ISLANDS_B4F"),
        event("LEGENDARY_POKEMON_ZAPDOS", "Zapdos", single("Static Zapdos"), "REGION_POWER_PLANT"),
        event("LEGENDARY_POKEMON_MOLTRES", "Moltres", single("Static Moltres"), "REGION_MT_EMBER_SUMMIT"),
        event(
            "GIFT_POKEMON_EEVEE",
            "Celadon Eevee",
            VersionedText::PerVersion(["Static Eevee".to_string(), "Missable Eevee".to_string()]),
            "REGION_CELADON_CONDOMINIUMS_ROOF_ROOM",
        ),
        event("TRADE_POKEMON_RAICHU", "Vermilion Trade", single("Trade Raichu"), "REGION_VERMILION_CITY"),
        event("EVENT_DEFEAT_CHAMP", "Champion", single("Defeat Champion"), "REGION_INDIGO_PLATEAU"),
    ]
    .into_iter()
    .collect();

    let locations: BTreeMap<String, LocationData> = [
        location("ITEM_ROUTE1_POTION", "Route 1 - Item", "REGION_ROUTE1", 13, 0x1A0),
        location("NPC_GIFT_OAKS_PARCEL", "Viridian Mart - Parcel", "REGION_ROUTE1", 349, 0x1A1),
        location("ITEM_MT_MOON_1F_POKE_BALL", "Mt. Moon 1F - Item", "REGION_MT_MOON_1F", 4, 0x1A2),
    ]
    .into_iter()
    .collect();

    let items: BTreeMap<u16, ItemData> = [
        (4, "Poke Ball", ItemClassification::Filler),
        (13, "Potion", ItemClassification::Filler),
        (349, "Oak's Parcel", ItemClassification::Progression),
    ]
    .into_iter()
    .map(|(item_id, name, classification)| {
        let data = ItemData { name: name.to_string(), item_id, classification, tags: BTreeSet::new() };
        (item_id, data)
    })
    .collect();

    let regions: BTreeMap<String, RegionData> = [
        region("REGION_ROUTE1", "Route 1", "MAP_ROUTE1", &["ITEM_ROUTE1_POTION", "NPC_GIFT_OAKS_PARCEL"], &[], &[]),
        region(
            "REGION_MT_MOON_1F",
            "Mt. Moon 1F",
            "MAP_MT_MOON_1F",
            &["ITEM_MT_MOON_1F_POKE_BALL"],
            &[],
            &["MAP_MT_MOON_1F:1/MAP_MT_MOON_B1F:0"],
        ),
        region("REGION_MT_MOON_B1F", "Mt. Moon B1F", "MAP_MT_MOON_B1F", &[], &[], &["MAP_MT_MOON_B1F:0/MAP_MT_MOON_1F:1"]),
    ]
    .into_iter()
    .collect();

    let mut warps = BTreeMap::new();
    let mut warp_map = BTreeMap::new();
    for r in regions.values() {
        for encoded in &r.warps {
            if let Ok(mut warp) = Warp::decode(encoded) {
                warp.parent_region_id = Some(r.id.clone());
                warps.insert(encoded.clone(), warp);
            }
        }
    }
    for (encoded, warp) in &warps {
        let dest = warps.iter().find(|(_, other)| warp.connects_to(other)).map(|(k, _)| k.clone());
        warp_map.insert(encoded.clone(), dest);
    }

    DataSnapshot {
        constants,
        ram_addresses: addresses(&[
            ("gMain", 0x0300_30F0),
            ("gSaveBlock1Ptr", 0x0300_5008),
            ("gSaveBlock2Ptr", 0x0300_500C),
            ("gArchipelagoReceivedItem", 0x0203_F0A0),
            ("CB2_Overworld", 0x0805_6534),
        ]),
        rom_addresses: addresses(&[("gArchipelagoInfo", 0x08F0_0000)]),
        tmhm_moves: TMHM_MOVES.to_vec(),
        species: species_table(),
        maps,
        trainers,
        starters,
        legendary_pokemon: statics(&[
            ("LEGENDARY_POKEMON_ARTICUNO", 144, Some(50)),
            ("LEGENDARY_POKEMON_ZAPDOS", 145, Some(50)),
            ("LEGENDARY_POKEMON_MOLTRES", 146, Some(50)),
        ]),
        misc_pokemon: statics(&[
            ("GIFT_POKEMON_EEVEE", 133, Some(25)),
            ("GIFT_POKEMON_MAGIKARP", 129, Some(5)),
            ("TRADE_POKEMON_RAICHU", 26, None),
        ]),
        events,
        locations,
        items,
        regions,
        warps,
        warp_map,
    }
}
