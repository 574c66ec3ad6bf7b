use crate::data::MoveId;

/// Moves with base power, the pool for the guaranteed attacking starting move.
pub(crate) const DAMAGING_MOVES: &[MoveId] = &[
    1, 2, 3, 4, 5, 6, 7, 8, 9, 10,
    11, 13, 16, 17, 20, 21, 22, 23, 24, 25,
    26, 27, 29, 30, 31, 33, 34, 35, 36, 37,
    38, 40, 41, 42, 44, 49, 51, 52, 53, 55,
    56, 58, 59, 60, 61, 62, 63, 64, 65, 66,
    67, 69, 71, 72, 75, 76, 80, 82, 83, 84,
    85, 87, 88, 89, 91, 93, 94, 98, 99, 101,
    121, 122, 123, 124, 125, 126, 128, 129, 130, 131,
    132, 136, 140, 141, 143, 145, 146, 149, 152, 154,
    155, 157, 158, 161, 162, 163, 167, 168, 172, 175,
    177, 179, 181, 183, 185, 188, 189, 190, 192, 196,
    198, 200, 202, 205, 209, 210, 211, 216, 217, 218,
    221, 222, 223, 224, 225, 228, 229, 231, 232, 233,
    237, 238, 239, 242, 245, 246, 247, 248, 250, 251,
    253, 257, 263, 265, 267, 276, 279, 280, 282, 284,
    290, 292, 295, 296, 299, 301, 302, 304, 305, 306,
    307, 308, 309, 310, 311, 314, 315, 317, 318, 323,
    324, 325, 326, 327, 328, 330, 331, 332, 333, 337,
    338, 340, 341, 342, 343, 344, 345, 348, 350, 351,
    352, 353, 354,
];

// Cut, Fly, Surf, Strength, Flash, Rock Smash, Waterfall, Dive
pub(crate) const HM_MOVES: &[MoveId] = &[15, 19, 57, 70, 127, 148, 249, 291];

// MOVE_NONE, Struggle
pub(crate) const MOVE_BLACKLIST: &[MoveId] = &[0, 165];

/// Number of TM bits; the HM bits follow them.
pub(crate) const TM_COUNT: usize = 50;
pub(crate) const HM_COUNT: usize = 8;

pub const ROUTE_21_NORTH: &str = "MAP_ROUTE21_NORTH";
pub const ROUTE_21_SOUTH: &str = "MAP_ROUTE21_SOUTH";

/// Blacklist entry that expands to every legendary species.
pub const LEGENDARIES_BLACKLIST_ENTRY: &str = "_Legendaries";

pub const LEGENDARY_SPECIES: &[&str] = &[
    "SPECIES_ARTICUNO",
    "SPECIES_ZAPDOS",
    "SPECIES_MOLTRES",
    "SPECIES_MEWTWO",
    "SPECIES_MEW",
    "SPECIES_RAIKOU",
    "SPECIES_ENTEI",
    "SPECIES_SUICUNE",
    "SPECIES_LUGIA",
    "SPECIES_HO_OH",
    "SPECIES_CELEBI",
    "SPECIES_REGIROCK",
    "SPECIES_REGICE",
    "SPECIES_REGISTEEL",
    "SPECIES_LATIAS",
    "SPECIES_LATIOS",
    "SPECIES_KYOGRE",
    "SPECIES_GROUDON",
    "SPECIES_RAYQUAZA",
    "SPECIES_JIRACHI",
    "SPECIES_DEOXYS",
];

const DUNGEON_GROUPS: &[(&str, &str)] = &[
    ("MAP_MT_MOON_1F", "MAP_MT_MOON"),
    ("MAP_MT_MOON_B1F", "MAP_MT_MOON"),
    ("MAP_MT_MOON_B2F", "MAP_MT_MOON"),
    ("MAP_ROCK_TUNNEL_1F", "MAP_ROCK_TUNNEL"),
    ("MAP_ROCK_TUNNEL_B1F", "MAP_ROCK_TUNNEL"),
    ("MAP_POKEMON_TOWER_3F", "MAP_POKEMON_TOWER"),
    ("MAP_POKEMON_TOWER_4F", "MAP_POKEMON_TOWER"),
    ("MAP_POKEMON_TOWER_5F", "MAP_POKEMON_TOWER"),
    ("MAP_POKEMON_TOWER_6F", "MAP_POKEMON_TOWER"),
    ("MAP_POKEMON_TOWER_7F", "MAP_POKEMON_TOWER"),
    ("MAP_SAFARI_ZONE_CENTER", "MAP_SAFARI_ZONE"),
    ("MAP_SAFARI_ZONE_EAST", "MAP_SAFARI_ZONE"),
    ("MAP_SAFARI_ZONE_NORTH", "MAP_SAFARI_ZONE"),
    ("MAP_SAFARI_ZONE_WEST", "MAP_SAFARI_ZONE"),
    ("MAP_SEAFOAM_ISLANDS_1F", "MAP_SEAFOAM_ISLANDS"),
    ("MAP_SEAFOAM_ISLANDS_B1F", "MAP_SEAFOAM_ISLANDS"),
    ("MAP_SEAFOAM_ISLANDS_B2F", "MAP_SEAFOAM_ISLANDS"),
    ("MAP_SEAFOAM_ISLANDS_B3F", "MAP_SEAFOAM_ISLANDS"),
    ("MAP_SEAFOAM_ISLANDS_B4F", "MAP_SEAFOAM_ISLANDS"),
    ("MAP_POKEMON_MANSION_1F", "MAP_POKEMON_MANSION"),
    ("MAP_POKEMON_MANSION_2F", "MAP_POKEMON_MANSION"),
    ("MAP_POKEMON_MANSION_3F", "MAP_POKEMON_MANSION"),
    ("MAP_POKEMON_MANSION_B1F", "MAP_POKEMON_MANSION"),
    ("MAP_VICTORY_ROAD_1F", "MAP_VICTORY_ROAD"),
    ("MAP_VICTORY_ROAD_2F", "MAP_VICTORY_ROAD"),
    ("MAP_VICTORY_ROAD_3F", "MAP_VICTORY_ROAD"),
    ("MAP_MT_EMBER_EXTERIOR", "MAP_MT_EMBER"),
    ("MAP_MT_EMBER_SUMMIT_PATH_1F", "MAP_MT_EMBER"),
    ("MAP_MT_EMBER_SUMMIT_PATH_2F", "MAP_MT_EMBER"),
    ("MAP_MT_EMBER_SUMMIT_PATH_3F", "MAP_MT_EMBER"),
    ("MAP_MT_EMBER_RUBY_PATH_1F", "MAP_MT_EMBER"),
    ("MAP_MT_EMBER_RUBY_PATH_B1F", "MAP_MT_EMBER"),
    ("MAP_MT_EMBER_RUBY_PATH_B1F_STAIRS", "MAP_MT_EMBER"),
    ("MAP_MT_EMBER_RUBY_PATH_B2F", "MAP_MT_EMBER"),
    ("MAP_MT_EMBER_RUBY_PATH_B2F_STAIRS", "MAP_MT_EMBER"),
    ("MAP_MT_EMBER_RUBY_PATH_B3F", "MAP_MT_EMBER"),
    ("MAP_FOUR_ISLAND_ICEFALL_CAVE_ENTRANCE", "MAP_FOUR_ISLAND_ICEFALL_CAVE"),
    ("MAP_FOUR_ISLAND_ICEFALL_CAVE_1F", "MAP_FOUR_ISLAND_ICEFALL_CAVE"),
    ("MAP_FOUR_ISLAND_ICEFALL_CAVE_B1F", "MAP_FOUR_ISLAND_ICEFALL_CAVE"),
    ("MAP_FOUR_ISLAND_ICEFALL_CAVE_BACK", "MAP_FOUR_ISLAND_ICEFALL_CAVE"),
    ("MAP_FIVE_ISLAND_LOST_CAVE_ROOM1", "MAP_FIVE_ISLAND_LOST_CAVE"),
    ("MAP_FIVE_ISLAND_LOST_CAVE_ROOM2", "MAP_FIVE_ISLAND_LOST_CAVE"),
    ("MAP_FIVE_ISLAND_LOST_CAVE_ROOM3", "MAP_FIVE_ISLAND_LOST_CAVE"),
    ("MAP_FIVE_ISLAND_LOST_CAVE_ROOM4", "MAP_FIVE_ISLAND_LOST_CAVE"),
    ("MAP_FIVE_ISLAND_LOST_CAVE_ROOM5", "MAP_FIVE_ISLAND_LOST_CAVE"),
    ("MAP_FIVE_ISLAND_LOST_CAVE_ROOM6", "MAP_FIVE_ISLAND_LOST_CAVE"),
    ("MAP_FIVE_ISLAND_LOST_CAVE_ROOM7", "MAP_FIVE_ISLAND_LOST_CAVE"),
    ("MAP_FIVE_ISLAND_LOST_CAVE_ROOM8", "MAP_FIVE_ISLAND_LOST_CAVE"),
    ("MAP_FIVE_ISLAND_LOST_CAVE_ROOM9", "MAP_FIVE_ISLAND_LOST_CAVE"),
    ("MAP_FIVE_ISLAND_LOST_CAVE_ROOM10", "MAP_FIVE_ISLAND_LOST_CAVE"),
    ("MAP_FIVE_ISLAND_LOST_CAVE_ROOM11", "MAP_FIVE_ISLAND_LOST_CAVE"),
    ("MAP_FIVE_ISLAND_LOST_CAVE_ROOM12", "MAP_FIVE_ISLAND_LOST_CAVE"),
    ("MAP_FIVE_ISLAND_LOST_CAVE_ROOM13", "MAP_FIVE_ISLAND_LOST_CAVE"),
    ("MAP_FIVE_ISLAND_LOST_CAVE_ROOM14", "MAP_FIVE_ISLAND_LOST_CAVE"),
    ("MAP_CERULEAN_CAVE_1F", "MAP_CERULEAN_CAVE"),
    ("MAP_CERULEAN_CAVE_2F", "MAP_CERULEAN_CAVE"),
    ("MAP_CERULEAN_CAVE_B1F", "MAP_CERULEAN_CAVE"),
];

/// Multi-floor dungeon a map belongs to, if any.
pub fn dungeon_group(map_name: &str) -> Option<&'static str> {
    DUNGEON_GROUPS
        .iter()
        .find(|(map, _)| *map == map_name)
        .map(|(_, group)| *group)
}

/// Lab starters in ball order.
pub const STARTER_ORDER: [&str; 3] = [
    "STARTER_POKEMON_BULBASAUR",
    "STARTER_POKEMON_SQUIRTLE",
    "STARTER_POKEMON_CHARMANDER",
];

/// A rival party slot holding the starter: (trainer constant, party index, evolution stage).
pub(crate) type RivalStarterSlot = (&'static str, usize, usize);

/// Rival battles that carry the given lab starter (or one of its evolutions).
pub(crate) fn rival_starter_slots(starter: &str) -> Option<&'static [RivalStarterSlot; 9]> {
    match starter {
        "STARTER_POKEMON_BULBASAUR" => Some(&RIVAL_BULBASAUR),
        "STARTER_POKEMON_SQUIRTLE" => Some(&RIVAL_SQUIRTLE),
        "STARTER_POKEMON_CHARMANDER" => Some(&RIVAL_CHARMANDER),
        _ => None,
    }
}

const RIVAL_BULBASAUR: [RivalStarterSlot; 9] = [
    ("TRAINER_RIVAL_OAKS_LAB_BULBASAUR", 0, 0),
    ("TRAINER_RIVAL_ROUTE22_EARLY_BULBASAUR", 1, 0),
    ("TRAINER_RIVAL_CERULEAN_BULBASAUR", 3, 0),
    ("TRAINER_RIVAL_SS_ANNE_BULBASAUR", 3, 1),
    ("TRAINER_RIVAL_POKEMON_TOWER_BULBASAUR", 4, 1),
    ("TRAINER_RIVAL_SILPH_BULBASAUR", 4, 2),
    ("TRAINER_RIVAL_ROUTE22_LATE_BULBASAUR", 5, 2),
    ("TRAINER_CHAMPION_FIRST_BULBASAUR", 5, 2),
    ("TRAINER_CHAMPION_REMATCH_BULBASAUR", 5, 2),
];

const RIVAL_CHARMANDER: [RivalStarterSlot; 9] = [
    ("TRAINER_RIVAL_OAKS_LAB_CHARMANDER", 0, 0),
    ("TRAINER_RIVAL_ROUTE22_EARLY_CHARMANDER", 1, 0),
    ("TRAINER_RIVAL_CERULEAN_CHARMANDER", 3, 0),
    ("TRAINER_RIVAL_SS_ANNE_CHARMANDER", 3, 1),
    ("TRAINER_RIVAL_POKEMON_TOWER_CHARMANDER", 4, 1),
    ("TRAINER_RIVAL_SILPH_CHARMANDER", 4, 2),
    ("TRAINER_RIVAL_ROUTE22_LATE_CHARMANDER", 5, 2),
    ("TRAINER_CHAMPION_FIRST_CHARMANDER", 5, 2),
    ("TRAINER_CHAMPION_REMATCH_CHARMANDER", 5, 2),
];

const RIVAL_SQUIRTLE: [RivalStarterSlot; 9] = [
    ("TRAINER_RIVAL_OAKS_LAB_SQUIRTLE", 0, 0),
    ("TRAINER_RIVAL_ROUTE22_EARLY_SQUIRTLE", 1, 0),
    ("TRAINER_RIVAL_CERULEAN_SQUIRTLE", 3, 0),
    ("TRAINER_RIVAL_SS_ANNE_SQUIRTLE", 3, 1),
    ("TRAINER_RIVAL_POKEMON_TOWER_SQUIRTLE", 4, 1),
    ("TRAINER_RIVAL_SILPH_SQUIRTLE", 4, 2),
    ("TRAINER_RIVAL_ROUTE22_LATE_SQUIRTLE", 5, 2),
    ("TRAINER_CHAMPION_FIRST_SQUIRTLE", 5, 2),
    ("TRAINER_CHAMPION_REMATCH_SQUIRTLE", 5, 2),
];
