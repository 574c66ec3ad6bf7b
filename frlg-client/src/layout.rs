use std::collections::{BTreeMap, BTreeSet};

use frlg_core::data::{DataSnapshot, GameVersion, BASE_OFFSET};

use crate::transport::Guard;

// Offsets into the save blocks.
pub(crate) const FLAGS_OFFSET: u32 = 0x1090;
pub(crate) const FLAGS_CONTINUED_OFFSET: u32 = 0x1120;
pub(crate) const FLAGS_CHUNK_LEN: usize = 0x90;
pub(crate) const CAUGHT_OFFSET: u32 = 0x18 + 0x10;
pub(crate) const CAUGHT_LEN: usize = 0x34;
pub(crate) const RECEIVED_COUNT_OFFSET: u32 = 0x3D88;

/// Progress flags mirrored to the host for trackers, in bit order.
pub const TRACKER_EVENT_FLAGS: [&str; 20] = [
    "FLAG_DEFEATED_BROCK",
    "FLAG_DEFEATED_MISTY",
    "FLAG_DEFEATED_LT_SURGE",
    "FLAG_DEFEATED_ERIKA",
    "FLAG_DEFEATED_KOGA",
    "FLAG_DEFEATED_SABRINA",
    "FLAG_DEFEATED_BLAINE",
    "FLAG_DEFEATED_LEADER_GIOVANNI",
    "FLAG_DELIVERED_OAKS_PARCEL",
    "FLAG_DEFEATED_ROUTE22_RIVAL",
    // Bill saved in the Sea Cottage.
    "FLAG_GOT_SS_TICKET",
    "FLAG_RESCUED_MR_FUJI",
    // Silph Co. liberated.
    "FLAG_HIDE_SAFFRON_ROCKETS",
    // Network Machine restored.
    "FLAG_SYS_CAN_LINK_WITH_RS",
    "FLAG_RESCUED_LOSTELLE",
    "FLAG_SEVII_DETOUR_FINISHED",
    // Lorelei helped in Icefall Cave.
    "FLAG_HIDE_RUIN_VALLEY_SCIENTIST",
    "FLAG_LEARNED_YES_NAH_CHANSEY",
    "FLAG_DEFEATED_CHAMP",
    "FLAG_PURCHASED_LEMONADE",
];

const CHAMPION_TRAINERS: [&str; 3] = [
    "TRAINER_CHAMPION_FIRST_BULBASAUR",
    "TRAINER_CHAMPION_FIRST_CHARMANDER",
    "TRAINER_CHAMPION_FIRST_SQUIRTLE",
];

/// Fixed addresses for one game release.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryLayout {
    pub version: GameVersion,
    /// `gMain.callback2`.
    pub main_callback: u32,
    /// Thumb address `gMain.callback2` holds while the overworld runs.
    pub overworld_callback: u32,
    pub save_block_1_ptr: u32,
    pub save_block_2_ptr: u32,
    pub received_item: u32,
    pub archipelago_info: u32,
}

impl MemoryLayout {
    pub fn for_version(data: &DataSnapshot, version: GameVersion) -> frlg_core::Result<Self> {
        Ok(MemoryLayout {
            version,
            main_callback: data.ram_address(version, "gMain")? + 4,
            overworld_callback: data.ram_address(version, "CB2_Overworld")? + 1,
            save_block_1_ptr: data.ram_address(version, "gSaveBlock1Ptr")?,
            save_block_2_ptr: data.ram_address(version, "gSaveBlock2Ptr")?,
            received_item: data.ram_address(version, "gArchipelagoReceivedItem")?,
            archipelago_info: data.rom_address(version, "gArchipelagoInfo")?,
        })
    }

    pub(crate) fn overworld_guard(&self) -> Guard {
        Guard::bus(self.main_callback, self.overworld_callback.to_le_bytes().to_vec())
    }
}

/// Which event flags mean what to the reconciler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlagLayout {
    pub goal_flags: BTreeSet<u32>,
    /// Flag id to its bit in the tracker bitfield.
    pub tracker_flags: BTreeMap<u32, usize>,
}

fn flag_constant(data: &DataSnapshot, name: &str) -> frlg_core::Result<u32> {
    let value = data.constant(name)?;
    u32::try_from(value)
        .map_err(|_| frlg_core::RandomizerError::Config(format!("{name} = {value} is not a flag id")))
}

impl FlagLayout {
    pub fn from_snapshot(data: &DataSnapshot) -> frlg_core::Result<Self> {
        let trainer_flags_start = flag_constant(data, "TRAINER_FLAGS_START")?;
        let mut goal_flags = BTreeSet::from([flag_constant(data, "FLAG_DEFEATED_CHAMP")?]);
        for trainer in CHAMPION_TRAINERS {
            goal_flags.insert(trainer_flags_start + flag_constant(data, trainer)?);
        }

        let tracker_flags = TRACKER_EVENT_FLAGS
            .iter()
            .enumerate()
            .map(|(bit, name)| Ok((flag_constant(data, name)?, bit)))
            .collect::<frlg_core::Result<_>>()?;

        Ok(FlagLayout { goal_flags, tracker_flags })
    }
}

/// Location id the host uses for an in-game flag.
pub fn offset_flag(flag: u32) -> u32 {
    flag + BASE_OFFSET
}

/// In-game item id for a host item code; `None` when the code is outside the game's range.
pub fn reverse_offset_item_value(item: u32) -> Option<u16> {
    item.checked_sub(BASE_OFFSET).and_then(|id| u16::try_from(id).ok())
}
