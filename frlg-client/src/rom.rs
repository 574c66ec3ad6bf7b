use base64::{engine::general_purpose::STANDARD, Engine as _};
use frlg_core::data::GameVersion;

use crate::layout::MemoryLayout;
use crate::transport::{nth, MemoryTransport, ReadRequest, TransportError};

const ROM_NAME_ADDRESS: u32 = 0x108;
const ROM_NAME_LEN: usize = 32;
const AUTH_LEN: usize = 16;

const BASE_NAMES: [&str; 2] = ["pokemon red version", "pokemon green version"];
const PATCHED_PREFIXES: [&str; 2] = ["pokemon red version / AP", "pokemon green version / AP"];
const PATCHED_NAMES: [(&str, GameVersion); 4] = [
    ("pokemon red version / AP", GameVersion::FireRed),
    ("pokemon green version / AP", GameVersion::LeafGreen),
    ("pokemon red version / AP Rev 1", GameVersion::FireRedRev1),
    ("pokemon green version / AP Rev 1", GameVersion::LeafGreenRev1),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RomCheck {
    /// The name bytes are not ASCII; try again on the next pass.
    Unreadable,
    NotThisGame,
    Unpatched,
    IncompatiblePatch,
    Valid(GameVersion),
}

/// Classifies the 32-byte internal name read from ROM 0x108.
pub fn classify_rom_name(raw: &[u8]) -> RomCheck {
    let bytes: Vec<u8> = raw.iter().copied().filter(|&b| b != 0).collect();
    if !bytes.is_ascii() {
        return RomCheck::Unreadable;
    }
    let Ok(name) = String::from_utf8(bytes) else {
        return RomCheck::Unreadable;
    };

    if !BASE_NAMES.iter().any(|base| name.starts_with(base)) {
        return RomCheck::NotThisGame;
    }
    if BASE_NAMES.contains(&name.as_str()) {
        return RomCheck::Unpatched;
    }
    if !PATCHED_PREFIXES.iter().any(|prefix| name.starts_with(prefix)) {
        return RomCheck::IncompatiblePatch;
    }
    PATCHED_NAMES
        .iter()
        .find(|(patched, _)| *patched == name)
        .map_or(RomCheck::IncompatiblePatch, |&(_, version)| RomCheck::Valid(version))
}

pub async fn validate_rom<T: MemoryTransport + ?Sized>(transport: &T) -> Result<RomCheck, TransportError> {
    let results = transport.read(&[ReadRequest::rom(ROM_NAME_ADDRESS, ROM_NAME_LEN)]).await?;
    Ok(classify_rom_name(&nth(&results, 0, "ROM name")?))
}

/// Base64 of the 16-byte slot token the patcher embedded in the ROM.
pub async fn read_auth<T: MemoryTransport + ?Sized>(
    transport: &T,
    layout: &MemoryLayout,
) -> Result<String, TransportError> {
    let results = transport.read(&[ReadRequest::rom(layout.archipelago_info, AUTH_LEN)]).await?;
    Ok(STANDARD.encode(nth(&results, 0, "auth token")?))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn padded(name: &str) -> Vec<u8> {
        let mut raw = name.as_bytes().to_vec();
        raw.resize(ROM_NAME_LEN, 0);
        raw
    }

    #[test]
    fn rom_names_are_classified() {
        assert_eq!(classify_rom_name(&padded("pokemon emerald version")), RomCheck::NotThisGame);
        assert_eq!(classify_rom_name(&padded("pokemon red version")), RomCheck::Unpatched);
        assert_eq!(classify_rom_name(&padded("pokemon green version / XY")), RomCheck::IncompatiblePatch);
        assert_eq!(
            classify_rom_name(&padded("pokemon red version / AP")),
            RomCheck::Valid(GameVersion::FireRed)
        );
        assert_eq!(
            classify_rom_name(&padded("pokemon green version / AP Rev 1")),
            RomCheck::Valid(GameVersion::LeafGreenRev1)
        );
        assert_eq!(classify_rom_name(&[0xFF; 32]), RomCheck::Unreadable);
    }

    #[test]
    fn unknown_patch_suffix_is_incompatible() {
        assert_eq!(
            classify_rom_name(&padded("pokemon red version / AP Rev 2")),
            RomCheck::IncompatiblePatch
        );
    }
}
