#![allow(dead_code)]

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Mutex;

use async_trait::async_trait;
use frlg_client::{
    ClientMessage, Guard, HostError, HostSession, MemoryDomain, MemoryLayout, MemoryTransport, ReadRequest,
    ReceivedItem, TransportError, WriteRequest,
};
use frlg_core::data::{DataSnapshot, GameVersion};

pub const SAVE_BLOCK_1: u32 = 0x0202_552C;
pub const SAVE_BLOCK_2: u32 = 0x0202_4588;
pub const AUTH: [u8; 16] = *b"frlg-slot-token!";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Failure {
    #[default]
    None,
    RequestFailed,
    Disconnected,
}

#[derive(Default)]
struct Memory {
    bytes: BTreeMap<(MemoryDomain, u32), u8>,
    writes: Vec<WriteRequest>,
    failure: Failure,
}

impl Memory {
    fn peek(&self, domain: MemoryDomain, address: u32, len: usize) -> Vec<u8> {
        (0..len as u32)
            .map(|i| self.bytes.get(&(domain, address + i)).copied().unwrap_or(0))
            .collect()
    }

    fn check(&self) -> Result<(), TransportError> {
        match self.failure {
            Failure::None => Ok(()),
            Failure::RequestFailed => Err(TransportError::RequestFailed("socket timed out".to_string())),
            Failure::Disconnected => Err(TransportError::Disconnected),
        }
    }
}

/// Emulator memory backed by a sparse byte map; unset bytes read as zero.
#[derive(Default)]
pub struct FakeEmulator {
    memory: Mutex<Memory>,
}

impl FakeEmulator {
    pub fn poke(&self, address: u32, bytes: &[u8]) {
        self.poke_in(MemoryDomain::SystemBus, address, bytes);
    }

    pub fn poke_in(&self, domain: MemoryDomain, address: u32, bytes: &[u8]) {
        let mut memory = self.memory.lock().unwrap();
        for (i, b) in bytes.iter().enumerate() {
            memory.bytes.insert((domain, address + i as u32), *b);
        }
    }

    pub fn peek(&self, address: u32, len: usize) -> Vec<u8> {
        self.memory.lock().unwrap().peek(MemoryDomain::SystemBus, address, len)
    }

    pub fn write_count(&self) -> usize {
        self.memory.lock().unwrap().writes.len()
    }

    pub fn fail_with(&self, failure: Failure) {
        self.memory.lock().unwrap().failure = failure;
    }

    /// Sets an event flag in the save block's two flag chunks.
    pub fn set_flag(&self, flag: u32) {
        let byte = flag / 8;
        let address = if byte < 0x90 {
            SAVE_BLOCK_1 + 0x1090 + byte
        } else {
            SAVE_BLOCK_1 + 0x1120 + byte - 0x90
        };
        let current = self.peek(address, 1)[0];
        self.poke(address, &[current | 1 << (flag % 8)]);
    }

    pub fn set_caught(&self, bitfield: &[u8]) {
        self.poke(SAVE_BLOCK_2 + 0x28, bitfield);
    }

    pub fn set_received_count(&self, count: u16) {
        self.poke(SAVE_BLOCK_1 + 0x3D88, &count.to_le_bytes());
    }

    pub fn leave_overworld(&self, layout: &MemoryLayout) {
        self.poke(layout.main_callback, &[0, 0, 0, 0]);
    }
}

#[async_trait]
impl MemoryTransport for FakeEmulator {
    async fn read(&self, reads: &[ReadRequest]) -> Result<Vec<Vec<u8>>, TransportError> {
        let memory = self.memory.lock().unwrap();
        memory.check()?;
        Ok(reads.iter().map(|r| memory.peek(r.domain, r.address, r.len)).collect())
    }

    async fn guarded_read(
        &self,
        reads: &[ReadRequest],
        guards: &[Guard],
    ) -> Result<Option<Vec<Vec<u8>>>, TransportError> {
        let memory = self.memory.lock().unwrap();
        memory.check()?;
        let intact = guards
            .iter()
            .all(|g| memory.peek(g.domain, g.address, g.expected.len()) == g.expected);
        if !intact {
            return Ok(None);
        }
        Ok(Some(reads.iter().map(|r| memory.peek(r.domain, r.address, r.len)).collect()))
    }

    async fn write(&self, writes: &[WriteRequest]) -> Result<(), TransportError> {
        let mut memory = self.memory.lock().unwrap();
        memory.check()?;
        for w in writes {
            for (i, b) in w.bytes.iter().enumerate() {
                memory.bytes.insert((w.domain, w.address + i as u32), *b);
            }
            memory.writes.push(w.clone());
        }
        Ok(())
    }
}

/// A patched game sitting in the overworld with both save blocks mapped.
pub fn booted_game(data: &DataSnapshot, version: GameVersion, rom_name: &str) -> FakeEmulator {
    let layout = MemoryLayout::for_version(data, version).unwrap();
    let emulator = FakeEmulator::default();
    emulator.poke(layout.main_callback, &layout.overworld_callback.to_le_bytes());
    emulator.poke(layout.save_block_1_ptr, &SAVE_BLOCK_1.to_le_bytes());
    emulator.poke(layout.save_block_2_ptr, &SAVE_BLOCK_2.to_le_bytes());

    let mut name = rom_name.as_bytes().to_vec();
    name.resize(32, 0);
    emulator.poke_in(MemoryDomain::Rom, 0x108, &name);
    emulator.poke_in(MemoryDomain::Rom, layout.archipelago_info, &AUTH);
    emulator
}

pub struct FakeHost {
    pub ready: bool,
    pub slot: Option<u32>,
    pub team: u32,
    pub locations: BTreeSet<u32>,
    pub items: Mutex<Vec<ReceivedItem>>,
    pub sent: Mutex<Vec<ClientMessage>>,
    pub auth: Mutex<Option<String>>,
    pub rejecting: Mutex<bool>,
    pub finished: Mutex<bool>,
}

impl FakeHost {
    pub fn new(locations: impl IntoIterator<Item = u32>) -> Self {
        FakeHost {
            ready: true,
            slot: Some(1),
            team: 0,
            locations: locations.into_iter().collect(),
            items: Mutex::new(Vec::new()),
            sent: Mutex::new(Vec::new()),
            auth: Mutex::new(None),
            rejecting: Mutex::new(false),
            finished: Mutex::new(false),
        }
    }

    pub fn sent(&self) -> Vec<ClientMessage> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl HostSession for FakeHost {
    async fn send_msgs(&self, msgs: Vec<ClientMessage>) -> Result<(), HostError> {
        if *self.rejecting.lock().unwrap() {
            return Err(HostError::Closed);
        }
        self.sent.lock().unwrap().extend(msgs);
        Ok(())
    }

    async fn authenticate(&self, auth: String) -> Result<(), HostError> {
        *self.auth.lock().unwrap() = Some(auth);
        Ok(())
    }

    fn is_ready(&self) -> bool {
        self.ready
    }

    fn items_received(&self) -> Vec<ReceivedItem> {
        self.items.lock().unwrap().clone()
    }

    fn server_locations(&self) -> BTreeSet<u32> {
        self.locations.clone()
    }

    fn slot(&self) -> Option<u32> {
        self.slot
    }

    fn team(&self) -> u32 {
        self.team
    }

    fn finished_game(&self) -> bool {
        *self.finished.lock().unwrap()
    }
}
