use async_trait::async_trait;
use byteorder::{LittleEndian, ReadBytesExt};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MemoryDomain {
    SystemBus,
    Rom,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadRequest {
    pub address: u32,
    pub len: usize,
    pub domain: MemoryDomain,
}

impl ReadRequest {
    pub fn bus(address: u32, len: usize) -> Self {
        ReadRequest { address, len, domain: MemoryDomain::SystemBus }
    }

    pub fn rom(address: u32, len: usize) -> Self {
        ReadRequest { address, len, domain: MemoryDomain::Rom }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteRequest {
    pub address: u32,
    pub bytes: Vec<u8>,
    pub domain: MemoryDomain,
}

impl WriteRequest {
    pub fn bus(address: u32, bytes: Vec<u8>) -> Self {
        WriteRequest { address, bytes, domain: MemoryDomain::SystemBus }
    }
}

/// A read or write only goes through while `address` still holds `expected`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Guard {
    pub address: u32,
    pub expected: Vec<u8>,
    pub domain: MemoryDomain,
}

impl Guard {
    pub fn bus(address: u32, expected: Vec<u8>) -> Self {
        Guard { address, expected, domain: MemoryDomain::SystemBus }
    }
}

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("Emulator request failed: {0}")]
    RequestFailed(String),
    #[error("Emulator disconnected")]
    Disconnected,
}

/// Access to the emulated console's memory.
///
/// Each call is one round trip; reads come back in request order.
#[async_trait]
pub trait MemoryTransport: Send + Sync {
    async fn read(&self, reads: &[ReadRequest]) -> Result<Vec<Vec<u8>>, TransportError>;

    /// Returns `None` when any guard no longer matches.
    async fn guarded_read(
        &self,
        reads: &[ReadRequest],
        guards: &[Guard],
    ) -> Result<Option<Vec<Vec<u8>>>, TransportError>;

    async fn write(&self, writes: &[WriteRequest]) -> Result<(), TransportError>;
}

fn short_read(what: &str) -> TransportError {
    TransportError::RequestFailed(format!("short read for {what}"))
}

pub(crate) fn le_u16(bytes: &[u8], what: &str) -> Result<u16, TransportError> {
    let mut cursor = bytes;
    cursor.read_u16::<LittleEndian>().map_err(|_| short_read(what))
}

pub(crate) fn le_u32(bytes: &[u8], what: &str) -> Result<u32, TransportError> {
    let mut cursor = bytes;
    cursor.read_u32::<LittleEndian>().map_err(|_| short_read(what))
}

/// Takes the `index`-th result of a batched read.
pub(crate) fn nth(results: &[Vec<u8>], index: usize, what: &str) -> Result<Vec<u8>, TransportError> {
    results.get(index).cloned().ok_or_else(|| short_read(what))
}
