//! Live session client: watches a running FireRed/LeafGreen game through an
//! emulator transport and keeps a multiworld host in sync with it.

mod host;
mod layout;
mod reconciler;
mod rom;
mod session;
mod transport;

use thiserror::Error;

pub use host::{ClientMessage, ClientStatus, DataStorageOperation, HostError, HostSession, ReceivedItem, SetOperation};
pub use layout::{offset_flag, reverse_offset_item_value, FlagLayout, MemoryLayout, TRACKER_EVENT_FLAGS};
pub use reconciler::{PollOutcome, PollReport, Reconciler, SessionState};
pub use rom::{classify_rom_name, read_auth, validate_rom, RomCheck};
pub use session::{ConnectionState, Session};
pub use transport::{Guard, MemoryDomain, MemoryTransport, ReadRequest, TransportError, WriteRequest};

#[derive(Debug, Error)]
pub enum ClientError {
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error(transparent)]
    Host(#[from] HostError),
    #[error("Snapshot error: {0}")]
    Snapshot(#[from] frlg_core::RandomizerError),
}

pub type Result<T> = std::result::Result<T, ClientError>;
