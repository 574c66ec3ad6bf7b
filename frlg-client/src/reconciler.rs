use std::collections::BTreeSet;

use byteorder::{ByteOrder, LittleEndian};

use crate::host::{ClientMessage, ClientStatus, HostSession, SetOperation};
use crate::layout::{
    offset_flag, reverse_offset_item_value, FlagLayout, MemoryLayout, CAUGHT_LEN, CAUGHT_OFFSET,
    FLAGS_CHUNK_LEN, FLAGS_CONTINUED_OFFSET, FLAGS_OFFSET, RECEIVED_COUNT_OFFSET,
};
use crate::transport::{le_u16, le_u32, nth, Guard, MemoryTransport, ReadRequest, WriteRequest};
use crate::Result;

/// What the host has acknowledged so far this connection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    pub checked_locations: BTreeSet<u32>,
    /// Empty until the first event report goes out.
    pub events: Vec<bool>,
    pub caught_pokemon: u32,
    pub goal_sent: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PollReport {
    /// In-game id of the item written this poll.
    pub delivered_item: Option<u16>,
    pub sent: Vec<ClientMessage>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollOutcome {
    /// The host is not ready for game traffic.
    Skipped,
    /// A guard failed; the game left the overworld or the save blocks moved.
    Abandoned,
    Completed(PollReport),
}

/// Everything one pass over the flag and dex memory turned up.
#[derive(Debug, Default)]
struct Observation {
    checked_locations: BTreeSet<u32>,
    goal: bool,
    events: Vec<bool>,
    caught_pokemon: u32,
}

impl Observation {
    fn decode(flag_bytes: &[u8], caught_bytes: &[u8], flags: &FlagLayout, server_locations: &BTreeSet<u32>) -> Self {
        let mut seen = Observation {
            events: vec![false; flags.tracker_flags.len()],
            ..Observation::default()
        };

        for (byte_index, byte) in flag_bytes.iter().enumerate() {
            for bit in 0..8usize {
                if byte & (1u8 << bit) == 0 {
                    continue;
                }
                let flag = (byte_index * 8 + bit) as u32;
                let location = offset_flag(flag);
                if server_locations.contains(&location) {
                    seen.checked_locations.insert(location);
                }
                if flags.goal_flags.contains(&flag) {
                    seen.goal = true;
                }
                if let Some(&index) = flags.tracker_flags.get(&flag) {
                    seen.events[index] = true;
                }
            }
        }

        seen.caught_pokemon = caught_bytes.iter().map(|b| b.count_ones()).sum();
        seen
    }
}

fn event_bitfield(events: &[bool]) -> u64 {
    events
        .iter()
        .enumerate()
        .filter(|(_, set)| **set)
        .fold(0, |bits, (i, _)| bits | 1 << i)
}

/// Diffs game memory against the host's view and sends what changed.
#[derive(Debug, Clone)]
pub struct Reconciler {
    layout: MemoryLayout,
    flags: FlagLayout,
    state: SessionState,
}

impl Reconciler {
    pub fn new(layout: MemoryLayout, flags: FlagLayout) -> Self {
        Reconciler { layout, flags, state: SessionState::default() }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn layout(&self) -> &MemoryLayout {
        &self.layout
    }

    pub async fn poll<T, H>(&mut self, transport: &T, host: &H) -> Result<PollOutcome>
    where
        T: MemoryTransport + ?Sized,
        H: HostSession + ?Sized,
    {
        if !host.is_ready() {
            return Ok(PollOutcome::Skipped);
        }

        let pointers = transport
            .read(&[
                ReadRequest::bus(self.layout.save_block_1_ptr, 4),
                ReadRequest::bus(self.layout.save_block_2_ptr, 4),
            ])
            .await?;
        let sb1_raw = nth(&pointers, 0, "gSaveBlock1Ptr")?;
        let sb2_raw = nth(&pointers, 1, "gSaveBlock2Ptr")?;
        let sb1 = le_u32(&sb1_raw, "gSaveBlock1Ptr")?;
        let sb2 = le_u32(&sb2_raw, "gSaveBlock2Ptr")?;

        // Pointers that run off the end of the address space belong to no loaded save.
        let addresses = (
            sb1.checked_add(RECEIVED_COUNT_OFFSET),
            sb1.checked_add(FLAGS_OFFSET),
            sb1.checked_add(FLAGS_CONTINUED_OFFSET),
            sb2.checked_add(CAUGHT_OFFSET),
        );
        let (Some(received_count), Some(flags_at), Some(flags_continued_at), Some(caught_at)) = addresses else {
            log::debug!("Save block pointers {sb1:#010x}/{sb2:#010x} are out of range");
            return Ok(PollOutcome::Abandoned);
        };

        let overworld = self.layout.overworld_guard();
        let sb1_guards = [overworld.clone(), Guard::bus(self.layout.save_block_1_ptr, sb1_raw)];
        let sb2_guards = [overworld, Guard::bus(self.layout.save_block_2_ptr, sb2_raw)];

        let delivered_item = self.deliver_item(transport, host, received_count, &sb1_guards).await?;

        let Some(first) = transport
            .guarded_read(&[ReadRequest::bus(flags_at, FLAGS_CHUNK_LEN)], &sb1_guards)
            .await?
        else {
            return Ok(PollOutcome::Abandoned);
        };
        let mut flag_bytes = nth(&first, 0, "flags")?;
        if let Some(rest) = transport
            .guarded_read(&[ReadRequest::bus(flags_continued_at, FLAGS_CHUNK_LEN)], &sb1_guards)
            .await?
        {
            flag_bytes.extend(nth(&rest, 0, "flags")?);
        }

        let Some(caught) = transport
            .guarded_read(&[ReadRequest::bus(caught_at, CAUGHT_LEN)], &sb2_guards)
            .await?
        else {
            return Ok(PollOutcome::Abandoned);
        };
        let caught_bytes = nth(&caught, 0, "pokedex owned")?;

        let seen = Observation::decode(&flag_bytes, &caught_bytes, &self.flags, &host.server_locations());
        let sent = self.report(host, seen).await?;
        Ok(PollOutcome::Completed(PollReport { delivered_item, sent }))
    }

    /// Writes the next undelivered item when the game's mailbox is empty.
    ///
    /// Items with no in-game id are skipped by bumping the save's received
    /// counter directly, so the rest of the queue still arrives in order.
    async fn deliver_item<T, H>(
        &self,
        transport: &T,
        host: &H,
        received_count: u32,
        guards: &[Guard],
    ) -> Result<Option<u16>>
    where
        T: MemoryTransport + ?Sized,
        H: HostSession + ?Sized,
    {
        let mailbox = self.layout.received_item;
        let Some(result) = transport
            .guarded_read(
                &[
                    ReadRequest::bus(received_count, 2),
                    ReadRequest::bus(mailbox + 4, 1),
                ],
                guards,
            )
            .await?
        else {
            return Ok(None);
        };
        let received = le_u16(&nth(&result, 0, "received count")?, "received count")?;
        let mailbox_empty = nth(&result, 1, "mailbox flag")?.first() == Some(&0);

        let items = host.items_received();
        let Some(next) = items.get(usize::from(received)) else {
            return Ok(None);
        };
        if !mailbox_empty {
            return Ok(None);
        }

        let count = received.wrapping_add(1);
        let mut count_bytes = [0u8; 2];
        LittleEndian::write_u16(&mut count_bytes, count);

        let Some(code) = reverse_offset_item_value(next.item) else {
            log::warn!("Item {} from player {} has no in-game id; skipping it", next.item, next.player);
            transport
                .write(&[WriteRequest::bus(received_count, count_bytes.to_vec())])
                .await?;
            return Ok(None);
        };
        let announce = next.flags & 1 != 0 || host.slot() == Some(next.player);

        let mut code_bytes = [0u8; 2];
        LittleEndian::write_u16(&mut code_bytes, code);

        transport
            .write(&[
                WriteRequest::bus(mailbox, code_bytes.to_vec()),
                WriteRequest::bus(mailbox + 2, count_bytes.to_vec()),
                WriteRequest::bus(mailbox + 4, vec![1]),
                WriteRequest::bus(mailbox + 5, vec![u8::from(announce)]),
            ])
            .await?;
        log::debug!("Delivered item {code} (#{count})");
        Ok(Some(code))
    }

    async fn report<H: HostSession + ?Sized>(&mut self, host: &H, seen: Observation) -> Result<Vec<ClientMessage>> {
        let mut sent = Vec::new();

        if seen.checked_locations != self.state.checked_locations {
            let msg = ClientMessage::LocationChecks {
                locations: seen.checked_locations.iter().copied().collect(),
            };
            host.send_msgs(vec![msg.clone()]).await?;
            self.state.checked_locations = seen.checked_locations;
            sent.push(msg);
        }

        if seen.goal && !self.state.goal_sent && !host.finished_game() {
            let msg = ClientMessage::StatusUpdate { status: ClientStatus::Goal };
            host.send_msgs(vec![msg.clone()]).await?;
            self.state.goal_sent = true;
            log::info!("Goal reached");
            sent.push(msg);
        }

        let Some(slot) = host.slot() else {
            return Ok(sent);
        };
        let team = host.team();

        if seen.events != self.state.events {
            let key = format!("pokemon_frlg_events_{team}_{slot}");
            let msg = ClientMessage::set(key, SetOperation::Or, event_bitfield(&seen.events));
            host.send_msgs(vec![msg.clone()]).await?;
            self.state.events = seen.events;
            sent.push(msg);
        }

        if seen.caught_pokemon != self.state.caught_pokemon {
            let key = format!("pokemon_frlg_pokedex_{team}_{slot}");
            let msg = ClientMessage::set(key, SetOperation::Replace, u64::from(seen.caught_pokemon));
            host.send_msgs(vec![msg.clone()]).await?;
            self.state.caught_pokemon = seen.caught_pokemon;
            sent.push(msg);
        }

        Ok(sent)
    }
}
