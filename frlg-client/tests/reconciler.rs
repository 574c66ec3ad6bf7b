mod common;

use common::{booted_game, FakeEmulator, FakeHost, SAVE_BLOCK_1};
use frlg_client::{
    ClientError, ClientMessage, ClientStatus, DataStorageOperation, FlagLayout, MemoryLayout, PollOutcome,
    ReceivedItem, Reconciler, SetOperation,
};
use frlg_core::data::{GameVersion, BASE_OFFSET};
use frlg_core::testkit::sample_snapshot;

const ROUTE1_POTION_FLAG: u32 = 0x1A0;
const BROCK_FLAG: u32 = 0x4B0;
const CHAMP_FLAG: u32 = 0x4BC;

fn setup() -> (Reconciler, FakeEmulator, MemoryLayout) {
    let data = sample_snapshot();
    let layout = MemoryLayout::for_version(&data, GameVersion::FireRed).unwrap();
    let flags = FlagLayout::from_snapshot(&data).unwrap();
    let emulator = booted_game(&data, GameVersion::FireRed, "pokemon red version / AP");
    (Reconciler::new(layout.clone(), flags), emulator, layout)
}

fn completed(outcome: PollOutcome) -> Vec<ClientMessage> {
    match outcome {
        PollOutcome::Completed(report) => report.sent,
        other => panic!("expected a completed poll, got {other:?}"),
    }
}

#[tokio::test]
async fn goal_is_reported_exactly_once() {
    let (mut reconciler, emulator, _) = setup();
    let host = FakeHost::new([]);
    emulator.set_flag(CHAMP_FLAG);

    completed(reconciler.poll(&emulator, &host).await.unwrap());
    completed(reconciler.poll(&emulator, &host).await.unwrap());

    let goals = host
        .sent()
        .iter()
        .filter(|m| matches!(m, ClientMessage::StatusUpdate { status: ClientStatus::Goal }))
        .count();
    assert_eq!(goals, 1);
    assert!(reconciler.state().goal_sent);
}

#[tokio::test]
async fn first_champion_battle_also_counts_as_goal() {
    let data = sample_snapshot();
    let (mut reconciler, emulator, _) = setup();
    let host = FakeHost::new([]);
    let start = data.constant("TRAINER_FLAGS_START").unwrap() as u32;
    let champion = data.constant("TRAINER_CHAMPION_FIRST_CHARMANDER").unwrap() as u32;
    emulator.set_flag(start + champion);

    let sent = completed(reconciler.poll(&emulator, &host).await.unwrap());
    assert!(sent.contains(&ClientMessage::StatusUpdate { status: ClientStatus::Goal }));
}

#[tokio::test]
async fn goal_is_not_sent_when_host_already_finished() {
    let (mut reconciler, emulator, _) = setup();
    let host = FakeHost::new([]);
    *host.finished.lock().unwrap() = true;
    emulator.set_flag(CHAMP_FLAG);

    let sent = completed(reconciler.poll(&emulator, &host).await.unwrap());
    assert!(!sent.iter().any(|m| matches!(m, ClientMessage::StatusUpdate { .. })));
}

#[tokio::test]
async fn next_item_is_written_once_into_an_empty_mailbox() {
    let (mut reconciler, emulator, layout) = setup();
    let host = FakeHost::new([]);
    *host.items.lock().unwrap() = vec![
        ReceivedItem { item: BASE_OFFSET + 4, player: 2, flags: 0 },
        ReceivedItem { item: BASE_OFFSET + 13, player: 2, flags: 0 },
        ReceivedItem { item: BASE_OFFSET + 349, player: 3, flags: 1 },
    ];
    emulator.set_received_count(2);

    let outcome = reconciler.poll(&emulator, &host).await.unwrap();
    let PollOutcome::Completed(report) = outcome else { panic!("poll did not complete") };
    assert_eq!(report.delivered_item, Some(349));

    let mailbox = layout.received_item;
    assert_eq!(emulator.peek(mailbox, 2), 349u16.to_le_bytes());
    assert_eq!(emulator.peek(mailbox + 2, 2), 3u16.to_le_bytes());
    assert_eq!(emulator.peek(mailbox + 4, 2), vec![1, 1]);

    // The game has not consumed the item yet, so nothing else goes out.
    let writes = emulator.write_count();
    completed(reconciler.poll(&emulator, &host).await.unwrap());
    assert_eq!(emulator.write_count(), writes);
}

#[tokio::test]
async fn own_items_are_announced_and_caught_up_mailbox_is_left_alone() {
    let (mut reconciler, emulator, layout) = setup();
    let host = FakeHost::new([]);
    *host.items.lock().unwrap() = vec![ReceivedItem { item: BASE_OFFSET + 13, player: 1, flags: 0 }];

    completed(reconciler.poll(&emulator, &host).await.unwrap());
    assert_eq!(emulator.peek(layout.received_item + 5, 1), vec![1]);

    // Game consumed it and bumped its counter.
    emulator.poke(layout.received_item + 4, &[0]);
    emulator.set_received_count(1);
    let writes = emulator.write_count();
    completed(reconciler.poll(&emulator, &host).await.unwrap());
    assert_eq!(emulator.write_count(), writes);
}

#[tokio::test]
async fn items_without_an_in_game_id_are_skipped_in_order() {
    let (mut reconciler, emulator, layout) = setup();
    let host = FakeHost::new([]);
    *host.items.lock().unwrap() = vec![
        ReceivedItem { item: 5, player: 2, flags: 0 },
        ReceivedItem { item: BASE_OFFSET + 13, player: 2, flags: 0 },
    ];

    let outcome = reconciler.poll(&emulator, &host).await.unwrap();
    let PollOutcome::Completed(report) = outcome else { panic!("poll did not complete") };
    assert_eq!(report.delivered_item, None);
    assert_eq!(emulator.peek(SAVE_BLOCK_1 + 0x3D88, 2), 1u16.to_le_bytes());
    assert_eq!(emulator.peek(layout.received_item + 4, 1), vec![0]);

    let outcome = reconciler.poll(&emulator, &host).await.unwrap();
    let PollOutcome::Completed(report) = outcome else { panic!("poll did not complete") };
    assert_eq!(report.delivered_item, Some(13));
    assert_eq!(emulator.peek(layout.received_item, 2), 13u16.to_le_bytes());
    assert_eq!(emulator.peek(layout.received_item + 2, 2), 2u16.to_le_bytes());
}

#[tokio::test]
async fn save_pointer_at_the_top_of_memory_abandons_the_poll() {
    let (mut reconciler, emulator, layout) = setup();
    let host = FakeHost::new([]);
    *host.items.lock().unwrap() = vec![ReceivedItem { item: BASE_OFFSET + 13, player: 2, flags: 0 }];
    emulator.poke(layout.save_block_1_ptr, &0xFFFF_FF00u32.to_le_bytes());

    assert_eq!(reconciler.poll(&emulator, &host).await.unwrap(), PollOutcome::Abandoned);
    assert_eq!(emulator.write_count(), 0);
    assert!(host.sent().is_empty());
}

#[tokio::test]
async fn leaving_the_overworld_abandons_the_poll() {
    let (mut reconciler, emulator, layout) = setup();
    let host = FakeHost::new([BASE_OFFSET + ROUTE1_POTION_FLAG]);
    *host.items.lock().unwrap() = vec![ReceivedItem { item: BASE_OFFSET + 13, player: 2, flags: 0 }];
    emulator.set_flag(ROUTE1_POTION_FLAG);
    emulator.leave_overworld(&layout);

    let outcome = reconciler.poll(&emulator, &host).await.unwrap();
    assert_eq!(outcome, PollOutcome::Abandoned);
    assert!(host.sent().is_empty());
    assert_eq!(emulator.write_count(), 0);
    assert!(reconciler.state().checked_locations.is_empty());
}

#[tokio::test]
async fn checked_locations_are_sent_when_they_change() {
    let (mut reconciler, emulator, _) = setup();
    let potion = BASE_OFFSET + ROUTE1_POTION_FLAG;
    let host = FakeHost::new([potion, BASE_OFFSET + 0x1A1]);
    emulator.set_flag(ROUTE1_POTION_FLAG);
    // Not a server location, so never reported.
    emulator.set_flag(0x1A2);

    let sent = completed(reconciler.poll(&emulator, &host).await.unwrap());
    assert!(sent.contains(&ClientMessage::LocationChecks { locations: vec![potion] }));

    let sent = completed(reconciler.poll(&emulator, &host).await.unwrap());
    assert!(sent.is_empty());
}

#[tokio::test]
async fn tracker_events_and_dex_count_are_stored_per_slot() {
    let (mut reconciler, emulator, _) = setup();
    let host = FakeHost::new([]);
    emulator.set_flag(BROCK_FLAG);
    emulator.set_caught(&[0b0000_0111]);

    let sent = completed(reconciler.poll(&emulator, &host).await.unwrap());
    assert_eq!(
        sent,
        vec![
            ClientMessage::Set {
                key: "pokemon_frlg_events_0_1".to_string(),
                default: 0,
                want_reply: false,
                operations: vec![DataStorageOperation { operation: SetOperation::Or, value: 1 }],
            },
            ClientMessage::Set {
                key: "pokemon_frlg_pokedex_0_1".to_string(),
                default: 0,
                want_reply: false,
                operations: vec![DataStorageOperation { operation: SetOperation::Replace, value: 3 }],
            },
        ]
    );
    assert_eq!(reconciler.state().caught_pokemon, 3);
}

#[tokio::test]
async fn slotless_host_gets_no_data_storage_updates() {
    let (mut reconciler, emulator, _) = setup();
    let mut host = FakeHost::new([]);
    host.slot = None;
    emulator.set_flag(BROCK_FLAG);
    emulator.set_caught(&[1]);

    let sent = completed(reconciler.poll(&emulator, &host).await.unwrap());
    assert!(sent.is_empty());
    assert!(reconciler.state().events.is_empty());
}

#[tokio::test]
async fn rejected_sends_are_retried_on_the_next_poll() {
    let (mut reconciler, emulator, _) = setup();
    let potion = BASE_OFFSET + ROUTE1_POTION_FLAG;
    let host = FakeHost::new([potion]);
    emulator.set_flag(ROUTE1_POTION_FLAG);

    *host.rejecting.lock().unwrap() = true;
    let result = reconciler.poll(&emulator, &host).await;
    assert!(matches!(result, Err(ClientError::Host(_))));
    assert!(reconciler.state().checked_locations.is_empty());

    *host.rejecting.lock().unwrap() = false;
    let sent = completed(reconciler.poll(&emulator, &host).await.unwrap());
    assert!(sent.contains(&ClientMessage::LocationChecks { locations: vec![potion] }));
}

#[tokio::test]
async fn host_that_is_not_ready_is_skipped() {
    let (mut reconciler, emulator, _) = setup();
    let mut host = FakeHost::new([]);
    host.ready = false;
    assert_eq!(reconciler.poll(&emulator, &host).await.unwrap(), PollOutcome::Skipped);
}
