use std::time::{SystemTime, UNIX_EPOCH};

use backroom::{
    core::{
        fixtures::{sample_draft, seed_listings},
        store::{ListingStore, StoreError, StoreOptions},
    },
    listing::DraftError,
    persist::{DEFAULT_SLOT_KEY, PersistError, Slot, encode_listings, memory::MemorySlot},
    runtime::latency::LatencyProfile,
};

fn wall_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_millis() as u64
}

fn fast() -> StoreOptions {
    StoreOptions {
        latency: LatencyProfile::immediate(),
        ..StoreOptions::default()
    }
}

#[tokio::test]
async fn empty_slot_is_seeded_once() {
    let slot = MemorySlot::new();
    let mut store = ListingStore::open(slot.clone(), fast());

    let first = store.get_listings().await.expect("first load");
    assert_eq!(first, seed_listings());
    assert_eq!(slot.len(), 1);

    let second = store.get_listings().await.expect("second load");
    assert_eq!(second, first);
}

#[tokio::test]
async fn add_prepends_and_persists_whole_collection() {
    let slot = MemorySlot::new();
    let mut store = ListingStore::open(slot.clone(), fast());
    let before = store.get_listings().await.expect("load").len();

    let t0 = wall_ms();
    let listing = store
        .add_listing(sample_draft("Orlando East Room", 1300))
        .await
        .expect("add");
    let t1 = wall_ms();

    assert!(!listing.id.is_empty());
    assert_eq!(listing.id, listing.created_at.to_string());
    assert!(listing.created_at >= t0 && listing.created_at <= t1 + 1);

    // A fresh store over the same slot sees the write.
    let mut reopened = ListingStore::open(slot, fast());
    let after = reopened.get_listings().await.expect("reload");
    assert_eq!(after.len(), before + 1);
    assert_eq!(after[0], listing);
    assert_eq!(&after[1..], &seed_listings()[..]);
}

#[tokio::test]
async fn first_add_on_empty_slot_builds_on_seed() {
    let mut store = ListingStore::open(MemorySlot::new(), fast());
    let listing = store
        .add_listing(sample_draft("Seedless", 800))
        .await
        .expect("add");
    let all = store.get_listings().await.expect("load");
    assert_eq!(all.len(), seed_listings().len() + 1);
    assert_eq!(all[0].id, listing.id);
}

#[tokio::test(start_paused = true)]
async fn simulated_latency_delays_each_call() {
    let mut store = ListingStore::open(MemorySlot::new(), StoreOptions::default());

    let start = tokio::time::Instant::now();
    store.get_listings().await.expect("load");
    assert!(start.elapsed() >= std::time::Duration::from_millis(800));

    let start = tokio::time::Instant::now();
    store
        .add_listing(sample_draft("Slow Room", 1000))
        .await
        .expect("add");
    // Add waits its own delay and then the read delay.
    assert!(start.elapsed() >= std::time::Duration::from_millis(2300));
}

#[tokio::test]
async fn invalid_draft_writes_nothing() {
    let slot = MemorySlot::new();
    let mut store = ListingStore::open(slot.clone(), fast());

    let mut draft = sample_draft("", 1000);
    draft.title = "   ".to_string();
    let err = store.add_listing(draft).await.expect_err("blank title");
    assert!(matches!(
        err,
        StoreError::InvalidDraft(DraftError::MissingTitle)
    ));
    assert!(slot.is_empty());
}

#[tokio::test]
async fn corrupt_payload_surfaces_and_is_left_alone() {
    let mut slot = MemorySlot::new();
    slot.write(DEFAULT_SLOT_KEY, b"{oops").expect("write");
    let mut store = ListingStore::open(slot.clone(), fast());

    let err = store.get_listings().await.expect_err("decode");
    assert!(matches!(err, StoreError::Persist(PersistError::Serde(_))));

    let err = store
        .add_listing(sample_draft("Never Stored", 1000))
        .await
        .expect_err("add over corrupt slot");
    assert!(matches!(err, StoreError::Persist(_)));

    let mut probe = slot;
    assert_eq!(
        probe.read(DEFAULT_SLOT_KEY).expect("read").as_deref(),
        Some(&b"{oops"[..])
    );
}

#[tokio::test]
async fn legacy_bare_array_is_read_and_upgraded_on_write() {
    let mut slot = MemorySlot::new();
    let legacy = serde_json::to_vec(&seed_listings()).expect("encode");
    slot.write(DEFAULT_SLOT_KEY, &legacy).expect("write");

    let mut store = ListingStore::open(slot.clone(), fast());
    assert_eq!(store.get_listings().await.expect("load"), seed_listings());

    store
        .add_listing(sample_draft("Upgraded", 1100))
        .await
        .expect("add");

    let mut probe = slot;
    let raw = probe.read(DEFAULT_SLOT_KEY).expect("read").expect("present");
    let value: serde_json::Value = serde_json::from_slice(&raw).expect("json");
    assert_eq!(value["format_version"], 1);
    assert_eq!(
        value["listings"].as_array().map(Vec::len),
        Some(seed_listings().len() + 1)
    );
}

#[tokio::test(start_paused = true)]
async fn interleaved_stores_on_one_slot_keep_both_records() {
    let slot = MemorySlot::new();
    let mut a = ListingStore::open(slot.clone(), StoreOptions::default());
    let mut b = ListingStore::open(slot.clone(), StoreOptions::default());
    a.get_listings().await.expect("seed");

    let (ra, rb) = tokio::join!(
        a.add_listing(sample_draft("From A", 1000)),
        b.add_listing(sample_draft("From B", 1200)),
    );
    let (la, lb) = (ra.expect("a"), rb.expect("b"));
    assert_ne!(la.id, lb.id);

    let mut reader = ListingStore::open(slot, fast());
    let all = reader.get_listings().await.expect("load");
    assert_eq!(all.len(), seed_listings().len() + 2);
    assert!(all.iter().any(|l| l.id == la.id));
    assert!(all.iter().any(|l| l.id == lb.id));
}

#[tokio::test]
async fn custom_seed_and_key_are_honoured() {
    let mut slot = MemorySlot::new();
    let opts = StoreOptions {
        slot_key: "other_key".to_string(),
        seed: Vec::new(),
        latency: LatencyProfile::immediate(),
    };
    let mut store = ListingStore::open(slot.clone(), opts);
    assert!(store.get_listings().await.expect("load").is_empty());

    let stored = slot.read("other_key").expect("read").expect("seeded");
    assert_eq!(stored, encode_listings(&[]).expect("encode"));
    assert!(slot.read(DEFAULT_SLOT_KEY).expect("read").is_none());

    let returned = store.close().expect("close");
    assert_eq!(returned.len(), 1);
}
