//! Integration tests against a live Redis.
//!
//! These need a running server (`redis-server` on 127.0.0.1:6379) and are
//! ignored by default:
//!
//! ```sh
//! cargo test -p abfahrt-store -- --ignored
//! ```

use std::time::Duration;

use abfahrt_store::{ReadCursor, Store, StoreConfig};

async fn drain(cursor: &mut ReadCursor) -> Vec<String> {
    let mut seen = Vec::new();
    loop {
        let batch = cursor.next_batch().await.unwrap();
        if batch.is_empty() {
            break;
        }
        seen.extend(batch.into_iter().map(|e| e.payload));
    }
    seen
}

fn test_config(stream_key: &str) -> StoreConfig {
    StoreConfig::localhost()
        .with_stream_key(format!("abfahrt-test-{}-{}", stream_key, std::process::id()))
        .with_max_log_len(200)
        .with_read_batch(10)
        .with_block_timeout(Duration::from_millis(200))
}

fn parse_entry_id(id: &str) -> (u64, u64) {
    let (ms, seq) = id.split_once('-').expect("stream id has two parts");
    (ms.parse().unwrap(), seq.parse().unwrap())
}

#[tokio::test]
#[ignore = "requires a running Redis at 127.0.0.1:6379"]
async fn retention_stays_near_cap_with_increasing_ids() {
    let store = Store::connect(test_config("retention")).await.unwrap();

    let mut last_id = (0, 0);
    for i in 0..250 {
        let id = store.append(&format!("{{\"n\":{i}}}")).await.unwrap();
        let id = parse_entry_id(&id);
        assert!(id > last_id, "entry ids must be strictly increasing");
        last_id = id;
    }

    // MAXLEN ~ trims at node granularity, so allow some slack over 200.
    let len = store.log_len().await.unwrap();
    assert!(len >= 200, "retained length {len} fell below the cap");
    assert!(len < 250, "retained length {len} was never trimmed");
}

#[tokio::test]
#[ignore = "requires a running Redis at 127.0.0.1:6379"]
async fn late_cursor_sees_retained_history_before_new_entries() {
    let store = Store::connect(test_config("history")).await.unwrap();

    for i in 0..250 {
        store.append(&format!("{{\"n\":{i}}}")).await.unwrap();
    }

    let mut cursor = store.create_cursor().await.unwrap();
    store.append("{\"n\":\"after-connect\"}").await.unwrap();

    let mut payloads = Vec::new();
    loop {
        let batch = cursor.next_batch().await.unwrap();
        if batch.is_empty() {
            break;
        }
        payloads.extend(batch.into_iter().map(|e| e.payload));
    }

    // At least the retained tail of history arrives, and it arrives before
    // the post-connect append.
    assert!(payloads.len() > 200);
    assert_eq!(payloads.last().unwrap(), "{\"n\":\"after-connect\"}");
    assert!(payloads.contains(&"{\"n\":249}".to_string()));
}

#[tokio::test]
#[ignore = "requires a running Redis at 127.0.0.1:6379"]
async fn concurrent_cursors_are_isolated_and_ordered() {
    let store = Store::connect(test_config("isolation")).await.unwrap();

    let mut first = store.create_cursor().await.unwrap();
    let mut second = store.create_cursor().await.unwrap();
    assert_ne!(first.group(), second.group());

    for i in 0..25 {
        store.append(&format!("{{\"n\":{i}}}")).await.unwrap();
    }

    let seen_first = drain(&mut first).await;
    let seen_second = drain(&mut second).await;

    // Both receive every entry appended after they connected, in the same
    // relative order; one cursor's progress never affects the other.
    assert_eq!(seen_first.len(), 25);
    assert_eq!(seen_first, seen_second);
}

#[tokio::test]
#[ignore = "requires a running Redis at 127.0.0.1:6379"]
async fn empty_read_times_out_as_heartbeat() {
    let store = Store::connect(test_config("heartbeat")).await.unwrap();
    store.append("{}").await.unwrap();

    let mut cursor = store.create_cursor().await.unwrap();
    assert_eq!(cursor.next_batch().await.unwrap().len(), 1);

    // Nothing new: the blocking read returns an empty batch, not an error.
    let batch = cursor.next_batch().await.unwrap();
    assert!(batch.is_empty());
}
