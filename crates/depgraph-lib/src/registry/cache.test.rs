// Tests for the descriptor cache

use super::*;
use indexmap::IndexMap;

const TTL: Duration = Duration::from_secs(600);

fn descriptor(name: &str, version: &str) -> PackageDescriptor {
    PackageDescriptor {
        name: name.to_string(),
        latest_version: Some(version.to_string()),
        dependencies: IndexMap::new(),
    }
}

fn manual_cache() -> (DescriptorCache, ManualClock) {
    let clock = ManualClock::new();
    let cache = DescriptorCache::with_clock(TTL, clock.clone());
    (cache, clock)
}

#[tokio::test]
async fn test_fresh_entry_hit() {
    let (cache, _clock) = manual_cache();
    cache.insert(descriptor("react", "18.2.0")).await;

    let hit = cache.get("react").await.unwrap();
    assert_eq!(hit.name, "react");
    assert_eq!(hit.resolved_version(), "18.2.0");
}

#[tokio::test]
async fn test_unknown_name_miss() {
    let (cache, _clock) = manual_cache();
    assert!(cache.get("nonexistent").await.is_none());
}

#[tokio::test]
async fn test_entry_expires_exactly_at_ttl() {
    let (cache, clock) = manual_cache();
    cache.insert(descriptor("react", "18.2.0")).await;

    // Validity is strict: now - stored_at < ttl
    clock.advance(TTL - Duration::from_millis(1));
    assert!(cache.get("react").await.is_some());

    clock.advance(Duration::from_millis(1));
    assert!(cache.get("react").await.is_none());
}

#[tokio::test]
async fn test_expired_lookup_evicts() {
    let (cache, clock) = manual_cache();
    cache.insert(descriptor("a", "1.0.0")).await;
    cache.insert(descriptor("b", "2.0.0")).await;
    assert_eq!(cache.len().await, 2);

    clock.advance(TTL);
    assert!(cache.get("a").await.is_none());

    // Only the looked-up entry is evicted; "b" stays until someone asks
    assert_eq!(cache.len().await, 1);
}

#[tokio::test]
async fn test_reinsert_restamps_entry() {
    let (cache, clock) = manual_cache();
    cache.insert(descriptor("react", "18.2.0")).await;

    clock.advance(Duration::from_secs(480));
    cache.insert(descriptor("react", "18.3.0")).await;

    // 480s past the original stamp but only 360s past the restamp
    clock.advance(Duration::from_secs(360));
    let hit = cache.get("react").await.unwrap();
    assert_eq!(hit.resolved_version(), "18.3.0");
}

#[tokio::test]
async fn test_insert_overwrites_value() {
    let (cache, _clock) = manual_cache();
    cache.insert(descriptor("react", "18.2.0")).await;
    cache.insert(descriptor("react", "19.0.0")).await;

    assert_eq!(cache.len().await, 1);
    let hit = cache.get("react").await.unwrap();
    assert_eq!(hit.resolved_version(), "19.0.0");
}

#[tokio::test]
async fn test_clear_drops_everything() {
    let (cache, _clock) = manual_cache();
    cache.insert(descriptor("a", "1.0.0")).await;
    cache.insert(descriptor("b", "2.0.0")).await;

    cache.clear().await;
    assert!(cache.is_empty().await);
    assert!(cache.get("a").await.is_none());
}

#[tokio::test]
async fn test_concurrent_access() {
    let cache = Arc::new(DescriptorCache::with_ttl(TTL));

    let mut tasks = Vec::new();
    for i in 0..8 {
        let cache = cache.clone();
        tasks.push(tokio::spawn(async move {
            let name = format!("pkg-{}", i);
            cache.insert(descriptor(&name, "1.0.0")).await;
            cache.get(&name).await
        }));
    }

    for task in tasks {
        assert!(task.await.unwrap().is_some());
    }
    assert_eq!(cache.len().await, 8);
}

#[test]
fn test_manual_clock_clones_share_offset() {
    let clock = ManualClock::new();
    let observer = clock.clone();

    let before = observer.now();
    clock.advance(Duration::from_secs(5));
    assert_eq!(observer.now().duration_since(before), Duration::from_secs(5));
}
