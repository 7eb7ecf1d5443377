use std::sync::Arc;
use std::thread;

use assert_matches::assert_matches;
use dealease_demo::demo::integrity::find_violations;
use dealease_demo::test_utils::{memory_store, seeded_store};
use dealease_demo::{profile_for, DemoError, DemoSettings, DensityTier};
use parking_lot::Mutex;

#[test]
fn test_full_lifecycle() {
    let (store, storage) = memory_store();
    assert!(!store.is_active());

    store.init(DensityTier::Medium).unwrap();
    let stats = store.stats().unwrap();
    let profile = profile_for(DensityTier::Medium);
    assert_eq!(stats.total_buyers, profile.buyers);
    assert_eq!(stats.total_deals, profile.deals);
    assert_eq!(stats.active_deals + stats.completed_deals, stats.total_deals);

    let first = store.session().dataset.unwrap();
    store.reset().unwrap();
    let second = store.session().dataset.unwrap();
    assert_ne!(first, second, "reset produces a fresh dataset");
    assert_eq!(store.stats().unwrap().total_buyers, profile.buyers);

    store.exit().unwrap();
    assert!(!store.is_active());
    assert!(store.stats().is_none());
    assert_eq!(storage.write_count(), 3);
}

#[test]
fn test_settings_flags_default_true_on_init() {
    let (store, _) = memory_store();
    store.init(DensityTier::Light).unwrap();
    let settings = store.settings();
    assert!(settings.auto_generate_activity);
    assert!(settings.simulate_real_time);
    assert!(settings.enable_notifications);
}

#[test]
fn test_wrong_state_calls_are_no_ops() {
    let (store, storage) = memory_store();
    assert_matches!(store.exit(), Err(DemoError::InvalidState(_)));
    assert_matches!(store.reset(), Err(DemoError::InvalidState(_)));
    assert!(!store.is_active());

    store.init(DensityTier::Light).unwrap();
    let snapshot = store.snapshot();
    let err = store.init(DensityTier::Heavy).unwrap_err();
    assert!(err.is_no_op());
    assert_eq!(store.snapshot(), snapshot);
    assert_eq!(storage.write_count(), 1);
}

#[test]
fn test_seeded_stores_generate_identical_content() {
    let settings = DemoSettings { simulate_real_time: false, ..DemoSettings::for_tier(DensityTier::Medium) };
    let (a, _) = seeded_store();
    let (b, _) = seeded_store();
    a.init_with(settings).unwrap();
    b.init_with(settings).unwrap();
    assert_eq!(a.session(), b.session());
}

#[test]
fn test_generated_sessions_have_no_dangling_references() {
    let (store, _) = seeded_store();
    for tier in DensityTier::ALL {
        store.init(tier).unwrap();
        let dataset = store.session().dataset.unwrap();
        assert!(find_violations(&dataset).is_empty());
        store.exit().unwrap();
    }
}

#[test]
fn test_concurrent_init_and_exit_keep_invariant() {
    let (store, _) = memory_store();
    let handles: Vec<_> = (0..8)
        .map(|i| {
            let store = Arc::clone(&store);
            thread::spawn(move || {
                for _ in 0..10 {
                    let _ = if i % 2 == 0 { store.init(DensityTier::Light) } else { store.exit() };
                    let session = store.session();
                    assert_eq!(session.is_active, session.dataset.is_some());
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }
    let (session, stats) = store.snapshot();
    assert_eq!(session.is_active, stats.is_some());
}

#[test]
fn test_notifications_follow_transitions() {
    let (store, _) = memory_store();
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    store.subscribe(move |change| sink.lock().push(change.is_active_after()));

    store.init(DensityTier::Light).unwrap();
    let _ = store.init(DensityTier::Light);
    store.exit().unwrap();

    assert_eq!(*seen.lock(), vec![true, false]);
}
