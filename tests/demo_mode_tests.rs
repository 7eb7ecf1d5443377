use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use dealease_demo::test_utils::memory_store;
use dealease_demo::{DemoMode, DensityTier};

#[test]
fn test_facade_mirrors_store_through_lifecycle() {
    let (store, _) = memory_store();
    let demo = DemoMode::new(Arc::clone(&store));
    assert!(!demo.is_active());

    demo.init(DensityTier::Medium).unwrap();
    assert!(demo.is_demo());
    assert_eq!(demo.data(), Some(store.session()));
    assert_eq!(demo.stats(), store.stats());

    demo.reset().unwrap();
    assert_eq!(demo.data(), Some(store.session()));

    demo.exit().unwrap();
    assert_eq!(demo.data(), None);
    assert_eq!(demo.stats(), None);
}

#[test]
fn test_facade_sees_imports() {
    let (source, _) = memory_store();
    source.init(DensityTier::Heavy).unwrap();
    let payload = source.export_demo_data().unwrap();

    let (store, _) = memory_store();
    let demo = DemoMode::new(Arc::clone(&store));
    let renders = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&renders);
    demo.subscribe(move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
    });

    store.import_demo_data(&payload).unwrap();
    assert!(demo.is_active());
    assert_eq!(demo.stats().unwrap().total_buyers, 20);
    assert_eq!(renders.load(Ordering::SeqCst), 1);
}

#[test]
fn test_two_facades_share_one_store() {
    let (store, _) = memory_store();
    let a = DemoMode::new(Arc::clone(&store));
    let b = DemoMode::new(Arc::clone(&store));
    a.init(DensityTier::Light).unwrap();
    assert!(b.is_active());
    assert_eq!(a.data(), b.data());
    drop(a);
    b.exit().unwrap();
    assert!(!b.is_active());
}
