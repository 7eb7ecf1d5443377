//! Read accessor over the session store for UI collaborators.
//!
//! [`DemoMode`] keeps a cached view of the store (activation flag, session and
//! stats) that is re-derived whenever the store emits a change. It performs no
//! generation or validation of its own; lifecycle calls are forwarded.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};

use log::trace;
use parking_lot::{Mutex, RwLock};

use crate::demo::{DemoSession, DemoStats};
use crate::error::Result;
use crate::store::{SessionChange, SessionStore, SubscriptionId};
use crate::types::DensityTier;

type ViewListener = Arc<dyn Fn(&DemoView) + Send + Sync>;

/// Snapshot of the store as seen by the facade.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DemoView {
    /// Whether a sandbox is active
    pub is_active: bool,
    /// The session, present while active
    pub data: Option<DemoSession>,
    /// Stats for `data`, present while active
    pub stats: Option<DemoStats>,
    /// Increments on every re-derivation
    pub revision: u64,
}

impl DemoView {
    fn derive(store: &SessionStore, revision: u64) -> Self {
        let (session, stats) = store.snapshot();
        let is_active = session.is_active;
        Self {
            is_active,
            data: is_active.then_some(session),
            stats,
            revision,
        }
    }
}

struct Shared {
    view: RwLock<DemoView>,
    subscribers: Mutex<Vec<(SubscriptionId, ViewListener)>>,
    next_subscriber: AtomicU64,
}

impl Shared {
    /// Re-derives the view from `store` without bumping the revision.
    fn resync(&self, store: &SessionStore) {
        let mut guard = self.view.write();
        *guard = DemoView::derive(store, guard.revision);
    }

    fn refresh(&self, store: &SessionStore) -> DemoView {
        let view = {
            let mut guard = self.view.write();
            *guard = DemoView::derive(store, guard.revision + 1);
            guard.clone()
        };
        let subscribers: Vec<ViewListener> =
            self.subscribers.lock().iter().map(|(_, s)| Arc::clone(s)).collect();
        for subscriber in subscribers {
            subscriber(&view);
        }
        view
    }
}

/// Demo mode accessor bound to one [`SessionStore`].
pub struct DemoMode {
    store: Arc<SessionStore>,
    shared: Arc<Shared>,
    store_subscription: SubscriptionId,
}

impl std::fmt::Debug for DemoMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DemoMode")
            .field("is_active", &self.is_active())
            .field("revision", &self.shared.view.read().revision)
            .finish()
    }
}

impl DemoMode {
    /// Binds a facade to `store` and derives the initial view.
    pub fn new(store: Arc<SessionStore>) -> Self {
        let shared = Arc::new(Shared {
            view: RwLock::new(DemoView::derive(&store, 0)),
            subscribers: Mutex::new(Vec::new()),
            next_subscriber: AtomicU64::new(1),
        });

        let weak_store: Weak<SessionStore> = Arc::downgrade(&store);
        let weak_shared: Weak<Shared> = Arc::downgrade(&shared);
        let store_subscription = store.subscribe(move |change: &SessionChange| {
            if let (Some(store), Some(shared)) = (weak_store.upgrade(), weak_shared.upgrade()) {
                trace!("Demo view re-derived after {:?}", change);
                shared.refresh(&store);
            }
        });

        // Catch transitions that landed before the subscription.
        shared.resync(&store);

        Self { store, shared, store_subscription }
    }

    /// Whether a sandbox is active.
    pub fn is_active(&self) -> bool {
        self.shared.view.read().is_active
    }

    /// Flag-only projection of [`DemoMode::is_active`].
    pub fn is_demo(&self) -> bool {
        self.is_active()
    }

    /// The active session, `None` while inactive.
    pub fn data(&self) -> Option<DemoSession> {
        self.shared.view.read().data.clone()
    }

    /// Stats for the active session.
    pub fn stats(&self) -> Option<DemoStats> {
        self.shared.view.read().stats
    }

    /// The full cached view.
    pub fn view(&self) -> DemoView {
        self.shared.view.read().clone()
    }

    /// The underlying store.
    pub fn store(&self) -> &Arc<SessionStore> {
        &self.store
    }

    /// Forwards to [`SessionStore::init`].
    pub fn init(&self, tier: DensityTier) -> Result<()> {
        self.store.init(tier)
    }

    /// Forwards to [`SessionStore::exit`].
    pub fn exit(&self) -> Result<()> {
        self.store.exit()
    }

    /// Forwards to [`SessionStore::reset`].
    pub fn reset(&self) -> Result<()> {
        self.store.reset()
    }

    /// Registers `callback` to receive the re-derived view after every store
    /// change. Returns a handle for [`DemoMode::unsubscribe`].
    pub fn subscribe<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&DemoView) + Send + Sync + 'static,
    {
        let id = SubscriptionId(self.shared.next_subscriber.fetch_add(1, Ordering::Relaxed));
        self.shared.subscribers.lock().push((id, Arc::new(callback)));
        id
    }

    /// Removes a subscriber. Returns `false` if it was not registered.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut subscribers = self.shared.subscribers.lock();
        let before = subscribers.len();
        subscribers.retain(|(sid, _)| *sid != id);
        subscribers.len() != before
    }
}

impl Drop for DemoMode {
    fn drop(&mut self) {
        self.store.unsubscribe(self.store_subscription);
    }
}
