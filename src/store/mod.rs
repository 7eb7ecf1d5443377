//! Demo session store.
//!
//! `SessionStore` owns the [`DemoSession`] and is its only mutator. It is a
//! two-state machine:
//!
//! | From     | Operation          | To       |
//! |----------|--------------------|----------|
//! | Inactive | `init`             | Active   |
//! | Active   | `reset`            | Active   |
//! | Active   | `exit`             | Inactive |
//! | any      | `export_demo_data` | unchanged |
//! | any      | `import_demo_data` | per payload |
//!
//! Requests made in the wrong state are rejected with
//! [`DemoError::InvalidState`] and change nothing. Every successful transition
//! ends with exactly one write of the session record to the storage backend.
//! Transitions are serialized by a single mutex held from generation through
//! persistence, so the activation flag and dataset presence never disagree.

pub mod events;
pub mod export;

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use log::{debug, info, warn};
use parking_lot::Mutex;

use crate::config::{Config, DEFAULT_EXPORT_PREFIX, DEFAULT_SESSION_KEY};
use crate::demo::{aggregate, profile_for, DatasetGenerator, DemoSession, DemoSettings, DemoStats};
use crate::error::{DemoError, Result};
use crate::storage::{create_storage_backend, SessionStorage};
use crate::types::DensityTier;

pub use events::{SessionChange, SubscriptionId};
pub use export::{export_file_name, ExportDocument, EXPORT_FORMAT_VERSION};

use events::Listener;

/// Options for opening a [`SessionStore`].
#[derive(Debug, Clone)]
pub struct StoreOptions {
    /// Key the session record is stored under
    pub session_key: String,
    /// Generator seed; `None` seeds from system entropy
    pub seed: Option<u64>,
    /// Settings remembered when no session has been persisted yet
    pub default_settings: DemoSettings,
    /// File name prefix for [`SessionStore::export_to_dir`]
    pub export_prefix: String,
    /// Whether exports are pretty-printed
    pub pretty_export: bool,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            session_key: DEFAULT_SESSION_KEY.to_string(),
            seed: None,
            default_settings: DemoSettings::default(),
            export_prefix: DEFAULT_EXPORT_PREFIX.to_string(),
            pretty_export: true,
        }
    }
}

impl StoreOptions {
    /// Options derived from the loaded configuration.
    pub fn from_config(config: &Config) -> Self {
        Self {
            session_key: config.storage.session_key.clone(),
            seed: config.demo.seed,
            default_settings: config.demo.default_settings(),
            export_prefix: config.export.file_prefix.clone(),
            pretty_export: config.export.pretty,
        }
    }
}

struct StoreState {
    session: DemoSession,
    stats: Option<DemoStats>,
    /// Set when the last persistence write failed
    dirty: bool,
    generator: DatasetGenerator,
}

/// Process-wide holder of the demo session.
///
/// Share it by `Arc`; all methods take `&self`.
pub struct SessionStore {
    storage: Arc<dyn SessionStorage>,
    options: StoreOptions,
    state: Mutex<StoreState>,
    listeners: Mutex<Vec<(SubscriptionId, Listener)>>,
    next_subscription: AtomicU64,
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.lock();
        f.debug_struct("SessionStore")
            .field("storage", &self.storage)
            .field("session_key", &self.options.session_key)
            .field("is_active", &state.session.is_active)
            .field("dirty", &state.dirty)
            .finish()
    }
}

impl SessionStore {
    /// Opens a store on `storage` with default options, rehydrating any
    /// persisted session.
    pub fn open(storage: Arc<dyn SessionStorage>) -> Result<Self> {
        Self::open_with(storage, StoreOptions::default())
    }

    /// Opens a store on `storage`, rehydrating the record under
    /// `options.session_key`.
    ///
    /// An absent record means an inactive session with
    /// `options.default_settings`. A persisted active session is restored with
    /// the same dataset and settings.
    ///
    /// # Errors
    ///
    /// [`DemoError::PersistenceFailure`] if the record cannot be read;
    /// [`DemoError::MalformedPayload`] if it cannot be decoded or fails validation.
    pub fn open_with(storage: Arc<dyn SessionStorage>, options: StoreOptions) -> Result<Self> {
        let session = match storage.read(&options.session_key)? {
            None => {
                debug!("No persisted demo session under '{}'", options.session_key);
                DemoSession::inactive(options.default_settings)
            }
            Some(record) => {
                let session: DemoSession = serde_json::from_str(&record).map_err(|e| {
                    DemoError::malformed(format!(
                        "persisted session under '{}' is unreadable: {}",
                        options.session_key, e
                    ))
                })?;
                session.validate()?;
                info!(
                    "Rehydrated demo session (active: {}, density: {})",
                    session.is_active, session.settings.data_density
                );
                session
            }
        };

        let generator = match options.seed {
            Some(seed) => DatasetGenerator::with_seed(seed),
            None => DatasetGenerator::new(),
        };

        Ok(Self {
            storage,
            state: Mutex::new(StoreState {
                stats: session.stats(),
                session,
                dirty: false,
                generator,
            }),
            options,
            listeners: Mutex::new(Vec::new()),
            next_subscription: AtomicU64::new(1),
        })
    }

    /// Creates the configured storage backend and opens a store on it.
    pub fn from_config(config: &Config) -> Result<Self> {
        let storage = create_storage_backend(&config.storage)?;
        Self::open_with(storage, StoreOptions::from_config(config))
    }

    /// Whether a demo sandbox is active.
    pub fn is_active(&self) -> bool {
        self.state.lock().session.is_active
    }

    /// A copy of the current session.
    pub fn session(&self) -> DemoSession {
        self.state.lock().session.clone()
    }

    /// Stats for the current dataset, `None` while inactive.
    pub fn stats(&self) -> Option<DemoStats> {
        self.state.lock().stats
    }

    /// Current (or last-known, while inactive) settings.
    pub fn settings(&self) -> DemoSettings {
        self.state.lock().session.settings
    }

    /// Session and stats read under one lock.
    pub fn snapshot(&self) -> (DemoSession, Option<DemoStats>) {
        let state = self.state.lock();
        (state.session.clone(), state.stats)
    }

    /// Whether the in-memory session has not been durably written since the
    /// last failed persistence attempt.
    pub fn needs_persist(&self) -> bool {
        self.state.lock().dirty
    }

    /// Activates a sandbox at `tier` with every flag enabled.
    pub fn init(&self, tier: DensityTier) -> Result<()> {
        self.init_with(DemoSettings::for_tier(tier))
    }

    /// Activates a sandbox for a tier named by a UI collaborator.
    ///
    /// # Errors
    ///
    /// [`DemoError::InvalidArgument`] for an unknown tier name.
    pub fn init_named(&self, tier: &str) -> Result<()> {
        self.init(DensityTier::parse(tier)?)
    }

    /// Activates a sandbox with explicit settings.
    ///
    /// # Errors
    ///
    /// [`DemoError::InvalidState`] if a session is already active;
    /// [`DemoError::PersistenceFailure`] if the session was activated in
    /// memory but could not be written.
    pub fn init_with(&self, settings: DemoSettings) -> Result<()> {
        self.transition(|state| {
            if state.session.is_active {
                return Err(DemoError::invalid_state(
                    "init requires an inactive session; call exit or reset instead",
                ));
            }
            regenerate(state, settings)?;
            info!("Demo mode activated at {} density", settings.data_density);
            Ok(SessionChange::Activated { density: settings.data_density })
        })
    }

    /// Regenerates the active sandbox with its current settings.
    ///
    /// # Errors
    ///
    /// [`DemoError::InvalidState`] if no session is active.
    pub fn reset(&self) -> Result<()> {
        self.reset_inner(None)
    }

    /// Regenerates the active sandbox with new settings.
    pub fn reset_with(&self, settings: DemoSettings) -> Result<()> {
        self.reset_inner(Some(settings))
    }

    fn reset_inner(&self, settings: Option<DemoSettings>) -> Result<()> {
        self.transition(|state| {
            if !state.session.is_active {
                return Err(DemoError::invalid_state("reset requires an active demo session"));
            }
            let settings = settings.unwrap_or(state.session.settings);
            regenerate(state, settings)?;
            info!("Demo data reset at {} density", settings.data_density);
            Ok(SessionChange::Reset { density: settings.data_density })
        })
    }

    /// Discards the sandbox and returns to the inactive state.
    ///
    /// # Errors
    ///
    /// [`DemoError::InvalidState`] if no session is active.
    pub fn exit(&self) -> Result<()> {
        self.transition(|state| {
            if !state.session.is_active {
                return Err(DemoError::invalid_state("exit requires an active demo session"));
            }
            state.session = DemoSession::inactive(state.session.settings);
            state.stats = None;
            info!("Demo mode exited; synthetic dataset discarded");
            Ok(SessionChange::Exited)
        })
    }

    /// Serializes the current session (settings, dataset and stats) as an
    /// export document. Read-only.
    pub fn export_demo_data(&self) -> Result<String> {
        let session = self.session();
        ExportDocument::new(&session, Utc::now())?.to_json(self.options.pretty_export)
    }

    /// Replaces the current session with the one in `payload`.
    ///
    /// # Errors
    ///
    /// [`DemoError::MalformedPayload`] if the payload fails any check, in which
    /// case the store is untouched.
    pub fn import_demo_data(&self, payload: &str) -> Result<()> {
        let doc = ExportDocument::parse(payload)?;
        self.transition(move |state| {
            let active = doc.session.is_active;
            state.stats = doc.session.stats();
            state.session = doc.session;
            info!("Imported demo session (active: {})", active);
            Ok(SessionChange::Imported { active })
        })
    }

    /// Writes an export to `dir` under a date-stamped file name and returns its path.
    pub fn export_to_dir<P: AsRef<Path>>(&self, dir: P) -> Result<PathBuf> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)?;
        let path = dir.join(export_file_name(&self.options.export_prefix, Utc::now().date_naive()));
        fs::write(&path, self.export_demo_data()?)?;
        info!("Exported demo data to {}", path.display());
        Ok(path)
    }

    /// Imports an export file written by [`SessionStore::export_to_dir`].
    pub fn import_from_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let payload = fs::read_to_string(path.as_ref())?;
        self.import_demo_data(&payload)
    }

    /// Retries writing the in-memory session to storage.
    pub fn persist(&self) -> Result<()> {
        let mut state = self.state.lock();
        self.write_session(&mut state)
    }

    /// Registers `listener` for change notifications.
    ///
    /// Listeners run on the thread that performed the transition, after the
    /// store's state lock is released, so they may read the store.
    pub fn subscribe<F>(&self, listener: F) -> SubscriptionId
    where
        F: Fn(&SessionChange) + Send + Sync + 'static,
    {
        let id = SubscriptionId(self.next_subscription.fetch_add(1, Ordering::Relaxed));
        self.listeners.lock().push((id, Arc::new(listener)));
        id
    }

    /// Removes a listener. Returns `false` if it was not registered.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut listeners = self.listeners.lock();
        let before = listeners.len();
        listeners.retain(|(sid, _)| *sid != id);
        listeners.len() != before
    }

    /// Runs `apply` under the state lock, persists, then notifies.
    ///
    /// If `apply` fails nothing was changed and nothing is written. If the
    /// write fails the in-memory change stands, the store is marked dirty,
    /// listeners are still notified and the persistence error is returned.
    fn transition<F>(&self, apply: F) -> Result<()>
    where
        F: FnOnce(&mut StoreState) -> Result<SessionChange>,
    {
        let (change, persisted) = {
            let mut state = self.state.lock();
            let change = apply(&mut state)?;
            let persisted = self.write_session(&mut state);
            (change, persisted)
        };
        self.notify(&change);
        persisted
    }

    fn write_session(&self, state: &mut StoreState) -> Result<()> {
        let result = serde_json::to_string(&state.session)
            .map_err(DemoError::from)
            .and_then(|record| self.storage.write(&self.options.session_key, &record));
        match result {
            Ok(()) => {
                state.dirty = false;
                Ok(())
            }
            Err(e) => {
                state.dirty = true;
                warn!("Demo session not persisted; in-memory state remains authoritative: {}", e);
                Err(match e {
                    DemoError::PersistenceFailure(_) => e,
                    other => DemoError::persistence(other.to_string()),
                })
            }
        }
    }

    fn notify(&self, change: &SessionChange) {
        let listeners: Vec<Listener> = self.listeners.lock().iter().map(|(_, l)| Arc::clone(l)).collect();
        debug!("Notifying {} listener(s) of {:?}", listeners.len(), change);
        for listener in listeners {
            listener(change);
        }
    }
}

/// Generates a fresh dataset for `settings` and installs it in `state`.
///
/// Generation completes before anything is replaced, so a failure leaves the
/// previous session intact.
fn regenerate(state: &mut StoreState, settings: DemoSettings) -> Result<()> {
    let profile = profile_for(settings.data_density);
    let dataset = state.generator.generate(&profile, &settings)?;
    state.stats = Some(aggregate(&dataset));
    state.session = DemoSession::active(settings, dataset);
    Ok(())
}
