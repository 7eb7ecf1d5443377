use std::sync::Arc;

use crate::types::DensityTier;

/// A state change emitted by the session store after a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionChange {
    /// `init` activated a sandbox at `density`.
    Activated { density: DensityTier },
    /// `reset` regenerated the active sandbox at `density`.
    Reset { density: DensityTier },
    /// `exit` discarded the sandbox. Any demo-derived UI state must be abandoned.
    Exited,
    /// An import replaced the session; `active` tells which state it landed in.
    Imported { active: bool },
}

impl SessionChange {
    /// Whether the session is active after this change.
    pub fn is_active_after(&self) -> bool {
        match self {
            SessionChange::Activated { .. } | SessionChange::Reset { .. } => true,
            SessionChange::Exited => false,
            SessionChange::Imported { active } => *active,
        }
    }
}

/// Handle returned by `subscribe`, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(pub(crate) u64);

pub(crate) type Listener = Arc<dyn Fn(&SessionChange) + Send + Sync>;
