//! Lifecycle states and the vocabulary that validates them.

/// State a task starts in when none is given.
pub const DEFAULT_STATE: &str = "Por Hacer";

/// The labels the board knows out of the box: To Do / In Progress / Done.
pub const KNOWN_STATES: [&str; 3] = ["Por Hacer", "En Progreso", "Hecho"];

pub(crate) fn default_state() -> String {
    DEFAULT_STATE.to_string()
}

/// Which state labels a store accepts.
///
/// Whether the state set is open or closed is a deliberate configuration
/// choice of the store, not a hardcoded constant:
/// - `Open`: any non-empty label is fine (free-form workflows).
/// - `Closed`: the label must be one of the listed ones.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StateVocabulary {
    Open,
    Closed(Vec<String>),
}

impl StateVocabulary {
    /// Closed vocabulary over the three known labels.
    pub fn known() -> Self {
        Self::Closed(KNOWN_STATES.iter().map(|s| s.to_string()).collect())
    }

    pub fn allows(&self, label: &str) -> bool {
        match self {
            Self::Open => true,
            Self::Closed(labels) => labels.iter().any(|l| l == label),
        }
    }
}

impl Default for StateVocabulary {
    fn default() -> Self {
        Self::known()
    }
}
