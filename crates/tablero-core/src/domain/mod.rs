//! Domain model (IDs, tasks, lifecycle states, errors).

pub mod errors;
pub mod ids;
pub mod state;
pub mod task;

pub use errors::BoardError;
pub use ids::TaskId;
pub use state::{DEFAULT_STATE, KNOWN_STATES, StateVocabulary};
pub use task::{Task, TaskPatch};
