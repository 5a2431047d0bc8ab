pub mod error;
pub mod models;
pub mod repo;

mod memory;
pub use memory::MemoryStore;

pub use error::StoreError;
pub use models::{normalize_email, Goal, GoalId, GoalUpdate, NewGoal, User};
pub use repo::{Repository, UserStore};
