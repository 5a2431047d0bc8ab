use thiserror::Error;

use crate::models::GoalId;

/// Errors returned by a [`crate::UserStore`].
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("A user with email {0} already exists")]
    Duplicate(String),

    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("Goal not found: {0}")]
    GoalNotFound(GoalId),

    #[error("Storage backend error: {0}")]
    Backend(String),
}
