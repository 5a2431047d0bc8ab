use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{DateTime, Utc};

use crate::error::StoreError;
use crate::models::{Goal, GoalId, GoalUpdate, User};
use crate::repo::UserStore;

/// In-memory UserStore for tests and database-less runs.
///
/// Each operation does its lookup and mutation under a single lock, which is
/// what makes concurrent writers to the same user safe.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    users: Arc<Mutex<HashMap<String, User>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn users(&self) -> Result<MutexGuard<'_, HashMap<String, User>>, StoreError> {
        self.users
            .lock()
            .map_err(|e| StoreError::Backend(e.to_string()))
    }
}

impl UserStore for MemoryStore {
    async fn insert_user(&self, user: User) -> Result<(), StoreError> {
        let mut users = self.users()?;
        if users.contains_key(&user.email) {
            return Err(StoreError::Duplicate(user.email));
        }
        users.insert(user.email.clone(), user);
        Ok(())
    }

    async fn find_user(&self, email: &str) -> Result<Option<User>, StoreError> {
        Ok(self.users()?.get(email).cloned())
    }

    async fn push_goal(&self, email: &str, goal: Goal) -> Result<(), StoreError> {
        let mut users = self.users()?;
        let user = users
            .get_mut(email)
            .ok_or_else(|| StoreError::UserNotFound(email.to_string()))?;
        user.goals.push(goal);
        Ok(())
    }

    async fn update_goal(
        &self,
        email: &str,
        id: GoalId,
        update: GoalUpdate,
        now: DateTime<Utc>,
    ) -> Result<Goal, StoreError> {
        let mut users = self.users()?;
        let user = users
            .get_mut(email)
            .ok_or_else(|| StoreError::UserNotFound(email.to_string()))?;
        let goal = user.goal_mut(&id).ok_or(StoreError::GoalNotFound(id))?;
        goal.apply(update, now);
        Ok(goal.clone())
    }

    async fn remove_goal(&self, email: &str, id: GoalId) -> Result<Goal, StoreError> {
        let mut users = self.users()?;
        let user = users
            .get_mut(email)
            .ok_or_else(|| StoreError::UserNotFound(email.to_string()))?;
        user.remove_goal(&id).ok_or(StoreError::GoalNotFound(id))
    }
}
