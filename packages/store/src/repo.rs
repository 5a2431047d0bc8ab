//! # Repository — goal operations on an abstract user store
//!
//! [`Repository`] is the domain layer of the Goals API. It owns no data itself:
//! every read and write goes through the [`UserStore`] trait, so the same logic
//! runs against the in-memory store ([`crate::MemoryStore`]) and the PostgreSQL
//! store in the `api` crate.
//!
//! ## [`UserStore`] trait
//!
//! Five async document operations. Each mutating call must be atomic with
//! respect to the one user document it touches: implementations apply the
//! change inside the store (a lock, a single SQL statement) and never write
//! back a whole document read earlier. Two concurrent `push_goal` calls for the
//! same user therefore both land.
//!
//! | Method | Description |
//! |--------|-------------|
//! | `insert_user` | Insert a new user document, failing with [`StoreError::Duplicate`] on an existing email. |
//! | `find_user` | Look up a user by normalised email. |
//! | `push_goal` | Append a goal to the user's list. |
//! | `update_goal` | Apply a [`GoalUpdate`] to the goal with the given id and return the result. |
//! | `remove_goal` | Remove the goal with the given id and return it. |
//!
//! ## Repository
//!
//! | Method | Description |
//! |--------|-------------|
//! | [`sign_up`](Repository::sign_up) | Creates a user with an empty goal list. |
//! | [`user`](Repository::user) | Loads a user, mapping absence to [`StoreError::UserNotFound`]. |
//! | [`add_goal`](Repository::add_goal) | Builds a goal with a fresh [`GoalId`] and the current time, then appends it. |
//! | [`goals`](Repository::goals) / [`goal`](Repository::goal) | Read the whole list or a single goal by id. |
//! | [`update_goal`](Repository::update_goal) / [`delete_goal`](Repository::delete_goal) | Mutate a single goal by id. |

use std::future::Future;

use chrono::Utc;

use crate::error::StoreError;
use crate::models::{normalize_email, Goal, GoalId, GoalUpdate, NewGoal, User};

/// Async document operations over user records.
pub trait UserStore: Send + Sync {
    fn insert_user(&self, user: User) -> impl Future<Output = Result<(), StoreError>> + Send;

    fn find_user(
        &self,
        email: &str,
    ) -> impl Future<Output = Result<Option<User>, StoreError>> + Send;

    fn push_goal(
        &self,
        email: &str,
        goal: Goal,
    ) -> impl Future<Output = Result<(), StoreError>> + Send;

    fn update_goal(
        &self,
        email: &str,
        id: GoalId,
        update: GoalUpdate,
        now: chrono::DateTime<Utc>,
    ) -> impl Future<Output = Result<Goal, StoreError>> + Send;

    fn remove_goal(
        &self,
        email: &str,
        id: GoalId,
    ) -> impl Future<Output = Result<Goal, StoreError>> + Send;
}

/// Goal bookkeeping backed by a [`UserStore`].
#[derive(Clone, Debug)]
pub struct Repository<S: UserStore> {
    store: S,
}

impl<S: UserStore> Repository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Register a user. The caller hashes the password.
    pub async fn sign_up(&self, email: &str, password_hash: String) -> Result<User, StoreError> {
        let user = User::new(normalize_email(email), password_hash);
        self.store.insert_user(user.clone()).await?;
        Ok(user)
    }

    /// Find a user, if registered.
    pub async fn find_user(&self, email: &str) -> Result<Option<User>, StoreError> {
        self.store.find_user(&normalize_email(email)).await
    }

    /// Load a user that must exist.
    pub async fn user(&self, email: &str) -> Result<User, StoreError> {
        let email = normalize_email(email);
        let user = self.store.find_user(&email).await?;
        user.ok_or(StoreError::UserNotFound(email))
    }

    pub async fn add_goal(&self, email: &str, new_goal: NewGoal) -> Result<Goal, StoreError> {
        let goal = Goal::create(new_goal, Utc::now());
        self.store
            .push_goal(&normalize_email(email), goal.clone())
            .await?;
        Ok(goal)
    }

    /// All goals of a user, in insertion order.
    pub async fn goals(&self, email: &str) -> Result<Vec<Goal>, StoreError> {
        Ok(self.user(email).await?.goals)
    }

    pub async fn goal(&self, email: &str, id: GoalId) -> Result<Goal, StoreError> {
        self.user(email)
            .await?
            .goal(&id)
            .cloned()
            .ok_or(StoreError::GoalNotFound(id))
    }

    pub async fn update_goal(
        &self,
        email: &str,
        id: GoalId,
        update: GoalUpdate,
    ) -> Result<Goal, StoreError> {
        self.store
            .update_goal(&normalize_email(email), id, update, Utc::now())
            .await
    }

    pub async fn delete_goal(&self, email: &str, id: GoalId) -> Result<Goal, StoreError> {
        self.store.remove_goal(&normalize_email(email), id).await
    }
}
