//! # Domain models for users and their goals
//!
//! A [`User`] is a single document: credentials plus an ordered list of
//! [`Goal`]s embedded inline. Goals never live outside their owner's document,
//! so every goal operation is addressed by `(email, GoalId)`.
//!
//! ## Types
//!
//! | Struct | Represents |
//! |--------|-----------|
//! | [`User`] | The stored document. Keyed by its normalised `email`. |
//! | [`Goal`] | One embedded goal. Its [`GoalId`] is assigned at creation and never changes, so deleting a sibling does not shift its address. |
//! | [`NewGoal`] | Caller input for appending a goal. The server fills in id, date and `completed`. |
//! | [`GoalUpdate`] | Caller input for overwriting a goal's mutable fields. |
//!
//! All types are `Serialize + Deserialize`; the same serde shape is used on the
//! wire and inside the PostgreSQL `goals` JSONB column.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier of a goal inside its user's document.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GoalId(Uuid);

impl GoalId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for GoalId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for GoalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

impl FromStr for GoalId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim()).map(Self)
    }
}

/// A goal embedded in a user document.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    pub id: GoalId,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Set when the goal is created and refreshed by every update.
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub completed: bool,
}

impl Goal {
    /// Build a fresh, not yet completed goal dated `now`.
    pub fn create(new_goal: NewGoal, now: DateTime<Utc>) -> Self {
        Self {
            id: GoalId::new(),
            title: new_goal.title,
            description: new_goal.description,
            date: now,
            completed: false,
        }
    }

    /// Overwrite the mutable fields. Omitted optional fields keep their value.
    pub fn apply(&mut self, update: GoalUpdate, now: DateTime<Utc>) {
        self.title = update.title;
        if let Some(description) = update.description {
            self.description = Some(description);
        }
        if let Some(completed) = update.completed {
            self.completed = completed;
        }
        self.date = now;
    }
}

/// Input for appending a goal.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NewGoal {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Input for updating a goal.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GoalUpdate {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub completed: Option<bool>,
}

/// A registered user and their embedded goals.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    /// Trimmed, lower-cased address. Unique across the store.
    pub email: String,
    /// Argon2id PHC string.
    pub password_hash: String,
    #[serde(default)]
    pub goals: Vec<Goal>,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// A new user with no goals.
    pub fn new(email: impl Into<String>, password_hash: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            email: email.into(),
            password_hash: password_hash.into(),
            goals: Vec::new(),
            created_at: Utc::now(),
        }
    }

    pub fn goal(&self, id: &GoalId) -> Option<&Goal> {
        self.goals.iter().find(|g| &g.id == id)
    }

    pub fn goal_mut(&mut self, id: &GoalId) -> Option<&mut Goal> {
        self.goals.iter_mut().find(|g| &g.id == id)
    }

    /// Remove the goal with `id`, keeping the order of the rest.
    pub fn remove_goal(&mut self, id: &GoalId) -> Option<Goal> {
        let pos = self.goals.iter().position(|g| &g.id == id)?;
        Some(self.goals.remove(pos))
    }
}

/// Normalise an email address for lookup and storage.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_goal_id_parse_and_display() {
        let id = GoalId::new();
        let parsed: GoalId = id.to_string().parse().unwrap();
        assert_eq!(parsed, id);
        assert!("3".parse::<GoalId>().is_err());
    }

    #[test]
    fn test_goal_serializes_id_as_string() {
        let goal = Goal::create(
            NewGoal {
                title: "Run".to_string(),
                description: None,
            },
            Utc::now(),
        );
        let value = serde_json::to_value(&goal).unwrap();
        assert_eq!(value["id"], serde_json::json!(goal.id.to_string()));
        assert_eq!(value["completed"], serde_json::json!(false));
    }

    #[test]
    fn test_apply_keeps_omitted_fields() {
        let created = Utc::now();
        let mut goal = Goal::create(
            NewGoal {
                title: "Read".to_string(),
                description: Some("Two books".to_string()),
            },
            created,
        );
        goal.completed = true;

        let later = created + chrono::Duration::seconds(5);
        goal.apply(
            GoalUpdate {
                title: "Read more".to_string(),
                description: None,
                completed: None,
            },
            later,
        );

        assert_eq!(goal.title, "Read more");
        assert_eq!(goal.description.as_deref(), Some("Two books"));
        assert!(goal.completed);
        assert_eq!(goal.date, later);
    }

    #[test]
    fn test_remove_goal_preserves_order() {
        let mut user = User::new("a@b.c", "hash");
        for title in ["one", "two", "three"] {
            user.goals.push(Goal::create(
                NewGoal {
                    title: title.to_string(),
                    description: None,
                },
                Utc::now(),
            ));
        }
        let middle = user.goals[1].id;
        let last = user.goals[2].id;

        let removed = user.remove_goal(&middle).unwrap();
        assert_eq!(removed.title, "two");
        assert_eq!(user.goals.len(), 2);
        assert_eq!(user.goal(&last).unwrap().title, "three");
        assert!(user.remove_goal(&middle).is_none());
    }

    #[test]
    fn test_normalize_email() {
        assert_eq!(normalize_email("  Alice@Example.COM "), "alice@example.com");
    }
}
