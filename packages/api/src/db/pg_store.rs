use chrono::{DateTime, Utc};
use serde_json::{Map, Value};
use sqlx::types::Json;
use sqlx::{FromRow, PgPool};
use store::{Goal, GoalId, GoalUpdate, StoreError, User, UserStore};
use uuid::Uuid;

/// PostgreSQL-backed UserStore.
#[derive(Clone, Debug)]
pub struct PgStore {
    pool: PgPool,
}

/// Row shape of the `users` table.
#[derive(Debug, FromRow)]
struct UserRow {
    id: Uuid,
    email: String,
    password_hash: String,
    goals: Json<Vec<Goal>>,
    created_at: DateTime<Utc>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User {
            id: row.id,
            email: row.email,
            password_hash: row.password_hash,
            goals: row.goals.0,
            created_at: row.created_at,
        }
    }
}

fn backend(err: sqlx::Error) -> StoreError {
    StoreError::Backend(err.to_string())
}

/// JSON object merged over the stored goal by `update_goal`.
fn update_patch(update: GoalUpdate, now: DateTime<Utc>) -> Value {
    let mut patch = Map::new();
    patch.insert("title".to_string(), Value::String(update.title));
    patch.insert("date".to_string(), Value::String(now.to_rfc3339()));
    if let Some(description) = update.description {
        patch.insert("description".to_string(), Value::String(description));
    }
    if let Some(completed) = update.completed {
        patch.insert("completed".to_string(), Value::Bool(completed));
    }
    Value::Object(patch)
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn user_exists(&self, email: &str) -> Result<bool, StoreError> {
        sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM users WHERE email = $1)")
            .bind(email)
            .fetch_one(&self.pool)
            .await
            .map_err(backend)
    }
}

impl UserStore for PgStore {
    async fn insert_user(&self, user: User) -> Result<(), StoreError> {
        let result = sqlx::query(
            "INSERT INTO users (id, email, password_hash, goals, created_at) VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(user.id)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(Json(&user.goals))
        .bind(user.created_at)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
                Err(StoreError::Duplicate(user.email))
            }
            Err(e) => Err(backend(e)),
        }
    }

    async fn find_user(&self, email: &str) -> Result<Option<User>, StoreError> {
        let row: Option<UserRow> = sqlx::query_as(
            "SELECT id, email, password_hash, goals, created_at FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(backend)?;

        Ok(row.map(User::from))
    }

    async fn push_goal(&self, email: &str, goal: Goal) -> Result<(), StoreError> {
        let result = sqlx::query(
            "UPDATE users SET goals = goals || jsonb_build_array($2::jsonb) WHERE email = $1",
        )
        .bind(email)
        .bind(Json(&goal))
        .execute(&self.pool)
        .await
        .map_err(backend)?;

        if result.rows_affected() == 0 {
            return Err(StoreError::UserNotFound(email.to_string()));
        }
        Ok(())
    }

    async fn update_goal(
        &self,
        email: &str,
        id: GoalId,
        update: GoalUpdate,
        now: DateTime<Utc>,
    ) -> Result<Goal, StoreError> {
        // The containment guard keeps the row untouched when no goal matches.
        let updated: Option<Json<Goal>> = sqlx::query_scalar(
            r#"
            UPDATE users
            SET goals = (
                SELECT jsonb_agg(
                    CASE WHEN elem->>'id' = $2 THEN elem || $3::jsonb ELSE elem END
                    ORDER BY ord
                )
                FROM jsonb_array_elements(goals) WITH ORDINALITY AS t(elem, ord)
            )
            WHERE email = $1
              AND goals @> jsonb_build_array(jsonb_build_object('id', $2::text))
            RETURNING (
                SELECT elem FROM jsonb_array_elements(goals) AS e(elem)
                WHERE elem->>'id' = $2
                LIMIT 1
            )
            "#,
        )
        .bind(email)
        .bind(id.to_string())
        .bind(Json(update_patch(update, now)))
        .fetch_optional(&self.pool)
        .await
        .map_err(backend)?;

        if let Some(Json(goal)) = updated {
            return Ok(goal);
        }
        if self.user_exists(email).await? {
            Err(StoreError::GoalNotFound(id))
        } else {
            Err(StoreError::UserNotFound(email.to_string()))
        }
    }

    async fn remove_goal(&self, email: &str, id: GoalId) -> Result<Goal, StoreError> {
        let mut tx = self.pool.begin().await.map_err(backend)?;

        // Row lock held until commit; concurrent writers to this user queue behind it.
        let goals: Option<Json<Vec<Goal>>> =
            sqlx::query_scalar("SELECT goals FROM users WHERE email = $1 FOR UPDATE")
                .bind(email)
                .fetch_optional(&mut *tx)
                .await
                .map_err(backend)?;

        let Some(Json(mut goals)) = goals else {
            return Err(StoreError::UserNotFound(email.to_string()));
        };
        let Some(pos) = goals.iter().position(|g| g.id == id) else {
            return Err(StoreError::GoalNotFound(id));
        };
        let removed = goals.remove(pos);

        sqlx::query("UPDATE users SET goals = $2 WHERE email = $1")
            .bind(email)
            .bind(Json(&goals))
            .execute(&mut *tx)
            .await
            .map_err(backend)?;

        tx.commit().await.map_err(backend)?;
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_patch_omits_absent_fields() {
        let now = Utc::now();
        let patch = update_patch(
            GoalUpdate {
                title: "Walk".to_string(),
                description: None,
                completed: Some(true),
            },
            now,
        );

        let object = patch.as_object().unwrap();
        assert_eq!(object["title"], Value::String("Walk".to_string()));
        assert_eq!(object["completed"], Value::Bool(true));
        assert!(!object.contains_key("description"));

        // The stored date must stay readable as a Goal field
        let date: DateTime<Utc> = serde_json::from_value(object["date"].clone()).unwrap();
        assert_eq!(date, now);
    }
}
