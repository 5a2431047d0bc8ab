//! # HTTP routes of the Goals API
//!
//! [`router`] wires every endpoint to a handler sharing one [`Repository`]. The
//! router is generic over the [`UserStore`], so the server binary mounts it on a
//! [`crate::db::PgStore`] while tests mount it on a [`store::MemoryStore`].
//!
//! | Method | Path | Handler |
//! |--------|------|---------|
//! | GET | `/` | `welcome` |
//! | POST | `/api/signUp` | `sign_up` |
//! | POST | `/api/login` | `login` |
//! | POST | `/api/addGoal/{email}` | `add_goal` |
//! | GET | `/api/getGoals/{email}` | `get_goals` |
//! | GET | `/api/getOneGoal/{email}/{goal_id}` | `get_one_goal` |
//! | PUT | `/api/updateGoal/{email}/{goal_id}` | `update_goal` |
//! | DELETE | `/api/deleteGoal/{email}/{goal_id}` | `delete_goal` |
//!
//! Handlers return `Result<_, ApiError>`. Bodies are read through [`Payload`],
//! so JSON and HTML form posts are both accepted and a malformed body becomes
//! [`ApiError::ValidationFailed`] rather than axum's plain-text rejection.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, post, put},
    Json, Router,
};
use serde_json::{json, Value};
use store::{Goal, GoalId, GoalUpdate, NewGoal, Repository, UserStore};

use crate::auth::{hash_password, verify_password};
use crate::error::ApiError;
use crate::extract::Payload;
use crate::models::{AddGoalRequest, Credentials, Message, UpdateGoalRequest};

/// Shared handler state.
pub type AppState<S> = Arc<Repository<S>>;

/// Build the API router over a repository.
pub fn router<S>(repo: Repository<S>) -> Router
where
    S: UserStore + 'static,
{
    Router::new()
        .route("/", get(welcome))
        .route("/api/signUp", post(sign_up::<S>))
        .route("/api/login", post(login::<S>))
        .route("/api/addGoal/{email}", post(add_goal::<S>))
        .route("/api/getGoals/{email}", get(get_goals::<S>))
        .route("/api/getOneGoal/{email}/{goal_id}", get(get_one_goal::<S>))
        .route("/api/updateGoal/{email}/{goal_id}", put(update_goal::<S>))
        .route("/api/deleteGoal/{email}/{goal_id}", delete(delete_goal::<S>))
        .with_state(Arc::new(repo))
}

fn parse_goal_id(raw: &str) -> Result<GoalId, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::ValidationFailed(format!("Invalid goal id: {}", raw)))
}

async fn welcome() -> Json<Value> {
    Json(json!({ "Welcome": "to the Goals API" }))
}

async fn sign_up<S: UserStore>(
    State(repo): State<AppState<S>>,
    Payload(credentials): Payload<Credentials>,
) -> Result<(StatusCode, Json<Message>), ApiError> {
    credentials.validate()?;

    if repo.find_user(&credentials.email).await?.is_some() {
        return Err(ApiError::Conflict(
            "An account with this email already exists".to_string(),
        ));
    }

    let password_hash = hash_password(credentials.password).await?;

    let user = repo.sign_up(&credentials.email, password_hash).await?;
    tracing::info!("User created: {}", user.email);

    Ok((StatusCode::CREATED, Json(Message::new("User Created"))))
}

async fn login<S: UserStore>(
    State(repo): State<AppState<S>>,
    Payload(credentials): Payload<Credentials>,
) -> Result<Json<bool>, ApiError> {
    let Some(user) = repo.find_user(&credentials.email).await? else {
        return Err(ApiError::NotFound("User not found".to_string()));
    };

    let valid = verify_password(credentials.password, user.password_hash).await?;
    tracing::debug!("Login attempt for {}: {}", credentials.email, valid);

    Ok(Json(valid))
}

async fn add_goal<S: UserStore>(
    State(repo): State<AppState<S>>,
    Path(email): Path<String>,
    Payload(req): Payload<AddGoalRequest>,
) -> Result<(StatusCode, Json<Message>), ApiError> {
    let new_goal = NewGoal::try_from(req)?;

    let goal = repo.add_goal(&email, new_goal).await?;
    tracing::info!("Goal {} added for {}", goal.id, email);

    Ok((StatusCode::CREATED, Json(Message::new("Goal Added"))))
}

async fn get_goals<S: UserStore>(
    State(repo): State<AppState<S>>,
    Path(email): Path<String>,
) -> Result<Json<Vec<Goal>>, ApiError> {
    Ok(Json(repo.goals(&email).await?))
}

async fn get_one_goal<S: UserStore>(
    State(repo): State<AppState<S>>,
    Path((email, goal_id)): Path<(String, String)>,
) -> Result<Json<Goal>, ApiError> {
    let id = parse_goal_id(&goal_id)?;
    Ok(Json(repo.goal(&email, id).await?))
}

async fn update_goal<S: UserStore>(
    State(repo): State<AppState<S>>,
    Path((email, goal_id)): Path<(String, String)>,
    Payload(req): Payload<UpdateGoalRequest>,
) -> Result<Json<Message>, ApiError> {
    let id = parse_goal_id(&goal_id)?;
    let update = GoalUpdate::try_from(req)?;

    repo.update_goal(&email, id, update).await?;
    tracing::info!("Goal {} updated for {}", id, email);

    Ok(Json(Message::new("Goal Updated")))
}

async fn delete_goal<S: UserStore>(
    State(repo): State<AppState<S>>,
    Path((email, goal_id)): Path<(String, String)>,
) -> Result<Json<Message>, ApiError> {
    let id = parse_goal_id(&goal_id)?;

    repo.delete_goal(&email, id).await?;
    tracing::info!("Goal {} deleted for {}", id, email);

    Ok(Json(Message::new("Goal Deleted")))
}
