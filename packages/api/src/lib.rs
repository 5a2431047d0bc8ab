//! # API crate — HTTP surface of the Goals service
//!
//! This crate turns the domain layer in `store` into a JSON API. It owns everything
//! that knows about HTTP or PostgreSQL; the binary in `packages/web` only loads
//! settings and mounts [`router`].
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`auth`] | Argon2id password hashing and verification |
//! | [`db`] | PostgreSQL pool, embedded migrations, and [`db::PgStore`], the JSONB-backed `UserStore` |
//! | [`error`] | [`ApiError`], the four-way error taxonomy and its status-code mapping |
//! | [`extract`] | [`extract::Payload`], a body extractor taking JSON or form posts |
//! | [`models`] | Request and response payloads |
//! | [`routes`] | The axum [`router`] and its handlers |
//!
//! ## Endpoints
//!
//! - **Users**: `POST /api/signUp`, `POST /api/login`
//! - **Goals**: `POST /api/addGoal/{email}`, `GET /api/getGoals/{email}`,
//!   `GET /api/getOneGoal/{email}/{goal_id}`, `PUT /api/updateGoal/{email}/{goal_id}`,
//!   `DELETE /api/deleteGoal/{email}/{goal_id}`
//!
//! Goals are addressed by their stable id, never by position in the list.

pub mod auth;
pub mod db;
pub mod error;
pub mod extract;
pub mod models;
pub mod routes;

pub use error::ApiError;
pub use models::Message;
pub use routes::{router, AppState};
