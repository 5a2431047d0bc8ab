//! # Database module — PostgreSQL persistence for user documents
//!
//! Users are stored one row per document in the `users` table. The embedded goal
//! list lives in a `goals JSONB` column holding the same serde shape as
//! [`store::Goal`], so a row is the relational rendering of one document.
//!
//! ## Design
//!
//! - [`connect`] opens a pool with the configured size; the server binary calls it
//!   with values from its settings.
//! - [`connect_from_env`] reads `DATABASE_URL` (via `dotenvy`) instead, for tools and
//!   integration tests that run without the server settings.
//! - [`MIGRATOR`] embeds the SQL files under `packages/api/migrations`.
//! - [`PgStore`] implements [`store::UserStore`]. Goal writes are applied inside
//!   PostgreSQL (a single `UPDATE`, or a row-locked transaction), never as an
//!   unlocked read-modify-write, so concurrent requests cannot clobber each other.

mod pg_store;
mod pool;

pub use pg_store::PgStore;
pub use pool::{connect, connect_from_env};

/// Embedded schema migrations.
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");
