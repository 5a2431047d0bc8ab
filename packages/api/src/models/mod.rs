//! Request and response payloads of the HTTP API.

mod goal;
mod user;

pub use goal::{AddGoalRequest, UpdateGoalRequest};
pub use user::Credentials;

use serde::{Deserialize, Serialize};

/// `{"msg": "..."}` — the body of every status reply and error.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Message {
    pub msg: String,
}

impl Message {
    pub fn new(msg: impl Into<String>) -> Self {
        Self { msg: msg.into() }
    }
}
