//! Domain DTOs for the todo API.
//!
//! # Design
//! Field names follow the server's wire format (`_id`, `Text`, `Date`, `Done`,
//! `UserId`, ...). These types are defined independently from the
//! mock-server crate; the end-to-end tests catch schema drift between them.

use std::fmt;

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

/// Name of the cookie that carries the session token.
pub const SESSION_COOKIE: &str = "todo-session";

/// A single task as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct Task {
    #[serde(rename = "_id")]
    pub id: String,
    pub text: String,
    pub date: String,
    pub done: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

/// The authenticated user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct User {
    pub id: String,
    pub user_name: String,
    pub email: String,
}

/// Request payload for creating a task.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct NewTask {
    pub text: String,
    pub date: String,
}

/// Request payload for updating a task's completion flag.
///
/// `Done` is always sent as a JSON boolean.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct TaskUpdate {
    pub done: bool,
}

/// Opaque session token, sent as the `todo-session` cookie.
///
/// The client never acquires, refreshes or validates it. The token is kept in
/// a `SecretString` so it does not leak through `Debug` or logs.
pub struct Session(SecretString);

impl Session {
    pub fn new(token: impl Into<String>) -> Self {
        Self(SecretString::from(token.into()))
    }

    /// The value of the `cookie` request header for this session.
    pub fn cookie_header(&self) -> String {
        format!("{SESSION_COOKIE}={}", self.0.expose_secret())
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Session([REDACTED])")
    }
}

impl From<&str> for Session {
    fn from(token: &str) -> Self {
        Self::new(token)
    }
}

impl From<String> for Session {
    fn from(token: String) -> Self {
        Self::new(token)
    }
}
