//! Synchronous API client for the todo service.
//!
//! # Overview
//! One method per REST endpoint (`/api/v1/items`, `/api/v1/items/{id}`,
//! `/api/v1/user`). Every call attaches the caller's session cookie, performs
//! exactly one HTTP request, and returns the raw `HttpResponse`. Status codes
//! are never interpreted here; only transport failures are errors.
//!
//! # Design
//! - `TodoClient` is stateless: it holds only the base URL and a transport.
//! - Each operation is backed by a `build_*` method producing an
//!   `HttpRequest` as plain data, so request construction is testable without
//!   a network.
//! - `Transport` is the I/O seam; `UreqTransport` is the blocking default.
//! - DTOs are defined independently from the mock-server crate; the
//!   end-to-end tests catch schema drift.

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod transport;
pub mod types;

pub use client::TodoClient;
pub use config::ClientConfig;
pub use error::{ClientError, Result};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use transport::{Transport, UreqTransport};
pub use types::{NewTask, Session, Task, TaskUpdate, User, SESSION_COOKIE};
