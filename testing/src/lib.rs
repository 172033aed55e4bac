//! Test support for the todo client: random fixtures and an in-process mock
//! server.

pub mod fixtures;
pub mod server;

pub use fixtures::{random_date, random_date_with, random_object_id, random_text, DateParts};
pub use server::TestServer;
