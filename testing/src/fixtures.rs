//! Randomized inputs for tasks.
//!
//! Dates are `year-month-day` with no zero padding and are not calendar
//! checked: day is drawn from 1..=28 regardless of month, and explicit
//! overrides are used verbatim.

use rand::seq::IndexedRandom;
use rand::Rng;

const HEX: &[u8] = b"0123456789abcdef";

/// Length used by the test suites for task text.
pub const DEFAULT_TEXT_LEN: usize = 10;

/// Length of a well-formed task id.
pub const OBJECT_ID_LEN: usize = 24;

/// Random lowercase hexadecimal string of `len` characters.
pub fn random_text(len: usize) -> String {
    let mut rng = rand::rng();
    (0..len)
        .filter_map(|_| HEX.choose(&mut rng).map(|&b| char::from(b)))
        .collect()
}

/// A well-formed id that almost surely names no task.
pub fn random_object_id() -> String {
    random_text(OBJECT_ID_LEN)
}

/// Optional fixed parts of a generated date.
#[derive(Debug, Clone, Copy, Default)]
pub struct DateParts {
    pub year: Option<u32>,
    pub month: Option<u32>,
    pub day: Option<u32>,
}

/// Random date in 2000..=2025, months 1..=12, days 1..=28.
pub fn random_date() -> String {
    random_date_with(DateParts::default())
}

/// Like [`random_date`], keeping any part fixed in `parts`.
pub fn random_date_with(parts: DateParts) -> String {
    let mut rng = rand::rng();
    let year = parts.year.unwrap_or_else(|| rng.random_range(2000..=2025));
    let month = parts.month.unwrap_or_else(|| rng.random_range(1..=12));
    let day = parts.day.unwrap_or_else(|| rng.random_range(1..=28));
    format!("{year}-{month}-{day}")
}
