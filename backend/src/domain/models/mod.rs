//! Domain models.

pub mod settings;
pub mod trip;
pub mod vehicle;

use std::time::{SystemTime, UNIX_EPOCH};

/// Generate a random hex suffix for record IDs.
pub(crate) fn random_suffix(len: usize) -> String {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("Time went backwards")
        .as_nanos();
    format!("{:x}", now % (16_u128.pow(len as u32)))
        .chars()
        .take(len)
        .collect()
}
