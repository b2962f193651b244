//! Command and result types exchanged between callers and the domain
//! services.

pub mod backup;
pub mod trips;
pub mod vehicle;
