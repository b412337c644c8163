//! Shared types for the Drishti dashboard: configuration, backend protocol,
//! safe JSON lookups and static fixture data.

pub mod config;
pub mod fixtures;
pub mod lookup;
pub mod protocol;
