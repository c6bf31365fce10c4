//! Per-table query modules.

pub mod events;
pub mod items;
pub mod profiles;
pub mod themes;
