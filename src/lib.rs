//! Portfolio backend: MongoDB lifecycle and health API.

pub mod api;
pub mod global;
