//! Domain types, error kinds and pure catalog rules shared by the
//! database and HTTP layers.

pub mod catalog;
pub mod error;
pub mod types;
