//! Room relay server for Coderoom.
//!
//! Connections join rooms identified by opaque tokens. Every buffer snapshot or
//! language change a member sends is relayed to the other members of the same
//! room. The server keeps no document state of its own.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;
