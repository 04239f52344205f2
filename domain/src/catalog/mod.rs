//! Agent catalog
//!
//! The static roster of reviewer agents available for selection.

pub mod entities;

pub use entities::{Agent, AgentCatalog};
