//! Domains module containing business logic organized by bounded contexts.
//!
//! - `tools` - what the dispatch core lists and executes
//! - `integrations` - the ARC services tool handlers delegate to

pub mod integrations;
pub mod tools;
