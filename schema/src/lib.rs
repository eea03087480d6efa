// Pokemon MCP Schema - Shared type definitions
// This crate holds the static data every other layer agrees on: the 18
// elemental types with their effectiveness chart, and the six base stats.

// Re-export the main types
pub use pokemon_types::*;
pub use stats::*;

pub mod pokemon_types;
pub mod stats;
