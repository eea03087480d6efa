//! Pokemon MCP Server
//!
//! Pokemon data lookups, type matchup analysis and a turn-based 1v1 battle
//! simulator, exposed as MCP tools over stdio. Data comes from a PokéAPI
//! compatible service behind the [`provider::DataProvider`] trait.

// --- MODULE DECLARATIONS ---
pub mod analysis;
pub mod battle;
pub mod config;
pub mod errors;
pub mod mcp_interface;
pub mod pokemon;
pub mod provider;

// --- PUBLIC API RE-EXPORTS ---

// --- From the `schema` crate ---
pub use schema::{BaseStats, PokemonType, StatType};

// --- From this crate's modules (`src/`) ---

// Core battle engine functions and state.
pub use battle::engine::{build_combatant, run_battle, simulate_battle};
pub use battle::state::{BattleEvent, BattleState, GameState, TurnRng};
pub use battle::status::StatusEffectTable;

// Battle-time Pokemon data.
pub use pokemon::{MoveSnapshot, PokemonSnapshot, StatusCondition};

// Data access.
pub use provider::{DataProvider, InMemoryProvider, MoveRecord, PokeApiClient, PokemonRecord};

// Configuration.
pub use config::{BattleRules, ProviderConfig, ReportLimits, ServerConfig};

// Crate-specific error and result types.
pub use errors::{BattleEngineError, BattleResult, DataProviderError, ProviderResult, ResourceKind};
