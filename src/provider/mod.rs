//! The data provider boundary.
//!
//! Everything upstream of this module speaks the provider's wire schema;
//! everything downstream only sees [`PokemonRecord`] and [`MoveRecord`].

use async_trait::async_trait;
use schema::{BaseStats, PokemonType};
use serde::{Deserialize, Serialize};

use crate::errors::ProviderResult;

pub mod memory;
pub mod pokeapi;

pub use memory::InMemoryProvider;
pub use pokeapi::PokeApiClient;

/// Normalized Pokemon data, independent of the upstream API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PokemonRecord {
    pub id: u32,
    /// API name, lowercase (`mr-mime`)
    pub name: String,
    /// Species the evolution chain is looked up by
    pub species: String,
    /// Ordered by slot
    pub types: Vec<PokemonType>,
    /// Decimetres
    pub height: u32,
    /// Hectograms
    pub weight: u32,
    pub base_stats: BaseStats,
    pub abilities: Vec<String>,
    /// Move API names in the order the upstream lists them
    pub moves: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoveRecord {
    pub name: String,
    pub move_type: PokemonType,
    pub power: Option<u16>,
    pub accuracy: Option<u8>,
    pub pp: Option<u8>,
    pub short_effect: Option<String>,
}

/// Source of Pokemon and move data.
///
/// Implementations must report an unknown name as
/// [`DataProviderError::NotFound`](crate::errors::DataProviderError::NotFound)
/// and network trouble as
/// [`DataProviderError::Transient`](crate::errors::DataProviderError::Transient).
#[async_trait]
pub trait DataProvider: Send + Sync {
    async fn pokemon(&self, name: &str) -> ProviderResult<PokemonRecord>;

    async fn move_details(&self, name: &str) -> ProviderResult<MoveRecord>;

    /// Species names of the whole evolution family, in evolution order.
    async fn evolution_chain(&self, species: &str) -> ProviderResult<Vec<String>>;
}

/// Canonical lookup key: trimmed, lowercase, spaces as hyphens.
pub fn normalize_name(name: &str) -> String {
    name.trim()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
}
