use std::collections::HashMap;

use async_trait::async_trait;

use super::{normalize_name, DataProvider, MoveRecord, PokemonRecord};
use crate::errors::{DataProviderError, ProviderResult, ResourceKind};

/// A [`DataProvider`] over fixed in-process data, for embedding the simulator
/// in a host that already has its own records and for tests.
#[derive(Debug, Clone, Default)]
pub struct InMemoryProvider {
    pokemon: HashMap<String, PokemonRecord>,
    moves: HashMap<String, MoveRecord>,
    evolution_chains: HashMap<String, Vec<String>>,
    offline: bool,
}

impl InMemoryProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_pokemon(mut self, record: PokemonRecord) -> Self {
        self.pokemon.insert(normalize_name(&record.name), record);
        self
    }

    pub fn with_move(mut self, record: MoveRecord) -> Self {
        self.moves.insert(normalize_name(&record.name), record);
        self
    }

    /// Registers a chain under every species it contains.
    pub fn with_evolution_chain(mut self, chain: &[&str]) -> Self {
        let chain: Vec<String> = chain.iter().map(|s| s.to_string()).collect();
        for species in &chain {
            self.evolution_chains
                .insert(normalize_name(species), chain.clone());
        }
        self
    }

    /// Makes every lookup fail as if the upstream were unreachable.
    pub fn offline(mut self) -> Self {
        self.offline = true;
        self
    }

    fn check_online(&self) -> ProviderResult<()> {
        if self.offline {
            Err(DataProviderError::Transient("provider offline".to_string()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl DataProvider for InMemoryProvider {
    async fn pokemon(&self, name: &str) -> ProviderResult<PokemonRecord> {
        self.check_online()?;
        self.pokemon
            .get(&normalize_name(name))
            .cloned()
            .ok_or_else(|| DataProviderError::not_found(ResourceKind::Pokemon, name))
    }

    async fn move_details(&self, name: &str) -> ProviderResult<MoveRecord> {
        self.check_online()?;
        self.moves
            .get(&normalize_name(name))
            .cloned()
            .ok_or_else(|| DataProviderError::not_found(ResourceKind::Move, name))
    }

    async fn evolution_chain(&self, species: &str) -> ProviderResult<Vec<String>> {
        self.check_online()?;
        let key = normalize_name(species);
        Ok(self
            .evolution_chains
            .get(&key)
            .cloned()
            .unwrap_or_else(|| vec![key]))
    }
}
