//! A PokéAPI-backed [`DataProvider`].

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use schema::{BaseStats, PokemonType, StatType};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, warn};

use super::{normalize_name, DataProvider, MoveRecord, PokemonRecord};
use crate::config::ProviderConfig;
use crate::errors::{DataProviderError, ProviderResult, ResourceKind};

/// HTTP client for PokéAPI. Holds no cache; every call goes to the network.
#[derive(Debug, Clone)]
pub struct PokeApiClient {
    base_url: String,
    client: Client,
}

impl PokeApiClient {
    pub fn new(config: &ProviderConfig) -> ProviderResult<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .user_agent(concat!("pokemon-mcp/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| DataProviderError::Transient(e.to_string()))?;
        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    fn endpoint(&self, resource: &str, key: &str) -> String {
        format!("{}/{}/{}", self.base_url, resource, key)
    }

    async fn request_json<T: DeserializeOwned>(
        &self,
        url: &str,
        kind: ResourceKind,
        name: &str,
    ) -> ProviderResult<T> {
        debug!(%url, "requesting {}", kind);
        let response = self.client.get(url).send().await.map_err(|e| {
            warn!(%url, error = %e, "request failed");
            transport_error(&e)
        })?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(DataProviderError::not_found(kind, name));
        }
        if !status.is_success() {
            warn!(%url, %status, "unexpected status");
            return Err(DataProviderError::Transient(format!("HTTP {}", status)));
        }

        response.json::<T>().await.map_err(|e| {
            if e.is_decode() {
                DataProviderError::malformed(kind, name, e.to_string())
            } else {
                transport_error(&e)
            }
        })
    }
}

/// Normalizes a user-supplied name into a URL path segment. Upstream names
/// only use `[a-z0-9-]`, so anything else cannot exist and is never sent.
fn lookup_key(kind: ResourceKind, name: &str) -> ProviderResult<String> {
    let key = normalize_name(name);
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-');
    if valid {
        Ok(key)
    } else {
        debug!(%name, "rejecting lookup name");
        Err(DataProviderError::not_found(kind, name))
    }
}

fn transport_error(e: &reqwest::Error) -> DataProviderError {
    if e.is_timeout() {
        DataProviderError::Transient("request timed out".to_string())
    } else {
        DataProviderError::Transient(e.to_string())
    }
}

#[async_trait]
impl DataProvider for PokeApiClient {
    async fn pokemon(&self, name: &str) -> ProviderResult<PokemonRecord> {
        let key = lookup_key(ResourceKind::Pokemon, name)?;
        let raw: ApiPokemon = self
            .request_json(&self.endpoint("pokemon", &key), ResourceKind::Pokemon, &key)
            .await?;
        raw.into_record()
    }

    async fn move_details(&self, name: &str) -> ProviderResult<MoveRecord> {
        let key = lookup_key(ResourceKind::Move, name)?;
        let raw: ApiMove = self
            .request_json(&self.endpoint("move", &key), ResourceKind::Move, &key)
            .await?;
        raw.into_record()
    }

    async fn evolution_chain(&self, species: &str) -> ProviderResult<Vec<String>> {
        let key = lookup_key(ResourceKind::Species, species)?;
        let raw_species: ApiSpecies = self
            .request_json(
                &self.endpoint("pokemon-species", &key),
                ResourceKind::Species,
                &key,
            )
            .await?;

        let Some(chain_ref) = raw_species.evolution_chain else {
            return Ok(vec![key]);
        };
        let chain: ApiEvolutionChain = self
            .request_json(&chain_ref.url, ResourceKind::EvolutionChain, &key)
            .await?;
        Ok(chain.chain.flatten())
    }
}

// --- Wire schema ---
// Only the fields this crate reads are declared; serde ignores the rest.

#[derive(Debug, Deserialize)]
struct NamedResource {
    name: String,
}

#[derive(Debug, Deserialize)]
struct UrlResource {
    url: String,
}

#[derive(Debug, Deserialize)]
struct ApiPokemon {
    id: u32,
    name: String,
    height: u32,
    weight: u32,
    species: NamedResource,
    types: Vec<ApiPokemonType>,
    stats: Vec<ApiStat>,
    abilities: Vec<ApiAbility>,
    moves: Vec<ApiPokemonMove>,
}

#[derive(Debug, Deserialize)]
struct ApiPokemonType {
    slot: u8,
    #[serde(rename = "type")]
    type_: NamedResource,
}

#[derive(Debug, Deserialize)]
struct ApiStat {
    base_stat: u16,
    stat: NamedResource,
}

#[derive(Debug, Deserialize)]
struct ApiAbility {
    ability: NamedResource,
}

#[derive(Debug, Deserialize)]
struct ApiPokemonMove {
    #[serde(rename = "move")]
    move_: NamedResource,
}

#[derive(Debug, Deserialize)]
struct ApiMove {
    name: String,
    power: Option<u16>,
    accuracy: Option<u8>,
    pp: Option<u8>,
    effect_chance: Option<u8>,
    #[serde(rename = "type")]
    type_: NamedResource,
    #[serde(default)]
    effect_entries: Vec<ApiEffectEntry>,
}

#[derive(Debug, Deserialize)]
struct ApiEffectEntry {
    short_effect: String,
    language: NamedResource,
}

#[derive(Debug, Deserialize)]
struct ApiSpecies {
    evolution_chain: Option<UrlResource>,
}

#[derive(Debug, Deserialize)]
struct ApiEvolutionChain {
    chain: ApiChainLink,
}

#[derive(Debug, Deserialize)]
struct ApiChainLink {
    species: NamedResource,
    #[serde(default)]
    evolves_to: Vec<ApiChainLink>,
}

impl ApiChainLink {
    /// Depth-first, parents before children.
    fn flatten(&self) -> Vec<String> {
        let mut names = vec![self.species.name.clone()];
        for next in &self.evolves_to {
            names.extend(next.flatten());
        }
        names
    }
}

fn parse_type(kind: ResourceKind, owner: &str, type_name: &str) -> ProviderResult<PokemonType> {
    type_name.parse::<PokemonType>().map_err(|_| {
        DataProviderError::malformed(kind, owner, format!("unknown type '{}'", type_name))
    })
}

impl ApiPokemon {
    fn into_record(self) -> ProviderResult<PokemonRecord> {
        let mut types = self.types;
        types.sort_by_key(|t| t.slot);
        let types = types
            .iter()
            .map(|t| parse_type(ResourceKind::Pokemon, &self.name, &t.type_.name))
            .collect::<ProviderResult<Vec<_>>>()?;
        if types.is_empty() || types.len() > 2 {
            return Err(DataProviderError::malformed(
                ResourceKind::Pokemon,
                &self.name,
                format!("expected 1 or 2 types, found {}", types.len()),
            ));
        }

        let stat = |wanted: StatType| -> ProviderResult<u16> {
            self.stats
                .iter()
                .find(|s| StatType::from_api_name(&s.stat.name) == Some(wanted))
                .map(|s| s.base_stat)
                .ok_or_else(|| {
                    DataProviderError::malformed(
                        ResourceKind::Pokemon,
                        &self.name,
                        format!("missing {} stat", wanted),
                    )
                })
        };
        let base_stats = BaseStats {
            hp: stat(StatType::Hp)?,
            attack: stat(StatType::Attack)?,
            defense: stat(StatType::Defense)?,
            sp_attack: stat(StatType::SpecialAttack)?,
            sp_defense: stat(StatType::SpecialDefense)?,
            speed: stat(StatType::Speed)?,
        };

        Ok(PokemonRecord {
            id: self.id,
            name: self.name,
            species: self.species.name,
            types,
            height: self.height,
            weight: self.weight,
            base_stats,
            abilities: self.abilities.into_iter().map(|a| a.ability.name).collect(),
            moves: self.moves.into_iter().map(|m| m.move_.name).collect(),
        })
    }
}

impl ApiMove {
    fn into_record(self) -> ProviderResult<MoveRecord> {
        let move_type = parse_type(ResourceKind::Move, &self.name, &self.type_.name)?;
        let effect_chance = self.effect_chance;
        let short_effect = self
            .effect_entries
            .iter()
            .find(|e| e.language.name == "en")
            .or_else(|| self.effect_entries.first())
            .map(|e| match effect_chance {
                Some(chance) => e.short_effect.replace("$effect_chance", &chance.to_string()),
                None => e.short_effect.clone(),
            });

        Ok(MoveRecord {
            name: self.name,
            move_type,
            power: self.power,
            accuracy: self.accuracy,
            pp: self.pp,
            short_effect,
        })
    }
}
