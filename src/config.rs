//! Runtime configuration shared by the server and the CLI.
//!
//! Every knob can be given as a flag or through the environment, so the MCP
//! host can configure the server without editing its launch arguments.

use std::time::Duration;

use clap::Args;
use tracing_subscriber::EnvFilter;

use crate::battle::status::StatusEffectTable;

pub const DEFAULT_API_BASE_URL: &str = "https://pokeapi.co/api/v2";

#[derive(Debug, Clone, Args)]
pub struct ServerConfig {
    /// Base URL of the PokéAPI-compatible data service
    #[arg(long, env = "POKEAPI_BASE_URL", default_value = DEFAULT_API_BASE_URL)]
    pub api_base_url: String,

    /// Per-request timeout when talking to the data service
    #[arg(long, env = "POKEMON_MCP_TIMEOUT", default_value_t = 10)]
    pub request_timeout_secs: u64,

    /// Rounds after which a battle is decided on remaining HP
    #[arg(long, env = "POKEMON_MCP_ROUND_CAP", default_value_t = 50)]
    pub round_cap: u32,

    /// How many entries of a Pokémon's move list are looked up for a battle
    #[arg(long, env = "POKEMON_MCP_MOVE_SCAN", default_value_t = 20)]
    pub move_scan_limit: usize,

    /// Moves shown with full details in a Pokémon report
    #[arg(long, default_value_t = 5)]
    pub detailed_moves: usize,

    /// Further move names listed after the detailed ones
    #[arg(long, default_value_t = 10)]
    pub additional_moves: usize,

    /// Log filter, e.g. `info` or `pokemon_mcp=debug`
    #[arg(long, env = "POKEMON_MCP_LOG", default_value = "info")]
    pub log_level: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            request_timeout_secs: 10,
            round_cap: 50,
            move_scan_limit: 20,
            detailed_moves: 5,
            additional_moves: 10,
            log_level: "info".to_string(),
        }
    }
}

impl ServerConfig {
    pub fn provider_config(&self) -> ProviderConfig {
        ProviderConfig {
            base_url: self.api_base_url.trim_end_matches('/').to_string(),
            request_timeout: Duration::from_secs(self.request_timeout_secs),
        }
    }

    pub fn battle_rules(&self) -> BattleRules {
        BattleRules {
            round_cap: self.round_cap.max(1),
            move_scan_limit: self.move_scan_limit,
            ..BattleRules::default()
        }
    }

    pub fn report_limits(&self) -> ReportLimits {
        ReportLimits {
            detailed_moves: self.detailed_moves,
            additional_moves: self.additional_moves,
        }
    }
}

/// Connection settings for the HTTP data provider.
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    pub base_url: String,
    pub request_timeout: Duration,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        ServerConfig::default().provider_config()
    }
}

/// Parameters of a simulated battle.
#[derive(Debug, Clone)]
pub struct BattleRules {
    pub round_cap: u32,
    /// Upper bound on move detail lookups per combatant
    pub move_scan_limit: usize,
    /// Scanning stops once this many damaging moves are known
    pub max_battle_moves: usize,
    pub status_table: StatusEffectTable,
}

impl Default for BattleRules {
    fn default() -> Self {
        Self {
            round_cap: 50,
            move_scan_limit: 20,
            max_battle_moves: 4,
            status_table: StatusEffectTable::default(),
        }
    }
}

/// How much of a Pokémon's move list a data report shows.
#[derive(Debug, Clone, Copy)]
pub struct ReportLimits {
    pub detailed_moves: usize,
    pub additional_moves: usize,
}

impl Default for ReportLimits {
    fn default() -> Self {
        ServerConfig::default().report_limits()
    }
}

/// Installs the global tracing subscriber. Output goes to stderr because
/// stdout carries the MCP transport.
pub fn init_tracing(filter: &str) {
    let filter = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
