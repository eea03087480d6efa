//! Pokemon MCP Server
//!
//! A Model Context Protocol server using the official Rust SDK (rmcp) that
//! exposes Pokemon data lookups, type analysis and the battle simulator as
//! tools over stdio.

use std::sync::Arc;

use clap::Parser;
use pokemon_mcp::config::{init_tracing, BattleRules, ReportLimits, ServerConfig};
use pokemon_mcp::mcp_interface::{
    error_text, get_pokemon_data_report, simulate_battle_report, type_effectiveness_report,
    weaknesses_report,
};
use pokemon_mcp::{BattleResult, DataProvider, PokeApiClient};
use rmcp::{
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{ErrorData as McpError, *},
    schemars, tool, tool_handler, tool_router, ServerHandler, ServiceExt,
};
use serde::Deserialize;
use tokio::io::{stdin, stdout};
use tracing::info;

#[derive(Parser)]
#[command(name = "pokemon-mcp-server", version, about = "Pokémon MCP server (stdio)")]
struct Cli {
    #[command(flatten)]
    config: ServerConfig,
}

#[derive(Clone)]
pub struct PokemonMcpService {
    tool_router: ToolRouter<PokemonMcpService>,
    provider: Arc<dyn DataProvider>,
    rules: Arc<BattleRules>,
    limits: ReportLimits,
}

// Tool request structures
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct PokemonNameRequest {
    #[schemars(description = "Name of the Pokémon, e.g. 'pikachu' or 'mr-mime'")]
    pub pokemon_name: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SimulateBattleRequest {
    #[schemars(description = "Name of the first Pokémon")]
    pub pokemon1_name: String,
    #[schemars(description = "Name of the second Pokémon")]
    pub pokemon2_name: String,
    #[schemars(description = "Optional seed for a reproducible battle")]
    pub seed: Option<u64>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct TypeEffectivenessRequest {
    #[schemars(description = "The attacking move's type, e.g. 'fire'")]
    pub attacking_type: String,
    #[schemars(description = "The defending Pokémon's type, e.g. 'grass'")]
    pub defending_type: String,
}

/// Domain failures become error-flagged tool results, never protocol errors.
fn to_tool_result(result: BattleResult<String>) -> Result<CallToolResult, McpError> {
    match result {
        Ok(text) => Ok(CallToolResult::success(vec![Content::text(text)])),
        Err(e) => {
            info!(error = %e, retryable = e.is_retryable(), "tool call failed");
            Ok(CallToolResult::error(vec![Content::text(error_text(&e))]))
        }
    }
}

#[tool_router]
impl PokemonMcpService {
    pub fn new(provider: Arc<dyn DataProvider>, rules: BattleRules, limits: ReportLimits) -> Self {
        Self {
            tool_router: Self::tool_router(),
            provider,
            rules: Arc::new(rules),
            limits,
        }
    }

    #[tool(
        description = "Get comprehensive data for a Pokémon: types, base stats, abilities, evolution chain and notable moves"
    )]
    async fn get_pokemon_data(
        &self,
        Parameters(request): Parameters<PokemonNameRequest>,
    ) -> Result<CallToolResult, McpError> {
        info!(tool = "get_pokemon_data", pokemon = %request.pokemon_name);
        to_tool_result(
            get_pokemon_data_report(self.provider.as_ref(), &request.pokemon_name, self.limits)
                .await,
        )
    }

    #[tool(
        description = "Simulate a turn-based battle between two Pokémon and return the full battle log"
    )]
    async fn simulate_battle(
        &self,
        Parameters(request): Parameters<SimulateBattleRequest>,
    ) -> Result<CallToolResult, McpError> {
        info!(
            tool = "simulate_battle",
            pokemon1 = %request.pokemon1_name,
            pokemon2 = %request.pokemon2_name,
            seed = ?request.seed
        );
        to_tool_result(
            simulate_battle_report(
                self.provider.as_ref(),
                &request.pokemon1_name,
                &request.pokemon2_name,
                &self.rules,
                request.seed,
            )
            .await,
        )
    }

    #[tool(description = "Get the damage multiplier of an attacking type against a defending type")]
    async fn get_type_effectiveness(
        &self,
        Parameters(request): Parameters<TypeEffectivenessRequest>,
    ) -> Result<CallToolResult, McpError> {
        info!(
            tool = "get_type_effectiveness",
            attacking = %request.attacking_type,
            defending = %request.defending_type
        );
        to_tool_result(type_effectiveness_report(
            &request.attacking_type,
            &request.defending_type,
        ))
    }

    #[tool(description = "Get a breakdown of a Pokémon's weaknesses, resistances and immunities")]
    async fn get_pokemon_weaknesses_and_resistances(
        &self,
        Parameters(request): Parameters<PokemonNameRequest>,
    ) -> Result<CallToolResult, McpError> {
        info!(tool = "get_pokemon_weaknesses_and_resistances", pokemon = %request.pokemon_name);
        to_tool_result(weaknesses_report(self.provider.as_ref(), &request.pokemon_name).await)
    }
}

#[tool_handler]
impl ServerHandler for PokemonMcpService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "Look up Pokémon data, analyze type matchups and simulate 1v1 battles. \
                 Names are case-insensitive."
                    .to_string(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing(&cli.config.log_level);
    info!(api = %cli.config.api_base_url, "Pokemon MCP Server starting");

    let provider = PokeApiClient::new(&cli.config.provider_config())?;
    let service = PokemonMcpService::new(
        Arc::new(provider),
        cli.config.battle_rules(),
        cli.config.report_limits(),
    );
    let transport = (stdin(), stdout());

    let server = service.serve(transport).await?;
    info!("Server running, waiting for shutdown");
    let quit_reason = server.waiting().await?;

    info!(?quit_reason, "Pokemon MCP Server exiting");
    Ok(())
}
