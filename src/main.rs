//! Command-line front end for the same operations the MCP server exposes.
//!
//! Usage:
//!   pokemon-mcp info pikachu
//!   pokemon-mcp battle charizard blastoise --seed 42
//!   pokemon-mcp types fire grass
//!   pokemon-mcp weaknesses gyarados

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use pokemon_mcp::config::{init_tracing, ServerConfig};
use pokemon_mcp::mcp_interface::{
    error_text, get_pokemon_data_report, simulate_battle_report, type_effectiveness_report,
    weaknesses_report,
};
use pokemon_mcp::PokeApiClient;

#[derive(Parser)]
#[command(name = "pokemon-mcp", version, about = "Pokémon data and battle simulator")]
struct Cli {
    #[command(flatten)]
    config: ServerConfig,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the data report for a Pokémon
    Info { pokemon: String },

    /// Simulate a 1v1 battle and print its log
    Battle {
        pokemon1: String,
        pokemon2: String,
        /// Seed for a reproducible battle
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Show how one type fares against another
    Types { attacking: String, defending: String },

    /// Show the weaknesses, resistances and immunities of a Pokémon
    Weaknesses { pokemon: String },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(&cli.config.log_level);

    let provider = match PokeApiClient::new(&cli.config.provider_config()) {
        Ok(provider) => provider,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let result = match &cli.command {
        Commands::Info { pokemon } => {
            get_pokemon_data_report(&provider, pokemon, cli.config.report_limits()).await
        }
        Commands::Battle {
            pokemon1,
            pokemon2,
            seed,
        } => {
            simulate_battle_report(
                &provider,
                pokemon1,
                pokemon2,
                &cli.config.battle_rules(),
                *seed,
            )
            .await
        }
        Commands::Types {
            attacking,
            defending,
        } => type_effectiveness_report(attacking, defending),
        Commands::Weaknesses { pokemon } => weaknesses_report(&provider, pokemon).await,
    };

    match result {
        Ok(text) => {
            println!("{}", text);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{}", error_text(&e));
            ExitCode::FAILURE
        }
    }
}
