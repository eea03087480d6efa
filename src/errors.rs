use std::fmt;
use thiserror::Error;

/// Main error type for the battle simulator and analysis operations
#[derive(Debug, Error)]
pub enum BattleEngineError {
    /// The data provider could not produce what was asked for
    #[error(transparent)]
    Provider(#[from] DataProviderError),
    /// A type name outside the 18 canonical types
    #[error("'{0}' is not a valid Pokémon type.")]
    InvalidType(String),
    /// A combatant cannot attack at all, so the battle could never end
    #[error("{0} has no damaging moves, so a battle cannot be simulated.")]
    DegenerateBattleInput(String),
}

impl BattleEngineError {
    /// Only upstream outages are worth retrying; bad input fails the same way every time.
    pub fn is_retryable(&self) -> bool {
        match self {
            BattleEngineError::Provider(e) => e.is_retryable(),
            _ => false,
        }
    }
}

/// What kind of thing a provider lookup was for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Pokemon,
    Move,
    Species,
    EvolutionChain,
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let display_name = match self {
            ResourceKind::Pokemon => "Pokémon",
            ResourceKind::Move => "move",
            ResourceKind::Species => "species",
            ResourceKind::EvolutionChain => "evolution chain",
        };
        write!(f, "{}", display_name)
    }
}

/// Errors raised at the data provider boundary
#[derive(Debug, Error)]
pub enum DataProviderError {
    /// The upstream source has no entry under this name
    #[error("Could not find data for {kind} '{name}'. Please check the spelling.")]
    NotFound { kind: ResourceKind, name: String },
    /// Network failure, timeout or upstream outage
    #[error("The Pokémon data service is unavailable ({0}). Please try again later.")]
    Transient(String),
    /// The upstream answered but the payload cannot be normalized
    #[error("Malformed {kind} data for '{name}': {details}")]
    Malformed {
        kind: ResourceKind,
        name: String,
        details: String,
    },
}

impl DataProviderError {
    pub fn not_found(kind: ResourceKind, name: impl Into<String>) -> Self {
        DataProviderError::NotFound {
            kind,
            name: name.into(),
        }
    }

    pub fn malformed(kind: ResourceKind, name: impl Into<String>, details: impl Into<String>) -> Self {
        DataProviderError::Malformed {
            kind,
            name: name.into(),
            details: details.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, DataProviderError::NotFound { .. })
    }

    /// Whether the caller may reasonably retry the same request.
    pub fn is_retryable(&self) -> bool {
        matches!(self, DataProviderError::Transient(_))
    }
}

/// Type alias for Results using BattleEngineError
pub type BattleResult<T> = Result<T, BattleEngineError>;

/// Type alias for Results using DataProviderError
pub type ProviderResult<T> = Result<T, DataProviderError>;
