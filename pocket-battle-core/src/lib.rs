//! Core battle rules for trainer-vs-trainer team battles.
//!
//! The main entry point for a single battle is [`sim::battle::Battle`].

pub mod battle_logger;
pub mod data;
pub mod parser;
pub mod sim;

pub use parser::parse_type_chart;

/// Commonly used exports for external consumers.
pub mod prelude {
    pub use crate::data::species::{choose_manually, choose_randomly, create, SPECIES};
    pub use crate::data::types::{EffectivenessTable, PokeType};
    pub use crate::parser::parse_type_chart;
    pub use crate::sim::battle::{Battle, BattleResult};
    pub use crate::sim::team::{BattleMode, Criterion, PokeTeam, Roster, TEAM_LIMIT};
    pub use crate::sim::trainer::{Trainer, TypeDex};
    pub use crate::sim::Pokemon;
}
