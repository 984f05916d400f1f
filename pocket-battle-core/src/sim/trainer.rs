use crate::data::species::choose_randomly;
use crate::data::types::{PokeType, TYPE_COUNT};
use crate::sim::pokemon::Pokemon;
use crate::sim::team::{BattleMode, PokeTeam};
use anyhow::Result;
use rand::Rng;
use std::fmt;

/// Types a trainer has come across, one flag per [`PokeType`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TypeDex {
    seen: [bool; TYPE_COUNT],
}

impl TypeDex {
    /// Returns true if the type was new.
    pub fn register(&mut self, poketype: PokeType) -> bool {
        let slot = &mut self.seen[poketype.index()];
        let added = !*slot;
        *slot = true;
        added
    }

    pub fn contains(&self, poketype: PokeType) -> bool {
        self.seen[poketype.index()]
    }

    pub fn count(&self) -> usize {
        self.seen.iter().filter(|seen| **seen).count()
    }

    /// Share of all types seen, rounded to two decimals.
    pub fn completion(&self) -> f64 {
        let ratio = self.count() as f64 / TYPE_COUNT as f64;
        (ratio * 100.0).round() / 100.0
    }
}

#[derive(Clone, Debug)]
pub struct Trainer {
    name: String,
    team: PokeTeam,
    dex: TypeDex,
}

impl Trainer {
    /// The team starts lined up in [`BattleMode::Set`]; its own types are registered.
    pub fn new(name: impl Into<String>, members: Vec<Pokemon>) -> Result<Self> {
        let team = PokeTeam::new(members, BattleMode::Set)?;
        let mut trainer = Self {
            name: name.into(),
            team,
            dex: TypeDex::default(),
        };
        let own_types: Vec<PokeType> = trainer.team.members().iter().map(|p| p.poketype).collect();
        for poketype in own_types {
            trainer.dex.register(poketype);
        }
        Ok(trainer)
    }

    pub fn with_random_team(name: impl Into<String>, rng: &mut impl Rng) -> Self {
        Self::new(name, choose_randomly(rng)).expect("random teams never exceed TEAM_LIMIT")
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn team(&self) -> &PokeTeam {
        &self.team
    }

    pub fn team_mut(&mut self) -> &mut PokeTeam {
        &mut self.team
    }

    pub fn dex(&self) -> &TypeDex {
        &self.dex
    }

    pub fn register_pokemon(&mut self, pokemon: &Pokemon) {
        self.dex.register(pokemon.poketype);
    }

    pub fn register(&mut self, poketype: PokeType) {
        self.dex.register(poketype);
    }

    pub fn pokedex_completion(&self) -> f64 {
        self.dex.completion()
    }
}

impl fmt::Display for Trainer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Trainer {} Pokedex Completion: {}%",
            self.name,
            (self.pokedex_completion() * 100.0).round() as u32
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::species::create;

    #[test]
    fn register_is_idempotent() {
        let mut dex = TypeDex::default();
        assert!(dex.register(PokeType::Fire));
        assert!(!dex.register(PokeType::Fire));
        assert_eq!(dex.count(), 1);
        assert!(dex.contains(PokeType::Fire));
        assert!(!dex.contains(PokeType::Water));
    }

    #[test]
    fn completion_rounds_to_two_decimals() {
        let mut dex = TypeDex::default();
        assert_eq!(dex.completion(), 0.0);
        dex.register(PokeType::Fire);
        assert_eq!(dex.completion(), 0.07);
        dex.register(PokeType::Water);
        assert_eq!(dex.completion(), 0.13);
    }

    #[test]
    fn completion_caps_at_one() {
        let mut dex = TypeDex::default();
        for poketype in PokeType::ALL {
            dex.register(poketype);
            dex.register(poketype);
        }
        assert_eq!(dex.completion(), 1.0);
    }

    #[test]
    fn new_trainer_registers_own_team() {
        let members = vec![
            create("Charmander").unwrap(),
            create("Charmander").unwrap(),
            create("Squirtle").unwrap(),
        ];
        let trainer = Trainer::new("Ash", members).unwrap();
        assert_eq!(trainer.dex().count(), 2);
        assert_eq!(trainer.pokedex_completion(), 0.13);
        assert_eq!(trainer.to_string(), "Trainer Ash Pokedex Completion: 13%");
    }
}
