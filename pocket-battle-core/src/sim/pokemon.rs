use crate::data::species::SpeciesData;
use crate::data::types::{EffectivenessTable, PokeType};
use serde::Serialize;
use std::fmt;

/// Stat multiplier applied on evolution.
pub const EVOLUTION_BOOST: f64 = 1.5;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Pokemon {
    pub name: String,
    pub poketype: PokeType,
    pub level: u32,
    pub experience: u32,
    /// Current health. Fractional after halved hits, negative once knocked out.
    pub health: f64,
    /// Health at creation; evolution does not move it.
    pub max_hp: f64,
    pub battle_power: f64,
    pub defence: f64,
    pub speed: f64,
    pub evolution_line: Vec<String>,
}

impl Pokemon {
    pub fn new(
        name: impl Into<String>,
        poketype: PokeType,
        health: f64,
        battle_power: f64,
        defence: f64,
        speed: f64,
        evolution_line: Vec<String>,
    ) -> Self {
        Self {
            name: name.into(),
            poketype,
            level: 1,
            experience: 0,
            health,
            max_hp: health,
            battle_power,
            defence,
            speed,
            evolution_line,
        }
    }

    pub fn from_species(data: &SpeciesData) -> Self {
        Self::new(
            data.name,
            data.poketype,
            data.hp as f64,
            data.battle_power as f64,
            data.defence as f64,
            data.speed as f64,
            data.evolution_line.iter().map(|s| s.to_string()).collect(),
        )
    }

    /// Damage this Pokemon deals to `other`, before trainer modifiers.
    pub fn attack(&self, other: &Pokemon, chart: &EffectivenessTable) -> f64 {
        let power = self.battle_power;
        let damage = if other.defence < power / 2.0 {
            power - other.defence
        } else if other.defence < power {
            (power * 5.0 / 8.0 - other.defence / 4.0).ceil()
        } else {
            (power / 4.0).ceil()
        };
        damage * chart.effectiveness(self.poketype, other.poketype)
    }

    /// Hits weaker than this Pokemon's defence are halved.
    pub fn defend(&mut self, damage: f64) {
        let effective = if damage < self.defence { damage / 2.0 } else { damage };
        self.health -= effective;
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0.0
    }

    /// Returns the name evolved into, if any.
    pub fn level_up(&mut self) -> Option<String> {
        self.level += 1;
        let next = self.next_evolution()?.to_string();
        self.evolve(next.clone());
        Some(next)
    }

    pub fn next_evolution(&self) -> Option<&str> {
        let position = self.evolution_line.iter().position(|n| *n == self.name)?;
        self.evolution_line.get(position + 1).map(String::as_str)
    }

    fn evolve(&mut self, next: String) {
        // health scales in place; max_hp is left alone
        self.battle_power *= EVOLUTION_BOOST;
        self.health *= EVOLUTION_BOOST;
        self.speed *= EVOLUTION_BOOST;
        self.defence *= EVOLUTION_BOOST;
        self.name = next;
    }

    pub fn heal(&mut self) {
        self.health = self.max_hp;
    }
}

impl fmt::Display for Pokemon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (Level {}) with {} health and {} experience",
            self.name, self.level, self.health, self.experience
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mk(power: f64, defence: f64) -> Pokemon {
        Pokemon::new("Testmon", PokeType::Normal, 100.0, power, defence, 10.0, Vec::new())
    }

    fn line(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn attack_low_defence_tier() {
        let chart = EffectivenessTable::neutral();
        assert_eq!(mk(50.0, 0.0).attack(&mk(0.0, 20.0), &chart), 30.0);
    }

    #[test]
    fn attack_mid_defence_tier_rounds_up() {
        let chart = EffectivenessTable::neutral();
        // 30*5/8 - 20/4 = 13.75
        assert_eq!(mk(30.0, 0.0).attack(&mk(0.0, 20.0), &chart), 14.0);
    }

    #[test]
    fn attack_high_defence_tier() {
        let chart = EffectivenessTable::neutral();
        // ceil(30/4)
        assert_eq!(mk(30.0, 0.0).attack(&mk(0.0, 40.0), &chart), 8.0);
        assert_eq!(mk(30.0, 0.0).attack(&mk(0.0, 30.0), &chart), 8.0);
    }

    #[test]
    fn attack_applies_type_multiplier_after_rounding() {
        let chart = EffectivenessTable::builtin();
        let mut fire = mk(30.0, 0.0);
        fire.poketype = PokeType::Fire;
        let mut grass = mk(0.0, 20.0);
        grass.poketype = PokeType::Grass;
        assert_eq!(fire.attack(&grass, chart), 28.0);
        let mut water = mk(0.0, 20.0);
        water.poketype = PokeType::Water;
        assert_eq!(fire.attack(&water, chart), 7.0);
    }

    #[test]
    fn defend_halves_hits_below_defence() {
        let mut target = mk(0.0, 20.0);
        target.defend(15.0);
        assert_eq!(target.health, 92.5);
        target.defend(20.0);
        assert_eq!(target.health, 72.5);
    }

    #[test]
    fn health_can_go_negative() {
        let mut target = mk(0.0, 1.0);
        target.defend(150.0);
        assert_eq!(target.health, -50.0);
        assert!(!target.is_alive());
    }

    #[test]
    fn zero_health_is_fainted() {
        let mut target = mk(0.0, 1.0);
        target.defend(100.0);
        assert!(!target.is_alive());
    }

    #[test]
    fn level_up_evolves_and_scales_stats() {
        let mut mon = Pokemon::new(
            "Gastly",
            PokeType::Ghost,
            30.0,
            35.0,
            30.0,
            80.0,
            line(&["Gastly", "Haunter", "Gengar"]),
        );
        mon.health = 20.0;
        assert_eq!(mon.level_up().as_deref(), Some("Haunter"));
        assert_eq!(mon.level, 2);
        assert_eq!(mon.name, "Haunter");
        assert_eq!(mon.battle_power, 52.5);
        assert_eq!(mon.defence, 45.0);
        assert_eq!(mon.speed, 120.0);
        assert_eq!(mon.health, 30.0);
        assert_eq!(mon.max_hp, 30.0);
    }

    #[test]
    fn evolved_health_is_not_capped_at_max() {
        let mut mon = Pokemon::new("Abra", PokeType::Psychic, 25.0, 20.0, 15.0, 90.0, line(&["Abra", "Kadabra"]));
        mon.level_up();
        assert_eq!(mon.health, 37.5);
        assert!(mon.health > mon.max_hp);
    }

    #[test]
    fn final_stage_only_gains_a_level() {
        let mut mon = Pokemon::new("Arbok", PokeType::Poison, 35.0, 60.0, 44.0, 55.0, line(&["Ekans", "Arbok"]));
        assert_eq!(mon.level_up(), None);
        assert_eq!(mon.level, 2);
        assert_eq!(mon.name, "Arbok");
        assert_eq!(mon.battle_power, 60.0);
    }

    #[test]
    fn empty_line_never_evolves() {
        let mut mon = mk(10.0, 10.0);
        assert_eq!(mon.level_up(), None);
        assert_eq!(mon.level, 2);
    }

    #[test]
    fn heal_restores_creation_health() {
        let mut mon = mk(10.0, 10.0);
        mon.defend(60.0);
        mon.heal();
        assert_eq!(mon.health, 100.0);
    }
}
