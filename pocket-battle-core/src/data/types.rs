use crate::parser::parse_type_chart;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const TYPE_COUNT: usize = 15;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum PokeType {
    Fire,
    Water,
    Grass,
    Bug,
    Dragon,
    Electric,
    Fighting,
    Flying,
    Ghost,
    Ground,
    Ice,
    Normal,
    Poison,
    Psychic,
    Rock,
}

impl PokeType {
    /// All types in chart order. `ALL[t.index()] == t`.
    pub const ALL: [PokeType; TYPE_COUNT] = [
        PokeType::Fire,
        PokeType::Water,
        PokeType::Grass,
        PokeType::Bug,
        PokeType::Dragon,
        PokeType::Electric,
        PokeType::Fighting,
        PokeType::Flying,
        PokeType::Ghost,
        PokeType::Ground,
        PokeType::Ice,
        PokeType::Normal,
        PokeType::Poison,
        PokeType::Psychic,
        PokeType::Rock,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn label(self) -> &'static str {
        match self {
            PokeType::Fire => "Fire",
            PokeType::Water => "Water",
            PokeType::Grass => "Grass",
            PokeType::Bug => "Bug",
            PokeType::Dragon => "Dragon",
            PokeType::Electric => "Electric",
            PokeType::Fighting => "Fighting",
            PokeType::Flying => "Flying",
            PokeType::Ghost => "Ghost",
            PokeType::Ground => "Ground",
            PokeType::Ice => "Ice",
            PokeType::Normal => "Normal",
            PokeType::Poison => "Poison",
            PokeType::Psychic => "Psychic",
            PokeType::Rock => "Rock",
        }
    }
}

impl fmt::Display for PokeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for PokeType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        PokeType::ALL
            .iter()
            .copied()
            .find(|t| t.label().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| anyhow::anyhow!("Unknown type label '{wanted}'"))
    }
}

/// Attack-type by defend-type multiplier chart.
#[derive(Clone, Debug, PartialEq)]
pub struct EffectivenessTable {
    rows: [[f64; TYPE_COUNT]; TYPE_COUNT],
}

static BUILTIN: Lazy<EffectivenessTable> = Lazy::new(|| {
    let csv = include_str!("../../data/type_effectiveness.csv");
    parse_type_chart(csv).expect("Failed to parse data/type_effectiveness.csv")
});

impl EffectivenessTable {
    pub fn from_rows(rows: [[f64; TYPE_COUNT]; TYPE_COUNT]) -> Self {
        Self { rows }
    }

    /// Chart compiled into the crate from `data/type_effectiveness.csv`.
    pub fn builtin() -> &'static EffectivenessTable {
        &BUILTIN
    }

    /// Every pairing at 1.0.
    pub fn neutral() -> Self {
        Self {
            rows: [[1.0; TYPE_COUNT]; TYPE_COUNT],
        }
    }

    pub fn effectiveness(&self, attack: PokeType, defend: PokeType) -> f64 {
        self.rows[attack.index()][defend.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_is_in_index_order() {
        for (idx, t) in PokeType::ALL.iter().enumerate() {
            assert_eq!(t.index(), idx);
        }
    }

    #[test]
    fn labels_parse_case_insensitively() {
        assert_eq!("psychic".parse::<PokeType>().unwrap(), PokeType::Psychic);
        assert_eq!(" ROCK ".parse::<PokeType>().unwrap(), PokeType::Rock);
        assert!("steel".parse::<PokeType>().is_err());
    }

    #[test]
    fn builtin_chart_matches_known_matchups() {
        let chart = EffectivenessTable::builtin();
        assert_eq!(chart.effectiveness(PokeType::Fire, PokeType::Grass), 2.0);
        assert_eq!(chart.effectiveness(PokeType::Water, PokeType::Fire), 2.0);
        assert_eq!(chart.effectiveness(PokeType::Grass, PokeType::Fire), 0.5);
        assert_eq!(chart.effectiveness(PokeType::Normal, PokeType::Ghost), 0.0);
        assert_eq!(chart.effectiveness(PokeType::Electric, PokeType::Ground), 0.0);
        assert_eq!(chart.effectiveness(PokeType::Dragon, PokeType::Dragon), 2.0);
        assert_eq!(chart.effectiveness(PokeType::Normal, PokeType::Normal), 1.0);
    }

    #[test]
    fn builtin_chart_stays_in_range() {
        let chart = EffectivenessTable::builtin();
        for attack in PokeType::ALL {
            for defend in PokeType::ALL {
                let value = chart.effectiveness(attack, defend);
                assert!((0.0..=4.0).contains(&value), "{attack} vs {defend}: {value}");
            }
        }
    }
}
