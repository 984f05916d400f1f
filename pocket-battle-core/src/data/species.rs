use crate::data::types::PokeType;
use crate::sim::pokemon::Pokemon;
use crate::sim::team::TEAM_LIMIT;
use anyhow::{anyhow, bail, Result};
use rand::Rng;

#[derive(Clone, Copy, Debug)]
pub struct SpeciesData {
    pub name: &'static str,
    pub poketype: PokeType,
    pub hp: u16,
    pub battle_power: u16,
    pub defence: u16,
    pub speed: u16,
    pub evolution_line: &'static [&'static str],
}

/// Pickable species, keyed by normalized id. Iteration order is the pick order
/// used by [`choose_randomly`].
pub static SPECIES: phf::OrderedMap<&'static str, SpeciesData> = phf::phf_ordered_map! {
    "charmander" => SpeciesData {
        name: "Charmander",
        poketype: PokeType::Fire,
        hp: 39,
        battle_power: 52,
        defence: 43,
        speed: 65,
        evolution_line: &["Charmander", "Charmeleon", "Charizard"],
    },
    "squirtle" => SpeciesData {
        name: "Squirtle",
        poketype: PokeType::Water,
        hp: 44,
        battle_power: 48,
        defence: 65,
        speed: 43,
        evolution_line: &["Squirtle", "Wartortle", "Blastoise"],
    },
    "bulbasaur" => SpeciesData {
        name: "Bulbasaur",
        poketype: PokeType::Grass,
        hp: 45,
        battle_power: 49,
        defence: 49,
        speed: 45,
        evolution_line: &["Bulbasaur", "Ivysaur", "Venusaur"],
    },
    "caterpie" => SpeciesData {
        name: "Caterpie",
        poketype: PokeType::Bug,
        hp: 45,
        battle_power: 30,
        defence: 35,
        speed: 45,
        evolution_line: &["Caterpie", "Metapod", "Butterfree"],
    },
    "dratini" => SpeciesData {
        name: "Dratini",
        poketype: PokeType::Dragon,
        hp: 41,
        battle_power: 64,
        defence: 45,
        speed: 50,
        evolution_line: &["Dratini", "Dragonair", "Dragonite"],
    },
    "pichu" => SpeciesData {
        name: "Pichu",
        poketype: PokeType::Electric,
        hp: 20,
        battle_power: 40,
        defence: 15,
        speed: 60,
        evolution_line: &["Pichu", "Pikachu", "Raichu"],
    },
    "machop" => SpeciesData {
        name: "Machop",
        poketype: PokeType::Fighting,
        hp: 70,
        battle_power: 80,
        defence: 50,
        speed: 35,
        evolution_line: &["Machop", "Machoke", "Machamp"],
    },
    "pidgey" => SpeciesData {
        name: "Pidgey",
        poketype: PokeType::Flying,
        hp: 40,
        battle_power: 45,
        defence: 40,
        speed: 56,
        evolution_line: &["Pidgey", "Pidgeotto", "Pidgeot"],
    },
    "gastly" => SpeciesData {
        name: "Gastly",
        poketype: PokeType::Ghost,
        hp: 30,
        battle_power: 35,
        defence: 30,
        speed: 80,
        evolution_line: &["Gastly", "Haunter", "Gengar"],
    },
    "diglett" => SpeciesData {
        name: "Diglett",
        poketype: PokeType::Ground,
        hp: 10,
        battle_power: 55,
        defence: 25,
        speed: 95,
        evolution_line: &["Diglett", "Dugtrio"],
    },
    "swinub" => SpeciesData {
        name: "Swinub",
        poketype: PokeType::Ice,
        hp: 50,
        battle_power: 50,
        defence: 40,
        speed: 50,
        evolution_line: &["Swinub", "Piloswine", "Mamoswine"],
    },
    "eevee" => SpeciesData {
        name: "Eevee",
        poketype: PokeType::Normal,
        hp: 55,
        battle_power: 55,
        defence: 50,
        speed: 55,
        evolution_line: &[],
    },
    "ekans" => SpeciesData {
        name: "Ekans",
        poketype: PokeType::Poison,
        hp: 35,
        battle_power: 60,
        defence: 44,
        speed: 55,
        evolution_line: &["Ekans", "Arbok"],
    },
    "abra" => SpeciesData {
        name: "Abra",
        poketype: PokeType::Psychic,
        hp: 25,
        battle_power: 20,
        defence: 15,
        speed: 90,
        evolution_line: &["Abra", "Kadabra", "Alakazam"],
    },
    "geodude" => SpeciesData {
        name: "Geodude",
        poketype: PokeType::Rock,
        hp: 40,
        battle_power: 80,
        defence: 100,
        speed: 20,
        evolution_line: &["Geodude", "Graveler", "Golem"],
    },
};

pub fn get_species(name: &str) -> Option<&'static SpeciesData> {
    SPECIES.get(normalize_id(name).as_str())
}

/// Build a fresh level 1 Pokemon at full health.
pub fn create(species: &str) -> Result<Pokemon> {
    let data = get_species(species).ok_or_else(|| anyhow!("Species '{}' not found in SPECIES", species))?;
    Ok(Pokemon::from_species(data))
}

/// A full team of uniformly drawn species (repeats allowed).
pub fn choose_randomly(rng: &mut impl Rng) -> Vec<Pokemon> {
    (0..TEAM_LIMIT)
        .map(|_| {
            let (_, data) = SPECIES
                .index(rng.gen_range(0..SPECIES.len()))
                .expect("index drawn below SPECIES.len()");
            Pokemon::from_species(data)
        })
        .collect()
}

pub fn choose_manually<S: AsRef<str>>(names: &[S]) -> Result<Vec<Pokemon>> {
    if names.is_empty() {
        bail!("A team needs at least one Pokemon");
    }
    if names.len() > TEAM_LIMIT {
        bail!("A team holds at most {} Pokemon, got {}", TEAM_LIMIT, names.len());
    }
    names.iter().map(|name| create(name.as_ref())).collect()
}

fn normalize_id(name: &str) -> String {
    name.to_ascii_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect()
}
