use crate::sim::pokemon::Pokemon;
use anyhow::{bail, Result};
use serde::Serialize;
use std::collections::VecDeque;
use std::fmt;
use std::str::FromStr;

pub const TEAM_LIMIT: usize = 6;

/// Attribute used to rank a team in [`BattleMode::Optimise`].
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Criterion {
    Health,
    Defence,
    BattlePower,
    Speed,
    Level,
}

impl Criterion {
    pub const ALL: [Criterion; 5] = [
        Criterion::Health,
        Criterion::Defence,
        Criterion::BattlePower,
        Criterion::Speed,
        Criterion::Level,
    ];

    pub fn score(self, pokemon: &Pokemon) -> f64 {
        match self {
            Criterion::Health => pokemon.health,
            Criterion::Defence => pokemon.defence,
            Criterion::BattlePower => pokemon.battle_power,
            Criterion::Speed => pokemon.speed,
            Criterion::Level => pokemon.level as f64,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Criterion::Health => "health",
            Criterion::Defence => "defence",
            Criterion::BattlePower => "battle_power",
            Criterion::Speed => "speed",
            Criterion::Level => "level",
        }
    }
}

impl FromStr for Criterion {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        Ok(match s.trim().to_ascii_lowercase().as_str() {
            "health" | "hp" => Criterion::Health,
            "defence" | "defense" => Criterion::Defence,
            "battle_power" | "power" => Criterion::BattlePower,
            "speed" => Criterion::Speed,
            "level" => Criterion::Level,
            other => bail!("Unknown criterion {other} (use health, defence, power, speed or level)"),
        })
    }
}

/// How a team lines up for a battle.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize)]
pub enum BattleMode {
    /// Stack: the last listed Pokemon fights first and stays in until it faints.
    Set,
    /// Queue: each Pokemon fights one round, then goes to the back.
    Rotate,
    /// Stack ranked by the criterion, re-ranked after every round.
    Optimise(Criterion),
}

impl BattleMode {
    /// Every mode, with one `Optimise` entry per criterion.
    pub fn all() -> Vec<BattleMode> {
        let mut modes = vec![BattleMode::Set, BattleMode::Rotate];
        modes.extend(Criterion::ALL.iter().map(|c| BattleMode::Optimise(*c)));
        modes
    }

    /// Parse a mode name; `criterion` is only used by `optimise`.
    pub fn parse(mode: &str, criterion: Criterion) -> Result<Self> {
        Ok(match mode.trim().to_ascii_lowercase().as_str() {
            "set" => BattleMode::Set,
            "rotate" => BattleMode::Rotate,
            "optimise" | "optimize" => BattleMode::Optimise(criterion),
            other => bail!("Unknown battle mode {other} (use set, rotate or optimise)"),
        })
    }

    fn is_queue(self) -> bool {
        matches!(self, BattleMode::Rotate)
    }
}

impl fmt::Display for BattleMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BattleMode::Set => f.write_str("set"),
            BattleMode::Rotate => f.write_str("rotate"),
            BattleMode::Optimise(c) => write!(f, "optimise:{}", c.label()),
        }
    }
}

/// Fight order over slots of a team's backing list.
///
/// Set and Optimise use stack discipline (top is the back of `slots`), Rotate
/// uses queue discipline (next is the front of `slots`).
#[derive(Clone, Debug, PartialEq)]
pub struct Roster {
    mode: BattleMode,
    slots: VecDeque<usize>,
}

impl Roster {
    pub fn assemble(mode: BattleMode, members: &[Pokemon]) -> Self {
        let mut roster = Roster {
            mode,
            slots: VecDeque::with_capacity(TEAM_LIMIT),
        };
        match mode {
            BattleMode::Set | BattleMode::Rotate => {
                for slot in 0..members.len() {
                    roster.put(slot);
                }
            }
            BattleMode::Optimise(criterion) => {
                let ranked = rank((0..members.len()).collect(), members, criterion);
                roster.push_strongest_on_top(ranked);
            }
        }
        roster
    }

    pub fn mode(&self) -> BattleMode {
        self.mode
    }

    pub fn peek(&self) -> Option<usize> {
        if self.mode.is_queue() {
            self.slots.front().copied()
        } else {
            self.slots.back().copied()
        }
    }

    /// Pop (stack) or serve (queue).
    pub fn take(&mut self) -> Option<usize> {
        if self.mode.is_queue() {
            self.slots.pop_front()
        } else {
            self.slots.pop_back()
        }
    }

    /// Push (stack) or append (queue). Returns false and leaves the roster
    /// alone once it already holds [`TEAM_LIMIT`] slots.
    pub fn put(&mut self, slot: usize) -> bool {
        if self.slots.len() >= TEAM_LIMIT {
            return false;
        }
        self.slots.push_back(slot);
        true
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Slots in fight order, next fighter first.
    pub fn order(&self) -> Vec<usize> {
        if self.mode.is_queue() {
            self.slots.iter().copied().collect()
        } else {
            self.slots.iter().rev().copied().collect()
        }
    }

    /// Re-rank the remaining fighters. Only Optimise rosters change.
    pub fn reform(&mut self, members: &[Pokemon]) {
        if let BattleMode::Optimise(criterion) = self.mode {
            let ranked = rank(self.drain_alive(members), members, criterion);
            self.push_strongest_on_top(ranked);
        }
    }

    /// One-off formation change.
    ///
    /// Set: three pop/push pairs on the top of the stack (leaves the order as is).
    /// Rotate: the first three keep their place, the rest are reversed.
    /// Optimise: re-ranked with the weakest on top.
    pub fn special(&mut self, members: &[Pokemon]) {
        match self.mode {
            BattleMode::Set => {
                for _ in 0..3 {
                    if let Some(slot) = self.take() {
                        self.put(slot);
                    }
                }
            }
            BattleMode::Rotate => {
                let served: Vec<usize> = self.slots.drain(..).collect();
                let kept = served.len().min(3);
                self.slots.extend(&served[..kept]);
                self.slots.extend(served[kept..].iter().rev());
            }
            BattleMode::Optimise(criterion) => {
                let ranked = rank(self.drain_alive(members), members, criterion);
                for slot in ranked {
                    self.put(slot);
                }
            }
        }
    }

    fn drain_alive(&mut self, members: &[Pokemon]) -> Vec<usize> {
        let mut alive = Vec::with_capacity(self.slots.len());
        while let Some(slot) = self.take() {
            if members[slot].is_alive() {
                alive.push(slot);
            }
        }
        alive
    }

    fn push_strongest_on_top(&mut self, ranked: Vec<usize>) {
        for slot in ranked.into_iter().rev() {
            self.put(slot);
        }
    }
}

/// Strongest first. Ties go to the lower slot so re-ranking is stable.
fn rank(mut slots: Vec<usize>, members: &[Pokemon], criterion: Criterion) -> Vec<usize> {
    slots.sort_by(|&a, &b| {
        criterion
            .score(&members[b])
            .total_cmp(&criterion.score(&members[a]))
            .then_with(|| a.cmp(&b))
    });
    slots
}

/// A trainer's Pokemon plus the roster they currently fight in.
#[derive(Clone, Debug)]
pub struct PokeTeam {
    members: Vec<Pokemon>,
    roster: Roster,
}

impl PokeTeam {
    pub fn new(members: Vec<Pokemon>, mode: BattleMode) -> Result<Self> {
        if members.len() > TEAM_LIMIT {
            bail!("A team holds at most {} Pokemon, got {}", TEAM_LIMIT, members.len());
        }
        let roster = Roster::assemble(mode, &members);
        Ok(Self { members, roster })
    }

    pub fn members(&self) -> &[Pokemon] {
        &self.members
    }

    pub fn member(&self, slot: usize) -> &Pokemon {
        &self.members[slot]
    }

    pub fn member_mut(&mut self, slot: usize) -> &mut Pokemon {
        &mut self.members[slot]
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub(crate) fn roster_mut(&mut self) -> &mut Roster {
        &mut self.roster
    }

    pub fn mode(&self) -> BattleMode {
        self.roster.mode()
    }

    /// Rebuild the roster from every member, fainted or not.
    pub fn assemble(&mut self, mode: BattleMode) {
        self.roster = Roster::assemble(mode, &self.members);
    }

    /// Heal every member to its creation health and line up again.
    pub fn regenerate(&mut self, mode: BattleMode) {
        for pokemon in &mut self.members {
            pokemon.heal();
        }
        self.assemble(mode);
    }

    pub fn reform(&mut self) {
        self.roster.reform(&self.members);
    }

    pub fn special(&mut self) {
        self.roster.special(&self.members);
    }

    pub fn active(&self) -> Option<&Pokemon> {
        self.roster.peek().map(|slot| &self.members[slot])
    }

    pub fn is_empty(&self) -> bool {
        self.roster.is_empty()
    }

    /// Pokemon still in the roster.
    pub fn len(&self) -> usize {
        self.roster.len()
    }

    /// Roster names in fight order.
    pub fn names(&self) -> Vec<&str> {
        self.roster
            .order()
            .into_iter()
            .map(|slot| self.members[slot].name.as_str())
            .collect()
    }
}

impl fmt::Display for PokeTeam {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.names().join(" "))
    }
}
