use crate::battle_logger::{side_ident, BattleLogger};
use crate::data::types::EffectivenessTable;
use crate::sim::pokemon::Pokemon;
use crate::sim::team::BattleMode;
use crate::sim::trainer::Trainer;
use serde::Serialize;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub enum BattleResult {
    TeamAWins,
    TeamBWins,
    Draw,
}

/// One battle between two trainers. Both teams are lined up for `mode` on
/// construction and fight until one roster is empty.
pub struct Battle<'a> {
    trainer_a: &'a mut Trainer,
    trainer_b: &'a mut Trainer,
    mode: BattleMode,
    chart: &'a EffectivenessTable,
    logger: BattleLogger,
    round: usize,
}

impl<'a> Battle<'a> {
    pub fn new(
        trainer_a: &'a mut Trainer,
        trainer_b: &'a mut Trainer,
        mode: BattleMode,
        chart: &'a EffectivenessTable,
    ) -> Self {
        trainer_a.team_mut().assemble(mode);
        trainer_b.team_mut().assemble(mode);
        Self {
            trainer_a,
            trainer_b,
            mode,
            chart,
            logger: BattleLogger::new_with_mode(mode.to_string()),
            round: 0,
        }
    }

    pub fn commence_battle(&mut self) -> BattleResult {
        loop {
            if let Some(result) = self.outcome() {
                match result {
                    BattleResult::TeamAWins => self.logger.log_win(self.trainer_a.name()),
                    BattleResult::TeamBWins => self.logger.log_win(self.trainer_b.name()),
                    BattleResult::Draw => self.logger.log_tie(),
                }
                tracing::debug!(
                    mode = %self.mode,
                    rounds = self.round,
                    ?result,
                    "{} vs {} finished",
                    self.trainer_a.name(),
                    self.trainer_b.name()
                );
                return result;
            }
            self.play_round();
        }
    }

    /// `None` while both rosters still have Pokemon.
    pub fn outcome(&self) -> Option<BattleResult> {
        match (self.trainer_a.team().is_empty(), self.trainer_b.team().is_empty()) {
            (true, true) => Some(BattleResult::Draw),
            (true, false) => Some(BattleResult::TeamBWins),
            (false, true) => Some(BattleResult::TeamAWins),
            (false, false) => None,
        }
    }

    /// Fight one round between the two active Pokemon. Does nothing once
    /// the battle is over.
    pub fn play_round(&mut self) {
        let rotate = matches!(self.mode, BattleMode::Rotate);
        let (slot_a, slot_b) = {
            let (roster_a, roster_b) = (self.trainer_a.team().roster(), self.trainer_b.team().roster());
            match (roster_a.peek(), roster_b.peek()) {
                (Some(a), Some(b)) => (a, b),
                _ => return,
            }
        };
        if rotate {
            self.trainer_a.team_mut().roster_mut().take();
            self.trainer_b.team_mut().roster_mut().take();
        }
        self.round += 1;
        self.logger.log_round(self.round);

        let type_a = self.trainer_a.team().member(slot_a).poketype;
        let type_b = self.trainer_b.team().member(slot_b).poketype;
        self.trainer_a.register(type_b);
        self.trainer_b.register(type_a);

        let completion_a = self.trainer_a.pokedex_completion();
        let completion_b = self.trainer_b.pokedex_completion();
        let chart = self.chart;
        let logger = &mut self.logger;
        let p1 = self.trainer_a.team_mut().member_mut(slot_a);
        let p2 = self.trainer_b.team_mut().member_mut(slot_b);
        let (alive_a, alive_b) = resolve_round(
            Fighter::new(0, p1, completion_a),
            Fighter::new(1, p2, completion_b),
            chart,
            logger,
        );
        tracing::debug!(
            round = self.round,
            alive_a,
            alive_b,
            "round resolved"
        );

        settle(self.trainer_a, slot_a, alive_a, rotate, &mut self.logger, 0);
        settle(self.trainer_b, slot_b, alive_b, rotate, &mut self.logger, 1);

        if matches!(self.mode, BattleMode::Optimise(_)) {
            self.trainer_a.team_mut().reform();
            self.trainer_b.team_mut().reform();
        }
    }

    pub fn trainer_a(&self) -> &Trainer {
        &*self.trainer_a
    }

    pub fn trainer_b(&self) -> &Trainer {
        &*self.trainer_b
    }

    pub fn round(&self) -> usize {
        self.round
    }

    pub fn mode(&self) -> BattleMode {
        self.mode
    }

    pub fn log(&self) -> &BattleLogger {
        &self.logger
    }

    pub fn into_log(self) -> BattleLogger {
        self.logger
    }
}

/// Put a rotating Pokemon back if it survived, or pop a fainted one off a stack.
fn settle(trainer: &mut Trainer, slot: usize, alive: bool, rotate: bool, logger: &mut BattleLogger, side: usize) {
    let roster = trainer.team_mut().roster_mut();
    match (rotate, alive) {
        (true, true) => {
            roster.put(slot);
        }
        (false, false) => {
            roster.take();
        }
        _ => {}
    }
    if !alive {
        logger.log_faint(&side_ident(side, &trainer.team().member(slot).name));
    }
}

/// A Pokemon in the ring together with its trainer's dex completion.
pub struct Fighter<'p> {
    side: usize,
    pokemon: &'p mut Pokemon,
    completion: f64,
}

impl<'p> Fighter<'p> {
    pub fn new(side: usize, pokemon: &'p mut Pokemon, completion: f64) -> Self {
        Self {
            side,
            pokemon,
            completion,
        }
    }

    fn ident(&self) -> String {
        side_ident(self.side, &self.pokemon.name)
    }
}

/// Resolve one exchange. Returns whether each Pokemon is still alive.
///
/// Equal speed: both attack, first Pokemon first. Otherwise the faster one
/// attacks and the other counters only if it survived. A round where nobody
/// faints costs both Pokemon one health; a lone survivor levels up.
pub fn resolve_round(
    mut p1: Fighter<'_>,
    mut p2: Fighter<'_>,
    chart: &EffectivenessTable,
    logger: &mut BattleLogger,
) -> (bool, bool) {
    if p1.pokemon.speed == p2.pokemon.speed {
        strike(&p1, &mut p2, chart, logger);
        strike(&p2, &mut p1, chart, logger);
        if p1.pokemon.is_alive() && p2.pokemon.is_alive() {
            both_minus_one(&mut p1, &mut p2, logger);
        } else {
            level_sole_survivor(&mut p1, &mut p2, logger);
        }
    } else if p1.pokemon.speed > p2.pokemon.speed {
        not_equal_speed(&mut p1, &mut p2, chart, logger);
    } else {
        not_equal_speed(&mut p2, &mut p1, chart, logger);
    }
    (p1.pokemon.is_alive(), p2.pokemon.is_alive())
}

fn not_equal_speed(
    attacker: &mut Fighter<'_>,
    defender: &mut Fighter<'_>,
    chart: &EffectivenessTable,
    logger: &mut BattleLogger,
) {
    strike(attacker, defender, chart, logger);
    if !defender.pokemon.is_alive() {
        level_up(attacker, logger);
        return;
    }
    strike(defender, attacker, chart, logger);
    if attacker.pokemon.is_alive() {
        both_minus_one(attacker, defender, logger);
    } else {
        level_up(defender, logger);
    }
}

/// Damage scaled by the attacker's and defender's dex completion, rounded up.
pub fn scaled_damage(
    attacker: &Pokemon,
    defender: &Pokemon,
    attacker_completion: f64,
    defender_completion: f64,
    chart: &EffectivenessTable,
) -> f64 {
    let ratio = if defender_completion > 0.0 {
        attacker_completion / defender_completion
    } else {
        1.0
    };
    (attacker.attack(defender, chart) * ratio).ceil()
}

fn strike(attacker: &Fighter<'_>, defender: &mut Fighter<'_>, chart: &EffectivenessTable, logger: &mut BattleLogger) {
    let damage = scaled_damage(
        attacker.pokemon,
        defender.pokemon,
        attacker.completion,
        defender.completion,
        chart,
    );
    defender.pokemon.defend(damage);
    logger.log_move(&attacker.ident(), &defender.ident(), damage);
}

fn both_minus_one(p1: &mut Fighter<'_>, p2: &mut Fighter<'_>, logger: &mut BattleLogger) {
    p1.pokemon.health -= 1.0;
    p2.pokemon.health -= 1.0;
    logger.log_fatigue(&p1.ident(), &p2.ident());
    level_sole_survivor(p1, p2, logger);
}

fn level_sole_survivor(p1: &mut Fighter<'_>, p2: &mut Fighter<'_>, logger: &mut BattleLogger) {
    match (p1.pokemon.is_alive(), p2.pokemon.is_alive()) {
        (true, false) => level_up(p1, logger),
        (false, true) => level_up(p2, logger),
        _ => {}
    }
}

fn level_up(fighter: &mut Fighter<'_>, logger: &mut BattleLogger) {
    let before = fighter.ident();
    if let Some(evolved) = fighter.pokemon.level_up() {
        logger.log_evolve(&before, &evolved);
    }
    logger.log_level_up(&fighter.ident(), fighter.pokemon.level);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::types::PokeType;

    fn mon(health: f64, power: f64, defence: f64, speed: f64) -> Pokemon {
        Pokemon::new("Testmon", PokeType::Normal, health, power, defence, speed, Vec::new())
    }

    fn run(p1: &mut Pokemon, p2: &mut Pokemon, c1: f64, c2: f64) -> (bool, bool) {
        let chart = EffectivenessTable::neutral();
        let mut logger = BattleLogger::new();
        resolve_round(Fighter::new(0, p1, c1), Fighter::new(1, p2, c2), &chart, &mut logger)
    }

    #[test]
    fn equal_speed_exchange_with_fatigue() {
        let mut a = mon(100.0, 50.0, 20.0, 10.0);
        let mut b = mon(100.0, 30.0, 40.0, 10.0);
        assert_eq!(run(&mut a, &mut b, 0.5, 0.5), (true, true));
        // a deals ceil(31.25 - 10) = 22 to b (halved: 22 < 40),
        // b deals ceil(18.75 - 5) = 14 to a (halved: 14 < 20), then -1 each
        assert_eq!(b.health, 88.0);
        assert_eq!(a.health, 92.0);
        assert_eq!(a.level, 1);
        assert_eq!(b.level, 1);
    }

    #[test]
    fn equal_speed_second_attacker_strikes_even_when_fainted() {
        let mut a = mon(10.0, 50.0, 1.0, 10.0);
        let mut b = mon(5.0, 30.0, 1.0, 10.0);
        assert_eq!(run(&mut a, &mut b, 1.0, 1.0), (false, false));
        assert_eq!(a.level, 1);
        assert_eq!(b.level, 1);
    }

    #[test]
    fn faster_knocks_out_and_levels_up() {
        let mut slow = mon(10.0, 100.0, 1.0, 5.0);
        let mut fast = mon(50.0, 50.0, 1.0, 9.0);
        assert_eq!(run(&mut slow, &mut fast, 1.0, 1.0), (false, true));
        assert_eq!(fast.health, 50.0);
        assert_eq!(fast.level, 2);
    }

    #[test]
    fn counter_knockout_levels_the_defender() {
        let mut fast = mon(10.0, 4.0, 1.0, 9.0);
        let mut slow = mon(50.0, 100.0, 1.0, 5.0);
        assert_eq!(run(&mut fast, &mut slow, 1.0, 1.0), (false, true));
        assert_eq!(slow.level, 2);
        assert_eq!(fast.level, 1);
    }

    #[test]
    fn fatigue_can_finish_a_pokemon() {
        // b takes 3 from a, leaving 1, then fatigue knocks it out
        let mut a = mon(50.0, 4.0, 1.0, 9.0);
        let mut b = mon(4.0, 4.0, 1.0, 5.0);
        assert_eq!(run(&mut a, &mut b, 1.0, 1.0), (true, false));
        assert_eq!(b.health, 0.0);
        assert_eq!(a.level, 2);
    }

    #[test]
    fn dex_ratio_scales_and_rounds_up() {
        let chart = EffectivenessTable::neutral();
        let a = mon(100.0, 50.0, 20.0, 10.0);
        let b = mon(100.0, 30.0, 20.0, 10.0);
        // 30 * (0.2 / 0.13) = 46.15...
        assert_eq!(scaled_damage(&a, &b, 0.2, 0.13, &chart), 47.0);
        assert_eq!(scaled_damage(&a, &b, 0.13, 0.13, &chart), 30.0);
        assert_eq!(scaled_damage(&a, &b, 0.5, 0.0, &chart), 30.0);
    }
}
