use serde_json::json;

#[derive(Clone, Debug, Default)]
pub struct BattleLogger {
    mode: String,
    log: Vec<String>,
}

impl BattleLogger {
    pub fn new() -> Self {
        Self {
            mode: "set".to_string(),
            log: Vec::new(),
        }
    }

    pub fn new_with_mode(mode: impl Into<String>) -> Self {
        Self {
            mode: mode.into(),
            log: Vec::new(),
        }
    }

    pub fn log_round(&mut self, round: usize) {
        self.log.push(format!("|round|{round}"));
    }

    pub fn log_move(&mut self, source: &str, target: &str, damage: f64) {
        self.log.push(format!("|move|{source}|{target}|{damage}"));
    }

    pub fn log_fatigue(&mut self, a: &str, b: &str) {
        self.log.push(format!("|-fatigue|{a}|{b}"));
    }

    pub fn log_faint(&mut self, pokemon: &str) {
        self.log.push(format!("|faint|{pokemon}"));
    }

    pub fn log_level_up(&mut self, pokemon: &str, level: u32) {
        self.log.push(format!("|-levelup|{pokemon}|{level}"));
    }

    pub fn log_evolve(&mut self, from: &str, to: &str) {
        self.log.push(format!("|-evolve|{from}|{to}"));
    }

    pub fn log_win(&mut self, winner: &str) {
        self.log.push(format!("|win|{winner}"));
    }

    pub fn log_tie(&mut self) {
        self.log.push("|tie|".to_string());
    }

    pub fn log_lines(&self) -> &[String] {
        &self.log
    }

    pub fn to_json(&self) -> serde_json::Value {
        json!({
            "mode": self.mode,
            "log": self.log,
        })
    }
}

pub fn side_ident(side_idx: usize, name: &str) -> String {
    let side = if side_idx == 0 { "p1a" } else { "p2a" };
    format!("{side}: {name}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_lines_in_order() {
        let mut logger = BattleLogger::new_with_mode("rotate");
        logger.log_round(1);
        logger.log_move("p1a: Abra", "p2a: Eevee", 14.0);
        logger.log_faint("p2a: Eevee");
        logger.log_win("Red");
        assert_eq!(
            logger.log_lines(),
            ["|round|1", "|move|p1a: Abra|p2a: Eevee|14", "|faint|p2a: Eevee", "|win|Red"]
        );
        let json = logger.to_json();
        assert_eq!(json["mode"], "rotate");
        assert_eq!(json["log"].as_array().map(Vec::len), Some(4));
    }

    #[test]
    fn side_idents_match_protocol() {
        assert_eq!(side_ident(0, "Abra"), "p1a: Abra");
        assert_eq!(side_ident(1, "Abra"), "p2a: Abra");
    }
}
