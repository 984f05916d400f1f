use crate::data::types::{EffectivenessTable, PokeType, TYPE_COUNT};
use anyhow::{anyhow, bail, Context, Result};

/// Parse a type chart: a header of the 15 type labels, then one row per
/// attacking type holding its label and 15 multipliers (one per defending
/// type, header order).
pub fn parse_type_chart(text: &str) -> Result<EffectivenessTable> {
    let lines: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();
    if lines.len() != TYPE_COUNT + 1 {
        bail!(
            "Type chart must have {} lines (header + {} rows), found {}",
            TYPE_COUNT + 1,
            TYPE_COUNT,
            lines.len()
        );
    }

    parse_header(lines[0]).context("Failed to parse type chart header")?;

    let mut rows = [[0.0f64; TYPE_COUNT]; TYPE_COUNT];
    for (idx, line) in lines[1..].iter().enumerate() {
        rows[idx] =
            parse_row(line, PokeType::ALL[idx]).with_context(|| format!("Failed to parse type chart row {}", idx + 1))?;
    }
    Ok(EffectivenessTable::from_rows(rows))
}

fn parse_header(line: &str) -> Result<()> {
    let labels: Vec<&str> = line.split(',').map(str::trim).collect();
    if labels.len() != TYPE_COUNT {
        bail!("expected {} type labels, found {}", TYPE_COUNT, labels.len());
    }
    for (label, expected) in labels.iter().zip(PokeType::ALL) {
        let parsed: PokeType = label.parse()?;
        if parsed != expected {
            bail!("column '{}' is out of order, expected {}", label, expected);
        }
    }
    Ok(())
}

fn parse_row(line: &str, expected: PokeType) -> Result<[f64; TYPE_COUNT]> {
    let fields: Vec<&str> = line.split(',').map(str::trim).collect();
    if fields.len() != TYPE_COUNT + 1 {
        bail!("expected a label and {} multipliers, found {} fields", TYPE_COUNT, fields.len());
    }
    let label: PokeType = fields[0].parse()?;
    if label != expected {
        bail!("row '{}' is out of order, expected {}", fields[0], expected);
    }
    let mut row = [0.0f64; TYPE_COUNT];
    for (slot, raw) in row.iter_mut().zip(&fields[1..]) {
        let value: f64 = raw
            .parse()
            .map_err(|_| anyhow!("'{}' is not a number", raw))?;
        if !(0.0..=4.0).contains(&value) {
            bail!("multiplier {} is outside 0..=4", value);
        }
        *slot = value;
    }
    Ok(row)
}
