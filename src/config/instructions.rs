// config/instructions.rs

// Parses instruction scripts: one `move(<cm>)` or `turn(<deg>)` per line,
// case-insensitive, whitespace tolerant, '#' comments allowed anywhere.

// Dependencies
use super::environment::decomment;
use crate::navigation::Instruction;
use crate::BenchError;
use log::info;
use std::fs;
use std::path::Path;

/// Longest single move accepted in a script, cm
pub const MAX_MOVE_CM: f64 = 100_000.0;

/// Parses a single non-empty, comment-free instruction
fn parse_instruction(content: &str) -> Result<Instruction, String> {
    let compact: String = content
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_lowercase();

    let build: fn(f64) -> Instruction = if compact.starts_with("move(") && compact.ends_with(')') {
        Instruction::Move
    } else if compact.starts_with("turn(") && compact.ends_with(')') {
        Instruction::Turn
    } else {
        return Err("instruction must be move(<cm>) or turn(<deg>)".to_string());
    };

    let argument = &compact[5..compact.len() - 1];
    let value = match argument.parse::<f64>() {
        Ok(value) if value.is_finite() => value,
        _ => return Err(format!("'{}' is not a finite number", argument)),
    };
    let instruction = build(value);
    if matches!(instruction, Instruction::Move(d) if d.abs() > MAX_MOVE_CM) {
        return Err(format!("move of {} cm exceeds the {} cm limit", value, MAX_MOVE_CM));
    }
    Ok(instruction)
}

/// Parses a whole script, failing on the first bad line
pub fn parse_instructions(text: &str) -> Result<Vec<Instruction>, BenchError> {
    text.lines()
        .enumerate()
        .filter_map(|(index, raw)| {
            let content = decomment(raw);
            (!content.is_empty()).then_some((index + 1, raw, content))
        })
        .map(|(line, raw, content)| {
            parse_instruction(content).map_err(|reason| BenchError::Instruction {
                line,
                content: raw.to_string(),
                reason,
            })
        })
        .collect()
}

/// Reads and parses an instruction file
pub fn load_instructions(path: &Path) -> Result<Vec<Instruction>, BenchError> {
    let text = fs::read_to_string(path)?;
    let instructions = parse_instructions(&text)?;
    info!("Loaded {} instructions from {}", instructions.len(), path.display());
    Ok(instructions)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spaces_and_case_are_ignored() {
        assert_eq!(parse_instruction("MOVE ( 12.5 )"), Ok(Instruction::Move(12.5)));
        assert_eq!(parse_instruction("Turn(-90)"), Ok(Instruction::Turn(-90.0)));
    }

    #[test]
    fn rejects_other_commands() {
        assert!(parse_instruction("jump(3)").is_err());
        assert!(parse_instruction("move(3").is_err());
        assert!(parse_instruction("move()").is_err());
        assert!(parse_instruction("move(inf)").is_err());
    }

    #[test]
    fn caps_move_length() {
        assert_eq!(parse_instruction("move(-100000)"), Ok(Instruction::Move(-100_000.0)));
        assert!(parse_instruction("move(1e15)").is_err());
        assert_eq!(parse_instruction("turn(1e6)"), Ok(Instruction::Turn(1e6)));
    }
}
