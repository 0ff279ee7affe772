// config/environment.rs

// Parses environment files (KEY=VALUE lines with inline '#' comments) into a
// structured EnvConfig with explicit defaults, and rewrites the obstacle block
// of an existing file after a new layout has been generated. Unknown keys are
// reported and skipped; malformed values stop parsing with the line number.

// Dependencies
use crate::core::{Obstacle, RobotConfig, RobotShape};
use crate::navigation::{Goal, Pose, TurnConvention};
use crate::BenchError;
use log::{info, warn};
use nalgebra::Point2;
use std::fs;
use std::path::{Path, PathBuf};

/// Header line written above a generated obstacle block
pub const OBSTACLE_BLOCK_HEADER: &str = "# --- Obstacles (auto-generated) ---";

const OBSTACLE_KEY: &str = "OBSTACLE";

/// Goal x used by [`EnvConfig::generator_default`]
pub const GENERATOR_GOAL_X_CM: f64 = 500.0;

/// Everything a benchmark run needs from the environment file
#[derive(Clone, Debug, PartialEq)]
pub struct EnvConfig {
    /// Render target width, pixels
    pub screen_width: u32,
    /// Render target height, pixels
    pub screen_height: u32,
    /// Start pose, heading already wrapped
    pub start: Pose,
    /// Goal disc
    pub goal: Goal,
    /// Meaning of a positive turn angle
    pub turn_convention: TurnConvention,
    /// Robot footprint fields and clearance
    pub robot: RobotConfig,
    /// Obstacles in file order
    pub obstacles: Vec<Obstacle>,
}

impl Default for EnvConfig {
    fn default() -> Self {
        EnvConfig {
            screen_width: 800,
            screen_height: 600,
            start: Pose::new(0.0, 0.0, 0.0),
            goal: Goal {
                position: Point2::new(0.0, 0.0),
                radius_cm: 10.0,
            },
            turn_convention: TurnConvention::RightPositive,
            robot: RobotConfig::default(),
            obstacles: Vec::new(),
        }
    }
}

impl EnvConfig {
    /// Defaults for layout generation: [`EnvConfig::default`] with the goal
    /// at ([`GENERATOR_GOAL_X_CM`], 0)
    pub fn generator_default() -> Self {
        let mut cfg = EnvConfig::default();
        cfg.goal.position = Point2::new(GENERATOR_GOAL_X_CM, 0.0);
        cfg
    }
}

/// Keys seen while parsing, for diagnostics
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ParseReport {
    /// Recognised keys in file order (OBSTACLE once per line)
    pub recognized: Vec<String>,
    /// Unknown keys with their 1-based line number
    pub unknown: Vec<(usize, String)>,
}

/// Strips an inline `#` comment and surrounding whitespace
pub(crate) fn decomment(line: &str) -> &str {
    line.split('#').next().unwrap_or_default().trim()
}

/// True for an `OBSTACLE=...` line, comments ignored
fn is_obstacle_line(raw: &str) -> bool {
    decomment(raw)
        .split_once('=')
        .is_some_and(|(key, _)| key.trim().eq_ignore_ascii_case(OBSTACLE_KEY))
}

fn parse_float(value: &str) -> Result<f64, String> {
    match value.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(format!("'{}' is not a finite number", value)),
    }
}

/// Accepts "600" and "600.0", rejects fractions and negatives
fn parse_count(value: &str) -> Result<u32, String> {
    let v = parse_float(value)?;
    if v.fract() != 0.0 || v < 0.0 || v > f64::from(u32::MAX) {
        return Err(format!("'{}' is not a non-negative integer", value));
    }
    Ok(v as u32)
}

impl EnvConfig {
    /// Parses environment text. Fails on the first malformed line.
    pub fn parse(text: &str) -> Result<(Self, ParseReport), BenchError> {
        EnvConfig::parse_over(text, EnvConfig::default())
    }

    /// Parses environment text on top of `base`; keys absent from the text
    /// keep the value they have in `base`
    pub fn parse_over(text: &str, base: EnvConfig) -> Result<(Self, ParseReport), BenchError> {
        let mut cfg = base;
        let mut report = ParseReport::default();
        let mut start_heading = cfg.start.heading_deg;

        for (index, raw) in text.lines().enumerate() {
            let line = index + 1;
            let content = decomment(raw);
            if content.is_empty() {
                continue;
            }
            let malformed = |reason: String| BenchError::Config {
                line,
                content: raw.to_string(),
                reason,
            };

            let (key, value) = content
                .split_once('=')
                .ok_or_else(|| malformed("expected KEY=VALUE".to_string()))?;
            let key = key.trim().to_uppercase();
            let value = value.trim();

            let applied: Option<Result<(), String>> = match key.as_str() {
                OBSTACLE_KEY => Some(value.parse::<Obstacle>().map(|o| cfg.obstacles.push(o))),
                "START_X" => Some(parse_float(value).map(|v| cfg.start.x = v)),
                "START_Y" => Some(parse_float(value).map(|v| cfg.start.y = v)),
                "START_HEADING_DEG" => Some(parse_float(value).map(|v| start_heading = v)),
                "GOAL_X" => Some(parse_float(value).map(|v| cfg.goal.position.x = v)),
                "GOAL_Y" => Some(parse_float(value).map(|v| cfg.goal.position.y = v)),
                "GOAL_RADIUS_CM" => Some(parse_float(value).map(|v| cfg.goal.radius_cm = v)),
                "ROBOT_WIDTH_CM" => Some(parse_float(value).map(|v| cfg.robot.width_cm = v)),
                "ROBOT_HEIGHT_CM" => Some(parse_float(value).map(|v| cfg.robot.height_cm = v)),
                "ROBOT_RADIUS_CM" => Some(parse_float(value).map(|v| cfg.robot.radius_cm = v)),
                "ROBOT_POLY_RADIUS_CM" => {
                    Some(parse_float(value).map(|v| cfg.robot.poly_radius_cm = v))
                }
                "CLEARANCE_CM" => Some(parse_float(value).map(|v| cfg.robot.clearance_cm = v)),
                "SCREEN_WIDTH" => Some(parse_count(value).map(|v| cfg.screen_width = v)),
                "SCREEN_HEIGHT" => Some(parse_count(value).map(|v| cfg.screen_height = v)),
                "ROBOT_POLY_FACES" => Some(parse_count(value).map(|v| cfg.robot.poly_faces = v)),
                "ROBOT_SHAPE" => {
                    cfg.robot.shape = RobotShape::from_name(value);
                    Some(Ok(()))
                }
                "TURN_CONVENTION" => Some(
                    value
                        .parse::<TurnConvention>()
                        .map(|c| cfg.turn_convention = c),
                ),
                _ => None,
            };

            match applied {
                Some(result) => {
                    result.map_err(|reason| malformed(format!("{}: {}", key, reason)))?;
                    report.recognized.push(key);
                }
                None => {
                    warn!("Unknown key '{}' on line {}, ignoring", key, line);
                    report.unknown.push((line, key));
                }
            }
        }

        cfg.start = Pose::new(cfg.start.x, cfg.start.y, start_heading);
        Ok((cfg, report))
    }

    /// Reads and parses an environment file
    pub fn load(path: &Path) -> Result<(Self, ParseReport), BenchError> {
        EnvConfig::load_over(path, EnvConfig::default())
    }

    fn load_over(path: &Path, base: EnvConfig) -> Result<(Self, ParseReport), BenchError> {
        let text = fs::read_to_string(path)?;
        let parsed = EnvConfig::parse_over(&text, base)?;
        info!(
            "Loaded environment {} with {} obstacles",
            path.display(),
            parsed.0.obstacles.len()
        );
        Ok(parsed)
    }

    /// Like [`EnvConfig::load`], but a missing file yields the defaults
    pub fn load_or_default(path: &Path) -> Result<(Self, ParseReport), BenchError> {
        EnvConfig::load_with_base(path, EnvConfig::default())
    }

    /// Loads `path` on top of `base`; a missing file yields `base` unchanged
    pub fn load_with_base(
        path: &Path,
        base: EnvConfig,
    ) -> Result<(Self, ParseReport), BenchError> {
        if path.exists() {
            EnvConfig::load_over(path, base)
        } else {
            warn!("Environment {} not found, starting from defaults", path.display());
            Ok((base, ParseReport::default()))
        }
    }
}

/// Replaces every `OBSTACLE=` line of `source` with a fresh block.
///
/// Non-obstacle lines keep their order. The new block (blank line, header,
/// one `OBSTACLE=` line per obstacle) goes where the first old obstacle line
/// was, or at the end when there was none. An empty layout only removes.
pub fn merge_obstacle_block(source: &str, obstacles: &[Obstacle]) -> String {
    let lines: Vec<&str> = source.lines().collect();
    let first_obstacle = lines.iter().position(|line| is_obstacle_line(line));

    let mut block: Vec<String> = Vec::new();
    if !obstacles.is_empty() {
        block.push(String::new());
        block.push(OBSTACLE_BLOCK_HEADER.to_string());
        block.extend(obstacles.iter().map(|o| format!("{}={}", OBSTACLE_KEY, o)));
    }

    let mut out: Vec<String> = Vec::with_capacity(lines.len() + block.len());
    for (index, line) in lines.iter().enumerate() {
        if Some(index) == first_obstacle {
            out.append(&mut block);
        }
        if !is_obstacle_line(line) {
            out.push((*line).to_string());
        }
    }
    out.append(&mut block);

    let mut text = out.join("\n").trim_end().to_string();
    text.push('\n');
    text
}

/// Where a generated layout ended up
#[derive(Clone, Debug, PartialEq)]
pub struct WriteOutcome {
    /// File that received the merged text
    pub written: PathBuf,
    /// Backup of the previous content for in-place rewrites
    pub backup: Option<PathBuf>,
}

/// Writes `obstacles` into the environment at `env_path`.
///
/// With `output` set, the merged text goes there and `env_path` is left alone.
/// Otherwise the file is rewritten in place, after copying any existing
/// content to `<file>.bak`.
pub fn write_obstacles(
    env_path: &Path,
    obstacles: &[Obstacle],
    output: Option<&Path>,
) -> Result<WriteOutcome, BenchError> {
    let existing = env_path.exists();
    let source = if existing {
        fs::read_to_string(env_path)?
    } else {
        String::new()
    };
    let merged = merge_obstacle_block(&source, obstacles);

    match output {
        Some(out) => {
            fs::write(out, merged)?;
            Ok(WriteOutcome {
                written: out.to_path_buf(),
                backup: None,
            })
        }
        None => {
            let backup = if existing {
                let mut backup = env_path.as_os_str().to_owned();
                backup.push(".bak");
                let backup = PathBuf::from(backup);
                fs::write(&backup, &source)?;
                Some(backup)
            } else {
                None
            };
            fs::write(env_path, merged)?;
            Ok(WriteOutcome {
                written: env_path.to_path_buf(),
                backup,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decomment_strips_inline_comments() {
        assert_eq!(decomment("  GOAL_X = 5 # far away"), "GOAL_X = 5");
        assert_eq!(decomment("# only a comment"), "");
    }

    #[test]
    fn obstacle_line_detection() {
        assert!(is_obstacle_line("OBSTACLE=circle:1,2,3"));
        assert!(is_obstacle_line("obstacle = circle:1,2,3 # note"));
        assert!(!is_obstacle_line("# OBSTACLE=circle:1,2,3"));
        assert!(!is_obstacle_line("GOAL_X=1"));
    }

    #[test]
    fn counts_tolerate_trailing_zero() {
        assert_eq!(parse_count("600.0"), Ok(600));
        assert!(parse_count("600.5").is_err());
        assert!(parse_count("-1").is_err());
    }

    #[test]
    fn heading_is_wrapped_after_parse() {
        let (cfg, _) = EnvConfig::parse("START_HEADING_DEG=-90").unwrap();
        assert_eq!(cfg.start.heading_deg, 270.0);
    }
}
