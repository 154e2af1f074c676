use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use sweeper_core::Settings;

/// Reads settings from a TOML file, or returns the defaults when no path is given.
pub fn load(path: Option<&Path>) -> Result<Settings> {
    let Some(path) = path else {
        log::debug!("no config file, using default settings");
        return Ok(Settings::default());
    };

    let text = fs::read_to_string(path)
        .with_context(|| format!("could not read config file {}", path.display()))?;
    let settings = parse(&text).with_context(|| format!("invalid config file {}", path.display()))?;
    log::debug!("loaded settings from {}: {:?}", path.display(), settings);
    Ok(settings)
}

pub fn parse(text: &str) -> Result<Settings> {
    Ok(toml::from_str(text)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sweeper_core::{BoardConfig, Difficulty};

    #[test]
    fn empty_file_gives_defaults() {
        assert_eq!(parse("").unwrap(), Settings::default());
    }

    #[test]
    fn parses_all_fields() {
        let settings = parse(
            r#"
            player_name = "Ada"
            difficulty = "medium"
            seed_leaderboard = false

            [custom]
            rows = 10
            cols = 12
            mines = 20
            "#,
        )
        .unwrap();

        assert_eq!(settings.player_name, "Ada");
        assert_eq!(settings.difficulty, Difficulty::Medium);
        assert!(!settings.seed_leaderboard);
        assert_eq!(settings.board_config().unwrap(), BoardConfig::new(10, 12, 20).unwrap());
    }

    #[test]
    fn rejects_unknown_difficulty() {
        assert!(parse(r#"difficulty = "nightmare""#).is_err());
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(load(Some(Path::new("/nonexistent/sweeper.toml"))).is_err());
        assert_eq!(load(None).unwrap(), Settings::default());
    }
}
