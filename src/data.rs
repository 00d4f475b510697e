use std::{collections::HashSet, fs, path::Path};

use anyhow::{ensure, Context, Result};
use serde::{Deserialize, Serialize};

use crate::model::{hex_digits, LiveMatch, MatchResult, OddsEntry, Tournament};

const BUILTIN_FIXTURES: &str = include_str!("../fixtures/ao2025.json");

/// Everything the dashboard shows. Loaded once at startup; after that only the
/// live match's current game and server change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fixtures {
    pub tournament: Tournament,
    pub results: Vec<MatchResult>,
    pub live: LiveMatch,
    pub odds: Vec<OddsEntry>,
}

impl Fixtures {
    pub fn builtin() -> Result<Self> {
        Self::parse(BUILTIN_FIXTURES).context("built-in fixtures are invalid")
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read fixtures from {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("invalid fixtures in {}", path.display()))
    }

    pub fn parse(content: &str) -> Result<Self> {
        let fixtures: Fixtures = serde_json::from_str(content)?;
        fixtures.validate()?;
        Ok(fixtures)
    }

    pub fn validate(&self) -> Result<()> {
        for (name, color) in self.tournament.theme.colors() {
            ensure!(
                hex_digits(color).is_some(),
                "theme {} colour must be six hex digits (RRGGBB), got {:?}",
                name,
                color
            );
        }

        let mut ids = HashSet::new();
        for result in &self.results {
            ensure!(ids.insert(result.id), "duplicate match result id {}", result.id);
            ensure!(
                !result.score.trim().is_empty(),
                "match result {} has an empty score",
                result.id
            );
        }

        for entry in &self.odds {
            ensure!(
                entry.odds.is_finite() && entry.odds > 0.0,
                "odds for {} must be a positive number, got {}",
                entry.name,
                entry.odds
            );
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Point, Side};

    #[test]
    fn test_builtin_fixtures() {
        let fixtures = Fixtures::builtin().expect("built-in fixtures should load");

        assert_eq!(fixtures.results.len(), 6);
        assert_eq!(fixtures.odds.len(), 4);
        assert_eq!(fixtures.tournament.stats.len(), 4);

        let live = &fixtures.live;
        assert_eq!(live.player1.name, "Jannik Sinner");
        assert_eq!(live.player2.name, "Alexander Zverev");
        assert_eq!(live.status, "3rd Set");
        assert_eq!(live.serving(), Side::Player2);
        assert_eq!(live.current_game().p1, Point::Thirty);
        assert_eq!(live.current_game().p2, Point::Forty);
        let sets: Vec<(u8, u8)> = live.sets.iter().map(|s| (s.p1, s.p2)).collect();
        assert_eq!(sets, vec![(6, 3), (7, 6), (4, 5)]);
    }

    #[test]
    fn test_every_result_has_one_winner_and_a_score() {
        let fixtures = Fixtures::builtin().unwrap();
        for result in &fixtures.results {
            assert!(!result.score.is_empty());
            let winners = Side::BOTH.iter().filter(|s| **s == result.winner).count();
            assert_eq!(winners, 1);
        }
        // the doubles semi went to the second team
        assert_eq!(fixtures.results[5].winner, Side::Player2);
        assert_eq!(fixtures.results[5].player(Side::Player2).name, "Bolelli/Vavassori");
        assert!(fixtures.results[4].player1.seed.is_none());
    }

    #[test]
    fn test_rejects_duplicate_ids() {
        let mut fixtures = Fixtures::builtin().unwrap();
        fixtures.results[1].id = fixtures.results[0].id;
        let err = fixtures.validate().unwrap_err();
        assert!(err.to_string().contains("duplicate match result id"));
    }

    #[test]
    fn test_rejects_empty_score_and_bad_odds() {
        let mut fixtures = Fixtures::builtin().unwrap();
        fixtures.results[2].score = "  ".to_string();
        assert!(fixtures.validate().is_err());

        let mut fixtures = Fixtures::builtin().unwrap();
        fixtures.odds[0].odds = 0.0;
        assert!(fixtures.validate().is_err());
    }

    #[test]
    fn test_rejects_non_hex_theme_colour() {
        let content = BUILTIN_FIXTURES.replacen(r#""primary": "C4D600""#, r#""primary": "€abc""#, 1);
        let err = Fixtures::parse(&content).unwrap_err();
        assert!(err.to_string().contains("theme primary colour"));

        let mut fixtures = Fixtures::builtin().unwrap();
        fixtures.tournament.theme.background = "#0C2340".to_string();
        assert!(fixtures.validate().is_ok());
        fixtures.tournament.theme.accent = "orange".to_string();
        assert!(fixtures.validate().is_err());
    }

    #[test]
    fn test_rejects_unknown_winner() {
        let content = BUILTIN_FIXTURES.replacen(r#""winner": "player1""#, r#""winner": "player3""#, 1);
        assert!(Fixtures::parse(&content).is_err());
    }

    #[test]
    fn test_from_file_reports_path() {
        let err = Fixtures::from_file(Path::new("does/not/exist.json")).unwrap_err();
        assert!(err.to_string().contains("does/not/exist.json"));
    }
}
