use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub name: String,
    pub country: String,
    pub flag: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u32>, // doubles teams have none
}

/// One of the two players in a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Player1,
    Player2,
}

impl Side {
    pub const BOTH: [Side; 2] = [Side::Player1, Side::Player2];
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResult {
    pub id: u32,
    pub round: String,
    pub player1: Player,
    pub player2: Player,
    pub score: String,
    pub winner: Side,
    pub court: String,
}

impl MatchResult {
    pub fn player(&self, side: Side) -> &Player {
        match side {
            Side::Player1 => &self.player1,
            Side::Player2 => &self.player2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetScore {
    pub p1: u8,
    pub p2: u8,
}

impl SetScore {
    pub fn games(&self, side: Side) -> u8 {
        match side {
            Side::Player1 => self.p1,
            Side::Player2 => self.p2,
        }
    }
}

/// Point score within a game, in tennis notation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Point {
    Love,
    Fifteen,
    Thirty,
    Forty,
}

impl Point {
    pub const ALL: [Point; 4] = [Point::Love, Point::Fifteen, Point::Thirty, Point::Forty];

    pub fn value(self) -> u8 {
        match self {
            Point::Love => 0,
            Point::Fifteen => 15,
            Point::Thirty => 30,
            Point::Forty => 40,
        }
    }
}

impl TryFrom<u8> for Point {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Point::ALL
            .into_iter()
            .find(|p| p.value() == value)
            .ok_or_else(|| format!("{} is not a tennis point (expected 0, 15, 30 or 40)", value))
    }
}

impl From<Point> for u8 {
    fn from(point: Point) -> u8 {
        point.value()
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameScore {
    pub p1: Point,
    pub p2: Point,
}

impl GameScore {
    pub fn points(&self, side: Side) -> Point {
        match side {
            Side::Player1 => self.p1,
            Side::Player2 => self.p2,
        }
    }
}

/// The match currently on court. Only `current_game` and `serving` ever change,
/// and only through [`LiveMatch::set_current`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LiveMatch {
    pub player1: Player,
    pub player2: Player,
    pub sets: Vec<SetScore>,
    pub status: String,
    #[serde(default)]
    pub round: String,
    #[serde(default)]
    pub court: String,
    current_game: GameScore,
    serving: Side,
}

impl LiveMatch {
    pub fn new(
        player1: Player,
        player2: Player,
        sets: Vec<SetScore>,
        status: impl Into<String>,
        current_game: GameScore,
        serving: Side,
    ) -> Self {
        Self {
            player1,
            player2,
            sets,
            status: status.into(),
            round: String::new(),
            court: String::new(),
            current_game,
            serving,
        }
    }

    pub fn player(&self, side: Side) -> &Player {
        match side {
            Side::Player1 => &self.player1,
            Side::Player2 => &self.player2,
        }
    }

    pub fn current_game(&self) -> GameScore {
        self.current_game
    }

    pub fn serving(&self) -> Side {
        self.serving
    }

    pub(crate) fn set_current(&mut self, game: GameScore, serving: Side) {
        self.current_game = game;
        self.serving = serving;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OddsChange {
    Up,
    Down,
    Same,
}

impl OddsChange {
    pub fn arrow(self) -> &'static str {
        match self {
            OddsChange::Up => "↑",
            OddsChange::Down => "↓",
            OddsChange::Same => "−",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OddsEntry {
    pub name: String,
    pub country: String,
    pub flag: String,
    pub odds: f64,
    pub change: OddsChange,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuickStat {
    pub value: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Theme {
    pub primary: String,    // hex, e.g. "C4D600"
    pub accent: String,
    pub background: String,
}

impl Theme {
    pub fn colors(&self) -> [(&'static str, &str); 3] {
        [
            ("primary", self.primary.as_str()),
            ("accent", self.accent.as_str()),
            ("background", self.background.as_str()),
        ]
    }
}

/// The six hex digits of an `RRGGBB` colour, with or without a leading `#`.
pub fn hex_digits(color: &str) -> Option<&str> {
    let hex = color.strip_prefix('#').unwrap_or(color);
    (hex.len() == 6 && hex.bytes().all(|b| b.is_ascii_hexdigit())).then_some(hex)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tournament {
    pub brand: String,
    pub headline: Vec<String>,
    pub banner: String,
    pub tagline: String,
    pub nav_links: Vec<String>,
    pub final_heading: String,
    pub final_subtitle: String,
    pub odds_subtitle: String,
    pub odds_disclaimer: String,
    pub stats: Vec<QuickStat>,
    pub footer_brand: String,
    pub footer_links: Vec<String>,
    pub theme: Theme,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_rejects_non_tennis_values() {
        assert_eq!(Point::try_from(30), Ok(Point::Thirty));
        assert!(Point::try_from(45).is_err());
        assert!(serde_json::from_str::<GameScore>(r#"{"p1": 15, "p2": 20}"#).is_err());
    }

    #[test]
    fn test_game_score_serializes_as_numbers() {
        let game = GameScore { p1: Point::Love, p2: Point::Forty };
        assert_eq!(serde_json::to_string(&game).unwrap(), r#"{"p1":0,"p2":40}"#);
    }

    #[test]
    fn test_hex_digits() {
        assert_eq!(hex_digits("#C4D600"), Some("C4D600"));
        assert_eq!(hex_digits("0c2340"), Some("0c2340"));
        assert_eq!(hex_digits("€abc"), None);
        assert_eq!(hex_digits("C4D60G"), None);
        assert_eq!(hex_digits("##C4D600"), None);
    }

    #[test]
    fn test_side_names() {
        let side: Side = serde_json::from_str(r#""player2""#).unwrap();
        assert_eq!(side, Side::Player2);
    }
}
