use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};
use tracing::debug;

use crate::model::{GameScore, LiveMatch, Point, Side};

/// Fakes live play by resampling the current game on every tick. Each tick is
/// independent of the last; there is no deuce, advantage or game-won logic.
#[derive(Debug)]
pub struct LiveScoreSimulator<R = StdRng> {
    rng: R,
}

impl LiveScoreSimulator<StdRng> {
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }
}

impl<R: Rng> LiveScoreSimulator<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Overwrites the current game and the server. Sets and players stay as they are.
    pub fn tick(&mut self, live: &mut LiveMatch) {
        let game = GameScore {
            p1: self.random_point(),
            p2: self.random_point(),
        };
        let serving = if self.rng.gen_bool(0.5) { Side::Player1 } else { Side::Player2 };

        debug!(p1 = %game.p1, p2 = %game.p2, ?serving, "live score resampled");
        live.set_current(game, serving);
    }

    fn random_point(&mut self) -> Point {
        // ALL is non-empty, so choose always yields
        *Point::ALL.choose(&mut self.rng).unwrap_or(&Point::Love)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Fixtures;
    use std::collections::HashMap;

    const TICKS: usize = 4000;

    fn live_match() -> LiveMatch {
        Fixtures::builtin().unwrap().live
    }

    #[test]
    fn test_points_are_uniform_per_player() {
        let mut sim = LiveScoreSimulator::seeded(7);
        let mut live = live_match();
        let mut counts: HashMap<(Side, Point), usize> = HashMap::new();

        for _ in 0..TICKS {
            sim.tick(&mut live);
            for side in Side::BOTH {
                let point = live.current_game().points(side);
                assert!(Point::ALL.contains(&point));
                *counts.entry((side, point)).or_default() += 1;
            }
        }

        for side in Side::BOTH {
            for point in Point::ALL {
                let freq = counts.get(&(side, point)).copied().unwrap_or(0) as f64 / TICKS as f64;
                assert!(
                    (freq - 0.25).abs() < 0.04,
                    "{:?} scored {} with frequency {}",
                    side,
                    point,
                    freq
                );
            }
        }
    }

    #[test]
    fn test_serving_is_a_coin_flip() {
        let mut sim = LiveScoreSimulator::seeded(11);
        let mut live = live_match();
        let mut player1 = 0;

        for _ in 0..TICKS {
            sim.tick(&mut live);
            if live.serving() == Side::Player1 {
                player1 += 1;
            }
        }

        let freq = player1 as f64 / TICKS as f64;
        assert!((freq - 0.5).abs() < 0.04, "player 1 served {} of ticks", freq);
    }

    #[test]
    fn test_only_current_game_and_serving_change() {
        let mut sim = LiveScoreSimulator::seeded(3);
        let mut live = live_match();
        let before = live.clone();

        for _ in 0..50 {
            sim.tick(&mut live);
        }

        assert_eq!(live.sets, before.sets);
        assert_eq!(live.player1, before.player1);
        assert_eq!(live.player2, before.player2);
        assert_eq!(live.status, "3rd Set");
        assert_eq!(live.court, before.court);
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let mut a = LiveScoreSimulator::seeded(42);
        let mut b = LiveScoreSimulator::seeded(42);
        let (mut live_a, mut live_b) = (live_match(), live_match());

        for _ in 0..20 {
            a.tick(&mut live_a);
            b.tick(&mut live_b);
            assert_eq!(live_a.current_game(), live_b.current_game());
            assert_eq!(live_a.serving(), live_b.serving());
        }
    }
}
