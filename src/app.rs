use chrono::NaiveDateTime;
use crossterm::event::KeyCode;
use ratatui::widgets::ListState;
use tracing::trace;

use crate::{
    countdown::{Countdown, Remaining},
    data::Fixtures,
    simulator::LiveScoreSimulator,
    timer::TimerEvent,
};

#[derive(Debug)]
pub struct App {
    pub should_quit: bool,
    pub fixtures: Fixtures,
    pub countdown: Countdown,
    pub remaining: Remaining,
    pub simulator: LiveScoreSimulator,
    pub results_state: ListState,
    pub show_flags: bool,
}

impl App {
    pub fn new(fixtures: Fixtures, countdown: Countdown, simulator: LiveScoreSimulator, now: NaiveDateTime) -> Self {
        let mut results_state = ListState::default();
        if !fixtures.results.is_empty() {
            results_state.select(Some(0));
        }

        Self {
            should_quit: false,
            remaining: countdown.remaining_at(now),
            fixtures,
            countdown,
            simulator,
            results_state,
            show_flags: true,
        }
    }

    pub fn on_timer(&mut self, event: TimerEvent, now: NaiveDateTime) {
        match event {
            TimerEvent::Countdown => {
                self.remaining = self.countdown.remaining_at(now);
                trace!(remaining = %self.remaining, "countdown tick");
            }
            TimerEvent::LiveScore => self.simulator.tick(&mut self.fixtures.live),
        }
    }

    pub fn on_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('f') => self.show_flags = !self.show_flags,
            KeyCode::Down | KeyCode::Char('j') => self.next(),
            KeyCode::Up | KeyCode::Char('k') => self.previous(),
            _ => {}
        }
    }

    fn next(&mut self) {
        let len = self.fixtures.results.len();
        if len == 0 {
            return;
        }

        let i = match self.results_state.selected() {
            Some(i) if i + 1 < len => i + 1,
            _ => 0,
        };
        self.results_state.select(Some(i));
    }

    fn previous(&mut self) {
        let len = self.fixtures.results.len();
        if len == 0 {
            return;
        }

        let i = match self.results_state.selected() {
            Some(0) | None => len - 1,
            Some(i) => i - 1,
        };
        self.results_state.select(Some(i));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate, NaiveTime};

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 1, 26).unwrap().and_hms_opt(19, 29, 58).unwrap()
    }

    fn app() -> App {
        App::new(
            Fixtures::builtin().unwrap(),
            Countdown::new(NaiveTime::from_hms_opt(19, 30, 0).unwrap()),
            LiveScoreSimulator::seeded(1),
            now(),
        )
    }

    #[test]
    fn test_countdown_is_ready_before_first_tick() {
        assert_eq!(app().remaining.to_string(), "00:00:02");
    }

    #[test]
    fn test_countdown_tick_rolls_over() {
        let mut app = app();
        app.on_timer(TimerEvent::Countdown, now() + Duration::seconds(3));
        assert_eq!(app.remaining.to_string(), "23:59:59");
    }

    #[test]
    fn test_live_tick_leaves_sets_alone() {
        let mut app = app();
        let sets = app.fixtures.live.sets.clone();
        let results = app.fixtures.results.clone();
        for _ in 0..10 {
            app.on_timer(TimerEvent::LiveScore, now());
        }
        assert_eq!(app.fixtures.live.sets, sets);
        assert_eq!(app.fixtures.results, results);
    }

    #[test]
    fn test_result_navigation_wraps() {
        let mut app = app();
        app.on_key(KeyCode::Char('k'));
        assert_eq!(app.results_state.selected(), Some(5));
        app.on_key(KeyCode::Down);
        assert_eq!(app.results_state.selected(), Some(0));
        app.on_key(KeyCode::Char('j'));
        assert_eq!(app.results_state.selected(), Some(1));
    }

    #[test]
    fn test_keys() {
        let mut app = app();
        app.on_key(KeyCode::Char('f'));
        assert!(!app.show_flags);
        app.on_key(KeyCode::Char('x'));
        assert!(!app.should_quit);
        app.on_key(KeyCode::Char('q'));
        assert!(app.should_quit);
    }
}
