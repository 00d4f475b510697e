mod app;
mod countdown;
mod data;
mod model;
mod simulator;
mod timer;
mod ui;

use std::{fs::File, io, path::PathBuf, sync::Mutex, time::Duration};

use anyhow::{Context, Result};
use chrono::{Local, NaiveDateTime, NaiveTime};
use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use tokio::sync::mpsc;
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use app::App;
use countdown::Countdown;
use data::Fixtures;
use simulator::LiveScoreSimulator;
use timer::{RepeatingTimer, TimerEvent};

const COUNTDOWN_PERIOD: Duration = Duration::from_secs(1);

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Local time of day the final starts (HH:MM:SS or HH:MM)
    #[arg(short, long, default_value = "19:30:00", value_parser = parse_time_of_day)]
    target: NaiveTime,

    /// Seconds between simulated live score updates
    #[arg(short, long, default_value_t = 3, value_parser = clap::value_parser!(u64).range(1..))]
    interval: u64,

    /// Load tournament fixtures from a JSON file instead of the built-in ones
    #[arg(long)]
    fixtures: Option<PathBuf>,

    /// Seed for the live score simulation
    #[arg(long)]
    seed: Option<u64>,

    /// Start with flag glyphs hidden
    #[arg(long)]
    no_flags: bool,

    /// Write logs to this file (filtered by RUST_LOG)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Print a single frame to stdout and exit
    #[arg(long)]
    snapshot: bool,

    /// Snapshot width in columns
    #[arg(long, default_value_t = 120)]
    width: u16,

    /// Snapshot height in rows
    #[arg(long, default_value_t = 40)]
    height: u16,
}

fn parse_time_of_day(s: &str) -> Result<NaiveTime, String> {
    NaiveTime::parse_from_str(s, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M"))
        .map_err(|_| format!("expected HH:MM:SS or HH:MM, got {:?}", s))
}

fn init_logging(log_file: Option<&PathBuf>) -> Result<()> {
    // stdout belongs to the terminal UI, so logs only go to a file
    let Some(path) = log_file else {
        return Ok(());
    };
    let file = File::create(path).with_context(|| format!("failed to create log file {}", path.display()))?;

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(Mutex::new(file)).with_ansi(false))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,courtside=debug")))
        .init();
    Ok(())
}

fn local_now() -> NaiveDateTime {
    Local::now().naive_local()
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.log_file.as_ref())?;

    let fixtures = match &args.fixtures {
        Some(path) => Fixtures::from_file(path)?,
        None => Fixtures::builtin()?,
    };
    info!(
        results = fixtures.results.len(),
        odds = fixtures.odds.len(),
        source = ?args.fixtures,
        "fixtures loaded"
    );

    let simulator = match args.seed {
        Some(seed) => LiveScoreSimulator::seeded(seed),
        None => LiveScoreSimulator::from_entropy(),
    };
    let countdown = Countdown::new(args.target);
    let mut app = App::new(fixtures, countdown, simulator, local_now());
    app.show_flags = !args.no_flags;

    if args.snapshot {
        print!("{}", ui::render_snapshot(&mut app, args.width, args.height)?);
        return Ok(());
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Both timers post into one channel; the UI loop applies every tick
    let (tx, mut rx) = mpsc::channel::<TimerEvent>(100);
    let score_period = Duration::from_secs(args.interval);
    let countdown_timer = RepeatingTimer::start(COUNTDOWN_PERIOD, COUNTDOWN_PERIOD, TimerEvent::Countdown, tx.clone());
    let score_timer = RepeatingTimer::start(score_period, score_period, TimerEvent::LiveScore, tx);
    info!(target_time = %args.target, interval = args.interval, "dashboard started");

    let res = run_app(&mut terminal, &mut app, &mut rx).await;

    countdown_timer.cancel();
    score_timer.cancel();
    info!("timers cancelled");

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        warn!(error = %err, "event loop failed");
        println!("{:?}", err)
    }

    Ok(())
}

async fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    rx: &mut mpsc::Receiver<TimerEvent>,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| ui::ui(f, app))?;

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.on_key(key.code);
                }
            }
        }

        while let Ok(tick) = rx.try_recv() {
            app.on_timer(tick, local_now());
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_time_of_day() {
        assert_eq!(parse_time_of_day("19:30:00"), Ok(NaiveTime::from_hms_opt(19, 30, 0).unwrap()));
        assert_eq!(parse_time_of_day("07:05"), Ok(NaiveTime::from_hms_opt(7, 5, 0).unwrap()));
        assert!(parse_time_of_day("7pm").is_err());
    }

    #[test]
    fn test_args_defaults() {
        let args = Args::parse_from(["courtside"]);
        assert_eq!(args.target, NaiveTime::from_hms_opt(19, 30, 0).unwrap());
        assert_eq!(args.interval, 3);
        assert!(args.fixtures.is_none());
        assert!(!args.snapshot);
    }

    #[test]
    fn test_interval_must_be_positive() {
        assert!(Args::try_parse_from(["courtside", "--interval", "0"]).is_err());
        let args = Args::try_parse_from(["courtside", "-i", "5", "-t", "14:00", "--seed", "9"]).unwrap();
        assert_eq!(args.interval, 5);
        assert_eq!(args.seed, Some(9));
        assert_eq!(args.target, NaiveTime::from_hms_opt(14, 0, 0).unwrap());
    }
}
