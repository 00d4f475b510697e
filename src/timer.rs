use std::time::Duration;

use tokio::{
    sync::mpsc,
    task::JoinHandle,
    time::{self, Instant, MissedTickBehavior},
};
use tracing::debug;

/// Which timer fired.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    Countdown,
    LiveScore,
}

/// Posts `message` to a channel every `period`. The receiving loop does the
/// actual work, so timers never touch dashboard state themselves.
pub struct RepeatingTimer;

impl RepeatingTimer {
    pub fn start<T>(period: Duration, first_tick_after: Duration, message: T, tx: mpsc::Sender<T>) -> TimerHandle
    where
        T: Clone + Send + std::fmt::Debug + 'static,
    {
        let task = tokio::spawn(async move {
            let mut interval = time::interval_at(Instant::now() + first_tick_after, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                interval.tick().await;
                if tx.send(message.clone()).await.is_err() {
                    debug!(?message, "timer receiver gone, stopping");
                    break;
                }
            }
        });

        TimerHandle { task: Some(task) }
    }
}

/// Stops the timer when cancelled or dropped.
#[derive(Debug)]
pub struct TimerHandle {
    task: Option<JoinHandle<()>>,
}

impl TimerHandle {
    pub fn cancel(mut self) {
        self.abort();
    }

    fn abort(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

impl Drop for TimerHandle {
    fn drop(&mut self) {
        self.abort();
    }
}
