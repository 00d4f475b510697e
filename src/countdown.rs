use std::fmt;

use chrono::{Days, NaiveDateTime, NaiveTime};

const SECS_PER_MINUTE: i64 = 60;
const SECS_PER_HOUR: i64 = 60 * SECS_PER_MINUTE;

/// Time left until the next occurrence of a fixed local time of day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Countdown {
    target: NaiveTime,
}

impl Countdown {
    pub fn new(target: NaiveTime) -> Self {
        Self { target }
    }

    /// Next occurrence of the target at or after `now`. Evaluated on every
    /// call, so a session that runs past the target rolls over to tomorrow.
    pub fn next_target(&self, now: NaiveDateTime) -> NaiveDateTime {
        let today = now.date().and_time(self.target);
        if today >= now {
            today
        } else {
            // the last day chrono can represent has no tomorrow; stay at zero
            today.checked_add_days(Days::new(1)).unwrap_or(now)
        }
    }

    pub fn remaining_at(&self, now: NaiveDateTime) -> Remaining {
        let left = self.next_target(now) - now;
        Remaining::from_seconds(left.num_seconds())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Remaining {
    pub hours: u8,
    pub minutes: u8,
    pub seconds: u8,
}

impl Remaining {
    pub fn from_seconds(total: i64) -> Self {
        let total = total.clamp(0, 24 * SECS_PER_HOUR - 1);
        Self {
            hours: (total / SECS_PER_HOUR) as u8,
            minutes: (total % SECS_PER_HOUR / SECS_PER_MINUTE) as u8,
            seconds: (total % SECS_PER_MINUTE) as u8,
        }
    }

    pub fn total_seconds(&self) -> i64 {
        self.hours as i64 * SECS_PER_HOUR + self.minutes as i64 * SECS_PER_MINUTE + self.seconds as i64
    }

    /// Hours, minutes and seconds, each zero-padded to two digits.
    pub fn digits(&self) -> [String; 3] {
        [
            format!("{:02}", self.hours),
            format!("{:02}", self.minutes),
            format!("{:02}", self.seconds),
        ]
    }
}

impl fmt::Display for Remaining {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}:{:02}", self.hours, self.minutes, self.seconds)
    }
}
