//! Text for the panel above the board: bomb counter, timer and face.

use serde::{Deserialize, Serialize};
use web_time::Duration;

use crate::BoardStatus;

const ERROR_TEXT: &str = "ERR";

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Face {
    Neutral,
    Won,
    Lost,
}

impl Face {
    pub const fn for_status(status: BoardStatus) -> Self {
        match status {
            BoardStatus::Won => Self::Won,
            BoardStatus::Lost => Self::Lost,
            BoardStatus::NotStarted | BoardStatus::Started => Self::Neutral,
        }
    }
}

/// Three characters wide, negative counts keep two digits after the sign.
pub fn bomb_counter_text(remaining: isize) -> String {
    let text = if (0..=99).contains(&remaining) {
        format!("{remaining:03}")
    } else if remaining < 0 {
        format!("-{:02}", remaining.unsigned_abs())
    } else {
        remaining.to_string()
    };

    if text.len() > 3 {
        ERROR_TEXT.to_string()
    } else {
        text
    }
}

/// Seconds up to 999, then minutes, hours and days with a unit suffix.
pub fn timer_text(status: BoardStatus, elapsed: Duration) -> String {
    if status.is_ready() {
        return "---".to_string();
    }

    let seconds = elapsed.as_secs_f64();
    let minutes = seconds / 60.0;
    let hours = minutes / 60.0;
    let days = hours / 24.0;

    if seconds <= 999.0 {
        format!("{:03}", round_half_away(seconds))
    } else if minutes <= 99.0 {
        format!("{:02}M", round_half_away(minutes))
    } else if hours <= 99.0 {
        format!("{:02}H", round_half_away(hours))
    } else if days <= 99.0 {
        format!("{:02}D", round_half_away(days))
    } else {
        ERROR_TEXT.to_string()
    }
}

fn round_half_away(value: f64) -> u64 {
    value.round() as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bomb_counter_pads_and_signs() {
        assert_eq!(bomb_counter_text(0), "000");
        assert_eq!(bomb_counter_text(7), "007");
        assert_eq!(bomb_counter_text(99), "099");
        assert_eq!(bomb_counter_text(100), "100");
        assert_eq!(bomb_counter_text(-5), "-05");
        assert_eq!(bomb_counter_text(-99), "-99");
    }

    #[test]
    fn bomb_counter_overflows_to_error() {
        assert_eq!(bomb_counter_text(1000), "ERR");
        assert_eq!(bomb_counter_text(-100), "ERR");
    }

    #[test]
    fn timer_hidden_before_start() {
        assert_eq!(timer_text(BoardStatus::NotStarted, Duration::from_secs(5)), "---");
    }

    #[test]
    fn timer_units() {
        use BoardStatus::*;
        assert_eq!(timer_text(Started, Duration::ZERO), "000");
        assert_eq!(timer_text(Started, Duration::from_millis(5_600)), "006");
        assert_eq!(timer_text(Won, Duration::from_secs(999)), "999");
        assert_eq!(timer_text(Lost, Duration::from_secs(1_000)), "17M");
        assert_eq!(timer_text(Started, Duration::from_secs(99 * 60)), "99M");
        assert_eq!(timer_text(Started, Duration::from_secs(3 * 3600)), "03H");
        assert_eq!(timer_text(Started, Duration::from_secs(5 * 86_400)), "05D");
        assert_eq!(timer_text(Started, Duration::from_secs(100 * 86_400)), "ERR");
    }

    #[test]
    fn face_follows_status() {
        assert_eq!(Face::for_status(BoardStatus::Started), Face::Neutral);
        assert_eq!(Face::for_status(BoardStatus::Won), Face::Won);
        assert_eq!(Face::for_status(BoardStatus::Lost), Face::Lost);
    }
}
